pub mod admin;
pub mod blog;
pub mod check_email;
pub mod dashboard;
pub mod home;
pub mod jobs;
pub mod login;
pub mod profile;
pub mod trades_crm;

pub use admin::{admin_page, AdminVm};
pub use blog::{blog_page, blog_post_page};
pub use check_email::check_email_content;
pub use dashboard::dashboard_page;
pub use home::home_page;
pub use jobs::{job_board_section, jobs_page, JOBS_CHANGED};
pub use login::login_page;
pub use profile::profile_page;
pub use trades_crm::{trades_crm_page, TradesCrmVm};
