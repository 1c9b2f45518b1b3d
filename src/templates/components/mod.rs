pub mod card;
pub mod email_cta;
pub mod error;
pub mod leads;
pub mod toast;

pub use card::{badge, card, stat};
pub use email_cta::email_cta_form;
pub use error::error_page;
pub use leads::{credit_ledger, customer_leads_section, lead_form, trade_leads_section, LEADS_CHANGED};
pub use toast::toast;
