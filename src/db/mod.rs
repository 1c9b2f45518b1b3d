pub mod bids;
pub mod connection;
pub mod credits;
pub mod jobs;
pub mod leads;
pub mod magic_links;
pub mod profiles;
pub mod purchases;

pub use connection::Database;
