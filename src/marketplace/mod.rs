//! Lead, bid, credit and job lifecycle.
//!
//! Every operation takes the acting `SessionContext` explicitly and runs its
//! writes inside one SQLite transaction.

pub mod acceptance;
pub mod admin;
pub mod jobs;
pub mod leads;
pub mod listing;
pub mod purchase;
pub mod quoting;

pub use acceptance::accept_bid;
pub use admin::grant_credits;
pub use jobs::{move_job, scope_for, JobBoard};
pub use leads::post_lead;
pub use listing::{customer_leads, leads_for_trade, TradeLead, TradeLeadBoard};
pub use purchase::purchase_lead;
pub use quoting::submit_quote;

use rusqlite::{Connection, Transaction, TransactionBehavior};

use crate::errors::ServerError;

/// Start a write transaction that takes the database write lock up front.
pub(crate) fn immediate_tx(conn: &mut Connection) -> Result<Transaction<'_>, ServerError> {
    conn.transaction_with_behavior(TransactionBehavior::Immediate)
        .map_err(|e| ServerError::DbError(format!("begin tx failed: {e}")))
}
