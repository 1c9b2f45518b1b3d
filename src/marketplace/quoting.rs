// src/marketplace/quoting.rs
use rusqlite::Connection;
use tracing::info;

use crate::auth::SessionContext;
use crate::db::bids::upsert_pending_bid;
use crate::db::leads::get_lead;
use crate::db::purchases::has_purchased;
use crate::domain::Money;
use crate::errors::ServerError;
use crate::marketplace::immediate_tx;

/// Parse a quote as typed into the quote dialog, e.g. "£4,500" or "4500.50".
pub fn parse_quote_value(input: &str) -> Result<Money, ServerError> {
    Money::parse(input).map_err(ServerError::Validation)
}

/// Submit or revise the signed-in trade's quote on a purchased lead.
/// Returns the bid id. Submitting again updates the same pending bid.
pub fn submit_quote(
    conn: &mut Connection,
    session: &SessionContext,
    lead_id: i64,
    raw_value: &str,
    now: i64,
) -> Result<i64, ServerError> {
    session.require_trade()?;
    let value = parse_quote_value(raw_value)?;
    let profile_id = session.profile_id();

    let tx = immediate_tx(conn)?;

    let lead = get_lead(&tx, lead_id)?.ok_or(ServerError::NotFound)?;
    if !has_purchased(&tx, profile_id, lead_id)? {
        return Err(ServerError::Forbidden(
            "Purchase this lead before sending a quote.".into(),
        ));
    }
    if lead.is_approved {
        return Err(ServerError::Conflict(
            "This lead has already been awarded.".into(),
        ));
    }

    let Some(bid_id) = upsert_pending_bid(&tx, lead_id, profile_id, value, now)? else {
        return Err(ServerError::Conflict(
            "Your quote has already been decided.".into(),
        ));
    };

    tx.commit()
        .map_err(|e| ServerError::DbError(format!("commit quote failed: {e}")))?;

    info!(profile_id, lead_id, bid_id, value = value.pence(), "quote submitted");
    Ok(bid_id)
}
