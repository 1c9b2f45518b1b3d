// src/marketplace/purchase.rs
use rusqlite::Connection;
use tracing::info;

use crate::auth::SessionContext;
use crate::db::credits::{credit_balance, debit, record_transaction, CreditReason};
use crate::db::leads::get_lead;
use crate::db::purchases::{has_purchased, insert_purchase};
use crate::errors::ServerError;
use crate::marketplace::immediate_tx;

/// Buy access to a lead for `cost` credits. Returns the new balance.
///
/// All checks run before the first write, inside the same transaction, so a
/// rejected purchase leaves credit and the purchased set untouched.
pub fn purchase_lead(
    conn: &mut Connection,
    session: &SessionContext,
    lead_id: i64,
    cost: i64,
    now: i64,
) -> Result<i64, ServerError> {
    session.require_trade()?;
    let profile_id = session.profile_id();

    let tx = immediate_tx(conn)?;

    let lead = get_lead(&tx, lead_id)?.ok_or(ServerError::NotFound)?;
    if lead.is_approved {
        return Err(ServerError::Conflict("This lead has already been awarded.".into()));
    }
    if has_purchased(&tx, profile_id, lead_id)? {
        return Err(ServerError::AlreadyPurchased(lead_id));
    }
    let balance = credit_balance(&tx, profile_id)?;
    if balance < cost {
        return Err(ServerError::InsufficientCredit { balance, cost });
    }

    if !debit(&tx, profile_id, cost, now)? {
        return Err(ServerError::InsufficientCredit { balance, cost });
    }
    if !insert_purchase(&tx, profile_id, lead_id, cost, now)? {
        return Err(ServerError::AlreadyPurchased(lead_id));
    }
    record_transaction(&tx, profile_id, -cost, CreditReason::Purchase, Some(lead_id), now)?;

    let new_balance = credit_balance(&tx, profile_id)?;
    tx.commit()
        .map_err(|e| ServerError::DbError(format!("commit purchase failed: {e}")))?;

    info!(profile_id, lead_id, cost, new_balance, "lead purchased");
    Ok(new_balance)
}
