// src/marketplace/admin.rs
use rusqlite::Connection;
use tracing::info;

use crate::auth::SessionContext;
use crate::db::credits::{credit, credit_balance, record_transaction, CreditReason};
use crate::errors::ServerError;
use crate::marketplace::immediate_tx;

/// Top up a profile's credit. Returns the new balance.
pub fn grant_credits(
    conn: &mut Connection,
    session: &SessionContext,
    profile_id: i64,
    amount: i64,
    now: i64,
) -> Result<i64, ServerError> {
    session.require_admin()?;
    if amount <= 0 {
        return Err(ServerError::Validation("Credit amount must be a positive number".into()));
    }

    let tx = immediate_tx(conn)?;
    if !credit(&tx, profile_id, amount, now)? {
        return Err(ServerError::NotFound);
    }
    record_transaction(&tx, profile_id, amount, CreditReason::Grant, None, now)?;
    let balance = credit_balance(&tx, profile_id)?;
    tx.commit()
        .map_err(|e| ServerError::DbError(format!("commit grant failed: {e}")))?;

    info!(admin_id = session.profile_id(), profile_id, amount, balance, "credits granted");
    Ok(balance)
}
