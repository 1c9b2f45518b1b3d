// src/db/credits.rs
use rusqlite::{params, Connection};

use crate::errors::ServerError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreditReason {
    Purchase,
    Grant,
}

impl CreditReason {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Purchase => "purchase",
            Self::Grant => "grant",
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreditTransaction {
    pub id: i64,
    pub delta: i64,
    pub reason: String,
    pub lead_id: Option<i64>,
    pub created_at: i64,
}

pub fn credit_balance(conn: &Connection, profile_id: i64) -> Result<i64, ServerError> {
    conn.query_row(
        "select credit from profiles where id = ?",
        params![profile_id],
        |r| r.get(0),
    )
    .map_err(|e| ServerError::DbError(format!("select credit failed: {e}")))
}

/// Deduct `amount` only if the balance covers it. Returns false when it does not.
pub fn debit(conn: &Connection, profile_id: i64, amount: i64, now: i64) -> Result<bool, ServerError> {
    let updated = conn
        .execute(
            "update profiles set credit = credit - ?1, updated_at = ?2 where id = ?3 and credit >= ?1",
            params![amount, now, profile_id],
        )
        .map_err(|e| ServerError::DbError(format!("debit credit failed: {e}")))?;
    Ok(updated == 1)
}

pub fn credit(conn: &Connection, profile_id: i64, amount: i64, now: i64) -> Result<bool, ServerError> {
    let updated = conn
        .execute(
            "update profiles set credit = credit + ?, updated_at = ? where id = ?",
            params![amount, now, profile_id],
        )
        .map_err(|e| ServerError::DbError(format!("credit profile failed: {e}")))?;
    Ok(updated == 1)
}

pub fn record_transaction(
    conn: &Connection,
    profile_id: i64,
    delta: i64,
    reason: CreditReason,
    lead_id: Option<i64>,
    now: i64,
) -> Result<(), ServerError> {
    conn.execute(
        "insert into credit_transactions (profile_id, delta, reason, lead_id, created_at) values (?, ?, ?, ?, ?)",
        params![profile_id, delta, reason.as_str(), lead_id, now],
    )
    .map_err(|e| ServerError::DbError(format!("record credit transaction failed: {e}")))?;
    Ok(())
}

pub fn recent_transactions(
    conn: &Connection,
    profile_id: i64,
) -> Result<Vec<CreditTransaction>, ServerError> {
    let mut stmt = conn
        .prepare(
            "select id, delta, reason, lead_id, created_at from credit_transactions
             where profile_id = ? order by created_at desc, id desc limit 20",
        )
        .map_err(|e| ServerError::DbError(e.to_string()))?;

    let rows = stmt
        .query_map(params![profile_id], |row| {
            Ok(CreditTransaction {
                id: row.get(0)?,
                delta: row.get(1)?,
                reason: row.get(2)?,
                lead_id: row.get(3)?,
                created_at: row.get(4)?,
            })
        })
        .map_err(|e| ServerError::DbError(e.to_string()))?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r.map_err(|e| ServerError::DbError(e.to_string()))?);
    }
    Ok(out)
}
