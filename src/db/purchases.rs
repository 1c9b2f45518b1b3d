// src/db/purchases.rs
use rusqlite::{params, Connection};

use crate::errors::ServerError;

pub fn has_purchased(conn: &Connection, profile_id: i64, lead_id: i64) -> Result<bool, ServerError> {
    conn.query_row(
        "select exists(select 1 from lead_purchases where profile_id = ? and lead_id = ?)",
        params![profile_id, lead_id],
        |r| r.get(0),
    )
    .map_err(|e| ServerError::DbError(format!("check purchase failed: {e}")))
}

/// Returns false if the profile already owned the lead.
pub fn insert_purchase(
    conn: &Connection,
    profile_id: i64,
    lead_id: i64,
    credits: i64,
    now: i64,
) -> Result<bool, ServerError> {
    let inserted = conn
        .execute(
            "insert or ignore into lead_purchases (profile_id, lead_id, credits, purchased_at) values (?, ?, ?, ?)",
            params![profile_id, lead_id, credits, now],
        )
        .map_err(|e| ServerError::DbError(format!("insert purchase failed: {e}")))?;
    Ok(inserted == 1)
}

pub fn purchased_lead_ids(conn: &Connection, profile_id: i64) -> Result<Vec<i64>, ServerError> {
    let mut stmt = conn
        .prepare("select lead_id from lead_purchases where profile_id = ? order by lead_id")
        .map_err(|e| ServerError::DbError(e.to_string()))?;
    let rows = stmt
        .query_map(params![profile_id], |r| r.get(0))
        .map_err(|e| ServerError::DbError(e.to_string()))?;

    let mut ids = Vec::new();
    for r in rows {
        ids.push(r.map_err(|e| ServerError::DbError(e.to_string()))?);
    }
    Ok(ids)
}
