// src/db/magic_links.rs
use rusqlite::{params, Connection, OptionalExtension};

use crate::errors::ServerError;

pub fn insert_magic_link(
    conn: &Connection,
    profile_id: i64,
    digest: &[u8],
    now: i64,
    expires_at: i64,
) -> Result<i64, ServerError> {
    conn.execute(
        "insert into magic_links (profile_id, token_hash, created_at, expires_at) values (?, ?, ?, ?)",
        params![profile_id, digest, now, expires_at],
    )
    .map_err(|e| ServerError::DbError(format!("insert magic link failed: {e}")))?;
    Ok(conn.last_insert_rowid())
}

/// Marks the link used and returns its profile, or `None` when the digest is
/// unknown, expired or already used. The guard lives in the `where` clause,
/// so two concurrent redemptions cannot both see a row.
pub fn consume_magic_link(
    conn: &Connection,
    digest: &[u8],
    now: i64,
) -> Result<Option<i64>, ServerError> {
    conn.query_row(
        r#"
        update magic_links
           set used_at = ?1
         where token_hash = ?2
           and used_at is null
           and expires_at > ?1
        returning profile_id
        "#,
        params![now, digest],
        |row| row.get(0),
    )
    .optional()
    .map_err(|e| ServerError::DbError(format!("consume magic link failed: {e}")))
}

/// Drops links that can no longer be redeemed.
pub fn purge_dead_links(conn: &Connection, now: i64) -> Result<usize, ServerError> {
    conn.execute(
        "delete from magic_links where used_at is not null or expires_at <= ?",
        params![now],
    )
    .map_err(|e| ServerError::DbError(format!("purge magic links failed: {e}")))
}
