// src/auth/sessions.rs
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use rand::rngs::OsRng;
use rand::RngCore;
use rusqlite::{params, Connection, OptionalExtension};
use sha2::{Digest, Sha256};

use crate::errors::ServerError;

pub const SESSION_COOKIE: &str = "session";

const SECRET_BYTES: usize = 32;

/// A bearer secret for a cookie or a magic link. The raw value is handed to
/// the browser once; only `digest` is written to the database.
pub struct Secret {
    pub raw: String,
    pub digest: Vec<u8>,
}

impl Secret {
    pub fn mint() -> Self {
        let mut bytes = [0u8; SECRET_BYTES];
        OsRng.fill_bytes(&mut bytes);
        let raw = URL_SAFE_NO_PAD.encode(bytes);
        let digest = digest(&raw);
        Self { raw, digest }
    }
}

pub fn digest(raw: &str) -> Vec<u8> {
    Sha256::digest(raw.as_bytes()).to_vec()
}

pub fn create_session(
    conn: &Connection,
    profile_id: i64,
    now: i64,
    ttl_secs: i64,
) -> Result<String, ServerError> {
    let secret = Secret::mint();
    let expires_at = now + ttl_secs;

    conn.execute(
        r#"
        insert into sessions (profile_id, token_hash, created_at, expires_at)
        values (?, ?, ?, ?)
        "#,
        params![profile_id, secret.digest, now, expires_at],
    )
    .map_err(|e| ServerError::DbError(format!("create session failed: {e}")))?;

    Ok(secret.raw)
}

/// Profile id behind a live (unexpired, unrevoked) session token.
pub fn load_profile_id_from_session(
    conn: &Connection,
    raw_token: &str,
    now: i64,
) -> Result<Option<i64>, ServerError> {
    conn.query_row(
        r#"
        select s.profile_id
        from sessions s
        where s.token_hash = ?
          and s.expires_at > ?
          and s.revoked_at is null
        "#,
        params![digest(raw_token), now],
        |row| row.get(0),
    )
    .optional()
    .map_err(|e| ServerError::DbError(format!("session lookup failed: {e}")))
}

pub fn revoke_session(conn: &Connection, raw_token: &str, now: i64) -> Result<(), ServerError> {
    conn.execute(
        "update sessions set revoked_at = ? where token_hash = ? and revoked_at is null",
        params![now, digest(raw_token)],
    )
    .map_err(|e| ServerError::DbError(format!("revoke session failed: {e}")))?;
    Ok(())
}

/// `Set-Cookie` value for a new session.
pub fn session_cookie(token: &str, ttl_secs: i64) -> String {
    format!("{SESSION_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax; Max-Age={ttl_secs}")
}

pub fn clear_session_cookie() -> String {
    format!("{SESSION_COOKIE}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
}
