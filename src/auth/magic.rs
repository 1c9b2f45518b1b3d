// src/auth/magic.rs
use crate::auth::sessions::{digest, Secret};
use crate::db::magic_links::{consume_magic_link, insert_magic_link, purge_dead_links};
use crate::db::profiles::{get_or_create_profile, get_profile, touch_last_login};
use crate::db::Database;
use crate::domain::Role;
use crate::errors::ServerError;
use crate::marketplace::immediate_tx;

/// Route the emailed link points at.
pub const MAGIC_PATH: &str = "/auth/magic";

#[derive(Debug, Clone)]
pub struct MagicLinkConfig {
    pub ttl_secs: i64,
    /// Credits a brand new profile starts with.
    pub signup_credit: i64,
}

impl Default for MagicLinkConfig {
    fn default() -> Self {
        Self {
            ttl_secs: 15 * 60,
            signup_credit: 0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct IssuedLink {
    pub profile_id: i64,
    pub email: String,
    /// Role the profile actually has, which is the requested one only on
    /// first sign-in.
    pub role: Role,
    pub token: String,
    pub expires_at: i64,
}

impl IssuedLink {
    pub fn url(&self) -> String {
        format!("{MAGIC_PATH}?token={}", self.token)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignIn {
    pub profile_id: i64,
    pub role: Role,
}

impl SignIn {
    pub fn home_path(&self) -> &'static str {
        self.role.home_path()
    }
}

fn normalize_email(raw: &str) -> Result<String, ServerError> {
    let email = raw.trim().to_lowercase();
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(email),
        _ => Err(ServerError::Validation("Email is not valid".into())),
    }
}

/// Sign-up and sign-in in one step. A new email gets a profile with `role`
/// and the signup credit; an existing profile keeps what it has.
pub fn issue_link(
    db: &Database,
    cfg: &MagicLinkConfig,
    email: &str,
    role: Role,
    now: i64,
) -> Result<IssuedLink, ServerError> {
    let email = normalize_email(email)?;

    db.with_conn(|conn| {
        let tx = immediate_tx(conn)?;

        let profile_id = get_or_create_profile(&tx, &email, role, cfg.signup_credit, now)?;
        let profile = get_profile(&tx, profile_id)?.ok_or(ServerError::NotFound)?;

        purge_dead_links(&tx, now)?;
        let secret = Secret::mint();
        let expires_at = now + cfg.ttl_secs;
        insert_magic_link(&tx, profile_id, &secret.digest, now, expires_at)?;

        tx.commit()
            .map_err(|e| ServerError::DbError(format!("commit issue link failed: {e}")))?;

        Ok(IssuedLink {
            profile_id,
            email,
            role: profile.role,
            token: secret.raw,
            expires_at,
        })
    })
}

/// Spend a link and report who signed in and where they land.
pub fn redeem_link(db: &Database, token: &str, now: i64) -> Result<SignIn, ServerError> {
    let token = token.trim();
    if token.is_empty() {
        return Err(ServerError::BadRequest("missing token".into()));
    }
    let digest = digest(token);

    db.with_conn(|conn| {
        let profile_id = consume_magic_link(conn, &digest, now)?
            .ok_or_else(|| ServerError::Unauthorized("invalid or expired link".into()))?;
        touch_last_login(conn, profile_id, now)?;
        let profile = get_profile(conn, profile_id)?.ok_or(ServerError::NotFound)?;
        Ok(SignIn {
            profile_id,
            role: profile.role,
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::utils::test_app;
    use rusqlite::params;

    fn cfg() -> MagicLinkConfig {
        MagicLinkConfig {
            ttl_secs: 60,
            signup_credit: 50,
        }
    }

    #[test]
    fn emails_are_trimmed_and_lowercased() {
        assert_eq!(normalize_email("  Test@Example.COM ").unwrap(), "test@example.com");
        for bad in ["", "no-at-symbol", "@example.com", "test@"] {
            assert!(matches!(normalize_email(bad), Err(ServerError::Validation(_))), "{bad}");
        }
    }

    #[test]
    fn first_link_creates_profile_with_role_and_credit() {
        let app = test_app();
        let issued = issue_link(&app.state.db, &cfg(), "Tom@Example.com", Role::Trade, 1000).unwrap();

        assert_eq!(issued.email, "tom@example.com");
        assert_eq!(issued.role, Role::Trade);
        assert_eq!(issued.expires_at, 1060);
        assert_eq!(issued.url(), format!("/auth/magic?token={}", issued.token));

        let (credit, stored): (i64, Vec<u8>) = app.conn(|c| {
            c.query_row(
                "select p.credit, m.token_hash from profiles p join magic_links m on m.profile_id = p.id where p.id = ?",
                params![issued.profile_id],
                |r| Ok((r.get(0)?, r.get(1)?)),
            )
            .unwrap()
        });
        assert_eq!(credit, 50);
        assert_eq!(stored, digest(&issued.token));
    }

    #[test]
    fn returning_profile_keeps_its_role_and_credit() {
        let app = test_app();
        let first = issue_link(&app.state.db, &cfg(), "a@b.com", Role::Customer, 1000).unwrap();
        let second = issue_link(&app.state.db, &cfg(), "a@b.com", Role::Trade, 1001).unwrap();

        assert_eq!(first.profile_id, second.profile_id);
        assert_eq!(second.role, Role::Customer);
        let credit: i64 = app.conn(|c| {
            c.query_row("select credit from profiles where id = ?", params![first.profile_id], |r| r.get(0))
                .unwrap()
        });
        assert_eq!(credit, 50);
    }

    #[test]
    fn redeem_lands_on_role_home_once() {
        let app = test_app();
        let issued = issue_link(&app.state.db, &cfg(), "t@b.com", Role::Trade, 1000).unwrap();

        let signed_in = redeem_link(&app.state.db, &issued.token, 1001).unwrap();
        assert_eq!(signed_in.profile_id, issued.profile_id);
        assert_eq!(signed_in.home_path(), "/trades-crm");

        assert!(matches!(
            redeem_link(&app.state.db, &issued.token, 1002),
            Err(ServerError::Unauthorized(_))
        ));
    }

    #[test]
    fn expired_or_blank_tokens_are_refused() {
        let app = test_app();
        let issued = issue_link(&app.state.db, &cfg(), "x@y.com", Role::Customer, 1000).unwrap();

        assert!(matches!(
            redeem_link(&app.state.db, &issued.token, 1061),
            Err(ServerError::Unauthorized(_))
        ));
        assert!(matches!(redeem_link(&app.state.db, "   ", 1000), Err(ServerError::BadRequest(_))));
    }

    #[test]
    fn redeem_records_last_login() {
        let app = test_app();
        let issued = issue_link(&app.state.db, &cfg(), "c@b.com", Role::Customer, 1000).unwrap();
        redeem_link(&app.state.db, &issued.token, 1005).unwrap();

        let last: Option<i64> = app.conn(|c| {
            c.query_row("select last_login_at from profiles where id = ?", params![issued.profile_id], |r| r.get(0))
                .unwrap()
        });
        assert_eq!(last, Some(1005));
    }
}
