// src/auth/context.rs
use rusqlite::Connection;

use crate::auth::sessions::load_profile_id_from_session;
use crate::db::profiles::get_profile;
use crate::domain::{Profile, Role};
use crate::errors::ServerError;

/// The signed-in profile, resolved once per request and passed to every
/// operation that needs to know who is acting.
#[derive(Debug, Clone)]
pub struct SessionContext {
    pub profile: Profile,
}

impl SessionContext {
    pub fn new(profile: Profile) -> Self {
        Self { profile }
    }

    /// Resolve a raw session cookie value into a context.
    /// Unknown, expired or revoked sessions resolve to `None`.
    pub fn resolve(conn: &Connection, raw_token: &str, now: i64) -> Result<Option<Self>, ServerError> {
        let Some(profile_id) = load_profile_id_from_session(conn, raw_token, now)? else {
            return Ok(None);
        };
        Ok(get_profile(conn, profile_id)?.map(Self::new))
    }

    pub fn profile_id(&self) -> i64 {
        self.profile.id
    }

    pub fn is_admin(&self) -> bool {
        self.profile.is_admin
    }

    /// Admins pass every role check.
    pub fn require_role(&self, role: Role) -> Result<(), ServerError> {
        if self.profile.role == role || self.profile.is_admin {
            Ok(())
        } else {
            Err(ServerError::Forbidden(format!(
                "Only {} accounts can do that.",
                role.as_str()
            )))
        }
    }

    pub fn require_trade(&self) -> Result<(), ServerError> {
        self.require_role(Role::Trade)
    }

    pub fn require_customer(&self) -> Result<(), ServerError> {
        self.require_role(Role::Customer)
    }

    pub fn require_admin(&self) -> Result<(), ServerError> {
        if self.profile.is_admin {
            Ok(())
        } else {
            Err(ServerError::Forbidden("Admin access required.".into()))
        }
    }
}
