// src/marketplace/leads.rs
use rusqlite::Connection;
use tracing::info;

use crate::auth::SessionContext;
use crate::db::leads::insert_lead;
use crate::domain::NewLead;
use crate::errors::ServerError;

/// Post a new lead. Customers own what they post; leads posted by an admin
/// on someone's behalf have no owner.
pub fn post_lead(
    conn: &Connection,
    session: &SessionContext,
    form: &NewLead,
    now: i64,
) -> Result<i64, ServerError> {
    session.require_customer()?;
    let lead = form.validate()?;

    let owner = if session.profile.role == crate::domain::Role::Customer {
        Some(session.profile_id())
    } else {
        None
    };

    let lead_id = insert_lead(conn, owner, &lead, now)?;
    info!(lead_id, service = %lead.service, location = %lead.location, "lead posted");
    Ok(lead_id)
}
