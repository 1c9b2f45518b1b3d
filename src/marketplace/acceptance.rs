// src/marketplace/acceptance.rs
use rusqlite::Connection;
use tracing::info;

use crate::auth::SessionContext;
use crate::db::bids::{get_bid, settle_bids};
use crate::db::jobs::{get_job, get_job_by_lead, insert_job, NewJob};
use crate::db::leads::{get_lead, mark_approved};
use crate::domain::{Job, Priority};
use crate::errors::ServerError;
use crate::marketplace::immediate_tx;

/// Accept a bid on one of the customer's leads.
///
/// Approves the lead, settles its bids and creates the job in one
/// transaction. Accepting the same bid again returns the job it created.
pub fn accept_bid(
    conn: &mut Connection,
    session: &SessionContext,
    bid_id: i64,
    now: i64,
) -> Result<Job, ServerError> {
    session.require_customer()?;

    let tx = immediate_tx(conn)?;

    let bid = get_bid(&tx, bid_id)?.ok_or(ServerError::NotFound)?;
    let lead = get_lead(&tx, bid.lead_id)?.ok_or(ServerError::NotFound)?;

    if !session.is_admin() && lead.customer_id != Some(session.profile_id()) {
        return Err(ServerError::Forbidden(
            "You can only accept quotes on your own leads.".into(),
        ));
    }

    if lead.is_approved {
        if lead.approved_bid_id == Some(bid_id) {
            return get_job_by_lead(&tx, lead.id)?.ok_or_else(|| {
                ServerError::DbError(format!("approved lead {} has no job", lead.id))
            });
        }
        return Err(ServerError::Conflict(
            "Another quote has already been accepted for this lead.".into(),
        ));
    }

    settle_bids(&tx, lead.id, bid.id, now)?;
    if !mark_approved(&tx, lead.id, bid.id, bid.proposed_value, bid.bid_by)? {
        return Err(ServerError::Conflict(
            "Another quote has already been accepted for this lead.".into(),
        ));
    }

    let job_id = insert_job(
        &tx,
        &NewJob {
            lead_id: lead.id,
            trade_id: bid.bid_by,
            customer_id: lead.customer_id,
            client_name: &lead.name,
            service: &lead.service,
            location: &lead.location,
            rate: bid.proposed_value,
            priority: Priority::from_badge(lead.badge),
        },
        now,
    )?;
    let job = get_job(&tx, job_id)?.ok_or(ServerError::InternalError)?;

    tx.commit()
        .map_err(|e| ServerError::DbError(format!("commit acceptance failed: {e}")))?;

    info!(lead_id = lead.id, bid_id, job_id, "bid accepted");
    Ok(job)
}
