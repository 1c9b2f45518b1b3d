// src/db/leads.rs
use std::collections::HashMap;

use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::db::bids::{bid_with_bidder_from_row, BID_WITH_BIDDER_SELECT};
use crate::domain::lead::ValidLead;
use crate::domain::{BidWithBidder, Lead, LeadWithBids, Money};
use crate::errors::ServerError;

const LEAD_COLUMNS: &str = "id, customer_id, name, service, location, value, phone, email, badge, \
     is_approved, approved_bid_id, proposed_value, bid_by, created_at";

pub(crate) fn lead_from_row(row: &Row<'_>) -> rusqlite::Result<Lead> {
    Ok(Lead {
        id: row.get(0)?,
        customer_id: row.get(1)?,
        name: row.get(2)?,
        service: row.get(3)?,
        location: row.get(4)?,
        value: row.get(5)?,
        phone: row.get(6)?,
        email: row.get(7)?,
        badge: row.get(8)?,
        is_approved: row.get(9)?,
        approved_bid_id: row.get(10)?,
        proposed_value: row.get(11)?,
        bid_by: row.get(12)?,
        created_at: row.get(13)?,
    })
}

pub fn insert_lead(
    conn: &Connection,
    customer_id: Option<i64>,
    lead: &ValidLead,
    now: i64,
) -> Result<i64, ServerError> {
    conn.execute(
        r#"
        insert into leads (customer_id, name, service, location, value, phone, email, badge, created_at)
        values (?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
        params![
            customer_id,
            lead.name,
            lead.service,
            lead.location,
            lead.value,
            lead.phone,
            lead.email,
            lead.badge,
            now
        ],
    )
    .map_err(|e| ServerError::DbError(format!("insert lead failed: {e}")))?;
    Ok(conn.last_insert_rowid())
}

pub fn get_lead(conn: &Connection, lead_id: i64) -> Result<Option<Lead>, ServerError> {
    conn.query_row(
        &format!("select {LEAD_COLUMNS} from leads where id = ?"),
        params![lead_id],
        lead_from_row,
    )
    .optional()
    .map_err(|e| ServerError::DbError(format!("select lead failed: {e}")))
}

/// Every lead, newest first, with its bids and each bid's bidder embedded.
pub fn fetch_leads_with_bids(conn: &Connection) -> Result<Vec<LeadWithBids>, ServerError> {
    let mut stmt = conn
        .prepare(&format!(
            "select {LEAD_COLUMNS} from leads order by created_at desc, id desc"
        ))
        .map_err(|e| ServerError::DbError(e.to_string()))?;
    let leads = stmt
        .query_map([], lead_from_row)
        .map_err(|e| ServerError::DbError(e.to_string()))?
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| ServerError::DbError(e.to_string()))?;

    let mut stmt = conn
        .prepare(&format!("{BID_WITH_BIDDER_SELECT} order by b.created_at, b.id"))
        .map_err(|e| ServerError::DbError(e.to_string()))?;
    let mut bids_by_lead: HashMap<i64, Vec<BidWithBidder>> = HashMap::new();
    let rows = stmt
        .query_map([], bid_with_bidder_from_row)
        .map_err(|e| ServerError::DbError(e.to_string()))?;
    for r in rows {
        let bid = r.map_err(|e| ServerError::DbError(e.to_string()))?;
        bids_by_lead.entry(bid.bid.lead_id).or_default().push(bid);
    }

    Ok(leads
        .into_iter()
        .map(|lead| {
            let bids = bids_by_lead.remove(&lead.id).unwrap_or_default();
            LeadWithBids { lead, bids }
        })
        .collect())
}

/// Marks the lead approved and copies the accepted bid onto it.
/// Only succeeds for a lead that is not yet approved.
pub fn mark_approved(
    conn: &Connection,
    lead_id: i64,
    bid_id: i64,
    proposed_value: Money,
    bid_by: i64,
) -> Result<bool, ServerError> {
    let updated = conn
        .execute(
            r#"
            update leads
               set is_approved = 1, approved_bid_id = ?, proposed_value = ?, bid_by = ?
             where id = ? and is_approved = 0
            "#,
            params![bid_id, proposed_value, bid_by, lead_id],
        )
        .map_err(|e| ServerError::DbError(format!("approve lead failed: {e}")))?;
    Ok(updated == 1)
}
