// src/db/bids.rs
use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::domain::{Bid, BidStatus, BidWithBidder, Bidder, Money};
use crate::errors::ServerError;

pub(crate) const BID_WITH_BIDDER_SELECT: &str = r#"
    select b.id, b.lead_id, b.bid_by, b.proposed_value, b.status, b.created_at, b.updated_at,
           p.first_name, p.last_name, p.business_name, p.trade_specialty
      from bids b
      join profiles p on p.id = b.bid_by
"#;

fn bid_from_row(row: &Row<'_>) -> rusqlite::Result<Bid> {
    Ok(Bid {
        id: row.get(0)?,
        lead_id: row.get(1)?,
        bid_by: row.get(2)?,
        proposed_value: row.get(3)?,
        status: row.get(4)?,
        created_at: row.get(5)?,
        updated_at: row.get(6)?,
    })
}

pub(crate) fn bid_with_bidder_from_row(row: &Row<'_>) -> rusqlite::Result<BidWithBidder> {
    let bid = bid_from_row(row)?;
    let bidder = Bidder {
        id: bid.bid_by,
        first_name: row.get(7)?,
        last_name: row.get(8)?,
        business_name: row.get(9)?,
        trade_specialty: row.get(10)?,
    };
    Ok(BidWithBidder { bid, bidder })
}

pub fn get_bid(conn: &Connection, bid_id: i64) -> Result<Option<Bid>, ServerError> {
    conn.query_row(
        "select id, lead_id, bid_by, proposed_value, status, created_at, updated_at from bids where id = ?",
        params![bid_id],
        bid_from_row,
    )
    .optional()
    .map_err(|e| ServerError::DbError(format!("select bid failed: {e}")))
}

#[cfg(test)]
pub fn find_bid(
    conn: &Connection,
    lead_id: i64,
    bid_by: i64,
) -> Result<Option<Bid>, ServerError> {
    conn.query_row(
        "select id, lead_id, bid_by, proposed_value, status, created_at, updated_at
         from bids where lead_id = ? and bid_by = ?",
        params![lead_id, bid_by],
        bid_from_row,
    )
    .optional()
    .map_err(|e| ServerError::DbError(format!("select bid failed: {e}")))
}

/// Insert the trade's bid on a lead, or revise it if one is still pending.
/// One row per (lead, trade); a bid that was already decided is left alone.
/// Returns the bid id, or `None` when the existing bid is no longer pending.
pub fn upsert_pending_bid(
    conn: &Connection,
    lead_id: i64,
    bid_by: i64,
    proposed_value: Money,
    now: i64,
) -> Result<Option<i64>, ServerError> {
    conn.query_row(
        r#"
        insert into bids (lead_id, bid_by, proposed_value, status, created_at, updated_at)
        values (?1, ?2, ?3, 'pending', ?4, ?4)
        on conflict (lead_id, bid_by) do update
           set proposed_value = excluded.proposed_value,
               updated_at = excluded.updated_at
         where bids.status = 'pending'
        returning id
        "#,
        params![lead_id, bid_by, proposed_value, now],
        |r| r.get(0),
    )
    .optional()
    .map_err(|e| ServerError::DbError(format!("upsert bid failed: {e}")))
}

/// Accept one bid and reject the other pending bids on the same lead.
pub fn settle_bids(conn: &Connection, lead_id: i64, accepted_bid_id: i64, now: i64) -> Result<(), ServerError> {
    conn.execute(
        "update bids set status = ?, updated_at = ? where id = ? and lead_id = ?",
        params![BidStatus::Accepted, now, accepted_bid_id, lead_id],
    )
    .map_err(|e| ServerError::DbError(format!("accept bid failed: {e}")))?;

    conn.execute(
        "update bids set status = ?, updated_at = ? where lead_id = ? and id != ? and status = ?",
        params![
            BidStatus::Rejected,
            now,
            lead_id,
            accepted_bid_id,
            BidStatus::Pending
        ],
    )
    .map_err(|e| ServerError::DbError(format!("reject bids failed: {e}")))?;
    Ok(())
}

#[cfg(test)]
pub fn count_accepted(conn: &Connection, lead_id: i64) -> Result<i64, ServerError> {
    conn.query_row(
        "select count(*) from bids where lead_id = ? and status = 'accepted'",
        params![lead_id],
        |r| r.get(0),
    )
    .map_err(|e| ServerError::DbError(format!("count accepted bids failed: {e}")))
}
