// src/marketplace/listing.rs
use crate::auth::SessionContext;
use crate::domain::profile::same_postcode;
use crate::domain::{BidWithBidder, LeadWithBids};

/// A lead as one trade sees it.
#[derive(Debug, Clone)]
pub struct TradeLead {
    pub lead: LeadWithBids,
    pub purchased: bool,
    /// Enough credit and not yet bought.
    pub eligible: bool,
}

impl TradeLead {
    pub fn my_bid(&self, profile_id: i64) -> Option<&BidWithBidder> {
        self.lead.bid_by(profile_id)
    }
}

#[derive(Debug, Clone, Default)]
pub struct TradeLeadBoard {
    /// Open leads in the trade's postcode that they have not bought.
    pub available: Vec<TradeLead>,
    /// Everything the trade has bought, wherever it is.
    pub purchased: Vec<TradeLead>,
}

/// Split the full lead list into what a trade can buy and what they own.
pub fn leads_for_trade(session: &SessionContext, leads: &[LeadWithBids], cost: i64) -> TradeLeadBoard {
    let profile = &session.profile;
    let postcode = profile.postcode.as_deref().unwrap_or("");
    let mut board = TradeLeadBoard::default();

    for lead in leads {
        let purchased = profile.has_purchased(lead.lead.id);
        if purchased {
            board.purchased.push(TradeLead {
                lead: lead.clone(),
                purchased,
                eligible: false,
            });
        } else if !lead.lead.is_approved && same_postcode(&lead.lead.location, postcode) {
            board.available.push(TradeLead {
                lead: lead.clone(),
                purchased,
                eligible: profile.credit >= cost,
            });
        }
    }
    board
}

/// Leads the signed-in customer posted. Admins see every lead.
pub fn customer_leads(session: &SessionContext, leads: &[LeadWithBids]) -> Vec<LeadWithBids> {
    leads
        .iter()
        .filter(|l| session.is_admin() || l.lead.customer_id == Some(session.profile_id()))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::leads::fetch_leads_with_bids;
    use crate::db::profiles::get_profile;
    use crate::marketplace::purchase_lead;
    use crate::tests::utils::{customer_session, memory_conn, seed_lead, trade_session};

    #[test]
    fn only_same_postcode_leads_are_offered() {
        let conn = memory_conn();
        let m1 = seed_lead(&conn, None, "M1", "3200");
        seed_lead(&conn, None, "LS1", "900");
        let trade = trade_session(&conn, "t@x.com", "m1", 50);

        let leads = fetch_leads_with_bids(&conn).unwrap();
        let board = leads_for_trade(&trade, &leads, 30);

        assert_eq!(board.available.len(), 1);
        assert_eq!(board.available[0].lead.lead.id, m1);
        assert!(board.available[0].eligible);
        assert!(board.purchased.is_empty());
    }

    #[test]
    fn low_credit_marks_leads_ineligible() {
        let conn = memory_conn();
        seed_lead(&conn, None, "M1", "3200");
        let trade = trade_session(&conn, "t@x.com", "M1", 10);

        let leads = fetch_leads_with_bids(&conn).unwrap();
        let board = leads_for_trade(&trade, &leads, 30);
        assert!(!board.available[0].eligible);
    }

    #[test]
    fn purchased_leads_move_to_owned_list() {
        let mut conn = memory_conn();
        let lead_id = seed_lead(&conn, None, "M1", "3200");
        let trade = trade_session(&conn, "t@x.com", "M1", 50);
        purchase_lead(&mut conn, &trade, lead_id, 30, 10).unwrap();

        let refreshed = SessionContext::new(get_profile(&conn, trade.profile_id()).unwrap().unwrap());
        let leads = fetch_leads_with_bids(&conn).unwrap();
        let board = leads_for_trade(&refreshed, &leads, 30);

        assert!(board.available.is_empty());
        assert_eq!(board.purchased.len(), 1);
        assert!(board.purchased[0].purchased);
    }

    #[test]
    fn customers_see_only_their_leads() {
        let conn = memory_conn();
        let me = customer_session(&conn, "me@x.com");
        let other = customer_session(&conn, "o@x.com");
        let mine = seed_lead(&conn, Some(me.profile_id()), "M1", "100");
        seed_lead(&conn, Some(other.profile_id()), "M1", "100");

        let leads = fetch_leads_with_bids(&conn).unwrap();
        let visible = customer_leads(&me, &leads);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].lead.id, mine);
    }
}
