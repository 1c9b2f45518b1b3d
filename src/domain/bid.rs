// src/domain/bid.rs
use super::money::Money;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BidStatus {
    Pending,
    Accepted,
    Rejected,
}

text_enum!(BidStatus, "bid status", {
    Pending => "pending",
    Accepted => "accepted",
    Rejected => "rejected",
});

#[derive(Debug, Clone, PartialEq)]
pub struct Bid {
    pub id: i64,
    pub lead_id: i64,
    pub bid_by: i64,
    pub proposed_value: Money,
    pub status: BidStatus,
    pub created_at: i64,
    pub updated_at: i64,
}

/// The bidder's public identity, as shown to the customer.
#[derive(Debug, Clone, PartialEq)]
pub struct Bidder {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub business_name: Option<String>,
    pub trade_specialty: Option<String>,
}

impl Bidder {
    pub fn display_name(&self) -> String {
        if let Some(business) = self.business_name.as_deref().filter(|b| !b.trim().is_empty()) {
            return business.to_string();
        }
        let full = format!("{} {}", self.first_name, self.last_name);
        let full = full.trim();
        if full.is_empty() {
            format!("Trade #{}", self.id)
        } else {
            full.to_string()
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BidWithBidder {
    pub bid: Bid,
    pub bidder: Bidder,
}
