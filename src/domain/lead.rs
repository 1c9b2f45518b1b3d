// src/domain/lead.rs
use super::bid::BidWithBidder;
use super::money::Money;
use crate::errors::ServerError;

/// Temperature of a lead as judged by whoever entered it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Badge {
    Hot,
    #[default]
    Warm,
    Cold,
}

text_enum!(Badge, "badge", {
    Hot => "hot",
    Warm => "warm",
    Cold => "cold",
});

#[derive(Debug, Clone, PartialEq)]
pub struct Lead {
    pub id: i64,
    pub customer_id: Option<i64>,
    pub name: String,
    pub service: String,
    pub location: String,
    /// Requested value as the customer typed it, e.g. "£3,200".
    pub value: String,
    pub phone: String,
    pub email: String,
    pub badge: Badge,
    pub is_approved: bool,
    pub approved_bid_id: Option<i64>,
    pub proposed_value: Option<Money>,
    pub bid_by: Option<i64>,
    pub created_at: i64,
}

/// A lead with its bids and each bidder's identity embedded.
#[derive(Debug, Clone, PartialEq)]
pub struct LeadWithBids {
    pub lead: Lead,
    pub bids: Vec<BidWithBidder>,
}

impl LeadWithBids {
    pub fn bid_by(&self, profile_id: i64) -> Option<&BidWithBidder> {
        self.bids.iter().find(|b| b.bid.bid_by == profile_id)
    }

    pub fn pending_bids(&self) -> impl Iterator<Item = &BidWithBidder> {
        self.bids
            .iter()
            .filter(|b| b.bid.status == super::BidStatus::Pending)
    }
}

/// The "add lead" form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewLead {
    pub name: String,
    pub service: String,
    pub location: String,
    pub value: String,
    pub phone: String,
    pub email: String,
    pub badge: String,
}

/// A `NewLead` that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidLead {
    pub name: String,
    pub service: String,
    pub location: String,
    pub value: String,
    pub phone: String,
    pub email: String,
    pub badge: Badge,
}

impl NewLead {
    pub fn validate(&self) -> Result<ValidLead, ServerError> {
        let required = [
            ("Name", &self.name),
            ("Service", &self.service),
            ("Location", &self.location),
            ("Value", &self.value),
            ("Phone", &self.phone),
            ("Email", &self.email),
            ("Badge", &self.badge),
        ];
        for (label, value) in required {
            if value.trim().is_empty() {
                return Err(ServerError::Validation(format!("{label} is required")));
            }
        }

        let email = self.email.trim();
        if !email.contains('@') || email.starts_with('@') || email.ends_with('@') {
            return Err(ServerError::Validation("Email is not valid".into()));
        }

        let badge = self
            .badge
            .trim()
            .parse()
            .map_err(|_| ServerError::Validation("Badge must be hot, warm or cold".into()))?;

        Ok(ValidLead {
            name: self.name.trim().to_string(),
            service: self.service.trim().to_string(),
            location: super::profile::normalize_postcode(&self.location),
            value: self.value.trim().to_string(),
            phone: self.phone.trim().to_string(),
            email: email.to_lowercase(),
            badge,
        })
    }
}
