// src/domain/profile.rs

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Customer,
    Trade,
}

text_enum!(Role, "role", {
    Customer => "customer",
    Trade => "trade",
});

impl Role {
    /// Where a freshly signed-in user lands.
    pub fn home_path(self) -> &'static str {
        match self {
            Role::Customer => "/dashboard",
            Role::Trade => "/trades-crm",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    pub id: i64,
    pub email: String,
    pub role: Role,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub postcode: Option<String>,
    pub business_name: Option<String>,
    pub trade_specialty: Option<String>,
    pub profile_description: Option<String>,
    pub credit: i64,
    pub is_admin: bool,
    pub created_at: i64,
    pub last_login_at: Option<i64>,
    /// Ids from `lead_purchases`, ascending.
    pub purchased_leads: Vec<i64>,
}

impl Profile {
    pub fn display_name(&self) -> String {
        let full = format!("{} {}", self.first_name.trim(), self.last_name.trim());
        let full = full.trim();
        if full.is_empty() {
            self.email.clone()
        } else {
            full.to_string()
        }
    }

    pub fn has_purchased(&self, lead_id: i64) -> bool {
        self.purchased_leads.binary_search(&lead_id).is_ok()
    }

    pub fn is_trade(&self) -> bool {
        self.role == Role::Trade
    }
}

/// Editable profile attributes, as submitted from the profile form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileUpdate {
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub postcode: Option<String>,
    pub business_name: Option<String>,
    pub trade_specialty: Option<String>,
    pub profile_description: Option<String>,
}

/// Postcodes are compared case- and whitespace-insensitively ("m1 1ab" == "M1 1AB").
pub fn normalize_postcode(raw: &str) -> String {
    raw.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_uppercase()
}

pub fn same_postcode(a: &str, b: &str) -> bool {
    let a = normalize_postcode(a);
    !a.is_empty() && a == normalize_postcode(b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_round_trips_through_text() {
        assert_eq!("trade".parse::<Role>().unwrap(), Role::Trade);
        assert_eq!(Role::Customer.as_str(), "customer");
        assert!("admin".parse::<Role>().is_err());
    }

    #[test]
    fn postcode_comparison_ignores_case_and_spacing() {
        assert!(same_postcode("m1  1ab", "M1 1AB"));
        assert!(same_postcode("M1", " m1 "));
        assert!(!same_postcode("M1", "M2"));
        assert!(!same_postcode("", ""));
    }
}
