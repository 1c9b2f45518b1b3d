use chrono::DateTime;
use maud::Render;

use crate::domain::Money;

impl Render for Money {
    fn render_to(&self, buffer: &mut String) {
        buffer.push_str(&self.to_string());
    }
}

/// Unix seconds as "15 Jan 2025". Out of range values render empty.
pub fn short_date(ts: i64) -> String {
    DateTime::from_timestamp(ts, 0)
        .map(|dt| dt.format("%-d %b %Y").to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_unix_seconds() {
        assert_eq!(short_date(1_736_899_200), "15 Jan 2025");
    }

    #[test]
    fn money_renders_as_pounds() {
        assert_eq!(Money::from_pounds(4500).render().into_string(), "£4,500");
    }
}
