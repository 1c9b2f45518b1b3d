// src/domain/money.rs
use rusqlite::types::{FromSql, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use std::fmt;

/// An amount in pence. Quotes and job rates are stored this way so that
/// nothing downstream ever touches floating point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Money(i64);

impl Money {
    pub const fn from_pence(pence: i64) -> Self {
        Self(pence)
    }

    pub const fn from_pounds(pounds: i64) -> Self {
        Self(pounds * 100)
    }

    pub fn pence(self) -> i64 {
        self.0
    }

    /// Parse a user-entered amount such as `4500`, `4,500.50` or `£4,500`.
    ///
    /// At most two decimal places; the amount must be positive.
    pub fn parse(input: &str) -> Result<Money, String> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err("Please enter a value".to_string());
        }

        let digits: String = trimmed
            .strip_prefix('£')
            .unwrap_or(trimmed)
            .trim()
            .chars()
            .filter(|c| *c != ',')
            .collect();

        let (whole, frac) = match digits.split_once('.') {
            Some((w, f)) => (w, f),
            None => (digits.as_str(), ""),
        };

        let is_digits = |s: &str| s.chars().all(|c| c.is_ascii_digit());
        if whole.is_empty() || !is_digits(whole) || !is_digits(frac) || frac.len() > 2 {
            return Err(format!("\"{trimmed}\" is not a valid amount"));
        }

        let pounds: i64 = whole
            .parse()
            .map_err(|_| format!("\"{trimmed}\" is too large"))?;
        let pence: i64 = match frac.len() {
            0 => 0,
            1 => frac.parse::<i64>().unwrap_or(0) * 10,
            _ => frac.parse::<i64>().unwrap_or(0),
        };

        let total = pounds
            .checked_mul(100)
            .and_then(|p| p.checked_add(pence))
            .ok_or_else(|| format!("\"{trimmed}\" is too large"))?;

        if total <= 0 {
            return Err("Value must be greater than zero".to_string());
        }
        Ok(Money(total))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let pounds = (abs / 100).to_string();
        let pence = abs % 100;

        let mut grouped = String::with_capacity(pounds.len() + pounds.len() / 3);
        for (i, c) in pounds.chars().enumerate() {
            if i > 0 && (pounds.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(c);
        }

        if pence == 0 {
            write!(f, "{sign}£{grouped}")
        } else {
            write!(f, "{sign}£{grouped}.{pence:02}")
        }
    }
}

impl ToSql for Money {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.0))
    }
}

impl FromSql for Money {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value.as_i64().map(Money)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_and_formatted_amounts() {
        assert_eq!(Money::parse("4500").unwrap(), Money::from_pounds(4500));
        assert_eq!(Money::parse(" £4,500 ").unwrap(), Money::from_pounds(4500));
        assert_eq!(Money::parse("4500.5").unwrap(), Money::from_pence(450050));
        assert_eq!(Money::parse("0.99").unwrap(), Money::from_pence(99));
    }

    #[test]
    fn rejects_non_numeric_input() {
        assert!(Money::parse("").is_err());
        assert!(Money::parse("   ").is_err());
        assert!(Money::parse("abc").is_err());
        assert!(Money::parse("12a").is_err());
        assert!(Money::parse("1.234").is_err());
        assert!(Money::parse("-50").is_err());
        assert!(Money::parse("0").is_err());
        assert!(Money::parse(".5").is_err());
    }

    #[test]
    fn displays_with_thousand_separators() {
        assert_eq!(Money::from_pounds(4500).to_string(), "£4,500");
        assert_eq!(Money::from_pounds(1_234_567).to_string(), "£1,234,567");
        assert_eq!(Money::from_pence(450050).to_string(), "£4,500.50");
        assert_eq!(Money::from_pounds(450).to_string(), "£450");
    }
}
