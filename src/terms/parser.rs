//! Numeric coercion for extracted term strings
//!
//! Zero is the "no data" sentinel: every parser here is total and returns 0
//! (or `None`) instead of failing. Callers that must tell "absent" from a
//! stated zero check [`is_mentioned`] on the raw field.

use serde::{Deserialize, Serialize};

/// Money factor to approximate APR conversion used across the leasing industry
const MONEY_FACTOR_TO_APR: f64 = 2400.0;

/// Marker the extraction collaborator uses for absent terms
const NOT_MENTIONED: &str = "not mentioned";

/// Whether a raw term value carries information
pub fn is_mentioned(value: Option<&str>) -> bool {
    match value {
        Some(v) => {
            let v = v.trim();
            !v.is_empty() && !v.to_lowercase().contains(NOT_MENTIONED)
        }
        None => false,
    }
}

/// Parse a currency-ish field ("$18,000", "450.00", "36 months") to a number.
///
/// Currency symbols and thousands separators are removed, then the longest
/// leading numeric prefix is parsed. Missing, unparseable or non-finite input
/// yields `0.0`.
pub fn parse_amount(field: Option<&str>) -> f64 {
    let Some(field) = field else {
        return 0.0;
    };

    let cleaned: String = field.chars().filter(|c| !matches!(c, '$' | ',')).collect();
    let prefix = numeric_prefix(cleaned.trim_start());

    match prefix.parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => 0.0,
    }
}

/// Parse the lease term in months; `None` when absent or non-positive.
/// Fractional terms are kept as stated.
pub fn parse_lease_term(field: Option<&str>) -> Option<f64> {
    let months = parse_amount(field);
    (months > 0.0).then_some(months)
}

/// Longest prefix that reads as a decimal number: optional sign, digits,
/// at most one decimal point, then an optional exponent (`e5`, `E-2`)
fn numeric_prefix(s: &str) -> &str {
    let bytes = s.as_bytes();
    let mut end = 0;
    let mut seen_digit = false;
    let mut seen_dot = false;

    while end < bytes.len() {
        match bytes[end] {
            b'+' | b'-' if end == 0 => {}
            b'0'..=b'9' => seen_digit = true,
            b'.' if !seen_dot => seen_dot = true,
            _ => break,
        }
        end += 1;
    }

    if !seen_digit {
        return "";
    }

    let mantissa_end = end;
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let digits_start = exp;
        while matches!(bytes.get(exp), Some(b'0'..=b'9')) {
            exp += 1;
        }
        if exp > digits_start {
            end = exp;
        }
    }

    if end == mantissa_end {
        s[..end].trim_end_matches('.')
    } else {
        &s[..end]
    }
}

/// Financing charge as stated in the contract
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum InterestTerm {
    /// Annual percentage rate, e.g. 4.9 for 4.9%
    Apr(f64),
    /// Lease money factor, e.g. 0.00125
    MoneyFactor(f64),
}

impl InterestTerm {
    /// Interpret the `interest_rate_apr` field. Values below 1.0 can only be
    /// money factors; anything else is read as an APR percentage.
    pub fn from_field(field: Option<&str>) -> Option<Self> {
        if !is_mentioned(field) {
            return None;
        }

        let value = parse_amount(field);
        if value <= 0.0 {
            None
        } else if value < 1.0 {
            Some(Self::MoneyFactor(value))
        } else {
            Some(Self::Apr(value))
        }
    }

    /// Approximate APR in percent
    pub fn approx_apr(&self) -> f64 {
        match *self {
            Self::Apr(apr) => apr,
            Self::MoneyFactor(mf) => mf * MONEY_FACTOR_TO_APR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_amount_currency() {
        assert_eq!(parse_amount(Some("$18,000")), 18000.0);
        assert_eq!(parse_amount(Some("$1,234.56")), 1234.56);
        assert_eq!(parse_amount(Some("  450 ")), 450.0);
    }

    #[test]
    fn test_parse_amount_leading_number() {
        assert_eq!(parse_amount(Some("36 months")), 36.0);
        assert_eq!(parse_amount(Some("4.9%")), 4.9);
        assert_eq!(parse_amount(Some("$0.25/mile")), 0.25);
        assert_eq!(parse_amount(Some("12,000 miles per year")), 12000.0);
    }

    #[test]
    fn test_parse_amount_is_total() {
        assert_eq!(parse_amount(None), 0.0);
        assert_eq!(parse_amount(Some("")), 0.0);
        assert_eq!(parse_amount(Some("Not Mentioned")), 0.0);
        assert_eq!(parse_amount(Some("$")), 0.0);
        assert_eq!(parse_amount(Some("-")), 0.0);
        assert_eq!(parse_amount(Some(".")), 0.0);
        assert_eq!(parse_amount(Some("garbage 123")), 0.0);
        assert_eq!(parse_amount(Some("inf")), 0.0);
        assert_eq!(parse_amount(Some("NaN")), 0.0);
    }

    #[test]
    fn test_parse_amount_trailing_dot() {
        assert_eq!(parse_amount(Some("500.")), 500.0);
        assert_eq!(parse_amount(Some("1.2.3")), 1.2);
    }

    #[test]
    fn test_parse_amount_exponent() {
        assert_eq!(parse_amount(Some("1e5")), 100000.0);
        assert_eq!(parse_amount(Some("2.5E-2")), 0.025);
        assert_eq!(parse_amount(Some("3e")), 3.0);
        assert_eq!(parse_amount(Some("4e+")), 4.0);
        assert_eq!(parse_amount(Some("7 each")), 7.0);
        assert_eq!(parse_amount(Some("1e999")), 0.0);
    }

    #[test]
    fn test_parse_lease_term() {
        assert_eq!(parse_lease_term(Some("36 months")), Some(36.0));
        assert_eq!(parse_lease_term(Some("30.5 months")), Some(30.5));
        assert_eq!(parse_lease_term(Some("0.5")), Some(0.5));
        assert_eq!(parse_lease_term(Some("Not Mentioned")), None);
        assert_eq!(parse_lease_term(Some("0")), None);
        assert_eq!(parse_lease_term(Some("-24")), None);
        assert_eq!(parse_lease_term(None), None);
    }

    #[test]
    fn test_is_mentioned() {
        assert!(is_mentioned(Some("$450")));
        assert!(!is_mentioned(Some("Not Mentioned")));
        assert!(!is_mentioned(Some("not mentioned in contract")));
        assert!(!is_mentioned(Some("   ")));
        assert!(!is_mentioned(None));
    }

    #[test]
    fn test_interest_term() {
        let apr = InterestTerm::from_field(Some("4.9%")).unwrap();
        assert_eq!(apr, InterestTerm::Apr(4.9));
        assert_eq!(apr.approx_apr(), 4.9);

        let mf = InterestTerm::from_field(Some("0.00125")).unwrap();
        assert_eq!(mf, InterestTerm::MoneyFactor(0.00125));
        assert!((mf.approx_apr() - 3.0).abs() < 1e-9);

        assert_eq!(InterestTerm::from_field(Some("Not Mentioned")), None);
        assert_eq!(InterestTerm::from_field(Some("0%")), None);
    }
}
