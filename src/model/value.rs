//! Number-or-string key metric values
//!
//! The backend stores unit economics inconsistently: some documents carry
//! plain numbers, others carry display strings such as `"$2,847"`, `"3.2%"`,
//! `"10.0x"` or `"$847K"`. `MetricValue` accepts both and parses the string
//! form on demand.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A key metric as delivered by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetricValue {
    Number(f64),
    Text(String),
}

impl MetricValue {
    /// Numeric value, if one can be recovered
    ///
    /// Strips `$`, thousands separators, a trailing `%` or `x`, and scales
    /// `K`/`M`/`B` suffixes. Returns `None` instead of NaN.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            MetricValue::Number(n) if n.is_finite() => Some(*n),
            MetricValue::Number(_) => None,
            MetricValue::Text(s) => parse_unit_string(s),
        }
    }
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricValue::Number(n) => write!(f, "{}", n),
            MetricValue::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<f64> for MetricValue {
    fn from(value: f64) -> Self {
        MetricValue::Number(value)
    }
}

impl From<&str> for MetricValue {
    fn from(value: &str) -> Self {
        MetricValue::Text(value.to_string())
    }
}

fn parse_unit_string(raw: &str) -> Option<f64> {
    let mut s: String = raw
        .trim()
        .chars()
        .filter(|c| *c != '$' && *c != ',')
        .collect();

    if s.ends_with('%') || s.ends_with('x') || s.ends_with('X') {
        s.pop();
    }

    let scale = match s.chars().last() {
        Some('K') | Some('k') => 1e3,
        Some('M') => 1e6,
        Some('B') => 1e9,
        _ => 1.0,
    };
    if scale != 1.0 {
        s.pop();
    }

    s.trim()
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .map(|n| n * scale)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_number_or_text() {
        let n: MetricValue = serde_json::from_str("2847").unwrap();
        assert_eq!(n, MetricValue::Number(2847.0));

        let t: MetricValue = serde_json::from_str("\"$2,847\"").unwrap();
        assert_eq!(t, MetricValue::Text("$2,847".to_string()));
    }

    #[test]
    fn test_as_f64_strips_units() {
        assert_eq!(MetricValue::from("$2,847").as_f64(), Some(2847.0));
        assert_eq!(MetricValue::from("3.2%").as_f64(), Some(3.2));
        assert_eq!(MetricValue::from("10.0x").as_f64(), Some(10.0));
        assert_eq!(MetricValue::from("$847K").as_f64(), Some(847_000.0));
        assert_eq!(MetricValue::from("$1.2M").as_f64(), Some(1_200_000.0));
        assert_eq!(MetricValue::from(118.0).as_f64(), Some(118.0));
    }

    #[test]
    fn test_as_f64_rejects_garbage() {
        assert_eq!(MetricValue::from("N/A").as_f64(), None);
        assert_eq!(MetricValue::from("").as_f64(), None);
        assert_eq!(MetricValue::Number(f64::NAN).as_f64(), None);
    }

    #[test]
    fn test_display_passes_text_through() {
        assert_eq!(MetricValue::from("10.0x").to_string(), "10.0x");
        assert_eq!(MetricValue::Number(4.5).to_string(), "4.5");
    }
}
