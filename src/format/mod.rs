//! Display Formatting
//!
//! Pure helpers that turn raw values into display strings and style tokens.
//! None of them fail: odd input (NaN, unknown enum values, empty strings)
//! maps to a deterministic fallback.
//!
//! - [`format_currency`], [`format_percentage`], [`format_number`]: numbers
//! - [`company_type_badge`], [`success_rate_color`]: style tokens
//! - [`truncate_text`], [`to_title_case`], [`time_ago`]: text
//! - [`generate_insight`]: advisory one-liners (randomized)
//! - [`Debouncer`]: trailing-edge call coalescing

mod debounce;
mod insight;

pub use debounce::Debouncer;
pub use insight::{generate_insight, insight_candidates};

use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Serialize};
use std::sync::LazyLock;

use crate::model::CompanyType;

/// Ten-color chart palette, indexed positionally
pub const CHART_COLORS: [&str; 10] = [
    "#8884d8", "#82ca9d", "#ffc658", "#ff7c7c", "#8dd1e1", "#d084d0", "#ffb347", "#87ceeb",
    "#dda0dd", "#98fb98",
];

/// Currency notation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Notation {
    /// Full digits with thousands separators: `$1,234,567`
    #[default]
    Standard,
    /// Short suffix form: `$1M`
    Compact,
}

/// Format an amount as currency with no fractional digits
///
/// ```
/// use gtm_portfolio::format::{format_currency, Notation};
///
/// assert_eq!(format_currency(1234.0, "USD", Notation::Standard), "$1,234");
/// assert_eq!(format_currency(2_045_000_000.0, "USD", Notation::Compact), "$2B");
/// ```
pub fn format_currency(amount: f64, currency: &str, notation: Notation) -> String {
    let prefix = currency_prefix(currency);

    if !amount.is_finite() {
        return format!("{}NaN", prefix);
    }

    let sign = if amount < 0.0 && amount.abs().round() > 0.0 {
        "-"
    } else {
        ""
    };
    let abs = amount.abs();

    let body = match notation {
        Notation::Standard => group_thousands(abs.round()),
        Notation::Compact => compact(abs),
    };

    format!("{}{}{}", sign, prefix, body)
}

fn currency_prefix(currency: &str) -> String {
    match currency.to_ascii_uppercase().as_str() {
        "USD" => "$".to_string(),
        "EUR" => "€".to_string(),
        "GBP" => "£".to_string(),
        "JPY" => "¥".to_string(),
        "INR" => "₹".to_string(),
        other => format!("{} ", other),
    }
}

fn group_thousands(value: f64) -> String {
    let digits = format!("{:.0}", value);
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }

    out
}

fn compact(abs: f64) -> String {
    const UNITS: [(f64, &str); 4] = [(1e3, "K"), (1e6, "M"), (1e9, "B"), (1e12, "T")];

    // Largest unit not above the value; None means plain digits
    let mut unit = UNITS.iter().rposition(|(size, _)| abs >= *size);

    loop {
        let scaled = match unit {
            Some(i) => (abs / UNITS[i].0).round(),
            None => abs.round(),
        };

        // Rounding can carry into the next unit: 999,600 -> 1M, not 1000K
        let next = unit.map_or(0, |i| i + 1);
        if scaled >= 1000.0 && next < UNITS.len() {
            unit = Some(next);
            continue;
        }

        return match unit {
            Some(i) => format!("{}{}", group_thousands(scaled), UNITS[i].1),
            None => group_thousands(scaled),
        };
    }
}

/// Fixed-decimal percentage: `format_percentage(94.2, 1) == "94.2%"`
pub fn format_percentage(value: f64, decimals: usize) -> String {
    format!("{:.*}%", decimals, value)
}

/// Large-number shorthand with one decimal: `1.5M`, `2.0K`, `999`
///
/// Non-finite input gets no suffix and prints as Rust formats it:
/// `inf`, `-inf` or `NaN`.
pub fn format_number(num: f64) -> String {
    if !num.is_finite() {
        return num.to_string();
    }
    if num >= 1e9 {
        return format!("{:.1}B", num / 1e9);
    }
    if num >= 1e6 {
        return format!("{:.1}M", num / 1e6);
    }
    if num >= 1e3 {
        return format!("{:.1}K", num / 1e3);
    }
    num.to_string()
}

/// Human-readable distance between `date` and `now`
pub fn time_ago(date: DateTime<Utc>, now: DateTime<Utc>) -> String {
    const DAY_MS: i64 = 24 * 60 * 60 * 1000;

    let diff_ms = (now - date).num_milliseconds().abs();
    let days = (diff_ms + DAY_MS - 1) / DAY_MS;

    if days <= 1 {
        "Today".to_string()
    } else if days <= 7 {
        format!("{} days ago", days)
    } else if days <= 30 {
        format!("{} weeks ago", (days + 6) / 7)
    } else if days <= 365 {
        format!("{} months ago", (days + 29) / 30)
    } else {
        format!("{} years ago", (days + 364) / 365)
    }
}

/// Badge style for a company type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BadgeStyle {
    Startup,
    Mnc,
    Neutral,
}

impl BadgeStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            BadgeStyle::Startup => "startup",
            BadgeStyle::Mnc => "mnc",
            BadgeStyle::Neutral => "neutral",
        }
    }
}

/// Map a company type to its badge style; unknown types get `Neutral`
pub fn company_type_badge(company_type: &CompanyType) -> BadgeStyle {
    match company_type {
        CompanyType::Startup => BadgeStyle::Startup,
        CompanyType::Mnc => BadgeStyle::Mnc,
        CompanyType::Other(_) => BadgeStyle::Neutral,
    }
}

/// Color band for a success rate
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SuccessTier {
    /// 95 and above
    Tier1,
    /// 90 to below 95
    Tier2,
    /// 80 to below 90
    Tier3,
    /// 70 to below 80
    Tier4,
    /// Below 70
    Tier5,
}

impl SuccessTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            SuccessTier::Tier1 => "tier1",
            SuccessTier::Tier2 => "tier2",
            SuccessTier::Tier3 => "tier3",
            SuccessTier::Tier4 => "tier4",
            SuccessTier::Tier5 => "tier5",
        }
    }

    /// Short word used by the text renderer
    pub fn label(&self) -> &'static str {
        match self {
            SuccessTier::Tier1 => "excellent",
            SuccessTier::Tier2 => "strong",
            SuccessTier::Tier3 => "good",
            SuccessTier::Tier4 => "fair",
            SuccessTier::Tier5 => "weak",
        }
    }
}

/// Band a success rate; lower bounds are inclusive
pub fn success_rate_color(rate: f64) -> SuccessTier {
    if rate >= 95.0 {
        SuccessTier::Tier1
    } else if rate >= 90.0 {
        SuccessTier::Tier2
    } else if rate >= 80.0 {
        SuccessTier::Tier3
    } else if rate >= 70.0 {
        SuccessTier::Tier4
    } else {
        SuccessTier::Tier5
    }
}

/// Cut `text` to `max_length` characters and append `...` when it is longer
pub fn truncate_text(text: &str, max_length: usize) -> String {
    if text.chars().count() <= max_length {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max_length).collect();
    out.push_str("...");
    out
}

/// `snake_case` to `Title Case`
pub fn to_title_case(s: &str) -> String {
    s.split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Loose `local@domain.tld` check
pub fn is_valid_email(email: &str) -> bool {
    static EMAIL: LazyLock<regex::Regex> = LazyLock::new(|| {
        regex::Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex")
    });
    EMAIL.is_match(email)
}

/// Clone through a JSON round-trip
///
/// Anything that does not survive JSON (non-finite floats, non-string map
/// keys) surfaces as an error instead of being silently altered.
pub fn deep_clone<T: Serialize + DeserializeOwned>(value: &T) -> serde_json::Result<T> {
    serde_json::from_value(serde_json::to_value(value)?)
}

/// Chart color for a series index
pub fn generate_color(index: usize) -> &'static str {
    CHART_COLORS[index % CHART_COLORS.len()]
}

/// Percent change from `previous` to `current`; 0 when `previous` is 0
pub fn calculate_growth_rate(current: f64, previous: f64) -> f64 {
    if previous == 0.0 {
        return 0.0;
    }
    (current - previous) / previous * 100.0
}
