//! Display formatting rules
//!
//! Each semantic type maps to exactly one formatting function. The mapping
//! is resolved once when the registry is built; rendering, quick-search and
//! export all call the same function for a given column, so a cell reads the
//! same everywhere.

use std::fmt::Write;

use serde::{Deserialize, Serialize};

use super::types::{CellValue, SemanticType};

/// Number of glyphs in a rating bar
pub const RATING_SCALE: usize = 5;
const FILLED_GLYPH: &str = "★";
const EMPTY_GLYPH: &str = "☆";
/// Tags shown before the overflow counter
pub const VISIBLE_TAGS: usize = 2;
pub const ACTIVE_LABEL: &str = "Active";
pub const INACTIVE_LABEL: &str = "Inactive";
pub const MISSING_PLACEHOLDER: &str = "N/A";

/// Locale-dependent display parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayLocale {
    /// Prefix for currency values (default: "$")
    pub currency_symbol: String,
    /// Thousands separator (default: ',')
    pub group_separator: char,
    /// chrono strftime pattern for dates (default: "%-m/%-d/%Y")
    pub date_format: String,
}

impl Default for DisplayLocale {
    fn default() -> Self {
        Self {
            currency_symbol: "$".to_string(),
            group_separator: ',',
            date_format: "%-m/%-d/%Y".to_string(),
        }
    }
}

/// A formatting function for one semantic type
pub type Formatter = fn(&CellValue<'_>, &DisplayLocale) -> String;

/// Returns the formatting function for a semantic type
pub fn formatter_for(semantic: SemanticType) -> Formatter {
    match semantic {
        SemanticType::Text => format_text,
        SemanticType::Currency => format_currency,
        SemanticType::Integer => format_text,
        SemanticType::Rating => format_rating,
        SemanticType::Date => format_date,
        SemanticType::Boolean => format_boolean,
        SemanticType::TagList => format_tags,
        SemanticType::OptionalText => format_optional,
    }
}

fn format_text(value: &CellValue<'_>, _locale: &DisplayLocale) -> String {
    value.to_string()
}

fn format_currency(value: &CellValue<'_>, locale: &DisplayLocale) -> String {
    match value {
        CellValue::Integer(n) => format!(
            "{}{}",
            locale.currency_symbol,
            group_digits(*n, locale.group_separator)
        ),
        other => other.to_string(),
    }
}

fn format_rating(value: &CellValue<'_>, _locale: &DisplayLocale) -> String {
    let rating = match value.as_number() {
        Some(r) => r,
        None => return value.to_string(),
    };
    let filled = (rating.floor().max(0.0) as usize).min(RATING_SCALE);
    format!(
        "{}{} ({})",
        FILLED_GLYPH.repeat(filled),
        EMPTY_GLYPH.repeat(RATING_SCALE - filled),
        rating
    )
}

fn format_date(value: &CellValue<'_>, locale: &DisplayLocale) -> String {
    match value {
        CellValue::Date(date) => {
            let mut out = String::new();
            // An unparseable pattern falls back to ISO 8601
            if write!(out, "{}", date.format(&locale.date_format)).is_err() {
                return date.to_string();
            }
            out
        }
        other => other.to_string(),
    }
}

fn format_boolean(value: &CellValue<'_>, _locale: &DisplayLocale) -> String {
    match value {
        CellValue::Bool(true) => ACTIVE_LABEL.to_string(),
        CellValue::Bool(false) => INACTIVE_LABEL.to_string(),
        other => other.to_string(),
    }
}

fn format_tags(value: &CellValue<'_>, _locale: &DisplayLocale) -> String {
    match value {
        CellValue::Tags(tags) => {
            let mut out = tags
                .iter()
                .take(VISIBLE_TAGS)
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join(", ");
            if tags.len() > VISIBLE_TAGS {
                let _ = write!(out, " +{}", tags.len() - VISIBLE_TAGS);
            }
            out
        }
        other => other.to_string(),
    }
}

fn format_optional(value: &CellValue<'_>, _locale: &DisplayLocale) -> String {
    match value {
        CellValue::OptionalText(Some(s)) => s.to_string(),
        CellValue::OptionalText(None) => MISSING_PLACEHOLDER.to_string(),
        other => other.to_string(),
    }
}

/// Inserts a separator every three digits: 1234567 -> "1,234,567"
pub fn group_digits(n: i64, separator: char) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if n < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(ch);
    }
    out
}

/// Label for a boolean status value
pub fn boolean_label(value: bool) -> &'static str {
    if value {
        ACTIVE_LABEL
    } else {
        INACTIVE_LABEL
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::borrow::Cow;

    fn fmt(semantic: SemanticType, value: CellValue<'_>) -> String {
        formatter_for(semantic)(&value, &DisplayLocale::default())
    }

    #[test]
    fn test_group_digits() {
        assert_eq!(group_digits(0, ','), "0");
        assert_eq!(group_digits(999, ','), "999");
        assert_eq!(group_digits(1000, ','), "1,000");
        assert_eq!(group_digits(65000, ','), "65,000");
        assert_eq!(group_digits(1234567, ','), "1,234,567");
        assert_eq!(group_digits(-1234, '.'), "-1.234");
    }

    #[test]
    fn test_currency_format() {
        assert_eq!(fmt(SemanticType::Currency, CellValue::Integer(85000)), "$85,000");
        assert_eq!(fmt(SemanticType::Currency, CellValue::Integer(500)), "$500");
    }

    #[test]
    fn test_rating_format() {
        assert_eq!(fmt(SemanticType::Rating, CellValue::Real(4.5)), "★★★★☆ (4.5)");
        assert_eq!(fmt(SemanticType::Rating, CellValue::Real(3.0)), "★★★☆☆ (3)");
        assert_eq!(fmt(SemanticType::Rating, CellValue::Real(0.2)), "☆☆☆☆☆ (0.2)");
        assert_eq!(fmt(SemanticType::Rating, CellValue::Real(5.0)), "★★★★★ (5)");
    }

    #[test]
    fn test_date_format() {
        let date = NaiveDate::from_ymd_opt(2019, 3, 7).unwrap();
        assert_eq!(fmt(SemanticType::Date, CellValue::Date(date)), "3/7/2019");

        let iso = DisplayLocale {
            date_format: "%Y-%m-%d".into(),
            ..DisplayLocale::default()
        };
        assert_eq!(
            formatter_for(SemanticType::Date)(&CellValue::Date(date), &iso),
            "2019-03-07"
        );
    }

    #[test]
    fn test_tag_list_overflow() {
        let none: Vec<String> = vec![];
        let two = vec!["Rust".to_string(), "Go".to_string()];
        let four = vec![
            "Rust".to_string(),
            "Go".to_string(),
            "SQL".to_string(),
            "K8s".to_string(),
        ];
        assert_eq!(fmt(SemanticType::TagList, CellValue::Tags(&none)), "");
        assert_eq!(fmt(SemanticType::TagList, CellValue::Tags(&two)), "Rust, Go");
        assert_eq!(fmt(SemanticType::TagList, CellValue::Tags(&four)), "Rust, Go +2");
    }

    #[test]
    fn test_boolean_labels() {
        assert_eq!(fmt(SemanticType::Boolean, CellValue::Bool(true)), "Active");
        assert_eq!(fmt(SemanticType::Boolean, CellValue::Bool(false)), "Inactive");
        assert_eq!(boolean_label(false), INACTIVE_LABEL);
    }

    #[test]
    fn test_optional_placeholder() {
        assert_eq!(fmt(SemanticType::OptionalText, CellValue::OptionalText(None)), "N/A");
        assert_eq!(
            fmt(SemanticType::OptionalText, CellValue::OptionalText(Some("Jane Roe"))),
            "Jane Roe"
        );
    }

    #[test]
    fn test_mismatched_value_falls_back_to_raw() {
        assert_eq!(
            fmt(SemanticType::Currency, CellValue::Text(Cow::Borrowed("n/a"))),
            "n/a"
        );
    }
}
