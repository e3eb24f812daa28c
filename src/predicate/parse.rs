//! Filter expression parsing
//!
//! Grammar:
//!
//! ```text
//! expr   := key op value
//! op     := "~" (contains) | "=" (by column kind)
//! range  := bound ".." bound | bound ".." | ".." bound | bound
//! set    := item ("|" item)*        (empty value selects nothing)
//! bool   := true | false | yes | no | active | inactive
//! ```
//!
//! Text is interpreted according to the target column's filter kind. A
//! bound that is not a number (or not a date) is rejected, never coerced.

use std::sync::OnceLock;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use regex::Regex;

use super::errors::{FilterError, FilterResult};
use super::filter::ColumnFilter;
use crate::schema::{boolean_label, Column, FilterKind, SemanticType};

/// Operator of a filter expression
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOp {
    /// `~`: substring match, text columns only
    Contains,
    /// `=`: interpreted by the column's filter kind
    Equals,
}

/// A split but not yet typed filter expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterExpression {
    pub column: String,
    pub op: FilterOp,
    pub value: String,
}

fn expression_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^\s*(?P<key>[A-Za-z_][A-Za-z0-9_]*)\s*(?P<op>~|=)(?P<value>.*)$")
            .expect("static filter pattern is valid")
    })
}

/// Splits `key~value` / `key=value` into its parts
pub fn parse_expression(expr: &str) -> FilterResult<FilterExpression> {
    let caps = expression_pattern().captures(expr).ok_or_else(|| {
        FilterError::malformed(
            expr.trim(),
            "expected '<column>=<value>' or '<column>~<text>'",
        )
    })?;

    let op = match &caps["op"] {
        "~" => FilterOp::Contains,
        _ => FilterOp::Equals,
    };

    Ok(FilterExpression {
        column: caps["key"].to_string(),
        op,
        value: caps["value"].trim().to_string(),
    })
}

/// Turns raw filter input into a typed filter for a specific column
pub struct FilterParser;

impl FilterParser {
    /// Parses `raw` as a filter on `column`.
    pub fn parse(column: &Column, op: FilterOp, raw: &str) -> FilterResult<ColumnFilter> {
        let key = column.key().as_str();
        let spec = column.spec();
        let raw = raw.trim();

        if op == FilterOp::Contains {
            if spec.filter != FilterKind::TextContains {
                return Err(FilterError::kind_mismatch(
                    key,
                    FilterKind::TextContains.as_str(),
                    spec.filter.as_str(),
                ));
            }
            return Ok(ColumnFilter::contains(raw));
        }

        match spec.filter {
            FilterKind::TextContains => Ok(ColumnFilter::contains(raw)),
            FilterKind::NumericRange => {
                let (min, max) = parse_range(key, raw, parse_number)?;
                Ok(ColumnFilter::range(min, max))
            }
            FilterKind::DateRange => {
                let (from, to) = parse_range(key, raw, parse_date)?;
                Ok(ColumnFilter::dates(from, to))
            }
            FilterKind::SetMembership => {
                let boolean = spec.semantic == SemanticType::Boolean;
                let values = raw
                    .split('|')
                    .map(str::trim)
                    .filter(|item| !item.is_empty())
                    .map(|item| match parse_bool(item) {
                        Some(b) if boolean => boolean_label(b).to_string(),
                        _ => item.to_string(),
                    });
                Ok(ColumnFilter::one_of(values))
            }
            FilterKind::BooleanExact => parse_bool(raw)
                .map(ColumnFilter::boolean)
                .ok_or_else(|| FilterError::malformed(key, format!("'{}' is not a boolean", raw))),
        }
    }
}

fn parse_range<T, F>(key: &str, raw: &str, parse: F) -> FilterResult<(Option<T>, Option<T>)>
where
    T: Copy,
    F: Fn(&str, &str) -> FilterResult<T>,
{
    let (lo, hi) = match raw.split_once("..") {
        Some((lo, hi)) => (lo.trim(), hi.trim()),
        None => {
            let value = parse(key, raw)?;
            return Ok((Some(value), Some(value)));
        }
    };

    if lo.is_empty() && hi.is_empty() {
        return Err(FilterError::malformed(key, "range needs at least one bound"));
    }

    let lo = if lo.is_empty() { None } else { Some(parse(key, lo)?) };
    let hi = if hi.is_empty() { None } else { Some(parse(key, hi)?) };
    Ok((lo, hi))
}

fn parse_number(key: &str, raw: &str) -> FilterResult<f64> {
    match raw.parse::<f64>() {
        Ok(n) if n.is_finite() => Ok(n),
        _ => Err(FilterError::malformed(
            key,
            format!("'{}' is not a number", raw),
        )),
    }
}

/// Accepts a calendar date, a naive timestamp or an RFC 3339 timestamp.
/// Time of day is dropped.
fn parse_date(key: &str, raw: &str) -> FilterResult<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(date);
    }
    if let Ok(ts) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
        return Ok(ts.date());
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(ts.date_naive());
    }
    Err(FilterError::malformed(
        key,
        format!("'{}' is not a date (expected YYYY-MM-DD)", raw),
    ))
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "true" | "yes" | "active" => Some(true),
        "false" | "no" | "inactive" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Employee;
    use crate::schema::SchemaRegistry;

    fn registry() -> SchemaRegistry {
        let emp = Employee {
            id: 4,
            first_name: "Ola".into(),
            last_name: "Nordmann".into(),
            email: "ola@corp.test".into(),
            department: "Marketing".into(),
            position: "Analyst".into(),
            salary: 64000,
            location: "Bergen".into(),
            age: 41,
            hire_date: NaiveDate::from_ymd_opt(2016, 9, 12).unwrap(),
            performance_rating: 3.9,
            projects_completed: 15,
            is_active: false,
            skills: vec!["Excel".into()],
            manager: Some("Kari Nordmann".into()),
        };
        SchemaRegistry::with_defaults(&[emp])
    }

    fn parse(registry: &SchemaRegistry, expr: &str) -> FilterResult<ColumnFilter> {
        let parsed = parse_expression(expr)?;
        let column = registry.column_by_name(&parsed.column).unwrap();
        FilterParser::parse(column, parsed.op, &parsed.value)
    }

    #[test]
    fn test_split_expression() {
        let expr = parse_expression(" salary = 10..20 ").unwrap();
        assert_eq!(expr.column, "salary");
        assert_eq!(expr.op, FilterOp::Equals);
        assert_eq!(expr.value, "10..20");

        let expr = parse_expression("position~lead").unwrap();
        assert_eq!(expr.op, FilterOp::Contains);

        assert!(parse_expression("no operator here").is_err());
        assert!(parse_expression("=value").is_err());
    }

    #[test]
    fn test_numeric_ranges() {
        let registry = registry();
        assert_eq!(
            parse(&registry, "salary=50000..80000").unwrap(),
            ColumnFilter::range(Some(50000.0), Some(80000.0))
        );
        assert_eq!(
            parse(&registry, "age=30..").unwrap(),
            ColumnFilter::range(Some(30.0), None)
        );
        assert_eq!(
            parse(&registry, "performance_rating=..4.5").unwrap(),
            ColumnFilter::range(None, Some(4.5))
        );
        assert_eq!(
            parse(&registry, "projects_completed=15").unwrap(),
            ColumnFilter::range(Some(15.0), Some(15.0))
        );
    }

    #[test]
    fn test_non_numeric_bound_rejected() {
        let registry = registry();
        let err = parse(&registry, "salary=lots..more").unwrap_err();
        assert_eq!(err.code().code(), "FILTER_MALFORMED");
        assert!(parse(&registry, "salary=..").is_err());
        assert!(parse(&registry, "salary=inf").is_err());
        assert!(parse(&registry, "age=NaN..").is_err());
    }

    #[test]
    fn test_date_ranges_drop_time_of_day() {
        let registry = registry();
        let filter = parse(&registry, "hire_date=2016-01-01T08:30:00..2016-12-31").unwrap();
        assert_eq!(
            filter,
            ColumnFilter::dates(
                NaiveDate::from_ymd_opt(2016, 1, 1),
                NaiveDate::from_ymd_opt(2016, 12, 31)
            )
        );

        let filter = parse(&registry, "hireDate=..2020-02-01T23:59:59+02:00").unwrap();
        assert_eq!(filter, ColumnFilter::dates(None, NaiveDate::from_ymd_opt(2020, 2, 1)));

        assert!(parse(&registry, "hire_date=yesterday").is_err());
    }

    #[test]
    fn test_set_values() {
        let registry = registry();
        assert_eq!(
            parse(&registry, "department=Marketing|Sales").unwrap(),
            ColumnFilter::one_of(["Marketing", "Sales"])
        );
        let empty: [&str; 0] = [];
        assert_eq!(parse(&registry, "location=").unwrap(), ColumnFilter::one_of(empty));
    }

    #[test]
    fn test_status_set_accepts_booleans() {
        let registry = registry();
        assert_eq!(
            parse(&registry, "status=false").unwrap(),
            ColumnFilter::one_of(["Inactive"])
        );
        assert_eq!(
            parse(&registry, "status=Active|inactive").unwrap(),
            ColumnFilter::one_of(["Active", "Inactive"])
        );
    }

    #[test]
    fn test_contains_only_on_text_columns() {
        let registry = registry();
        assert_eq!(
            parse(&registry, "manager~kari").unwrap(),
            ColumnFilter::contains("kari")
        );
        let err = parse(&registry, "salary~100").unwrap_err();
        assert_eq!(err.code().code(), "FILTER_KIND_MISMATCH");
    }

    #[test]
    fn test_parse_bool_words() {
        assert_eq!(parse_bool("YES"), Some(true));
        assert_eq!(parse_bool("Inactive"), Some(false));
        assert_eq!(parse_bool("maybe"), None);
    }
}
