//! Per-column filters and the session's FilterState

use std::collections::btree_map;
use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::errors::{FilterError, FilterResult};
use crate::schema::{Column, FieldKey, FilterKind};

/// An active predicate on one column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum ColumnFilter {
    /// Case-insensitive substring
    TextContains { value: String },
    /// Inclusive [min, max]; a missing bound is open
    NumericRange { min: Option<f64>, max: Option<f64> },
    /// Display value must be one of `values`; an empty set does not restrict
    SetMembership { values: BTreeSet<String> },
    /// Inclusive calendar-date range; a missing bound is open
    DateRange {
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    },
    /// Boolean field must equal `value`
    BooleanExact { value: bool },
}

impl ColumnFilter {
    pub fn contains(value: impl Into<String>) -> Self {
        ColumnFilter::TextContains {
            value: value.into(),
        }
    }

    pub fn range(min: Option<f64>, max: Option<f64>) -> Self {
        ColumnFilter::NumericRange { min, max }
    }

    pub fn one_of<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ColumnFilter::SetMembership {
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    pub fn dates(from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        ColumnFilter::DateRange { from, to }
    }

    pub fn boolean(value: bool) -> Self {
        ColumnFilter::BooleanExact { value }
    }

    /// Returns the filter kind
    pub fn kind(&self) -> FilterKind {
        match self {
            ColumnFilter::TextContains { .. } => FilterKind::TextContains,
            ColumnFilter::NumericRange { .. } => FilterKind::NumericRange,
            ColumnFilter::SetMembership { .. } => FilterKind::SetMembership,
            ColumnFilter::DateRange { .. } => FilterKind::DateRange,
            ColumnFilter::BooleanExact { .. } => FilterKind::BooleanExact,
        }
    }

    /// Checks the filter against the column it is meant for.
    pub fn validate(&self, column: &Column) -> FilterResult<()> {
        let key = column.key().as_str();
        let spec = column.spec();

        if !spec.accepts(self.kind()) {
            return Err(FilterError::kind_mismatch(
                key,
                self.kind().as_str(),
                spec.filter.as_str(),
            ));
        }

        match self {
            ColumnFilter::NumericRange { min, max } => {
                for bound in [min, max].into_iter().flatten() {
                    if !bound.is_finite() {
                        return Err(FilterError::malformed(
                            key,
                            format!("bound {} is not a finite number", bound),
                        ));
                    }
                }
                if let (Some(lo), Some(hi)) = (min, max) {
                    if lo > hi {
                        return Err(FilterError::malformed(
                            key,
                            format!("minimum {} exceeds maximum {}", lo, hi),
                        ));
                    }
                }
            }
            ColumnFilter::DateRange {
                from: Some(from),
                to: Some(to),
            } if from > to => {
                return Err(FilterError::malformed(
                    key,
                    format!("start date {} is after end date {}", from, to),
                ));
            }
            ColumnFilter::SetMembership { values } => {
                if let Some(unknown) = values.iter().find(|v| !column.options().contains(*v)) {
                    return Err(FilterError::malformed(
                        key,
                        format!("'{}' is not one of the column's values", unknown),
                    ));
                }
            }
            _ => {}
        }

        Ok(())
    }
}

/// Active filters keyed by column. Absent key means no filter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterState {
    filters: BTreeMap<FieldKey, ColumnFilter>,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates and installs a filter on `column`.
    ///
    /// On error the state is left unchanged. Text-contains values are
    /// stored trimmed; a blank one clears the column's filter instead.
    pub fn apply(&mut self, column: &Column, filter: ColumnFilter) -> FilterResult<()> {
        filter.validate(column)?;

        let filter = match filter {
            ColumnFilter::TextContains { value } => {
                let trimmed = value.trim();
                if trimmed.is_empty() {
                    self.filters.remove(&column.key());
                    return Ok(());
                }
                ColumnFilter::contains(trimmed)
            }
            other => other,
        };

        self.filters.insert(column.key(), filter);
        Ok(())
    }

    /// Removes the filter on `key`; returns whether one was active
    pub fn remove(&mut self, key: FieldKey) -> bool {
        self.filters.remove(&key).is_some()
    }

    pub fn clear(&mut self) {
        self.filters.clear();
    }

    pub fn get(&self, key: FieldKey) -> Option<&ColumnFilter> {
        self.filters.get(&key)
    }

    pub fn iter(&self) -> btree_map::Iter<'_, FieldKey, ColumnFilter> {
        self.filters.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Employee;
    use crate::schema::SchemaRegistry;

    fn registry() -> SchemaRegistry {
        let emp = Employee {
            id: 1,
            first_name: "Kim".into(),
            last_name: "Lee".into(),
            email: "kim@corp.test".into(),
            department: "Engineering".into(),
            position: "Engineer".into(),
            salary: 90000,
            location: "Austin".into(),
            age: 33,
            hire_date: NaiveDate::from_ymd_opt(2018, 5, 20).unwrap(),
            performance_rating: 4.0,
            projects_completed: 8,
            is_active: true,
            skills: vec![],
            manager: None,
        };
        SchemaRegistry::with_defaults(&[emp])
    }

    #[test]
    fn test_apply_valid_range() {
        let registry = registry();
        let mut state = FilterState::new();
        let salary = registry.column(FieldKey::Salary).unwrap();

        state.apply(salary, ColumnFilter::range(Some(1.0), None)).unwrap();
        assert_eq!(state.len(), 1);
        assert_eq!(state.get(FieldKey::Salary), Some(&ColumnFilter::range(Some(1.0), None)));
    }

    #[test]
    fn test_inverted_range_leaves_state_unchanged() {
        let registry = registry();
        let mut state = FilterState::new();
        let salary = registry.column(FieldKey::Salary).unwrap();
        state.apply(salary, ColumnFilter::range(Some(10.0), Some(20.0))).unwrap();

        let before = state.clone();
        let err = state
            .apply(salary, ColumnFilter::range(Some(50.0), Some(20.0)))
            .unwrap_err();
        assert_eq!(err.code().code(), "FILTER_MALFORMED");
        assert_eq!(state, before);
    }

    #[test]
    fn test_non_finite_bound_rejected() {
        let registry = registry();
        let mut state = FilterState::new();
        let age = registry.column(FieldKey::Age).unwrap();
        assert!(state.apply(age, ColumnFilter::range(Some(f64::NAN), None)).is_err());
        assert!(state.is_empty());
    }

    #[test]
    fn test_kind_mismatch_rejected() {
        let registry = registry();
        let mut state = FilterState::new();
        let hire = registry.column(FieldKey::HireDate).unwrap();
        let err = state.apply(hire, ColumnFilter::range(Some(1.0), None)).unwrap_err();
        assert_eq!(err.code().code(), "FILTER_KIND_MISMATCH");
    }

    #[test]
    fn test_set_values_must_be_known_options() {
        let registry = registry();
        let mut state = FilterState::new();
        let dept = registry.column(FieldKey::Department).unwrap();

        assert!(state.apply(dept, ColumnFilter::one_of(["Engineering"])).is_ok());
        assert!(state.apply(dept, ColumnFilter::one_of(["Marketing"])).is_err());
        assert_eq!(state.get(FieldKey::Department), Some(&ColumnFilter::one_of(["Engineering"])));
    }

    #[test]
    fn test_empty_set_is_accepted() {
        let registry = registry();
        let mut state = FilterState::new();
        let dept = registry.column(FieldKey::Department).unwrap();
        let empty: [&str; 0] = [];
        assert!(state.apply(dept, ColumnFilter::one_of(empty)).is_ok());
        assert_eq!(state.len(), 1);
    }

    #[test]
    fn test_empty_text_clears_filter() {
        let registry = registry();
        let mut state = FilterState::new();
        let position = registry.column(FieldKey::Position).unwrap();

        state.apply(position, ColumnFilter::contains("eng")).unwrap();
        assert_eq!(state.len(), 1);
        state.apply(position, ColumnFilter::contains("  ")).unwrap();
        assert!(state.is_empty());
    }

    #[test]
    fn test_padded_text_is_stored_trimmed() {
        let registry = registry();
        let mut state = FilterState::new();
        let position = registry.column(FieldKey::Position).unwrap();

        state.apply(position, ColumnFilter::contains(" engineer ")).unwrap();
        assert_eq!(state.get(FieldKey::Position), Some(&ColumnFilter::contains("engineer")));
    }

    #[test]
    fn test_status_set_accepts_labels_absent_from_data() {
        let registry = registry();
        let mut state = FilterState::new();
        let status = registry.column(FieldKey::Status).unwrap();
        assert!(state.apply(status, ColumnFilter::one_of(["Inactive"])).is_ok());
    }

    #[test]
    fn test_inverted_date_range_rejected() {
        let registry = registry();
        let mut state = FilterState::new();
        let hire = registry.column(FieldKey::HireDate).unwrap();
        let later = NaiveDate::from_ymd_opt(2022, 1, 1);
        let earlier = NaiveDate::from_ymd_opt(2021, 1, 1);
        assert!(state.apply(hire, ColumnFilter::dates(later, earlier)).is_err());
        assert!(state.apply(hire, ColumnFilter::dates(earlier, later)).is_ok());
    }

    #[test]
    fn test_boolean_exact_on_status() {
        let registry = registry();
        let mut state = FilterState::new();
        let status = registry.column(FieldKey::Status).unwrap();
        assert!(state.apply(status, ColumnFilter::boolean(false)).is_ok());

        let age = registry.column(FieldKey::Age).unwrap();
        assert!(state.apply(age, ColumnFilter::boolean(true)).is_err());
    }

    #[test]
    fn test_remove_and_clear() {
        let registry = registry();
        let mut state = FilterState::new();
        let age = registry.column(FieldKey::Age).unwrap();
        state.apply(age, ColumnFilter::range(None, Some(40.0))).unwrap();

        assert!(state.remove(FieldKey::Age));
        assert!(!state.remove(FieldKey::Age));

        state.apply(age, ColumnFilter::range(None, Some(40.0))).unwrap();
        state.clear();
        assert!(state.is_empty());
    }
}
