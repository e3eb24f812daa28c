//! Dataset-wide statistics over the full, unfiltered collection

use std::collections::HashMap;

use serde::Serialize;

use crate::data::Employee;

/// Largest department by head count
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopDepartment {
    pub name: String,
    pub count: usize,
}

/// Summary header figures
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetSummary {
    pub count: usize,
    pub active_count: usize,
    /// Rounded to the nearest integer
    pub average_salary: u64,
    /// Rounded to the nearest integer
    pub average_age: u32,
    /// Rounded to one decimal
    pub average_rating: f64,
    pub top_department: Option<TopDepartment>,
}

impl DatasetSummary {
    /// Neutral summary of an empty collection
    pub fn empty() -> Self {
        Self {
            count: 0,
            active_count: 0,
            average_salary: 0,
            average_age: 0,
            average_rating: 0.0,
            top_department: None,
        }
    }
}

/// Computes the summary figures.
///
/// An empty collection yields zeros and no top department. Department
/// ties go to the department encountered first in collection order.
pub fn summarize(records: &[Employee]) -> DatasetSummary {
    if records.is_empty() {
        return DatasetSummary::empty();
    }

    let count = records.len();
    let n = count as f64;

    let salary_total: f64 = records.iter().map(|e| e.salary as f64).sum();
    let age_total: f64 = records.iter().map(|e| f64::from(e.age)).sum();
    let rating_total: f64 = records.iter().map(|e| e.performance_rating).sum();

    DatasetSummary {
        count,
        active_count: records.iter().filter(|e| e.is_active).count(),
        average_salary: (salary_total / n).round() as u64,
        average_age: (age_total / n).round() as u32,
        average_rating: (rating_total / n * 10.0).round() / 10.0,
        top_department: top_department(records),
    }
}

fn top_department(records: &[Employee]) -> Option<TopDepartment> {
    // Counts in first-encountered order
    let mut order: Vec<(&str, usize)> = Vec::new();
    let mut slots: HashMap<&str, usize> = HashMap::new();

    for emp in records {
        let slot = *slots.entry(emp.department.as_str()).or_insert_with(|| {
            order.push((emp.department.as_str(), 0));
            order.len() - 1
        });
        order[slot].1 += 1;
    }

    let mut best: Option<(&str, usize)> = None;
    for (name, count) in order {
        if best.map_or(true, |(_, top)| count > top) {
            best = Some((name, count));
        }
    }

    best.map(|(name, count)| TopDepartment {
        name: name.to_string(),
        count,
    })
}
