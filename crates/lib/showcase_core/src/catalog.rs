// @zen-component: CAT-CatalogFilter
//
//! Client-side filtering of the published project gallery.
//!
//! The catalog holds the records from one fetch and a set of independent
//! criteria combined with AND. It never changes the records themselves; the
//! visible subset is recomputed whenever the records or criteria change.

use std::collections::HashSet;

use crate::models::{Category, ProjectRecord};

/// A filterable attribute of a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterField {
    Faculty,
    Category,
    Year,
    Technology,
}

/// Active search constraints. `None` matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub faculty: Option<String>,
    pub category: Option<String>,
    pub year: Option<String>,
    pub technology: Option<String>,
}

impl FilterCriteria {
    pub fn is_empty(&self) -> bool {
        self.faculty.is_none()
            && self.category.is_none()
            && self.year.is_none()
            && self.technology.is_none()
    }

    /// Set one field; a blank value unsets it.
    pub fn set(&mut self, field: FilterField, value: &str) {
        let value = Some(value.trim())
            .filter(|v| !v.is_empty())
            .map(str::to_string);
        match field {
            FilterField::Faculty => self.faculty = value,
            FilterField::Category => self.category = value,
            FilterField::Year => self.year = value,
            FilterField::Technology => self.technology = value,
        }
    }

    pub fn get(&self, field: FilterField) -> Option<&str> {
        match field {
            FilterField::Faculty => self.faculty.as_deref(),
            FilterField::Category => self.category.as_deref(),
            FilterField::Year => self.year.as_deref(),
            FilterField::Technology => self.technology.as_deref(),
        }
    }

    /// Whether `record` satisfies every set criterion.
    pub fn matches(&self, record: &ProjectRecord) -> bool {
        let faculty = self
            .faculty
            .as_deref()
            .is_none_or(|needle| contains_ci(record.faculty.as_deref(), needle));
        let category = self
            .category
            .as_deref()
            .is_none_or(|needle| contains_ci(record.category.as_deref(), needle));
        let year = self
            .year
            .as_deref()
            .is_none_or(|wanted| year_matches(record.year, wanted));
        let technology = self.technology.as_deref().is_none_or(|needle| {
            record
                .technologies
                .iter()
                .any(|tag| contains_ci(Some(tag.as_str()), needle))
        });
        faculty && category && year && technology
    }
}

fn contains_ci(haystack: Option<&str>, needle: &str) -> bool {
    haystack.is_some_and(|h| h.to_lowercase().contains(&needle.to_lowercase()))
}

/// Typed year input (`"2021"`, `" 2021 "`) against a numeric record year.
fn year_matches(year: Option<i32>, wanted: &str) -> bool {
    match (year, wanted.trim().parse::<i32>()) {
        (Some(year), Ok(wanted)) => year == wanted,
        _ => false,
    }
}

/// The fetched gallery plus its filter state.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    records: Vec<ProjectRecord>,
    categories: Vec<Category>,
    criteria: FilterCriteria,
    faculties: Vec<String>,
    years: Vec<i32>,
    visible: Vec<usize>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the held records and rebuild the facet lists.
    pub fn load(&mut self, records: Vec<ProjectRecord>) {
        self.records = records;
        self.faculties = distinct_faculties(&self.records);
        self.years = distinct_years_desc(&self.records);
        self.recompute();
    }

    /// Options for the category control.
    pub fn load_categories(&mut self, categories: Vec<Category>) {
        self.categories = categories;
    }

    pub fn set_criterion(&mut self, field: FilterField, value: &str) {
        self.criteria.set(field, value);
        self.recompute();
    }

    /// Unset every criterion.
    pub fn clear(&mut self) {
        self.criteria = FilterCriteria::default();
        self.recompute();
    }

    /// Records matching the current criteria, in loaded order.
    pub fn visible(&self) -> Vec<&ProjectRecord> {
        self.visible.iter().map(|&i| &self.records[i]).collect()
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn records(&self) -> &[ProjectRecord] {
        &self.records
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Distinct faculties in order of first appearance.
    pub fn faculties(&self) -> &[String] {
        &self.faculties
    }

    /// Distinct years, newest first.
    pub fn years(&self) -> &[i32] {
        &self.years
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn recompute(&mut self) {
        let criteria = &self.criteria;
        self.visible = self
            .records
            .iter()
            .enumerate()
            .filter(|(_, record)| criteria.matches(record))
            .map(|(i, _)| i)
            .collect();
    }
}

fn distinct_faculties(records: &[ProjectRecord]) -> Vec<String> {
    let mut seen = HashSet::new();
    records
        .iter()
        .filter_map(|r| r.faculty.as_deref())
        .filter(|f| !f.trim().is_empty())
        .filter(|f| seen.insert(*f))
        .map(str::to_string)
        .collect()
}

fn distinct_years_desc(records: &[ProjectRecord]) -> Vec<i32> {
    let mut years: Vec<i32> = records.iter().filter_map(|r| r.year).collect();
    years.sort_unstable_by(|a, b| b.cmp(a));
    years.dedup();
    years
}
