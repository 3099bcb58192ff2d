//! Admin dashboard figures.

use serde::Serialize;

use crate::models::{Analytics, ProjectRecord, ProjectStatus};

/// Label for projects whose faculty or category is blank.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// One bar or slice of a dashboard chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabelledCount {
    pub label: String,
    pub count: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_projects: u64,
    pub pending_count: u64,
    pub approved_count: u64,
    pub rejected_count: u64,
    pub projects_by_faculty: Vec<LabelledCount>,
    pub projects_by_category: Vec<LabelledCount>,
}

impl DashboardStats {
    /// Combine the analytics aggregates with the approved list.
    ///
    /// Category counts come from `approved`, in first-seen order.
    pub fn build(analytics: &Analytics, approved: &[ProjectRecord]) -> Self {
        let pending_count = analytics.count_for(ProjectStatus::Pending);
        let approved_count = analytics.count_for(ProjectStatus::Approved);
        let rejected_count = analytics.count_for(ProjectStatus::Rejected);

        let projects_by_faculty = analytics
            .projects_per_faculty
            .iter()
            .map(|row| LabelledCount {
                label: label_or_uncategorized(row.faculty.as_deref()),
                count: row.count,
            })
            .collect();

        let mut projects_by_category: Vec<LabelledCount> = Vec::new();
        for record in approved {
            let label = label_or_uncategorized(record.category.as_deref());
            match projects_by_category.iter_mut().find(|c| c.label == label) {
                Some(entry) => entry.count += 1,
                None => projects_by_category.push(LabelledCount { label, count: 1 }),
            }
        }

        Self {
            total_projects: pending_count + approved_count + rejected_count,
            pending_count,
            approved_count,
            rejected_count,
            projects_by_faculty,
            projects_by_category,
        }
    }

    /// Share of adjudicated projects that were approved, in percent.
    pub fn approval_rate(&self) -> Option<f64> {
        let decided = self.approved_count + self.rejected_count;
        (decided > 0).then(|| self.approved_count as f64 * 100.0 / decided as f64)
    }
}

fn label_or_uncategorized(label: Option<&str>) -> String {
    match label.map(str::trim) {
        Some(l) if !l.is_empty() => l.to_string(),
        _ => UNCATEGORIZED.to_string(),
    }
}
