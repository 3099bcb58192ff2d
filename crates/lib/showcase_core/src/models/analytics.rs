//! Aggregates served by the admin analytics endpoint.

use serde::{Deserialize, Serialize};

use super::{ProjectStatus, de};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Analytics {
    #[serde(default)]
    pub projects_per_faculty: Vec<FacultyCount>,
    #[serde(default)]
    pub approval_rates: Vec<StatusCount>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacultyCount {
    #[serde(default)]
    pub faculty: Option<String>,
    #[serde(deserialize_with = "de::count")]
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCount {
    pub status: ProjectStatus,
    #[serde(deserialize_with = "de::count")]
    pub count: u64,
}

impl Analytics {
    /// Count reported for `status`, zero when absent.
    pub fn count_for(&self, status: ProjectStatus) -> u64 {
        self.approval_rates
            .iter()
            .find(|rate| rate.status == status)
            .map(|rate| rate.count)
            .unwrap_or(0)
    }
}
