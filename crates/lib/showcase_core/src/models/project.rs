//! Project submission domain models.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ValidationError, de, require_fields};

/// Review state of a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectStatus {
    Pending,
    Approved,
    Rejected,
}

impl ProjectStatus {
    pub const ALL: [ProjectStatus; 3] = [
        ProjectStatus::Pending,
        ProjectStatus::Approved,
        ProjectStatus::Rejected,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectStatus::Pending => "pending",
            ProjectStatus::Approved => "approved",
            ProjectStatus::Rejected => "rejected",
        }
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A student project as returned by the project service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectRecord {
    #[serde(deserialize_with = "de::id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub faculty: Option<String>,
    #[serde(default, deserialize_with = "de::optional_year")]
    pub year: Option<i32>,
    /// Ordered technology tags.
    #[serde(default, deserialize_with = "de::tags")]
    pub technologies: Vec<String>,
    #[serde(default)]
    pub student_name: Option<String>,
    pub status: ProjectStatus,
    #[serde(default)]
    pub supervisor_comments: Option<String>,
    /// Server-relative path of the uploaded document.
    #[serde(default)]
    pub document_path: Option<String>,
    #[serde(default, deserialize_with = "de::optional_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
}

impl ProjectRecord {
    /// First `limit` tags plus the number of tags left out.
    pub fn technology_preview(&self, limit: usize) -> (&[String], usize) {
        let shown = self.technologies.len().min(limit);
        (
            &self.technologies[..shown],
            self.technologies.len() - shown,
        )
    }

    /// Whether the record may be shown to anonymous visitors.
    pub fn is_public(&self) -> bool {
        self.status == ProjectStatus::Approved
    }
}

/// A selectable project category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    #[serde(deserialize_with = "de::id")]
    pub id: String,
    pub name: String,
}

/// Fields of a new project submission, as typed into the submit form.
///
/// The accompanying document travels separately (see the API client).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    pub title: String,
    pub description: String,
    pub category: String,
    /// Comma-separated tags, e.g. `"React, Node.js"`.
    pub technologies: String,
    pub year: String,
    pub faculty: String,
}

impl Submission {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_fields(&[
            ("title", &self.title),
            ("description", &self.description),
            ("category", &self.category),
            ("technologies", &self.technologies),
            ("year", &self.year),
            ("faculty", &self.faculty),
        ])?;
        de::parse_year(&self.year).map_err(|e| ValidationError::InvalidField {
            field: "year",
            reason: e.to_string(),
        })?;
        if self.tags().is_empty() {
            return Err(ValidationError::MissingField("technologies"));
        }
        Ok(())
    }

    /// The technology field split into tags.
    pub fn tags(&self) -> Vec<String> {
        de::split_tags(&self.technologies)
    }

    /// Form fields in upload order.
    pub fn form_fields(&self) -> [(&'static str, &str); 6] {
        [
            ("title", self.title.as_str()),
            ("description", self.description.as_str()),
            ("category", self.category.as_str()),
            ("technologies", self.technologies.as_str()),
            ("year", self.year.trim()),
            ("faculty", self.faculty.as_str()),
        ]
    }
}

/// A supervisor's verdict on a pending submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Adjudication {
    pub status: ProjectStatus,
    pub comments: Option<String>,
}

impl Adjudication {
    pub fn approve(comments: Option<String>) -> Self {
        Self {
            status: ProjectStatus::Approved,
            comments,
        }
    }

    pub fn reject(comments: impl Into<String>) -> Self {
        Self {
            status: ProjectStatus::Rejected,
            comments: Some(comments.into()),
        }
    }

    /// A verdict must move the project out of `pending`.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.status == ProjectStatus::Pending {
            return Err(ValidationError::InvalidField {
                field: "status",
                reason: "must be approved or rejected".into(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn submission() -> Submission {
        Submission {
            title: "Smart Irrigation".into(),
            description: "Soil moisture driven watering".into(),
            category: "IoT".into(),
            technologies: "Rust, LoRa".into(),
            year: "2024".into(),
            faculty: "Engineering".into(),
        }
    }

    #[test]
    fn record_accepts_api_shapes() {
        let record: ProjectRecord = serde_json::from_value(json!({
            "id": 7,
            "title": "Campus Map",
            "description": "Indoor navigation",
            "category": "Mobile",
            "faculty": "Science",
            "year": "2023",
            "technologies": "Kotlin, , Firebase ",
            "student_name": "Okello",
            "status": "approved",
            "document_path": "uploads/map.pdf",
            "created_at": "2024-02-01T09:30:00.000Z"
        }))
        .unwrap();

        assert_eq!(record.id, "7");
        assert_eq!(record.year, Some(2023));
        assert_eq!(record.technologies, vec!["Kotlin", "Firebase"]);
        assert_eq!(record.status, ProjectStatus::Approved);
        assert!(record.created_at.is_some());
        assert!(record.supervisor_comments.is_none());
    }

    #[test]
    fn record_tolerates_missing_optional_fields() {
        let record: ProjectRecord = serde_json::from_value(json!({
            "id": "abc",
            "title": "Untitled",
            "status": "pending",
            "year": null,
            "technologies": ["Go"],
            "created_at": "2024-02-01 09:30:00"
        }))
        .unwrap();

        assert!(record.faculty.is_none());
        assert!(record.year.is_none());
        assert_eq!(record.technologies, vec!["Go"]);
        assert!(record.created_at.is_some());
        assert!(!record.is_public());
    }

    #[test]
    fn record_with_garbled_timestamp_still_loads() {
        let record: ProjectRecord = serde_json::from_value(json!({
            "id": 1,
            "title": "X",
            "status": "approved",
            "created_at": "last tuesday"
        }))
        .unwrap();
        assert!(record.created_at.is_none());
    }

    #[test]
    fn technology_preview_counts_the_rest() {
        let record: ProjectRecord = serde_json::from_value(json!({
            "id": 1,
            "title": "X",
            "status": "approved",
            "technologies": "A,B,C,D,E"
        }))
        .unwrap();

        let (shown, more) = record.technology_preview(3);
        assert_eq!(shown, ["A", "B", "C"]);
        assert_eq!(more, 2);

        let (shown, more) = record.technology_preview(10);
        assert_eq!(shown.len(), 5);
        assert_eq!(more, 0);
    }

    #[test]
    fn submission_validation() {
        assert!(submission().validate().is_ok());

        let mut blank = submission();
        blank.title = String::new();
        assert_eq!(blank.validate(), Err(ValidationError::MissingField("title")));

        let mut bad_year = submission();
        bad_year.year = "twenty".into();
        assert!(matches!(
            bad_year.validate(),
            Err(ValidationError::InvalidField { field: "year", .. })
        ));

        let mut commas = submission();
        commas.technologies = " , ,".into();
        assert_eq!(
            commas.validate(),
            Err(ValidationError::MissingField("technologies"))
        );
    }

    #[test]
    fn adjudication_must_leave_pending() {
        assert!(Adjudication::approve(None).validate().is_ok());
        assert!(Adjudication::reject("Needs a demo").validate().is_ok());
        let stuck = Adjudication {
            status: ProjectStatus::Pending,
            comments: None,
        };
        assert!(stuck.validate().is_err());
    }

    #[test]
    fn adjudication_wire_shape() {
        let body = serde_json::to_value(Adjudication::reject("Incomplete")).unwrap();
        assert_eq!(body, json!({ "status": "rejected", "comments": "Incomplete" }));
    }
}
