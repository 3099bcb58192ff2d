//! Plain-text views.

use std::fmt::Write;

use showcase_core::catalog::Catalog;
use showcase_core::dashboard::{DashboardStats, LabelledCount};
use showcase_core::models::{Identity, ProjectRecord, ProjectStatus};
use showcase_core::session::NavLink;
use url::Url;

/// Tags shown on a gallery card before "+N more".
pub const CARD_TAGS: usize = 3;

pub fn nav(links: &[NavLink], display_name: Option<&str>) -> Result<String, std::fmt::Error> {
    let mut out = String::new();
    for link in links {
        match link.route() {
            Some(route) => writeln!(out, "{:<16} {}", link.label(), route)?,
            None => writeln!(out, "{:<16} showcase logout", link.label())?,
        }
    }
    if let Some(name) = display_name {
        writeln!(out, "\nSigned in as {name}")?;
    }
    Ok(out)
}

pub fn whoami(identity: Option<&Identity>, display_name: Option<&str>) -> String {
    match identity {
        Some(identity) => format!(
            "{} ({}, id {})",
            display_name.unwrap_or(&identity.username),
            identity.role,
            identity.user_id
        ),
        None => "Not signed in".to_string(),
    }
}

pub fn status_badge(status: ProjectStatus) -> &'static str {
    match status {
        ProjectStatus::Pending => "[PENDING]",
        ProjectStatus::Approved => "[APPROVED]",
        ProjectStatus::Rejected => "[REJECTED]",
    }
}

fn tag_line(record: &ProjectRecord) -> String {
    let (shown, hidden) = record.technology_preview(CARD_TAGS);
    let mut line = shown.join(", ");
    if hidden > 0 {
        line.push_str(&format!(" +{hidden} more"));
    }
    line
}

fn or_dash(value: Option<&str>) -> &str {
    value.filter(|v| !v.trim().is_empty()).unwrap_or("-")
}

pub fn card(out: &mut String, record: &ProjectRecord) -> std::fmt::Result {
    writeln!(out, "#{} {}", record.id, record.title)?;
    let year = record.year.map(|y| y.to_string());
    writeln!(
        out,
        "    {} | {} | {}",
        or_dash(record.faculty.as_deref()),
        or_dash(record.category.as_deref()),
        or_dash(year.as_deref())
    )?;
    if let Some(student) = record.student_name.as_deref() {
        writeln!(out, "    by {student}")?;
    }
    if !record.technologies.is_empty() {
        writeln!(out, "    {}", tag_line(record))?;
    }
    Ok(())
}

pub fn gallery(catalog: &Catalog, facets: bool) -> Result<String, std::fmt::Error> {
    let mut out = String::new();
    if facets {
        writeln!(out, "Faculties:  {}", catalog.faculties().join(", "))?;
        let years: Vec<String> = catalog.years().iter().map(i32::to_string).collect();
        writeln!(out, "Years:      {}", years.join(", "))?;
        let categories: Vec<&str> = catalog.categories().iter().map(|c| c.name.as_str()).collect();
        writeln!(out, "Categories: {}", categories.join(", "))?;
        writeln!(out)?;
    }

    let visible = catalog.visible();
    if visible.is_empty() {
        writeln!(out, "No projects found matching your criteria.")?;
        return Ok(out);
    }
    for record in &visible {
        card(&mut out, record)?;
    }
    writeln!(out, "\n{} of {} projects", visible.len(), catalog.records().len())?;
    Ok(out)
}

pub fn details(
    record: &ProjectRecord,
    document: Option<&Url>,
    signed_in: bool,
) -> Result<String, std::fmt::Error> {
    let mut out = String::new();
    writeln!(out, "{} {}", record.title, status_badge(record.status))?;
    writeln!(out)?;
    if !record.description.is_empty() {
        writeln!(out, "{}\n", record.description)?;
    }
    writeln!(out, "Student:      {}", or_dash(record.student_name.as_deref()))?;
    writeln!(out, "Faculty:      {}", or_dash(record.faculty.as_deref()))?;
    writeln!(out, "Category:     {}", or_dash(record.category.as_deref()))?;
    let year = record.year.map(|y| y.to_string());
    writeln!(out, "Year:         {}", or_dash(year.as_deref()))?;
    writeln!(out, "Technologies: {}", record.technologies.join(", "))?;
    if let Some(created) = record.created_at {
        writeln!(out, "Submitted:    {}", created.format("%Y-%m-%d"))?;
    }
    if let Some(comments) = record.supervisor_comments.as_deref() {
        writeln!(out, "Comments:     {comments}")?;
    }
    match document {
        Some(url) => writeln!(out, "Document:     {url}")?,
        None => writeln!(out, "Document:     none uploaded")?,
    }
    if record.status == ProjectStatus::Pending && signed_in {
        writeln!(out, "\nThis project is under review. Check back later for updates.")?;
    }
    Ok(out)
}

pub fn pending(records: &[ProjectRecord]) -> Result<String, std::fmt::Error> {
    let mut out = String::new();
    if records.is_empty() {
        writeln!(out, "No pending projects to review.")?;
        return Ok(out);
    }
    for record in records {
        card(&mut out, record)?;
        if !record.description.is_empty() {
            writeln!(out, "    {}", record.description)?;
        }
    }
    Ok(out)
}

fn counts(out: &mut String, title: &str, rows: &[LabelledCount]) -> std::fmt::Result {
    writeln!(out, "\n{title}")?;
    if rows.is_empty() {
        return writeln!(out, "  (none)");
    }
    let width = rows.iter().map(|r| r.label.len()).max().unwrap_or(0);
    for row in rows {
        writeln!(out, "  {:<width$}  {}", row.label, row.count)?;
    }
    Ok(())
}

pub fn dashboard(stats: &DashboardStats) -> Result<String, std::fmt::Error> {
    let mut out = String::new();
    writeln!(out, "Total projects: {}", stats.total_projects)?;
    writeln!(out, "Pending:        {}", stats.pending_count)?;
    writeln!(out, "Approved:       {}", stats.approved_count)?;
    writeln!(out, "Rejected:       {}", stats.rejected_count)?;
    if let Some(rate) = stats.approval_rate() {
        writeln!(out, "Approval rate:  {rate:.0}%")?;
    }
    counts(&mut out, "Projects by faculty", &stats.projects_by_faculty)?;
    counts(&mut out, "Projects by category", &stats.projects_by_category)?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use showcase_core::models::Role;

    fn record(technologies: &[&str]) -> ProjectRecord {
        ProjectRecord {
            id: "4".into(),
            title: "Smart irrigation".into(),
            description: "Soil moisture driven watering".into(),
            category: Some("IoT".into()),
            faculty: Some("Engineering".into()),
            year: Some(2024),
            technologies: technologies.iter().map(|t| t.to_string()).collect(),
            student_name: Some("Amina N.".into()),
            status: ProjectStatus::Approved,
            supervisor_comments: None,
            document_path: None,
            created_at: None,
        }
    }

    #[test]
    fn card_shows_three_tags_and_the_rest_as_count() {
        let mut out = String::new();
        card(&mut out, &record(&["Rust", "LoRa", "MQTT", "Grafana", "SQLite"])).unwrap();
        assert!(out.contains("Rust, LoRa, MQTT +2 more"));
        assert!(!out.contains("Grafana"));
    }

    #[test]
    fn card_without_overflow_has_no_more_suffix() {
        let mut out = String::new();
        card(&mut out, &record(&["Rust"])).unwrap();
        assert!(out.contains("    Rust\n"));
        assert!(!out.contains("more"));
    }

    #[test]
    fn empty_gallery_says_so() {
        let out = gallery(&Catalog::new(), false).unwrap();
        assert_eq!(out, "No projects found matching your criteria.\n");
    }

    #[test]
    fn details_mark_missing_document() {
        let out = details(&record(&[]), None, true).unwrap();
        assert!(out.starts_with("Smart irrigation [APPROVED]"));
        assert!(out.contains("none uploaded"));
        assert!(!out.contains("under review"));
    }

    #[test]
    fn pending_details_note_review_for_signed_in_users() {
        let mut pending = record(&[]);
        pending.status = ProjectStatus::Pending;
        assert!(details(&pending, None, true).unwrap().contains("under review"));
        assert!(!details(&pending, None, false).unwrap().contains("under review"));
    }

    #[test]
    fn whoami_prefers_cached_name() {
        let identity = Identity {
            user_id: "9".into(),
            username: "amina".into(),
            role: Role::Supervisor,
        };
        assert_eq!(
            whoami(Some(&identity), Some("Amina N.")),
            "Amina N. (supervisor, id 9)"
        );
        assert_eq!(whoami(None, None), "Not signed in");
    }

    #[test]
    fn dashboard_lists_empty_sections() {
        let out = dashboard(&DashboardStats::default()).unwrap();
        assert!(out.contains("Total projects: 0"));
        assert!(out.contains("Projects by faculty\n  (none)"));
    }
}
