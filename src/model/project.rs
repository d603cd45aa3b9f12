use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Opaque project identifier.
///
/// Fresh ids are UUIDv7 strings, but any stored string is accepted so that
/// collections written by older builds keep loading.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectId(String);

impl ProjectId {
    /// Generate a new time-ordered id.
    pub fn generate() -> Self {
        Self(uuid::Uuid::now_v7().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ProjectId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Lifecycle state of a project.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectStatus {
    #[default]
    Active,
    Completed,
}

impl ProjectStatus {
    pub fn label(self) -> &'static str {
        match self {
            ProjectStatus::Active => "Active",
            ProjectStatus::Completed => "Completed",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            ProjectStatus::Active => ProjectStatus::Completed,
            ProjectStatus::Completed => ProjectStatus::Active,
        }
    }
}

/// The kind of work a project represents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectKind {
    #[default]
    Development,
    Design,
    Marketing,
    Research,
    /// Also absorbs tags this build does not know about.
    #[serde(other)]
    Other,
}

impl ProjectKind {
    pub const ALL: [ProjectKind; 5] = [
        ProjectKind::Development,
        ProjectKind::Design,
        ProjectKind::Marketing,
        ProjectKind::Research,
        ProjectKind::Other,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ProjectKind::Development => "Development",
            ProjectKind::Design => "Design",
            ProjectKind::Marketing => "Marketing",
            ProjectKind::Research => "Research",
            ProjectKind::Other => "Other",
        }
    }
}

/// Upper bound of the progress scale.
pub const PROGRESS_MAX: u8 = 100;

/// A tracked project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub deadline: NaiveDate,
    #[serde(rename = "type")]
    pub kind: ProjectKind,
    pub status: ProjectStatus,
    /// Completion percentage, 0 to 100.
    pub progress: u8,
    pub created_at: DateTime<Utc>,
}

impl Project {
    /// Build a fresh active project from submitted form data.
    pub fn new(id: ProjectId, draft: ProjectDraft, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: draft.name,
            description: draft.description,
            deadline: draft.deadline,
            kind: draft.kind,
            status: ProjectStatus::Active,
            progress: 0,
            created_at: now,
        }
    }

    /// Overwrite the user-editable fields, keeping identity and progress.
    pub fn apply(&mut self, draft: ProjectDraft) {
        self.name = draft.name;
        self.description = draft.description;
        self.deadline = draft.deadline;
        self.kind = draft.kind;
    }

    pub fn is_active(&self) -> bool {
        self.status == ProjectStatus::Active
    }
}

/// The fields an add/edit form yields.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectDraft {
    pub name: String,
    pub description: String,
    pub deadline: NaiveDate,
    pub kind: ProjectKind,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_browser_field_names() {
        let project = Project {
            id: ProjectId::from("1712345678901"),
            name: "Site".into(),
            description: String::new(),
            deadline: NaiveDate::from_ymd_opt(2025, 3, 5).unwrap(),
            kind: ProjectKind::Design,
            status: ProjectStatus::Completed,
            progress: 100,
            created_at: "2025-01-01T10:00:00Z".parse().unwrap(),
        };

        let json = serde_json::to_value(&project).unwrap();
        assert_eq!(json["id"], "1712345678901");
        assert_eq!(json["type"], "design");
        assert_eq!(json["status"], "completed");
        assert_eq!(json["deadline"], "2025-03-05");
        assert_eq!(json["createdAt"], "2025-01-01T10:00:00Z");
    }

    #[test]
    fn unknown_kind_loads_as_other() {
        let json = r#"{
            "id": "1",
            "name": "Legacy",
            "description": "",
            "deadline": "2024-06-01",
            "type": "consulting",
            "status": "active",
            "progress": 10,
            "createdAt": "2024-05-01T00:00:00.000Z"
        }"#;
        let project: Project = serde_json::from_str(json).unwrap();
        assert_eq!(project.kind, ProjectKind::Other);
        assert_eq!(project.progress, 10);
    }

    #[test]
    fn generated_ids_are_unique() {
        let a = ProjectId::generate();
        let b = ProjectId::generate();
        assert_ne!(a, b);
    }
}
