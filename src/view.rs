//! Plain render records for the project list.
//!
//! The UI layer draws these without looking at `Project` directly, so the
//! shaping of each card can be tested without a frame.

use crate::model::{Project, ProjectId, ProjectStatus};

/// The single contextual action a card offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardAction {
    MarkComplete,
    Reactivate,
}

impl CardAction {
    pub fn for_status(status: ProjectStatus) -> Self {
        match status {
            ProjectStatus::Active => CardAction::MarkComplete,
            ProjectStatus::Completed => CardAction::Reactivate,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CardAction::MarkComplete => "Mark Complete",
            CardAction::Reactivate => "Reactivate",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProjectCard {
    pub id: ProjectId,
    pub name: String,
    pub description: String,
    pub kind_label: &'static str,
    pub deadline_label: String,
    pub status: ProjectStatus,
    pub progress: u8,
    /// Width of the progress bar as a fraction of the full track.
    pub bar_fraction: f32,
    pub action: CardAction,
}

impl ProjectCard {
    pub fn from_project(project: &Project) -> Self {
        Self {
            id: project.id.clone(),
            name: project.name.clone(),
            description: project.description.clone(),
            kind_label: project.kind.label(),
            deadline_label: project.deadline.format("%b %-d, %Y").to_string(),
            status: project.status,
            progress: project.progress,
            bar_fraction: f32::from(project.progress) / 100.0,
            action: CardAction::for_status(project.status),
        }
    }
}

/// One card per project, in the order given.
pub fn render<'a>(projects: impl IntoIterator<Item = &'a Project>) -> Vec<ProjectCard> {
    projects.into_iter().map(ProjectCard::from_project).collect()
}
