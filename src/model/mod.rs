pub mod collection;
pub mod project;
pub mod stats;

pub use collection::{ProjectCollection, StatusFilter};
pub use project::{Project, ProjectDraft, ProjectId, ProjectKind, ProjectStatus};
pub use stats::{DashboardStats, ProgressDistribution};
