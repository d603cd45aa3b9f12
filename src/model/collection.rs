use chrono::{DateTime, Utc};

use super::project::{Project, ProjectDraft, ProjectId, ProjectStatus, PROGRESS_MAX};
use crate::error::ProgressError;

/// Which statuses the list view shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Only(ProjectStatus),
}

impl StatusFilter {
    pub const ALL: [StatusFilter; 3] = [
        StatusFilter::All,
        StatusFilter::Only(ProjectStatus::Active),
        StatusFilter::Only(ProjectStatus::Completed),
    ];

    pub fn label(self) -> &'static str {
        match self {
            StatusFilter::All => "All",
            StatusFilter::Only(status) => status.label(),
        }
    }

    pub fn matches(self, status: ProjectStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(wanted) => wanted == status,
        }
    }
}

/// Ordered list of projects in insertion order. Ids are unique.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectCollection {
    projects: Vec<Project>,
}

impl ProjectCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adopt a loaded sequence. Later duplicates of an id are dropped, and
    /// progress is brought back within 0..=100 (100 for completed projects).
    pub fn from_projects(projects: Vec<Project>) -> Self {
        let mut collection = Self::new();
        for mut project in projects {
            if project.progress > PROGRESS_MAX {
                tracing::warn!(id = %project.id, progress = project.progress, "clamping stored progress");
                project.progress = PROGRESS_MAX;
            }
            if project.status == ProjectStatus::Completed && project.progress != PROGRESS_MAX {
                tracing::warn!(id = %project.id, progress = project.progress, "completed project below full progress");
                project.progress = PROGRESS_MAX;
            }
            if collection.get(&project.id).is_none() {
                collection.projects.push(project);
            } else {
                tracing::warn!(id = %project.id, "dropping project with duplicate id");
            }
        }
        collection
    }

    pub fn as_slice(&self) -> &[Project] {
        &self.projects
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    pub fn get(&self, id: &ProjectId) -> Option<&Project> {
        self.projects.iter().find(|p| &p.id == id)
    }

    fn get_mut(&mut self, id: &ProjectId) -> Option<&mut Project> {
        self.projects.iter_mut().find(|p| &p.id == id)
    }

    /// Append a new active project and return its id.
    pub fn create(&mut self, draft: ProjectDraft, now: DateTime<Utc>) -> ProjectId {
        let mut id = ProjectId::generate();
        while self.get(&id).is_some() {
            id = ProjectId::generate();
        }
        self.projects.push(Project::new(id.clone(), draft, now));
        id
    }

    /// Merge form data into an existing project. Returns false for unknown ids.
    pub fn update(&mut self, id: &ProjectId, draft: ProjectDraft) -> bool {
        match self.get_mut(id) {
            Some(project) => {
                project.apply(draft);
                true
            }
            None => false,
        }
    }

    /// Set progress from raw user input.
    ///
    /// The input is validated before the id is looked up, so a bad entry is
    /// reported even for a stale id. Fractions are truncated.
    pub fn set_progress(&mut self, id: &ProjectId, input: &str) -> Result<bool, ProgressError> {
        let value = parse_progress(input)?;
        Ok(self.set_progress_value(id, value))
    }

    /// Set an already-validated progress value. Returns false for unknown ids.
    pub fn set_progress_value(&mut self, id: &ProjectId, value: u8) -> bool {
        match self.get_mut(id) {
            Some(project) => {
                project.progress = value.min(PROGRESS_MAX);
                true
            }
            None => false,
        }
    }

    /// Flip active/completed. Completing forces progress to 100; reactivating keeps it.
    pub fn toggle_status(&mut self, id: &ProjectId) -> bool {
        match self.get_mut(id) {
            Some(project) => {
                project.status = project.status.toggled();
                if project.status == ProjectStatus::Completed {
                    project.progress = PROGRESS_MAX;
                }
                true
            }
            None => false,
        }
    }

    /// Projects matching the status filter whose name or description contains
    /// `search`, case-insensitively.
    pub fn filter<'a>(
        &'a self,
        status: StatusFilter,
        search: &str,
    ) -> impl Iterator<Item = &'a Project> + 'a {
        let needle = search.to_lowercase();
        self.projects.iter().filter(move |p| {
            status.matches(p.status)
                && (p.name.to_lowercase().contains(&needle)
                    || p.description.to_lowercase().contains(&needle))
        })
    }
}

/// Parse a progress percentage typed by the user.
pub fn parse_progress(input: &str) -> Result<u8, ProgressError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ProgressError::Empty);
    }
    let value: f64 = trimmed
        .parse()
        .map_err(|_| ProgressError::NotNumeric(trimmed.to_string()))?;
    if !value.is_finite() {
        return Err(ProgressError::NotNumeric(trimmed.to_string()));
    }
    if !(0.0..=f64::from(PROGRESS_MAX)).contains(&value) {
        return Err(ProgressError::OutOfRange(value));
    }
    Ok(value.trunc() as u8)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::project::ProjectKind;
    use chrono::NaiveDate;

    fn now() -> DateTime<Utc> {
        "2025-04-01T12:00:00Z".parse().unwrap()
    }

    fn draft(name: &str, description: &str) -> ProjectDraft {
        ProjectDraft {
            name: name.into(),
            description: description.into(),
            deadline: NaiveDate::from_ymd_opt(2025, 5, 1).unwrap(),
            kind: ProjectKind::Development,
        }
    }

    #[test]
    fn create_starts_active_at_zero_with_unique_ids() {
        let mut projects = ProjectCollection::new();
        let ids: Vec<_> = (0..20)
            .map(|i| projects.create(draft(&format!("P{i}"), ""), now()))
            .collect();

        for id in &ids {
            let p = projects.get(id).unwrap();
            assert_eq!(p.status, ProjectStatus::Active);
            assert_eq!(p.progress, 0);
            assert_eq!(p.created_at, now());
        }
        let mut unique = ids.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), ids.len());
    }

    #[test]
    fn update_keeps_identity_status_and_progress() {
        let mut projects = ProjectCollection::new();
        let id = projects.create(draft("Old", "old"), now());
        projects.set_progress_value(&id, 40);
        projects.toggle_status(&id);

        let mut edit = draft("New", "new");
        edit.kind = ProjectKind::Research;
        assert!(projects.update(&id, edit));

        let p = projects.get(&id).unwrap();
        assert_eq!(p.name, "New");
        assert_eq!(p.description, "new");
        assert_eq!(p.kind, ProjectKind::Research);
        assert_eq!(p.status, ProjectStatus::Completed);
        assert_eq!(p.progress, 100);
        assert_eq!(p.created_at, now());
    }

    #[test]
    fn update_unknown_id_is_a_no_op() {
        let mut projects = ProjectCollection::new();
        projects.create(draft("A", ""), now());
        let before = projects.clone();
        assert!(!projects.update(&ProjectId::from("missing"), draft("B", "")));
        assert_eq!(projects, before);
    }

    #[test]
    fn progress_bounds() {
        let mut projects = ProjectCollection::new();
        let id = projects.create(draft("A", ""), now());

        assert_eq!(projects.set_progress(&id, "0"), Ok(true));
        assert_eq!(projects.get(&id).unwrap().progress, 0);
        assert_eq!(projects.set_progress(&id, "100"), Ok(true));
        assert_eq!(projects.get(&id).unwrap().progress, 100);

        assert_eq!(
            projects.set_progress(&id, "-1"),
            Err(ProgressError::OutOfRange(-1.0))
        );
        assert_eq!(
            projects.set_progress(&id, "101"),
            Err(ProgressError::OutOfRange(101.0))
        );
        assert_eq!(projects.get(&id).unwrap().progress, 100);
    }

    #[test]
    fn progress_rejects_garbage_and_truncates_fractions() {
        let mut projects = ProjectCollection::new();
        let id = projects.create(draft("A", ""), now());

        assert_eq!(projects.set_progress(&id, "  "), Err(ProgressError::Empty));
        assert_eq!(
            projects.set_progress(&id, "half"),
            Err(ProgressError::NotNumeric("half".into()))
        );
        assert!(matches!(
            projects.set_progress(&id, "NaN"),
            Err(ProgressError::NotNumeric(_))
        ));
        assert_eq!(projects.get(&id).unwrap().progress, 0);

        assert_eq!(projects.set_progress(&id, " 50.7 "), Ok(true));
        assert_eq!(projects.get(&id).unwrap().progress, 50);
    }

    #[test]
    fn progress_on_stale_id_reports_not_found() {
        let mut projects = ProjectCollection::new();
        assert_eq!(projects.set_progress(&ProjectId::from("gone"), "10"), Ok(false));
    }

    #[test]
    fn completing_forces_full_progress_and_reactivating_keeps_it() {
        let mut projects = ProjectCollection::new();
        let id = projects.create(draft("A", ""), now());
        projects.set_progress_value(&id, 40);

        assert!(projects.toggle_status(&id));
        let p = projects.get(&id).unwrap();
        assert_eq!(p.status, ProjectStatus::Completed);
        assert_eq!(p.progress, 100);

        assert!(projects.toggle_status(&id));
        let p = projects.get(&id).unwrap();
        assert_eq!(p.status, ProjectStatus::Active);
        assert_eq!(p.progress, 100);
    }

    #[test]
    fn filter_by_status_keeps_insertion_order() {
        let mut projects = ProjectCollection::new();
        let a = projects.create(draft("A", ""), now());
        let b = projects.create(draft("B", ""), now());
        let c = projects.create(draft("C", ""), now());
        let d = projects.create(draft("D", ""), now());
        projects.toggle_status(&d);
        projects.toggle_status(&b);

        let completed: Vec<_> = projects
            .filter(StatusFilter::Only(ProjectStatus::Completed), "")
            .map(|p| p.id.clone())
            .collect();
        assert_eq!(completed, vec![b, d]);

        let active: Vec<_> = projects
            .filter(StatusFilter::Only(ProjectStatus::Active), "")
            .map(|p| p.id.clone())
            .collect();
        assert_eq!(active, vec![a, c]);
        assert_eq!(projects.filter(StatusFilter::All, "").count(), 4);
    }

    #[test]
    fn search_matches_name_or_description_case_insensitively() {
        let mut projects = ProjectCollection::new();
        projects.create(draft("Website Redesign", "new landing page"), now());
        projects.create(draft("Billing", "Stripe MIGRATION"), now());
        projects.create(draft("Docs", ""), now());

        let names = |search: &str| -> Vec<String> {
            projects
                .filter(StatusFilter::All, search)
                .map(|p| p.name.clone())
                .collect()
        };
        assert_eq!(names("WEBSITE"), vec!["Website Redesign"]);
        assert_eq!(names("migration"), vec!["Billing"]);
        assert_eq!(names("a"), vec!["Website Redesign", "Billing"]);
        assert!(names("zzz").is_empty());
    }

    #[test]
    fn loading_drops_duplicate_ids() {
        let mut projects = ProjectCollection::new();
        let id = projects.create(draft("A", ""), now());
        let mut list = projects.as_slice().to_vec();
        let mut dup = list[0].clone();
        dup.name = "Copy".into();
        list.push(dup);

        let loaded = ProjectCollection::from_projects(list);
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded.get(&id).unwrap().name, "A");
    }

    #[test]
    fn loading_normalizes_progress() {
        let mut projects = ProjectCollection::new();
        let done = projects.create(draft("Done", ""), now());
        let over = projects.create(draft("Over", ""), now());
        let mut list = projects.as_slice().to_vec();
        list[0].status = ProjectStatus::Completed;
        list[0].progress = 40;
        list[1].progress = 250;

        let loaded = ProjectCollection::from_projects(list);
        assert_eq!(loaded.get(&done).unwrap().progress, 100);
        assert_eq!(loaded.get(&over).unwrap().progress, 100);
        assert_eq!(loaded.get(&over).unwrap().status, ProjectStatus::Active);
    }
}
