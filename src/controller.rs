use chrono::{DateTime, NaiveDate, Utc};

use crate::error::{DashboardError, FormError, StoreError};
use crate::io::store::{KeyValueStore, ProjectStore};
use crate::model::{
    DashboardStats, Project, ProjectCollection, ProjectDraft, ProjectId, ProjectKind,
    ProgressDistribution, StatusFilter,
};
use crate::ui::progress_chart::ChartSink;
use crate::view::{self, ProjectCard};

/// Which mode the add/edit dialog is in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FormState {
    #[default]
    Closed,
    OpenForCreate,
    OpenForEdit(ProjectId),
}

impl FormState {
    pub fn is_open(&self) -> bool {
        !matches!(self, FormState::Closed)
    }
}

/// Editable contents of the add/edit dialog.
#[derive(Debug, Clone, PartialEq)]
pub struct FormFields {
    pub name: String,
    pub description: String,
    pub deadline: NaiveDate,
    pub kind: ProjectKind,
}

impl FormFields {
    pub fn blank(today: NaiveDate) -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            deadline: today,
            kind: ProjectKind::default(),
        }
    }

    pub fn from_project(project: &Project) -> Self {
        Self {
            name: project.name.clone(),
            description: project.description.clone(),
            deadline: project.deadline,
            kind: project.kind,
        }
    }

    pub fn to_draft(&self) -> Result<ProjectDraft, FormError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(FormError::MissingName);
        }
        Ok(ProjectDraft {
            name: name.to_string(),
            description: self.description.trim().to_string(),
            deadline: self.deadline,
            kind: self.kind,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

/// Status line shown to the user after an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

/// Owns the project list and every view derived from it.
///
/// Each mutation persists the full list and then refreshes stats, cards,
/// distribution and chart, in that order.
pub struct Dashboard<S, C> {
    projects: ProjectCollection,
    store: ProjectStore<S>,
    chart: C,
    clock: fn() -> DateTime<Utc>,
    upcoming_window_days: i64,

    form: FormState,
    fields: FormFields,
    form_error: Option<FormError>,

    filter: StatusFilter,
    search: String,

    stats: DashboardStats,
    cards: Vec<ProjectCard>,
    distribution: ProgressDistribution,

    dirty: bool,
    notice: Option<Notice>,
}

impl<S: KeyValueStore, C: ChartSink> Dashboard<S, C> {
    /// Load the stored projects and draw the initial views.
    pub fn new(
        store: ProjectStore<S>,
        chart: C,
        clock: fn() -> DateTime<Utc>,
        upcoming_window_days: i64,
    ) -> Self {
        let mut store = store;
        let projects = ProjectCollection::from_projects(store.open());
        let today = clock().date_naive();
        let mut dashboard = Self {
            projects,
            store,
            chart,
            clock,
            upcoming_window_days,
            form: FormState::Closed,
            fields: FormFields::blank(today),
            form_error: None,
            filter: StatusFilter::All,
            search: String::new(),
            stats: DashboardStats::default(),
            cards: Vec::new(),
            distribution: ProgressDistribution::default(),
            dirty: false,
            notice: None,
        };
        dashboard.recompute_stats();
        dashboard.rerender();
        dashboard.redraw_chart();
        dashboard
    }

    // --- Read access ---

    pub fn projects(&self) -> &[Project] {
        self.projects.as_slice()
    }

    pub fn stats(&self) -> DashboardStats {
        self.stats
    }

    pub fn cards(&self) -> &[ProjectCard] {
        &self.cards
    }

    pub fn distribution(&self) -> ProgressDistribution {
        self.distribution
    }

    pub fn chart(&self) -> &C {
        &self.chart
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn fields(&self) -> &FormFields {
        &self.fields
    }

    pub fn fields_mut(&mut self) -> &mut FormFields {
        &mut self.fields
    }

    /// Why the last submit was rejected, while the dialog stays open.
    pub fn form_error(&self) -> Option<&FormError> {
        self.form_error.as_ref()
    }

    pub fn filter(&self) -> StatusFilter {
        self.filter
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    /// True while the in-memory list has changes the store does not.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn store(&self) -> &ProjectStore<S> {
        &self.store
    }

    /// Report the outcome of an action handled outside the dashboard.
    pub fn set_notice(&mut self, notice: Notice) {
        self.notice = Some(notice);
    }

    /// Drop the current notice. The unsaved-changes warning stays while dirty.
    pub fn clear_notice(&mut self) {
        if !self.dirty {
            self.notice = None;
        }
    }

    // --- Form state machine ---

    pub fn open_create(&mut self) {
        self.fields = FormFields::blank(self.today());
        self.form_error = None;
        self.form = FormState::OpenForCreate;
        self.clear_notice();
    }

    /// Open the dialog pre-filled from `id`. Unknown ids are ignored.
    pub fn open_edit(&mut self, id: &ProjectId) {
        if let Some(project) = self.projects.get(id) {
            self.fields = FormFields::from_project(project);
            self.form_error = None;
            self.form = FormState::OpenForEdit(id.clone());
            self.clear_notice();
        }
    }

    pub fn cancel_form(&mut self) {
        self.close_form();
        self.clear_notice();
    }

    /// Create or update from the dialog fields. A validation error keeps the
    /// dialog open.
    pub fn submit_form(&mut self) -> Result<(), DashboardError> {
        let mode = self.form.clone();
        if mode == FormState::Closed {
            return Ok(());
        }

        let draft = match self.fields.to_draft() {
            Ok(draft) => draft,
            Err(e) => {
                self.form_error = Some(e.clone());
                return Err(e.into());
            }
        };

        let (changed, message) = match mode {
            FormState::OpenForEdit(id) => (self.projects.update(&id, draft), "Project updated"),
            _ => {
                let now = (self.clock)();
                let id = self.projects.create(draft, now);
                tracing::debug!(%id, "created project");
                (true, "Project added")
            }
        };
        self.close_form();

        if changed {
            self.refresh_after_mutation()?;
            self.notice = Some(Notice::info(message));
        }
        Ok(())
    }

    fn close_form(&mut self) {
        self.form = FormState::Closed;
        self.form_error = None;
        self.fields = FormFields::blank(self.today());
    }

    // --- Per-project actions ---

    /// Apply a typed progress entry. Invalid input changes nothing.
    pub fn update_progress(&mut self, id: &ProjectId, input: &str) -> Result<(), DashboardError> {
        match self.projects.set_progress(id, input) {
            Ok(true) => {
                self.refresh_after_mutation()?;
                self.notice = Some(Notice::info("Progress updated"));
                Ok(())
            }
            Ok(false) => Ok(()),
            Err(e) => {
                tracing::debug!(%id, input, error = %e, "rejected progress input");
                self.notice = Some(Notice::error(e.to_string()));
                Err(e.into())
            }
        }
    }

    pub fn toggle_status(&mut self, id: &ProjectId) -> Result<(), DashboardError> {
        if !self.projects.toggle_status(id) {
            return Ok(());
        }
        self.refresh_after_mutation()?;
        let message = match self.projects.get(id) {
            Some(p) if p.is_active() => format!("Reactivated '{}'", p.name),
            Some(p) => format!("Completed '{}'", p.name),
            None => "Status updated".to_string(),
        };
        self.notice = Some(Notice::info(message));
        Ok(())
    }

    // --- List controls ---

    pub fn set_filter(&mut self, filter: StatusFilter) {
        if self.filter != filter {
            self.filter = filter;
            self.rerender();
            self.clear_notice();
        }
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        let search = search.into();
        if self.search != search {
            self.search = search;
            self.rerender();
            self.clear_notice();
        }
    }

    /// Try to write pending changes again after a failed save.
    pub fn retry_save(&mut self) -> Result<(), DashboardError> {
        if !self.dirty {
            return Ok(());
        }
        match self.persist() {
            Ok(()) => {
                self.notice = Some(Notice::info("All changes saved"));
                Ok(())
            }
            Err(e) => {
                let err = DashboardError::from(e);
                self.notice = Some(Notice::error(err.to_string()));
                Err(err)
            }
        }
    }

    // --- Cascade ---

    fn refresh_after_mutation(&mut self) -> Result<(), DashboardError> {
        let saved = self.persist();
        self.recompute_stats();
        self.rerender();
        self.redraw_chart();

        saved.map_err(|e| {
            let err = DashboardError::from(e);
            self.notice = Some(Notice::error(err.to_string()));
            err
        })
    }

    fn persist(&mut self) -> Result<(), StoreError> {
        match self.store.save(self.projects.as_slice()) {
            Ok(()) => {
                self.dirty = false;
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to save projects");
                self.dirty = true;
                Err(e)
            }
        }
    }

    fn recompute_stats(&mut self) {
        self.stats = DashboardStats::compute(
            self.projects.as_slice(),
            (self.clock)(),
            self.upcoming_window_days,
        );
    }

    fn rerender(&mut self) {
        self.cards = view::render(self.projects.filter(self.filter, &self.search));
    }

    fn redraw_chart(&mut self) {
        self.distribution = ProgressDistribution::compute(self.projects.as_slice());
        self.chart.redraw(self.distribution.buckets());
    }

    fn today(&self) -> NaiveDate {
        (self.clock)().date_naive()
    }
}
