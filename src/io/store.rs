use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::StoreError;
use crate::model::Project;

/// Key under which the project list is stored unless configured otherwise.
pub const DEFAULT_KEY: &str = "projects";

/// A durable string-to-string store.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Replace the value under `key` in one step.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// One `<key>.json` file per key inside a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.path_for(key);
        match std::fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StoreError::Io { path, source }),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        std::fs::create_dir_all(&self.dir).map_err(|source| StoreError::Io {
            path: self.dir.clone(),
            source,
        })?;

        // Write beside the target, then rename over it.
        let path = self.path_for(key);
        let tmp = self.dir.join(format!(".{key}.json.tmp"));
        std::fs::write(&tmp, value).map_err(|source| StoreError::Io {
            path: tmp.clone(),
            source,
        })?;
        std::fs::rename(&tmp, &path).map_err(|source| StoreError::Io { path, source })
    }
}

/// Volatile store with an optional size limit, mirroring a browser quota.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
    quota: Option<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Limit the total bytes of keys plus values.
    pub fn with_quota(limit: usize) -> Self {
        Self {
            values: HashMap::new(),
            quota: Some(limit),
        }
    }

    pub fn set_quota(&mut self, limit: Option<usize>) {
        self.quota = limit;
    }

    fn used_without(&self, key: &str) -> usize {
        self.values
            .iter()
            .filter(|(k, _)| k.as_str() != key)
            .map(|(k, v)| k.len() + v.len())
            .sum()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        if let Some(limit) = self.quota {
            let needed = self.used_without(key) + key.len() + value.len();
            if needed > limit {
                return Err(StoreError::QuotaExceeded { needed, limit });
            }
        }
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

enum Stored {
    Empty,
    Projects(Vec<Project>),
    Malformed(String),
}

/// Reads and writes the whole project list as one JSON value.
#[derive(Debug)]
pub struct ProjectStore<S> {
    backend: S,
    key: String,
}

impl<S: KeyValueStore> ProjectStore<S> {
    pub fn new(backend: S) -> Self {
        Self::with_key(backend, DEFAULT_KEY)
    }

    pub fn with_key(backend: S, key: impl Into<String>) -> Self {
        Self {
            backend,
            key: key.into(),
        }
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut S {
        &mut self.backend
    }

    /// Load the stored list. Missing, unreadable or malformed data yields an
    /// empty list.
    pub fn load(&self) -> Vec<Project> {
        match self.read() {
            Stored::Projects(projects) => projects,
            Stored::Empty | Stored::Malformed(_) => Vec::new(),
        }
    }

    /// Like [`load`](Self::load), but a malformed value is first copied to
    /// `<key>.bad` so the next save does not destroy it.
    pub fn open(&mut self) -> Vec<Project> {
        match self.read() {
            Stored::Projects(projects) => projects,
            Stored::Empty => Vec::new(),
            Stored::Malformed(raw) => {
                let backup = self.backup_key();
                match self.backend.set(&backup, &raw) {
                    Ok(()) => tracing::warn!(key = %backup, "moved malformed projects aside"),
                    Err(e) => {
                        tracing::warn!(key = %backup, error = %e, "could not back up malformed projects")
                    }
                }
                Vec::new()
            }
        }
    }

    pub fn backup_key(&self) -> String {
        format!("{}.bad", self.key)
    }

    fn read(&self) -> Stored {
        let raw = match self.backend.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                tracing::info!(key = %self.key, "no stored projects, starting empty");
                return Stored::Empty;
            }
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "could not read stored projects");
                return Stored::Empty;
            }
        };

        match serde_json::from_str::<Vec<Project>>(&raw) {
            Ok(projects) => {
                tracing::info!(count = projects.len(), "loaded projects");
                Stored::Projects(projects)
            }
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "stored projects are malformed, ignoring");
                Stored::Malformed(raw)
            }
        }
    }

    /// Overwrite the stored list with `projects`.
    pub fn save(&mut self, projects: &[Project]) -> Result<(), StoreError> {
        let json = serde_json::to_string(projects)?;
        self.backend.set(&self.key, &json)?;
        tracing::debug!(count = projects.len(), bytes = json.len(), "saved projects");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ProjectCollection, ProjectDraft, ProjectKind};
    use chrono::NaiveDate;

    fn sample() -> Vec<Project> {
        let mut projects = ProjectCollection::new();
        let now = "2025-02-01T08:00:00Z".parse().unwrap();
        let a = projects.create(
            ProjectDraft {
                name: "Alpha".into(),
                description: "first".into(),
                deadline: NaiveDate::from_ymd_opt(2025, 2, 14).unwrap(),
                kind: ProjectKind::Marketing,
            },
            now,
        );
        projects.create(
            ProjectDraft {
                name: "Beta".into(),
                description: String::new(),
                deadline: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
                kind: ProjectKind::Design,
            },
            now,
        );
        projects.set_progress_value(&a, 35);
        projects.as_slice().to_vec()
    }

    #[test]
    fn save_then_load_round_trips() {
        let mut store = ProjectStore::new(MemoryStore::new());
        let projects = sample();
        store.save(&projects).unwrap();
        assert_eq!(store.load(), projects);
    }

    #[test]
    fn absent_or_malformed_data_loads_empty() {
        let mut store = ProjectStore::new(MemoryStore::new());
        assert!(store.load().is_empty());

        store.backend_mut().set(DEFAULT_KEY, "{not json").unwrap();
        assert!(store.load().is_empty());

        store.backend_mut().set(DEFAULT_KEY, r#"[{"id": 3}]"#).unwrap();
        assert!(store.load().is_empty());
    }

    #[test]
    fn open_moves_malformed_data_aside() {
        let mut store = ProjectStore::new(MemoryStore::new());
        store.backend_mut().set(DEFAULT_KEY, "{not json").unwrap();

        assert!(store.open().is_empty());
        assert_eq!(
            store.backend().get("projects.bad").unwrap().as_deref(),
            Some("{not json")
        );
    }

    #[test]
    fn open_leaves_valid_data_alone() {
        let mut store = ProjectStore::new(MemoryStore::new());
        let projects = sample();
        store.save(&projects).unwrap();
        assert_eq!(store.open(), projects);
        assert!(store.backend().get("projects.bad").unwrap().is_none());
    }

    #[test]
    fn malformed_file_survives_next_save() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("projects.json"), "[{\"id\": 3}]").unwrap();

        let mut store = ProjectStore::new(FileStore::new(dir.path()));
        assert!(store.open().is_empty());
        store.save(&sample()).unwrap();

        let backup = std::fs::read_to_string(dir.path().join("projects.bad.json")).unwrap();
        assert_eq!(backup, "[{\"id\": 3}]");
        assert_eq!(store.load().len(), 2);
    }

    #[test]
    fn quota_failure_keeps_previous_value() {
        let mut store = ProjectStore::new(MemoryStore::with_quota(64));
        store.save(&[]).unwrap();

        let err = store.save(&sample()).unwrap_err();
        assert!(matches!(err, StoreError::QuotaExceeded { limit: 64, .. }));
        assert!(store.load().is_empty());
    }

    #[test]
    fn file_store_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let data_dir = dir.path().join("nested");
        let projects = sample();

        let mut store = ProjectStore::new(FileStore::new(&data_dir));
        store.save(&projects).unwrap();

        let reopened = ProjectStore::new(FileStore::new(&data_dir));
        assert_eq!(reopened.load(), projects);
        assert!(data_dir.join("projects.json").exists());
        assert!(!data_dir.join(".projects.json.tmp").exists());
    }

    #[test]
    fn file_store_missing_key_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        assert!(store.get("projects").unwrap().is_none());
    }

    #[test]
    fn custom_key_is_used() {
        let mut store = ProjectStore::with_key(MemoryStore::new(), "work");
        store.save(&sample()).unwrap();
        assert!(store.backend().get("work").unwrap().is_some());
        assert!(store.backend().get(DEFAULT_KEY).unwrap().is_none());
    }
}
