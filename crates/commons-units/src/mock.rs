//! Recording mocks for the content store and upload transport.
//!
//! The mock store keeps an in-memory project snapshot, records every call,
//! and can be configured to fail specific operations. Tests assert on the
//! recorded call sequence and counts.

use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::error::StoreError;
use crate::store::{ContentStore, ProjectPatch, UnitPatch, UploadTransport};
use crate::types::{
    FileUpdate, NewFile, PendingFile, ProjectSnapshot, StoredFile, Unit, UploadOutcome,
};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

/// A recorded call to the mock store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCall {
    FetchProject(String),
    UpdateUnit(String, UnitPatch),
    UpdateProject(String, ProjectPatch),
    UpdateFile(String, FileUpdate),
    DeleteFile(String),
    DeleteUnits(Vec<String>),
}

/// In-memory mock implementation of [`ContentStore`].
pub struct MockContentStore {
    project: Mutex<ProjectSnapshot>,
    /// Files disconnected from a unit but not yet reconnected.
    detached: Mutex<Vec<StoredFile>>,
    calls: Mutex<Vec<StoreCall>>,
    update_unit_error: Mutex<Option<StoreError>>,
    update_project_error: Mutex<Option<StoreError>>,
    delete_file_error: Mutex<Option<StoreError>>,
    delete_units_error: Mutex<Option<StoreError>>,
    fetch_error: Mutex<Option<StoreError>>,
}

impl MockContentStore {
    pub fn new(project: ProjectSnapshot) -> Self {
        Self {
            project: Mutex::new(project),
            detached: Mutex::new(Vec::new()),
            calls: Mutex::new(Vec::new()),
            update_unit_error: Mutex::new(None),
            update_project_error: Mutex::new(None),
            delete_file_error: Mutex::new(None),
            delete_units_error: Mutex::new(None),
            fetch_error: Mutex::new(None),
        }
    }

    /// Configure the next `update_unit` call to fail.
    pub fn with_update_unit_error(self, err: StoreError) -> Self {
        *lock(&self.update_unit_error) = Some(err);
        self
    }

    /// Configure the next `update_project` call to fail.
    pub fn with_update_project_error(self, err: StoreError) -> Self {
        *lock(&self.update_project_error) = Some(err);
        self
    }

    /// Configure the next `delete_file` call to fail.
    pub fn with_delete_file_error(self, err: StoreError) -> Self {
        *lock(&self.delete_file_error) = Some(err);
        self
    }

    /// Configure the next `delete_units` call to fail.
    pub fn with_delete_units_error(self, err: StoreError) -> Self {
        *lock(&self.delete_units_error) = Some(err);
        self
    }

    /// Configure the next `fetch_project` call to fail.
    pub fn with_fetch_error(self, err: StoreError) -> Self {
        *lock(&self.fetch_error) = Some(err);
        self
    }

    /// Current remote-side snapshot.
    pub fn snapshot(&self) -> ProjectSnapshot {
        lock(&self.project).clone()
    }

    /// Files currently disconnected from any unit.
    pub fn detached_files(&self) -> Vec<StoredFile> {
        lock(&self.detached).clone()
    }

    /// All recorded calls, in order.
    pub fn calls(&self) -> Vec<StoreCall> {
        lock(&self.calls).clone()
    }

    pub fn call_count(&self) -> usize {
        lock(&self.calls).len()
    }

    fn record(&self, call: StoreCall) {
        lock(&self.calls).push(call);
    }

    fn take_error(slot: &Mutex<Option<StoreError>>) -> Option<StoreError> {
        lock(slot).take()
    }

    fn stored_file_from(new_file: &NewFile) -> StoredFile {
        StoredFile {
            id: Uuid::new_v4().to_string(),
            language: new_file.language.clone(),
            name: new_file.name.clone(),
            path: new_file.path.clone(),
            quality: new_file.quality.clone(),
            created_at: Utc::now(),
        }
    }
}

#[async_trait]
impl ContentStore for MockContentStore {
    async fn fetch_project(&self, project_id: &str) -> Result<ProjectSnapshot, StoreError> {
        self.record(StoreCall::FetchProject(project_id.to_string()));

        if let Some(err) = Self::take_error(&self.fetch_error) {
            return Err(err);
        }

        let project = lock(&self.project);
        if project.id != project_id {
            return Err(StoreError::NotFound {
                entity: "project",
                id: project_id.to_string(),
            });
        }
        Ok(project.clone())
    }

    async fn update_unit(&self, unit_id: &str, patch: UnitPatch) -> Result<Unit, StoreError> {
        self.record(StoreCall::UpdateUnit(unit_id.to_string(), patch.clone()));

        if let Some(err) = Self::take_error(&self.update_unit_error) {
            return Err(err);
        }

        let mut project = lock(&self.project);
        let unit = project
            .units
            .iter_mut()
            .find(|u| u.id == unit_id)
            .ok_or(StoreError::NotFound {
                entity: "unit",
                id: unit_id.to_string(),
            })?;

        match patch {
            UnitPatch::AddFiles(new_files) => {
                for nf in &new_files {
                    unit.files.push(Self::stored_file_from(nf));
                }
            }
            UnitPatch::ConnectFile(file_id) => {
                let mut detached = lock(&self.detached);
                let idx = detached.iter().position(|f| f.id == file_id).ok_or(
                    StoreError::NotFound {
                        entity: "file",
                        id: file_id.clone(),
                    },
                )?;
                unit.files.push(detached.remove(idx));
            }
            UnitPatch::DisconnectFile(file_id) => {
                let idx =
                    unit.files
                        .iter()
                        .position(|f| f.id == file_id)
                        .ok_or(StoreError::NotFound {
                            entity: "file",
                            id: file_id.clone(),
                        })?;
                lock(&self.detached).push(unit.files.remove(idx));
            }
        }

        Ok(unit.clone())
    }

    async fn update_project(
        &self,
        project_id: &str,
        patch: ProjectPatch,
    ) -> Result<ProjectSnapshot, StoreError> {
        self.record(StoreCall::UpdateProject(
            project_id.to_string(),
            patch.clone(),
        ));

        if let Some(err) = Self::take_error(&self.update_project_error) {
            return Err(err);
        }

        let mut project = lock(&self.project);
        if project.id != project_id {
            return Err(StoreError::NotFound {
                entity: "project",
                id: project_id.to_string(),
            });
        }

        match patch {
            ProjectPatch::CreateUnit(draft) => {
                // Unique-constraint protection: one unit per language.
                if project.units.iter().any(|u| u.language == draft.language) {
                    return Err(StoreError::Conflict {
                        message: format!("unit for language {:?} already exists", draft.language),
                    });
                }
                let unit = Unit {
                    id: Uuid::new_v4().to_string(),
                    language: draft.language.clone(),
                    files: draft.files.iter().map(Self::stored_file_from).collect(),
                    tag_ids: draft.tag_ids.clone(),
                    thumbnail: draft.thumbnail.clone(),
                };
                project.units.push(unit);
            }
        }

        Ok(project.clone())
    }

    async fn update_file(
        &self,
        file_id: &str,
        update: FileUpdate,
    ) -> Result<StoredFile, StoreError> {
        self.record(StoreCall::UpdateFile(file_id.to_string(), update.clone()));

        let mut project = lock(&self.project);
        let file = project
            .units
            .iter_mut()
            .flat_map(|u| u.files.iter_mut())
            .find(|f| f.id == file_id)
            .ok_or(StoreError::NotFound {
                entity: "file",
                id: file_id.to_string(),
            })?;

        file.language = update.language;
        if update.quality.is_some() {
            file.quality = update.quality;
        }
        Ok(file.clone())
    }

    async fn delete_file(&self, file_id: &str) -> Result<(), StoreError> {
        self.record(StoreCall::DeleteFile(file_id.to_string()));

        if let Some(err) = Self::take_error(&self.delete_file_error) {
            return Err(err);
        }

        let mut project = lock(&self.project);
        for unit in &mut project.units {
            if let Some(idx) = unit.files.iter().position(|f| f.id == file_id) {
                unit.files.remove(idx);
                return Ok(());
            }
        }

        let mut detached = lock(&self.detached);
        if let Some(idx) = detached.iter().position(|f| f.id == file_id) {
            detached.remove(idx);
            return Ok(());
        }

        Err(StoreError::NotFound {
            entity: "file",
            id: file_id.to_string(),
        })
    }

    async fn delete_units(&self, unit_ids: &[String]) -> Result<u64, StoreError> {
        self.record(StoreCall::DeleteUnits(unit_ids.to_vec()));

        if let Some(err) = Self::take_error(&self.delete_units_error) {
            return Err(err);
        }

        let mut project = lock(&self.project);
        let before = project.units.len();
        project.units.retain(|u| !unit_ids.contains(&u.id));
        Ok((before - project.units.len()) as u64)
    }
}

/// Recording mock for [`UploadTransport`]. Successful uploads resolve to
/// `<dir>/<name>`; names listed via [`Self::with_failure`] fail.
#[derive(Default)]
pub struct MockUploadTransport {
    uploads: Mutex<Vec<(String, Vec<String>)>>,
    failures: Mutex<HashSet<String>>,
}

impl MockUploadTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make uploads of `name` fail.
    pub fn with_failure(self, name: impl Into<String>) -> Self {
        lock(&self.failures).insert(name.into());
        self
    }

    /// Recorded `(dir, file names)` batches.
    pub fn uploads(&self) -> Vec<(String, Vec<String>)> {
        lock(&self.uploads).clone()
    }

    pub fn call_count(&self) -> usize {
        lock(&self.uploads).len()
    }
}

#[async_trait]
impl UploadTransport for MockUploadTransport {
    async fn upload(&self, dir: &str, files: &[PendingFile]) -> Vec<UploadOutcome> {
        lock(&self.uploads).push((
            dir.to_string(),
            files.iter().map(|f| f.name.clone()).collect(),
        ));

        let failures = lock(&self.failures);
        files
            .iter()
            .map(|f| UploadOutcome {
                name: f.name.clone(),
                result: if failures.contains(&f.name) {
                    Err(format!("upload failed for {:?}", f.name))
                } else {
                    Ok(format!("{dir}/{}", f.name))
                },
            })
            .collect()
    }
}

/// Test fixture: a persisted file with sensible defaults.
pub fn stored_file(id: &str, language: &str, name: &str) -> StoredFile {
    StoredFile {
        id: id.to_string(),
        language: language.to_string(),
        name: name.to_string(),
        path: format!("projects/p1/{name}"),
        quality: None,
        created_at: Utc::now(),
    }
}
