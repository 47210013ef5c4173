//! Ports to the remote content store and the upload transport.
//!
//! The reconciler is a pure consumer of these interfaces: it invokes fixed
//! operation shapes and never defines the backing protocol. Implementations
//! can target the GraphQL backend or be mocked for tests.

use async_trait::async_trait;

use crate::error::StoreError;
use crate::types::{PendingFile, ProjectSnapshot, Unit, UnitDraft, UploadOutcome};
use crate::types::{FileUpdate, NewFile, StoredFile};

/// Patch applied to one unit via `update_unit(where_id, patch)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnitPatch {
    /// Create the listed files inside the unit.
    AddFiles(Vec<NewFile>),
    /// Connect an existing (detached) file to the unit.
    ConnectFile(String),
    /// Disconnect a file from the unit without deleting it.
    DisconnectFile(String),
}

/// Patch applied to the project via `update_project(where_id, patch)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectPatch {
    /// Create a new unit seeded with files, tags, and a thumbnail.
    CreateUnit(UnitDraft),
}

/// The remote content-store interface.
///
/// All operations are async; every mutation returns the updated entity so
/// the caller can refresh its local snapshot without a refetch.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Fetch the authoritative project state.
    async fn fetch_project(&self, project_id: &str) -> Result<ProjectSnapshot, StoreError>;

    /// Apply a patch to one unit. Returns the updated unit.
    async fn update_unit(&self, unit_id: &str, patch: UnitPatch) -> Result<Unit, StoreError>;

    /// Apply a patch to the project. Returns the updated snapshot.
    async fn update_project(
        &self,
        project_id: &str,
        patch: ProjectPatch,
    ) -> Result<ProjectSnapshot, StoreError>;

    /// Update metadata on a persisted file. Returns the updated file.
    async fn update_file(
        &self,
        file_id: &str,
        update: FileUpdate,
    ) -> Result<StoredFile, StoreError>;

    /// Delete one persisted file.
    async fn delete_file(&self, file_id: &str) -> Result<(), StoreError>;

    /// Delete every unit whose id is listed. Returns the deleted count.
    async fn delete_units(&self, unit_ids: &[String]) -> Result<u64, StoreError>;
}

/// The file-upload transport interface.
///
/// Accepts a destination directory and a batch of raw files; returns one
/// outcome per input file, labeled by file name. Outcome order carries no
/// meaning; callers pair outcomes to inputs by name. Upload mechanics
/// (multipart, signing, retry) live behind this port.
#[async_trait]
pub trait UploadTransport: Send + Sync {
    async fn upload(&self, dir: &str, files: &[PendingFile]) -> Vec<UploadOutcome>;
}
