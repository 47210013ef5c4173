//! The unit reconciler.
//!
//! Given a project's existing language units and a batch of pending file
//! operations, computes and issues the minimal set of remote operations:
//! adding files to existing units, creating units for new languages,
//! moving files between units when their language changes, and deleting
//! units that end up empty. The reconciler keeps its local snapshot in
//! step with every mutation result so later decisions see earlier effects.

use std::collections::{BTreeMap, HashSet};

use commons_core::project::ProjectType;

use crate::error::StoreError;
use crate::store::{ContentStore, ProjectPatch, UnitPatch, UploadTransport};
use crate::types::{FileUpdate, NewFile, PendingFile, ProjectSnapshot, Unit, UnitDraft};

/// Result of reconciling one file's unit membership.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReassignOutcome {
    /// Language unchanged; nothing to do.
    Unchanged,
    /// The file no longer belongs to any unit — stale update, skipped.
    SkippedNoUnit,
    /// Disconnected from one unit and connected to another.
    Moved { from_unit: String, to_unit: String },
}

pub struct Reconciler<'a> {
    store: &'a dyn ContentStore,
    transport: &'a dyn UploadTransport,
    project_type: ProjectType,
    project: ProjectSnapshot,
}

enum PlannedOp {
    AddToUnit { unit_id: String },
    CreateUnit { draft: UnitDraft },
}

enum Applied {
    Unit(Unit),
    Created(ProjectSnapshot),
}

impl<'a> Reconciler<'a> {
    pub fn new(
        store: &'a dyn ContentStore,
        transport: &'a dyn UploadTransport,
        project_type: ProjectType,
        project: ProjectSnapshot,
    ) -> Self {
        Self {
            store,
            transport,
            project_type,
            project,
        }
    }

    pub fn project(&self) -> &ProjectSnapshot {
        &self.project
    }

    pub fn project_type(&self) -> ProjectType {
        self.project_type
    }

    pub(crate) fn transport(&self) -> &dyn UploadTransport {
        self.transport
    }

    /// Split pending files into those with an accepted extension for the
    /// project type and those rejected. Rejected files never reach the
    /// transport or the store.
    pub fn partition_allowed(
        &self,
        pending: Vec<PendingFile>,
    ) -> (Vec<PendingFile>, Vec<PendingFile>) {
        pending
            .into_iter()
            .partition(|f| self.project_type.allows(&f.name))
    }

    /// Destination directory for uploads: derived from the first stored
    /// file location found across units, falling back to the project id
    /// for a brand-new project. The only place physical storage layout is
    /// inspected.
    pub fn upload_dir(&self) -> String {
        self.project
            .all_files()
            .find_map(|f| f.path.rsplit_once('/').map(|(dir, _)| dir.to_string()))
            .unwrap_or_else(|| self.project.id.clone())
    }

    /// Create uploaded files in the remote store, grouped by language.
    ///
    /// Each language group becomes exactly one operation: an add to the
    /// existing unit of that language, or a unit creation seeded with the
    /// group. Groups run concurrently; completion is the join of all of
    /// them. Returns one result per language group.
    pub async fn create_files(
        &mut self,
        files: &[NewFile],
    ) -> Vec<(String, Result<(), StoreError>)> {
        let groups = partition_by_language(files);
        if groups.is_empty() {
            return Vec::new();
        }

        let store = self.store;
        let project_id = self.project.id.clone();

        let planned: Vec<(String, PlannedOp, Vec<NewFile>)> = groups
            .into_iter()
            .map(|(language, group)| {
                let op = match self.project.unit_for_language(&language) {
                    Some(unit) => PlannedOp::AddToUnit {
                        unit_id: unit.id.clone(),
                    },
                    None => PlannedOp::CreateUnit {
                        draft: self.unit_draft(&language, group.clone()),
                    },
                };
                (language, op, group)
            })
            .collect();

        let ops = planned.into_iter().map(|(language, op, group)| {
            let project_id = project_id.clone();
            async move {
                let applied = match op {
                    PlannedOp::AddToUnit { unit_id } => store
                        .update_unit(&unit_id, UnitPatch::AddFiles(group))
                        .await
                        .map(Applied::Unit),
                    PlannedOp::CreateUnit { draft } => store
                        .update_project(&project_id, ProjectPatch::CreateUnit(draft))
                        .await
                        .map(Applied::Created),
                };
                (language, applied)
            }
        });

        let completed = futures::future::join_all(ops).await;

        let mut results = Vec::with_capacity(completed.len());
        for (language, applied) in completed {
            let result = match applied {
                Ok(Applied::Unit(unit)) => {
                    self.absorb_unit(unit);
                    Ok(())
                }
                Ok(Applied::Created(snapshot)) => {
                    self.absorb_created_unit(&snapshot, &language);
                    Ok(())
                }
                Err(err) => Err(err),
            };
            results.push((language, result));
        }
        results
    }

    /// Reconcile one updated file's unit membership.
    ///
    /// No-op when the language is unchanged. Otherwise a two-phase move:
    /// disconnect from the current unit, then connect to an existing unit
    /// of the new language or create one first. The phases are ordered;
    /// a failure between them leaves the file detached and is surfaced to
    /// the caller for attribution. Callers serialize invocations so two
    /// moves into the same new language reuse one created unit.
    pub async fn reassign_file(
        &mut self,
        update: &FileUpdate,
    ) -> Result<ReassignOutcome, StoreError> {
        let Some(owning) = self.project.owning_unit(&update.id) else {
            return Ok(ReassignOutcome::SkippedNoUnit);
        };
        if owning.language == update.language {
            return Ok(ReassignOutcome::Unchanged);
        }
        let from_unit = owning.id.clone();

        let unit = self
            .store
            .update_unit(&from_unit, UnitPatch::DisconnectFile(update.id.clone()))
            .await?;
        self.absorb_unit(unit);

        let to_unit = match self.project.unit_for_language(&update.language) {
            Some(unit) => unit.id.clone(),
            None => {
                let draft = self.unit_draft(&update.language, Vec::new());
                let snapshot = self
                    .store
                    .update_project(&self.project.id, ProjectPatch::CreateUnit(draft))
                    .await?;
                self.absorb_created_unit(&snapshot, &update.language)
                    .ok_or(StoreError::Internal {
                        message: format!(
                            "created unit for language {:?} missing from project",
                            update.language
                        ),
                    })?
            }
        };

        let unit = self
            .store
            .update_unit(&to_unit, UnitPatch::ConnectFile(update.id.clone()))
            .await?;
        self.absorb_unit(unit);

        Ok(ReassignOutcome::Moved { from_unit, to_unit })
    }

    /// Ids of units left without any file in the intended post-operation
    /// file set. A unit survives only if some intended file still carries
    /// its language.
    pub fn units_to_remove<I, S>(&self, surviving_languages: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let surviving: HashSet<String> = surviving_languages
            .into_iter()
            .map(|s| s.as_ref().to_string())
            .collect();
        self.project
            .units
            .iter()
            .filter(|u| !surviving.contains(&u.language))
            .map(|u| u.id.clone())
            .collect()
    }

    /// Delete one persisted file remotely and drop it from the snapshot.
    pub async fn delete_file(&mut self, file_id: &str) -> Result<(), StoreError> {
        self.store.delete_file(file_id).await?;
        for unit in &mut self.project.units {
            unit.files.retain(|f| f.id != file_id);
        }
        Ok(())
    }

    /// Delete the listed units remotely and drop them from the snapshot.
    pub async fn delete_units(&mut self, unit_ids: &[String]) -> Result<u64, StoreError> {
        let deleted = self.store.delete_units(unit_ids).await?;
        self.project.units.retain(|u| !unit_ids.contains(&u.id));
        Ok(deleted)
    }

    /// Update metadata on a persisted file and absorb the result.
    pub async fn update_file(&mut self, update: &FileUpdate) -> Result<(), StoreError> {
        let stored = self.store.update_file(&update.id, update.clone()).await?;
        for unit in &mut self.project.units {
            if let Some(slot) = unit.files.iter_mut().find(|f| f.id == stored.id) {
                *slot = stored;
                break;
            }
        }
        Ok(())
    }

    /// Replace the snapshot with the authoritative remote state.
    pub async fn refetch(&mut self) -> Result<(), StoreError> {
        self.project = self.store.fetch_project(&self.project.id).await?;
        Ok(())
    }

    fn unit_draft(&self, language: &str, files: Vec<NewFile>) -> UnitDraft {
        UnitDraft {
            title: self.project.title.clone(),
            language: language.to_string(),
            tag_ids: self.project.tag_ids.clone(),
            files,
            thumbnail: self.project.language_thumbnail(language).cloned(),
        }
    }

    /// Replace (or insert) a unit returned by a mutation.
    fn absorb_unit(&mut self, unit: Unit) {
        match self.project.units.iter_mut().find(|u| u.id == unit.id) {
            Some(slot) => *slot = unit,
            None => self.project.units.push(unit),
        }
    }

    /// Pull a just-created unit for `language` out of a returned snapshot
    /// into the local one. Returns its id.
    fn absorb_created_unit(&mut self, snapshot: &ProjectSnapshot, language: &str) -> Option<String> {
        let created = snapshot.unit_for_language(language)?.clone();
        let id = created.id.clone();
        self.absorb_unit(created);
        Some(id)
    }
}

/// Group files by language, deterministically ordered by language tag.
fn partition_by_language(files: &[NewFile]) -> BTreeMap<String, Vec<NewFile>> {
    let mut groups: BTreeMap<String, Vec<NewFile>> = BTreeMap::new();
    for file in files {
        groups
            .entry(file.language.clone())
            .or_default()
            .push(file.clone());
    }
    groups
}
