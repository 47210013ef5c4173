//! The ordered save pipeline.
//!
//! One save batch runs through strictly sequential phases: validate
//! extensions, delete removed files, upload new files, create files/units,
//! update existing file metadata, reconcile unit membership, delete
//! now-empty units, refetch. Phases never roll back prior phases; instead
//! every phase's per-item outcome is captured in a [`SaveReport`] so
//! partial application is attributable rather than swallowed.

use crate::error::StoreError;
use crate::reconcile::{ReassignOutcome, Reconciler};
use crate::types::{NewFile, SaveRequest};

/// One phase of the save pipeline, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SavePhase {
    Validate,
    DeleteRemoved,
    Upload,
    CreateFiles,
    UpdateFiles,
    ReassignUnits,
    DeleteEmptyUnits,
    Refetch,
}

impl SavePhase {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Validate => "validate",
            Self::DeleteRemoved => "delete_removed",
            Self::Upload => "upload",
            Self::CreateFiles => "create_files",
            Self::UpdateFiles => "update_files",
            Self::ReassignUnits => "reassign_units",
            Self::DeleteEmptyUnits => "delete_empty_units",
            Self::Refetch => "refetch",
        }
    }
}

impl std::fmt::Display for SavePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-item outcomes for one phase. Items are labeled by file name, file
/// id, language, or unit id depending on the phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhaseReport {
    pub phase: SavePhase,
    pub succeeded: Vec<String>,
    pub failed: Vec<(String, StoreError)>,
}

impl PhaseReport {
    fn new(phase: SavePhase) -> Self {
        Self {
            phase,
            succeeded: Vec::new(),
            failed: Vec::new(),
        }
    }

    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }

    fn has_work(&self) -> bool {
        !self.succeeded.is_empty() || !self.failed.is_empty()
    }
}

/// Aggregated result of one save. Replaces thrown/logged exceptions with a
/// tagged per-phase report.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SaveReport {
    pub phases: Vec<PhaseReport>,
}

impl SaveReport {
    pub fn is_clean(&self) -> bool {
        self.phases.iter().all(PhaseReport::is_clean)
    }

    pub fn has_failures(&self) -> bool {
        !self.is_clean()
    }

    /// Some operations succeeded while others failed — the "some files
    /// saved, others failed" case the UI must distinguish from "nothing
    /// saved".
    pub fn partial(&self) -> bool {
        self.has_failures() && self.phases.iter().any(|p| !p.succeeded.is_empty())
    }

    pub fn phase(&self, phase: SavePhase) -> Option<&PhaseReport> {
        self.phases.iter().find(|p| p.phase == phase)
    }

    /// Every failure across phases, tagged with its phase.
    pub fn failures(&self) -> impl Iterator<Item = (SavePhase, &str, &StoreError)> {
        self.phases.iter().flat_map(|p| {
            p.failed
                .iter()
                .map(move |(item, err)| (p.phase, item.as_str(), err))
        })
    }

    fn push(&mut self, phase: PhaseReport) {
        if phase.has_work() {
            self.phases.push(phase);
        }
    }
}

impl Reconciler<'_> {
    /// Run one save batch through the pipeline.
    ///
    /// Files rejected by validation or failed upload are excluded from
    /// later phases. If validation leaves nothing to do, the pipeline
    /// returns before any remote call.
    pub async fn save(&mut self, request: SaveRequest) -> SaveReport {
        let mut report = SaveReport::default();

        // Validate: synchronous, before any remote or transport call.
        let mut validate = PhaseReport::new(SavePhase::Validate);
        let (allowed, rejected) = self.partition_allowed(request.pending);
        for file in &rejected {
            validate.failed.push((
                file.name.clone(),
                StoreError::InvalidArgument {
                    message: format!(
                        "file {:?} does not have an accepted extension for this project type",
                        file.name
                    ),
                },
            ));
        }
        for file in &allowed {
            validate.succeeded.push(file.name.clone());
        }
        report.push(validate);

        if allowed.is_empty() && request.updates.is_empty() && request.remove.is_empty() {
            return report;
        }

        // Delete removed files.
        let mut phase = PhaseReport::new(SavePhase::DeleteRemoved);
        for file_id in &request.remove {
            match self.delete_file(file_id).await {
                Ok(()) => phase.succeeded.push(file_id.clone()),
                Err(err) => phase.failed.push((file_id.clone(), err)),
            }
        }
        report.push(phase);

        // Upload new files to storage.
        let mut uploaded: Vec<NewFile> = Vec::new();
        let mut phase = PhaseReport::new(SavePhase::Upload);
        if !allowed.is_empty() {
            let dir = self.upload_dir();
            let outcomes = self.transport().upload(&dir, &allowed).await;
            for outcome in outcomes {
                // Outcomes pair to inputs by file name, not position.
                let Some(file) = allowed.iter().find(|f| f.name == outcome.name) else {
                    continue;
                };
                match outcome.result {
                    Ok(path) => {
                        phase.succeeded.push(outcome.name);
                        uploaded.push(NewFile {
                            name: file.name.clone(),
                            language: file.language.clone(),
                            quality: file.quality.clone(),
                            path,
                        });
                    }
                    Err(message) => {
                        phase
                            .failed
                            .push((outcome.name, StoreError::TransportUnavailable { message }));
                    }
                }
            }
        }
        report.push(phase);

        // Create files/units from uploaded results, one op per language.
        let mut phase = PhaseReport::new(SavePhase::CreateFiles);
        for (language, result) in self.create_files(&uploaded).await {
            match result {
                Ok(()) => phase.succeeded.push(language),
                Err(err) => phase.failed.push((language, err)),
            }
        }
        report.push(phase);

        // Update metadata on pre-existing modified files.
        let mut phase = PhaseReport::new(SavePhase::UpdateFiles);
        for update in &request.updates {
            match self.update_file(update).await {
                Ok(()) => phase.succeeded.push(update.id.clone()),
                Err(err) => phase.failed.push((update.id.clone(), err)),
            }
        }
        report.push(phase);

        // Reconcile unit membership for updated files. Serialized so two
        // moves into the same not-yet-created unit reuse one creation.
        let mut phase = PhaseReport::new(SavePhase::ReassignUnits);
        for update in &request.updates {
            match self.reassign_file(update).await {
                Ok(ReassignOutcome::Unchanged) | Ok(ReassignOutcome::Moved { .. }) => {
                    phase.succeeded.push(update.id.clone());
                }
                // Stale update: the file left the project; not a success,
                // not an error.
                Ok(ReassignOutcome::SkippedNoUnit) => {}
                Err(err) => phase.failed.push((update.id.clone(), err)),
            }
        }
        report.push(phase);

        // Delete units emptied by the operations above. Checked against
        // the intended post-operation file set.
        let surviving = request
            .updates
            .iter()
            .map(|u| u.language.clone())
            .chain(allowed.iter().map(|f| f.language.clone()));
        let unit_ids = self.units_to_remove(surviving);
        let mut phase = PhaseReport::new(SavePhase::DeleteEmptyUnits);
        if !unit_ids.is_empty() {
            match self.delete_units(&unit_ids).await {
                Ok(_) => phase.succeeded.extend(unit_ids),
                Err(err) => phase
                    .failed
                    .extend(unit_ids.into_iter().map(|id| (id, err.clone()))),
            }
        }
        report.push(phase);

        // Refetch authoritative state.
        let mut phase = PhaseReport::new(SavePhase::Refetch);
        let project_id = self.project().id.clone();
        match self.refetch().await {
            Ok(()) => phase.succeeded.push(project_id),
            Err(err) => phase.failed.push((project_id, err)),
        }
        report.push(phase);

        report
    }
}
