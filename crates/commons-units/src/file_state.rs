//! Per-file lifecycle state machine.
//!
//! Tracks a file from selection through upload, unit assignment,
//! cross-language reassignment, and removal. The state is conceptual UI
//! state, not persisted remotely; the reconciler drives the events.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileState {
    /// Selected for upload, not yet sent.
    Pending,
    Uploading,
    /// Uploaded to storage but not yet connected to a unit.
    Unassigned,
    /// Connected to a unit.
    Assigned,
    /// Language changed; moving between units.
    Reassigning,
    Removed,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileEvent {
    UploadStarted,
    UploadSucceeded,
    UploadFailed,
    ConnectedToUnit,
    LanguageChanged,
    ReassignmentComplete,
    RemovalRequested,
}

pub fn next_state(_current: FileState, event: FileEvent) -> FileState {
    match event {
        FileEvent::UploadStarted => FileState::Uploading,
        FileEvent::UploadSucceeded => FileState::Unassigned,
        FileEvent::UploadFailed => FileState::Failed,
        FileEvent::ConnectedToUnit => FileState::Assigned,
        FileEvent::LanguageChanged => FileState::Reassigning,
        FileEvent::ReassignmentComplete => FileState::Assigned,
        FileEvent::RemovalRequested => FileState::Removed,
    }
}

pub fn transition(current: FileState, event: FileEvent) -> (FileState, bool) {
    let next = next_state(current, event);
    (next, next != current)
}

impl FileState {
    /// Whether no further events are expected for this file.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Removed | Self::Failed)
    }
}
