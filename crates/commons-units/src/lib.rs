//! commons-units: keeps a project's language units consistent with a batch
//! of pending file changes.
//!
//! A unit is one language's file bundle within a project; a project holds
//! at most one unit per language, and a unit with zero files is invalid and
//! must be deleted. The reconciler computes the minimal set of
//! create/connect/disconnect/delete operations against the remote content
//! store and runs them through an ordered save pipeline that reports
//! per-phase results instead of throwing.
//!
//! The remote store and the upload transport are ports
//! ([`store::ContentStore`], [`store::UploadTransport`]); recording mocks
//! live in [`mock`] for tests.

pub mod error;
pub mod file_state;
pub mod mock;
pub mod pipeline;
pub mod reconcile;
pub mod store;
pub mod types;
