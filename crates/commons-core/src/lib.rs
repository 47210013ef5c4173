//! commons-core: shared domain model for the Content Commons admin tools.
//!
//! This crate holds the reference data and project typing shared by the
//! search/filter subsystem and the unit reconciler: taxonomy lists with
//! synonym-grouped keys, project types with their upload extension
//! allow-lists, and the search defaults applied at request time.

pub mod project;
pub mod taxonomy;

/// Default content language applied when the query string carries none.
pub const DEFAULT_LANGUAGE: &str = "en-us";

/// Default sort order applied when the query string carries none.
pub const DEFAULT_SORT: &str = "published";
