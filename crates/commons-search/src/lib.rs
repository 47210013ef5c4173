//! commons-search: filter/search state and query-string synchronization.
//!
//! The results page owns a [`state::FilterState`] for the duration of a page
//! view. On load the state is decoded from the URL query string; user
//! interaction mutates it through the store operations; every navigation
//! re-encodes it through the codec so the URL stays the sole persisted
//! representation. The selection presenter derives the flat list of active
//! filter chips from the state plus the global taxonomy lists.

pub mod dimensions;
pub mod query_string;
pub mod selections;
pub mod state;
