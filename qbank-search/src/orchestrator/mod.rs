//! Search orchestrator: concurrent adapter queries, merging, ranking.
//!
//! This module fans a query out to every scoped source adapter
//! concurrently, absorbs per-source failures, appends matching navigation
//! entries and returns a title-ranked, truncated result set.

pub mod rank;
pub mod search;

pub use search::SearchService;
