//! Persisted-query abstraction for Folio Filter.
//!
//! The [`QueryStore`] trait is the filter's only external boundary: the
//! place the authoritative [`FilterCriteria`] lives between render cycles.
//! Backends include an in-memory value ([`memory::InMemoryQueryStore`]),
//! a URL query string and a state file.
//!
//! Implementations must be `Send + Sync` to work with async runtimes.

pub mod memory;

use anyhow::Result;
use async_trait::async_trait;

use crate::models::{FilterCriteria, WriteOptions};

/// Read/write access to the persisted filter criteria.
///
/// | Method | Purpose |
/// |--------|---------|
/// | [`read`](QueryStore::read) | Parse the current search, technology and category entries |
/// | [`write`](QueryStore::write) | Replace the persisted representation |
///
/// Absent fields must be removed from the persisted form, never written as
/// empty values.
#[async_trait]
pub trait QueryStore: Send + Sync {
    /// Read the criteria as currently persisted.
    async fn read(&self) -> Result<FilterCriteria>;

    /// Replace the persisted criteria.
    ///
    /// A failed write must leave the previously persisted criteria readable.
    async fn write(&self, criteria: &FilterCriteria, options: WriteOptions) -> Result<()>;
}
