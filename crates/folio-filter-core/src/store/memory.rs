//! In-memory [`QueryStore`] implementation for tests and embedding hosts.
//!
//! Holds the criteria behind `std::sync::RwLock`. Every write is counted and
//! its options kept, so callers can observe how many commits actually landed.

use std::sync::RwLock;

use anyhow::{anyhow, Result};
use async_trait::async_trait;

use crate::models::{FilterCriteria, WriteOptions};

use super::QueryStore;

#[derive(Debug, Default)]
struct Inner {
    criteria: FilterCriteria,
    writes: usize,
    last_options: Option<WriteOptions>,
}

/// In-memory store.
#[derive(Debug, Default)]
pub struct InMemoryQueryStore {
    inner: RwLock<Inner>,
}

impl InMemoryQueryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with `criteria` (no write recorded).
    pub fn with_criteria(criteria: FilterCriteria) -> Self {
        Self {
            inner: RwLock::new(Inner {
                criteria,
                ..Inner::default()
            }),
        }
    }

    /// Number of writes applied so far.
    pub fn write_count(&self) -> usize {
        self.inner.read().map(|i| i.writes).unwrap_or_default()
    }

    /// Options passed with the most recent write.
    pub fn last_options(&self) -> Option<WriteOptions> {
        self.inner.read().ok().and_then(|i| i.last_options)
    }
}

#[async_trait]
impl QueryStore for InMemoryQueryStore {
    async fn read(&self) -> Result<FilterCriteria> {
        let inner = self
            .inner
            .read()
            .map_err(|_| anyhow!("query store lock poisoned"))?;
        Ok(inner.criteria.clone())
    }

    async fn write(&self, criteria: &FilterCriteria, options: WriteOptions) -> Result<()> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| anyhow!("query store lock poisoned"))?;
        inner.criteria = criteria.clone();
        inner.writes += 1;
        inner.last_options = Some(options);
        Ok(())
    }
}
