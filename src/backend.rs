//! Config-selected query store.
//!
//! [`StateStore`] dispatches to one of the concrete stores so the CLI can
//! pick its backend at runtime while the controller stays generic.

use anyhow::Result;
use async_trait::async_trait;

use folio_filter_core::{FilterCriteria, InMemoryQueryStore, QueryStore, WriteOptions};

use crate::config::{Config, StateBackend};
use crate::query::UrlQueryStore;
use crate::state_file::FileQueryStore;

#[derive(Debug)]
pub enum StateStore {
    File(FileQueryStore),
    Url(UrlQueryStore),
    Memory(InMemoryQueryStore),
}

impl StateStore {
    /// Build the store named by `[state].backend`.
    pub fn open(config: &Config) -> Self {
        match config.state.backend {
            StateBackend::File => Self::File(FileQueryStore::new(&config.state.path)),
            StateBackend::Url => Self::Url(UrlQueryStore::new(
                config.state.location.clone(),
                config.query.clone(),
            )),
            StateBackend::Memory => Self::Memory(InMemoryQueryStore::new()),
        }
    }

    pub fn backend(&self) -> StateBackend {
        match self {
            Self::File(_) => StateBackend::File,
            Self::Url(_) => StateBackend::Url,
            Self::Memory(_) => StateBackend::Memory,
        }
    }

    /// Where the state lives: a file path, a location, or `memory`.
    pub fn describe(&self) -> String {
        match self {
            Self::File(store) => store.path().display().to_string(),
            Self::Url(store) => store.location(),
            Self::Memory(_) => "memory".to_string(),
        }
    }
}

#[async_trait]
impl QueryStore for StateStore {
    async fn read(&self) -> Result<FilterCriteria> {
        match self {
            Self::File(store) => store.read().await,
            Self::Url(store) => store.read().await,
            Self::Memory(store) => store.read().await,
        }
    }

    async fn write(&self, criteria: &FilterCriteria, options: WriteOptions) -> Result<()> {
        match self {
            Self::File(store) => store.write(criteria, options).await,
            Self::Url(store) => store.write(criteria, options).await,
            Self::Memory(store) => store.write(criteria, options).await,
        }
    }
}
