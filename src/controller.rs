//! Filter state controller.
//!
//! Owns the path from user intent to persisted criteria:
//!
//! ```text
//!  set_search ──▶ local echo (immediate)
//!       │
//!       ├──────▶ requested criteria ──▶ CommitScheduler ──▶ QueryStore::write
//!       │                                   (latest wins)          │
//!  set_technology_filter / set_category_filter                      ▼
//!                                                          committed criteria
//! ```
//!
//! The local echo always reflects the latest `set_search` call, whatever the
//! commit latency. Commits are interruptible: a new request aborts the one
//! still waiting, so a burst of keystrokes or toggle clicks produces one
//! store write. `clear_all` bypasses the scheduler and writes directly.
//!
//! Observers can [`subscribe`](FilterController::subscribe) to a
//! [`CommitState`] watch channel and re-render when it changes.

use anyhow::{Context, Result};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tracing::{debug, warn};

use folio_filter_core::{normalize_slug, FilterCriteria, QueryStore, WriteOptions};

use crate::config::SchedulerConfig;
use crate::scheduler::CommitScheduler;

/// Snapshot of the controller's commit pipeline.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommitState {
    /// Criteria last written successfully (or read at load time).
    pub committed: FilterCriteria,
    /// Latest intent: committed criteria plus any pending change.
    pub requested: FilterCriteria,
    /// A commit is scheduled or in flight.
    pub pending: bool,
    /// Error text of the latest failed write, cleared by the next success.
    pub last_error: Option<String>,
    /// Bumped on every request; only the newest commit may settle `pending`.
    pub generation: u64,
    /// Generation of the write `committed` reflects. A write that lands after
    /// a newer one never replaces it.
    pub applied: u64,
}

#[derive(Debug, Clone, Copy)]
pub struct ControllerSettings {
    pub commit_delay: Duration,
    pub write_options: WriteOptions,
}

impl Default for ControllerSettings {
    fn default() -> Self {
        Self {
            commit_delay: Duration::ZERO,
            write_options: WriteOptions::default(),
        }
    }
}

impl From<&SchedulerConfig> for ControllerSettings {
    fn from(cfg: &SchedulerConfig) -> Self {
        Self {
            commit_delay: cfg.commit_delay(),
            write_options: cfg.write_options(),
        }
    }
}

pub struct FilterController<S: QueryStore + 'static> {
    store: Arc<S>,
    echo: String,
    state: Arc<watch::Sender<CommitState>>,
    scheduler: CommitScheduler,
    write_options: WriteOptions,
}

impl<S: QueryStore + 'static> std::fmt::Debug for FilterController<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FilterController")
            .field("echo", &self.echo)
            .field("state", &*self.state.borrow())
            .field("scheduler", &self.scheduler)
            .finish_non_exhaustive()
    }
}

impl<S: QueryStore + 'static> FilterController<S> {
    /// Read the persisted criteria and start in the idle state.
    pub async fn load(store: Arc<S>, settings: ControllerSettings) -> Result<Self> {
        let committed = store
            .read()
            .await
            .context("Failed to read persisted filter criteria")?;
        let echo = committed.search.clone().unwrap_or_default();

        let (state, _) = watch::channel(CommitState {
            requested: committed.clone(),
            committed,
            ..CommitState::default()
        });

        Ok(Self {
            store,
            echo,
            state: Arc::new(state),
            scheduler: CommitScheduler::new(settings.commit_delay),
            write_options: settings.write_options,
        })
    }

    /// Update the search text.
    ///
    /// The local echo changes before this returns; the trimmed text (or the
    /// removal of the search constraint, for blank input) is committed later.
    pub fn set_search(&mut self, text: &str) {
        self.echo = text.to_string();
        let mut next = self.requested();
        next.set_search(text);
        self.request(next);
    }

    /// Toggle the technology constraint.
    ///
    /// Requesting the active slug clears it; any other slug replaces it.
    /// `None` or an empty slug always clears.
    pub fn set_technology_filter(&mut self, slug: Option<&str>) {
        let mut next = self.requested();
        next.technology = toggle(next.technology.as_deref(), slug);
        self.request(next);
    }

    /// Toggle the category constraint, independently of technology.
    pub fn set_category_filter(&mut self, slug: Option<&str>) {
        let mut next = self.requested();
        next.category = toggle(next.category.as_deref(), slug);
        self.request(next);
    }

    /// Reset search, technology and category together.
    ///
    /// The echo clears at once and any pending commit is dropped; the empty
    /// criteria are written directly rather than through the scheduler.
    pub async fn clear_all(&mut self) -> Result<()> {
        self.echo.clear();
        if self.scheduler.cancel() {
            debug!("pending commit dropped by clear_all");
        }

        let empty = FilterCriteria::default();
        let generation = self.bump(&empty);
        commit(
            Arc::clone(&self.store),
            Arc::clone(&self.state),
            empty,
            generation,
            self.write_options,
        )
        .await
    }

    /// Wait until the scheduled commit, if any, has been applied.
    pub async fn settle(&mut self) {
        self.scheduler.settle().await;
    }

    /// Re-read the store, adopting external changes when nothing is pending.
    ///
    /// Used when the persisted query changes underneath the controller (for
    /// example a navigation back to an older URL). The echo follows the
    /// committed search text.
    pub async fn refresh(&mut self) -> Result<()> {
        if self.is_pending() {
            return Ok(());
        }
        let current = self.criteria().await?;
        self.echo = current.search.clone().unwrap_or_default();
        self.state.send_modify(|s| {
            s.committed = current.clone();
            s.requested = current;
            s.applied = s.generation;
        });
        Ok(())
    }

    /// Criteria as currently persisted; the start of a render cycle.
    pub async fn criteria(&self) -> Result<FilterCriteria> {
        self.store.read().await
    }

    /// In-progress search text exactly as typed.
    pub fn local_echo(&self) -> &str {
        &self.echo
    }

    pub fn committed(&self) -> FilterCriteria {
        self.state.borrow().committed.clone()
    }

    pub fn requested(&self) -> FilterCriteria {
        self.state.borrow().requested.clone()
    }

    /// True when the echo is non-empty or a facet constraint is committed.
    pub fn has_active_filters(&self) -> bool {
        let state = self.state.borrow();
        !self.echo.is_empty()
            || state.committed.technology.is_some()
            || state.committed.category.is_some()
    }

    /// True while a commit is scheduled or in flight. Consumers should
    /// de-emphasize, not disable, filter controls during this window.
    pub fn is_pending(&self) -> bool {
        self.state.borrow().pending
    }

    pub fn last_error(&self) -> Option<String> {
        self.state.borrow().last_error.clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<CommitState> {
        self.state.subscribe()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn bump(&self, next: &FilterCriteria) -> u64 {
        let mut generation = 0;
        self.state.send_modify(|s| {
            s.generation += 1;
            s.requested = next.clone();
            s.pending = true;
            generation = s.generation;
        });
        generation
    }

    fn request(&mut self, next: FilterCriteria) {
        let generation = self.bump(&next);
        debug!(generation, criteria = ?next, "commit scheduled");

        let store = Arc::clone(&self.store);
        let state = Arc::clone(&self.state);
        let options = self.write_options;
        self.scheduler.schedule(async move {
            // Failures are recorded in CommitState and logged by commit().
            let _ = commit(store, state, next, generation, options).await;
        });
    }
}

fn toggle(current: Option<&str>, requested: Option<&str>) -> Option<String> {
    match normalize_slug(requested) {
        Some(slug) if current != Some(slug.as_str()) => Some(slug),
        _ => None,
    }
}

/// Write `criteria` and fold the outcome into the shared state.
///
/// On failure the committed criteria stay at their pre-write value and the
/// requested criteria fall back to them; the local echo is not touched.
async fn commit<S: QueryStore + ?Sized>(
    store: Arc<S>,
    state: Arc<watch::Sender<CommitState>>,
    criteria: FilterCriteria,
    generation: u64,
    options: WriteOptions,
) -> Result<()> {
    let result = store.write(&criteria, options).await;

    state.send_modify(|s| {
        let latest = s.generation == generation;
        match &result {
            Ok(()) => {
                if generation > s.applied {
                    s.committed = criteria.clone();
                    s.applied = generation;
                }
                if latest {
                    s.last_error = None;
                }
            }
            Err(e) if latest => {
                s.requested = s.committed.clone();
                s.last_error = Some(format!("{:#}", e));
            }
            Err(_) => {}
        }
        if latest {
            s.pending = false;
        }
    });

    match result {
        Ok(()) => {
            debug!(generation, criteria = ?criteria, "commit applied");
            Ok(())
        }
        Err(e) => {
            warn!(generation, "filter commit failed, keeping previous criteria: {:#}", e);
            Err(e.context("Failed to persist filter criteria"))
        }
    }
}
