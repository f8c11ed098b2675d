//! Interruptible commit scheduling.
//!
//! A [`CommitScheduler`] runs at most one commit at a time. Scheduling a new
//! commit aborts the previous one if it has not finished, so a burst of
//! requests collapses to its last member. There is no ordering guarantee
//! for the intermediate requests of a burst, only that the latest wins.
//!
//! Commits are spawned on the current tokio runtime. On a current-thread
//! runtime nothing runs until the caller yields, which is what makes a
//! synchronous burst collapse before any write starts.

use std::future::Future;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, error};

#[derive(Debug)]
pub struct CommitScheduler {
    delay: Duration,
    pending: Option<JoinHandle<()>>,
}

impl CommitScheduler {
    /// `delay` is how long a scheduled commit waits before running. With a
    /// zero delay the commit still yields once, giving same-tick requests a
    /// chance to supersede it.
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Schedule `commit`, superseding any commit that has not completed.
    ///
    /// # Panics
    ///
    /// Panics when called outside a tokio runtime.
    pub fn schedule<F>(&mut self, commit: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        if self.cancel() {
            debug!("superseded pending commit");
        }

        let delay = self.delay;
        self.pending = Some(tokio::spawn(async move {
            if delay.is_zero() {
                tokio::task::yield_now().await;
            } else {
                tokio::time::sleep(delay).await;
            }
            commit.await;
        }));
    }

    /// Abort the scheduled commit. Returns true if one was still outstanding.
    pub fn cancel(&mut self) -> bool {
        match self.pending.take() {
            Some(handle) if !handle.is_finished() => {
                handle.abort();
                true
            }
            _ => false,
        }
    }

    /// True while a scheduled commit has not completed.
    pub fn has_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Wait for the scheduled commit, if any, to finish.
    pub async fn settle(&mut self) {
        if let Some(handle) = self.pending.take() {
            if let Err(e) = handle.await {
                if e.is_panic() {
                    error!("commit task panicked: {}", e);
                }
            }
        }
    }
}
