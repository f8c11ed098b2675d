//! Filter engine: apply the predicate across a project snapshot.
//!
//! The engine is a single ordered pass over the input. Each evaluation is
//! independent and side-effect free, so the visible subset preserves input
//! order and carries no scoring.

use crate::models::{FilterCriteria, Project};
use crate::predicate::matches;

/// Result of one filtering pass.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterOutcome<'a> {
    /// Projects passing every clause, in input order.
    pub visible: Vec<&'a Project>,
    /// Number of projects in the input snapshot.
    pub total_count: usize,
    /// `visible.len()`.
    pub visible_count: usize,
}

impl FilterOutcome<'_> {
    /// True when the criteria hid at least one project.
    pub fn is_filtered(&self) -> bool {
        self.visible_count < self.total_count
    }
}

/// Filter `projects` by `criteria`.
pub fn apply<'a>(projects: &'a [Project], criteria: &FilterCriteria) -> FilterOutcome<'a> {
    let visible: Vec<&Project> = projects.iter().filter(|p| matches(p, criteria)).collect();

    FilterOutcome {
        total_count: projects.len(),
        visible_count: visible.len(),
        visible,
    }
}
