//! Inclusion test for a single project.

use crate::models::{FilterCriteria, Project};
use crate::slug::slugify;

/// Decide whether `project` passes every clause of `criteria`.
///
/// - **search**: trimmed, case-insensitive substring of the title, the
///   description, or any technology label.
/// - **technology**: some technology label slugifies to the given slug.
/// - **category**: the project's category label slugifies to the given slug.
///   Projects without a category label never pass a category constraint.
///
/// Absent clauses are vacuously true; the result is their conjunction.
pub fn matches(project: &Project, criteria: &FilterCriteria) -> bool {
    matches_search(project, criteria.search_text())
        && criteria
            .technology
            .as_deref()
            .map_or(true, |slug| matches_technology(project, slug))
        && criteria
            .category
            .as_deref()
            .map_or(true, |slug| matches_category(project, slug))
}

fn matches_search(project: &Project, text: &str) -> bool {
    if text.is_empty() {
        return true;
    }
    let needle = text.to_lowercase();

    project.title.to_lowercase().contains(&needle)
        || project.description.to_lowercase().contains(&needle)
        || project
            .technologies
            .iter()
            .any(|t| t.to_lowercase().contains(&needle))
}

fn matches_technology(project: &Project, slug: &str) -> bool {
    project.technologies.iter().any(|t| slugify(t) == slug)
}

fn matches_category(project: &Project, slug: &str) -> bool {
    project
        .category_label()
        .is_some_and(|label| slugify(label) == slug)
}
