//! Facet aggregation over a project snapshot.
//!
//! Counts are keyed on the raw label, not the slug. Two labels that collide
//! to the same slug (`"C#"` and `"C +"`) stay separate facets that share a
//! slug; activating either one matches projects tagged with both.
//!
//! # Ordering
//!
//! Facets sort by count (desc). Equal counts keep discovery order: the label
//! seen first in project order comes first. The sort is stable, so the output
//! is deterministic for a given snapshot.

use serde::Serialize;
use std::collections::HashMap;

use crate::models::Project;
use crate::slug::slugify;

/// One aggregated, countable filter value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Facet {
    /// Raw label as it appears on projects.
    pub name: String,
    /// Number of projects referencing the label (always ≥ 1).
    pub count: usize,
    pub slug: String,
}

/// Derive facets from `projects` using `extractor` to pull labels.
///
/// A project contributes one count per label it yields; a label repeated
/// within a single project counts once for that project. An empty snapshot
/// yields no facets.
pub fn aggregate<'a, F, I>(projects: &'a [Project], extractor: F) -> Vec<Facet>
where
    F: Fn(&'a Project) -> I,
    I: IntoIterator<Item = &'a str>,
{
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut facets: Vec<Facet> = Vec::new();

    for project in projects {
        let mut seen_here: Vec<&str> = Vec::new();
        for label in extractor(project) {
            if seen_here.contains(&label) {
                continue;
            }
            seen_here.push(label);

            match index.get(label) {
                Some(&i) => facets[i].count += 1,
                None => {
                    index.insert(label, facets.len());
                    facets.push(Facet {
                        name: label.to_string(),
                        count: 1,
                        slug: slugify(label),
                    });
                }
            }
        }
    }

    facets.sort_by(|a, b| b.count.cmp(&a.count));
    facets
}

/// Technology facets: one per distinct technology label.
pub fn technologies(projects: &[Project]) -> Vec<Facet> {
    aggregate(projects, |p| p.technologies.iter().map(String::as_str))
}

/// Category facets: projects without a category label contribute nothing.
pub fn categories(projects: &[Project]) -> Vec<Facet> {
    aggregate(projects, |p| p.category_label())
}
