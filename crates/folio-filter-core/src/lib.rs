//! # Folio Filter Core
//!
//! Shared, runtime-free logic for Folio Filter: the project data model,
//! slugs, facet aggregation, the filter predicate and engine, and the
//! persisted-query store abstraction.
//!
//! This crate contains no tokio, filesystem I/O, or other native-only
//! dependencies. Every operation except the store is a total, pure function
//! over its input.

pub mod engine;
pub mod facets;
pub mod models;
pub mod predicate;
pub mod slug;
pub mod store;

pub use engine::{apply, FilterOutcome};
pub use facets::{aggregate, categories, technologies, Facet};
pub use models::{normalize_slug, FilterCriteria, Project, WriteOptions};
pub use predicate::matches;
pub use slug::slugify;
pub use store::{memory::InMemoryQueryStore, QueryStore};
