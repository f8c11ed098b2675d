//! # Folio Filter
//!
//! Faceted filtering for portfolio project galleries.
//!
//! Folio Filter derives technology and category facets from a project
//! collection, narrows it with free-text search plus one technology and one
//! category constraint, and keeps the active criteria in a shareable,
//! persisted query (a URL query string or a small state file). Search input
//! echoes immediately while commits to the store are collapsed, so a burst
//! of keystrokes or clicks lands as one write.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────┐   ┌──────────────┐   ┌──────────────┐
//! │ Catalog  │──▶│ Filter Engine │──▶│ GalleryView  │──▶ CLI / export
//! │ + Facets │   │ (core crate)  │   └──────────────┘
//! └──────────┘   └──────▲───────┘
//!                       │ criteria
//!              ┌────────┴─────────┐    ┌─────────────┐
//!              │ FilterController │───▶│ QueryStore  │
//!              │ echo + scheduler │    │ url/file/mem│
//!              └──────────────────┘    └─────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! folio list                      # render with the persisted filters
//! folio facets --kind technology  # technology facets with counts
//! folio tech react                # toggle the React filter
//! folio search "dashboard"        # set the search text
//! folio clear                     # drop every filter
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`catalog`] | Project loading, validation and facet snapshot |
//! | [`controller`] | Filter state controller (echo, commits, pending) |
//! | [`scheduler`] | Interruptible commit scheduling |
//! | [`query`] | URL query-string store |
//! | [`state_file`] | File-backed store |
//! | [`backend`] | Config-selected store dispatch |
//! | [`gallery`] | Render cycle producing a [`gallery::GalleryView`] |
//! | [`export`] | JSON export of a view |
//! | [`logging`] | `tracing` subscriber setup |
//!
//! The pure data model, slugifier, facet aggregation, predicate and engine
//! live in the `folio_filter_core` crate and are re-exported here.

pub mod backend;
pub mod catalog;
pub mod config;
pub mod controller;
pub mod export;
pub mod gallery;
pub mod logging;
pub mod query;
pub mod scheduler;
pub mod state_file;

pub use folio_filter_core::{
    apply, categories, matches, slugify, technologies, Facet, FilterCriteria, FilterOutcome,
    InMemoryQueryStore, Project, QueryStore, WriteOptions,
};
