//! Gallery render cycle.
//!
//! Every render starts from the persisted criteria, runs the filter engine
//! over the catalog and produces a [`GalleryView`]: the visible projects,
//! counts, facet lists with the active facet flagged, and the transient
//! controller state (local echo, pending flag). The view is plain data and
//! serializes directly for `--json` output and export.

use anyhow::Result;
use serde::Serialize;

use folio_filter_core::{apply, Facet, FilterCriteria, Project, QueryStore};

use crate::catalog::Catalog;
use crate::controller::FilterController;

pub const NO_MATCHES: &str = "No projects match the active filters";
pub const NO_PROJECTS: &str = "No projects available";

/// A facet as shown in the filter controls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FacetView {
    pub name: String,
    pub slug: String,
    pub count: usize,
    pub active: bool,
}

impl FacetView {
    fn list(facets: &[Facet], active: Option<&str>) -> Vec<FacetView> {
        facets
            .iter()
            .map(|f| FacetView {
                name: f.name.clone(),
                slug: f.slug.clone(),
                count: f.count,
                active: active == Some(f.slug.as_str()),
            })
            .collect()
    }
}

/// Everything a renderer needs for one frame.
#[derive(Debug, Clone, Serialize)]
pub struct GalleryView {
    pub projects: Vec<Project>,
    pub total: usize,
    pub showing: usize,
    pub is_filtered: bool,
    pub technologies: Vec<FacetView>,
    pub categories: Vec<FacetView>,
    pub criteria: FilterCriteria,
    pub search_echo: String,
    pub has_active_filters: bool,
    pub is_pending: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub empty_message: Option<&'static str>,
}

impl GalleryView {
    /// Results counter, e.g. `Showing 2 of 5 projects`.
    pub fn counter_line(&self) -> String {
        let noun = if self.total == 1 { "project" } else { "projects" };
        format!("Showing {} of {} {}", self.showing, self.total, noun)
    }
}

/// Binds the static catalog to the live filter state.
pub struct Gallery<'a, S: QueryStore + 'static> {
    catalog: &'a Catalog,
    controller: &'a FilterController<S>,
}

impl<'a, S: QueryStore + 'static> Gallery<'a, S> {
    pub fn new(catalog: &'a Catalog, controller: &'a FilterController<S>) -> Self {
        Self {
            catalog,
            controller,
        }
    }

    /// Read the persisted criteria and render the matching view.
    pub async fn render(&self) -> Result<GalleryView> {
        let criteria = self.controller.criteria().await?;
        let has_active_filters = self.controller.has_active_filters();
        let outcome = apply(self.catalog.projects(), &criteria);

        let empty_message = match (outcome.visible_count, self.catalog.is_empty()) {
            (0, true) => Some(NO_PROJECTS),
            (0, false) => Some(NO_MATCHES),
            _ => None,
        };

        Ok(GalleryView {
            is_filtered: outcome.is_filtered(),
            total: outcome.total_count,
            showing: outcome.visible_count,
            projects: outcome.visible.into_iter().cloned().collect(),
            technologies: FacetView::list(
                self.catalog.technologies(),
                criteria.technology.as_deref(),
            ),
            categories: FacetView::list(self.catalog.categories(), criteria.category.as_deref()),
            search_echo: self.controller.local_echo().to_string(),
            has_active_filters,
            is_pending: self.controller.is_pending(),
            empty_message,
            criteria,
        })
    }
}
