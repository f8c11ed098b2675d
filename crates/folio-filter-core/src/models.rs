//! Core data models used throughout Folio Filter.
//!
//! [`Project`] is owned by the data loader and read-only to the filter;
//! [`FilterCriteria`] is the one piece of authoritative filter state.

use serde::{Deserialize, Serialize};

/// A portfolio work item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    /// Unique identifier (kebab-case, e.g. `"weather-dashboard"`).
    pub id: String,
    pub title: String,
    pub description: String,
    /// Technology labels in display order. Never empty for valid data.
    pub technologies: Vec<String>,
    /// Kind of project (e.g. `"web-app"`, `"cli-tool"`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Business context (e.g. `"E-commerce"`). Used as the category label
    /// when `category` is absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, alias = "liveUrl", skip_serializing_if = "Option::is_none")]
    pub live_url: Option<String>,
    #[serde(default, alias = "repoUrl", skip_serializing_if = "Option::is_none")]
    pub repo_url: Option<String>,
    /// Display priority; lower sorts first.
    #[serde(default)]
    pub order: i64,
    #[serde(default)]
    pub featured: bool,
}

impl Project {
    /// Label this project contributes to the category facet, if any.
    pub fn category_label(&self) -> Option<&str> {
        self.category.as_deref().or(self.context.as_deref())
    }
}

/// The authoritative filter triple.
///
/// `technology` and `category` hold slugs, never raw labels. An absent field
/// means "no constraint". `search` is stored trimmed; whitespace-only input
/// is the same as no search.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub technology: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl FilterCriteria {
    pub fn new(
        search: Option<&str>,
        technology: Option<&str>,
        category: Option<&str>,
    ) -> Self {
        Self {
            search: normalize_search(search.unwrap_or_default()),
            technology: normalize_slug(technology),
            category: normalize_slug(category),
        }
    }

    /// Trimmed search text, or `""` when there is no search constraint.
    pub fn search_text(&self) -> &str {
        self.search.as_deref().map(str::trim).unwrap_or_default()
    }

    /// Replace the search constraint, trimming and dropping empty text.
    pub fn set_search(&mut self, text: &str) {
        self.search = normalize_search(text);
    }

    pub fn is_empty(&self) -> bool {
        self.search_text().is_empty() && self.technology.is_none() && self.category.is_none()
    }
}

/// Trim search text; empty or whitespace-only input becomes `None`.
pub fn normalize_search(text: &str) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// An empty slug is no constraint at all.
pub fn normalize_slug(slug: Option<&str>) -> Option<String> {
    slug.filter(|s| !s.is_empty()).map(str::to_string)
}

/// Options passed with every write to a [`QueryStore`](crate::store::QueryStore).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WriteOptions {
    /// Keep the viewer's scroll position when the persisted query changes.
    pub preserve_scroll: bool,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            preserve_scroll: true,
        }
    }
}
