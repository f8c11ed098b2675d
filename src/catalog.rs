//! Project catalog: loading, validation and the facet snapshot.
//!
//! The catalog is the static data side of the gallery. It is loaded once per
//! session, sorted by display order, and its facets are derived once when
//! the snapshot is built.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;
use tracing::warn;

use folio_filter_core::{categories, technologies, Facet, Project};

/// Hard data errors that make a project collection unusable.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum CatalogError {
    #[error("project #{index} has an empty id")]
    EmptyId { index: usize },
    #[error("project id '{0}' must be kebab-case ([a-z0-9-]+)")]
    InvalidId(String),
    #[error("duplicate project id '{0}'")]
    DuplicateId(String),
    #[error("project '{0}' has an empty title")]
    EmptyTitle(String),
    #[error("project '{0}' lists no technologies")]
    NoTechnologies(String),
    #[error("unsupported project file extension: {0}")]
    UnsupportedFormat(String),
}

const TITLE_MAX: usize = 60;
const DESCRIPTION_RANGE: (usize, usize) = (50, 200);
const TECHNOLOGY_COUNT_RANGE: (usize, usize) = (2, 6);
const TECHNOLOGY_LABEL_RANGE: (usize, usize) = (2, 20);

#[derive(Deserialize)]
#[serde(untagged)]
enum ProjectFile {
    List(Vec<Project>),
    Table { projects: Vec<Project> },
}

impl From<ProjectFile> for Vec<Project> {
    fn from(file: ProjectFile) -> Self {
        match file {
            ProjectFile::List(projects) | ProjectFile::Table { projects } => projects,
        }
    }
}

/// Load and validate a project collection from `.json` or `.toml`.
///
/// JSON may be a bare array or `{ "projects": [...] }`; TOML uses
/// `[[projects]]` tables.
pub fn load_projects(path: &Path) -> Result<Vec<Project>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read projects file: {}", path.display()))?;

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();

    let file: ProjectFile = match ext.as_str() {
        "json" => serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse projects JSON: {}", path.display()))?,
        "toml" => toml::from_str(&content)
            .with_context(|| format!("Failed to parse projects TOML: {}", path.display()))?,
        other => return Err(CatalogError::UnsupportedFormat(other.to_string()).into()),
    };

    let projects: Vec<Project> = file.into();
    validate_projects(&projects)
        .with_context(|| format!("Invalid project data in {}", path.display()))?;
    Ok(projects)
}

fn is_kebab_id(id: &str) -> bool {
    id.bytes()
        .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-')
}

/// Check hard invariants; soft content guidelines only produce warnings.
pub fn validate_projects(projects: &[Project]) -> Result<(), CatalogError> {
    let mut seen: HashSet<&str> = HashSet::new();

    for (index, p) in projects.iter().enumerate() {
        if p.id.is_empty() {
            return Err(CatalogError::EmptyId { index });
        }
        if !is_kebab_id(&p.id) {
            return Err(CatalogError::InvalidId(p.id.clone()));
        }
        if !seen.insert(p.id.as_str()) {
            return Err(CatalogError::DuplicateId(p.id.clone()));
        }
        if p.title.trim().is_empty() {
            return Err(CatalogError::EmptyTitle(p.id.clone()));
        }
        if p.technologies.is_empty() {
            return Err(CatalogError::NoTechnologies(p.id.clone()));
        }

        warn_on_guidelines(p);
    }

    Ok(())
}

fn warn_on_guidelines(p: &Project) {
    let title_len = p.title.chars().count();
    if title_len > TITLE_MAX {
        warn!(id = %p.id, title_len, "title longer than {} characters", TITLE_MAX);
    }

    let desc_len = p.description.chars().count();
    if desc_len < DESCRIPTION_RANGE.0 || desc_len > DESCRIPTION_RANGE.1 {
        warn!(
            id = %p.id,
            desc_len,
            "description outside {}-{} characters",
            DESCRIPTION_RANGE.0,
            DESCRIPTION_RANGE.1
        );
    }

    let n = p.technologies.len();
    if n < TECHNOLOGY_COUNT_RANGE.0 || n > TECHNOLOGY_COUNT_RANGE.1 {
        warn!(
            id = %p.id,
            technologies = n,
            "expected {}-{} technologies",
            TECHNOLOGY_COUNT_RANGE.0,
            TECHNOLOGY_COUNT_RANGE.1
        );
    }
    for tech in &p.technologies {
        let len = tech.chars().count();
        if len < TECHNOLOGY_LABEL_RANGE.0 || len > TECHNOLOGY_LABEL_RANGE.1 {
            warn!(id = %p.id, technology = %tech, "technology label length out of range");
        }
    }
}

/// Immutable project snapshot plus its derived facets.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    projects: Vec<Project>,
    technologies: Vec<Facet>,
    categories: Vec<Facet>,
}

impl Catalog {
    /// Build a snapshot. Projects are stably sorted by `order`.
    pub fn new(mut projects: Vec<Project>) -> Self {
        projects.sort_by_key(|p| p.order);
        let technologies = technologies(&projects);
        let categories = categories(&projects);
        Self {
            projects,
            technologies,
            categories,
        }
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn technologies(&self) -> &[Facet] {
        &self.technologies
    }

    pub fn categories(&self) -> &[Facet] {
        &self.categories
    }

    /// Featured projects in display order.
    pub fn featured(&self) -> impl Iterator<Item = &Project> {
        self.projects.iter().filter(|p| p.featured)
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn project(id: &str, order: i64, techs: &[&str]) -> Project {
        Project {
            id: id.to_string(),
            title: id.to_uppercase(),
            description: "A description long enough to satisfy the content guideline check.".into(),
            technologies: techs.iter().map(|t| t.to_string()).collect(),
            category: None,
            context: None,
            image: None,
            live_url: None,
            repo_url: None,
            order,
            featured: order == 1,
        }
    }

    #[test]
    fn test_catalog_sorts_by_order_and_derives_facets() {
        let catalog = Catalog::new(vec![
            project("c", 3, &["Go", "Docker"]),
            project("a", 1, &["Rust", "Docker"]),
            project("b", 2, &["Rust", "Tokio"]),
        ]);
        let ids: Vec<&str> = catalog.projects().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);

        let techs: Vec<(&str, usize)> = catalog
            .technologies()
            .iter()
            .map(|f| (f.name.as_str(), f.count))
            .collect();
        assert_eq!(
            techs,
            vec![("Rust", 2), ("Docker", 2), ("Tokio", 1), ("Go", 1)]
        );
        assert!(catalog.categories().is_empty());

        let featured: Vec<&str> = catalog.featured().map(|p| p.id.as_str()).collect();
        assert_eq!(featured, vec!["a"]);
    }

    #[test]
    fn test_featured_follows_display_order() {
        let mut late = project("late", 5, &["Go", "Docker"]);
        late.featured = true;
        let catalog = Catalog::new(vec![
            late,
            project("b", 2, &["Rust", "Go"]),
            project("a", 1, &["Rust", "Go"]),
        ]);
        let featured: Vec<&str> = catalog.featured().map(|p| p.id.as_str()).collect();
        assert_eq!(featured, vec!["a", "late"]);
        assert_eq!(catalog.len(), 3);
    }

    #[test]
    fn test_validate_rejects_bad_data() {
        let mut p = project("ok-1", 1, &["Rust", "Go"]);
        assert!(validate_projects(&[p.clone()]).is_ok());

        p.id = "Not Kebab".into();
        assert_eq!(
            validate_projects(&[p.clone()]),
            Err(CatalogError::InvalidId("Not Kebab".into()))
        );

        p.id = String::new();
        assert_eq!(
            validate_projects(&[p.clone()]),
            Err(CatalogError::EmptyId { index: 0 })
        );

        let dup = vec![project("x", 1, &["Rust"]), project("x", 2, &["Go"])];
        assert_eq!(
            validate_projects(&dup),
            Err(CatalogError::DuplicateId("x".into()))
        );

        let mut untitled = project("u", 1, &["Rust"]);
        untitled.title = "  ".into();
        assert_eq!(
            validate_projects(&[untitled]),
            Err(CatalogError::EmptyTitle("u".into()))
        );

        let bare = project("b", 1, &[]);
        assert_eq!(
            validate_projects(&[bare]),
            Err(CatalogError::NoTechnologies("b".into()))
        );
    }

    #[test]
    fn test_guideline_violations_are_not_errors() {
        let mut p = project("long", 1, &["R"]);
        p.title = "x".repeat(90);
        p.description = "short".into();
        assert!(validate_projects(&[p]).is_ok());
    }

    #[test]
    fn test_load_json_array_and_table() {
        let tmp = TempDir::new().unwrap();
        let array = tmp.path().join("a.json");
        std::fs::write(
            &array,
            r#"[{"id":"a","title":"A","description":"d","technologies":["Rust"]}]"#,
        )
        .unwrap();
        assert_eq!(load_projects(&array).unwrap().len(), 1);

        let table = tmp.path().join("b.json");
        std::fs::write(
            &table,
            r#"{"projects":[{"id":"b","title":"B","description":"d","technologies":["Go"],"liveUrl":"https://b.dev"}]}"#,
        )
        .unwrap();
        let loaded = load_projects(&table).unwrap();
        assert_eq!(loaded[0].live_url.as_deref(), Some("https://b.dev"));
    }

    #[test]
    fn test_load_toml() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("projects.toml");
        std::fs::write(
            &path,
            r#"
[[projects]]
id = "cli"
title = "CLI"
description = "d"
technologies = ["Rust", "Clap"]
category = "CLI Tool"
order = 2
"#,
        )
        .unwrap();
        let loaded = load_projects(&path).unwrap();
        assert_eq!(loaded[0].category.as_deref(), Some("CLI Tool"));
        assert_eq!(loaded[0].order, 2);
    }

    #[test]
    fn test_load_rejects_unknown_extension_and_invalid_data() {
        let tmp = TempDir::new().unwrap();
        let yaml = tmp.path().join("p.yaml");
        std::fs::write(&yaml, "- id: a").unwrap();
        let err = load_projects(&yaml).unwrap_err();
        assert!(err.to_string().contains("unsupported project file extension"));

        let bad = tmp.path().join("bad.json");
        std::fs::write(
            &bad,
            r#"[{"id":"a","title":"A","description":"d","technologies":[]}]"#,
        )
        .unwrap();
        let err = load_projects(&bad).unwrap_err();
        assert!(format!("{:#}", err).contains("lists no technologies"));
    }
}
