//! File-backed [`QueryStore`]: criteria persisted as a small TOML document.
//!
//! Lets consecutive `folio` invocations share filter state the way a
//! browser tab shares its address bar. Absent fields are omitted from the
//! file, so an empty filter is an empty document.
//!
//! ```toml
//! search = "dashboard"
//! technology = "react"
//! ```

use anyhow::{Context, Result};
use async_trait::async_trait;
use std::io::Write;
use std::path::{Path, PathBuf};

use folio_filter_core::{FilterCriteria, QueryStore, WriteOptions};

#[derive(Debug, Clone)]
pub struct FileQueryStore {
    path: PathBuf,
}

impl FileQueryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl QueryStore for FileQueryStore {
    async fn read(&self) -> Result<FilterCriteria> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(FilterCriteria::default())
            }
            Err(e) => {
                return Err(e).with_context(|| {
                    format!("Failed to read filter state: {}", self.path.display())
                })
            }
        };

        let stored: FilterCriteria = toml::from_str(&content)
            .with_context(|| format!("Failed to parse filter state: {}", self.path.display()))?;

        // Re-normalize: the file may have been edited by hand.
        Ok(FilterCriteria::new(
            stored.search.as_deref(),
            stored.technology.as_deref(),
            stored.category.as_deref(),
        ))
    }

    async fn write(&self, criteria: &FilterCriteria, _options: WriteOptions) -> Result<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        tokio::fs::create_dir_all(&dir)
            .await
            .with_context(|| format!("Failed to create state directory: {}", dir.display()))?;

        let body = toml::to_string(criteria)?;
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || persist(&dir, &path, body.as_bytes()))
            .await
            .context("filter state write task panicked")??;

        tracing::debug!(path = %self.path.display(), "filter state written");
        Ok(())
    }
}

/// Write into a uniquely named sibling, then rename it over `path`, so a
/// failed write never clobbers the last state and concurrent writers never
/// share a scratch file.
fn persist(dir: &Path, path: &Path, body: &[u8]) -> Result<()> {
    let mut tmp = tempfile::NamedTempFile::new_in(dir)
        .with_context(|| format!("Failed to create temp file in {}", dir.display()))?;
    tmp.write_all(body)
        .with_context(|| format!("Failed to write filter state: {}", tmp.path().display()))?;
    tmp.persist(path)
        .map_err(|e| e.error)
        .with_context(|| format!("Failed to replace filter state: {}", path.display()))?;
    Ok(())
}
