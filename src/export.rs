//! Export the rendered gallery view as JSON for static site builds.
//!
//! Produces the same document `folio list --json` prints, written to a file
//! so a static page can ship the filtered project list alongside its facets.

use anyhow::{Context, Result};
use std::path::Path;

use crate::gallery::GalleryView;

/// Export a view as pretty-printed JSON.
///
/// If `output` is `Some`, writes to that file path. Otherwise writes
/// to stdout for piping.
pub fn export_view(view: &GalleryView, output: Option<&Path>) -> Result<()> {
    let json = serde_json::to_string_pretty(view)?;

    match output {
        Some(path) => {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent).with_context(|| {
                        format!("Failed to create export directory: {}", parent.display())
                    })?;
                }
            }
            std::fs::write(path, &json)
                .with_context(|| format!("Failed to write export: {}", path.display()))?;
            eprintln!(
                "Exported {} of {} projects to {}",
                view.showing,
                view.total,
                path.display()
            );
        }
        None => {
            println!("{}", json);
        }
    }

    Ok(())
}
