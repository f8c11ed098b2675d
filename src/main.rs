//! # Folio Filter CLI (`folio`)
//!
//! The `folio` binary renders a project gallery under the persisted filter
//! criteria and changes those criteria one intent at a time. State persists
//! between invocations through the configured backend, so `folio tech react`
//! followed by `folio list` shows the React projects.
//!
//! ## Usage
//!
//! ```bash
//! folio --config ./config/folio.toml <command>
//! folio --projects ./data/projects.json <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `folio list` | Render the gallery with the persisted filters |
//! | `folio list --featured` | List featured projects, ignoring filters |
//! | `folio facets` | List technology and category facets with counts |
//! | `folio search <text>` | Set the search text (blank clears it) |
//! | `folio tech <slug>` | Toggle the technology filter |
//! | `folio category <slug>` | Toggle the category filter |
//! | `folio clear` | Clear search, technology and category |
//! | `folio state` | Show the persisted criteria and where they live |
//! | `folio slug <label>` | Print the slug of a facet label |
//! | `folio export` | Write the rendered view as JSON |

use anyhow::{bail, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

use folio_filter::backend::StateStore;
use folio_filter::catalog::{load_projects, Catalog};
use folio_filter::config::{self, Config};
use folio_filter::controller::{ControllerSettings, FilterController};
use folio_filter::export::export_view;
use folio_filter::gallery::{FacetView, Gallery, GalleryView};
use folio_filter::{logging, slugify, Project};

/// Folio Filter CLI: faceted search over a portfolio project collection.
///
/// Reads its settings from a TOML configuration file. See
/// `config/folio.example.toml` for a full example.
#[derive(Parser)]
#[command(
    name = "folio",
    about = "Folio Filter: faceted search and shareable filter state for project galleries",
    version
)]
struct Cli {
    /// Path to configuration file (TOML).
    #[arg(long, global = true, default_value = "./config/folio.toml")]
    config: PathBuf,

    /// Project collection (`.json` or `.toml`). Overrides `[data].projects`
    /// and allows running without a config file.
    #[arg(long, global = true)]
    projects: Option<PathBuf>,

    /// Print machine-readable JSON instead of text.
    #[arg(long, global = true)]
    json: bool,

    /// Enable debug logging on stderr.
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the gallery under the persisted filter criteria.
    List {
        /// Only list featured projects, in display order. Filters do not apply.
        #[arg(long)]
        featured: bool,
    },

    /// List facets with project counts; the active facet is marked.
    Facets {
        /// Only show one facet kind.
        #[arg(long, value_enum)]
        kind: Option<FacetKind>,
    },

    /// Set the free-text search. Blank text removes the search constraint.
    Search {
        /// Matched case-insensitively against titles, descriptions and
        /// technology labels.
        text: String,
    },

    /// Toggle the technology filter. Repeating the active slug clears it.
    Tech {
        /// Technology slug, e.g. `react` or `node-js`.
        slug: String,
    },

    /// Toggle the category filter. Repeating the active slug clears it.
    Category {
        /// Category slug, e.g. `web-app`.
        slug: String,
    },

    /// Clear search, technology and category together.
    Clear,

    /// Show the persisted criteria and the state location.
    State,

    /// Print the slug for a facet label.
    Slug {
        /// Raw label, e.g. `Node.js`.
        label: String,
    },

    /// Export the rendered view as JSON.
    ///
    /// Writes to `--output` when given, otherwise to stdout.
    Export {
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum FacetKind {
    Technology,
    Category,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Commands that don't require config
    if let Commands::Slug { label } = &cli.command {
        println!("{}", slugify(label));
        return Ok(());
    }

    let cfg = resolve_config(&cli.config, cli.projects.as_deref())?;
    logging::init(if cli.verbose {
        "debug"
    } else {
        cfg.logging.level.as_str()
    });
    debug!(projects = %cfg.data.projects.display(), backend = cfg.state.backend.as_str(), "config loaded");

    let catalog = Catalog::new(load_projects(&cfg.data.projects)?);
    let store = Arc::new(StateStore::open(&cfg));
    let mut controller =
        FilterController::load(Arc::clone(&store), ControllerSettings::from(&cfg.scheduler))
            .await?;

    match &cli.command {
        Commands::Search { text } => controller.set_search(text),
        Commands::Tech { slug } => controller.set_technology_filter(Some(slug.as_str())),
        Commands::Category { slug } => controller.set_category_filter(Some(slug.as_str())),
        Commands::Clear => controller.clear_all().await?,
        _ => {}
    }
    controller.settle().await;
    if let Some(err) = controller.last_error() {
        bail!("filter change was not saved: {}", err);
    }

    match cli.command {
        Commands::State => return print_state(&store, &controller.committed(), cli.json),
        Commands::List { featured: true } => return print_featured(&catalog, cli.json),
        _ => {}
    }

    let view = Gallery::new(&catalog, &controller).render().await?;

    match cli.command {
        Commands::Facets { kind } => print_facets(&view, kind, cli.json)?,
        Commands::Export { output } => export_view(&view, output.as_deref())?,
        _ => print_view(&view, cli.json)?,
    }

    Ok(())
}

/// Load the config file, or fall back to defaults when only `--projects`
/// is given and no config file exists.
fn resolve_config(path: &Path, projects: Option<&Path>) -> Result<Config> {
    match projects {
        Some(projects) if !path.exists() => Ok(Config::minimal(projects.to_path_buf())),
        _ => {
            let mut cfg = config::load_config(path)?;
            if let Some(projects) = projects {
                cfg.data.projects = projects.to_path_buf();
            }
            Ok(cfg)
        }
    }
}

fn print_view(view: &GalleryView, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(view)?);
        return Ok(());
    }

    println!("{}", view.counter_line());
    if view.has_active_filters {
        println!("Filters: {}", describe_criteria(view));
    }
    if let Some(message) = view.empty_message {
        println!("{}", message);
        return Ok(());
    }

    println!();
    for p in &view.projects {
        print_project(p);
    }
    Ok(())
}

fn print_featured(catalog: &Catalog, json: bool) -> Result<()> {
    let featured: Vec<&Project> = catalog.featured().collect();
    if json {
        println!("{}", serde_json::to_string_pretty(&featured)?);
        return Ok(());
    }

    println!("Featured: {} of {} projects", featured.len(), catalog.len());
    for p in featured {
        print_project(p);
    }
    Ok(())
}

fn print_project(p: &Project) {
    let category = p.category_label().unwrap_or("-");
    println!("  {:<24} {}  [{}]  ({})", p.id, p.title, p.technologies.join(", "), category);
}

fn describe_criteria(view: &GalleryView) -> String {
    let mut parts = Vec::new();
    if !view.search_echo.is_empty() {
        parts.push(format!("search=\"{}\"", view.search_echo));
    }
    if let Some(tech) = &view.criteria.technology {
        parts.push(format!("tech={}", tech));
    }
    if let Some(category) = &view.criteria.category {
        parts.push(format!("category={}", category));
    }
    parts.join(" ")
}

fn print_facets(view: &GalleryView, kind: Option<FacetKind>, json: bool) -> Result<()> {
    let show_tech = kind != Some(FacetKind::Category);
    let show_category = kind != Some(FacetKind::Technology);

    if json {
        let mut out = serde_json::Map::new();
        if show_tech {
            out.insert("technologies".into(), serde_json::to_value(&view.technologies)?);
        }
        if show_category {
            out.insert("categories".into(), serde_json::to_value(&view.categories)?);
        }
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    if show_tech {
        print_facet_group("Technologies", &view.technologies);
    }
    if show_category {
        print_facet_group("Categories", &view.categories);
    }
    Ok(())
}

fn print_facet_group(heading: &str, facets: &[FacetView]) {
    println!("{}:", heading);
    if facets.is_empty() {
        println!("  (none)");
    }
    for f in facets {
        let mark = if f.active { "*" } else { " " };
        println!("  {} {:<20} {:>3}  {}", mark, f.name, f.count, f.slug);
    }
}

fn print_state(
    store: &StateStore,
    criteria: &folio_filter::FilterCriteria,
    json: bool,
) -> Result<()> {
    if json {
        let out = serde_json::json!({
            "backend": store.backend().as_str(),
            "location": store.describe(),
            "criteria": criteria,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!("backend:  {}", store.backend().as_str());
    println!("location: {}", store.describe());
    println!("search:   {}", criteria.search.as_deref().unwrap_or("-"));
    println!("tech:     {}", criteria.technology.as_deref().unwrap_or("-"));
    println!("category: {}", criteria.category.as_deref().unwrap_or("-"));
    Ok(())
}
