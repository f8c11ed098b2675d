use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

fn folio_binary() -> PathBuf {
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // remove test binary name
    path.pop(); // remove deps/
    path.push("folio");
    path
}

const PROJECTS: &str = r#"[
  {
    "id": "shop-front",
    "title": "Shop Front",
    "description": "Storefront with product catalog, cart and checkout built on a modern stack.",
    "technologies": ["React", "TypeScript"],
    "category": "Web App",
    "order": 2
  },
  {
    "id": "dev-blog",
    "title": "Developer Blog",
    "description": "Statically generated blog with markdown posts, tags and an RSS feed.",
    "technologies": ["Next.js", "React"],
    "category": "Web App",
    "order": 1,
    "featured": true
  },
  {
    "id": "log-tailer",
    "title": "Log Tailer",
    "description": "Terminal tool that follows rotating log files and highlights error lines.",
    "technologies": ["Rust", "Tokio"],
    "category": "CLI Tool",
    "order": 3
  }
]"#;

fn setup_test_env(state: &str) -> (TempDir, PathBuf) {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path().to_path_buf();

    let config_dir = root.join("config");
    fs::create_dir_all(&config_dir).unwrap();
    let data_dir = root.join("data");
    fs::create_dir_all(&data_dir).unwrap();

    fs::write(data_dir.join("projects.json"), PROJECTS).unwrap();

    let config_content = format!(
        r#"[data]
projects = "{}/data/projects.json"

[state]
{}
"#,
        root.display(),
        state
    );

    let config_path = config_dir.join("folio.toml");
    fs::write(&config_path, config_content).unwrap();

    (tmp, config_path)
}

fn file_env() -> (TempDir, PathBuf) {
    setup_test_env("backend = \"file\"\npath = \"../data/filter-state.toml\"")
}

fn run_folio(config_path: &Path, args: &[&str]) -> (String, String, bool) {
    let binary = folio_binary();
    let output = Command::new(&binary)
        .arg("--config")
        .arg(config_path.to_str().unwrap())
        .args(args)
        .output()
        .unwrap_or_else(|e| panic!("Failed to run folio binary at {:?}: {}", binary, e));

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let success = output.status.success();
    (stdout, stderr, success)
}

fn run_json(config_path: &Path, args: &[&str]) -> serde_json::Value {
    let mut full = vec!["--json"];
    full.extend_from_slice(args);
    let (stdout, stderr, success) = run_folio(config_path, &full);
    assert!(success, "folio {:?} failed: stderr={}", args, stderr);
    serde_json::from_str(&stdout)
        .unwrap_or_else(|e| panic!("invalid JSON from {:?}: {}\n{}", args, e, stdout))
}

fn visible_ids(view: &serde_json::Value) -> Vec<String> {
    view["projects"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_str().unwrap().to_string())
        .collect()
}

#[test]
fn test_list_shows_everything_in_display_order() {
    let (_tmp, config_path) = file_env();

    let (stdout, stderr, success) = run_folio(&config_path, &["list"]);
    assert!(success, "list failed: stdout={}, stderr={}", stdout, stderr);
    assert!(stdout.contains("Showing 3 of 3 projects"));

    let view = run_json(&config_path, &["list"]);
    assert_eq!(visible_ids(&view), vec!["dev-blog", "shop-front", "log-tailer"]);
    assert_eq!(view["is_filtered"], false);
    assert_eq!(view["has_active_filters"], false);
}

#[test]
fn test_list_featured_ignores_filters() {
    let (_tmp, config_path) = file_env();
    run_folio(&config_path, &["tech", "rust"]);

    let (stdout, stderr, success) = run_folio(&config_path, &["list", "--featured"]);
    assert!(success, "stderr={}", stderr);
    assert!(stdout.contains("Featured: 1 of 3 projects"));
    assert!(stdout.contains("dev-blog"));
    assert!(!stdout.contains("log-tailer"));

    let featured = run_json(&config_path, &["list", "--featured"]);
    let ids: Vec<&str> = featured
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["dev-blog"]);
}

#[test]
fn test_technology_filter_persists_and_toggles_off() {
    let (tmp, config_path) = file_env();

    let (stdout, _, success) = run_folio(&config_path, &["tech", "react"]);
    assert!(success);
    assert!(stdout.contains("Showing 2 of 3 projects"));
    assert!(stdout.contains("tech=react"));

    let state = fs::read_to_string(tmp.path().join("data/filter-state.toml")).unwrap();
    assert!(state.contains("technology = \"react\""));

    // A fresh invocation sees the persisted filter.
    let view = run_json(&config_path, &["list"]);
    assert_eq!(view["showing"], 2);
    assert_eq!(view["criteria"]["technology"], "react");

    // Same slug again clears it.
    let view = run_json(&config_path, &["tech", "react"]);
    assert_eq!(view["showing"], 3);
    assert!(view["criteria"].get("technology").is_none());
}

#[test]
fn test_search_and_category_combine_then_clear() {
    let (tmp, config_path) = file_env();

    let view = run_json(&config_path, &["search", "  REACT "]);
    assert_eq!(view["showing"], 2);
    assert_eq!(view["criteria"]["search"], "REACT");

    let view = run_json(&config_path, &["category", "web-app"]);
    assert_eq!(view["showing"], 2);
    assert_eq!(view["criteria"]["search"], "REACT");
    assert_eq!(view["criteria"]["category"], "web-app");

    let view = run_json(&config_path, &["search", "markdown"]);
    assert_eq!(visible_ids(&view), vec!["dev-blog"]);

    let (stdout, _, success) = run_folio(&config_path, &["clear"]);
    assert!(success);
    assert!(stdout.contains("Showing 3 of 3 projects"));
    assert!(!stdout.contains("Filters:"));

    let state = fs::read_to_string(tmp.path().join("data/filter-state.toml")).unwrap();
    assert!(state.trim().is_empty());
}

#[test]
fn test_blank_search_removes_constraint() {
    let (_tmp, config_path) = file_env();

    run_folio(&config_path, &["search", "rust"]);
    let view = run_json(&config_path, &["search", "   "]);
    assert_eq!(view["showing"], 3);
    assert!(view["criteria"].get("search").is_none());
}

#[test]
fn test_no_matches_shows_empty_state() {
    let (_tmp, config_path) = file_env();

    let (stdout, _, success) = run_folio(&config_path, &["search", "kubernetes"]);
    assert!(success);
    assert!(stdout.contains("Showing 0 of 3 projects"));
    assert!(stdout.contains("No projects match the active filters"));
}

#[test]
fn test_facets_counts_and_active_mark() {
    let (_tmp, config_path) = file_env();

    run_folio(&config_path, &["tech", "rust"]);
    let facets = run_json(&config_path, &["facets", "--kind", "technology"]);
    assert!(facets.get("categories").is_none());

    let techs = facets["technologies"].as_array().unwrap();
    assert_eq!(techs[0]["name"], "React");
    assert_eq!(techs[0]["count"], 2);
    let active: Vec<&str> = techs
        .iter()
        .filter(|f| f["active"] == true)
        .map(|f| f["slug"].as_str().unwrap())
        .collect();
    assert_eq!(active, vec!["rust"]);

    let (stdout, _, success) = run_folio(&config_path, &["facets"]);
    assert!(success);
    assert!(stdout.contains("Technologies:"));
    assert!(stdout.contains("Categories:"));
    assert!(stdout.contains("web-app"));
}

#[test]
fn test_url_backend_reads_location() {
    let (_tmp, config_path) = setup_test_env(
        "backend = \"url\"\nlocation = \"/?ref=newsletter&tech=rust&q=tail\"",
    );

    let view = run_json(&config_path, &["list"]);
    assert_eq!(visible_ids(&view), vec!["log-tailer"]);

    let state = run_json(&config_path, &["state"]);
    assert_eq!(state["backend"], "url");
    assert_eq!(state["criteria"]["technology"], "rust");
    assert_eq!(state["criteria"]["search"], "tail");
}

#[test]
fn test_url_backend_toggles_off_active_slug() {
    let (_tmp, config_path) =
        setup_test_env("backend = \"url\"\nlocation = \"/?ref=newsletter&tech=rust\"");

    let (stdout, stderr, success) = run_folio(&config_path, &["tech", "rust", "--verbose"]);
    assert!(success, "stderr={}", stderr);
    assert!(stdout.contains("Showing 3 of 3 projects"));
}

#[test]
fn test_state_command() {
    let (_tmp, config_path) = file_env();

    run_folio(&config_path, &["category", "cli-tool"]);
    let (stdout, _, success) = run_folio(&config_path, &["state"]);
    assert!(success);
    assert!(stdout.contains("backend:  file"));
    assert!(stdout.contains("category: cli-tool"));
    assert!(stdout.contains("search:   -"));
}

#[test]
fn test_export_to_file() {
    let (tmp, config_path) = file_env();
    let out = tmp.path().join("site/projects.json");

    run_folio(&config_path, &["tech", "tokio"]);
    let (_, stderr, success) =
        run_folio(&config_path, &["export", "--output", out.to_str().unwrap()]);
    assert!(success, "export failed: {}", stderr);
    assert!(stderr.contains("Exported 1 of 3 projects"));

    let exported: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(visible_ids(&exported), vec!["log-tailer"]);
}

#[test]
fn test_slug_needs_no_config() {
    let (stdout, _, success) = run_folio(Path::new("/nonexistent/folio.toml"), &["slug", "Node.js"]);
    assert!(success);
    assert_eq!(stdout.trim(), "node-js");
}

#[test]
fn test_projects_flag_without_config() {
    let tmp = TempDir::new().unwrap();
    let projects = tmp.path().join("projects.json");
    fs::write(&projects, PROJECTS).unwrap();

    let output = Command::new(folio_binary())
        .current_dir(tmp.path())
        .args(["--config", "missing.toml", "--projects"])
        .arg(&projects)
        .args(["tech", "next-js"])
        .output()
        .unwrap();
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("Showing 1 of 3 projects"));
    assert!(tmp.path().join("data/filter-state.toml").exists());
}

#[test]
fn test_missing_config_fails() {
    let (stdout, stderr, success) = run_folio(Path::new("/nonexistent/folio.toml"), &["list"]);
    assert!(!success, "expected failure: stdout={}", stdout);
    assert!(stderr.contains("Failed to read config file"));
}

#[test]
fn test_invalid_projects_fail() {
    let (tmp, config_path) = file_env();
    fs::write(
        tmp.path().join("data/projects.json"),
        r#"[{"id":"dup","title":"A","description":"d","technologies":["Go"]},
            {"id":"dup","title":"B","description":"d","technologies":["Go"]}]"#,
    )
    .unwrap();

    let (_, stderr, success) = run_folio(&config_path, &["list"]);
    assert!(!success);
    assert!(stderr.contains("duplicate project id 'dup'"));
}
