//! URL-backed [`QueryStore`]: filter criteria as a shareable query string.
//!
//! The store owns a location such as `/?tech=react&q=blog`. Reads decode the
//! three filter parameters; writes re-encode them on top of the existing
//! parameters, so unrelated entries (`?ref=newsletter`) survive a filter
//! change. An empty query collapses the location back to `/`.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::sync::RwLock;
use url::form_urlencoded;

use folio_filter_core::{FilterCriteria, QueryStore, WriteOptions};

use crate::config::QueryConfig;

/// Decode filter criteria from a raw query string (without the leading `?`).
///
/// Empty values read as absent. When a parameter repeats, the first value wins.
pub fn decode(query: &str, names: &QueryConfig) -> FilterCriteria {
    let mut search = None;
    let mut technology = None;
    let mut category = None;

    for (key, value) in form_urlencoded::parse(query.as_bytes()) {
        let slot = if key == names.search_param.as_str() {
            &mut search
        } else if key == names.technology_param.as_str() {
            &mut technology
        } else if key == names.category_param.as_str() {
            &mut category
        } else {
            continue;
        };
        if slot.is_none() && !value.is_empty() {
            *slot = Some(value.into_owned());
        }
    }

    FilterCriteria::new(search.as_deref(), technology.as_deref(), category.as_deref())
}

/// Encode `criteria` over the parameters of `existing`.
///
/// Filter parameters already present are replaced in place; new ones are
/// appended in search, technology, category order. Absent or empty fields
/// are removed.
pub fn encode(existing: &str, criteria: &FilterCriteria, names: &QueryConfig) -> String {
    fn present(v: &Option<String>) -> Option<&str> {
        v.as_deref().filter(|v| !v.is_empty())
    }
    let wanted: [(&str, Option<&str>); 3] = [
        (names.search_param.as_str(), present(&criteria.search)),
        (names.technology_param.as_str(), present(&criteria.technology)),
        (names.category_param.as_str(), present(&criteria.category)),
    ];
    let mut written = [false; 3];

    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (key, value) in form_urlencoded::parse(existing.as_bytes()) {
        match wanted.iter().position(|(name, _)| key == *name) {
            Some(i) => {
                if written[i] {
                    continue;
                }
                written[i] = true;
                if let (name, Some(v)) = wanted[i] {
                    serializer.append_pair(name, v);
                }
            }
            None => {
                serializer.append_pair(&key, &value);
            }
        }
    }
    for (i, (name, value)) in wanted.iter().enumerate() {
        if let (false, Some(v)) = (written[i], value) {
            serializer.append_pair(name, v);
        }
    }

    serializer.finish()
}

/// Split a location into its path and raw query (`"/?a=1"` → `("/", "a=1")`).
fn split_location(location: &str) -> (&str, &str) {
    match location.split_once('?') {
        Some((path, query)) => (path, query),
        None => (location, ""),
    }
}

#[derive(Debug)]
struct Location {
    href: String,
    last_options: Option<WriteOptions>,
}

/// Query store over an address-bar style location.
#[derive(Debug)]
pub struct UrlQueryStore {
    names: QueryConfig,
    location: RwLock<Location>,
}

impl UrlQueryStore {
    pub fn new(location: impl Into<String>, names: QueryConfig) -> Self {
        Self {
            names,
            location: RwLock::new(Location {
                href: location.into(),
                last_options: None,
            }),
        }
    }

    /// Current location, e.g. `/?tech=react`.
    pub fn location(&self) -> String {
        self.location
            .read()
            .map(|l| l.href.clone())
            .unwrap_or_default()
    }

    /// Options of the most recent write (`None` before any write).
    pub fn last_options(&self) -> Option<WriteOptions> {
        self.location.read().ok().and_then(|l| l.last_options)
    }
}

#[async_trait]
impl QueryStore for UrlQueryStore {
    async fn read(&self) -> Result<FilterCriteria> {
        let location = self
            .location
            .read()
            .map_err(|_| anyhow!("location lock poisoned"))?;
        let (_, query) = split_location(&location.href);
        Ok(decode(query, &self.names))
    }

    async fn write(&self, criteria: &FilterCriteria, options: WriteOptions) -> Result<()> {
        let mut location = self
            .location
            .write()
            .map_err(|_| anyhow!("location lock poisoned"))?;

        let (path, query) = split_location(&location.href);
        let path = if path.is_empty() { "/" } else { path };
        let encoded = encode(query, criteria, &self.names);

        location.href = if encoded.is_empty() {
            path.to_string()
        } else {
            format!("{}?{}", path, encoded)
        };
        location.last_options = Some(options);
        tracing::debug!(location = %location.href, "location replaced");
        Ok(())
    }
}
