//! Search Query Cache
//!
//! The last submitted search is kept in session-scoped storage so pagination
//! links can replay it. Simple searches store the raw query string; advanced
//! searches store a JSON object of field values.

use std::collections::{BTreeMap, HashMap};
use std::sync::RwLock;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{ClientError, Result};

/// Which search form a query came from
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchKind {
    Simple,
    Advanced,
}

impl SearchKind {
    /// Session storage key
    pub const fn storage_key(self) -> &'static str {
        match self {
            Self::Simple => "simpleSearchQuery",
            Self::Advanced => "advancedSearchQuery",
        }
    }
}

/// One input of a search form
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormField {
    pub name: String,
    /// The input's `type` attribute
    pub input_type: String,
    pub value: String,
}

impl FormField {
    pub fn new(name: impl Into<String>, input_type: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            input_type: input_type.into(),
            value: value.into(),
        }
    }

    fn is_captured(&self) -> bool {
        self.input_type != "submit" && self.input_type != "hidden"
    }
}

/// Field name to value, as captured at submission
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SearchQuery(BTreeMap<String, String>);

/// Field name used for the simple search box
pub const SIMPLE_QUERY_FIELD: &str = "query";

impl SearchQuery {
    /// Capture a form's fields at submission
    ///
    /// A simple search keeps only its first field, stored as `query`. An
    /// advanced search keeps every field that is neither `submit` nor `hidden`.
    pub fn capture(kind: SearchKind, fields: &[FormField]) -> Self {
        let captured = fields.iter().filter(|f| f.is_captured());
        let map = match kind {
            SearchKind::Simple => captured
                .take(1)
                .map(|f| (SIMPLE_QUERY_FIELD.to_string(), f.value.clone()))
                .collect(),
            SearchKind::Advanced => captured.map(|f| (f.name.clone(), f.value.clone())).collect(),
        };
        Self(map)
    }

    pub fn simple(query: impl Into<String>) -> Self {
        Self(BTreeMap::from([(SIMPLE_QUERY_FIELD.to_string(), query.into())]))
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    fn encode(&self, kind: SearchKind) -> Result<String> {
        match kind {
            SearchKind::Simple => Ok(self.get(SIMPLE_QUERY_FIELD).unwrap_or_default().to_string()),
            SearchKind::Advanced => Ok(serde_json::to_string(self)?),
        }
    }

    fn decode(kind: SearchKind, raw: &str) -> Result<Self> {
        match kind {
            SearchKind::Simple => Ok(Self::simple(raw)),
            SearchKind::Advanced => Ok(serde_json::from_str(raw)?),
        }
    }
}

/// Session-scoped string storage
pub trait QueryStore {
    fn get(&self, key: &str) -> Result<Option<String>>;

    fn set(&self, key: &str, value: &str) -> Result<()>;

    fn remove(&self, key: &str) -> Result<()>;
}

impl<T: QueryStore + ?Sized> QueryStore for &T {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        (**self).remove(key)
    }
}

/// In-memory store (for tests and non-browser hosts)
#[derive(Default)]
pub struct MemoryQueryStore {
    items: RwLock<HashMap<String, String>>,
}

impl MemoryQueryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<T>(_: T) -> ClientError {
    ClientError::Storage("store lock poisoned".into())
}

impl QueryStore for MemoryQueryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let items = self.items.read().map_err(poisoned)?;
        Ok(items.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut items = self.items.write().map_err(poisoned)?;
        items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut items = self.items.write().map_err(poisoned)?;
        items.remove(key);
        Ok(())
    }
}

/// Remembers the last query of one search form
pub struct SearchCache<S: QueryStore> {
    store: S,
    kind: SearchKind,
}

impl<S: QueryStore> SearchCache<S> {
    pub const fn new(store: S, kind: SearchKind) -> Self {
        Self { store, kind }
    }

    pub const fn kind(&self) -> SearchKind {
        self.kind
    }

    /// Overwrite the cached query
    pub fn remember(&self, query: &SearchQuery) -> Result<()> {
        let encoded = query.encode(self.kind)?;
        tracing::debug!(key = self.kind.storage_key(), "caching search query");
        self.store.set(self.kind.storage_key(), &encoded)
    }

    pub fn recall(&self) -> Result<Option<SearchQuery>> {
        self.store
            .get(self.kind.storage_key())?
            .map(|raw| SearchQuery::decode(self.kind, &raw))
            .transpose()
    }

    /// Navigation target for `page` of the cached search
    pub fn page_url(&self, origin: &str, page: u32) -> Result<String> {
        let query = self.recall()?.unwrap_or_default();
        search_url(origin, &query, page)
    }
}

/// `/search?query=..&page=N` on `origin`, every cached field URL-encoded
pub fn search_url(origin: &str, query: &SearchQuery, page: u32) -> Result<String> {
    let mut url = Url::parse(origin)
        .and_then(|base| base.join("/search"))
        .map_err(|e| ClientError::Config(format!("invalid origin {origin}: {e}")))?;
    {
        let mut pairs = url.query_pairs_mut();
        if query.get(SIMPLE_QUERY_FIELD).is_none() {
            pairs.append_pair(SIMPLE_QUERY_FIELD, "");
        }
        for (name, value) in query.fields() {
            pairs.append_pair(name, value);
        }
        pairs.append_pair("page", &page.to_string());
    }
    Ok(url.into())
}

/// The pagination control that was activated
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PageControl {
    Next { disabled: bool },
    Previous { disabled: bool },
    Numbered(String),
}

impl PageControl {
    /// Classify a control by its id (`next` / `prev`), disabled marker and label
    pub fn from_element(id: &str, disabled: bool, label: &str) -> Self {
        match id {
            "next" => Self::Next { disabled },
            "prev" => Self::Previous { disabled },
            _ => Self::Numbered(label.trim().to_string()),
        }
    }

    /// Page to navigate to; `None` means stay put
    pub fn resolve(&self, container_id: &str) -> Option<u32> {
        match self {
            Self::Next { disabled: false } => current_page(container_id)?.checked_add(1),
            Self::Previous { disabled: false } => {
                current_page(container_id)?.checked_sub(1).filter(|p| *p >= 1)
            }
            Self::Numbered(label) => label.parse().ok().filter(|p| *p >= 1),
            Self::Next { disabled: true } | Self::Previous { disabled: true } => None,
        }
    }
}

/// Current page from a pagination container id of the form `prefix#page`
pub fn current_page(container_id: &str) -> Option<u32> {
    container_id.rsplit_once('#')?.1.trim().parse().ok()
}
