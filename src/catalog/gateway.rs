//! Catalog request construction.
//!
//! Builds the HTTP requests for the two catalog operations (discover popular movies,
//! search by term). The request carries a context map that comes back untouched with
//! the response; it is how a response finds its way to the generation that issued it.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use std::collections::BTreeMap;

/// Default catalog API root.
pub const DEFAULT_API_BASE_URL: &str = "https://api.themoviedb.org/3";

/// Sort key used for the default "all movies" view.
pub const POPULARITY_SORT: &str = "popularity.desc";

/// Context key identifying catalog responses among other web responses.
pub const CONTEXT_SOURCE: &str = "source";

/// Context value for [`CONTEXT_SOURCE`].
pub const CATALOG_SOURCE: &str = "catalog";

/// Context key carrying the generation token.
pub const CONTEXT_GENERATION: &str = "generation";

/// Context key carrying the query (for logging only).
pub const CONTEXT_QUERY: &str = "query";

/// Characters left unescaped in query values (RFC 3986 unreserved set).
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Which catalog operation a settled query selects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchMode {
    /// Popular movies, selected by an empty query.
    Discover {
        /// Catalog sort key.
        sort_key: String,
    },
    /// Movies matching a non-empty query.
    Search {
        /// The settled query, verbatim.
        term: String,
    },
}

impl FetchMode {
    /// Chooses the mode for a settled query: empty selects discover, anything else search.
    #[must_use]
    pub fn for_query(settled: &str) -> Self {
        if settled.is_empty() {
            Self::Discover {
                sort_key: POPULARITY_SORT.to_string(),
            }
        } else {
            Self::Search {
                term: settled.to_string(),
            }
        }
    }

    #[must_use]
    pub const fn is_discover(&self) -> bool {
        matches!(self, Self::Discover { .. })
    }
}

/// A fully-built catalog GET request, ready for the host to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogRequest {
    /// Absolute request URL including query string.
    pub url: String,

    /// Request headers.
    pub headers: BTreeMap<String, String>,

    /// Opaque context returned with the response.
    pub context: BTreeMap<String, String>,

    /// Generation token of this request.
    pub generation: u64,

    /// Operation this request performs.
    pub mode: FetchMode,
}

/// Builds catalog requests for a configured API root and credential.
///
/// An absent credential is not an error here: requests are built with an empty key
/// and the catalog rejects them, which surfaces as a transport failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogGateway {
    base_url: String,
    api_key: Option<String>,
}

impl CatalogGateway {
    #[must_use]
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
        }
    }

    #[must_use]
    pub const fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Builds the request for `mode`, tagged with `generation`.
    #[must_use]
    pub fn build(&self, mode: FetchMode, generation: u64) -> CatalogRequest {
        let key = self.api_key.as_deref().unwrap_or_default();
        let encoded_key = encode(key);

        let url = match &mode {
            FetchMode::Discover { sort_key } => format!(
                "{}/discover/movie?sort_by={}&api_key={encoded_key}",
                self.base_url,
                encode(sort_key)
            ),
            FetchMode::Search { term } => format!(
                "{}/search/movie?query={}&api_key={encoded_key}",
                self.base_url,
                encode(term)
            ),
        };

        let mut headers = BTreeMap::new();
        headers.insert("accept".to_string(), "application/json".to_string());
        headers.insert("Authorization".to_string(), format!("Bearer {key}"));

        let mut context = BTreeMap::new();
        context.insert(CONTEXT_SOURCE.to_string(), CATALOG_SOURCE.to_string());
        context.insert(CONTEXT_GENERATION.to_string(), generation.to_string());
        if let FetchMode::Search { term } = &mode {
            context.insert(CONTEXT_QUERY.to_string(), term.clone());
        }

        CatalogRequest {
            url,
            headers,
            context,
            generation,
            mode,
        }
    }
}

impl Default for CatalogGateway {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE_URL, None)
    }
}

/// Extracts the generation token from a response context.
///
/// Returns `None` when the context does not belong to a catalog request.
#[must_use]
pub fn generation_from_context(context: &BTreeMap<String, String>) -> Option<u64> {
    if context.get(CONTEXT_SOURCE).map(String::as_str) != Some(CATALOG_SOURCE) {
        return None;
    }
    context.get(CONTEXT_GENERATION)?.parse().ok()
}

fn encode(value: &str) -> String {
    utf8_percent_encode(value, QUERY_VALUE).to_string()
}
