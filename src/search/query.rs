//! Ranked fuzzy search over a loaded index.

use super::fuzzy::{Score, score};
use super::index::SearchIndex;
use crate::error::IndexResult;
use crate::types::{Fragment, SymbolKind};
use regex::Regex;
use serde::Serialize;
use std::sync::{Arc, LazyLock};
use tracing::debug;

static FILTER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(\w+)\s*:").expect("Invalid filter regex"));

/// A query split into an optional kind filter and the fuzzy term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedQuery {
    pub filter: Option<Fragment>,
    /// Query text with every whitespace character removed.
    pub term: String,
}

impl ParsedQuery {
    /// `signal: clicked` filters to signals; `Widget:visible` is a plain term
    /// since `Widget` is not a fragment keyword.
    pub fn parse(query: &str) -> Self {
        let (filter, rest) = match FILTER_RE.captures(query) {
            Some(caps) => match caps[1].parse::<Fragment>() {
                Ok(fragment) => (Some(fragment), &query[caps[0].len()..]),
                Err(_) => (None, query),
            },
            None => (None, query),
        };

        Self {
            filter,
            term: rest.chars().filter(|c| !c.is_whitespace()).collect(),
        }
    }

    pub fn accepts(&self, kind: SymbolKind) -> bool {
        self.filter.is_none_or(|fragment| fragment.accepts(kind))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchHit {
    pub id: u32,
    pub name: String,
    pub kind: SymbolKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,
    pub rendering_text: String,
    pub href: String,
    pub summary: String,
    pub score: Score,
}

/// Outcome of a query. An empty result is a value, not an error.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchResults {
    Matches {
        query: String,
        filter: Option<Fragment>,
        hits: Vec<SearchHit>,
    },
    NoResults {
        query: String,
    },
}

impl SearchResults {
    pub fn query(&self) -> &str {
        match self {
            SearchResults::Matches { query, .. } | SearchResults::NoResults { query } => query,
        }
    }

    pub fn hits(&self) -> &[SearchHit] {
        match self {
            SearchResults::Matches { hits, .. } => hits,
            SearchResults::NoResults { .. } => &[],
        }
    }

    pub fn len(&self) -> usize {
        self.hits().len()
    }

    pub fn is_empty(&self) -> bool {
        self.hits().is_empty()
    }

    /// Keep at most `limit` hits.
    pub fn truncate(&mut self, limit: usize) {
        if let SearchResults::Matches { hits, .. } = self {
            hits.truncate(limit);
        }
    }
}

/// Read-only query engine; clones share the index.
#[derive(Debug, Clone)]
pub struct QueryEngine {
    index: Arc<SearchIndex>,
}

impl QueryEngine {
    pub fn new(index: Arc<SearchIndex>) -> Self {
        Self { index }
    }

    /// Parse and validate a serialized index.
    pub fn load(json: &str) -> IndexResult<Self> {
        Ok(Self::new(Arc::new(SearchIndex::from_json(json)?)))
    }

    pub fn index(&self) -> &SearchIndex {
        &self.index
    }

    pub fn search(&self, query: &str) -> SearchResults {
        let parsed = ParsedQuery::parse(query);
        if parsed.term.is_empty() {
            return SearchResults::NoResults {
                query: query.to_string(),
            };
        }

        let mut hits: Vec<SearchHit> = self
            .index
            .symbols
            .iter()
            .filter(|doc| parsed.accepts(doc.kind))
            .filter_map(|doc| {
                score(&parsed.term, &doc.rendering_text).map(|score| SearchHit {
                    id: doc.id,
                    name: doc.name.clone(),
                    kind: doc.kind,
                    type_name: doc.type_name.clone(),
                    rendering_text: doc.rendering_text.clone(),
                    href: doc.href.clone(),
                    summary: doc.summary.clone(),
                    score,
                })
            })
            .collect();

        hits.sort_by(|a, b| b.score.total_cmp(&a.score).then(a.id.cmp(&b.id)));
        debug!("query '{query}' matched {} symbols", hits.len());

        if hits.is_empty() {
            SearchResults::NoResults {
                query: query.to_string(),
            }
        } else {
            SearchResults::Matches {
                query: query.to_string(),
                filter: parsed.filter,
                hits,
            }
        }
    }
}
