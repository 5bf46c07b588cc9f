//! A search session: one client's view of an asynchronously loaded index.
//!
//! The session starts out loading. Its paired [`IndexLoader`] completes the
//! load; until then plain searches are rejected and
//! [`SearchSession::search_when_ready`] waits.

use super::query::{QueryEngine, SearchResults};
use crate::error::{IndexError, IndexResult, SessionError};
use crate::links::escape_html;
use std::path::Path;
use tokio::sync::watch;
use tracing::{info, warn};

#[derive(Debug, Clone)]
enum SessionState {
    Loading,
    Ready(QueryEngine),
    Failed(String),
}

pub struct SearchSession {
    state: watch::Receiver<SessionState>,
    last_results: Option<SearchResults>,
    max_results: Option<usize>,
}

/// Write half of a session; consumed by the load.
pub struct IndexLoader {
    state: watch::Sender<SessionState>,
}

impl SearchSession {
    /// A session in the loading state and the loader that completes it.
    pub fn new() -> (Self, IndexLoader) {
        let (tx, rx) = watch::channel(SessionState::Loading);
        (
            Self {
                state: rx,
                last_results: None,
                max_results: None,
            },
            IndexLoader { state: tx },
        )
    }

    /// Open a session over an index file, loading it before returning.
    pub async fn open(path: impl AsRef<Path>) -> IndexResult<Self> {
        let (session, loader) = Self::new();
        loader.load_file(path).await?;
        Ok(session)
    }

    /// Truncate every result set to `limit` hits.
    pub fn with_max_results(mut self, limit: usize) -> Self {
        self.max_results = Some(limit);
        self
    }

    pub fn is_ready(&self) -> bool {
        matches!(*self.state.borrow(), SessionState::Ready(_))
    }

    /// Run `query` against the loaded index.
    ///
    /// Rejected with [`SessionError::NotReady`] while the index is loading.
    pub fn search(&mut self, query: &str) -> Result<&SearchResults, SessionError> {
        let engine = match &*self.state.borrow() {
            SessionState::Ready(engine) => engine.clone(),
            SessionState::Loading => return Err(SessionError::NotReady),
            SessionState::Failed(reason) => {
                return Err(SessionError::LoadFailed {
                    reason: reason.clone(),
                });
            }
        };
        Ok(self.run(&engine, query))
    }

    /// Like [`SearchSession::search`], but waits for the load to finish.
    pub async fn search_when_ready(&mut self, query: &str) -> Result<&SearchResults, SessionError> {
        let engine = {
            let state = self
                .state
                .wait_for(|state| !matches!(state, SessionState::Loading))
                .await
                .map_err(|_| SessionError::LoadFailed {
                    reason: "index loader dropped before completing".to_string(),
                })?;
            match &*state {
                SessionState::Ready(engine) => engine.clone(),
                SessionState::Failed(reason) => {
                    return Err(SessionError::LoadFailed {
                        reason: reason.clone(),
                    });
                }
                SessionState::Loading => return Err(SessionError::NotReady),
            }
        };
        Ok(self.run(&engine, query))
    }

    /// Result set of the most recent completed query.
    pub fn last_results(&self) -> Option<&SearchResults> {
        self.last_results.as_ref()
    }

    fn run(&mut self, engine: &QueryEngine, query: &str) -> &SearchResults {
        let mut results = engine.search(query);
        if let Some(limit) = self.max_results {
            results.truncate(limit);
        }
        self.last_results.insert(results)
    }
}

impl IndexLoader {
    /// Complete the load from serialized index JSON.
    pub fn load_json(self, json: &str) -> IndexResult<()> {
        match QueryEngine::load(json) {
            Ok(engine) => {
                info!(
                    "search index ready: {} symbols",
                    engine.index().symbols.len()
                );
                self.state.send_replace(SessionState::Ready(engine));
                Ok(())
            }
            Err(e) => Err(self.fail(e)),
        }
    }

    /// Read the index file asynchronously and complete the load.
    pub async fn load_file(self, path: impl AsRef<Path>) -> IndexResult<()> {
        let path = path.as_ref();
        match tokio::fs::read_to_string(path).await {
            Ok(json) => self.load_json(&json),
            Err(source) => Err(self.fail(IndexError::FileRead {
                path: path.to_path_buf(),
                source,
            })),
        }
    }

    fn fail(self, error: IndexError) -> IndexError {
        warn!("search index failed to load: {error}");
        self.state
            .send_replace(SessionState::Failed(error.to_string()));
        error
    }
}

/// Render a result list as an HTML fragment.
pub fn render_html(results: &SearchResults) -> String {
    match results {
        SearchResults::NoResults { query } => format!(
            "<p class=\"no-results\">No results found for <code>{}</code></p>",
            escape_html(query)
        ),
        SearchResults::Matches { hits, .. } => {
            let mut html = String::from("<ul class=\"search-results\">\n");
            for hit in hits {
                html.push_str(&format!(
                    "<li class=\"{}\"><a href=\"{}\"><code>{}</code></a>",
                    hit.kind,
                    escape_html(&hit.href),
                    escape_html(&hit.rendering_text)
                ));
                if !hit.summary.is_empty() {
                    html.push_str(&format!(
                        " <span class=\"summary\">{}</span>",
                        escape_html(&hit.summary)
                    ));
                }
                html.push_str("</li>\n");
            }
            html.push_str("</ul>");
            html
        }
    }
}
