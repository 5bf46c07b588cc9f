//! Offline search index and the fuzzy query engine that reads it.

pub mod builder;
pub mod fuzzy;
pub mod index;
pub mod query;
pub mod session;
pub mod tokenize;

pub use builder::{IndexBuilder, build_index, rendering_text};
pub use index::{IndexMeta, SearchDocument, SearchIndex};
pub use query::{ParsedQuery, QueryEngine, SearchHit, SearchResults};
pub use session::{IndexLoader, SearchSession, render_html};
pub use tokenize::tokenize;
