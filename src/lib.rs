//! Cross-reference resolution and search indexing for introspected
//! C library documentation.

pub mod check;
pub mod config;
pub mod display;
pub mod error;
pub mod io;
pub mod links;
pub mod search;
pub mod symbol;
pub mod types;

// Explicit exports for better API clarity
pub use config::Settings;
pub use error::{
    IndexError, IndexResult, ResolveError, ResolveResult, SessionError, TableError, TableResult,
};
pub use links::{Diagnostic, LinkOptions, LinkReport, LinkResolver, resolve_links};
pub use search::{
    IndexBuilder, QueryEngine, SearchIndex, SearchResults, SearchSession, build_index,
};
pub use symbol::{EnumMember, Namespace, Symbol, SymbolManifest, SymbolTable};
pub use types::{Fragment, NamespaceId, SymbolId, SymbolKind};
