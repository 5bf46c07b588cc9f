//! Inline cross-reference links: `[fragment@Namespace.Type.name]`.
//!
//! Tokens are parsed into a [`LinkReference`], resolved against the
//! [`SymbolTable`](crate::symbol::SymbolTable) and substituted with an HTML
//! anchor. Failures never abort a pass; they become [`Diagnostic`]s and the
//! token is kept as inline code.

pub mod diagnostic;
pub mod reference;
pub mod render;
pub mod resolver;

pub use diagnostic::{Diagnostic, DiagnosticKind, SourceLocation};
pub use reference::{LinkPath, LinkReference};
pub use render::{LinkOptions, LinkOutcome, ResolvedLink, escape_html};
pub use resolver::{LinkReport, LinkResolver, resolve_links};
