//! Documentation coverage: which symbols of the documented namespace have no
//! documentation at all.

use crate::symbol::SymbolTable;
use crate::types::{SymbolId, SymbolKind};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoverageIssue {
    pub symbol: SymbolId,
    pub kind: SymbolKind,
    /// `Gtk.Widget.show`
    pub qualified_name: String,
}

impl fmt::Display for CoverageIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol '{}' is not documented", self.qualified_name)
    }
}

/// One issue per primary-namespace symbol whose documentation is missing or
/// blank, in declaration order.
pub fn check_documentation(table: &SymbolTable) -> Vec<CoverageIssue> {
    let namespace = table.primary_namespace();
    table
        .symbols_in(table.primary())
        .filter(|(_, symbol)| symbol.doc.as_deref().is_none_or(|doc| doc.trim().is_empty()))
        .map(|(id, symbol)| CoverageIssue {
            symbol: id,
            kind: symbol.kind,
            qualified_name: match &symbol.type_name {
                Some(owner) => format!("{}.{owner}.{}", namespace.name, symbol.name),
                None => format!("{}.{}", namespace.name, symbol.name),
            },
        })
        .collect()
}
