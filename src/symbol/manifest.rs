//! JSON hand-off format between introspection ingestion and the symbol table.

use super::{EnumMember, Namespace, Symbol, SymbolTable};
use crate::error::{IndexError, IndexResult, TableError};
use crate::types::SymbolKind;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SymbolManifest {
    /// Name of the namespace being documented.
    pub primary: String,
    pub namespaces: Vec<NamespaceManifest>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NamespaceManifest {
    pub name: String,
    pub version: String,
    #[serde(default)]
    pub c_prefix: String,
    #[serde(default)]
    pub symbol_prefix: String,
    #[serde(default)]
    pub dependencies: Vec<String>,
    #[serde(default)]
    pub symbols: Vec<SymbolEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SymbolEntry {
    pub kind: SymbolKind,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub c_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub c_identifier: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub struct_for: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub members: Vec<EnumMember>,
}

impl NamespaceManifest {
    fn namespace(&self) -> Namespace {
        Namespace {
            name: self.name.clone(),
            version: self.version.clone(),
            c_prefix: self.c_prefix.clone(),
            symbol_prefix: self.symbol_prefix.clone(),
            dependencies: self.dependencies.clone(),
        }
    }
}

impl SymbolManifest {
    pub fn from_json(json: &str) -> IndexResult<Self> {
        serde_json::from_str(json).map_err(|e| IndexError::Manifest {
            reason: e.to_string(),
        })
    }

    pub fn load(path: &Path) -> IndexResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| IndexError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content)
    }

    /// Build the symbol table: namespaces first, then symbols in declaration
    /// order.
    pub fn into_table(self) -> IndexResult<SymbolTable> {
        let primary = self
            .namespaces
            .iter()
            .find(|ns| ns.name == self.primary)
            .ok_or_else(|| IndexError::Manifest {
                reason: format!("primary namespace '{}' is not declared", self.primary),
            })?;

        let mut table = SymbolTable::new(primary.namespace());
        for ns in self.namespaces.iter().filter(|ns| ns.name != self.primary) {
            table.add_namespace(ns.namespace())?;
        }

        for ns in &self.namespaces {
            for dep in &ns.dependencies {
                if !table.is_known_namespace(dep) {
                    return Err(TableError::UnknownNamespace { name: dep.clone() }.into());
                }
            }
        }

        for ns in self.namespaces {
            // Every manifest namespace was registered above.
            let Some(ns_id) = table.namespace_id(&ns.name) else {
                continue;
            };
            let count = ns.symbols.len();
            for entry in ns.symbols {
                if entry.kind.is_member() && entry.type_name.is_none() {
                    return Err(IndexError::Manifest {
                        reason: format!(
                            "{} '{}' in namespace '{}' has no owning type",
                            entry.kind, entry.name, ns.name
                        ),
                    });
                }
                table.register(entry.into_symbol(ns_id))?;
            }
            debug!("registered {count} symbols from namespace {}", ns.name);
        }

        info!(
            "loaded symbol table for {} ({} symbols)",
            table.primary_namespace().versioned_name(),
            table.len()
        );
        Ok(table)
    }

    /// Inverse of [`SymbolManifest::into_table`].
    pub fn from_table(table: &SymbolTable) -> Self {
        let namespaces = table
            .namespaces()
            .map(|(ns_id, ns)| NamespaceManifest {
                name: ns.name.clone(),
                version: ns.version.clone(),
                c_prefix: ns.c_prefix.clone(),
                symbol_prefix: ns.symbol_prefix.clone(),
                dependencies: ns.dependencies.clone(),
                symbols: table
                    .symbols_in(ns_id)
                    .map(|(_, symbol)| SymbolEntry::from(symbol))
                    .collect(),
            })
            .collect();

        Self {
            primary: table.primary_namespace().name.clone(),
            namespaces,
        }
    }

    pub fn to_json(&self) -> IndexResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| IndexError::Serialization {
            what: "symbol manifest".to_string(),
            reason: e.to_string(),
        })
    }
}

impl SymbolEntry {
    fn into_symbol(self, namespace: crate::types::NamespaceId) -> Symbol {
        Symbol {
            kind: self.kind,
            name: self.name,
            type_name: self.type_name,
            c_type: self.c_type,
            c_identifier: self.c_identifier,
            struct_for: self.struct_for,
            doc: self.doc,
            members: self.members,
            namespace,
        }
    }
}

impl From<&Symbol> for SymbolEntry {
    fn from(symbol: &Symbol) -> Self {
        Self {
            kind: symbol.kind,
            name: symbol.name.clone(),
            type_name: symbol.type_name.clone(),
            c_type: symbol.c_type.clone(),
            c_identifier: symbol.c_identifier.clone(),
            struct_for: symbol.struct_for.clone(),
            doc: symbol.doc.clone(),
            members: symbol.members.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MANIFEST: &str = r#"{
        "primary": "Gtk",
        "namespaces": [
            {
                "name": "Gdk", "version": "4.0",
                "c_prefix": "Gdk", "symbol_prefix": "gdk",
                "symbols": [
                    { "kind": "class", "name": "Display", "c_type": "GdkDisplay" }
                ]
            },
            {
                "name": "Gtk", "version": "4.0",
                "c_prefix": "Gtk", "symbol_prefix": "gtk",
                "dependencies": ["Gdk"],
                "symbols": [
                    { "kind": "class", "name": "Widget", "c_type": "GtkWidget", "doc": "The base class." },
                    { "kind": "method", "name": "show", "type_name": "Widget",
                      "c_identifier": "gtk_widget_show" },
                    { "kind": "enum", "name": "Align", "c_type": "GtkAlign",
                      "members": [ { "name": "FILL", "nick": "fill", "c_identifier": "GTK_ALIGN_FILL" } ] }
                ]
            }
        ]
    }"#;

    #[test]
    fn test_manifest_builds_table_with_primary_first() {
        let table = SymbolManifest::from_json(MANIFEST).unwrap().into_table().unwrap();
        assert_eq!(table.primary_namespace().name, "Gtk");
        assert_eq!(table.len(), 4);
        let gtk_symbols: Vec<_> = table
            .symbols_in(table.primary())
            .map(|(_, s)| s.name.as_str())
            .collect();
        assert_eq!(gtk_symbols, vec!["Widget", "show", "Align"]);
        let (_, align) = table.symbols_in(table.primary()).nth(2).unwrap();
        assert_eq!(align.member("fill").unwrap().name, "FILL");
    }

    #[test]
    fn test_unknown_primary_is_an_error() {
        let mut manifest = SymbolManifest::from_json(MANIFEST).unwrap();
        manifest.primary = "Adw".to_string();
        let err = manifest.into_table().unwrap_err();
        assert_eq!(err.status_code(), "MANIFEST_ERROR");
    }

    #[test]
    fn test_unknown_dependency_is_an_error() {
        let mut manifest = SymbolManifest::from_json(MANIFEST).unwrap();
        manifest.namespaces[1].dependencies.push("Pango".to_string());
        let err = manifest.into_table().unwrap_err();
        assert!(matches!(
            err,
            IndexError::Table(TableError::UnknownNamespace { ref name }) if name == "Pango"
        ));
    }

    #[test]
    fn test_duplicate_symbol_is_fatal() {
        let mut manifest = SymbolManifest::from_json(MANIFEST).unwrap();
        let dup = manifest.namespaces[1].symbols[1].clone();
        manifest.namespaces[1].symbols.push(dup);
        let err = manifest.into_table().unwrap_err();
        assert_eq!(err.status_code(), "DUPLICATE_SYMBOL");
    }

    #[test]
    fn test_member_without_owner_is_rejected() {
        let mut manifest = SymbolManifest::from_json(MANIFEST).unwrap();
        manifest.namespaces[1].symbols[1].type_name = None;
        assert!(manifest.into_table().is_err());
    }

    #[test]
    fn test_from_table_preserves_symbols() {
        let table = SymbolManifest::from_json(MANIFEST).unwrap().into_table().unwrap();
        let json = SymbolManifest::from_table(&table).to_json().unwrap();
        let rebuilt = SymbolManifest::from_json(&json).unwrap().into_table().unwrap();
        assert_eq!(rebuilt.len(), table.len());
        assert_eq!(rebuilt.primary_namespace(), table.primary_namespace());
    }

    #[test]
    fn test_malformed_json() {
        let err = SymbolManifest::from_json("{ \"primary\": ").unwrap_err();
        assert_eq!(err.status_code(), "MANIFEST_ERROR");
    }
}
