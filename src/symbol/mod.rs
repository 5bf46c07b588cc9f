//! Namespaces and the symbols they declare.

pub mod manifest;
pub mod table;

pub use manifest::{NamespaceManifest, SymbolEntry, SymbolManifest};
pub use table::SymbolTable;

use crate::types::{NamespaceId, SymbolKind};
use serde::{Deserialize, Serialize};

/// A named, versioned collection of introspected symbols.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Namespace {
    pub name: String,
    pub version: String,
    /// Prefix of C type names, e.g. `Gtk` in `GtkWidget`.
    #[serde(default)]
    pub c_prefix: String,
    /// Prefix of C function names, e.g. `gtk` in `gtk_widget_show`.
    #[serde(default)]
    pub symbol_prefix: String,
    /// Names of the namespaces this one includes, in declaration order.
    #[serde(default)]
    pub dependencies: Vec<String>,
}

impl Namespace {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            c_prefix: String::new(),
            symbol_prefix: String::new(),
            dependencies: Vec::new(),
        }
    }

    pub fn with_prefixes(mut self, c_prefix: impl Into<String>, symbol_prefix: impl Into<String>) -> Self {
        self.c_prefix = c_prefix.into();
        self.symbol_prefix = symbol_prefix.into();
        self
    }

    pub fn with_dependency(mut self, name: impl Into<String>) -> Self {
        self.dependencies.push(name.into());
        self
    }

    /// `Gtk-4.0`
    pub fn versioned_name(&self) -> String {
        format!("{}-{}", self.name, self.version)
    }

    /// Strip the C type prefix from `ident` (`GtkWidget` -> `Widget`).
    ///
    /// Only applies when what remains still starts like a type name.
    pub fn strip_c_prefix<'a>(&self, ident: &'a str) -> Option<&'a str> {
        if self.c_prefix.is_empty() {
            return None;
        }
        let rest = ident.strip_prefix(self.c_prefix.as_str())?;
        rest.chars()
            .next()
            .filter(|c| c.is_ascii_uppercase())
            .map(|_| rest)
    }
}

/// One value of an enumeration, bitfield or error domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumMember {
    pub name: String,
    pub nick: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub c_identifier: Option<String>,
}

impl EnumMember {
    pub fn new(name: impl Into<String>, nick: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            nick: nick.into(),
            c_identifier: None,
        }
    }

    pub fn with_c_identifier(mut self, ident: impl Into<String>) -> Self {
        self.c_identifier = Some(ident.into());
        self
    }

    /// `SYNC_CREATE`, `sync-create` and `sync_create` all name the same member.
    pub fn matches(&self, name: &str) -> bool {
        let wanted = name.replace('-', "_");
        self.name.eq_ignore_ascii_case(&wanted) || self.nick.eq_ignore_ascii_case(name)
    }
}

/// A documented symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    pub kind: SymbolKind,
    pub name: String,
    /// Owning type for member kinds.
    pub type_name: Option<String>,
    /// C type name, for type kinds.
    pub c_type: Option<String>,
    /// C function or constant identifier, for callable kinds.
    pub c_identifier: Option<String>,
    /// For class methods: the instance type the class struct belongs to.
    pub struct_for: Option<String>,
    pub doc: Option<String>,
    pub members: Vec<EnumMember>,
    pub namespace: NamespaceId,
}

impl Symbol {
    pub fn new(namespace: NamespaceId, kind: SymbolKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            type_name: None,
            c_type: None,
            c_identifier: None,
            struct_for: None,
            doc: None,
            members: Vec::new(),
            namespace,
        }
    }

    pub fn with_type_name(mut self, type_name: impl Into<String>) -> Self {
        self.type_name = Some(type_name.into());
        self
    }

    pub fn with_c_type(mut self, c_type: impl Into<String>) -> Self {
        self.c_type = Some(c_type.into());
        self
    }

    pub fn with_c_identifier(mut self, ident: impl Into<String>) -> Self {
        self.c_identifier = Some(ident.into());
        self
    }

    pub fn with_struct_for(mut self, owner: impl Into<String>) -> Self {
        self.struct_for = Some(owner.into());
        self
    }

    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    pub fn with_members(mut self, members: Vec<EnumMember>) -> Self {
        self.members = members;
        self
    }

    pub fn is_global(&self) -> bool {
        self.type_name.is_none()
    }

    /// The C spelling: type name for types, identifier for callables.
    pub fn c_name(&self) -> Option<&str> {
        self.c_type.as_deref().or(self.c_identifier.as_deref())
    }

    /// `Widget.show`, `Widget::clicked`, `Widget:visible` or plain `Widget`.
    pub fn label(&self) -> String {
        match &self.type_name {
            Some(owner) => format!("{owner}{}{}", self.kind.member_separator(), self.name),
            None => self.name.clone(),
        }
    }

    /// Page name of this symbol: `{kind-prefix}.{path}.html`.
    pub fn href(&self) -> String {
        let owner = match self.kind {
            SymbolKind::ClassMethod => self.struct_for.as_ref().or(self.type_name.as_ref()),
            _ => self.type_name.as_ref(),
        };
        match owner {
            Some(owner) => format!("{}.{owner}.{}.html", self.kind.href_prefix(), self.name),
            None => format!("{}.{}.html", self.kind.href_prefix(), self.name),
        }
    }

    /// Find an enumeration member by name or nick.
    pub fn member(&self, name: &str) -> Option<&EnumMember> {
        self.members.iter().find(|member| member.matches(name))
    }
}
