//! Read-only registry of every symbol in a namespace and its dependencies.
//!
//! The table is filled once after ingestion and never mutated afterwards, so
//! it is shared as `Arc<SymbolTable>` between link resolution and index
//! building without any locking.

use super::{Namespace, Symbol};
use crate::error::{ResolveError, ResolveResult, TableError, TableResult};
use crate::links::{LinkPath, LinkReference};
use crate::types::{Fragment, NamespaceId, SymbolId, SymbolKind};
use std::collections::{HashMap, HashSet, VecDeque};
use tracing::debug;

/// Canonical qualified key: (namespace, kind, type_name, name).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct SymbolKey {
    namespace: NamespaceId,
    kind: SymbolKind,
    type_name: Option<String>,
    name: String,
}

impl SymbolKey {
    fn new(namespace: NamespaceId, kind: SymbolKind, type_name: Option<&str>, name: &str) -> Self {
        Self {
            namespace,
            kind,
            type_name: type_name.map(str::to_string),
            name: name.to_string(),
        }
    }

    fn of(symbol: &Symbol) -> Self {
        Self::new(
            symbol.namespace,
            symbol.kind,
            symbol.type_name.as_deref(),
            &symbol.name,
        )
    }
}

#[derive(Debug, Clone)]
pub struct SymbolTable {
    namespaces: Vec<Namespace>,
    namespace_ids: HashMap<String, NamespaceId>,
    primary: NamespaceId,
    symbols: Vec<Symbol>,
    by_key: HashMap<SymbolKey, SymbolId>,
    by_href: HashMap<(NamespaceId, String), SymbolId>,
    by_c_identifier: HashMap<(NamespaceId, String), Vec<SymbolId>>,
}

impl SymbolTable {
    /// Create a table documenting `primary`.
    pub fn new(primary: Namespace) -> Self {
        let mut namespace_ids = HashMap::new();
        namespace_ids.insert(primary.name.clone(), NamespaceId(0));
        Self {
            namespaces: vec![primary],
            namespace_ids,
            primary: NamespaceId(0),
            symbols: Vec::new(),
            by_key: HashMap::new(),
            by_href: HashMap::new(),
            by_c_identifier: HashMap::new(),
        }
    }

    /// Register a dependency namespace.
    pub fn add_namespace(&mut self, namespace: Namespace) -> TableResult<NamespaceId> {
        if self.namespace_ids.contains_key(&namespace.name) {
            return Err(TableError::DuplicateNamespace {
                name: namespace.name,
            });
        }
        let id = NamespaceId(self.namespaces.len() as u32);
        self.namespace_ids.insert(namespace.name.clone(), id);
        self.namespaces.push(namespace);
        Ok(id)
    }

    /// Insert a symbol under its qualified key.
    ///
    /// Fails when the key, or the page the symbol would be rendered to, is
    /// already taken in the same namespace.
    pub fn register(&mut self, symbol: Symbol) -> TableResult<SymbolId> {
        let namespace = self
            .namespaces
            .get(symbol.namespace.index())
            .ok_or_else(|| TableError::UnknownNamespace {
                name: format!("#{}", symbol.namespace.value()),
            })?;

        let key = SymbolKey::of(&symbol);
        let href = symbol.href();
        if self.by_key.contains_key(&key)
            || self.by_href.contains_key(&(symbol.namespace, href.clone()))
        {
            return Err(TableError::DuplicateSymbol {
                namespace: namespace.name.clone(),
                key: format!("{} {}", symbol.kind, symbol.label()),
            });
        }

        let id = SymbolId(self.symbols.len() as u32);
        self.by_key.insert(key, id);
        self.by_href.insert((symbol.namespace, href), id);
        if let Some(ident) = &symbol.c_identifier {
            self.by_c_identifier
                .entry((symbol.namespace, ident.clone()))
                .or_default()
                .push(id);
        }
        self.symbols.push(symbol);
        Ok(id)
    }

    pub fn primary(&self) -> NamespaceId {
        self.primary
    }

    pub fn primary_namespace(&self) -> &Namespace {
        &self.namespaces[self.primary.index()]
    }

    pub fn namespace(&self, id: NamespaceId) -> Option<&Namespace> {
        self.namespaces.get(id.index())
    }

    pub fn namespace_id(&self, name: &str) -> Option<NamespaceId> {
        self.namespace_ids.get(name).copied()
    }

    pub fn is_known_namespace(&self, name: &str) -> bool {
        self.namespace_ids.contains_key(name)
    }

    pub fn namespaces(&self) -> impl Iterator<Item = (NamespaceId, &Namespace)> {
        self.namespaces
            .iter()
            .enumerate()
            .map(|(i, ns)| (NamespaceId(i as u32), ns))
    }

    pub fn get(&self, id: SymbolId) -> Option<&Symbol> {
        self.symbols.get(id.index())
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn symbols(&self) -> impl Iterator<Item = (SymbolId, &Symbol)> {
        self.symbols
            .iter()
            .enumerate()
            .map(|(i, symbol)| (SymbolId(i as u32), symbol))
    }

    /// Symbols declared by `namespace`, in registration order.
    pub fn symbols_in(&self, namespace: NamespaceId) -> impl Iterator<Item = (SymbolId, &Symbol)> {
        self.symbols()
            .filter(move |(_, symbol)| symbol.namespace == namespace)
    }

    /// Exact key lookup.
    pub fn find(
        &self,
        namespace: NamespaceId,
        kind: SymbolKind,
        type_name: Option<&str>,
        name: &str,
    ) -> Option<SymbolId> {
        self.by_key
            .get(&SymbolKey::new(namespace, kind, type_name, name))
            .copied()
    }

    /// Every namespace reachable from `namespace` through dependencies,
    /// breadth first, excluding `namespace` itself.
    pub fn dependency_closure(&self, namespace: NamespaceId) -> Vec<NamespaceId> {
        let mut seen = HashSet::from([namespace]);
        let mut order = Vec::new();
        let mut queue = VecDeque::from([namespace]);

        while let Some(current) = queue.pop_front() {
            let Some(ns) = self.namespace(current) else {
                continue;
            };
            for dep in &ns.dependencies {
                match self.namespace_id(dep) {
                    Some(dep_id) if seen.insert(dep_id) => {
                        order.push(dep_id);
                        queue.push_back(dep_id);
                    }
                    Some(_) => {}
                    None => debug!("namespace {} depends on unregistered {dep}", ns.name),
                }
            }
        }
        order
    }

    /// Whether documentation of `context` may link into `target`.
    pub fn is_visible(&self, context: NamespaceId, target: NamespaceId) -> bool {
        context == target || self.dependency_closure(context).contains(&target)
    }

    /// Resolve a parsed link reference from documentation of `context`.
    pub fn resolve(&self, reference: &LinkReference, context: NamespaceId) -> ResolveResult<SymbolId> {
        if reference.fragment == Fragment::Id {
            return self.resolve_c_identifier(context, &reference.path.to_string());
        }

        let target = self.target_namespace(reference.qualifier.as_deref(), context)?;
        let (owner, name) = reference.path.parts();

        match self.lookup(target, reference.fragment, owner, name) {
            Err(ResolveError::UnknownSymbol { .. }) if self.prefixed_retry_applies(reference) => {
                self.resolve_prefixed(target, reference)
            }
            result => result,
        }
    }

    /// Resolve `[id@c_identifier]`: context namespace only, functions and
    /// methods only.
    pub fn resolve_c_identifier(&self, context: NamespaceId, ident: &str) -> ResolveResult<SymbolId> {
        let matches: Vec<SymbolId> = self
            .by_c_identifier
            .get(&(context, ident.to_string()))
            .map(|ids| {
                ids.iter()
                    .copied()
                    .filter(|id| Fragment::Id.accepts(self.symbols[id.index()].kind))
                    .collect()
            })
            .unwrap_or_default();

        self.unique(Fragment::Id, ident, matches)
    }

    fn target_namespace(&self, qualifier: Option<&str>, context: NamespaceId) -> ResolveResult<NamespaceId> {
        let Some(name) = qualifier else {
            return Ok(context);
        };
        match self.namespace_id(name) {
            Some(id) if self.is_visible(context, id) => Ok(id),
            _ => Err(ResolveError::UnknownNamespace {
                name: name.to_string(),
            }),
        }
    }

    fn lookup(
        &self,
        namespace: NamespaceId,
        fragment: Fragment,
        owner: Option<&str>,
        name: &str,
    ) -> ResolveResult<SymbolId> {
        let matches: Vec<SymbolId> = fragment
            .candidate_kinds()
            .iter()
            .filter_map(|&kind| self.find(namespace, kind, owner, name))
            .collect();

        let path = match owner {
            Some(owner) => format!("{owner}.{name}"),
            None => name.to_string(),
        };
        self.unique(fragment, &path, matches)
    }

    fn unique(&self, fragment: Fragment, path: &str, matches: Vec<SymbolId>) -> ResolveResult<SymbolId> {
        match matches.as_slice() {
            [] => Err(ResolveError::UnknownSymbol {
                fragment,
                path: path.to_string(),
            }),
            [id] => Ok(*id),
            ids => Err(ResolveError::AmbiguousSymbol {
                fragment,
                path: path.to_string(),
                candidates: ids
                    .iter()
                    .map(|id| {
                        let symbol = &self.symbols[id.index()];
                        format!("{} {}", symbol.kind, symbol.label())
                    })
                    .collect(),
            }),
        }
    }

    fn prefixed_retry_applies(&self, reference: &LinkReference) -> bool {
        match reference.path {
            LinkPath::Member { .. } => true,
            LinkPath::Global(_) => reference
                .fragment
                .candidate_kinds()
                .iter()
                .any(|kind| kind.is_type() || *kind == SymbolKind::Callback),
        }
    }

    /// Accept `GtkWidget` in place of `Widget`.
    fn resolve_prefixed(&self, target: NamespaceId, reference: &LinkReference) -> ResolveResult<SymbolId> {
        let namespace = &self.namespaces[target.index()];
        let unknown = || ResolveError::UnknownSymbol {
            fragment: reference.fragment,
            path: reference.path.to_string(),
        };

        match &reference.path {
            LinkPath::Member { owner, name } => {
                let owner = namespace.strip_c_prefix(owner).ok_or_else(unknown)?;
                self.lookup(target, reference.fragment, Some(owner), name)
            }
            LinkPath::Global(name) => {
                let name = namespace.strip_c_prefix(name).ok_or_else(unknown)?;
                self.lookup(target, reference.fragment, None, name)
            }
        }
    }
}
