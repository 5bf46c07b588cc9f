//! Parsed form of an inline `[fragment@endpoint]` token.

use crate::error::{ResolveError, ResolveResult};
use crate::types::Fragment;
use std::fmt;

/// One- or two-component symbol path, qualifier already removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkPath {
    /// `Widget`, `init`
    Global(String),
    /// `Widget.show`, `Widget:visible`, `Widget::clicked`
    Member { owner: String, name: String },
}

impl LinkPath {
    pub fn parts(&self) -> (Option<&str>, &str) {
        match self {
            LinkPath::Global(name) => (None, name),
            LinkPath::Member { owner, name } => (Some(owner), name),
        }
    }
}

impl fmt::Display for LinkPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LinkPath::Global(name) => f.write_str(name),
            LinkPath::Member { owner, name } => write!(f, "{owner}.{name}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkReference {
    pub fragment: Fragment,
    pub qualifier: Option<String>,
    pub path: LinkPath,
    /// Anchor without the leading `#`.
    pub anchor: Option<String>,
    /// Alternate label from `[text][fragment@endpoint]`.
    pub text: Option<String>,
}

impl LinkReference {
    /// Parse the pieces of a link token.
    ///
    /// `is_namespace` decides whether a leading path segment is a namespace
    /// qualifier or a type name.
    pub fn parse(
        keyword: &str,
        endpoint: &str,
        is_namespace: impl Fn(&str) -> bool,
    ) -> ResolveResult<Self> {
        let fragment: Fragment = keyword.parse().map_err(|_| ResolveError::UnknownFragment {
            keyword: keyword.to_string(),
        })?;

        let invalid = |reason: &str| ResolveError::InvalidPath {
            fragment,
            endpoint: endpoint.to_string(),
            reason: reason.to_string(),
        };

        // A known namespace prefix is allowed, but C identifiers are always
        // looked up in the context namespace.
        if fragment == Fragment::Id {
            if endpoint.contains(':') {
                return Err(invalid("expected a C identifier"));
            }
            let (qualifier, ident) = match segments(endpoint).as_deref() {
                Some([ident]) => (None, ident.to_string()),
                Some([ns, ident]) if is_namespace(*ns) => (Some(ns.to_string()), ident.to_string()),
                _ => return Err(invalid("expected a C identifier")),
            };
            return Ok(Self::new(fragment, qualifier, LinkPath::Global(ident)));
        }

        if let Some((head, member)) = split_member(fragment, endpoint) {
            if member.is_empty() || member.contains([':', '.']) {
                return Err(invalid("malformed member name"));
            }
            let segments = segments(head).ok_or_else(|| invalid("empty path component"))?;
            let (qualifier, owner) = match segments.as_slice() {
                [owner] => (None, *owner),
                [ns, owner] => (Some(known(ns, &is_namespace)?), *owner),
                _ => return Err(invalid("too many path components")),
            };
            return Ok(Self::new(
                fragment,
                qualifier,
                LinkPath::Member {
                    owner: owner.to_string(),
                    name: canonical_member(fragment, member),
                },
            ));
        }

        if endpoint.contains(':') {
            return Err(invalid("':' separators are only valid for properties and signals"));
        }

        let segments = segments(endpoint).ok_or_else(|| invalid("empty path component"))?;
        let member_paths = allows_member_path(fragment);
        let (qualifier, path) = match segments.as_slice() {
            [name] => (None, LinkPath::Global(name.to_string())),
            [first, name] if is_namespace(*first) => {
                (Some(first.to_string()), LinkPath::Global(name.to_string()))
            }
            [owner, name] if member_paths => (
                None,
                LinkPath::Member {
                    owner: owner.to_string(),
                    name: canonical_member(fragment, name),
                },
            ),
            // Global-only fragments: the first segment can only be a qualifier.
            [ns, _] => {
                return Err(ResolveError::UnknownNamespace {
                    name: ns.to_string(),
                });
            }
            [ns, owner, name] if member_paths => (
                Some(known(ns, &is_namespace)?),
                LinkPath::Member {
                    owner: owner.to_string(),
                    name: canonical_member(fragment, name),
                },
            ),
            _ => return Err(invalid("too many path components")),
        };

        Ok(Self::new(fragment, qualifier, path))
    }

    fn new(fragment: Fragment, qualifier: Option<String>, path: LinkPath) -> Self {
        Self {
            fragment,
            qualifier,
            path,
            anchor: None,
            text: None,
        }
    }

    pub fn with_anchor(mut self, anchor: Option<&str>) -> Self {
        self.anchor = anchor
            .map(|a| a.trim_start_matches('#'))
            .filter(|a| !a.is_empty())
            .map(str::to_string);
        self
    }

    pub fn with_text(mut self, text: Option<&str>) -> Self {
        self.text = text.map(str::trim).filter(|t| !t.is_empty()).map(str::to_string);
        self
    }

    /// `Gtk.Widget.show` style display of qualifier and path.
    pub fn qualified_path(&self) -> String {
        match &self.qualifier {
            Some(ns) => format!("{ns}.{}", self.path),
            None => self.path.to_string(),
        }
    }
}

fn split_member(fragment: Fragment, endpoint: &str) -> Option<(&str, &str)> {
    match fragment {
        Fragment::Signal => endpoint.split_once("::"),
        Fragment::Property => endpoint.split_once(':'),
        _ => None,
    }
}

fn segments(path: &str) -> Option<Vec<&str>> {
    let segments: Vec<&str> = path.split('.').collect();
    segments
        .iter()
        .all(|s| !s.is_empty())
        .then_some(segments)
}

fn known(ns: &str, is_namespace: &impl Fn(&str) -> bool) -> ResolveResult<String> {
    if is_namespace(ns) {
        Ok(ns.to_string())
    } else {
        Err(ResolveError::UnknownNamespace {
            name: ns.to_string(),
        })
    }
}

/// Fragments whose two-segment paths may name `Type.member`.
fn allows_member_path(fragment: Fragment) -> bool {
    fragment.targets_enumeration()
        || fragment
            .candidate_kinds()
            .iter()
            .any(|kind| kind.is_member())
}

/// Property and signal names are stored dash-separated.
fn canonical_member(fragment: Fragment, name: &str) -> String {
    match fragment {
        Fragment::Property | Fragment::Signal => name.replace('_', "-"),
        _ => name.to_string(),
    }
}
