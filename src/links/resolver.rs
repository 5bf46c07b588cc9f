//! Scans documentation text for link tokens and substitutes hyperlinks.

use super::diagnostic::{Diagnostic, DiagnosticKind, SourceLocation};
use super::reference::{LinkPath, LinkReference};
use super::render::{LinkOptions, LinkOutcome, ResolvedLink};
use crate::error::{ResolveError, ResolveResult};
use crate::symbol::{EnumMember, Symbol, SymbolTable};
use crate::types::NamespaceId;
use rayon::prelude::*;
use regex::{Captures, Regex};
use std::ops::Range;
use std::sync::LazyLock;
use tracing::{debug, warn};

/// `` `?[alt text]?[`?fragment@endpoint#anchor?`?]`? ``
static LINK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?P<open>`)?(?:\[(?P<text>[\w\s,\-:]+)\])?\[`?(?P<fragment>\w+)@(?P<endpoint>[\w\-.:]+)(?P<anchor>#[\w\-]+)?`?\](?P<close>`)?",
    )
    .expect("Invalid link regex")
});

/// Spans already rendered as code or links are left alone.
static PROTECTED_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<code>.*?</code>|<a\s[^>]*>.*?</a>").expect("Invalid protected span regex")
});

/// Output of one `resolve_links` pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkReport {
    pub text: String,
    pub diagnostics: Vec<Diagnostic>,
}

impl LinkReport {
    pub fn has_diagnostics(&self) -> bool {
        !self.diagnostics.is_empty()
    }
}

pub struct LinkResolver<'a> {
    table: &'a SymbolTable,
    options: LinkOptions,
}

impl<'a> LinkResolver<'a> {
    pub fn new(table: &'a SymbolTable) -> Self {
        Self {
            table,
            options: LinkOptions::default(),
        }
    }

    pub fn with_options(mut self, options: LinkOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &LinkOptions {
        &self.options
    }

    /// Parse token pieces, using the table to recognise namespace qualifiers.
    pub fn parse_reference(
        &self,
        keyword: &str,
        endpoint: &str,
        anchor: Option<&str>,
        text: Option<&str>,
    ) -> ResolveResult<LinkReference> {
        Ok(
            LinkReference::parse(keyword, endpoint, |ns| self.table.is_known_namespace(ns))?
                .with_anchor(anchor)
                .with_text(text),
        )
    }

    /// Resolve a parsed reference to its hyperlink.
    pub fn resolve_reference(
        &self,
        reference: &LinkReference,
        context: NamespaceId,
    ) -> ResolveResult<ResolvedLink> {
        let (symbol, member) = match self.table.resolve(reference, context) {
            Ok(id) => match self.table.get(id) {
                Some(symbol) => (symbol, None),
                None => return Err(unknown(reference)),
            },
            Err(err @ ResolveError::UnknownSymbol { .. }) => {
                match self.enumeration_member(reference, context) {
                    Some((symbol, member)) => (symbol, Some(member)),
                    None => return Err(err),
                }
            }
            Err(err) => return Err(err),
        };

        let mut href = symbol.href();
        let label = match member {
            Some(member) => {
                if reference.anchor.is_none() {
                    href.push('#');
                    href.push_str(&member.nick);
                }
                member
                    .c_identifier
                    .clone()
                    .unwrap_or_else(|| format!("{}.{}", symbol.name, member.name))
            }
            None => symbol.label(),
        };
        if let Some(anchor) = &reference.anchor {
            href.push('#');
            href.push_str(anchor);
        }

        Ok(ResolvedLink {
            namespace: self
                .table
                .namespace(symbol.namespace)
                .map(|ns| ns.name.clone())
                .unwrap_or_default(),
            href,
            label,
            text: reference.text.clone(),
            external: symbol.namespace != context,
        })
    }

    /// `[flags@BindingFlags.SYNC_CREATE]`: the owner is an enumeration and the
    /// name one of its members.
    fn enumeration_member(
        &self,
        reference: &LinkReference,
        context: NamespaceId,
    ) -> Option<(&'a Symbol, &'a EnumMember)> {
        if !reference.fragment.targets_enumeration() {
            return None;
        }
        let LinkPath::Member { owner, name } = &reference.path else {
            return None;
        };
        let owner_reference = LinkReference {
            path: LinkPath::Global(owner.clone()),
            anchor: None,
            text: None,
            ..reference.clone()
        };
        let id = self.table.resolve(&owner_reference, context).ok()?;
        let symbol = self.table.get(id)?;
        if !symbol.kind.has_members() {
            return None;
        }
        symbol.member(name).map(|member| (symbol, member))
    }

    /// Classify a single token. The error is returned alongside fallbacks so
    /// callers can report it.
    pub fn outcome(
        &self,
        keyword: &str,
        endpoint: &str,
        anchor: Option<&str>,
        text: Option<&str>,
        context: NamespaceId,
    ) -> (LinkOutcome, Option<ResolveError>) {
        let resolved = self
            .parse_reference(keyword, endpoint, anchor, text)
            .and_then(|reference| self.resolve_reference(&reference, context));

        match resolved {
            Ok(link) => (LinkOutcome::Linked(link), None),
            Err(err @ ResolveError::UnknownNamespace { .. }) => {
                let title = text
                    .map(str::trim)
                    .filter(|t| !t.is_empty())
                    .unwrap_or(endpoint);
                (
                    LinkOutcome::Unlinked {
                        title: title.to_string(),
                    },
                    Some(err),
                )
            }
            Err(err) => (LinkOutcome::Unresolved, Some(err)),
        }
    }

    /// Replace every link token in `text`, collecting diagnostics for the
    /// ones that do not resolve.
    pub fn resolve_links(&self, text: &str, context: NamespaceId) -> LinkReport {
        let mut output = String::with_capacity(text.len());
        let mut diagnostics = Vec::new();
        let mut in_fence = false;
        let mut offset = 0;

        for (index, line) in text.split('\n').enumerate() {
            if index > 0 {
                output.push('\n');
            }
            if line.trim_start().starts_with("```") {
                in_fence = !in_fence;
                output.push_str(line);
            } else if in_fence {
                output.push_str(line);
            } else {
                self.resolve_line(line, index + 1, offset, context, &mut output, &mut diagnostics);
            }
            offset += line.len() + 1;
        }

        LinkReport {
            text: output,
            diagnostics,
        }
    }

    fn resolve_line(
        &self,
        line: &str,
        line_number: usize,
        offset: usize,
        context: NamespaceId,
        output: &mut String,
        diagnostics: &mut Vec<Diagnostic>,
    ) {
        let protected: Vec<Range<usize>> = PROTECTED_RE.find_iter(line).map(|m| m.range()).collect();
        let mut cursor = 0;

        for caps in LINK_RE.captures_iter(line) {
            let Some(span) = token_span(&caps) else {
                continue;
            };
            if protected
                .iter()
                .any(|r| span.start < r.end && r.start < span.end)
            {
                continue;
            }

            let literal = line[span.clone()].replace('`', "");
            let (outcome, error) = self.outcome(
                &caps["fragment"],
                &caps["endpoint"],
                caps.name("anchor").map(|m| m.as_str()),
                caps.name("text").map(|m| m.as_str()),
                context,
            );

            if let Some(reason) = error {
                let column = line[..span.start].chars().count() + 1;
                if self.options.summary {
                    debug!("{line_number}:{column}: {reason} in '{literal}'");
                } else {
                    warn!("{line_number}:{column}: {reason} in '{literal}'");
                }
                diagnostics.push(Diagnostic {
                    kind: DiagnosticKind::UnresolvedLink,
                    text: literal.clone(),
                    location: SourceLocation {
                        line: line_number,
                        column,
                        span: offset + span.start..offset + span.end,
                    },
                    reason,
                });
            }

            output.push_str(&line[cursor..span.start]);
            output.push_str(&outcome.render(&literal, &self.options));
            cursor = span.end;
        }
        output.push_str(&line[cursor..]);
    }

    /// Resolve many documents in parallel against the shared table.
    pub fn resolve_documents<D>(&self, documents: &[D], context: NamespaceId) -> Vec<LinkReport>
    where
        D: AsRef<str> + Sync,
    {
        documents
            .par_iter()
            .map(|doc| self.resolve_links(doc.as_ref(), context))
            .collect()
    }
}

/// Token range; an outer backtick belongs to the token only when paired.
fn token_span(caps: &Captures<'_>) -> Option<Range<usize>> {
    let whole = caps.get(0)?;
    let (mut start, mut end) = (whole.start(), whole.end());
    match (caps.name("open").is_some(), caps.name("close").is_some()) {
        (true, false) => start += 1,
        (false, true) => end -= 1,
        _ => {}
    }
    Some(start..end)
}

fn unknown(reference: &LinkReference) -> ResolveError {
    ResolveError::UnknownSymbol {
        fragment: reference.fragment,
        path: reference.path.to_string(),
    }
}

/// Resolve links in `text` with default options.
pub fn resolve_links(
    table: &SymbolTable,
    text: &str,
    context: NamespaceId,
) -> (String, Vec<Diagnostic>) {
    let report = LinkResolver::new(table).resolve_links(text, context);
    (report.text, report.diagnostics)
}
