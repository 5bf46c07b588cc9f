//! HTML substitution for link outcomes.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Rendering switches for the link parser.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkOptions {
    /// Render bare labels without anchors (one-line summaries).
    #[serde(default)]
    pub summary: bool,
    /// Base URL of each dependency namespace's documentation.
    #[serde(default)]
    pub dependency_urls: HashMap<String, String>,
}

impl LinkOptions {
    pub fn summary() -> Self {
        Self {
            summary: true,
            ..Self::default()
        }
    }
}

/// A reference that resolved to a documented symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLink {
    /// Namespace the target symbol belongs to.
    pub namespace: String,
    /// Page name plus optional `#anchor`.
    pub href: String,
    /// Code-styled label, e.g. `Widget.show`.
    pub label: String,
    /// Alternate text given by the author; replaces the label verbatim.
    pub text: Option<String>,
    /// The target lives in a dependency namespace.
    pub external: bool,
}

/// What a single link token turns into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkOutcome {
    Linked(ResolvedLink),
    /// Unknown qualifier: keep the alt text, or the path, as an unlinked title.
    Unlinked { title: String },
    /// Resolution failed: keep the literal token.
    Unresolved,
}

impl LinkOutcome {
    /// Substitution text for the token `literal`.
    pub fn render(&self, literal: &str, options: &LinkOptions) -> String {
        match self {
            LinkOutcome::Linked(link) => render_link(link, options),
            LinkOutcome::Unlinked { title } => format!("<code>{}</code>", escape_html(title)),
            LinkOutcome::Unresolved => format!("<code>{}</code>", escape_html(literal)),
        }
    }
}

fn render_link(link: &ResolvedLink, options: &LinkOptions) -> String {
    let label = match &link.text {
        Some(text) => escape_html(text),
        None => format!("<code>{}</code>", escape_html(&link.label)),
    };
    if options.summary {
        return label;
    }
    if !link.external {
        return format!("<a href=\"{}\">{label}</a>", link.href);
    }
    match options.dependency_urls.get(&link.namespace) {
        Some(base) => format!(
            "<a href=\"{}/{}\">{label}</a>",
            base.trim_end_matches('/'),
            link.href
        ),
        None => format!(
            "<a href=\"javascript:void(0)\" data-namespace=\"{}\" data-link=\"{}\" class=\"external\">{label}</a>",
            link.namespace, link.href
        ),
    }
}

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
