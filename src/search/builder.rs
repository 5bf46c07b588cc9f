//! Offline construction of the search index from the symbol table.

use super::index::{IndexMeta, SearchDocument, SearchIndex};
use super::tokenize::tokenize;
use crate::links::{LinkOptions, LinkResolver};
use crate::symbol::{Namespace, Symbol, SymbolTable};
use crate::types::SymbolKind;
use rayon::prelude::*;
use regex::Regex;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::LazyLock;
use tracing::{debug, info};

/// Summaries are cut to this many words, the last being `...`.
pub const SUMMARY_WORDS: usize = 20;

static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^<]+?>").expect("Invalid tag regex"));

pub struct IndexBuilder<'a> {
    table: &'a SymbolTable,
    generator: String,
}

impl<'a> IndexBuilder<'a> {
    pub fn new(table: &'a SymbolTable) -> Self {
        Self {
            table,
            generator: env!("CARGO_PKG_NAME").to_string(),
        }
    }

    pub fn with_generator(mut self, generator: impl Into<String>) -> Self {
        self.generator = generator.into();
        self
    }

    /// One document per primary-namespace symbol, in declaration order.
    pub fn build(&self) -> SearchIndex {
        let namespace = self.table.primary_namespace();
        let resolver = LinkResolver::new(self.table).with_options(LinkOptions::summary());

        let symbols: Vec<&Symbol> = self
            .table
            .symbols_in(self.table.primary())
            .map(|(_, symbol)| symbol)
            .collect();

        let documents: Vec<SearchDocument> = symbols
            .par_iter()
            .enumerate()
            .map(|(position, symbol)| SearchDocument {
                id: position as u32,
                kind: symbol.kind,
                name: symbol.name.clone(),
                type_name: symbol.type_name.clone(),
                rendering_text: rendering_text(symbol, namespace),
                summary: symbol
                    .doc
                    .as_deref()
                    .map(|doc| summarize(doc, &resolver, symbol))
                    .unwrap_or_default(),
                href: symbol.href(),
            })
            .collect();

        let mut terms: BTreeMap<String, BTreeSet<u32>> = BTreeMap::new();
        for doc in &documents {
            for token in tokenize(&doc.name)
                .into_iter()
                .chain(tokenize(&doc.rendering_text))
            {
                terms.entry(token).or_default().insert(doc.id);
            }
        }
        debug!("indexed {} terms", terms.len());

        info!(
            "built search index for {} with {} symbols",
            namespace.versioned_name(),
            documents.len()
        );

        SearchIndex {
            symbols: documents,
            terms,
            meta: IndexMeta {
                ns: namespace.name.clone(),
                version: namespace.version.clone(),
                generator: self.generator.clone(),
                generator_version: env!("CARGO_PKG_VERSION").to_string(),
                generated_at: chrono::Utc::now().to_rfc3339(),
            },
        }
    }
}

/// Build the search index for the table's primary namespace.
pub fn build_index(table: &SymbolTable) -> SearchIndex {
    IndexBuilder::new(table).build()
}

/// Canonical display and match string of a symbol.
pub fn rendering_text(symbol: &Symbol, namespace: &Namespace) -> String {
    let owned = |sep: &str| {
        symbol
            .type_name
            .as_ref()
            .map(|owner| format!("{}{owner}{sep}{}", namespace.c_prefix, symbol.name))
    };

    let text = match symbol.kind {
        SymbolKind::Alias
        | SymbolKind::Bitfield
        | SymbolKind::Class
        | SymbolKind::Domain
        | SymbolKind::Enum
        | SymbolKind::Interface
        | SymbolKind::Record
        | SymbolKind::Union => symbol.c_type.clone(),
        SymbolKind::ClassMethod
        | SymbolKind::Constant
        | SymbolKind::Ctor
        | SymbolKind::Function
        | SymbolKind::FunctionMacro
        | SymbolKind::Method
        | SymbolKind::TypeFunc => symbol.c_identifier.clone(),
        SymbolKind::Property => owned(":"),
        SymbolKind::Signal => owned("::"),
        SymbolKind::Vfunc => owned("."),
        SymbolKind::Callback => None,
    };

    text.unwrap_or_else(|| symbol.name.clone())
}

/// First paragraph of `doc` as plain text, at most [`SUMMARY_WORDS`] words.
pub fn summarize(doc: &str, resolver: &LinkResolver<'_>, symbol: &Symbol) -> String {
    let paragraph: Vec<&str> = doc
        .lines()
        .map(str::trim)
        .skip_while(|line| line.is_empty())
        .take_while(|line| !line.is_empty())
        .collect();

    let report = resolver.resolve_links(&paragraph.join(" "), symbol.namespace);
    let plain = TAG_RE.replace_all(&report.text, "");
    let words: Vec<&str> = plain.split_whitespace().collect();

    if words.len() > SUMMARY_WORDS {
        let mut truncated = words[..SUMMARY_WORDS - 1].join(" ");
        truncated.push_str(" ...");
        truncated
    } else {
        words.join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::NamespaceId;

    fn gtk() -> Namespace {
        Namespace::new("Gtk", "4.0").with_prefixes("Gtk", "gtk")
    }

    const NS: NamespaceId = NamespaceId(0);

    #[test]
    fn test_rendering_text_by_kind() {
        let ns = gtk();
        let class = Symbol::new(NS, SymbolKind::Class, "Button").with_c_type("GtkButton");
        assert_eq!(rendering_text(&class, &ns), "GtkButton");

        let method = Symbol::new(NS, SymbolKind::Method, "show")
            .with_type_name("Widget")
            .with_c_identifier("gtk_widget_show");
        assert_eq!(rendering_text(&method, &ns), "gtk_widget_show");

        let property = Symbol::new(NS, SymbolKind::Property, "label").with_type_name("Button");
        assert_eq!(rendering_text(&property, &ns), "GtkButton:label");

        let signal = Symbol::new(NS, SymbolKind::Signal, "clicked").with_type_name("Button");
        assert_eq!(rendering_text(&signal, &ns), "GtkButton::clicked");

        let vfunc = Symbol::new(NS, SymbolKind::Vfunc, "activate").with_type_name("Button");
        assert_eq!(rendering_text(&vfunc, &ns), "GtkButton.activate");

        let callback = Symbol::new(NS, SymbolKind::Callback, "TickCallback");
        assert_eq!(rendering_text(&callback, &ns), "TickCallback");
    }

    #[test]
    fn test_rendering_text_falls_back_to_name() {
        let ns = gtk();
        let record = Symbol::new(NS, SymbolKind::Record, "Border");
        assert_eq!(rendering_text(&record, &ns), "Border");
    }

    #[test]
    fn test_summary_takes_first_paragraph_and_strips_links() {
        let mut table = SymbolTable::new(gtk());
        table
            .register(Symbol::new(NS, SymbolKind::Class, "Widget").with_c_type("GtkWidget"))
            .unwrap();
        let resolver = LinkResolver::new(&table).with_options(LinkOptions::summary());
        let symbol = Symbol::new(NS, SymbolKind::Method, "show").with_type_name("Widget");

        let summary = summarize(
            "\nFlags a [class@Widget] to be\ndisplayed.\n\nSecond paragraph.",
            &resolver,
            &symbol,
        );
        assert_eq!(summary, "Flags a Widget to be displayed.");
    }

    #[test]
    fn test_summary_truncates_long_text() {
        let table = SymbolTable::new(gtk());
        let resolver = LinkResolver::new(&table).with_options(LinkOptions::summary());
        let symbol = Symbol::new(NS, SymbolKind::Function, "init");
        let doc = (1..=30).map(|i| format!("w{i}")).collect::<Vec<_>>().join(" ");

        let summary = summarize(&doc, &resolver, &symbol);
        let words: Vec<&str> = summary.split(' ').collect();
        assert_eq!(words.len(), SUMMARY_WORDS);
        assert_eq!(words.last(), Some(&"..."));
        assert_eq!(words[0], "w1");
    }

    #[test]
    fn test_build_index_covers_primary_namespace_only() {
        let mut table = SymbolTable::new(gtk().with_dependency("Gdk"));
        let gdk = table
            .add_namespace(Namespace::new("Gdk", "4.0").with_prefixes("Gdk", "gdk"))
            .unwrap();
        table
            .register(Symbol::new(NS, SymbolKind::Class, "Widget").with_c_type("GtkWidget"))
            .unwrap();
        table
            .register(Symbol::new(gdk, SymbolKind::Class, "Display").with_c_type("GdkDisplay"))
            .unwrap();
        table
            .register(
                Symbol::new(NS, SymbolKind::Method, "show")
                    .with_type_name("Widget")
                    .with_c_identifier("gtk_widget_show"),
            )
            .unwrap();

        let index = IndexBuilder::new(&table).with_generator("test").build();
        assert_eq!(index.len(), 2);
        assert_eq!(index.symbols[1].href, "method.Widget.show.html");
        assert_eq!(index.meta.generator, "test");
        assert_eq!(index.meta.ns, "Gtk");
        assert!(chrono::DateTime::parse_from_rfc3339(&index.meta.generated_at).is_ok());
        assert_eq!(index.term("widget"), Some(&BTreeSet::from([0, 1])));
        assert_eq!(index.term("show"), Some(&BTreeSet::from([1])));
        assert!(index.term("display").is_none());
        assert!(index.validate().is_ok());
    }
}
