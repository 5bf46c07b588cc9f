//! Index construction and querying over the Gtk fixture.

mod common;

use common::{TestProject, gtk_table};
use gir_xref::search::fuzzy::{SCORE_MAX, has_match};
use gir_xref::search::{ParsedQuery, QueryEngine, SearchIndex, SearchResults, render_html};
use gir_xref::{IndexBuilder, SymbolKind, build_index};
use std::sync::Arc;

#[test]
fn test_index_covers_primary_namespace_only() {
    println!("\n=== TEST: index contents ===");
    let table = gtk_table();
    let index = build_index(&table);

    for doc in &index.symbols {
        println!("  {:>2} {:10} {}", doc.id, doc.kind, doc.rendering_text);
    }

    assert_eq!(index.len(), 10);
    assert!(index.symbols.iter().all(|doc| doc.rendering_text != "GObject"));
    for (position, doc) in index.symbols.iter().enumerate() {
        assert_eq!(doc.id as usize, position);
    }
    assert_eq!(index.meta.ns, "Gtk");
    assert_eq!(index.meta.version, "4.0");
    assert_eq!(index.meta.generator_version, env!("CARGO_PKG_VERSION"));
}

#[test]
fn test_documents_carry_rendering_text_and_href() {
    let table = gtk_table();
    let index = build_index(&table);
    let by_name = |name: &str, kind: SymbolKind| {
        index
            .symbols
            .iter()
            .find(|doc| doc.name == name && doc.kind == kind)
            .unwrap_or_else(|| panic!("{kind} {name} indexed"))
    };

    let clicked = by_name("clicked", SymbolKind::Signal);
    assert_eq!(clicked.rendering_text, "GtkButton::clicked");
    assert_eq!(clicked.href, "signal.Button.clicked.html");
    assert_eq!(clicked.type_name.as_deref(), Some("Button"));

    let visible = by_name("visible", SymbolKind::Property);
    assert_eq!(visible.rendering_text, "GtkWidget:visible");

    let show = by_name("show", SymbolKind::Method);
    assert_eq!(show.rendering_text, "gtk_widget_show");
    assert_eq!(show.summary, "Flags a widget to be displayed. See Widget.hide.");

    let widget = by_name("Widget", SymbolKind::Class);
    assert_eq!(widget.summary, "The base class for all widgets.");

    let snapshot = by_name("snapshot", SymbolKind::Vfunc);
    assert_eq!(snapshot.summary, "");
}

#[test]
fn test_terms_point_at_documents() {
    let table = gtk_table();
    let index = build_index(&table);

    let button = index.term("button").expect("button is a term");
    let ids: Vec<&str> = button
        .iter()
        .map(|id| index.document(*id).unwrap().rendering_text.as_str())
        .collect();
    assert_eq!(ids, vec!["GtkButton", "gtk_button_new", "GtkButton::clicked"]);
    assert!(index.term("Button").is_none());
}

#[test]
fn test_saved_index_loads_back() {
    println!("\n=== TEST: index on disk ===");
    let project = TestProject::new();
    let path = project.path().join("out").join("index.json");

    let table = gtk_table();
    let index = IndexBuilder::new(&table).with_generator("gtk-docs").build();
    index.save(&path).expect("index saved");

    let loaded = SearchIndex::load(&path).expect("index loads");
    assert_eq!(loaded, index);
    assert_eq!(loaded.meta.generator, "gtk-docs");
}

#[test]
fn test_corrupted_index_is_rejected() {
    let err = SearchIndex::from_json("{\"symbols\": [").unwrap_err();
    assert_eq!(err.status_code(), "INDEX_CORRUPTED");
}

fn engine() -> QueryEngine {
    QueryEngine::new(Arc::new(build_index(&gtk_table())))
}

#[test]
fn test_exact_match_ranks_first() {
    let results = engine().search("GtkButton");
    let hits = results.hits();
    println!("\n=== TEST: ranking ===");
    for hit in hits {
        println!("  {:.3} {}", hit.score, hit.rendering_text);
    }

    assert_eq!(hits[0].rendering_text, "GtkButton");
    assert!(hits.windows(2).all(|w| w[0].score >= w[1].score));
}

#[test]
fn test_exact_name_outranks_every_other_hit() {
    let engine = engine();
    for query in ["GtkWidget", "gtk_init", "GtkButton", "gtk_widget_show"] {
        let results = engine.search(query);
        let (first, rest) = results
            .hits()
            .split_first()
            .unwrap_or_else(|| panic!("'{query}' has hits"));

        assert_eq!(first.rendering_text, query);
        assert_eq!(first.score, SCORE_MAX);
        assert!(
            rest.iter().all(|hit| hit.score < first.score),
            "'{query}' ties with its exact match"
        );
    }
}

#[test]
fn test_every_hit_contains_the_query_in_order() {
    println!("\n=== TEST: hits are subsequence matches ===");
    let engine = engine();
    for query in ["widget", "gtk show", "btn", "GTKWIDGETSHOW", "wv", "signal:clicked", "ctor: new"] {
        let term = ParsedQuery::parse(query).term;
        let results = engine.search(query);
        println!("  {query:?} -> {} hits", results.len());

        assert!(!results.hits().is_empty(), "'{query}' has hits");
        for hit in results.hits() {
            assert!(
                has_match(&term, &hit.rendering_text),
                "'{}' does not contain '{term}'",
                hit.rendering_text
            );
        }
    }
}

#[test]
fn test_kind_filter_restricts_results() {
    let engine = engine();

    let results = engine.search("signal:clicked");
    assert_eq!(results.len(), 1);
    assert_eq!(results.hits()[0].kind, SymbolKind::Signal);

    let results = engine.search("ctor: new");
    assert_eq!(results.hits()[0].rendering_text, "gtk_button_new");
    assert!(results.hits().iter().all(|hit| hit.kind == SymbolKind::Ctor));
}

#[test]
fn test_queries_ignore_whitespace_and_case() {
    let engine = engine();
    let spaced = engine.search("gtk widget show");
    let compact = engine.search("GTKWIDGETSHOW");
    assert_eq!(spaced.hits()[0].rendering_text, "gtk_widget_show");
    assert_eq!(compact.hits()[0].rendering_text, "gtk_widget_show");
}

#[test]
fn test_no_results_is_a_value() {
    let results = engine().search("qqqq");
    assert!(matches!(results, SearchResults::NoResults { .. }));
    assert_eq!(
        render_html(&results),
        "<p class=\"no-results\">No results found for <code>qqqq</code></p>"
    );
}

#[test]
fn test_html_lists_hits_in_order() {
    let results = engine().search("signal:clicked");
    let html = render_html(&results);
    assert!(html.starts_with("<ul class=\"search-results\">"));
    assert!(html.contains("href=\"signal.Button.clicked.html\""));
    assert!(html.contains("<code>GtkButton::clicked</code>"));
}
