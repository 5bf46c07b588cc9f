//! End-to-end link substitution over the Gtk fixture.

mod common;

use common::{TestProject, gobject, gtk_table};
use gir_xref::error::ResolveError;
use gir_xref::{LinkOptions, LinkResolver, resolve_links};
use std::collections::HashMap;

#[test]
fn test_internal_links_in_prose() {
    println!("\n=== TEST: internal links ===");
    let table = gtk_table();
    let (html, diagnostics) = resolve_links(
        &table,
        "Call [method@Gtk.Widget.show] on a [class@Widget] after [func@init].",
        table.primary(),
    );
    println!("{html}");

    assert!(diagnostics.is_empty());
    assert_eq!(
        html,
        "Call <a href=\"method.Widget.show.html\"><code>Widget.show</code></a> on a \
         <a href=\"class.Widget.html\"><code>Widget</code></a> after \
         <a href=\"func.init.html\"><code>init</code></a>."
    );
}

#[test]
fn test_members_use_their_own_separators() {
    let table = gtk_table();
    let (html, diagnostics) = resolve_links(
        &table,
        "[signal@Button::clicked] [property@Widget:visible] [vfunc@Widget.snapshot] [ctor@Button.new]",
        table.primary(),
    );

    assert!(diagnostics.is_empty(), "{diagnostics:?}");
    assert!(html.contains("<a href=\"signal.Button.clicked.html\"><code>Button::clicked</code></a>"));
    assert!(html.contains("<a href=\"property.Widget.visible.html\"><code>Widget:visible</code></a>"));
    assert!(html.contains("<a href=\"vfunc.Widget.snapshot.html\">"));
    assert!(html.contains("<a href=\"ctor.Button.new.html\">"));
}

#[test]
fn test_c_type_names_are_accepted() {
    let table = gtk_table();
    let (html, diagnostics) = resolve_links(&table, "[class@GtkButton]", table.primary());
    assert!(diagnostics.is_empty());
    assert_eq!(html, "<a href=\"class.Button.html\"><code>Button</code></a>");
}

#[test]
fn test_dependency_links_without_base_url() {
    println!("\n=== TEST: external link placeholders ===");
    let table = gtk_table();
    let (html, diagnostics) = resolve_links(&table, "[class@GObject.Object]", table.primary());
    println!("{html}");

    assert!(diagnostics.is_empty());
    assert_eq!(
        html,
        "<a href=\"javascript:void(0)\" data-namespace=\"GObject\" data-link=\"class.Object.html\" \
         class=\"external\"><code>Object</code></a>"
    );
}

#[test]
fn test_dependency_links_with_base_url() {
    let table = gtk_table();
    let options = LinkOptions {
        summary: false,
        dependency_urls: HashMap::from([(
            "GObject".to_string(),
            "https://docs.gtk.org/gobject/".to_string(),
        )]),
    };
    let report = LinkResolver::new(&table)
        .with_options(options)
        .resolve_links("[flags@GObject.BindingFlags.SYNC_CREATE]", table.primary());

    assert!(!report.has_diagnostics());
    assert_eq!(
        report.text,
        "<a href=\"https://docs.gtk.org/gobject/flags.BindingFlags.html#sync-create\">\
         <code>G_BINDING_SYNC_CREATE</code></a>"
    );
}

#[test]
fn test_enumeration_members_link_to_the_enum_page() {
    let table = gtk_table();
    let (html, diagnostics) =
        resolve_links(&table, "Use [enum@Orientation.VERTICAL].", table.primary());

    assert!(diagnostics.is_empty());
    assert_eq!(
        html,
        "Use <a href=\"enum.Orientation.html#vertical\"><code>GTK_ORIENTATION_VERTICAL</code></a>."
    );
}

#[test]
fn test_unresolved_links_keep_their_text() {
    println!("\n=== TEST: unresolved links ===");
    let table = gtk_table();
    let text = "First line\nthen [class@Nope] and [method@Widget.explode].";
    let (html, diagnostics) = resolve_links(&table, text, table.primary());
    for diagnostic in &diagnostics {
        println!("  {diagnostic}");
    }

    assert_eq!(
        html,
        "First line\nthen <code>[class@Nope]</code> and <code>[method@Widget.explode]</code>."
    );
    assert_eq!(diagnostics.len(), 2);
    assert_eq!(diagnostics[0].location.line, 2);
    assert_eq!(diagnostics[0].location.column, 6);
    assert_eq!(&text[diagnostics[0].location.span.clone()], "[class@Nope]");
    assert!(matches!(
        diagnostics[1].reason,
        ResolveError::UnknownSymbol { .. }
    ));
}

#[test]
fn test_unknown_namespace_keeps_the_path() {
    let table = gtk_table();
    let (html, diagnostics) = resolve_links(&table, "[class@Adw.Window]", table.primary());

    assert_eq!(html, "<code>Adw.Window</code>");
    assert_eq!(diagnostics.len(), 1);
    assert!(matches!(
        diagnostics[0].reason,
        ResolveError::UnknownNamespace { .. }
    ));
}

#[test]
fn test_unknown_namespace_keeps_the_alt_text() {
    let table = gtk_table();
    let (html, diagnostics) = resolve_links(
        &table,
        "See the [Adwaita window][class@Adw.Window].",
        table.primary(),
    );

    assert_eq!(html, "See the <code>Adwaita window</code>.");
    assert_eq!(diagnostics.len(), 1);
    assert!(matches!(
        diagnostics[0].reason,
        ResolveError::UnknownNamespace { .. }
    ));
}

#[test]
fn test_qualified_id_links_resolve_in_context() {
    println!("\n=== TEST: namespace-qualified C identifiers ===");
    let table = gtk_table();
    let (html, diagnostics) = resolve_links(
        &table,
        "[id@Gtk.gtk_widget_show] and [id@gtk_widget_show]",
        table.primary(),
    );
    println!("{html}");

    assert!(diagnostics.is_empty(), "{diagnostics:?}");
    assert_eq!(
        html,
        "<a href=\"method.Widget.show.html\"><code>Widget.show</code></a> and \
         <a href=\"method.Widget.show.html\"><code>Widget.show</code></a>"
    );

    let (html, diagnostics) = resolve_links(&table, "[id@Gtk.gtk.widget_show]", table.primary());
    assert_eq!(html, "<code>[id@Gtk.gtk.widget_show]</code>");
    assert!(matches!(
        diagnostics[0].reason,
        ResolveError::InvalidPath { .. }
    ));
}

#[test]
fn test_dependencies_do_not_see_their_dependents() {
    let table = gtk_table();
    let (html, diagnostics) = resolve_links(&table, "[class@Gtk.Widget]", gobject(&table));

    assert_eq!(html, "<code>Gtk.Widget</code>");
    assert_eq!(diagnostics.len(), 1);
}

#[test]
fn test_code_fences_are_left_alone() {
    let table = gtk_table();
    let text = "```c\n// see [class@Widget]\n```\n[class@Widget]";
    let (html, diagnostics) = resolve_links(&table, text, table.primary());

    assert!(diagnostics.is_empty());
    assert!(html.starts_with("```c\n// see [class@Widget]\n```\n"));
    assert!(html.ends_with("<a href=\"class.Widget.html\"><code>Widget</code></a>"));
}

#[test]
fn test_batch_resolution_of_files_on_disk() {
    println!("\n=== TEST: documents from disk ===");
    let project = TestProject::new();
    project.add_file("widget.md", "# Widget\n\nSee [class@Widget].\n");
    project.add_file("button.md", "# Button\n\nSee [class@Missing].\n");

    let mut paths: Vec<_> = std::fs::read_dir(project.path())
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .collect();
    paths.sort();
    let documents: Vec<String> = paths
        .iter()
        .map(|path| std::fs::read_to_string(path).unwrap())
        .collect();

    let table = gtk_table();
    let reports = LinkResolver::new(&table).resolve_documents(&documents, table.primary());

    assert_eq!(reports.len(), 2);
    // button.md sorts first
    assert_eq!(reports[0].diagnostics.len(), 1);
    assert_eq!(reports[0].diagnostics[0].location.line, 3);
    assert!(reports[1].text.contains("<a href=\"class.Widget.html\">"));
    assert!(!reports[1].has_diagnostics());
}
