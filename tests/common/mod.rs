#![allow(dead_code)]

use gir_xref::{NamespaceId, SymbolManifest, SymbolTable};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Gtk-4.0 documented against its GObject-2.0 dependency.
pub const GTK_MANIFEST: &str = r#"{
  "primary": "Gtk",
  "namespaces": [
    {
      "name": "Gtk",
      "version": "4.0",
      "c_prefix": "Gtk",
      "symbol_prefix": "gtk",
      "dependencies": ["GObject"],
      "symbols": [
        { "kind": "class", "name": "Widget", "c_type": "GtkWidget",
          "doc": "The base class for all widgets.\n\nIt manages the widget lifecycle, layout, states and style." },
        { "kind": "method", "name": "show", "type_name": "Widget", "c_identifier": "gtk_widget_show",
          "doc": "Flags a widget to be displayed. See [method@Gtk.Widget.hide]." },
        { "kind": "method", "name": "hide", "type_name": "Widget", "c_identifier": "gtk_widget_hide",
          "doc": "Reverses the effects of [method@Widget.show]." },
        { "kind": "property", "name": "visible", "type_name": "Widget",
          "doc": "Whether the widget is visible." },
        { "kind": "vfunc", "name": "snapshot", "type_name": "Widget" },
        { "kind": "class", "name": "Button", "c_type": "GtkButton",
          "doc": "Calls a callback function when the button is clicked." },
        { "kind": "ctor", "name": "new", "type_name": "Button", "c_identifier": "gtk_button_new",
          "doc": "Creates a new `GtkButton` widget." },
        { "kind": "signal", "name": "clicked", "type_name": "Button",
          "doc": "Emitted when the button has been activated (pressed and released)." },
        { "kind": "enum", "name": "Orientation", "c_type": "GtkOrientation",
          "doc": "Represents the orientation of widgets.",
          "members": [
            { "name": "HORIZONTAL", "nick": "horizontal", "c_identifier": "GTK_ORIENTATION_HORIZONTAL" },
            { "name": "VERTICAL", "nick": "vertical", "c_identifier": "GTK_ORIENTATION_VERTICAL" }
          ] },
        { "kind": "function", "name": "init", "c_identifier": "gtk_init",
          "doc": "Call this function before using any other GTK functions in your GUI applications." }
      ]
    },
    {
      "name": "GObject",
      "version": "2.0",
      "c_prefix": "G",
      "symbol_prefix": "g",
      "symbols": [
        { "kind": "class", "name": "Object", "c_type": "GObject", "doc": "The base object type." },
        { "kind": "bitfield", "name": "BindingFlags", "c_type": "GBindingFlags",
          "members": [
            { "name": "DEFAULT", "nick": "default", "c_identifier": "G_BINDING_DEFAULT" },
            { "name": "SYNC_CREATE", "nick": "sync-create", "c_identifier": "G_BINDING_SYNC_CREATE" }
          ] }
      ]
    }
  ]
}"#;

/// Symbol table built from [`GTK_MANIFEST`].
pub fn gtk_table() -> SymbolTable {
    SymbolManifest::from_json(GTK_MANIFEST)
        .expect("fixture manifest parses")
        .into_table()
        .expect("fixture manifest is consistent")
}

pub fn gobject(table: &SymbolTable) -> NamespaceId {
    table.namespace_id("GObject").expect("GObject is declared")
}

pub struct TestProject {
    pub dir: TempDir,
}

impl TestProject {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    pub fn add_file(&self, path: &str, content: &str) -> PathBuf {
        let file_path = self.dir.path().join(path);
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent dirs");
        }
        fs::write(&file_path, content).expect("Failed to write file");
        file_path
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }
}
