//! Custom help formatting for consistent CLI display.

use crate::display::theme::Theme;
use console::style;

/// Format help text with consistent styling
pub fn format_help_section(title: &str, content: &str, indent: bool) -> String {
    let mut output = String::new();

    if Theme::should_disable_colors() {
        output.push_str(&format!("{title}\n"));
    } else {
        output.push_str(&format!("{}\n", style(title).cyan().bold()));
    }

    for line in content.lines() {
        if line.trim().is_empty() {
            output.push('\n');
        } else if indent && !line.starts_with("    ") {
            output.push_str(&format!("    {line}\n"));
        } else {
            output.push_str(&format!("{line}\n"));
        }
    }

    output
}

/// Create styled help text for the CLI
pub fn create_help_text() -> String {
    let mut help = String::new();

    let quick_start = r#"$ gir-xref init                          # Write .gir-xref/settings.toml
$ gir-xref index Gtk-4.0.json           # Build index.json
$ gir-xref search index.json button     # Query it"#;

    help.push_str(&format_help_section("QUICK START", quick_start, true));
    help.push('\n');

    let examples = r#"# Resolve [class@Widget] style links in Markdown docs
$ gir-xref links Gtk-4.0.json docs/ --output-dir build/docs

# Only signals
$ gir-xref search index.json "signal:clicked"

# Machine-readable results
$ gir-xref search index.json show --json --limit 5

# List undocumented symbols
$ gir-xref check Gtk-4.0.json"#;

    help.push_str(&format_help_section("EXAMPLES", examples, true));
    help.push('\n');

    let filters = r#"alias callback class const ctor enum error flags func
id iface method property signal struct type union vfunc"#;

    help.push_str(&format_help_section("KIND FILTERS", filters, true));

    help
}
