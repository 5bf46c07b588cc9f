//! Table formatting utilities for structured output.

use crate::check::CoverageIssue;
use crate::display::theme::THEME;
use crate::links::Diagnostic;
use crate::search::SearchHit;
use comfy_table::{
    Attribute, Cell, Color, Table, modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL,
};

/// Builder for creating formatted tables.
pub struct TableBuilder {
    table: Table,
}

impl Default for TableBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TableBuilder {
    /// Create a new table builder.
    pub fn new() -> Self {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL);
        table.apply_modifier(UTF8_ROUND_CORNERS);
        Self { table }
    }

    /// Set bold table headers.
    pub fn set_headers(mut self, headers: &[&str]) -> Self {
        let header_cells: Vec<Cell> = headers
            .iter()
            .map(|h| Cell::new(h).add_attribute(Attribute::Bold))
            .collect();
        self.table.set_header(header_cells);
        self
    }

    /// Add a row to the table.
    pub fn add_row(mut self, row: Vec<Cell>) -> Self {
        self.table.add_row(row);
        self
    }

    /// Add one row per item.
    pub fn add_rows<I, F>(self, items: I, row: F) -> Self
    where
        I: IntoIterator,
        F: FnMut(I::Item) -> Vec<Cell>,
    {
        items.into_iter().map(row).fold(self, Self::add_row)
    }

    /// Build and return the formatted table.
    pub fn build(self) -> String {
        self.table.to_string()
    }
}

/// Ranked search results.
pub fn create_search_table(hits: &[SearchHit]) -> String {
    TableBuilder::new()
        .set_headers(&["#", "Symbol", "Kind", "Page", "Summary"])
        .add_rows(hits.iter().enumerate(), |(rank, hit)| {
            vec![
                Cell::new(rank + 1),
                Cell::new(&hit.rendering_text).fg(Color::Yellow),
                Cell::new(THEME.kind(hit.kind)),
                Cell::new(&hit.href),
                Cell::new(&hit.summary),
            ]
        })
        .build()
}

/// Unresolved links of one document.
pub fn create_diagnostics_table(file: &str, diagnostics: &[Diagnostic]) -> String {
    TableBuilder::new()
        .set_headers(&["Location", "Link", "Reason"])
        .add_rows(diagnostics, |diagnostic| {
            vec![
                Cell::new(format!("{file}:{}", diagnostic.location)),
                Cell::new(&diagnostic.text).fg(Color::Yellow),
                Cell::new(diagnostic.reason.to_string()).fg(Color::Red),
            ]
        })
        .build()
}

/// Undocumented symbols.
pub fn create_coverage_table(issues: &[CoverageIssue]) -> String {
    TableBuilder::new()
        .set_headers(&["Symbol", "Kind"])
        .add_rows(issues, |issue| {
            vec![
                Cell::new(&issue.qualified_name),
                Cell::new(THEME.kind(issue.kind)),
            ]
        })
        .add_row(vec![
            Cell::new("TOTAL").add_attribute(Attribute::Bold),
            Cell::new(issues.len()).add_attribute(Attribute::Bold),
        ])
        .build()
}
