//! Tabular views of cards and their plain text rendering.

use std::fmt::Write;

use crate::{card::Card, config::RenderConfig, panel::PanelKind};

/// A row of a table: a field and its value in each column.
#[derive(Clone, Debug, PartialEq)]
pub struct TableRow {
    pub panel: PanelKind,
    pub field: String,
    pub values: Vec<String>,
    pub notes: Vec<String>,
}

/// Footnotes numbered by first appearance, identical notes share a number.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Footnotes {
    notes: Vec<String>,
}

impl Footnotes {
    fn collect(rows: &[TableRow]) -> Self {
        let mut footnotes = Footnotes::default();
        for note in rows.iter().flat_map(|row| &row.notes) {
            if !footnotes.notes.contains(note) {
                footnotes.notes.push(note.clone());
            }
        }
        footnotes
    }

    /// The number of a note, starting at 1.
    pub fn number(&self, note: &str) -> Option<usize> {
        self.notes.iter().position(|n| n == note).map(|i| i + 1)
    }

    /// The notes paired with their numbers, in numbering order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &str)> {
        self.notes
            .iter()
            .enumerate()
            .map(|(i, note)| (i + 1, note.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }
}

/// One or more cards laid out as rows of fields with a value column per card.
///
/// Rows are grouped by panel, in panel display order.
#[derive(Clone, Debug, PartialEq)]
pub struct Table {
    rows: Vec<TableRow>,
    columns: usize,
}

impl Table {
    /// Lays out a single card.
    pub fn from_card(card: &Card) -> Self {
        let rows = card
            .rows()
            .map(|row| TableRow {
                panel: row.panel,
                field: row.field.to_string(),
                values: vec![row.entry.value().to_string()],
                notes: row.entry.notes().to_vec(),
            })
            .collect();

        Self { rows, columns: 1 }
    }

    /// Lays out rows holding `columns` values each.
    pub(crate) fn from_rows(rows: Vec<TableRow>, columns: usize) -> Self {
        debug_assert!(rows.iter().all(|row| row.values.len() == columns));
        Self { rows, columns }
    }

    pub fn rows(&self) -> &[TableRow] {
        &self.rows
    }

    /// The number of value columns.
    pub fn columns(&self) -> usize {
        self.columns
    }

    pub(crate) fn swap_rows(&mut self, a: usize, b: usize) {
        self.rows.swap(a, b);
    }

    pub fn footnotes(&self) -> Footnotes {
        Footnotes::collect(&self.rows)
    }

    /// Renders the table as text: keys right-aligned to a common width, each value column
    /// right-aligned to its own width, followed by the footnotes.
    ///
    /// # Examples
    ///
    /// ```
    /// use netcards::card::Card;
    /// use netcards::config::RenderConfig;
    /// use netcards::edge::Edge;
    /// use netcards::graph::Graph;
    /// use netcards::render::Table;
    ///
    /// let mut graph = Graph::new();
    /// graph.insert(Edge::new(1, 2));
    ///
    /// let card = Card::new(&graph).unwrap();
    /// let text = Table::from_card(&card).render(&RenderConfig::default());
    ///
    /// let nodes = text.lines().find(|line| line.contains("Number of nodes")).unwrap();
    /// assert!(nodes.ends_with(" 2"));
    /// assert!(text.ends_with("^1: Distributions summarized with average [min, max]."));
    /// ```
    pub fn render(&self, config: &RenderConfig) -> String {
        let footnotes = self.footnotes();

        let keys: Vec<String> = self
            .rows
            .iter()
            .map(|row| {
                let mut key = row.field.clone();
                if config.footnotes {
                    for number in row.notes.iter().filter_map(|note| footnotes.number(note)) {
                        let _ = write!(key, "^{number}");
                    }
                }
                key
            })
            .collect();

        let key_width = keys.iter().map(|key| width(key)).max().unwrap_or(0);
        let value_widths: Vec<usize> = (0..self.columns)
            .map(|column| {
                self.rows
                    .iter()
                    .map(|row| width(&row.values[column]))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let mut lines = Vec::with_capacity(self.rows.len());
        let mut previous_panel = None;

        for (row, key) in self.rows.iter().zip(&keys) {
            if config.panel_gap && previous_panel.is_some_and(|panel| panel != row.panel) {
                lines.push(String::new());
            }
            previous_panel = Some(row.panel);

            let mut line = format!("{key:>key_width$}");
            for (value, value_width) in row.values.iter().zip(&value_widths) {
                let _ = write!(line, "{}{value:>value_width$}", config.separator);
            }
            lines.push(line);
        }

        let mut text = lines.join("\n");

        if config.footnotes && !footnotes.is_empty() {
            text.push_str("\n\n");
            let notes: Vec<String> = footnotes
                .iter()
                .map(|(number, note)| format!("^{number}: {note}"))
                .collect();
            text.push_str(&notes.join("\n"));
        }

        text
    }
}

fn width(text: &str) -> usize {
    text.chars().count()
}
