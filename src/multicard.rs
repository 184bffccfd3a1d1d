//! Several cards side by side.

use std::{fmt, io};

use tracing::debug;

use crate::{
    card::Card,
    config::RenderConfig,
    error::Result,
    export,
    panel::PanelKind,
    render::{Table, TableRow},
};

/// Cards combined into one table with a value column per card.
///
/// Rows are the union of the cards' fields, keyed by panel and field name. Within a panel, fields
/// appear in the order they're first seen across the cards. A card lacking a field gets a blank
/// value, and a row carries the notes of every card.
///
/// # Examples
///
/// ```
/// use netcards::card::Card;
/// use netcards::edge::Edge;
/// use netcards::graph::Graph;
/// use netcards::multicard::MultiCard;
///
/// let mut path = Graph::new();
/// path.insert(Edge::new(1, 2));
/// path.insert(Edge::new(2, 3));
///
/// let mut star = Graph::new();
/// star.update_subset(0, &[1, 2, 3, 4]);
///
/// let (path, star) = (Card::new(&path).unwrap(), Card::new(&star).unwrap());
/// let multicard = MultiCard::new(&[&path, &star]);
///
/// assert_eq!(multicard.len(), 2);
/// println!("{multicard}");
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct MultiCard {
    table: Table,
}

impl MultiCard {
    pub fn new(cards: &[&Card]) -> Self {
        let mut rows: Vec<TableRow> = Vec::new();

        for kind in PanelKind::ALL {
            let start = rows.len();

            for (column, card) in cards.iter().enumerate() {
                for (field, entry) in card.panel(kind).iter() {
                    let existing = rows[start..].iter().position(|row| row.field == field);
                    let index = match existing {
                        Some(index) => start + index,
                        None => {
                            rows.push(TableRow {
                                panel: kind,
                                field: field.to_string(),
                                values: vec![String::new(); cards.len()],
                                notes: Vec::new(),
                            });
                            rows.len() - 1
                        }
                    };

                    let row = &mut rows[index];
                    row.values[column] = entry.value().to_string();
                    for note in entry.notes() {
                        if !row.notes.contains(note) {
                            row.notes.push(note.clone());
                        }
                    }
                }
            }
        }

        debug!(cards = cards.len(), rows = rows.len(), "combined cards");

        Self {
            table: Table::from_rows(rows, cards.len()),
        }
    }

    /// The number of combined cards.
    pub fn len(&self) -> usize {
        self.table.columns()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    /// Lists the fields with their row positions, for use with [`MultiCard::swap_rows`].
    pub fn fields(&self) -> impl Iterator<Item = (usize, PanelKind, &str)> {
        self.table
            .rows()
            .iter()
            .enumerate()
            .map(|(position, row)| (position, row.panel, row.field.as_str()))
    }

    /// Interchanges the rows at two positions.
    ///
    /// Panics if either position is out of bounds.
    pub fn swap_rows(&mut self, a: usize, b: usize) {
        self.table.swap_rows(a, b);
    }

    pub fn render(&self, config: &RenderConfig) -> String {
        self.table.render(config)
    }

    /// Writes the combined table as LaTeX, each value column `width` cm wide.
    pub fn to_latex(&self, width: Option<f64>) -> String {
        export::to_latex(&self.table, width)
    }

    pub fn write_csv<W: io::Write>(&self, writer: W) -> Result<()> {
        export::write_csv(&self.table, writer)
    }
}

impl fmt::Display for MultiCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(&RenderConfig::default()))
    }
}
