//! Error types for building, updating and exporting cards.

use std::io;

use crate::panel::PanelKind;

/// Errors surfaced by card construction, updates and serialization.
///
/// Statistics that are undefined for a given graph are not errors, they are written to the card
/// as a sentinel value instead.
#[derive(Debug, thiserror::Error)]
pub enum CardError {
    /// The graph has no nodes, so no degree distribution exists.
    #[error("cannot build a card for a graph with no nodes")]
    EmptyGraph,

    /// The panel name doesn't match any of the three card panels.
    #[error("unknown panel {0:?}, expected one of overall, structure or metainfo")]
    UnknownPanel(String),

    /// The structure panel is computed from the graph and can't be written to.
    #[error("the structure panel is computed from the graph and cannot be updated")]
    ComputedPanel,

    /// The field isn't present in the panel.
    #[error("field {field:?} not found in the {panel} panel")]
    FieldNotFound { panel: PanelKind, field: String },

    /// The field isn't present in any panel.
    #[error("field {0:?} not found in any panel")]
    FieldNotInCard(String),

    /// JSON (de)serialization failed.
    #[error("card JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV export failed.
    #[error("CSV export error: {0}")]
    Csv(#[from] csv::Error),

    /// The configuration file couldn't be parsed.
    #[error("invalid configuration: {0}")]
    Toml(#[from] toml::de::Error),

    /// Reading or writing failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Shorthand for results carrying a [`CardError`].
pub type Result<T> = std::result::Result<T, CardError>;
