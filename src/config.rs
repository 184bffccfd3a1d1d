//! Display and computation settings for cards.
//!
//! Every setting has a default matching the published network card templates, so a config file
//! only needs the settings it changes:
//!
//! ```toml
//! [card]
//! infer_overall = true
//! directed_degree = "out"
//!
//! [render]
//! panel_gap = true
//! ```

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::{error::Result, summary::MEAN_SIGNIFICANT_DIGITS};

/// The sentinel written for statistics that are undefined on a graph.
pub const UNDEFINED: &str = "N/A";

/// The footnote attached to fields summarizing a distribution.
pub const DISTRIBUTION_NOTE: &str = "Distributions summarized with average [min, max].";

/// Which degree the `Degree` field of a directed graph summarizes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DegreeConvention {
    /// In-degree plus out-degree.
    #[default]
    Total,
    In,
    Out,
}

impl DegreeConvention {
    /// The footnote naming the convention on a directed card.
    pub fn note(&self) -> &'static str {
        match self {
            DegreeConvention::Total => "Total degree (in + out).",
            DegreeConvention::In => "In-degree.",
            DegreeConvention::Out => "Out-degree.",
        }
    }
}

/// Settings for computing a card's structure panel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardConfig {
    /// Decimal places kept for the average clustering coefficient.
    #[serde(default = "default_decimals")]
    pub clustering_decimals: u32,
    /// Decimal places kept for the degree assortativity.
    #[serde(default = "default_decimals")]
    pub assortativity_decimals: u32,
    /// Significant digits shown for the mean of a distribution.
    #[serde(default = "default_mean_digits")]
    pub mean_significant_digits: usize,
    /// Decimal places of the share of nodes in the largest component.
    #[serde(default = "default_percent_decimals")]
    pub percent_decimals: usize,
    /// The value written for undefined statistics.
    #[serde(default = "default_undefined")]
    pub undefined: String,
    /// The footnote attached to distribution summaries.
    #[serde(default = "default_distribution_note")]
    pub distribution_note: String,
    /// Which degree summarizes a directed graph.
    #[serde(default)]
    pub directed_degree: DegreeConvention,
    /// Prefill the overall panel's name and kind from the graph.
    #[serde(default)]
    pub infer_overall: bool,
    /// Skip diameter computations on graphs with more nodes than this.
    #[serde(default)]
    pub diameter_node_limit: Option<usize>,
}

impl Default for CardConfig {
    fn default() -> Self {
        Self {
            clustering_decimals: default_decimals(),
            assortativity_decimals: default_decimals(),
            mean_significant_digits: default_mean_digits(),
            percent_decimals: default_percent_decimals(),
            undefined: default_undefined(),
            distribution_note: default_distribution_note(),
            directed_degree: DegreeConvention::default(),
            infer_overall: false,
            diameter_node_limit: None,
        }
    }
}

/// Settings for rendering a card as a text table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Placed between the key and value columns.
    #[serde(default = "default_separator")]
    pub separator: String,
    /// Leave a blank line between panels.
    #[serde(default)]
    pub panel_gap: bool,
    /// Mark footnoted keys and list the notes under the table.
    #[serde(default = "default_true")]
    pub footnotes: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            separator: default_separator(),
            panel_gap: false,
            footnotes: default_true(),
        }
    }
}

/// All settings, as read from a config file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub card: CardConfig,
    #[serde(default)]
    pub render: RenderConfig,
}

impl Config {
    /// Parses a TOML config.
    ///
    /// # Examples
    ///
    /// ```
    /// use netcards::config::{Config, DegreeConvention};
    ///
    /// let config = Config::from_toml("[card]\ndirected_degree = \"in\"").unwrap();
    ///
    /// assert_eq!(config.card.directed_degree, DegreeConvention::In);
    /// assert_eq!(config.card.undefined, "N/A");
    /// assert_eq!(config.render.separator, "  ");
    /// ```
    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Reads a TOML config file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        let config = Self::from_toml(&text)?;
        tracing::debug!(path = %path.display(), "loaded card config");
        Ok(config)
    }
}

fn default_decimals() -> u32 {
    3
}

fn default_mean_digits() -> usize {
    MEAN_SIGNIFICANT_DIGITS
}

fn default_percent_decimals() -> usize {
    1
}

fn default_undefined() -> String {
    UNDEFINED.to_string()
}

fn default_distribution_note() -> String {
    DISTRIBUTION_NOTE.to_string()
}

fn default_separator() -> String {
    "  ".to_string()
}

const fn default_true() -> bool {
    true
}
