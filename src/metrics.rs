//! Structural statistics of a graph, as reported in a card's structure panel.
//!
//! The statistics are computed once, in a fixed order, from the primitives of
//! [`GraphAlgorithms`]. A primitive failing on a degenerate input (no links, no triangles, a
//! disconnected subgraph) never fails the computation, the statistic is reported as undefined
//! and written to the panel as the configured sentinel.

use tracing::{debug, warn};

use crate::{
    algorithms::{AlgorithmError, GraphAlgorithms},
    config::{CardConfig, DegreeConvention},
    error::{CardError, Result},
    panel::{Entry, Panel, Value},
    summary::{format_significant, round_to, summarize_counts, Summary},
};

pub const NUMBER_OF_NODES: &str = "Number of nodes";
pub const NUMBER_OF_LINKS: &str = "Number of links";
pub const BIDIRECTIONAL_LINKS: &str = "Bidirectional links";
pub const DEGREE: &str = "Degree";
pub const CLUSTERING: &str = "Clustering";
pub const CONNECTED: &str = "Connected";
pub const COMPONENT_SIZE: &str = "Component size";
pub const DIAMETER: &str = "Diameter";
pub const LARGEST_COMPONENT_DIAMETER: &str = "Largest component's diameter";
pub const ASSORTATIVITY: &str = "Assortativity (degree)";

/// Structure fields present on every card.
pub const REQUIRED_STRUCTURE_FIELDS: [&str; 6] = [
    NUMBER_OF_NODES,
    NUMBER_OF_LINKS,
    DEGREE,
    CLUSTERING,
    CONNECTED,
    ASSORTATIVITY,
];

/// Every structure field, in display order.
pub const STRUCTURE_FIELDS: [&str; 10] = [
    NUMBER_OF_NODES,
    NUMBER_OF_LINKS,
    BIDIRECTIONAL_LINKS,
    DEGREE,
    CLUSTERING,
    CONNECTED,
    COMPONENT_SIZE,
    DIAMETER,
    LARGEST_COMPONENT_DIAMETER,
    ASSORTATIVITY,
];

/// How the nodes of a graph are connected.
///
/// Connected graphs report their diameter, disconnected graphs the diameter of their largest
/// component, never both.
#[derive(Clone, Debug, PartialEq)]
pub enum Connectivity {
    /// An undirected graph with a single component.
    Connected { diameter: Option<usize> },
    /// A directed graph in which every node reaches every other node.
    StronglyConnected { diameter: Option<usize> },
    /// A directed graph with a single component that isn't strongly connected.
    WeaklyConnected,
    /// More than one (weakly) connected component.
    Disconnected {
        /// Component sizes, largest first.
        component_sizes: Vec<usize>,
        largest_diameter: Option<usize>,
    },
}

impl Connectivity {
    /// The diameter of the whole graph, if it's defined and computed.
    pub fn diameter(&self) -> Option<usize> {
        match self {
            Connectivity::Connected { diameter } | Connectivity::StronglyConnected { diameter } => {
                *diameter
            }
            _ => None,
        }
    }
}

/// The structural statistics of a graph, before display formatting.
#[derive(Clone, Debug, PartialEq)]
pub struct StructuralSummary {
    pub nodes: usize,
    pub links: usize,
    pub self_loops: usize,
    /// The degree convention used, `None` for undirected graphs.
    pub degree_convention: Option<DegreeConvention>,
    pub degree: Summary,
    /// Reciprocal pairs as a percentage of all links, directed graphs only.
    pub bidirectional_links: Option<Option<f64>>,
    pub clustering: f64,
    pub connectivity: Connectivity,
    pub assortativity: Option<f64>,
}

impl StructuralSummary {
    /// Computes the statistics of a graph.
    ///
    /// Fails only if the graph has no nodes.
    ///
    /// # Examples
    ///
    /// ```
    /// use netcards::config::CardConfig;
    /// use netcards::edge::Edge;
    /// use netcards::graph::Graph;
    /// use netcards::metrics::{Connectivity, StructuralSummary};
    ///
    /// let mut graph = Graph::new();
    /// graph.insert(Edge::new("a", "b"));
    /// graph.insert(Edge::new("b", "c"));
    ///
    /// let summary = StructuralSummary::compute(&graph, &CardConfig::default()).unwrap();
    ///
    /// assert_eq!(summary.nodes, 3);
    /// assert_eq!(summary.connectivity, Connectivity::Connected { diameter: Some(2) });
    /// ```
    pub fn compute<G>(graph: &G, config: &CardConfig) -> Result<Self>
    where
        G: GraphAlgorithms + ?Sized,
    {
        let nodes = graph.node_count();
        if nodes == 0 {
            return Err(CardError::EmptyGraph);
        }

        let links = graph.edge_count();
        let self_loops = graph.self_loop_count();
        let directed = graph.is_directed();
        debug!(nodes, links, self_loops, directed, "computing structure");

        let bidirectional_links = directed.then(|| {
            (links > 0).then(|| 100.0 * graph.reciprocal_pair_count() as f64 / links as f64)
        });

        let (degree_convention, degrees) = if directed {
            let convention = config.directed_degree;
            let degrees = match convention {
                DegreeConvention::Total => graph.degrees(),
                DegreeConvention::In => graph.in_degrees(),
                DegreeConvention::Out => graph.out_degrees(),
            };
            (Some(convention), degrees)
        } else {
            (None, graph.degrees())
        };

        // The node count was checked, so there is at least one degree.
        let degree = summarize_counts(&degrees, config.mean_significant_digits)
            .ok_or(CardError::EmptyGraph)?;
        debug!(%degree, "degree distribution");

        let clustering = defined("clustering", graph.average_clustering()).unwrap_or(0.0);
        debug!(clustering, "average clustering");

        let connectivity = connectivity(graph, config);
        debug!(?connectivity, "connectivity");

        let assortativity = defined("assortativity", graph.degree_assortativity());
        debug!(?assortativity, "degree assortativity");

        Ok(Self {
            nodes,
            links,
            self_loops,
            degree_convention,
            degree,
            bidirectional_links,
            clustering,
            connectivity,
            assortativity,
        })
    }

    /// Writes the statistics as a structure panel, in display order.
    pub fn to_panel(&self, config: &CardConfig) -> Panel {
        let undefined = || Value::from(config.undefined.as_str());
        let mut panel = Panel::new();

        panel.set(NUMBER_OF_NODES, self.nodes);

        let mut links = Entry::new(self.links);
        if self.self_loops > 0 {
            let label = if self.self_loops == 1 {
                "self-loop"
            } else {
                "self-loops"
            };
            links.add_note(format!("Includes {} {label}.", self.self_loops));
        }
        panel.insert(NUMBER_OF_LINKS, links);

        if let Some(share) = self.bidirectional_links {
            let value = match share {
                Some(share) => Value::from(format!("{}%", format_significant(share, 3))),
                None => undefined(),
            };
            panel.set(BIDIRECTIONAL_LINKS, value);
        }

        let mut degree = Entry::new(self.degree.to_string());
        if let Some(convention) = self.degree_convention {
            degree.add_note(convention.note());
        }
        degree.add_note(config.distribution_note.as_str());
        panel.insert(DEGREE, degree);

        panel.set(
            CLUSTERING,
            round_to(self.clustering, config.clustering_decimals),
        );

        let diameter_value = |diameter: Option<usize>| match diameter {
            Some(diameter) => Value::from(diameter),
            None => undefined(),
        };

        match &self.connectivity {
            Connectivity::Connected { diameter } => {
                panel.set(CONNECTED, "Yes");
                panel.set(DIAMETER, diameter_value(*diameter));
            }
            Connectivity::StronglyConnected { diameter } => {
                panel.set(CONNECTED, "Strongly connected");
                panel.set(DIAMETER, diameter_value(*diameter));
            }
            Connectivity::WeaklyConnected => {
                panel.set(CONNECTED, "Weakly connected");
                panel.set(DIAMETER, undefined());
            }
            Connectivity::Disconnected {
                component_sizes,
                largest_diameter,
            } => {
                let largest = component_sizes.first().copied().unwrap_or(0);
                let share = 100.0 * largest as f64 / self.nodes as f64;
                panel.set(
                    CONNECTED,
                    format!(
                        "{} components [{:.*}% in largest]",
                        component_sizes.len(),
                        config.percent_decimals,
                        share
                    ),
                );

                if let Some(sizes) =
                    summarize_counts(component_sizes, config.mean_significant_digits)
                {
                    panel.insert(
                        COMPONENT_SIZE,
                        Entry::new(sizes.to_string()).with_note(config.distribution_note.as_str()),
                    );
                }

                panel.set(LARGEST_COMPONENT_DIAMETER, diameter_value(*largest_diameter));
            }
        }

        let assortativity = match self.assortativity {
            Some(r) => Value::from(round_to(r, config.assortativity_decimals)),
            None => undefined(),
        };
        panel.set(ASSORTATIVITY, assortativity);

        panel
    }
}

fn connectivity<G>(graph: &G, config: &CardConfig) -> Connectivity
where
    G: GraphAlgorithms + ?Sized,
{
    let components = graph.connected_components();

    if components.len() > 1 {
        let component_sizes = components.iter().map(Vec::len).collect();
        let largest_diameter = diameter(graph, config, Some(&components[0]));

        return Connectivity::Disconnected {
            component_sizes,
            largest_diameter,
        };
    }

    if !graph.is_directed() {
        return Connectivity::Connected {
            diameter: diameter(graph, config, None),
        };
    }

    if graph.is_strongly_connected() {
        Connectivity::StronglyConnected {
            diameter: diameter(graph, config, None),
        }
    } else {
        Connectivity::WeaklyConnected
    }
}

/// Computes the diameter of the graph, or of the subgraph induced by `nodes`, unless it's
/// undefined or the graph exceeds the configured size limit.
fn diameter<G>(graph: &G, config: &CardConfig, nodes: Option<&[usize]>) -> Option<usize>
where
    G: GraphAlgorithms + ?Sized,
{
    let size = nodes.map_or_else(|| graph.node_count(), <[usize]>::len);

    if let Some(limit) = config.diameter_node_limit {
        if size > limit {
            warn!(size, limit, "skipping diameter computation");
            return defined(
                "diameter",
                Err(AlgorithmError::TooLarge { nodes: size, limit }),
            );
        }
    }

    let result = match nodes {
        Some(nodes) => graph.subgraph_diameter(nodes),
        None => graph.diameter(),
    };

    defined("diameter", result)
}

/// Maps a primitive's failure to an undefined statistic.
fn defined<T>(statistic: &str, result: std::result::Result<T, AlgorithmError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(error) => {
            debug!(statistic, %error, "statistic undefined");
            None
        }
    }
}
