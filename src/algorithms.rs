//! The graph primitives structural statistics are computed from.
//!
//! Cards don't care how a graph is stored, only that these primitives can be evaluated on it.
//! [`Graph`](crate::graph::Graph) implements them for in-memory graphs; other graph stores can
//! implement the trait to produce cards directly.

/// Failures of a primitive on inputs it isn't defined for.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum AlgorithmError {
    /// The graph (or subgraph) has no nodes.
    #[error("the graph has no nodes")]
    EmptyGraph,

    /// The graph has no links.
    #[error("the graph has no links")]
    NoLinks,

    /// Some node can't be reached from some other node.
    #[error("the graph is not connected")]
    NotConnected,

    /// Every link joins nodes of identical degrees, so no correlation can be computed.
    #[error("degrees at the ends of links have zero variance")]
    ZeroVariance,

    /// The computation was skipped because the graph is too large.
    #[error("skipped: {nodes} nodes exceed the limit of {limit}")]
    TooLarge { nodes: usize, limit: usize },
}

/// Graph primitives required to compute a card's structure panel.
///
/// Nodes are identified by their index in `0..node_count()`.
pub trait GraphAlgorithms {
    /// The name of the network, if it has one.
    fn name(&self) -> Option<&str> {
        None
    }

    fn is_directed(&self) -> bool;

    /// Whether any link carries a weight.
    fn is_weighted(&self) -> bool;

    /// Whether any link carries a negative weight.
    fn is_negatively_weighted(&self) -> bool;

    fn node_count(&self) -> usize;

    fn edge_count(&self) -> usize;

    fn self_loop_count(&self) -> usize;

    /// The number of node pairs linked in both directions, self-loops excluded. Every undirected
    /// link is such a pair.
    fn reciprocal_pair_count(&self) -> usize;

    /// Per-node degree, in + out for directed graphs. A self-loop counts twice.
    fn degrees(&self) -> Vec<usize>;

    /// Per-node in-degree, equal to [`degrees`](Self::degrees) for undirected graphs.
    fn in_degrees(&self) -> Vec<usize>;

    /// Per-node out-degree, equal to [`degrees`](Self::degrees) for undirected graphs.
    fn out_degrees(&self) -> Vec<usize>;

    /// The average local clustering coefficient, nodes with fewer than two neighbours count as
    /// zero.
    fn average_clustering(&self) -> Result<f64, AlgorithmError>;

    /// The (weakly) connected components, largest first.
    fn connected_components(&self) -> Vec<Vec<usize>>;

    /// Whether every node can reach every other node following link directions.
    fn is_strongly_connected(&self) -> bool;

    /// The longest shortest path length between any two nodes.
    fn diameter(&self) -> Result<usize, AlgorithmError>;

    /// The diameter of the subgraph induced by `nodes`.
    fn subgraph_diameter(&self, nodes: &[usize]) -> Result<usize, AlgorithmError>;

    /// The Pearson correlation between the degrees at either end of each link.
    fn degree_assortativity(&self) -> Result<f64, AlgorithmError>;
}

/// Computes the Pearson correlation coefficient of paired samples.
pub(crate) fn pearson(pairs: &[(f64, f64)]) -> Result<f64, AlgorithmError> {
    if pairs.is_empty() {
        return Err(AlgorithmError::NoLinks);
    }

    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|(x, _)| x).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|(_, y)| y).sum::<f64>() / n;

    let (mut covariance, mut variance_x, mut variance_y) = (0.0, 0.0, 0.0);
    for (x, y) in pairs {
        let (dx, dy) = (x - mean_x, y - mean_y);
        covariance += dx * dy;
        variance_x += dx * dx;
        variance_y += dy * dy;
    }

    if variance_x == 0.0 || variance_y == 0.0 {
        return Err(AlgorithmError::ZeroVariance);
    }

    Ok(covariance / (variance_x * variance_y).sqrt())
}
