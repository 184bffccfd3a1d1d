//! A module for working with graphs.

use std::{
    cell::OnceCell,
    collections::{BTreeMap, BTreeSet},
    fmt::Debug,
};

use itertools::Itertools;

use crate::{
    algorithms::{pearson, AlgorithmError, GraphAlgorithms},
    edge::Edge,
    paths,
};

/// A simple graph snapshot: vertices, links between them and optional link weights.
///
/// Inserting a link that already exists only updates its weight, parallel links aren't
/// represented.
#[derive(Clone, Debug)]
pub struct Graph<T> {
    /// The name of the network, used to prefill a card's name.
    name: Option<String>,
    /// Whether `(a, b)` and `(b, a)` are distinct links.
    directed: bool,
    /// The vertices, including those without links.
    ///
    /// The use of a `BTreeSet` means we need the `Ord` bound on `T`. The sorted collection gives
    /// every vertex a stable index between computations.
    vertices: BTreeSet<T>,
    /// Links keyed by [`Edge::key`], mapped to their weight.
    edges: BTreeMap<(T, T), Option<f64>>,
    /// Cache the indexed adjacency lists when possible.
    adjacency: OnceCell<Adjacency>,
}

impl<T> Default for Graph<T>
where
    T: Copy + Ord + Debug,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Graph<T>
where
    T: Copy + Ord + Debug,
{
    /// Creates an empty undirected graph.
    ///
    /// # Examples
    ///
    /// ```
    /// use netcards::graph::Graph;
    ///
    /// let graph: Graph<&str> = Graph::new();
    /// assert!(!graph.is_directed());
    /// ```
    pub fn new() -> Self {
        Self {
            name: None,
            directed: false,
            vertices: BTreeSet::new(),
            edges: BTreeMap::new(),
            adjacency: OnceCell::new(),
        }
    }

    /// Creates an empty directed graph.
    pub fn directed() -> Self {
        Self {
            directed: true,
            ..Self::new()
        }
    }

    /// Names the network.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = Some(name.into());
    }

    pub fn is_directed(&self) -> bool {
        self.directed
    }

    /// Returns the links in key order.
    pub fn edges(&self) -> impl Iterator<Item = Edge<T>> + '_ {
        self.edges
            .iter()
            .map(|(&(source, target), weight)| match weight {
                Some(weight) => Edge::weighted(source, target, *weight),
                None => Edge::new(source, target),
            })
    }

    /// Adds an isolated vertex, returns whether it was new.
    pub fn add_node(&mut self, vertex: T) -> bool {
        let is_inserted = self.vertices.insert(vertex);

        if is_inserted {
            self.clear_cache();
        }

        is_inserted
    }

    /// Inserts an edge into the graph, returns whether the link was new.
    ///
    /// Re-inserting an existing link replaces its weight.
    ///
    /// # Examples
    ///
    /// ```
    /// use netcards::edge::Edge;
    /// use netcards::graph::Graph;
    ///
    /// let mut graph = Graph::new();
    ///
    /// assert!(graph.insert(Edge::new("a", "b")));
    /// assert!(!graph.insert(Edge::new("b", "a")));
    /// assert_eq!(graph.edge_count(), 1);
    /// ```
    pub fn insert(&mut self, edge: Edge<T>) -> bool {
        self.vertices.insert(*edge.source());
        self.vertices.insert(*edge.target());

        let is_inserted = self
            .edges
            .insert(edge.key(self.directed), edge.weight())
            .is_none();

        // The weights are part of the cached state, so clear it even when only a weight changed.
        self.clear_cache();

        is_inserted
    }

    /// Inserts a subset of `(hub, leaf)` edges into the graph.
    pub fn insert_subset(&mut self, hub: T, leaves: &[T]) {
        for leaf in leaves {
            self.insert(Edge::new(hub, *leaf));
        }
    }

    /// Inserts a subset of `(hub, leaf)` edges into the graph and removes any existing edges that
    /// leave the hub but aren't included in the new set.
    pub fn update_subset(&mut self, hub: T, leaves: &[T]) {
        let directed = self.directed;
        let new_keys: BTreeSet<(T, T)> = leaves
            .iter()
            .map(|leaf| Edge::new(hub, *leaf).key(directed))
            .collect();

        // Remove hub-containing links that aren't included in the new set. Links pointing into
        // the hub belong to the other vertex's subset in a directed graph.
        let original_len = self.edge_count();
        self.edges.retain(|key, _| {
            let from_hub = key.0 == hub || (!directed && key.1 == hub);
            new_keys.contains(key) || !from_hub
        });

        // Make sure to clear the cache after removals as there may be no inserts.
        if self.edge_count() != original_len {
            self.clear_cache()
        }

        for leaf in leaves {
            self.insert(Edge::new(hub, *leaf));
        }
    }

    /// Removes a link and returns whether it was present. The vertices are kept.
    ///
    /// # Examples
    ///
    /// ```
    /// use netcards::edge::Edge;
    /// use netcards::graph::Graph;
    ///
    /// let mut graph = Graph::new();
    /// graph.insert(Edge::new("a", "b"));
    ///
    /// assert_eq!(graph.remove(&Edge::new("a", "b")), true);
    /// assert_eq!(graph.remove(&Edge::new("a", "c")), false);
    /// assert_eq!(graph.vertex_count(), 2);
    /// ```
    pub fn remove(&mut self, edge: &Edge<T>) -> bool {
        let is_removed = self.edges.remove(&edge.key(self.directed)).is_some();

        if is_removed {
            self.clear_cache()
        }

        is_removed
    }

    /// Checks if the graph contains a link, regardless of its weight.
    pub fn contains(&self, edge: &Edge<T>) -> bool {
        self.edges.contains_key(&edge.key(self.directed))
    }

    /// Returns the vertex count of the graph.
    ///
    /// # Examples
    ///
    /// ```
    /// use netcards::edge::Edge;
    /// use netcards::graph::Graph;
    ///
    /// let mut graph = Graph::new();
    /// graph.insert(Edge::new("a", "b"));
    /// graph.add_node("c");
    ///
    /// assert_eq!(graph.vertex_count(), 3);
    /// ```
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Returns the edge count of the graph.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    //
    // Private
    //

    /// Clears the computed state.
    ///
    /// This should be called every time the graph is mutated since the cached state won't
    /// correspond to the new graph.
    fn clear_cache(&mut self) {
        self.adjacency = OnceCell::new();
    }

    /// Returns the indexed adjacency lists, building them on first use.
    fn adjacency(&self) -> &Adjacency {
        self.adjacency.get_or_init(|| Adjacency::build(self))
    }
}

/// Adjacency lists over vertex indices, the index being the vertex's position in the sorted
/// vertex set.
#[derive(Clone, Debug)]
struct Adjacency {
    /// Successors of each vertex (neighbours when undirected), self-loops excluded.
    outgoing: Vec<Vec<usize>>,
    /// Predecessors of each vertex (neighbours when undirected), self-loops excluded.
    incoming: Vec<Vec<usize>>,
    /// Sorted neighbours ignoring link direction, self-loops excluded.
    neighbours: Vec<Vec<usize>>,
    /// Self-loop count of each vertex.
    loops: Vec<usize>,
}

impl Adjacency {
    fn build<T>(graph: &Graph<T>) -> Self
    where
        T: Copy + Ord + Debug,
    {
        let index: BTreeMap<T, usize> = graph
            .vertices
            .iter()
            .enumerate()
            .map(|(i, &vertex)| (vertex, i))
            .collect();

        let n = index.len();
        let mut outgoing = vec![Vec::new(); n];
        let mut incoming = vec![Vec::new(); n];
        let mut loops = vec![0; n];

        for (source, target) in graph.edges.keys() {
            // Both ends are inserted into the vertex set along with the link.
            let (i, j) = (index[source], index[target]);

            if i == j {
                loops[i] += 1;
                continue;
            }

            outgoing[i].push(j);
            incoming[j].push(i);

            if !graph.directed {
                outgoing[j].push(i);
                incoming[i].push(j);
            }
        }

        let neighbours = outgoing
            .iter()
            .zip(&incoming)
            .map(|(out, inc)| {
                out.iter()
                    .chain(inc)
                    .copied()
                    .sorted()
                    .dedup()
                    .collect::<Vec<usize>>()
            })
            .collect();

        Self {
            outgoing,
            incoming,
            neighbours,
            loops,
        }
    }

    fn in_degree(&self, i: usize) -> usize {
        self.incoming[i].len() + self.loops[i]
    }

    fn out_degree(&self, i: usize) -> usize {
        self.outgoing[i].len() + self.loops[i]
    }
}

impl<T> GraphAlgorithms for Graph<T>
where
    T: Copy + Ord + Debug,
{
    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn is_directed(&self) -> bool {
        self.directed
    }

    fn is_weighted(&self) -> bool {
        self.edges.values().any(Option::is_some)
    }

    fn is_negatively_weighted(&self) -> bool {
        self.edges.values().flatten().any(|weight| *weight < 0.0)
    }

    fn node_count(&self) -> usize {
        self.vertex_count()
    }

    fn edge_count(&self) -> usize {
        self.edges.len()
    }

    fn self_loop_count(&self) -> usize {
        self.edges().filter(Edge::is_self_loop).count()
    }

    fn reciprocal_pair_count(&self) -> usize {
        // Count each pair once, from its lower end.
        self.edges
            .keys()
            .filter(|(a, b)| a != b)
            .filter(|(a, b)| !self.directed || (a < b && self.edges.contains_key(&(*b, *a))))
            .count()
    }

    fn degrees(&self) -> Vec<usize> {
        let adjacency = self.adjacency();

        (0..self.vertex_count())
            .map(|i| {
                if self.directed {
                    adjacency.in_degree(i) + adjacency.out_degree(i)
                } else {
                    adjacency.outgoing[i].len() + 2 * adjacency.loops[i]
                }
            })
            .collect()
    }

    fn in_degrees(&self) -> Vec<usize> {
        if !self.directed {
            return self.degrees();
        }

        let adjacency = self.adjacency();
        (0..self.vertex_count())
            .map(|i| adjacency.in_degree(i))
            .collect()
    }

    fn out_degrees(&self) -> Vec<usize> {
        if !self.directed {
            return self.degrees();
        }

        let adjacency = self.adjacency();
        (0..self.vertex_count())
            .map(|i| adjacency.out_degree(i))
            .collect()
    }

    fn average_clustering(&self) -> Result<f64, AlgorithmError> {
        let neighbours = &self.adjacency().neighbours;
        if neighbours.is_empty() {
            return Err(AlgorithmError::EmptyGraph);
        }

        let total: f64 = neighbours
            .iter()
            .map(|adjacent| {
                let degree = adjacent.len();
                if degree < 2 {
                    return 0.0;
                }

                // Count the links between pairs of neighbours, the lists are sorted.
                let triangles = adjacent
                    .iter()
                    .tuple_combinations()
                    .filter(|(a, b)| neighbours[**a].binary_search(*b).is_ok())
                    .count();

                2.0 * triangles as f64 / (degree * (degree - 1)) as f64
            })
            .sum();

        Ok(total / neighbours.len() as f64)
    }

    fn connected_components(&self) -> Vec<Vec<usize>> {
        paths::components(&self.adjacency().neighbours)
    }

    fn is_strongly_connected(&self) -> bool {
        let adjacency = self.adjacency();
        if adjacency.outgoing.is_empty() {
            return false;
        }

        paths::reachable(0, &adjacency.outgoing).into_iter().all(|r| r)
            && paths::reachable(0, &adjacency.incoming).into_iter().all(|r| r)
    }

    fn diameter(&self) -> Result<usize, AlgorithmError> {
        let nodes: Vec<usize> = (0..self.vertex_count()).collect();
        self.subgraph_diameter(&nodes)
    }

    fn subgraph_diameter(&self, nodes: &[usize]) -> Result<usize, AlgorithmError> {
        paths::diameter(&self.adjacency().outgoing, nodes)
    }

    fn degree_assortativity(&self) -> Result<f64, AlgorithmError> {
        let index: BTreeMap<T, usize> = self
            .vertices
            .iter()
            .enumerate()
            .map(|(i, &vertex)| (vertex, i))
            .collect();

        let pairs: Vec<(f64, f64)> = if self.directed {
            // Out-degree of the source against the in-degree of the target.
            let (out_degrees, in_degrees) = (self.out_degrees(), self.in_degrees());

            self.edges
                .keys()
                .map(|(source, target)| {
                    (
                        out_degrees[index[source]] as f64,
                        in_degrees[index[target]] as f64,
                    )
                })
                .collect()
        } else {
            // Each undirected link contributes both orientations.
            let degrees = self.degrees();

            self.edges
                .keys()
                .flat_map(|(a, b)| {
                    let (x, y) = (degrees[index[a]] as f64, degrees[index[b]] as f64);
                    [(x, y), (y, x)]
                })
                .collect()
        };

        pearson(&pairs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    macro_rules! graph {
          ($($path:expr),*) => {{
              let mut graph = Graph::new();

              $(
                  let mut iter = $path.into_iter().peekable();
                  while let (Some(a), Some(b)) = (iter.next(), iter.peek()) {
                      graph.insert(Edge::new(a, *b));
                  }

              )*

              graph
          }}
      }

    #[test]
    fn new() {
        let graph: Graph<()> = Graph::new();
        assert!(!graph.is_directed());
        assert_eq!(GraphAlgorithms::name(&graph), None);
    }

    #[test]
    fn named() {
        let graph: Graph<u8> = Graph::directed().with_name("Experiment A-1");

        assert!(graph.is_directed());
        assert_eq!(GraphAlgorithms::name(&graph), Some("Experiment A-1"));
    }

    #[test]
    fn insert() {
        let mut graph = Graph::new();
        let edge = Edge::new("a", "b");

        assert!(graph.insert(edge.clone()));
        assert!(!graph.insert(edge));
        assert!(!graph.insert(Edge::new("b", "a")));
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn insert_directed() {
        let mut graph = Graph::directed();

        assert!(graph.insert(Edge::new("a", "b")));
        assert!(graph.insert(Edge::new("b", "a")));
        assert_eq!(graph.edge_count(), 2);
    }

    #[test]
    fn insert_replaces_weight() {
        let mut graph = Graph::new();
        graph.insert(Edge::new("a", "b"));
        assert!(!graph.is_weighted());

        graph.insert(Edge::weighted("b", "a", -2.0));
        assert!(graph.is_weighted());
        assert!(graph.is_negatively_weighted());
        assert_eq!(
            graph.edges().collect::<Vec<_>>(),
            vec![Edge::weighted("a", "b", -2.0)]
        );
    }

    #[test]
    fn insert_subset() {
        let mut graph = Graph::new();

        let (a, b, c, d) = ("a", "b", "c", "d");

        graph.insert(Edge::new(a, b));
        graph.insert(Edge::new(a, c));

        let edges = vec![b, d];
        graph.insert_subset(a, &edges);

        assert!(graph.contains(&Edge::new(a, b)));
        assert!(graph.contains(&Edge::new(a, c)));
        assert!(graph.contains(&Edge::new(a, d)));

        assert_eq!(graph.edge_count(), 3);
    }

    #[test]
    fn update_subset() {
        let mut graph = Graph::new();

        let (a, b, c, d) = ("a", "b", "c", "d");

        graph.insert(Edge::new(a, b));
        graph.insert(Edge::new(a, c));
        graph.insert(Edge::new(b, c));

        let edges = vec![b, d];
        graph.update_subset(a, &edges);

        assert!(graph.contains(&Edge::new(a, b)));
        assert!(!graph.contains(&Edge::new(a, c)));
        assert!(graph.contains(&Edge::new(b, c)));
        assert!(graph.contains(&Edge::new(a, d)));

        assert_eq!(graph.edge_count(), 3);
    }

    #[test]
    fn update_subset_directed() {
        let mut graph = Graph::directed();

        let (a, b, c) = ("a", "b", "c");

        graph.insert(Edge::new(a, b));
        graph.insert(Edge::new(c, a));

        graph.update_subset(a, &[c]);

        // Links into the hub are untouched.
        assert!(graph.contains(&Edge::new(c, a)));
        assert!(graph.contains(&Edge::new(a, c)));
        assert!(!graph.contains(&Edge::new(a, b)));
    }

    #[test]
    fn remove() {
        let edge = Edge::new("a", "b");
        let uninserted_edge = Edge::new("a", "c");

        let mut graph = Graph::new();
        graph.insert(edge.clone());

        assert!(graph.remove(&edge));
        assert!(!graph.remove(&uninserted_edge));
    }

    #[test]
    fn contains() {
        let mut graph = Graph::new();
        let edge = Edge::new("a", "b");

        graph.insert(edge.clone());

        assert!(graph.contains(&edge));
        assert!(graph.contains(&Edge::new("b", "a")));
        assert!(!graph.contains(&Edge::new("b", "c")));
    }

    #[test]
    fn vertex_count() {
        let mut graph = Graph::new();
        assert_eq!(graph.vertex_count(), 0);

        // Verify two new vertices get added when they don't yet exist in the graph.
        graph.insert(Edge::new("a", "b"));
        assert_eq!(graph.vertex_count(), 2);

        // Verify only one new vertex is added when one of them already exists in the graph.
        graph.insert(Edge::new("a", "c"));
        assert_eq!(graph.vertex_count(), 3);

        // Isolated vertices count too.
        assert!(graph.add_node("d"));
        assert!(!graph.add_node("a"));
        assert_eq!(graph.vertex_count(), 4);
    }

    #[test]
    fn edge_count() {
        let mut graph = Graph::new();
        assert_eq!(graph.edge_count(), 0);

        graph.insert(Edge::new("a", "b"));
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn degrees() {
        let (a, b, c) = ("a", "b", "c");
        let mut graph = graph!([a, b], [a, c]);
        graph.add_node("d");

        assert_eq!(graph.degrees(), vec![2, 1, 1, 0]);
    }

    #[test]
    fn self_loop_degree() {
        let mut graph = graph!(["a", "b"]);
        graph.insert(Edge::new("a", "a"));

        assert_eq!(graph.degrees(), vec![3, 1]);
        assert_eq!(graph.self_loop_count(), 1);
        assert_eq!(graph.edge_count(), 2);
    }

    #[test]
    fn directed_degrees() {
        let mut graph = Graph::directed();
        graph.insert(Edge::new(0, 1));
        graph.insert(Edge::new(0, 2));
        graph.insert(Edge::new(2, 3));
        graph.insert(Edge::new(3, 2));

        assert_eq!(graph.out_degrees(), vec![2, 0, 1, 1]);
        assert_eq!(graph.in_degrees(), vec![0, 1, 2, 1]);
        assert_eq!(graph.degrees(), vec![2, 1, 3, 2]);
        assert_eq!(graph.reciprocal_pair_count(), 1);
    }

    #[test]
    fn clustering() {
        // A triangle with a pendant vertex: c(a) = c(b) = 1, c(c) = 1/3, c(d) = 0.
        let (a, b, c, d) = ("a", "b", "c", "d");
        let graph = graph!([a, b, c, a], [c, d]);

        let expected = (1.0 + 1.0 + 1.0 / 3.0 + 0.0) / 4.0;
        assert!((graph.average_clustering().unwrap() - expected).abs() < 1e-12);
    }

    #[test]
    fn clustering_without_triangles() {
        let graph = graph!(["a", "b", "c", "d"]);
        assert_eq!(graph.average_clustering(), Ok(0.0));

        let graph: Graph<&str> = Graph::new();
        assert_eq!(graph.average_clustering(), Err(AlgorithmError::EmptyGraph));
    }

    #[test]
    fn components() {
        let (a, b, c, d, e) = ("a", "b", "c", "d", "e");
        let mut graph = graph!([a, b, c], [d, e]);
        graph.add_node("f");

        assert_eq!(
            graph.connected_components(),
            vec![vec![0, 1, 2], vec![3, 4], vec![5]]
        );
    }

    #[test]
    fn strongly_connected() {
        let mut graph = Graph::directed();
        graph.insert(Edge::new("a", "b"));
        graph.insert(Edge::new("b", "c"));
        assert!(!graph.is_strongly_connected());

        // Weakly connected only, a single component.
        assert_eq!(graph.connected_components().len(), 1);

        graph.insert(Edge::new("c", "a"));
        assert!(graph.is_strongly_connected());
    }

    #[test]
    fn diameter() {
        let (a, b, c, d) = ("a", "b", "c", "d");
        let mut graph = graph!([a, b, c, d]);
        assert_eq!(graph.diameter(), Ok(3));

        graph.insert(Edge::new(a, d));
        assert_eq!(graph.diameter(), Ok(2));

        graph.add_node("e");
        assert_eq!(graph.diameter(), Err(AlgorithmError::NotConnected));
        assert_eq!(graph.subgraph_diameter(&[0, 1, 2, 3]), Ok(2));
    }

    #[test]
    fn directed_diameter() {
        let mut graph = Graph::directed();
        graph.insert(Edge::new("a", "b"));
        graph.insert(Edge::new("b", "c"));
        graph.insert(Edge::new("c", "a"));

        // a -> c takes two hops around the cycle.
        assert_eq!(graph.diameter(), Ok(2));
    }

    #[test]
    fn assortativity() {
        // A star is perfectly disassortative.
        let mut graph = Graph::new();
        graph.insert_subset("hub", &["a", "b", "c"]);
        assert!((graph.degree_assortativity().unwrap() + 1.0).abs() < 1e-12);

        // Every link joins degree 1 to degree 1.
        let graph = graph!(["a", "b"], ["c", "d"]);
        assert_eq!(
            graph.degree_assortativity(),
            Err(AlgorithmError::ZeroVariance)
        );

        let mut graph: Graph<&str> = Graph::new();
        graph.add_node("a");
        assert_eq!(graph.degree_assortativity(), Err(AlgorithmError::NoLinks));
    }

    //
    // Private
    //

    #[test]
    fn clear_cache_on_insert() {
        let mut graph = graph!(["a", "b"]);

        assert_eq!(graph.degrees(), vec![1, 1]);
        assert!(graph.adjacency.get().is_some());

        graph.insert(Edge::new("a", "c"));
        assert!(graph.adjacency.get().is_none());
        assert_eq!(graph.degrees(), vec![2, 1, 1]);
    }

    #[test]
    fn clear_cache_on_subset_update_w_only_removals() {
        let mut graph = graph!(["a", "b"], ["a", "c"]);

        graph.degrees();
        assert!(graph.adjacency.get().is_some());

        graph.update_subset("a", &["b"]);
        assert_eq!(graph.degrees(), vec![1, 1, 0]);
    }

    #[test]
    fn clear_cache_on_remove() {
        let edge = Edge::new("a", "b");
        let mut graph = Graph::new();
        graph.insert(edge.clone());

        graph.degrees();
        assert!(graph.adjacency.get().is_some());

        graph.remove(&edge);
        assert!(graph.adjacency.get().is_none());
        assert_eq!(graph.degrees(), vec![0, 0]);
    }

    #[test]
    fn adjacency_index() {
        let (a, b, c) = ("a", "b", "c");
        let graph = graph!([c, a, b]);

        // Indexing corresponds to naming: a: 0, b: 1, c: 2.
        let adjacency = graph.adjacency();
        assert_eq!(adjacency.neighbours, vec![vec![1, 2], vec![0], vec![0]]);
    }
}
