//! A module for working with edges.

/// A link between two vertices, optionally carrying a weight.
///
/// Whether `source`-`target` denotes a direction depends on the graph the edge is inserted into:
/// an undirected graph treats `(a, b)` and `(b, a)` as the same link.
#[derive(Clone, Debug, PartialEq)]
pub struct Edge<T> {
    source: T,
    target: T,
    weight: Option<f64>,
}

impl<T> Edge<T> {
    /// Creates a new unweighted edge from two vertices.
    ///
    /// # Examples
    ///
    /// ```
    /// use netcards::edge::Edge;
    ///
    /// let edge = Edge::new("a", "b");
    /// assert_eq!(edge.weight(), None);
    /// ```
    pub fn new(source: T, target: T) -> Self {
        Self {
            source,
            target,
            weight: None,
        }
    }

    /// Creates a new weighted edge from two vertices.
    ///
    /// # Examples
    ///
    /// ```
    /// use netcards::edge::Edge;
    ///
    /// let edge = Edge::weighted("a", "b", 2.5);
    /// assert_eq!(edge.weight(), Some(2.5));
    /// ```
    pub fn weighted(source: T, target: T, weight: f64) -> Self {
        Self {
            source,
            target,
            weight: Some(weight),
        }
    }

    /// Returns the first vertex forming the edge.
    ///
    /// # Examples
    ///
    /// ```
    /// use netcards::edge::Edge;
    ///
    /// let edge = Edge::new("a", "b");
    /// assert_eq!(edge.source(), &"a");
    /// ```
    pub fn source(&self) -> &T {
        &self.source
    }

    /// Returns the second vertex forming the edge.
    ///
    /// # Examples
    ///
    /// ```
    /// use netcards::edge::Edge;
    ///
    /// let edge = Edge::new("a", "b");
    /// assert_eq!(edge.target(), &"b");
    /// ```
    pub fn target(&self) -> &T {
        &self.target
    }

    pub fn weight(&self) -> Option<f64> {
        self.weight
    }

    /// Returns whether the edge contains the given vertex.
    ///
    /// # Examples
    ///
    /// ```
    /// use netcards::edge::Edge;
    ///
    /// let edge = Edge::new("a", "b");
    ///
    /// assert_eq!(edge.contains(&"a"), true);
    /// assert_eq!(edge.contains(&"b"), true);
    /// assert_eq!(edge.contains(&"c"), false);
    /// ```
    pub fn contains(&self, vertex: &T) -> bool
    where
        T: PartialEq,
    {
        self.source() == vertex || self.target() == vertex
    }

    /// Returns whether both ends of the edge are the same vertex.
    pub fn is_self_loop(&self) -> bool
    where
        T: PartialEq,
    {
        self.source == self.target
    }

    /// Returns the vertex pair identifying this edge in a graph.
    ///
    /// Undirected graphs identify `(a, b)` and `(b, a)`, so the pair is ordered by `T`'s
    /// implementation of `Ord` in that case.
    ///
    /// # Examples
    ///
    /// ```
    /// use netcards::edge::Edge;
    ///
    /// assert_eq!(Edge::new("b", "a").key(false), ("a", "b"));
    /// assert_eq!(Edge::new("b", "a").key(true), ("b", "a"));
    /// ```
    pub fn key(&self, directed: bool) -> (T, T)
    where
        T: Copy + Ord,
    {
        if directed || self.source <= self.target {
            (self.source, self.target)
        } else {
            (self.target, self.source)
        }
    }
}
