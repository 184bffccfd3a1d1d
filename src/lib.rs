//! Netcards builds network cards: short standardized summaries of network datasets, meant to sit
//! next to a dataset the way a datasheet does.
//!
//! # Basic usage
//!
//! A card is built from any graph implementing
//! [`GraphAlgorithms`](algorithms::GraphAlgorithms), usually a [`Graph`](graph::Graph)
//! constructed from one or more [`Edge`](edge::Edge) instances. The card computes its structure
//! panel from the graph, the overall and metainformation panels are filled in by the curator.
//!
//! ```rust
//! use std::net::SocketAddr;
//!
//! use netcards::card::Card;
//! use netcards::edge::Edge;
//! use netcards::graph::Graph;
//!
//! // Construct the graph instance.
//! let mut graph = Graph::new();
//!
//! // Create some addresses to be part of a network topology.
//! let addrs: Vec<SocketAddr> = (0..3)
//!     .map(|i| format!("127.0.0.1:{i}").parse().unwrap())
//!     .collect();
//! let (a, b, c) = (addrs[0], addrs[1], addrs[2]);
//!
//! // Insert some edges, note the IDs can be any type that is `Copy + Ord + Debug`.
//! graph.insert(Edge::new(a, b));
//! graph.insert(Edge::new(a, c));
//!
//! // Build the card and describe the dataset.
//! let mut card = Card::new(&graph).unwrap();
//! card.update_overall("Name", "Local peers");
//! card.update_overall("Nodes are", "Listening sockets");
//!
//! // Cards can be pretty printed...
//! println!("{card}");
//! // ...outputs (abridged):
//! //                    Name     Local peers
//! //                    Kind
//! //                    ...
//! //         Number of nodes               3
//! //         Number of links               2
//! //                Degree^1  1.33333 [1, 2]
//! //              Clustering             0.0
//! //               Connected             Yes
//! //                Diameter               2
//! //  Assortativity (degree)            -1.0
//! //                    ...
//! //
//! // ^1: Distributions summarized with average [min, max].
//!
//! // ...and saved as JSON.
//! let json = card.to_json().unwrap();
//! assert_eq!(Card::from_json(&json).unwrap(), card);
//! ```

pub mod algorithms;
pub mod card;
pub mod config;
pub mod edge;
pub mod error;
pub mod export;
pub mod graph;
pub mod metrics;
pub mod multicard;
pub mod panel;
mod paths;
pub mod render;
pub mod summary;

pub use card::Card;
pub use error::{CardError, Result};
pub use graph::Graph;
pub use multicard::MultiCard;
