use std::{collections::HashSet, net::SocketAddr};

use netcards::{card::Card, config::CardConfig, graph::Graph, multicard::MultiCard};

// A mock node implementation, has an address and stores peers.
struct Node {
    addr: SocketAddr,
    peers: HashSet<SocketAddr>,
}

impl Node {
    fn new(addr: SocketAddr) -> Self {
        Self {
            addr,
            peers: HashSet::new(),
        }
    }

    fn addr(&self) -> &SocketAddr {
        &self.addr
    }

    fn peers(&self) -> Vec<SocketAddr> {
        self.peers.iter().copied().collect()
    }

    fn connect(&mut self, peer: &mut Node) {
        self.peers.insert(*peer.addr());
        peer.peers.insert(*self.addr());
    }

    fn disconnect(&mut self, peer: &mut Node) {
        self.peers.remove(peer.addr());
        peer.peers.remove(self.addr());
    }
}

// Simulate crawling the network and use each node's peers to update the graph.
fn crawl(graph: &mut Graph<SocketAddr>, nodes: &[Node]) {
    for node in nodes {
        graph.add_node(*node.addr());
        graph.update_subset(*node.addr(), &node.peers());
    }
}

fn card(graph: &Graph<SocketAddr>, config: &CardConfig) -> Card {
    let mut card = Card::with_config(graph, config).expect("crawled graph has nodes");
    card.extend_overall([
        ("Nodes are", "Peers listening on localhost"),
        ("Links are", "Open connections between peers"),
        ("Considerations", "Collected by a single crawl"),
    ]);
    card.update_metainfo("Data generating process", "Mock crawler");
    card
}

fn main() {
    tracing_subscriber::fmt::init();

    const N: usize = 6;
    let mut nodes: Vec<Node> = vec![];

    for i in 0..N {
        let mut node = Node::new(format!("127.0.0.1:800{i}").parse().unwrap());

        // For each node connect to the previous node as a peer, creating a line topology.
        if let Some(peer) = nodes.last_mut() {
            node.connect(peer);
        }

        nodes.push(node)
    }

    println!("\nCrawling network with {N} nodes...");

    let config = CardConfig {
        infer_overall: true,
        ..CardConfig::default()
    };

    let mut graph = Graph::new().with_name("Line of peers");
    crawl(&mut graph, &nodes);

    let line = card(&graph, &config);
    println!("{line}\n");

    // Close the line into a ring.
    println!("Connecting first and last node...");
    let mut last = nodes.pop().expect("vec has no last item");

    nodes
        .first_mut()
        .expect("vec has no first item")
        .connect(&mut last);

    nodes.push(last);

    graph.set_name("Ring of peers");
    crawl(&mut graph, &nodes);
    let ring = card(&graph, &config);

    // Split the ring in two by removing a pair of connections.
    println!("Disconnecting two pairs of nodes...");
    let (left, right) = nodes.split_at_mut(3);
    left[2].disconnect(&mut right[0]);
    left[0].disconnect(&mut right[2]);

    graph.set_name("Split peers");
    crawl(&mut graph, &nodes);

    let mut split = card(&graph, &config);
    split
        .add_footnote("Connected", "The network partitioned during the crawl.")
        .expect("structure panel has a connectivity field");

    println!("{}\n", MultiCard::new(&[&line, &ring, &split]));

    match split.to_json_pretty() {
        Ok(json) => println!("{json}"),
        Err(error) => eprintln!("couldn't serialize card: {error}"),
    }
}
