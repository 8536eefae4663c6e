use crate::{
    error::Result,
    graph::{CapacityGraph, DiGraph},
    max_flow::{max_flow, MaxFlowAlgorithm},
};

/// `(left, right)` vertex pair, each counted from zero on its own side.
pub type Match = (usize, usize);
pub type Matching = Vec<Match>;

/// Bipartite graph with edges from the left side to the right side.
///
/// Right vertex `r` is stored as vertex `left_count + r` of the inner graph.
#[derive(Clone, Debug)]
pub struct BipartiteGraph {
    left_count: usize,
    right_count: usize,
    graph: DiGraph,
}

impl BipartiteGraph {
    pub fn new(left_count: usize, right_count: usize) -> Self {
        Self {
            left_count,
            right_count,
            graph: DiGraph::new(left_count + right_count),
        }
    }

    pub fn balanced(size: usize) -> Self {
        Self::new(size, size)
    }

    pub fn left_count(&self) -> usize {
        self.left_count
    }

    pub fn right_count(&self) -> usize {
        self.right_count
    }

    pub fn connect(&mut self, left: usize, right: usize) {
        debug_assert!(left < self.left_count && right < self.right_count);
        self.graph.connect(left, self.left_count + right, ());
    }

    /// Unit-capacity network: source -> every left vertex -> its right
    /// neighbors -> sink. Returns the network with its source and sink.
    pub fn flow_network(&self) -> (CapacityGraph, usize, usize) {
        let nodes_count = self.left_count + self.right_count;
        let (source, sink) = (nodes_count, nodes_count + 1);
        let mut network = CapacityGraph::new(nodes_count + 2);

        for u in 0..self.left_count {
            network.connect(source, u, 1);
            for edge in self.graph.edges(u) {
                network.connect(u, edge.to, 1);
            }
        }
        for v in self.left_count..nodes_count {
            network.connect(v, sink, 1);
        }

        (network, source, sink)
    }

    pub fn maximum_matching(&self) -> Result<Matching> {
        self.maximum_matching_with(MaxFlowAlgorithm::EdmondsKarp)
    }

    /// Matched pairs ordered by left vertex.
    pub fn maximum_matching_with(&self, algorithm: MaxFlowAlgorithm) -> Result<Matching> {
        let (network, source, sink) = self.flow_network();
        let flow = max_flow(&network, source, sink, algorithm)?;

        let mut matching = Vec::with_capacity(flow.value as usize);
        for u in 0..self.left_count {
            if let Some(edge) = self.graph.edges(u).iter().find(|e| flow.flow(u, e.to) > 0) {
                matching.push((u, edge.to - self.left_count));
            }
        }

        log::debug!(
            "Matched {} of {} left vertices",
            matching.len(),
            self.left_count
        );
        Ok(matching)
    }
}
