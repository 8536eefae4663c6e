use crate::error::{GraphError, Result};
use crate::graph::{Capacity, CapacityEdge, Direction, Edge, GenericGraph};
use crate::traversal::{TraversalOrder, Visitor};

/// Source of capacities a residual graph can be built from.
pub trait FlowGraph {
    fn get_node_count(&self) -> usize;
    // Target + edge capacity
    fn get_node_adj_list(&self, node: usize) -> impl Iterator<Item = (usize, Capacity)>;
}

impl<D: Direction> FlowGraph for GenericGraph<CapacityEdge, D> {
    fn get_node_count(&self) -> usize {
        self.vertex_count()
    }

    fn get_node_adj_list(&self, node: usize) -> impl Iterator<Item = (usize, Capacity)> {
        self.edges(node).iter().map(|e| (e.to, e.capacity))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResidualEdge {
    pub to: usize,
    pub residual: Capacity,
    /// Net flow, skew-symmetric with the paired edge.
    pub flow: Capacity,
    /// Capacity in the input network, zero for the added reverse edges.
    pub capacity: Capacity,
    /// Position of the paired edge in `to`'s list.
    pub reverse: usize,
    pub original: bool,
}

impl Edge for ResidualEdge {
    fn to(&self) -> usize {
        self.to
    }
}

/// Restricts a traversal to edges that can still carry flow.
#[derive(Clone, Copy, Debug, Default)]
pub struct PositiveResidual;

impl Visitor<ResidualEdge> for PositiveResidual {
    fn is_traversable(&self, edge: &ResidualEdge) -> bool {
        edge.residual > 0
    }
}

#[derive(Clone, Debug)]
pub struct ResidualFlowGraph {
    graph: GenericGraph<ResidualEdge>,
}

impl ResidualFlowGraph {
    /// Every input edge `u -> v` becomes a forward residual edge holding its
    /// capacity, paired with a reverse `v -> u` edge holding zero.
    pub fn new<F: FlowGraph + ?Sized>(network: &F) -> Self {
        let nodes_count = network.get_node_count();
        let mut graph: GenericGraph<ResidualEdge> = GenericGraph::new(nodes_count);

        for u in 0..nodes_count {
            for (v, capacity) in network.get_node_adj_list(u) {
                let forward = graph.edges(u).len();
                let reverse = if u == v {
                    forward + 1
                } else {
                    graph.edges(v).len()
                };

                graph.push_edge(
                    u,
                    ResidualEdge {
                        to: v,
                        residual: capacity,
                        flow: 0,
                        capacity,
                        reverse,
                        original: true,
                    },
                );
                graph.push_edge(
                    v,
                    ResidualEdge {
                        to: u,
                        residual: 0,
                        flow: 0,
                        capacity: 0,
                        reverse: forward,
                        original: false,
                    },
                );
            }
        }

        Self { graph }
    }

    pub fn vertex_count(&self) -> usize {
        self.graph.vertex_count()
    }

    pub fn graph(&self) -> &GenericGraph<ResidualEdge> {
        &self.graph
    }

    pub fn edges(&self, u: usize) -> &[ResidualEdge] {
        self.graph.edges(u)
    }

    /// Position in `u`'s list of the first `u -> v` edge with residual capacity left.
    pub fn find_edge(&self, u: usize, v: usize) -> Result<usize> {
        self.graph
            .edges(u)
            .iter()
            .position(|e| e.to == v && e.residual > 0)
            .ok_or(GraphError::EdgeNotFound { from: u, to: v })
    }

    /// Smallest residual capacity along `path`. A path without edges has no
    /// limit and yields `Capacity::MAX`.
    pub fn bottleneck(&self, path: &[usize]) -> Result<Capacity> {
        let mut volume = Capacity::MAX;
        for step in path.windows(2) {
            let (u, v) = (step[0], step[1]);
            let edge_idx = self.find_edge(u, v)?;
            volume = volume.min(self.graph.edges(u)[edge_idx].residual);
        }
        Ok(volume)
    }

    pub fn augment(&mut self, path: &[usize], amount: Capacity) -> Result<()> {
        for step in path.windows(2) {
            let (u, v) = (step[0], step[1]);
            let edge_idx = self.find_edge(u, v)?;
            self.push_along(u, edge_idx, amount);
        }
        Ok(())
    }

    /// Moves `amount` units over the `edge_idx`-th edge of `u` and its pair.
    pub(crate) fn push_along(&mut self, u: usize, edge_idx: usize, amount: Capacity) {
        let edge = &mut self.graph.edges_mut(u)[edge_idx];
        edge.residual -= amount;
        edge.flow += amount;
        let (v, reverse) = (edge.to, edge.reverse);

        let paired = &mut self.graph.edges_mut(v)[reverse];
        paired.residual += amount;
        paired.flow -= amount;
    }

    /// Outflow minus inflow of `vertex`.
    pub fn net_flow_out(&self, vertex: usize) -> Capacity {
        self.graph.edges(vertex).iter().map(|e| e.flow).sum()
    }

    /// Flow carried by the input edges `u -> v`.
    pub fn flow(&self, u: usize, v: usize) -> Capacity {
        self.graph
            .edges(u)
            .iter()
            .filter(|e| e.original && e.to == v)
            .map(|e| e.flow)
            .sum()
    }

    /// `(from, to, flow)` of every input edge, in input order.
    pub fn original_flows(&self) -> Vec<(usize, usize, Capacity)> {
        (0..self.vertex_count())
            .flat_map(|u| {
                self.graph
                    .edges(u)
                    .iter()
                    .filter(|e| e.original)
                    .map(move |e| (u, e.to, e.flow))
            })
            .collect()
    }

    /// Vertices reachable from `source` over edges with residual capacity.
    pub fn reachable_from(&self, source: usize) -> Vec<bool> {
        self.graph
            .traverse(source, TraversalOrder::BreadthFirst, &mut PositiveResidual)
            .discovered
    }
}
