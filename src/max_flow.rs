use std::{fmt, str::FromStr};

use rustc_hash::FxHashSet;

use crate::{
    edmonds_karp::edmonds_karp,
    error::Result,
    graph::{Capacity, CapacityEdge, Direction, GenericGraph},
    push_relabel::{push_relabel, relabel_to_front},
    residual::{FlowGraph, ResidualFlowGraph},
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum MaxFlowAlgorithm {
    #[default]
    EdmondsKarp,
    PushRelabel,
    RelabelToFront,
}

impl MaxFlowAlgorithm {
    pub const ALL: [MaxFlowAlgorithm; 3] = [
        MaxFlowAlgorithm::EdmondsKarp,
        MaxFlowAlgorithm::PushRelabel,
        MaxFlowAlgorithm::RelabelToFront,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            MaxFlowAlgorithm::EdmondsKarp => "edmonds-karp",
            MaxFlowAlgorithm::PushRelabel => "push-relabel",
            MaxFlowAlgorithm::RelabelToFront => "relabel-to-front",
        }
    }
}

impl fmt::Display for MaxFlowAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MaxFlowAlgorithm {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        MaxFlowAlgorithm::ALL
            .into_iter()
            .find(|algorithm| algorithm.name() == s)
            .ok_or_else(|| {
                format!(
                    "unknown algorithm '{}', expected one of: edmonds-karp, push-relabel, relabel-to-front",
                    s
                )
            })
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct OperationCounts {
    pub augmentations: usize,
    pub pushes: usize,
    pub relabels: usize,
}

/// Result of a max-flow run, keeping the final residual graph around for
/// flow and cut readout.
#[derive(Clone, Debug)]
pub struct MaxFlow {
    pub value: Capacity,
    pub source: usize,
    pub sink: usize,
    pub algorithm: MaxFlowAlgorithm,
    pub counts: OperationCounts,
    residual: ResidualFlowGraph,
}

impl MaxFlow {
    pub fn residual(&self) -> &ResidualFlowGraph {
        &self.residual
    }

    pub fn flow(&self, u: usize, v: usize) -> Capacity {
        self.residual.flow(u, v)
    }

    /// Vertices still reachable from the source in the residual graph.
    pub fn source_side(&self) -> FxHashSet<usize> {
        self.residual
            .reachable_from(self.source)
            .into_iter()
            .enumerate()
            .filter_map(|(node, reachable)| reachable.then_some(node))
            .collect()
    }

    /// Input edges leaving the source side, sorted and without duplicates.
    pub fn min_cut(&self) -> Vec<(usize, usize)> {
        let reachable_nodes = self.source_side();

        let mut min_cut = FxHashSet::default();
        for &node in reachable_nodes.iter() {
            for edge in self.residual.edges(node) {
                if edge.original && edge.capacity > 0 && !reachable_nodes.contains(&edge.to) {
                    min_cut.insert((node, edge.to));
                }
            }
        }

        let mut min_cut = min_cut.into_iter().collect::<Vec<_>>();
        min_cut.sort_unstable();
        min_cut
    }

    /// Total input capacity leaving the source side. Equals `value`.
    pub fn min_cut_capacity(&self) -> Capacity {
        let reachable_nodes = self.source_side();
        reachable_nodes
            .iter()
            .flat_map(|&node| self.residual.edges(node))
            .filter(|edge| edge.original && !reachable_nodes.contains(&edge.to))
            .map(|edge| edge.capacity)
            .sum()
    }
}

pub fn max_flow<F: FlowGraph + ?Sized>(
    network: &F,
    source: usize,
    sink: usize,
    algorithm: MaxFlowAlgorithm,
) -> Result<MaxFlow> {
    let mut residual = ResidualFlowGraph::new(network);
    let mut counts = OperationCounts::default();

    let value = match algorithm {
        MaxFlowAlgorithm::EdmondsKarp => edmonds_karp(&mut residual, source, sink, &mut counts)?,
        MaxFlowAlgorithm::PushRelabel => push_relabel(&mut residual, source, sink, &mut counts),
        MaxFlowAlgorithm::RelabelToFront => {
            relabel_to_front(&mut residual, source, sink, &mut counts)
        }
    };

    log::debug!(
        "Max flow {} -> {} with {}: {} ({:?})",
        source,
        sink,
        algorithm,
        value,
        counts
    );

    Ok(MaxFlow {
        value,
        source,
        sink,
        algorithm,
        counts,
        residual,
    })
}

impl<D: Direction> GenericGraph<CapacityEdge, D> {
    pub fn max_flow(&self, source: usize, sink: usize) -> Result<Capacity> {
        Ok(max_flow(self, source, sink, MaxFlowAlgorithm::EdmondsKarp)?.value)
    }
}
