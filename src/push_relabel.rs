use crate::graph::Capacity;
use crate::max_flow::OperationCounts;
use crate::residual::ResidualFlowGraph;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct Vertice {
    height: usize,
    excess: Capacity,
}

/// Preflow over a residual graph, with the source edges already saturated.
struct Preflow<'a> {
    residual: &'a mut ResidualFlowGraph,
    vertices: Vec<Vertice>,
    source: usize,
    sink: usize,
    counts: &'a mut OperationCounts,
}

impl<'a> Preflow<'a> {
    fn new(
        residual: &'a mut ResidualFlowGraph,
        source: usize,
        sink: usize,
        counts: &'a mut OperationCounts,
    ) -> Self {
        let nodes_count = residual.vertex_count();
        let mut vertices = vec![Vertice::default(); nodes_count];
        vertices[source].height = nodes_count;

        for edge_idx in 0..residual.edges(source).len() {
            let edge = residual.edges(source)[edge_idx];
            if edge.residual > 0 && edge.to != source {
                residual.push_along(source, edge_idx, edge.residual);
                vertices[edge.to].excess += edge.residual;
                vertices[source].excess -= edge.residual;
            }
        }

        Self {
            residual,
            vertices,
            source,
            sink,
            counts,
        }
    }

    fn is_active(&self, u: usize) -> bool {
        u != self.source && u != self.sink && self.vertices[u].excess > 0
    }

    fn is_admissible(&self, u: usize, edge_idx: usize) -> bool {
        let edge = &self.residual.edges(u)[edge_idx];
        edge.residual > 0 && self.vertices[u].height == self.vertices[edge.to].height + 1
    }

    fn push(&mut self, u: usize, edge_idx: usize) {
        let edge = self.residual.edges(u)[edge_idx];
        let amount = self.vertices[u].excess.min(edge.residual);

        self.residual.push_along(u, edge_idx, amount);
        self.vertices[u].excess -= amount;
        self.vertices[edge.to].excess += amount;
        self.counts.pushes += 1;
    }

    /// Lifts `u` just above its lowest neighbor still reachable in the residual graph.
    fn relabel(&mut self, u: usize) {
        let lowest = self
            .residual
            .edges(u)
            .iter()
            .filter(|e| e.residual > 0)
            .map(|e| self.vertices[e.to].height)
            .min();

        if let Some(lowest) = lowest {
            debug_assert!(lowest >= self.vertices[u].height);
            self.vertices[u].height = lowest + 1;
            self.counts.relabels += 1;
            debug_assert!(self.vertices[u].height < 2 * self.vertices.len());
        }
    }

    fn push_any(&mut self) -> bool {
        for u in 0..self.vertices.len() {
            if !self.is_active(u) {
                continue;
            }
            for edge_idx in 0..self.residual.edges(u).len() {
                if self.is_admissible(u, edge_idx) {
                    self.push(u, edge_idx);
                    return true;
                }
            }
        }
        false
    }

    fn relabel_any(&mut self) -> bool {
        let active = (0..self.vertices.len()).find(|&u| self.is_active(u));
        match active {
            Some(u) => {
                self.relabel(u);
                true
            }
            None => false,
        }
    }

    /// Pushes from `u` until its excess is gone, relabeling whenever the
    /// edge scan wraps around.
    fn discharge(&mut self, u: usize, current: &mut usize) {
        while self.vertices[u].excess > 0 {
            if *current == self.residual.edges(u).len() {
                self.relabel(u);
                *current = 0;
            } else if self.is_admissible(u, *current) {
                self.push(u, *current);
            } else {
                *current += 1;
            }
        }
    }

    fn value(&self) -> Capacity {
        self.residual.net_flow_out(self.source)
    }
}

/// Generic push-relabel: push from any active vertex, otherwise relabel one.
pub fn push_relabel(
    residual: &mut ResidualFlowGraph,
    source: usize,
    sink: usize,
    counts: &mut OperationCounts,
) -> Capacity {
    if source == sink {
        return 0;
    }

    let mut preflow = Preflow::new(residual, source, sink, counts);
    while preflow.push_any() || preflow.relabel_any() {}

    log::debug!(
        "Push-relabel finished with {} pushes and {} relabels",
        preflow.counts.pushes,
        preflow.counts.relabels
    );
    preflow.value()
}

/// Relabel-to-front: discharge vertices in list order, moving a vertex to
/// the front of the list whenever its discharge raised its height.
pub fn relabel_to_front(
    residual: &mut ResidualFlowGraph,
    source: usize,
    sink: usize,
    counts: &mut OperationCounts,
) -> Capacity {
    if source == sink {
        return 0;
    }

    let nodes_count = residual.vertex_count();
    let mut preflow = Preflow::new(residual, source, sink, counts);
    let mut list = (0..nodes_count)
        .filter(|&u| u != source && u != sink)
        .collect::<Vec<_>>();
    let mut current = vec![0; nodes_count];

    let mut position = 0;
    while position < list.len() {
        let u = list[position];
        let old_height = preflow.vertices[u].height;
        preflow.discharge(u, &mut current[u]);

        if preflow.vertices[u].height > old_height {
            list.remove(position);
            list.insert(0, u);
            position = 0;
        }
        position += 1;
    }

    log::debug!(
        "Relabel-to-front finished with {} pushes and {} relabels",
        preflow.counts.pushes,
        preflow.counts.relabels
    );
    preflow.value()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::CapacityGraph;

    fn textbook() -> CapacityGraph {
        let mut network = CapacityGraph::new(6);
        for (u, v, c) in [
            (0, 1, 16),
            (0, 2, 13),
            (1, 3, 12),
            (2, 1, 4),
            (2, 4, 14),
            (3, 2, 9),
            (3, 5, 20),
            (4, 3, 7),
            (4, 5, 4),
        ] {
            network.connect(u, v, c);
        }
        network
    }

    fn with_cycle() -> CapacityGraph {
        let mut network = CapacityGraph::new(5);
        for (u, v, c) in [
            (0, 1, 12),
            (0, 2, 14),
            (1, 2, 5),
            (1, 4, 16),
            (2, 3, 8),
            (3, 1, 7),
            (3, 4, 10),
        ] {
            network.connect(u, v, c);
        }
        network
    }

    type Algorithm = fn(&mut ResidualFlowGraph, usize, usize, &mut OperationCounts) -> Capacity;

    fn check(algorithm: Algorithm, network: &CapacityGraph, sink: usize, expected: Capacity) {
        let mut residual = ResidualFlowGraph::new(network);
        let mut counts = OperationCounts::default();

        assert_eq!(algorithm(&mut residual, 0, sink, &mut counts), expected);
        for u in 1..network.vertex_count() {
            if u != sink {
                assert_eq!(residual.net_flow_out(u), 0, "vertex {} keeps excess", u);
            }
        }
        assert_eq!(residual.net_flow_out(sink), -expected);
        assert!(counts.pushes > 0);
        assert_eq!(counts.augmentations, 0);
    }

    #[test]
    fn generic_push_relabel() {
        check(push_relabel, &textbook(), 5, 23);
        check(push_relabel, &with_cycle(), 4, 20);
    }

    #[test]
    fn relabel_to_front_variant() {
        check(relabel_to_front, &textbook(), 5, 23);
        check(relabel_to_front, &with_cycle(), 4, 20);
    }

    #[test]
    fn heights_stay_bounded() {
        let network = with_cycle();
        let mut residual = ResidualFlowGraph::new(&network);
        let mut counts = OperationCounts::default();
        let mut preflow = Preflow::new(&mut residual, 0, 4, &mut counts);
        while preflow.push_any() || preflow.relabel_any() {}

        let nodes_count = network.vertex_count();
        assert_eq!(preflow.vertices[0].height, nodes_count);
        assert!(preflow.vertices.iter().all(|v| v.height < 2 * nodes_count));
        assert!((1..4).all(|u| preflow.vertices[u].excess == 0));
        assert_eq!(preflow.vertices[4].excess, 20);
    }

    #[test]
    fn unreachable_sink_returns_everything_to_source() {
        let mut network = CapacityGraph::new(4);
        network.connect(0, 1, 5);
        network.connect(1, 2, 3);
        network.connect(3, 2, 1);

        let mut residual = ResidualFlowGraph::new(&network);
        let mut counts = OperationCounts::default();
        assert_eq!(relabel_to_front(&mut residual, 0, 3, &mut counts), 0);
        assert_eq!(residual.flow(0, 1), 0);
    }
}
