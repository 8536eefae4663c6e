use std::{cmp::Reverse, collections::BinaryHeap};

use crate::{
    graph::{Direction, GenericGraph, Weight, WeightedEdge},
    traversal::build_path,
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShortestPaths {
    pub source: usize,
    /// `None` for vertices the source cannot reach.
    pub distance: Vec<Option<Weight>>,
    pub parent: Vec<Option<usize>>,
}

impl ShortestPaths {
    pub fn path_to(&self, target: usize) -> Vec<usize> {
        build_path(self.source, target, &self.parent)
    }
}

impl<D: Direction> GenericGraph<WeightedEdge, D> {
    /// Dijkstra with lazy deletion. Weights must be non-negative.
    pub fn dijkstra(&self, source: usize) -> ShortestPaths {
        let nodes_count = self.vertex_count();
        let mut distance = vec![None; nodes_count];
        let mut parent = vec![None; nodes_count];
        let mut known = vec![false; nodes_count];
        let mut queue = BinaryHeap::with_capacity(nodes_count);

        distance[source] = Some(0);
        queue.push(Reverse((0, source)));

        while let Some(Reverse((dist, u))) = queue.pop() {
            if known[u] {
                continue;
            }
            known[u] = true;

            for edge in self.edges(u) {
                debug_assert!(edge.weight >= 0);
                let candidate = dist + edge.weight;
                if !known[edge.to] && distance[edge.to].map_or(true, |d| candidate < d) {
                    distance[edge.to] = Some(candidate);
                    parent[edge.to] = Some(u);
                    queue.push(Reverse((candidate, edge.to)));
                }
            }
        }

        ShortestPaths {
            source,
            distance,
            parent,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::graph::{Directed, Undirected, WeightedGraph};

    #[test]
    fn distances_from_source() {
        let mut graph = WeightedGraph::<Directed>::new(6);
        for (u, v, w) in [
            (0, 1, 3),
            (0, 5, 7),
            (1, 2, 4),
            (1, 4, 2),
            (3, 4, 6),
            (5, 2, 3),
            (5, 4, 1),
        ] {
            graph.connect(u, v, w);
        }

        let paths = graph.dijkstra(0);
        assert_eq!(
            paths.distance,
            vec![Some(0), Some(3), Some(7), None, Some(5), Some(7)]
        );
        assert_eq!(paths.path_to(4), vec![0, 1, 4]);
        assert!(paths.path_to(3).is_empty());
    }

    #[test]
    fn undirected_edges_work_both_ways() {
        let mut graph = WeightedGraph::<Undirected>::new(3);
        graph.connect(2, 1, 4);
        graph.connect(1, 0, 1);

        let paths = graph.dijkstra(0);
        assert_eq!(paths.distance, vec![Some(0), Some(1), Some(5)]);
        assert_eq!(paths.path_to(2), vec![0, 1, 2]);
    }
}
