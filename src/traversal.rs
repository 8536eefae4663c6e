use std::collections::VecDeque;

use crate::graph::{Direction, Edge, GenericGraph};

/// Per-run bookkeeping shared by both traversal orders.
///
/// `parent[v]` is only ever set together with `discovered[v]`, and the start
/// vertex of a run keeps `None`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TraversalState {
    pub discovered: Vec<bool>,
    pub processed: Vec<bool>,
    pub parent: Vec<Option<usize>>,
}

impl TraversalState {
    pub fn new(size: usize) -> Self {
        Self {
            discovered: vec![false; size],
            processed: vec![false; size],
            parent: vec![None; size],
        }
    }

    /// Clears every flag so the same state can drive another run over the same graph.
    pub fn reset(&mut self) {
        self.discovered.fill(false);
        self.processed.fill(false);
        self.parent.fill(None);
    }

    pub fn path(&self, source: usize, target: usize) -> Vec<usize> {
        build_path(source, target, &self.parent)
    }
}

/// Callbacks invoked by the traversal engine. Every method has a no-op default.
pub trait Visitor<E> {
    /// Called once when `u` is first taken out of the frontier.
    fn on_enter(&mut self, _u: usize) {}

    /// Called once after all edges of `u` were examined.
    fn on_exit(&mut self, _u: usize) {}

    /// Called for tree edges as well as for back/cross edges.
    fn on_edge(&mut self, _u: usize, _edge: &E) {}

    /// Edges rejected here are never used to discover a vertex.
    fn is_traversable(&self, _edge: &E) -> bool {
        true
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct NoopVisitor;

impl<E> Visitor<E> for NoopVisitor {}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TraversalOrder {
    DepthFirst,
    BreadthFirst,
}

impl<E: Edge, D: Direction> GenericGraph<E, D> {
    /// Runs a single traversal from `start` with a fresh state.
    pub fn traverse(
        &self,
        start: usize,
        order: TraversalOrder,
        visitor: &mut impl Visitor<E>,
    ) -> TraversalState {
        let mut state = TraversalState::new(self.vertex_count());
        match order {
            TraversalOrder::DepthFirst => self.depth_first(start, &mut state, visitor),
            TraversalOrder::BreadthFirst => self.breadth_first(start, &mut state, visitor),
        }
        state
    }

    pub fn depth_first(
        &self,
        start: usize,
        state: &mut TraversalState,
        visitor: &mut impl Visitor<E>,
    ) {
        // (vertex, next edge to examine)
        let mut stack = vec![(start, 0usize)];
        state.discovered[start] = true;
        visitor.on_enter(start);

        while let Some(frame) = stack.last_mut() {
            let u = frame.0;
            let edges = self.edges(u);

            let Some(edge) = edges.get(frame.1) else {
                stack.pop();
                visitor.on_exit(u);
                state.processed[u] = true;
                continue;
            };
            frame.1 += 1;

            let v = edge.to();
            if !state.discovered[v] && visitor.is_traversable(edge) {
                state.parent[v] = Some(u);
                visitor.on_edge(u, edge);
                state.discovered[v] = true;
                visitor.on_enter(v);
                stack.push((v, 0));
            } else if !state.processed[v] || D::DIRECTED {
                visitor.on_edge(u, edge);
            }
        }
    }

    pub fn breadth_first(
        &self,
        start: usize,
        state: &mut TraversalState,
        visitor: &mut impl Visitor<E>,
    ) {
        let mut queue = VecDeque::new();
        queue.push_back(start);
        state.discovered[start] = true;

        while let Some(u) = queue.pop_front() {
            visitor.on_enter(u);
            state.processed[u] = true;

            for edge in self.edges(u) {
                let v = edge.to();
                if !state.processed[v] || D::DIRECTED {
                    visitor.on_edge(u, edge);
                }
                if !state.discovered[v] && visitor.is_traversable(edge) {
                    queue.push_back(v);
                    state.discovered[v] = true;
                    state.parent[v] = Some(u);
                }
            }

            visitor.on_exit(u);
        }
    }
}

/// Walks `parent` back from `target` to `source`.
///
/// Returns the vertices in forward order, both ends included, or an empty
/// path when `target` is not reachable from `source` in the parent tree.
pub fn build_path(source: usize, target: usize, parent: &[Option<usize>]) -> Vec<usize> {
    let mut path = vec![target];
    let mut current = target;

    while current != source {
        let Some(previous) = parent[current] else {
            return vec![];
        };
        current = previous;
        path.push(current);
    }

    path.reverse();
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{CapacityEdge, CapacityGraph, DiGraph, PlainEdge, UnGraph};

    #[derive(Default)]
    struct Recorder {
        entered: Vec<usize>,
        exited: Vec<usize>,
        edges: Vec<(usize, usize)>,
    }

    impl Visitor<PlainEdge> for Recorder {
        fn on_enter(&mut self, u: usize) {
            self.entered.push(u);
        }

        fn on_exit(&mut self, u: usize) {
            self.exited.push(u);
        }

        fn on_edge(&mut self, u: usize, edge: &PlainEdge) {
            self.edges.push((u, edge.to));
        }
    }

    fn diamond() -> DiGraph {
        // 0 -> 1 -> 3, 0 -> 2 -> 3, 3 -> 0
        let mut graph = DiGraph::new(5);
        for (u, v) in [(0, 1), (0, 2), (1, 3), (2, 3), (3, 0)] {
            graph.connect(u, v, ());
        }
        graph
    }

    #[test]
    fn depth_first_visits_in_recursion_order() {
        let graph = diamond();
        let mut recorder = Recorder::default();
        let state = graph.traverse(0, TraversalOrder::DepthFirst, &mut recorder);

        assert_eq!(recorder.entered, vec![0, 1, 3, 2]);
        assert_eq!(recorder.exited, vec![3, 1, 2, 0]);
        // Directed graphs report every edge, tree or not.
        assert_eq!(recorder.edges.len(), 5);
        assert_eq!(state.parent, vec![None, Some(0), Some(0), Some(1), None]);
        assert!(!state.discovered[4]);
        assert_eq!(state.processed, vec![true, true, true, true, false]);
    }

    #[test]
    fn breadth_first_visits_in_queue_order() {
        let graph = diamond();
        let mut recorder = Recorder::default();
        let state = graph.traverse(0, TraversalOrder::BreadthFirst, &mut recorder);

        assert_eq!(recorder.entered, vec![0, 1, 2, 3]);
        assert_eq!(recorder.exited, vec![0, 1, 2, 3]);
        assert_eq!(state.parent, vec![None, Some(0), Some(0), Some(1), None]);
        assert_eq!(state.path(0, 3), vec![0, 1, 3]);
        assert!(state.path(0, 4).is_empty());
    }

    #[test]
    fn undirected_skips_edges_to_processed_vertices() {
        let mut graph = UnGraph::new(3);
        graph.connect(0, 1, ());
        graph.connect(1, 2, ());

        let mut recorder = Recorder::default();
        graph.traverse(0, TraversalOrder::DepthFirst, &mut recorder);

        // Mirrored edges back to the unfinished parent are still reported.
        assert_eq!(recorder.edges, vec![(0, 1), (1, 0), (1, 2), (2, 1)]);
    }

    struct PositiveOnly;

    impl Visitor<CapacityEdge> for PositiveOnly {
        fn is_traversable(&self, edge: &CapacityEdge) -> bool {
            edge.capacity > 0
        }
    }

    #[test]
    fn predicate_restricts_discovery() {
        let mut graph = CapacityGraph::new(3);
        graph.connect(0, 1, 0);
        graph.connect(0, 2, 4);
        graph.connect(2, 1, 1);

        let state = graph.traverse(0, TraversalOrder::BreadthFirst, &mut PositiveOnly);
        assert_eq!(state.path(0, 1), vec![0, 2, 1]);

        let state = graph.traverse(0, TraversalOrder::BreadthFirst, &mut NoopVisitor);
        assert_eq!(state.path(0, 1), vec![0, 1]);
    }

    #[test]
    fn reset_allows_rerun() {
        let graph = diamond();
        let mut state = TraversalState::new(graph.vertex_count());
        graph.breadth_first(0, &mut state, &mut NoopVisitor);
        let first = state.clone();

        state.reset();
        assert_eq!(state, TraversalState::new(graph.vertex_count()));

        graph.breadth_first(0, &mut state, &mut NoopVisitor);
        assert_eq!(state, first);
    }

    #[test]
    fn build_path_edge_cases() {
        let parent = vec![None, Some(0), Some(1), None];

        assert_eq!(build_path(0, 2, &parent), vec![0, 1, 2]);
        assert_eq!(build_path(0, 2, &parent), build_path(0, 2, &parent));
        assert_eq!(build_path(1, 2, &parent), vec![1, 2]);
        assert_eq!(build_path(2, 2, &parent), vec![2]);
        assert!(build_path(0, 3, &parent).is_empty());
        assert!(build_path(2, 0, &parent).is_empty());
    }
}
