use crate::{
    graph::{ConnectEdge, Directed, Edge, GenericGraph},
    traversal::{TraversalState, Visitor},
};

#[derive(Default)]
struct PostOrder {
    order: Vec<usize>,
}

impl<E> Visitor<E> for PostOrder {
    fn on_exit(&mut self, u: usize) {
        self.order.push(u);
    }
}

#[derive(Default)]
struct Components {
    components: Vec<Vec<usize>>,
}

impl<E> Visitor<E> for Components {
    fn on_exit(&mut self, u: usize) {
        if let Some(component) = self.components.last_mut() {
            component.push(u);
        }
    }
}

impl<E: Edge> GenericGraph<E, Directed> {
    /// Reverse post-order of a depth-first walk started from every
    /// undiscovered vertex in index order. On a DAG every edge points forward.
    pub fn topological_sort(&self) -> Vec<usize> {
        let mut state = TraversalState::new(self.vertex_count());
        let mut post_order = PostOrder {
            order: Vec::with_capacity(self.vertex_count()),
        };

        for u in 0..self.vertex_count() {
            if !state.discovered[u] {
                self.depth_first(u, &mut state, &mut post_order);
            }
        }

        post_order.order.reverse();
        post_order.order
    }
}

impl<E: ConnectEdge> GenericGraph<E, Directed> {
    /// Kosaraju: walk the transpose in topological order of the graph; each
    /// walk collects one component. Components come out in topological order.
    pub fn strongly_connected_components(&self) -> Vec<Vec<usize>> {
        let transposed = self.transposed();
        let mut state = TraversalState::new(self.vertex_count());
        let mut components = Components::default();

        for u in self.topological_sort() {
            if !state.discovered[u] {
                components.components.push(vec![]);
                transposed.depth_first(u, &mut state, &mut components);
            }
        }

        components.components
    }
}

#[cfg(test)]
mod tests {
    use crate::graph::DiGraph;

    fn sorted(mut component: Vec<usize>) -> Vec<usize> {
        component.sort_unstable();
        component
    }

    #[test]
    fn topological_order_of_dag() {
        let mut graph = DiGraph::new(5);
        for (u, v) in [(0, 2), (0, 3), (2, 1), (3, 2), (3, 4), (4, 1)] {
            graph.connect(u, v, ());
        }

        assert_eq!(graph.topological_sort(), vec![0, 3, 4, 2, 1]);
    }

    #[test]
    fn topological_order_covers_isolated_vertices() {
        let mut graph = DiGraph::new(4);
        graph.connect(2, 0, ());

        let order = graph.topological_sort();
        assert_eq!(order.len(), 4);
        let position = |v: usize| order.iter().position(|&x| x == v).unwrap();
        assert!(position(2) < position(0));
    }

    #[test]
    fn strongly_connected_components_in_order() {
        let mut graph = DiGraph::new(8);
        for (u, v) in [
            (0, 1),
            (1, 2),
            (1, 4),
            (1, 5),
            (2, 3),
            (2, 6),
            (3, 2),
            (3, 7),
            (4, 0),
            (4, 5),
            (5, 6),
            (6, 5),
            (6, 7),
            (7, 7),
        ] {
            graph.connect(u, v, ());
        }

        let components = graph
            .strongly_connected_components()
            .into_iter()
            .map(sorted)
            .collect::<Vec<_>>();
        assert_eq!(
            components,
            vec![vec![0, 1, 4], vec![2, 3], vec![5, 6], vec![7]]
        );
    }
}
