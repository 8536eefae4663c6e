use std::marker::PhantomData;

pub type Capacity = i64;
pub type Weight = i64;

/// Anything stored in an adjacency list: it only has to know where it points.
pub trait Edge {
    fn to(&self) -> usize;
}

/// Edges that can be created by [`GenericGraph::connect`], and re-created
/// pointing elsewhere with the same payload (used by transposition).
pub trait ConnectEdge: Edge + Clone {
    type Payload: Clone;

    fn with_target(to: usize, payload: Self::Payload) -> Self;
    fn payload(&self) -> Self::Payload;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PlainEdge {
    pub to: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WeightedEdge {
    pub to: usize,
    pub weight: Weight,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CapacityEdge {
    pub to: usize,
    pub capacity: Capacity,
}

impl Edge for PlainEdge {
    fn to(&self) -> usize {
        self.to
    }
}

impl ConnectEdge for PlainEdge {
    type Payload = ();

    fn with_target(to: usize, _payload: ()) -> Self {
        Self { to }
    }

    fn payload(&self) {}
}

impl Edge for WeightedEdge {
    fn to(&self) -> usize {
        self.to
    }
}

impl ConnectEdge for WeightedEdge {
    type Payload = Weight;

    fn with_target(to: usize, weight: Weight) -> Self {
        Self { to, weight }
    }

    fn payload(&self) -> Weight {
        self.weight
    }
}

impl Edge for CapacityEdge {
    fn to(&self) -> usize {
        self.to
    }
}

impl ConnectEdge for CapacityEdge {
    type Payload = Capacity;

    fn with_target(to: usize, capacity: Capacity) -> Self {
        Self { to, capacity }
    }

    fn payload(&self) -> Capacity {
        self.capacity
    }
}

pub trait Direction {
    const DIRECTED: bool;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct Directed;

#[derive(Clone, Copy, Debug, Default)]
pub struct Undirected;

impl Direction for Directed {
    const DIRECTED: bool = true;
}

impl Direction for Undirected {
    const DIRECTED: bool = false;
}

/// Fixed-size adjacency list graph, generic over the edge payload and over
/// directedness. Undirected graphs store every logical edge once per endpoint.
#[derive(Clone, Debug)]
pub struct GenericGraph<E, D = Directed> {
    adjacency: Vec<Vec<E>>,
    _direction: PhantomData<D>,
}

pub type DiGraph = GenericGraph<PlainEdge, Directed>;
pub type UnGraph = GenericGraph<PlainEdge, Undirected>;
pub type CapacityGraph = GenericGraph<CapacityEdge, Directed>;
pub type WeightedGraph<D = Directed> = GenericGraph<WeightedEdge, D>;

impl<E, D: Direction> GenericGraph<E, D> {
    pub fn new(size: usize) -> Self {
        Self {
            adjacency: (0..size).map(|_| Vec::new()).collect(),
            _direction: PhantomData,
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn is_directed(&self) -> bool {
        D::DIRECTED
    }

    pub fn edges(&self, u: usize) -> &[E] {
        &self.adjacency[u]
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(|list| list.len()).sum()
    }

    pub(crate) fn edges_mut(&mut self, u: usize) -> &mut [E] {
        &mut self.adjacency[u]
    }

    /// Appends a raw edge to `u`'s list and returns its position there.
    pub(crate) fn push_edge(&mut self, u: usize, edge: E) -> usize {
        self.adjacency[u].push(edge);
        self.adjacency[u].len() - 1
    }
}

impl<E: ConnectEdge, D: Direction> GenericGraph<E, D> {
    pub fn connect(&mut self, u: usize, v: usize, payload: E::Payload) {
        if !D::DIRECTED {
            self.adjacency[v].push(E::with_target(u, payload.clone()));
        }
        self.adjacency[u].push(E::with_target(v, payload));
    }
}

impl<E: ConnectEdge> GenericGraph<E, Directed> {
    /// Reverses every edge in place, keeping its payload.
    pub fn transpose(&mut self) {
        let size = self.adjacency.len();
        let old = std::mem::replace(
            &mut self.adjacency,
            (0..size).map(|_| Vec::new()).collect(),
        );
        for (u, edges) in old.into_iter().enumerate() {
            for edge in edges {
                self.adjacency[edge.to()].push(E::with_target(u, edge.payload()));
            }
        }
    }

    pub fn transposed(&self) -> Self {
        let mut graph = self.clone();
        graph.transpose();
        graph
    }
}
