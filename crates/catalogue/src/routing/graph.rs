//! Directed weighted graph with deterministic edge enumeration.

/// Index of a vertex in a [`DirectedGraph`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct VertexId(pub(crate) u32);

impl VertexId {
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// Index of an edge in a [`DirectedGraph`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct EdgeId(pub(crate) u32);

impl EdgeId {
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Clone, Copy, Debug)]
pub struct Edge {
    pub from: VertexId,
    pub to: VertexId,
    /// Non-negative travel time in minutes.
    pub weight: f64,
}

/// Adjacency-list graph over a fixed vertex count.
///
/// Edges are stored in insertion order, and each vertex's outgoing list
/// preserves that order, so relaxation visits edges deterministically and
/// equal-cost paths resolve the same way on every build.
#[derive(Debug)]
pub struct DirectedGraph {
    edges: Vec<Edge>,
    adjacency: Vec<Vec<EdgeId>>,
}

impl DirectedGraph {
    pub fn new(vertex_count: usize) -> Self {
        Self {
            edges: Vec::new(),
            adjacency: vec![Vec::new(); vertex_count],
        }
    }

    pub fn add_edge(&mut self, from: VertexId, to: VertexId, weight: f64) -> EdgeId {
        debug_assert!(weight >= 0.0 && weight.is_finite());
        let id = EdgeId(self.edges.len() as u32);
        self.edges.push(Edge { from, to, weight });
        self.adjacency[from.index()].push(id);
        id
    }

    pub fn edge(&self, id: EdgeId) -> &Edge {
        &self.edges[id.index()]
    }

    /// Outgoing edges of a vertex, in insertion order.
    pub fn edges_from(&self, vertex: VertexId) -> impl Iterator<Item = EdgeId> + '_ {
        self.adjacency[vertex.index()].iter().copied()
    }

    pub fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}
