//! Single-source shortest paths over non-negative edge weights.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use super::graph::{DirectedGraph, EdgeId, VertexId};

/// Heap entry ordered by cost ascending (min-heap via reversed `Ord`),
/// with the vertex index as a deterministic tie-break.
#[derive(Clone, Copy, Debug)]
struct QueueEntry {
    cost: f64,
    vertex: VertexId,
}

impl PartialEq for QueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for QueueEntry {}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.vertex.0.cmp(&self.vertex.0))
    }
}

/// Dijkstra from `source` to `target`.
///
/// Returns the total cost and the edges of the path in travel order, or
/// `None` if `target` is unreachable. Relaxation is strictly-less, so among
/// equal-cost paths the first one discovered under the graph's edge
/// enumeration order wins.
pub fn shortest_path(
    graph: &DirectedGraph,
    source: VertexId,
    target: VertexId,
) -> Option<(f64, Vec<EdgeId>)> {
    let mut dist = vec![f64::INFINITY; graph.vertex_count()];
    let mut prev_edge: Vec<Option<EdgeId>> = vec![None; graph.vertex_count()];
    let mut heap = BinaryHeap::new();

    dist[source.index()] = 0.0;
    heap.push(QueueEntry {
        cost: 0.0,
        vertex: source,
    });

    while let Some(QueueEntry { cost, vertex }) = heap.pop() {
        if vertex == target {
            break;
        }
        // Stale entry, a shorter path to this vertex was already settled.
        if cost > dist[vertex.index()] {
            continue;
        }

        for edge_id in graph.edges_from(vertex) {
            let edge = graph.edge(edge_id);
            let next_cost = cost + edge.weight;
            if next_cost < dist[edge.to.index()] {
                dist[edge.to.index()] = next_cost;
                prev_edge[edge.to.index()] = Some(edge_id);
                heap.push(QueueEntry {
                    cost: next_cost,
                    vertex: edge.to,
                });
            }
        }
    }

    if dist[target.index()].is_infinite() {
        return None;
    }

    // Walk predecessor edges back from the target.
    let mut edges = Vec::new();
    let mut vertex = target;
    while let Some(edge_id) = prev_edge[vertex.index()] {
        edges.push(edge_id);
        vertex = graph.edge(edge_id).from;
    }
    edges.reverse();

    Some((dist[target.index()], edges))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_trivial_same_vertex() {
        let graph = DirectedGraph::new(1);
        let (cost, edges) = shortest_path(&graph, VertexId(0), VertexId(0)).unwrap();
        assert_eq!(cost, 0.0);
        assert!(edges.is_empty());
    }

    #[test]
    fn test_unreachable() {
        let mut graph = DirectedGraph::new(3);
        graph.add_edge(VertexId(0), VertexId(1), 1.0);
        assert!(shortest_path(&graph, VertexId(0), VertexId(2)).is_none());
        // Edges are directed: the reverse query is unreachable too.
        assert!(shortest_path(&graph, VertexId(1), VertexId(0)).is_none());
    }

    #[test]
    fn test_picks_cheaper_indirect_path() {
        let mut graph = DirectedGraph::new(4);
        graph.add_edge(VertexId(0), VertexId(3), 10.0);
        let a = graph.add_edge(VertexId(0), VertexId(1), 2.0);
        let b = graph.add_edge(VertexId(1), VertexId(2), 3.0);
        let c = graph.add_edge(VertexId(2), VertexId(3), 4.0);

        let (cost, edges) = shortest_path(&graph, VertexId(0), VertexId(3)).unwrap();
        assert_relative_eq!(cost, 9.0);
        assert_eq!(edges, vec![a, b, c]);
    }

    #[test]
    fn test_equal_cost_tie_goes_to_first_discovered() {
        let mut graph = DirectedGraph::new(3);
        let first = graph.add_edge(VertexId(0), VertexId(2), 5.0);
        graph.add_edge(VertexId(0), VertexId(1), 2.0);
        graph.add_edge(VertexId(1), VertexId(2), 3.0);

        // Both paths cost 5; strictly-less relaxation keeps the direct edge
        // discovered first.
        let (cost, edges) = shortest_path(&graph, VertexId(0), VertexId(2)).unwrap();
        assert_relative_eq!(cost, 5.0);
        assert_eq!(edges, vec![first]);
    }
}
