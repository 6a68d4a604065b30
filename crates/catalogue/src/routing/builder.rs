//! Routing graph construction and point-to-point queries.

use crate::catalogue::TransitCatalogue;
use crate::handles::{BusId, StopId};
use crate::models::types::Result;
use crate::routing::graph::{DirectedGraph, EdgeId, VertexId};
use crate::routing::router::shortest_path;
use crate::routing::{Itinerary, RoutingSettings, Segment};

/// Conversion from km/h to meters per minute.
const KPH_TO_METERS_PER_MINUTE: f64 = 1000.0 / 60.0;

/// Metadata for one graph edge, created at build time and immutable after.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EdgeInfo {
    pub from: StopId,
    pub to: StopId,
    /// `None` for wait edges.
    pub bus: Option<BusId>,
    /// Stop-to-stop hops covered; zero for wait edges.
    pub span_count: u32,
    /// Travel time in minutes.
    pub weight: f64,
}

/// The frozen routing graph plus its query layer.
///
/// Built exactly once after the catalogue is fully populated, then serves
/// read-only queries. Shortest paths are computed lazily per query rather
/// than precomputed all-pairs, since the edge count grows with
/// buses × stops².
#[derive(Debug)]
pub struct RouteGraph {
    graph: DirectedGraph,
    // Indexed by EdgeId, in edge insertion order.
    edge_info: Vec<EdgeInfo>,
    // Indexed by StopId: (arrival vertex, departure vertex).
    vertex_index: Vec<(VertexId, VertexId)>,
}

impl RouteGraph {
    /// Build the routing graph for a fully populated catalogue.
    ///
    /// Fails with [`crate::models::types::CatalogueError::MissingDistance`]
    /// if any bus traverses consecutive stops with no recorded road
    /// distance; nothing is returned in that case, a partially built graph
    /// is never exposed.
    pub fn build(catalogue: &TransitCatalogue, settings: RoutingSettings) -> Result<Self> {
        let mut builder = Self {
            graph: DirectedGraph::new(2 * catalogue.stop_count()),
            edge_info: Vec::new(),
            vertex_index: Vec::with_capacity(catalogue.stop_count()),
        };
        builder.add_wait_edges(catalogue, settings);
        builder.add_ride_edges(catalogue, settings)?;
        log::debug!(
            "built routing graph: {} vertices, {} edges",
            builder.graph.vertex_count(),
            builder.graph.edge_count()
        );
        Ok(builder)
    }

    /// Fastest itinerary between two known stops.
    ///
    /// Starts at the origin's arrival vertex (a trip always begins by
    /// waiting) and ends at the destination's arrival vertex. Returns
    /// `None` when no path exists; a query from a stop to itself yields a
    /// zero-segment, zero-time itinerary.
    pub fn build_route(&self, from: StopId, to: StopId) -> Option<Itinerary> {
        let (source, _) = self.stop_vertices(from);
        let (target, _) = self.stop_vertices(to);

        let (total_time, edges) = shortest_path(&self.graph, source, target)?;
        let segments = edges
            .into_iter()
            .map(|edge_id| {
                let info = &self.edge_info[edge_id.index()];
                match info.bus {
                    None => Segment::Wait {
                        stop: info.from,
                        minutes: info.weight,
                    },
                    Some(bus) => Segment::Ride {
                        bus,
                        span_count: info.span_count,
                        minutes: info.weight,
                    },
                }
            })
            .collect();

        Some(Itinerary {
            total_time,
            segments,
        })
    }

    pub fn edge_info(&self, edge: EdgeId) -> &EdgeInfo {
        &self.edge_info[edge.index()]
    }

    /// `(arrival, departure)` vertex pair owned by a stop.
    pub fn stop_vertices(&self, stop: StopId) -> (VertexId, VertexId) {
        self.vertex_index[stop.index()]
    }

    /// One wait edge per stop, arrival to departure, constant weight.
    fn add_wait_edges(&mut self, catalogue: &TransitCatalogue, settings: RoutingSettings) {
        let wait = f64::from(settings.bus_wait_time);
        for (stop_id, _) in catalogue.stops() {
            let arrival = VertexId(2 * stop_id.index() as u32);
            let departure = VertexId(2 * stop_id.index() as u32 + 1);
            self.graph.add_edge(arrival, departure, wait);
            self.edge_info.push(EdgeInfo {
                from: stop_id,
                to: stop_id,
                bus: None,
                span_count: 0,
                weight: wait,
            });
            self.vertex_index.push((arrival, departure));
        }
    }

    /// Ride edges for every ordered stop pair along each bus's traversal.
    ///
    /// The edge weight for (i, j) is the running sum of hop times from i to
    /// j, so boarding a bus to any further stop is always a single edge and
    /// the router never chains same-bus edges. Non-circular buses get an
    /// independent reverse-leg pass with reverse-direction distance lookups;
    /// circular buses get forward edges only.
    fn add_ride_edges(
        &mut self,
        catalogue: &TransitCatalogue,
        settings: RoutingSettings,
    ) -> Result<()> {
        let meters_per_minute = settings.bus_velocity * KPH_TO_METERS_PER_MINUTE;
        for (bus_id, bus) in catalogue.buses() {
            let stops = &bus.stops;
            for i in 0..stops.len() {
                let mut forward_minutes = 0.0;
                let mut reverse_minutes = 0.0;
                for j in (i + 1)..stops.len() {
                    let (prev, next) = (stops[j - 1], stops[j]);
                    let span_count = (j - i) as u32;

                    forward_minutes +=
                        catalogue.distance_or_err(prev, next)? as f64 / meters_per_minute;
                    self.add_ride_edge(stops[i], next, bus_id, span_count, forward_minutes);

                    if !bus.is_circular {
                        reverse_minutes +=
                            catalogue.distance_or_err(next, prev)? as f64 / meters_per_minute;
                        self.add_ride_edge(next, stops[i], bus_id, span_count, reverse_minutes);
                    }
                }
            }
        }
        Ok(())
    }

    fn add_ride_edge(&mut self, from: StopId, to: StopId, bus: BusId, span_count: u32, minutes: f64) {
        let (_, departure) = self.stop_vertices(from);
        let (arrival, _) = self.stop_vertices(to);
        self.graph.add_edge(departure, arrival, minutes);
        self.edge_info.push(EdgeInfo {
            from,
            to,
            bus: Some(bus),
            span_count,
            weight: minutes,
        });
    }
}
