//! Routing graph and shortest-path queries.
//!
//! The catalogue is modeled as a directed weighted graph with two vertices
//! per stop: an *arrival* vertex and a *departure* vertex. A constant-weight
//! wait edge joins arrival to departure; ride edges join the departure
//! vertex of one stop to the arrival vertex of every stop reachable further
//! along a bus's traversal, with the cumulative travel time as weight. A
//! query is then a single Dijkstra run from the origin's arrival vertex.

pub mod builder;
pub mod graph;
pub mod router;

pub use builder::{EdgeInfo, RouteGraph};

use crate::handles::{BusId, StopId};

/// Routing parameters supplied by external configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoutingSettings {
    /// Minutes spent waiting for a bus at every stop. Must be positive.
    pub bus_wait_time: u32,
    /// Vehicle speed in km/h. Must be positive.
    pub bus_velocity: f64,
}

/// One leg of an itinerary.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Segment {
    /// Wait at a stop for the configured bus wait time.
    Wait { stop: StopId, minutes: f64 },
    /// Ride one bus past `span_count` stop-to-stop hops without transfer.
    Ride {
        bus: BusId,
        span_count: u32,
        minutes: f64,
    },
}

/// A fastest path between two stops.
#[derive(Clone, Debug, PartialEq)]
pub struct Itinerary {
    /// Total travel time in minutes; the sum of all segment times.
    pub total_time: f64,
    pub segments: Vec<Segment>,
}
