//! # busplan-catalogue
//!
//! In-memory transit catalogue with fastest-path routing.
//!
//! ## Features
//!
//! - **Entity store**: stops, bus routes, and directional road distances
//!   with stable integer handles
//! - **Route statistics**: stop counts, road length, curvature
//! - **Routing graph**: wait/ride edge model with two vertices per stop
//! - **Shortest paths**: per-query Dijkstra over non-negative weights
//!
//! ## Example
//!
//! ```
//! use busplan_catalogue::prelude::*;
//! use geo::Point;
//!
//! let mut catalogue = TransitCatalogue::new();
//! let a = catalogue.add_stop("A", Point::new(0.0, 0.0)).unwrap();
//! let b = catalogue.add_stop("B", Point::new(0.0, 0.0)).unwrap();
//! catalogue.set_distance(a, b, 100);
//! catalogue.set_distance(b, a, 100);
//! catalogue.add_bus("14", &["A", "B"], false).unwrap();
//!
//! let settings = RoutingSettings { bus_wait_time: 5, bus_velocity: 60.0 };
//! let graph = RouteGraph::build(&catalogue, settings).unwrap();
//!
//! let itinerary = graph.build_route(a, b).unwrap();
//! assert_eq!(itinerary.segments.len(), 2); // wait at A, then ride
//! ```

pub mod catalogue;
pub mod handles;
pub mod models;
pub mod routing;

// Re-exports for convenience
pub mod prelude {
    pub use crate::catalogue::TransitCatalogue;
    pub use crate::handles::{BusId, StopId};
    pub use crate::models::types::*;
    pub use crate::routing::{Itinerary, RouteGraph, RoutingSettings, Segment};
}

pub use prelude::*;
