//! Core data types and errors for the transit catalogue.

use geo::Point;

use crate::handles::StopId;

// ============================================================================
// Data Structures
// ============================================================================

/// A named physical location served by buses.
///
/// Immutable once created; owned by the catalogue for its entire lifetime.
#[derive(Clone, Debug)]
pub struct Stop {
    pub name: String,
    /// Geographic position, `x` = longitude, `y` = latitude.
    pub coordinates: Point,
}

/// A named route visiting an ordered sequence of stops.
///
/// Only the forward sequence is stored. For a non-circular bus the logical
/// traversal is there-and-back: the forward sequence followed by the reverse
/// of all but the last stop. Circular buses store the closing stop explicitly
/// (e.g. `[A, B, C, A]`).
#[derive(Clone, Debug)]
pub struct Bus {
    pub name: String,
    pub stops: Vec<StopId>,
    pub is_circular: bool,
    /// Number of distinct stops referenced, counting a repeated endpoint once.
    pub unique_stop_count: usize,
}

/// Statistics for one bus route.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RouteStats {
    /// Stops on the full logical traversal (there-and-back for non-circular).
    pub stop_count: usize,
    pub unique_stop_count: usize,
    /// Road length of the full traversal in meters.
    pub road_length: u64,
    /// Great-circle length of the full traversal in meters.
    pub geo_length: f64,
    /// Ratio of road length to great-circle length.
    pub curvature: f64,
}

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum CatalogueError {
    #[error("Stop already exists: {0}")]
    DuplicateStop(String),

    #[error("Bus already exists: {0}")]
    DuplicateBus(String),

    #[error("Unknown stop: {0}")]
    UnknownStop(String),

    #[error("No road distance recorded between {from} and {to}")]
    MissingDistance { from: String, to: String },
}

pub type Result<T> = std::result::Result<T, CatalogueError>;
