//! In-memory transit catalogue.
//!
//! Owns every stop and bus record for the process lifetime and resolves
//! names to stable handles. All other components borrow from it.

use std::collections::{BTreeSet, HashMap};

use geo::{HaversineDistance, Point};

use crate::handles::{BusId, StopId};
use crate::models::types::{Bus, CatalogueError, Result, RouteStats, Stop};

/// Canonical store for stops, buses, and pairwise road distances.
///
/// Records live in insertion-ordered arenas and are addressed by [`StopId`] /
/// [`BusId`] handles. Enumeration order is insertion order, so identical
/// input always produces an identical routing graph.
#[derive(Debug, Default)]
pub struct TransitCatalogue {
    stops: Vec<Stop>,
    buses: Vec<Bus>,

    // Name resolution
    stop_index: HashMap<String, StopId>,
    bus_index: HashMap<String, BusId>,

    // Directional road distances in meters, keyed by ordered stop pair.
    // Lookup falls back to the reversed pair, insertion does not.
    distances: HashMap<(StopId, StopId), u64>,

    // Names of buses serving each stop, kept sorted for stat queries.
    stop_to_buses: HashMap<StopId, BTreeSet<String>>,
}

impl TransitCatalogue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new stop.
    ///
    /// Fails with [`CatalogueError::DuplicateStop`] if the name is taken;
    /// previously ingested state is left untouched.
    pub fn add_stop(&mut self, name: impl Into<String>, coordinates: Point) -> Result<StopId> {
        let name = name.into();
        if self.stop_index.contains_key(&name) {
            return Err(CatalogueError::DuplicateStop(name));
        }

        let id = StopId::new(self.stops.len());
        self.stop_index.insert(name.clone(), id);
        self.stops.push(Stop { name, coordinates });
        Ok(id)
    }

    /// Register a new bus route over already-known stops.
    ///
    /// Every referenced stop must exist; the first unknown name aborts the
    /// add without modifying the catalogue.
    pub fn add_bus(
        &mut self,
        name: impl Into<String>,
        stop_names: &[impl AsRef<str>],
        is_circular: bool,
    ) -> Result<BusId> {
        let name = name.into();
        if self.bus_index.contains_key(&name) {
            return Err(CatalogueError::DuplicateBus(name));
        }

        let mut stops = Vec::with_capacity(stop_names.len());
        for stop_name in stop_names {
            let stop_name = stop_name.as_ref();
            let id = self
                .stop_id(stop_name)
                .ok_or_else(|| CatalogueError::UnknownStop(stop_name.to_string()))?;
            stops.push(id);
        }

        let unique_stop_count = stops.iter().collect::<BTreeSet<_>>().len();

        let id = BusId::new(self.buses.len());
        for &stop in &stops {
            self.stop_to_buses
                .entry(stop)
                .or_default()
                .insert(name.clone());
        }
        self.bus_index.insert(name.clone(), id);
        self.buses.push(Bus {
            name,
            stops,
            is_circular,
            unique_stop_count,
        });
        Ok(id)
    }

    /// Record the road distance from one stop to another, in meters.
    ///
    /// Entries are directional; setting the same ordered pair twice
    /// overwrites the earlier value.
    pub fn set_distance(&mut self, from: StopId, to: StopId, meters: u64) {
        self.distances.insert((from, to), meters);
    }

    /// Road distance between two stops.
    ///
    /// Returns the forward entry if present, else the reversed entry, else
    /// `None`. A missing distance is never reported as zero.
    pub fn distance(&self, from: StopId, to: StopId) -> Option<u64> {
        self.distances
            .get(&(from, to))
            .or_else(|| self.distances.get(&(to, from)))
            .copied()
    }

    pub(crate) fn distance_or_err(&self, from: StopId, to: StopId) -> Result<u64> {
        self.distance(from, to)
            .ok_or_else(|| CatalogueError::MissingDistance {
                from: self.stop(from).name.clone(),
                to: self.stop(to).name.clone(),
            })
    }

    // ---- Lookups ----

    pub fn stop(&self, id: StopId) -> &Stop {
        &self.stops[id.index()]
    }

    pub fn bus(&self, id: BusId) -> &Bus {
        &self.buses[id.index()]
    }

    pub fn stop_id(&self, name: &str) -> Option<StopId> {
        self.stop_index.get(name).copied()
    }

    pub fn bus_id(&self, name: &str) -> Option<BusId> {
        self.bus_index.get(name).copied()
    }

    // ---- Collections ----

    pub fn stop_count(&self) -> usize {
        self.stops.len()
    }

    /// Stops in insertion order.
    pub fn stops(&self) -> impl Iterator<Item = (StopId, &Stop)> {
        self.stops
            .iter()
            .enumerate()
            .map(|(i, stop)| (StopId::new(i), stop))
    }

    /// Buses in insertion order.
    pub fn buses(&self) -> impl Iterator<Item = (BusId, &Bus)> {
        self.buses
            .iter()
            .enumerate()
            .map(|(i, bus)| (BusId::new(i), bus))
    }

    // ---- Statistics ----

    /// Names of all buses serving a stop, sorted and deduplicated.
    pub fn buses_serving_stop(&self, stop: StopId) -> Vec<&str> {
        match self.stop_to_buses.get(&stop) {
            Some(names) => names.iter().map(String::as_str).collect(),
            None => Vec::new(),
        }
    }

    /// Statistics over a bus's full logical traversal.
    ///
    /// Road length comes from the distance table (with reversed-pair
    /// fallback); the return leg of a non-circular route is measured with
    /// its own reverse-direction lookups, since road distance is not
    /// assumed symmetric. Fails with [`CatalogueError::MissingDistance`]
    /// if any needed hop has no recorded distance in either direction.
    pub fn route_stats(&self, bus: BusId) -> Result<RouteStats> {
        let bus = self.bus(bus);
        let stops = &bus.stops;

        let stop_count = if bus.is_circular || stops.is_empty() {
            stops.len()
        } else {
            2 * stops.len() - 1
        };

        let mut road_length = 0u64;
        let mut geo_length = 0f64;
        for pair in stops.windows(2) {
            let (from, to) = (pair[0], pair[1]);
            road_length += self.distance_or_err(from, to)?;
            if !bus.is_circular {
                road_length += self.distance_or_err(to, from)?;
            }
            geo_length += haversine(self.stop(from).coordinates, self.stop(to).coordinates);
        }
        if !bus.is_circular {
            geo_length *= 2.0;
        }

        let curvature = if geo_length > 0.0 {
            road_length as f64 / geo_length
        } else {
            0.0
        };

        Ok(RouteStats {
            stop_count,
            unique_stop_count: bus.unique_stop_count,
            road_length,
            geo_length,
            curvature,
        })
    }
}

/// Great-circle distance between two points in meters.
fn haversine(from: Point, to: Point) -> f64 {
    from.haversine_distance(&to)
}
