//! Catalogue population and stat-request processing.

use anyhow::{bail, Context, Result};
use busplan_catalogue::prelude::*;
use geo::Point;

use crate::model::{BaseRequest, RouteItem, StatRequest, StatResponse};

/// Populate a catalogue from base requests.
///
/// Stops are loaded first, then all road distances, then buses, so every
/// distance is resolvable before any bus needs it. A record that fails to
/// ingest (duplicate name, unknown stop) is logged and skipped; it never
/// corrupts previously ingested state.
pub fn build_catalogue(requests: &[BaseRequest]) -> TransitCatalogue {
    let mut catalogue = TransitCatalogue::new();

    for request in requests {
        if let BaseRequest::Stop {
            name,
            latitude,
            longitude,
            ..
        } = request
        {
            if let Err(err) = catalogue.add_stop(name.clone(), Point::new(*longitude, *latitude)) {
                log::warn!("skipping stop record: {err}");
            }
        }
    }

    for request in requests {
        if let BaseRequest::Stop {
            name,
            road_distances,
            ..
        } = request
        {
            let Some(from) = catalogue.stop_id(name) else {
                continue;
            };
            for (neighbor, meters) in road_distances {
                match catalogue.stop_id(neighbor) {
                    Some(to) => catalogue.set_distance(from, to, *meters),
                    None => {
                        log::warn!("skipping distance {name} -> {neighbor}: unknown stop");
                    }
                }
            }
        }
    }

    for request in requests {
        if let BaseRequest::Bus {
            name,
            stops,
            is_roundtrip,
        } = request
        {
            if let Err(err) = catalogue.add_bus(name.clone(), stops, *is_roundtrip) {
                log::warn!("skipping bus record: {err}");
            }
        }
    }

    log::info!(
        "catalogue loaded: {} stops, {} buses",
        catalogue.stop_count(),
        catalogue.buses().count()
    );
    catalogue
}

/// Answer stat requests in order.
///
/// Unknown stop or bus names produce a "not found" response object, as does
/// an unreachable route query. A `Route` request without routing settings in
/// the input document is a configuration error.
pub fn answer_requests(
    catalogue: &TransitCatalogue,
    graph: Option<&RouteGraph>,
    requests: &[StatRequest],
) -> Result<Vec<StatResponse>> {
    let mut responses = Vec::with_capacity(requests.len());
    for request in requests {
        let response = match request {
            StatRequest::Stop { id, name } => match catalogue.stop_id(name) {
                Some(stop) => StatResponse::Stop {
                    request_id: *id,
                    buses: catalogue
                        .buses_serving_stop(stop)
                        .into_iter()
                        .map(str::to_string)
                        .collect(),
                },
                None => StatResponse::not_found(*id),
            },
            StatRequest::Bus { id, name } => match catalogue.bus_id(name) {
                Some(bus) => {
                    let stats = catalogue
                        .route_stats(bus)
                        .with_context(|| format!("computing stats for bus {name}"))?;
                    StatResponse::Bus {
                        request_id: *id,
                        stop_count: stats.stop_count,
                        unique_stop_count: stats.unique_stop_count,
                        route_length: stats.road_length,
                        curvature: stats.curvature,
                    }
                }
                None => StatResponse::not_found(*id),
            },
            StatRequest::Route { id, from, to } => {
                let Some(graph) = graph else {
                    bail!("route request {id} requires routing_settings in the input document");
                };
                match (catalogue.stop_id(from), catalogue.stop_id(to)) {
                    (Some(from), Some(to)) => match graph.build_route(from, to) {
                        Some(itinerary) => route_response(catalogue, *id, &itinerary),
                        None => StatResponse::not_found(*id),
                    },
                    _ => StatResponse::not_found(*id),
                }
            }
        };
        responses.push(response);
    }
    Ok(responses)
}

fn route_response(
    catalogue: &TransitCatalogue,
    request_id: i64,
    itinerary: &Itinerary,
) -> StatResponse {
    let items = itinerary
        .segments
        .iter()
        .map(|segment| match *segment {
            Segment::Wait { stop, minutes } => RouteItem::Wait {
                stop_name: catalogue.stop(stop).name.clone(),
                time: minutes,
            },
            Segment::Ride {
                bus,
                span_count,
                minutes,
            } => RouteItem::Bus {
                bus: catalogue.bus(bus).name.clone(),
                span_count,
                time: minutes,
            },
        })
        .collect();

    StatResponse::Route {
        request_id,
        total_time: itinerary.total_time,
        items,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::InputDocument;

    fn process(raw: &str) -> Vec<serde_json::Value> {
        let doc: InputDocument = serde_json::from_str(raw).unwrap();
        let catalogue = build_catalogue(&doc.base_requests);
        let graph = doc
            .routing_settings
            .map(|settings| RouteGraph::build(&catalogue, settings).unwrap());
        let responses =
            answer_requests(&catalogue, graph.as_ref(), &doc.stat_requests).unwrap();
        responses
            .iter()
            .map(|r| serde_json::to_value(r).unwrap())
            .collect()
    }

    #[test]
    fn test_end_to_end_document() {
        let raw = r#"{
            "base_requests": [
                {"type": "Stop", "name": "A", "latitude": 0.0, "longitude": 0.0,
                 "road_distances": {"B": 100}},
                {"type": "Stop", "name": "B", "latitude": 0.0, "longitude": 0.0,
                 "road_distances": {"C": 200}},
                {"type": "Stop", "name": "C", "latitude": 0.0, "longitude": 0.0,
                 "road_distances": {}},
                {"type": "Bus", "name": "X", "stops": ["A", "B", "C"], "is_roundtrip": false}
            ],
            "routing_settings": {"bus_wait_time": 5, "bus_velocity": 60},
            "stat_requests": [
                {"id": 1, "type": "Stop", "name": "B"},
                {"id": 2, "type": "Route", "from": "A", "to": "C"},
                {"id": 3, "type": "Bus", "name": "nope"}
            ]
        }"#;

        let responses = process(raw);
        assert_eq!(responses.len(), 3);

        assert_eq!(responses[0]["buses"], serde_json::json!(["X"]));

        assert!((responses[1]["total_time"].as_f64().unwrap() - 5.3).abs() < 1e-9);
        let items = responses[1]["items"].as_array().unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0]["type"], "Wait");
        assert_eq!(items[0]["stop_name"], "A");
        assert_eq!(items[1]["type"], "Bus");
        assert_eq!(items[1]["span_count"], 2);

        assert_eq!(responses[2]["error_message"], "not found");
    }

    #[test]
    fn test_unreachable_route_is_not_found() {
        let raw = r#"{
            "base_requests": [
                {"type": "Stop", "name": "A", "latitude": 0.0, "longitude": 0.0,
                 "road_distances": {}},
                {"type": "Stop", "name": "B", "latitude": 0.0, "longitude": 0.0,
                 "road_distances": {}}
            ],
            "routing_settings": {"bus_wait_time": 5, "bus_velocity": 60},
            "stat_requests": [{"id": 7, "type": "Route", "from": "A", "to": "B"}]
        }"#;

        let responses = process(raw);
        assert_eq!(responses[0]["error_message"], "not found");
    }

    #[test]
    fn test_bad_records_are_skipped_without_corrupting_state() {
        let raw = r#"{
            "base_requests": [
                {"type": "Stop", "name": "A", "latitude": 0.0, "longitude": 0.0,
                 "road_distances": {"A": 1, "ghost": 5}},
                {"type": "Stop", "name": "A", "latitude": 9.0, "longitude": 9.0,
                 "road_distances": {}},
                {"type": "Bus", "name": "X", "stops": ["A", "ghost"], "is_roundtrip": true},
                {"type": "Bus", "name": "Y", "stops": ["A"], "is_roundtrip": true}
            ],
            "stat_requests": [
                {"id": 1, "type": "Stop", "name": "A"},
                {"id": 2, "type": "Bus", "name": "X"}
            ]
        }"#;

        let responses = process(raw);
        // The duplicate stop and the bus over an unknown stop were dropped;
        // bus Y survived.
        assert_eq!(responses[0]["buses"], serde_json::json!(["Y"]));
        assert_eq!(responses[1]["error_message"], "not found");
    }
}
