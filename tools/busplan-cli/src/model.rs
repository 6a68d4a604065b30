//! Serde models for the JSON request/response documents.

use std::collections::HashMap;

use busplan_catalogue::RoutingSettings;
use serde::{Deserialize, Serialize};

/// Top-level input document.
#[derive(Debug, Deserialize)]
pub struct InputDocument {
    #[serde(default)]
    pub base_requests: Vec<BaseRequest>,
    pub routing_settings: Option<RoutingSettings>,
    #[serde(default)]
    pub stat_requests: Vec<StatRequest>,
}

/// One catalogue-population command.
#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
pub enum BaseRequest {
    Stop {
        name: String,
        latitude: f64,
        longitude: f64,
        /// Road distances to neighboring stops, in meters.
        #[serde(default)]
        road_distances: HashMap<String, u64>,
    },
    Bus {
        name: String,
        stops: Vec<String>,
        is_roundtrip: bool,
    },
}

/// One query against the populated catalogue.
#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
pub enum StatRequest {
    Stop { id: i64, name: String },
    Bus { id: i64, name: String },
    Route { id: i64, from: String, to: String },
}

impl StatRequest {
    pub fn id(&self) -> i64 {
        match *self {
            StatRequest::Stop { id, .. }
            | StatRequest::Bus { id, .. }
            | StatRequest::Route { id, .. } => id,
        }
    }
}

/// One response object; emitted in request order.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum StatResponse {
    Error {
        request_id: i64,
        error_message: String,
    },
    Stop {
        request_id: i64,
        buses: Vec<String>,
    },
    Bus {
        request_id: i64,
        stop_count: usize,
        unique_stop_count: usize,
        route_length: u64,
        curvature: f64,
    },
    Route {
        request_id: i64,
        total_time: f64,
        items: Vec<RouteItem>,
    },
}

impl StatResponse {
    pub fn not_found(request_id: i64) -> Self {
        StatResponse::Error {
            request_id,
            error_message: "not found".to_string(),
        }
    }
}

/// One itinerary leg in a `Route` response.
#[derive(Debug, Serialize)]
#[serde(tag = "type")]
pub enum RouteItem {
    Wait { stop_name: String, time: f64 },
    Bus {
        bus: String,
        span_count: u32,
        time: f64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_input_document() {
        let raw = r#"{
            "base_requests": [
                {
                    "type": "Stop",
                    "name": "Biryulyovo Zapadnoye",
                    "latitude": 55.574371,
                    "longitude": 37.6517,
                    "road_distances": {"Biryusinka": 2600}
                },
                {
                    "type": "Bus",
                    "name": "297",
                    "stops": ["Biryulyovo Zapadnoye", "Biryusinka"],
                    "is_roundtrip": false
                }
            ],
            "routing_settings": {"bus_wait_time": 6, "bus_velocity": 40},
            "stat_requests": [
                {"id": 1, "type": "Bus", "name": "297"},
                {"id": 2, "type": "Route", "from": "Biryulyovo Zapadnoye", "to": "Biryusinka"}
            ]
        }"#;

        let doc: InputDocument = serde_json::from_str(raw).unwrap();
        assert_eq!(doc.base_requests.len(), 2);
        assert_eq!(doc.routing_settings.unwrap().bus_wait_time, 6);
        assert_eq!(doc.stat_requests.len(), 2);
        assert_eq!(doc.stat_requests[1].id(), 2);
    }

    #[test]
    fn test_response_serialization_shape() {
        let response = StatResponse::Route {
            request_id: 5,
            total_time: 11.235,
            items: vec![
                RouteItem::Wait {
                    stop_name: "Biryulyovo Zapadnoye".to_string(),
                    time: 6.0,
                },
                RouteItem::Bus {
                    bus: "297".to_string(),
                    span_count: 2,
                    time: 5.235,
                },
            ],
        };

        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["request_id"], 5);
        assert_eq!(value["items"][0]["type"], "Wait");
        assert_eq!(value["items"][1]["type"], "Bus");
        assert_eq!(value["items"][1]["span_count"], 2);
    }

    #[test]
    fn test_error_response_shape() {
        let value = serde_json::to_value(StatResponse::not_found(12)).unwrap();
        assert_eq!(value["error_message"], "not found");
        assert_eq!(value["request_id"], 12);
    }
}
