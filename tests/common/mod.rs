#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{Request, Response},
    Router,
};
use serde::de::DeserializeOwned;
use uuid::Uuid;

use school_transport::config::EnvironmentConfig;
use school_transport::models::{GeoPoint, Student, Van, VanStatus};
use school_transport::repositories::InMemoryTransportStore;
use school_transport::state::AppState;

pub struct TestApp {
    pub app: Router,
    pub state: AppState,
    pub store: InMemoryTransportStore,
}

pub fn setup_test_app() -> TestApp {
    let store = InMemoryTransportStore::new();
    let state = AppState::new(Arc::new(store.clone()), EnvironmentConfig::default());
    let app = school_transport::create_app(state.clone());
    TestApp { app, state, store }
}

pub fn approved_van(capacity: u32) -> Van {
    Van {
        id: Uuid::new_v4(),
        van_number: "MH12-AB-1234".to_string(),
        capacity,
        agency_id: Uuid::new_v4(),
        assigned_driver_id: Some(Uuid::new_v4()),
        status: VanStatus::Approved,
        track_always: false,
        current_position: GeoPoint::new(18.5204, 73.8567),
        start_position: GeoPoint::new(18.5204, 73.8567),
    }
}

pub fn student(name: &str, agency_id: Uuid, school: (f64, f64)) -> Student {
    Student {
        id: Uuid::new_v4(),
        name: name.to_string(),
        home: GeoPoint::new(school.0 - 0.01, school.1 - 0.01),
        school: GeoPoint::new(school.0, school.1),
        agency_id,
        assigned_van_id: None,
        schedule: "morning".to_string(),
        status: "approved".to_string(),
    }
}

pub fn json_request(method: &str, uri: &str, body: &serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub async fn parse_json_response<T: DeserializeOwned>(response: Response<Body>) -> T {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
