//! Integration tests for the health probes

use std::time::Duration;

use musafirgo_pipeline::ApiClient;
use musafirgo_pipeline::catalog::{itinerary, web};
use musafirgo_pipeline::probe::{run_health_probes, wait_until_ready};

#[test]
fn test_itinerary_probes_all_healthy() {
    let mut server = mockito::Server::new();
    let mocks: Vec<_> = ["/actuator/health", "/actuator/health/db", "/actuator/health/redis"]
        .iter()
        .map(|path| server.mock("GET", *path).with_status(200).with_body(r#"{"status":"UP"}"#).create())
        .collect();

    let client = ApiClient::new(server.url()).unwrap();
    assert!(run_health_probes(&client, itinerary::HEALTH_PROBES, "http://127.0.0.1:9"));
    for mock in mocks {
        mock.assert();
    }
}

#[test]
fn test_failing_required_probe_is_reported() {
    let mut server = mockito::Server::new();
    let _health = server.mock("GET", "/actuator/health").with_status(200).create();
    let _db = server.mock("GET", "/actuator/health/db").with_status(200).create();
    let redis = server.mock("GET", "/actuator/health/redis").with_status(503).create();

    let client = ApiClient::new(server.url()).unwrap();
    assert!(!run_health_probes(&client, itinerary::HEALTH_PROBES, "http://127.0.0.1:9"));
    redis.assert();
}

#[test]
fn test_optional_frontend_probe_does_not_fail() {
    let mut server = mockito::Server::new();
    let api = server.mock("GET", "/api/health").with_status(200).create();

    let client = ApiClient::new(server.url()).unwrap();
    assert!(run_health_probes(&client, web::HEALTH_PROBES, "http://127.0.0.1:9"));
    api.assert();
}

#[test]
fn test_wait_until_ready_polls() {
    let mut server = mockito::Server::new();
    let health = server
        .mock("GET", "/actuator/health")
        .with_status(200)
        .expect(1)
        .create();

    let client = ApiClient::new(server.url()).unwrap();
    assert!(wait_until_ready(&client, "/actuator/health", 3, Duration::ZERO));
    health.assert();

    let down = ApiClient::new("http://127.0.0.1:9").unwrap();
    assert!(!wait_until_ready(&down, "/actuator/health", 2, Duration::ZERO));
}
