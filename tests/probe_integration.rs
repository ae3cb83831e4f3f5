//! Integration tests for the endpoint exerciser and the latency sampler

use std::io::Write;
use std::path::Path;

use httpmock::prelude::*;
use pretty_assertions::assert_eq;

use musafirgo_pipeline::catalog::{CaseBody, EndpointCase, TimedRequest};
use musafirgo_pipeline::config::{DEFAULT_ITINERARY_ID, IdentifierSet};
use musafirgo_pipeline::probe::{exercise_endpoints, sample_latencies, sample_throwaway_itinerary};
use musafirgo_pipeline::results::FAILED_SAMPLE_MS;
use musafirgo_pipeline::{ApiClient, CaseOutcome, HttpMethod, LatencySummary};

const NO_IMAGE: &str = "/nonexistent/test-image.png";

#[test]
fn test_expected_404_passes_and_500_fails() {
    let server = MockServer::start();
    let actuator = server.mock(|when, then| {
        when.method(GET).path("/actuator");
        then.status(500);
    });

    let cases = [
        EndpointCase::new(HttpMethod::Get, "/missing", "Unknown route", CaseBody::None, 404, "Errors"),
        EndpointCase::new(HttpMethod::Get, "/actuator", "Actuator index", CaseBody::None, 200, "Actuator"),
    ];
    let client = ApiClient::new(server.base_url()).unwrap();
    let summary = exercise_endpoints(&client, &cases, &IdentifierSet::defaults(), Path::new(NO_IMAGE));

    actuator.assert();
    assert_eq!(summary.total, 2);
    assert_eq!(summary.passed, 1);
    assert_eq!(summary.failed, 1);
    assert_eq!(summary.success_rate, 50.0);
    assert!(summary.details[0].starts_with("GET /missing - PASSED ("));
    assert_eq!(summary.details[1], "GET /actuator - FAILED (Expected: 200, Got: 500)");
    assert_eq!(summary.cases[1].observed_status, Some(500));
}

#[test]
fn test_placeholders_are_substituted() {
    let server = MockServer::start();
    let itinerary = server.mock(|when, then| {
        when.method(GET)
            .path(format!("/api/itineraries/{}", DEFAULT_ITINERARY_ID));
        then.status(200).body("{}");
    });

    let cases = [EndpointCase::new(
        HttpMethod::Get,
        "/api/itineraries/{id}",
        "Get itinerary",
        CaseBody::None,
        200,
        "Itineraries",
    )];
    let client = ApiClient::new(server.base_url()).unwrap();
    let summary = exercise_endpoints(&client, &cases, &IdentifierSet::defaults(), Path::new(NO_IMAGE));

    itinerary.assert();
    assert_eq!(summary.passed, 1);
    assert_eq!(summary.cases[0].path, format!("/api/itineraries/{}", DEFAULT_ITINERARY_ID));
}

#[test]
fn test_upload_sends_multipart_image() {
    let server = MockServer::start();
    let upload = server.mock(|when, then| {
        when.method(POST)
            .path(format!("/api/v1/itineraries/{}/media", DEFAULT_ITINERARY_ID))
            .header_exists("content-type");
        then.status(201);
    });

    let mut image = tempfile::NamedTempFile::new().unwrap();
    image.write_all(b"\x89PNG\r\n\x1a\nfake").unwrap();

    let cases = [EndpointCase::new(
        HttpMethod::Post,
        "/api/v1/itineraries/{id}/media",
        "Upload test image",
        CaseBody::TestImage,
        201,
        "Media",
    )];
    let client = ApiClient::new(server.base_url()).unwrap();
    let summary = exercise_endpoints(&client, &cases, &IdentifierSet::defaults(), image.path());

    upload.assert();
    assert_eq!(summary.passed, 1);
}

#[test]
fn test_missing_image_is_a_failed_case() {
    let server = MockServer::start();
    let upload = server.mock(|when, then| {
        when.method(POST);
        then.status(201);
    });

    let cases = [EndpointCase::new(
        HttpMethod::Post,
        "/api/v1/itineraries/{id}/media",
        "Upload test image",
        CaseBody::TestImage,
        201,
        "Media",
    )];
    let client = ApiClient::new(server.base_url()).unwrap();
    let summary = exercise_endpoints(&client, &cases, &IdentifierSet::defaults(), Path::new(NO_IMAGE));

    assert_eq!(upload.hits(), 0);
    assert_eq!(summary.failed, 1);
    assert!(matches!(summary.cases[0].outcome, CaseOutcome::SetupError(_)));
    assert!(summary.details[0].contains("FAILED (Could not open test image:"));
}

#[test]
fn test_bodyless_post_is_sent_as_json() {
    let server = MockServer::start();
    let json = server.mock(|when, then| {
        when.method(POST)
            .path(format!("/api/v1/itineraries/{}/media", DEFAULT_ITINERARY_ID))
            .header("content-type", "application/json");
        then.status(400);
    });
    let bare_get = server.mock(|when, then| {
        when.method(GET).path("/swagger-ui.html").header_missing("content-type");
        then.status(200);
    });

    let cases = [
        EndpointCase::new(
            HttpMethod::Post,
            "/api/v1/itineraries/{id}/media",
            "Upload media without file",
            CaseBody::None,
            400,
            "Media",
        ),
        EndpointCase::new(HttpMethod::Get, "/swagger-ui.html", "Swagger UI", CaseBody::None, 200, "Docs"),
    ];
    let client = ApiClient::new(server.base_url()).unwrap();
    let summary = exercise_endpoints(&client, &cases, &IdentifierSet::defaults(), Path::new(NO_IMAGE));

    json.assert();
    bare_get.assert();
    assert_eq!(summary.passed, 2);
}

#[test]
fn test_transport_error_fails_case() {
    let cases = [EndpointCase::new(HttpMethod::Get, "/health", "Health", CaseBody::None, 200, "Health")];
    let client = ApiClient::new("http://127.0.0.1:9").unwrap();
    let summary = exercise_endpoints(&client, &cases, &IdentifierSet::defaults(), Path::new(NO_IMAGE));

    assert_eq!(summary.failed, 1);
    assert_eq!(summary.success_rate, 0.0);
    assert!(matches!(summary.cases[0].outcome, CaseOutcome::TransportError(_)));
    assert_eq!(summary.cases[0].observed_status, None);
}

#[test]
fn test_sampler_uses_named_methods() {
    let server = MockServer::start();
    let put = server.mock(|when, then| {
        when.method(PUT).path("/api/itineraries/x");
        then.status(404);
    });
    let delete = server.mock(|when, then| {
        when.method(DELETE).path("/api/itineraries/x");
        then.status(404);
    });

    let samples = [
        TimedRequest::new("update", "Update", HttpMethod::Put, "/api/itineraries/x", Some("{}")),
        TimedRequest::new("delete", "Delete", HttpMethod::Delete, "/api/itineraries/x", None),
    ];
    let client = ApiClient::new(server.base_url()).unwrap();
    let summary = sample_latencies(&client, &samples);

    put.assert();
    delete.assert();
    assert_eq!(summary.successful_tests, 2);
    assert!(summary.min_ms <= summary.average_ms && summary.average_ms <= summary.max_ms);
}

#[test]
fn test_unreachable_service_yields_sentinels() {
    let samples = [
        TimedRequest::new("health_check", "Health Check", HttpMethod::Get, "/actuator/health", None),
        TimedRequest::new("list", "List", HttpMethod::Get, "/api/itineraries", None),
    ];
    let client = ApiClient::new("http://127.0.0.1:9").unwrap();
    let summary = sample_latencies(&client, &samples);

    assert_eq!(summary.sample("health_check"), Some(FAILED_SAMPLE_MS));
    assert_eq!(summary.attempted(), 2);
    assert_eq!(summary.successful_tests, 0);
    assert_eq!((summary.average_ms, summary.max_ms, summary.min_ms), (0.0, 0.0, 0.0));
}

#[test]
fn test_throwaway_itinerary_lifecycle() {
    let server = MockServer::start();
    let create = server.mock(|when, then| {
        when.method(POST).path("/api/itineraries");
        then.status(201)
            .header("content-type", "application/json")
            .body(r#"{"id":"0d6f7c52-1111-4222-8333-944455556666","city":"Perf"}"#);
    });
    let get = server.mock(|when, then| {
        when.method(GET)
            .path("/api/itineraries/0d6f7c52-1111-4222-8333-944455556666");
        then.status(200);
    });
    let cleanup = server.mock(|when, then| {
        when.method(DELETE)
            .path("/api/itineraries/0d6f7c52-1111-4222-8333-944455556666");
        then.status(204);
    });

    let requests = [TimedRequest::new("get_itinerary", "Get Itinerary", HttpMethod::Get, "/api/itineraries/{id}", None)];
    let client = ApiClient::new(server.base_url()).unwrap();
    let mut summary = LatencySummary::default();
    assert!(sample_throwaway_itinerary(&client, "{}", &requests, &mut summary));

    create.assert();
    get.assert();
    cleanup.assert();
    assert_eq!(summary.attempted(), 1);
    assert!(summary.sample("get_itinerary").is_some_and(|ms| ms >= 0.0));
}

#[test]
fn test_throwaway_not_created_records_nothing() {
    let server = MockServer::start();
    let _create = server.mock(|when, then| {
        when.method(POST).path("/api/itineraries");
        then.status(400).body("{}");
    });

    let requests = [TimedRequest::new("get_itinerary", "Get Itinerary", HttpMethod::Get, "/api/itineraries/{id}", None)];
    let client = ApiClient::new(server.base_url()).unwrap();
    let mut summary = LatencySummary::default();
    assert!(!sample_throwaway_itinerary(&client, "{}", &requests, &mut summary));
    assert_eq!(summary.attempted(), 0);
}
