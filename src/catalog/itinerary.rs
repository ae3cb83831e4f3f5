//! Itinerary service: endpoints, samples, probes and tools.

use super::{CaseBody, EndpointCase, HealthProbe, ProbeTarget, TimedRequest, Tool};
use crate::probe::HttpMethod::{Delete, Get, Post, Put};

const NEW_ITINERARY: &str = r#"{"city":"Test City","startDate":"2025-04-01","endDate":"2025-04-03","days":[{"day":1,"items":["Test activity 1","Test activity 2"]}]}"#;
const UPDATED_ITINERARY: &str = r#"{"city":"Updated City","startDate":"2025-04-01","endDate":"2025-04-03","days":[{"day":1,"items":["Updated activity"]}]}"#;

/// Title of the HTML report
pub const REPORT_TITLE: &str = "MusafirGO Pipeline Report";

/// File name prefix of every report this pipeline writes
pub const REPORT_PREFIX: &str = "MusafirGO_Pipeline_Report_";

pub const TOOLS: &[Tool] = &[
    Tool::ContainerEngine,
    Tool::Compose,
    Tool::Cli {
        name: "Go",
        program: "go",
        args: &["version"],
    },
];

pub const HEALTH_PROBES: &[HealthProbe] = &[
    HealthProbe {
        label: "Service health",
        target: ProbeTarget::Service("/actuator/health"),
        required: true,
    },
    HealthProbe {
        label: "Database health",
        target: ProbeTarget::Service("/actuator/health/db"),
        required: true,
    },
    HealthProbe {
        label: "Redis health",
        target: ProbeTarget::Service("/actuator/health/redis"),
        required: true,
    },
];

/// Path polled until the service reports ready
pub const READINESS_PATH: &str = "/actuator/health";

pub const ENDPOINTS: &[EndpointCase] = &[
    // Itineraries: basic CRUD
    EndpointCase::new(Get, "/api/itineraries", "List all itineraries", CaseBody::None, 200, "Itineraries"),
    EndpointCase::new(Get, "/api/itineraries?city=Casablanca", "Search itineraries by city", CaseBody::None, 200, "Itineraries"),
    EndpointCase::new(Get, "/api/itineraries?from=2024-01-01&to=2024-12-31", "Search itineraries by date range", CaseBody::None, 200, "Itineraries"),
    EndpointCase::new(Get, "/api/itineraries?page=0&size=10", "List itineraries with pagination", CaseBody::None, 200, "Itineraries"),
    EndpointCase::new(Post, "/api/itineraries", "Create new itinerary", CaseBody::Json(NEW_ITINERARY), 201, "Itineraries"),
    // Itineraries: operations on the predefined itinerary
    EndpointCase::new(Get, "/api/itineraries/{id}", "Get specific itinerary", CaseBody::None, 200, "Itineraries"),
    EndpointCase::new(Put, "/api/itineraries/{id}", "Update specific itinerary", CaseBody::Json(UPDATED_ITINERARY), 200, "Itineraries"),
    EndpointCase::new(Delete, "/api/itineraries/{id}", "Delete specific itinerary", CaseBody::None, 204, "Itineraries"),
    EndpointCase::new(Post, "/api/itineraries/{id}/days/1/items", "Add item to day 1", CaseBody::Json(r#"{"value":"New activity item"}"#), 200, "Itineraries"),
    EndpointCase::new(Delete, "/api/itineraries/{id}/days/1/items/0", "Remove item from day 1", CaseBody::None, 200, "Itineraries"),
    // Fixture identifiers
    EndpointCase::new(Get, "/api/itineraries/40a4a646-9ede-4660-9f0d-bd1d2190a845", "Get predefined test itinerary", CaseBody::None, 200, "Itineraries"),
    EndpointCase::new(Put, "/api/itineraries/40a4a646-9ede-4660-9f0d-bd1d2190a845", "Update predefined test itinerary", CaseBody::Json(r#"{"city":"Updated Test City"}"#), 200, "Itineraries"),
    EndpointCase::new(Get, "/api/v1/itineraries/40a4a646-9ede-4660-9f0d-bd1d2190a845/media", "Get media for predefined itinerary", CaseBody::None, 200, "Media"),
    EndpointCase::new(Get, "/api/v1/itineraries/40a4a646-9ede-4660-9f0d-bd1d2190a845/media/40a4a646-9ede-4660-9f0d-bd1d2190a901", "Get specific predefined media", CaseBody::None, 200, "Media"),
    EndpointCase::new(Post, "/api/v1/itineraries/40a4a646-9ede-4660-9f0d-bd1d2190a845/media", "Upload test image", CaseBody::TestImage, 201, "Media"),
    // Itineraries: error cases
    EndpointCase::new(Get, "/api/itineraries/00000000-0000-0000-0000-000000000000", "Get non-existent itinerary", CaseBody::None, 404, "Itineraries"),
    EndpointCase::new(Put, "/api/itineraries/00000000-0000-0000-0000-000000000000", "Update non-existent itinerary", CaseBody::Json(r#"{"city":"Updated City"}"#), 404, "Itineraries"),
    EndpointCase::new(Delete, "/api/itineraries/00000000-0000-0000-0000-000000000000", "Delete non-existent itinerary", CaseBody::None, 404, "Itineraries"),
    EndpointCase::new(Post, "/api/itineraries/00000000-0000-0000-0000-000000000000/days/1/items", "Add item to non-existent itinerary", CaseBody::Json(r#"{"value":"Test item"}"#), 404, "Itineraries"),
    EndpointCase::new(Delete, "/api/itineraries/00000000-0000-0000-0000-000000000000/days/1/items/0", "Remove item from non-existent itinerary", CaseBody::None, 404, "Itineraries"),
    EndpointCase::new(Post, "/api/itineraries", "Create invalid itinerary", CaseBody::Json(r#"{"invalid":"data"}"#), 400, "Itineraries"),
    EndpointCase::new(Get, "/api/itineraries?page=-1&size=0", "Invalid pagination", CaseBody::None, 400, "Itineraries"),
    // Media: basic operations
    EndpointCase::new(Post, "/api/v1/itineraries/{id}/media", "Upload media file", CaseBody::None, 201, "Media"),
    EndpointCase::new(Get, "/api/v1/itineraries/{id}/media", "Get all media", CaseBody::None, 200, "Media"),
    EndpointCase::new(Get, "/api/v1/itineraries/{id}/media/active", "Get active media", CaseBody::None, 200, "Media"),
    EndpointCase::new(Get, "/api/v1/itineraries/{id}/media/paged?page=0&size=10", "Get media with pagination", CaseBody::None, 200, "Media"),
    EndpointCase::new(Get, "/api/v1/itineraries/{id}/media/{mediaId}", "Get specific media", CaseBody::None, 200, "Media"),
    EndpointCase::new(Post, "/api/v1/itineraries/{id}/media/{mediaId}/sas?expirationMinutes=60", "Generate SAS URL", CaseBody::None, 200, "Media"),
    EndpointCase::new(Delete, "/api/v1/itineraries/{id}/media/{mediaId}", "Delete specific media", CaseBody::None, 204, "Media"),
    EndpointCase::new(Delete, "/api/v1/itineraries/{id}/media", "Delete all media", CaseBody::None, 204, "Media"),
    // Media: error cases
    EndpointCase::new(Get, "/api/v1/itineraries/00000000-0000-0000-0000-000000000000/media", "Get media for non-existent itinerary", CaseBody::None, 404, "Media"),
    EndpointCase::new(Get, "/api/v1/itineraries/00000000-0000-0000-0000-000000000000/media/active", "Get active media for non-existent itinerary", CaseBody::None, 404, "Media"),
    EndpointCase::new(Get, "/api/v1/itineraries/00000000-0000-0000-0000-000000000000/media/paged?page=0&size=10", "Get paginated media for non-existent itinerary", CaseBody::None, 404, "Media"),
    EndpointCase::new(Get, "/api/v1/itineraries/00000000-0000-0000-0000-000000000000/media/123e4567-e89b-12d3-a456-426614174000", "Get non-existent media", CaseBody::None, 404, "Media"),
    EndpointCase::new(Post, "/api/v1/itineraries/00000000-0000-0000-0000-000000000000/media/123e4567-e89b-12d3-a456-426614174000/sas?expirationMinutes=60", "Generate SAS for non-existent media", CaseBody::None, 404, "Media"),
    EndpointCase::new(Delete, "/api/v1/itineraries/00000000-0000-0000-0000-000000000000/media/123e4567-e89b-12d3-a456-426614174000", "Delete non-existent media", CaseBody::None, 404, "Media"),
    EndpointCase::new(Delete, "/api/v1/itineraries/00000000-0000-0000-0000-000000000000/media", "Delete all media for non-existent itinerary", CaseBody::None, 404, "Media"),
    EndpointCase::new(Post, "/api/v1/itineraries/{id}/media", "Upload media without file", CaseBody::None, 400, "Media"),
    EndpointCase::new(Post, "/api/v1/itineraries/{id}/media/{mediaId}/sas?expirationMinutes=0", "Generate SAS with invalid expiration", CaseBody::None, 400, "Media"),
    EndpointCase::new(Post, "/api/v1/itineraries/{id}/media/{mediaId}/sas?expirationMinutes=2000", "Generate SAS with too long expiration", CaseBody::None, 400, "Media"),
    // Actuator
    EndpointCase::new(Get, "/actuator", "Actuator root", CaseBody::None, 200, "Actuator"),
    EndpointCase::new(Get, "/actuator/health", "Application health status", CaseBody::None, 200, "Actuator"),
    EndpointCase::new(Get, "/actuator/health/db", "Database health status", CaseBody::None, 200, "Actuator"),
    EndpointCase::new(Get, "/actuator/health/redis", "Redis health status", CaseBody::None, 200, "Actuator"),
    EndpointCase::new(Get, "/actuator/info", "Application information", CaseBody::None, 200, "Actuator"),
    EndpointCase::new(Get, "/actuator/metrics", "List available metrics", CaseBody::None, 200, "Actuator"),
    EndpointCase::new(Get, "/actuator/metrics/jvm.memory.used", "Get specific metric", CaseBody::None, 200, "Actuator"),
    EndpointCase::new(Get, "/actuator/health/invalid-component", "Invalid health component", CaseBody::None, 404, "Actuator"),
    EndpointCase::new(Get, "/actuator/metrics/non.existent.metric", "Non-existent metric", CaseBody::None, 404, "Actuator"),
    EndpointCase::new(Get, "/actuator/invalid-endpoint", "Invalid actuator endpoint", CaseBody::None, 404, "Actuator"),
    // Swagger / OpenAPI
    EndpointCase::new(Get, "/swagger-ui.html", "Swagger UI interface", CaseBody::None, 200, "Swagger"),
    EndpointCase::new(Get, "/v3/api-docs", "OpenAPI documentation JSON", CaseBody::None, 200, "Swagger"),
    EndpointCase::new(Get, "/swagger-ui/index.html", "Swagger UI index", CaseBody::None, 200, "Swagger"),
    EndpointCase::new(Get, "/swagger-ui/invalid-path", "Invalid Swagger path", CaseBody::None, 404, "Swagger"),
    EndpointCase::new(Get, "/v3/api-docs/invalid-path", "Invalid OpenAPI path", CaseBody::None, 404, "Swagger"),
    EndpointCase::new(Post, "/swagger-ui.html", "Invalid method on Swagger UI", CaseBody::None, 405, "Swagger"),
];

/// Requests timed without any prior setup
pub const SAMPLES: &[TimedRequest] = &[
    TimedRequest::new("health_check", "Health Check", Get, "/actuator/health", None),
    TimedRequest::new("list_itineraries", "List Itineraries", Get, "/api/itineraries", None),
    TimedRequest::new("search_by_city", "Search by City", Get, "/api/itineraries?city=Casablanca", None),
    TimedRequest::new("actuator_info", "Actuator Info", Get, "/actuator/info", None),
    TimedRequest::new("actuator_metrics", "Actuator Metrics", Get, "/actuator/metrics", None),
    TimedRequest::new("swagger_ui", "Swagger UI", Get, "/swagger-ui.html", None),
    TimedRequest::new("openapi_docs", "OpenAPI Docs", Get, "/v3/api-docs", None),
    TimedRequest::new(
        "create_itinerary",
        "Create Itinerary",
        Post,
        "/api/itineraries",
        Some(r#"{"city":"Performance Test City","startDate":"2025-04-01","endDate":"2025-04-03","days":[{"day":1,"items":["Performance test activity"]}]}"#),
    ),
    TimedRequest::new(
        "update_itinerary",
        "Update Itinerary",
        Put,
        "/api/itineraries/00000000-0000-0000-0000-000000000000",
        Some(r#"{"city":"Updated Performance Test City"}"#),
    ),
    TimedRequest::new("delete_itinerary", "Delete Itinerary", Delete, "/api/itineraries/00000000-0000-0000-0000-000000000000", None),
];

/// Body of the throwaway itinerary created for the samples below
pub const THROWAWAY_ITINERARY: &str = r#"{"city":"Performance Test City","startDate":"2025-04-01","endDate":"2025-04-03","days":[{"day":1,"items":["Test activity"]}]}"#;

/// Requests timed against the throwaway itinerary; `{id}` is its identifier
pub const THROWAWAY_SAMPLES: &[TimedRequest] = &[
    TimedRequest::new("get_itinerary", "Get Itinerary", Get, "/api/itineraries/{id}", None),
    TimedRequest::new("add_item", "Add Item", Post, "/api/itineraries/{id}/days/1/items", Some(r#"{"value":"Performance test item"}"#)),
    TimedRequest::new("remove_item", "Remove Item", Delete, "/api/itineraries/{id}/days/1/items/0", None),
    TimedRequest::new("get_media", "Get Media", Get, "/api/v1/itineraries/{id}/media", None),
    TimedRequest::new("create_media", "Create Media", Post, "/api/v1/itineraries/{id}/media", Some("")),
    TimedRequest::new("delete_media", "Delete Media", Delete, "/api/v1/itineraries/{id}/media", None),
];

/// Rows of the spreadsheet's endpoint catalog sheet
pub const CATALOG: &[(&str, &str)] = &[
    ("GET /api/itineraries", "List all itineraries"),
    ("POST /api/itineraries", "Create a new itinerary"),
    ("GET /api/itineraries/{id}", "Get a specific itinerary"),
    ("PUT /api/itineraries/{id}", "Update an itinerary"),
    ("DELETE /api/itineraries/{id}", "Delete an itinerary"),
    ("GET /api/v1/itineraries/{id}/media", "Get all media"),
    ("POST /api/v1/itineraries/{id}/media", "Upload a file"),
    ("GET /actuator/health", "Application health"),
    ("GET /swagger-ui.html", "Swagger UI interface"),
    ("GET /v3/api-docs", "OpenAPI documentation"),
];
