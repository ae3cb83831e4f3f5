//! Web service (mock API + Angular front-end): endpoints, samples, probes and tools.

use super::{CaseBody, EndpointCase, HealthProbe, ProbeTarget, TimedRequest, Tool};
use crate::probe::HttpMethod::{Get, Post};

pub const REPORT_TITLE: &str = "MusafirGO Web Service Pipeline Report";

pub const REPORT_PREFIX: &str = "MusafirGO_Web_Pipeline_Report_";

pub const TOOLS: &[Tool] = &[
    Tool::ContainerEngine,
    Tool::Compose,
    Tool::Cli {
        name: "Node.js",
        program: "node",
        args: &["--version"],
    },
    Tool::Cli {
        name: "Angular CLI",
        program: "ng",
        args: &["version"],
    },
];

pub const HEALTH_PROBES: &[HealthProbe] = &[
    HealthProbe {
        label: "Mock API health",
        target: ProbeTarget::Service("/api/health"),
        required: true,
    },
    // The dev server is usually not running during a pipeline run.
    HealthProbe {
        label: "Angular application health",
        target: ProbeTarget::Frontend,
        required: false,
    },
];

const LOGIN: &str = r#"{"email":"test@musafirgo.com","password":"password"}"#;

pub const ENDPOINTS: &[EndpointCase] = &[
    // Auth
    EndpointCase::new(Post, "/api/auth/login", "Login user", CaseBody::Json(LOGIN), 200, "Auth"),
    EndpointCase::new(Post, "/api/auth/register", "Register user", CaseBody::Json(r#"{"email":"newuser@test.com","password":"password","name":"New User"}"#), 201, "Auth"),
    EndpointCase::new(Get, "/api/auth/me", "Get current user", CaseBody::None, 200, "Auth"),
    // Destinations
    EndpointCase::new(Get, "/api/destinations", "List all destinations", CaseBody::None, 200, "Destinations"),
    EndpointCase::new(Get, "/api/destinations?search=Istanbul", "Search destinations", CaseBody::None, 200, "Destinations"),
    EndpointCase::new(Get, "/api/destinations?country=Turquie", "Filter by country", CaseBody::None, 200, "Destinations"),
    EndpointCase::new(Get, "/api/destinations?halalFriendly=true", "Filter halal friendly", CaseBody::None, 200, "Destinations"),
    EndpointCase::new(Get, "/api/destinations/1", "Get specific destination", CaseBody::None, 200, "Destinations"),
    // Accommodations
    EndpointCase::new(Get, "/api/accommodations", "List all accommodations", CaseBody::None, 200, "Accommodations"),
    EndpointCase::new(Get, "/api/accommodations?search=Hotel", "Search accommodations", CaseBody::None, 200, "Accommodations"),
    EndpointCase::new(Get, "/api/accommodations?location=Istanbul", "Filter by location", CaseBody::None, 200, "Accommodations"),
    EndpointCase::new(Get, "/api/accommodations?minPrice=50&maxPrice=200", "Filter by price range", CaseBody::None, 200, "Accommodations"),
    EndpointCase::new(Get, "/api/accommodations?halalCertified=true", "Filter halal certified", CaseBody::None, 200, "Accommodations"),
    EndpointCase::new(Get, "/api/accommodations/1", "Get specific accommodation", CaseBody::None, 200, "Accommodations"),
    // Error cases
    EndpointCase::new(Get, "/api/destinations/999", "Get non-existent destination", CaseBody::None, 404, "Destinations"),
    EndpointCase::new(Get, "/api/accommodations/999", "Get non-existent accommodation", CaseBody::None, 404, "Accommodations"),
    EndpointCase::new(Post, "/api/auth/login", "Invalid login", CaseBody::Json(r#"{"email":"invalid@test.com","password":"wrong"}"#), 401, "Auth"),
    EndpointCase::new(Post, "/api/auth/register", "Invalid registration", CaseBody::Json(r#"{"email":"test@musafirgo.com","password":"123"}"#), 400, "Auth"),
];

pub const SAMPLES: &[TimedRequest] = &[
    TimedRequest::new("health_check", "Health Check", Get, "/api/health", None),
    TimedRequest::new("destinations", "List Destinations", Get, "/api/destinations", None),
    TimedRequest::new("accommodations", "List Accommodations", Get, "/api/accommodations", None),
    TimedRequest::new("auth_login", "Auth Login", Post, "/api/auth/login", Some(LOGIN)),
    TimedRequest::new(
        "auth_register",
        "Auth Register",
        Post,
        "/api/auth/register",
        Some(r#"{"email":"perf@test.com","password":"password","name":"Perf User"}"#),
    ),
    TimedRequest::new("auth_me", "Auth Me", Get, "/api/auth/me", None),
];
