//! Configuration management with environment variable support.
//!
//! Every environment-specific value the pipelines need (service URLs, compose
//! settings, fixture and test-image paths, the fixed identifiers used by the
//! endpoint table) lives here instead of being embedded in the steps:
//! - Environment variables for all configurable values
//! - Defaults matching the local MusafirGO development stack
//! - Builder-style overrides for the CLI and for tests
//!
//! # Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `MUSAFIRGO_ITINERARY_URL` | Base URL of the itinerary API | `http://localhost:8080` |
//! | `MUSAFIRGO_WEB_URL` | Base URL of the web mock API | `http://localhost:3000` |
//! | `MUSAFIRGO_FRONTEND_URL` | URL of the Angular dev server | `http://localhost:4200` |
//! | `MUSAFIRGO_DOCKER_BIN` | Container engine CLI | `docker` |
//! | `MUSAFIRGO_COMPOSE_BIN` | Compose CLI | `docker-compose` |
//! | `MUSAFIRGO_WEB_PROJECT_DIR` | Web project checkout | `.` |
//! | `MUSAFIRGO_WEB_COMPOSE_FILE` | Compose file of the web stack | `docker-compose.dev.yml` |
//! | `MUSAFIRGO_FIXTURE_FILE` | SQL fixture path inside the database container | `/docker-entrypoint-initdb.d/01-dump-data.sql` |
//! | `MUSAFIRGO_TEST_IMAGE` | Image uploaded by the media test | `test-image.png` |
//! | `MUSAFIRGO_ITINERARY_ID` | Predefined itinerary identifier | `50b5b757-afef-5771-af1e-ce2e3291b956` |
//! | `MUSAFIRGO_MEDIA_ID` | Predefined media identifier | `40a4a646-9ede-4660-9f0d-bd1d2190a901` |
//! | `MUSAFIRGO_STARTUP_WAIT` | Seconds to wait after starting the stack | `60` (itinerary) / `30` (web) |
//! | `MUSAFIRGO_POLL_INTERVAL_MS` | Interval between readiness polls | `2000` |
//! | `MUSAFIRGO_REPORT_DIR` | Directory receiving the reports | `.` |
//! | `MUSAFIRGO_OPEN_REPORT` | Open the HTML report when done | `true` |
//! | `MUSAFIRGO_BROWSER` | Browser command used to open the report | platform default |
//!
//! # Example
//!
//! ```bash
//! # Point the itinerary pipeline at a staging box and keep reports aside
//! export MUSAFIRGO_ITINERARY_URL="http://staging.local:8080"
//! export MUSAFIRGO_REPORT_DIR="/var/tmp/musafirgo-reports"
//! export MUSAFIRGO_OPEN_REPORT=false
//! ```

use std::env;
use std::path::PathBuf;
use std::time::Duration;

// ============================================================================
// Default Values
// ============================================================================

/// Default itinerary API base URL
pub const DEFAULT_ITINERARY_URL: &str = "http://localhost:8080";

/// Default web mock API base URL
pub const DEFAULT_WEB_URL: &str = "http://localhost:3000";

/// Default Angular dev server URL
pub const DEFAULT_FRONTEND_URL: &str = "http://localhost:4200";

/// Default container engine binary
pub const DEFAULT_DOCKER_BIN: &str = "docker";

/// Default compose binary
pub const DEFAULT_COMPOSE_BIN: &str = "docker-compose";

/// Default web project directory
pub const DEFAULT_WEB_PROJECT_DIR: &str = ".";

/// Default compose file of the web stack
pub const DEFAULT_WEB_COMPOSE_FILE: &str = "docker-compose.dev.yml";

/// Default SQL fixture path inside the database container
pub const DEFAULT_FIXTURE_FILE: &str = "/docker-entrypoint-initdb.d/01-dump-data.sql";

/// Default test image uploaded by the media endpoint test
pub const DEFAULT_TEST_IMAGE: &str = "test-image.png";

/// Predefined itinerary loaded by the fixtures
pub const DEFAULT_ITINERARY_ID: &str = "50b5b757-afef-5771-af1e-ce2e3291b956";

/// Predefined media loaded by the fixtures
pub const DEFAULT_MEDIA_ID: &str = "40a4a646-9ede-4660-9f0d-bd1d2190a901";

/// Identifiers from earlier fixture generations, rewritten to the itinerary id
pub const LEGACY_ITINERARY_IDS: [&str; 2] = [
    "83a3b4ca-8d0c-4faf-ab02-caf3287f28cf",
    "c0fc6c3d-38fe-4f37-8c6a-4cd4badf65d3",
];

/// Identifiers from earlier fixture generations, rewritten to the media id
pub const LEGACY_MEDIA_IDS: [&str; 1] = ["123e4567-e89b-12d3-a456-426614174000"];

/// Seconds to wait after `up -d` for the itinerary stack
pub const DEFAULT_ITINERARY_STARTUP_WAIT: u64 = 60;

/// Seconds to wait after `up -d` for the web stack
pub const DEFAULT_WEB_STARTUP_WAIT: u64 = 30;

/// Interval between readiness polls (milliseconds)
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 2000;

/// Readiness polls before giving up on the itinerary service
pub const DEFAULT_READINESS_ATTEMPTS: u32 = 30;

/// Engine polls after launching Docker Desktop (Windows)
pub const DEFAULT_DESKTOP_START_ATTEMPTS: u32 = 30;

/// Engine polls after `systemctl start docker`
pub const DEFAULT_SERVICE_START_ATTEMPTS: u32 = 15;

/// Running services expected from the itinerary compose stack
pub const DEFAULT_ITINERARY_MIN_SERVICES: usize = 3;

/// Running services expected from the web compose stack
pub const DEFAULT_WEB_MIN_SERVICES: usize = 2;

/// Default report directory
pub const DEFAULT_REPORT_DIR: &str = ".";

// ============================================================================
// Environment Variable Names
// ============================================================================

pub const ENV_ITINERARY_URL: &str = "MUSAFIRGO_ITINERARY_URL";
pub const ENV_WEB_URL: &str = "MUSAFIRGO_WEB_URL";
pub const ENV_FRONTEND_URL: &str = "MUSAFIRGO_FRONTEND_URL";
pub const ENV_DOCKER_BIN: &str = "MUSAFIRGO_DOCKER_BIN";
pub const ENV_COMPOSE_BIN: &str = "MUSAFIRGO_COMPOSE_BIN";
pub const ENV_WEB_PROJECT_DIR: &str = "MUSAFIRGO_WEB_PROJECT_DIR";
pub const ENV_WEB_COMPOSE_FILE: &str = "MUSAFIRGO_WEB_COMPOSE_FILE";
pub const ENV_FIXTURE_FILE: &str = "MUSAFIRGO_FIXTURE_FILE";
pub const ENV_TEST_IMAGE: &str = "MUSAFIRGO_TEST_IMAGE";
pub const ENV_ITINERARY_ID: &str = "MUSAFIRGO_ITINERARY_ID";
pub const ENV_MEDIA_ID: &str = "MUSAFIRGO_MEDIA_ID";
pub const ENV_STARTUP_WAIT: &str = "MUSAFIRGO_STARTUP_WAIT";
pub const ENV_POLL_INTERVAL_MS: &str = "MUSAFIRGO_POLL_INTERVAL_MS";
pub const ENV_REPORT_DIR: &str = "MUSAFIRGO_REPORT_DIR";
pub const ENV_OPEN_REPORT: &str = "MUSAFIRGO_OPEN_REPORT";
pub const ENV_BROWSER: &str = "MUSAFIRGO_BROWSER";

/// Centralized configuration for both pipelines
#[derive(Debug, Clone)]
pub struct Config {
    pub itinerary: ItinerarySettings,
    pub web: WebSettings,
    pub tooling: ToolingSettings,
    pub report: ReportSettings,
}

/// Settings of the itinerary service pipeline
#[derive(Debug, Clone)]
pub struct ItinerarySettings {
    pub base_url: String,
    /// Compose service rebuilt by the build step
    pub compose_service: String,
    /// Compose service running PostgreSQL
    pub database_service: String,
    pub database_user: String,
    pub database_name: String,
    /// SQL file loaded through `psql -f` inside the database container
    pub fixture_file: String,
    /// Local image uploaded by the "upload test image" case
    pub test_image: PathBuf,
    pub identifiers: IdentifierSet,
    pub startup_wait: Duration,
    pub min_running_services: usize,
    pub readiness_attempts: u32,
}

/// Fixed identifiers substituted into endpoint paths
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentifierSet {
    /// Replaces `{id}`
    pub itinerary_id: String,
    /// Replaces `{mediaId}`
    pub media_id: String,
    pub legacy_itinerary_ids: Vec<String>,
    pub legacy_media_ids: Vec<String>,
}

/// Settings of the web service pipeline
#[derive(Debug, Clone)]
pub struct WebSettings {
    pub base_url: String,
    pub frontend_url: String,
    pub project_dir: PathBuf,
    pub compose_file: String,
    pub startup_wait: Duration,
    pub min_running_services: usize,
}

/// External tools driven by the pipelines
#[derive(Debug, Clone)]
pub struct ToolingSettings {
    pub docker_bin: String,
    pub compose_bin: String,
    pub poll_interval: Duration,
    pub desktop_start_attempts: u32,
    pub service_start_attempts: u32,
}

/// Report output settings
#[derive(Debug, Clone)]
pub struct ReportSettings {
    pub output_dir: PathBuf,
    pub open_in_browser: bool,
    /// Browser command; `None` selects the platform default
    pub browser: Option<String>,
}

impl Config {
    /// Create configuration from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        Self {
            itinerary: ItinerarySettings::from_env(),
            web: WebSettings::from_env(),
            tooling: ToolingSettings::from_env(),
            report: ReportSettings::from_env(),
        }
    }

    /// Create configuration with all defaults (ignoring environment)
    pub fn defaults() -> Self {
        Self {
            itinerary: ItinerarySettings::defaults(),
            web: WebSettings::defaults(),
            tooling: ToolingSettings::defaults(),
            report: ReportSettings::defaults(),
        }
    }

    /// Configuration with every sleep and poll interval set to zero.
    ///
    /// Meant for driving the pipelines against local mock servers.
    pub fn without_waits(mut self) -> Self {
        self.itinerary.startup_wait = Duration::ZERO;
        self.itinerary.readiness_attempts = 1;
        self.web.startup_wait = Duration::ZERO;
        self.tooling.poll_interval = Duration::ZERO;
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

impl ItinerarySettings {
    pub fn from_env() -> Self {
        let defaults = Self::defaults();
        Self {
            base_url: env::var(ENV_ITINERARY_URL).unwrap_or(defaults.base_url),
            fixture_file: env::var(ENV_FIXTURE_FILE).unwrap_or(defaults.fixture_file),
            test_image: env::var(ENV_TEST_IMAGE)
                .map(PathBuf::from)
                .unwrap_or(defaults.test_image),
            identifiers: IdentifierSet::from_env(),
            startup_wait: env_secs(ENV_STARTUP_WAIT).unwrap_or(defaults.startup_wait),
            ..defaults
        }
    }

    pub fn defaults() -> Self {
        Self {
            base_url: DEFAULT_ITINERARY_URL.to_string(),
            compose_service: "itinerary-service".to_string(),
            database_service: "postgres".to_string(),
            database_user: "itinerary".to_string(),
            database_name: "itinerary".to_string(),
            fixture_file: DEFAULT_FIXTURE_FILE.to_string(),
            test_image: PathBuf::from(DEFAULT_TEST_IMAGE),
            identifiers: IdentifierSet::defaults(),
            startup_wait: Duration::from_secs(DEFAULT_ITINERARY_STARTUP_WAIT),
            min_running_services: DEFAULT_ITINERARY_MIN_SERVICES,
            readiness_attempts: DEFAULT_READINESS_ATTEMPTS,
        }
    }
}

impl IdentifierSet {
    pub fn from_env() -> Self {
        let defaults = Self::defaults();
        Self {
            itinerary_id: env::var(ENV_ITINERARY_ID).unwrap_or(defaults.itinerary_id),
            media_id: env::var(ENV_MEDIA_ID).unwrap_or(defaults.media_id),
            ..defaults
        }
    }

    pub fn defaults() -> Self {
        Self {
            itinerary_id: DEFAULT_ITINERARY_ID.to_string(),
            media_id: DEFAULT_MEDIA_ID.to_string(),
            legacy_itinerary_ids: LEGACY_ITINERARY_IDS.iter().map(|s| s.to_string()).collect(),
            legacy_media_ids: LEGACY_MEDIA_IDS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl WebSettings {
    pub fn from_env() -> Self {
        let defaults = Self::defaults();
        Self {
            base_url: env::var(ENV_WEB_URL).unwrap_or(defaults.base_url),
            frontend_url: env::var(ENV_FRONTEND_URL).unwrap_or(defaults.frontend_url),
            project_dir: env::var(ENV_WEB_PROJECT_DIR)
                .map(PathBuf::from)
                .unwrap_or(defaults.project_dir),
            compose_file: env::var(ENV_WEB_COMPOSE_FILE).unwrap_or(defaults.compose_file),
            startup_wait: env_secs(ENV_STARTUP_WAIT).unwrap_or(defaults.startup_wait),
            ..defaults
        }
    }

    pub fn defaults() -> Self {
        Self {
            base_url: DEFAULT_WEB_URL.to_string(),
            frontend_url: DEFAULT_FRONTEND_URL.to_string(),
            project_dir: PathBuf::from(DEFAULT_WEB_PROJECT_DIR),
            compose_file: DEFAULT_WEB_COMPOSE_FILE.to_string(),
            startup_wait: Duration::from_secs(DEFAULT_WEB_STARTUP_WAIT),
            min_running_services: DEFAULT_WEB_MIN_SERVICES,
        }
    }
}

impl ToolingSettings {
    pub fn from_env() -> Self {
        let defaults = Self::defaults();
        Self {
            docker_bin: env::var(ENV_DOCKER_BIN).unwrap_or(defaults.docker_bin),
            compose_bin: env::var(ENV_COMPOSE_BIN).unwrap_or(defaults.compose_bin),
            poll_interval: env::var(ENV_POLL_INTERVAL_MS)
                .ok()
                .and_then(|s| s.parse().ok())
                .map(Duration::from_millis)
                .unwrap_or(defaults.poll_interval),
            ..defaults
        }
    }

    pub fn defaults() -> Self {
        Self {
            docker_bin: DEFAULT_DOCKER_BIN.to_string(),
            compose_bin: DEFAULT_COMPOSE_BIN.to_string(),
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
            desktop_start_attempts: DEFAULT_DESKTOP_START_ATTEMPTS,
            service_start_attempts: DEFAULT_SERVICE_START_ATTEMPTS,
        }
    }
}

impl ReportSettings {
    pub fn from_env() -> Self {
        let defaults = Self::defaults();
        Self {
            output_dir: env::var(ENV_REPORT_DIR)
                .map(PathBuf::from)
                .unwrap_or(defaults.output_dir),
            open_in_browser: env::var(ENV_OPEN_REPORT)
                .ok()
                .and_then(|s| parse_bool(&s))
                .unwrap_or(defaults.open_in_browser),
            browser: env::var(ENV_BROWSER).ok().filter(|s| !s.trim().is_empty()),
        }
    }

    pub fn defaults() -> Self {
        Self {
            output_dir: PathBuf::from(DEFAULT_REPORT_DIR),
            open_in_browser: true,
            browser: None,
        }
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

fn env_secs(name: &str) -> Option<Duration> {
    env::var(name)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .map(Duration::from_secs)
}

/// Parse a boolean flag value: "1/true/yes/on" or "0/false/no/off"
fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
