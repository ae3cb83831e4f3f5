//! Types for endpoint test and latency results.

use serde::{Deserialize, Serialize};

use crate::probe::HttpMethod;

/// Latency recorded for a sample whose request never got a response.
pub const FAILED_SAMPLE_MS: f64 = -1.0;

/// How a single endpoint case ended
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "message", rename_all = "snake_case")]
pub enum CaseOutcome {
    /// Observed status matched the expected one
    Passed,
    /// A response came back with another status
    StatusMismatch,
    /// The request could not be sent or no response was received
    TransportError(String),
    /// The request could not be built (e.g. the upload file is missing)
    SetupError(String),
}

/// Result of a single endpoint case, in execution order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseResult {
    pub method: HttpMethod,

    /// Path after identifier substitution
    pub path: String,

    pub description: String,

    pub category: String,

    pub expected_status: u16,

    /// Status returned by the service, if any
    pub observed_status: Option<u16>,

    /// Wall-clock time of the request in milliseconds
    pub elapsed_ms: f64,

    pub outcome: CaseOutcome,
}

impl CaseResult {
    pub fn passed(&self) -> bool {
        matches!(self.outcome, CaseOutcome::Passed)
    }

    /// Human-readable line, e.g. `GET /actuator - FAILED (Expected: 200, Got: 500)`
    pub fn detail_line(&self) -> String {
        let verdict = match &self.outcome {
            CaseOutcome::Passed => format!("PASSED ({:.2}ms)", self.elapsed_ms),
            CaseOutcome::StatusMismatch => format!(
                "FAILED (Expected: {}, Got: {})",
                self.expected_status,
                self.observed_status.unwrap_or_default()
            ),
            CaseOutcome::TransportError(msg) | CaseOutcome::SetupError(msg) => {
                format!("FAILED ({})", msg)
            }
        };
        format!("{} {} - {}", self.method, self.path, verdict)
    }
}

/// Tally of an endpoint exercise run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EndpointTestSummary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,

    /// `passed / total * 100`, or 100 when nothing ran
    pub success_rate: f64,

    /// One line per case, in execution order
    pub details: Vec<String>,

    pub cases: Vec<CaseResult>,
}

impl Default for EndpointTestSummary {
    fn default() -> Self {
        Self {
            total: 0,
            passed: 0,
            failed: 0,
            success_rate: 100.0,
            details: Vec::new(),
            cases: Vec::new(),
        }
    }
}

impl EndpointTestSummary {
    /// Summary of a run where no case was executed
    pub fn empty() -> Self {
        Self::default()
    }

    /// Append a case result and refresh the counters
    pub fn record(&mut self, case: CaseResult) {
        self.total += 1;
        if case.passed() {
            self.passed += 1;
        } else {
            self.failed += 1;
        }
        self.details.push(case.detail_line());
        self.cases.push(case);
        self.success_rate = success_rate(self.passed, self.total);
    }
}

/// Percentage of passed cases; an empty run counts as fully successful
pub fn success_rate(passed: usize, total: usize) -> f64 {
    if total == 0 {
        100.0
    } else {
        passed as f64 / total as f64 * 100.0
    }
}

/// One timed request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatencySample {
    /// Stable identifier, e.g. `health_check`
    pub key: String,

    /// Display label, e.g. `Health Check`
    pub label: String,

    /// Milliseconds, or [`FAILED_SAMPLE_MS`]
    pub millis: f64,
}

impl LatencySample {
    pub fn is_failure(&self) -> bool {
        self.millis < 0.0
    }
}

/// Latency measurements with aggregates over the successful ones
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LatencySummary {
    pub samples: Vec<LatencySample>,
    pub average_ms: f64,
    pub max_ms: f64,
    pub min_ms: f64,
    pub successful_tests: usize,
}

impl LatencySummary {
    pub fn from_samples(samples: Vec<LatencySample>) -> Self {
        let mut summary = Self {
            samples,
            ..Default::default()
        };
        summary.recompute();
        summary
    }

    /// Record a measurement and refresh the aggregates
    pub fn push(&mut self, key: &str, label: &str, millis: f64) {
        self.samples.push(LatencySample {
            key: key.to_string(),
            label: label.to_string(),
            millis,
        });
        self.recompute();
    }

    /// Measurement for `key`, failures included as the sentinel value
    pub fn sample(&self, key: &str) -> Option<f64> {
        self.samples.iter().find(|s| s.key == key).map(|s| s.millis)
    }

    /// Number of samples attempted, failures included
    pub fn attempted(&self) -> usize {
        self.samples.len()
    }

    fn recompute(&mut self) {
        let valid: Vec<f64> = self
            .samples
            .iter()
            .filter(|s| !s.is_failure())
            .map(|s| s.millis)
            .collect();

        if valid.is_empty() {
            self.average_ms = 0.0;
            self.max_ms = 0.0;
            self.min_ms = 0.0;
            self.successful_tests = 0;
            return;
        }

        let sum: f64 = valid.iter().sum();
        self.average_ms = sum / valid.len() as f64;
        self.max_ms = valid.iter().copied().fold(f64::MIN, f64::max);
        self.min_ms = valid.iter().copied().fold(f64::MAX, f64::min);
        self.successful_tests = valid.len();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn case(expected: u16, observed: Option<u16>, outcome: CaseOutcome) -> CaseResult {
        CaseResult {
            method: HttpMethod::Get,
            path: "/api/itineraries/00000000-0000-0000-0000-000000000000".to_string(),
            description: "Get non-existent itinerary".to_string(),
            category: "Itineraries".to_string(),
            expected_status: expected,
            observed_status: observed,
            elapsed_ms: 3.5,
            outcome,
        }
    }

    #[test]
    fn test_detail_line_passed() {
        let line = case(404, Some(404), CaseOutcome::Passed).detail_line();
        assert_eq!(
            line,
            "GET /api/itineraries/00000000-0000-0000-0000-000000000000 - PASSED (3.50ms)"
        );
    }

    #[test]
    fn test_detail_line_mismatch_names_both_statuses() {
        let line = case(404, Some(500), CaseOutcome::StatusMismatch).detail_line();
        assert!(line.ends_with("FAILED (Expected: 404, Got: 500)"), "{line}");
    }

    #[test]
    fn test_detail_line_transport_error() {
        let outcome = CaseOutcome::TransportError("connection refused".to_string());
        let line = case(200, None, outcome).detail_line();
        assert!(line.ends_with("FAILED (connection refused)"));
    }

    #[test]
    fn test_summary_counters() {
        let mut summary = EndpointTestSummary::empty();
        summary.record(case(404, Some(404), CaseOutcome::Passed));
        summary.record(case(404, Some(500), CaseOutcome::StatusMismatch));
        summary.record(case(200, Some(200), CaseOutcome::Passed));
        summary.record(case(200, None, CaseOutcome::TransportError("timeout".into())));

        assert_eq!(summary.total, 4);
        assert_eq!(summary.passed + summary.failed, summary.total);
        assert_eq!(summary.details.len(), 4);
        assert!((summary.success_rate - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_empty_summary_is_fully_successful() {
        let summary = EndpointTestSummary::empty();
        assert_eq!(summary.total, 0);
        assert_eq!(summary.success_rate, 100.0);
    }

    #[test]
    fn test_latency_excludes_failures() {
        let mut summary = LatencySummary::default();
        summary.push("health_check", "Health Check", 10.0);
        summary.push("list", "List", FAILED_SAMPLE_MS);
        summary.push("search", "Search", 30.0);
        summary.push("info", "Info", 20.0);

        assert_eq!(summary.attempted(), 4);
        assert_eq!(summary.successful_tests, 3);
        assert_eq!(summary.average_ms, 20.0);
        assert_eq!(summary.max_ms, 30.0);
        assert_eq!(summary.min_ms, 10.0);
        assert_eq!(summary.sample("list"), Some(FAILED_SAMPLE_MS));
    }

    #[test]
    fn test_latency_all_failed() {
        let summary = LatencySummary::from_samples(vec![LatencySample {
            key: "health_check".into(),
            label: "Health Check".into(),
            millis: FAILED_SAMPLE_MS,
        }]);
        assert_eq!(summary.successful_tests, 0);
        assert_eq!(summary.average_ms, 0.0);
        assert_eq!(summary.min_ms, 0.0);
    }
}
