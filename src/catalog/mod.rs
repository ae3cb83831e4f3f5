//! Static descriptions of what each pipeline exercises.
//!
//! Endpoint tables, timed samples, health probes and required tools are
//! plain `const` data; the probes interpret them.

pub mod itinerary;
pub mod web;

use crate::probe::HttpMethod;

/// Body of an endpoint case
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaseBody {
    None,
    Json(&'static str),
    /// Multipart upload of the configured test image
    TestImage,
}

/// A static HTTP request template plus its expected outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EndpointCase {
    pub method: HttpMethod,
    /// May contain `{id}` and `{mediaId}`
    pub path: &'static str,
    pub description: &'static str,
    pub body: CaseBody,
    pub expected_status: u16,
    pub category: &'static str,
}

impl EndpointCase {
    pub const fn new(
        method: HttpMethod,
        path: &'static str,
        description: &'static str,
        body: CaseBody,
        expected_status: u16,
        category: &'static str,
    ) -> Self {
        Self {
            method,
            path,
            description,
            body,
            expected_status,
            category,
        }
    }
}

/// A request timed by the performance sampler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimedRequest {
    pub key: &'static str,
    pub label: &'static str,
    pub method: HttpMethod,
    pub path: &'static str,
    pub body: Option<&'static str>,
}

impl TimedRequest {
    pub const fn new(
        key: &'static str,
        label: &'static str,
        method: HttpMethod,
        path: &'static str,
        body: Option<&'static str>,
    ) -> Self {
        Self {
            key,
            label,
            method,
            path,
            body,
        }
    }
}

/// Where a health probe is sent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeTarget {
    /// Path on the service under test
    Service(&'static str),
    /// The front-end dev server
    Frontend,
}

/// One health probe
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HealthProbe {
    pub label: &'static str,
    pub target: ProbeTarget,
    /// An unhealthy optional probe only logs a warning
    pub required: bool,
}

/// External tool checked before anything else runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    /// The container engine, checked with `docker info` and remediated if down
    ContainerEngine,
    /// The compose CLI
    Compose,
    /// Any other CLI, checked by running it with `args`
    Cli {
        name: &'static str,
        program: &'static str,
        args: &'static [&'static str],
    },
}

impl Tool {
    pub fn name(&self) -> &'static str {
        match self {
            Tool::ContainerEngine => "Docker",
            Tool::Compose => "Docker Compose",
            Tool::Cli { name, .. } => *name,
        }
    }
}
