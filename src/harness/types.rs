use chrono::{DateTime, Local};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::report::ReportError;
use crate::results::{EndpointTestSummary, LatencySummary};

/// Payload produced by a successful step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum StepOutput {
    /// Plain check outcome (e.g. whether every health probe answered)
    Flag(bool),

    /// Endpoint exercise tally
    Endpoints(EndpointTestSummary),

    /// Latency measurements
    Latency(LatencySummary),

    /// Phase disabled by a command-line flag or configuration
    Skipped,

    /// Artifact written to disk
    Report(PathBuf),
}

/// One named, timed unit of pipeline work
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step {
    pub name: String,

    pub success: bool,

    #[serde(rename = "duration_seconds")]
    pub duration: f64,

    /// Set if and only if the step failed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<StepOutput>,
}

impl Step {
    pub fn succeeded(name: &str, duration: f64, output: StepOutput) -> Self {
        Self {
            name: name.to_string(),
            success: true,
            duration,
            error: None,
            result: Some(output),
        }
    }

    pub fn failed(name: &str, duration: f64, error: &StepError) -> Self {
        let mut message = error.to_string();
        if message.trim().is_empty() {
            message = "unknown error".to_string();
        }
        Self {
            name: name.to_string(),
            success: false,
            duration,
            error: Some(message),
            result: None,
        }
    }

    pub fn was_skipped(&self) -> bool {
        matches!(self.result, Some(StepOutput::Skipped))
    }
}

/// Aggregated outcome of one pipeline run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineResult {
    pub start_time: DateTime<Local>,

    pub end_time: Option<DateTime<Local>>,

    #[serde(rename = "total_duration_seconds")]
    pub total_duration: f64,

    pub success: bool,

    /// Keyed by step name, kept in execution order
    pub steps: IndexMap<String, Step>,
}

impl Default for PipelineResult {
    fn default() -> Self {
        Self::new()
    }
}

impl PipelineResult {
    pub fn new() -> Self {
        Self {
            start_time: Local::now(),
            end_time: None,
            total_duration: 0.0,
            success: false,
            steps: IndexMap::new(),
        }
    }

    /// Store a step, replacing any earlier step with the same name
    pub fn record(&mut self, step: Step) {
        self.steps.insert(step.name.clone(), step);
    }

    pub fn step(&self, name: &str) -> Option<&Step> {
        self.steps.get(name)
    }

    pub fn all_steps_succeeded(&self) -> bool {
        self.steps.values().all(|s| s.success)
    }

    /// Endpoint summary produced by whichever step ran the exerciser
    pub fn api_results(&self) -> Option<&EndpointTestSummary> {
        self.steps.values().find_map(|s| match &s.result {
            Some(StepOutput::Endpoints(summary)) => Some(summary),
            _ => None,
        })
    }

    /// Latency summary produced by whichever step ran the sampler
    pub fn latency_results(&self) -> Option<&LatencySummary> {
        self.steps.values().find_map(|s| match &s.result {
            Some(StepOutput::Latency(summary)) => Some(summary),
            _ => None,
        })
    }

    /// Close the run at `end`: duration and overall verdict
    pub fn finalize_at(&mut self, end: DateTime<Local>) {
        let elapsed = end.signed_duration_since(self.start_time);
        self.end_time = Some(end);
        self.total_duration = (elapsed.num_milliseconds().max(0) as f64) / 1000.0;
        self.success = self.all_steps_succeeded();
    }

    pub fn finalize(&mut self) {
        self.finalize_at(Local::now());
    }

    /// Copy of the run closed at the current instant, for reports written
    /// while the pipeline is still going.
    pub fn snapshot(&self) -> Self {
        let mut copy = self.clone();
        if copy.end_time.is_none() {
            copy.finalize();
        }
        copy
    }
}

/// Result type for step operations
pub type StepResult<T> = Result<T, StepError>;

/// Errors that turn a step into a failed step
#[derive(Debug, thiserror::Error)]
pub enum StepError {
    /// A check did not hold
    #[error("{0}")]
    Failed(String),

    /// An external command could not be spawned
    #[error("failed to run `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// An external command exited unsuccessfully
    #[error("`{command}` exited with {status}{}", stderr_suffix(.stderr))]
    CommandFailed {
        command: String,
        status: String,
        stderr: String,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Report(#[from] ReportError),

    /// The step panicked
    #[error("Panic: {0}")]
    Panic(String),
}

impl StepError {
    pub fn failed(message: impl Into<String>) -> Self {
        StepError::Failed(message.into())
    }
}

fn stderr_suffix(stderr: &str) -> String {
    let trimmed = stderr.trim();
    if trimmed.is_empty() {
        String::new()
    } else {
        format!(": {}", trimmed)
    }
}
