//! MusafirGO pipelines - local smoke tests and benchmarks for the MusafirGO
//! itinerary and web services.
//!
//! This crate provides:
//! - A step harness recording every step's outcome, duration and payload
//! - Prerequisite checks and docker / compose driven stack bootstrap
//! - Health probes, an endpoint exerciser and a latency sampler
//! - HTML and spreadsheet reports of each run
//!
//! # Example
//!
//! ```rust,no_run
//! use musafirgo_pipeline::{Config, RunOptions, SystemCommandRunner, Variant, run};
//!
//! let config = Config::from_env();
//! let options = RunOptions { skip_init: true, ..RunOptions::default() };
//! let result = run(Variant::Itinerary, config, options, None, Box::new(SystemCommandRunner)).unwrap();
//! println!("success: {}", result.success);
//! ```

pub mod catalog;
pub mod config;
pub mod harness;
pub mod infra;
pub mod logging;
pub mod pipeline;
pub mod probe;
pub mod report;
pub mod results;

// Re-export configuration
pub use config::Config;

// Re-export harness types
pub use harness::{PipelineContext, PipelineResult, RunOptions, Step, StepError, StepOutput, StepResult};

// Re-export external command plumbing
pub use infra::{CommandOutput, CommandRunner, CommandSpec, SystemCommandRunner};

// Re-export pipeline drivers
pub use pipeline::{Variant, run};

// Re-export probes and result types
pub use probe::{ApiClient, HttpMethod};
pub use results::{CaseOutcome, CaseResult, EndpointTestSummary, LatencySample, LatencySummary};

// Re-export reports
pub use report::{ReportError, ReportLayout, ReportResult};
