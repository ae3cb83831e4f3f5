use std::panic::{self, AssertUnwindSafe};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use tracing::{error, info};

use crate::config::Config;
use crate::harness::types::{PipelineResult, Step, StepError, StepOutput, StepResult};
use crate::infra::CommandRunner;
use crate::probe::ApiClient;

/// Phase switches coming from the command line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunOptions {
    pub skip_init: bool,
    pub skip_data_load: bool,
    pub skip_tests: bool,
    /// Launch a browser on the HTML report at the end
    pub open_report: bool,
}

/// State shared by the steps of one pipeline run.
///
/// Owns the result map; steps receive `&mut PipelineContext` and run one
/// after the other on the calling thread.
pub struct PipelineContext {
    pub config: Config,
    pub options: RunOptions,
    pub client: ApiClient,
    pub commands: Box<dyn CommandRunner>,
    pub results: PipelineResult,
    /// Reports written so far in this run
    pub report_files: Vec<PathBuf>,
}

impl PipelineContext {
    pub fn new(
        config: Config,
        options: RunOptions,
        client: ApiClient,
        commands: Box<dyn CommandRunner>,
    ) -> Self {
        Self {
            config,
            options,
            client,
            commands,
            results: PipelineResult::new(),
            report_files: Vec::new(),
        }
    }

    /// Run `operation` as the step `name` and record its outcome.
    ///
    /// Errors and panics inside the operation become a failed step; they never
    /// propagate to the caller, so later steps still run.
    pub fn execute_step<F>(&mut self, name: &str, operation: F)
    where
        F: FnOnce(&mut Self) -> StepResult<StepOutput>,
    {
        info!("Executing step: {}", name);
        let started = Instant::now();

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| operation(&mut *self)))
            .unwrap_or_else(|payload| Err(StepError::Panic(panic_message(payload.as_ref()))));

        let duration = started.elapsed().as_secs_f64();
        let step = match outcome {
            Ok(output) => {
                info!("Step {} completed successfully in {:.2} seconds", name, duration);
                Step::succeeded(name, duration, output)
            }
            Err(err) => {
                let step = Step::failed(name, duration, &err);
                error!(
                    "Step {} failed: {}",
                    name,
                    step.error.as_deref().unwrap_or_default()
                );
                step
            }
        };
        self.results.record(step);
    }

    /// Close the run and log the final summary.
    pub fn finish(&mut self) -> &PipelineResult {
        self.results.finalize();
        let results = &self.results;
        let end = results.end_time.unwrap_or(results.start_time);

        info!("=== PIPELINE COMPLETED ===");
        info!("Start Time: {}", results.start_time.format("%Y-%m-%d %H:%M:%S"));
        info!("End Time: {}", end.format("%Y-%m-%d %H:%M:%S"));
        info!("Total Duration: {:.2} seconds", results.total_duration);
        info!("Success: {}", results.success);
        if results.success {
            info!("Pipeline completed successfully!");
        } else {
            let failed: Vec<&str> = results
                .steps
                .values()
                .filter(|s| !s.success)
                .map(|s| s.name.as_str())
                .collect();
            error!("Pipeline completed with errors! Failed steps: {}", failed.join(", "));
        }
        &self.results
    }

    /// Fixed pause used while waiting for containers and services
    pub fn pause(&self, duration: Duration) {
        if !duration.is_zero() {
            std::thread::sleep(duration);
        }
    }

    /// Path of the most recent HTML report written in this run
    pub fn latest_html_report(&self) -> Option<&PathBuf> {
        self.report_files
            .iter()
            .rev()
            .find(|p| p.extension().is_some_and(|e| e == "html"))
    }
}

/// Extract the message of a panic payload
fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        msg.to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
