//! Step operations shared by both pipelines.

use std::fs;

use chrono::Local;
use tracing::{error, info, warn};

use crate::catalog::{EndpointCase, HealthProbe, TimedRequest};
use crate::harness::{PipelineContext, StepOutput, StepResult};
use crate::probe::{exercise_endpoints, log_summary, run_health_probes, sample_latencies};
use crate::report::files::{file_url, write_report};
use crate::report::{
    ReportError, ReportLayout, browser_command, build_workbook, cleanup_old_reports, render_html,
    report_path,
};
use crate::results::EndpointTestSummary;

pub fn health_checks(ctx: &mut PipelineContext, probes: &[HealthProbe]) -> StepResult<StepOutput> {
    let healthy = run_health_probes(&ctx.client, probes, &ctx.config.web.frontend_url);
    Ok(StepOutput::Flag(healthy))
}

/// Exercise the endpoint table, or record an empty run with `--skip-tests`
pub fn api_tests(ctx: &mut PipelineContext, cases: &[EndpointCase]) -> StepResult<StepOutput> {
    if ctx.options.skip_tests {
        info!("Skipping API tests...");
        return Ok(StepOutput::Endpoints(EndpointTestSummary::empty()));
    }
    let settings = &ctx.config.itinerary;
    let summary = exercise_endpoints(&ctx.client, cases, &settings.identifiers, &settings.test_image);
    Ok(StepOutput::Endpoints(summary))
}

pub fn performance_tests(ctx: &mut PipelineContext, samples: &[TimedRequest]) -> StepResult<StepOutput> {
    let summary = sample_latencies(&ctx.client, samples);
    log_summary(&summary);
    Ok(StepOutput::Latency(summary))
}

/// Log every API result line, latency sample and step recorded so far
pub fn display_detailed_results(ctx: &mut PipelineContext) -> StepResult<StepOutput> {
    let results = &ctx.results;
    info!("=== DETAILED RESULTS ===");

    if let Some(api) = results.api_results() {
        info!("API test results");
        info!("   Total tests: {}", api.total);
        info!("   Passed: {}", api.passed);
        info!("   Failed: {}", api.failed);
        info!("   Success rate: {:.2}%", api.success_rate);
        for (i, detail) in api.details.iter().enumerate() {
            info!("     {}. {}", i + 1, detail);
        }
    }

    if let Some(latency) = results.latency_results() {
        info!("Performance test results");
        for sample in &latency.samples {
            if sample.is_failure() {
                info!("   {}: FAILED", sample.label);
            } else {
                info!("   {}: {:.2} ms", sample.label, sample.millis);
            }
        }
        info!("   Average: {:.2} ms", latency.average_ms);
        info!("   Maximum: {:.2} ms", latency.max_ms);
        info!("   Minimum: {:.2} ms", latency.min_ms);
    }

    info!("Step summary");
    for step in results.steps.values() {
        let status = match (step.success, step.was_skipped()) {
            (false, _) => "FAILED",
            (true, true) => "SKIPPED",
            (true, false) => "SUCCESS",
        };
        info!("   {}: {} ({:.2} seconds)", step.name, status, step.duration);
    }
    info!("=== END OF DETAILED RESULTS ===");
    Ok(StepOutput::Flag(true))
}

pub fn cleanup_reports(ctx: &mut PipelineContext, layout: &ReportLayout) -> StepResult<StepOutput> {
    cleanup_old_reports(&ctx.config.report.output_dir, layout.prefix)?;
    Ok(StepOutput::Flag(true))
}

/// Render the run as it stands now and write the HTML report
pub fn generate_html_report(ctx: &mut PipelineContext, layout: &ReportLayout) -> StepResult<StepOutput> {
    info!("Generating HTML report...");
    let snapshot = ctx.results.snapshot();
    let html = render_html(&snapshot, layout, ctx.client.base_url());
    let path = write_report(&ctx.config.report.output_dir, layout.prefix, "html", html.as_bytes())?;

    info!("HTML report generated successfully: {}", path.display());
    ctx.report_files.push(path.clone());
    Ok(StepOutput::Report(path))
}

pub fn generate_excel_report(ctx: &mut PipelineContext, layout: &ReportLayout) -> StepResult<StepOutput> {
    info!("Generating Excel report...");
    let snapshot = ctx.results.snapshot();
    let mut workbook = build_workbook(&snapshot, layout)?;

    let dir = &ctx.config.report.output_dir;
    fs::create_dir_all(dir)?;
    let path = report_path(dir, layout.prefix, "xlsx", Local::now());
    workbook.save(&path).map_err(ReportError::from)?;

    info!("Excel report generated successfully: {}", path.display());
    ctx.report_files.push(path.clone());
    Ok(StepOutput::Report(path))
}

/// Open the latest HTML report of this run in a browser
pub fn open_report(ctx: &mut PipelineContext) -> StepResult<StepOutput> {
    if !ctx.options.open_report {
        info!("Not opening the report in a browser");
        return Ok(StepOutput::Skipped);
    }
    info!("Opening report in browser...");

    let Some(report) = ctx.latest_html_report() else {
        warn!("No HTML report found");
        return Err(ReportError::NoReport.into());
    };
    let url = file_url(report)?;
    let command = browser_command(ctx.config.report.browser.as_deref(), &url);

    if let Err(e) = ctx.commands.launch(&command) {
        error!("Could not open the report: {}", e);
        return Err(ReportError::Browser {
            command: command.to_string(),
            message: e.to_string(),
        }
        .into());
    }
    info!("Report opened: {}", url);
    Ok(StepOutput::Flag(true))
}
