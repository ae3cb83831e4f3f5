//! Itinerary service pipeline.

use tracing::info;

use crate::catalog::itinerary::{
    CATALOG, ENDPOINTS, HEALTH_PROBES, REPORT_PREFIX, REPORT_TITLE, SAMPLES, THROWAWAY_ITINERARY,
    THROWAWAY_SAMPLES, TOOLS,
};
use crate::harness::{PipelineContext, StepOutput, StepResult};
use crate::infra::bootstrap;
use crate::infra::check_prerequisites;
use crate::pipeline::steps;
use crate::probe::{log_summary, sample_latencies, sample_throwaway_itinerary};
use crate::report::ReportLayout;

pub const LAYOUT: ReportLayout = ReportLayout {
    title: REPORT_TITLE,
    prefix: REPORT_PREFIX,
    pipeline_badges: false,
    catalog: CATALOG,
};

/// Sample the fixed requests, then the requests bound to a throwaway itinerary
fn performance_tests(ctx: &mut PipelineContext) -> StepResult<StepOutput> {
    let mut summary = sample_latencies(&ctx.client, SAMPLES);
    if !sample_throwaway_itinerary(&ctx.client, THROWAWAY_ITINERARY, THROWAWAY_SAMPLES, &mut summary) {
        info!("Skipping samples that need a throwaway itinerary");
    }
    log_summary(&summary);
    Ok(StepOutput::Latency(summary))
}

fn reload_test_data(ctx: &mut PipelineContext) -> StepResult<StepOutput> {
    info!("Reloading test data after destructive tests...");
    bootstrap::load_test_data(ctx)
}

/// Execute every step in order; failures are recorded, never fatal
pub fn run_steps(ctx: &mut PipelineContext) {
    ctx.execute_step("CheckPrerequisites", |ctx| check_prerequisites(ctx, TOOLS));
    ctx.execute_step("BuildApplicationImage", bootstrap::build_itinerary_image);
    ctx.execute_step("InitializeDatabase", bootstrap::initialize_database);
    ctx.execute_step("LoadTestData", bootstrap::load_test_data);
    ctx.execute_step("HealthChecks", |ctx| steps::health_checks(ctx, HEALTH_PROBES));
    ctx.execute_step("APITests", |ctx| steps::api_tests(ctx, ENDPOINTS));
    ctx.execute_step("PerformanceTests", performance_tests);
    ctx.execute_step("ReloadTestData", reload_test_data);
    ctx.execute_step("DisplayDetailedResults", steps::display_detailed_results);
    ctx.execute_step("CleanupOldReports", |ctx| steps::cleanup_reports(ctx, &LAYOUT));
    ctx.execute_step("GenerateExcelReport", |ctx| steps::generate_excel_report(ctx, &LAYOUT));
    ctx.execute_step("GenerateHTMLReport", |ctx| steps::generate_html_report(ctx, &LAYOUT));
    ctx.execute_step("OpenReportInBrowser", steps::open_report);
}
