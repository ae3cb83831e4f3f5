//! Web service pipeline: Angular build plus mock API stack.

use tracing::info;

use crate::catalog::web::{ENDPOINTS, HEALTH_PROBES, REPORT_PREFIX, REPORT_TITLE, SAMPLES, TOOLS};
use crate::harness::{PipelineContext, StepOutput, StepResult};
use crate::infra::bootstrap;
use crate::infra::check_prerequisites;
use crate::pipeline::steps;
use crate::report::ReportLayout;

pub const LAYOUT: ReportLayout = ReportLayout {
    title: REPORT_TITLE,
    prefix: REPORT_PREFIX,
    pipeline_badges: true,
    catalog: &[],
};

fn start_mock_services(ctx: &mut PipelineContext) -> StepResult<StepOutput> {
    if ctx.options.skip_init {
        info!("Skipping mock services startup...");
        return Ok(StepOutput::Skipped);
    }
    bootstrap::start_mock_services(ctx)
}

/// Execute every step in order; failures are recorded, never fatal
pub fn run_steps(ctx: &mut PipelineContext) {
    ctx.execute_step("CheckPrerequisites", |ctx| check_prerequisites(ctx, TOOLS));
    ctx.execute_step("BuildAngularApplication", bootstrap::build_angular_application);
    ctx.execute_step("StartMockServices", start_mock_services);
    ctx.execute_step("HealthChecks", |ctx| steps::health_checks(ctx, HEALTH_PROBES));
    ctx.execute_step("APITests", |ctx| steps::api_tests(ctx, ENDPOINTS));
    ctx.execute_step("PerformanceTests", |ctx| steps::performance_tests(ctx, SAMPLES));
    ctx.execute_step("CleanupOldReports", |ctx| steps::cleanup_reports(ctx, &LAYOUT));
    ctx.execute_step("GenerateHTMLReport", |ctx| steps::generate_html_report(ctx, &LAYOUT));
}
