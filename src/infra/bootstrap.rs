//! Builds and starts the stack under test, then loads the fixtures.

use tracing::{info, warn};

use crate::catalog::itinerary::READINESS_PATH;
use crate::harness::{PipelineContext, StepError, StepOutput, StepResult};
use crate::infra::docker;
use crate::infra::process::{CommandSpec, run_checked};
use crate::probe::health::wait_until_ready;

/// Stop any running itinerary stack and rebuild the service image from scratch
pub fn build_itinerary_image(ctx: &mut PipelineContext) -> StepResult<StepOutput> {
    info!("Building new application image...");
    let tooling = &ctx.config.tooling;
    let runner = ctx.commands.as_ref();

    info!("Stopping existing services...");
    let down = docker::compose(tooling, ["down"]);
    if let Err(e) = runner.run(&down) {
        warn!("`{}` could not run: {}", down, e);
    }

    let build = docker::compose(
        tooling,
        ["build", "--no-cache", ctx.config.itinerary.compose_service.as_str()],
    );
    run_checked(runner, &build)?;
    info!("Application image built successfully");
    Ok(StepOutput::Flag(true))
}

/// Start the itinerary stack and check enough services are running
pub fn initialize_database(ctx: &mut PipelineContext) -> StepResult<StepOutput> {
    if ctx.options.skip_init {
        info!("Skipping database initialization...");
        return Ok(StepOutput::Skipped);
    }
    info!("Initializing database...");

    info!("Starting services...");
    run_checked(ctx.commands.as_ref(), &docker::compose(&ctx.config.tooling, ["up", "-d"]))?;

    info!("Waiting for services to be ready...");
    ctx.pause(ctx.config.itinerary.startup_wait);

    require_running_services(ctx, None, ctx.config.itinerary.min_running_services)?;
    info!("Database initialization completed successfully");
    Ok(StepOutput::Flag(true))
}

/// Wait for the service, then load the SQL fixtures into the database.
///
/// A failing fixture load is only a warning; a service that never becomes
/// ready fails the step.
pub fn load_test_data(ctx: &mut PipelineContext) -> StepResult<StepOutput> {
    if ctx.options.skip_data_load {
        info!("Skipping test data loading...");
        return Ok(StepOutput::Skipped);
    }
    info!("Loading test data...");

    let settings = &ctx.config.itinerary;
    if !wait_until_ready(
        &ctx.client,
        READINESS_PATH,
        settings.readiness_attempts,
        ctx.config.tooling.poll_interval,
    ) {
        return Err(StepError::failed("service did not become ready in time"));
    }

    info!("Loading test data into database...");
    let load = docker::compose(
        &ctx.config.tooling,
        [
            "exec",
            "-T",
            settings.database_service.as_str(),
            "psql",
            "-U",
            settings.database_user.as_str(),
            "-d",
            settings.database_name.as_str(),
            "-f",
            settings.fixture_file.as_str(),
        ],
    );
    match run_checked(ctx.commands.as_ref(), &load) {
        Ok(_) => info!("Test data loaded successfully"),
        Err(e) => warn!("Test data could not be loaded, continuing: {}", e),
    }
    Ok(StepOutput::Flag(true))
}

/// Install the web project's dependencies and build it for production
pub fn build_angular_application(ctx: &mut PipelineContext) -> StepResult<StepOutput> {
    info!("Building Angular application...");
    let dir = &ctx.config.web.project_dir;
    let runner = ctx.commands.as_ref();

    info!("Installing npm dependencies...");
    run_checked(runner, &CommandSpec::new("npm").arg("install").current_dir(dir))?;

    info!("Running production build...");
    let build = CommandSpec::new("ng")
        .args(["build", "--configuration", "production"])
        .current_dir(dir);
    run_checked(runner, &build)?;
    info!("Angular application built successfully");
    Ok(StepOutput::Flag(true))
}

/// Start the web mock stack from its compose file
pub fn start_mock_services(ctx: &mut PipelineContext) -> StepResult<StepOutput> {
    info!("Starting mock services...");
    let web = &ctx.config.web;
    let up = docker::compose(&ctx.config.tooling, ["-f", web.compose_file.as_str(), "up", "-d"])
        .current_dir(&web.project_dir);
    run_checked(ctx.commands.as_ref(), &up)?;

    info!("Waiting for mock services to be ready...");
    ctx.pause(web.startup_wait);

    require_running_services(ctx, Some(web.compose_file.as_str()), web.min_running_services)?;
    info!("Mock services started successfully");
    Ok(StepOutput::Flag(true))
}

fn require_running_services(
    ctx: &PipelineContext,
    compose_file: Option<&str>,
    minimum: usize,
) -> StepResult<()> {
    let mut ps = docker::running_services(&ctx.config.tooling, compose_file);
    if compose_file.is_some() {
        ps = ps.current_dir(&ctx.config.web.project_dir);
    }
    let output = run_checked(ctx.commands.as_ref(), &ps)?;
    let running = docker::count_running_services(&output.stdout);
    info!("{} services running", running);
    if running < minimum {
        return Err(StepError::failed(format!(
            "only {} of {} expected services are running",
            running, minimum
        )));
    }
    Ok(())
}
