//! Tool checks run before anything touches the stack.

use tracing::{error, info, warn};

use crate::catalog::Tool;
use crate::harness::{PipelineContext, StepError, StepOutput, StepResult};
use crate::infra::docker;
use crate::infra::process::CommandSpec;

/// Check every tool in order, starting the container engine if it is down.
///
/// Fails with the list of tools that are missing or not working.
pub fn check_prerequisites(ctx: &mut PipelineContext, tools: &[Tool]) -> StepResult<StepOutput> {
    info!("Checking prerequisites...");
    let tooling = &ctx.config.tooling;
    let runner = ctx.commands.as_ref();
    let mut failed = Vec::new();

    for tool in tools {
        let spec = match tool {
            Tool::ContainerEngine => docker::engine_info(tooling),
            Tool::Compose => docker::compose(tooling, ["--version"]),
            Tool::Cli { program, args, .. } => CommandSpec::new(*program).args(args.iter().copied()),
        };

        if !runner.is_available(&spec.program) {
            error!("{}: NOT FOUND", tool.name());
            failed.push(tool.name());
            continue;
        }

        let working = matches!(runner.run(&spec), Ok(output) if output.success);
        match (working, tool) {
            (true, _) => info!("{}: OK", tool.name()),
            (false, Tool::ContainerEngine) => {
                warn!("{}: NOT RUNNING - Attempting to start...", tool.name());
                if docker::start_engine(runner, tooling) {
                    info!("{}: STARTED AND READY", tool.name());
                } else {
                    error!("{}: FAILED TO START", tool.name());
                    failed.push(tool.name());
                }
            }
            (false, _) => {
                error!("{}: NOT WORKING (`{}` failed)", tool.name(), spec);
                failed.push(tool.name());
            }
        }
    }

    if !failed.is_empty() {
        error!("Prerequisites check failed. Please install missing components.");
        return Err(StepError::failed(format!(
            "missing prerequisites: {}",
            failed.join(", ")
        )));
    }
    info!("All prerequisites satisfied");
    Ok(StepOutput::Flag(true))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{itinerary, web};
    use crate::config::Config;
    use crate::harness::RunOptions;
    use crate::infra::process::scripted::ScriptedRunner;
    use crate::probe::ApiClient;

    fn context(runner: ScriptedRunner) -> PipelineContext {
        PipelineContext::new(
            Config::defaults().without_waits(),
            RunOptions::default(),
            ApiClient::new("http://127.0.0.1:9").unwrap(),
            Box::new(runner),
        )
    }

    #[test]
    fn test_all_tools_present() {
        let runner = ScriptedRunner::default()
            .ok("docker info", "")
            .ok("docker-compose --version", "docker-compose version 1.29.2")
            .ok("go version", "go version go1.22.1 linux/amd64");
        let mut ctx = context(runner);
        let output = check_prerequisites(&mut ctx, itinerary::TOOLS).unwrap();
        assert_eq!(output, StepOutput::Flag(true));
    }

    #[test]
    fn test_missing_tool_is_not_spawned() {
        let runner = ScriptedRunner::default()
            .ok("docker info", "")
            .ok("docker-compose --version", "")
            .ok("node --version", "v20.11.0")
            .without("ng");
        let mut ctx = context(runner);
        let err = check_prerequisites(&mut ctx, web::TOOLS).unwrap_err();
        assert_eq!(err.to_string(), "missing prerequisites: Angular CLI");
    }

    #[test]
    fn test_failing_tool_fails_step() {
        let runner = ScriptedRunner::default()
            .ok("docker info", "")
            .fail("docker-compose --version", "")
            .ok("go version", "");
        let mut ctx = context(runner);
        assert!(check_prerequisites(&mut ctx, itinerary::TOOLS).is_err());
    }
}
