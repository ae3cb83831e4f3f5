//! Container engine and compose helpers.

use std::time::Duration;

use tracing::{info, warn};

use crate::config::ToolingSettings;
use crate::infra::process::{CommandRunner, CommandSpec};

/// `docker info`: succeeds only when the engine daemon answers
pub fn engine_info(tooling: &ToolingSettings) -> CommandSpec {
    CommandSpec::new(&tooling.docker_bin).arg("info")
}

/// A compose invocation with the configured compose binary
pub fn compose<I, S>(tooling: &ToolingSettings, args: I) -> CommandSpec
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    CommandSpec::new(&tooling.compose_bin).args(args)
}

/// `ps --services --filter status=running`, optionally against a compose file
pub fn running_services(tooling: &ToolingSettings, compose_file: Option<&str>) -> CommandSpec {
    let mut spec = CommandSpec::new(&tooling.compose_bin);
    if let Some(file) = compose_file {
        spec = spec.args(["-f", file]);
    }
    spec.args(["ps", "--services", "--filter", "status=running"])
}

/// Number of non-empty lines in the output of [`running_services`]
pub fn count_running_services(stdout: &str) -> usize {
    stdout.lines().filter(|line| !line.trim().is_empty()).count()
}

pub fn engine_ready(runner: &dyn CommandRunner, tooling: &ToolingSettings) -> bool {
    matches!(runner.run(&engine_info(tooling)), Ok(output) if output.success)
}

/// Command launching the engine on the current platform, with its poll budget
fn start_command(tooling: &ToolingSettings) -> (CommandSpec, u32) {
    if cfg!(target_os = "windows") {
        (
            CommandSpec::new("cmd").args(["/c", "start", "Docker Desktop"]),
            tooling.desktop_start_attempts,
        )
    } else {
        (
            CommandSpec::new("sudo").args(["systemctl", "start", "docker"]),
            tooling.service_start_attempts,
        )
    }
}

/// Try to bring the engine up and poll until it answers.
pub fn start_engine(runner: &dyn CommandRunner, tooling: &ToolingSettings) -> bool {
    let (command, attempts) = start_command(tooling);
    info!("Docker is not running, starting it with `{}`", command);
    match runner.run(&command) {
        Ok(output) if !output.success => {
            warn!("`{}` exited with {}", command, output.status);
        }
        Err(e) => {
            warn!("Could not run `{}`: {}", command, e);
            return false;
        }
        Ok(_) => {}
    }

    for attempt in 1..=attempts {
        if engine_ready(runner, tooling) {
            info!("Docker started (attempt {}/{})", attempt, attempts);
            return true;
        }
        if attempt < attempts {
            pause(tooling.poll_interval);
        }
    }
    warn!("Docker did not start after {} attempts", attempts);
    false
}

fn pause(interval: Duration) {
    if !interval.is_zero() {
        std::thread::sleep(interval);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::process::scripted::ScriptedRunner;

    fn tooling() -> ToolingSettings {
        ToolingSettings {
            poll_interval: Duration::ZERO,
            desktop_start_attempts: 2,
            service_start_attempts: 2,
            ..ToolingSettings::defaults()
        }
    }

    #[test]
    fn test_count_running_services_ignores_blank_lines() {
        assert_eq!(count_running_services("postgres\nredis\n\n  \nitinerary-service\n"), 3);
        assert_eq!(count_running_services(""), 0);
    }

    #[test]
    fn test_running_services_with_compose_file() {
        let spec = running_services(&tooling(), Some("docker-compose.dev.yml"));
        assert_eq!(
            spec.to_string(),
            "docker-compose -f docker-compose.dev.yml ps --services --filter status=running"
        );
    }

    #[test]
    fn test_start_engine_gives_up() {
        let (start, _) = start_command(&tooling());
        let runner = ScriptedRunner::default()
            .ok(&start.to_string(), "")
            .fail("docker info", "Cannot connect to the Docker daemon");
        assert!(!start_engine(&runner, &tooling()));
        let polls = runner.calls().iter().filter(|c| *c == "docker info").count();
        assert_eq!(polls, 2);
    }

    #[test]
    fn test_start_engine_succeeds() {
        let (start, _) = start_command(&tooling());
        let runner = ScriptedRunner::default()
            .ok(&start.to_string(), "")
            .ok("docker info", "Server Version: 27.0.1");
        assert!(start_engine(&runner, &tooling()));
    }
}
