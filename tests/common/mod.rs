//! Helpers shared by the integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::io;
use std::sync::{Arc, Mutex};

use musafirgo_pipeline::{CommandOutput, CommandRunner, CommandSpec};

/// Command runner answering from a table keyed by the displayed command line.
///
/// Unknown commands fail to spawn; every call is recorded.
#[derive(Default, Clone)]
pub struct ScriptedRunner {
    responses: HashMap<String, bool>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn succeed(mut self, command: &str) -> Self {
        self.responses.insert(command.to_string(), true);
        self
    }

    pub fn fail(mut self, command: &str) -> Self {
        self.responses.insert(command.to_string(), false);
        self
    }

    /// Shared view of the recorded calls, usable after the runner is boxed
    pub fn calls(&self) -> Arc<Mutex<Vec<String>>> {
        Arc::clone(&self.calls)
    }
}

impl CommandRunner for ScriptedRunner {
    fn run(&self, spec: &CommandSpec) -> io::Result<CommandOutput> {
        let line = spec.to_string();
        self.calls.lock().unwrap().push(line.clone());
        match self.responses.get(&line) {
            Some(true) => Ok(CommandOutput {
                success: true,
                status: "exit status: 0".to_string(),
                ..CommandOutput::default()
            }),
            Some(false) => Ok(CommandOutput {
                success: false,
                status: "exit status: 1".to_string(),
                stderr: "scripted failure".to_string(),
                ..CommandOutput::default()
            }),
            None => Err(io::Error::new(io::ErrorKind::NotFound, line)),
        }
    }

    fn is_available(&self, _program: &str) -> bool {
        true
    }
}

/// Runner for a web pipeline whose tools all work
pub fn healthy_web_tools() -> ScriptedRunner {
    ScriptedRunner::new()
        .succeed("docker info")
        .succeed("docker-compose --version")
        .succeed("node --version")
        .succeed("ng version")
        .succeed("npm install")
        .succeed("ng build --configuration production")
}

/// Runner for an itinerary pipeline whose tools and image build work
pub fn healthy_itinerary_tools() -> ScriptedRunner {
    ScriptedRunner::new()
        .succeed("docker info")
        .succeed("docker-compose --version")
        .succeed("go version")
        .succeed("docker-compose down")
        .succeed("docker-compose build --no-cache itinerary-service")
}
