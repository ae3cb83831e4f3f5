//! Pipeline drivers: fixed step sequences for each target service.

pub mod itinerary;
pub mod steps;
pub mod web;

use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::Config;
use crate::harness::{PipelineContext, PipelineResult, RunOptions};
use crate::infra::CommandRunner;
use crate::probe::ApiClient;
use crate::report::ReportLayout;

/// Service a pipeline run targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Spring Boot itinerary API backed by PostgreSQL and Redis
    Itinerary,
    /// Angular front-end with its mock API
    Web,
}

impl Variant {
    pub fn layout(self) -> &'static ReportLayout {
        match self {
            Variant::Itinerary => &itinerary::LAYOUT,
            Variant::Web => &web::LAYOUT,
        }
    }

    /// Base URL taken from the configuration when none is given
    pub fn default_base_url(self, config: &Config) -> &str {
        match self {
            Variant::Itinerary => &config.itinerary.base_url,
            Variant::Web => &config.web.base_url,
        }
    }
}

impl Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Variant::Itinerary => write!(f, "Itinerary Service"),
            Variant::Web => write!(f, "Web Service"),
        }
    }
}

/// Run one pipeline to completion and return its closed result.
///
/// Only fails if the HTTP client cannot be built; step failures are part
/// of the returned result.
pub fn run(
    variant: Variant,
    config: Config,
    options: RunOptions,
    base_url: Option<String>,
    commands: Box<dyn CommandRunner>,
) -> reqwest::Result<PipelineResult> {
    let base_url = base_url.unwrap_or_else(|| variant.default_base_url(&config).to_string());
    let client = ApiClient::new(base_url)?;

    info!("Starting MusafirGO {} Pipeline...", variant);
    info!("Base URL: {}", client.base_url());
    if variant == Variant::Web {
        info!("Project Path: {}", config.web.project_dir.display());
    }

    let mut ctx = PipelineContext::new(config, options, client, commands);
    match variant {
        Variant::Itinerary => itinerary::run_steps(&mut ctx),
        Variant::Web => web::run_steps(&mut ctx),
    }
    ctx.finish();
    Ok(ctx.results)
}
