//! Health probes and readiness polling.

use std::time::Duration;

use tracing::{debug, error, info, warn};

use crate::catalog::{HealthProbe, ProbeTarget};
use crate::probe::client::ApiClient;

/// Run every probe and report whether all required ones answered 200.
///
/// Optional probes only log a warning when they fail.
pub fn run_health_probes(client: &ApiClient, probes: &[HealthProbe], frontend_url: &str) -> bool {
    info!("Running health checks...");
    let mut all_healthy = true;

    for probe in probes {
        let url = match probe.target {
            ProbeTarget::Service(path) => client.url(path),
            ProbeTarget::Frontend => frontend_url.to_string(),
        };
        debug!("Probing {} at {}", probe.label, url);

        if client.url_is_ok(&url) {
            info!("{}: OK", probe.label);
        } else if probe.required {
            error!("{}: FAILED", probe.label);
            all_healthy = false;
        } else {
            warn!("{}: not reachable at {} (optional)", probe.label, url);
        }
    }

    if all_healthy {
        info!("All health checks passed");
    } else {
        warn!("Some health checks failed");
    }
    all_healthy
}

/// Poll `path` until it answers 200, at most `attempts` times.
pub fn wait_until_ready(client: &ApiClient, path: &str, attempts: u32, interval: Duration) -> bool {
    info!("Waiting for {} to become ready...", client.url(path));
    for attempt in 1..=attempts {
        if client.is_ok(path) {
            info!("Service is ready (attempt {}/{})", attempt, attempts);
            return true;
        }
        debug!("Service not ready yet (attempt {}/{})", attempt, attempts);
        if attempt < attempts && !interval.is_zero() {
            std::thread::sleep(interval);
        }
    }
    error!("Service did not become ready after {} attempts", attempts);
    false
}
