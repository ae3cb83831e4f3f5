//! Performance sampler: one timed request per sample.

use tracing::{info, warn};

use crate::catalog::TimedRequest;
use crate::probe::client::{ApiClient, RequestBody};
use crate::probe::HttpMethod;
use crate::results::{FAILED_SAMPLE_MS, LatencySummary};

/// Time one request; a transport failure yields [`FAILED_SAMPLE_MS`].
pub fn measure(client: &ApiClient, request: &TimedRequest, path: &str) -> f64 {
    let body = match request.body {
        Some(json) => RequestBody::Json(json.to_string()),
        None => RequestBody::Empty,
    };
    match client.send(request.method, path, body) {
        Ok(response) => response.elapsed_ms(),
        Err(e) => {
            warn!("{} failed: {}", request.label, e);
            FAILED_SAMPLE_MS
        }
    }
}

/// Time every request of `requests` in order and aggregate them.
pub fn sample_latencies(client: &ApiClient, requests: &[TimedRequest]) -> LatencySummary {
    info!("Running performance tests...");
    let mut summary = LatencySummary::default();
    for request in requests {
        let millis = measure(client, request, request.path);
        summary.push(request.key, request.label, millis);
    }
    summary
}

/// Create a throwaway itinerary, time `requests` against it, then delete it.
///
/// Returns `false` (and records nothing) when the itinerary could not be
/// created: anything but a 201 with an `id` field in the JSON body.
pub fn sample_throwaway_itinerary(
    client: &ApiClient,
    create_body: &str,
    requests: &[TimedRequest],
    summary: &mut LatencySummary,
) -> bool {
    let Some(id) = create_throwaway(client, create_body) else {
        return false;
    };
    info!("Created throwaway itinerary {}", id);

    for request in requests {
        let path = request.path.replace("{id}", &id);
        let millis = measure(client, request, &path);
        summary.push(request.key, request.label, millis);
    }

    let path = format!("/api/itineraries/{}", id);
    match client.send(HttpMethod::Delete, &path, RequestBody::Empty) {
        Ok(response) => info!("Deleted throwaway itinerary {} ({})", id, response.status),
        Err(e) => warn!("Could not delete throwaway itinerary {}: {}", id, e),
    }
    true
}

fn create_throwaway(client: &ApiClient, body: &str) -> Option<String> {
    let response = match client.send(
        HttpMethod::Post,
        "/api/itineraries",
        RequestBody::Json(body.to_string()),
    ) {
        Ok(response) => response,
        Err(e) => {
            warn!("Could not create throwaway itinerary: {}", e);
            return None;
        }
    };
    if response.status != 201 {
        warn!(
            "Could not create throwaway itinerary: expected 201, got {}",
            response.status
        );
        return None;
    }

    let parsed: serde_json::Value = match serde_json::from_str(&response.body) {
        Ok(value) => value,
        Err(e) => {
            warn!("Throwaway itinerary response is not JSON: {}", e);
            return None;
        }
    };
    match parsed.get("id") {
        Some(serde_json::Value::String(id)) => Some(id.clone()),
        Some(other) if !other.is_null() => Some(other.to_string()),
        _ => {
            warn!("Throwaway itinerary response has no id");
            None
        }
    }
}

/// Log the aggregates of a finished sampling run
pub fn log_summary(summary: &LatencySummary) {
    info!("=== PERFORMANCE TEST RESULTS ===");
    for sample in &summary.samples {
        if sample.is_failure() {
            warn!("{}: FAILED", sample.label);
        } else {
            info!("{}: {:.2}ms", sample.label, sample.millis);
        }
    }
    info!("Average Response Time: {:.2}ms", summary.average_ms);
    info!("Max Response Time: {:.2}ms", summary.max_ms);
    info!("Min Response Time: {:.2}ms", summary.min_ms);
    info!(
        "Successful Tests: {}/{}",
        summary.successful_tests,
        summary.attempted()
    );
}
