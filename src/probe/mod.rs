//! HTTP probes run against the service under test.

pub mod client;
pub mod exerciser;
pub mod health;
pub mod sampler;

pub use client::{ApiClient, ApiResponse, HttpMethod, RequestBody};
pub use exerciser::{exercise_endpoints, resolve_path, run_case};
pub use health::{run_health_probes, wait_until_ready};
pub use sampler::{log_summary, measure, sample_latencies, sample_throwaway_itinerary};
