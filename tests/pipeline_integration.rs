//! End-to-end pipeline runs against mock services and scripted commands

mod common;

use std::fs;

use httpmock::prelude::*;
use pretty_assertions::assert_eq;

use common::{ScriptedRunner, healthy_itinerary_tools, healthy_web_tools};
use musafirgo_pipeline::catalog::{itinerary, web};
use musafirgo_pipeline::report::cleanup_old_reports;
use musafirgo_pipeline::{Config, RunOptions, StepOutput, Variant, run};

fn skip_everything() -> RunOptions {
    RunOptions {
        skip_init: true,
        skip_data_load: true,
        skip_tests: true,
        open_report: false,
    }
}

fn config_for(report_dir: &std::path::Path, frontend_url: String) -> Config {
    let mut config = Config::defaults().without_waits();
    config.report.output_dir = report_dir.to_path_buf();
    config.web.frontend_url = frontend_url;
    config
}

#[test]
fn test_web_pipeline_with_all_phases_skipped() {
    let server = MockServer::start();
    let _health = server.mock(|when, then| {
        when.method(GET).path("/api/health");
        then.status(200).body(r#"{"status":"ok"}"#);
    });
    let reports = tempfile::tempdir().unwrap();
    let config = config_for(reports.path(), server.url("/"));

    let result = run(
        Variant::Web,
        config,
        skip_everything(),
        Some(server.base_url()),
        Box::new(healthy_web_tools()),
    )
    .unwrap();

    let names: Vec<&str> = result.steps.keys().map(String::as_str).collect();
    assert_eq!(
        names,
        vec![
            "CheckPrerequisites",
            "BuildAngularApplication",
            "StartMockServices",
            "HealthChecks",
            "APITests",
            "PerformanceTests",
            "CleanupOldReports",
            "GenerateHTMLReport",
        ]
    );
    assert!(result.success, "failed steps: {:?}", result.steps);
    assert!(result.step("StartMockServices").unwrap().was_skipped());
    assert_eq!(result.step("HealthChecks").unwrap().result, Some(StepOutput::Flag(true)));

    let api = result.api_results().unwrap();
    assert_eq!((api.total, api.passed, api.failed), (0, 0, 0));
    assert_eq!(api.success_rate, 100.0);
    assert_eq!(result.latency_results().unwrap().attempted(), web::SAMPLES.len());

    let Some(StepOutput::Report(path)) = &result.step("GenerateHTMLReport").unwrap().result else {
        panic!("no report recorded");
    };
    assert!(path.starts_with(reports.path()));
    let html = fs::read_to_string(path).unwrap();
    assert!(html.contains(web::REPORT_TITLE));
    assert!(path
        .file_name()
        .unwrap()
        .to_string_lossy()
        .starts_with(web::REPORT_PREFIX));
}

#[test]
fn test_itinerary_pipeline_writes_both_reports() {
    let server = MockServer::start();
    for path in ["/actuator/health", "/actuator/health/db", "/actuator/health/redis"] {
        server.mock(|when, then| {
            when.method(GET).path(path);
            then.status(200);
        });
    }
    let reports = tempfile::tempdir().unwrap();
    let stale = reports.path().join(format!("{}20240101_000000.html", itinerary::REPORT_PREFIX));
    fs::write(&stale, "old").unwrap();

    let result = run(
        Variant::Itinerary,
        config_for(reports.path(), server.url("/")),
        skip_everything(),
        Some(server.base_url()),
        Box::new(healthy_itinerary_tools()),
    )
    .unwrap();

    assert_eq!(result.steps.len(), 13);
    assert_eq!(result.steps.keys().last().map(String::as_str), Some("OpenReportInBrowser"));
    assert!(result.success, "failed steps: {:?}", result.steps);
    assert!(result.step("OpenReportInBrowser").unwrap().was_skipped());
    assert!(result.step("ReloadTestData").unwrap().was_skipped());
    assert!(!stale.exists());

    let written: Vec<String> = fs::read_dir(reports.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(written.len(), 2);
    assert!(written.iter().all(|name| name.starts_with(itinerary::REPORT_PREFIX)));
    assert!(written.iter().any(|name| name.ends_with(".html")));
    assert!(written.iter().any(|name| name.ends_with(".xlsx")));
}

#[test]
fn test_failed_build_fails_the_run() {
    let server = MockServer::start();
    let reports = tempfile::tempdir().unwrap();
    let runner = ScriptedRunner::new()
        .succeed("docker info")
        .succeed("docker-compose --version")
        .succeed("go version")
        .succeed("docker-compose down")
        .fail("docker-compose build --no-cache itinerary-service");
    let calls = runner.calls();

    let result = run(
        Variant::Itinerary,
        config_for(reports.path(), server.url("/")),
        skip_everything(),
        Some(server.base_url()),
        Box::new(runner),
    )
    .unwrap();

    assert!(!result.success);
    let build = result.step("BuildApplicationImage").unwrap();
    assert!(!build.success);
    assert!(build.error.as_deref().unwrap().contains("scripted failure"));
    // Later steps still ran
    assert!(result.step("GenerateHTMLReport").unwrap().success);
    assert!(calls.lock().unwrap().contains(&"docker-compose down".to_string()));
}

#[test]
fn test_result_serializes_in_step_order() {
    let server = MockServer::start();
    let reports = tempfile::tempdir().unwrap();

    let result = run(
        Variant::Web,
        config_for(reports.path(), server.url("/")),
        skip_everything(),
        Some(server.base_url()),
        Box::new(healthy_web_tools()),
    )
    .unwrap();

    let json = serde_json::to_value(&result).unwrap();
    let steps = json["steps"].as_object().unwrap();
    assert_eq!(steps.keys().next().map(String::as_str), Some("CheckPrerequisites"));
    assert_eq!(json["steps"]["StartMockServices"]["result"]["kind"], "skipped");
    assert!(json["total_duration_seconds"].as_f64().unwrap() >= 0.0);
    // The mock API health probe is missing here
    assert_eq!(json["steps"]["HealthChecks"]["result"]["value"], false);
}

#[test]
fn test_cleanup_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let prefix = itinerary::REPORT_PREFIX;
    for ext in ["html", "xlsx", "csv", "json"] {
        fs::write(dir.path().join(format!("{}20250101_120000.{}", prefix, ext)), "x").unwrap();
    }
    fs::create_dir(dir.path().join(format!("{}dir.html", prefix))).unwrap();
    fs::write(dir.path().join("notes.html"), "keep").unwrap();

    assert_eq!(cleanup_old_reports(dir.path(), prefix).unwrap(), 3);
    assert_eq!(cleanup_old_reports(dir.path(), prefix).unwrap(), 0);
    assert!(dir.path().join("notes.html").exists());
    assert!(dir.path().join(format!("{}20250101_120000.json", prefix)).exists());
    assert!(dir.path().join(format!("{}dir.html", prefix)).is_dir());

    let missing = dir.path().join("does-not-exist");
    assert_eq!(cleanup_old_reports(&missing, prefix).unwrap(), 0);
}
