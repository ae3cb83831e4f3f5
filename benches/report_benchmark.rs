use criterion::{Criterion, black_box, criterion_group, criterion_main};
use musafirgo_pipeline::catalog::itinerary;
use musafirgo_pipeline::pipeline::itinerary::LAYOUT;
use musafirgo_pipeline::report::{build_workbook, render_html};
use musafirgo_pipeline::results::{CaseOutcome, CaseResult};
use musafirgo_pipeline::{EndpointTestSummary, LatencySummary, PipelineResult, Step, StepOutput};

fn sample_result() -> PipelineResult {
    let mut api = EndpointTestSummary::empty();
    for (i, case) in itinerary::ENDPOINTS.iter().enumerate() {
        let passed = i % 7 != 0;
        api.record(CaseResult {
            method: case.method,
            path: case.path.to_string(),
            description: case.description.to_string(),
            category: case.category.to_string(),
            expected_status: case.expected_status,
            observed_status: Some(if passed { case.expected_status } else { 500 }),
            elapsed_ms: 3.0 + i as f64,
            outcome: if passed { CaseOutcome::Passed } else { CaseOutcome::StatusMismatch },
        });
    }

    let mut latency = LatencySummary::default();
    for (i, sample) in itinerary::SAMPLES.iter().enumerate() {
        latency.push(sample.key, sample.label, 10.0 * i as f64);
    }

    let mut result = PipelineResult::new();
    result.record(Step::succeeded("APITests", 1.2, StepOutput::Endpoints(api)));
    result.record(Step::succeeded("PerformanceTests", 0.8, StepOutput::Latency(latency)));
    result.finalize();
    result
}

fn benchmark_reports(c: &mut Criterion) {
    let result = sample_result();

    c.bench_function("render_html", |b| {
        b.iter(|| render_html(black_box(&result), &LAYOUT, "http://localhost:8080"))
    });

    c.bench_function("build_workbook", |b| {
        b.iter(|| {
            let mut workbook = build_workbook(black_box(&result), &LAYOUT).unwrap();
            workbook.save_to_buffer().unwrap()
        })
    });
}

criterion_group!(benches, benchmark_reports);
criterion_main!(benches);
