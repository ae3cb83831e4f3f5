//! Five-sheet spreadsheet report.

use rust_xlsxwriter::{Color, Format, Workbook, Worksheet, XlsxError};

use crate::harness::PipelineResult;
use crate::report::{ReportLayout, ReportResult};
use crate::results::{EndpointTestSummary, LatencySummary};

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub const SHEET_NAMES: [&str; 5] = [
    "Pipeline Summary",
    "Step Details",
    "API Tests",
    "Performance",
    "Endpoints",
];

struct Formats {
    header: Format,
    ok: Format,
    fail: Format,
    number: Format,
}

impl Formats {
    fn new() -> Self {
        Self {
            header: Format::new()
                .set_bold()
                .set_font_color(Color::White)
                .set_background_color(Color::RGB(0x2C3E50)),
            ok: Format::new().set_font_color(Color::RGB(0x155724)),
            fail: Format::new().set_bold().set_font_color(Color::RGB(0x721C24)),
            number: Format::new().set_num_format("0.00"),
        }
    }

    fn verdict(&self, ok: bool) -> (&'static str, &Format) {
        if ok { ("OK", &self.ok) } else { ("FAIL", &self.fail) }
    }
}

/// Build the workbook for one run; sheets are named after [`SHEET_NAMES`]
pub fn build_workbook(result: &PipelineResult, layout: &ReportLayout) -> ReportResult<Workbook> {
    let formats = Formats::new();
    let mut workbook = Workbook::new();
    workbook.push_worksheet(summary_sheet(result, &formats)?);
    workbook.push_worksheet(steps_sheet(result, &formats)?);
    workbook.push_worksheet(api_sheet(result.api_results(), &formats)?);
    workbook.push_worksheet(performance_sheet(result.latency_results(), &formats)?);
    workbook.push_worksheet(endpoints_sheet(layout.catalog, &formats)?);
    Ok(workbook)
}

fn new_sheet(name: &str, headers: &[&str], widths: &[f64], formats: &Formats) -> Result<Worksheet, XlsxError> {
    let mut sheet = Worksheet::new();
    sheet.set_name(name)?;
    for (col, header) in headers.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *header, &formats.header)?;
    }
    for (col, width) in widths.iter().enumerate() {
        sheet.set_column_width(col as u16, *width)?;
    }
    Ok(sheet)
}

fn summary_sheet(result: &PipelineResult, formats: &Formats) -> Result<Worksheet, XlsxError> {
    let mut sheet = new_sheet(SHEET_NAMES[0], &["Item", "Value", "Status"], &[20.0, 30.0, 10.0], formats)?;
    let end = result
        .end_time
        .map(|t| t.format(TIME_FORMAT).to_string())
        .unwrap_or_default();
    let rows = [
        ("Start time", result.start_time.format(TIME_FORMAT).to_string(), true),
        ("End time", end, true),
        ("Total duration", format!("{:.2} seconds", result.total_duration), true),
        ("Steps", result.steps.len().to_string(), true),
        (
            "Overall status",
            if result.success { "SUCCESS" } else { "FAILURE" }.to_string(),
            result.success,
        ),
    ];
    for (i, (item, value, ok)) in rows.iter().enumerate() {
        let row = i as u32 + 1;
        let (verdict, format) = formats.verdict(*ok);
        sheet.write_string(row, 0, *item)?;
        sheet.write_string(row, 1, value.as_str())?;
        sheet.write_string_with_format(row, 2, verdict, format)?;
    }
    Ok(sheet)
}

fn steps_sheet(result: &PipelineResult, formats: &Formats) -> Result<Worksheet, XlsxError> {
    let mut sheet = new_sheet(
        SHEET_NAMES[1],
        &["Step", "Result", "Status", "Duration (s)", "Details"],
        &[28.0, 12.0, 10.0, 14.0, 60.0],
        formats,
    )?;
    for (i, step) in result.steps.values().enumerate() {
        let row = i as u32 + 1;
        let outcome = match (step.success, step.was_skipped()) {
            (false, _) => "Failed",
            (true, true) => "Skipped",
            (true, false) => "Passed",
        };
        let (verdict, format) = formats.verdict(step.success);
        sheet.write_string(row, 0, step.name.as_str())?;
        sheet.write_string(row, 1, outcome)?;
        sheet.write_string_with_format(row, 2, verdict, format)?;
        sheet.write_number_with_format(row, 3, step.duration, &formats.number)?;
        sheet.write_string(row, 4, step.error.as_deref().unwrap_or_default())?;
    }
    Ok(sheet)
}

fn api_sheet(api: Option<&EndpointTestSummary>, formats: &Formats) -> Result<Worksheet, XlsxError> {
    let mut sheet = new_sheet(
        SHEET_NAMES[2],
        &["Metric", "Value", "Status"],
        &[30.0, 50.0, 10.0, 10.0, 10.0, 12.0],
        formats,
    )?;
    let Some(api) = api else {
        sheet.write_string(1, 0, "No API tests were run")?;
        return Ok(sheet);
    };

    let metrics = [
        ("Total tests", api.total.to_string(), true),
        ("Passed", api.passed.to_string(), true),
        ("Failed", api.failed.to_string(), api.failed == 0),
        ("Success rate", format!("{:.2}%", api.success_rate), true),
    ];
    for (i, (metric, value, ok)) in metrics.iter().enumerate() {
        let row = i as u32 + 1;
        let (verdict, format) = formats.verdict(*ok);
        sheet.write_string(row, 0, *metric)?;
        sheet.write_string(row, 1, value.as_str())?;
        sheet.write_string_with_format(row, 2, verdict, format)?;
    }

    let first = metrics.len() as u32 + 2;
    let headers = ["Description", "Request", "Status", "Expected", "Received", "Time (ms)"];
    for (col, header) in headers.iter().enumerate() {
        sheet.write_string_with_format(first, col as u16, *header, &formats.header)?;
    }
    for (i, case) in api.cases.iter().enumerate() {
        let row = first + 1 + i as u32;
        let (verdict, format) = formats.verdict(case.passed());
        sheet.write_string(row, 0, case.description.as_str())?;
        sheet.write_string(row, 1, format!("{} {}", case.method, case.path).as_str())?;
        sheet.write_string_with_format(row, 2, verdict, format)?;
        sheet.write_number(row, 3, f64::from(case.expected_status))?;
        if let Some(observed) = case.observed_status {
            sheet.write_number(row, 4, f64::from(observed))?;
        }
        sheet.write_number_with_format(row, 5, case.elapsed_ms, &formats.number)?;
    }
    Ok(sheet)
}

fn performance_sheet(latency: Option<&LatencySummary>, formats: &Formats) -> Result<Worksheet, XlsxError> {
    let mut sheet = new_sheet(
        SHEET_NAMES[3],
        &["Metric", "Value (ms)", "Status"],
        &[24.0, 14.0, 10.0],
        formats,
    )?;
    let Some(latency) = latency else {
        sheet.write_string(1, 0, "No performance tests were run")?;
        return Ok(sheet);
    };

    let mut row = 1;
    for sample in &latency.samples {
        let (verdict, format) = formats.verdict(!sample.is_failure());
        sheet.write_string(row, 0, sample.label.as_str())?;
        if !sample.is_failure() {
            sheet.write_number_with_format(row, 1, sample.millis, &formats.number)?;
        }
        sheet.write_string_with_format(row, 2, verdict, format)?;
        row += 1;
    }
    for (label, value) in [
        ("Average", latency.average_ms),
        ("Max", latency.max_ms),
        ("Min", latency.min_ms),
    ] {
        sheet.write_string(row, 0, label)?;
        sheet.write_number_with_format(row, 1, value, &formats.number)?;
        row += 1;
    }
    sheet.write_string(row, 0, "Successful samples")?;
    sheet.write_string(
        row,
        1,
        format!("{}/{}", latency.successful_tests, latency.attempted()).as_str(),
    )?;
    Ok(sheet)
}

fn endpoints_sheet(catalog: &[(&str, &str)], formats: &Formats) -> Result<Worksheet, XlsxError> {
    let mut sheet = new_sheet(SHEET_NAMES[4], &["Endpoint", "Description"], &[40.0, 40.0], formats)?;
    for (i, (endpoint, description)) in catalog.iter().enumerate() {
        let row = i as u32 + 1;
        sheet.write_string(row, 0, *endpoint)?;
        sheet.write_string(row, 1, *description)?;
    }
    Ok(sheet)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::itinerary;
    use crate::harness::{Step, StepError, StepOutput};

    const LAYOUT: ReportLayout = ReportLayout {
        title: itinerary::REPORT_TITLE,
        prefix: itinerary::REPORT_PREFIX,
        pipeline_badges: false,
        catalog: itinerary::CATALOG,
    };

    #[test]
    fn test_workbook_has_five_sheets() {
        let mut latency = LatencySummary::default();
        latency.push("health_check", "Health Check", 4.2);
        latency.push("swagger_ui", "Swagger UI", -1.0);

        let mut result = PipelineResult::new();
        result.record(Step::succeeded("APITests", 0.1, StepOutput::Endpoints(EndpointTestSummary::empty())));
        result.record(Step::succeeded("PerformanceTests", 0.1, StepOutput::Latency(latency)));
        result.record(Step::failed("BuildApplicationImage", 3.0, &StepError::failed("no daemon")));
        result.finalize();

        let mut workbook = build_workbook(&result, &LAYOUT).unwrap();
        for name in SHEET_NAMES {
            assert!(workbook.worksheet_from_name(name).is_ok(), "missing sheet {}", name);
        }
        let bytes = workbook.save_to_buffer().unwrap();
        assert!(bytes.starts_with(b"PK"));
    }

    #[test]
    fn test_workbook_without_results() {
        let mut result = PipelineResult::new();
        result.finalize();
        assert!(build_workbook(&result, &LAYOUT).is_ok());
    }
}
