//! Self-contained HTML report: summary cards, bar charts, step timings and
//! a sortable, filterable endpoint table.

use crate::harness::{PipelineResult, Step};
use crate::report::ReportLayout;
use crate::results::{CaseResult, EndpointTestSummary, LatencySummary};

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Height of the tallest bar in the charts, in pixels
const CHART_HEIGHT: f64 = 160.0;

const STYLE: &str = r#"
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; margin: 0; background: linear-gradient(135deg, #667eea 0%, #764ba2 100%); min-height: 100vh; }
.container { max-width: 1200px; margin: 20px auto; background: white; border-radius: 15px; box-shadow: 0 20px 40px rgba(0,0,0,0.1); overflow: hidden; }
.header { background: linear-gradient(135deg, #2c3e50 0%, #34495e 100%); color: white; padding: 30px; text-align: center; }
.header h1 { margin: 0; font-size: 2.2em; font-weight: 300; }
.content { padding: 30px; }
.grid { display: grid; grid-template-columns: repeat(auto-fit, minmax(300px, 1fr)); gap: 20px; margin-bottom: 30px; }
.card { background: #f8f9fa; border-radius: 10px; padding: 20px; border-left: 4px solid #667eea; }
.card h3 { margin: 0 0 15px 0; color: #2c3e50; }
.stat { display: flex; justify-content: space-between; padding: 6px 0; border-bottom: 1px solid #eee; }
.stat-label { color: #666; }
.stat-value { font-weight: 600; }
.success { color: #28a745; }
.error { color: #dc3545; }
.warning { color: #ffc107; }
.progress-bar { width: 100%; height: 18px; background: #e9ecef; border-radius: 9px; overflow: hidden; margin-top: 10px; }
.progress-fill { height: 100%; background: linear-gradient(90deg, #28a745, #20c997); }
.progress-text { text-align: center; font-weight: 600; color: #333; margin-top: 5px; }
.status-badge { display: inline-block; padding: 4px 12px; border-radius: 20px; font-size: 0.9em; font-weight: 500; margin: 2px; }
.status-success { background: #d4edda; color: #155724; }
.status-error { background: #f8d7da; color: #721c24; }
.status-skipped { background: #e2e3e5; color: #383d41; }
.bar-chart { display: flex; align-items: flex-end; height: 200px; gap: 10px; padding-top: 25px; }
.bar { flex: 1; background: linear-gradient(180deg, #667eea, #764ba2); border-radius: 4px 4px 0 0; position: relative; min-height: 2px; }
.bar.failed { background: #dc3545; }
.bar-value { position: absolute; top: -22px; left: 50%; transform: translateX(-50%); font-weight: 600; font-size: 0.8em; color: #333; white-space: nowrap; }
.bar-labels { display: flex; gap: 10px; margin-top: 8px; }
.bar-label { flex: 1; text-align: center; font-size: 0.8em; color: #666; }
.step-row { display: grid; grid-template-columns: 220px 1fr 90px; gap: 10px; align-items: center; padding: 4px 0; }
.step-track { background: #e9ecef; border-radius: 4px; height: 12px; }
.step-fill { background: #667eea; border-radius: 4px; height: 12px; }
.step-fill.failed { background: #dc3545; }
.step-error { grid-column: 1 / 4; color: #721c24; font-size: 0.85em; }
.pipeline { display: flex; flex-wrap: wrap; align-items: center; gap: 4px; }
.pipeline .arrow { color: #999; }
.table-controls { display: flex; gap: 15px; margin: 15px 0; align-items: center; flex-wrap: wrap; }
.search-input { flex: 1; min-width: 200px; padding: 8px 12px; border: 2px solid #ddd; border-radius: 6px; font-size: 14px; }
.status-filter { padding: 8px 12px; border: 2px solid #ddd; border-radius: 6px; font-size: 14px; background: white; }
.table-container { max-height: 500px; overflow: auto; border: 1px solid #ddd; border-radius: 8px; }
.endpoints-table { width: 100%; border-collapse: collapse; font-size: 13px; background: white; }
.endpoints-table th { background: #f8f9fa; padding: 12px 8px; text-align: left; border-bottom: 2px solid #dee2e6; position: sticky; top: 0; cursor: pointer; user-select: none; }
.endpoints-table td { padding: 10px 8px; border-bottom: 1px solid #dee2e6; vertical-align: top; }
.endpoint-row.success { background: #d4edda; }
.endpoint-row.error { background: #f8d7da; }
.endpoint-method { font-family: 'Courier New', monospace; font-weight: 600; color: #007bff; }
.endpoint-url { font-family: 'Courier New', monospace; word-break: break-all; }
.url-link { color: #007bff; text-decoration: none; }
.sort-arrow { font-size: 12px; color: #999; margin-left: 5px; }
.table-info { margin-top: 10px; font-size: 12px; color: #666; text-align: center; }
.footer { background: #f8f9fa; padding: 20px; text-align: center; color: #666; border-top: 1px solid #eee; }
"#;

const SCRIPT: &str = r#"
(function () {
  var table = document.getElementById('endpoints-table');
  if (!table) { return; }
  var body = table.tBodies[0];
  var search = document.getElementById('endpoint-search');
  var status = document.getElementById('status-filter');
  var info = document.getElementById('table-info');
  var direction = {};

  function applyFilter() {
    var needle = search.value.toLowerCase();
    var wanted = status.value;
    var shown = 0;
    Array.prototype.forEach.call(body.rows, function (row) {
      var text = row.textContent.toLowerCase();
      var visible = text.indexOf(needle) !== -1 && (wanted === 'all' || row.dataset.status === wanted);
      row.style.display = visible ? '' : 'none';
      if (visible) { shown += 1; }
    });
    info.textContent = shown + ' / ' + body.rows.length + ' endpoints shown';
  }

  function sortBy(index, numeric) {
    var ascending = !direction[index];
    direction = {};
    direction[index] = ascending;
    var rows = Array.prototype.slice.call(body.rows);
    rows.sort(function (a, b) {
      var x = a.cells[index].dataset.value || a.cells[index].textContent.trim();
      var y = b.cells[index].dataset.value || b.cells[index].textContent.trim();
      var order = numeric ? (parseFloat(x) || 0) - (parseFloat(y) || 0) : x.localeCompare(y);
      return ascending ? order : -order;
    });
    rows.forEach(function (row) { body.appendChild(row); });
    Array.prototype.forEach.call(table.tHead.rows[0].cells, function (cell, i) {
      var arrow = cell.querySelector('.sort-arrow');
      if (arrow) { arrow.textContent = i === index ? (ascending ? '▲' : '▼') : '⇅'; }
    });
  }

  Array.prototype.forEach.call(table.tHead.rows[0].cells, function (cell, i) {
    cell.addEventListener('click', function () { sortBy(i, cell.dataset.numeric === 'true'); });
  });
  search.addEventListener('input', applyFilter);
  status.addEventListener('change', applyFilter);
  applyFilter();
})();
"#;

/// Escape text for use in HTML content and attribute values
pub fn escape_html(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Render the full report for one run.
///
/// `base_url` is used to turn endpoint paths into links.
pub fn render_html(result: &PipelineResult, layout: &ReportLayout, base_url: &str) -> String {
    let api = result.api_results().cloned().unwrap_or_default();
    let latency = result.latency_results().cloned().unwrap_or_default();
    let title = escape_html(layout.title);

    let mut html = String::with_capacity(32 * 1024);
    html.push_str("<!DOCTYPE html><html lang=\"en\"><head><meta charset=\"utf-8\">");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">");
    html.push_str(&format!("<title>{}</title><style>{}</style></head><body>", title, STYLE));
    html.push_str("<div class=\"container\"><div class=\"header\">");
    html.push_str(&format!(
        "<h1>{}</h1><p>Generated {} - Duration: {:.2}s</p></div>",
        title,
        result.start_time.format(TIME_FORMAT),
        result.total_duration
    ));

    html.push_str("<div class=\"content\">");
    if layout.pipeline_badges {
        html.push_str(&render_pipeline_badges(result));
    }
    html.push_str("<div class=\"grid\">");
    html.push_str(&render_summary_card(result));
    html.push_str(&render_api_card(&api));
    html.push_str(&render_performance_card(&latency));
    html.push_str("</div><div class=\"grid\">");
    html.push_str(&render_api_chart(&api));
    html.push_str(&render_latency_chart(&latency));
    html.push_str("</div>");
    html.push_str(&render_steps(result));
    html.push_str(&render_endpoint_table(&api.cases, base_url));
    html.push_str("</div>");

    html.push_str(&format!(
        "<div class=\"footer\">{} - generated by {} {} on {}</div>",
        title,
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        escape_html(&host_name())
    ));
    html.push_str(&format!("</div><script>{}</script></body></html>", SCRIPT));
    html
}

fn host_name() -> String {
    hostname::get()
        .map(|h| h.to_string_lossy().into_owned())
        .unwrap_or_else(|_| "unknown host".to_string())
}

fn stat(label: &str, value: &str, class: &str) -> String {
    format!(
        "<div class=\"stat\"><span class=\"stat-label\">{}</span><span class=\"stat-value {}\">{}</span></div>",
        label, class, value
    )
}

fn render_summary_card(result: &PipelineResult) -> String {
    let (status, class) = if result.success {
        ("SUCCESS", "success")
    } else {
        ("FAILURE", "error")
    };
    let end = result
        .end_time
        .map(|t| t.format(TIME_FORMAT).to_string())
        .unwrap_or_else(|| "-".to_string());

    let mut card = String::from("<div class=\"card\"><h3>Run Summary</h3>");
    card.push_str(&stat("Status", status, class));
    card.push_str(&stat("Start", &result.start_time.format(TIME_FORMAT).to_string(), ""));
    card.push_str(&stat("End", &end, ""));
    card.push_str(&stat("Total duration", &format!("{:.2}s", result.total_duration), ""));
    card.push_str(&stat("Steps", &result.steps.len().to_string(), ""));
    card.push_str("</div>");
    card
}

fn render_api_card(api: &EndpointTestSummary) -> String {
    let rate = api.success_rate.clamp(0.0, 100.0);
    let mut card = String::from("<div class=\"card\"><h3>API Tests</h3>");
    card.push_str(&stat("Total", &api.total.to_string(), ""));
    card.push_str(&stat("Passed", &api.passed.to_string(), "success"));
    card.push_str(&stat("Failed", &api.failed.to_string(), "error"));
    card.push_str(&stat("Success rate", &format!("{:.1}%", rate), "warning"));
    card.push_str(&format!(
        "<div class=\"progress-bar\"><div class=\"progress-fill\" style=\"width: {:.1}%\"></div></div>",
        rate
    ));
    card.push_str(&format!("<div class=\"progress-text\">{:.1}% passed</div></div>", rate));
    card
}

fn render_performance_card(latency: &LatencySummary) -> String {
    let mut card = String::from("<div class=\"card\"><h3>Performance</h3>");
    for sample in &latency.samples {
        let (value, class) = if sample.is_failure() {
            ("FAILED".to_string(), "error")
        } else {
            (format!("{:.1}ms", sample.millis), "")
        };
        card.push_str(&stat(&escape_html(&sample.label), &value, class));
    }
    card.push_str(&stat("Average", &format!("{:.1}ms", latency.average_ms), ""));
    card.push_str(&stat("Min / Max", &format!("{:.1}ms / {:.1}ms", latency.min_ms, latency.max_ms), ""));
    card.push_str(&stat(
        "Successful",
        &format!("{}/{}", latency.successful_tests, latency.attempted()),
        "",
    ));
    card.push_str("</div>");
    card
}

/// Bar heights scaled so the largest value fills the chart
fn bar_height(value: f64, max: f64) -> f64 {
    if max <= 0.0 || value <= 0.0 {
        0.0
    } else {
        value / max * CHART_HEIGHT
    }
}

fn render_bars(bars: &[(String, f64, String, bool)]) -> String {
    let max = bars.iter().map(|(_, v, _, _)| *v).fold(0.0, f64::max);
    let mut chart = String::from("<div class=\"bar-chart\">");
    let mut labels = String::from("<div class=\"bar-labels\">");
    for (label, value, shown, failed) in bars {
        chart.push_str(&format!(
            "<div class=\"bar{}\" style=\"height: {:.0}px;\"><div class=\"bar-value\">{}</div></div>",
            if *failed { " failed" } else { "" },
            bar_height(*value, max),
            shown
        ));
        labels.push_str(&format!("<div class=\"bar-label\">{}</div>", escape_html(label)));
    }
    chart.push_str("</div>");
    labels.push_str("</div>");
    chart + &labels
}

fn render_api_chart(api: &EndpointTestSummary) -> String {
    let bars = [
        ("Passed".to_string(), api.passed as f64, api.passed.to_string(), false),
        ("Failed".to_string(), api.failed as f64, api.failed.to_string(), true),
    ];
    format!("<div class=\"card\"><h3>API Test Results</h3>{}</div>", render_bars(&bars))
}

fn render_latency_chart(latency: &LatencySummary) -> String {
    let bars: Vec<_> = latency
        .samples
        .iter()
        .map(|s| {
            if s.is_failure() {
                (s.label.clone(), 0.0, "failed".to_string(), true)
            } else {
                (s.label.clone(), s.millis, format!("{:.0}ms", s.millis), false)
            }
        })
        .collect();
    format!("<div class=\"card\"><h3>Endpoint Latency</h3>{}</div>", render_bars(&bars))
}

fn step_badge(step: &Step) -> String {
    let class = if !step.success {
        "status-error"
    } else if step.was_skipped() {
        "status-skipped"
    } else {
        "status-success"
    };
    format!("<span class=\"status-badge {}\">{}</span>", class, escape_html(&step.name))
}

fn render_pipeline_badges(result: &PipelineResult) -> String {
    let badges: Vec<String> = result.steps.values().map(step_badge).collect();
    format!(
        "<div class=\"card\" style=\"margin-bottom: 30px;\"><h3>Pipeline</h3><div class=\"pipeline\">{}</div></div>",
        badges.join("<span class=\"arrow\">&rarr;</span>")
    )
}

fn render_steps(result: &PipelineResult) -> String {
    let longest = result.steps.values().map(|s| s.duration).fold(0.0, f64::max);
    let mut section = String::from("<div class=\"card\" style=\"margin-bottom: 30px;\"><h3>Step Durations</h3>");
    for step in result.steps.values() {
        let width = if longest > 0.0 { step.duration / longest * 100.0 } else { 0.0 };
        section.push_str(&format!(
            "<div class=\"step-row\">{}<div class=\"step-track\"><div class=\"step-fill{}\" style=\"width: {:.1}%\"></div></div><span>{:.2}s</span>",
            step_badge(step),
            if step.success { "" } else { " failed" },
            width,
            step.duration
        ));
        if let Some(error) = &step.error {
            section.push_str(&format!("<div class=\"step-error\">{}</div>", escape_html(error)));
        }
        section.push_str("</div>");
    }
    section.push_str("</div>");
    section
}

fn render_endpoint_row(index: usize, case: &CaseResult, base_url: &str) -> String {
    let (status, class) = if case.passed() { ("passed", "success") } else { ("failed", "error") };
    let received = case
        .observed_status
        .map(|s| s.to_string())
        .unwrap_or_else(|| "-".to_string());
    let url = format!("{}{}", base_url, case.path);
    format!(
        concat!(
            "<tr class=\"endpoint-row {class}\" data-status=\"{status}\">",
            "<td data-value=\"{index}\">{index}</td>",
            "<td class=\"endpoint-method\">{method}</td>",
            "<td class=\"endpoint-url\"><a class=\"url-link\" href=\"{url}\" target=\"_blank\">{path}</a></td>",
            "<td>{description}</td>",
            "<td>{category}</td>",
            "<td>{expected}</td>",
            "<td>{received}</td>",
            "<td data-value=\"{elapsed:.2}\">{elapsed:.2}ms</td>",
            "<td><span class=\"status-badge status-{class}\">{status_label}</span></td>",
            "</tr>"
        ),
        class = class,
        status = status,
        index = index,
        method = case.method,
        url = escape_html(&url),
        path = escape_html(&case.path),
        description = escape_html(&case.description),
        category = escape_html(&case.category),
        expected = case.expected_status,
        received = received,
        elapsed = case.elapsed_ms,
        status_label = status.to_uppercase(),
    )
}

fn render_endpoint_table(cases: &[CaseResult], base_url: &str) -> String {
    let headers = [
        ("#", true),
        ("Method", false),
        ("URL", false),
        ("Description", false),
        ("Category", false),
        ("Expected", true),
        ("Received", true),
        ("Time", true),
        ("Status", false),
    ];

    let mut table = String::from("<div class=\"card\"><h3>Endpoints</h3>");
    table.push_str(concat!(
        "<div class=\"table-controls\">",
        "<input id=\"endpoint-search\" class=\"search-input\" type=\"text\" placeholder=\"Search endpoints...\">",
        "<select id=\"status-filter\" class=\"status-filter\">",
        "<option value=\"all\">All</option><option value=\"passed\">Passed</option><option value=\"failed\">Failed</option>",
        "</select></div>"
    ));
    table.push_str("<div class=\"table-container\"><table id=\"endpoints-table\" class=\"endpoints-table\"><thead><tr>");
    for (label, numeric) in headers {
        table.push_str(&format!(
            "<th data-numeric=\"{}\">{}<span class=\"sort-arrow\">&#8645;</span></th>",
            numeric, label
        ));
    }
    table.push_str("</tr></thead><tbody>");
    for (i, case) in cases.iter().enumerate() {
        table.push_str(&render_endpoint_row(i + 1, case, base_url));
    }
    table.push_str("</tbody></table></div><div id=\"table-info\" class=\"table-info\"></div></div>");
    table
}
