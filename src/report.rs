//! Static dashboard report: a self-contained HTML page plus CSV exports.
//!
//! The page layout and copy follow the analysis dashboard this tool renders:
//! comparison chart, improvement chart, summary figures and the methodology
//! notes. Charts are referenced as `<img>` sources so the same page works for
//! the on-disk bundle and the served dashboard.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use anyhow::anyhow;
use thousands::Separable;
use tracing::info;

use crate::perf::{Improvement, Measurement, Metric};
use crate::perf_calc::{compute_report, ImprovementReport};
use crate::plot;

const STYLE: &str = r#"
    body { font-family: -apple-system, 'Segoe UI', Helvetica, Arial, sans-serif;
           margin: 0; background: #f5f6fa; color: #222; }
    header { background: #1f2937; color: #f9fafb; padding: 24px 32px; }
    header h1 { margin: 0; font-size: 1.5rem; }
    header p { margin: 8px 0 0; color: #cbd5e1; max-width: 60em; }
    main { max-width: 1100px; margin: 0 auto; padding: 24px 32px; }
    section { background: #fff; border: 1px solid #e5e7eb; border-radius: 8px;
              padding: 20px 24px; margin-bottom: 24px; }
    h2 { margin-top: 0; font-size: 1.15rem; }
    img.chart { max-width: 100%; height: auto; display: block; margin: 0 auto; }
    .controls label { font-weight: 600; margin-right: 8px; }
    .controls select { padding: 6px 10px; font-size: 1rem; }
    .tiles { display: flex; gap: 16px; flex-wrap: wrap; }
    .tile { flex: 1 1 160px; background: #f9fafb; border: 1px solid #e5e7eb;
            border-radius: 8px; padding: 14px 16px; }
    .tile .value { font-size: 1.6rem; font-weight: 700; color: #16a34a; }
    .tile .caption { color: #6b7280; font-size: 0.85rem; }
    .columns { display: flex; gap: 24px; flex-wrap: wrap; }
    .columns div { flex: 1 1 240px; }
    table { border-collapse: collapse; width: 100%; }
    th, td { border: 1px solid #e5e7eb; padding: 8px 10px; text-align: right; }
    th:first-child, td:first-child, th:nth-child(2), td:nth-child(2) { text-align: left; }
    thead th { background: #f3f4f6; }
    footer { text-align: center; color: #6b7280; padding: 16px; }
"#;

// Re-fetches the report and swaps the chart images whenever the selector
// changes; the server recomputes everything per request.
const UPDATE_SCRIPT: &str = r#"
    const select = document.getElementById('metric');
    select.addEventListener('change', async () => {
        const metric = select.value;
        document.getElementById('comparison-chart').src =
            '/charts/comparison.svg?metric=' + metric;
        document.getElementById('improvement-chart').src =
            '/charts/improvement.svg?metric=' + metric;
        const res = await fetch('/improvements?metric=' + metric);
        const report = await res.json();
        document.getElementById('average-improvement').textContent =
            report.average_improvement.toFixed(1) + '%';
        document.getElementById('scenario-tiles').innerHTML =
            report.improvements.map(i =>
                '<div class="tile"><div class="value">' +
                i.improvement_percent.toFixed(1) + '%</div><div>' + i.scenario +
                '</div><div class="caption">Performance gain</div></div>'
            ).join('');
    });
"#;

/// Render the complete dashboard page.
///
/// `interactive` adds the metric selector and the refresh script; the static
/// bundle instead states the metric it was rendered for.
pub fn dashboard_html(
    rows: &[Measurement],
    report: &ImprovementReport,
    comparison_src: &str,
    improvement_src: &str,
    interactive: bool,
) -> String {
    let mut page = String::with_capacity(16 * 1024);

    page.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    page.push_str("<meta charset=\"UTF-8\">\n");
    page.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n");
    page.push_str("<title>Code Performance Analysis</title>\n");
    let _ = write!(page, "<style>{STYLE}</style>\n");
    page.push_str("</head>\n<body>\n");

    page.push_str("<header>\n<h1>Code Performance Analysis: Original vs Optimized Version</h1>\n");
    page.push_str(
        "<p>Detailed analysis of performance improvements between the original and optimized \
         versions of the file-processing pipeline across three workload sizes.</p>\n</header>\n",
    );
    page.push_str("<main>\n");

    page.push_str("<section class=\"controls\">\n<h2>Analysis Controls</h2>\n");
    if interactive {
        page.push_str("<label for=\"metric\">Select Metric to Analyze</label>\n");
        page.push_str("<select id=\"metric\">\n");
        for metric in Metric::ALL {
            let selected = if metric == report.metric { " selected" } else { "" };
            let _ = write!(
                page,
                "<option value=\"{}\"{}>{}</option>\n",
                metric.slug(),
                selected,
                metric.label()
            );
        }
        page.push_str("</select>\n");
    } else {
        let _ = write!(page, "<p>Metric: <strong>{}</strong></p>\n", report.metric);
    }
    page.push_str("</section>\n");

    page.push_str("<section>\n<h2>Performance Comparison</h2>\n");
    let _ = write!(
        page,
        "<img class=\"chart\" id=\"comparison-chart\" src=\"{comparison_src}\" \
         alt=\"Metric comparison by scenario\">\n"
    );
    page.push_str("</section>\n");

    page.push_str("<section>\n<h2>Percentage Improvements</h2>\n");
    let _ = write!(
        page,
        "<img class=\"chart\" id=\"improvement-chart\" src=\"{improvement_src}\" \
         alt=\"Percentage improvement by scenario\">\n"
    );
    page.push_str("</section>\n");

    page.push_str(&summary_section(report));
    page.push_str(&measurements_section(rows));
    page.push_str(&analysis_section());
    page.push_str(&methodology_section());

    page.push_str("</main>\n<footer>Performance Analysis Dashboard</footer>\n");
    if interactive {
        let _ = write!(page, "<script>{UPDATE_SCRIPT}</script>\n");
    }
    page.push_str("</body>\n</html>\n");

    page
}

fn summary_section(report: &ImprovementReport) -> String {
    let mut s = String::new();
    s.push_str("<section>\n<h2>Key Improvements</h2>\n<div class=\"tiles\">\n");
    let _ = write!(
        s,
        "<div class=\"tile\"><div class=\"value\" id=\"average-improvement\">{:.1}%</div>\
         <div>Average Improvement</div><div class=\"caption\">Across all scenarios</div></div>\n",
        report.average_improvement
    );
    s.push_str("</div>\n<h2>Scenario Analysis</h2>\n<div class=\"tiles\" id=\"scenario-tiles\">\n");
    for improvement in &report.improvements {
        let _ = write!(
            s,
            "<div class=\"tile\"><div class=\"value\">{:.1}%</div><div>{}</div>\
             <div class=\"caption\">Performance gain</div></div>\n",
            improvement.improvement_percent, improvement.scenario
        );
    }
    s.push_str("</div>\n</section>\n");
    s
}

fn measurements_section(rows: &[Measurement]) -> String {
    let mut s = String::new();
    s.push_str("<section>\n<h2>Measured Data</h2>\n<table>\n<thead><tr>");
    s.push_str(
        "<th>Scenario</th><th>Version</th><th>Processing Time (s)</th>\
         <th>Memory Usage (MB)</th><th>DB Connections</th><th>Files</th>\
         <th>File Size (MB)</th>",
    );
    s.push_str("</tr></thead>\n<tbody>\n");
    for row in rows {
        let _ = write!(
            s,
            "<tr><td>{}</td><td>{}</td><td>{:.1}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            row.scenario,
            row.version,
            row.processing_time_s,
            (row.memory_usage_mb as u64).separate_with_commas(),
            row.db_connections,
            row.files,
            row.file_size_mb
        );
    }
    s.push_str("</tbody>\n</table>\n</section>\n");
    s
}

fn analysis_section() -> String {
    r#"<section>
<h2>Detailed Analysis</h2>
<div class="columns">
<div>
<h3>Processing Efficiency</h3>
<ul>
<li>Concurrent file processing</li>
<li>Optimized header parsing</li>
<li>Reduced database calls</li>
</ul>
</div>
<div>
<h3>Memory Management</h3>
<ul>
<li>Efficient resource handling</li>
<li>Connection pooling</li>
<li>Streaming file processing</li>
</ul>
</div>
<div>
<h3>Code Improvements</h3>
<ul>
<li>Type annotations added</li>
<li>Better error handling</li>
<li>Modular structure</li>
</ul>
</div>
</div>
</section>
"#
    .to_string()
}

fn methodology_section() -> String {
    r#"<section>
<h2>Methodology</h2>
<div class="columns">
<div>
<h3>Test Scenarios</h3>
<ul>
<li>Small: 1 file, 1MB</li>
<li>Medium: 5 files, 10MB each</li>
<li>Large: 10 files, 50MB each</li>
</ul>
</div>
<div>
<h3>Metrics Measured</h3>
<ul>
<li>Processing time</li>
<li>Memory usage</li>
<li>Database connections</li>
</ul>
</div>
<div>
<h3>Test Environment</h3>
<ul>
<li>Controlled environment</li>
<li>Multiple iterations</li>
<li>Standard hardware</li>
</ul>
</div>
</div>
</section>
"#
    .to_string()
}

/// Write the full static bundle: page, both charts and the CSV exports.
pub fn write_report_bundle(
    dir: &Path,
    rows: &[Measurement],
    metric: Metric,
) -> anyhow::Result<()> {
    fs::create_dir_all(dir)?;

    let report = compute_report(rows, metric)?;

    let comparison = plot::comparison_chart_svg(rows, metric).map_err(|e| anyhow!(e))?;
    fs::write(dir.join("comparison.svg"), comparison)?;

    let improvement = plot::improvement_chart_svg(&report.improvements).map_err(|e| anyhow!(e))?;
    fs::write(dir.join("improvement.svg"), improvement)?;

    let page = dashboard_html(rows, &report, "comparison.svg", "improvement.svg", false);
    fs::write(dir.join("index.html"), page)?;

    write_measurements_csv(&dir.join("measurements.csv"), rows)?;
    write_improvements_csv(&dir.join("improvements.csv"), &report.improvements)?;

    info!(dir = %dir.display(), metric = metric.slug(), "report bundle written");
    Ok(())
}

pub fn write_measurements_csv(path: &Path, rows: &[Measurement]) -> anyhow::Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

pub fn write_improvements_csv(path: &Path, improvements: &[Improvement]) -> anyhow::Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    for improvement in improvements {
        writer.serialize(improvement)?;
    }
    writer.flush()?;
    Ok(())
}
