// In crates/web-server/src/dashboard.rs

//! Server-rendered HTML for the dashboard page.

use core_types::Period;
use engine::AnalysisReport;
use rust_decimal::prelude::ToPrimitive;

use crate::format;

/// What the main panel shows for a request.
pub enum Outcome<'a> {
    Report {
        report: &'a AnalysisReport,
        chart_svg: &'a str,
    },
    Error(&'a str),
}

/// Inputs to one rendering of the page.
pub struct DashboardView<'a> {
    /// The ticker as the user typed it, echoed back into the form.
    pub ticker_input: &'a str,
    pub period: Period,
    pub outcome: Outcome<'a>,
}

const STYLE: &str = r#"
body { margin: 0; font-family: sans-serif; background: #0e1117; color: #fafafa; display: flex; }
aside { width: 260px; min-height: 100vh; padding: 24px; background: #262730; box-sizing: border-box; }
aside label { display: block; margin: 16px 0 6px; font-size: 14px; }
aside input, aside select, aside button { width: 100%; padding: 8px; box-sizing: border-box; }
aside small { color: #9a9aa5; }
main { flex: 1; padding: 24px 40px; }
.metrics { display: grid; grid-template-columns: repeat(4, 1fr); gap: 16px; margin: 24px 0; }
.metric .label { font-size: 14px; color: #c5c5cf; }
.metric .value { font-size: 32px; }
.error { padding: 16px; border-radius: 6px; background: #3e2428; color: #ff8c8c; }
.chart svg { max-width: 100%; height: auto; }
details { margin-top: 24px; }
.table-wrap { max-height: 400px; overflow: auto; }
table { border-collapse: collapse; font-size: 13px; width: 100%; }
th, td { padding: 4px 8px; text-align: right; border-bottom: 1px solid #333; white-space: nowrap; }
th { position: sticky; top: 0; background: #262730; }
"#;

/// Renders the complete dashboard document.
pub fn render_page(view: &DashboardView<'_>) -> String {
    let title = match &view.outcome {
        Outcome::Report { report, .. } => report.ticker.to_string(),
        Outcome::Error(_) => view.ticker_input.trim().to_uppercase(),
    };

    let mut html = String::with_capacity(64 * 1024);
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str("<title>Financial Stock Analyzer</title>\n");
    html.push_str(&format!("<style>{STYLE}</style>\n</head>\n<body>\n"));

    render_sidebar(&mut html, view);

    html.push_str("<main>\n");
    html.push_str(&format!("<h1>{} Stock Analysis</h1>\n", escape(&title)));
    match &view.outcome {
        Outcome::Report { report, chart_svg } => {
            render_metrics(&mut html, report);
            html.push_str(&format!("<div class=\"chart\">{chart_svg}</div>\n"));
            render_raw_table(&mut html, report);
        }
        Outcome::Error(message) => {
            html.push_str(&format!("<div class=\"error\">{}</div>\n", escape(message)));
        }
    }
    html.push_str("</main>\n</body>\n</html>\n");
    html
}

fn render_sidebar(html: &mut String, view: &DashboardView<'_>) {
    html.push_str("<aside>\n<h2>Stock Analyzer</h2>\n<form method=\"get\" action=\"/\">\n");
    html.push_str("<label for=\"ticker\">Enter stock ticker</label>\n");
    html.push_str(&format!(
        "<input id=\"ticker\" name=\"ticker\" value=\"{}\">\n<small>Example: AAPL, MSFT, TSLA</small>\n",
        escape(view.ticker_input)
    ));
    html.push_str("<label for=\"period\">Select period for analysis</label>\n<select id=\"period\" name=\"period\">\n");
    for period in Period::ALL {
        let selected = if period == view.period { " selected" } else { "" };
        html.push_str(&format!(
            "<option value=\"{}\"{selected}>{}</option>\n",
            period.as_str(),
            period.label()
        ));
    }
    html.push_str("</select>\n<label>&nbsp;</label>\n<button type=\"submit\">Analyze</button>\n</form>\n</aside>\n");
}

fn render_metrics(html: &mut String, report: &AnalysisReport) {
    let summary = &report.summary;
    let metrics = [
        ("Latest Price", format::currency(summary.latest_price)),
        ("Annualized Mean Return", format::percent(summary.mean_annualized_return)),
        (
            "Compounded Annualized Return",
            format::percent(Some(summary.compound_annualized_return)),
        ),
        ("Annualized Volatility", format::percent(summary.annualized_volatility)),
    ];

    html.push_str("<section class=\"metrics\">\n");
    for (label, value) in metrics {
        html.push_str(&format!(
            "<div class=\"metric\"><div class=\"label\">{label}</div><div class=\"value\">{value}</div></div>\n"
        ));
    }
    html.push_str("</section>\n");
}

fn render_raw_table(html: &mut String, report: &AnalysisReport) {
    html.push_str("<details>\n<summary>View Raw Data</summary>\n<div class=\"table-wrap\">\n<table>\n<thead><tr>");
    for header in [
        "Date", "Open", "High", "Low", "Close", "Volume", "Daily Return", "MA50", "MA200", "Signal", "Position",
    ] {
        html.push_str(&format!("<th>{header}</th>"));
    }
    html.push_str("</tr></thead>\n<tbody>\n");

    for row in report.rows() {
        let price = |d: rust_decimal::Decimal| format!("{d:.2}");
        let close = row.close.to_f64().map(format::currency_grouped).unwrap_or_default();
        let daily_return = row.daily_return.map(|r| format::percent_with(Some(r), 4)).unwrap_or_default();
        let ma50 = row.ma50.map(format::currency_grouped).unwrap_or_default();
        let ma200 = row.ma200.map(format::currency_grouped).unwrap_or_default();
        let position = row.position.map(|p| p.to_string()).unwrap_or_default();

        html.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{close}</td><td>{}</td><td>{daily_return}</td><td>{ma50}</td><td>{ma200}</td><td>{}</td><td>{position}</td></tr>\n",
            row.date,
            price(row.open),
            price(row.high),
            price(row.low),
            format::grouped(row.volume),
            row.signal,
        ));
    }
    html.push_str("</tbody>\n</table>\n</div>\n</details>\n");
}

/// Minimal HTML escaping for text and attribute values.
pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
