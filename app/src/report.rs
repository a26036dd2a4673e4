// In app/src/report.rs

use engine::AnalysisReport;
use rust_decimal::prelude::ToPrimitive;
use web_server::format;

/// The four headline metrics, one per line.
pub fn print_summary(report: &AnalysisReport) {
    let summary = &report.summary;

    println!("\n--- {} Stock Analysis ({}) ---", report.ticker, report.period.label());
    println!("Bars: {} ({} to {})", report.series.len(), first_date(report), report.series.last().date);
    println!("---------------------------------");
    println!("Latest Price:                 {}", format::currency(summary.latest_price));
    println!("Annualized Mean Return:       {}", format::percent(summary.mean_annualized_return));
    println!(
        "Compounded Annualized Return: {}",
        format::percent(Some(summary.compound_annualized_return))
    );
    println!("Annualized Volatility:        {}", format::percent(summary.annualized_volatility));
    println!("---------------------------------");
}

/// The augmented table; undefined cells are left blank.
pub fn print_raw_table(report: &AnalysisReport) {
    println!(
        "{:<10} {:>10} {:>10} {:>10} {:>12} {:>14} {:>12} {:>12} {:>12} {:>6} {:>8}",
        "Date", "Open", "High", "Low", "Close", "Volume", "Daily Ret", "MA50", "MA200", "Signal", "Position"
    );
    for row in report.rows() {
        println!(
            "{:<10} {:>10} {:>10} {:>10} {:>12} {:>14} {:>12} {:>12} {:>12} {:>6} {:>8}",
            row.date.to_string(),
            format!("{:.2}", row.open),
            format!("{:.2}", row.high),
            format!("{:.2}", row.low),
            row.close.to_f64().map(format::currency_grouped).unwrap_or_default(),
            format::grouped(row.volume),
            row.daily_return.map(|r| format::percent_with(Some(r), 4)).unwrap_or_default(),
            row.ma50.map(format::currency_grouped).unwrap_or_default(),
            row.ma200.map(format::currency_grouped).unwrap_or_default(),
            row.signal,
            row.position.map(|p| p.to_string()).unwrap_or_default(),
        );
    }
}

fn first_date(report: &AnalysisReport) -> String {
    report
        .series
        .bars()
        .first()
        .map(|bar| bar.date.to_string())
        .unwrap_or_default()
}
