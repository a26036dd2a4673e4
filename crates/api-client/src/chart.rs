// In crates/api-client/src/chart.rs

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate};
use core_types::PriceBar;
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;

use crate::error::{Error, Result};
use crate::types::{ChartEnvelope, ChartResult};

/// Yahoo's error code for an unknown symbol or an empty range.
const NOT_FOUND: &str = "Not Found";

/// Turns a chart API body into daily bars, oldest first.
///
/// An unknown symbol comes back as an empty vector rather than an error.
/// Rows with a missing or non-positive price are dropped, and when two rows
/// fall on the same exchange date the later one wins.
pub fn parse_chart_response(body: &str, auto_adjust: bool) -> Result<Vec<PriceBar>> {
    let envelope: ChartEnvelope = serde_json::from_str(body).map_err(Error::DeserializationFailed)?;

    if let Some(error) = envelope.chart.error {
        if error.code == NOT_FOUND {
            tracing::warn!(description = ?error.description, "Provider has no data for the symbol.");
            return Ok(Vec::new());
        }
        return Err(Error::ApiError {
            code: error.code,
            msg: error.description.unwrap_or_default(),
        });
    }

    let Some(result) = envelope.chart.result.and_then(|r| r.into_iter().next()) else {
        return Ok(Vec::new());
    };

    rows_to_bars(result, auto_adjust)
}

fn rows_to_bars(result: ChartResult, auto_adjust: bool) -> Result<Vec<PriceBar>> {
    let Some(quote) = result.indicators.quote.into_iter().next() else {
        if result.timestamp.is_empty() {
            return Ok(Vec::new());
        }
        return Err(Error::MalformedResponse("timestamps without quote data".into()));
    };
    let adjclose = result
        .indicators
        .adjclose
        .into_iter()
        .next()
        .map(|a| a.adjclose)
        .unwrap_or_default();

    let offset = result.meta.gmtoffset;
    let mut by_date: BTreeMap<NaiveDate, PriceBar> = BTreeMap::new();

    for (i, &ts) in result.timestamp.iter().enumerate() {
        let value = |column: &Vec<Option<f64>>| column.get(i).copied().flatten().filter(|v| v.is_finite() && *v > 0.0);

        let (Some(open), Some(high), Some(low), Some(close)) =
            (value(&quote.open), value(&quote.high), value(&quote.low), value(&quote.close))
        else {
            continue;
        };

        let factor = if auto_adjust {
            value(&adjclose).map(|adj| adj / close).unwrap_or(1.0)
        } else {
            1.0
        };

        let Some(date) = DateTime::from_timestamp(ts + offset, 0).map(|dt| dt.date_naive()) else {
            continue;
        };

        let prices = [open, high, low, close].map(|p| Decimal::from_f64(p * factor));
        let [Some(open), Some(high), Some(low), Some(close)] = prices else {
            continue;
        };

        by_date.insert(
            date,
            PriceBar {
                date,
                open,
                high,
                low,
                close,
                volume: quote.volume.get(i).copied().flatten().unwrap_or_default(),
            },
        );
    }

    Ok(by_date.into_values().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::prelude::ToPrimitive;

    // 2024-01-02 and 2024-01-03 14:30 UTC (09:30 New York).
    const TWO_DAYS: &str = r#"{
        "chart": {
            "result": [{
                "meta": { "symbol": "AAPL", "currency": "USD", "gmtoffset": -18000 },
                "timestamp": [1704205800, 1704292200],
                "indicators": {
                    "quote": [{
                        "open":   [187.15, 184.22],
                        "high":   [188.44, 185.88],
                        "low":    [183.89, 183.43],
                        "close":  [185.64, 184.25],
                        "volume": [82488700, 58414500]
                    }],
                    "adjclose": [{ "adjclose": [92.82, 92.125] }]
                }
            }],
            "error": null
        }
    }"#;

    fn to_f64(d: Decimal) -> f64 {
        d.to_f64().unwrap()
    }

    #[test]
    fn parses_raw_bars() {
        let bars = parse_chart_response(TWO_DAYS, false).unwrap();
        assert_eq!(bars.len(), 2);
        assert_eq!(bars[0].date, NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
        assert_eq!(bars[1].date, NaiveDate::from_ymd_opt(2024, 1, 3).unwrap());
        assert!((to_f64(bars[0].close) - 185.64).abs() < 1e-9);
        assert!((to_f64(bars[1].open) - 184.22).abs() < 1e-9);
        assert_eq!(bars[0].volume, 82_488_700);
    }

    #[test]
    fn auto_adjust_scales_every_price() {
        let bars = parse_chart_response(TWO_DAYS, true).unwrap();
        // adjclose is exactly half of close on both days.
        assert!((to_f64(bars[0].close) - 92.82).abs() < 1e-9);
        assert!((to_f64(bars[0].open) - 187.15 / 2.0).abs() < 1e-9);
        assert!((to_f64(bars[1].high) - 185.88 / 2.0).abs() < 1e-9);
        assert_eq!(bars[1].volume, 58_414_500);
    }

    #[test]
    fn unknown_symbol_is_empty_not_an_error() {
        let body = r#"{"chart":{"result":null,"error":{"code":"Not Found","description":"No data found, symbol may be delisted"}}}"#;
        assert!(parse_chart_response(body, true).unwrap().is_empty());
    }

    #[test]
    fn other_api_errors_are_reported() {
        let body = r#"{"chart":{"result":null,"error":{"code":"Bad Request","description":"Invalid input - interval=1d is not supported"}}}"#;
        match parse_chart_response(body, true) {
            Err(Error::ApiError { code, msg }) => {
                assert_eq!(code, "Bad Request");
                assert!(msg.contains("interval"));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn range_without_bars_is_empty() {
        let body = r#"{"chart":{"result":[{"meta":{"gmtoffset":0},"indicators":{"quote":[{}]}}],"error":null}}"#;
        assert!(parse_chart_response(body, true).unwrap().is_empty());
    }

    #[test]
    fn null_rows_are_skipped_and_duplicates_keep_the_last() {
        let body = r#"{"chart":{"result":[{
            "meta": { "gmtoffset": 0 },
            "timestamp": [1704240000, 1704326400, 1704412800, 1704445200],
            "indicators": { "quote": [{
                "open":   [10.0, null, 12.0, 12.5],
                "high":   [10.0, 11.0, 12.0, 12.5],
                "low":    [10.0, 11.0, 12.0, 12.5],
                "close":  [10.0, 11.0, 12.0, 12.5],
                "volume": [100, 200, null, 400]
            }]}
        }],"error":null}}"#;

        let bars = parse_chart_response(body, true).unwrap();
        assert_eq!(bars.len(), 2);
        assert_eq!(bars[0].date, NaiveDate::from_ymd_opt(2024, 1, 3).unwrap());
        // Two timestamps on 2024-01-05: the later one is kept.
        assert_eq!(bars[1].date, NaiveDate::from_ymd_opt(2024, 1, 5).unwrap());
        assert!((to_f64(bars[1].close) - 12.5).abs() < 1e-9);
        assert_eq!(bars[1].volume, 400);
    }

    #[test]
    fn garbage_is_a_deserialization_error() {
        assert!(matches!(
            parse_chart_response("<html>rate limited</html>", true),
            Err(Error::DeserializationFailed(_))
        ));
    }
}
