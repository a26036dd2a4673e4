// In crates/core-types/src/types.rs

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A normalized equity symbol (e.g., "AAPL", "BRK-B", "^GSPC").
///
/// Always upper-case and restricted to the characters exchanges actually use,
/// so it is safe to place in a URL path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Ticker(String);

impl Ticker {
    /// Trims and upper-cases raw user input, rejecting empty or unsafe symbols.
    pub fn parse(raw: &str) -> Result<Self> {
        let symbol = raw.trim().to_uppercase();
        if symbol.is_empty() {
            return Err(Error::EmptyTicker);
        }
        let allowed = |c: char| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '^' | '=' | '_');
        if !symbol.chars().all(allowed) {
            return Err(Error::InvalidTicker(raw.trim().to_string()));
        }
        Ok(Self(symbol))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Ticker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Ticker {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Ticker {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<Ticker> for String {
    fn from(ticker: Ticker) -> Self {
        ticker.0
    }
}

/// The lookback window for a history request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Period {
    #[serde(rename = "1mo")]
    OneMonth,
    #[serde(rename = "3mo")]
    ThreeMonths,
    #[serde(rename = "6mo")]
    SixMonths,
    #[default]
    #[serde(rename = "1y")]
    OneYear,
    #[serde(rename = "2y")]
    TwoYears,
    #[serde(rename = "5y")]
    FiveYears,
    #[serde(rename = "10y")]
    TenYears,
    #[serde(rename = "ytd")]
    YearToDate,
    #[serde(rename = "max")]
    Max,
}

impl Period {
    /// Every selectable period, in the order they are offered to users.
    pub const ALL: [Period; 9] = [
        Period::OneMonth,
        Period::ThreeMonths,
        Period::SixMonths,
        Period::OneYear,
        Period::TwoYears,
        Period::FiveYears,
        Period::TenYears,
        Period::YearToDate,
        Period::Max,
    ];

    /// The keyword form, which is also what the market-data provider expects.
    pub fn as_str(&self) -> &'static str {
        match self {
            Period::OneMonth => "1mo",
            Period::ThreeMonths => "3mo",
            Period::SixMonths => "6mo",
            Period::OneYear => "1y",
            Period::TwoYears => "2y",
            Period::FiveYears => "5y",
            Period::TenYears => "10y",
            Period::YearToDate => "ytd",
            Period::Max => "max",
        }
    }

    /// A human readable label for selection widgets.
    pub fn label(&self) -> &'static str {
        match self {
            Period::OneMonth => "1 month",
            Period::ThreeMonths => "3 months",
            Period::SixMonths => "6 months",
            Period::OneYear => "1 year",
            Period::TwoYears => "2 years",
            Period::FiveYears => "5 years",
            Period::TenYears => "10 years",
            Period::YearToDate => "Year to date",
            Period::Max => "Max",
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Period {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let keyword = s.trim().to_lowercase();
        Period::ALL
            .into_iter()
            .find(|p| p.as_str() == keyword)
            .ok_or_else(|| Error::UnknownPeriod(s.trim().to_string()))
    }
}

/// One trading day of price data.
///
/// Only `close` feeds the calculations; the other fields are carried for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    pub date: NaiveDate,
    pub open: Decimal,
    pub high: Decimal,
    pub low: Decimal,
    pub close: Decimal,
    pub volume: u64,
}

/// A non-empty run of daily bars with strictly increasing dates.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct PriceSeries(Vec<PriceBar>);

#[allow(clippy::len_without_is_empty)]
impl PriceSeries {
    pub fn new(bars: Vec<PriceBar>) -> Result<Self> {
        if bars.is_empty() {
            return Err(Error::EmptySeries);
        }
        if let Some(pair) = bars.windows(2).find(|w| w[1].date <= w[0].date) {
            return Err(Error::UnorderedDates {
                previous: pair[0].date,
                next: pair[1].date,
            });
        }
        Ok(Self(bars))
    }

    pub fn bars(&self) -> &[PriceBar] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn last(&self) -> &PriceBar {
        // Non-empty by construction.
        &self.0[self.0.len() - 1]
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.0.iter().map(|b| b.date).collect()
    }

    /// Closing prices as floats, in bar order.
    pub fn closes(&self) -> Vec<f64> {
        self.0.iter().map(|b| b.close.to_f64().unwrap_or_default()).collect()
    }

    pub fn into_bars(self) -> Vec<PriceBar> {
        self.0
    }
}

impl TryFrom<Vec<PriceBar>> for PriceSeries {
    type Error = Error;

    fn try_from(bars: Vec<PriceBar>) -> Result<Self> {
        Self::new(bars)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn bar(date: &str, close: Decimal) -> PriceBar {
        PriceBar {
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            open: close,
            high: close,
            low: close,
            close,
            volume: 1_000,
        }
    }

    #[test]
    fn ticker_is_trimmed_and_uppercased() {
        assert_eq!(Ticker::parse("  msft ").unwrap().as_str(), "MSFT");
        assert_eq!(Ticker::parse("brk-b").unwrap().as_str(), "BRK-B");
        assert_eq!(Ticker::parse("^gspc").unwrap().as_str(), "^GSPC");
    }

    #[test]
    fn ticker_rejects_empty_and_unsafe_input() {
        assert_eq!(Ticker::parse("   "), Err(Error::EmptyTicker));
        assert!(matches!(Ticker::parse("AAPL/../x"), Err(Error::InvalidTicker(_))));
        assert!(matches!(Ticker::parse("AA PL"), Err(Error::InvalidTicker(_))));
    }

    #[test]
    fn period_keywords_round_trip() {
        for period in Period::ALL {
            assert_eq!(period.as_str().parse::<Period>().unwrap(), period);
        }
        assert_eq!("YTD".parse::<Period>().unwrap(), Period::YearToDate);
        assert_eq!(Period::default(), Period::OneYear);
        assert!(matches!("2w".parse::<Period>(), Err(Error::UnknownPeriod(_))));
    }

    #[test]
    fn period_and_ticker_serialize_as_plain_strings() {
        assert_eq!(serde_json::to_string(&Period::TenYears).unwrap(), "\"10y\"");
        let period: Period = serde_json::from_str("\"ytd\"").unwrap();
        assert_eq!(period, Period::YearToDate);

        let ticker: Ticker = serde_json::from_str("\"tsla\"").unwrap();
        assert_eq!(serde_json::to_string(&ticker).unwrap(), "\"TSLA\"");
        assert!(serde_json::from_str::<Ticker>("\"\"").is_err());
    }

    #[test]
    fn series_must_not_be_empty() {
        assert_eq!(PriceSeries::new(vec![]), Err(Error::EmptySeries));
    }

    #[test]
    fn series_requires_increasing_dates() {
        let bars = vec![bar("2024-01-03", dec!(10)), bar("2024-01-02", dec!(11))];
        assert!(matches!(PriceSeries::new(bars), Err(Error::UnorderedDates { .. })));

        let dup = vec![bar("2024-01-02", dec!(10)), bar("2024-01-02", dec!(11))];
        assert!(matches!(PriceSeries::new(dup), Err(Error::UnorderedDates { .. })));
    }

    #[test]
    fn series_exposes_closes_and_last_bar() {
        let series = PriceSeries::new(vec![
            bar("2024-01-02", dec!(100)),
            bar("2024-01-03", dec!(110.5)),
        ])
        .unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series.closes(), vec![100.0, 110.5]);
        assert_eq!(series.last().close, dec!(110.5));
    }
}
