// In crates/strategies/src/ma_crossover.rs

use crate::error::{Error, Result};
use crate::types::{MACrossoverSettings, SignalSeries};
use crate::Strategy;
use ta::indicators::SimpleMovingAverage as Sma;
use ta::Next;

/// The classic "golden cross" fast window.
pub const FAST_WINDOW: usize = 50;
/// The classic "golden cross" slow window.
pub const SLOW_WINDOW: usize = 200;

/// Simple moving average crossover over closing prices.
///
/// The signal is long (1) on every bar where both averages have a full window
/// and the fast one is strictly above the slow one. Bars where either average
/// is still warming up count as flat (0), so the first bar with a defined
/// bullish relationship shows up as a buy transition.
#[derive(Debug, Clone)]
pub struct MACrossover {
    settings: MACrossoverSettings,
    /// Untouched indicator prototypes; each evaluation runs on a fresh clone.
    fast_sma: Sma,
    slow_sma: Sma,
}

impl MACrossover {
    /// Creates a new crossover from its settings.
    pub fn new(settings: MACrossoverSettings) -> Result<Self> {
        if settings.fast_period >= settings.slow_period {
            return Err(Error::InvalidWindow(format!(
                "fast period {} must be shorter than slow period {}",
                settings.fast_period, settings.slow_period
            )));
        }
        let fast_sma = Sma::new(settings.fast_period)
            .map_err(|e| Error::InvalidWindow(format!("fast period {}: {:?}", settings.fast_period, e)))?;
        let slow_sma = Sma::new(settings.slow_period)
            .map_err(|e| Error::InvalidWindow(format!("slow period {}: {:?}", settings.slow_period, e)))?;

        Ok(Self {
            settings,
            fast_sma,
            slow_sma,
        })
    }

    /// The 50/200 day crossover.
    pub fn golden_cross() -> Self {
        Self {
            settings: MACrossoverSettings::default(),
            fast_sma: Sma::new(FAST_WINDOW).expect("non-zero window"),
            slow_sma: Sma::new(SLOW_WINDOW).expect("non-zero window"),
        }
    }

    pub fn settings(&self) -> &MACrossoverSettings {
        &self.settings
    }
}

/// Runs an SMA over `closes`, hiding values until `period` observations were seen.
///
/// The running sum inside the SMA drifts by a few ULPs over long series, so a
/// window of identical closes reports that close directly. Otherwise two flat
/// averages of different lengths could compare unequal.
fn full_window_means(closes: &[f64], mut sma: Sma, period: usize) -> Vec<Option<f64>> {
    let mut flat_run = 0usize;
    let mut previous: Option<f64> = None;

    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let mean = sma.next(close);
            flat_run = if previous == Some(close) { flat_run + 1 } else { 1 };
            previous = Some(close);

            if i + 1 < period {
                None
            } else if flat_run >= period {
                Some(close)
            } else {
                Some(mean)
            }
        })
        .collect()
}

impl Strategy for MACrossover {
    fn name(&self) -> &'static str {
        "MACrossover"
    }

    fn evaluate(&self, closes: &[f64]) -> SignalSeries {
        // 1. Moving averages, masked during warm-up.
        let fast_ma = full_window_means(closes, self.fast_sma.clone(), self.settings.fast_period);
        let slow_ma = full_window_means(closes, self.slow_sma.clone(), self.settings.slow_period);

        // 2. Regime per bar. An undefined average is treated as flat.
        let signal: Vec<u8> = fast_ma
            .iter()
            .zip(&slow_ma)
            .map(|(fast, slow)| match (fast, slow) {
                (Some(f), Some(s)) if f > s => 1,
                _ => 0,
            })
            .collect();

        // 3. Transitions between regimes.
        let position = std::iter::once(None)
            .chain(signal.windows(2).map(|w| Some(w[1] as i8 - w[0] as i8)))
            .take(signal.len())
            .collect();

        SignalSeries {
            fast_ma,
            slow_ma,
            signal,
            position,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Marker;

    fn assert_close(actual: f64, expected: f64) {
        assert!((actual - expected).abs() < 1e-9, "{actual} != {expected}");
    }

    #[test]
    fn rejects_invalid_windows() {
        let zero = MACrossoverSettings { fast_period: 0, slow_period: 10 };
        assert!(MACrossover::new(zero).is_err());

        let inverted = MACrossoverSettings { fast_period: 20, slow_period: 10 };
        assert!(MACrossover::new(inverted).is_err());
    }

    #[test]
    fn averages_stay_undefined_below_full_window() {
        let closes: Vec<f64> = (1..=49).map(f64::from).collect();
        let out = MACrossover::golden_cross().evaluate(&closes);

        assert_eq!(out.len(), 49);
        assert!(out.fast_ma.iter().all(Option::is_none));
        assert!(out.slow_ma.iter().all(Option::is_none));
        assert!(out.signal.iter().all(|&s| s == 0));
    }

    #[test]
    fn fast_average_starts_at_bar_49() {
        let closes: Vec<f64> = (1..=60).map(|i| 100.0 + (i as f64).sin() * 5.0).collect();
        let out = MACrossover::golden_cross().evaluate(&closes);

        assert!(out.fast_ma[48].is_none());
        let expected = closes[..50].iter().sum::<f64>() / 50.0;
        assert_close(out.fast_ma[49].unwrap(), expected);

        let expected_last = closes[10..60].iter().sum::<f64>() / 50.0;
        assert_close(out.fast_ma[59].unwrap(), expected_last);
    }

    #[test]
    fn position_is_none_only_on_first_bar() {
        let out = MACrossover::golden_cross().evaluate(&[10.0, 11.0, 12.0]);
        assert_eq!(out.position, vec![None, Some(0), Some(0)]);

        let single = MACrossover::golden_cross().evaluate(&[10.0]);
        assert_eq!(single.position, vec![None]);

        let empty = MACrossover::golden_cross().evaluate(&[]);
        assert!(empty.is_empty());
    }

    #[test]
    fn crossover_emits_buy_then_sell() {
        let settings = MACrossoverSettings { fast_period: 2, slow_period: 3 };
        let strategy = MACrossover::new(settings).unwrap();
        // Rising then falling prices push the fast average above and then below the slow one.
        let closes = [10.0, 10.0, 10.0, 12.0, 14.0, 16.0, 12.0, 8.0, 6.0];
        let out = strategy.evaluate(&closes);

        let markers: Vec<_> = out.markers().collect();
        assert_eq!(markers, vec![(3, Marker::Buy), (6, Marker::Sell)]);

        // A nonzero position always coincides with a regime change.
        for i in 1..closes.len() {
            let changed = out.signal[i] != out.signal[i - 1];
            assert_eq!(out.position[i] != Some(0), changed, "bar {i}");
        }
    }

    #[test]
    fn constant_prices_never_cross() {
        let out = MACrossover::golden_cross().evaluate(&vec![123.37; 300]);

        assert_eq!(out.fast_ma[299], Some(123.37));
        assert_eq!(out.slow_ma[299], Some(123.37));
        assert!(out.signal.iter().all(|&s| s == 0));
        assert_eq!(out.markers().count(), 0);
    }

    #[test]
    fn flat_tail_settles_to_equal_averages() {
        let mut closes: Vec<f64> = (0..400).map(|i| 100.0 + 15.0 * (i as f64 / 23.0).sin()).collect();
        closes.extend(std::iter::repeat_n(123.37, 400));
        let out = MACrossover::golden_cross().evaluate(&closes);

        for i in 599..800 {
            assert_eq!(out.fast_ma[i], Some(123.37), "bar {i}");
            assert_eq!(out.slow_ma[i], Some(123.37), "bar {i}");
            assert_eq!(out.signal[i], 0, "bar {i}");
        }
        assert!(out.markers().all(|(i, _)| i < 600));
    }

    #[test]
    fn evaluation_is_repeatable() {
        let closes: Vec<f64> = (0..300).map(|i| 50.0 + ((i % 37) as f64) * 0.7).collect();
        let strategy = MACrossover::golden_cross();
        assert_eq!(strategy.evaluate(&closes), strategy.evaluate(&closes));
    }
}
