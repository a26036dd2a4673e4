// In crates/strategies/src/types.rs

use serde::{Deserialize, Serialize};

/// Window lengths for the moving average crossover.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct MACrossoverSettings {
    pub fast_period: usize,
    pub slow_period: usize,
}

impl Default for MACrossoverSettings {
    fn default() -> Self {
        Self {
            fast_period: crate::ma_crossover::FAST_WINDOW,
            slow_period: crate::ma_crossover::SLOW_WINDOW,
        }
    }
}

/// A regime change worth drawing on a chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Marker {
    /// The fast average moved above the slow one.
    Buy,
    /// The fast average fell back to or below the slow one.
    Sell,
}

impl Marker {
    /// Maps a position value (+1 / -1) to its marker; anything else is no event.
    pub fn from_position(position: Option<i8>) -> Option<Self> {
        match position {
            Some(1) => Some(Marker::Buy),
            Some(-1) => Some(Marker::Sell),
            _ => None,
        }
    }
}

/// Per-bar output of a crossover evaluation, index-aligned with the input closes.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct SignalSeries {
    /// Fast simple moving average; `None` until a full window is available.
    pub fast_ma: Vec<Option<f64>>,
    /// Slow simple moving average; `None` until a full window is available.
    pub slow_ma: Vec<Option<f64>>,
    /// 1 while the fast average is above the slow one, else 0.
    pub signal: Vec<u8>,
    /// `signal[i] - signal[i - 1]`; `None` for the first bar.
    pub position: Vec<Option<i8>>,
}

impl SignalSeries {
    pub fn len(&self) -> usize {
        self.signal.len()
    }

    pub fn is_empty(&self) -> bool {
        self.signal.is_empty()
    }

    /// Indices where the regime flipped, tagged with the direction.
    pub fn markers(&self) -> impl Iterator<Item = (usize, Marker)> + '_ {
        self.position
            .iter()
            .enumerate()
            .filter_map(|(i, &p)| Marker::from_position(p).map(|m| (i, m)))
    }
}
