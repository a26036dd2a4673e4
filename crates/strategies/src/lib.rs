// In crates/strategies/src/lib.rs

pub mod error;
pub mod ma_crossover;
pub mod types;

pub use error::{Error, Result};
pub use ma_crossover::MACrossover;
pub use types::{MACrossoverSettings, Marker, SignalSeries};

/// The universal interface for a signal-generating strategy.
///
/// A strategy reads an ordered run of closing prices and produces an
/// index-aligned `SignalSeries`. Implementations hold configuration only, so
/// evaluating the same closes twice yields the same output.
pub trait Strategy {
    /// The name of the strategy.
    fn name(&self) -> &'static str;

    fn evaluate(&self, closes: &[f64]) -> SignalSeries;
}
