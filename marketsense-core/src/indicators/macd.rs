//! Moving Average Convergence/Divergence (MACD).
//!
//! Two lines (separate Indicator instances):
//! - MACD: EMA(close, fast) - EMA(close, slow)
//! - Signal: EMA(MACD, signal)
//!
//! All EMAs are seeded with the first value of their input (see `ema.rs`).
//! Lookback: 1. A single point has no convergence to measure, so index 0 is
//! always NaN even though the recurrences start there.

use super::{EmaState, Indicator};
use crate::domain::PricePoint;

/// Which MACD line to compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MacdLine {
    Macd,
    Signal,
}

#[derive(Debug, Clone)]
pub struct Macd {
    fast: usize,
    slow: usize,
    signal: usize,
    line: MacdLine,
    name: String,
}

impl Macd {
    pub fn macd(fast: usize, slow: usize, signal: usize) -> Self {
        Self::new(fast, slow, signal, MacdLine::Macd)
    }

    pub fn signal(fast: usize, slow: usize, signal: usize) -> Self {
        Self::new(fast, slow, signal, MacdLine::Signal)
    }

    fn new(fast: usize, slow: usize, signal: usize, line: MacdLine) -> Self {
        assert!(
            fast >= 1 && slow >= 1 && signal >= 1,
            "MACD spans must be >= 1"
        );
        let prefix = match line {
            MacdLine::Macd => "macd",
            MacdLine::Signal => "macd_signal",
        };
        Self {
            fast,
            slow,
            signal,
            line,
            name: format!("{prefix}_{fast}_{slow}_{signal}"),
        }
    }

    /// Compute both lines in one pass over the closes.
    pub fn compute_lines(&self, points: &[PricePoint]) -> (Vec<f64>, Vec<f64>) {
        let mut fast = EmaState::new(self.fast);
        let mut slow = EmaState::new(self.slow);
        let mut signal = EmaState::new(self.signal);

        let mut macd_line = Vec::with_capacity(points.len());
        let mut signal_line = Vec::with_capacity(points.len());
        for p in points {
            let macd = fast.push(p.close) - slow.push(p.close);
            macd_line.push(macd);
            signal_line.push(signal.push(macd));
        }

        if let Some(first) = macd_line.first_mut() {
            *first = f64::NAN;
        }
        if let Some(first) = signal_line.first_mut() {
            *first = f64::NAN;
        }
        (macd_line, signal_line)
    }
}

impl Indicator for Macd {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        1
    }

    fn compute(&self, points: &[PricePoint]) -> Vec<f64> {
        let (macd, signal) = self.compute_lines(points);
        match self.line {
            MacdLine::Macd => macd,
            MacdLine::Signal => signal,
        }
    }
}
