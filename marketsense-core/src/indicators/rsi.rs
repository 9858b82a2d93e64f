//! Relative Strength Index (RSI), simple-average variant.
//!
//! Average gain and average loss are plain rolling means over the last
//! `period` close-to-close changes (no Wilder smoothing).
//! RSI = 100 - 100 / (1 + avg_gain / avg_loss)
//! Lookback: period (needs period + 1 closes).
//! Edge cases: avg_loss == 0 → RSI = 100; avg_gain == 0 → RSI = 0; both → 50.
//! A window with no gains (or no losses) averages to exactly zero, see
//! [`RollingMean`]; the general case is clamped to [0, 100].

use super::{Indicator, RollingMean};
use crate::domain::PricePoint;

#[derive(Debug, Clone)]
pub struct Rsi {
    period: usize,
    name: String,
}

impl Rsi {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "RSI period must be >= 1");
        Self {
            period,
            name: format!("rsi_{period}"),
        }
    }
}

impl Indicator for Rsi {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period
    }

    fn compute(&self, points: &[PricePoint]) -> Vec<f64> {
        let mut result = vec![f64::NAN; points.len()];
        let mut gains = RollingMean::new(self.period);
        let mut losses = RollingMean::new(self.period);

        for (i, pair) in points.windows(2).enumerate() {
            let change = pair[1].close - pair[0].close;
            let avg_gain = gains.push(change.max(0.0));
            let avg_loss = losses.push((-change).max(0.0));
            if let (Some(g), Some(l)) = (avg_gain, avg_loss) {
                result[i + 1] = compute_rsi(g, l);
            }
        }

        result
    }
}

fn compute_rsi(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 && avg_gain == 0.0 {
        50.0 // no movement
    } else if avg_loss == 0.0 {
        100.0
    } else if avg_gain == 0.0 {
        0.0
    } else {
        (100.0 - 100.0 / (1.0 + avg_gain / avg_loss)).clamp(0.0, 100.0)
    }
}
