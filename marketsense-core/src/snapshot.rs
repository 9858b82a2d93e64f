//! Indicator engine: a snapshot of the market state at the last point.
//!
//! Each indicator is computed over the whole series and read at the final
//! index. Indicators without enough history are `None`; the snapshot is still
//! produced. Classification against a missing indicator falls back to the
//! conservative label (`Bearish`, `Neutral`, `Sell`).

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::IndicatorConfig;
use crate::domain::PricePoint;
use crate::error::InvalidInputError;
use crate::indicators::{Indicator, Macd, Rsi, Sma};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Trend {
    Bullish,
    Bearish,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RsiSignal {
    Oversold,
    Neutral,
    Overbought,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MacdSignal {
    Buy,
    Sell,
}

/// Indicator values and their qualitative reading for the last point.
///
/// `ma20` holds the configured moving average; the name reflects the default
/// 20-day window and is the key used on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSnapshot {
    pub ma20: Option<f64>,
    pub rsi: Option<f64>,
    pub macd: Option<f64>,
    pub signal_line: Option<f64>,
    pub trend: Trend,
    pub rsi_signal: RsiSignal,
    pub macd_signal: MacdSignal,
}

/// Compute the snapshot with the default periods (MA20, RSI14, MACD 12/26/9).
///
/// # Precondition
/// `series` is sorted ascending by date with unique dates. It is not re-sorted.
pub fn compute_indicators(series: &[PricePoint]) -> Result<IndicatorSnapshot, InvalidInputError> {
    compute_indicators_with(series, &IndicatorConfig::default())
}

/// Compute the snapshot with explicit periods and RSI thresholds.
///
/// `config` is validated first; a zero period or inverted thresholds return
/// [`InvalidInputError::InvalidConfig`].
pub fn compute_indicators_with(
    series: &[PricePoint],
    config: &IndicatorConfig,
) -> Result<IndicatorSnapshot, InvalidInputError> {
    config
        .validate()
        .map_err(|e| InvalidInputError::InvalidConfig(e.to_string()))?;
    let last = series.last().ok_or(InvalidInputError::EmptySeries)?;
    debug!(points = series.len(), last_date = %last.date, "computing indicators");

    let ma = Sma::new(config.ma_period).latest(series);
    let rsi = Rsi::new(config.rsi_period).latest(series);
    let (macd, signal_line) = latest_macd(series, config);

    Ok(IndicatorSnapshot {
        ma20: ma,
        rsi,
        macd,
        signal_line,
        trend: classify_trend(last.close, ma),
        rsi_signal: classify_rsi(rsi, config.rsi_oversold, config.rsi_overbought),
        macd_signal: classify_macd(macd, signal_line),
    })
}

fn latest_macd(series: &[PricePoint], config: &IndicatorConfig) -> (Option<f64>, Option<f64>) {
    let macd = Macd::macd(config.macd_fast, config.macd_slow, config.macd_signal);
    if series.len() <= macd.lookback() {
        return (None, None);
    }
    let (macd_line, signal_line) = macd.compute_lines(series);
    let finite = |v: Option<&f64>| v.copied().filter(|x| !x.is_nan());
    (finite(macd_line.last()), finite(signal_line.last()))
}

/// `Bullish` iff close is strictly above the moving average.
pub fn classify_trend(close: f64, ma: Option<f64>) -> Trend {
    match ma {
        Some(ma) if close > ma => Trend::Bullish,
        _ => Trend::Bearish,
    }
}

pub fn classify_rsi(rsi: Option<f64>, oversold: f64, overbought: f64) -> RsiSignal {
    match rsi {
        Some(v) if v < oversold => RsiSignal::Oversold,
        Some(v) if v > overbought => RsiSignal::Overbought,
        _ => RsiSignal::Neutral,
    }
}

/// `Buy` iff MACD is strictly above its signal line; ties are `Sell`.
pub fn classify_macd(macd: Option<f64>, signal_line: Option<f64>) -> MacdSignal {
    match (macd, signal_line) {
        (Some(m), Some(s)) if m > s => MacdSignal::Buy,
        _ => MacdSignal::Sell,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, make_points};

    fn linear(n: usize, start: f64, step: f64) -> Vec<f64> {
        (0..n).map(|i| start + step * i as f64).collect()
    }

    #[test]
    fn empty_series_is_rejected() {
        assert_eq!(compute_indicators(&[]), Err(InvalidInputError::EmptySeries));
    }

    #[test]
    fn single_point_degrades_every_indicator() {
        let snapshot = compute_indicators(&make_points(&[100.0])).unwrap();
        assert_eq!(snapshot.ma20, None);
        assert_eq!(snapshot.rsi, None);
        assert_eq!(snapshot.macd, None);
        assert_eq!(snapshot.signal_line, None);
        assert_eq!(snapshot.trend, Trend::Bearish);
        assert_eq!(snapshot.rsi_signal, RsiSignal::Neutral);
        assert_eq!(snapshot.macd_signal, MacdSignal::Sell);
    }

    #[test]
    fn short_series_keeps_macd_but_not_ma() {
        let snapshot = compute_indicators(&make_points(&linear(16, 100.0, 1.0))).unwrap();
        assert_eq!(snapshot.ma20, None);
        assert_eq!(snapshot.rsi, Some(100.0));
        assert!(snapshot.macd.is_some());
        assert!(snapshot.signal_line.is_some());
    }

    #[test]
    fn rising_25_day_series() {
        let snapshot = compute_indicators(&make_points(&linear(25, 100.0, 1.0))).unwrap();
        // last 20 closes are 105..=124
        assert_approx(snapshot.ma20.unwrap(), 114.5, 1e-9);
        assert_eq!(snapshot.trend, Trend::Bullish);
        assert_eq!(snapshot.rsi, Some(100.0));
        assert_eq!(snapshot.rsi_signal, RsiSignal::Overbought);
        assert_eq!(snapshot.macd_signal, MacdSignal::Buy);
    }

    #[test]
    fn falling_series_is_oversold_and_bearish() {
        let snapshot = compute_indicators(&make_points(&linear(30, 200.0, -2.0))).unwrap();
        assert_eq!(snapshot.rsi, Some(0.0));
        assert_eq!(snapshot.rsi_signal, RsiSignal::Oversold);
        assert_eq!(snapshot.trend, Trend::Bearish);
        assert_eq!(snapshot.macd_signal, MacdSignal::Sell);
    }

    #[test]
    fn flat_series_is_neutral_and_sell() {
        let snapshot = compute_indicators(&make_points(&[50.0; 30])).unwrap();
        assert_eq!(snapshot.rsi, Some(50.0));
        assert_eq!(snapshot.rsi_signal, RsiSignal::Neutral);
        // close == MA is not above it
        assert_eq!(snapshot.trend, Trend::Bearish);
        assert_approx(snapshot.macd.unwrap(), 0.0, 1e-9);
    }

    #[test]
    fn custom_periods_are_honoured() {
        let config = IndicatorConfig {
            ma_period: 3,
            rsi_period: 2,
            ..IndicatorConfig::default()
        };
        let snapshot =
            compute_indicators_with(&make_points(&[10.0, 11.0, 12.0, 13.0]), &config).unwrap();
        assert_approx(snapshot.ma20.unwrap(), 12.0, 1e-12);
        assert_eq!(snapshot.rsi, Some(100.0));
    }

    #[test]
    fn zero_period_config_is_an_error() {
        let config = IndicatorConfig {
            ma_period: 0,
            ..IndicatorConfig::default()
        };
        let err = compute_indicators_with(&make_points(&[1.0, 2.0]), &config).unwrap_err();
        assert!(matches!(err, InvalidInputError::InvalidConfig(ref m) if m.contains("ma_period")));

        let config = IndicatorConfig {
            macd_signal: 0,
            ..IndicatorConfig::default()
        };
        assert!(compute_indicators_with(&make_points(&[1.0]), &config).is_err());
    }

    #[test]
    fn rsi_thresholds_are_strict() {
        assert_eq!(classify_rsi(Some(30.0), 30.0, 70.0), RsiSignal::Neutral);
        assert_eq!(classify_rsi(Some(70.0), 30.0, 70.0), RsiSignal::Neutral);
        assert_eq!(classify_rsi(Some(29.9), 30.0, 70.0), RsiSignal::Oversold);
        assert_eq!(classify_rsi(Some(70.1), 30.0, 70.0), RsiSignal::Overbought);
    }

    #[test]
    fn macd_tie_is_sell() {
        assert_eq!(classify_macd(Some(1.0), Some(1.0)), MacdSignal::Sell);
        assert_eq!(classify_macd(Some(1.0), Some(0.5)), MacdSignal::Buy);
        assert_eq!(classify_macd(None, Some(0.5)), MacdSignal::Sell);
    }

    #[test]
    fn serializes_as_flat_mapping() {
        let snapshot = compute_indicators(&make_points(&[100.0])).unwrap();
        let json = serde_json::to_value(&snapshot).unwrap();
        let obj = json.as_object().unwrap();
        assert_eq!(obj.len(), 7);
        assert!(obj["ma20"].is_null());
        assert!(obj["signal_line"].is_null());
        assert_eq!(obj["trend"], "Bearish");
        assert_eq!(obj["rsi_signal"], "Neutral");
        assert_eq!(obj["macd_signal"], "Sell");
    }
}
