//! Alpha Vantage payload parsers: `TIME_SERIES_DAILY` history and the
//! `GLOBAL_QUOTE` + `OVERVIEW` quote snapshot.
//!
//! The provider keys each day by its ISO date and sends every number as a
//! string. Errors and throttling notices arrive with HTTP 200 and a
//! different top-level key, so they are detected from the body.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::str::FromStr;

use super::{canonicalize, DataError};
use crate::domain::PricePoint;

#[derive(Debug, Deserialize)]
struct DailyResponse {
    #[serde(rename = "Meta Data")]
    meta: Option<MetaData>,
    #[serde(rename = "Time Series (Daily)")]
    series: Option<BTreeMap<String, DailyValues>>,
    #[serde(rename = "Error Message")]
    error_message: Option<String>,
    #[serde(rename = "Note")]
    note: Option<String>,
    #[serde(rename = "Information")]
    information: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MetaData {
    #[serde(rename = "2. Symbol")]
    symbol: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DailyValues {
    #[serde(rename = "1. open")]
    open: String,
    #[serde(rename = "2. high")]
    high: String,
    #[serde(rename = "3. low")]
    low: String,
    #[serde(rename = "4. close")]
    close: String,
    #[serde(rename = "5. volume")]
    volume: String,
}

#[derive(Debug, Deserialize)]
struct QuoteResponse {
    #[serde(rename = "Global Quote")]
    quote: Option<BTreeMap<String, String>>,
    #[serde(rename = "Error Message")]
    error_message: Option<String>,
    #[serde(rename = "Note")]
    note: Option<String>,
    #[serde(rename = "Information")]
    information: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct OverviewResponse {
    #[serde(rename = "Name")]
    name: Option<String>,
    #[serde(rename = "MarketCapitalization")]
    market_cap: Option<String>,
}

/// Latest quote for one symbol, joined with its company overview.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockQuote {
    pub symbol: String,
    pub company_name: String,
    pub current_price: f64,
    /// Percent change on the previous close, without the `%` sign.
    pub change_percent: f64,
    pub volume: u64,
    pub market_cap: f64,
    pub latest_trading_day: Option<NaiveDate>,
}

/// A parsed payload: the symbol from the metadata block (if any) and the
/// canonical series.
#[derive(Debug, Clone, PartialEq)]
pub struct DailySeries {
    pub symbol: Option<String>,
    pub points: Vec<PricePoint>,
}

/// Parse a `TIME_SERIES_DAILY` JSON body into an ascending series.
pub fn parse_daily(json: &str) -> Result<DailySeries, DataError> {
    let resp: DailyResponse = serde_json::from_str(json)?;

    if let Some(message) = resp.error_message {
        return Err(DataError::Provider(message));
    }
    let series = match resp.series {
        Some(series) if !series.is_empty() => series,
        _ => {
            return Err(match resp.note.or(resp.information) {
                Some(notice) => DataError::Throttled(notice),
                None => DataError::NoData,
            })
        }
    };

    let points = series
        .into_iter()
        .map(|(date, values)| to_point(&date, &values))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(DailySeries {
        symbol: resp.meta.and_then(|m| m.symbol),
        points: canonicalize(points).points,
    })
}

/// Read and parse a saved payload from disk.
pub fn load_daily(path: &Path) -> Result<DailySeries, DataError> {
    parse_daily(&read_payload(path)?)
}

/// Parse a `GLOBAL_QUOTE` body, optionally joined with an `OVERVIEW` body.
///
/// An empty or absent quote block is [`DataError::NoData`]. Fields the
/// provider omits (or reports as `"None"`) take their defaults: company name
/// `"Unknown"`, numbers zero. The overview is best effort; a body without the
/// expected keys only leaves the defaults in place.
pub fn parse_quote(
    quote_json: &str,
    overview_json: Option<&str>,
) -> Result<StockQuote, DataError> {
    let resp: QuoteResponse = serde_json::from_str(quote_json)?;

    if let Some(message) = resp.error_message {
        return Err(DataError::Provider(message));
    }
    let quote = match resp.quote {
        Some(quote) if !quote.is_empty() => quote,
        _ => {
            return Err(match resp.note.or(resp.information) {
                Some(notice) => DataError::Throttled(notice),
                None => DataError::NoData,
            })
        }
    };
    let overview: OverviewResponse = match overview_json {
        Some(json) => serde_json::from_str(json)?,
        None => OverviewResponse::default(),
    };

    let field = |key: &str| quote.get(key).map(String::as_str);
    let change = field("10. change percent").map(|v| v.trim().trim_end_matches('%'));

    Ok(StockQuote {
        symbol: field("01. symbol").unwrap_or("UNKNOWN").to_string(),
        company_name: overview.name.unwrap_or_else(|| "Unknown".to_string()),
        current_price: parse_or_default("price", field("05. price"))?,
        change_percent: parse_or_default("change percent", change)?,
        volume: parse_or_default("volume", field("06. volume"))?,
        market_cap: parse_or_default("market cap", overview.market_cap.as_deref())?,
        latest_trading_day: field("07. latest trading day").map(parse_date).transpose()?,
    })
}

/// Read and parse a saved quote payload and, if given, its overview payload.
pub fn load_quote(
    quote_path: &Path,
    overview_path: Option<&Path>,
) -> Result<StockQuote, DataError> {
    let quote = read_payload(quote_path)?;
    let overview = overview_path.map(read_payload).transpose()?;
    parse_quote(&quote, overview.as_deref())
}

fn read_payload(path: &Path) -> Result<String, DataError> {
    std::fs::read_to_string(path).map_err(|source| DataError::Io {
        path: path.display().to_string(),
        source,
    })
}

fn parse_date(raw: &str) -> Result<NaiveDate, DataError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| DataError::Parse {
        field: "date",
        value: raw.to_string(),
    })
}

fn parse_or_default<T: FromStr + Default>(
    field: &'static str,
    raw: Option<&str>,
) -> Result<T, DataError> {
    match raw.map(str::trim) {
        None | Some("") | Some("None") => Ok(T::default()),
        Some(value) => value.parse().map_err(|_| DataError::Parse {
            field,
            value: value.to_string(),
        }),
    }
}

fn to_point(date: &str, values: &DailyValues) -> Result<PricePoint, DataError> {
    Ok(PricePoint {
        date: parse_date(date)?,
        open: parse_price("open", &values.open)?,
        high: parse_price("high", &values.high)?,
        low: parse_price("low", &values.low)?,
        close: parse_price("close", &values.close)?,
        volume: values
            .volume
            .trim()
            .parse()
            .map_err(|_| DataError::Parse {
                field: "volume",
                value: values.volume.clone(),
            })?,
    })
}

fn parse_price(field: &'static str, raw: &str) -> Result<f64, DataError> {
    raw.trim().parse().map_err(|_| DataError::Parse {
        field,
        value: raw.to_string(),
    })
}
