//! Contract-violation errors raised by the engines.

use chrono::NaiveDate;
use thiserror::Error;

/// Input rejected by the indicator or forecast engine.
///
/// Insufficient history is never an error (the affected indicator is `None`);
/// only violations of the call contract end up here.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidInputError {
    #[error("price series is empty")]
    EmptySeries,

    #[error("forecast horizon must be positive, got {days}")]
    NonPositiveHorizon { days: usize },

    #[error("forecasting {days} days past {last} leaves the supported date range")]
    HorizonOutOfRange { last: NaiveDate, days: usize },

    #[error("invalid indicator config: {0}")]
    InvalidConfig(String),
}
