use crate::{Price, Timestamp};

use std::fmt::Display;

/// Names one of a candle's numeric fields in a [`CandleError`].
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub enum Field {
    Open,
    High,
    Low,
    Close,
    Volume,
}

impl Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Open => "open",
            Self::High => "high",
            Self::Low => "low",
            Self::Close => "close",
            Self::Volume => "volume",
        };
        f.write_str(name)
    }
}

/// Rejection reasons for malformed candles and series.
///
/// Raised by [`Candle::new`](crate::Candle::new) and
/// [`CandleSeries::new`](crate::CandleSeries::new). The scanners themselves
/// never return errors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CandleError {
    /// A price or the volume is NaN or infinite.
    #[error("candle at t={time}: {field} is not finite")]
    NonFinite { time: Timestamp, field: Field },

    /// A price is zero or negative.
    #[error("candle at t={time}: {field} must be positive, got {value}")]
    NonPositive {
        time: Timestamp,
        field: Field,
        value: Price,
    },

    /// `low` is above `high`.
    #[error("candle at t={time}: low {low} is above high {high}")]
    InvertedRange {
        time: Timestamp,
        low: Price,
        high: Price,
    },

    /// `open` or `close` lies outside `[low, high]`.
    #[error("candle at t={time}: {field} {value} outside [{low}, {high}]")]
    OutOfRange {
        time: Timestamp,
        field: Field,
        value: Price,
        low: Price,
        high: Price,
    },

    /// Volume is negative.
    #[error("candle at t={time}: volume must not be negative, got {value}")]
    InvalidVolume { time: Timestamp, value: f64 },

    /// Timestamps are not strictly increasing.
    #[error("candle #{index} at t={time} does not follow previous t={previous}")]
    NotIncreasing {
        index: usize,
        previous: Timestamp,
        time: Timestamp,
    },
}

/// Rejection reasons for a deserialized [`MaxProfit`](crate::MaxProfit).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MaxProfitError {
    /// The window does not gain.
    #[error("profit must be positive, got {0}")]
    NotProfitable(Price),

    /// The sell leg precedes the buy leg.
    #[error("sell at t={sell_time} precedes buy at t={buy_time}")]
    SellBeforeBuy {
        buy_time: Timestamp,
        sell_time: Timestamp,
    },

    /// `profit` disagrees with `sell_price - buy_price`.
    #[error("profit {profit} does not equal sell {sell_price} - buy {buy_price}")]
    ProfitMismatch {
        profit: Price,
        buy_price: Price,
        sell_price: Price,
    },
}
