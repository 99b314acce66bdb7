use crate::{CandleError, Ohlcv, Price, Timestamp, error::Field};

use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// One immutable OHLC sample.
///
/// Constructed through [`Candle::new`], which enforces finite positive
/// prices with `low <= open, close <= high`. Deserialized candles skip that
/// check until they are collected into a
/// [`CandleSeries`](crate::CandleSeries).
///
/// # Example
///
/// ```
/// use candle_scan::{Candle, Ohlcv};
///
/// let candle = Candle::new(1_700_000_000, 101.0, 105.0, 99.5, 104.0).unwrap();
/// assert_eq!(candle.high(), 105.0);
///
/// assert!(Candle::new(1_700_000_000, 101.0, 99.0, 100.0, 100.0).is_err());
/// ```
#[derive(PartialEq, Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Candle {
    time: Timestamp,
    open: Price,
    high: Price,
    low: Price,
    close: Price,
    #[serde(default)]
    volume: f64,
}

impl Candle {
    /// Builds a validated candle with zero volume.
    ///
    /// # Errors
    ///
    /// Returns [`CandleError`] when a price is not finite or not positive,
    /// when `low > high`, or when `open`/`close` fall outside `[low, high]`.
    pub fn new(
        time: Timestamp,
        open: Price,
        high: Price,
        low: Price,
        close: Price,
    ) -> Result<Self, CandleError> {
        let candle = Self {
            time,
            open,
            high,
            low,
            close,
            volume: 0.0,
        };
        candle.validate()?;
        Ok(candle)
    }

    /// Returns a copy carrying the given volume.
    ///
    /// # Errors
    ///
    /// Returns [`CandleError`] when `volume` is not finite or negative.
    pub fn with_volume(mut self, volume: f64) -> Result<Self, CandleError> {
        self.volume = volume;
        self.validate()?;
        Ok(self)
    }

    /// Returns a copy with every price multiplied by `factor`.
    ///
    /// Volume is left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`CandleError`] when the scaled prices are no longer valid,
    /// e.g. for a non-positive or non-finite `factor`.
    pub fn scaled(self, factor: f64) -> Result<Self, CandleError> {
        let scaled = Self {
            open: self.open * factor,
            high: self.high * factor,
            low: self.low * factor,
            close: self.close * factor,
            ..self
        };
        scaled.validate()?;
        Ok(scaled)
    }

    pub(crate) fn validate(&self) -> Result<(), CandleError> {
        let time = self.time;

        for (field, value) in [
            (Field::Open, self.open),
            (Field::High, self.high),
            (Field::Low, self.low),
            (Field::Close, self.close),
        ] {
            if !value.is_finite() {
                return Err(CandleError::NonFinite { time, field });
            }
            if value <= 0.0 {
                return Err(CandleError::NonPositive { time, field, value });
            }
        }

        if self.low > self.high {
            return Err(CandleError::InvertedRange {
                time,
                low: self.low,
                high: self.high,
            });
        }

        for (field, value) in [(Field::Open, self.open), (Field::Close, self.close)] {
            if value < self.low || value > self.high {
                return Err(CandleError::OutOfRange {
                    time,
                    field,
                    value,
                    low: self.low,
                    high: self.high,
                });
            }
        }

        if !self.volume.is_finite() {
            return Err(CandleError::NonFinite {
                time,
                field: Field::Volume,
            });
        }
        if self.volume < 0.0 {
            return Err(CandleError::InvalidVolume {
                time,
                value: self.volume,
            });
        }

        Ok(())
    }
}

impl Ohlcv for Candle {
    #[inline]
    fn open(&self) -> Price {
        self.open
    }

    #[inline]
    fn high(&self) -> Price {
        self.high
    }

    #[inline]
    fn low(&self) -> Price {
        self.low
    }

    #[inline]
    fn close(&self) -> Price {
        self.close
    }

    #[inline]
    fn time(&self) -> Timestamp {
        self.time
    }

    #[inline]
    fn volume(&self) -> f64 {
        self.volume
    }
}

impl Display for Candle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Candle(t={}, o={}, h={}, l={}, c={})",
            self.time, self.open, self.high, self.low, self.close
        )
    }
}
