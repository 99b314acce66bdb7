use crate::{
    Candle, CandleError, MaxProfit, MaxProfitConfig, Ohlcv, Timestamp, max_profit::max_profit_with,
};

use std::ops::Deref;

/// Validated, chronologically ordered candles.
///
/// Every candle satisfies the OHLC invariants and timestamps are strictly
/// increasing. A series is never edited in place: when the data source
/// changes, build a new one.
///
/// # Example
///
/// ```
/// use candle_scan::{Candle, CandleSeries, MaxProfitConfig};
///
/// let series = CandleSeries::new(vec![
///     Candle::new(60, 10.0, 10.0, 10.0, 10.0).unwrap(),
///     Candle::new(120, 10.0, 14.0, 9.0, 13.0).unwrap(),
///     Candle::new(180, 8.5, 8.5, 7.0, 8.0).unwrap(),
///     Candle::new(240, 8.0, 9.0, 7.5, 9.0).unwrap(),
/// ])
/// .unwrap();
///
/// let config = MaxProfitConfig::intrabar();
/// assert_eq!(series.max_profit(&config).unwrap().profit(), 5.0);
///
/// // Visible range narrowed to the last two bars.
/// let visible = series.max_profit_between(180, 240, &config).unwrap();
/// assert_eq!(visible.buy_price(), 7.0);
/// assert_eq!(visible.profit(), 2.0);
/// ```
#[derive(PartialEq, Clone, Debug, Default)]
pub struct CandleSeries {
    candles: Vec<Candle>,
}

impl CandleSeries {
    /// Validates `candles` and wraps them into a series.
    ///
    /// # Errors
    ///
    /// Returns the first [`CandleError`] found: a malformed candle, or a
    /// timestamp not strictly greater than its predecessor's.
    pub fn new(candles: Vec<Candle>) -> Result<Self, CandleError> {
        let mut previous: Option<Timestamp> = None;

        for (index, candle) in candles.iter().enumerate() {
            if let Err(err) = candle.validate() {
                tracing::debug!(index, %err, "rejecting candle series");
                return Err(err);
            }

            let time = candle.time();
            if let Some(previous) = previous
                && time <= previous
            {
                let err = CandleError::NotIncreasing {
                    index,
                    previous,
                    time,
                };
                tracing::debug!(index, %err, "rejecting candle series");
                return Err(err);
            }
            previous = Some(time);
        }

        Ok(Self { candles })
    }

    /// Validates candles from any iterator, e.g. a deserializer.
    ///
    /// # Errors
    ///
    /// See [`CandleSeries::new`].
    pub fn from_candles(candles: impl IntoIterator<Item = Candle>) -> Result<Self, CandleError> {
        Self::new(candles.into_iter().collect())
    }

    /// Candles in chronological order.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[Candle] {
        &self.candles
    }

    /// Unwraps the series into its candles.
    #[must_use]
    pub fn into_inner(self) -> Vec<Candle> {
        self.candles
    }

    /// Candles with `from <= time <= to`.
    ///
    /// Located by binary search. An empty slice is returned when nothing
    /// falls inside the range or when `from > to`.
    #[must_use]
    pub fn visible(&self, from: Timestamp, to: Timestamp) -> &[Candle] {
        if from > to {
            return &[];
        }

        let start = self.candles.partition_point(|c| c.time() < from);
        let end = self.candles.partition_point(|c| c.time() <= to);

        &self.candles[start..end]
    }

    /// Best buy-then-sell window over the whole series.
    #[must_use]
    pub fn max_profit(&self, config: &MaxProfitConfig) -> Option<MaxProfit> {
        max_profit_with(&self.candles, config)
    }

    /// Best buy-then-sell window over the visible range `[from, to]`.
    #[must_use]
    pub fn max_profit_between(
        &self,
        from: Timestamp,
        to: Timestamp,
        config: &MaxProfitConfig,
    ) -> Option<MaxProfit> {
        max_profit_with(self.visible(from, to), config)
    }
}

impl Deref for CandleSeries {
    type Target = [Candle];

    #[inline]
    fn deref(&self) -> &[Candle] {
        &self.candles
    }
}

impl AsRef<[Candle]> for CandleSeries {
    fn as_ref(&self) -> &[Candle] {
        &self.candles
    }
}

impl TryFrom<Vec<Candle>> for CandleSeries {
    type Error = CandleError;

    fn try_from(candles: Vec<Candle>) -> Result<Self, Self::Error> {
        Self::new(candles)
    }
}

impl<'a> IntoIterator for &'a CandleSeries {
    type Item = &'a Candle;
    type IntoIter = std::slice::Iter<'a, Candle>;

    fn into_iter(self) -> Self::IntoIter {
        self.candles.iter()
    }
}
