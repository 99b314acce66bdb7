use std::fmt::{Debug, Display};

use serde::{Deserialize, Serialize};

use crate::{MaxProfitError, Ohlcv, Price, PriceSource, Timestamp};

/// Configuration for the max-profit scan.
///
/// Selects which bar price a position is opened at and which it is closed
/// at. The default buys at each bar's low and sells at each bar's high,
/// which captures the best round trip achievable within the bars rather
/// than only close-to-close.
///
/// # Example
///
/// ```rust
/// use candle_scan::{MaxProfitConfig, PriceSource};
///
/// let config = MaxProfitConfig::intrabar();
/// assert_eq!(config.buy(), PriceSource::Low);
/// assert_eq!(config.sell(), PriceSource::High);
///
/// let custom = MaxProfitConfig::builder()
///     .buy(PriceSource::Open)
///     .sell(PriceSource::Close)
///     .build();
/// assert_eq!(custom.to_string(), "MaxProfitConfig(Open, Close)");
/// ```
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug, Serialize, Deserialize)]
pub struct MaxProfitConfig {
    buy: PriceSource,
    sell: PriceSource,
}

impl MaxProfitConfig {
    /// Returns a new builder with intrabar defaults.
    #[must_use]
    pub fn builder() -> MaxProfitConfigBuilder {
        MaxProfitConfigBuilder::new()
    }

    /// Buy at the bar low, sell at the bar high.
    #[must_use]
    pub fn intrabar() -> Self {
        Self::builder().build()
    }

    /// Buy and sell at closing prices.
    #[must_use]
    pub fn close() -> Self {
        Self::builder()
            .buy(PriceSource::Close)
            .sell(PriceSource::Close)
            .build()
    }

    /// Price source for the buy leg.
    #[inline]
    #[must_use]
    pub fn buy(&self) -> PriceSource {
        self.buy
    }

    /// Price source for the sell leg.
    #[inline]
    #[must_use]
    pub fn sell(&self) -> PriceSource {
        self.sell
    }
}

impl Default for MaxProfitConfig {
    fn default() -> Self {
        Self::intrabar()
    }
}

impl Display for MaxProfitConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "MaxProfitConfig({}, {})", self.buy, self.sell)
    }
}

/// Builder for [`MaxProfitConfig`].
///
/// Defaults: buy = [`PriceSource::Low`], sell = [`PriceSource::High`].
pub struct MaxProfitConfigBuilder {
    buy: PriceSource,
    sell: PriceSource,
}

impl MaxProfitConfigBuilder {
    fn new() -> Self {
        Self {
            buy: PriceSource::Low,
            sell: PriceSource::High,
        }
    }

    /// Sets the buy-leg price source.
    #[must_use]
    pub fn buy(mut self, source: PriceSource) -> Self {
        self.buy = source;
        self
    }

    /// Sets the sell-leg price source.
    #[must_use]
    pub fn sell(mut self, source: PriceSource) -> Self {
        self.sell = source;
        self
    }

    /// Builds the config.
    #[must_use]
    pub fn build(self) -> MaxProfitConfig {
        MaxProfitConfig {
            buy: self.buy,
            sell: self.sell,
        }
    }
}

/// Best buy-then-sell window found by a scan.
///
/// Always profitable: `profit > 0` and `sell_time >= buy_time`. Buy and
/// sell may fall on the same bar when that bar's own range is the best
/// opportunity.
///
/// Deserialization re-checks these guarantees and recomputes
/// `return_percent` from the prices.
#[derive(PartialEq, Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(try_from = "RawMaxProfit")]
pub struct MaxProfit {
    buy_price: Price,
    buy_time: Timestamp,
    sell_price: Price,
    sell_time: Timestamp,
    profit: Price,
    return_percent: f64,
}

impl MaxProfit {
    fn new(buy: Point, sell: Point) -> Self {
        let profit = sell.price - buy.price;
        let return_percent = if buy.price == 0.0 {
            0.0
        } else {
            profit / buy.price * 100.0
        };

        Self {
            buy_price: buy.price,
            buy_time: buy.time,
            sell_price: sell.price,
            sell_time: sell.time,
            profit,
            return_percent,
        }
    }

    #[inline]
    #[must_use]
    pub fn buy_price(&self) -> Price {
        self.buy_price
    }

    #[inline]
    #[must_use]
    pub fn buy_time(&self) -> Timestamp {
        self.buy_time
    }

    #[inline]
    #[must_use]
    pub fn sell_price(&self) -> Price {
        self.sell_price
    }

    #[inline]
    #[must_use]
    pub fn sell_time(&self) -> Timestamp {
        self.sell_time
    }

    /// `sell_price - buy_price`.
    #[inline]
    #[must_use]
    pub fn profit(&self) -> Price {
        self.profit
    }

    /// `profit / buy_price * 100`, or `0` when the buy price is zero.
    #[inline]
    #[must_use]
    pub fn return_percent(&self) -> f64 {
        self.return_percent
    }
}

/// Wire form of [`MaxProfit`] before validation. A serialized
/// `return_percent` is ignored.
#[derive(Deserialize)]
struct RawMaxProfit {
    buy_price: Price,
    buy_time: Timestamp,
    sell_price: Price,
    sell_time: Timestamp,
    profit: Price,
}

impl TryFrom<RawMaxProfit> for MaxProfit {
    type Error = MaxProfitError;

    fn try_from(raw: RawMaxProfit) -> Result<Self, Self::Error> {
        if raw.profit.is_nan() || raw.profit <= 0.0 {
            return Err(MaxProfitError::NotProfitable(raw.profit));
        }
        if raw.sell_time < raw.buy_time {
            return Err(MaxProfitError::SellBeforeBuy {
                buy_time: raw.buy_time,
                sell_time: raw.sell_time,
            });
        }
        #[allow(clippy::float_cmp)]
        let consistent = raw.profit == raw.sell_price - raw.buy_price;
        if !consistent {
            return Err(MaxProfitError::ProfitMismatch {
                profit: raw.profit,
                buy_price: raw.buy_price,
                sell_price: raw.sell_price,
            });
        }

        Ok(Self::new(
            Point {
                price: raw.buy_price,
                time: raw.buy_time,
            },
            Point {
                price: raw.sell_price,
                time: raw.sell_time,
            },
        ))
    }
}

impl Display for MaxProfit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "MaxProfit(buy={}@{}, sell={}@{}, profit={}, return={:.2}%)",
            self.buy_price,
            self.buy_time,
            self.sell_price,
            self.sell_time,
            self.profit,
            self.return_percent
        )
    }
}

#[derive(Clone, Copy, Debug)]
struct Point {
    price: Price,
    time: Timestamp,
}

/// Running state of the forward pass.
#[derive(Clone, Copy, Debug, Default)]
struct ScanState {
    bars: usize,
    min: Option<Point>,
    best: Option<(Point, Point)>,
    best_profit: Price,
}

impl ScanState {
    /// Folds one bar into the state. Returns `true` when the bar produced a
    /// new best window.
    #[inline]
    fn advance(&mut self, config: &MaxProfitConfig, ohlcv: &impl Ohlcv) -> bool {
        let time = ohlcv.time();
        let buy = config.buy.extract(ohlcv);

        self.bars += 1;

        // The bar's own buy price may be the new minimum before its sell
        // price is evaluated, so a window can open and close on one bar.
        let new_min = match self.min {
            Some(min) => buy < min.price,
            None => !buy.is_nan(),
        };
        if new_min {
            self.min = Some(Point { price: buy, time });
        }

        let Some(min) = self.min else {
            return false;
        };

        let sell = config.sell.extract(ohlcv);
        let candidate = sell - min.price;

        if candidate > self.best_profit {
            self.best_profit = candidate;
            self.best = Some((min, Point { price: sell, time }));
            return true;
        }

        false
    }

    #[inline]
    fn result(&self) -> Option<MaxProfit> {
        if self.bars < 2 {
            return None;
        }
        self.best.map(|(buy, sell)| MaxProfit::new(buy, sell))
    }
}

/// Scans `candles` for the most profitable buy-then-sell window using the
/// intrabar config (buy at low, sell at high).
///
/// Runs in a single forward pass with constant extra memory. Returns `None`
/// for fewer than two candles or when no later (or same-bar) high exceeds
/// an earlier low.
///
/// When several windows tie on profit, the one with the earliest sell
/// time is reported, bought at the earliest bar holding the minimum low up
/// to that point.
///
/// Input is expected in ascending time order. OHLC invariants are not
/// checked here; see [`CandleSeries::new`](crate::CandleSeries::new).
///
/// # Example
///
/// ```rust
/// use candle_scan::{Candle, max_profit};
///
/// let candles = [
///     Candle::new(0, 11.0, 12.0, 10.0, 11.0).unwrap(),
///     Candle::new(1, 9.0, 9.0, 8.0, 8.5).unwrap(),
///     Candle::new(2, 9.0, 20.0, 8.0, 19.0).unwrap(),
///     Candle::new(3, 15.5, 16.0, 15.0, 15.5).unwrap(),
/// ];
///
/// let best = max_profit(&candles).unwrap();
/// assert_eq!(best.buy_price(), 8.0);
/// assert_eq!(best.sell_price(), 20.0);
/// assert_eq!(best.sell_time(), 2);
/// assert_eq!(best.return_percent(), 150.0);
/// ```
#[must_use]
pub fn max_profit<C: Ohlcv>(candles: &[C]) -> Option<MaxProfit> {
    max_profit_with(candles, &MaxProfitConfig::intrabar())
}

/// [`max_profit`] with explicit buy/sell price sources.
#[must_use]
pub fn max_profit_with<C: Ohlcv>(candles: &[C], config: &MaxProfitConfig) -> Option<MaxProfit> {
    if candles.len() < 2 {
        return None;
    }

    let mut state = ScanState::default();
    for candle in candles {
        state.advance(config, candle);
    }

    state.result()
}

/// Streaming max-profit scan.
///
/// Feed bars one at a time with [`compute`](Self::compute); the result is
/// always the best window over everything fed so far. A bar carrying the
/// same timestamp as the previous one repaints it: its contribution is
/// replaced rather than added, so a still-forming bar can be updated on
/// every tick.
///
/// After feeding a chronological slice bar by bar, [`value`](Self::value)
/// equals [`max_profit_with`] on that slice.
///
/// # Example
///
/// ```rust
/// use candle_scan::{Candle, MaxProfitConfig, MaxProfitScanner};
///
/// let mut scanner = MaxProfitScanner::new(MaxProfitConfig::intrabar());
///
/// let first = Candle::new(1, 10.0, 10.0, 10.0, 10.0).unwrap();
/// assert!(scanner.compute(&first).is_none());
///
/// // Live tick of bar 2, then its final state.
/// let tick = Candle::new(2, 10.0, 12.0, 10.0, 12.0).unwrap();
/// assert_eq!(scanner.compute(&tick).unwrap().profit(), 2.0);
/// let closed = Candle::new(2, 10.0, 11.0, 10.0, 11.0).unwrap();
/// assert_eq!(scanner.compute(&closed).unwrap().profit(), 1.0);
/// ```
#[derive(Clone, Debug)]
pub struct MaxProfitScanner {
    config: MaxProfitConfig,
    /// State before the current (possibly still-forming) bar.
    committed: ScanState,
    current: ScanState,
    last_time: Option<Timestamp>,
    value: Option<MaxProfit>,
}

impl MaxProfitScanner {
    /// Creates an empty scanner with the given price sources.
    #[must_use]
    pub fn new(config: MaxProfitConfig) -> Self {
        Self {
            config,
            committed: ScanState::default(),
            current: ScanState::default(),
            last_time: None,
            value: None,
        }
    }

    /// Feeds a bar and returns the best window so far.
    ///
    /// # Panics
    ///
    /// In debug builds, panics if `time` decreases between calls.
    pub fn compute(&mut self, kline: &impl Ohlcv) -> Option<MaxProfit> {
        let time = kline.time();

        debug_assert!(
            self.last_time.is_none_or(|t| t <= time),
            "time must be non-decreasing: last={}, got={}",
            self.last_time.unwrap_or(0),
            time,
        );

        if self.last_time.is_none_or(|t| t < time) {
            self.committed = self.current;
            self.last_time = Some(time);
        }

        self.current = self.committed;
        if self.current.advance(&self.config, kline) {
            tracing::trace!(
                time,
                profit = self.current.best_profit,
                "max-profit window extended"
            );
        }

        self.value = self.current.result();
        self.value
    }

    /// Last computed result, without advancing state.
    #[inline]
    #[must_use]
    pub fn value(&self) -> Option<MaxProfit> {
        self.value
    }

    /// Price sources this scanner was created with.
    #[inline]
    #[must_use]
    pub fn config(&self) -> &MaxProfitConfig {
        &self.config
    }

    /// Forgets every bar fed so far, e.g. when the visible range is
    /// replaced.
    pub fn reset(&mut self) {
        *self = Self::new(self.config);
    }
}

impl Display for MaxProfitScanner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "MaxProfitScanner({}, {})", self.config.buy, self.config.sell)
    }
}
