//! Best buy/sell window scanning over OHLC candle series.
//!
//! [`max_profit`] finds the single long-only round trip (buy, then sell at
//! or after the buy bar) with the largest gain over a chronological slice
//! of bars, in one forward pass. By default the buy leg uses each bar's
//! low and the sell leg its high; [`MaxProfitConfig`] selects other
//! [`PriceSource`]s.
//!
//! Scanners accept any type implementing [`Ohlcv`]. Untrusted data should
//! enter through [`Candle::new`] and [`CandleSeries::new`], which reject
//! malformed candles and unordered timestamps; the scanners themselves
//! never validate. [`CandleSeries::visible`] slices out a chart's visible
//! range so the scan can be re-run on every pan or zoom.
//!
//! [`MaxProfitScanner`] runs the same scan incrementally, bar by bar, and
//! supports repainting the still-forming last bar.

mod candle;
mod error;
mod max_profit;
mod ohlcv;
mod price_source;
mod series;

pub use crate::candle::Candle;
pub use crate::error::{CandleError, Field, MaxProfitError};
pub use crate::max_profit::{
    MaxProfit, MaxProfitConfig, MaxProfitConfigBuilder, MaxProfitScanner, max_profit,
    max_profit_with,
};
pub use crate::ohlcv::{Ohlcv, Price, Timestamp};
pub use crate::price_source::PriceSource;
pub use crate::series::CandleSeries;

#[cfg(test)]
mod test_util;
