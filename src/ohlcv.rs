/// A price value.
///
/// Semantic alias for [`f64`]. Documents intent in function signatures
/// without introducing newtype construction overhead.
pub type Price = f64;

/// Bar timestamp, seconds since the Unix epoch.
///
/// Must be strictly increasing across a series handed to
/// [`max_profit`](crate::max_profit). The streaming
/// [`MaxProfitScanner`](crate::MaxProfitScanner) additionally treats a
/// repeated timestamp as a repaint of the last bar.
pub type Timestamp = u64;

/// OHLC bar data accepted by the scanners.
///
/// Implement this on your own kline/candle type to scan it in place,
/// without building a [`CandleSeries`](crate::CandleSeries) first. The
/// scanners only read through this trait and never check the OHLC
/// ordering invariants; use [`Candle::new`](crate::Candle::new) at the
/// ingestion boundary when the data source is untrusted.
///
/// # Example
///
/// ```
/// use candle_scan::{Ohlcv, Price, Timestamp};
///
/// struct MyKline {
///     o: f64, h: f64, l: f64, c: f64,
///     ts: u64,
/// }
///
/// impl Ohlcv for MyKline {
///     fn open(&self) -> Price { self.o }
///     fn high(&self) -> Price { self.h }
///     fn low(&self) -> Price { self.l }
///     fn close(&self) -> Price { self.c }
///     fn time(&self) -> Timestamp { self.ts }
/// }
/// ```
pub trait Ohlcv {
    /// Opening price of the bar.
    fn open(&self) -> Price;

    /// Highest price during the bar.
    fn high(&self) -> Price;

    /// Lowest price during the bar.
    fn low(&self) -> Price;

    /// Closing (or latest) price of the bar.
    fn close(&self) -> Price;

    /// Bar timestamp.
    fn time(&self) -> Timestamp;

    /// Trade volume during the bar. Defaults to `0.0`.
    fn volume(&self) -> f64 {
        0.0
    }
}

impl<T: Ohlcv + ?Sized> Ohlcv for &T {
    #[inline]
    fn open(&self) -> Price {
        (**self).open()
    }

    #[inline]
    fn high(&self) -> Price {
        (**self).high()
    }

    #[inline]
    fn low(&self) -> Price {
        (**self).low()
    }

    #[inline]
    fn close(&self) -> Price {
        (**self).close()
    }

    #[inline]
    fn time(&self) -> Timestamp {
        (**self).time()
    }

    #[inline]
    fn volume(&self) -> f64 {
        (**self).volume()
    }
}
