// src/test_util.rs

use crate::{Ohlcv, Price, Timestamp};

/// Asserts that two `f64` values are approximately equal using a
/// relative epsilon of `4 * f64::EPSILON`.
macro_rules! assert_approx {
    ($actual:expr, $expected:expr) => {{
        let (a, e) = ($actual, $expected);
        assert!(
            (a - e).abs() <= e.abs() * 4.0 * f64::EPSILON,
            "assert_approx failed: actual={a}, expected={e}, diff={}",
            (a - e).abs(),
        );
    }};
}

pub(crate) use assert_approx;

#[derive(Clone, Copy, Debug)]
pub struct Bar {
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub time: u64,
}

impl Bar {
    pub fn new(open: f64, high: f64, low: f64, close: f64) -> Self {
        Self {
            open,
            high,
            low,
            close,
            time: 0,
        }
    }

    pub fn at(mut self, time: u64) -> Self {
        self.time = time;
        self
    }
}

/// Convenience: bar with only a low/high range; open and close sit at the low.
pub fn range(time: u64, low: f64, high: f64) -> Bar {
    Bar::new(low, high, low, low).at(time)
}

/// Convenience: flat bar with all four prices equal.
pub fn flat(time: u64, price: f64) -> Bar {
    Bar::new(price, price, price, price).at(time)
}

impl Ohlcv for Bar {
    fn open(&self) -> Price {
        self.open
    }
    fn high(&self) -> Price {
        self.high
    }
    fn low(&self) -> Price {
        self.low
    }
    fn close(&self) -> Price {
        self.close
    }
    fn time(&self) -> Timestamp {
        self.time
    }
}
