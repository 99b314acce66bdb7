#![allow(dead_code)]

use candle_scan::{Candle, MaxProfitConfig, Ohlcv, Price, PriceSource, Timestamp};
use proptest::prelude::*;
use serde::{Deserialize, de::DeserializeOwned};

/// Hourly OHLCV bar parsed from the BTCUSDT CSV fixture.
#[derive(Debug, Clone, Deserialize)]
pub struct RefBar {
    pub time: u64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl Ohlcv for RefBar {
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

    fn volume(&self) -> f64 {
        self.volume
    }
}

const OHLCV_PATH: &str = "tests/fixtures/data/btcusdt-1h.csv";

/// Load the hourly reference bars.
pub fn load_reference_ohlcvs() -> Vec<RefBar> {
    load_records(OHLCV_PATH, "invalid OHLCV record")
}

/// Load the hourly reference bars as validated candles.
pub fn load_reference_candles() -> Vec<Candle> {
    load_records(OHLCV_PATH, "invalid candle record")
}

/// Assert two f64 values are within tolerance.
pub fn assert_near(actual: f64, expected: f64, tolerance: f64, context: &str) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= tolerance,
        "{context}: expected {expected:.10}, got {actual:.10}, diff {diff:.2e} > tolerance {tolerance:.2e}"
    );
}

/// Window found by exhaustive pairwise search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BruteWindow {
    pub buy_price: f64,
    pub buy_time: u64,
    pub sell_price: f64,
    pub sell_time: u64,
    pub profit: f64,
}

fn extract(source: PriceSource, bar: &impl Ohlcv) -> f64 {
    match source {
        PriceSource::Open => bar.open(),
        PriceSource::High => bar.high(),
        PriceSource::Low => bar.low(),
        PriceSource::Close => bar.close(),
        PriceSource::HL2 => f64::midpoint(bar.high(), bar.low()),
        PriceSource::HLC3 => (bar.high() + bar.low() + bar.close()) / 3.0,
        PriceSource::OHLC4 => (bar.open() + bar.high() + bar.low() + bar.close()) / 4.0,
        PriceSource::HLCC4 => (bar.high() + bar.low() + bar.close() + bar.close()) / 4.0,
    }
}

/// O(n²) reference: every `(buy, sell)` pair with `buy <= sell`.
///
/// Iterates sells then buys in ascending order and keeps strict
/// improvements only, so ties resolve to the earliest sell and, for that
/// sell, the earliest buy.
pub fn brute_force<B: Ohlcv>(bars: &[B], config: &MaxProfitConfig) -> Option<BruteWindow> {
    if bars.len() < 2 {
        return None;
    }

    let mut best: Option<BruteWindow> = None;
    for (j, sell_bar) in bars.iter().enumerate() {
        let sell = extract(config.sell(), sell_bar);
        for buy_bar in &bars[..=j] {
            let buy = extract(config.buy(), buy_bar);
            let profit = sell - buy;
            if profit > best.map_or(0.0, |b| b.profit) {
                best = Some(BruteWindow {
                    buy_price: buy,
                    buy_time: buy_bar.time(),
                    sell_price: sell,
                    sell_time: sell_bar.time(),
                    profit,
                });
            }
        }
    }

    best
}

/// Creates perturbed versions of a bar to simulate live repaints.
///
/// Returns 2 intermediate bars (with shifted close/high/low) followed
/// by the original bar. All share the same `time`.
pub fn repaint_sequence(bar: &RefBar) -> Vec<RefBar> {
    let t = bar.time;
    vec![
        // First tick: only open is known, close near open
        RefBar {
            open: bar.open,
            high: bar.open * 1.001,
            low: bar.open * 0.999,
            close: bar.open * 1.0005,
            volume: bar.volume - 2.0,
            time: t,
        },
        // Mid-bar: partial movement toward final values
        RefBar {
            open: bar.open,
            high: bar.open.midpoint(bar.high),
            low: bar.open.midpoint(bar.low),
            close: bar.open.midpoint(bar.close),
            volume: bar.volume - 1.0,
            time: t,
        },
        // Final: real OHLCV values
        bar.clone(),
    ]
}

/// Valid candle with prices on a whole-cent grid.
pub fn valid_candle() -> impl Strategy<Value = Candle> {
    (
        100u32..100_000, // low, in cents
        1u32..5_000,     // spread, in cents
        0u32..=100,      // open position within the range, percent
        0u32..=100,      // close position within the range, percent
    )
        .prop_map(|(low, spread, open_pct, close_pct)| {
            let high = low + spread;
            let open = low + spread * open_pct / 100;
            let close = low + spread * close_pct / 100;
            Candle::new(
                0,
                f64::from(open) / 100.0,
                f64::from(high) / 100.0,
                f64::from(low) / 100.0,
                f64::from(close) / 100.0,
            )
            .expect("generated candle is valid")
        })
}

/// Chronological candle sequences with one-minute spacing.
pub fn valid_candle_sequence(max_len: usize) -> impl Strategy<Value = Vec<Candle>> {
    prop::collection::vec(valid_candle(), 0..=max_len).prop_map(|candles| {
        let mut ts = 1_704_067_200; // 2024-01-01 00:00:00 UTC
        candles
            .into_iter()
            .map(|c| {
                let candle = retime(&c, ts);
                ts += 60;
                candle
            })
            .collect()
    })
}

/// Same prices, new timestamp.
pub fn retime(candle: &Candle, time: u64) -> Candle {
    Candle::new(
        time,
        candle.open(),
        candle.high(),
        candle.low(),
        candle.close(),
    )
    .expect("retimed candle is valid")
}

fn load_records<D>(path: &str, expect_msg: &str) -> Vec<D>
where
    D: DeserializeOwned,
{
    let mut rdr =
        csv::Reader::from_path(path).unwrap_or_else(|e| panic!("failed to open {path}: {e}"));

    rdr.deserialize().map(|r| r.expect(expect_msg)).collect()
}
