//! Candle resampling and pagination.
//!
//! Downsamples raw mid-price ticks into fixed-width, left-closed time
//! buckets: OHLC of the mid price plus the last best-bid/best-ask per
//! bucket. Buckets with no ticks are omitted. The bucket sequence is
//! then sliced into bounded pages with a clamped page index.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use dca_perf_data::models::MarketTickRecord;

use crate::error::{AnalyticsError, Result};

/// Fixed set of supported candle intervals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandleInterval {
    OneMinute,
    ThreeMinutes,
    FiveMinutes,
    FifteenMinutes,
    ThirtyMinutes,
    OneHour,
    SixHours,
    OneDay,
}

impl CandleInterval {
    /// All intervals, shortest first.
    pub const ALL: [CandleInterval; 8] = [
        CandleInterval::OneMinute,
        CandleInterval::ThreeMinutes,
        CandleInterval::FiveMinutes,
        CandleInterval::FifteenMinutes,
        CandleInterval::ThirtyMinutes,
        CandleInterval::OneHour,
        CandleInterval::SixHours,
        CandleInterval::OneDay,
    ];

    /// Returns the display string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::OneMinute => "1m",
            Self::ThreeMinutes => "3m",
            Self::FiveMinutes => "5m",
            Self::FifteenMinutes => "15m",
            Self::ThirtyMinutes => "30m",
            Self::OneHour => "1h",
            Self::SixHours => "6h",
            Self::OneDay => "1d",
        }
    }

    /// Returns the bucket width in seconds.
    #[must_use]
    pub const fn as_secs(&self) -> i64 {
        match self {
            Self::OneMinute => 60,
            Self::ThreeMinutes => 180,
            Self::FiveMinutes => 300,
            Self::FifteenMinutes => 900,
            Self::ThirtyMinutes => 1_800,
            Self::OneHour => 3_600,
            Self::SixHours => 21_600,
            Self::OneDay => 86_400,
        }
    }
}

impl FromStr for CandleInterval {
    type Err = AnalyticsError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "1m" => Ok(Self::OneMinute),
            "3m" => Ok(Self::ThreeMinutes),
            "5m" => Ok(Self::FiveMinutes),
            "15m" => Ok(Self::FifteenMinutes),
            "30m" => Ok(Self::ThirtyMinutes),
            "1h" => Ok(Self::OneHour),
            "6h" => Ok(Self::SixHours),
            "1d" => Ok(Self::OneDay),
            _ => Err(AnalyticsError::UnknownInterval {
                value: s.to_string(),
            }),
        }
    }
}

/// One OHLC bucket of resampled mid-price data.
#[derive(Debug, Clone, Serialize)]
pub struct Candle {
    /// Left-closed bucket start timestamp
    pub bucket_start: DateTime<Utc>,
    pub open: Decimal,
    pub high: Decimal,
    pub low: Decimal,
    pub close: Decimal,
    /// Best bid of the last tick in the bucket
    pub best_bid: Decimal,
    /// Best ask of the last tick in the bucket
    pub best_ask: Decimal,
}

/// Resamples ticks of one trading pair into candles.
///
/// Input order does not matter; ticks sort by timestamp first. Each
/// bucket covers `[n * width, (n + 1) * width)` in epoch seconds.
#[must_use]
pub fn resample(ticks: &[MarketTickRecord], interval: CandleInterval) -> Vec<Candle> {
    let width = interval.as_secs();

    let mut sorted: Vec<&MarketTickRecord> = ticks.iter().collect();
    sorted.sort_by_key(|tick| tick.timestamp);

    let mut candles: Vec<Candle> = Vec::new();

    for tick in sorted {
        let bucket = tick.timestamp.timestamp().div_euclid(width) * width;
        let Some(bucket_start) = DateTime::from_timestamp(bucket, 0) else {
            continue;
        };

        match candles.last_mut() {
            Some(candle) if candle.bucket_start == bucket_start => {
                candle.high = candle.high.max(tick.mid_price);
                candle.low = candle.low.min(tick.mid_price);
                candle.close = tick.mid_price;
                candle.best_bid = tick.best_bid;
                candle.best_ask = tick.best_ask;
            }
            _ => candles.push(Candle {
                bucket_start,
                open: tick.mid_price,
                high: tick.mid_price,
                low: tick.mid_price,
                close: tick.mid_price,
                best_bid: tick.best_bid,
                best_ask: tick.best_ask,
            }),
        }
    }

    candles
}

/// Filters ticks to one trading pair and resamples them.
#[must_use]
pub fn resample_for_pair(
    ticks: &[MarketTickRecord],
    trading_pair: &str,
    interval: CandleInterval,
) -> Vec<Candle> {
    let filtered: Vec<MarketTickRecord> = ticks
        .iter()
        .filter(|tick| tick.trading_pair == trading_pair)
        .cloned()
        .collect();
    resample(&filtered, interval)
}

/// One bounded page of resampled candles.
#[derive(Debug, Clone, Serialize)]
pub struct CandlePage {
    pub candles: Vec<Candle>,
    /// Effective page index after clamping
    pub page_index: usize,
    pub total_pages: usize,
    /// Bucket start of the first candle on the page
    pub start_time: Option<DateTime<Utc>>,
    /// Bucket start of the last candle on the page
    pub end_time: Option<DateTime<Utc>>,
}

/// Slices a candle sequence into one page.
///
/// The page index clamps to `[0, total_pages - 1]`; an empty sequence
/// yields an empty page 0 of 0.
///
/// # Errors
/// Returns `InvalidPageSize` if `page_size` is zero.
pub fn paginate(candles: Vec<Candle>, page_size: usize, page_index: usize) -> Result<CandlePage> {
    if page_size == 0 {
        return Err(AnalyticsError::InvalidPageSize);
    }

    let total_pages = candles.len().div_ceil(page_size);
    if total_pages == 0 {
        return Ok(CandlePage {
            candles: Vec::new(),
            page_index: 0,
            total_pages: 0,
            start_time: None,
            end_time: None,
        });
    }

    let page_index = page_index.min(total_pages - 1);
    let start = page_index * page_size;
    let end = (start + page_size).min(candles.len());
    let page = candles[start..end].to_vec();

    Ok(CandlePage {
        start_time: page.first().map(|c| c.bucket_start),
        end_time: page.last().map(|c| c.bucket_start),
        candles: page,
        page_index,
        total_pages,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn tick(secs: i64, mid: Decimal) -> MarketTickRecord {
        MarketTickRecord {
            timestamp: DateTime::from_timestamp(secs, 0).unwrap(),
            exchange: "binance".to_string(),
            trading_pair: "BTC-USDT".to_string(),
            mid_price: mid,
            best_bid: mid - dec!(0.5),
            best_ask: mid + dec!(0.5),
        }
    }

    #[test]
    fn test_interval_table() {
        let expected = [
            ("1m", 60),
            ("3m", 180),
            ("5m", 300),
            ("15m", 900),
            ("30m", 1_800),
            ("1h", 3_600),
            ("6h", 21_600),
            ("1d", 86_400),
        ];
        for (interval, (s, secs)) in CandleInterval::ALL.iter().zip(expected) {
            assert_eq!(interval.as_str(), s);
            assert_eq!(interval.as_secs(), secs);
            assert_eq!(s.parse::<CandleInterval>().unwrap(), *interval);
        }
    }

    #[test]
    fn test_interval_rejects_unknown_strings() {
        assert!("2h".parse::<CandleInterval>().is_err());
        assert!("1M".parse::<CandleInterval>().is_err());
        assert!("".parse::<CandleInterval>().is_err());
    }

    #[test]
    fn test_resample_linear_ticks_into_minute_buckets() {
        // Ticks every 10s over 300s, mid price increasing by 1 per tick
        let ticks: Vec<MarketTickRecord> = (0..30)
            .map(|i| tick(i * 10, Decimal::from(100 + i)))
            .collect();

        let candles = resample(&ticks, CandleInterval::OneMinute);

        assert_eq!(candles.len(), 5);
        for (i, candle) in candles.iter().enumerate() {
            let first = Decimal::from(100 + i as i64 * 6);
            let last = Decimal::from(100 + i as i64 * 6 + 5);
            assert_eq!(candle.bucket_start.timestamp(), i as i64 * 60);
            assert_eq!(candle.open, first);
            assert_eq!(candle.close, last);
            assert_eq!(candle.low, first);
            assert_eq!(candle.high, last);
        }
    }

    #[test]
    fn test_resample_tracks_high_low_and_last_quote() {
        let ticks = vec![
            tick(0, dec!(100)),
            tick(10, dec!(105)),
            tick(20, dec!(95)),
            tick(30, dec!(101)),
        ];

        let candles = resample(&ticks, CandleInterval::OneMinute);

        assert_eq!(candles.len(), 1);
        let candle = &candles[0];
        assert_eq!(candle.open, dec!(100));
        assert_eq!(candle.high, dec!(105));
        assert_eq!(candle.low, dec!(95));
        assert_eq!(candle.close, dec!(101));
        assert_eq!(candle.best_bid, dec!(100.5));
        assert_eq!(candle.best_ask, dec!(101.5));
    }

    #[test]
    fn test_resample_unsorted_input() {
        let ticks = vec![tick(70, dec!(2)), tick(0, dec!(1)), tick(130, dec!(3))];

        let candles = resample(&ticks, CandleInterval::OneMinute);

        assert_eq!(candles.len(), 3);
        assert_eq!(candles[0].close, dec!(1));
        assert_eq!(candles[1].close, dec!(2));
        assert_eq!(candles[2].close, dec!(3));
    }

    #[test]
    fn test_resample_omits_empty_buckets() {
        let ticks = vec![tick(0, dec!(1)), tick(600, dec!(2))];

        let candles = resample(&ticks, CandleInterval::OneMinute);

        assert_eq!(candles.len(), 2);
        assert_eq!(candles[0].bucket_start.timestamp(), 0);
        assert_eq!(candles[1].bucket_start.timestamp(), 600);
    }

    #[test]
    fn test_resample_for_pair_filters_first() {
        let mut other = tick(0, dec!(999));
        other.trading_pair = "ETH-USDT".to_string();
        let ticks = vec![tick(0, dec!(1)), other];

        let candles = resample_for_pair(&ticks, "BTC-USDT", CandleInterval::OneMinute);

        assert_eq!(candles.len(), 1);
        assert_eq!(candles[0].close, dec!(1));
    }

    fn n_candles(n: usize) -> Vec<Candle> {
        (0..n)
            .map(|i| Candle {
                bucket_start: DateTime::from_timestamp(i as i64 * 60, 0).unwrap(),
                open: dec!(1),
                high: dec!(1),
                low: dec!(1),
                close: dec!(1),
                best_bid: dec!(1),
                best_ask: dec!(1),
            })
            .collect()
    }

    #[test]
    fn test_paginate_page_count_and_slicing() {
        let page = paginate(n_candles(1_500), 1_000, 1).unwrap();

        assert_eq!(page.total_pages, 2);
        assert_eq!(page.page_index, 1);
        assert_eq!(page.candles.len(), 500);
        assert_eq!(page.start_time.unwrap().timestamp(), 1_000 * 60);
        assert_eq!(page.end_time.unwrap().timestamp(), 1_499 * 60);
    }

    #[test]
    fn test_paginate_clamps_out_of_range_index() {
        let page = paginate(n_candles(1_500), 1_000, 99).unwrap();
        assert_eq!(page.page_index, 1);
        assert_eq!(page.candles.len(), 500);
    }

    #[test]
    fn test_paginate_empty_sequence() {
        let page = paginate(Vec::new(), 1_000, 3).unwrap();
        assert_eq!(page.total_pages, 0);
        assert_eq!(page.page_index, 0);
        assert!(page.candles.is_empty());
        assert!(page.start_time.is_none());
    }

    #[test]
    fn test_paginate_rejects_zero_page_size() {
        assert!(matches!(
            paginate(n_candles(10), 0, 0),
            Err(AnalyticsError::InvalidPageSize)
        ));
    }
}
