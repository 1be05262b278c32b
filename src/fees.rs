//! Fee snapshot and history types.

use chrono::{DateTime, Timelike, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use crate::units::WeiAmount;

/// Fee fields as fetched from RPC, denominated in wei.
///
/// This is the wire-side shape; the monitor converts it to a gwei
/// [`FeeSnapshot`] before storing or comparing anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawFeeData {
    pub base_fee: WeiAmount,
    pub priority_fee: WeiAmount,
    /// The headline fee (gas price) used for history, threshold comparison,
    /// and cost estimation.
    pub effective_fee: WeiAmount,
}

impl RawFeeData {
    /// Convert all fields to gwei display units.
    pub fn to_snapshot(&self) -> FeeSnapshot {
        FeeSnapshot {
            base_fee: self.base_fee.to_gwei(),
            priority_fee: self.priority_fee.to_gwei(),
            effective_fee: self.effective_fee.to_gwei(),
        }
    }
}

/// Current fee data in gwei display units.
///
/// Replaced wholesale on each successful poll, never partially mutated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeeSnapshot {
    pub base_fee: f64,
    pub priority_fee: f64,
    pub effective_fee: f64,
}

/// One sample of the effective fee at a point in time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistoryPoint {
    /// Sample time, truncated to second resolution.
    pub timestamp: DateTime<Utc>,
    /// Effective fee in gwei at that time.
    pub effective_fee: f64,
}

impl HistoryPoint {
    /// Create a point stamped with the current wall-clock time.
    pub fn now(effective_fee: f64) -> Self {
        // Sub-second precision is meaningless at a 60s poll cadence.
        let timestamp = Utc::now().with_nanosecond(0).unwrap_or_else(Utc::now);
        Self {
            timestamp,
            effective_fee,
        }
    }

    /// `HH:MM:SS` label for chart axes.
    pub fn time_label(&self) -> String {
        self.timestamp.format("%H:%M:%S").to_string()
    }
}

/// Append-only series of fee samples in chronological order.
///
/// Insertion order is chronological order. The series is unbounded by
/// default; with a capacity set, the oldest point is evicted on overflow.
/// Cleared when the selected network changes, since samples from one
/// network must not chart against another.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HistorySeries {
    points: VecDeque<HistoryPoint>,
    capacity: Option<usize>,
}

impl HistorySeries {
    /// An unbounded series.
    pub fn new() -> Self {
        Self::default()
    }

    /// A series keeping at most `capacity` points.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            points: VecDeque::with_capacity(capacity),
            capacity: Some(capacity),
        }
    }

    /// Append a sample, evicting the oldest if at capacity.
    pub fn push(&mut self, point: HistoryPoint) {
        if let Some(cap) = self.capacity {
            if cap == 0 {
                return;
            }
            while self.points.len() >= cap {
                self.points.pop_front();
            }
        }
        self.points.push_back(point);
    }

    /// Drop all samples, keeping the capacity setting.
    pub fn clear(&mut self) {
        self.points.clear();
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Most recent sample, if any.
    pub fn latest(&self) -> Option<&HistoryPoint> {
        self.points.back()
    }

    /// Samples oldest-first.
    pub fn points(&self) -> impl Iterator<Item = &HistoryPoint> {
        self.points.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::WeiAmount;

    #[test]
    fn raw_fee_converts_all_fields_to_gwei() {
        let raw = RawFeeData {
            base_fee: WeiAmount::from(20_000_000_000u64),
            priority_fee: WeiAmount::from(2_000_000_000u64),
            effective_fee: WeiAmount::from(30_000_000_000u64),
        };
        let snapshot = raw.to_snapshot();
        assert!((snapshot.base_fee - 20.0).abs() < 1e-9);
        assert!((snapshot.priority_fee - 2.0).abs() < 1e-9);
        assert!((snapshot.effective_fee - 30.0).abs() < 1e-9);
    }

    #[test]
    fn history_appends_in_order() {
        let mut series = HistorySeries::new();
        series.push(HistoryPoint::now(10.0));
        series.push(HistoryPoint::now(20.0));
        series.push(HistoryPoint::now(15.0));

        assert_eq!(series.len(), 3);
        let timestamps: Vec<_> = series.points().map(|p| p.timestamp).collect();
        assert!(timestamps.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(series.latest().unwrap().effective_fee, 15.0);
    }

    #[test]
    fn bounded_history_evicts_oldest() {
        let mut series = HistorySeries::with_capacity(2);
        series.push(HistoryPoint::now(1.0));
        series.push(HistoryPoint::now(2.0));
        series.push(HistoryPoint::now(3.0));

        assert_eq!(series.len(), 2);
        let fees: Vec<_> = series.points().map(|p| p.effective_fee).collect();
        assert_eq!(fees, vec![2.0, 3.0]);
    }

    #[test]
    fn timestamps_are_second_resolution() {
        let point = HistoryPoint::now(5.0);
        assert_eq!(point.timestamp.timestamp_subsec_nanos(), 0);
        assert_eq!(point.time_label().len(), 8);
    }
}
