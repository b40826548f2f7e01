//! In-memory latency rollups for hot read operations.
//!
//! Keeps a bounded sample window per operation so snapshot assembly can be
//! watched against its budget without any persistent storage.

use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, OnceLock};

const MAX_SAMPLES_PER_OP: usize = 128;

#[derive(Debug, Clone, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OpLatency {
    pub operation: String,
    pub sample_count: usize,
    pub p95_ms: u128,
    pub max_ms: u128,
    pub budget_ms: u128,
    pub budget_violations: u64,
}

#[derive(Debug, Default)]
struct OpWindow {
    samples_ms: VecDeque<u128>,
    budget_ms: u128,
    budget_violations: u64,
}

#[derive(Default)]
struct LatencyRecorder {
    windows: Mutex<HashMap<String, OpWindow>>,
}

impl LatencyRecorder {
    fn global() -> &'static Self {
        static RECORDER: OnceLock<LatencyRecorder> = OnceLock::new();
        RECORDER.get_or_init(Self::default)
    }

    fn record(&self, operation: &str, elapsed_ms: u128, budget_ms: u128) {
        let mut windows = match self.windows.lock() {
            Ok(guard) => guard,
            Err(_) => return,
        };
        let window = windows.entry(operation.to_string()).or_default();
        window.budget_ms = budget_ms;
        if elapsed_ms > budget_ms {
            window.budget_violations += 1;
        }
        if window.samples_ms.len() >= MAX_SAMPLES_PER_OP {
            window.samples_ms.pop_front();
        }
        window.samples_ms.push_back(elapsed_ms);
    }

    fn snapshot(&self) -> Vec<OpLatency> {
        let windows = match self.windows.lock() {
            Ok(guard) => guard,
            Err(_) => return Vec::new(),
        };
        let mut out: Vec<OpLatency> = windows
            .iter()
            .map(|(operation, window)| {
                let mut values: Vec<u128> = window.samples_ms.iter().copied().collect();
                values.sort_unstable();
                OpLatency {
                    operation: operation.clone(),
                    sample_count: values.len(),
                    p95_ms: percentile(&values, 95.0).unwrap_or(0),
                    max_ms: values.last().copied().unwrap_or(0),
                    budget_ms: window.budget_ms,
                    budget_violations: window.budget_violations,
                }
            })
            .collect();
        out.sort_by(|a, b| b.p95_ms.cmp(&a.p95_ms).then(a.operation.cmp(&b.operation)));
        out
    }
}

fn percentile(sorted: &[u128], p: f64) -> Option<u128> {
    if sorted.is_empty() {
        return None;
    }
    let rank = ((p / 100.0) * sorted.len() as f64).ceil() as usize;
    Some(sorted[rank.saturating_sub(1).min(sorted.len() - 1)])
}

/// Record one timed operation against its budget, logging on violation.
pub fn record(operation: &str, elapsed_ms: u128, budget_ms: u128) {
    LatencyRecorder::global().record(operation, elapsed_ms, budget_ms);
    if elapsed_ms > budget_ms {
        log::warn!("{operation} exceeded latency budget: {elapsed_ms}ms > {budget_ms}ms");
    } else {
        log::debug!("{operation} completed in {elapsed_ms}ms");
    }
}

/// Current rollups, worst p95 first.
pub fn rollups() -> Vec<OpLatency> {
    LatencyRecorder::global().snapshot()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentile_of_empty_is_none() {
        assert_eq!(percentile(&[], 95.0), None);
    }

    #[test]
    fn percentile_small_samples() {
        let values = vec![10_u128, 20, 30];
        assert_eq!(percentile(&values, 50.0), Some(20));
        assert_eq!(percentile(&values, 95.0), Some(30));
    }

    #[test]
    fn window_evicts_oldest_samples() {
        let recorder = LatencyRecorder::default();
        for ms in 1..=200 {
            recorder.record("op", ms, 1000);
        }
        let snapshot = recorder.snapshot();
        let rollup = snapshot.iter().find(|r| r.operation == "op").expect("rollup");
        assert_eq!(rollup.sample_count, MAX_SAMPLES_PER_OP);
        assert_eq!(rollup.max_ms, 200);
    }

    #[test]
    fn violations_count_only_over_budget() {
        let recorder = LatencyRecorder::default();
        recorder.record("budgeted", 40, 50);
        recorder.record("budgeted", 50, 50);
        recorder.record("budgeted", 51, 50);
        let snapshot = recorder.snapshot();
        let rollup = snapshot
            .iter()
            .find(|r| r.operation == "budgeted")
            .expect("rollup");
        assert_eq!(rollup.budget_violations, 1);
    }
}
