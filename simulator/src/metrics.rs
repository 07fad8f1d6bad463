//! Simulation metrics.

use std::collections::VecDeque;

use serde::Serialize;

/// Counters and latency samples collected during a simulation run.
#[derive(Debug, Clone)]
pub struct SimulationMetrics {
    /// Total transfers attempted.
    pub total_transfers: u64,
    /// Transfers that committed.
    pub committed: u64,
    /// Transfers aborted by a version conflict.
    pub conflicts: u64,
    /// Transfers rejected by validation (funds, currency, amount).
    pub rejected: u64,
    /// Latency samples (microseconds).
    latency_samples: VecDeque<u64>,
    /// Maximum samples to keep.
    max_samples: usize,
}

impl SimulationMetrics {
    /// Create new metrics.
    pub fn new() -> Self {
        Self {
            total_transfers: 0,
            committed: 0,
            conflicts: 0,
            rejected: 0,
            latency_samples: VecDeque::with_capacity(10000),
            max_samples: 10000,
        }
    }

    /// Record a committed transfer.
    pub fn record_commit(&mut self, latency_us: u64) {
        self.total_transfers += 1;
        self.committed += 1;

        if self.latency_samples.len() >= self.max_samples {
            self.latency_samples.pop_front();
        }
        self.latency_samples.push_back(latency_us);
    }

    /// Record a transfer aborted by a commit conflict.
    pub fn record_conflict(&mut self) {
        self.total_transfers += 1;
        self.conflicts += 1;
    }

    /// Record a transfer rejected by validation.
    pub fn record_rejection(&mut self) {
        self.total_transfers += 1;
        self.rejected += 1;
    }

    /// Get average latency in microseconds.
    pub fn average_latency_us(&self) -> u64 {
        if self.latency_samples.is_empty() {
            return 0;
        }

        let sum: u64 = self.latency_samples.iter().sum();
        sum / self.latency_samples.len() as u64
    }

    /// Get p50 latency.
    pub fn p50_latency_us(&self) -> u64 {
        self.percentile_latency(50)
    }

    /// Get p99 latency.
    pub fn p99_latency_us(&self) -> u64 {
        self.percentile_latency(99)
    }

    fn percentile_latency(&self, percentile: usize) -> u64 {
        if self.latency_samples.is_empty() {
            return 0;
        }

        let mut sorted: Vec<_> = self.latency_samples.iter().copied().collect();
        sorted.sort_unstable();

        let idx = (sorted.len() * percentile / 100).min(sorted.len() - 1);
        sorted[idx]
    }

    /// Get commit rate.
    pub fn commit_rate(&self) -> f64 {
        if self.total_transfers == 0 {
            return 0.0;
        }

        self.committed as f64 / self.total_transfers as f64
    }

    /// Build the serializable summary.
    pub fn summary(&self) -> MetricsSummary {
        MetricsSummary {
            total_transfers: self.total_transfers,
            committed: self.committed,
            conflicts: self.conflicts,
            rejected: self.rejected,
            commit_rate: self.commit_rate(),
            average_latency_us: self.average_latency_us(),
            p50_latency_us: self.p50_latency_us(),
            p99_latency_us: self.p99_latency_us(),
        }
    }
}

impl Default for SimulationMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Point-in-time metrics summary, for report output.
#[derive(Debug, Clone, Serialize)]
pub struct MetricsSummary {
    pub total_transfers: u64,
    pub committed: u64,
    pub conflicts: u64,
    pub rejected: u64,
    pub commit_rate: f64,
    pub average_latency_us: u64,
    pub p50_latency_us: u64,
    pub p99_latency_us: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics() {
        let mut metrics = SimulationMetrics::new();

        metrics.record_commit(100);
        metrics.record_commit(200);
        metrics.record_commit(150);
        metrics.record_conflict();
        metrics.record_rejection();

        assert_eq!(metrics.total_transfers, 5);
        assert_eq!(metrics.committed, 3);
        assert_eq!(metrics.conflicts, 1);
        assert_eq!(metrics.rejected, 1);
        assert_eq!(metrics.average_latency_us(), 150);
        assert_eq!(metrics.commit_rate(), 0.6);
    }
}
