use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Clone)]
pub struct Config {
    pub workers: usize,
    pub policy: ClientPolicy,
    pub failure_mode: FailureMode,
}

/// Client lifetime policy: one pooled client for the whole run, or one
/// client owned by each worker.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ClientPolicy {
    Shared,
    PerWorker,
}

impl fmt::Display for ClientPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientPolicy::Shared => write!(f, "One client"),
            ClientPolicy::PerWorker => write!(f, "Client per worker"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FailureMode {
    /// The first failed request aborts the whole run.
    Abort,
    /// Failed requests are recorded and the worker moves on.
    KeepGoing,
}

#[derive(Debug)]
pub struct FetchRecord {
    pub worker: usize,
    pub url: String,
    pub outcome: FetchOutcome,
}

#[derive(Debug)]
pub enum FetchOutcome {
    Read(usize),
    Failed(String),
}

#[derive(Debug, Serialize)]
pub struct RunSummary {
    pub policy: ClientPolicy,
    pub workers: usize,
    pub urls: usize,
    pub per_worker: Vec<usize>,
    pub seconds: f64,
    pub started_at: DateTime<Utc>,
}

impl RunSummary {
    pub fn total_fetched(&self) -> usize {
        self.per_worker.iter().sum()
    }

    pub fn report_line(&self) -> String {
        format!(
            "{}: downloaded {} urls in {:.2} seconds",
            self.policy,
            self.total_fetched(),
            self.seconds
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_line_sums_worker_counts() {
        let summary = RunSummary {
            policy: ClientPolicy::Shared,
            workers: 3,
            urls: 8,
            per_worker: vec![3, 3, 2],
            seconds: 1.234,
            started_at: Utc::now(),
        };
        assert_eq!(summary.total_fetched(), 8);
        assert_eq!(
            summary.report_line(),
            "One client: downloaded 8 urls in 1.23 seconds"
        );
    }
}
