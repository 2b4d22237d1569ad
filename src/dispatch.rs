use std::future::Future;
use std::time::{Duration, Instant};

use futures::future::try_join_all;
use tokio::sync::mpsc;

use crate::model::{ClientPolicy, Config, FailureMode, FetchRecord};
use crate::partition::stripe;
use crate::worker::{self, BoxError};

/// Runs the strategy selected by `config.policy`.
pub async fn run(
    urls: &[String],
    config: &Config,
    tx: mpsc::Sender<FetchRecord>,
) -> Result<Vec<usize>, BoxError> {
    match config.policy {
        ClientPolicy::Shared => run_shared(urls, config.workers, config.failure_mode, tx).await,
        ClientPolicy::PerWorker => {
            run_per_worker(urls, config.workers, config.failure_mode, tx).await
        }
    }
}

/// All workers issue their requests on one pooled client. The client
/// outlives every worker and is released once the fan-in completes.
pub async fn run_shared(
    urls: &[String],
    workers: usize,
    failure_mode: FailureMode,
    tx: mpsc::Sender<FetchRecord>,
) -> Result<Vec<usize>, BoxError> {
    let client = reqwest::Client::new();
    let counts = fan_out(workers, |rank| {
        worker::fetch_partition(
            rank,
            stripe(urls, rank, workers),
            client.clone(),
            failure_mode,
            tx.clone(),
        )
    })
    .await?;
    drop(client);
    Ok(counts)
}

/// Each worker creates and releases its own client inside its task.
pub async fn run_per_worker(
    urls: &[String],
    workers: usize,
    failure_mode: FailureMode,
    tx: mpsc::Sender<FetchRecord>,
) -> Result<Vec<usize>, BoxError> {
    fan_out(workers, |rank| {
        worker::fetch_partition_owned(rank, stripe(urls, rank, workers), failure_mode, tx.clone())
    })
    .await
}

// Spawns one task per rank and joins them in launch order, so the
// returned counts are index-aligned to worker rank no matter which
// task finishes first.
async fn fan_out<F, Fut>(workers: usize, worker_for: F) -> Result<Vec<usize>, BoxError>
where
    F: Fn(usize) -> Fut,
    Fut: Future<Output = Result<usize, BoxError>> + Send + 'static,
{
    let mut handles = Vec::with_capacity(workers);
    for rank in 0..workers {
        handles.push(tokio::spawn(worker_for(rank)));
    }

    let mut counts = Vec::with_capacity(workers);
    for outcome in try_join_all(handles).await? {
        counts.push(outcome?);
    }
    Ok(counts)
}

/// Wall-clock measurement of one strategy run on a monotonic clock.
pub async fn timed<T, Fut>(fut: Fut) -> (T, Duration)
where
    Fut: Future<Output = T>,
{
    let start = Instant::now();
    let value = fut.await;
    (value, start.elapsed())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn timed_returns_the_inner_value() {
        let (value, elapsed) = timed(async { 42 }).await;
        assert_eq!(value, 42);
        assert!(elapsed.as_secs() < 1);
    }
}
