use crate::model::{FailureMode, FetchOutcome, FetchRecord};
use tokio::sync::mpsc;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Fetches one partition strictly in sequence on the given client and
/// publishes one record per URL. Returns the number of URLs fetched.
pub async fn fetch_partition(
    rank: usize,
    urls: Vec<String>,
    client: reqwest::Client,
    failure_mode: FailureMode,
    tx: mpsc::Sender<FetchRecord>,
) -> Result<usize, BoxError> {
    let mut fetched = 0;
    for url in urls {
        match fetch_one(&client, &url).await {
            Ok(bytes) => {
                fetched += 1;
                tx.send(FetchRecord {
                    worker: rank,
                    url,
                    outcome: FetchOutcome::Read(bytes),
                })
                .await?;
            }
            Err(e) => match failure_mode {
                FailureMode::Abort => return Err(e.into()),
                FailureMode::KeepGoing => {
                    tx.send(FetchRecord {
                        worker: rank,
                        url,
                        outcome: FetchOutcome::Failed(e.to_string()),
                    })
                    .await?;
                }
            },
        }
    }
    Ok(fetched)
}

/// Same loop, but the worker owns its client for the lifetime of the task.
pub async fn fetch_partition_owned(
    rank: usize,
    urls: Vec<String>,
    failure_mode: FailureMode,
    tx: mpsc::Sender<FetchRecord>,
) -> Result<usize, BoxError> {
    let client = reqwest::Client::new();
    fetch_partition(rank, urls, client, failure_mode, tx).await
}

// The status line is not inspected: a non-2xx body still counts as a read,
// only request-level failures surface as errors.
async fn fetch_one(client: &reqwest::Client, url: &str) -> Result<usize, reqwest::Error> {
    let body = client.get(url).send().await?.text().await?;
    Ok(body.len())
}
