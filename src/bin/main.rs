use poolbench::*;

use chrono::Utc;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use poolbench::model::{ClientPolicy, Config, FailureMode, FetchOutcome, FetchRecord, RunSummary};
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use tokio::sync::mpsc;

const DEFAULT_SITES: [&str; 2] = [
    "https://www.jython.org",
    "http://olympus.realpython.org/dice",
];

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to a file with one URL per line (defaults to a built-in list)
    #[arg(short = 'f', long)]
    url_file: Option<String>,

    /// Number of times the URL list is repeated
    #[arg(short, long, default_value_t = 80)]
    repeat: usize,

    /// Number of workers (prompted for when omitted)
    #[arg(short, long)]
    workers: Option<usize>,

    /// Record failed fetches instead of aborting the run
    #[arg(short, long)]
    keep_going: bool,

    /// Print each strategy summary as JSON
    #[arg(short, long)]
    json: bool,
}

fn prompt_workers() -> Result<usize, Box<dyn std::error::Error + Send + Sync>> {
    print!("Workers count:");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim().parse()?)
}

fn load_urls(args: &Args) -> Result<Vec<String>, Box<dyn std::error::Error + Send + Sync>> {
    let base = match &args.url_file {
        Some(path) => {
            let reader = BufReader::new(File::open(path)?);
            let mut urls = vec![];
            for line in reader.lines() {
                let line = line?;
                if !line.trim().is_empty() {
                    urls.push(line.trim().to_string());
                }
            }
            urls
        }
        None => DEFAULT_SITES.iter().map(|s| s.to_string()).collect(),
    };

    let mut urls = Vec::with_capacity(base.len() * args.repeat);
    for _ in 0..args.repeat {
        urls.extend(base.iter().cloned());
    }
    Ok(urls)
}

async fn run_strategy(
    urls: &[String],
    config: Config,
) -> Result<RunSummary, Box<dyn std::error::Error + Send + Sync>> {
    let started_at = Utc::now();
    let (tx, mut rx) = mpsc::channel::<FetchRecord>(100);

    let pb = ProgressBar::new(urls.len() as u64);
    let sty = ProgressStyle::with_template("{bar:40} {pos}/{len} {elapsed_precise}").unwrap();
    pb.set_style(sty);

    let printer = tokio::spawn(async move {
        while let Some(record) = rx.recv().await {
            match record.outcome {
                FetchOutcome::Read(bytes) => pb.println(format!(
                    "Worker: {} => read {} from {}",
                    record.worker, bytes, record.url
                )),
                FetchOutcome::Failed(reason) => pb.println(format!(
                    "Worker: {} => failed {} ({})",
                    record.worker, record.url, reason
                )),
            }
            pb.inc(1);
        }
        pb.finish_and_clear();
    });

    let (outcome, elapsed) = dispatch::timed(dispatch::run(urls, &config, tx)).await;
    printer.await?;
    let per_worker = outcome?;

    println!("{}: downloads per worker {:?}", config.policy, per_worker);

    Ok(RunSummary {
        policy: config.policy,
        workers: config.workers,
        urls: urls.len(),
        per_worker,
        seconds: elapsed.as_secs_f64(),
        started_at,
    })
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let args = Args::parse();

    let urls = load_urls(&args)?;
    let workers = match args.workers {
        Some(n) => n,
        None => prompt_workers()?,
    };
    if workers < 1 {
        return Err("workers count must be at least 1".into());
    }
    let failure_mode = if args.keep_going {
        FailureMode::KeepGoing
    } else {
        FailureMode::Abort
    };

    let per_worker = run_strategy(
        &urls,
        Config {
            workers,
            policy: ClientPolicy::PerWorker,
            failure_mode,
        },
    )
    .await?;

    let shared = run_strategy(
        &urls,
        Config {
            workers,
            policy: ClientPolicy::Shared,
            failure_mode,
        },
    )
    .await?;

    if args.json {
        println!("{}", serde_json::to_string(&shared)?);
        println!("{}", serde_json::to_string(&per_worker)?);
    } else {
        println!("{}", shared.report_line());
        println!("{}", per_worker.report_line());
    }

    Ok(())
}
