use std::fs;
use std::path::PathBuf;
use std::process::exit;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use serde_json::{json, Value};
use session_pool_aws::{AwsSessionPool, SdkSessionFactory};
use session_pool_core::contract::{split_list, PoolRequest, PoolSummary};
use session_pool_core::{
    ConfigurationError, DiscardSink, JsonLinesSink, LogSink, SessionPool, TracingSink,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "session-pool",
    about = "Build AWS sessions for every profile and region combination"
)]
struct Cli {
    /// Profile names; repeat or separate with commas. Defaults to the default profile.
    #[arg(short, long = "profile", env = "SESSION_POOL_PROFILES", value_delimiter = ',')]
    profiles: Vec<String>,
    /// Region names; repeat or separate with commas.
    #[arg(short, long = "region", env = "SESSION_POOL_REGIONS", value_delimiter = ',')]
    regions: Vec<String>,
    /// JSON pool request ({"profiles": [...], "regions": [...]}) merged before flags
    #[arg(long)]
    request: Option<PathBuf>,
    /// Where session diagnostics go
    #[arg(value_enum, long, default_value_t = LogFormat::Json)]
    log_format: LogFormat,
    /// Fail instead of asking the SDK's default region chain for unlisted regions
    #[arg(long)]
    no_sdk_region: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum LogFormat {
    /// JSON lines on stderr
    Json,
    /// `tracing` events, filtered by RUST_LOG
    Tracing,
    /// No diagnostics
    Off,
}

impl LogFormat {
    fn sink(self) -> Box<dyn LogSink> {
        match self {
            Self::Json => Box::new(JsonLinesSink::stderr("session_pool")),
            Self::Tracing => {
                let filter =
                    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
                tracing_subscriber::fmt()
                    .with_env_filter(filter)
                    .with_writer(std::io::stderr)
                    .init();
                Box::new(TracingSink)
            }
            Self::Off => Box::new(DiscardSink),
        }
    }
}

fn load_request(cli: &Cli) -> anyhow::Result<PoolRequest> {
    let from_file = match &cli.request {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read pool request {}", path.display()))?;
            PoolRequest::from_json(&text)?
        }
        None => PoolRequest::default(),
    };

    let from_flags = PoolRequest {
        profiles: split_list(&cli.profiles),
        regions: split_list(&cli.regions),
    };

    Ok(from_file.merge(from_flags).with_default_profile())
}

fn summarize(pool: &AwsSessionPool) -> PoolSummary {
    PoolSummary::new(
        pool.iter()
            .map(|(key, session)| session.summary(&key.region))
            .collect(),
    )
}

fn error_report(error: &ConfigurationError) -> Value {
    json!({
        "error": error.code(),
        "message": error.to_string(),
    })
}

fn configure_factory(cli: &Cli, factory: SdkSessionFactory) -> SdkSessionFactory {
    if cli.no_sdk_region {
        factory.without_sdk_region_fallback()
    } else {
        factory
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let request = load_request(&cli)?;
    let sink = cli.log_format.sink();

    let factory = configure_factory(&cli, SdkSessionFactory::from_process_env());
    match SessionPool::from_request(&request, &factory, sink.as_ref()) {
        Ok(pool) => {
            println!("{}", serde_json::to_string_pretty(&summarize(&pool))?);
            Ok(())
        }
        Err(error) => {
            eprintln!("{}", error_report(&error));
            exit(1);
        }
    }
}
