//! # scamguardctl
//!
//! One-shot fraud scans from the terminal: check a phone number, URL, or
//! message text against the anti-fraud gateway and print the verdict.
//!
//! Exit status: `0` for a safe verdict, `1` when a risk tier was assigned,
//! `2` on any failure.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use scamguard_core::config::{ConfigLoader, GatewayConfig, parse_timeout};
use scamguard_core::{DetectionMode, HttpScanGateway, ScanCoordinator, ScanState};
use tokio_stream::StreamExt;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// CLI entry point
#[derive(Parser, Debug)]
#[command(name = "scamguardctl", version)]
#[command(about = "Check phone numbers, URLs, and message text against the anti-fraud service")]
struct Cli {
    /// Print the terminal state as JSON instead of the text report
    #[arg(long, global = true)]
    json: bool,

    #[command(flatten)]
    gateway: GatewayArgs,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug, Clone)]
struct GatewayArgs {
    /// Configuration file to load instead of the default locations
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Gateway base URL (overrides config)
    #[arg(long, global = true, env = "SCAMGUARD_BASE_URL")]
    base_url: Option<String>,

    /// API key sent in the x-api-key header (overrides config)
    #[arg(long, global = true, env = "SCAMGUARD_API_KEY")]
    api_key: Option<String>,

    /// Request deadline, e.g. "30s" or "2m" (overrides config)
    #[arg(long, global = true, env = "SCAMGUARD_TIMEOUT", value_name = "DURATION")]
    timeout: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check a phone number against the scam-number database
    Phone {
        /// The phone number to check
        number: String,
    },
    /// Check a website URL against the malicious-site database
    Url {
        /// The URL to check; a bare domain is treated as https
        url: String,
    },
    /// Analyze free-form message text for fraud signals
    Text {
        /// The message text to analyze
        content: String,
    },
}

impl Command {
    fn mode(&self) -> DetectionMode {
        match self {
            Command::Phone { .. } => DetectionMode::Phone,
            Command::Url { .. } => DetectionMode::Url,
            Command::Text { .. } => DetectionMode::Text,
        }
    }

    fn input(&self) -> &str {
        match self {
            Command::Phone { number } => number,
            Command::Url { url } => url,
            Command::Text { content } => content,
        }
    }
}

/// Exit status for failed scans and setup errors.
const EXIT_FAILURE: u8 = 2;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(EXIT_FAILURE)
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode> {
    let input = cli.command.input();
    if input.trim().is_empty() {
        anyhow::bail!("nothing to scan: the input is empty");
    }

    let config = resolve_config(&cli.gateway).context("failed to resolve gateway configuration")?;
    debug!(base_url = %config.base_url, timeout = ?config.timeout, "gateway configured");

    let gateway =
        HttpScanGateway::new(&config).context("failed to build the anti-fraud gateway client")?;
    let coordinator = ScanCoordinator::new(Arc::new(gateway));

    let mode = cli.command.mode();
    let mut updates = coordinator.observe(mode);
    coordinator.scan(mode, input);

    let outcome = loop {
        match updates.next().await {
            Some(state) if state.is_pending() => continue,
            Some(state) => break state,
            None => anyhow::bail!("state stream closed before the scan finished"),
        }
    };

    render(&outcome, mode, cli.json)?;
    Ok(ExitCode::from(exit_code(&outcome)))
}

/// Layer CLI overrides on top of the loaded configuration.
fn resolve_config(args: &GatewayArgs) -> Result<GatewayConfig> {
    let mut loader = ConfigLoader::new();
    if let Some(path) = &args.config {
        loader = loader.with_config_path(path);
    }
    let mut config = loader.load()?;

    if let Some(base_url) = &args.base_url {
        config.base_url = base_url.clone();
    }
    if let Some(api_key) = &args.api_key {
        config.api_key = Some(api_key.clone());
    }
    if let Some(raw) = &args.timeout {
        config.timeout = parse_timeout(raw).context("invalid --timeout value")?;
    }
    Ok(config)
}

fn render(state: &ScanState, mode: DetectionMode, json: bool) -> Result<()> {
    if json {
        let rendered =
            serde_json::to_string_pretty(state).context("failed to encode the scan state")?;
        println!("{rendered}");
        return Ok(());
    }

    match state {
        ScanState::Success(verdict) => {
            println!("mode: {mode}");
            println!(
                "verdict: {} (tier {}, score {})",
                verdict.title, verdict.tier, verdict.score
            );
            println!("safe: {}", if verdict.is_safe() { "yes" } else { "no" });
            for reason in &verdict.reasons {
                println!("  - {reason}");
            }
        }
        ScanState::Error { title, message, .. } => {
            println!("error: {title}");
            println!("{message}");
        }
        // The scan loop only hands terminal states to render.
        ScanState::Idle | ScanState::Loading => {}
    }
    Ok(())
}

fn exit_code(state: &ScanState) -> u8 {
    match state {
        ScanState::Success(verdict) if verdict.is_safe() => 0,
        ScanState::Success(_) => 1,
        _ => EXIT_FAILURE,
    }
}
