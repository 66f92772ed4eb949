use std::{collections::HashSet, fs, path::PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use xmrscan::client::{ScanClient, ScanConfig};
use xmrscan::core::PrivateViewKey;
use xmrscan::rpc::DaemonClient;
use xmrscan::scan::{filter_owned, CandidateOutput, SafeAmountCeiling, ScanIssue};

const DEFAULT_DAEMON_URL: &str = "http://127.0.0.1:18081";

#[derive(Parser)]
#[command(name = "xmrscan", about = "View-key output scanner for Monero blocks", version)]
struct Cli {
    /// monerod base URL.
    #[arg(long, global = true, default_value = DEFAULT_DAEMON_URL)]
    daemon_url: String,

    /// Route daemon traffic through a proxy (e.g. socks5h://127.0.0.1:9050).
    #[arg(long, global = true)]
    proxy: Option<String>,

    /// Safe-amount ceiling in whole XMR; candidates above it are dropped
    /// as likely false positives.
    #[arg(long, global = true, default_value_t = SafeAmountCeiling::DEFAULT_XMR)]
    max_xmr: u64,

    /// Emit machine-readable JSON instead of the human summary.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    #[command(subcommand)]
    Scan(ScanCommand),
}

#[derive(Subcommand)]
enum ScanCommand {
    /// Scan a single block by height.
    Height {
        #[command(flatten)]
        key: KeyArgs,

        #[arg(long)]
        height: u64,
    },
    /// Scan an inclusive height range.
    Range {
        #[command(flatten)]
        key: KeyArgs,

        #[arg(long)]
        start: u64,

        #[arg(long)]
        end: u64,
    },
}

#[derive(Args)]
struct KeyArgs {
    /// Private view key as 64 hex characters. Prefer --view-key-file so
    /// the key stays out of shell history.
    #[arg(long, conflicts_with = "view_key_file")]
    view_key: Option<String>,

    /// File containing the private view key in hex.
    #[arg(long)]
    view_key_file: Option<PathBuf>,

    /// Owned public spend keys (hex) to reconcile candidates against;
    /// repeatable. Without it, all plausible candidates are reported.
    #[arg(long = "owned-spend-key")]
    owned_spend_keys: Vec<String>,
}

#[derive(Serialize)]
struct ScanSummary {
    candidates: Vec<CandidateOutput>,
    issues: Vec<ScanIssue>,
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    match &cli.command {
        Command::Scan(cmd) => handle_scan(&cli, cmd),
    }
}

fn init_logging() {
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}

fn handle_scan(cli: &Cli, cmd: &ScanCommand) -> Result<()> {
    let client = build_client(cli)?;

    let (key_args, start, end) = match cmd {
        ScanCommand::Height { key, height } => (key, *height, *height),
        ScanCommand::Range { key, start, end } => (key, *start, *end),
    };

    if end < start {
        bail!("range end {end} is below start {start}");
    }

    let view_key = load_view_key(key_args)?;
    let (candidates, issues) = client.scan_height_range(&view_key, start, end)?;

    let candidates = match owned_key_set(key_args)? {
        Some(owned) => filter_owned(candidates, &owned),
        None => candidates,
    };

    let summary = ScanSummary { candidates, issues };
    render(cli, &summary, |s| {
        println!("Candidates: {}", s.candidates.len());
        for candidate in &s.candidates {
            println!(
                "- {}:{} {} XMR → spend key {}{}",
                candidate.tx_hash,
                candidate.output_index,
                candidate.amount_xmr,
                candidate.recovered_public_spend_key,
                if candidate.is_coinbase { " (coinbase)" } else { "" },
            );
        }
        if !s.issues.is_empty() {
            println!("Issues: {}", s.issues.len());
            for issue in &s.issues {
                println!("- {}: {}", issue.tx_hash, issue.error);
            }
        }
    });

    Ok(())
}

fn build_client(cli: &Cli) -> Result<ScanClient> {
    let daemon = match cli.proxy.as_deref() {
        Some(proxy) => DaemonClient::with_proxy(&cli.daemon_url, proxy),
        None => DaemonClient::new(&cli.daemon_url),
    }
    .with_context(|| format!("failed to build daemon client for {}", cli.daemon_url))?;

    Ok(ScanClient::new(
        daemon,
        ScanConfig {
            safe_amount_ceiling: SafeAmountCeiling::new(cli.max_xmr),
        },
    ))
}

fn load_view_key(args: &KeyArgs) -> Result<PrivateViewKey> {
    let hex_key = match (&args.view_key, &args.view_key_file) {
        (Some(hex_key), None) => hex_key.clone(),
        (None, Some(path)) => fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        (None, None) => bail!("one of --view-key or --view-key-file is required"),
        (Some(_), Some(_)) => bail!("--view-key conflicts with --view-key-file"),
    };

    PrivateViewKey::from_hex(&hex_key).context("invalid private view key")
}

fn owned_key_set(args: &KeyArgs) -> Result<Option<HashSet<String>>> {
    if args.owned_spend_keys.is_empty() {
        return Ok(None);
    }

    let mut owned = HashSet::new();
    for key in &args.owned_spend_keys {
        let normalized = key.trim().to_ascii_lowercase();
        if normalized.len() != 64 || !normalized.bytes().all(|b| b.is_ascii_hexdigit()) {
            bail!("owned spend key must be 64 hex characters: {key}");
        }
        owned.insert(normalized);
    }
    Ok(Some(owned))
}

fn render<T, F>(cli: &Cli, value: &T, printer: F)
where
    T: Serialize,
    F: FnOnce(&T),
{
    if cli.json {
        if let Ok(out) = serde_json::to_string_pretty(value) {
            println!("{out}");
            return;
        }
    }
    printer(value);
}
