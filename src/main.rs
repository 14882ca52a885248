mod server;

use clap::{Args, Parser, Subcommand};
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use chrono::Local;
use insta_insight::config::AnalyzerConfig;
use insta_insight::{analyze_payload, error_json};

#[derive(Parser)]
#[command(name = "insta-insight", about = "Instagram profile insight analyzer")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    Analyze(AnalyzeArgs),
    Serve(ServeArgs),
}

#[derive(Args, Debug, Clone, Default)]
struct AnalyzeArgs {
    #[arg(long)]
    json: Option<String>,
    #[arg(long)]
    pretty: bool,
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct ServeArgs {
    #[arg(long, default_value = "127.0.0.1")]
    host: String,
    #[arg(long, default_value_t = 8787)]
    port: u16,
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    load_dotenv();
    init_tracing();
    if let Err(err) = run().await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), String> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Command::Analyze(AnalyzeArgs::default()));

    match command {
        Command::Analyze(args) => run_analyze(args),
        Command::Serve(args) => server::serve(args).await,
    }
}

fn run_analyze(args: AnalyzeArgs) -> Result<(), String> {
    let config = AnalyzerConfig::load(args.config)?;
    let payload = read_payload(args.json)?;
    tracing::debug!(bytes = payload.len(), "received profile payload");

    let analyzed_at = Local::now().naive_local();
    let output = match analyze_payload(&payload, &config.services, analyzed_at) {
        Ok(report) => {
            let encoded = if args.pretty {
                serde_json::to_string_pretty(&report)
            } else {
                serde_json::to_string(&report)
            };
            encoded.map_err(|err| format!("failed to encode report: {}", err))?
        }
        Err(err) => {
            tracing::warn!(error = %err, "profile analysis rejected");
            error_json(&err)
        }
    };

    println!("{}", output);
    Ok(())
}

fn read_payload(arg: Option<String>) -> Result<String, String> {
    if let Some(payload) = arg {
        if !payload.trim().is_empty() {
            return Ok(payload);
        }
    }

    let mut buffer = String::new();
    io::stdin()
        .read_to_string(&mut buffer)
        .map_err(|err| format!("failed reading stdin: {}", err))?;
    Ok(buffer.trim().to_string())
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn load_dotenv() {
    let _ = dotenvy::dotenv();
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    let manifest_path = Path::new(manifest_dir).join(".env");
    let _ = dotenvy::from_path(manifest_path);
}
