mod pipeline;
mod settings;
mod snapshot;

use crate::pipeline::Strategies;
use crate::settings::Settings;
use crate::snapshot::write_snapshot;
use chrono::{Local, SubsecRound};
use log::{error, info};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let mut settings = Settings::load();
    match parse_cli_args(std::env::args().skip(1), &mut settings) {
        Ok(Cli::Run) => {}
        Ok(Cli::Print(text)) => {
            println!("{text}");
            return Ok(());
        }
        Err(msg) => {
            eprintln!("{msg}\n\n{}", usage_text());
            std::process::exit(2);
        }
    }

    better_panic::install();
    init_logging(&settings.log_filter);

    let api = settings.api_client();
    let now = Local::now().naive_local().trunc_subsecs(0);
    let snapshot = pipeline::build_snapshot(&api, now, &Strategies::default()).await;

    if let Err(e) = write_snapshot(&snapshot, &settings.output_path) {
        error!("Error generating data: {e:#}");
        return Err(e);
    }

    info!(
        "Successfully generated {} at {}",
        settings.output_path.display(),
        Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    println!("AL Wild Card teams: {}", snapshot.standings.al_wildcard.len());
    println!("NL Wild Card teams: {}", snapshot.standings.nl_wildcard.len());
    println!("Recent games: {}", snapshot.recent_games.len());
    println!("Storylines: {}", snapshot.storylines.len());

    Ok(())
}

#[derive(Debug, PartialEq)]
enum Cli {
    Run,
    Print(String),
}

fn parse_cli_args(
    args: impl IntoIterator<Item = String>,
    settings: &mut Settings,
) -> Result<Cli, String> {
    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => return Ok(Cli::Print(usage_text().to_owned())),
            "-V" | "--version" => {
                return Ok(Cli::Print(format!("mlb-wildcard {}", env!("CARGO_PKG_VERSION"))));
            }
            "-o" | "--output" => {
                let path = args.next().ok_or_else(|| format!("Missing value for {arg}"))?;
                settings.output_path = PathBuf::from(path);
            }
            other => match other.strip_prefix("--output=") {
                Some(path) if !path.is_empty() => settings.output_path = PathBuf::from(path),
                _ => return Err(format!("Unknown argument: {other}")),
            },
        }
    }
    Ok(Cli::Run)
}

fn usage_text() -> &'static str {
    "mlb-wildcard - build the MLB wild card dashboard data file

Usage:
  mlb-wildcard [--output PATH]
  mlb-wildcard --help
  mlb-wildcard --version

Options:
  -o, --output PATH       Where to write the dashboard JSON (default data.json)

Environment:
  MLBWC_OUTPUT            Output path, overridden by --output
  MLBWC_LOG               Log filter, e.g. debug or mlb_api=debug (default info)
  MLBWC_ESPN_BASE         Base URL of the ESPN MLB site API
  MLBWC_STANDINGS_JSON    Path to a local ESPN-format standings snapshot
  MLBWC_SCOREBOARD_JSON   Path to a local ESPN-format scoreboard snapshot"
}

fn init_logging(filter: &str) {
    let filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
