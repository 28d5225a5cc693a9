//! Gomoku brain
//!
//! Speaks the manager's line protocol on stdin/stdout. Logs go to stderr
//! so they never mix with replies.

use std::env;
use std::io;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use gomoku::protocol::{self, Session};
use gomoku::AppConfig;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn print_usage() {
    eprintln!("Gomoku brain");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  gomoku-brain [--config <path>] [--print-config]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --config, -c <path>   Load settings from a TOML file");
    eprintln!("  --print-config        Print the effective settings and exit");
    eprintln!();
    eprintln!("Logging follows RUST_LOG, or log_level from the config file.");
}

struct Args {
    config: Option<PathBuf>,
    print_config: bool,
}

fn parse_args() -> Result<Option<Args>> {
    let args: Vec<String> = env::args().skip(1).collect();
    let mut parsed = Args {
        config: None,
        print_config: false,
    };

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--config" | "-c" => {
                let Some(path) = args.get(i + 1) else {
                    bail!("--config requires a path");
                };
                parsed.config = Some(PathBuf::from(path));
                i += 1;
            }
            "--print-config" => parsed.print_config = true,
            "--help" | "-h" => {
                print_usage();
                return Ok(None);
            }
            other => bail!("unknown argument: {other}"),
        }
        i += 1;
    }
    Ok(Some(parsed))
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(false)
        .init();
}

fn main() -> Result<()> {
    let Some(args) = parse_args()? else {
        return Ok(());
    };

    let config = match &args.config {
        Some(path) => AppConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => AppConfig::default(),
    };

    if args.print_config {
        print!("{}", toml::to_string_pretty(&config).context("serializing config")?);
        return Ok(());
    }

    init_logging(&config.log_level);
    info!(
        name = %config.about.name,
        version = %config.about.version,
        time_limit_ms = config.engine.time_limit_ms,
        max_depth = config.engine.max_depth,
        "brain ready"
    );

    let mut session = Session::new(config);
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    protocol::run(stdin.lock(), &mut stdout, &mut session).context("protocol channel failed")?;
    Ok(())
}
