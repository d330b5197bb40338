//! `lifespan` binary: parses the command line, sets up logging and runs one
//! of the output modes (live terminal, one frame, JSON, SVG card).

use anyhow::{Context, Result, bail};
use clap::Parser;
use std::fs;
use std::io;
use tokio::sync::mpsc;
use tracing::{info, warn};

use lifespan::cli::Cli;
use lifespan::clock::{Clock, SystemClock};
use lifespan::driver;
use lifespan::render::INVALID_NOTICE;
use lifespan::session::LiveSession;
use lifespan::stats::Snapshot;
use lifespan::svg;
use lifespan::terminal::TerminalRenderer;
use lifespan::validate::validate_inputs;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr; stdout belongs to the countdown
    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .init();

    info!("lifespan v{} starting", env!("CARGO_PKG_VERSION"));

    let inputs = cli.inputs();
    let config = cli.config();

    if cli.json || cli.svg.is_some() {
        let now = SystemClock.now();
        let interval = match validate_inputs(&inputs, now) {
            Ok(interval) => interval,
            Err(errors) => {
                for err in &errors {
                    eprintln!("{}: {err}", err.field());
                }
                bail!(INVALID_NOTICE);
            }
        };
        let snapshot = Snapshot::capture(&interval, now);

        if cli.json {
            println!("{}", snapshot.to_json()?);
        }
        if let Some(path) = &cli.svg {
            let card = svg::generate_svg(&snapshot, cli.theme.into());
            fs::write(path, card)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("Generated {} successfully.", path.display());
        }
        return Ok(());
    }

    if cli.once {
        let renderer = TerminalRenderer::new(io::stdout(), inputs, config.error_ttl).plain();
        let mut session = LiveSession::new(config, renderer, SystemClock, inputs);
        let stats = session.calculate().await?;
        session.stop();
        if stats.is_none() {
            bail!(INVALID_NOTICE);
        }
        return Ok(());
    }

    if !inputs.is_complete() {
        warn!("some fields are empty; starting with an invalid form");
    }

    let renderer = TerminalRenderer::new(io::stdout(), inputs, config.error_ttl);
    let mut session = LiveSession::new(config, renderer, SystemClock, inputs);

    let (tx, rx) = mpsc::channel(16);
    driver::spawn_input_tasks(tx);
    driver::run(&mut session, rx).await?;

    Ok(())
}
