use std::{
    fs::File,
    io::{self, BufRead, BufReader, Write},
    thread,
    time::Duration,
};

use anyhow::{Context, Result};
use clap::Parser;
use env_logger::Env;
use log::{debug, error, info, warn};

use flight_heading_tracker::{
    feed::parse_feed_line,
    systems::{Systems, zones::ZoneSnapshots},
    tracker_config::load_config_from_file,
};

mod cli;

use cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize the logger from the environment
    env_logger::Builder::from_env(Env::default().default_filter_or(&cli.log_level)).init();

    debug!("Started; args: {:?}", cli);

    let config = load_config_from_file(&cli.config_path)?;

    let zone_snapshots = match (&cli.state_path, cli.reset_state) {
        (Some(path), false) => ZoneSnapshots::load_from_file(path)
            .with_context(|| format!("failed to load snapshot store from {}", path))?,
        (Some(_), true) => {
            warn!("Resetting stored previous snapshots");
            ZoneSnapshots::new()
        }
        (None, _) => ZoneSnapshots::new(),
    };

    let mut systems = Systems::with_snapshots(&config, zone_snapshots);

    let reader: Box<dyn BufRead> = if cli.input == "-" {
        Box::new(BufReader::new(io::stdin()))
    } else {
        let file = File::open(&cli.input)
            .with_context(|| format!("failed to open feed file {}", cli.input))?;
        Box::new(BufReader::new(file))
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut rejected = 0;

    for (line_number, line) in reader.lines().enumerate() {
        let line = line.context("failed to read feed")?;

        let tick = match parse_feed_line(&line) {
            Ok(Some(tick)) => tick,
            Ok(None) => continue,
            Err(e) => {
                error!("Line {}: {}", line_number + 1, e);
                rejected += 1;
                continue;
            }
        };

        let zone = cli
            .zone
            .clone()
            .or(tick.zone)
            .unwrap_or_else(|| config.default_zone.clone());

        match systems.process_tick(&zone, tick.flights) {
            Ok(frame) => {
                serde_json::to_writer(&mut out, &frame)?;
                writeln!(out)?;
                out.flush()?;
            }
            Err(e) => {
                error!("Line {}: tick rejected: {}", line_number + 1, e);
                rejected += 1;
            }
        }

        if cli.realtime {
            thread::sleep(Duration::from_millis(config.poll_interval_ms));
        }
    }

    info!(
        "Feed finished: {} tick(s) processed, {} rejected",
        systems.ticks(),
        rejected
    );

    if let Some(path) = &cli.state_path {
        systems
            .zone_snapshots
            .save_to_file(path)
            .with_context(|| format!("failed to save snapshot store to {}", path))?;
    }

    Ok(())
}
