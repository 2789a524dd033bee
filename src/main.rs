//! Flapdash entry point
//!
//! Headless demo driver: stands in for the real shell by feeding the
//! session a scripted autopilot at one tick per frame, then prints a JSON
//! run summary. All I/O lives here; the simulation core never does any.

use std::env;
use std::fs;
use std::process::ExitCode;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::Serialize;

use flapdash::config::Config;
use flapdash::sim::{GameSession, Mode, TickInput};

/// Printed to stdout when the run ends
#[derive(Serialize)]
struct RunSummary {
    seed: u64,
    ticks: u64,
    score: u32,
}

struct Args {
    seed: Option<u64>,
    config_path: Option<String>,
    max_ticks: u64,
}

fn parse_args() -> Result<Args, String> {
    let mut args = Args {
        seed: None,
        config_path: None,
        max_ticks: 100_000,
    };
    let mut iter = env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--seed" => {
                let value = iter.next().ok_or("--seed needs a value")?;
                args.seed = Some(value.parse().map_err(|_| format!("bad seed: {value}"))?);
            }
            "--config" => {
                args.config_path = Some(iter.next().ok_or("--config needs a path")?);
            }
            "--max-ticks" => {
                let value = iter.next().ok_or("--max-ticks needs a value")?;
                args.max_ticks = value.parse().map_err(|_| format!("bad tick count: {value}"))?;
            }
            other => return Err(format!("unknown argument: {other}")),
        }
    }
    Ok(args)
}

/// Flap whenever the box is sinking below the center of the next gap
fn autopilot(session: &GameSession) -> TickInput {
    let config = &session.config;
    let player_center = session.player.y + config.player_height as f32 / 2.0;

    // Nearest obstacle whose trailing edge is still ahead of the player
    let target = session
        .pool
        .active()
        .filter(|slot| slot.x + config.obstacle_width >= config.player_x)
        .min_by_key(|slot| slot.x)
        .map(|slot| (slot.gap_top + config.gap_size / 2) as f32)
        .unwrap_or((config.arena_height / 2) as f32);

    TickInput {
        flap: player_center > target && session.player.vy >= 0.0,
        ..Default::default()
    }
}

fn main() -> ExitCode {
    env_logger::init();

    let args = match parse_args() {
        Ok(args) => args,
        Err(message) => {
            eprintln!("{message}");
            eprintln!("usage: flapdash [--seed N] [--config path.json] [--max-ticks N]");
            return ExitCode::FAILURE;
        }
    };

    let seed = args.seed.unwrap_or_else(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_nanos() as u64)
            .unwrap_or(0)
    });

    let config = match &args.config_path {
        Some(path) => {
            let json = match fs::read_to_string(path) {
                Ok(json) => json,
                Err(error) => {
                    log::error!("cannot read {path}: {error}");
                    return ExitCode::FAILURE;
                }
            };
            match Config::from_json(&json) {
                Ok(config) => config,
                Err(error) => {
                    log::error!("cannot parse {path}: {error}");
                    return ExitCode::FAILURE;
                }
            }
        }
        None => Config::default(),
    };

    let mut session = match GameSession::new(config, seed) {
        Ok(session) => session,
        Err(error) => {
            log::error!("invalid config: {error}");
            return ExitCode::FAILURE;
        }
    };
    log::info!("flapdash starting (seed {seed})");

    session.tick(&TickInput {
        start: true,
        ..Default::default()
    });

    while session.mode == Mode::Playing && session.ticks < args.max_ticks {
        let input = autopilot(&session);
        let events = session.tick(&input);
        if events.scored {
            log::info!("score: {}", session.score);
        }
    }

    let summary = RunSummary {
        seed,
        ticks: session.ticks,
        score: session.score,
    };
    match serde_json::to_string_pretty(&summary) {
        Ok(json) => println!("{json}"),
        Err(error) => {
            log::error!("summary serialization failed: {error}");
            return ExitCode::FAILURE;
        }
    }
    ExitCode::SUCCESS
}
