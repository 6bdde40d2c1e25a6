//! pirate-app: headless runner for the pirate game simulation.
//!
//! Usage:
//!   pirate-app run --ticks 3600 --seed 7 --save-dir saves
//!   pirate-app play --seconds 10
//!   pirate-app saves --dir saves

use std::path::{Path, PathBuf};
use std::process;
use std::time::Duration;

use pirate_app::game_loop::spawn_game_loop;
use pirate_app::state::{AppState, GameLoopCommand};
use pirate_app::summary::SessionSummary;
use pirate_core::commands::PlayerCommand;
use pirate_core::config::SimConfig;
use pirate_core::constants::TICK_RATE;
use pirate_core::state::GameStateSnapshot;
use pirate_sim::persistence;
use pirate_sim::SimulationEngine;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    match args[1].as_str() {
        "run" => cmd_run(&args[2..]),
        "play" => cmd_play(&args[2..]),
        "saves" => cmd_saves(&args[2..]),
        "help" | "--help" | "-h" => print_usage(),
        other => {
            eprintln!("Unknown command: {other}");
            print_usage();
            process::exit(1);
        }
    }
}

fn print_usage() {
    eprintln!(
        "pirate-app: headless pirate game runner\n\
         \n\
         Commands:\n\
         \n\
         run    Run a seeded session as fast as possible and print a JSON summary\n\
         \n\
           --config <path>    TOML config file (optional)\n\
           --ticks <N>        Ticks to simulate (default: 3600)\n\
           --seed <S>         Override the config seed\n\
           --save-dir <path>  Save the final state to <path>/latest.json\n\
         \n\
         play   Run the real-time game loop for a while\n\
         \n\
           --config <path>    TOML config file (optional)\n\
           --seconds <N>      Wall-clock seconds to run (default: 5)\n\
         \n\
         saves  List save slots\n\
         \n\
           --dir <path>       Save directory\n"
    );
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .map(String::as_str)
}

fn parse_flag<T: std::str::FromStr>(args: &[String], flag: &str, default: T) -> T {
    match flag_value(args, flag) {
        None => default,
        Some(raw) => raw.parse().unwrap_or_else(|_| {
            eprintln!("Invalid value for {flag}: {raw}");
            process::exit(1);
        }),
    }
}

fn load_config(args: &[String]) -> SimConfig {
    match flag_value(args, "--config") {
        None => SimConfig::default(),
        Some(path) => SimConfig::from_file(Path::new(path)).unwrap_or_else(|e| {
            eprintln!("Error loading {path}: {e}");
            process::exit(1);
        }),
    }
}

fn print_summary(summary: &SessionSummary) {
    match serde_json::to_string_pretty(summary) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            eprintln!("Error serializing summary: {e}");
            process::exit(1);
        }
    }
}

/// Fire at the nearest standing hostile college once a second.
fn gunner_orders(snapshot: &GameStateSnapshot) -> Option<PlayerCommand> {
    if snapshot.time.tick % TICK_RATE as u64 != 0 {
        return None;
    }
    let player = &snapshot.player;
    snapshot
        .colleges
        .iter()
        .filter(|c| !c.destroyed && !c.id.is_ally())
        .min_by(|a, b| {
            let da = (a.x - player.x).hypot(a.y - player.y);
            let db = (b.x - player.x).hypot(b.y - player.y);
            da.total_cmp(&db)
        })
        .map(|target| PlayerCommand::Fire {
            x: target.x - player.x,
            y: target.y - player.y,
        })
}

fn cmd_run(args: &[String]) {
    let mut config = load_config(args);
    config.seed = parse_flag(args, "--seed", config.seed);
    let ticks: u64 = parse_flag(args, "--ticks", 3600);
    let seed = config.seed;

    let mut engine = SimulationEngine::new(config);
    engine.queue_command(PlayerCommand::StartGame);
    let mut snapshot = engine.tick();
    for _ in 1..ticks {
        if snapshot.phase.is_over() {
            break;
        }
        if let Some(order) = gunner_orders(&snapshot) {
            engine.queue_command(order);
        }
        snapshot = engine.tick();
    }

    if let Some(dir) = flag_value(args, "--save-dir") {
        let data = engine.save_data("latest");
        if let Err(e) = persistence::save_to_file(Path::new(dir), "latest", &data) {
            eprintln!("Error saving to {dir}: {e}");
            process::exit(1);
        }
    }

    print_summary(&SessionSummary::from_snapshot(seed, &snapshot));
}

fn cmd_play(args: &[String]) {
    let config = load_config(args);
    let seconds: u64 = parse_flag(args, "--seconds", 5);
    let seed = config.seed;

    let state = AppState::new();
    let (tx, handle) = match spawn_game_loop(config, state.latest_snapshot.clone()) {
        Ok(spawned) => spawned,
        Err(e) => {
            eprintln!("Error starting game loop: {e}");
            process::exit(1);
        }
    };
    if let Ok(mut slot) = state.command_tx.lock() {
        *slot = Some(tx);
    }
    if let Ok(mut running) = state.running.lock() {
        *running = true;
    }

    state.send(GameLoopCommand::PlayerCommand(PlayerCommand::StartGame));
    std::thread::sleep(Duration::from_secs(seconds));
    state.send(GameLoopCommand::Shutdown);
    if handle.join().is_err() {
        log::error!("game loop thread panicked");
    }
    if let Ok(mut running) = state.running.lock() {
        *running = false;
    }

    match state.snapshot() {
        Some(snapshot) => print_summary(&SessionSummary::from_snapshot(seed, &snapshot)),
        None => {
            eprintln!("Game loop produced no snapshot");
            process::exit(1);
        }
    }
}

fn cmd_saves(args: &[String]) {
    let Some(dir) = flag_value(args, "--dir").map(PathBuf::from) else {
        eprintln!("Error: --dir is required");
        process::exit(1);
    };
    let saves = persistence::list_saves(&dir);
    match serde_json::to_string_pretty(&saves) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            eprintln!("Error serializing save list: {e}");
            process::exit(1);
        }
    }
}
