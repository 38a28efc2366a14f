//! Trainer CLI
//!
//! Run self-play training sessions and matches between strategies.

use std::env;
use std::path::Path;

use trainer::{SessionResults, StrategyKind, TrainerConfig, TrainingSession};

const RESULTS_FILE: &str = "training_results.json";

fn print_usage() {
    println!("ml-othello Trainer");
    println!();
    println!("Usage:");
    println!("  trainer train [--games N] [--config FILE]");
    println!("  trainer match <black> <white> [--games N]");
    println!("  trainer results");
    println!();
    println!("Strategies:");
    println!("  random        - Uniform random legal move");
    println!("  adaptive      - Positional weight table with outcome learning");
    println!();
    println!("Examples:");
    println!("  trainer train --games 500");
    println!("  trainer match adaptive random --games 100");
}

fn parse_kind(spec: &str) -> Option<StrategyKind> {
    let kind = StrategyKind::parse(spec);
    if kind.is_none() {
        eprintln!("Unknown strategy: {}", spec);
    }
    kind
}

/// Parses a `--games N` style flag out of the argument tail.
fn parse_games(args: &[String], default: Option<u32>) -> Option<u32> {
    let mut games = default;
    let mut i = 0;
    while i < args.len() {
        if let "--games" | "-g" = args[i].as_str() {
            if i + 1 < args.len() {
                games = args[i + 1].parse().ok().or(games);
                i += 1;
            }
        }
        i += 1;
    }
    games
}

fn parse_config(args: &[String]) -> TrainerConfig {
    let mut path = "trainer.toml".to_string();
    let mut i = 0;
    while i < args.len() {
        if let "--config" | "-c" = args[i].as_str() {
            if i + 1 < args.len() {
                path = args[i + 1].clone();
                i += 1;
            }
        }
        i += 1;
    }
    match TrainerConfig::load(Path::new(&path)) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Warning: {}", e);
            eprintln!("Using default configuration");
            TrainerConfig::default()
        }
    }
}

fn run_session(config: TrainerConfig, black: StrategyKind, white: StrategyKind) {
    println!(
        "=== Session: {} (Black) vs {} (White), {} games ===",
        black.label(),
        white.label(),
        config.games
    );

    let session = TrainingSession::new(config);
    let results = match session.run(black, white) {
        Ok(results) => results,
        Err(e) => {
            eprintln!("Session failed: {}", e);
            return;
        }
    };

    println!();
    results.print_report();

    if let Err(e) = results.save(Path::new(RESULTS_FILE)) {
        eprintln!("Warning: Failed to save results: {}", e);
    }
}

fn run_train(args: &[String]) {
    let mut config = parse_config(args);
    if let Some(games) = parse_games(args, None) {
        config.games = games;
    }
    // Training pits the learner against the random baseline.
    run_session(config, StrategyKind::Adaptive, StrategyKind::Random);
}

fn run_match(args: &[String]) {
    if args.len() < 2 {
        eprintln!("Error: match requires two strategy specifications");
        print_usage();
        return;
    }
    let (Some(black), Some(white)) = (parse_kind(&args[0]), parse_kind(&args[1])) else {
        print_usage();
        return;
    };

    let mut config = TrainerConfig::default();
    if let Some(games) = parse_games(&args[2..], None) {
        config.games = games;
    }
    run_session(config, black, white);
}

fn show_results() {
    match SessionResults::load(Path::new(RESULTS_FILE)) {
        Ok(results) => results.print_report(),
        Err(_) => println!("No session data found. Run a session first!"),
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_target(false)
        .init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    match args[1].as_str() {
        "train" => run_train(&args[2..]),
        "match" => run_match(&args[2..]),
        "results" => show_results(),
        "help" | "--help" | "-h" => print_usage(),
        _ => {
            eprintln!("Unknown command: {}", args[1]);
            print_usage();
        }
    }
}
