use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tilematch_core::*;

mod config;
mod play;
mod render;
mod simulate;

#[derive(Parser, Debug)]
#[command(version, about = "Tile matching game engine driver", long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity<clap_verbosity_flag::WarnLevel>,

    /// Force a seed instead of random
    #[arg(short, long, global = true)]
    seed: Option<u64>,

    /// Difficulty table (TOML) to use instead of the built-in presets
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Play in the terminal, with a real one second clock
    Play {
        #[arg(short, long, default_value = "normal")]
        difficulty: Difficulty,
    },
    /// Read JSON commands from stdin and answer with JSON messages on stdout
    Serve {
        /// Run the countdown here instead of waiting for tick commands
        #[arg(long)]
        clock: bool,
    },
    /// Let a bot play one run without waiting on a real clock
    Simulate {
        #[arg(short, long, default_value = "normal")]
        difficulty: Difficulty,
        /// Activations per simulated second
        #[arg(long, default_value_t = 1)]
        moves_per_second: u32,
        /// Pick activation slots at random instead of the best scoring one
        #[arg(long)]
        random: bool,
        /// Print the final snapshot as JSON
        #[arg(long)]
        json: bool,
    },
    /// Validate a difficulty table and print what it generates
    CheckConfig {
        path: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .init();

    let seed = args.seed.unwrap_or_else(rand::random);
    log::debug!("seed: {}", seed);

    let table = config::load_table(args.config.as_deref())?;

    match args.command {
        Command::Play { difficulty } => {
            let session = GameSession::new(table, seed)?;
            play::Driver::new(session, play::Frontend::Text, true).run(Some(difficulty))
        }
        Command::Serve { clock } => {
            let session = GameSession::new(table, seed)?;
            play::Driver::new(session, play::Frontend::Json, clock).run(None)
        }
        Command::Simulate {
            difficulty,
            moves_per_second,
            random,
            json,
        } => {
            let mut session = GameSession::new(table, seed)?;
            let summary = simulate::run(&mut session, difficulty, moves_per_second, !random, seed)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&session.snapshot())?);
            } else {
                print!("{}", render::board(&session.snapshot()));
                println!(
                    "{} activations ({} matches, {} misses), {} tiles removed over {}s, score {}",
                    summary.activations,
                    summary.matches,
                    summary.misses,
                    summary.tiles_removed,
                    summary.seconds_played,
                    summary.score
                );
            }
            Ok(())
        }
        Command::CheckConfig { path } => {
            let table = config::load_table(Some(&path))
                .with_context(|| format!("{} is not usable", path.display()))?;
            let rules = &table.rules;
            println!(
                "board {}x{}, miss -{}s, time bonus +{}s",
                rules.size.0, rules.size.1, rules.time_penalty, rules.time_bonus
            );
            for difficulty in Difficulty::ALL {
                let config = table.get(difficulty);
                let placed = config.tiles_to_place(rules);
                let max = max_special_tiles(config, placed);
                println!(
                    "{:<12} {:>4}s {:>4} tiles, max W{} T{} X{} B{}",
                    difficulty.name(),
                    config.initial_seconds,
                    placed,
                    max[Special::Wildcard],
                    max[Special::TimeBonus],
                    max[Special::Multiplier],
                    max[Special::Bomb],
                );
            }
            Ok(())
        }
    }
}
