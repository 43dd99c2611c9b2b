//! Reversi CLI - Command-line interface
//!
//! Commands:
//! - play: interactive game against a computer player
//! - match: play a series of games between two computer players

mod match_cmd;
mod play;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "reversi")]
#[command(about = "Reversi rules engine and computer players")]
struct Cli {
    /// RNG seed; a random seed is drawn and logged when omitted
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play an interactive game against the computer
    Play(play::PlayArgs),
    /// Play a series of games between two computer players
    Match(match_cmd::MatchArgs),
}

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Play(args) => play::run(args, cli.seed),
        Commands::Match(args) => match_cmd::run(args, cli.seed),
    }
}
