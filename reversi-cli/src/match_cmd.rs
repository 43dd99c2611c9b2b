//! Match command - play a series of games between two computer players
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: play_match(), report_results()
//! - Level 3: play_single_game()
//! - Level 4: formatting utilities

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

use reversi_core::{Color, ComputerPlayer, Difficulty, Game, GameResult, Weights};

use crate::play::load_weights;

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct MatchArgs {
    /// Difficulty of the first player
    #[arg(long, default_value = "hard")]
    pub first: Difficulty,

    /// Difficulty of the second player
    #[arg(long, default_value = "easy")]
    pub second: Difficulty,

    /// Number of games to play (players alternate colors)
    #[arg(long, default_value = "10")]
    pub games: usize,

    /// Evaluation weights JSON file (built-in defaults when omitted)
    #[arg(long, value_name = "FILE")]
    pub weights: Option<PathBuf>,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Result of a single game
#[derive(Clone, Debug, Serialize)]
struct GameRecord {
    game_number: usize,
    black_player: String,
    white_player: String,
    result: GameResult,
    black_discs: u32,
    white_discs: u32,
    moves: usize,
}

/// Aggregated match results
#[derive(Clone, Debug, Serialize)]
struct MatchResults {
    first_player: String,
    second_player: String,
    first_wins: usize,
    second_wins: usize,
    draws: usize,
    avg_moves: f32,
    games: Vec<GameRecord>,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

pub fn run(args: MatchArgs, seed: Option<u64>) -> Result<()> {
    let weights = load_weights(args.weights.as_deref())?;
    let seed = seed.unwrap_or_else(rand::random);

    tracing::info!(
        "Starting match: {} vs {} ({} games, seed={})",
        args.first,
        args.second,
        args.games,
        seed
    );

    let results = play_match(&args, &weights, seed)?;

    report_results(&results, &args)?;

    Ok(())
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Play all games in the match
fn play_match(args: &MatchArgs, weights: &Weights, seed: u64) -> Result<MatchResults> {
    let mut seed_rng = ChaCha8Rng::seed_from_u64(seed);
    let mut games = Vec::with_capacity(args.games);
    let mut first_wins = 0;
    let mut second_wins = 0;
    let mut draws = 0;

    for game_num in 0..args.games {
        // Alternate colors for fairness
        let first_is_black = game_num % 2 == 0;
        let (black_tier, white_tier) = if first_is_black {
            (args.first, args.second)
        } else {
            (args.second, args.first)
        };

        let record = play_single_game(
            game_num + 1,
            black_tier,
            white_tier,
            weights,
            seed_rng.gen(),
        )?;

        tracing::info!(
            "Game {}: {:?}, B {} - W {} ({} moves)",
            record.game_number,
            record.result,
            record.black_discs,
            record.white_discs,
            record.moves
        );

        match record.result {
            GameResult::BlackWins if first_is_black => first_wins += 1,
            GameResult::WhiteWins if !first_is_black => first_wins += 1,
            GameResult::BlackWins | GameResult::WhiteWins => second_wins += 1,
            GameResult::Draw => draws += 1,
            GameResult::Ongoing => bail!("game {} ended without a result", record.game_number),
        }
        games.push(record);
    }

    let avg_moves = if games.is_empty() {
        0.0
    } else {
        games.iter().map(|g| g.moves as f32).sum::<f32>() / games.len() as f32
    };

    Ok(MatchResults {
        first_player: args.first.to_string(),
        second_player: args.second.to_string(),
        first_wins,
        second_wins,
        draws,
        avg_moves,
        games,
    })
}

/// Print the aggregate report
fn report_results(results: &MatchResults, args: &MatchArgs) -> Result<()> {
    if args.json {
        println!("{}", serde_json::to_string_pretty(results)?);
        return Ok(());
    }

    println!(
        "{}: {} wins, {}: {} wins, {} draws (avg {:.1} moves/game)",
        results.first_player,
        results.first_wins,
        results.second_player,
        results.second_wins,
        results.draws,
        results.avg_moves
    );
    Ok(())
}

// ============================================================================
// LEVEL 3 - SINGLE GAME
// ============================================================================

fn play_single_game(
    game_number: usize,
    black_tier: Difficulty,
    white_tier: Difficulty,
    weights: &Weights,
    seed: u64,
) -> Result<GameRecord> {
    let mut black = ComputerPlayer::with_seed(black_tier, weights.clone(), seed);
    let mut white = ComputerPlayer::with_seed(white_tier, weights.clone(), seed.wrapping_add(1));

    let mut game = Game::new();
    let mut moves = 0;

    while !game.is_over() {
        let color = game.to_move();
        let player = if color == Color::Black {
            &mut black
        } else {
            &mut white
        };
        let pos = player
            .choose_move(game.board(), color)
            .context("side to move has no legal move")?;
        game.play(pos)
            .with_context(|| format!("game {}: applying {}", game_number, pos))?;
        moves += 1;

        // 60 placements fill the board; anything past that is a bug
        if moves > 64 {
            bail!("game {} did not terminate", game_number);
        }
    }

    let score = game.score();
    Ok(GameRecord {
        game_number,
        black_player: black_tier.to_string(),
        white_player: white_tier.to_string(),
        result: game.result(),
        black_discs: score.black,
        white_discs: score.white,
        moves,
    })
}
