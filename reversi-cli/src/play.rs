//! Play command - interactive game against a computer player
//!
//! The turn loop is an explicit state machine: the human's turn waits on
//! stdin, the computer's turn runs move selection behind an optional pacing
//! delay, and the game-over state prints the outcome. The engine itself
//! never sees the delay.

use std::io::{self, BufRead, Write as _};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Args;

use reversi_core::{Board, Color, ComputerPlayer, Difficulty, Game, GameResult, MoveError, Pos, Weights};

#[derive(Args)]
pub struct PlayArgs {
    /// Computer difficulty (beginner, easy, hard, expert)
    #[arg(long, default_value = "hard")]
    pub difficulty: Difficulty,

    /// Color the human plays
    #[arg(long, default_value = "black", value_parser = parse_color)]
    pub color: Color,

    /// Pause before the computer's move is applied, in milliseconds
    #[arg(long, default_value = "0")]
    pub delay_ms: u64,

    /// Evaluation weights JSON file (built-in defaults when omitted)
    #[arg(long, value_name = "FILE")]
    pub weights: Option<PathBuf>,
}

fn parse_color(s: &str) -> Result<Color, String> {
    match s {
        "black" => Ok(Color::Black),
        "white" => Ok(Color::White),
        other => Err(format!("unknown color {other:?}, expected black or white")),
    }
}

/// Turn-loop states
enum Phase {
    HumanTurn,
    ComputerTurn,
    GameOver,
}

fn phase(game: &Game, human: Color) -> Phase {
    if game.is_over() {
        Phase::GameOver
    } else if game.to_move() == human {
        Phase::HumanTurn
    } else {
        Phase::ComputerTurn
    }
}

pub fn run(args: PlayArgs, seed: Option<u64>) -> Result<()> {
    let weights = load_weights(args.weights.as_deref())?;
    let seed = seed.unwrap_or_else(rand::random);
    tracing::info!("seed {}", seed);

    let mut computer = ComputerPlayer::with_seed(args.difficulty, weights, seed);
    let human = args.color;
    let mut game = Game::new();

    println!(
        "You play {} against the {} computer. Enter moves like d3, or quit.",
        color_name(human),
        args.difficulty
    );

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        match phase(&game, human) {
            Phase::GameOver => {
                println!("{}", render(game.board(), &[]));
                print_outcome(&game);
                return Ok(());
            }
            Phase::HumanTurn => {
                let hints = game.legal_moves();
                println!("{}", render(game.board(), &hints));
                let score = game.score();
                print!("B {} - W {}  your move> ", score.black, score.white);
                io::stdout().flush()?;

                let Some(line) = lines.next() else {
                    println!();
                    return Ok(());
                };
                let line = line.context("reading move")?;
                let input = line.trim();
                if input.is_empty() {
                    continue;
                }
                if input == "quit" || input == "q" {
                    return Ok(());
                }
                let Some(pos) = parse_pos(input) else {
                    println!("Could not read {input:?}; use column+row, e.g. d3.");
                    continue;
                };
                match game.play(pos) {
                    Ok(played) => {
                        if played.opponent_passed {
                            println!("Computer has no reply and passes; you move again.");
                        }
                    }
                    Err(MoveError::Illegal { .. }) => {
                        println!("{} is not a legal move.", pos);
                    }
                    Err(err) => return Err(err.into()),
                }
            }
            Phase::ComputerTurn => {
                if args.delay_ms > 0 {
                    std::thread::sleep(Duration::from_millis(args.delay_ms));
                }
                let color = game.to_move();
                let pos = computer
                    .choose_move(game.board(), color)
                    .context("computer to move but no legal move available")?;
                let played = game.play(pos)?;
                println!(
                    "Computer plays {} flipping {} disc{}.",
                    pos,
                    played.flipped.len(),
                    if played.flipped.len() == 1 { "" } else { "s" }
                );
                if played.opponent_passed {
                    println!("You have no reply; computer moves again.");
                }
            }
        }
    }
}

pub(crate) fn load_weights(path: Option<&std::path::Path>) -> Result<Weights> {
    match path {
        Some(path) => Weights::load(path)
            .with_context(|| format!("failed to load weights: {}", path.display())),
        None => Ok(Weights::default()),
    }
}

fn color_name(color: Color) -> &'static str {
    match color {
        Color::Black => "black",
        Color::White => "white",
    }
}

/// Parse algebraic coordinates: column a-h, row 1-8
fn parse_pos(input: &str) -> Option<Pos> {
    let mut chars = input.chars();
    let col = chars.next()?.to_ascii_lowercase();
    let row = chars.next()?;
    if chars.next().is_some() {
        return None;
    }
    if !('a'..='h').contains(&col) || !('1'..='8').contains(&row) {
        return None;
    }
    Some(Pos::new(row as i8 - '1' as i8, col as i8 - 'a' as i8))
}

/// ASCII board: B black, W white, * legal move, . empty
fn render(board: &Board, hints: &[Pos]) -> String {
    let mut out = String::from("  a b c d e f g h\n");
    for row in 0..8 {
        out.push_str(&format!("{} ", row + 1));
        for col in 0..8 {
            let pos = Pos::new(row, col);
            let glyph = match board.get(pos).flatten() {
                Some(Color::Black) => 'B',
                Some(Color::White) => 'W',
                None if hints.contains(&pos) => '*',
                None => '.',
            };
            out.push(glyph);
            out.push(' ');
        }
        out.pop();
        out.push('\n');
    }
    out.pop();
    out
}

fn print_outcome(game: &Game) {
    let score = game.score();
    let verdict = match game.result() {
        GameResult::BlackWins => "Black wins!",
        GameResult::WhiteWins => "White wins!",
        GameResult::Draw => "Draw.",
        GameResult::Ongoing => "Game still in progress.",
    };
    println!("Game over: B {} - W {}. {}", score.black, score.white, verdict);
}
