//! Computer players: minimax search with alpha-beta pruning and the
//! difficulty tiers layered above it

use crate::board::{Board, Color, Pos};
use crate::eval::{evaluate, Weights};
use crate::rules::{apply_unchecked, capture_count, valid_moves};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Search depth for the hard tier
const HARD_DEPTH: u32 = 4;

/// Expert depth in the midgame
const EXPERT_DEPTH: u32 = 6;

/// Expert depth once the branching factor shrinks
const EXPERT_ENDGAME_DEPTH: u32 = 8;

/// Empty-cell count at which the expert tier deepens
const EXPERT_ENDGAME_EMPTIES: u32 = 20;

/// Default RNG seed for the beginner tier
const DEFAULT_SEED: u64 = 42;

// ============================================================================
// DIFFICULTY TIERS
// ============================================================================

/// Difficulty tier, selecting the move strategy
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// Uniformly random legal move
    Beginner,
    /// Greedy: maximize immediate captures
    Easy,
    /// Minimax at depth 4
    Hard,
    /// Minimax at depth 6, deepening to 8 near the endgame
    Expert,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Difficulty::Beginner => "beginner",
            Difficulty::Easy => "easy",
            Difficulty::Hard => "hard",
            Difficulty::Expert => "expert",
        };
        f.write_str(name)
    }
}

#[derive(Clone, Debug, thiserror::Error, PartialEq, Eq)]
#[error("unknown difficulty {0:?}, expected beginner, easy, hard, or expert")]
pub struct ParseDifficultyError(String);

impl FromStr for Difficulty {
    type Err = ParseDifficultyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "beginner" => Ok(Difficulty::Beginner),
            "easy" => Ok(Difficulty::Easy),
            "hard" => Ok(Difficulty::Hard),
            "expert" => Ok(Difficulty::Expert),
            other => Err(ParseDifficultyError(other.to_string())),
        }
    }
}

// ============================================================================
// COMPUTER PLAYER
// ============================================================================

/// A computer player: a difficulty tier, evaluation weights, and an owned
/// seeded RNG so every move sequence is reproducible.
pub struct ComputerPlayer {
    pub difficulty: Difficulty,
    pub weights: Weights,
    rng: ChaCha8Rng,
}

impl ComputerPlayer {
    pub fn new(difficulty: Difficulty, weights: Weights) -> Self {
        Self::with_seed(difficulty, weights, DEFAULT_SEED)
    }

    pub fn with_seed(difficulty: Difficulty, weights: Weights, seed: u64) -> Self {
        Self {
            difficulty,
            weights,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Pick a move for `color`, or `None` when `color` has no legal move
    pub fn choose_move(&mut self, board: &Board, color: Color) -> Option<Pos> {
        match self.difficulty {
            Difficulty::Beginner => random_move(board, color, &mut self.rng),
            Difficulty::Easy => greedy_move(board, color),
            Difficulty::Hard => find_best_move(board, color, HARD_DEPTH, &self.weights),
            Difficulty::Expert => {
                let depth = if board.empty_count() <= EXPERT_ENDGAME_EMPTIES {
                    EXPERT_ENDGAME_DEPTH
                } else {
                    EXPERT_DEPTH
                };
                find_best_move(board, color, depth, &self.weights)
            }
        }
    }
}

/// Uniformly random legal move
fn random_move<R: Rng>(board: &Board, color: Color, rng: &mut R) -> Option<Pos> {
    valid_moves(board, color).choose(rng).copied()
}

/// Legal move capturing the most discs, first seen on ties
fn greedy_move(board: &Board, color: Color) -> Option<Pos> {
    let mut best: Option<(Pos, usize)> = None;
    for pos in valid_moves(board, color) {
        let captures = capture_count(board, pos, color);
        if best.map_or(true, |(_, most)| captures > most) {
            best = Some((pos, captures));
        }
    }
    best.map(|(pos, _)| pos)
}

// ============================================================================
// MINIMAX WITH ALPHA-BETA
// ============================================================================

/// Best move for `color` by minimax lookahead, or `None` when `color` has no
/// legal move. Candidates are tried in row-major order and ties keep the
/// first move seen, so identical inputs always yield the identical move.
pub fn find_best_move(board: &Board, color: Color, depth: u32, weights: &Weights) -> Option<Pos> {
    let mut best: Option<(Pos, i32)> = None;
    for pos in valid_moves(board, color) {
        let child = apply_unchecked(board, pos, color);
        let score = minimax(
            &child,
            depth.saturating_sub(1),
            false,
            color,
            i32::MIN,
            i32::MAX,
            weights,
        );
        if best.map_or(true, |(_, top)| score > top) {
            best = Some((pos, score));
        }
    }
    best.map(|(pos, _)| pos)
}

/// Game-tree score of `board` for `perspective`, looking `depth` plies ahead.
///
/// A node where the side to move has no legal reply is treated as a leaf and
/// statically evaluated; the tree does not grant a forced pass and keep
/// descending.
fn minimax(
    board: &Board,
    depth: u32,
    maximizing: bool,
    perspective: Color,
    mut alpha: i32,
    mut beta: i32,
    weights: &Weights,
) -> i32 {
    if depth == 0 {
        return evaluate(board, perspective, weights);
    }

    let current = if maximizing {
        perspective
    } else {
        perspective.opponent()
    };
    let moves = valid_moves(board, current);
    if moves.is_empty() {
        return evaluate(board, perspective, weights);
    }

    if maximizing {
        let mut best = i32::MIN;
        for pos in moves {
            let child = apply_unchecked(board, pos, current);
            let score = minimax(&child, depth - 1, false, perspective, alpha, beta, weights);
            best = best.max(score);
            alpha = alpha.max(best);
            if beta <= alpha {
                break;
            }
        }
        best
    } else {
        let mut best = i32::MAX;
        for pos in moves {
            let child = apply_unchecked(board, pos, current);
            let score = minimax(&child, depth - 1, true, perspective, alpha, beta, weights);
            best = best.min(score);
            beta = beta.min(best);
            if beta <= alpha {
                break;
            }
        }
        best
    }
}
