//! Reversi Core - Rules engine and computer players
//!
//! This crate provides the core game logic for Reversi:
//! - 8x8 board model and the standard starting position
//! - Move legality, flip resolution, and move enumeration
//! - Phase-aware positional evaluation with a mobility heuristic
//! - Minimax search with alpha-beta pruning
//! - Difficulty tiers from random play to deep endgame search

pub mod board;
pub mod rules;
pub mod eval;
pub mod ai;
pub mod game;

// Re-exports for convenient access
pub use board::{Board, Cell, Color, Pos, Score, BOARD_SIZE, DIRECTIONS};
pub use rules::{
    apply_move, capture_count, flippable_cells, is_valid_move, valid_moves, MoveError,
};
pub use eval::{evaluate, Weights};
pub use ai::{find_best_move, ComputerPlayer, Difficulty};
pub use game::{Game, GameResult, PlayedMove};
