//! Game session: turn order, passes, and game-over detection
//!
//! The engine functions in `rules` are pure board-in, board-out. `Game`
//! layers the turn loop on top: after every move the opponent takes the
//! turn if they have a reply, the mover keeps it if only they do, and the
//! game ends when neither side can move.

use crate::board::{Board, Color, Pos, Score};
use crate::rules::{flippable_cells, place_and_flip, valid_moves, MoveError};
use serde::{Deserialize, Serialize};

/// Game outcome
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    Ongoing,
    BlackWins,
    WhiteWins,
    Draw,
}

/// One applied move and its consequences
#[derive(Clone, Debug, PartialEq)]
pub struct PlayedMove {
    pub pos: Pos,
    pub color: Color,
    /// Discs the move flipped, in scan order
    pub flipped: Vec<Pos>,
    /// Tally after the move
    pub score: Score,
    /// True when the opponent had no reply and the turn stayed with the mover
    pub opponent_passed: bool,
}

/// A game in progress (clone to fork)
#[derive(Clone, Debug)]
pub struct Game {
    board: Board,
    to_move: Color,
    result: GameResult,
}

impl Game {
    /// New game: standard starting position, black to move
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            to_move: Color::Black,
            result: GameResult::Ongoing,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The side to move. Meaningless once the game is over.
    pub fn to_move(&self) -> Color {
        self.to_move
    }

    pub fn result(&self) -> GameResult {
        self.result
    }

    pub fn is_over(&self) -> bool {
        self.result != GameResult::Ongoing
    }

    pub fn score(&self) -> Score {
        self.board.score()
    }

    /// Legal moves for the side to move, row-major
    pub fn legal_moves(&self) -> Vec<Pos> {
        valid_moves(&self.board, self.to_move)
    }

    /// Play a move for the side to move.
    ///
    /// While the game is ongoing the side to move always has at least one
    /// legal move; passes are resolved here, not surfaced as turns.
    pub fn play(&mut self, pos: Pos) -> Result<PlayedMove, MoveError> {
        if self.is_over() {
            return Err(MoveError::GameOver);
        }

        let color = self.to_move;
        let flipped = flippable_cells(&self.board, pos, color)?;
        if flipped.is_empty() {
            return Err(MoveError::Illegal { pos, color });
        }

        self.board = place_and_flip(&self.board, pos, color, &flipped);
        let score = self.board.score();

        let opponent = color.opponent();
        let opponent_passed = if !valid_moves(&self.board, opponent).is_empty() {
            self.to_move = opponent;
            false
        } else if !valid_moves(&self.board, color).is_empty() {
            // Opponent passes; the mover goes again
            true
        } else {
            self.result = final_result(score);
            false
        };

        Ok(PlayedMove {
            pos,
            color,
            flipped,
            score,
            opponent_passed,
        })
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

fn final_result(score: Score) -> GameResult {
    match score.black.cmp(&score.white) {
        std::cmp::Ordering::Greater => GameResult::BlackWins,
        std::cmp::Ordering::Less => GameResult::WhiteWins,
        std::cmp::Ordering::Equal => GameResult::Draw,
    }
}
