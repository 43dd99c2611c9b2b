//! Position evaluation

use crate::board::{Board, Color};
use crate::rules::valid_moves;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Classic positional table. Corners dominate; the cells that hand the
/// opponent corner access are liabilities.
const POSITIONAL: [[i32; 8]; 8] = [
    [120, -20, 20, 5, 5, 20, -20, 120],
    [-20, -40, -5, -5, -5, -5, -40, -20],
    [20, -5, 15, 3, 3, 15, -5, 20],
    [5, -5, 3, 3, 3, 3, -5, 5],
    [5, -5, 3, 3, 3, 3, -5, 5],
    [20, -5, 15, 3, 3, 15, -5, 20],
    [-20, -40, -5, -5, -5, -5, -40, -20],
    [120, -20, 20, 5, 5, 20, -20, 120],
];

/// Heuristic weights for position evaluation
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Weights {
    /// Midgame value of holding each cell
    pub positional: [[i32; 8]; 8],
    /// Value of one disc once the endgame starts
    pub disc_value: i32,
    /// Weight for the legal-move-count differential
    pub mobility_factor: i32,
    /// Empty-cell count at which the endgame starts
    pub endgame_threshold: u32,
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            positional: POSITIONAL,
            disc_value: 100,
            mobility_factor: 10,
            endgame_threshold: 10,
        }
    }
}

impl Weights {
    /// Load weights from a JSON file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let weights: Weights = serde_json::from_str(&content)?;
        Ok(weights)
    }

    /// Save weights to a JSON file
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

/// Static evaluation of `board` from `color`'s perspective.
///
/// In the endgame (few empty cells) only material counts: each own disc is
/// worth `disc_value`, each opponent disc costs the same. Before that, the
/// positional table is summed with the owner's sign and the mobility
/// differential rewards keeping the opponent short of options.
pub fn evaluate(board: &Board, color: Color, weights: &Weights) -> i32 {
    if board.empty_count() <= weights.endgame_threshold {
        return material(board, color, weights.disc_value);
    }

    let mut score = 0;
    for (pos, cell) in board.cells() {
        let Some(owner) = cell else { continue };
        let value = weights.positional[pos.row as usize][pos.col as usize];
        if owner == color {
            score += value;
        } else {
            score -= value;
        }
    }

    let own_moves = valid_moves(board, color).len() as i32;
    let opponent_moves = valid_moves(board, color.opponent()).len() as i32;
    score + weights.mobility_factor * (own_moves - opponent_moves)
}

fn material(board: &Board, color: Color, disc_value: i32) -> i32 {
    let score = board.score();
    let own = score.of(color) as i32;
    let opponent = score.of(color.opponent()) as i32;
    disc_value * (own - opponent)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Color::{Black, White};
    use crate::board::Pos;

    /// Deep-endgame board: rows 0-5 black, row 6 white, row 7 nearly empty
    fn endgame_board() -> Board {
        let mut discs = Vec::new();
        for pos in Board::positions() {
            match pos.row {
                0..=5 => discs.push((pos, Black)),
                6 => discs.push((pos, White)),
                _ => {}
            }
        }
        // 48 black, 10 white, 6 empties
        discs.push((Pos::new(7, 0), White));
        discs.push((Pos::new(7, 7), White));
        Board::from_discs(&discs)
    }

    #[test]
    fn test_endgame_antisymmetry() {
        let board = endgame_board();
        let weights = Weights::default();
        assert!(board.empty_count() <= weights.endgame_threshold);

        let black = evaluate(&board, Black, &weights);
        let white = evaluate(&board, White, &weights);
        assert_eq!(black, -white);
        // 48 black vs 10 white discs
        assert_eq!(black, 100 * (48 - 10));
    }

    #[test]
    fn test_initial_position_is_balanced() {
        let board = Board::new();
        let weights = Weights::default();
        // Symmetric position, symmetric mobility
        assert_eq!(evaluate(&board, Black, &weights), 0);
        assert_eq!(evaluate(&board, White, &weights), 0);
    }

    #[test]
    fn test_corner_outweighs_center() {
        let weights = Weights::default();
        assert_eq!(weights.positional[0][0], 120);
        assert_eq!(weights.positional[0][1], -20);
        assert_eq!(weights.positional[1][1], -40);
        assert!(weights.positional[0][0] > weights.positional[3][3]);
    }

    #[test]
    fn test_mobility_differential() {
        // From the start, black playing d3 leaves white 3 replies while
        // black keeps more options: the evaluation must reflect mobility.
        let board = Board::new();
        let weights = Weights::default();
        let next = crate::rules::apply_move(&board, Pos::new(2, 3), Black).unwrap();

        let own = valid_moves(&next, Black).len() as i32;
        let opp = valid_moves(&next, White).len() as i32;

        let mut positional = 0;
        for (pos, cell) in next.cells() {
            let Some(owner) = cell else { continue };
            let v = weights.positional[pos.row as usize][pos.col as usize];
            positional += if owner == Black { v } else { -v };
        }
        assert_eq!(
            evaluate(&next, Black, &weights),
            positional + 10 * (own - opp)
        );
    }

    #[test]
    fn test_evaluate_is_pure() {
        let board = Board::new();
        let weights = Weights::default();
        let first = evaluate(&board, Black, &weights);
        assert_eq!(first, evaluate(&board, Black, &weights));
    }

    #[test]
    fn test_weights_round_trip() {
        let dir = std::env::temp_dir().join("reversi-weights-test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("weights.json");

        let weights = Weights::default();
        weights.save(&path).unwrap();
        let loaded = Weights::load(&path).unwrap();
        assert_eq!(loaded.positional, weights.positional);
        assert_eq!(loaded.disc_value, weights.disc_value);
        assert_eq!(loaded.mobility_factor, weights.mobility_factor);
        assert_eq!(loaded.endgame_threshold, weights.endgame_threshold);
    }
}
