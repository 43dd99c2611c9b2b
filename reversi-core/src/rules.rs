//! Move legality, flip resolution, and move enumeration

use crate::board::{Board, Color, Pos, DIRECTIONS};
use thiserror::Error;

/// Errors for move queries and move application
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum MoveError {
    #[error("position ({row}, {col}) is off the 8x8 board")]
    OutOfBounds { row: i8, col: i8 },

    #[error("no legal {color:?} move at {pos}")]
    Illegal { pos: Pos, color: Color },

    #[error("the game is already over")]
    GameOver,
}

impl MoveError {
    fn out_of_bounds(pos: Pos) -> Self {
        MoveError::OutOfBounds {
            row: pos.row,
            col: pos.col,
        }
    }
}

/// Length of the bracketed run of opponent discs when walking from `pos`
/// along `dir`: one or more opponent discs immediately followed by a
/// mover-colored disc. 0 when the walk hits empty or the edge first.
///
/// Legality and flip collection both reduce to this scan.
fn capture_run(board: &Board, pos: Pos, color: Color, dir: (i8, i8)) -> usize {
    let mut len = 0;
    let mut cur = pos.step(dir);
    while cur.is_valid() {
        match board.at(cur) {
            None => return 0,
            Some(c) if c == color => return len,
            Some(_) => {
                len += 1;
                cur = cur.step(dir);
            }
        }
    }
    0
}

/// Legality for an in-range, already-bounds-checked position
fn legal_at(board: &Board, pos: Pos, color: Color) -> bool {
    board.at(pos).is_none()
        && DIRECTIONS
            .iter()
            .any(|&dir| capture_run(board, pos, color, dir) > 0)
}

/// Whether placing `color` at `pos` is legal. Fails closed on a non-empty
/// target; out-of-range positions are rejected outright.
pub fn is_valid_move(board: &Board, pos: Pos, color: Color) -> Result<bool, MoveError> {
    if !pos.is_valid() {
        return Err(MoveError::out_of_bounds(pos));
    }
    Ok(legal_at(board, pos, color))
}

/// Captured discs for an in-range position with an empty target, in
/// direction order then distance order
fn collect_flips(board: &Board, pos: Pos, color: Color) -> Vec<Pos> {
    let mut flips = Vec::new();
    for &dir in &DIRECTIONS {
        let len = capture_run(board, pos, color, dir);
        let mut cur = pos.step(dir);
        for _ in 0..len {
            flips.push(cur);
            cur = cur.step(dir);
        }
    }
    flips
}

/// The set of discs captured by placing `color` at `pos`, excluding the
/// placed cell. Ordered by direction, then by distance from `pos`. Empty
/// when the move captures nothing (and is therefore not legal).
pub fn flippable_cells(board: &Board, pos: Pos, color: Color) -> Result<Vec<Pos>, MoveError> {
    if !pos.is_valid() {
        return Err(MoveError::out_of_bounds(pos));
    }
    if board.at(pos).is_some() {
        return Ok(Vec::new());
    }
    Ok(collect_flips(board, pos, color))
}

/// Place `color` at `pos` and flip `flips` on a fresh copy of `board`
pub(crate) fn place_and_flip(board: &Board, pos: Pos, color: Color, flips: &[Pos]) -> Board {
    let mut next = *board;
    next.set(pos, Some(color));
    for &p in flips {
        next.set(p, Some(color));
    }
    next
}

/// Apply a move, producing a fresh board. The input board is unchanged.
pub fn apply_move(board: &Board, pos: Pos, color: Color) -> Result<Board, MoveError> {
    let flips = flippable_cells(board, pos, color)?;
    if flips.is_empty() {
        return Err(MoveError::Illegal { pos, color });
    }
    Ok(place_and_flip(board, pos, color, &flips))
}

/// Apply a move taken from `valid_moves` without re-validating it
pub(crate) fn apply_unchecked(board: &Board, pos: Pos, color: Color) -> Board {
    let flips = collect_flips(board, pos, color);
    place_and_flip(board, pos, color, &flips)
}

/// All legal moves for `color`, in row-major order. Row-major order is the
/// tie-break order for every move-selection strategy.
pub fn valid_moves(board: &Board, color: Color) -> Vec<Pos> {
    Board::positions()
        .filter(|&pos| legal_at(board, pos, color))
        .collect()
}

/// Number of discs the move at `pos` would capture, 0 for an illegal or
/// out-of-range move
pub fn capture_count(board: &Board, pos: Pos, color: Color) -> usize {
    if !pos.is_valid() || board.at(pos).is_some() {
        return 0;
    }
    DIRECTIONS
        .iter()
        .map(|&dir| capture_run(board, pos, color, dir))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Color::{Black, White};

    #[test]
    fn test_initial_moves_for_black() {
        let board = Board::new();
        let moves = valid_moves(&board, Black);
        assert_eq!(
            moves,
            vec![
                Pos::new(2, 3),
                Pos::new(3, 2),
                Pos::new(4, 5),
                Pos::new(5, 4),
            ]
        );
    }

    #[test]
    fn test_enumeration_matches_legality() {
        let board = Board::new();
        for color in [Black, White] {
            let moves = valid_moves(&board, color);
            for pos in Board::positions() {
                let legal = is_valid_move(&board, pos, color).unwrap();
                assert_eq!(legal, moves.contains(&pos), "mismatch at {}", pos);
            }
            // Row-major order, no duplicates
            let mut sorted = moves.clone();
            sorted.sort_by_key(|p| (p.row, p.col));
            sorted.dedup();
            assert_eq!(moves, sorted);
        }
    }

    #[test]
    fn test_occupied_cell_fails_closed() {
        let board = Board::new();
        assert_eq!(is_valid_move(&board, Pos::new(3, 3), Black), Ok(false));
        assert_eq!(flippable_cells(&board, Pos::new(3, 3), Black), Ok(vec![]));
    }

    #[test]
    fn test_out_of_bounds_is_an_error() {
        let board = Board::new();
        let err = is_valid_move(&board, Pos::new(-1, 4), Black).unwrap_err();
        assert_eq!(err, MoveError::OutOfBounds { row: -1, col: 4 });
        assert!(flippable_cells(&board, Pos::new(8, 0), Black).is_err());
        assert!(apply_move(&board, Pos::new(0, 9), Black).is_err());
    }

    #[test]
    fn test_opening_move_flips_one_disc() {
        let board = Board::new();
        let flips = flippable_cells(&board, Pos::new(2, 3), Black).unwrap();
        assert_eq!(flips, vec![Pos::new(3, 3)]);

        let next = apply_move(&board, Pos::new(2, 3), Black).unwrap();
        let score = next.score();
        assert_eq!(score.black, 4);
        assert_eq!(score.white, 1);
        assert_eq!(next.get(Pos::new(3, 3)), Some(Some(Black)));
        // Input board untouched
        assert_eq!(board.get(Pos::new(3, 3)), Some(Some(White)));
    }

    #[test]
    fn test_apply_adds_one_plus_captures() {
        let board = Board::new();
        for pos in valid_moves(&board, Black) {
            let flips = flippable_cells(&board, pos, Black).unwrap();
            let next = apply_move(&board, pos, Black).unwrap();

            let before = board.score();
            let after = next.score();
            assert_eq!(
                after.black + after.white,
                before.black + before.white + 1,
                "total disc count grows by exactly one"
            );
            assert_eq!(after.black, before.black + 1 + flips.len() as u32);
            assert_eq!(after.white, before.white - flips.len() as u32);

            // Captured cells flip, everything else is unchanged
            for (p, cell) in next.cells() {
                if p == pos || flips.contains(&p) {
                    assert_eq!(cell, Some(Black));
                } else {
                    assert_eq!(cell, board.at(p));
                }
            }
        }
    }

    #[test]
    fn test_no_captures_means_illegal() {
        let board = Board::new();
        // A far corner captures nothing from the starting position
        assert_eq!(is_valid_move(&board, Pos::new(0, 0), Black), Ok(false));
        assert_eq!(
            apply_move(&board, Pos::new(0, 0), Black),
            Err(MoveError::Illegal {
                pos: Pos::new(0, 0),
                color: Black,
            })
        );
    }

    #[test]
    fn test_flip_order_is_deterministic() {
        // Black at d1 brackets both the column below and the diagonal
        let board = Board::from_discs(&[
            (Pos::new(1, 3), White),
            (Pos::new(2, 3), White),
            (Pos::new(3, 3), Black),
            (Pos::new(1, 4), White),
            (Pos::new(2, 5), Black),
        ]);
        let flips = flippable_cells(&board, Pos::new(0, 3), Black).unwrap();
        // Direction order (down before down-right), then distance order
        assert_eq!(
            flips,
            vec![Pos::new(1, 3), Pos::new(2, 3), Pos::new(1, 4)]
        );
    }

    #[test]
    fn test_capture_count_matches_flippable() {
        let board = Board::new();
        for pos in Board::positions() {
            let flips = flippable_cells(&board, pos, White).unwrap();
            assert_eq!(capture_count(&board, pos, White), flips.len());
        }
    }

    #[test]
    fn test_run_must_be_bracketed() {
        // A run that walks off the edge captures nothing
        let board = Board::from_discs(&[(Pos::new(0, 1), White), (Pos::new(0, 0), White)]);
        assert_eq!(is_valid_move(&board, Pos::new(0, 2), Black), Ok(false));

        // A run that ends at empty captures nothing
        let board = Board::from_discs(&[(Pos::new(0, 1), White)]);
        assert_eq!(is_valid_move(&board, Pos::new(0, 2), Black), Ok(false));
    }
}
