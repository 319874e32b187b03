//! Y-reduction: collapse the board to a single win estimate
//!
//! The Hex board is embedded in a triangular Y board of side 2n - 1, with the
//! cells beyond the last row painted Red and the cells beyond the last column
//! painted Blue. Each reduction pass replaces every cell by
//! `(p1 + p2 + p3 - p1 * p2 * p3) / 2` over itself and its two lower
//! neighbors, shrinking the triangle by one row, until a single value in
//! [-1, 1] is left.

use super::ValueHeuristic;
use crate::board::BoardState;

#[derive(Clone, Copy, Debug, Default)]
pub struct YReductionValue;

impl YReductionValue {
    fn y_board(state: &BoardState) -> Vec<Vec<f64>> {
        let n = state.size();
        let side = 2 * n - 1;
        (0..side)
            .map(|x| {
                (0..side - x)
                    .map(|y| {
                        if x < n && y < n {
                            state.sign_at(x, y)
                        } else if x >= n {
                            -1.0
                        } else {
                            1.0
                        }
                    })
                    .collect()
            })
            .collect()
    }
}

impl ValueHeuristic for YReductionValue {
    fn name(&self) -> &'static str {
        "y-reduction"
    }

    fn compute(&self, state: &BoardState) -> f64 {
        let mut board = Self::y_board(state);
        let side = board.len();

        for width in (1..=side).rev() {
            for y in 0..width - 1 {
                for x in 0..width - 1 - y {
                    let p1 = board[x][y];
                    let p2 = board[x + 1][y];
                    let p3 = board[x][y + 1];
                    board[x][y] = (p1 + p2 + p3 - p1 * p2 * p3) / 2.0;
                }
            }
        }

        board[0][0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Move, Player};

    const EPS: f64 = 1e-12;

    #[test]
    fn test_empty_board_is_neutral() {
        for n in 2..=11 {
            let state = BoardState::new(n, Player::Blue).unwrap();
            assert!(YReductionValue.compute(&state).abs() < EPS);
        }
    }

    #[test]
    fn test_connected_blue_scores_one() {
        let cells: Vec<_> = (0..5).map(|c| (Move::new(3, c), Player::Blue)).collect();
        let state = BoardState::from_cells(5, Player::Red, &cells).unwrap();
        assert!((YReductionValue.compute(&state) - 1.0).abs() < EPS);
    }

    #[test]
    fn test_connected_red_scores_minus_one() {
        let cells: Vec<_> = (0..5).map(|r| (Move::new(r, 3), Player::Red)).collect();
        let state = BoardState::from_cells(5, Player::Blue, &cells).unwrap();
        assert!((YReductionValue.compute(&state) + 1.0).abs() < EPS);
    }

    #[test]
    fn test_stays_in_range() {
        let mut state = BoardState::new(6, Player::Blue).unwrap();
        for mv in [Move::new(2, 2), Move::new(3, 3), Move::new(1, 4), Move::new(4, 1)] {
            state.play(mv);
            let value = YReductionValue.compute(&state);
            assert!((-1.0..=1.0).contains(&value));
        }
    }
}
