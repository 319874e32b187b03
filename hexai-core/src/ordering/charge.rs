//! Field-curvature ordering
//!
//! Stones and edges are treated as electric charges (Blue positive, Red
//! negative) and moves are ranked by how sharply the resulting field bends
//! around each empty cell, which picks out contested saddle points first.
//!
//! The field only changes by one charge per move, so the fields after each
//! move of the current game are cached and reused while the game history
//! keeps the same prefix.

use super::OrderHeuristic;
use crate::board::{BoardState, Move, Player};

/// Charge magnitude of a stone; field values are clamped to +/- this
pub const MAX_CHARGE: f64 = 9.0;

/// (n + 2) x (n + 2) grid indexed `[row + 1][col + 1]`; the outer ring holds
/// the edge charges
type Field = Vec<Vec<f64>>;

#[derive(Clone, Debug)]
struct CachedField {
    mv: Move,
    sign: f64,
    field: Field,
}

/// Orders moves by the curvature of the charge field
#[derive(Clone, Debug)]
pub struct ChargeOrder {
    size: usize,
    base: Field,
    cache: Vec<CachedField>,
}

impl ChargeOrder {
    pub fn new(size: usize) -> Self {
        Self {
            size,
            base: base_field(size),
            cache: Vec::new(),
        }
    }

    /// Number of history positions whose field is cached
    pub fn cached_len(&self) -> usize {
        self.cache.len()
    }

    /// Field of the current position, reusing the cached prefix of the game
    fn field(&mut self, state: &BoardState) -> Field {
        if state.size() != self.size {
            *self = Self::new(state.size());
        }

        let history = state.history();
        let signs: Vec<f64> = history
            .iter()
            .map(|&mv| state.get(mv).map_or(0.0, Player::sign))
            .collect();

        let shared = self
            .cache
            .iter()
            .zip(history.iter().zip(&signs))
            .take_while(|(cached, (&mv, &sign))| cached.mv == mv && cached.sign == sign)
            .count();
        self.cache.truncate(shared);

        let mut field = self
            .cache
            .last()
            .map_or_else(|| self.base.clone(), |cached| cached.field.clone());

        for (&mv, &sign) in history.iter().zip(&signs).skip(shared) {
            add_charge(&mut field, sign, mv.col as isize, mv.row as isize);
            self.cache.push(CachedField {
                mv,
                sign,
                field: field.clone(),
            });
        }

        field
    }

    /// Curvature score of every board cell, `[row][col]`
    pub fn cell_scores(&mut self, state: &BoardState) -> Vec<Vec<f64>> {
        let field = self.field(state);
        let turn = state.turn().sign();
        let n = state.size();

        (1..=n)
            .map(|y| {
                (1..=n)
                    .map(|x| {
                        let samples = [
                            curve(field[y][x - 1], field[y][x], field[y][x + 1]),
                            curve(field[y + 1][x - 1], field[y][x], field[y - 1][x + 1]),
                            curve(field[y + 1][x], field[y][x], field[y - 1][x]),
                        ];
                        let min = samples.iter().copied().fold(f64::INFINITY, f64::min);
                        let max = samples.iter().copied().fold(f64::NEG_INFINITY, f64::max);
                        min * max * -turn
                    })
                    .collect()
            })
            .collect()
    }
}

impl OrderHeuristic for ChargeOrder {
    fn name(&self) -> &'static str {
        "charge"
    }

    fn order(&mut self, state: &BoardState, mut moves: Vec<Move>) -> Vec<Move> {
        let scores = self.cell_scores(state);
        let turn = state.turn().sign();
        let key = |mv: &Move| scores[mv.row][mv.col] * -turn;
        moves.sort_by(|a, b| key(a).total_cmp(&key(b)));
        moves
    }
}

/// Edge charges: Blue's columns positive, Red's rows negative
fn base_field(size: usize) -> Field {
    let mut field = vec![vec![0.0; size + 2]; size + 2];
    let n = size as isize;
    for i in 0..n {
        add_charge(&mut field, 1.0, -1, i);
        add_charge(&mut field, 1.0, n, i);
        add_charge(&mut field, -1.0, i, -1);
        add_charge(&mut field, -1.0, i, n);
    }
    field
}

/// Hex distance between two cells given as (x, y) = (col, row)
fn distance(x1: isize, y1: isize, x2: isize, y2: isize) -> isize {
    let (dx, dy) = (x2 - x1, y2 - y1);
    (dx.abs() + dy.abs()).min(dx.abs() + (dy + dx).abs())
}

/// Drop a charge of `sign` at board coordinate (x, y); -1 and n address the
/// padding ring. Cells already at full charge are left alone.
fn add_charge(field: &mut Field, sign: f64, x: isize, y: isize) {
    let (x, y) = (x + 1, y + 1);
    for (y2, row) in field.iter_mut().enumerate() {
        for (x2, value) in row.iter_mut().enumerate() {
            if value.abs() == MAX_CHARGE {
                continue;
            }
            let (x2, y2) = (x2 as isize, y2 as isize);
            if (x2, y2) == (x, y) {
                *value = sign * MAX_CHARGE;
            } else {
                let d = distance(x, y, x2, y2) as f64;
                *value += sign / (d * d);
            }
            *value = value.clamp(-MAX_CHARGE, MAX_CHARGE);
        }
    }
}

/// Second difference of a saddle or peak; 0 for monotone triples
fn curve(h1: f64, h2: f64, h3: f64) -> f64 {
    if h2 == h1.min(h2).min(h3) || h2 == h1.max(h2).max(h3) {
        (h1 - h2) + (h3 - h2)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn play_all(state: &mut BoardState, moves: &[Move]) {
        for &mv in moves {
            assert!(state.play(mv));
        }
    }

    #[test]
    fn test_curve() {
        assert_eq!(curve(1.0, 0.0, 1.0), 2.0);
        assert_eq!(curve(-1.0, 0.5, 0.0), -2.0);
        assert_eq!(curve(0.0, 1.0, 2.0), 0.0);
    }

    #[test]
    fn test_hex_distance() {
        assert_eq!(distance(0, 0, 1, -1), 1);
        assert_eq!(distance(0, 0, 1, 1), 2);
        assert_eq!(distance(2, 2, 0, 4), 2);
        assert_eq!(distance(0, 0, 3, 0), 3);
    }

    #[test]
    fn test_base_field_edges_are_charged() {
        let field = base_field(4);
        for i in 1..=4 {
            assert_eq!(field[i][0], MAX_CHARGE);
            assert_eq!(field[i][5], MAX_CHARGE);
            assert_eq!(field[0][i], -MAX_CHARGE);
            assert_eq!(field[5][i], -MAX_CHARGE);
        }
        assert!(field.iter().flatten().all(|v| v.abs() <= MAX_CHARGE));
    }

    #[test]
    fn test_order_is_permutation() {
        let mut state = BoardState::new(6, Player::Blue).unwrap();
        play_all(&mut state, &[Move::new(2, 3), Move::new(3, 2)]);
        let moves = state.available_moves();

        let mut ordered = ChargeOrder::new(6).order(&state, moves.clone());
        assert_eq!(ordered.len(), moves.len());
        ordered.sort();
        assert_eq!(ordered, moves);
    }

    #[test]
    fn test_incremental_matches_fresh() {
        let moves = [Move::new(1, 1), Move::new(2, 2), Move::new(0, 3), Move::new(3, 0)];
        let mut state = BoardState::new(5, Player::Red).unwrap();
        let mut incremental = ChargeOrder::new(5);
        for &mv in &moves {
            state.play(mv);
            incremental.order(&state, state.available_moves());
        }

        let mut fresh = ChargeOrder::new(5);
        assert_eq!(incremental.cell_scores(&state), fresh.cell_scores(&state));
        assert_eq!(
            incremental.order(&state, state.available_moves()),
            fresh.order(&state, state.available_moves())
        );
    }

    #[test]
    fn test_divergent_history_truncates_cache() {
        let mut state = BoardState::new(5, Player::Blue).unwrap();
        play_all(&mut state, &[Move::new(0, 0), Move::new(1, 1), Move::new(2, 2)]);
        let mut order = ChargeOrder::new(5);
        order.cell_scores(&state);
        assert_eq!(order.cached_len(), 3);

        state.undo().unwrap();
        state.undo().unwrap();
        assert_eq!(order.cell_scores(&state), ChargeOrder::new(5).cell_scores(&state));
        assert_eq!(order.cached_len(), 1);

        play_all(&mut state, &[Move::new(4, 4)]);
        assert_eq!(order.cell_scores(&state), ChargeOrder::new(5).cell_scores(&state));
        assert_eq!(order.cached_len(), 2);
    }

    #[test]
    fn test_new_board_size_resets_cache() {
        let mut order = ChargeOrder::new(5);
        let mut state = BoardState::new(5, Player::Blue).unwrap();
        state.play(Move::new(2, 2));
        order.cell_scores(&state);

        let small = BoardState::new(3, Player::Blue).unwrap();
        let scores = order.cell_scores(&small);
        assert_eq!(scores.len(), 3);
        assert_eq!(order.cached_len(), 0);
    }
}
