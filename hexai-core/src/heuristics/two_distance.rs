//! Two-distance: shortest path that only trusts doubly-supported cells
//!
//! A cell's distance is accepted once it has been reached from two different
//! neighbors, so an opponent cannot cut the path with a single stone. The
//! edge a player starts from counts as a pair of distinct neighbors for every
//! cell on it, and a block of own stones passes on the neighbor that entered it.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use super::{red_minus_blue, ShortestPathValue, ValueHeuristic};
use crate::board::{BoardState, Move, Player, DIRECTIONS};

/// Bias added to the shortest-path score when one side's two-distance is
/// unbounded
pub const UNREACHABLE_PENALTY: f64 = 100.0;

/// Two-distance evaluator with a shortest-path fallback
#[derive(Clone, Copy, Debug, Default)]
pub struct TwoDistanceValue;

impl ValueHeuristic for TwoDistanceValue {
    fn name(&self) -> &'static str {
        "two-distance"
    }

    fn compute(&self, state: &BoardState) -> f64 {
        let score = red_minus_blue(state, two_distance);
        if score.is_nan() {
            ShortestPathValue.compute(state)
        } else if score.is_infinite() {
            UNREACHABLE_PENALTY.copysign(score) + ShortestPathValue.compute(state)
        } else {
            score
        }
    }
}

/// Signed cell coordinate; virtual edge cells sit one step off the board
type Coord = (isize, isize);

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
struct Entry {
    dist: u32,
    /// Progress coordinate; 0 means the cell lies on the goal edge
    remaining: isize,
    row: isize,
    col: isize,
    /// Neighbor the cell was reached through
    via: Coord,
}

/// Two-distance of `player`, searching from their far edge back to their
/// first edge. `f64::INFINITY` if no doubly-supported route exists.
pub fn two_distance(state: &BoardState, player: Player) -> f64 {
    let n = state.size() as isize;
    let remaining = |row: isize, col: isize| match player {
        Player::Blue => col,
        Player::Red => row,
    };
    let index = |row: isize, col: isize| (row * n + col) as usize;

    let mut queue = BinaryHeap::new();
    for i in -1..n {
        let (row, col) = match player {
            Player::Blue => (i, n),
            Player::Red => (n, i),
        };
        queue.push(Reverse(Entry {
            dist: 0,
            remaining: n,
            row,
            col,
            via: (row, col),
        }));
    }

    let mut via: Vec<Option<Coord>> = vec![None; (n * n) as usize];
    let mut settled = vec![false; (n * n) as usize];
    let mut goal_via: Option<Coord> = None;

    while let Some(Reverse(entry)) = queue.pop() {
        if entry.remaining == 0 {
            match goal_via {
                None => goal_via = Some(entry.via),
                Some(first) if first != entry.via => return entry.dist as f64,
                Some(_) => {}
            }
        }

        for (dr, dc) in DIRECTIONS {
            let (row, col) = (entry.row + dr, entry.col + dc);
            if row < 0 || col < 0 || row >= n || col >= n {
                continue;
            }
            let idx = index(row, col);
            if settled[idx] {
                continue;
            }

            match state.get(Move::new(row as usize, col as usize)) {
                None => match via[idx] {
                    None => via[idx] = Some(entry.via),
                    Some(first) if first != entry.via => {
                        settled[idx] = true;
                        queue.push(Reverse(Entry {
                            dist: entry.dist + 1,
                            remaining: remaining(row, col),
                            row,
                            col,
                            via: (row, col),
                        }));
                    }
                    Some(_) => {}
                },
                Some(owner) if owner == player => {
                    let spread = match via[idx] {
                        None => true,
                        Some(first) if first != entry.via => {
                            settled[idx] = true;
                            true
                        }
                        Some(_) => false,
                    };
                    if spread {
                        via[idx] = Some(entry.via);
                        queue.push(Reverse(Entry {
                            dist: entry.dist,
                            remaining: remaining(row, col),
                            row,
                            col,
                            via: entry.via,
                        }));
                    }
                }
                Some(_) => {}
            }
        }
    }

    f64::INFINITY
}
