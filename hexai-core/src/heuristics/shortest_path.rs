//! Shortest-path distance between a player's edges

use std::collections::VecDeque;

use super::{red_minus_blue, ValueHeuristic};
use crate::board::{BoardState, Move, Player};

/// Compares how many empty cells each side still has to fill
#[derive(Clone, Copy, Debug, Default)]
pub struct ShortestPathValue;

impl ValueHeuristic for ShortestPathValue {
    fn name(&self) -> &'static str {
        "shortest-path"
    }

    fn compute(&self, state: &BoardState) -> f64 {
        red_minus_blue(state, edge_distance)
    }
}

/// Cheapest edge-to-edge chain for `player`.
///
/// Every empty cell on the chain costs 1, including the one on the first
/// edge; own stones are free and opponent stones block. The count is
/// lowered by one (never below 0) so an empty board of size n scores n - 1
/// from either edge. Returns `f64::INFINITY` when the opponent has cut
/// every chain.
pub fn edge_distance(state: &BoardState, player: Player) -> f64 {
    let n = state.size();
    let index = |mv: Move| mv.row * n + mv.col;
    let mut dist = vec![u32::MAX; n * n];
    let mut frontier = VecDeque::new();

    for i in 0..n {
        let cell = player.edge_cell(i, 0);
        let cost = match state.get(cell) {
            Some(owner) if owner == player => 0,
            Some(_) => continue,
            None => 1,
        };
        dist[index(cell)] = cost;
        if cost == 0 {
            frontier.push_front((cell, cost));
        } else {
            frontier.push_back((cell, cost));
        }
    }

    // 0-1 BFS: zero-cost steps go to the front, so pops never decrease
    while let Some((cell, d)) = frontier.pop_front() {
        if d > dist[index(cell)] {
            continue;
        }
        if player.progress(cell) == n - 1 {
            return d.saturating_sub(1) as f64;
        }
        for next in state.neighbors(cell) {
            let cost = match state.get(next) {
                Some(owner) if owner == player => 0,
                Some(_) => continue,
                None => 1,
            };
            let nd = d + cost;
            if nd < dist[index(next)] {
                dist[index(next)] = nd;
                if cost == 0 {
                    frontier.push_front((next, nd));
                } else {
                    frontier.push_back((next, nd));
                }
            }
        }
    }

    f64::INFINITY
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_board_is_symmetric() {
        for n in 2..=9 {
            let state = BoardState::new(n, Player::Blue).unwrap();
            assert_eq!(edge_distance(&state, Player::Blue), (n - 1) as f64);
            assert_eq!(edge_distance(&state, Player::Red), (n - 1) as f64);
            assert_eq!(ShortestPathValue.compute(&state), 0.0);
        }
    }

    #[test]
    fn test_own_stones_shorten_the_path() {
        let mut state = BoardState::new(5, Player::Blue).unwrap();
        state.play(Move::new(2, 2));
        assert_eq!(edge_distance(&state, Player::Blue), 3.0);
        assert_eq!(edge_distance(&state, Player::Red), 4.0);
        assert!(ShortestPathValue.compute(&state) > 0.0);
    }

    #[test]
    fn test_completed_chain_has_zero_distance() {
        let row: Vec<_> = (0..4).map(|c| (Move::new(1, c), Player::Blue)).collect();
        let state = BoardState::from_cells(4, Player::Red, &row).unwrap();
        assert_eq!(edge_distance(&state, Player::Blue), 0.0);
        assert_eq!(edge_distance(&state, Player::Red), f64::INFINITY);
        assert_eq!(ShortestPathValue.compute(&state), f64::INFINITY);
    }

    #[test]
    fn test_stone_counts_the_same_on_either_edge() {
        let near = BoardState::from_cells(5, Player::Red, &[(Move::new(2, 0), Player::Blue)]).unwrap();
        let far = BoardState::from_cells(5, Player::Red, &[(Move::new(2, 4), Player::Blue)]).unwrap();
        assert_eq!(edge_distance(&near, Player::Blue), 3.0);
        assert_eq!(edge_distance(&far, Player::Blue), 3.0);
        assert_eq!(ShortestPathValue.compute(&near), ShortestPathValue.compute(&far));
    }

    #[test]
    fn test_half_turn_rotation_keeps_distances() {
        let n = 6;
        let cells = [
            (Move::new(0, 0), Player::Blue),
            (Move::new(1, 4), Player::Blue),
            (Move::new(2, 2), Player::Red),
            (Move::new(3, 1), Player::Blue),
            (Move::new(4, 5), Player::Red),
            (Move::new(5, 3), Player::Red),
            (Move::new(2, 5), Player::Blue),
        ];
        let rotated: Vec<_> = cells
            .iter()
            .map(|&(mv, player)| (Move::new(n - 1 - mv.row, n - 1 - mv.col), player))
            .collect();
        let state = BoardState::from_cells(n, Player::Blue, &cells).unwrap();
        let turned = BoardState::from_cells(n, Player::Blue, &rotated).unwrap();

        for player in [Player::Blue, Player::Red] {
            assert_eq!(edge_distance(&state, player), edge_distance(&turned, player));
        }
        assert_eq!(ShortestPathValue.compute(&state), ShortestPathValue.compute(&turned));
    }

    #[test]
    fn test_opponent_wall_detour() {
        // Red wall on column 1 except the bottom cell forces Blue down there
        let cells: Vec<_> = (0..3).map(|r| (Move::new(r, 1), Player::Red)).collect();
        let state = BoardState::from_cells(4, Player::Blue, &cells).unwrap();
        assert_eq!(edge_distance(&state, Player::Blue), 3.0);
    }
}
