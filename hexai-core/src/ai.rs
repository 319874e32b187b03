//! Search-based Hex player

use crate::board::{BoardState, Move, Player};
use crate::heuristics::ValueHeuristic;
use crate::ordering::OrderHeuristic;
use crate::search::{search, Algorithm};

/// Computer player: picks moves by searching with its own heuristics
pub struct HexAi {
    pub max_depth: Option<usize>,
    pub algorithm: Algorithm,
    value: Box<dyn ValueHeuristic>,
    order: Box<dyn OrderHeuristic>,
}

impl HexAi {
    pub fn new(
        max_depth: Option<usize>,
        algorithm: Algorithm,
        value: Box<dyn ValueHeuristic>,
        order: Box<dyn OrderHeuristic>,
    ) -> Self {
        Self {
            max_depth,
            algorithm,
            value,
            order,
        }
    }

    pub fn value_name(&self) -> &'static str {
        self.value.name()
    }

    pub fn order_name(&self) -> &'static str {
        self.order.name()
    }

    /// Static evaluation of a position with this player's value heuristic
    pub fn evaluate(&self, state: &BoardState) -> f64 {
        self.value.compute(state)
    }

    /// Choose a move for the side to act without changing the position.
    ///
    /// None once the game is decided or the board is full. The first move of
    /// a game is always the center cell.
    pub fn select_move(&mut self, state: &mut BoardState) -> Option<Move> {
        if state.check_winner().is_some() || state.available_moves().is_empty() {
            return None;
        }

        if state.is_empty_board() {
            let center = state.size() / 2;
            return Some(Move::new(center, center));
        }

        let maximize = state.turn() == Player::Blue;
        let outcome = search(
            self.algorithm,
            state,
            maximize,
            self.max_depth,
            self.value.as_ref(),
            self.order.as_mut(),
        );
        outcome.best_move
    }

    /// Select a move and play it
    pub fn play_turn(&mut self, state: &mut BoardState) -> Option<Move> {
        let mv = self.select_move(state)?;
        state.play(mv).then_some(mv)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heuristics::{ShortestPathValue, TwoDistanceValue};
    use crate::ordering::{ChargeOrder, RandomOrder};

    fn ai(depth: usize) -> HexAi {
        HexAi::new(
            Some(depth),
            Algorithm::AlphaBeta,
            Box::new(ShortestPathValue),
            Box::new(RandomOrder::with_seed(1)),
        )
    }

    #[test]
    fn test_opens_in_center() {
        for (size, center) in [(5, 2), (6, 3), (11, 5)] {
            let mut state = BoardState::new(size, Player::Red).unwrap();
            assert_eq!(ai(2).select_move(&mut state), Some(Move::new(center, center)));
            assert!(state.is_empty_board());
        }
    }

    #[test]
    fn test_no_move_after_game_ends() {
        let row: Vec<_> = (0..3).map(|c| (Move::new(2, c), Player::Blue)).collect();
        let mut state = BoardState::from_cells(3, Player::Red, &row).unwrap();
        assert_eq!(ai(2).select_move(&mut state), None);
        assert_eq!(ai(2).play_turn(&mut state), None);
    }

    #[test]
    fn test_select_does_not_mutate() {
        let mut state = BoardState::new(4, Player::Blue).unwrap();
        state.play(Move::new(1, 2));
        let before = state.clone();

        let mv = ai(2).select_move(&mut state).unwrap();
        assert_eq!(state, before);
        assert!(state.get(mv).is_none());
    }

    #[test]
    fn test_self_play_finishes_with_winner() {
        let mut blue = ai(1);
        let mut red = HexAi::new(
            Some(1),
            Algorithm::Minimax,
            Box::new(TwoDistanceValue),
            Box::new(ChargeOrder::new(5)),
        );
        let mut state = BoardState::new(5, Player::Blue).unwrap();

        while state.check_winner().is_none() {
            let player = if state.turn() == Player::Blue { &mut blue } else { &mut red };
            assert!(player.play_turn(&mut state).is_some());
        }
        assert!(state.history().len() >= 9);
    }
}
