//! Game runner - executes single games
//!
//! Level 3 - Step-level implementation

use std::time::Instant;

use hexai_core::{BoardState, HexAi, HexError, Move, Player};
use serde::Serialize;

/// Outcome of a single game
#[derive(Clone, Debug, Serialize)]
pub struct GameOutcome {
    /// Connected side; None only if a player failed to produce a move
    pub winner: Option<Player>,
    /// Side that moved first
    pub first_player: Player,
    /// Move history
    pub moves: Vec<Move>,
    /// Seconds Blue spent on each of its moves
    pub blue_move_times: Vec<f64>,
    /// Seconds Red spent on each of its moves
    pub red_move_times: Vec<f64>,
}

impl GameOutcome {
    pub fn blue_wins(&self) -> bool {
        self.winner == Some(Player::Blue)
    }

    pub fn red_wins(&self) -> bool {
        self.winner == Some(Player::Red)
    }

    /// True if the starting side won
    pub fn starter_won(&self) -> bool {
        self.winner == Some(self.first_player)
    }

    /// Number of moves played
    pub fn length(&self) -> usize {
        self.moves.len()
    }

    pub fn move_times(&self, player: Player) -> &[f64] {
        match player {
            Player::Blue => &self.blue_move_times,
            Player::Red => &self.red_move_times,
        }
    }
}

/// Plays games between two computer players on a fixed board size
#[derive(Clone, Copy, Debug)]
pub struct GameRunner {
    board_size: usize,
}

impl GameRunner {
    pub fn new(board_size: usize) -> Self {
        Self { board_size }
    }

    pub fn board_size(&self) -> usize {
        self.board_size
    }

    /// Play one game to completion, timing every turn
    pub fn play_game(
        &self,
        blue: &mut HexAi,
        red: &mut HexAi,
        first_player: Player,
    ) -> Result<GameOutcome, HexError> {
        let mut state = BoardState::new(self.board_size, first_player)?;
        let mut blue_move_times = Vec::new();
        let mut red_move_times = Vec::new();

        while state.check_winner().is_none() {
            let player = state.turn();
            let (ai, times) = match player {
                Player::Blue => (&mut *blue, &mut blue_move_times),
                Player::Red => (&mut *red, &mut red_move_times),
            };

            let start = Instant::now();
            let played = ai.play_turn(&mut state);
            times.push(start.elapsed().as_secs_f64());

            match played {
                Some(mv) => tracing::debug!(%player, %mv, turn = state.history().len(), "move played"),
                None => {
                    tracing::warn!(%player, "no move produced, ending game without a winner");
                    break;
                }
            }
        }

        Ok(GameOutcome {
            winner: state.check_winner(),
            first_player,
            moves: state.history().to_vec(),
            blue_move_times,
            red_move_times,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hexai_core::{AiConfig, OrderKind, ValueKind};

    fn players(seed: u64) -> (HexAi, HexAi) {
        let blue = AiConfig::new(ValueKind::ShortestPath, OrderKind::Random)
            .with_depth(Some(1))
            .with_seed(seed)
            .build(4);
        let red = AiConfig::new(ValueKind::TwoDistance, OrderKind::Charge)
            .with_depth(Some(1))
            .build(4);
        (blue, red)
    }

    #[test]
    fn test_game_has_winner() {
        let (mut blue, mut red) = players(1);
        let outcome = GameRunner::new(4).play_game(&mut blue, &mut red, Player::Blue).unwrap();

        assert!(outcome.winner.is_some());
        assert_eq!(outcome.moves[0], Move::new(2, 2));
        assert_eq!(outcome.blue_move_times.len() + outcome.red_move_times.len(), outcome.length());
        assert!(outcome.length() >= 7);
    }

    #[test]
    fn test_red_can_start() {
        let (mut blue, mut red) = players(2);
        let outcome = GameRunner::new(4).play_game(&mut blue, &mut red, Player::Red).unwrap();

        assert_eq!(outcome.first_player, Player::Red);
        assert!(outcome.red_move_times.len() >= outcome.blue_move_times.len());
        assert_eq!(outcome.starter_won(), outcome.red_wins());
    }

    #[test]
    fn test_invalid_board_size() {
        let (mut blue, mut red) = players(3);
        assert!(GameRunner::new(1).play_game(&mut blue, &mut red, Player::Blue).is_err());
    }
}
