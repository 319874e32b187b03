//! Hex board state, move legality and win detection
//!
//! Cells are addressed as `(row, col)` on an n x n rhombus. Blue connects
//! column 0 to column n-1, Red connects row 0 to row n-1.

use std::collections::VecDeque;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::HexError;

/// Neighbor offsets (dr, dc) of a cell on the rhombic grid
pub const DIRECTIONS: [(isize, isize); 6] = [
    (-1, 0),
    (0, -1),
    (1, -1),
    (1, 0),
    (0, 1),
    (-1, 1),
];

// ============================================================================
// PLAYER
// ============================================================================

/// Player color
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Player {
    /// Maximizing side (+1), connects left and right edges
    Blue,
    /// Minimizing side (-1), connects top and bottom edges
    Red,
}

impl Player {
    pub fn opponent(self) -> Self {
        match self {
            Player::Blue => Player::Red,
            Player::Red => Player::Blue,
        }
    }

    /// Signed value of the player's stones: +1 for Blue, -1 for Red
    pub fn sign(self) -> f64 {
        match self {
            Player::Blue => 1.0,
            Player::Red => -1.0,
        }
    }

    /// Coordinate measuring progress between the player's two edges
    /// (column for Blue, row for Red)
    pub fn progress(self, mv: Move) -> usize {
        match self {
            Player::Blue => mv.col,
            Player::Red => mv.row,
        }
    }

    /// The `index`-th cell of the line at progress coordinate `at`
    pub fn edge_cell(self, index: usize, at: usize) -> Move {
        match self {
            Player::Blue => Move::new(index, at),
            Player::Red => Move::new(at, index),
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::Blue => write!(f, "blue"),
            Player::Red => write!(f, "red"),
        }
    }
}

impl FromStr for Player {
    type Err = HexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "blue" | "a" | "1" | "+1" => Ok(Player::Blue),
            "red" | "b" | "-1" => Ok(Player::Red),
            other => Err(HexError::Unknown {
                kind: "player",
                name: other.to_string(),
            }),
        }
    }
}

// ============================================================================
// MOVE
// ============================================================================

/// A cell coordinate; the only kind of move in Hex
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Move {
    pub row: usize,
    pub col: usize,
}

impl Move {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Cell reached by a signed offset, if it stays inside a board of `size`
    pub fn offset(self, dr: isize, dc: isize, size: usize) -> Option<Move> {
        let row = self.row.checked_add_signed(dr)?;
        let col = self.col.checked_add_signed(dc)?;
        (row < size && col < size).then_some(Move::new(row, col))
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl FromStr for Move {
    type Err = HexError;

    /// Parse `"r,c"` (surrounding parentheses and spaces are ignored)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().trim_start_matches('(').trim_end_matches(')');
        let (row, col) = trimmed
            .split_once(',')
            .ok_or_else(|| HexError::InvalidMove(s.to_string()))?;
        let row = row.trim().parse().map_err(|_| HexError::InvalidMove(s.to_string()))?;
        let col = col.trim().parse().map_err(|_| HexError::InvalidMove(s.to_string()))?;
        Ok(Move::new(row, col))
    }
}

// ============================================================================
// BOARD STATE
// ============================================================================

/// Game state: grid, move history and side to move
///
/// Mutated in place by `play`/`undo`; search relies on `undo` being the
/// exact inverse of a successful `play`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BoardState {
    size: usize,
    grid: Vec<Option<Player>>,
    history: Vec<Move>,
    turn: Player,
}

impl BoardState {
    /// Create an empty board with `starting` to move
    pub fn new(size: usize, starting: Player) -> Result<Self, HexError> {
        if size < 2 {
            return Err(HexError::InvalidSize(size));
        }
        Ok(Self {
            size,
            grid: vec![None; size * size],
            history: Vec::new(),
            turn: starting,
        })
    }

    /// Build a position by placing stones directly, bypassing turn order.
    ///
    /// History stays empty, so the result cannot be undone. Intended for
    /// fixtures that no legal move sequence reaches.
    pub fn from_cells(size: usize, turn: Player, cells: &[(Move, Player)]) -> Result<Self, HexError> {
        let mut board = Self::new(size, turn)?;
        for &(mv, player) in cells {
            if !board.in_bounds(mv) {
                return Err(HexError::OutOfRange { row: mv.row, col: mv.col, size });
            }
            let idx = board.index(mv);
            board.grid[idx] = Some(player);
        }
        Ok(board)
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn turn(&self) -> Player {
        self.turn
    }

    pub fn history(&self) -> &[Move] {
        &self.history
    }

    pub fn last_move(&self) -> Option<Move> {
        self.history.last().copied()
    }

    pub fn in_bounds(&self, mv: Move) -> bool {
        mv.row < self.size && mv.col < self.size
    }

    /// Occupant of a cell (None for empty or out of range)
    pub fn get(&self, mv: Move) -> Option<Player> {
        if self.in_bounds(mv) {
            self.grid[self.index(mv)]
        } else {
            None
        }
    }

    /// +1 / -1 / 0 for Blue / Red / empty
    pub fn sign_at(&self, row: usize, col: usize) -> f64 {
        self.get(Move::new(row, col)).map_or(0.0, Player::sign)
    }

    pub fn is_empty_board(&self) -> bool {
        self.grid.iter().all(Option::is_none)
    }

    /// In-bounds hex neighbors of a cell
    pub fn neighbors(&self, mv: Move) -> impl Iterator<Item = Move> + '_ {
        DIRECTIONS
            .iter()
            .filter_map(move |&(dr, dc)| mv.offset(dr, dc, self.size))
    }

    fn index(&self, mv: Move) -> usize {
        mv.row * self.size + mv.col
    }

    // ========================================================================
    // MOVES
    // ========================================================================

    /// Play a move for the side to act, reporting why it is illegal
    pub fn try_play(&mut self, mv: Move) -> Result<(), HexError> {
        if !self.in_bounds(mv) {
            return Err(HexError::OutOfRange { row: mv.row, col: mv.col, size: self.size });
        }
        if self.check_winner().is_some() {
            return Err(HexError::GameOver);
        }
        let idx = self.index(mv);
        if self.grid[idx].is_some() {
            return Err(HexError::Occupied { row: mv.row, col: mv.col });
        }
        self.grid[idx] = Some(self.turn);
        self.history.push(mv);
        self.turn = self.turn.opponent();
        Ok(())
    }

    /// Play a move; returns false and leaves the board untouched if illegal
    pub fn play(&mut self, mv: Move) -> bool {
        self.try_play(mv).is_ok()
    }

    /// Take back the last move
    pub fn undo(&mut self) -> Result<Move, HexError> {
        let mv = self.history.pop().ok_or(HexError::EmptyHistory)?;
        let idx = self.index(mv);
        self.grid[idx] = None;
        self.turn = self.turn.opponent();
        Ok(mv)
    }

    /// All empty cells in row-major order
    pub fn available_moves(&self) -> Vec<Move> {
        (0..self.size)
            .flat_map(|row| (0..self.size).map(move |col| Move::new(row, col)))
            .filter(|&mv| self.grid[self.index(mv)].is_none())
            .collect()
    }

    // ========================================================================
    // WIN DETECTION
    // ========================================================================

    /// The player who has connected their edges, if any
    pub fn check_winner(&self) -> Option<Player> {
        [Player::Blue, Player::Red]
            .into_iter()
            .find(|&player| self.has_connection(player))
    }

    /// Breadth-first search through `player`'s stones from their first edge
    fn has_connection(&self, player: Player) -> bool {
        let mut visited = vec![false; self.size * self.size];
        let mut frontier = VecDeque::new();

        for i in 0..self.size {
            let cell = player.edge_cell(i, 0);
            if self.get(cell) == Some(player) {
                visited[self.index(cell)] = true;
                frontier.push_back(cell);
            }
        }

        while let Some(cell) = frontier.pop_front() {
            if player.progress(cell) == self.size - 1 {
                return true;
            }
            for next in self.neighbors(cell) {
                let idx = self.index(next);
                if !visited[idx] && self.grid[idx] == Some(player) {
                    visited[idx] = true;
                    frontier.push_back(next);
                }
            }
        }

        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(size: usize) -> BoardState {
        BoardState::new(size, Player::Blue).unwrap()
    }

    #[test]
    fn test_rejects_tiny_board() {
        assert!(matches!(BoardState::new(1, Player::Blue), Err(HexError::InvalidSize(1))));
    }

    #[test]
    fn test_play_and_undo_restore_state() {
        let mut game = board(5);
        assert!(game.play(Move::new(2, 3)));
        assert!(game.play(Move::new(1, 2)));
        let before = game.clone();

        assert!(game.play(Move::new(1, 4)));
        assert_eq!(game.turn(), Player::Red);
        assert_eq!(game.undo().unwrap(), Move::new(1, 4));

        assert_eq!(game, before);
    }

    #[test]
    fn test_illegal_moves_do_not_mutate() {
        let mut game = board(3);
        assert!(game.play(Move::new(1, 1)));
        let before = game.clone();

        assert!(!game.play(Move::new(1, 1)));
        assert!(!game.play(Move::new(3, 0)));
        assert!(matches!(game.try_play(Move::new(1, 1)), Err(HexError::Occupied { .. })));
        assert!(matches!(game.try_play(Move::new(0, 7)), Err(HexError::OutOfRange { .. })));
        assert_eq!(game, before);
    }

    #[test]
    fn test_undo_on_empty_history() {
        let mut game = board(4);
        assert!(matches!(game.undo(), Err(HexError::EmptyHistory)));
    }

    #[test]
    fn test_available_moves_row_major() {
        let mut game = board(2);
        game.play(Move::new(0, 1));
        assert_eq!(
            game.available_moves(),
            vec![Move::new(0, 0), Move::new(1, 0), Move::new(1, 1)]
        );
    }

    #[test]
    fn test_neighbors() {
        let game = board(5);
        let mut inner: Vec<_> = game.neighbors(Move::new(2, 2)).collect();
        inner.sort();
        assert_eq!(
            inner,
            vec![
                Move::new(1, 2),
                Move::new(1, 3),
                Move::new(2, 1),
                Move::new(2, 3),
                Move::new(3, 1),
                Move::new(3, 2),
            ]
        );
        assert_eq!(game.neighbors(Move::new(0, 0)).count(), 2);
        assert_eq!(game.neighbors(Move::new(0, 4)).count(), 3);
    }

    #[test]
    fn test_minimal_winning_fixture() {
        let cells = [(Move::new(0, 0), Player::Blue), (Move::new(0, 1), Player::Blue)];
        let game = BoardState::from_cells(2, Player::Red, &cells).unwrap();
        assert_eq!(game.check_winner(), Some(Player::Blue));
    }

    #[test]
    fn test_row_wins_for_blue_column_does_not() {
        let row: Vec<_> = (0..5).map(|c| (Move::new(0, c), Player::Blue)).collect();
        let game = BoardState::from_cells(5, Player::Red, &row).unwrap();
        assert_eq!(game.check_winner(), Some(Player::Blue));

        let column: Vec<_> = (0..5).map(|r| (Move::new(r, 2), Player::Blue)).collect();
        let game = BoardState::from_cells(5, Player::Red, &column).unwrap();
        assert_eq!(game.check_winner(), None);

        let column: Vec<_> = (0..5).map(|r| (Move::new(r, 2), Player::Red)).collect();
        let game = BoardState::from_cells(5, Player::Blue, &column).unwrap();
        assert_eq!(game.check_winner(), Some(Player::Red));
    }

    #[test]
    fn test_diagonal_connection() {
        // (r, c) -> (r - 1, c + 1) is adjacent, (r, c) -> (r + 1, c + 1) is not
        let anti: Vec<_> = (0..3).map(|i| (Move::new(2 - i, i), Player::Blue)).collect();
        let game = BoardState::from_cells(3, Player::Red, &anti).unwrap();
        assert_eq!(game.check_winner(), Some(Player::Blue));

        let main: Vec<_> = (0..3).map(|i| (Move::new(i, i), Player::Blue)).collect();
        let game = BoardState::from_cells(3, Player::Red, &main).unwrap();
        assert_eq!(game.check_winner(), None);
    }

    #[test]
    fn test_no_moves_after_win() {
        let mut game = board(2);
        assert!(game.play(Move::new(0, 0))); // blue
        assert!(game.play(Move::new(1, 0))); // red
        assert!(game.play(Move::new(0, 1))); // blue connects
        assert_eq!(game.check_winner(), Some(Player::Blue));
        assert!(!game.play(Move::new(1, 1)));
        assert!(matches!(game.try_play(Move::new(1, 1)), Err(HexError::GameOver)));
    }

    #[test]
    fn test_move_parsing() {
        assert_eq!("3,4".parse::<Move>().unwrap(), Move::new(3, 4));
        assert_eq!(" (0, 10) ".parse::<Move>().unwrap(), Move::new(0, 10));
        assert!("3".parse::<Move>().is_err());
        assert!("a,b".parse::<Move>().is_err());
    }

    #[test]
    fn test_player_parsing() {
        assert_eq!("Blue".parse::<Player>().unwrap(), Player::Blue);
        assert_eq!("red".parse::<Player>().unwrap(), Player::Red);
        assert!("green".parse::<Player>().is_err());
    }
}
