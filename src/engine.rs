//! Board model for the 8-puzzle.
//!
//! This module defines the puzzle's fundamental components:
//! - `Action`: The four directions the empty slot can move in.
//! - `Board`: An immutable 3x3 arrangement of the tiles `0..=8` (0 is the empty slot),
//!   with methods for locating the empty slot, swapping cells, goal testing and
//!   generating successor boards.
use crate::error::InvalidBoardError;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::fmt;

/// Width and height of the board.
pub const BOARD_SIZE: usize = 3;

/// Number of cells on the board, empty slot included.
pub const TILE_COUNT: usize = BOARD_SIZE * BOARD_SIZE;

/// The value marking the empty slot.
pub const EMPTY: u8 = 0;

/// The target arrangement: tiles in ascending row-major order, empty slot top-left.
pub const GOAL_GRID: [[u8; BOARD_SIZE]; BOARD_SIZE] = [[0, 1, 2], [3, 4, 5], [6, 7, 8]];

/// A move of the empty slot.
///
/// `Up` swaps the empty slot with the tile above it, and so on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    Up,
    Down,
    Left,
    Right,
}

impl Action {
    /// All actions in successor-generation order.
    pub const ALL: [Action; 4] = [Action::Up, Action::Down, Action::Left, Action::Right];

    /// Row and column offset applied to the empty slot.
    pub fn delta(&self) -> (isize, isize) {
        match self {
            Action::Up => (-1, 0),
            Action::Down => (1, 0),
            Action::Left => (0, -1),
            Action::Right => (0, 1),
        }
    }

    /// The action that undoes this one.
    ///
    /// ```
    /// use eight_puzzle_solver::engine::Action;
    /// assert_eq!(Action::Up.inverse(), Action::Down);
    /// assert_eq!(Action::Left.inverse(), Action::Right);
    /// ```
    pub fn inverse(&self) -> Action {
        match self {
            Action::Up => Action::Down,
            Action::Down => Action::Up,
            Action::Left => Action::Right,
            Action::Right => Action::Left,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Action::Up => "Up",
            Action::Down => "Down",
            Action::Left => "Left",
            Action::Right => "Right",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// An immutable 3x3 tile arrangement.
///
/// Every `Board` is a permutation of `0..=8`; constructors reject anything else
/// and [`Board::swap`] only ever exchanges two cells, so the occupant set never changes.
/// Two boards are equal iff their grids are identical cell by cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Board {
    grid: [[u8; BOARD_SIZE]; BOARD_SIZE],
}

impl Board {
    /// Returns the solved board `((0,1,2),(3,4,5),(6,7,8))`.
    pub fn goal() -> Self {
        Board { grid: GOAL_GRID }
    }

    /// Builds a board from nine values in row-major order.
    ///
    /// # Arguments
    /// * `values`: The tiles, row by row. Must be exactly a permutation of `0..=8`.
    ///
    /// # Returns
    /// * `Ok(Board)` when `values` is a valid permutation.
    /// * `Err(InvalidBoardError)` when the count is wrong, a value exceeds 8,
    ///   or a value is repeated.
    ///
    /// # Examples
    /// ```
    /// use eight_puzzle_solver::engine::Board;
    /// use eight_puzzle_solver::error::InvalidBoardError;
    ///
    /// let board = Board::from_flat_sequence(&[1, 2, 5, 3, 4, 0, 6, 7, 8]).unwrap();
    /// assert_eq!(board.locate_empty(), (1, 2));
    ///
    /// assert_eq!(
    ///     Board::from_flat_sequence(&[1, 2, 3]),
    ///     Err(InvalidBoardError::WrongTileCount { expected: 9, found: 3 })
    /// );
    /// ```
    pub fn from_flat_sequence(values: &[u8]) -> Result<Self, InvalidBoardError> {
        if values.len() != TILE_COUNT {
            return Err(InvalidBoardError::WrongTileCount {
                expected: TILE_COUNT,
                found: values.len(),
            });
        }

        let mut seen = [false; TILE_COUNT];
        let mut grid = [[EMPTY; BOARD_SIZE]; BOARD_SIZE];
        for (i, &value) in values.iter().enumerate() {
            let slot = seen
                .get_mut(value as usize)
                .ok_or(InvalidBoardError::OutOfRange { value })?;
            if *slot {
                return Err(InvalidBoardError::Duplicate { value });
            }
            *slot = true;
            grid[i / BOARD_SIZE][i % BOARD_SIZE] = value;
        }
        Ok(Board { grid })
    }

    /// The nine tiles in row-major order. Inverse of [`Board::from_flat_sequence`].
    pub fn to_flat_sequence(&self) -> [u8; TILE_COUNT] {
        let mut values = [EMPTY; TILE_COUNT];
        for (i, value) in self.grid.iter().flatten().enumerate() {
            values[i] = *value;
        }
        values
    }

    /// Returns the tile at row `r`, column `c`.
    ///
    /// # Panics
    /// Panics if `r` or `c` is outside the board.
    pub fn get_tile(&self, r: usize, c: usize) -> u8 {
        self.grid[r][c]
    }

    pub fn get_grid(&self) -> &[[u8; BOARD_SIZE]; BOARD_SIZE] {
        &self.grid
    }

    /// Position `(row, col)` of the empty slot.
    ///
    /// # Panics
    /// A board without an empty slot breaks the permutation invariant; this is
    /// treated as a logic error and panics.
    pub fn locate_empty(&self) -> (usize, usize) {
        for (r, row) in self.grid.iter().enumerate() {
            if let Some(c) = row.iter().position(|&tile| tile == EMPTY) {
                return (r, c);
            }
        }
        unreachable!("board invariant violated: no empty slot in {:?}", self.grid)
    }

    /// Returns a copy of the board with cells `(r1, c1)` and `(r2, c2)` exchanged.
    /// The receiver is left untouched.
    pub fn swap(&self, r1: usize, c1: usize, r2: usize, c2: usize) -> Board {
        let mut grid = self.grid;
        let tmp = grid[r1][c1];
        grid[r1][c1] = grid[r2][c2];
        grid[r2][c2] = tmp;
        Board { grid }
    }

    pub fn is_goal(&self) -> bool {
        self.grid == GOAL_GRID
    }

    /// Applies `action` to the empty slot.
    ///
    /// # Returns
    /// `None` if the move would take the empty slot off the board.
    pub fn apply(&self, action: Action) -> Option<Board> {
        let (r, c) = self.locate_empty();
        let (dr, dc) = action.delta();
        let nr = r.checked_add_signed(dr).filter(|&nr| nr < BOARD_SIZE)?;
        let nc = c.checked_add_signed(dc).filter(|&nc| nc < BOARD_SIZE)?;
        Some(self.swap(r, c, nr, nc))
    }

    /// Every board reachable in one move, labelled with the move that produced it.
    ///
    /// Order is fixed: Up, Down, Left, Right, each present only when the neighbour
    /// of the empty slot is in bounds. A corner slot yields 2 results, an edge 3,
    /// the centre 4.
    pub fn successors(&self) -> Vec<(Board, Action)> {
        let (r, c) = self.locate_empty();
        let mut children = Vec::with_capacity(Action::ALL.len());
        if r > 0 {
            children.push((self.swap(r, c, r - 1, c), Action::Up));
        }
        if r < BOARD_SIZE - 1 {
            children.push((self.swap(r, c, r + 1, c), Action::Down));
        }
        if c > 0 {
            children.push((self.swap(r, c, r, c - 1), Action::Left));
        }
        if c < BOARD_SIZE - 1 {
            children.push((self.swap(r, c, r, c + 1), Action::Right));
        }
        children
    }

    /// Number of tile pairs (empty slot excluded) that appear in the wrong relative order.
    pub fn inversion_count(&self) -> usize {
        let tiles: Vec<u8> = self
            .grid
            .iter()
            .flatten()
            .copied()
            .filter(|&tile| tile != EMPTY)
            .collect();
        let mut inversions = 0;
        for i in 0..tiles.len() {
            for j in (i + 1)..tiles.len() {
                if tiles[i] > tiles[j] {
                    inversions += 1;
                }
            }
        }
        inversions
    }

    /// Whether the goal is reachable from this board.
    ///
    /// On an odd-width board a move never changes inversion parity, and the goal
    /// has zero inversions, so exactly the even-parity boards are solvable.
    pub fn is_solvable(&self) -> bool {
        self.inversion_count() % 2 == 0
    }

    /// Scrambles the goal board with a seeded random walk of `moves` steps.
    ///
    /// The walk never immediately undoes its previous move. Because every step is a
    /// legal move, the result is always solvable in at most `moves` moves.
    /// The same `seed` and `moves` always produce the same board.
    ///
    /// # Arguments
    /// * `seed`: Seed for the `SmallRng` driving the walk.
    /// * `moves`: Number of random moves to apply.
    pub fn new_random_with_seed(seed: u64, moves: usize) -> Self {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut board = Board::goal();
        let mut previous: Option<Action> = None;

        for _ in 0..moves {
            let candidates: Vec<(Board, Action)> = board
                .successors()
                .into_iter()
                .filter(|(_, action)| previous.map_or(true, |p| p.inverse() != *action))
                .collect();
            // Every cell has at least two neighbours, so one non-reversing move always remains.
            if let Some(&(next, action)) = candidates.choose(&mut rng) {
                board = next;
                previous = Some(action);
            }
        }
        board
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (r, row) in self.grid.iter().enumerate() {
            for tile in row {
                write!(f, "{}", tile)?;
            }
            if r < BOARD_SIZE - 1 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn board(values: [u8; TILE_COUNT]) -> Board {
        Board::from_flat_sequence(&values).unwrap()
    }

    fn is_permutation(b: &Board) -> bool {
        let values: HashSet<u8> = b.to_flat_sequence().into_iter().collect();
        values.len() == TILE_COUNT && values.iter().all(|&v| (v as usize) < TILE_COUNT)
    }

    #[test]
    fn test_from_flat_sequence_valid() {
        let b = board([1, 2, 5, 3, 4, 0, 6, 7, 8]);
        assert_eq!(b.get_tile(0, 0), 1);
        assert_eq!(b.get_tile(0, 2), 5);
        assert_eq!(b.get_tile(1, 2), 0);
        assert_eq!(b.get_tile(2, 2), 8);
    }

    #[test]
    fn test_from_flat_sequence_wrong_count() {
        assert_eq!(
            Board::from_flat_sequence(&[0, 1, 2, 3, 4, 5, 6, 7]),
            Err(InvalidBoardError::WrongTileCount { expected: 9, found: 8 })
        );
        assert_eq!(
            Board::from_flat_sequence(&[0, 1, 2, 3, 4, 5, 6, 7, 8, 9]),
            Err(InvalidBoardError::WrongTileCount { expected: 9, found: 10 })
        );
    }

    #[test]
    fn test_from_flat_sequence_out_of_range() {
        assert_eq!(
            Board::from_flat_sequence(&[0, 1, 2, 3, 4, 5, 6, 7, 9]),
            Err(InvalidBoardError::OutOfRange { value: 9 })
        );
    }

    #[test]
    fn test_from_flat_sequence_duplicate() {
        assert_eq!(
            Board::from_flat_sequence(&[0, 1, 2, 3, 4, 5, 6, 7, 7]),
            Err(InvalidBoardError::Duplicate { value: 7 })
        );
    }

    #[test]
    fn test_flat_sequence_round_trip() {
        for seed in 0..50 {
            let b = Board::new_random_with_seed(seed, 30);
            let reparsed = Board::from_flat_sequence(&b.to_flat_sequence()).unwrap();
            assert_eq!(reparsed, b);
        }
    }

    #[test]
    fn test_goal_board() {
        assert!(Board::goal().is_goal());
        assert_eq!(Board::goal().locate_empty(), (0, 0));
        assert!(board([0, 1, 2, 3, 4, 5, 6, 7, 8]).is_goal());
    }

    #[test]
    fn test_neighbours_of_goal_are_not_goal() {
        for (child, _) in Board::goal().successors() {
            assert!(!child.is_goal());
        }
    }

    #[test]
    fn test_swap_does_not_mutate_receiver() {
        let b = Board::goal();
        let swapped = b.swap(0, 0, 0, 1);
        assert_eq!(b, Board::goal());
        assert_eq!(swapped.get_tile(0, 0), 1);
        assert_eq!(swapped.get_tile(0, 1), 0);
    }

    #[test]
    fn test_successor_counts_by_empty_position() {
        // Empty slot in each of the nine cells.
        let expected = [2, 3, 2, 3, 4, 3, 2, 3, 2];
        for (pos, &count) in expected.iter().enumerate() {
            let mut values = [1, 2, 3, 4, 5, 6, 7, 8, 8];
            let mut next = 1;
            for (i, v) in values.iter_mut().enumerate() {
                if i == pos {
                    *v = 0;
                } else {
                    *v = next;
                    next += 1;
                }
            }
            let b = board(values);
            let succ = b.successors();
            assert_eq!(succ.len(), count, "empty slot at cell {}", pos);
            for (child, _) in &succ {
                assert!(is_permutation(child));
            }
        }
    }

    #[test]
    fn test_successor_order_and_labels() {
        let b = board([1, 2, 3, 4, 0, 5, 6, 7, 8]);
        let succ = b.successors();
        let actions: Vec<Action> = succ.iter().map(|(_, a)| *a).collect();
        assert_eq!(actions, Action::ALL.to_vec());
        assert_eq!(succ[0].0, board([1, 0, 3, 4, 2, 5, 6, 7, 8]));
        assert_eq!(succ[1].0, board([1, 2, 3, 4, 7, 5, 6, 0, 8]));
        assert_eq!(succ[2].0, board([1, 2, 3, 0, 4, 5, 6, 7, 8]));
        assert_eq!(succ[3].0, board([1, 2, 3, 4, 5, 0, 6, 7, 8]));
    }

    #[test]
    fn test_corner_successors_skip_out_of_bounds() {
        let actions: Vec<Action> = Board::goal().successors().into_iter().map(|(_, a)| a).collect();
        assert_eq!(actions, vec![Action::Down, Action::Right]);
    }

    #[test]
    fn test_apply_matches_successors() {
        let b = board([1, 2, 5, 3, 4, 0, 6, 7, 8]);
        for (child, action) in b.successors() {
            assert_eq!(b.apply(action), Some(child));
        }
        assert_eq!(b.apply(Action::Right), None);
        assert_eq!(Board::goal().apply(Action::Up), None);
    }

    #[test]
    fn test_solvability_parity() {
        assert!(Board::goal().is_solvable());
        assert!(board([1, 2, 5, 3, 4, 0, 6, 7, 8]).is_solvable());
        // Two adjacent goal tiles exchanged.
        let odd = board([0, 2, 1, 3, 4, 5, 6, 7, 8]);
        assert_eq!(odd.inversion_count(), 1);
        assert!(!odd.is_solvable());
    }

    #[test]
    fn test_new_random_with_seed_determinism() {
        let a = Board::new_random_with_seed(7, 40);
        let b = Board::new_random_with_seed(7, 40);
        assert_eq!(a, b);
        assert!(a.is_solvable());
        assert!(is_permutation(&a));
        assert_eq!(Board::new_random_with_seed(7, 0), Board::goal());
    }

    #[test]
    fn test_display_board_formatting() {
        let b = board([1, 2, 5, 3, 4, 0, 6, 7, 8]);
        assert_eq!(b.to_string(), "125\n340\n678");
    }

    #[test]
    fn test_action_display() {
        let names: Vec<String> = Action::ALL.iter().map(|a| a.to_string()).collect();
        assert_eq!(names, vec!["Up", "Down", "Left", "Right"]);
    }
}
