use crate::engine::{Board, BOARD_SIZE, EMPTY};

/// Returns the goal position `(row, col)` of `tile`.
///
/// In the goal arrangement tile `t` sits at `(t / 3, t % 3)`.
pub fn tile_goal_position(tile: u8) -> (usize, usize) {
    let t = tile as usize;
    (t / BOARD_SIZE, t % BOARD_SIZE)
}

/// Manhattan distance of the tile at `(r, c)` from its goal position.
///
/// The empty slot contributes nothing.
pub fn manhattan_distance(board: &Board, r: usize, c: usize) -> u32 {
    let tile = board.get_tile(r, c);
    if tile == EMPTY {
        return 0;
    }
    let (goal_r, goal_c) = tile_goal_position(tile);
    (r.abs_diff(goal_r) + c.abs_diff(goal_c)) as u32
}

/// Sum of the Manhattan distances of every non-empty tile.
///
/// Admissible and consistent: a single move relocates one tile by one cell, so the
/// sum changes by exactly one per move and never overestimates the remaining cost.
/// This is the `h` in `f = depth + h` for the priority frontiers.
///
/// # Examples
/// ```
/// use eight_puzzle_solver::engine::Board;
/// use eight_puzzle_solver::heuristics::manhattan_sum;
///
/// assert_eq!(manhattan_sum(&Board::goal()), 0);
/// let b = Board::from_flat_sequence(&[1, 2, 5, 3, 4, 0, 6, 7, 8]).unwrap();
/// assert_eq!(manhattan_sum(&b), 3);
/// ```
pub fn manhattan_sum(board: &Board) -> u32 {
    let mut total = 0;
    for r in 0..BOARD_SIZE {
        for c in 0..BOARD_SIZE {
            total += manhattan_distance(board, r, c);
        }
    }
    total
}
