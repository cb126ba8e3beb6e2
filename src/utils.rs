use crate::engine::{Board, TILE_COUNT};
use crate::error::InvalidBoardError;
use std::fs;

/// Parses a comma-separated board such as `"1,2,5,3,4,0,6,7,8"`.
///
/// Tiles are listed in row-major order. Whitespace around each value is ignored.
///
/// # Returns
/// * `Ok(Board)` if the text lists a permutation of `0..=8`.
/// * `Err(InvalidBoardError)` if:
///     - A token is not a small non-negative integer (`Unparseable`).
///     - The number of values is not 9 (`WrongTileCount`).
///     - A value is above 8 or repeated (`OutOfRange`, `Duplicate`).
///
/// # Examples
/// ```
/// use eight_puzzle_solver::utils::board_from_str;
///
/// let board = board_from_str("1,2,5, 3,4,0, 6,7,8").unwrap();
/// assert_eq!(board.get_tile(1, 2), 0);
///
/// assert!(board_from_str("1,2,x").is_err());
/// assert!(board_from_str("0,1,2,3,4,5,6,7").is_err());
/// ```
pub fn board_from_str(s: &str) -> Result<Board, InvalidBoardError> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Err(InvalidBoardError::WrongTileCount {
            expected: TILE_COUNT,
            found: 0,
        });
    }

    let values = trimmed
        .split(',')
        .map(|token| {
            let token = token.trim();
            token.parse::<u8>().map_err(|_| InvalidBoardError::Unparseable {
                token: token.to_string(),
            })
        })
        .collect::<Result<Vec<u8>, _>>()?;

    Board::from_flat_sequence(&values)
}

/// Renders a board in the same comma-separated form [`board_from_str`] reads.
pub fn board_to_str(board: &Board) -> String {
    board
        .to_flat_sequence()
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

/// Peak resident set size of this process in KiB, if the platform exposes it.
///
/// Reads the `VmHWM` line of `/proc/self/status`; returns `None` elsewhere or if
/// the file cannot be read. The value is advisory telemetry only.
pub fn peak_resident_memory_kib() -> Option<u64> {
    let status = fs::read_to_string("/proc/self/status").ok()?;
    parse_vm_hwm(&status)
}

fn parse_vm_hwm(status: &str) -> Option<u64> {
    status
        .lines()
        .find_map(|line| line.strip_prefix("VmHWM:"))
        .and_then(|rest| rest.split_whitespace().next())
        .and_then(|kib| kib.parse().ok())
}
