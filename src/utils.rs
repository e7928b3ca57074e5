use crate::engine::GridState;
use crate::error::PuzzleError;

/// Parses an array of string slices into a `GridState`.
///
/// Each string slice is one row of the board, starting from the top. A row holds
/// whitespace-separated non-negative integers, with `0` for the blank. The board must be
/// rectangular, and its tiles must be a permutation of `0..height * width`.
///
/// # Arguments
/// * `rows`: The rows of the board, top to bottom.
///
/// # Returns
/// * `Ok(GridState)` if parsing and validation succeed.
/// * `Err(PuzzleError)` if a token is not an integer, the rows differ in length, there are no
///   rows, or the tiles are not a permutation.
///
/// # Examples
/// ```
/// use sliding_puzzle::utils::grid_from_str_rows;
///
/// let grid = grid_from_str_rows(&["2 6 3", "1 0 4", "7 8 5"]).unwrap();
/// assert_eq!(grid.dimensions(), (3, 3));
/// assert_eq!(grid.get(0, 1), 6);
///
/// assert!(grid_from_str_rows(&["1 2", "3 x"]).is_err());
/// ```
pub fn grid_from_str_rows(rows: &[&str]) -> Result<GridState, PuzzleError> {
    let mut parsed: Vec<Vec<u32>> = Vec::with_capacity(rows.len());

    for (r, row_str) in rows.iter().enumerate() {
        let row = row_str
            .split_whitespace()
            .enumerate()
            .map(|(c, token)| {
                token.parse::<u32>().map_err(|_| PuzzleError::InvalidToken {
                    token: token.to_string(),
                    row: r,
                    col: c,
                })
            })
            .collect::<Result<Vec<u32>, PuzzleError>>()?;
        parsed.push(row);
    }

    GridState::from_rows(&parsed)
}

/// Parses a whole board description, one row per line.
///
/// Blank lines and lines starting with `#` are skipped, so board files can carry comments.
pub fn grid_from_text(text: &str) -> Result<GridState, PuzzleError> {
    let rows: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .collect();
    grid_from_str_rows(&rows)
}
