use crate::engine::Grid;
use crate::error::GridError;

/// Parses an array of string slices into a `Grid`.
///
/// Each string slice is one row, starting from row 0, holding whitespace-separated
/// non-negative integers (`0` for an empty cell). This is the same layout the
/// grid's `Display` output uses, so a rendered grid parses back unchanged.
///
/// # Arguments
/// * `s`: The rows of the board, top to bottom.
///
/// # Returns
/// * `Ok(Grid)` if every token is a non-negative integer and the rows form a square.
/// * `Err(GridError)` if:
///     - `s` is empty (`ZeroSize`).
///     - A token is not a non-negative integer (`InvalidCell`).
///     - A row's cell count differs from the number of rows (`NotSquare`).
///
/// # Examples
/// ```
/// use tile_merge::utils::grid_from_str_rows;
///
/// let grid = grid_from_str_rows(&["2 0", "4 8"]).unwrap();
/// assert_eq!(grid.get(0, 0), 2);
/// assert_eq!(grid.get(1, 1), 8);
///
/// assert!(grid_from_str_rows(&["2 x", "0 0"]).is_err());
/// assert!(grid_from_str_rows(&["2 0 0", "0 0 0"]).is_err());
/// ```
pub fn grid_from_str_rows(s: &[&str]) -> Result<Grid, GridError> {
    let mut rows = Vec::with_capacity(s.len());

    for (r, row_str) in s.iter().enumerate() {
        let row = row_str
            .split_whitespace()
            .enumerate()
            .map(|(c, token)| {
                token.parse::<u64>().map_err(|_| GridError::InvalidCell {
                    row: r,
                    col: c,
                    token: token.to_string(),
                })
            })
            .collect::<Result<Vec<u64>, GridError>>()?;
        rows.push(row);
    }

    Grid::from_rows(&rows)
}

/// Parses a whole board file: one row per line, blank lines ignored.
pub fn grid_from_text(text: &str) -> Result<Grid, GridError> {
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();
    grid_from_str_rows(&lines)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_from_str_rows_valid() {
        let grid = grid_from_str_rows(&["2 0 0 4", "0 0 0 0", "8 8 0 0", "0 0 0 1024"]).unwrap();
        assert_eq!(grid.size(), 4);
        assert_eq!(grid.get(0, 3), 4);
        assert_eq!(grid.get(2, 1), 8);
        assert_eq!(grid.get(3, 3), 1024);
    }

    #[test]
    fn test_grid_from_str_rows_invalid_token() {
        let result = grid_from_str_rows(&["2 0", "0 -4"]);
        assert_eq!(
            result,
            Err(GridError::InvalidCell {
                row: 1,
                col: 1,
                token: "-4".to_string()
            })
        );
    }

    #[test]
    fn test_grid_from_str_rows_not_square() {
        let result = grid_from_str_rows(&["2 0 0", "0 0 0"]);
        assert!(matches!(result, Err(GridError::NotSquare { row: 0, .. })));
    }

    #[test]
    fn test_grid_from_str_rows_empty_input() {
        let rows: [&str; 0] = [];
        assert_eq!(grid_from_str_rows(&rows), Err(GridError::ZeroSize));
    }

    #[test]
    fn test_display_output_parses_back() {
        let grid = grid_from_str_rows(&["2 4 8", "16 0 32", "0 0 2048"]).unwrap();
        let parsed = grid_from_text(&grid.to_string()).unwrap();
        assert_eq!(parsed, grid);
    }

    #[test]
    fn test_grid_from_text_skips_blank_lines() {
        let text = "\n  2 2  \n\n 0 4\n\n";
        let grid = grid_from_text(text).unwrap();
        assert_eq!(grid.to_rows(), vec![vec![2, 2], vec![0, 4]]);
    }
}
