//! Rectangular row-major storage

use ndarray::Array2;

use crate::errors::ShapeError;

/// The 2-D rectangular arrangement of values.
/// The shape is fixed at construction; transformations produce a new grid.
pub type Grid<T> = Array2<T>;

/// Construct the grid from the list of rows.
///
///```
/// # use geomatics_types::grid_from_rows;
/// let grid = grid_from_rows(vec![vec![1, 2, 3], vec![4, 5, 6]]).unwrap();
/// assert_eq!(grid.dim(), (2, 3));
/// assert_eq!(grid[(1, 0)], 4);
///
/// let doubled = grid.map(|x| x * 2);
/// assert_eq!(doubled[(1, 2)], 12);
/// ```
///
/// # Errors
/// When the rows have different lengths.
pub fn grid_from_rows<T>(rows: Vec<Vec<T>>) -> Result<Grid<T>, ShapeError> {
    let n_rows = rows.len();
    let n_cols = rows.first().map_or(0, Vec::len);

    let mut data = Vec::with_capacity(n_rows * n_cols);
    for row in rows {
        if row.len() != n_cols {
            return Err(ShapeError {
                rows: n_rows,
                cols: n_cols,
                len: row.len(),
            });
        }
        data.extend(row);
    }

    let len = data.len();
    Array2::from_shape_vec((n_rows, n_cols), data).map_err(|_| ShapeError {
        rows: n_rows,
        cols: n_cols,
        len,
    })
}
