use glam::Vec3;

use crate::options::LayoutOptions;

/// A (row, column) slot in the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridCell {
    /// Zero-based row, top to bottom.
    pub row: usize,
    /// Zero-based column, left to right.
    pub col: usize,
}

/// Square-ish row-major grid centered on the origin in the z = 0 plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLayout {
    count: usize,
    columns: usize,
    rows: usize,
    spacing_h: f32,
    spacing_v: f32,
}

impl GridLayout {
    /// Grid for `count` cards with the given cell spacing.
    #[must_use]
    pub fn new(count: usize, spacing_h: f32, spacing_v: f32) -> Self {
        let (columns, rows) = if count == 0 {
            (0, 0)
        } else {
            let columns = (count as f64).sqrt().ceil() as usize;
            (columns, count.div_ceil(columns))
        };
        Self {
            count,
            columns,
            rows,
            spacing_h,
            spacing_v,
        }
    }

    /// Grid for `count` cards spaced by card size plus margin.
    #[must_use]
    pub fn from_options(count: usize, layout: &LayoutOptions) -> Self {
        let (h, v) = layout.grid_spacing();
        Self::new(count, h, v)
    }

    /// Number of cards laid out.
    #[must_use]
    pub fn count(&self) -> usize {
        self.count
    }

    /// Column count, `ceil(sqrt(count))`.
    #[must_use]
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Row count, `ceil(count / columns)`.
    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Distance between the first and last column centers.
    #[must_use]
    pub fn width(&self) -> f32 {
        self.columns.saturating_sub(1) as f32 * self.spacing_h
    }

    /// Distance between the first and last row centers.
    #[must_use]
    pub fn height(&self) -> f32 {
        self.rows.saturating_sub(1) as f32 * self.spacing_v
    }

    /// Cell of card `index`, or `None` when out of range.
    #[must_use]
    pub fn cell(&self, index: usize) -> Option<GridCell> {
        (index < self.count).then(|| GridCell {
            row: index / self.columns,
            col: index % self.columns,
        })
    }

    /// World position of card `index`'s cell center.
    #[must_use]
    pub fn position(&self, index: usize) -> Option<Vec3> {
        let cell = self.cell(index)?;
        Some(Vec3::new(
            -self.width() / 2.0 + cell.col as f32 * self.spacing_h,
            self.height() / 2.0 - cell.row as f32 * self.spacing_v,
            0.0,
        ))
    }

    /// All cell centers in card order.
    #[must_use]
    pub fn positions(&self) -> Vec<Vec3> {
        (0..self.count).filter_map(|i| self.position(i)).collect()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    fn grid(count: usize) -> GridLayout {
        GridLayout::from_options(count, &LayoutOptions::default())
    }

    #[test]
    fn column_count_is_ceil_sqrt() {
        for n in 1..=200 {
            let g = grid(n);
            let expected = (n as f64).sqrt().ceil() as usize;
            assert_eq!(g.columns(), expected, "n = {n}");
            assert!(g.rows() * g.columns() >= n);
            assert!((g.rows() - 1) * g.columns() < n);
        }
    }

    #[test]
    fn every_card_gets_a_unique_cell() {
        for n in 1..=64 {
            let g = grid(n);
            let cells: HashSet<GridCell> =
                (0..n).filter_map(|i| g.cell(i)).collect();
            assert_eq!(cells.len(), n);
            assert!(cells.iter().all(|c| c.row < g.rows() && c.col < g.columns()));
        }
    }

    #[test]
    fn twelve_cards_make_four_by_three() {
        let g = grid(12);
        assert_eq!(g.columns(), 4);
        assert_eq!(g.rows(), 3);

        let (sh, sv) = LayoutOptions::default().grid_spacing();
        let first = g.position(0).unwrap();
        assert!((first.x + 1.5 * sh).abs() < 1e-5);
        assert!((first.y - sv).abs() < 1e-5);

        // Last row is full, so the last card is its right-most cell and
        // the bottom-left cell belongs to the first card of that row.
        assert_eq!(g.cell(11), Some(GridCell { row: 2, col: 3 }));
        assert_eq!(g.cell(8), Some(GridCell { row: 2, col: 0 }));
        let bottom_left = g.position(8).unwrap();
        assert!((bottom_left.x - first.x).abs() < 1e-5);
        assert!((bottom_left.y + sv).abs() < 1e-5);
    }

    #[test]
    fn partial_last_row_fills_from_the_left() {
        let g = grid(10);
        assert_eq!(g.columns(), 4);
        assert_eq!(g.rows(), 3);
        assert_eq!(g.cell(8), Some(GridCell { row: 2, col: 0 }));
        assert_eq!(g.cell(9), Some(GridCell { row: 2, col: 1 }));
        assert_eq!(g.cell(10), None);
    }

    #[test]
    fn grid_is_centered_on_origin() {
        let g = grid(9);
        let sum: Vec3 = g.positions().into_iter().sum();
        assert!(sum.length() < 1e-4);
    }

    #[test]
    fn zero_cards_has_no_cells() {
        let g = grid(0);
        assert_eq!(g.columns(), 0);
        assert_eq!(g.rows(), 0);
        assert_eq!(g.width(), 0.0);
        assert_eq!(g.position(0), None);
        assert!(g.positions().is_empty());
    }
}
