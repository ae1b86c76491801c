use boardsight_core::{OccupancyGrid, SquarePosition};

/// Squares whose occupancy differs between two grids, in row-major order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DiffSet {
    squares: Vec<SquarePosition>,
}

impl DiffSet {
    pub fn between(old: &OccupancyGrid, new: &OccupancyGrid) -> Self {
        let squares = SquarePosition::all().filter(|&p| old[p] != new[p]).collect();
        Self { squares }
    }

    pub fn len(&self) -> usize {
        self.squares.len()
    }

    pub fn is_empty(&self) -> bool {
        self.squares.is_empty()
    }

    pub fn squares(&self) -> &[SquarePosition] {
        &self.squares
    }

    /// Squares matching `pred`.
    pub(crate) fn filter(&self, pred: impl Fn(SquarePosition) -> bool) -> Vec<SquarePosition> {
        self.squares.iter().copied().filter(|&p| pred(p)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use boardsight_core::Occupancy;

    #[test]
    fn identical_grids_have_no_diff() {
        let g = OccupancyGrid::from_fn(|p| {
            if p.row < 2 {
                Occupancy::Dark
            } else {
                Occupancy::Empty
            }
        });
        assert!(DiffSet::between(&g, &g).is_empty());
    }

    #[test]
    fn diff_lists_changed_squares_in_row_major_order() {
        let old = OccupancyGrid::default();
        let new = OccupancyGrid::from_fn(|p| match (p.row, p.col) {
            (5, 1) | (2, 6) => Occupancy::Light,
            _ => Occupancy::Empty,
        });
        let d = DiffSet::between(&old, &new);
        assert_eq!(
            d.squares(),
            &[SquarePosition::new(2, 6), SquarePosition::new(5, 1)]
        );
    }
}
