use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::math::{same_coordinate, Aabb, Point3};

/// Integer address of a cell (or of a grid node) along X, Y and Z.
pub type GridIndex = [usize; 3];

/// Orthogonal cell decomposition of a solid in its local frame.
///
/// The grid is the tensor product of three sorted breakpoint lists. Each cell
/// between consecutive breakpoints is either material or empty. A solid built
/// from axis-aligned boxes is represented exactly, and neighbouring cells
/// share whole faces, so the boundary never has T-junctions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellGrid {
    breaks: [Vec<f64>; 3],
    occupied: Vec<bool>,
}

impl CellGrid {
    /// Builds the grid for the union of `boxes`.
    ///
    /// Breakpoints closer than the linear tolerance are merged. A cell is
    /// material if its centre lies strictly inside at least one box.
    #[must_use]
    pub fn from_boxes(boxes: &[Aabb]) -> Self {
        let breaks: [Vec<f64>; 3] = std::array::from_fn(|axis| {
            let mut coords: Vec<f64> = boxes
                .iter()
                .flat_map(|b| [b.min[axis], b.max[axis]])
                .collect();
            coords.sort_by(f64::total_cmp);
            coords.dedup_by(|a, b| same_coordinate(*a, *b));
            coords
        });

        let mut grid = Self {
            occupied: Vec::new(),
            breaks,
        };
        let [nx, ny, nz] = grid.dims();
        grid.occupied = vec![false; nx * ny * nz];

        for k in 0..nz {
            for j in 0..ny {
                for i in 0..nx {
                    let center = grid.cell_box([i, j, k]).center();
                    let filled = boxes.iter().any(|b| b.contains_interior(&center));
                    let idx = grid.linear([i, j, k]);
                    grid.occupied[idx] = filled;
                }
            }
        }
        grid
    }

    /// Number of cells along each axis.
    #[must_use]
    pub fn dims(&self) -> [usize; 3] {
        std::array::from_fn(|axis| self.breaks[axis].len().saturating_sub(1))
    }

    /// Breakpoints along one axis (0 = X, 1 = Y, 2 = Z).
    #[must_use]
    pub fn breaks(&self, axis: usize) -> &[f64] {
        &self.breaks[axis]
    }

    /// Returns `true` if the stored occupancy matches the grid dimensions and
    /// every breakpoint list is finite and strictly increasing.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        let [nx, ny, nz] = self.dims();
        let sorted = self.breaks.iter().all(|b| {
            b.iter().all(|v| v.is_finite()) && b.windows(2).all(|w| w[1] - w[0] > 0.0)
        });
        sorted && self.occupied.len() == nx * ny * nz
    }

    fn linear(&self, [i, j, k]: GridIndex) -> usize {
        let [nx, ny, _] = self.dims();
        (k * ny + j) * nx + i
    }

    /// Whether the cell at `index` is material. Out-of-range cells are empty.
    #[must_use]
    pub fn is_occupied(&self, index: GridIndex) -> bool {
        let dims = self.dims();
        if (0..3).any(|axis| index[axis] >= dims[axis]) {
            return false;
        }
        self.occupied
            .get(self.linear(index))
            .copied()
            .unwrap_or(false)
    }

    /// Local-frame position of a grid node.
    #[must_use]
    pub fn node(&self, [i, j, k]: GridIndex) -> Point3 {
        Point3::new(self.breaks[0][i], self.breaks[1][j], self.breaks[2][k])
    }

    /// Local-frame box of one cell.
    #[must_use]
    pub fn cell_box(&self, [i, j, k]: GridIndex) -> Aabb {
        Aabb::from_corners(self.node([i, j, k]), self.node([i + 1, j + 1, k + 1]))
    }

    /// Indices of all material cells.
    pub fn occupied_cells(&self) -> impl Iterator<Item = GridIndex> + '_ {
        let [nx, ny, nz] = self.dims();
        (0..nz)
            .flat_map(move |k| (0..ny).flat_map(move |j| (0..nx).map(move |i| [i, j, k])))
            .filter(|&index| self.is_occupied(index))
    }

    /// Local-frame boxes of all material cells.
    pub fn boxes(&self) -> impl Iterator<Item = Aabb> + '_ {
        self.occupied_cells().map(|index| self.cell_box(index))
    }

    /// Number of material cells.
    #[must_use]
    pub fn occupied_count(&self) -> usize {
        self.occupied_cells().count()
    }

    /// Exact enclosed volume.
    #[must_use]
    pub fn volume(&self) -> f64 {
        self.boxes().map(|b| b.volume()).sum()
    }

    /// Number of face-connected groups of material cells.
    ///
    /// Cells that only touch along an edge or at a corner count as separate
    /// lumps.
    #[must_use]
    pub fn lump_count(&self) -> usize {
        let mut visited = vec![false; self.occupied.len()];
        let mut lumps = 0;

        for seed in self.occupied_cells() {
            let seed_idx = self.linear(seed);
            if visited[seed_idx] {
                continue;
            }
            lumps += 1;
            visited[seed_idx] = true;
            let mut queue = VecDeque::from([seed]);
            while let Some(cell) = queue.pop_front() {
                for neighbour in self.face_neighbours(cell) {
                    let idx = self.linear(neighbour);
                    if self.is_occupied(neighbour) && !visited[idx] {
                        visited[idx] = true;
                        queue.push_back(neighbour);
                    }
                }
            }
        }
        lumps
    }

    fn face_neighbours(&self, cell: GridIndex) -> impl Iterator<Item = GridIndex> {
        let dims = self.dims();
        (0..3).flat_map(move |axis| {
            let below = cell[axis].checked_sub(1).map(|v| {
                let mut n = cell;
                n[axis] = v;
                n
            });
            let above = (cell[axis] + 1 < dims[axis]).then(|| {
                let mut n = cell;
                n[axis] += 1;
                n
            });
            below.into_iter().chain(above)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn b(min: [f64; 3], max: [f64; 3]) -> Aabb {
        Aabb::from_corners(Point3::from(min), Point3::from(max))
    }

    #[test]
    fn single_box_is_one_cell() {
        let grid = CellGrid::from_boxes(&[b([0.0; 3], [2.0, 3.0, 4.0])]);
        assert_eq!(grid.dims(), [1, 1, 1]);
        assert_eq!(grid.occupied_count(), 1);
        assert!((grid.volume() - 24.0).abs() < 1e-12);
        assert_eq!(grid.lump_count(), 1);
        assert!(grid.is_consistent());
    }

    #[test]
    fn overlapping_boxes_do_not_double_count() {
        let grid = CellGrid::from_boxes(&[
            b([0.0; 3], [2.0, 2.0, 2.0]),
            b([1.0, 1.0, 1.0], [3.0, 3.0, 3.0]),
        ]);
        // 8 + 8 - 1 overlap
        assert!((grid.volume() - 15.0).abs() < 1e-12);
        assert_eq!(grid.lump_count(), 1);
    }

    #[test]
    fn face_touching_boxes_form_one_lump() {
        let grid = CellGrid::from_boxes(&[
            b([0.0; 3], [1.0, 1.0, 1.0]),
            b([0.0, 0.0, 1.0], [1.0, 1.0, 2.0]),
        ]);
        assert_eq!(grid.lump_count(), 1);
    }

    #[test]
    fn separated_boxes_form_two_lumps() {
        let grid = CellGrid::from_boxes(&[
            b([0.0; 3], [1.0, 1.0, 1.0]),
            b([0.0, 0.0, 5.0], [1.0, 1.0, 6.0]),
        ]);
        assert_eq!(grid.lump_count(), 2);
    }

    #[test]
    fn edge_contact_is_not_a_connection() {
        let grid = CellGrid::from_boxes(&[
            b([0.0; 3], [1.0, 1.0, 1.0]),
            b([1.0, 1.0, 0.0], [2.0, 2.0, 1.0]),
        ]);
        assert_eq!(grid.lump_count(), 2);
    }

    #[test]
    fn nearly_equal_breakpoints_are_merged() {
        let grid = CellGrid::from_boxes(&[
            b([0.0; 3], [1.0, 1.0, 1.0]),
            b([0.0, 0.0, 1.0 + 1e-9], [1.0, 1.0, 2.0]),
        ]);
        assert_eq!(grid.dims(), [1, 1, 2]);
        assert_eq!(grid.lump_count(), 1);
    }

    #[test]
    fn empty_input_gives_empty_grid() {
        let grid = CellGrid::from_boxes(&[]);
        assert_eq!(grid.dims(), [0, 0, 0]);
        assert_eq!(grid.occupied_count(), 0);
        assert_eq!(grid.lump_count(), 0);
    }
}
