use serde::{Deserialize, Serialize};

use crate::math::{Isometry3, Point3};

use super::cells::CellGrid;

/// A bounded volume.
///
/// The shape lives in a local frame as an orthogonal [`CellGrid`]; the
/// placement maps that frame into world coordinates. A `Solid` is an
/// immutable value: rigid transforms consume it and return a new one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Solid {
    placement: Isometry3,
    cells: CellGrid,
}

impl Solid {
    /// Wraps a cell decomposition placed by `placement`.
    #[must_use]
    pub(crate) fn from_parts(placement: Isometry3, cells: CellGrid) -> Self {
        Self { placement, cells }
    }

    /// Local-to-world placement.
    #[must_use]
    pub fn placement(&self) -> &Isometry3 {
        &self.placement
    }

    /// Cell decomposition in the local frame.
    #[must_use]
    pub fn cells(&self) -> &CellGrid {
        &self.cells
    }

    /// World position of the local frame origin.
    ///
    /// Rigid motions move this point exactly like any material point, which
    /// makes it a convenient reference point for a component.
    #[must_use]
    pub fn origin(&self) -> Point3 {
        self.placement * Point3::origin()
    }

    /// Maps a local-frame point into world coordinates.
    #[must_use]
    pub fn to_world(&self, local: &Point3) -> Point3 {
        self.placement * local
    }

    /// Returns the solid moved by `motion`, applied in world coordinates
    /// after the current placement.
    #[must_use]
    pub(crate) fn moved(self, motion: &Isometry3) -> Self {
        Self {
            placement: motion * self.placement,
            cells: self.cells,
        }
    }

    /// Number of face-connected lumps.
    #[must_use]
    pub fn lump_count(&self) -> usize {
        self.cells.lump_count()
    }
}
