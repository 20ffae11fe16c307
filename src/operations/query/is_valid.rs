use crate::topology::{Solid, TopologyStore};

use super::ExtractBoundary;

/// Validates the topological and geometric consistency of a solid.
///
/// A valid solid has a well-formed finite cell grid with material in it,
/// a finite placement, exactly one face-connected lump, and a closed
/// boundary in which every edge is shared by two faces.
pub struct IsValid<'a> {
    solid: &'a Solid,
}

impl<'a> IsValid<'a> {
    /// Creates a new `IsValid` query.
    #[must_use]
    pub fn new(solid: &'a Solid) -> Self {
        Self { solid }
    }

    /// Executes the validation, returning `true` if the solid is valid.
    #[must_use]
    pub fn execute(&self) -> bool {
        let placement = self.solid.placement();
        let finite_placement = placement.translation.vector.iter().all(|v| v.is_finite())
            && placement.rotation.coords.iter().all(|v| v.is_finite());
        if !finite_placement || !self.solid.cells().is_consistent() {
            return false;
        }
        if self.solid.lump_count() != 1 {
            return false;
        }

        let mut store = TopologyStore::new();
        let shell = ExtractBoundary::new(self.solid).execute(&mut store);
        store.shell(shell).is_ok_and(|s| s.is_closed)
    }
}
