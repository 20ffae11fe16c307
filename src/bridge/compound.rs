use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::math::Aabb;
use crate::operations::query::{BoundingBox, Volume};
use crate::topology::Solid;

use super::component::ComponentCategory;

/// One solid of a [`Compound`], tagged with where it came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompoundMember {
    pub label: String,
    pub category: ComponentCategory,
    pub solid: Solid,
}

/// A grouping of independent solids.
///
/// Members are kept side by side in insertion order; nothing is fused, so
/// every member keeps its own boundary for export and display.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Compound {
    members: Vec<CompoundMember>,
}

impl Compound {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, label: impl Into<String>, category: ComponentCategory, solid: Solid) {
        self.members.push(CompoundMember {
            label: label.into(),
            category,
            solid,
        });
    }

    #[must_use]
    pub fn members(&self) -> &[CompoundMember] {
        &self.members
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Members of one category, in insertion order.
    pub fn by_category(
        &self,
        category: ComponentCategory,
    ) -> impl Iterator<Item = &CompoundMember> + '_ {
        self.members.iter().filter(move |m| m.category == category)
    }

    /// Sum of the member volumes.
    ///
    /// # Errors
    ///
    /// Returns an error if a member cannot be tessellated.
    pub fn volume(&self) -> Result<f64> {
        self.members
            .iter()
            .map(|m| Volume::new(&m.solid).execute())
            .sum()
    }

    /// World-space box around all members, `None` for an empty compound.
    ///
    /// # Errors
    ///
    /// Returns an error if a member has no material.
    pub fn bounding_box(&self) -> Result<Option<Aabb>> {
        let mut total: Option<Aabb> = None;
        for member in &self.members {
            let aabb = BoundingBox::new(&member.solid).execute()?;
            total = Some(total.map_or(aabb, |t| t.union(&aabb)));
        }
        Ok(total)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::math::{Point3, Vector3};
    use crate::operations::creation::MakeBox;
    use crate::operations::transform::Translate;

    fn cube_at(x: f64) -> Solid {
        let solid = MakeBox::new(1.0, 1.0, 1.0).execute().unwrap();
        Translate::new(Vector3::new(x, 0.0, 0.0))
            .execute(solid)
            .unwrap()
    }

    #[test]
    fn empty_compound() {
        let compound = Compound::new();
        assert!(compound.is_empty());
        assert_relative_eq!(compound.volume().unwrap(), 0.0);
        assert!(compound.bounding_box().unwrap().is_none());
    }

    #[test]
    fn members_stay_separate() {
        let mut compound = Compound::new();
        compound.push("girder 1", ComponentCategory::Girder, cube_at(0.0));
        compound.push("girder 2", ComponentCategory::Girder, cube_at(5.0));
        compound.push("deck", ComponentCategory::Deck, cube_at(0.5));

        assert_eq!(compound.len(), 3);
        assert_eq!(compound.by_category(ComponentCategory::Girder).count(), 2);
        assert_eq!(compound.by_category(ComponentCategory::Parapet).count(), 0);
        // overlapping members are not fused
        assert_relative_eq!(compound.volume().unwrap(), 3.0, max_relative = 1e-9);

        let aabb = compound.bounding_box().unwrap().unwrap();
        assert_relative_eq!(aabb.min, Point3::new(0.0, 0.0, 0.0), epsilon = 1e-12);
        assert_relative_eq!(aabb.max, Point3::new(6.0, 1.0, 1.0), epsilon = 1e-12);
    }
}
