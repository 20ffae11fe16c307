use serde::{Deserialize, Serialize};

use super::{Point3, Vector3};

/// An axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    /// Minimum corner of the bounding box.
    pub min: Point3,
    /// Maximum corner of the bounding box.
    pub max: Point3,
}

impl Aabb {
    /// Creates a box from two opposite corners, in any order.
    #[must_use]
    pub fn from_corners(a: Point3, b: Point3) -> Self {
        Self {
            min: a.inf(&b),
            max: a.sup(&b),
        }
    }

    /// Smallest box containing every point, or `None` for an empty input.
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = Point3>,
    {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        Some(iter.fold(Self::from_corners(first, first), |acc, p| {
            acc.expanded_to(&p)
        }))
    }

    /// Returns the box grown to include `point`.
    #[must_use]
    pub fn expanded_to(&self, point: &Point3) -> Self {
        Self {
            min: self.min.inf(point),
            max: self.max.sup(point),
        }
    }

    /// Smallest box containing both boxes.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        Self {
            min: self.min.inf(&other.min),
            max: self.max.sup(&other.max),
        }
    }

    /// Size along X, Y and Z.
    #[must_use]
    pub fn extent(&self) -> Vector3 {
        self.max - self.min
    }

    /// Midpoint of the box.
    #[must_use]
    pub fn center(&self) -> Point3 {
        nalgebra::center(&self.min, &self.max)
    }

    /// Enclosed volume.
    #[must_use]
    pub fn volume(&self) -> f64 {
        let e = self.extent();
        e.x * e.y * e.z
    }

    /// The eight corners, ordered by the bit pattern `(x, y, z)`.
    #[must_use]
    pub fn corners(&self) -> [Point3; 8] {
        let (lo, hi) = (self.min, self.max);
        std::array::from_fn(|i| {
            Point3::new(
                if i & 1 == 0 { lo.x } else { hi.x },
                if i & 2 == 0 { lo.y } else { hi.y },
                if i & 4 == 0 { lo.z } else { hi.z },
            )
        })
    }

    /// Strict interior containment.
    #[must_use]
    pub fn contains_interior(&self, point: &Point3) -> bool {
        (0..3).all(|axis| point[axis] > self.min[axis] && point[axis] < self.max[axis])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corners_span_the_box() {
        let aabb = Aabb::from_corners(Point3::new(2.0, 0.0, 5.0), Point3::new(0.0, 3.0, 1.0));
        assert_eq!(aabb.min, Point3::new(0.0, 0.0, 1.0));
        assert_eq!(aabb.max, Point3::new(2.0, 3.0, 5.0));
        assert_eq!(aabb.corners()[0], aabb.min);
        assert_eq!(aabb.corners()[7], aabb.max);
        assert!((aabb.volume() - 24.0).abs() < 1e-12);
    }

    #[test]
    fn interior_excludes_boundary() {
        let aabb = Aabb::from_corners(Point3::origin(), Point3::new(1.0, 1.0, 1.0));
        assert!(aabb.contains_interior(&Point3::new(0.5, 0.5, 0.5)));
        assert!(!aabb.contains_interior(&Point3::new(0.0, 0.5, 0.5)));
    }

    #[test]
    fn empty_point_set_has_no_box() {
        assert!(Aabb::from_points(std::iter::empty()).is_none());
    }
}
