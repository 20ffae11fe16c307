use crate::math::Vector3;

use super::edge::OrientedEdge;

slotmap::new_key_type! {
    /// Identifier of a boundary face in the topology store.
    pub struct FaceId;
}

/// A planar boundary face.
///
/// The loop runs counter-clockwise when viewed from outside the solid, so
/// its winding agrees with the outward normal.
#[derive(Debug, Clone)]
pub struct FaceData {
    /// Closed loop of oriented edges.
    pub edges: Vec<OrientedEdge>,
    /// Outward unit normal.
    pub normal: Vector3,
}
