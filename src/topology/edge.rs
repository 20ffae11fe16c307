use super::vertex::VertexId;

slotmap::new_key_type! {
    /// Identifier of a boundary edge in the topology store.
    pub struct EdgeId;
}

/// A straight boundary edge between two vertices.
///
/// Orthogonal solids only have line edges, so the curve is implied by the
/// end points.
#[derive(Debug, Clone)]
pub struct EdgeData {
    /// Start vertex of the edge.
    pub start: VertexId,
    /// End vertex of the edge.
    pub end: VertexId,
}

/// An edge with orientation information within a face loop.
#[derive(Debug, Clone, Copy)]
pub struct OrientedEdge {
    /// The edge identifier.
    pub edge: EdgeId,
    /// `true` if the loop runs from the edge's start to its end.
    pub forward: bool,
}
