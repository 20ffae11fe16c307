use super::face::FaceId;

slotmap::new_key_type! {
    /// Identifier of a shell in the topology store.
    pub struct ShellId;
}

/// A connected set of faces bounding one solid.
#[derive(Debug, Clone)]
pub struct ShellData {
    /// The faces that make up this shell.
    pub faces: Vec<FaceId>,
    /// Whether every edge is shared by exactly two faces.
    pub is_closed: bool,
}
