use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for the steelspan bridge modeller.
#[derive(Debug, Error)]
pub enum SteelspanError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Topology(#[from] TopologyError),

    #[error(transparent)]
    Layout(#[from] LayoutError),

    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Failures while constructing or combining solids.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("invalid dimension: {name} = {value} ({constraint})")]
    InvalidDimension {
        name: &'static str,
        value: f64,
        constraint: &'static str,
    },

    #[error("degenerate I-section: {0}")]
    DegenerateSection(String),

    #[error("boolean operation failed: {0}")]
    BooleanFailure(String),
}

/// Errors related to the boundary topology store.
#[derive(Debug, Error)]
pub enum TopologyError {
    #[error("entity not found: {0}")]
    EntityNotFound(String),

    #[error("boundary has more than {max} mesh vertices")]
    IndexOverflow { max: u32 },
}

/// Layout precondition failures.
#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("girder count {count} is below the minimum of {min}")]
    InvalidGirderCount { count: usize, min: usize },

    #[error("skew angle {angle} degrees is outside [0, {max}]")]
    InvalidSkewAngle { angle: f64, max: f64 },

    #[error("parameter {name} = {value} is invalid: {constraint}")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        constraint: &'static str,
    },
}

/// Protocol-order violations.
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("{component} has no geometry yet; call create_geometry first")]
    UninitializedComponent { component: String },

    #[error("{step} requires assembly state {expected}, but the assembly is {actual}")]
    InvalidAssemblyState {
        step: &'static str,
        expected: String,
        actual: String,
    },
}

/// Errors reported by the exporter. File system and conversion failures are
/// kept apart.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("cannot access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("format conversion failed: {0}")]
    Format(String),
}

/// Errors while loading bridge parameters.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read parameter file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed bridge parameters: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Convenience type alias for results using [`SteelspanError`].
pub type Result<T> = std::result::Result<T, SteelspanError>;
