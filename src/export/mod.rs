//! Writing compounds to exchange and native files.

mod native;
mod step;

use std::fmt;
use std::path::Path;

pub use native::{parse_native, read_native, render_native};
pub use step::render_step;

use crate::bridge::Compound;
use crate::error::{ExportError, Result};

/// Target file format of [`export_compound`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// ISO 10303-21, AP214.
    Step,
    /// The kernel's own JSON document, readable with [`read_native`].
    Native,
}

impl ExportFormat {
    /// Picks the format from a file extension, ignoring case.
    #[must_use]
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_ascii_lowercase().as_str() {
            "step" | "stp" => Some(Self::Step),
            "brep" | "json" => Some(Self::Native),
            _ => None,
        }
    }

    /// Conventional file extension.
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            Self::Step => "step",
            Self::Native => "brep",
        }
    }

    /// Renders `compound` in this format.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::Format`] if the conversion fails.
    pub fn render(self, compound: &Compound) -> Result<String> {
        match self {
            Self::Step => render_step(compound),
            Self::Native => render_native(compound),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Step => "STEP",
            Self::Native => "native",
        })
    }
}

/// Writes `compound` to `path` in `format`.
///
/// The whole file is rendered before anything is written, so a conversion
/// failure leaves the file system untouched.
///
/// # Errors
///
/// Returns [`ExportError::Format`] if the conversion fails and
/// [`ExportError::Io`] if the file cannot be written.
pub fn export_compound(compound: &Compound, format: ExportFormat, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let text = format.render(compound)?;
    std::fs::write(path, text).map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!(
        path = %path.display(),
        %format,
        members = compound.len(),
        "exported compound"
    );
    Ok(())
}
