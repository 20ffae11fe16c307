use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, LayoutError, Result};
use crate::operations::creation::MakeISection;

use super::component::GirderSection;
use super::layout::ComputeLayout;

/// Largest skew angle the model supports, in degrees.
pub const MAX_SKEW_DEGREES: f64 = 15.0;

/// Primary design parameters of the bridge. All lengths are millimetres.
///
/// Deserialisation starts from [`BridgeParams::default`], so a parameter
/// document only has to name the values it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BridgeParams {
    /// Span length along X.
    pub span_length: f64,
    /// Number of longitudinal girders, at least 3.
    pub girder_count: usize,
    /// Centre-to-centre girder spacing.
    pub girder_spacing: f64,
    /// Deck overhang beyond the outer girder centrelines.
    pub girder_overhang: f64,
    /// Skew angle in degrees, within `[0, 15]`.
    pub skew_angle_degrees: f64,
    /// Overall girder depth `d`.
    pub girder_depth: f64,
    /// Girder flange width `bf`.
    pub flange_width: f64,
    /// Girder flange thickness `tf`.
    pub flange_thickness: f64,
    /// Girder web thickness `tw`.
    pub web_thickness: f64,
    /// Deck slab thickness.
    pub deck_thickness: f64,
    /// Parapet width.
    pub parapet_width: f64,
    /// Parapet height above the deck.
    pub parapet_height: f64,
}

impl Default for BridgeParams {
    fn default() -> Self {
        Self {
            span_length: 12000.0,
            girder_count: 3,
            girder_spacing: 3000.0,
            girder_overhang: 500.0,
            skew_angle_degrees: 10.0,
            girder_depth: 900.0,
            flange_width: 300.0,
            flange_thickness: 16.0,
            web_thickness: 10.0,
            deck_thickness: 200.0,
            parapet_width: 300.0,
            parapet_height: 1000.0,
        }
    }
}

impl BridgeParams {
    /// Parses a JSON parameter document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON, wrong value types or
    /// unknown keys.
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| ConfigError::Parse(e).into())
    }

    /// Reads and parses a JSON parameter file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] if the file cannot be read and
    /// [`ConfigError::Parse`] if its content is malformed.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let params = Self::from_json_str(&json)?;
        tracing::debug!(path = %path.display(), "loaded bridge parameters");
        Ok(params)
    }

    /// Cross-section of every girder.
    #[must_use]
    pub fn girder_section(&self) -> GirderSection {
        GirderSection {
            depth: self.girder_depth,
            flange_width: self.flange_width,
            flange_thickness: self.flange_thickness,
            web_thickness: self.web_thickness,
        }
    }

    /// Checks every parameter range up front and reports the first
    /// violation.
    ///
    /// The assembly runs the same checks stage by stage; this is for callers
    /// that want to reject a parameter set before building anything.
    ///
    /// # Errors
    ///
    /// Returns the layout, skew or section error for the first parameter
    /// out of range.
    pub fn validate(&self) -> Result<()> {
        ComputeLayout::from_params(self).validate()?;
        check_skew(self.skew_angle_degrees)?;
        let section = self.girder_section();
        MakeISection::new(
            section.depth,
            section.flange_width,
            section.flange_thickness,
            section.web_thickness,
            self.span_length,
        )
        .validate()?;
        positive("deck_thickness", self.deck_thickness)?;
        positive("parapet_height", self.parapet_height)?;
        Ok(())
    }
}

/// Rejects skew angles outside `[0, MAX_SKEW_DEGREES]`, including NaN.
pub(crate) fn check_skew(angle: f64) -> Result<()> {
    if (0.0..=MAX_SKEW_DEGREES).contains(&angle) {
        Ok(())
    } else {
        Err(LayoutError::InvalidSkewAngle {
            angle,
            max: MAX_SKEW_DEGREES,
        }
        .into())
    }
}

fn positive(name: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(LayoutError::InvalidParameter {
            name,
            value,
            constraint: "must be a finite value greater than zero",
        }
        .into())
    }
}
