use serde::Serialize;

use crate::error::{LayoutError, Result};
use crate::math::Point3;

use super::params::BridgeParams;

/// Fewest girders the transverse layout supports.
pub const MIN_GIRDER_COUNT: usize = 3;

/// Derived geometry of the bridge cross-section.
///
/// Produced once per assembly run and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutResult {
    deck_width: f64,
    girder_positions: Vec<f64>,
    deck_z_level: f64,
    parapet_offset: f64,
    skew_pivot: Point3,
}

impl LayoutResult {
    /// Overall deck width.
    #[must_use]
    pub fn deck_width(&self) -> f64 {
        self.deck_width
    }

    /// Girder centreline Y positions, increasing, symmetric about Y = 0.
    #[must_use]
    pub fn girder_positions(&self) -> &[f64] {
        &self.girder_positions
    }

    /// Z level of the deck soffit, flush with the girder tops.
    #[must_use]
    pub fn deck_z_level(&self) -> f64 {
        self.deck_z_level
    }

    /// Distance from Y = 0 to each parapet centreline.
    #[must_use]
    pub fn parapet_offset(&self) -> f64 {
        self.parapet_offset
    }

    /// Parapet centreline Y positions, left (+Y) then right (-Y).
    #[must_use]
    pub fn parapet_offsets(&self) -> [f64; 2] {
        [self.parapet_offset, -self.parapet_offset]
    }

    /// Point on the vertical skew axis, at mid-span on the centreline.
    #[must_use]
    pub fn skew_pivot(&self) -> Point3 {
        self.skew_pivot
    }
}

/// Computes the transverse and vertical layout from primary parameters.
pub struct ComputeLayout {
    span_length: f64,
    girder_count: usize,
    spacing: f64,
    overhang: f64,
    girder_depth: f64,
    parapet_width: f64,
}

impl ComputeLayout {
    /// Creates a new `ComputeLayout` operation.
    #[must_use]
    pub fn new(
        span_length: f64,
        girder_count: usize,
        spacing: f64,
        overhang: f64,
        girder_depth: f64,
        parapet_width: f64,
    ) -> Self {
        Self {
            span_length,
            girder_count,
            spacing,
            overhang,
            girder_depth,
            parapet_width,
        }
    }

    /// Takes the layout inputs out of a full parameter set.
    #[must_use]
    pub fn from_params(params: &BridgeParams) -> Self {
        Self::new(
            params.span_length,
            params.girder_count,
            params.girder_spacing,
            params.girder_overhang,
            params.girder_depth,
            params.parapet_width,
        )
    }

    /// Checks the layout preconditions.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::InvalidGirderCount`] for fewer than three
    /// girders and [`LayoutError::InvalidParameter`] for a non-positive span,
    /// spacing, depth or parapet width, a negative overhang, a spacing so large
    /// the deck width overflows, or parapets too wide to fit side by side on
    /// the deck.
    pub fn validate(&self) -> Result<()> {
        if self.girder_count < MIN_GIRDER_COUNT {
            return Err(LayoutError::InvalidGirderCount {
                count: self.girder_count,
                min: MIN_GIRDER_COUNT,
            }
            .into());
        }
        for (name, value) in [
            ("span_length", self.span_length),
            ("girder_spacing", self.spacing),
            ("girder_depth", self.girder_depth),
            ("parapet_width", self.parapet_width),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(LayoutError::InvalidParameter {
                    name,
                    value,
                    constraint: "must be a finite value greater than zero",
                }
                .into());
            }
        }
        if !(self.overhang.is_finite() && self.overhang >= 0.0) {
            return Err(LayoutError::InvalidParameter {
                name: "girder_overhang",
                value: self.overhang,
                constraint: "must be a finite value of zero or more",
            }
            .into());
        }
        if !self.deck_width().is_finite() {
            return Err(LayoutError::InvalidParameter {
                name: "girder_spacing",
                value: self.spacing,
                constraint: "derived deck width must be finite",
            }
            .into());
        }
        if 2.0 * self.parapet_width > self.deck_width() {
            return Err(LayoutError::InvalidParameter {
                name: "parapet_width",
                value: self.parapet_width,
                constraint: "two parapets must fit within the deck width",
            }
            .into());
        }
        Ok(())
    }

    #[allow(clippy::cast_precision_loss)]
    fn deck_width(&self) -> f64 {
        self.spacing * (self.girder_count as f64 - 1.0) + 2.0 * self.overhang
    }

    /// Executes the layout computation.
    ///
    /// # Errors
    ///
    /// Returns the first violated precondition, see [`ComputeLayout::validate`].
    #[allow(clippy::cast_precision_loss)]
    pub fn execute(&self) -> Result<LayoutResult> {
        self.validate()?;

        let deck_width = self.deck_width();
        let total_span = self.spacing * (self.girder_count as f64 - 1.0);
        let start_y = -total_span / 2.0;
        let girder_positions = (0..self.girder_count)
            .map(|i| start_y + i as f64 * self.spacing)
            .collect();

        Ok(LayoutResult {
            deck_width,
            girder_positions,
            deck_z_level: self.girder_depth,
            parapet_offset: deck_width / 2.0 - self.parapet_width / 2.0,
            skew_pivot: Point3::new(self.span_length / 2.0, 0.0, 0.0),
        })
    }
}
