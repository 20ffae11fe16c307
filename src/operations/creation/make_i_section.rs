use crate::error::{GeometryError, Result};
use crate::math::{Vector3, LINEAR_TOLERANCE};
use crate::operations::boolean::Union;
use crate::operations::transform::Translate;
use crate::topology::Solid;

use super::MakeBox;

/// Creates an I-section prism from two flanges and a web.
///
/// Local frame: X runs along the member, Y across the flanges starting at
/// the flange edge, Z up from the underside of the bottom flange. The web
/// is centred on the flange width.
pub struct MakeISection {
    depth: f64,
    flange_width: f64,
    flange_thickness: f64,
    web_thickness: f64,
    length: f64,
}

impl MakeISection {
    /// Creates a new `MakeISection` operation.
    ///
    /// * `depth` - Overall section depth `d`.
    /// * `flange_width` - Flange width `bf`.
    /// * `flange_thickness` - Flange thickness `tf`.
    /// * `web_thickness` - Web thickness `tw`.
    /// * `length` - Member length along X.
    #[must_use]
    pub fn new(
        depth: f64,
        flange_width: f64,
        flange_thickness: f64,
        web_thickness: f64,
        length: f64,
    ) -> Self {
        Self {
            depth,
            flange_width,
            flange_thickness,
            web_thickness,
            length,
        }
    }

    /// Clear height of the web between the flanges, `d - 2 tf`.
    #[must_use]
    pub fn web_height(&self) -> f64 {
        self.depth - 2.0 * self.flange_thickness
    }

    /// Flange width on either side of the web, `(bf - tw) / 2`.
    #[must_use]
    pub fn flange_outstand(&self) -> f64 {
        (self.flange_width - self.web_thickness) / 2.0
    }

    /// Checks the section invariants without building anything.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::DegenerateSection`] if a dimension is not
    /// positive, the flanges meet or overlap (`d - 2 tf <= 0`), or the web is
    /// at least as wide as the flanges. Dimensions, the web height and the
    /// flange outstand `(bf - tw) / 2` shorter than [`LINEAR_TOLERANCE`]
    /// count as degenerate.
    pub fn validate(&self) -> Result<()> {
        let dimensions = [
            ("depth", self.depth),
            ("flange_width", self.flange_width),
            ("flange_thickness", self.flange_thickness),
            ("web_thickness", self.web_thickness),
            ("length", self.length),
        ];
        for (name, value) in dimensions {
            if !(value.is_finite() && value >= LINEAR_TOLERANCE) {
                return Err(GeometryError::DegenerateSection(format!(
                    "{name} = {value} must be a finite value of at least the linear tolerance"
                ))
                .into());
            }
        }
        if self.web_height() < LINEAR_TOLERANCE {
            return Err(GeometryError::DegenerateSection(format!(
                "web height d - 2 tf = {} - 2 x {} = {} must be positive",
                self.depth,
                self.flange_thickness,
                self.web_height()
            ))
            .into());
        }
        if self.flange_outstand() < LINEAR_TOLERANCE {
            return Err(GeometryError::DegenerateSection(format!(
                "flange outstand (bf - tw) / 2 = ({} - {}) / 2 = {} must be positive",
                self.flange_width,
                self.web_thickness,
                self.flange_outstand()
            ))
            .into());
        }
        Ok(())
    }

    /// Executes the operation, returning the fused section.
    ///
    /// The bottom flange is fused with the web first and the top flange
    /// last, so every intermediate result is a single connected solid.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::DegenerateSection`] for invalid dimensions and
    /// [`GeometryError::BooleanFailure`] if fusing does not yield exactly one
    /// connected solid.
    pub fn execute(&self) -> Result<Solid> {
        self.validate()?;

        let (d, bf, tf, tw) = (
            self.depth,
            self.flange_width,
            self.flange_thickness,
            self.web_thickness,
        );

        let bottom_flange = MakeBox::new(self.length, bf, tf).execute()?;

        let web = MakeBox::new(self.length, tw, self.web_height()).execute()?;
        let web = Translate::new(Vector3::new(0.0, self.flange_outstand(), tf)).execute(web)?;

        let top_flange = MakeBox::new(self.length, bf, tf).execute()?;
        let top_flange = Translate::new(Vector3::new(0.0, 0.0, d - tf)).execute(top_flange)?;

        let lower = Union::new(bottom_flange, web).execute()?;
        let section = Union::new(lower, top_flange).execute()?;

        if section.lump_count() != 1 {
            return Err(GeometryError::BooleanFailure(format!(
                "I-section fused into {} lumps instead of one",
                section.lump_count()
            ))
            .into());
        }
        Ok(section)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::error::SteelspanError;
    use crate::operations::query::{BoundingBox, IsValid, Volume};

    fn section(d: f64, bf: f64, tf: f64, tw: f64) -> MakeISection {
        MakeISection::new(d, bf, tf, tw, 12000.0)
    }

    #[test]
    fn web_height_of_reference_girder() {
        let op = section(900.0, 300.0, 16.0, 10.0);
        assert_relative_eq!(op.web_height(), 868.0);
        assert!(op.validate().is_ok());
    }

    #[test]
    fn bounding_box_matches_section_envelope() {
        for (d, bf, tf, tw) in [
            (900.0, 300.0, 16.0, 10.0),
            (1000.0, 350.0, 20.0, 12.0),
            (1200.0, 400.0, 25.0, 15.0),
            (50.0, 20.0, 24.0, 19.0),
        ] {
            let solid = section(d, bf, tf, tw).execute().unwrap();
            let extent = BoundingBox::new(&solid).execute().unwrap().extent();
            assert_relative_eq!(extent.x, 12000.0, epsilon = 1e-9);
            assert_relative_eq!(extent.y, bf, epsilon = 1e-9);
            assert_relative_eq!(extent.z, d, epsilon = 1e-9);
        }
    }

    #[test]
    fn volume_is_two_flanges_plus_web() {
        let solid = section(900.0, 300.0, 16.0, 10.0).execute().unwrap();
        let volume = Volume::new(&solid).execute().unwrap();
        let expected = 12000.0 * (2.0 * 300.0 * 16.0 + 10.0 * 868.0);
        assert_relative_eq!(volume, expected, max_relative = 1e-9);
    }

    #[test]
    fn fused_section_is_one_valid_lump() {
        let solid = section(900.0, 300.0, 16.0, 10.0).execute().unwrap();
        assert_eq!(solid.lump_count(), 1);
        assert!(IsValid::new(&solid).execute());
        // 3 x 3 grid with the two cells beside the web left empty
        assert_eq!(solid.cells().occupied_count(), 7);
    }

    #[test]
    fn flanges_meeting_is_degenerate() {
        let result = section(32.0, 300.0, 16.0, 10.0).execute();
        assert!(matches!(
            result,
            Err(SteelspanError::Geometry(GeometryError::DegenerateSection(_)))
        ));
    }

    #[test]
    fn web_as_wide_as_flange_is_degenerate() {
        let result = section(900.0, 300.0, 16.0, 300.0).execute();
        assert!(matches!(
            result,
            Err(SteelspanError::Geometry(GeometryError::DegenerateSection(_)))
        ));
    }

    #[test]
    fn web_thinner_than_tolerance_is_degenerate() {
        let result = section(32.000_000_1, 300.0, 16.0, 10.0).execute();
        assert!(matches!(
            result,
            Err(SteelspanError::Geometry(GeometryError::DegenerateSection(_)))
        ));
    }

    #[test]
    fn outstand_thinner_than_tolerance_is_degenerate() {
        let web_thickness = 300.0 - 1e-7;
        let result = section(900.0, 300.0, 16.0, web_thickness).execute();
        assert!(matches!(
            result,
            Err(SteelspanError::Geometry(GeometryError::DegenerateSection(_)))
        ));
    }

    #[test]
    fn non_positive_dimension_is_degenerate() {
        let result = MakeISection::new(900.0, 300.0, 16.0, 10.0, 0.0).execute();
        let message = result.unwrap_err().to_string();
        assert!(message.contains("length"), "unexpected message: {message}");
    }
}
