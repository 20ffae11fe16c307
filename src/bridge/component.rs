use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ProtocolError, Result};
use crate::math::{Point3, Vector3};
use crate::operations::creation::{MakeBox, MakeISection};
use crate::operations::transform::Translate;
use crate::topology::Solid;

use super::transformable::Transformable;

/// Category tag of a bridge component, used for grouping and colouring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentCategory {
    Girder,
    Deck,
    Parapet,
}

impl ComponentCategory {
    /// All categories in assembly order.
    pub const ALL: [Self; 3] = [Self::Girder, Self::Deck, Self::Parapet];
}

impl fmt::Display for ComponentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Girder => "girder",
            Self::Deck => "deck",
            Self::Parapet => "parapet",
        })
    }
}

/// Cross-section of a welded I-girder.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GirderSection {
    /// Overall depth `d`.
    pub depth: f64,
    /// Flange width `bf`.
    pub flange_width: f64,
    /// Flange thickness `tf`.
    pub flange_thickness: f64,
    /// Web thickness `tw`.
    pub web_thickness: f64,
}

impl GirderSection {
    /// Clear web height between the flanges.
    #[must_use]
    pub fn web_height(&self) -> f64 {
        self.depth - 2.0 * self.flange_thickness
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GirderParams {
    pub section: GirderSection,
    pub length: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeckParams {
    pub width: f64,
    pub thickness: f64,
    pub length: f64,
}

/// Which deck edge a parapet stands on. Left is `+Y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// `+1.0` for left, `-1.0` for right.
    #[must_use]
    pub fn sign(self) -> f64 {
        match self {
            Self::Left => 1.0,
            Self::Right => -1.0,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Left => "left",
            Self::Right => "right",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParapetParams {
    pub width: f64,
    pub height: f64,
    pub length: f64,
    pub side: Side,
}

/// The closed set of component variants with their typed parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ComponentKind {
    /// Girder number `index`, counted from 0 at the most negative `Y`.
    Girder { index: usize, params: GirderParams },
    Deck(DeckParams),
    Parapet(ParapetParams),
}

impl ComponentKind {
    #[must_use]
    pub fn category(&self) -> ComponentCategory {
        match self {
            Self::Girder { .. } => ComponentCategory::Girder,
            Self::Deck(_) => ComponentCategory::Deck,
            Self::Parapet(_) => ComponentCategory::Parapet,
        }
    }

    /// Overall extent across the span, used to centre the solid on `Y = 0`.
    fn width(&self) -> f64 {
        match self {
            Self::Girder { params, .. } => params.section.flange_width,
            Self::Deck(params) => params.width,
            Self::Parapet(params) => params.width,
        }
    }
}

/// A bridge component: its parameters plus the solid built from them.
///
/// The solid only exists after [`Component::create_geometry`]; every motion
/// before that fails with [`ProtocolError::UninitializedComponent`].
#[derive(Debug, Clone)]
pub struct Component {
    kind: ComponentKind,
    solid: Option<Solid>,
}

impl Component {
    #[must_use]
    pub fn new(kind: ComponentKind) -> Self {
        Self { kind, solid: None }
    }

    #[must_use]
    pub fn girder(index: usize, section: GirderSection, length: f64) -> Self {
        Self::new(ComponentKind::Girder {
            index,
            params: GirderParams { section, length },
        })
    }

    #[must_use]
    pub fn deck(width: f64, thickness: f64, length: f64) -> Self {
        Self::new(ComponentKind::Deck(DeckParams {
            width,
            thickness,
            length,
        }))
    }

    #[must_use]
    pub fn parapet(side: Side, width: f64, height: f64, length: f64) -> Self {
        Self::new(ComponentKind::Parapet(ParapetParams {
            width,
            height,
            length,
            side,
        }))
    }

    #[must_use]
    pub fn kind(&self) -> &ComponentKind {
        &self.kind
    }

    #[must_use]
    pub fn category(&self) -> ComponentCategory {
        self.kind.category()
    }

    /// Human-readable label, e.g. `girder 2` or `parapet (left)`.
    ///
    /// Girders are numbered from 1.
    #[must_use]
    pub fn label(&self) -> String {
        match &self.kind {
            ComponentKind::Girder { index, .. } => format!("girder {}", index + 1),
            ComponentKind::Deck(_) => "deck".to_owned(),
            ComponentKind::Parapet(params) => format!("parapet ({})", params.side),
        }
    }

    /// Returns `true` once geometry has been created and not yet handed over.
    #[must_use]
    pub fn has_geometry(&self) -> bool {
        self.solid.is_some()
    }

    /// Builds the solid from the component parameters and stores it,
    /// replacing any earlier one.
    ///
    /// The solid runs along `+X` from `X = 0`, stands on `Z = 0`, and is
    /// centred on `Y = 0`.
    ///
    /// # Errors
    ///
    /// Returns the kernel error if the parameters do not describe a valid
    /// solid.
    pub fn create_geometry(&mut self) -> Result<()> {
        let solid = match &self.kind {
            ComponentKind::Girder { params, .. } => {
                let s = params.section;
                MakeISection::new(
                    s.depth,
                    s.flange_width,
                    s.flange_thickness,
                    s.web_thickness,
                    params.length,
                )
                .execute()?
            }
            ComponentKind::Deck(p) => MakeBox::new(p.length, p.width, p.thickness).execute()?,
            ComponentKind::Parapet(p) => MakeBox::new(p.length, p.width, p.height).execute()?,
        };
        let solid =
            Translate::new(Vector3::new(0.0, -self.kind.width() / 2.0, 0.0)).execute(solid)?;

        tracing::debug!(component = %self.label(), "created component geometry");
        self.solid = Some(solid);
        Ok(())
    }

    /// The component solid.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::UninitializedComponent`] before
    /// [`Component::create_geometry`] has run.
    pub fn solid(&self) -> Result<&Solid> {
        self.current_solid()
    }

    /// World position of a point rigidly attached to the component.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::UninitializedComponent`] before
    /// [`Component::create_geometry`] has run.
    pub fn reference_point(&self) -> Result<Point3> {
        Ok(self.current_solid()?.origin())
    }

    /// Hands the solid over, leaving the component without geometry.
    pub(crate) fn take_solid(&mut self) -> Result<Solid> {
        self.solid.take().ok_or_else(|| {
            ProtocolError::UninitializedComponent {
                component: self.label(),
            }
            .into()
        })
    }
}

impl Transformable for Component {
    fn name(&self) -> String {
        self.label()
    }

    fn solid_slot(&self) -> Option<&Solid> {
        self.solid.as_ref()
    }

    fn solid_slot_mut(&mut self) -> &mut Option<Solid> {
        &mut self.solid
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::error::{GeometryError, SteelspanError};
    use crate::operations::query::{BoundingBox, Volume};

    fn section() -> GirderSection {
        GirderSection {
            depth: 900.0,
            flange_width: 300.0,
            flange_thickness: 16.0,
            web_thickness: 10.0,
        }
    }

    #[test]
    fn web_height_of_default_section() {
        assert_relative_eq!(section().web_height(), 868.0);
    }

    #[test]
    fn labels() {
        assert_eq!(Component::girder(1, section(), 1000.0).label(), "girder 2");
        assert_eq!(Component::deck(7000.0, 200.0, 1000.0).label(), "deck");
        assert_eq!(
            Component::parapet(Side::Left, 300.0, 1000.0, 1000.0).label(),
            "parapet (left)"
        );
    }

    #[test]
    fn transform_before_geometry_fails() {
        let mut girder = Component::girder(0, section(), 12000.0);
        let result = girder.translate(0.0, 100.0, 0.0);
        match result {
            Err(SteelspanError::Protocol(ProtocolError::UninitializedComponent { component })) => {
                assert_eq!(component, "girder 1");
            }
            other => panic!("unexpected result: {other:?}"),
        }
        assert!(girder
            .rotate(Point3::origin(), Vector3::z(), 5.0)
            .is_err());
        assert!(girder.solid().is_err());
    }

    #[test]
    fn geometry_is_centred_in_y() {
        let mut girder = Component::girder(0, section(), 12000.0);
        girder.create_geometry().unwrap();
        let aabb = BoundingBox::new(girder.solid().unwrap()).execute().unwrap();
        assert_relative_eq!(aabb.min, Point3::new(0.0, -150.0, 0.0), epsilon = 1e-9);
        assert_relative_eq!(aabb.max, Point3::new(12000.0, 150.0, 900.0), epsilon = 1e-9);
    }

    #[test]
    fn girder_volume_matches_section() {
        let mut girder = Component::girder(0, section(), 12000.0);
        girder.create_geometry().unwrap();
        let volume = Volume::new(girder.solid().unwrap()).execute().unwrap();
        let expected = 12000.0 * (2.0 * 300.0 * 16.0 + 10.0 * 868.0);
        assert_relative_eq!(volume, expected, max_relative = 1e-9);
    }

    #[test]
    fn translate_and_back_is_congruent() {
        let mut deck = Component::deck(7000.0, 200.0, 12000.0);
        deck.create_geometry().unwrap();
        let before = BoundingBox::new(deck.solid().unwrap()).execute().unwrap();
        let volume = Volume::new(deck.solid().unwrap()).execute().unwrap();

        deck.translate(120.0, -35.5, 900.0).unwrap();
        deck.translate(-120.0, 35.5, -900.0).unwrap();

        let after = BoundingBox::new(deck.solid().unwrap()).execute().unwrap();
        assert_relative_eq!(before.min, after.min, epsilon = 1e-9);
        assert_relative_eq!(before.max, after.max, epsilon = 1e-9);
        assert_relative_eq!(
            Volume::new(deck.solid().unwrap()).execute().unwrap(),
            volume,
            max_relative = 1e-9
        );
    }

    #[test]
    fn zero_rotation_keeps_shape() {
        let mut parapet = Component::parapet(Side::Right, 300.0, 1000.0, 12000.0);
        parapet.create_geometry().unwrap();
        let before = BoundingBox::new(parapet.solid().unwrap()).execute().unwrap();
        let volume_before = Volume::new(parapet.solid().unwrap()).execute().unwrap();
        parapet
            .rotate(Point3::new(6000.0, 0.0, 0.0), Vector3::z(), 0.0)
            .unwrap();
        let after = BoundingBox::new(parapet.solid().unwrap()).execute().unwrap();
        let volume_after = Volume::new(parapet.solid().unwrap()).execute().unwrap();
        assert_relative_eq!(before.min, after.min, epsilon = 1e-9);
        assert_relative_eq!(before.max, after.max, epsilon = 1e-9);
        assert_relative_eq!(volume_before, volume_after, max_relative = 1e-9);
        assert_relative_eq!(volume_after, 300.0 * 1000.0 * 12000.0, max_relative = 1e-9);
    }

    #[test]
    fn zero_axis_rotation_fails_and_keeps_solid() {
        let mut deck = Component::deck(7000.0, 200.0, 12000.0);
        deck.create_geometry().unwrap();
        let result = deck.rotate(Point3::origin(), Vector3::zeros(), 10.0);
        assert!(matches!(
            result,
            Err(SteelspanError::Geometry(GeometryError::InvalidDimension { .. }))
        ));
        assert!(deck.has_geometry());
    }

    #[test]
    fn non_finite_translation_fails() {
        let mut deck = Component::deck(7000.0, 200.0, 12000.0);
        deck.create_geometry().unwrap();
        assert!(deck.translate(f64::INFINITY, 0.0, 0.0).is_err());
        assert!(deck.has_geometry());
    }

    #[test]
    fn degenerate_section_fails_creation() {
        let bad = GirderSection {
            flange_thickness: 450.0,
            ..section()
        };
        let mut girder = Component::girder(0, bad, 12000.0);
        assert!(matches!(
            girder.create_geometry(),
            Err(SteelspanError::Geometry(GeometryError::DegenerateSection(_)))
        ));
        assert!(!girder.has_geometry());
    }

    #[test]
    fn take_solid_empties_the_component() {
        let mut deck = Component::deck(7000.0, 200.0, 12000.0);
        deck.create_geometry().unwrap();
        deck.take_solid().unwrap();
        assert!(!deck.has_geometry());
        assert!(deck.take_solid().is_err());
    }
}
