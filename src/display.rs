//! Colour mapping and render-ready meshes for viewers.
//!
//! No renderer ships here; a viewer implements [`Visualizer`] and consumes
//! the meshes produced by [`ColorScheme::meshes`].

use crate::bridge::{ComponentCategory, Compound};
use crate::error::Result;
use crate::tessellation::{TessellateSolid, TriangleMesh};

/// Linear RGB colour, each channel in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Rgb {
    #[must_use]
    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0);

    /// Channels scaled to 8 bits, rounded and clamped.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn to_u8(self) -> [u8; 3] {
        [self.r, self.g, self.b].map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8)
    }
}

/// Colour per component category plus the scene background.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorScheme {
    pub girder: Rgb,
    pub deck: Rgb,
    pub parapet: Rgb,
    pub background: Rgb,
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self {
            girder: Rgb::new(0.7, 0.7, 0.75),
            deck: Rgb::new(0.8, 0.8, 0.8),
            parapet: Rgb::new(0.9, 0.9, 0.85),
            background: Rgb::WHITE,
        }
    }
}

/// A tessellated compound member with its display colour.
#[derive(Debug, Clone)]
pub struct ColoredMesh {
    pub label: String,
    pub category: ComponentCategory,
    pub color: Rgb,
    pub mesh: TriangleMesh,
}

impl ColorScheme {
    #[must_use]
    pub fn color_for(&self, category: ComponentCategory) -> Rgb {
        match category {
            ComponentCategory::Girder => self.girder,
            ComponentCategory::Deck => self.deck,
            ComponentCategory::Parapet => self.parapet,
        }
    }

    /// Tessellates every member of `compound` in member order.
    ///
    /// # Errors
    ///
    /// Returns an error if a member cannot be tessellated.
    pub fn meshes(&self, compound: &Compound) -> Result<Vec<ColoredMesh>> {
        compound
            .members()
            .iter()
            .map(|member| {
                Ok(ColoredMesh {
                    label: member.label.clone(),
                    category: member.category,
                    color: self.color_for(member.category),
                    mesh: TessellateSolid::new(&member.solid).execute()?,
                })
            })
            .collect()
    }
}

/// A viewer that can present a compound.
pub trait Visualizer {
    /// Presents `compound` using `scheme`.
    ///
    /// # Errors
    ///
    /// Returns an error if the compound cannot be prepared for display.
    fn show(&mut self, compound: &Compound, scheme: &ColorScheme) -> Result<()>;
}
