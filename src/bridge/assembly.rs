use std::fmt;

use crate::error::{ProtocolError, Result};
use crate::math::Vector3;

use super::component::{Component, ComponentKind, Side};
use super::compound::Compound;
use super::layout::{ComputeLayout, LayoutResult};
use super::params::{check_skew, BridgeParams};
use super::transformable::Transformable;

/// Progress of a [`BridgeAssembly`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssemblyState {
    Uninitialized,
    LayoutComputed,
    ComponentsCreated,
    Positioned,
    Assembled,
    /// A step failed; the assembly accepts no further steps.
    Failed,
}

impl fmt::Display for AssemblyState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Uninitialized => "Uninitialized",
            Self::LayoutComputed => "LayoutComputed",
            Self::ComponentsCreated => "ComponentsCreated",
            Self::Positioned => "Positioned",
            Self::Assembled => "Assembled",
            Self::Failed => "Failed",
        })
    }
}

/// Orchestrates layout, component creation, positioning and assembly of
/// one bridge.
///
/// Steps must run in order. Calling a step out of order is rejected with
/// [`ProtocolError::InvalidAssemblyState`] and leaves the assembly as it
/// was; an error inside a step moves it to [`AssemblyState::Failed`].
#[derive(Debug)]
pub struct BridgeAssembly {
    params: BridgeParams,
    state: AssemblyState,
    layout: Option<LayoutResult>,
    components: Vec<Component>,
    compound: Option<Compound>,
}

impl BridgeAssembly {
    #[must_use]
    pub fn new(params: BridgeParams) -> Self {
        Self {
            params,
            state: AssemblyState::Uninitialized,
            layout: None,
            components: Vec::new(),
            compound: None,
        }
    }

    #[must_use]
    pub fn state(&self) -> AssemblyState {
        self.state
    }

    #[must_use]
    pub fn params(&self) -> &BridgeParams {
        &self.params
    }

    /// The layout, once computed.
    #[must_use]
    pub fn layout(&self) -> Option<&LayoutResult> {
        self.layout.as_ref()
    }

    /// Components in creation order: girders by index, deck, left parapet,
    /// right parapet. Empty before `create_components`; without geometry
    /// after `assemble`.
    #[must_use]
    pub fn components(&self) -> &[Component] {
        &self.components
    }

    /// The assembled compound. `None` unless the assembly completed.
    #[must_use]
    pub fn compound(&self) -> Option<&Compound> {
        match self.state {
            AssemblyState::Assembled => self.compound.as_ref(),
            _ => None,
        }
    }

    /// Consumes the assembly and returns its compound, if it completed.
    #[must_use]
    pub fn into_compound(self) -> Option<Compound> {
        match self.state {
            AssemblyState::Assembled => self.compound,
            _ => None,
        }
    }

    /// Runs all four steps in order.
    ///
    /// # Errors
    ///
    /// Returns the first error raised by a step.
    pub fn build(&mut self) -> Result<&Compound> {
        self.compute_layout()?;
        self.create_components()?;
        self.position_components()?;
        self.assemble()
    }

    /// Derives deck width, girder positions and levels.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::InvalidAssemblyState`] unless the assembly is
    /// uninitialised, or the layout error for invalid parameters.
    pub fn compute_layout(&mut self) -> Result<&LayoutResult> {
        const STEP: &str = "compute_layout";
        self.require(STEP, AssemblyState::Uninitialized)?;
        let layout = self.run(STEP, |a| ComputeLayout::from_params(&a.params).execute())?;
        tracing::debug!(
            deck_width = layout.deck_width(),
            girders = layout.girder_positions().len(),
            "computed layout"
        );
        self.advance(AssemblyState::LayoutComputed);
        Ok(self.layout.insert(layout))
    }

    /// Instantiates every component and builds its solid.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::InvalidAssemblyState`] unless the layout has
    /// been computed, or the kernel error for a component that cannot be
    /// built.
    pub fn create_components(&mut self) -> Result<()> {
        const STEP: &str = "create_components";
        self.require(STEP, AssemblyState::LayoutComputed)?;
        let components = self.run(STEP, |a| {
            let layout = a.computed_layout(STEP)?;
            let p = &a.params;
            let section = p.girder_section();

            let mut components: Vec<Component> = (0..p.girder_count)
                .map(|index| Component::girder(index, section, p.span_length))
                .collect();
            components.push(Component::deck(
                layout.deck_width(),
                p.deck_thickness,
                p.span_length,
            ));
            for side in [Side::Left, Side::Right] {
                components.push(Component::parapet(
                    side,
                    p.parapet_width,
                    p.parapet_height,
                    p.span_length,
                ));
            }

            for component in &mut components {
                component.create_geometry()?;
            }
            Ok(components)
        })?;
        self.components = components;
        self.advance(AssemblyState::ComponentsCreated);
        Ok(())
    }

    /// Moves every component to its place and applies the skew.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::InvalidAssemblyState`] unless components have
    /// been created, [`crate::error::LayoutError::InvalidSkewAngle`] for a
    /// skew outside `[0, 15]` degrees, or a transform error.
    pub fn position_components(&mut self) -> Result<()> {
        const STEP: &str = "position_components";
        self.require(STEP, AssemblyState::ComponentsCreated)?;
        self.run(STEP, |a| {
            let skew = a.params.skew_angle_degrees;
            check_skew(skew)?;
            let layout = a.computed_layout(STEP)?;
            let deck_z = layout.deck_z_level();
            let parapet_z = deck_z + a.params.deck_thickness;

            for component in &mut a.components {
                match *component.kind() {
                    ComponentKind::Girder { index, .. } => {
                        // one girder per layout position, see create_components
                        component.translate(0.0, layout.girder_positions()[index], 0.0)?;
                    }
                    ComponentKind::Deck(_) => component.translate(0.0, 0.0, deck_z)?,
                    ComponentKind::Parapet(p) => {
                        component.translate(
                            0.0,
                            p.side.sign() * layout.parapet_offset(),
                            parapet_z,
                        )?;
                    }
                }
            }

            // Skew goes last so it turns the assembled cross-section as one.
            if skew > 0.0 {
                for component in &mut a.components {
                    component.rotate(layout.skew_pivot(), Vector3::z(), skew)?;
                }
            }
            Ok(())
        })?;
        self.advance(AssemblyState::Positioned);
        Ok(())
    }

    /// Groups the positioned solids into a compound.
    ///
    /// The solids move out of the components into the compound, so this
    /// step runs once.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::InvalidAssemblyState`] unless the components
    /// have been positioned.
    pub fn assemble(&mut self) -> Result<&Compound> {
        const STEP: &str = "assemble";
        self.require(STEP, AssemblyState::Positioned)?;
        let compound = self.run(STEP, |a| {
            let mut compound = Compound::new();
            for component in &mut a.components {
                let label = component.label();
                let category = component.category();
                compound.push(label, category, component.take_solid()?);
            }
            Ok(compound)
        })?;
        tracing::info!(
            members = compound.len(),
            skew = self.params.skew_angle_degrees,
            "bridge assembled"
        );
        self.advance(AssemblyState::Assembled);
        Ok(self.compound.insert(compound))
    }

    fn require(&self, step: &'static str, expected: AssemblyState) -> Result<()> {
        if self.state == expected {
            Ok(())
        } else {
            Err(ProtocolError::InvalidAssemblyState {
                step,
                expected: expected.to_string(),
                actual: self.state.to_string(),
            }
            .into())
        }
    }

    fn computed_layout(&self, step: &'static str) -> Result<LayoutResult> {
        self.layout.clone().ok_or_else(|| {
            ProtocolError::InvalidAssemblyState {
                step,
                expected: AssemblyState::LayoutComputed.to_string(),
                actual: self.state.to_string(),
            }
            .into()
        })
    }

    fn run<T>(
        &mut self,
        step: &'static str,
        body: impl FnOnce(&mut Self) -> Result<T>,
    ) -> Result<T> {
        body(self).inspect_err(|error| {
            tracing::warn!(step, state = %self.state, %error, "assembly step failed");
            self.state = AssemblyState::Failed;
        })
    }

    fn advance(&mut self, next: AssemblyState) {
        tracing::debug!(from = %self.state, to = %next, "assembly state transition");
        self.state = next;
    }
}
