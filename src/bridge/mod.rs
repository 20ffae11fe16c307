//! Bridge model: parameters, layout, components and their assembly.

mod assembly;
mod component;
mod compound;
mod layout;
mod params;
mod transformable;

pub use assembly::{AssemblyState, BridgeAssembly};
pub use component::{
    Component, ComponentCategory, ComponentKind, DeckParams, GirderParams, GirderSection,
    ParapetParams, Side,
};
pub use compound::{Compound, CompoundMember};
pub use layout::{ComputeLayout, LayoutResult, MIN_GIRDER_COUNT};
pub use params::{BridgeParams, MAX_SKEW_DEGREES};
pub use transformable::Transformable;
