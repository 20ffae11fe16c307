pub mod bridge;
pub mod display;
pub mod error;
pub mod export;
pub mod math;
pub mod operations;
pub mod tessellation;
pub mod topology;

pub use bridge::{BridgeAssembly, BridgeParams, Compound};
pub use error::{Result, SteelspanError};
