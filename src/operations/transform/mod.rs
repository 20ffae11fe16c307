mod general;
mod rotate;
mod translate;

pub use general::RigidMotion;
pub use rotate::Rotate;
pub use translate::Translate;
