mod boundary;
mod bounding_box;
mod is_valid;
mod volume;

pub use boundary::ExtractBoundary;
pub use bounding_box::BoundingBox;
pub use is_valid::IsValid;
pub use volume::Volume;
