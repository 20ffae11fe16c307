mod make_box;
mod make_i_section;

pub use make_box::MakeBox;
pub use make_i_section::MakeISection;
