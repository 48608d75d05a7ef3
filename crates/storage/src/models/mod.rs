pub mod pick;
pub mod pick_field;

pub use pick::{NewPick, Pick, PickChange, PickFilter, PickPage};
pub use pick_field::PickField;
