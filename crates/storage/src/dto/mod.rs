pub mod common;
pub mod pick;
