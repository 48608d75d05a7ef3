pub mod picks;
pub mod system;
