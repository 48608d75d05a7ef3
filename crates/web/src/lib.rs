pub mod app;
pub mod config;
pub mod error;
pub mod features;
pub mod openapi;
pub mod state;

pub use app::router;
pub use state::AppState;
