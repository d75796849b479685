pub mod auth;
pub mod config;
pub mod handlers;
pub mod router;
pub mod state;
pub mod wiring;

pub use config::{Environment, Settings};
pub use router::create_router;
pub use state::AppState;
pub use wiring::build_answer_service;
