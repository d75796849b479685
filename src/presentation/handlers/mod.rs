mod error_response;
mod health;
mod run;

pub use error_response::{ErrorResponse, error_response};
pub use health::health_handler;
pub use run::{RunRequest, RunResponse, run_handler};
