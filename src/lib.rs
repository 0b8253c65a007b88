pub mod auth;
pub mod cli;
pub mod config;
pub mod email;
pub mod error;
pub mod observability;
pub mod rate_limit;
pub mod routes;
pub mod upload;

pub use config::Config;
pub use routes::{AppState, router};
