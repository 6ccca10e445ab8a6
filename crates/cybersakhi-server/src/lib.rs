//! CyberSakhi Server
//!
//! HTTP surface for the CyberSakhi safety evaluators: password strength,
//! harassment analysis, the Sakhi chat assistant and complaint preparation.

pub mod cli;
pub mod config;
pub mod routes;
pub mod state;

pub use cli::Cli;
pub use config::ServerConfig;
pub use routes::create_router;
pub use state::{AppState, SessionLease};
