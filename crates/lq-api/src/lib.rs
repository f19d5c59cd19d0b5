pub mod auth;
pub mod config;
pub mod error;
pub mod metrics;
pub mod rewards;
pub mod router;
pub mod state;
pub mod stats;
pub mod tracing;
pub mod validation;

pub use config::ApiConfig;
pub use state::{ApiState, AuthConfig};
