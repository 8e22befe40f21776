//! Upstox v2 broker adapter.

mod adapter;
mod api_types;
mod config;
mod error;
mod http_client;

pub use adapter::UpstoxBrokerAdapter;
pub use config::{DEFAULT_BASE_URL, UpstoxConfig};
pub use error::UpstoxError;
