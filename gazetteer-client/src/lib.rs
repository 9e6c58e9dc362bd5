//! Gazetteer client library exports.

pub mod api_client;
pub mod config;
pub mod gateway;
pub mod wire;

pub use api_client::{ApiClientError, PropertyClient};
pub use config::{AuthConfig, ClientConfig, ConfigError};
pub use gateway::RecordGateway;
