pub mod config;
pub mod engine;
pub mod error;
pub mod http;
pub mod telemetry;
