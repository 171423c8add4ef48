pub mod config;
pub mod daemon;
pub mod logging;
pub mod paths;
pub mod send;
pub mod setup;

/// Component name substituted into every per-component path and log line.
pub const COMPONENT_NAME: &str = "zylos-component";
