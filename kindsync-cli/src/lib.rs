//! Configuration and subcommand implementations for the `kindsync` binary.

pub mod commands;
mod config;

pub use config::{ConfigError, EngineConfig};
