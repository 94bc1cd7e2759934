//! Persistent storage for runtime configuration.

pub mod config;
