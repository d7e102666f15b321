//! Command handlers for the `glance` binary.

pub mod ask;
pub mod config;
pub mod interactive;
pub mod types;
