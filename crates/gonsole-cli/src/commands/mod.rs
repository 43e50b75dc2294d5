//! CLI commands

pub mod config;
pub mod exec;
pub mod interactive;
