//! Infrastructure implementations.
//!
//! Contains port trait implementations for the file system and the runner's
//! environment configuration.

pub mod config;
pub mod files;
pub mod ports;
