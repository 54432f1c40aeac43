//! Use cases - User story orchestration.
//!
//! Use cases coordinate the rule engine with the ports that supply its inputs.

pub mod recap;

pub use recap::Recap;
