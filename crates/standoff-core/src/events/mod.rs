//! Encounter Records
//!
//! Append-only logging of resolved actions.

pub mod logger;

pub use logger::*;
