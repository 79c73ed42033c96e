//! Situation Components
//!
//! State types for the encounter: metrics, hostages, resources, and the site.

pub mod hostage;
pub mod situation;
pub mod world;

pub use hostage::*;
pub use situation::*;
pub use world::*;
