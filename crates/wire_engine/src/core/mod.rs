//! # Core Engine Module
//!
//! Engine-wide configuration shared by the physics and navigation layers.

pub mod config;

pub use config::{EngineConfig, LoggingConfig, PhysicsSettings};
