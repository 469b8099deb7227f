//! # Domain Models
//!
//! This crate contains pure domain types with minimal dependencies (`serde`, `bitflags`).
//! Keep it lean: no I/O, no logging, no registry logic. Just names, identities and config.

pub mod config;
pub mod constants;
pub mod entity;
pub mod flags;
pub mod names;

pub use entity::{Entity, EntityRef, EntityType};
pub use flags::LegacyFeatures;
pub use names::{FeatureName, RegistryKey};
