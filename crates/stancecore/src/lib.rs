//! Core stance model for the wheel stance panel
//!
//! This crate provides:
//! - The live stance parameters (offset, track width, camber, ride height)
//! - A JSON-backed preset repository
//! - The applier that pushes stance values into the host's wheel visuals
//! - Host capability traits and the tool configuration

pub mod applier;
pub mod config;
pub mod context;
pub mod error;
pub mod host;
pub mod preset;
pub mod stance;

pub use applier::*;
pub use config::*;
pub use context::*;
pub use error::*;
pub use host::*;
pub use preset::*;
pub use stance::*;
