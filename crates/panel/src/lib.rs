//! On-screen stance panel
//!
//! This crate provides:
//! - Toggle-chord detection over a host keyboard
//! - The panel controller: visibility state machine and action handling
//! - The egui rendering of the panel

pub mod controller;
pub mod input;
pub mod view;

pub use controller::*;
pub use input::*;
pub use view::{PRESET_NAME_ID, draw_panel};
