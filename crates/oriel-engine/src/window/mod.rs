//! Window bootstrap.
//!
//! Owns the `winit` EventLoop and Window, and wires them to the display layer.

mod bootstrap;
mod config;

pub use bootstrap::Bootstrap;
pub use config::{WindowConfig, WindowStyle};
