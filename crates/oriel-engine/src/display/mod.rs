//! Display settings + graphics context management.
//!
//! This module is responsible for:
//! - describing requested depth/stencil/antialiasing settings
//! - resolving those requests against what the adapter actually supports
//! - creating the wgpu Instance/Adapter/Device/Queue
//! - creating & configuring the Surface and its attachments

mod context;
mod settings;

pub use context::DisplayContext;
pub use settings::{DisplaySettings, GrantedSettings};
