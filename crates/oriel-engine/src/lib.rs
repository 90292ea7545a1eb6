//! Oriel engine crate.
//!
//! This crate owns the platform window + display bootstrap pieces used by
//! higher layers.

pub mod display;
pub mod window;

pub mod logging;
