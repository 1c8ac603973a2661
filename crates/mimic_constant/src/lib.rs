//! Shared constants for mimic.

pub mod app;
pub mod defaults;
pub mod markers;
