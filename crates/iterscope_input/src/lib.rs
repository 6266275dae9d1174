//! Preview input handling
//!
//! This crate provides the seam between a host event loop and an
//! externally-owned iterative simulation: the [`IterativeSystem`] handle
//! trait and the [`PreviewController`] that forwards pointer drags and
//! per-frame ticks to it.

mod preview_controller;

pub use preview_controller::{IterativeSystem, PressedButtons, PreviewController};
