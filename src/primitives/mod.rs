//! Low-level primitives for the capture pipeline.
//!
//! This module contains the region geometry shared with the UI collaborator
//! and the per-tick pixel operations (crop, downsample).

pub mod frame_ops;
pub mod region;

pub use region::{Region, RegionTracker};
