//! Time-series utilities shared by the engine and orchestrator.
//!
//! Modules include:
//! - `window`: clip a series to an analysis range and resolve default ranges
//! - `align`: place multiple entity series on one shared, sorted date axis
//! - `downsample`: bound a series' point count for rendering
//! - `derive`: daily deltas from cumulative totals and rolling means
/// Analysis-window clipping and default-range resolution.
pub mod window;
/// Alignment of sparse per-entity series onto a shared date axis.
pub mod align;
/// Stride-based point-count reduction that preserves the final point.
pub mod downsample;
/// Daily-delta derivation and shrinking-window rolling means.
pub mod derive;
