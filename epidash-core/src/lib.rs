//! epidash-core
//!
//! Core types, traits, and utilities shared across the epidash ecosystem.
//!
//! - `types`: common data structures (series, windows, frames, configs).
//! - `source`: the `DataSource` trait implemented by fetch collaborators.
//! - `timeseries`: the pure engine — window clipping, alignment,
//!   downsampling, delta derivation, rolling means.
//!
//! Every engine operation is a synchronous pure computation over in-memory
//! data: inputs are received as read-only views and each transformation
//! produces a new series or frame. The only suspension points in the system
//! are the `DataSource` calls, which live behind `async_trait`.
#![warn(missing_docs)]

/// Unified error type for the workspace.
pub mod error;
/// The `DataSource` trait implemented by fetch collaborators.
pub mod source;
/// Time-series utilities: windows, alignment, downsampling, derivation.
pub mod timeseries;
pub mod types;

pub use error::EpidashError;
pub use source::DataSource;
pub use timeseries::align::align;
pub use timeseries::derive::{daily_deltas, derived_points, rolling_mean};
pub use timeseries::downsample::downsample;
pub use timeseries::window::{DEFAULT_LOOKBACK_DAYS, clip, default_window};
pub use types::*;
