//! Geometric table reconstruction: configuration, row segmentation and
//! footer trimming.
//!
//! The layout of one document family is pure data ([`LayoutConfig`]); the
//! algorithms in [`rows`] and [`footer`] are generic over it. Every
//! per-family difference (column boundaries, tolerances, keywords) lives in
//! configuration, never in code.

pub mod config;
pub mod footer;
pub mod rows;

pub use config::{AmountStyle, DateShape, LayoutConfig};
pub use footer::trim_footer;
pub use rows::{anchor_tops, assign_rows, compute_intervals, RowInterval};
