//! Token classification: content shape and column assignment.
//!
//! [`content`] recognizes what a token's text looks like (date, time, money,
//! page id); [`column`] decides which semantic column a token belongs to,
//! combining its shape with its x position against a
//! [`LayoutConfig`](crate::layout::LayoutConfig).

pub mod column;
pub mod content;

pub use column::{classify_row, classify_token, Column, RowBuckets};
