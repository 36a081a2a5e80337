//! Error types for the extraction engine.
//!
//! Only configuration problems are surfaced as errors: a malformed
//! [`LayoutConfig`](crate::layout::LayoutConfig) is a programming error and
//! fails fast. Everything that can go wrong with page content (unplaceable
//! tokens, unparseable fields) is expressed as a value (`Option`, skipped
//! row, skipped page) so a run is never aborted by bad input.

/// Result type alias for engine operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while configuring or running the engine.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Column boundaries are not in increasing x order.
    #[error(
        "Non-monotonic column boundaries: {lower_name} ({lower}) must be left of {upper_name} ({upper})"
    )]
    NonMonotonicBoundaries {
        /// Name of the boundary expected to be further left
        lower_name: &'static str,
        /// Its configured x position
        lower: f32,
        /// Name of the boundary expected to be further right
        upper_name: &'static str,
        /// Its configured x position
        upper: f32,
    },

    /// Layout configuration is invalid for a reason other than boundary order.
    #[error("Invalid layout: {0}")]
    InvalidLayout(String),

    /// Header layout configuration is invalid.
    #[error("Invalid header layout: {0}")]
    InvalidHeaderLayout(String),

    /// Configuration could not be deserialized.
    #[error("Configuration parse error: {0}")]
    ConfigParse(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_monotonic_boundaries_message() {
        let err = Error::NonMonotonicBoundaries {
            lower_name: "code_channel_split",
            lower: 300.0,
            upper_name: "channel_amount_split",
            upper: 250.0,
        };
        let msg = format!("{}", err);
        assert!(msg.contains("code_channel_split"));
        assert!(msg.contains("channel_amount_split"));
        assert!(msg.contains("300"));
    }

    #[test]
    fn test_invalid_layout_message() {
        let err = Error::InvalidLayout("y_margin must be positive".to_string());
        assert!(format!("{}", err).contains("y_margin"));
    }

    #[test]
    fn test_error_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Error>();
    }
}
