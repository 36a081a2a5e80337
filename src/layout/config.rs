//! Layout configuration for one document family.
//!
//! All x boundaries, tolerances, margins and keywords the engine needs are
//! carried by [`LayoutConfig`], supplied externally (hand-written or
//! deserialized from JSON). The engine itself contains no per-family
//! constants. Validation happens once, up front: a malformed layout is a
//! programming error and fails fast rather than silently garbling columns.

use crate::classify::content;
use crate::error::{Error, Result};
use crate::geometry::Rect;
use crate::token::Token;
use serde::{Deserialize, Serialize};

/// Which date shape anchors the rows of this layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DateShape {
    /// Fixed-width numeric dates: `dd/mm/yy[yy]`, `dd-mm-yy[yy]`
    Numeric,
    /// Three-token word dates: `day monthAbbrev yy` (Thai or English)
    WordTriplet,
}

/// How monetary amounts encode debit vs. credit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AmountStyle {
    /// Separate debit and credit columns; a token's right edge against
    /// `debit_credit_split` decides the side.
    TwoColumn,
    /// One merged amount column with signed values; the sign decides.
    Signed,
}

/// Per-document-family layout description.
///
/// The four x boundaries must be monotonically increasing:
/// `code_channel_split < channel_amount_split < amount_balance_split`, with
/// `debit_credit_split` anywhere inside the amount zone. `x_tolerance` is
/// added symmetrically to boundary comparisons to absorb sub-point rendering
/// jitter.
///
/// # Examples
///
/// ```
/// use ledger_oxide::layout::LayoutConfig;
///
/// let config = LayoutConfig::new(20.0, 30.0, 80.0, 250.0, 460.0, 200.0);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Left edge of the date anchor column
    pub date_x0: f32,
    /// Right edge of the date anchor column
    pub date_x1: f32,
    /// Date shape that anchors rows
    pub date_shape: DateShape,
    /// Text boundary: code | channel
    pub code_channel_split: f32,
    /// Text boundary: channel | description; money boundary: amount | balance
    pub channel_amount_split: f32,
    /// Money boundary: balance candidates end here; money further right is
    /// stray and dropped
    pub amount_balance_split: f32,
    /// Fine split inside the amount zone, compared against a money token's
    /// right edge (`x1`): at or left means debit, right means credit
    pub debit_credit_split: f32,
    /// Symmetric tolerance for x comparisons
    pub x_tolerance: f32,
    /// Vertical margin used for row intervals and footer grouping
    pub y_margin: f32,
    /// Optional crop limiting transaction extraction to the table region
    pub table_crop: Option<Rect>,
    /// Keywords identifying summary/footer rows
    pub footer_keywords: Vec<String>,
    /// Debit/credit encoding
    pub amount_style: AmountStyle,
    /// Join code+channel tokens with `/` and re-split at the first `/`
    /// (layouts that print a merged `CODE/CHANNEL` string)
    pub merge_code_channel: bool,
    /// Split a fused date token into date prefix and text remainder
    pub split_date_remainder: bool,
    /// Normalize record dates to `YYYY-MM-DD` (Buddhist-Era aware); leave
    /// raw token text when disabled
    pub normalize_dates: bool,
}

impl LayoutConfig {
    /// Create a layout with the given date column and x boundaries.
    ///
    /// Tolerances default to 2.0pt horizontal and 3.0pt vertical; the date
    /// shape defaults to numeric, amounts to two-column. Use the `with_*`
    /// builders to adjust.
    pub fn new(
        date_x0: f32,
        date_x1: f32,
        code_channel_split: f32,
        channel_amount_split: f32,
        amount_balance_split: f32,
        debit_credit_split: f32,
    ) -> Self {
        Self {
            date_x0,
            date_x1,
            date_shape: DateShape::Numeric,
            code_channel_split,
            channel_amount_split,
            amount_balance_split,
            debit_credit_split,
            x_tolerance: 2.0,
            y_margin: 3.0,
            table_crop: None,
            footer_keywords: Vec::new(),
            amount_style: AmountStyle::TwoColumn,
            merge_code_channel: false,
            split_date_remainder: false,
            normalize_dates: false,
        }
    }

    /// Set horizontal tolerance and vertical margin.
    pub fn with_tolerances(mut self, x_tolerance: f32, y_margin: f32) -> Self {
        self.x_tolerance = x_tolerance;
        self.y_margin = y_margin;
        self
    }

    /// Set the date shape anchoring rows.
    pub fn with_date_shape(mut self, shape: DateShape) -> Self {
        self.date_shape = shape;
        self
    }

    /// Set the debit/credit encoding.
    pub fn with_amount_style(mut self, style: AmountStyle) -> Self {
        self.amount_style = style;
        self
    }

    /// Set footer keywords identifying summary rows.
    pub fn with_footer_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.footer_keywords = keywords.into_iter().map(Into::into).collect();
        self
    }

    /// Limit transaction extraction to a table crop region.
    pub fn with_table_crop(mut self, crop: Rect) -> Self {
        self.table_crop = Some(crop);
        self
    }

    /// Enable `/`-merge re-splitting of the code and channel columns.
    pub fn with_merge_code_channel(mut self, enable: bool) -> Self {
        self.merge_code_channel = enable;
        self
    }

    /// Enable splitting of fused date tokens.
    pub fn with_split_date_remainder(mut self, enable: bool) -> Self {
        self.split_date_remainder = enable;
        self
    }

    /// Enable calendar normalization of record dates.
    pub fn with_normalize_dates(mut self, enable: bool) -> Self {
        self.normalize_dates = enable;
        self
    }

    /// Validate the layout, failing fast on inconsistent geometry.
    pub fn validate(&self) -> Result<()> {
        if self.date_x0 > self.date_x1 {
            return Err(Error::InvalidLayout(format!(
                "date column range is inverted: [{}, {}]",
                self.date_x0, self.date_x1
            )));
        }

        let ordered = [
            ("code_channel_split", self.code_channel_split),
            ("channel_amount_split", self.channel_amount_split),
            ("amount_balance_split", self.amount_balance_split),
        ];
        for pair in ordered.windows(2) {
            let (lower_name, lower) = pair[0];
            let (upper_name, upper) = pair[1];
            if lower >= upper {
                return Err(Error::NonMonotonicBoundaries {
                    lower_name,
                    lower,
                    upper_name,
                    upper,
                });
            }
        }

        if !self.debit_credit_split.is_finite() || self.debit_credit_split <= 0.0 {
            return Err(Error::InvalidLayout(format!(
                "debit_credit_split must be positive and finite, got {}",
                self.debit_credit_split
            )));
        }
        if self.x_tolerance < 0.0 {
            return Err(Error::InvalidLayout(format!(
                "x_tolerance must be non-negative, got {}",
                self.x_tolerance
            )));
        }
        if self.y_margin <= 0.0 {
            return Err(Error::InvalidLayout(format!(
                "y_margin must be positive, got {}",
                self.y_margin
            )));
        }
        Ok(())
    }

    /// Load and validate a layout from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check whether a token anchors a row: date-shaped per this layout and
    /// starting inside the date column.
    pub fn is_date_anchor(&self, token: &Token) -> bool {
        let shape_matches = match self.date_shape {
            DateShape::Numeric => {
                if self.split_date_remainder {
                    content::split_date_prefix(&token.text).is_some()
                } else {
                    content::is_numeric_date(&token.text)
                }
            }
            DateShape::WordTriplet => content::is_word_date(&token.text),
        };
        shape_matches && self.date_x0 <= token.x0 && token.x0 <= self.date_x1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> LayoutConfig {
        LayoutConfig::new(20.0, 30.0, 80.0, 250.0, 460.0, 200.0)
    }

    #[test]
    fn test_valid_layout_passes() {
        assert!(base().validate().is_ok());
    }

    #[test]
    fn test_non_monotonic_boundaries_rejected() {
        let mut config = base();
        config.channel_amount_split = 70.0;
        let err = config.validate().unwrap_err();
        assert!(matches!(err, Error::NonMonotonicBoundaries { .. }));
    }

    #[test]
    fn test_inverted_date_range_rejected() {
        let mut config = base();
        config.date_x0 = 50.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_negative_tolerance_rejected() {
        let config = base().with_tolerances(-1.0, 3.0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_y_margin_rejected() {
        let config = base().with_tolerances(2.0, 0.0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_json_round_trip() {
        let json = serde_json::to_string(&base()).unwrap();
        let config = LayoutConfig::from_json(&json).unwrap();
        assert_eq!(config.channel_amount_split, 250.0);
    }

    #[test]
    fn test_from_json_rejects_bad_geometry() {
        let mut config = base();
        config.amount_balance_split = 10.0;
        let json = serde_json::to_string(&config).unwrap();
        assert!(LayoutConfig::from_json(&json).is_err());
    }

    #[test]
    fn test_date_anchor_requires_shape_and_position() {
        let config = base();
        let inside = Token::new("10/01/24", 25.0, 60.0, 100.0);
        let outside = Token::new("10/01/24", 150.0, 185.0, 100.0);
        let not_a_date = Token::new("hello", 25.0, 60.0, 100.0);
        assert!(config.is_date_anchor(&inside));
        assert!(!config.is_date_anchor(&outside));
        assert!(!config.is_date_anchor(&not_a_date));
    }

    #[test]
    fn test_date_anchor_word_triplet() {
        let config = base().with_date_shape(DateShape::WordTriplet);
        let thai = Token::new("1 ม.ค. 68", 22.0, 70.0, 50.0);
        let numeric = Token::new("10/01/24", 22.0, 60.0, 50.0);
        assert!(config.is_date_anchor(&thai));
        assert!(!config.is_date_anchor(&numeric));
    }

    #[test]
    fn test_date_anchor_fused_token() {
        let config = base().with_split_date_remainder(true);
        let fused = Token::new("01/01/2567TRANSFER", 25.0, 120.0, 80.0);
        assert!(config.is_date_anchor(&fused));
    }
}
