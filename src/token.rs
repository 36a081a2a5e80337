//! Positioned text tokens and the page input boundary.
//!
//! A [`Token`] is the single intermediate representation the whole engine
//! works on: one piece of text with a bounding box, as recovered from a
//! document page by an external word extractor. Input order is arbitrary;
//! nothing downstream may assume reading order.

use crate::geometry::Rect;
use serde::{Deserialize, Serialize};

/// A positioned text token on one page.
///
/// Immutable unit of work. `top` is the y coordinate of the token's top edge
/// (y grows downward), `x0`/`x1` are the left and right edges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    /// The token's text content
    pub text: String,
    /// Left edge x coordinate
    pub x0: f32,
    /// Right edge x coordinate
    pub x1: f32,
    /// Top edge y coordinate
    pub top: f32,
}

impl Token {
    /// Create a new token.
    ///
    /// # Examples
    ///
    /// ```
    /// use ledger_oxide::token::Token;
    ///
    /// let t = Token::new("100.00", 150.0, 185.0, 101.0);
    /// assert_eq!(t.text, "100.00");
    /// assert_eq!(t.x1, 185.0);
    /// ```
    pub fn new(text: impl Into<String>, x0: f32, x1: f32, top: f32) -> Self {
        Self {
            text: text.into(),
            x0,
            x1,
            top,
        }
    }
}

/// The input boundary: a page abstraction supplying positioned tokens.
///
/// Implemented by whatever renders or parses the document (a PDF word
/// extractor, an OCR layer, a test fixture). The engine only consumes these.
pub trait TokenSource {
    /// All tokens on the page, in arbitrary order.
    fn tokens(&self) -> Vec<Token>;

    /// Height of the page (or cropped region) in the same units as `top`.
    fn height(&self) -> f32;

    /// Tokens whose top-left corner falls inside `region`.
    ///
    /// The default filters [`tokens`](TokenSource::tokens); implementations
    /// backed by a real extractor may re-extract on the narrower crop
    /// instead.
    fn tokens_in_region(&self, region: &Rect) -> Vec<Token> {
        self.tokens()
            .into_iter()
            .filter(|t| region.contains(t.x0, t.top))
            .collect()
    }

    /// Plain text of the page, reconstructed in reading order.
    ///
    /// Tokens are sorted by `(top, x0)`, grouped into lines by vertical
    /// proximity, and joined with spaces within a line. Used for keyword
    /// scanning (footer markers, totals lines), not for output.
    fn full_text(&self) -> String {
        let mut tokens = self.tokens();
        tokens.sort_by(|a, b| a.top.total_cmp(&b.top));

        let mut lines: Vec<Vec<Token>> = Vec::new();
        let mut current_top: Option<f32> = None;
        for token in tokens {
            let same_line =
                current_top.is_some_and(|y| (token.top - y).abs() <= LINE_GROUP_TOLERANCE);
            if same_line {
                lines.last_mut().unwrap().push(token);
            } else {
                current_top = Some(token.top);
                lines.push(vec![token]);
            }
        }

        lines
            .iter_mut()
            .map(|line| {
                line.sort_by(|a, b| a.x0.total_cmp(&b.x0));
                line.iter()
                    .map(|t| t.text.as_str())
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Vertical tolerance for grouping tokens into a text line.
const LINE_GROUP_TOLERANCE: f32 = 2.0;

/// An in-memory [`TokenSource`] for callers that already materialized a
/// page's tokens (and for tests).
#[derive(Debug, Clone, Default)]
pub struct PageTokens {
    tokens: Vec<Token>,
    height: f32,
}

impl PageTokens {
    /// Create a page from a token list and the page height.
    ///
    /// # Examples
    ///
    /// ```
    /// use ledger_oxide::token::{PageTokens, Token, TokenSource};
    ///
    /// let page = PageTokens::new(vec![Token::new("10/01/24", 25.0, 60.0, 100.0)], 842.0);
    /// assert_eq!(page.tokens().len(), 1);
    /// assert_eq!(page.height(), 842.0);
    /// ```
    pub fn new(tokens: Vec<Token>, height: f32) -> Self {
        Self { tokens, height }
    }
}

impl TokenSource for PageTokens {
    fn tokens(&self) -> Vec<Token> {
        self.tokens.clone()
    }

    fn height(&self) -> f32 {
        self.height
    }
}
