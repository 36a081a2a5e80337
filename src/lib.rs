//! Positional table reconstruction for bank-statement documents.
//!
//! Statement PDFs rarely carry machine-readable table structure; what a
//! word extractor recovers is a flat bag of positioned text tokens. This
//! crate rebuilds the transaction table from that bag using geometry alone:
//!
//! ```text
//! tokens ──► header fields      (labeled crops, page id, declared totals)
//!    │
//!    ├─► table crop ─► footer trim ─► row segmentation (date anchors)
//!    │                                      │
//!    │                                      ▼
//!    │                        column classification (x thresholds)
//!    │                                      │
//!    │                                      ▼
//!    └────────────────────────► transaction records + page totals
//! ```
//!
//! Every per-family difference (column boundaries, date shapes, footer
//! keywords, Thai/English month names, Buddhist-Era years) is configuration,
//! never code: one [`layout::LayoutConfig`] and one [`header::HeaderLayout`]
//! describe a document family, and the [`pipeline::Engine`] does the rest.
//!
//! # Quick start
//!
//! ```
//! use ledger_oxide::header::HeaderLayout;
//! use ledger_oxide::layout::LayoutConfig;
//! use ledger_oxide::pipeline::Engine;
//! use ledger_oxide::token::{PageTokens, Token};
//!
//! // Column boundaries for one statement family, in page points.
//! let layout = LayoutConfig::new(20.0, 30.0, 80.0, 250.0, 460.0, 200.0)
//!     .with_footer_keywords(["TOTAL AMOUNTS"]);
//! let engine = Engine::new(layout, HeaderLayout::default())?;
//!
//! let page = PageTokens::new(
//!     vec![
//!         Token::new("10/01/24", 25.0, 62.0, 100.0),
//!         Token::new("X1", 50.0, 62.0, 100.0),
//!         Token::new("ATM", 120.0, 140.0, 100.0),
//!         Token::new("100.00", 150.0, 182.0, 100.0),
//!         Token::new("9,900.00", 300.0, 345.0, 100.0),
//!     ],
//!     842.0,
//! );
//!
//! let extract = engine.extract_page(&page)?;
//! assert_eq!(extract.transactions.len(), 1);
//! assert_eq!(extract.transactions[0].debit, Some(100.0));
//! assert_eq!(extract.transactions[0].balance, Some(9900.0));
//! # Ok::<(), ledger_oxide::Error>(())
//! ```
//!
//! # Failure philosophy
//!
//! Only configuration is fatal: a layout with non-monotonic boundaries is
//! rejected when the [`pipeline::Engine`] is built. Content never is —
//! unparseable amounts are skipped, stray tokens are dropped (with debug
//! logs), and a page without a table yields an empty extract.

#![warn(missing_docs)]

pub mod classify;
pub mod error;
pub mod geometry;
pub mod header;
pub mod layout;
pub mod normalize;
pub mod pipeline;
pub mod record;
pub mod token;

pub use error::{Error, Result};
pub use layout::LayoutConfig;
pub use pipeline::{Engine, PageExtract, PageOutcome};
pub use record::{HeaderRecord, PageTotals, TransactionRecord};
pub use token::{PageTokens, Token, TokenSource};
