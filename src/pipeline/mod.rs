//! The extraction pipeline: header, crop, trim, segment, classify, assemble.
//!
//! [`Engine`] owns one validated layout pair and turns pages of positioned
//! tokens into [`PageExtract`]s. Content problems never abort a document:
//! a page with no table yields an empty extract, and per-page failures in
//! batch mode surface as [`PageOutcome::Skipped`] while the rest of the
//! document proceeds.

use crate::classify::classify_row;
use crate::error::Result;
use crate::header::{extract_header, HeaderLayout};
use crate::layout::footer::{row_contains_footer, trim_footer};
use crate::layout::{anchor_tops, assign_rows, compute_intervals, LayoutConfig};
use crate::record::{assemble_row, HeaderRecord, PageTotals, TransactionRecord};
use crate::token::{Token, TokenSource};
use serde::{Deserialize, Serialize};

/// Everything extracted from one page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageExtract {
    /// Header fields, page id and declared totals
    pub header: HeaderRecord,
    /// Reconstructed transaction rows, top to bottom
    pub transactions: Vec<TransactionRecord>,
    /// Sums and counts over `transactions`
    pub totals: PageTotals,
}

/// Per-page result of a batch extraction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PageOutcome {
    /// The page was processed (possibly yielding zero transactions)
    Extracted(PageExtract),
    /// The page was skipped; the reason is carried for reporting
    Skipped {
        /// Zero-based page index
        page: usize,
        /// Human-readable skip reason
        reason: String,
    },
}

/// The table reconstruction engine for one document family.
///
/// # Examples
///
/// ```
/// use ledger_oxide::layout::LayoutConfig;
/// use ledger_oxide::header::HeaderLayout;
/// use ledger_oxide::pipeline::Engine;
/// use ledger_oxide::token::{PageTokens, Token};
///
/// let layout = LayoutConfig::new(20.0, 30.0, 80.0, 250.0, 460.0, 200.0);
/// let engine = Engine::new(layout, HeaderLayout::default()).unwrap();
///
/// let page = PageTokens::new(
///     vec![
///         Token::new("10/01/24", 25.0, 60.0, 100.0),
///         Token::new("100.00", 150.0, 180.0, 100.0),
///     ],
///     842.0,
/// );
/// let extract = engine.extract_page(&page).unwrap();
/// assert_eq!(extract.transactions.len(), 1);
/// assert_eq!(extract.transactions[0].debit, Some(100.0));
/// ```
#[derive(Debug, Clone)]
pub struct Engine {
    layout: LayoutConfig,
    header: HeaderLayout,
}

impl Engine {
    /// Create an engine, validating both layouts up front.
    pub fn new(layout: LayoutConfig, header: HeaderLayout) -> Result<Self> {
        layout.validate()?;
        header.validate()?;
        Ok(Self { layout, header })
    }

    /// The validated table layout.
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// The validated header layout.
    pub fn header_layout(&self) -> &HeaderLayout {
        &self.header
    }

    /// Extract the header and all transactions from one page.
    ///
    /// A page without date anchors is not an error; it yields an extract
    /// with an empty transaction list (title pages, terms pages).
    pub fn extract_page(&self, source: &dyn TokenSource) -> Result<PageExtract> {
        let header = extract_header(source, &self.header);
        let page_id = header.page_id.as_deref();

        let (tokens, region_height) = self.table_tokens(source);
        let tokens = trim_footer(
            tokens,
            &self.layout.footer_keywords,
            self.layout.y_margin,
            region_height,
        );

        let tops = anchor_tops(&tokens, &self.layout);
        if tops.is_empty() {
            log::debug!("page has no date anchors; no transaction table");
            return Ok(PageExtract {
                header,
                transactions: Vec::new(),
                totals: PageTotals::default(),
            });
        }

        let intervals = compute_intervals(&tops, self.layout.y_margin);
        let rows = assign_rows(&tokens, &intervals);

        let mut transactions = Vec::with_capacity(rows.len());
        for row in &rows {
            if row_contains_footer(row, &self.layout.footer_keywords) {
                log::debug!("summary row inside table region skipped");
                continue;
            }
            if let Some(record) = assemble_row(classify_row(row, &self.layout), &self.layout, page_id)
            {
                transactions.push(record);
            }
        }

        let totals = PageTotals::from_records(&transactions);
        log::info!(
            "extracted {} transaction(s) from {} row interval(s)",
            transactions.len(),
            intervals.len()
        );
        Ok(PageExtract {
            header,
            transactions,
            totals,
        })
    }

    /// Extract every page of a document, never aborting on a bad page.
    ///
    /// Pages that fail extraction are reported as [`PageOutcome::Skipped`]
    /// and logged at warn level; the remaining pages still produce output.
    pub fn extract_document<S: TokenSource>(&self, pages: &[S]) -> Vec<PageOutcome> {
        pages
            .iter()
            .enumerate()
            .map(|(index, page)| match self.extract_page(page) {
                Ok(extract) => PageOutcome::Extracted(extract),
                Err(err) => {
                    log::warn!("page {} skipped: {}", index, err);
                    PageOutcome::Skipped {
                        page: index,
                        reason: err.to_string(),
                    }
                }
            })
            .collect()
    }

    /// Tokens feeding row segmentation, honoring the optional table crop.
    fn table_tokens(&self, source: &dyn TokenSource) -> (Vec<Token>, f32) {
        match &self.layout.table_crop {
            Some(crop) => (source.tokens_in_region(crop), crop.height()),
            None => (source.tokens(), source.height()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Rect;
    use crate::token::PageTokens;

    fn tok(text: &str, x0: f32, top: f32) -> Token {
        Token::new(text, x0, x0 + 30.0, top)
    }

    fn engine() -> Engine {
        let layout = LayoutConfig::new(20.0, 30.0, 80.0, 250.0, 460.0, 200.0)
            .with_footer_keywords(["TOTAL AMOUNTS"]);
        Engine::new(layout, HeaderLayout::default()).unwrap()
    }

    #[test]
    fn test_invalid_layout_rejected_at_construction() {
        let layout = LayoutConfig::new(20.0, 30.0, 300.0, 250.0, 460.0, 200.0);
        assert!(Engine::new(layout, HeaderLayout::default()).is_err());
    }

    #[test]
    fn test_page_without_anchors_yields_empty_extract() {
        let page = PageTokens::new(vec![tok("Terms", 100.0, 50.0)], 842.0);
        let extract = engine().extract_page(&page).unwrap();
        assert!(extract.transactions.is_empty());
        assert_eq!(extract.totals, PageTotals::default());
    }

    #[test]
    fn test_full_page_extraction() {
        let page = PageTokens::new(
            vec![
                tok("10/01/24", 25.0, 100.0),
                tok("X1", 50.0, 100.0),
                tok("ATM", 120.0, 100.0),
                tok("100.00", 150.0, 100.0),
                tok("9,900.00", 300.0, 100.0),
                tok("11/01/24", 25.0, 130.0),
                tok("2,000.00", 220.0, 130.0),
                tok("11,900.00", 300.0, 130.0),
                tok("note", 300.0, 131.0),
            ],
            842.0,
        );
        let extract = engine().extract_page(&page).unwrap();
        assert_eq!(extract.transactions.len(), 2);

        let first = &extract.transactions[0];
        assert_eq!(first.date, "10/01/24");
        assert_eq!(first.debit, Some(100.0));
        assert_eq!(first.balance, Some(9900.0));
        assert_eq!(first.code.as_deref(), Some("X1"));
        assert_eq!(first.channel.as_deref(), Some("ATM"));

        let second = &extract.transactions[1];
        assert_eq!(second.credit, Some(2000.0));
        assert_eq!(second.description.as_deref(), Some("note"));

        assert_eq!(extract.totals.debit_sum, 100.0);
        assert_eq!(extract.totals.credit_sum, 2000.0);
    }

    #[test]
    fn test_footer_rows_excluded() {
        let page = PageTokens::new(
            vec![
                tok("10/01/24", 25.0, 100.0),
                tok("100.00", 150.0, 100.0),
                tok("TOTAL AMOUNTS", 25.0, 130.0),
                tok("100.00", 150.0, 130.0),
            ],
            842.0,
        );
        let extract = engine().extract_page(&page).unwrap();
        assert_eq!(extract.transactions.len(), 1);
        assert_eq!(extract.totals.debit_count, 1);
    }

    #[test]
    fn test_table_crop_limits_segmentation() {
        let layout = LayoutConfig::new(20.0, 30.0, 80.0, 250.0, 460.0, 200.0)
            .with_table_crop(Rect::new(0.0, 90.0, 600.0, 400.0));
        let engine = Engine::new(layout, HeaderLayout::default()).unwrap();
        let page = PageTokens::new(
            vec![
                // Date-shaped text in the header area, outside the crop.
                tok("01/01/24", 25.0, 40.0),
                tok("10/01/24", 25.0, 100.0),
                tok("500.00", 150.0, 100.0),
            ],
            842.0,
        );
        let extract = engine.extract_page(&page).unwrap();
        assert_eq!(extract.transactions.len(), 1);
        assert_eq!(extract.transactions[0].date, "10/01/24");
    }

    #[test]
    fn test_document_batch_never_aborts() {
        let pages = vec![
            PageTokens::new(vec![tok("cover", 100.0, 50.0)], 842.0),
            PageTokens::new(
                vec![tok("10/01/24", 25.0, 100.0), tok("1.00", 150.0, 100.0)],
                842.0,
            ),
        ];
        let outcomes = engine().extract_document(&pages);
        assert_eq!(outcomes.len(), 2);
        assert!(matches!(outcomes[0], PageOutcome::Extracted(_)));
        match &outcomes[1] {
            PageOutcome::Extracted(extract) => {
                assert_eq!(extract.transactions.len(), 1)
            }
            PageOutcome::Skipped { .. } => panic!("page should extract"),
        }
    }

    #[test]
    fn test_page_id_threaded_into_records() {
        let header = HeaderLayout {
            page_id_regions: vec![Rect::new(400.0, 0.0, 600.0, 20.0)],
            ..Default::default()
        };
        let layout = LayoutConfig::new(20.0, 30.0, 80.0, 250.0, 460.0, 200.0);
        let engine = Engine::new(layout, header).unwrap();
        let page = PageTokens::new(
            vec![
                tok("1/2", 500.0, 10.0),
                tok("10/01/24", 25.0, 100.0),
                tok("55.00", 150.0, 100.0),
            ],
            842.0,
        );
        let extract = engine.extract_page(&page).unwrap();
        assert_eq!(extract.header.page_id.as_deref(), Some("1/2"));
        assert_eq!(
            extract.transactions[0].page_id.as_deref(),
            Some("1/2")
        );
    }
}
