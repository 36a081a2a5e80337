//! Header field extraction: labeled crops above the transaction table.
//!
//! Statement headers carry the account owner, account number, statement
//! period, page identifier and (on summary pages) declared totals. Each
//! field is a named rectangular crop; the text inside it, joined in reading
//! order, becomes the field value. Totals lines are recognized by prefix on
//! the page's full text, and only attempted when a footer marker confirms
//! the page actually carries a summary.

use crate::classify::content;
use crate::error::{Error, Result};
use crate::geometry::Rect;
use crate::record::HeaderRecord;
use crate::token::{Token, TokenSource};
use indexmap::IndexMap;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

lazy_static! {
    /// Grouped digits with an optional two-decimal fraction: `1,234.56`, `17`.
    static ref NUMBER: Regex = Regex::new(r"\d[\d,]*(?:\.\d{2})?").unwrap();
}

/// One labeled header crop.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeaderField {
    /// Output field name, unique within the layout
    pub name: String,
    /// Crop region containing the field's tokens
    pub region: Rect,
    /// Reduce the crop text to its first number (account totals, counters)
    pub numeric: bool,
}

/// Which side of the ledger a totals line declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TotalsSide {
    /// Withdrawal totals
    Debit,
    /// Deposit totals
    Credit,
}

/// A totals-line rule: lines starting with one of `prefixes` declare the
/// item count and amount for `side`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TotalsRule {
    /// Accepted line prefixes (localized variants of the same label)
    pub prefixes: Vec<String>,
    /// Ledger side the line declares
    pub side: TotalsSide,
}

/// Header layout for one document family.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HeaderLayout {
    /// Labeled field crops
    pub fields: Vec<HeaderField>,
    /// Candidate regions for the page identifier, tried in order
    pub page_id_regions: Vec<Rect>,
    /// Markers confirming the page carries a totals summary
    pub footer_markers: Vec<String>,
    /// Totals-line rules
    pub totals: Vec<TotalsRule>,
}

impl HeaderLayout {
    /// Validate the layout: field names must be unique and non-empty.
    pub fn validate(&self) -> Result<()> {
        let mut seen = IndexMap::new();
        for field in &self.fields {
            if field.name.trim().is_empty() {
                return Err(Error::InvalidHeaderLayout(
                    "header field with empty name".to_string(),
                ));
            }
            if seen.insert(field.name.as_str(), ()).is_some() {
                return Err(Error::InvalidHeaderLayout(format!(
                    "duplicate header field name: {:?}",
                    field.name
                )));
            }
        }
        Ok(())
    }
}

/// Extract the header record for one page.
///
/// Every declared field is present in the output, `None` when its crop is
/// empty. The page id comes from the first region whose text contains one.
/// Totals are only parsed when a footer marker appears on the page.
pub fn extract_header(source: &dyn TokenSource, layout: &HeaderLayout) -> HeaderRecord {
    let mut header = HeaderRecord::empty();

    for field in &layout.fields {
        let text = region_text(source, &field.region);
        let value = if field.numeric {
            text.as_deref().and_then(first_number_text)
        } else {
            text
        };
        header.fields.insert(field.name.clone(), value);
    }

    for region in &layout.page_id_regions {
        if let Some(text) = region_text(source, region) {
            if let Some(page_id) = content::extract_page_id(&text) {
                header.page_id = Some(page_id);
                break;
            }
        }
    }

    if !layout.totals.is_empty() {
        let full_text = source.full_text();
        if has_footer_marker(&full_text, &layout.footer_markers) {
            parse_totals(&full_text, &layout.totals, &mut header);
        }
    }
    header
}

/// Join a crop's tokens in reading order, `None` when the crop is empty.
fn region_text(source: &dyn TokenSource, region: &Rect) -> Option<String> {
    let mut tokens: Vec<Token> = source.tokens_in_region(region);
    if tokens.is_empty() {
        return None;
    }
    tokens.sort_by(|a, b| {
        a.top
            .total_cmp(&b.top)
            .then_with(|| a.x0.total_cmp(&b.x0))
    });
    let joined = tokens
        .iter()
        .map(|t| t.text.as_str())
        .collect::<Vec<_>>()
        .join(" ");
    let trimmed = joined.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn has_footer_marker(full_text: &str, markers: &[String]) -> bool {
    if markers.is_empty() {
        return true;
    }
    let haystack = full_text.to_lowercase();
    markers
        .iter()
        .any(|m| haystack.contains(&m.to_lowercase()))
}

/// Scan the page text for totals lines.
///
/// The first number on a matching line is the item count, the second the
/// amount. Later matching lines for the same side overwrite earlier ones
/// (carried-forward summaries repeat on the last page).
fn parse_totals(full_text: &str, rules: &[TotalsRule], header: &mut HeaderRecord) {
    for line in full_text.lines() {
        let trimmed = line.trim();
        for rule in rules {
            if !rule
                .prefixes
                .iter()
                .any(|p| trimmed.starts_with(p.as_str()))
            {
                continue;
            }
            let mut numbers = NUMBER.find_iter(trimmed);
            let count = numbers
                .next()
                .and_then(|m| m.as_str().replace(',', "").parse::<u32>().ok());
            let amount = numbers
                .next()
                .and_then(|m| m.as_str().replace(',', "").parse::<f64>().ok());
            match rule.side {
                TotalsSide::Debit => {
                    header.total_debit_count = count;
                    header.total_debit = amount;
                }
                TotalsSide::Credit => {
                    header.total_credit_count = count;
                    header.total_credit = amount;
                }
            }
        }
    }
}

fn first_number_text(text: &str) -> Option<String> {
    NUMBER.find(text).map(|m| m.as_str().to_string())
}
