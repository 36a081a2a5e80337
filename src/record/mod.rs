//! Output records: transactions, header fields and page totals.
//!
//! Everything here is plain serializable data. Field extraction lives in
//! [`crate::header`], row assembly in [`assembler`]; this module only
//! defines the shapes that leave the engine.

pub mod assembler;

pub use assembler::assemble_row;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One reconstructed transaction row.
///
/// Money fields hold parsed values; `debit` and `credit` are mutually
/// exclusive by construction. `date` carries the token text as printed
/// unless the layout enables date normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// Page identifier (`"N/M"`) the row came from, when known
    pub page_id: Option<String>,
    /// Row-anchoring date
    pub date: String,
    /// Transaction time, when the layout has a time column
    pub time: Option<String>,
    /// Transaction code
    pub code: Option<String>,
    /// Channel
    pub channel: Option<String>,
    /// Withdrawal amount
    pub debit: Option<f64>,
    /// Deposit amount
    pub credit: Option<f64>,
    /// Running balance after the transaction
    pub balance: Option<f64>,
    /// Free-text description
    pub description: Option<String>,
}

/// Labeled header fields extracted from one page.
///
/// `fields` preserves the declaration order of the header layout so
/// serialized output is stable. A field that matched no tokens is present
/// with a `None` value rather than absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeaderRecord {
    /// Page identifier (`"N/M"`), when a page-id region matched
    pub page_id: Option<String>,
    /// Field name to extracted text, in layout order
    pub fields: IndexMap<String, Option<String>>,
    /// Declared total debit amount from the summary line
    pub total_debit: Option<f64>,
    /// Declared total credit amount from the summary line
    pub total_credit: Option<f64>,
    /// Declared number of debit items
    pub total_debit_count: Option<u32>,
    /// Declared number of credit items
    pub total_credit_count: Option<u32>,
}

impl HeaderRecord {
    /// An empty header with no fields and no totals.
    pub fn empty() -> Self {
        Self {
            page_id: None,
            fields: IndexMap::new(),
            total_debit: None,
            total_credit: None,
            total_debit_count: None,
            total_credit_count: None,
        }
    }
}

/// Sums and counts computed from extracted transactions.
///
/// These are derived from the rows the engine actually produced, so they can
/// be checked against the declared totals in [`HeaderRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PageTotals {
    /// Sum of all debit amounts
    pub debit_sum: f64,
    /// Sum of all credit amounts
    pub credit_sum: f64,
    /// Number of rows with a debit
    pub debit_count: u32,
    /// Number of rows with a credit
    pub credit_count: u32,
}

impl PageTotals {
    /// Accumulate totals over a slice of records.
    pub fn from_records(records: &[TransactionRecord]) -> Self {
        let mut totals = Self::default();
        for record in records {
            if let Some(debit) = record.debit {
                totals.debit_sum += debit;
                totals.debit_count += 1;
            }
            if let Some(credit) = record.credit {
                totals.credit_sum += credit;
                totals.credit_count += 1;
            }
        }
        totals
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(debit: Option<f64>, credit: Option<f64>) -> TransactionRecord {
        TransactionRecord {
            page_id: None,
            date: "01/01/24".to_string(),
            time: None,
            code: None,
            channel: None,
            debit,
            credit,
            balance: None,
            description: None,
        }
    }

    #[test]
    fn test_totals_from_records() {
        let records = vec![
            record(Some(100.0), None),
            record(None, Some(250.5)),
            record(Some(49.5), None),
            record(None, None),
        ];
        let totals = PageTotals::from_records(&records);
        assert_eq!(totals.debit_sum, 149.5);
        assert_eq!(totals.credit_sum, 250.5);
        assert_eq!(totals.debit_count, 2);
        assert_eq!(totals.credit_count, 1);
    }

    #[test]
    fn test_totals_empty() {
        assert_eq!(PageTotals::from_records(&[]), PageTotals::default());
    }

    #[test]
    fn test_transaction_record_serializes() {
        let json = serde_json::to_string(&record(Some(10.0), None)).unwrap();
        assert!(json.contains("\"debit\":10.0"));
        assert!(json.contains("\"date\":\"01/01/24\""));
    }

    #[test]
    fn test_header_fields_keep_order() {
        let mut header = HeaderRecord::empty();
        header.fields.insert("owner".to_string(), Some("A".to_string()));
        header.fields.insert("account".to_string(), None);
        header.fields.insert("period".to_string(), Some("B".to_string()));
        let keys: Vec<&str> = header.fields.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["owner", "account", "period"]);
    }
}
