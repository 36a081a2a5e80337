//! Content shape predicates.
//!
//! Pure functions recognizing date, time, money and page-id shapes from
//! token text. They never fail: unmatched input yields `false` or `None`.
//! Regexes are compiled once at first use.

use crate::normalize::month_number;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref NUMERIC_DATE: Regex = Regex::new(r"^\d{2}[/-]\d{2}[/-]\d{2}(?:\d{2})?$").unwrap();
    static ref WORD_DATE: Regex = Regex::new(r"^\d{1,2}\s+\S+\s+\d{2}$").unwrap();
    static ref TIME: Regex = Regex::new(r"^\d{2}:\d{2}$").unwrap();
    static ref MONEY: Regex = Regex::new(r"^\(?[-+]?[\d,]+\.\d{2}\)?$").unwrap();
    static ref PAGE_ID: Regex = Regex::new(r"(?i)(\d+)\s*(?:/|of)\s*(\d+)").unwrap();
    static ref DATE_PREFIX: Regex = Regex::new(r"^\d{2}[/-]\d{2}[/-]\d{2}(?:\d{2})?").unwrap();
}

/// Check for a fixed-width numeric date: `dd/mm/yy`, `dd/mm/yyyy`,
/// `dd-mm-yy` or `dd-mm-yyyy`.
///
/// # Examples
///
/// ```
/// use ledger_oxide::classify::content::is_numeric_date;
///
/// assert!(is_numeric_date("10/01/24"));
/// assert!(is_numeric_date("01-12-2567"));
/// assert!(!is_numeric_date("10/01"));
/// ```
pub fn is_numeric_date(text: &str) -> bool {
    NUMERIC_DATE.is_match(text)
}

/// Check for a three-token word date (`day monthAbbrev yy`).
///
/// The middle token must be a known Thai or English month abbreviation;
/// `"1 xx 24"` is not a date.
///
/// # Examples
///
/// ```
/// use ledger_oxide::classify::content::is_word_date;
///
/// assert!(is_word_date("1 ม.ค. 68"));
/// assert!(is_word_date("15 Jan 23"));
/// assert!(!is_word_date("1 xx 24"));
/// ```
pub fn is_word_date(text: &str) -> bool {
    if !WORD_DATE.is_match(text) {
        return false;
    }
    text.split_whitespace()
        .nth(1)
        .and_then(month_number)
        .is_some()
}

/// Check for any supported date shape.
pub fn is_date(text: &str) -> bool {
    is_numeric_date(text) || is_word_date(text)
}

/// Check for an `hh:mm` time.
///
/// # Examples
///
/// ```
/// use ledger_oxide::classify::content::is_time;
///
/// assert!(is_time("14:05"));
/// assert!(!is_time("14:05:33"));
/// ```
pub fn is_time(text: &str) -> bool {
    TIME.is_match(text)
}

/// Check for a monetary shape: two fraction digits required, thousands
/// separators, a leading sign and parenthesization optional.
///
/// # Examples
///
/// ```
/// use ledger_oxide::classify::content::is_money;
///
/// assert!(is_money("1,234.56"));
/// assert!(is_money("-500.00"));
/// assert!(is_money("(500.00)"));
/// assert!(!is_money("1234"));
/// assert!(!is_money("1.2"));
/// ```
pub fn is_money(text: &str) -> bool {
    MONEY.is_match(text)
}

/// Check whether the text contains a page identifier (`1/7` or `1 of 7`).
pub fn is_page_id(text: &str) -> bool {
    PAGE_ID.is_match(text)
}

/// Extract a page identifier, normalized to `N/M` form.
///
/// # Examples
///
/// ```
/// use ledger_oxide::classify::content::extract_page_id;
///
/// assert_eq!(extract_page_id("Page 1 / 7"), Some("1/7".to_string()));
/// assert_eq!(extract_page_id("2 of 10"), Some("2/10".to_string()));
/// assert_eq!(extract_page_id("no pages here"), None);
/// ```
pub fn extract_page_id(text: &str) -> Option<String> {
    PAGE_ID
        .captures(text)
        .map(|caps| format!("{}/{}", &caps[1], &caps[2]))
}

/// Split a token that *begins* with a numeric date into the date prefix and
/// the remainder.
///
/// Some layouts fuse the date column with the first description word into a
/// single token; the remainder must be reclassified as text.
///
/// # Examples
///
/// ```
/// use ledger_oxide::classify::content::split_date_prefix;
///
/// assert_eq!(split_date_prefix("01/01/2567ABC"), Some(("01/01/2567", "ABC")));
/// assert_eq!(split_date_prefix("01/01/2567"), Some(("01/01/2567", "")));
/// assert_eq!(split_date_prefix("ABC"), None);
/// ```
pub fn split_date_prefix(text: &str) -> Option<(&str, &str)> {
    DATE_PREFIX
        .find(text)
        .map(|m| (&text[..m.end()], &text[m.end()..]))
}
