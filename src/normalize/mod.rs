//! Post-processing normalizers for monetary and date fields.
//!
//! These are pure utilities shared by the row assembler and the header
//! extractor. Both calendars that appear on Thai financial statements are
//! supported: Gregorian (AD) and Buddhist Era (BE, offset by 543 years).
//! Unparseable input never raises; money parsing yields `None` and date
//! normalization returns its input unchanged.

use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;

/// Calendar a month abbreviation belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Calendar {
    /// Gregorian calendar (English month abbreviations)
    Gregorian,
    /// Buddhist Era calendar (Thai month abbreviations)
    BuddhistEra,
}

/// Thai month abbreviations as printed on statements.
static THAI_MONTHS: phf::Map<&'static str, u32> = phf::phf_map! {
    "ม.ค." => 1, "ก.พ." => 2, "มี.ค." => 3, "เม.ย." => 4,
    "พ.ค." => 5, "มิ.ย." => 6, "ก.ค." => 7, "ส.ค." => 8,
    "ก.ย." => 9, "ต.ค." => 10, "พ.ย." => 11, "ธ.ค." => 12,
};

/// English month abbreviations, three-letter form.
static ENGLISH_MONTHS: phf::Map<&'static str, u32> = phf::phf_map! {
    "Jan" => 1, "Feb" => 2, "Mar" => 3, "Apr" => 4,
    "May" => 5, "Jun" => 6, "Jul" => 7, "Aug" => 8,
    "Sep" => 9, "Oct" => 10, "Nov" => 11, "Dec" => 12,
};

/// Years above this threshold are Buddhist Era and get the -543 correction.
const BE_YEAR_THRESHOLD: i32 = 2400;

lazy_static! {
    static ref NUMERIC_DATE: Regex =
        Regex::new(r"^(\d{1,2})[/-](\d{1,2})[/-](\d{2}|\d{4})$").unwrap();
}

/// Resolve a month abbreviation to its month number and calendar.
///
/// English matching is lenient: case-insensitive on the first three letters,
/// so `"JAN"`, `"jan"` and `"Jan."` all resolve to month 1. Thai
/// abbreviations must match exactly as printed (`"ม.ค."` etc.).
///
/// # Examples
///
/// ```
/// use ledger_oxide::normalize::{month_number, Calendar};
///
/// assert_eq!(month_number("ม.ค."), Some((1, Calendar::BuddhistEra)));
/// assert_eq!(month_number("Jan"), Some((1, Calendar::Gregorian)));
/// assert_eq!(month_number("sep."), Some((9, Calendar::Gregorian)));
/// assert_eq!(month_number("xyz"), None);
/// ```
pub fn month_number(token: &str) -> Option<(u32, Calendar)> {
    if let Some(&month) = THAI_MONTHS.get(token) {
        return Some((month, Calendar::BuddhistEra));
    }

    let mut key = String::new();
    for (i, c) in token.chars().take(3).enumerate() {
        if i == 0 {
            key.extend(c.to_uppercase());
        } else {
            key.extend(c.to_lowercase());
        }
    }
    ENGLISH_MONTHS
        .get(key.as_str())
        .map(|&month| (month, Calendar::Gregorian))
}

/// Parse a monetary string into a float.
///
/// Strips thousands separators and currency noise, understands both
/// parenthesized and leading-minus negatives. Empty or non-numeric input
/// yields `None`, never an error.
///
/// # Examples
///
/// ```
/// use ledger_oxide::normalize::parse_money;
///
/// assert_eq!(parse_money("1,234.56"), Some(1234.56));
/// assert_eq!(parse_money("(500.00)"), Some(-500.00));
/// assert_eq!(parse_money("-42.00"), Some(-42.00));
/// assert_eq!(parse_money(""), None);
/// assert_eq!(parse_money("N/A"), None);
/// ```
pub fn parse_money(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }

    let (body, parenthesized) = if trimmed.starts_with('(') && trimmed.ends_with(')') {
        (&trimmed[1..trimmed.len() - 1], true)
    } else {
        (trimmed, false)
    };
    let negative = parenthesized || body.contains('-');

    let digits: String = body
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    if digits.is_empty() {
        return None;
    }

    // Keep only the first decimal point; stray later dots are rendering noise.
    let normalized = match digits.split_once('.') {
        Some((integral, fraction)) => {
            format!("{}.{}", integral, fraction.replace('.', ""))
        }
        None => digits,
    };

    let value: f64 = normalized.parse().ok()?;
    Some(if negative { -value } else { value })
}

/// Parse a date string into a [`NaiveDate`], if possible.
///
/// Accepts fixed-width numeric dates (`dd/mm/yy`, `dd/mm/yyyy`, `dd-mm-yy`,
/// `dd-mm-yyyy`) and three-token word dates (`day monthAbbrev yy`, Thai or
/// English). Two-digit years expand to `+2000` (English/numeric) or `+2500`
/// (Thai); any resulting year above 2400 gets the Buddhist-Era `-543`
/// correction.
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let trimmed = text.trim();

    if let Some(caps) = NUMERIC_DATE.captures(trimmed) {
        let day: u32 = caps[1].parse().ok()?;
        let month: u32 = caps[2].parse().ok()?;
        let mut year: i32 = caps[3].parse().ok()?;
        if year < 100 {
            year += 2000;
        }
        return NaiveDate::from_ymd_opt(resolve_be_year(year), month, day);
    }

    let tokens: Vec<&str> = trimmed.split_whitespace().collect();
    if tokens.len() == 3 {
        let day: u32 = tokens[0].parse().ok()?;
        let (month, calendar) = month_number(tokens[1])?;
        let mut year: i32 = tokens[2].parse().ok()?;
        if year < 100 {
            year += match calendar {
                Calendar::BuddhistEra => 2500,
                Calendar::Gregorian => 2000,
            };
        }
        return NaiveDate::from_ymd_opt(resolve_be_year(year), month, day);
    }

    None
}

fn resolve_be_year(year: i32) -> i32 {
    if year > BE_YEAR_THRESHOLD {
        year - 543
    } else {
        year
    }
}

/// Normalize a date string to canonical `YYYY-MM-DD` form.
///
/// Unparseable input is returned unchanged.
///
/// # Examples
///
/// ```
/// use ledger_oxide::normalize::normalize_date;
///
/// assert_eq!(normalize_date("01/01/2567"), "2024-01-01"); // Buddhist Era
/// assert_eq!(normalize_date("1 ม.ค. 68"), "2025-01-01");
/// assert_eq!(normalize_date("1 Jan 23"), "2023-01-01");
/// assert_eq!(normalize_date("not a date"), "not a date");
/// ```
pub fn normalize_date(text: &str) -> String {
    match parse_date(text) {
        Some(date) => date.format("%Y-%m-%d").to_string(),
        None => text.to_string(),
    }
}

/// Split a statement period string into start and end dates.
///
/// Accepts `"01/01/2024 - 31/01/2024"` style strings with either an ASCII
/// hyphen or an en dash; whitespace is ignored. Each side is parsed with the
/// same calendar rules as [`parse_date`]; a missing or unparseable side is
/// `None`.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use ledger_oxide::normalize::split_period;
///
/// let (start, end) = split_period("01/01/2567 - 31/01/2567");
/// assert_eq!(start, NaiveDate::from_ymd_opt(2024, 1, 1));
/// assert_eq!(end, NaiveDate::from_ymd_opt(2024, 1, 31));
/// ```
pub fn split_period(text: &str) -> (Option<NaiveDate>, Option<NaiveDate>) {
    let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    let mut parts = compact.splitn(2, ['-', '–']);
    let start = parts.next().and_then(parse_date);
    let end = parts.next().and_then(parse_date);
    (start, end)
}
