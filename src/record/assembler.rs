//! Row assembly: bucketed tokens to a [`TransactionRecord`].
//!
//! The assembler is where debit vs. credit is resolved and where money text
//! becomes numbers. Rows without a date never reach it (the segmenter only
//! builds rows around date anchors), but a defensive `None` is returned
//! anyway so callers can treat the result uniformly.

use crate::classify::RowBuckets;
use crate::layout::{AmountStyle, LayoutConfig};
use crate::normalize;
use crate::record::TransactionRecord;
use crate::token::Token;

/// Assemble one classified row into a transaction record.
///
/// Returns `None` when the row has no date anchor. Multiple amount tokens in
/// the same row resolve last-wins per side; the balance is the rightmost
/// parseable balance candidate.
pub fn assemble_row(
    buckets: RowBuckets,
    config: &LayoutConfig,
    page_id: Option<&str>,
) -> Option<TransactionRecord> {
    let date_token = buckets.date?;
    let date = if config.normalize_dates {
        normalize::normalize_date(&date_token.text)
    } else {
        date_token.text
    };

    let (debit, credit) = resolve_amounts(&buckets.amounts, config);
    let balance = resolve_balance(&buckets.balances);
    let (code, channel) = resolve_code_channel(&buckets.code, &buckets.channel, config);

    Some(TransactionRecord {
        page_id: page_id.map(str::to_string),
        date,
        time: buckets.time.map(|t| t.text),
        code,
        channel,
        debit,
        credit,
        balance,
        description: join_texts(&buckets.description),
    })
}

/// Resolve debit and credit from the amount-zone tokens.
///
/// Two-column layouts split on the token's right edge; signed layouts split
/// on the parsed value's sign (negative is a withdrawal, stored positive).
/// Unparseable money text is skipped.
fn resolve_amounts(amounts: &[Token], config: &LayoutConfig) -> (Option<f64>, Option<f64>) {
    let mut debit = None;
    let mut credit = None;

    for token in amounts {
        let Some(value) = normalize::parse_money(&token.text) else {
            log::debug!("unparseable amount skipped: {:?}", token.text);
            continue;
        };
        match config.amount_style {
            AmountStyle::TwoColumn => {
                if token.x1 <= config.debit_credit_split + config.x_tolerance {
                    debit = Some(value.abs());
                } else {
                    credit = Some(value.abs());
                }
            }
            AmountStyle::Signed => {
                if value < 0.0 {
                    debit = Some(-value);
                } else {
                    credit = Some(value);
                }
            }
        }
    }
    (debit, credit)
}

/// The balance is the rightmost parseable candidate in the balance zone.
fn resolve_balance(balances: &[Token]) -> Option<f64> {
    balances
        .iter()
        .filter(|t| normalize::parse_money(&t.text).is_some())
        .max_by(|a, b| a.x0.total_cmp(&b.x0))
        .and_then(|t| normalize::parse_money(&t.text))
}

/// Resolve the code and channel columns.
///
/// Layouts that print a merged `CODE/CHANNEL` string join both buckets with
/// `/` and re-split at the first `/`; everyone else joins each bucket with
/// spaces.
fn resolve_code_channel(
    code: &[Token],
    channel: &[Token],
    config: &LayoutConfig,
) -> (Option<String>, Option<String>) {
    if !config.merge_code_channel {
        return (join_texts(code), join_texts(channel));
    }

    let merged: Vec<&str> = code
        .iter()
        .chain(channel.iter())
        .map(|t| t.text.as_str())
        .collect();
    if merged.is_empty() {
        return (None, None);
    }
    let joined = merged.join("/");
    match joined.split_once('/') {
        Some((head, tail)) if !tail.is_empty() => {
            (non_empty(head.to_string()), non_empty(tail.to_string()))
        }
        _ => (non_empty(joined), None),
    }
}

fn join_texts(tokens: &[Token]) -> Option<String> {
    if tokens.is_empty() {
        return None;
    }
    let joined = tokens
        .iter()
        .map(|t| t.text.as_str())
        .collect::<Vec<_>>()
        .join(" ");
    non_empty(joined)
}

fn non_empty(text: String) -> Option<String> {
    if text.trim().is_empty() {
        None
    } else {
        Some(text)
    }
}
