//! Column assignment: which semantic column does a token belong to?
//!
//! The policy is a fixed priority cascade. Shape wins before position: a
//! money-shaped token is routed by x into the amount or balance bucket
//! before the generic text thresholds are consulted, because numeric
//! strings would otherwise land in a text column by position alone.

use crate::classify::content;
use crate::layout::config::{DateShape, LayoutConfig};
use crate::token::Token;

/// Semantic column of a classified token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    /// Row-anchoring date
    Date,
    /// Transaction time
    Time,
    /// Debit/credit candidate (side resolved by the assembler)
    Amount,
    /// Balance candidate
    Balance,
    /// Transaction code
    Code,
    /// Channel
    Channel,
    /// Free-text description
    Description,
}

/// One row's tokens, bucketed by column.
///
/// Text buckets preserve reading order (the row is sorted by `(top, x0)`
/// before bucketing).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RowBuckets {
    /// The anchoring date token, first match wins
    pub date: Option<Token>,
    /// The time token, first match wins
    pub time: Option<Token>,
    /// Money tokens in the debit/credit zone
    pub amounts: Vec<Token>,
    /// Money tokens in the balance zone
    pub balances: Vec<Token>,
    /// Code-column text tokens
    pub code: Vec<Token>,
    /// Channel-column text tokens
    pub channel: Vec<Token>,
    /// Description text tokens
    pub description: Vec<Token>,
}

/// Classify a single token against the layout.
///
/// Pure and deterministic; [`classify_row`] adds the stateful parts
/// (first-date-wins, fused-date splitting). Money right of every configured
/// boundary returns `None` and is dropped as stray.
pub fn classify_token(token: &Token, config: &LayoutConfig) -> Option<Column> {
    if config.is_date_anchor(token) {
        return Some(Column::Date);
    }
    if content::is_time(&token.text) {
        return Some(Column::Time);
    }
    if content::is_money(&token.text) {
        return classify_money(token.x0, config);
    }
    Some(classify_text(token.x0, config))
}

fn classify_money(x0: f32, config: &LayoutConfig) -> Option<Column> {
    if x0 <= config.channel_amount_split + config.x_tolerance {
        Some(Column::Amount)
    } else if x0 <= config.amount_balance_split + config.x_tolerance {
        Some(Column::Balance)
    } else {
        None
    }
}

fn classify_text(x0: f32, config: &LayoutConfig) -> Column {
    if x0 <= config.code_channel_split + config.x_tolerance {
        Column::Code
    } else if x0 <= config.channel_amount_split + config.x_tolerance {
        Column::Channel
    } else {
        Column::Description
    }
}

/// Classify a row's tokens into buckets.
///
/// The row is sorted by `(top, x0)` first so every text bucket is filled in
/// reading order. The first date anchor wins; further date-shaped tokens in
/// the date column are dropped. When the layout fuses the date with the
/// first description word, the non-date remainder is split off and
/// reclassified as text at the same position.
pub fn classify_row(row: &[Token], config: &LayoutConfig) -> RowBuckets {
    let mut sorted: Vec<Token> = row.to_vec();
    sorted.sort_by(|a, b| {
        a.top
            .total_cmp(&b.top)
            .then_with(|| a.x0.total_cmp(&b.x0))
    });

    let mut buckets = RowBuckets::default();
    for token in sorted {
        match classify_token(&token, config) {
            Some(Column::Date) => place_date(token, config, &mut buckets),
            Some(Column::Time) => {
                if buckets.time.is_none() {
                    buckets.time = Some(token);
                }
            }
            Some(Column::Amount) => buckets.amounts.push(token),
            Some(Column::Balance) => buckets.balances.push(token),
            Some(Column::Code) => buckets.code.push(token),
            Some(Column::Channel) => buckets.channel.push(token),
            Some(Column::Description) => buckets.description.push(token),
            None => log::debug!("stray money token dropped: {:?}", token.text),
        }
    }
    buckets
}

fn place_date(token: Token, config: &LayoutConfig, buckets: &mut RowBuckets) {
    if buckets.date.is_some() {
        return;
    }

    let fused = config.split_date_remainder && config.date_shape == DateShape::Numeric;
    if fused {
        if let Some((date, remainder)) = content::split_date_prefix(&token.text) {
            if !remainder.is_empty() {
                let rest = Token::new(remainder, token.x0, token.x1, token.top);
                let date_token = Token::new(date, token.x0, token.x1, token.top);
                buckets.date = Some(date_token);
                match classify_text(rest.x0, config) {
                    Column::Code => buckets.code.push(rest),
                    Column::Channel => buckets.channel.push(rest),
                    _ => buckets.description.push(rest),
                }
                return;
            }
        }
    }
    buckets.date = Some(token);
}
