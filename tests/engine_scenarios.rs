//! End-to-end extraction scenarios through the public API.

use ledger_oxide::header::HeaderLayout;
use ledger_oxide::layout::{AmountStyle, DateShape, LayoutConfig};
use ledger_oxide::normalize;
use ledger_oxide::{Engine, PageTokens, Token};

fn tok(text: &str, x0: f32, x1: f32, top: f32) -> Token {
    Token::new(text, x0, x1, top)
}

fn base_layout() -> LayoutConfig {
    LayoutConfig::new(20.0, 30.0, 80.0, 250.0, 460.0, 200.0)
}

fn engine(layout: LayoutConfig) -> Engine {
    let _ = env_logger::builder().is_test(true).try_init();
    Engine::new(layout, HeaderLayout::default()).unwrap()
}

#[test]
fn three_token_row_produces_one_record() {
    let page = PageTokens::new(
        vec![
            tok("10/01/24", 25.0, 62.0, 100.0),
            tok("100.00", 150.0, 182.0, 101.0),
            tok("ABC", 260.0, 285.0, 102.0),
        ],
        842.0,
    );
    let extract = engine(base_layout()).extract_page(&page).unwrap();

    assert_eq!(extract.transactions.len(), 1);
    let record = &extract.transactions[0];
    assert_eq!(record.date, "10/01/24");
    assert_eq!(record.debit, Some(100.0));
    assert_eq!(record.credit, None);
    assert_eq!(record.description.as_deref(), Some("ABC"));
}

#[test]
fn zero_anchor_page_yields_zero_records() {
    let page = PageTokens::new(
        vec![
            tok("Account", 25.0, 70.0, 100.0),
            tok("Statement", 80.0, 140.0, 100.0),
            // Date-shaped but outside the date column.
            tok("10/01/24", 400.0, 440.0, 200.0),
        ],
        842.0,
    );
    let extract = engine(base_layout()).extract_page(&page).unwrap();
    assert!(extract.transactions.is_empty());
}

#[test]
fn debit_and_credit_never_both_set() {
    // Sweep one money token across the amount zone; whatever side it lands
    // on, the other stays empty.
    let eng = engine(base_layout());
    for x0 in [100, 140, 180, 210, 240] {
        let x0 = x0 as f32;
        let page = PageTokens::new(
            vec![
                tok("10/01/24", 25.0, 62.0, 100.0),
                tok("250.00", x0, x0 + 35.0, 101.0),
            ],
            842.0,
        );
        let extract = eng.extract_page(&page).unwrap();
        let record = &extract.transactions[0];
        assert!(
            record.debit.is_none() || record.credit.is_none(),
            "both sides set for x0={}",
            x0
        );
        assert!(record.debit.is_some() || record.credit.is_some());
    }
}

#[test]
fn footer_row_with_date_shape_still_excluded() {
    let layout = base_layout().with_footer_keywords(["TOTAL AMOUNTS"]);
    let page = PageTokens::new(
        vec![
            tok("10/01/24", 25.0, 62.0, 100.0),
            tok("100.00", 150.0, 182.0, 100.0),
            // Summary row carrying a date-shaped token in the date column:
            // would otherwise anchor a bogus row.
            tok("31/01/24", 25.0, 62.0, 130.0),
            tok("TOTAL AMOUNTS", 80.0, 180.0, 130.0),
            tok("100.00", 200.0, 235.0, 130.0),
        ],
        842.0,
    );
    let extract = engine(layout).extract_page(&page).unwrap();
    assert_eq!(extract.transactions.len(), 1);
    assert_eq!(extract.transactions[0].date, "10/01/24");
}

#[test]
fn signed_amount_layout_resolves_by_sign() {
    let layout = base_layout()
        .with_date_shape(DateShape::WordTriplet)
        .with_amount_style(AmountStyle::Signed);
    let page = PageTokens::new(
        vec![
            tok("1 ม.ค. 68", 22.0, 75.0, 100.0),
            tok("-500.00", 150.0, 190.0, 100.0),
            tok("2 ม.ค. 68", 22.0, 75.0, 130.0),
            tok("1,200.00", 150.0, 195.0, 130.0),
        ],
        842.0,
    );
    let extract = engine(layout).extract_page(&page).unwrap();
    assert_eq!(extract.transactions.len(), 2);
    assert_eq!(extract.transactions[0].debit, Some(500.0));
    assert_eq!(extract.transactions[0].credit, None);
    assert_eq!(extract.transactions[1].credit, Some(1200.0));
}

#[test]
fn buddhist_era_dates_normalize_when_enabled() {
    let layout = base_layout().with_normalize_dates(true);
    let page = PageTokens::new(
        vec![
            tok("01/01/2567", 25.0, 70.0, 100.0),
            tok("75.00", 150.0, 182.0, 100.0),
        ],
        842.0,
    );
    let extract = engine(layout).extract_page(&page).unwrap();
    assert_eq!(extract.transactions[0].date, "2024-01-01");
}

#[test]
fn money_and_date_parsing_edge_cases() {
    assert_eq!(normalize::parse_money("1,234.56"), Some(1234.56));
    assert_eq!(normalize::parse_money("(500.00)"), Some(-500.0));
    assert_eq!(normalize::parse_money(""), None);
    assert_eq!(normalize::normalize_date("01/01/2567"), "2024-01-01");
    assert_eq!(normalize::normalize_date("1 ม.ค. 68"), "2025-01-01");
    assert_eq!(normalize::normalize_date("1 Jan 23"), "2023-01-01");
}

#[test]
fn page_totals_match_emitted_records() {
    let page = PageTokens::new(
        vec![
            tok("10/01/24", 25.0, 62.0, 100.0),
            tok("100.00", 150.0, 182.0, 100.0),
            tok("11/01/24", 25.0, 62.0, 130.0),
            tok("2,000.00", 220.0, 260.0, 130.0),
            tok("12/01/24", 25.0, 62.0, 160.0),
            tok("50.00", 150.0, 178.0, 160.0),
        ],
        842.0,
    );
    let extract = engine(base_layout()).extract_page(&page).unwrap();
    assert_eq!(extract.totals.debit_count, 2);
    assert_eq!(extract.totals.credit_count, 1);
    assert!((extract.totals.debit_sum - 150.0).abs() < 1e-9);
    assert!((extract.totals.credit_sum - 2000.0).abs() < 1e-9);
}

#[test]
fn extraction_is_deterministic_across_input_order() {
    let mut tokens = vec![
        tok("10/01/24", 25.0, 62.0, 100.0),
        tok("X1", 50.0, 70.0, 100.0),
        tok("100.00", 150.0, 182.0, 101.0),
        tok("9,900.00", 300.0, 350.0, 101.0),
        tok("11/01/24", 25.0, 62.0, 130.0),
        tok("2,000.00", 220.0, 260.0, 130.0),
    ];
    let eng = engine(base_layout());
    let forward = eng
        .extract_page(&PageTokens::new(tokens.clone(), 842.0))
        .unwrap();
    tokens.reverse();
    let reversed = eng
        .extract_page(&PageTokens::new(tokens, 842.0))
        .unwrap();
    assert_eq!(forward, reversed);
}
