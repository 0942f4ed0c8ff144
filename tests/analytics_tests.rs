// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use pocketclip::analytics::{
    category_breakdown, chart_segments, summary_stats, top_spending, TOP_SPENDING_LIMIT,
};
use pocketclip::models::{Category, Transaction, TxKind};
use rust_decimal::Decimal;

fn d(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn tx(id: i64, kind: TxKind, amount: &str, category_id: Option<i64>) -> Transaction {
    Transaction {
        id,
        user_id: "u1".into(),
        date: NaiveDate::from_ymd_opt(2025, 8, 15)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap(),
        kind,
        amount: d(amount),
        category_id,
        description: String::new(),
        notes: None,
    }
}

fn cat(id: i64, name: &str, color: &str, icon: &str) -> Category {
    Category {
        id,
        user_id: "u1".into(),
        name: name.into(),
        icon: icon.into(),
        color: color.into(),
        kind: TxKind::Expense,
    }
}

#[test]
fn balance_is_income_minus_expense() {
    let txs = vec![
        tx(1, TxKind::Income, "1200.50", None),
        tx(2, TxKind::Expense, "300.25", Some(1)),
        tx(3, TxKind::Expense, "99.99", None),
        tx(4, TxKind::Income, "10", Some(2)),
    ];
    let stats = summary_stats(&txs);
    assert_eq!(stats.total_income, d("1210.50"));
    assert_eq!(stats.total_expense, d("400.24"));
    assert_eq!(stats.balance, stats.total_income - stats.total_expense);
    assert_eq!(stats.transaction_count, 4);
}

#[test]
fn empty_input_yields_all_zero() {
    let stats = summary_stats(&[]);
    assert_eq!(stats.total_income, Decimal::ZERO);
    assert_eq!(stats.total_expense, Decimal::ZERO);
    assert_eq!(stats.balance, Decimal::ZERO);
    assert_eq!(stats.transaction_count, 0);
}

#[test]
fn all_expense_window_has_negative_balance() {
    let txs = vec![
        tx(1, TxKind::Expense, "40", Some(1)),
        tx(2, TxKind::Expense, "60", Some(1)),
    ];
    let stats = summary_stats(&txs);
    assert_eq!(stats.total_income, Decimal::ZERO);
    assert_eq!(stats.balance, d("-100"));
    assert_eq!(stats.transaction_count, 2);
}

#[test]
fn concrete_home_screen_scenario() {
    // expenses 100 + 50 on Food, income 500 on Salary
    let cats = vec![cat(1, "Food", "#FF7043", "food"), {
        let mut c = cat(2, "Salary", "#43A047", "salary");
        c.kind = TxKind::Income;
        c
    }];
    let txs = vec![
        tx(1, TxKind::Expense, "100", Some(1)),
        tx(2, TxKind::Expense, "50", Some(1)),
        tx(3, TxKind::Income, "500", Some(2)),
    ];

    let stats = summary_stats(&txs);
    assert_eq!(stats.total_income, d("500"));
    assert_eq!(stats.total_expense, d("150"));
    assert_eq!(stats.balance, d("350"));
    assert_eq!(stats.transaction_count, 3);

    let breakdown = category_breakdown(&txs, &cats);
    assert_eq!(breakdown.len(), 1);
    assert_eq!(breakdown[0].name, "Food");
    assert_eq!(breakdown[0].total, d("150"));

    let top = top_spending(&breakdown, stats.total_expense, TOP_SPENDING_LIMIT);
    assert_eq!(top.len(), 1);
    assert_eq!(top[0].name, "Food");
    assert_eq!(top[0].total, d("150"));
    assert_eq!(top[0].percent, 100);
}

#[test]
fn same_named_categories_conflate() {
    // Two distinct categories both displayed as "Other" merge into one entry,
    // and the last-resolved record's color/icon win.
    let cats = vec![
        cat(1, "Other", "#111111", "tag"),
        cat(2, "Other", "#222222", "gift"),
    ];
    let txs = vec![
        tx(1, TxKind::Expense, "10", Some(1)),
        tx(2, TxKind::Expense, "10", Some(2)),
    ];
    let breakdown = category_breakdown(&txs, &cats);
    assert_eq!(breakdown.len(), 1);
    assert_eq!(breakdown[0].name, "Other");
    assert_eq!(breakdown[0].total, d("20"));
    assert_eq!(breakdown[0].color, "#222222");
    assert_eq!(breakdown[0].icon, "gift");
}

#[test]
fn orphaned_reference_counts_toward_totals_only() {
    let cats = vec![cat(1, "Food", "#FF7043", "food")];
    let txs = vec![
        tx(1, TxKind::Expense, "30", Some(1)),
        // category 99 does not exist
        tx(2, TxKind::Expense, "70", Some(99)),
        tx(3, TxKind::Expense, "5", None),
    ];
    let stats = summary_stats(&txs);
    assert_eq!(stats.total_expense, d("105"));

    let breakdown = category_breakdown(&txs, &cats);
    assert_eq!(breakdown.len(), 1);
    assert_eq!(breakdown[0].total, d("30"));

    let top = top_spending(&breakdown, stats.total_expense, TOP_SPENDING_LIMIT);
    assert!(top.iter().all(|e| e.name == "Food"));
}

#[test]
fn breakdown_preserves_first_occurrence_order() {
    let cats = vec![
        cat(1, "Food", "#1", "food"),
        cat(2, "Transport", "#2", "transport"),
        cat(3, "Bills", "#3", "bills"),
    ];
    let txs = vec![
        tx(1, TxKind::Expense, "5", Some(2)),
        tx(2, TxKind::Expense, "5", Some(1)),
        tx(3, TxKind::Expense, "5", Some(3)),
        tx(4, TxKind::Expense, "5", Some(2)),
    ];
    let breakdown = category_breakdown(&txs, &cats);
    let names: Vec<&str> = breakdown.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["Transport", "Food", "Bills"]);
}

#[test]
fn top_spending_is_bounded_and_ranked() {
    let cats: Vec<Category> = (1..=7)
        .map(|i| cat(i, &format!("C{}", i), "#000000", "tag"))
        .collect();
    let txs: Vec<Transaction> = (1..=7)
        .map(|i| tx(i, TxKind::Expense, &format!("{}", i * 10), Some(i)))
        .collect();
    let stats = summary_stats(&txs);
    let breakdown = category_breakdown(&txs, &cats);
    assert_eq!(breakdown.len(), 7);

    let top = top_spending(&breakdown, stats.total_expense, TOP_SPENDING_LIMIT);
    assert_eq!(top.len(), 5);
    assert_eq!(top[0].name, "C7");
    assert_eq!(top[0].total, d("70"));
    assert_eq!(top[4].name, "C3");

    let three = top_spending(&breakdown[..3], stats.total_expense, TOP_SPENDING_LIMIT);
    assert_eq!(three.len(), 3);
}

#[test]
fn top_spending_ties_keep_breakdown_order() {
    let cats = vec![
        cat(1, "Alpha", "#1", "tag"),
        cat(2, "Beta", "#2", "tag"),
        cat(3, "Gamma", "#3", "tag"),
    ];
    let txs = vec![
        tx(1, TxKind::Expense, "20", Some(1)),
        tx(2, TxKind::Expense, "20", Some(2)),
        tx(3, TxKind::Expense, "50", Some(3)),
    ];
    let stats = summary_stats(&txs);
    let breakdown = category_breakdown(&txs, &cats);
    let top = top_spending(&breakdown, stats.total_expense, TOP_SPENDING_LIMIT);
    let names: Vec<&str> = top.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["Gamma", "Alpha", "Beta"]);
}

#[test]
fn percentages_round_halves_up() {
    let cats = vec![cat(1, "Small", "#1", "tag"), cat(2, "Large", "#2", "tag")];
    let txs = vec![
        tx(1, TxKind::Expense, "25", Some(1)),
        tx(2, TxKind::Expense, "175", Some(2)),
    ];
    let stats = summary_stats(&txs);
    let breakdown = category_breakdown(&txs, &cats);
    let top = top_spending(&breakdown, stats.total_expense, TOP_SPENDING_LIMIT);
    // 175/200 = 87.5% -> 88, 25/200 = 12.5% -> 13; sums past 100 by design
    assert_eq!(top[0].percent, 88);
    assert_eq!(top[1].percent, 13);
}

#[test]
fn zero_total_expense_yields_zero_percent() {
    let breakdown = vec![];
    let top = top_spending(&breakdown, Decimal::ZERO, TOP_SPENDING_LIMIT);
    assert!(top.is_empty());
}

#[test]
fn chart_arcs_partition_the_circle() {
    let cats = vec![
        cat(1, "Food", "#1", "food"),
        cat(2, "Transport", "#2", "transport"),
        cat(3, "Bills", "#3", "bills"),
    ];
    let txs = vec![
        tx(1, TxKind::Expense, "50", Some(1)),
        tx(2, TxKind::Expense, "30", Some(2)),
        tx(3, TxKind::Expense, "20", Some(3)),
    ];
    let stats = summary_stats(&txs);
    let breakdown = category_breakdown(&txs, &cats);

    let diameter = 220.0;
    let stroke = 30.0;
    let segments = chart_segments(&breakdown, stats.total_expense, diameter, stroke);
    assert_eq!(segments.len(), 3);

    let radius = (diameter - stroke) / 2.0;
    let circumference = 2.0 * std::f64::consts::PI * radius;

    let arc_sum: f64 = segments.iter().map(|s| s.arc_length).sum();
    assert!((arc_sum - circumference).abs() / circumference < 1e-9);

    let fraction_sum: f64 = segments.iter().map(|s| s.fraction).sum();
    assert!((fraction_sum - 1.0).abs() < 1e-9);

    // Each offset is the running sum of the preceding arc lengths
    assert_eq!(segments[0].arc_offset, 0.0);
    let mut running = 0.0;
    for s in &segments {
        assert!((s.arc_offset - running).abs() < 1e-9);
        running += s.arc_length;
    }
}

#[test]
fn chart_is_empty_when_nothing_spent() {
    let segments = chart_segments(&[], Decimal::ZERO, 220.0, 30.0);
    assert!(segments.is_empty());
}
