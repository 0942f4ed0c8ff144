// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! The Home/Dashboard views: fetch the window from the stores, run the pure
//! aggregation, render. Every invocation recomputes from the current
//! snapshot; nothing is cached between calls.

use crate::analytics;
use crate::models::{Category, ChartSegment, SummaryStats, TopSpendingEntry, Transaction};
use crate::store::{CategoryStore, TransactionStore};
use crate::utils::{
    fmt_amount, icon_glyph, maybe_print_json, pretty_table, resolve_user, window_or_current_month,
};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("summary", sub)) => summary(conn, sub)?,
        Some(("spending", sub)) => spending(conn, sub)?,
        Some(("chart", sub)) => chart(conn, sub)?,
        _ => {}
    }
    Ok(())
}

/// Both inputs the engine needs: the transaction window and the user's
/// category set.
pub fn load_window(
    conn: &Connection,
    sub: &clap::ArgMatches,
) -> Result<(Vec<Transaction>, Vec<Category>)> {
    let user = resolve_user(conn, sub)?;
    let (start, end) = window_or_current_month(sub)?;
    let transactions = TransactionStore::new(conn).get_by_date_range(&user, start, end)?;
    let categories = CategoryStore::new(conn).get_for_user(&user)?;
    Ok((transactions, categories))
}

pub fn summary_for(conn: &Connection, sub: &clap::ArgMatches) -> Result<SummaryStats> {
    let (transactions, _) = load_window(conn, sub)?;
    Ok(analytics::summary_stats(&transactions))
}

fn summary(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let stats = summary_for(conn, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &stats)? {
        let rows = vec![
            vec!["Income".into(), fmt_amount(&stats.total_income)],
            vec!["Expense".into(), fmt_amount(&stats.total_expense)],
            vec!["Balance".into(), fmt_amount(&stats.balance)],
            vec!["Transactions".into(), stats.transaction_count.to_string()],
        ];
        println!("{}", pretty_table(&["", "Amount"], rows));
    }
    Ok(())
}

pub fn spending_for(conn: &Connection, sub: &clap::ArgMatches) -> Result<Vec<TopSpendingEntry>> {
    let (transactions, categories) = load_window(conn, sub)?;
    let stats = analytics::summary_stats(&transactions);
    let breakdown = analytics::category_breakdown(&transactions, &categories);
    let limit = *sub
        .get_one::<usize>("limit")
        .unwrap_or(&analytics::TOP_SPENDING_LIMIT);
    Ok(analytics::top_spending(
        &breakdown,
        stats.total_expense,
        limit,
    ))
}

fn spending(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let top = spending_for(conn, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &top)? {
        let rows = top
            .iter()
            .map(|e| {
                vec![
                    icon_glyph(&e.icon).to_string(),
                    e.name.clone(),
                    fmt_amount(&e.total),
                    format!("{}%", e.percent),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["", "Category", "Spent", "% of expense"], rows)
        );
    }
    Ok(())
}

pub fn chart_for(conn: &Connection, sub: &clap::ArgMatches) -> Result<Vec<ChartSegment>> {
    let (transactions, categories) = load_window(conn, sub)?;
    let stats = analytics::summary_stats(&transactions);
    let breakdown = analytics::category_breakdown(&transactions, &categories);
    let diameter = *sub
        .get_one::<f64>("diameter")
        .unwrap_or(&analytics::CHART_DIAMETER);
    let stroke = *sub
        .get_one::<f64>("stroke")
        .unwrap_or(&analytics::CHART_STROKE_WIDTH);
    Ok(analytics::chart_segments(
        &breakdown,
        stats.total_expense,
        diameter,
        stroke,
    ))
}

fn chart(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let segments = chart_for(conn, sub)?;
    if segments.is_empty() {
        println!("Nothing spent in this window; no chart to draw.");
        return Ok(());
    }
    if !maybe_print_json(json_flag, jsonl_flag, &segments)? {
        let rows = segments
            .iter()
            .map(|s| {
                vec![
                    s.name.clone(),
                    s.color.clone(),
                    format!("{:.1}%", s.fraction * 100.0),
                    format!("{:.2}", s.arc_length),
                    format!("{:.2}", s.arc_offset),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Category", "Color", "Share", "Arc length", "Arc offset"],
                rows
            )
        );
    }
    Ok(())
}
