// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Pure aggregation over a window of transactions. No I/O, no state: callers
//! fetch the window and the category set from the stores, pass both in, and
//! render whatever comes back.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use std::collections::HashMap;

use crate::models::{
    Category, CategoryBreakdownEntry, ChartSegment, SummaryStats, TopSpendingEntry, Transaction,
    TxKind,
};

/// Default number of entries in the top-spending list.
pub const TOP_SPENDING_LIMIT: usize = 5;

/// Default donut chart visuals, overridable from the CLI.
pub const CHART_DIAMETER: f64 = 220.0;
pub const CHART_STROKE_WIDTH: f64 = 30.0;

/// Income/expense totals and balance over a window.
///
/// `transaction_count` is the length of the input, not of either partition.
pub fn summary_stats(transactions: &[Transaction]) -> SummaryStats {
    let mut total_income = Decimal::ZERO;
    let mut total_expense = Decimal::ZERO;
    for t in transactions {
        match t.kind {
            TxKind::Income => total_income += t.amount,
            TxKind::Expense => total_expense += t.amount,
        }
    }
    SummaryStats {
        total_income,
        total_expense,
        balance: total_income - total_expense,
        transaction_count: transactions.len(),
    }
}

/// Per-category expense totals, keyed by category display *name*.
///
/// Two categories sharing a name are conflated into one entry, and the
/// last-resolved record's color and icon win; the upstream ledger behaves
/// this way and the reports preserve it. Expense transactions whose
/// `category_id` matches no category are dropped here (they still count
/// toward the overall expense total). Entries come out in first-occurrence
/// order.
pub fn category_breakdown(
    transactions: &[Transaction],
    categories: &[Category],
) -> Vec<CategoryBreakdownEntry> {
    let by_id: HashMap<i64, &Category> = categories.iter().map(|c| (c.id, c)).collect();

    let mut slot: HashMap<String, usize> = HashMap::new();
    let mut entries: Vec<CategoryBreakdownEntry> = Vec::new();

    for t in transactions.iter().filter(|t| t.kind == TxKind::Expense) {
        let Some(cat) = t.category_id.and_then(|id| by_id.get(&id)) else {
            continue;
        };
        match slot.get(cat.name.as_str()) {
            Some(&i) => {
                entries[i].total += t.amount;
                entries[i].color = cat.color.clone();
                entries[i].icon = cat.icon.clone();
            }
            None => {
                slot.insert(cat.name.clone(), entries.len());
                entries.push(CategoryBreakdownEntry {
                    name: cat.name.clone(),
                    total: t.amount,
                    color: cat.color.clone(),
                    icon: cat.icon.clone(),
                });
            }
        }
    }
    entries
}

/// Ranks the breakdown by amount spent and annotates each entry with its
/// share of the overall expense total.
///
/// The sort is stable, so entries with equal totals keep their breakdown
/// order. Percentages are rounded independently per entry and need not sum
/// to 100.
pub fn top_spending(
    breakdown: &[CategoryBreakdownEntry],
    total_expense: Decimal,
    limit: usize,
) -> Vec<TopSpendingEntry> {
    let mut ranked: Vec<TopSpendingEntry> = breakdown
        .iter()
        .map(|e| TopSpendingEntry {
            name: e.name.clone(),
            total: e.total,
            percent: percent_of(e.total, total_expense),
            color: e.color.clone(),
            icon: e.icon.clone(),
        })
        .collect();
    ranked.sort_by(|a, b| b.total.cmp(&a.total));
    ranked.truncate(limit);
    ranked
}

/// Nearest-integer share of `whole`, rounding halves up. Zero when `whole`
/// is zero.
fn percent_of(part: Decimal, whole: Decimal) -> u32 {
    if whole <= Decimal::ZERO {
        return 0;
    }
    (part * Decimal::ONE_HUNDRED / whole)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_u32()
        .unwrap_or(0)
}

/// Arc geometry for a proportional donut chart.
///
/// Each segment starts at the running sum of the preceding arc lengths, so
/// segments never overlap and together cover the circle exactly once (up to
/// float rounding) when the entry totals sum to `total_spent`. A zero or
/// negative `total_spent` means there is nothing to draw; the result is
/// empty.
pub fn chart_segments(
    breakdown: &[CategoryBreakdownEntry],
    total_spent: Decimal,
    diameter: f64,
    stroke_width: f64,
) -> Vec<ChartSegment> {
    if total_spent <= Decimal::ZERO {
        return Vec::new();
    }
    let total = match total_spent.to_f64() {
        Some(v) if v > 0.0 => v,
        _ => return Vec::new(),
    };
    let radius = (diameter - stroke_width) / 2.0;
    let circumference = 2.0 * std::f64::consts::PI * radius;

    let mut arc_offset = 0.0;
    let mut segments = Vec::with_capacity(breakdown.len());
    for e in breakdown {
        let fraction = e.total.to_f64().unwrap_or(0.0) / total;
        let arc_length = fraction * circumference;
        segments.push(ChartSegment {
            name: e.name.clone(),
            color: e.color.clone(),
            fraction,
            arc_length,
            arc_offset,
        });
        arc_offset += arc_length;
    }
    segments
}
