// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Direction of a money movement. The amount itself is always non-negative;
/// sign is carried here, never by the number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TxKind {
    Income,
    Expense,
}

#[derive(Debug, thiserror::Error)]
#[error("unknown transaction type '{0}', expected 'income' or 'expense'")]
pub struct ParseTxKindError(String);

impl FromStr for TxKind {
    type Err = ParseTxKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "income" => Ok(TxKind::Income),
            "expense" => Ok(TxKind::Expense),
            other => Err(ParseTxKindError(other.to_string())),
        }
    }
}

impl TxKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TxKind::Income => "income",
            TxKind::Expense => "expense",
        }
    }
}

impl fmt::Display for TxKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub user_id: String,
    pub date: NaiveDateTime,
    pub kind: TxKind,
    pub amount: Decimal,
    /// May reference a category that no longer exists; the store does not
    /// enforce referential integrity, matching the remote document store
    /// this ledger mirrors.
    pub category_id: Option<i64>,
    pub description: String,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub user_id: String,
    pub name: String,
    pub icon: String,
    pub color: String,
    pub kind: TxKind,
}

/// Totals for one reporting window. Recomputed from scratch on every call,
/// never cached.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryStats {
    pub total_income: Decimal,
    pub total_expense: Decimal,
    pub balance: Decimal,
    pub transaction_count: usize,
}

/// Spend accumulated under one category display name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryBreakdownEntry {
    pub name: String,
    pub total: Decimal,
    pub color: String,
    pub icon: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopSpendingEntry {
    pub name: String,
    pub total: Decimal,
    pub percent: u32,
    pub color: String,
    pub icon: String,
}

/// One arc of the donut chart. The core computes these; the renderer just
/// draws them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSegment {
    pub name: String,
    pub color: String,
    pub fraction: f64,
    pub arc_length: f64,
    pub arc_offset: f64,
}
