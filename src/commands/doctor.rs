// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::TxKind;
use crate::utils::{pretty_table, DATETIME_FMT};
use anyhow::Result;
use rusqlite::Connection;
use rust_decimal::Decimal;

pub fn handle(conn: &Connection) -> Result<()> {
    let rows = issues(conn)?;
    if rows.is_empty() {
        println!("doctor: no issues found");
    } else {
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}

/// Diagnosis only; nothing is repaired. Orphaned references are a normal
/// consequence of category deletion and only excluded from breakdowns, but
/// they are worth knowing about.
pub fn issues(conn: &Connection) -> Result<Vec<Vec<String>>> {
    let mut rows = Vec::new();

    // 1) Transactions pointing at categories that no longer exist
    let mut stmt = conn.prepare(
        "SELECT t.id, t.category_id FROM transactions t
         WHERE t.category_id IS NOT NULL
           AND NOT EXISTS (
             SELECT 1 FROM categories c
             WHERE c.id = t.category_id AND c.user_id = t.user_id
           )
         ORDER BY t.id",
    )?;
    let mut cur = stmt.query([])?;
    while let Some(r) = cur.next()? {
        let id: i64 = r.get(0)?;
        let cat: i64 = r.get(1)?;
        rows.push(vec![
            "orphaned_category_ref".into(),
            format!("transaction {} -> category {}", id, cat),
        ]);
    }

    // 2) Rows that would fail to parse back out of the store
    let mut stmt2 = conn.prepare("SELECT id, date, type, amount FROM transactions ORDER BY id")?;
    let mut cur2 = stmt2.query([])?;
    while let Some(r) = cur2.next()? {
        let id: i64 = r.get(0)?;
        let date: String = r.get(1)?;
        let kind: String = r.get(2)?;
        let amount: String = r.get(3)?;

        if chrono::NaiveDateTime::parse_from_str(&date, DATETIME_FMT).is_err() {
            rows.push(vec![
                "bad_date".into(),
                format!("transaction {}: '{}'", id, date),
            ]);
        }
        if kind.parse::<TxKind>().is_err() {
            rows.push(vec![
                "unknown_type".into(),
                format!("transaction {}: '{}'", id, kind),
            ]);
        }
        match amount.parse::<Decimal>() {
            Err(_) => rows.push(vec![
                "bad_amount".into(),
                format!("transaction {}: '{}'", id, amount),
            ]),
            Ok(a) if a < Decimal::ZERO => rows.push(vec![
                "negative_amount".into(),
                format!("transaction {}: '{}'", id, amount),
            ]),
            Ok(_) => {}
        }
    }

    Ok(rows)
}
