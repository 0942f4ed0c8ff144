// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Read/write access to the ledger tables. Rows are stored as TEXT and
//! parsed on the way out with context naming the offending row, so a bad
//! row fails loudly instead of contributing garbage to a report.

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use rusqlite::{params, Connection, OptionalExtension};
use rust_decimal::Decimal;

use crate::models::{Category, Transaction, TxKind};
use crate::utils::DATETIME_FMT;

pub struct TransactionStore<'a> {
    conn: &'a Connection,
}

impl<'a> TransactionStore<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    pub fn insert(
        &self,
        user_id: &str,
        date: NaiveDateTime,
        kind: TxKind,
        amount: Decimal,
        category_id: Option<i64>,
        description: &str,
        notes: Option<&str>,
    ) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO transactions(user_id, date, type, amount, category_id, description, notes)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                user_id,
                date.format(DATETIME_FMT).to_string(),
                kind.as_str(),
                amount.to_string(),
                category_id,
                description,
                notes
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Transactions for one user within the half-open window `[start, end)`,
    /// ordered by date then id.
    pub fn get_by_date_range(
        &self,
        user_id: &str,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Vec<Transaction>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, user_id, date, type, amount, category_id, description, notes
             FROM transactions
             WHERE user_id=?1 AND date>=?2 AND date<?3
             ORDER BY date, id",
        )?;
        let rows = stmt.query_map(
            params![
                user_id,
                start.format(DATETIME_FMT).to_string(),
                end.format(DATETIME_FMT).to_string()
            ],
            |r| {
                Ok((
                    r.get::<_, i64>(0)?,
                    r.get::<_, String>(1)?,
                    r.get::<_, String>(2)?,
                    r.get::<_, String>(3)?,
                    r.get::<_, String>(4)?,
                    r.get::<_, Option<i64>>(5)?,
                    r.get::<_, String>(6)?,
                    r.get::<_, Option<String>>(7)?,
                ))
            },
        )?;

        let mut data = Vec::new();
        for row in rows {
            let (id, user_id, date_s, kind_s, amount_s, category_id, description, notes) = row?;
            data.push(Transaction {
                id,
                user_id,
                date: NaiveDateTime::parse_from_str(&date_s, DATETIME_FMT)
                    .with_context(|| format!("Invalid date '{}' in transaction {}", date_s, id))?,
                kind: kind_s
                    .parse::<TxKind>()
                    .with_context(|| format!("Invalid type in transaction {}", id))?,
                amount: amount_s.parse::<Decimal>().with_context(|| {
                    format!("Invalid amount '{}' in transaction {}", amount_s, id)
                })?,
                category_id,
                description,
                notes,
            });
        }
        Ok(data)
    }
}

pub struct CategoryStore<'a> {
    conn: &'a Connection,
}

impl<'a> CategoryStore<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    pub fn insert(
        &self,
        user_id: &str,
        name: &str,
        icon: &str,
        color: &str,
        kind: TxKind,
    ) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO categories(user_id, name, icon, color, type)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![user_id, name, icon, color, kind.as_str()],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// All categories for one user, in insertion (id) order. Stable order
    /// keeps breakdown color/icon resolution deterministic across runs.
    pub fn get_for_user(&self, user_id: &str) -> Result<Vec<Category>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, user_id, name, icon, color, type
             FROM categories WHERE user_id=?1 ORDER BY id",
        )?;
        let rows = stmt.query_map(params![user_id], |r| {
            Ok((
                r.get::<_, i64>(0)?,
                r.get::<_, String>(1)?,
                r.get::<_, String>(2)?,
                r.get::<_, String>(3)?,
                r.get::<_, String>(4)?,
                r.get::<_, String>(5)?,
            ))
        })?;

        let mut data = Vec::new();
        for row in rows {
            let (id, user_id, name, icon, color, kind_s) = row?;
            data.push(Category {
                id,
                user_id,
                name,
                icon,
                color,
                kind: kind_s
                    .parse::<TxKind>()
                    .with_context(|| format!("Invalid type in category {}", id))?,
            });
        }
        Ok(data)
    }

    /// First (lowest-id) category with the given name.
    pub fn id_by_name(&self, user_id: &str, name: &str) -> Result<i64> {
        let mut stmt = self
            .conn
            .prepare("SELECT id FROM categories WHERE user_id=?1 AND name=?2 ORDER BY id LIMIT 1")?;
        let id: Option<i64> = stmt
            .query_row(params![user_id, name], |r| r.get(0))
            .optional()?;
        id.with_context(|| format!("Category '{}' not found", name))
    }

    /// Removes every category with the given name. Transactions referencing
    /// them are left untouched; `doctor` will flag the dangling references.
    pub fn delete_by_name(&self, user_id: &str, name: &str) -> Result<usize> {
        let n = self.conn.execute(
            "DELETE FROM categories WHERE user_id=?1 AND name=?2",
            params![user_id, name],
        )?;
        Ok(n)
    }
}
