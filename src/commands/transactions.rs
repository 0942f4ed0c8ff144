// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::TxKind;
use crate::store::{CategoryStore, TransactionStore};
use crate::utils::{
    maybe_print_json, parse_datetime, parse_decimal, pretty_table, resolve_user,
    window_from_matches, DATETIME_FMT,
};
use anyhow::{bail, Result};
use rusqlite::Connection;
use serde::Serialize;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let user = resolve_user(conn, sub)?;
    let kind: TxKind = sub.get_one::<String>("type").unwrap().parse()?;
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
    if amount.is_sign_negative() {
        bail!("Amount must be non-negative; direction is carried by --type");
    }
    let date = match sub.get_one::<String>("date") {
        Some(s) => parse_datetime(s)?,
        None => chrono::Local::now().naive_local(),
    };
    let description = sub
        .get_one::<String>("desc")
        .cloned()
        .unwrap_or_default();
    let notes = sub.get_one::<String>("notes").map(|s| s.as_str());

    let category_id = match sub.get_one::<String>("category") {
        Some(name) => Some(CategoryStore::new(conn).id_by_name(&user, name)?),
        None => None,
    };

    TransactionStore::new(conn).insert(
        &user,
        date,
        kind,
        amount,
        category_id,
        &description,
        notes,
    )?;
    println!(
        "Recorded {} of {} on {}",
        kind,
        amount,
        date.format(DATETIME_FMT)
    );
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(conn, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.date.clone(),
                    r.r#type.clone(),
                    r.amount.clone(),
                    r.category.clone(),
                    r.description.clone(),
                    r.notes.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Date", "Type", "Amount", "Category", "Description", "Notes"],
                rows,
            )
        );
    }
    Ok(())
}

#[derive(Serialize)]
pub struct TransactionRow {
    pub date: String,
    pub r#type: String,
    pub amount: String,
    pub category: String,
    pub description: String,
    pub notes: String,
}

pub fn query_rows(conn: &Connection, sub: &clap::ArgMatches) -> Result<Vec<TransactionRow>> {
    let user = resolve_user(conn, sub)?;
    let mut sql = String::from(
        "SELECT t.date, t.type, t.amount, c.name, t.description, t.notes
         FROM transactions t
         LEFT JOIN categories c ON t.category_id=c.id AND c.user_id=t.user_id
         WHERE t.user_id=?",
    );
    let mut params_vec: Vec<String> = vec![user];

    if let Some((start, end)) = window_from_matches(sub)? {
        sql.push_str(" AND t.date>=? AND t.date<?");
        params_vec.push(start.format(DATETIME_FMT).to_string());
        params_vec.push(end.format(DATETIME_FMT).to_string());
    }
    if let Some(cat) = sub.get_one::<String>("category") {
        sql.push_str(" AND c.name=?");
        params_vec.push(cat.into());
    }
    if let Some(kind) = sub.get_one::<String>("type") {
        sql.push_str(" AND t.type=?");
        params_vec.push(kind.into());
    }
    sql.push_str(" ORDER BY t.date DESC, t.id DESC");
    if let Some(limit) = sub.get_one::<usize>("limit") {
        sql.push_str(" LIMIT ?");
        params_vec.push(limit.to_string());
    }

    let mut stmt = conn.prepare(&sql)?;
    let params: Vec<&dyn rusqlite::ToSql> = params_vec
        .iter()
        .map(|s| s as &dyn rusqlite::ToSql)
        .collect();
    let mut rows = stmt.query(rusqlite::params_from_iter(params))?;

    let mut data = Vec::new();
    while let Some(r) = rows.next()? {
        let date: String = r.get(0)?;
        let kind: String = r.get(1)?;
        let amount: String = r.get(2)?;
        let category: Option<String> = r.get(3)?;
        let description: String = r.get(4)?;
        let notes: Option<String> = r.get(5)?;
        data.push(TransactionRow {
            date,
            r#type: kind,
            amount,
            category: category.unwrap_or_else(|| "(uncategorized)".into()),
            description,
            notes: notes.unwrap_or_default(),
        });
    }
    Ok(data)
}
