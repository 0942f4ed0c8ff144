// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::utils::{pretty_table, resolve_user};
use anyhow::{bail, Result};
use rusqlite::{params, Connection};
use serde_json::json;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("transactions", sub)) => export_transactions(conn, sub),
        _ => Ok(()),
    }
}

fn export_transactions(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub.get_one::<String>("format").unwrap().to_lowercase();
    let out = sub.get_one::<String>("out").unwrap();
    let user = resolve_user(conn, sub)?;

    let mut stmt = conn.prepare(
        "SELECT t.date, t.type, t.amount, c.name as category, t.description, t.notes
         FROM transactions t
         LEFT JOIN categories c ON t.category_id=c.id AND c.user_id=t.user_id
         WHERE t.user_id=?1
         ORDER BY t.date, t.id",
    )?;
    let rows = stmt.query_map(params![user], |r| {
        Ok((
            r.get::<_, String>(0)?,
            r.get::<_, String>(1)?,
            r.get::<_, String>(2)?,
            r.get::<_, Option<String>>(3)?,
            r.get::<_, String>(4)?,
            r.get::<_, Option<String>>(5)?,
        ))
    })?;

    match fmt.as_str() {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)?;
            wtr.write_record(["date", "type", "amount", "category", "description", "notes"])?;
            for row in rows {
                let (d, k, amt, cat, desc, notes) = row?;
                wtr.write_record([
                    d,
                    k,
                    amt,
                    cat.unwrap_or_default(),
                    desc,
                    notes.unwrap_or_default(),
                ])?;
            }
            wtr.flush()?;
        }
        "json" => {
            let mut items = Vec::new();
            for row in rows {
                let (d, k, amt, cat, desc, notes) = row?;
                items.push(json!({
                    "date": d, "type": k, "amount": amt, "category": cat,
                    "description": desc, "notes": notes
                }));
            }
            std::fs::write(out, serde_json::to_string_pretty(&items)?)?;
        }
        "html" => {
            let mut body = String::new();
            for row in rows {
                let (d, k, amt, cat, desc, notes) = row?;
                body.push_str(&format!(
                    "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
                    escape_html(&d),
                    escape_html(&k),
                    escape_html(&amt),
                    escape_html(&cat.unwrap_or_default()),
                    escape_html(&desc),
                    escape_html(&notes.unwrap_or_default()),
                ));
            }
            let doc = format!(
                "<!DOCTYPE html>\n<html><head><meta charset=\"utf-8\">\
                 <title>Pocketclip transactions</title></head><body>\n\
                 <table border=\"1\">\n<tr><th>Date</th><th>Type</th><th>Amount</th>\
                 <th>Category</th><th>Description</th><th>Notes</th></tr>\n{}</table>\n\
                 </body></html>\n",
                body
            );
            std::fs::write(out, doc)?;
        }
        "text" => {
            let mut data = Vec::new();
            for row in rows {
                let (d, k, amt, cat, desc, notes) = row?;
                data.push(vec![
                    d,
                    k,
                    amt,
                    cat.unwrap_or_default(),
                    desc,
                    notes.unwrap_or_default(),
                ]);
            }
            let table = pretty_table(
                &["Date", "Type", "Amount", "Category", "Description", "Notes"],
                data,
            );
            std::fs::write(out, format!("{}\n", table))?;
        }
        _ => {
            bail!("Unknown format: {} (use csv|json|html|text)", fmt);
        }
    }
    println!("Exported transactions to {}", out);
    Ok(())
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}
