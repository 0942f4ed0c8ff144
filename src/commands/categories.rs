// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::TxKind;
use crate::store::CategoryStore;
use crate::utils::{icon_glyph, maybe_print_json, pretty_table, resolve_user};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let user = resolve_user(conn, sub)?;
            let name = sub.get_one::<String>("name").unwrap();
            let kind: TxKind = sub.get_one::<String>("type").unwrap().parse()?;
            let icon = sub.get_one::<String>("icon").unwrap();
            let color = sub.get_one::<String>("color").unwrap();
            CategoryStore::new(conn).insert(&user, name, icon, color, kind)?;
            println!("Added {} category '{}'", kind, name);
        }
        Some(("list", sub)) => {
            let user = resolve_user(conn, sub)?;
            let cats = CategoryStore::new(conn).get_for_user(&user)?;
            let json_flag = sub.get_flag("json");
            let jsonl_flag = sub.get_flag("jsonl");
            if !maybe_print_json(json_flag, jsonl_flag, &cats)? {
                let rows = cats
                    .iter()
                    .map(|c| {
                        vec![
                            icon_glyph(&c.icon).to_string(),
                            c.name.clone(),
                            c.kind.to_string(),
                            c.color.clone(),
                        ]
                    })
                    .collect();
                println!("{}", pretty_table(&["", "Category", "Type", "Color"], rows));
            }
        }
        Some(("rm", sub)) => {
            let user = resolve_user(conn, sub)?;
            let name = sub.get_one::<String>("name").unwrap();
            let n = CategoryStore::new(conn).delete_by_name(&user, name)?;
            println!("Removed {} category record(s) named '{}'", n, name);
        }
        _ => {}
    }
    Ok(())
}
