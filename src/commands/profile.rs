// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::utils::{get_active_user, set_active_user};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("use", sub)) => {
            let name = sub.get_one::<String>("name").unwrap();
            set_active_user(conn, name)?;
            println!("Active profile: {}", name);
        }
        Some(("show", _)) => {
            println!("{}", get_active_user(conn)?);
        }
        _ => {}
    }
    Ok(())
}
