// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime};
use comfy_table::{presets::UTF8_FULL, Cell, Table};
use once_cell::sync::Lazy;
use rusqlite::{params, Connection, OptionalExtension};
use rust_decimal::Decimal;
use std::collections::HashMap;

/// Storage format for transaction instants. ISO-8601, so lexicographic
/// comparison in SQL matches chronological order.
pub const DATETIME_FMT: &str = "%Y-%m-%d %H:%M:%S";

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s))
}

/// Accepts a full instant or a bare date (treated as midnight).
pub fn parse_datetime(s: &str) -> Result<NaiveDateTime> {
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, DATETIME_FMT) {
        return Ok(dt);
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M") {
        return Ok(dt);
    }
    let date = NaiveDate::parse_from_str(s, "%Y-%m-%d").with_context(|| {
        format!(
            "Invalid date '{}', expected YYYY-MM-DD or YYYY-MM-DD HH:MM[:SS]",
            s
        )
    })?;
    Ok(date.and_time(NaiveTime::MIN))
}

pub fn parse_decimal(s: &str) -> Result<Decimal> {
    s.parse::<Decimal>()
        .with_context(|| format!("Invalid decimal '{}'", s))
}

pub fn fmt_amount(d: &Decimal) -> String {
    format!("{:.2}", d.round_dp(2))
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // If v is an array, stream each element; else stream single line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}

/// Half-open `[start, end)` bounds of one calendar day.
pub fn day_bounds(date: NaiveDate) -> (NaiveDateTime, NaiveDateTime) {
    let start = date.and_time(NaiveTime::MIN);
    (start, start + Duration::days(1))
}

/// Half-open bounds of the ISO week (Monday through Sunday) containing `date`.
pub fn week_bounds(date: NaiveDate) -> (NaiveDateTime, NaiveDateTime) {
    let monday = date - Duration::days(date.weekday().num_days_from_monday() as i64);
    let start = monday.and_time(NaiveTime::MIN);
    (start, start + Duration::days(7))
}

/// Half-open bounds of a `YYYY-MM` calendar month.
pub fn month_bounds(month: &str) -> Result<(NaiveDateTime, NaiveDateTime)> {
    let first = NaiveDate::parse_from_str(&format!("{}-01", month), "%Y-%m-%d")
        .with_context(|| format!("Invalid month '{}', expected YYYY-MM", month))?;
    let (ny, nm) = if first.month() == 12 {
        (first.year() + 1, 1)
    } else {
        (first.year(), first.month() + 1)
    };
    let next = NaiveDate::from_ymd_opt(ny, nm, 1)
        .with_context(|| format!("Invalid month '{}'", month))?;
    Ok((first.and_time(NaiveTime::MIN), next.and_time(NaiveTime::MIN)))
}

/// Reporting window from CLI flags, when any were given. The clap definition
/// makes the window flags mutually exclusive and `--from`/`--to` paired.
pub fn window_from_matches(sub: &clap::ArgMatches) -> Result<Option<(NaiveDateTime, NaiveDateTime)>> {
    if let Ok(Some(d)) = sub.try_get_one::<String>("day") {
        return Ok(Some(day_bounds(parse_date(d)?)));
    }
    if let Ok(Some(d)) = sub.try_get_one::<String>("week") {
        return Ok(Some(week_bounds(parse_date(d)?)));
    }
    if let Ok(Some(m)) = sub.try_get_one::<String>("month") {
        return Ok(Some(month_bounds(m)?));
    }
    if let (Ok(Some(f)), Ok(Some(t))) = (
        sub.try_get_one::<String>("from"),
        sub.try_get_one::<String>("to"),
    ) {
        return Ok(Some((parse_datetime(f)?, parse_datetime(t)?)));
    }
    Ok(None)
}

/// Reports default to the current calendar month when no window flag is set.
pub fn window_or_current_month(sub: &clap::ArgMatches) -> Result<(NaiveDateTime, NaiveDateTime)> {
    if let Some(w) = window_from_matches(sub)? {
        return Ok(w);
    }
    let month = chrono::Local::now().format("%Y-%m").to_string();
    month_bounds(&month)
}

// Active profile: a plain user tag selecting whose rows the stores read.
// No credential semantics.
pub fn get_active_user(conn: &Connection) -> Result<String> {
    let v: Option<String> = conn
        .query_row(
            "SELECT value FROM settings WHERE key='active_user'",
            [],
            |r| r.get(0),
        )
        .optional()?;
    Ok(v.unwrap_or_else(|| "default".to_string()))
}

pub fn set_active_user(conn: &Connection, user: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO settings(key, value) VALUES('active_user', ?1)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value",
        params![user],
    )?;
    Ok(())
}

/// The user for a command: `--user` flag when given, active profile otherwise.
pub fn resolve_user(conn: &Connection, sub: &clap::ArgMatches) -> Result<String> {
    match sub.try_get_one::<String>("user") {
        Ok(Some(u)) => Ok(u.clone()),
        _ => get_active_user(conn),
    }
}

static ICON_GLYPHS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("food", "🍔"),
        ("groceries", "🛒"),
        ("transport", "🚌"),
        ("shopping", "🛍"),
        ("entertainment", "🎬"),
        ("health", "💊"),
        ("education", "📚"),
        ("bills", "🧾"),
        ("home", "🏠"),
        ("travel", "✈"),
        ("salary", "💼"),
        ("gift", "🎁"),
        ("investment", "📈"),
        ("tag", "🏷"),
    ])
});

/// Terminal glyph for a stored icon token. Unknown tokens get a neutral
/// fallback rather than an error; icon tokens are display hints, nothing
/// more.
pub fn icon_glyph(token: &str) -> &'static str {
    ICON_GLYPHS.get(token).copied().unwrap_or("•")
}
