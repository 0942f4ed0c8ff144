// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use pocketclip::commands::doctor;
use rusqlite::Connection;

fn setup() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        r#"
        CREATE TABLE settings(key TEXT PRIMARY KEY, value TEXT NOT NULL);
        CREATE TABLE categories(
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id TEXT NOT NULL,
            name TEXT NOT NULL,
            icon TEXT NOT NULL DEFAULT 'tag',
            color TEXT NOT NULL DEFAULT '#9E9E9E',
            type TEXT NOT NULL
        );
        CREATE TABLE transactions(
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id TEXT NOT NULL,
            date TEXT NOT NULL,
            type TEXT NOT NULL,
            amount TEXT NOT NULL,
            category_id INTEGER,
            description TEXT NOT NULL DEFAULT '',
            notes TEXT
        );
        "#,
    )
    .unwrap();
    conn
}

#[test]
fn clean_ledger_has_no_issues() {
    let conn = setup();
    conn.execute(
        "INSERT INTO categories(user_id,name,type) VALUES ('u1','Food','expense')",
        [],
    )
    .unwrap();
    conn.execute(
        "INSERT INTO transactions(user_id,date,type,amount,category_id) \
         VALUES ('u1','2025-08-01 10:00:00','expense','10',1)",
        [],
    )
    .unwrap();
    assert!(doctor::issues(&conn).unwrap().is_empty());
}

#[test]
fn dangling_category_reference_is_reported() {
    let conn = setup();
    conn.execute(
        "INSERT INTO transactions(user_id,date,type,amount,category_id) \
         VALUES ('u1','2025-08-01 10:00:00','expense','10',42)",
        [],
    )
    .unwrap();
    let issues = doctor::issues(&conn).unwrap();
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0][0], "orphaned_category_ref");
    assert!(issues[0][1].contains("category 42"));
}

#[test]
fn category_owned_by_another_user_still_counts_as_dangling() {
    let conn = setup();
    conn.execute(
        "INSERT INTO categories(user_id,name,type) VALUES ('u2','Food','expense')",
        [],
    )
    .unwrap();
    conn.execute(
        "INSERT INTO transactions(user_id,date,type,amount,category_id) \
         VALUES ('u1','2025-08-01 10:00:00','expense','10',1)",
        [],
    )
    .unwrap();
    let issues = doctor::issues(&conn).unwrap();
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0][0], "orphaned_category_ref");
}

#[test]
fn malformed_rows_are_reported() {
    let conn = setup();
    conn.execute(
        "INSERT INTO transactions(user_id,date,type,amount) \
         VALUES ('u1','yesterday','transfer','lots')",
        [],
    )
    .unwrap();
    conn.execute(
        "INSERT INTO transactions(user_id,date,type,amount) \
         VALUES ('u1','2025-08-02 09:00:00','expense','-4')",
        [],
    )
    .unwrap();

    let issues = doctor::issues(&conn).unwrap();
    let kinds: Vec<&str> = issues.iter().map(|r| r[0].as_str()).collect();
    assert!(kinds.contains(&"bad_date"));
    assert!(kinds.contains(&"unknown_type"));
    assert!(kinds.contains(&"bad_amount"));
    assert!(kinds.contains(&"negative_amount"));
}
