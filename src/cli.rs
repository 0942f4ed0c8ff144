// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{value_parser, Arg, ArgAction, Command};

fn user_arg() -> Arg {
    Arg::new("user")
        .long("user")
        .help("Act as this profile instead of the active one")
}

fn json_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print pretty JSON instead of a table"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print one JSON object per line"),
    )
}

/// Reporting window flags: day, ISO week, month, or an explicit range.
/// Commands default to the current month when none is given.
fn window_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("day")
            .long("day")
            .value_name("YYYY-MM-DD")
            .conflicts_with_all(["week", "month", "from", "to"]),
    )
    .arg(
        Arg::new("week")
            .long("week")
            .value_name("YYYY-MM-DD")
            .help("The ISO week containing this date")
            .conflicts_with_all(["month", "from", "to"]),
    )
    .arg(
        Arg::new("month")
            .long("month")
            .value_name("YYYY-MM")
            .conflicts_with_all(["from", "to"]),
    )
    .arg(
        Arg::new("from")
            .long("from")
            .value_name("DATETIME")
            .requires("to"),
    )
    .arg(
        Arg::new("to")
            .long("to")
            .value_name("DATETIME")
            .requires("from"),
    )
}

fn category_cmd() -> Command {
    Command::new("category")
        .about("Manage spending/income categories")
        .subcommand(
            Command::new("add")
                .about("Add a category")
                .arg(Arg::new("name").long("name").required(true))
                .arg(
                    Arg::new("type")
                        .long("type")
                        .required(true)
                        .value_parser(["income", "expense"]),
                )
                .arg(Arg::new("icon").long("icon").default_value("tag"))
                .arg(Arg::new("color").long("color").default_value("#9E9E9E"))
                .arg(user_arg()),
        )
        .subcommand(json_args(
            Command::new("list")
                .about("List categories for the active profile")
                .arg(user_arg()),
        ))
        .subcommand(
            Command::new("rm")
                .about("Remove every category with a given name")
                .arg(Arg::new("name").long("name").required(true))
                .arg(user_arg()),
        )
}

fn tx_cmd() -> Command {
    Command::new("tx")
        .about("Record and list transactions")
        .subcommand(
            Command::new("add")
                .about("Record a transaction")
                .arg(
                    Arg::new("type")
                        .long("type")
                        .required(true)
                        .value_parser(["income", "expense"]),
                )
                .arg(
                    Arg::new("amount")
                        .long("amount")
                        .required(true)
                        .allow_hyphen_values(true),
                )
                .arg(
                    Arg::new("date")
                        .long("date")
                        .value_name("DATETIME")
                        .help("Defaults to now"),
                )
                .arg(Arg::new("category").long("category").value_name("NAME"))
                .arg(Arg::new("desc").long("desc"))
                .arg(Arg::new("notes").long("notes"))
                .arg(user_arg()),
        )
        .subcommand(json_args(
            window_args(Command::new("list").about("List transactions, newest first"))
                .arg(Arg::new("category").long("category").value_name("NAME"))
                .arg(
                    Arg::new("type")
                        .long("type")
                        .value_parser(["income", "expense"]),
                )
                .arg(
                    Arg::new("limit")
                        .long("limit")
                        .value_parser(value_parser!(usize)),
                )
                .arg(user_arg()),
        ))
}

fn report_cmd() -> Command {
    Command::new("report")
        .about("Aggregated views over a reporting window")
        .subcommand(json_args(
            window_args(
                Command::new("summary").about("Income, expense, balance and count for a window"),
            )
            .arg(user_arg()),
        ))
        .subcommand(json_args(
            window_args(
                Command::new("spending")
                    .about("Top spending categories with share of total expense"),
            )
            .arg(
                Arg::new("limit")
                    .long("limit")
                    .value_parser(value_parser!(usize))
                    .help("Defaults to the top 5"),
            )
            .arg(user_arg()),
        ))
        .subcommand(json_args(
            window_args(Command::new("chart").about("Donut chart segment geometry for a window"))
                .arg(
                    Arg::new("diameter")
                        .long("diameter")
                        .value_parser(value_parser!(f64)),
                )
                .arg(
                    Arg::new("stroke")
                        .long("stroke")
                        .value_parser(value_parser!(f64)),
                )
                .arg(user_arg()),
        ))
}

fn export_cmd() -> Command {
    Command::new("export").about("Export ledger data").subcommand(
        Command::new("transactions")
            .about("Write the transaction list to a file")
            .arg(
                Arg::new("format")
                    .long("format")
                    .required(true)
                    .help("csv, json, html or text"),
            )
            .arg(Arg::new("out").long("out").required(true))
            .arg(user_arg()),
    )
}

fn profile_cmd() -> Command {
    Command::new("profile")
        .about("Select whose ledger the commands read")
        .subcommand(
            Command::new("use")
                .about("Switch the active profile")
                .arg(Arg::new("name").required(true)),
        )
        .subcommand(Command::new("show").about("Print the active profile"))
}

pub fn build_cli() -> Command {
    Command::new("pocketclip")
        .about("Pocketclip: personal income/expense tracking and spending analytics")
        .version(env!("CARGO_PKG_VERSION"))
        .subcommand(Command::new("init").about("Initialize the database"))
        .subcommand(profile_cmd())
        .subcommand(category_cmd())
        .subcommand(tx_cmd())
        .subcommand(report_cmd())
        .subcommand(export_cmd())
        .subcommand(Command::new("doctor").about("Check the ledger for inconsistencies"))
}
