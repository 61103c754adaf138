// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Setlog-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Setlog and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Setlog CLI entrypoint.
//!
//! `collapse` folds a recorded edit journal (JSON, `-` for stdin) into a save plan and
//! prints it. `demo` runs a scripted editing session against an in-memory backend.
//!
//! Logs go to stderr, filtered by `SETLOG_LOG` (falling back to `RUST_LOG`).

use std::error::Error;
use std::io::Read;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const LOG_ENV: &str = "SETLOG_LOG";
const DEFAULT_LOG_FILTER: &str = "warn";

fn print_usage(program: &str) {
    eprintln!(
        "Usage:\n  {program} collapse <journal.json> [--json-logs]\n  {program} demo [--json-logs]\n\ncollapse reads an edit journal (use `-` for stdin) and prints the collapsed save plan.\ndemo saves a scripted editing session to an in-memory routine and prints the reports.\n\nLog filtering follows {LOG_ENV} (or RUST_LOG); default `{DEFAULT_LOG_FILTER}`.\n--json-logs switches log output to JSON lines."
    );
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Collapse { journal: String },
    Demo,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CliOptions {
    command: Command,
    json_logs: bool,
}

fn parse_options(mut args: impl Iterator<Item = String>) -> Result<CliOptions, ()> {
    let mut command: Option<&'static str> = None;
    let mut journal: Option<String> = None;
    let mut json_logs = false;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--json-logs" => {
                if json_logs {
                    return Err(());
                }
                json_logs = true;
            }
            "-" if command == Some("collapse") && journal.is_none() => journal = Some(arg),
            _ if arg.starts_with('-') => return Err(()),
            "collapse" if command.is_none() => command = Some("collapse"),
            "demo" if command.is_none() => command = Some("demo"),
            _ if command == Some("collapse") && journal.is_none() => journal = Some(arg),
            _ => return Err(()),
        }
    }

    let command = match (command, journal) {
        (Some("collapse"), Some(journal)) => Command::Collapse { journal },
        (Some("demo"), None) => Command::Demo,
        _ => return Err(()),
    };
    Ok(CliOptions { command, json_logs })
}

fn init_tracing(json_logs: bool) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let registry = tracing_subscriber::registry().with(filter);
    if json_logs {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn read_journal(path: &str) -> Result<setlog::journal::EditJournal, Box<dyn Error>> {
    let raw = if path == "-" {
        let mut raw = String::new();
        std::io::stdin().read_to_string(&mut raw)?;
        raw
    } else {
        std::fs::read_to_string(path)?
    };
    Ok(serde_json::from_str(&raw)?)
}

fn main() {
    let result = (|| -> Result<(), Box<dyn Error>> {
        let mut args = std::env::args();
        let program = args.next().unwrap_or_else(|| "setlog".to_owned());

        let options = match parse_options(args) {
            Ok(options) => options,
            Err(()) => {
                print_usage(&program);
                std::process::exit(2);
            }
        };
        init_tracing(options.json_logs);

        match options.command {
            Command::Collapse { journal } => {
                let journal = read_journal(&journal)?;
                if setlog::journal::journal_is_noop(&journal) {
                    tracing::info!("journal is empty, nothing to save");
                }
                let plan = setlog::plan::collapse_journal(&journal);
                tracing::info!(
                    actions = journal.len(),
                    operations = plan.operation_count(),
                    "collapsed journal"
                );
                println!("{}", serde_json::to_string_pretty(&plan)?);
            }
            Command::Demo => {
                let runtime = tokio::runtime::Builder::new_current_thread()
                    .enable_all()
                    .build()?;
                let outcome = runtime.block_on(setlog::demo::run_demo())?;
                println!("{}", serde_json::to_string_pretty(&outcome)?);
            }
        }
        Ok(())
    })();

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
