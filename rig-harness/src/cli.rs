// RIG - rig-harness
// Module: RIG CLI Runner
//
// Copyright (c) 2025 The RIG Project Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! CLI entry points for the `rig-run` binary.
//!
//! Lists and runs cases registered with the global
//! [`HarnessRegistry`](crate::registry::HarnessRegistry), with name and
//! category filters. Exit code follows the uniform contract: 0 when every
//! executed case passed, 1 otherwise, 2 for harness-infrastructure errors.

use clap::Parser;
use colored::Colorize;

use crate::registry::HarnessRegistry;

/// Command-line arguments for `rig-run`.
#[derive(Parser, Debug)]
#[command(name = "rig-run")]
#[command(about = "Run registered RIG harness cases")]
pub struct Args {
    /// Run only cases whose name contains this substring
    #[arg(long)]
    pub name: Option<String>,

    /// Run only cases in this category (e.g. "zlib", "cjson")
    #[arg(long)]
    pub category: Option<String>,

    /// List available cases instead of running them
    #[arg(long)]
    pub list: bool,
}

fn list_cases(registry: &HarnessRegistry, args: &Args) -> i32 {
    let listing = registry.with_cases(|cases| {
        let mut lines = Vec::new();
        for case in cases {
            let matches_category = args
                .category
                .as_deref()
                .map_or(true, |category| case.category() == category);
            if matches_category {
                lines.push(format!(
                    "  {} [{}] {}",
                    case.name(),
                    case.category(),
                    case.description()
                ));
            }
        }
        lines
    });

    match listing {
        Ok(lines) => {
            println!("Available cases:\n");
            for line in &lines {
                println!("{line}");
            }
            println!("\nTotal: {} cases", lines.len());
            0
        }
        Err(e) => {
            eprintln!("{} {e}", "error:".red());
            2
        }
    }
}

/// Run the CLI against the global registry; returns the process exit code.
pub fn run(args: &Args) -> i32 {
    let registry = HarnessRegistry::global();

    if args.list {
        return list_cases(registry, args);
    }

    let executed =
        registry.run_filtered(args.name.as_deref(), args.category.as_deref());

    match executed {
        Ok(count) => {
            let stats = match registry.stats() {
                Ok(stats) => stats,
                Err(e) => {
                    eprintln!("{} {e}", "error:".red());
                    return 2;
                }
            };
            let verdict = if stats.failed == 0 {
                "ok".green()
            } else {
                "FAILED".red()
            };
            println!(
                "\n{verdict}: {count} run, {} passed, {} failed, {} skipped in {} ms",
                stats.passed, stats.failed, stats.skipped, stats.execution_time_ms
            );
            registry.exit_code()
        }
        Err(e) => {
            eprintln!("{} {e}", "error:".red());
            2
        }
    }
}
