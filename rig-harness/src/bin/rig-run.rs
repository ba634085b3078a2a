// RIG - rig-harness
// Module: RIG Runner Binary
//
// Copyright (c) 2025 The RIG Project Developers
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! `rig-run`: run harness cases registered with the global registry.

use clap::Parser;

fn main() {
    env_logger::init();
    let args = rig_harness::cli::Args::parse();
    std::process::exit(rig_harness::cli::run(&args));
}
