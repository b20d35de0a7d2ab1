/*
 * Copyright (c) 2026 Mohamad Al-Zawahreh (dba Sovereign Systems).
 *
 * This file is part of the Ark Sovereign Compiler.
 *
 * LICENSE: DUAL-LICENSED (AGPLv3 or COMMERCIAL).
 *
 * 1. OPEN SOURCE: You may use this file under the terms of the GNU Affero
 * General Public License v3.0. If you link to this code, your ENTIRE
 * application must be open-sourced under AGPLv3.
 *
 * 2. COMMERCIAL: For proprietary use, you must obtain a Commercial License
 * from Sovereign Systems.
 *
 * PATENT NOTICE: Protected by US Patent App #63/935,467.
 * NO IMPLIED LICENSE to rights of Mohamad Al-Zawahreh or Sovereign Systems.
 */

use anyhow::Context;
use clap::Parser;
use gorbe_core::config::DriverConfig;
use gorbe_core::driver::Driver;
use gorbe_core::loader::load_program_file;
use std::path::PathBuf;
use std::process;

/// Run a compiled Ruby program on the embedded runtime.
#[derive(Parser, Debug)]
#[command(name = "gorbe-run", version)]
struct Cli {
    /// Compiled program (JSON).
    program: PathBuf,

    /// Module imported first to report uncaught exceptions.
    #[arg(long, default_value = "traceback")]
    diagnostics_module: String,

    /// Skip the program digest check.
    #[arg(long)]
    no_verify: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let program = cli
        .program
        .canonicalize()
        .with_context(|| format!("cannot open program {}", cli.program.display()))?;

    let config = DriverConfig::default()
        .with_diagnostics_module(&cli.diagnostics_module)
        .with_verify_integrity(!cli.no_verify);

    let status = Driver::new(config).run(|cfg| load_program_file(&program, cfg.verify_integrity));
    process::exit(status);
}
