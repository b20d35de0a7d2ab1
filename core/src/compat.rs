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

//! Ruby-facing globals installed before a translated program runs.
//!
//! Stand-in for a proper `Kernel` module. Once builtin modules can be
//! resolved through `module::import_module`, the bootstrap function held by
//! the driver can be swapped for one that imports that module instead.

use crate::exceptions::Raised;
use crate::frame::Frame;
use crate::runtime::{self, Args, KwArgs, Value, FALSE, TRUE};

use log::debug;

/// Name the print shim is registered under.
pub const PUTS_NAME: &str = "puts";

/// Variadic print: each positional argument is converted with `str()` and
/// written on its own line, left to right. Stops at the first conversion
/// failure; lines already written stay written. Keyword arguments are
/// accepted and ignored.
pub fn puts(f: &mut Frame, args: &Args, _kwargs: &KwArgs) -> Raised<Value> {
    for arg in args {
        let s = runtime::to_str(f, arg)?;
        f.print_line(&s)?;
    }
    Ok(Value::None)
}

/// Bind `true`, `false` and `p` in the frame's globals.
///
/// Bindings are written in that order and the first failed write is
/// returned as is, leaving the rest unset. Running it again on the same
/// frame rebinds equivalent values.
pub fn init_globals_for_ruby(f: &mut Frame) -> Raised<()> {
    let bindings = [
        ("true", TRUE),
        ("false", FALSE),
        ("p", Value::builtin(PUTS_NAME, puts)),
    ];
    for (name, value) in bindings {
        f.globals().set_item_str(name, value)?;
        debug!("bound global {}", name);
    }
    Ok(())
}
