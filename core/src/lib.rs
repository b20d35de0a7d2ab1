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

pub mod ast;
pub mod compat;
pub mod config;
pub mod crypto;
pub mod driver;
pub mod eval;
pub mod exceptions;
pub mod frame;
pub mod loader;
pub mod module;
pub mod namespace;
pub mod ops;
pub mod runtime;

pub use compat::{init_globals_for_ruby, puts};
pub use driver::Driver;
pub use eval::run_main;
pub use exceptions::{BaseException, ExceptionKind, Raised};
pub use frame::Frame;
pub use runtime::Value;
