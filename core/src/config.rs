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

use crate::module::TRACEBACK_MODULE;

/// Startup settings for the program driver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriverConfig {
    /// Module imported before anything else so uncaught exceptions get reported.
    pub diagnostics_module: String,
    /// Check the compiled program's digest before running it.
    pub verify_integrity: bool,
}

impl Default for DriverConfig {
    fn default() -> Self {
        DriverConfig {
            diagnostics_module: TRACEBACK_MODULE.to_string(),
            verify_integrity: true,
        }
    }
}

impl DriverConfig {
    pub fn with_diagnostics_module(mut self, name: &str) -> Self {
        self.diagnostics_module = name.to_string();
        self
    }

    pub fn with_verify_integrity(mut self, verify: bool) -> Self {
        self.verify_integrity = verify;
        self
    }
}
