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

use crate::ast::{calculate_hash, AstError, CompiledProgram};
use log::debug;
use serde_json::from_str;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("I/O Error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON Parse Error: {0}")]
    ParseError(#[from] serde_json::Error),
    #[error("AST Error: {0}")]
    AstError(#[from] AstError),
    #[error("Integrity Error: Hash Mismatch. Expected {expected}, computed {computed}.")]
    HashMismatch { expected: String, computed: String },
}

pub fn load_program(json: &str, verify: bool) -> Result<CompiledProgram, LoadError> {
    let program: CompiledProgram = from_str(json)?;
    if verify {
        verify_integrity(&program)?;
    }
    debug!(
        "loaded {} ({} statements)",
        program.code.filename,
        program.code.body.len()
    );
    Ok(program)
}

pub fn load_program_file(path: &Path, verify: bool) -> Result<CompiledProgram, LoadError> {
    let json = fs::read_to_string(path)?;
    load_program(&json, verify)
}

fn verify_integrity(program: &CompiledProgram) -> Result<(), LoadError> {
    let computed = calculate_hash(&program.code)?;
    if computed != program.hash {
        return Err(LoadError::HashMismatch {
            expected: program.hash.clone(),
            computed,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Code, Expression, Stmt, StmtKind};

    fn program_json() -> String {
        let code = Code::module(
            "hello.rb",
            vec![Stmt::at(1, StmtKind::Expression(Expression::call("p", vec![Expression::int(1)])))],
        );
        serde_json::to_string(&CompiledProgram::new(code).unwrap()).unwrap()
    }

    #[test]
    fn test_load_verified_program() {
        let program = load_program(&program_json(), true).unwrap();
        assert_eq!(program.code.filename, "hello.rb");
        assert_eq!(program.code.body.len(), 1);
    }

    #[test]
    fn test_tampered_program_rejected() {
        let json = program_json().replace("hello.rb", "evil.rb");
        let err = load_program(&json, true).unwrap_err();
        assert!(matches!(err, LoadError::HashMismatch { .. }));
    }

    #[test]
    fn test_tampered_program_accepted_without_verification() {
        let json = program_json().replace("hello.rb", "evil.rb");
        let program = load_program(&json, false).unwrap();
        assert_eq!(program.code.filename, "evil.rb");
    }

    #[test]
    fn test_malformed_json() {
        let err = load_program("{not json", true).unwrap_err();
        assert!(matches!(err, LoadError::ParseError(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = load_program_file(Path::new("/nonexistent/program.json"), true).unwrap_err();
        assert!(matches!(err, LoadError::Io(_)));
    }
}
