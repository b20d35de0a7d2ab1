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

use gorbe_core::ast::{BinOp, Code, CompiledProgram, Expression, Stmt, StmtKind};
use std::env;
use std::fs;

// Writes a small compiled program that `gorbe-run` can execute:
//
//   foo = 6 * 7
//   p "answer:", foo, false
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let out = env::args().nth(1).unwrap_or_else(|| "hello.json".to_string());

    let body = vec![
        Stmt::at(
            1,
            StmtKind::Assign {
                target: "foo".to_string(),
                value: Expression::binop(BinOp::Mul, Expression::int(6), Expression::int(7)),
            },
        ),
        Stmt::at(
            2,
            StmtKind::Expression(Expression::call(
                "p",
                vec![
                    Expression::str("answer:"),
                    Expression::name("foo"),
                    Expression::name("false"),
                ],
            )),
        ),
    ];
    let program = CompiledProgram::new(Code::module("hello.rb", body))?;
    fs::write(&out, serde_json::to_string_pretty(&program)?)?;
    println!("wrote {} ({})", out, program.hash);
    Ok(())
}
