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

use crate::ast::{Code, CompiledProgram, Constant, Expression, Stmt, StmtKind};
use crate::exceptions::{BaseException, ExceptionKind, Raised};
use crate::frame::Frame;
use crate::ops;
use crate::runtime::{self, Value};

use log::{debug, info};
use std::mem;
use std::rc::Rc;

pub struct Interpreter;

impl Interpreter {
    /// Execute a code block against the frame's globals. An exception
    /// leaving the block gets one traceback entry for the statement it
    /// escaped from.
    pub fn exec_code(f: &mut Frame, code: &Code) -> Raised<()> {
        let outer_name = mem::replace(&mut f.code_name, code.name.clone());
        let outer_file = mem::replace(&mut f.filename, code.filename.clone());
        let outer_line = f.line;

        let result = Interpreter::exec_block(f, &code.body);
        let line = f.line;

        f.code_name = outer_name;
        f.filename = outer_file;
        f.line = outer_line;

        result.map_err(|mut e| {
            e.push_entry(&code.filename, line, &code.name);
            e
        })
    }

    fn exec_block(f: &mut Frame, stmts: &[Stmt]) -> Raised<()> {
        for stmt in stmts {
            f.line = stmt.line;
            Interpreter::exec_statement(f, stmt)?;
        }
        Ok(())
    }

    fn exec_statement(f: &mut Frame, stmt: &Stmt) -> Raised<()> {
        match &stmt.kind {
            StmtKind::Assign { target, value } => {
                let val = Interpreter::eval_expression(f, value)?;
                f.globals().set_item_str(target, val)
            }
            StmtKind::Expression(expr) => {
                Interpreter::eval_expression(f, expr)?;
                Ok(())
            }
            StmtKind::If {
                condition,
                then_block,
                else_block,
            } => {
                if Interpreter::eval_expression(f, condition)?.is_truthy() {
                    Interpreter::exec_block(f, then_block)
                } else {
                    Interpreter::exec_block(f, else_block)
                }
            }
            StmtKind::While { condition, body } => {
                while Interpreter::eval_expression(f, condition)?.is_truthy() {
                    Interpreter::exec_block(f, body)?;
                }
                Ok(())
            }
            StmtKind::Pass => Ok(()),
        }
    }

    pub fn eval_expression(f: &mut Frame, expr: &Expression) -> Raised<Value> {
        match expr {
            Expression::Constant(c) => Ok(match c {
                Constant::None => Value::None,
                Constant::Bool(b) => Value::Bool(*b),
                Constant::Int(i) => Value::Int(*i),
                Constant::Float(x) => Value::Float(*x),
                Constant::Str(s) => Value::Str(Rc::from(s.as_str())),
            }),
            Expression::Name(name) => f.load_global(name),
            Expression::List(items) => {
                let mut values = Vec::with_capacity(items.len());
                for item in items {
                    values.push(Interpreter::eval_expression(f, item)?);
                }
                Ok(Value::list(values))
            }
            Expression::BinOp { op, lhs, rhs } => {
                let lhs = Interpreter::eval_expression(f, lhs)?;
                let rhs = Interpreter::eval_expression(f, rhs)?;
                ops::binary_op(*op, &lhs, &rhs)
            }
            Expression::UnaryOp { op, operand } => {
                let operand = Interpreter::eval_expression(f, operand)?;
                ops::unary_op(*op, &operand)
            }
            Expression::Call { func, args, kwargs } => {
                let callee = Interpreter::eval_expression(f, func)?;
                let mut evaluated_args = Vec::with_capacity(args.len());
                for arg in args {
                    evaluated_args.push(Interpreter::eval_expression(f, arg)?);
                }
                let mut evaluated_kwargs = Vec::with_capacity(kwargs.len());
                for (name, arg) in kwargs {
                    evaluated_kwargs.push((name.clone(), Interpreter::eval_expression(f, arg)?));
                }
                runtime::call(f, &callee, &evaluated_args, &evaluated_kwargs)
            }
        }
    }
}

/// Report an uncaught exception through the installed hook, or as a bare
/// summary line when no diagnostics module was imported.
pub fn report_exception(f: &mut Frame, exc: &BaseException) {
    let hook = f.services().excepthook;
    match hook {
        Some(hook) => hook(f, exc),
        None => {
            let _ = f.stderr().write_line(&exc.summary());
        }
    }
}

/// Top-level execution call: run `program` as `__main__` in `f` and map
/// the outcome to a process exit code.
pub fn run_main(f: &mut Frame, program: CompiledProgram) -> i32 {
    let CompiledProgram { hash, code } = program;
    info!(
        "running {} ({})",
        code.filename,
        hash.get(..12).unwrap_or(&hash)
    );

    let result = f.globals().set_item_str("__name__", Value::str("__main__"));
    let result = result.and_then(|_| Interpreter::exec_code(f, &code));

    match result {
        Ok(()) => 0,
        Err(e) if e.is(ExceptionKind::SystemExit) => {
            let code = e.exit_code.unwrap_or(0);
            debug!("program requested exit with status {}", code);
            code
        }
        Err(e) => {
            debug!("uncaught exception: {}", e);
            report_exception(f, &e);
            1
        }
    }
}
