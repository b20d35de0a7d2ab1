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

use crate::crypto;
use serde::{Deserialize, Serialize};
use serde_json::{to_string, to_value};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AstError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A compiled program as emitted by the translator.
/// Content-addressed by the hash of its canonical JSON form.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CompiledProgram {
    pub hash: String, // Hex string of SHA256 hash
    pub code: Code,
}

impl CompiledProgram {
    pub fn new(code: Code) -> Result<Self, AstError> {
        let hash = calculate_hash(&code)?;
        Ok(CompiledProgram { hash, code })
    }
}

/// SHA-256 of the canonical JSON form (object keys sorted).
pub fn calculate_hash(code: &Code) -> Result<String, AstError> {
    let val = to_value(code)?;
    let canonical = to_string(&val)?;
    Ok(crypto::hash(canonical.as_bytes()))
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Code {
    pub name: String,
    pub filename: String,
    pub body: Vec<Stmt>,
}

impl Code {
    pub fn module(filename: &str, body: Vec<Stmt>) -> Self {
        Code {
            name: "<module>".to_string(),
            filename: filename.to_string(),
            body,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Stmt {
    #[serde(default)]
    pub line: u32,
    pub kind: StmtKind,
}

impl Stmt {
    pub fn at(line: u32, kind: StmtKind) -> Self {
        Stmt { line, kind }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum StmtKind {
    Assign {
        target: String,
        value: Expression,
    },
    Expression(Expression),
    If {
        condition: Expression,
        then_block: Vec<Stmt>,
        #[serde(default)]
        else_block: Vec<Stmt>,
    },
    While {
        condition: Expression,
        body: Vec<Stmt>,
    },
    Pass,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Expression {
    Constant(Constant),
    Name(String),
    List(Vec<Expression>),
    BinOp {
        op: BinOp,
        lhs: Box<Expression>,
        rhs: Box<Expression>,
    },
    UnaryOp {
        op: UnaryOp,
        operand: Box<Expression>,
    },
    Call {
        func: Box<Expression>,
        #[serde(default)]
        args: Vec<Expression>,
        #[serde(default)]
        kwargs: Vec<(String, Expression)>,
    },
}

impl Expression {
    pub fn int(i: i64) -> Self {
        Expression::Constant(Constant::Int(i))
    }

    pub fn str(s: &str) -> Self {
        Expression::Constant(Constant::Str(s.to_string()))
    }

    pub fn name(n: &str) -> Self {
        Expression::Name(n.to_string())
    }

    pub fn call(func: &str, args: Vec<Expression>) -> Self {
        Expression::Call {
            func: Box::new(Expression::name(func)),
            args,
            kwargs: Vec::new(),
        }
    }

    pub fn binop(op: BinOp, lhs: Expression, rhs: Expression) -> Self {
        Expression::BinOp {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Constant {
    None,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Pow,
    LShift,
    RShift,
    BitAnd,
    BitOr,
    BitXor,
}

impl BinOp {
    pub fn symbol(self) -> &'static str {
        match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::Mod => "%",
            BinOp::Pow => "** or pow()",
            BinOp::LShift => "<<",
            BinOp::RShift => ">>",
            BinOp::BitAnd => "&",
            BinOp::BitOr => "|",
            BinOp::BitXor => "^",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    Neg,
    Pos,
    Invert,
    Not,
}

impl UnaryOp {
    pub fn symbol(self) -> &'static str {
        match self {
            UnaryOp::Neg => "-",
            UnaryOp::Pos => "+",
            UnaryOp::Invert => "~",
            UnaryOp::Not => "not",
        }
    }
}
