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

use crate::ast::{BinOp, UnaryOp};
use crate::exceptions::{BaseException, Raised};
use crate::runtime::Value;

use std::rc::Rc;

fn unsupported(op: BinOp, lhs: &Value, rhs: &Value) -> BaseException {
    BaseException::type_error(format!(
        "unsupported operand type(s) for {}: '{}' and '{}'",
        op.symbol(),
        lhs.type_name(),
        rhs.type_name()
    ))
}

fn overflow(op: BinOp) -> BaseException {
    BaseException::overflow(format!("integer overflow in {}", op.symbol()))
}

/// Numeric view of a value; bools count as ints.
enum Num {
    Int(i64),
    Float(f64),
}

fn as_num(v: &Value) -> Option<Num> {
    match v {
        Value::Int(i) => Some(Num::Int(*i)),
        Value::Bool(b) => Some(Num::Int(*b as i64)),
        Value::Float(x) => Some(Num::Float(*x)),
        _ => None,
    }
}

fn as_int(v: &Value) -> Option<i64> {
    match v {
        Value::Int(i) => Some(*i),
        Value::Bool(b) => Some(*b as i64),
        _ => None,
    }
}

fn floor_div(a: i64, b: i64) -> Option<i64> {
    let q = a.checked_div(b)?;
    if (a % b != 0) && ((a < 0) != (b < 0)) {
        q.checked_sub(1)
    } else {
        Some(q)
    }
}

fn floor_mod(a: i64, b: i64) -> Option<i64> {
    let r = a.checked_rem(b)?;
    if r != 0 && ((r < 0) != (b < 0)) {
        Some(r + b)
    } else {
        Some(r)
    }
}

fn float_mod(a: f64, b: f64) -> f64 {
    let r = a % b;
    if r != 0.0 && ((r < 0.0) != (b < 0.0)) {
        r + b
    } else {
        r
    }
}

/// Longest string or list a repetition may build.
const MAX_REPEAT_LEN: usize = 1 << 28;

/// Length of `len` elements repeated `times` times, or `None` when the result
/// would be empty.
fn repeat_len(kind: &str, len: usize, times: i64) -> Raised<Option<usize>> {
    if len == 0 || times <= 0 {
        return Ok(None);
    }
    usize::try_from(times)
        .ok()
        .and_then(|t| len.checked_mul(t))
        .filter(|&total| total <= MAX_REPEAT_LEN)
        .map(Some)
        .ok_or_else(|| BaseException::overflow(format!("repeated {} is too long", kind)))
}

fn repeat_str(s: &str, times: i64) -> Raised<Value> {
    Ok(match repeat_len("string", s.len(), times)? {
        Some(_) => Value::Str(Rc::from(s.repeat(times as usize))),
        None => Value::str(""),
    })
}

fn repeat_list(items: &[Value], times: i64) -> Raised<Value> {
    let total = match repeat_len("list", items.len(), times)? {
        Some(total) => total,
        None => return Ok(Value::list(Vec::new())),
    };
    let mut out = Vec::with_capacity(total);
    while out.len() < total {
        out.extend_from_slice(items);
    }
    Ok(Value::list(out))
}

fn int_arith(op: BinOp, a: i64, b: i64) -> Raised<Value> {
    let res = match op {
        BinOp::Add => a.checked_add(b),
        BinOp::Sub => a.checked_sub(b),
        BinOp::Mul => a.checked_mul(b),
        BinOp::Div | BinOp::Mod if b == 0 => {
            return Err(BaseException::zero_division(
                "integer division or modulo by zero",
            ))
        }
        BinOp::Div => floor_div(a, b),
        BinOp::Mod if b == -1 => Some(0),
        BinOp::Mod => floor_mod(a, b),
        BinOp::Pow => {
            if b < 0 {
                if a == 0 {
                    return Err(BaseException::zero_division(
                        "0.0 cannot be raised to a negative power",
                    ));
                }
                return Ok(Value::Float((a as f64).powf(b as f64)));
            }
            match a {
                0 => Some(if b == 0 { 1 } else { 0 }),
                1 => Some(1),
                -1 => Some(if b % 2 == 0 { 1 } else { -1 }),
                _ => u32::try_from(b).ok().and_then(|e| a.checked_pow(e)),
            }
        }
        BinOp::LShift | BinOp::RShift if b < 0 => {
            return Err(BaseException::value_error("negative shift count"))
        }
        BinOp::LShift => {
            if b >= 63 {
                if a == 0 { Some(0) } else { None }
            } else {
                let shifted = a << b;
                if shifted >> b == a { Some(shifted) } else { None }
            }
        }
        BinOp::RShift => Some(if b >= 64 { if a < 0 { -1 } else { 0 } } else { a >> b }),
        BinOp::BitAnd => Some(a & b),
        BinOp::BitOr => Some(a | b),
        BinOp::BitXor => Some(a ^ b),
    };
    res.map(Value::Int).ok_or_else(|| overflow(op))
}

fn float_arith(op: BinOp, a: f64, b: f64, lhs: &Value, rhs: &Value) -> Raised<Value> {
    let res = match op {
        BinOp::Add => a + b,
        BinOp::Sub => a - b,
        BinOp::Mul => a * b,
        BinOp::Div | BinOp::Mod if b == 0.0 => {
            return Err(BaseException::zero_division("float division by zero"))
        }
        BinOp::Div => a / b,
        BinOp::Mod => float_mod(a, b),
        BinOp::Pow => {
            if a == 0.0 && b < 0.0 {
                return Err(BaseException::zero_division(
                    "0.0 cannot be raised to a negative power",
                ));
            }
            a.powf(b)
        }
        _ => return Err(unsupported(op, lhs, rhs)),
    };
    Ok(Value::Float(res))
}

/// Evaluate `lhs <op> rhs`.
pub fn binary_op(op: BinOp, lhs: &Value, rhs: &Value) -> Raised<Value> {
    match (lhs, rhs) {
        (Value::Str(a), Value::Str(b)) if op == BinOp::Add => {
            let mut s = String::with_capacity(a.len() + b.len());
            s.push_str(a);
            s.push_str(b);
            Ok(Value::Str(Rc::from(s)))
        }
        (Value::List(a), Value::List(b)) if op == BinOp::Add => {
            let mut items = Vec::with_capacity(a.len() + b.len());
            items.extend_from_slice(a);
            items.extend_from_slice(b);
            Ok(Value::list(items))
        }
        (Value::Str(s), n) | (n, Value::Str(s)) if op == BinOp::Mul && as_int(n).is_some() => {
            repeat_str(s, as_int(n).unwrap_or(0))
        }
        (Value::List(items), n) | (n, Value::List(items))
            if op == BinOp::Mul && as_int(n).is_some() =>
        {
            repeat_list(items, as_int(n).unwrap_or(0))
        }
        _ => match (as_num(lhs), as_num(rhs)) {
            (Some(Num::Int(a)), Some(Num::Int(b))) => int_arith(op, a, b),
            (Some(a), Some(b)) => {
                let a = match a {
                    Num::Int(i) => i as f64,
                    Num::Float(x) => x,
                };
                let b = match b {
                    Num::Int(i) => i as f64,
                    Num::Float(x) => x,
                };
                float_arith(op, a, b, lhs, rhs)
            }
            _ => Err(unsupported(op, lhs, rhs)),
        },
    }
}

/// Evaluate a unary operator.
pub fn unary_op(op: UnaryOp, operand: &Value) -> Raised<Value> {
    match (op, operand) {
        (UnaryOp::Not, v) => Ok(Value::Bool(!v.is_truthy())),
        (UnaryOp::Neg, Value::Float(x)) => Ok(Value::Float(-x)),
        (UnaryOp::Pos, Value::Float(x)) => Ok(Value::Float(*x)),
        (_, v) => match (op, as_int(v)) {
            (UnaryOp::Neg, Some(i)) => i
                .checked_neg()
                .map(Value::Int)
                .ok_or_else(|| BaseException::overflow("integer overflow in unary -")),
            (UnaryOp::Pos, Some(i)) => Ok(Value::Int(i)),
            (UnaryOp::Invert, Some(i)) => Ok(Value::Int(!i)),
            _ => Err(BaseException::type_error(format!(
                "bad operand type for unary {}: '{}'",
                op.symbol(),
                v.type_name()
            ))),
        },
    }
}
