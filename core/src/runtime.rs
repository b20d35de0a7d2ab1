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

use crate::exceptions::{BaseException, Raised};
use crate::frame::Frame;
use crate::namespace::Namespace;

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

/// Positional arguments of a call.
pub type Args = [Value];

/// Keyword arguments of a call, in source order.
pub type KwArgs = [(String, Value)];

/// Signature shared by every builtin callable.
pub type NativeFn = fn(&mut Frame, &Args, &KwArgs) -> Raised<Value>;

pub const TRUE: Value = Value::Bool(true);
pub const FALSE: Value = Value::Bool(false);

#[derive(Debug, Clone)]
pub enum Value {
    None,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(Rc<str>),
    List(Rc<Vec<Value>>),
    Builtin(Rc<Builtin>),
    Class(Rc<Class>),
    Object(Rc<Object>),
    Module(Rc<Module>),
}

/// A callable implemented by the runtime rather than by the program.
pub struct Builtin {
    pub name: Rc<str>,
    pub func: NativeFn,
}

impl fmt::Debug for Builtin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Builtin({})", self.name)
    }
}

/// A class with a method table. Methods receive the instance as their
/// first positional argument.
#[derive(Debug)]
pub struct Class {
    pub name: Rc<str>,
    pub methods: RefCell<HashMap<String, Value>>,
}

#[derive(Debug)]
pub struct Object {
    pub class: Rc<Class>,
    pub attrs: RefCell<HashMap<String, Value>>,
}

#[derive(Debug)]
pub struct Module {
    pub name: Rc<str>,
    pub dict: RefCell<Namespace>,
}

impl Value {
    /// Wrap a native function as a callable value named `name`.
    pub fn builtin(name: &str, func: NativeFn) -> Value {
        Value::Builtin(Rc::new(Builtin {
            name: Rc::from(name),
            func,
        }))
    }

    pub fn str(s: &str) -> Value {
        Value::Str(Rc::from(s))
    }

    pub fn list(items: Vec<Value>) -> Value {
        Value::List(Rc::new(items))
    }

    pub fn class(name: &str, methods: Vec<(&str, Value)>) -> Value {
        let methods = methods
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect();
        Value::Class(Rc::new(Class {
            name: Rc::from(name),
            methods: RefCell::new(methods),
        }))
    }

    pub fn type_name(&self) -> String {
        match self {
            Value::None => "NoneType".to_string(),
            Value::Bool(_) => "bool".to_string(),
            Value::Int(_) => "int".to_string(),
            Value::Float(_) => "float".to_string(),
            Value::Str(_) => "str".to_string(),
            Value::List(_) => "list".to_string(),
            Value::Builtin(_) => "builtin_function_or_method".to_string(),
            Value::Class(_) => "type".to_string(),
            Value::Object(obj) => obj.class.name.to_string(),
            Value::Module(_) => "module".to_string(),
        }
    }

    pub fn is_truthy(&self) -> bool {
        match self {
            Value::None => false,
            Value::Bool(b) => *b,
            Value::Int(i) => *i != 0,
            Value::Float(x) => *x != 0.0,
            Value::Str(s) => !s.is_empty(),
            Value::List(items) => !items.is_empty(),
            _ => true,
        }
    }

    pub fn is_callable(&self) -> bool {
        matches!(self, Value::Builtin(_) | Value::Class(_))
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::None, Value::None) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            // Two registrations of the same native under the same name are
            // interchangeable.
            (Value::Builtin(a), Value::Builtin(b)) => {
                a.name == b.name && a.func as usize == b.func as usize
            }
            (Value::Class(a), Value::Class(b)) => Rc::ptr_eq(a, b),
            (Value::Object(a), Value::Object(b)) => Rc::ptr_eq(a, b),
            (Value::Module(a), Value::Module(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

/// Python-style float formatting: integral values keep a trailing `.0`.
pub fn format_float(x: f64) -> String {
    if x.is_nan() {
        "nan".to_string()
    } else if x.is_infinite() {
        String::from(if x > 0.0 { "inf" } else { "-inf" })
    } else if x.fract() == 0.0 && x.abs() < 1e16 {
        format!("{:.1}", x)
    } else {
        format!("{}", x)
    }
}

fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('\'');
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            c => out.push(c),
        }
    }
    out.push('\'');
    out
}

/// Look up a special method on an instance's class and call it with the
/// instance, requiring a string result.
fn dispatch_str_method(
    f: &mut Frame,
    value: &Value,
    obj: &Object,
    method: &str,
) -> Option<Raised<Rc<str>>> {
    let callee = obj.class.methods.borrow().get(method).cloned()?;
    let result = call(f, &callee, &[value.clone()], &[]).and_then(|res| match res {
        Value::Str(s) => Ok(s),
        other => Err(BaseException::type_error(format!(
            "{} returned non-string (type {})",
            method,
            other.type_name()
        ))),
    });
    Some(result)
}

/// The `str()` conversion protocol.
pub fn to_str(f: &mut Frame, value: &Value) -> Raised<Rc<str>> {
    match value {
        Value::Str(s) => Ok(s.clone()),
        Value::Object(obj) => {
            if let Some(res) = dispatch_str_method(f, value, obj, "__str__") {
                return res;
            }
            repr(f, value)
        }
        _ => repr(f, value),
    }
}

/// The `repr()` conversion protocol.
pub fn repr(f: &mut Frame, value: &Value) -> Raised<Rc<str>> {
    let text = match value {
        Value::None => "None".to_string(),
        Value::Bool(true) => "True".to_string(),
        Value::Bool(false) => "False".to_string(),
        Value::Int(i) => i.to_string(),
        Value::Float(x) => format_float(*x),
        Value::Str(s) => quote(s),
        Value::List(items) => {
            let mut parts = Vec::with_capacity(items.len());
            for item in items.iter() {
                parts.push(repr(f, item)?);
            }
            format!("[{}]", parts.join(", "))
        }
        Value::Builtin(b) => format!("<built-in function {}>", b.name),
        Value::Class(c) => format!("<class '{}'>", c.name),
        Value::Object(obj) => {
            if let Some(res) = dispatch_str_method(f, value, obj, "__repr__") {
                return res;
            }
            format!("<{} object>", obj.class.name)
        }
        Value::Module(m) => format!("<module '{}'>", m.name),
    };
    Ok(Rc::from(text))
}

/// Invoke `callee` with positional and keyword arguments.
pub fn call(f: &mut Frame, callee: &Value, args: &Args, kwargs: &KwArgs) -> Raised<Value> {
    match callee {
        Value::Builtin(b) => (b.func)(f, args, kwargs),
        Value::Class(class) => {
            let instance = Value::Object(Rc::new(Object {
                class: class.clone(),
                attrs: RefCell::new(HashMap::new()),
            }));
            let init = class.methods.borrow().get("__init__").cloned();
            match init {
                Some(init) => {
                    let mut init_args = Vec::with_capacity(args.len() + 1);
                    init_args.push(instance.clone());
                    init_args.extend_from_slice(args);
                    call(f, &init, &init_args, kwargs)?;
                }
                None if !args.is_empty() || !kwargs.is_empty() => {
                    return Err(BaseException::type_error("this constructor takes no arguments"));
                }
                None => {}
            }
            Ok(instance)
        }
        other => Err(BaseException::type_error(format!(
            "'{}' object is not callable",
            other.type_name()
        ))),
    }
}
