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

use std::fmt;
use thiserror::Error;

/// Result of any runtime operation that may raise.
pub type Raised<T> = Result<T, BaseException>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExceptionKind {
    ImportError,
    IOError,
    NameError,
    OverflowError,
    RuntimeError,
    SystemExit,
    TypeError,
    ValueError,
    ZeroDivisionError,
}

impl fmt::Display for ExceptionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ExceptionKind::ImportError => "ImportError",
            ExceptionKind::IOError => "IOError",
            ExceptionKind::NameError => "NameError",
            ExceptionKind::OverflowError => "OverflowError",
            ExceptionKind::RuntimeError => "RuntimeError",
            ExceptionKind::SystemExit => "SystemExit",
            ExceptionKind::TypeError => "TypeError",
            ExceptionKind::ValueError => "ValueError",
            ExceptionKind::ZeroDivisionError => "ZeroDivisionError",
        };
        write!(f, "{}", name)
    }
}

/// One line of a traceback: where a statement was executing when the
/// exception passed through it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TracebackEntry {
    pub filename: String,
    pub line: u32,
    pub code_name: String,
}

/// A raised exception travelling up the call chain.
///
/// Entries are appended as the exception leaves each code block, so
/// `traceback[0]` is the innermost location.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{}", self.summary())]
pub struct BaseException {
    pub kind: ExceptionKind,
    pub message: String,
    /// Only meaningful for `SystemExit`.
    pub exit_code: Option<i32>,
    pub traceback: Vec<TracebackEntry>,
}

impl BaseException {
    pub fn new(kind: ExceptionKind, message: impl Into<String>) -> Self {
        BaseException {
            kind,
            message: message.into(),
            exit_code: None,
            traceback: Vec::new(),
        }
    }

    pub fn type_error(message: impl Into<String>) -> Self {
        Self::new(ExceptionKind::TypeError, message)
    }

    pub fn name_error(name: &str) -> Self {
        Self::new(
            ExceptionKind::NameError,
            format!("name '{}' is not defined", name),
        )
    }

    pub fn value_error(message: impl Into<String>) -> Self {
        Self::new(ExceptionKind::ValueError, message)
    }

    pub fn zero_division(message: impl Into<String>) -> Self {
        Self::new(ExceptionKind::ZeroDivisionError, message)
    }

    pub fn overflow(message: impl Into<String>) -> Self {
        Self::new(ExceptionKind::OverflowError, message)
    }

    pub fn import_error(module: &str) -> Self {
        Self::new(
            ExceptionKind::ImportError,
            format!("No module named {}", module),
        )
    }

    pub fn io_error(err: &std::io::Error) -> Self {
        Self::new(ExceptionKind::IOError, err.to_string())
    }

    pub fn system_exit(code: i32) -> Self {
        BaseException {
            kind: ExceptionKind::SystemExit,
            message: code.to_string(),
            exit_code: Some(code),
            traceback: Vec::new(),
        }
    }

    pub fn is(&self, kind: ExceptionKind) -> bool {
        self.kind == kind
    }

    /// `Kind: message`, or just `Kind` when there is no message.
    pub fn summary(&self) -> String {
        if self.message.is_empty() {
            self.kind.to_string()
        } else {
            format!("{}: {}", self.kind, self.message)
        }
    }

    pub fn push_entry(&mut self, filename: &str, line: u32, code_name: &str) {
        self.traceback.push(TracebackEntry {
            filename: filename.to_string(),
            line,
            code_name: code_name.to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_with_and_without_message() {
        let e = BaseException::type_error("bad operand");
        assert_eq!(e.to_string(), "TypeError: bad operand");

        let bare = BaseException::new(ExceptionKind::RuntimeError, "");
        assert_eq!(bare.to_string(), "RuntimeError");
    }

    #[test]
    fn test_name_error_message() {
        let e = BaseException::name_error("foo");
        assert!(e.is(ExceptionKind::NameError));
        assert_eq!(e.message, "name 'foo' is not defined");
    }

    #[test]
    fn test_system_exit_carries_code() {
        let e = BaseException::system_exit(3);
        assert_eq!(e.exit_code, Some(3));
        assert_eq!(e.to_string(), "SystemExit: 3");
    }
}
