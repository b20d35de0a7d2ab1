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
use crate::module::ModuleRegistry;
use crate::namespace::Namespace;
use crate::runtime::Value;

use std::cell::RefCell;
use std::fmt;
use std::io::{self, Write};
use std::rc::Rc;

/// Called with the uncaught exception when a program terminates abnormally.
pub type ExceptHook = fn(&mut Frame, &BaseException);

/// A shared, line-oriented output stream.
///
/// Each `write_line` is a single write of the text plus its terminator;
/// no ordering is promised across separate calls from different frames.
#[derive(Clone)]
pub struct Stream(Rc<RefCell<dyn Write>>);

impl Stream {
    pub fn new(inner: Rc<RefCell<dyn Write>>) -> Self {
        Stream(inner)
    }

    pub fn stdout() -> Self {
        Stream(Rc::new(RefCell::new(io::stdout())))
    }

    pub fn stderr() -> Self {
        Stream(Rc::new(RefCell::new(io::stderr())))
    }

    pub fn write_line(&self, text: &str) -> io::Result<()> {
        let mut line = String::with_capacity(text.len() + 1);
        line.push_str(text);
        line.push('\n');
        let mut out = self.0.borrow_mut();
        out.write_all(line.as_bytes())?;
        out.flush()
    }

    pub fn write_str(&self, text: &str) -> io::Result<()> {
        let mut out = self.0.borrow_mut();
        out.write_all(text.as_bytes())?;
        out.flush()
    }
}

impl fmt::Debug for Stream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Stream")
    }
}

/// Services a frame reaches besides its globals.
pub struct Services {
    pub stdout: Stream,
    pub stderr: Stream,
    pub modules: ModuleRegistry,
    pub excepthook: Option<ExceptHook>,
}

impl Default for Services {
    fn default() -> Self {
        Services {
            stdout: Stream::stdout(),
            stderr: Stream::stderr(),
            modules: ModuleRegistry::with_defaults(),
            excepthook: None,
        }
    }
}

impl fmt::Debug for Services {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Services")
            .field("modules", &self.modules)
            .field("excepthook", &self.excepthook.is_some())
            .finish_non_exhaustive()
    }
}

impl Services {
    pub fn with_stdout(mut self, stream: Stream) -> Self {
        self.stdout = stream;
        self
    }

    pub fn with_stderr(mut self, stream: Stream) -> Self {
        self.stderr = stream;
        self
    }

    pub fn with_modules(mut self, modules: ModuleRegistry) -> Self {
        self.modules = modules;
        self
    }
}

/// Execution context: one global namespace plus runtime services, and the
/// position of the statement currently executing.
#[derive(Debug)]
pub struct Frame {
    globals: Namespace,
    services: Services,
    pub code_name: String,
    pub filename: String,
    pub line: u32,
}

impl Frame {
    /// Fresh root context with empty globals, wired to the process streams.
    pub fn new_root() -> Self {
        Self::with_services(Services::default())
    }

    pub fn with_services(services: Services) -> Self {
        Frame {
            globals: Namespace::new(),
            services,
            code_name: "<module>".to_string(),
            filename: "<unknown>".to_string(),
            line: 0,
        }
    }

    pub fn globals(&mut self) -> &mut Namespace {
        &mut self.globals
    }

    pub fn globals_ref(&self) -> &Namespace {
        &self.globals
    }

    pub fn services(&self) -> &Services {
        &self.services
    }

    pub fn services_mut(&mut self) -> &mut Services {
        &mut self.services
    }

    pub fn stdout(&self) -> &Stream {
        &self.services.stdout
    }

    pub fn stderr(&self) -> &Stream {
        &self.services.stderr
    }

    /// Write one line to this frame's stdout, mapping I/O failures to `IOError`.
    pub fn print_line(&self, text: &str) -> Raised<()> {
        self.services
            .stdout
            .write_line(text)
            .map_err(|e| BaseException::io_error(&e))
    }

    /// Look up a global, raising `NameError` when it is unbound.
    pub fn load_global(&self, name: &str) -> Raised<Value> {
        self.globals
            .get_item_str(name)
            .ok_or_else(|| BaseException::name_error(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exceptions::ExceptionKind;

    #[test]
    fn test_root_frame_has_empty_globals() {
        let f = Frame::new_root();
        assert!(f.globals_ref().is_empty());
        assert!(f.services().excepthook.is_none());
    }

    #[test]
    fn test_fresh_frames_are_independent() {
        let mut a = Frame::new_root();
        let b = Frame::new_root();
        a.globals().set_item_str("x", Value::Int(1)).unwrap();
        assert!(b.globals_ref().get_item_str("x").is_none());
    }

    #[test]
    fn test_print_line_goes_to_injected_stream() {
        let buf = Rc::new(RefCell::new(Vec::<u8>::new()));
        let f = Frame::with_services(Services::default().with_stdout(Stream::new(buf.clone())));
        f.print_line("one").unwrap();
        f.print_line("two").unwrap();
        assert_eq!(String::from_utf8(buf.borrow().clone()).unwrap(), "one\ntwo\n");
    }

    #[test]
    fn test_load_global_unbound() {
        let f = Frame::new_root();
        let err = f.load_global("missing").unwrap_err();
        assert!(err.is(ExceptionKind::NameError));
    }
}
