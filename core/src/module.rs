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
use crate::runtime::{Module, Value};

use log::debug;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

/// Populates a freshly created module's namespace. May also touch the
/// importing frame's services (the `traceback` module installs a hook).
pub type ModuleInit = fn(&mut Frame, &mut Namespace) -> Raised<()>;

pub const TRACEBACK_MODULE: &str = "traceback";

/// Native modules available for import, plus the cache of those already
/// imported in this run.
#[derive(Default)]
pub struct ModuleRegistry {
    natives: HashMap<String, ModuleInit>,
    loaded: HashMap<String, Value>,
}

impl fmt::Debug for ModuleRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut natives: Vec<&String> = self.natives.keys().collect();
        natives.sort();
        let mut loaded: Vec<&String> = self.loaded.keys().collect();
        loaded.sort();
        f.debug_struct("ModuleRegistry")
            .field("natives", &natives)
            .field("loaded", &loaded)
            .finish()
    }
}

impl ModuleRegistry {
    pub fn empty() -> Self {
        ModuleRegistry::default()
    }

    /// Registry with the modules every run can rely on.
    pub fn with_defaults() -> Self {
        let mut registry = ModuleRegistry::empty();
        registry.register(TRACEBACK_MODULE, init_traceback);
        registry
    }

    pub fn register(&mut self, name: &str, init: ModuleInit) {
        self.natives.insert(name.to_string(), init);
    }

    pub fn is_loaded(&self, name: &str) -> bool {
        self.loaded.contains_key(name)
    }

    fn resolve(&self, name: &str) -> Option<ModuleInit> {
        self.natives.get(name).copied()
    }
}

/// Import `name` into the runtime, running its initializer the first time.
/// Later imports return the cached module.
pub fn import_module(f: &mut Frame, name: &str) -> Raised<Value> {
    if let Some(module) = f.services().modules.loaded.get(name) {
        return Ok(module.clone());
    }

    let init = f
        .services()
        .modules
        .resolve(name)
        .ok_or_else(|| BaseException::import_error(name))?;

    debug!("importing module {}", name);
    let mut dict = Namespace::new();
    dict.set_item_str("__name__", Value::str(name))?;
    init(f, &mut dict)?;

    let module = Value::Module(Rc::new(Module {
        name: Rc::from(name),
        dict: RefCell::new(dict),
    }));
    f.services_mut()
        .modules
        .loaded
        .insert(name.to_string(), module.clone());
    Ok(module)
}

// ============================================================================
// traceback
// ============================================================================

/// Render an exception the way an uncaught one is reported.
pub fn format_exception(exc: &BaseException) -> String {
    let mut out = String::from("Traceback (most recent call last):\n");
    for entry in exc.traceback.iter().rev() {
        out.push_str(&format!(
            "  File \"{}\", line {}, in {}\n",
            entry.filename, entry.line, entry.code_name
        ));
    }
    out.push_str(&exc.summary());
    out.push('\n');
    out
}

fn print_exception(f: &mut Frame, exc: &BaseException) {
    // Nothing sensible is left to do if stderr itself fails.
    let _ = f.stderr().write_str(&format_exception(exc));
}

fn init_traceback(f: &mut Frame, dict: &mut Namespace) -> Raised<()> {
    f.services_mut().excepthook = Some(print_exception);
    dict.set_item_str("__doc__", Value::str("Reports uncaught exceptions on stderr."))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exceptions::ExceptionKind;
    use crate::frame::{Services, Stream};

    fn init_counter(f: &mut Frame, dict: &mut Namespace) -> Raised<()> {
        let n = match f.globals_ref().get_item_str("inits") {
            Some(Value::Int(n)) => n,
            _ => 0,
        };
        f.globals().set_item_str("inits", Value::Int(n + 1))?;
        dict.set_item_str("answer", Value::Int(42))
    }

    fn init_broken(_f: &mut Frame, _dict: &mut Namespace) -> Raised<()> {
        Err(BaseException::new(ExceptionKind::RuntimeError, "boom"))
    }

    #[test]
    fn test_import_runs_initializer_once() {
        let mut registry = ModuleRegistry::empty();
        registry.register("counter", init_counter);
        let mut f = Frame::with_services(Services::default().with_modules(registry));

        let first = import_module(&mut f, "counter").unwrap();
        let second = import_module(&mut f, "counter").unwrap();
        assert_eq!(first, second);
        assert_eq!(f.globals_ref().get_item_str("inits"), Some(Value::Int(1)));

        match first {
            Value::Module(m) => {
                assert_eq!(m.dict.borrow().get_item_str("answer"), Some(Value::Int(42)));
                assert_eq!(m.dict.borrow().get_item_str("__name__"), Some(Value::str("counter")));
            }
            other => panic!("expected module, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_module() {
        let mut f = Frame::with_services(Services::default().with_modules(ModuleRegistry::empty()));
        let err = import_module(&mut f, "traceback").unwrap_err();
        assert!(err.is(ExceptionKind::ImportError));
        assert_eq!(err.message, "No module named traceback");
    }

    #[test]
    fn test_failed_import_is_not_cached() {
        let mut registry = ModuleRegistry::empty();
        registry.register("broken", init_broken);
        let mut f = Frame::with_services(Services::default().with_modules(registry));
        assert!(import_module(&mut f, "broken").is_err());
        assert!(!f.services().modules.is_loaded("broken"));
    }

    #[test]
    fn test_traceback_installs_hook() {
        let buf = Rc::new(RefCell::new(Vec::<u8>::new()));
        let mut f = Frame::with_services(Services::default().with_stderr(Stream::new(buf.clone())));
        import_module(&mut f, TRACEBACK_MODULE).unwrap();
        let hook = f.services().excepthook.expect("hook installed");

        let mut exc = BaseException::name_error("foo");
        exc.push_entry("hello.rb", 2, "<module>");
        hook(&mut f, &exc);

        let text = String::from_utf8(buf.borrow().clone()).unwrap();
        assert!(text.starts_with("Traceback (most recent call last):\n"));
        assert!(text.ends_with("NameError: name 'foo' is not defined\n"));
    }

    #[test]
    fn test_format_exception_innermost_last() {
        let mut exc = BaseException::zero_division("integer division or modulo by zero");
        exc.push_entry("lib.rb", 7, "helper");
        exc.push_entry("main.rb", 1, "<module>");
        insta::assert_snapshot!(format_exception(&exc).trim_end(), @r###"
        Traceback (most recent call last):
          File "main.rb", line 1, in <module>
          File "lib.rb", line 7, in helper
        ZeroDivisionError: integer division or modulo by zero
        "###);
    }
}
