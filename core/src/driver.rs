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

use crate::ast::CompiledProgram;
use crate::compat::init_globals_for_ruby;
use crate::config::DriverConfig;
use crate::eval::{report_exception, run_main};
use crate::exceptions::{BaseException, Raised};
use crate::frame::{Frame, Services};
use crate::loader::LoadError;
use crate::module::import_module;

use log::{error, info};
use thiserror::Error;

/// Populates a root frame's globals before the program runs.
pub type Bootstrap = fn(&mut Frame) -> Raised<()>;

pub const EXIT_STARTUP_FAILURE: i32 = 1;
pub const EXIT_LOAD_FAILURE: i32 = 2;

#[derive(Error, Debug)]
pub enum DriverError {
    #[error("Startup Error: {0}")]
    Startup(BaseException),
    #[error("Load Error: {0}")]
    Load(#[from] LoadError),
}

impl DriverError {
    pub fn exit_code(&self) -> i32 {
        match self {
            DriverError::Startup(_) => EXIT_STARTUP_FAILURE,
            DriverError::Load(_) => EXIT_LOAD_FAILURE,
        }
    }
}

/// Process entry point: one root frame, one program, one exit status.
pub struct Driver {
    config: DriverConfig,
    services: Services,
    bootstrap: Bootstrap,
}

impl Driver {
    pub fn new(config: DriverConfig) -> Self {
        Driver {
            config,
            services: Services::default(),
            bootstrap: init_globals_for_ruby,
        }
    }

    pub fn with_services(mut self, services: Services) -> Self {
        self.services = services;
        self
    }

    pub fn with_bootstrap(mut self, bootstrap: Bootstrap) -> Self {
        self.bootstrap = bootstrap;
        self
    }

    /// Create the root frame, import the diagnostics module and install the
    /// compatibility globals, then load and run the program.
    ///
    /// `load` is only called once startup has fully succeeded.
    pub fn run<L>(self, load: L) -> i32
    where
        L: FnOnce(&DriverConfig) -> Result<CompiledProgram, LoadError>,
    {
        let Driver {
            config,
            services,
            bootstrap,
        } = self;
        let mut root = Frame::with_services(services);

        if let Err(e) = startup(&mut root, &config, bootstrap) {
            error!("{}", e);
            if let DriverError::Startup(exc) = &e {
                report_exception(&mut root, exc);
            }
            return e.exit_code();
        }

        let program = match load(&config).map_err(DriverError::from) {
            Ok(program) => program,
            Err(e) => {
                error!("{}", e);
                let _ = root.stderr().write_line(&e.to_string());
                return e.exit_code();
            }
        };

        let status = run_main(&mut root, program);
        info!("program finished with status {}", status);
        status
    }
}

/// Steps run before any user code: diagnostics import, then bootstrap.
pub fn startup(f: &mut Frame, config: &DriverConfig, bootstrap: Bootstrap) -> Result<(), DriverError> {
    import_module(f, &config.diagnostics_module).map_err(DriverError::Startup)?;
    bootstrap(f).map_err(DriverError::Startup)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Code, Expression, Stmt, StmtKind};
    use crate::exceptions::ExceptionKind;
    use crate::frame::Stream;
    use crate::module::ModuleRegistry;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct Captured {
        out: Rc<RefCell<Vec<u8>>>,
        err: Rc<RefCell<Vec<u8>>>,
    }

    impl Captured {
        fn new() -> Self {
            Captured {
                out: Rc::new(RefCell::new(Vec::new())),
                err: Rc::new(RefCell::new(Vec::new())),
            }
        }

        fn services(&self) -> Services {
            Services::default()
                .with_stdout(Stream::new(self.out.clone()))
                .with_stderr(Stream::new(self.err.clone()))
        }

        fn out(&self) -> String {
            String::from_utf8(self.out.borrow().clone()).unwrap()
        }

        fn err(&self) -> String {
            String::from_utf8(self.err.borrow().clone()).unwrap()
        }
    }

    fn program(body: Vec<Stmt>) -> CompiledProgram {
        CompiledProgram::new(Code::module("main.rb", body)).unwrap()
    }

    fn p_call(line: u32, args: Vec<Expression>) -> Stmt {
        Stmt::at(line, StmtKind::Expression(Expression::call("p", args)))
    }

    fn failing_bootstrap(_f: &mut Frame) -> Raised<()> {
        Err(BaseException::new(ExceptionKind::RuntimeError, "no globals for you"))
    }

    #[test]
    fn test_runs_program_with_ruby_globals() {
        let cap = Captured::new();
        let status = Driver::new(DriverConfig::default())
            .with_services(cap.services())
            .run(|_| {
                Ok(program(vec![p_call(
                    1,
                    vec![Expression::name("true"), Expression::int(1), Expression::str("x")],
                )]))
            });
        assert_eq!(status, 0);
        assert_eq!(cap.out(), "True\n1\nx\n");
        assert_eq!(cap.err(), "");
    }

    #[test]
    fn test_failed_diagnostics_import_never_runs_program() {
        let cap = Captured::new();
        let mut loaded = false;
        let status = Driver::new(DriverConfig::default())
            .with_services(cap.services().with_modules(ModuleRegistry::empty()))
            .run(|_| {
                loaded = true;
                Ok(program(vec![p_call(1, vec![Expression::int(1)])]))
            });
        assert_ne!(status, 0);
        assert_eq!(status, EXIT_STARTUP_FAILURE);
        assert!(!loaded);
        assert_eq!(cap.out(), "");
        assert_eq!(cap.err(), "ImportError: No module named traceback\n");
    }

    #[test]
    fn test_failed_bootstrap_never_runs_program() {
        let cap = Captured::new();
        let mut loaded = false;
        let status = Driver::new(DriverConfig::default())
            .with_services(cap.services())
            .with_bootstrap(failing_bootstrap)
            .run(|_| {
                loaded = true;
                Ok(program(vec![]))
            });
        assert_eq!(status, EXIT_STARTUP_FAILURE);
        assert!(!loaded);
        assert!(cap.err().ends_with("RuntimeError: no globals for you\n"));
    }

    #[test]
    fn test_load_failure_exit_status() {
        let cap = Captured::new();
        let status = Driver::new(DriverConfig::default())
            .with_services(cap.services())
            .run(|_| Err(LoadError::HashMismatch {
                expected: "aa".to_string(),
                computed: "bb".to_string(),
            }));
        assert_eq!(status, EXIT_LOAD_FAILURE);
        assert!(cap.err().starts_with("Load Error: Integrity Error"));
    }

    #[test]
    fn test_runtime_failure_in_puts_maps_to_exit_code() {
        let cap = Captured::new();
        let status = Driver::new(DriverConfig::default())
            .with_services(cap.services())
            .run(|_| {
                Ok(program(vec![
                    p_call(1, vec![Expression::str("before")]),
                    p_call(2, vec![Expression::name("undefined_thing")]),
                    p_call(3, vec![Expression::str("after")]),
                ]))
            });
        assert_eq!(status, 1);
        assert_eq!(cap.out(), "before\n");
        assert!(cap.err().contains("line 2, in <module>"));
    }

    #[test]
    fn test_loader_sees_config() {
        let cap = Captured::new();
        let config = DriverConfig::default().with_verify_integrity(false);
        let status = Driver::new(config)
            .with_services(cap.services())
            .run(|cfg| {
                assert!(!cfg.verify_integrity);
                Ok(program(vec![]))
            });
        assert_eq!(status, 0);
    }
}
