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
use crate::runtime::Value;

use std::collections::{HashMap, HashSet};

/// A global name table.
///
/// Keys are unique and later writes win. A frozen namespace rejects every
/// write with `TypeError`; a read-only name rejects writes to that one key.
/// These are the two ways a global write can fail.
#[derive(Debug, Clone, Default)]
pub struct Namespace {
    items: HashMap<String, Value>,
    read_only: HashSet<String>,
    frozen: bool,
}

impl Namespace {
    pub fn new() -> Self {
        Namespace {
            items: HashMap::new(),
            read_only: HashSet::new(),
            frozen: false,
        }
    }

    pub fn get_item_str(&self, name: &str) -> Option<Value> {
        self.items.get(name).cloned()
    }

    pub fn set_item_str(&mut self, name: &str, value: Value) -> Raised<()> {
        if self.frozen {
            return Err(BaseException::type_error(format!(
                "namespace is read-only, cannot assign '{}'",
                name
            )));
        }
        if self.read_only.contains(name) {
            return Err(BaseException::type_error(format!(
                "'{}' is read-only",
                name
            )));
        }
        self.items.insert(name.to_string(), value);
        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.items.contains_key(name)
    }

    pub fn freeze(&mut self) {
        self.frozen = true;
    }

    /// Reject later writes to `name`; its current binding, if any, stays.
    pub fn set_read_only(&mut self, name: &str) {
        self.read_only.insert(name.to_string());
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Bound names in sorted order.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.items.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exceptions::ExceptionKind;

    #[test]
    fn test_later_writes_overwrite() {
        let mut ns = Namespace::new();
        ns.set_item_str("x", Value::Int(1)).unwrap();
        ns.set_item_str("x", Value::Int(2)).unwrap();
        assert_eq!(ns.get_item_str("x"), Some(Value::Int(2)));
        assert_eq!(ns.len(), 1);
    }

    #[test]
    fn test_frozen_namespace_rejects_writes() {
        let mut ns = Namespace::new();
        ns.set_item_str("kept", Value::None).unwrap();
        ns.freeze();

        let err = ns.set_item_str("x", Value::Int(1)).unwrap_err();
        assert!(err.is(ExceptionKind::TypeError));
        assert!(!ns.contains("x"));
        assert!(ns.contains("kept"));
    }

    #[test]
    fn test_read_only_name_rejects_only_that_name() {
        let mut ns = Namespace::new();
        ns.set_item_str("fixed", Value::Int(1)).unwrap();
        ns.set_read_only("fixed");

        let err = ns.set_item_str("fixed", Value::Int(2)).unwrap_err();
        assert!(err.is(ExceptionKind::TypeError));
        assert_eq!(err.message, "'fixed' is read-only");
        assert_eq!(ns.get_item_str("fixed"), Some(Value::Int(1)));
        ns.set_item_str("other", Value::Int(3)).unwrap();
        assert_eq!(ns.get_item_str("other"), Some(Value::Int(3)));
    }

    #[test]
    fn test_names_sorted() {
        let mut ns = Namespace::new();
        for name in ["p", "false", "true"] {
            ns.set_item_str(name, Value::None).unwrap();
        }
        assert_eq!(ns.names(), vec!["false", "p", "true"]);
    }
}
