//! Port for the per-visitor key/value scope that carries booking drafts
//! between requests.
//!
//! Values cross the port as JSON so adapters need no knowledge of domain
//! types. The HTTP adapter implements it over the cookie session; tests use
//! [`MemorySessionScope`].

use std::cell::RefCell;
use std::collections::HashMap;

use serde_json::Value;

use super::define_port_error;

define_port_error! {
    /// Errors raised by session scope adapters.
    pub enum SessionScopeError {
        /// A stored value could not be read back.
        Read { message: String } => "session read failed: {message}",
        /// A value could not be stored.
        Write { message: String } => "session write failed: {message}",
    }
}

/// Per-visitor key/value scope.
///
/// Implementations use interior mutability; a scope is only ever touched by
/// the request that owns it.
pub trait SessionScope {
    /// Read a value. `Ok(None)` when the key is unset.
    fn get_value(&self, key: &str) -> Result<Option<Value>, SessionScopeError>;

    /// Store a value, replacing any previous one.
    fn put_value(&self, key: &str, value: Value) -> Result<(), SessionScopeError>;

    /// Drop a key. Removing an unset key is a no-op.
    fn remove_value(&self, key: &str);
}

/// In-memory scope for tests and request-less callers.
#[derive(Debug, Default)]
pub struct MemorySessionScope {
    values: RefCell<HashMap<String, Value>>,
}

impl MemorySessionScope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.borrow().contains_key(key)
    }
}

impl SessionScope for MemorySessionScope {
    fn get_value(&self, key: &str) -> Result<Option<Value>, SessionScopeError> {
        Ok(self.values.borrow().get(key).cloned())
    }

    fn put_value(&self, key: &str, value: Value) -> Result<(), SessionScopeError> {
        self.values.borrow_mut().insert(key.to_owned(), value);
        Ok(())
    }

    fn remove_value(&self, key: &str) {
        self.values.borrow_mut().remove(key);
    }
}
