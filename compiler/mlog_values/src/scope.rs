//! Lexical scopes for the declaration compiler.
//!
//! A scope owns a name table and links to its parent. The declaration
//! compiler needs two operations from it: [`Scope::make`], which allocates a
//! fresh runtime slot, and [`Scope::set`], which registers a binding that
//! needs no slot. Everything else here serves expression evaluation.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::ops::Deref;
use std::rc::Rc;

use mlog_ir::temp_name;
use rustc_hash::FxHashMap;

use crate::errors::{already_declared, CompilerError};
use crate::{Binding, StoreValue, Value};

/// Identifies a scope within one compilation.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct ScopeId(u32);

impl ScopeId {
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

/// Shared, single-threaded handle to a scope.
///
/// Child scopes hold their parent through this handle so the parent can
/// be borrowed while the child is alive.
#[repr(transparent)]
pub struct LocalScope<T>(Rc<RefCell<T>>);

impl<T> LocalScope<T> {
    #[inline]
    pub fn new(value: T) -> Self {
        LocalScope(Rc::new(RefCell::new(value)))
    }
}

impl<T> Clone for LocalScope<T> {
    #[inline]
    fn clone(&self) -> Self {
        LocalScope(Rc::clone(&self.0))
    }
}

impl<T: fmt::Debug> fmt::Debug for LocalScope<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("LocalScope").field(&self.0).finish()
    }
}

impl<T> Deref for LocalScope<T> {
    type Target = RefCell<T>;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Counters shared by every scope of one compilation.
#[derive(Debug, Default)]
struct Counters {
    scopes: Cell<u32>,
    temps: Cell<u32>,
}

impl Counters {
    fn next(counter: &Cell<u32>) -> u32 {
        let n = counter.get();
        counter.set(n + 1);
        n
    }
}

/// A single scope containing bindings.
#[derive(Debug)]
pub struct Scope {
    id: ScopeId,
    bindings: FxHashMap<String, Rc<Binding>>,
    parent: Option<LocalScope<Scope>>,
    counters: Rc<Counters>,
}

impl Scope {
    /// Create a root scope.
    pub fn new() -> Self {
        Scope::with_counters(None, Rc::new(Counters::default()))
    }

    /// Create a child of `parent`. Temporaries stay unique across the chain.
    pub fn with_parent(parent: LocalScope<Scope>) -> Self {
        let counters = Rc::clone(&parent.borrow().counters);
        Scope::with_counters(Some(parent), counters)
    }

    fn with_counters(parent: Option<LocalScope<Scope>>, counters: Rc<Counters>) -> Self {
        let id = ScopeId(Counters::next(&counters.scopes));
        Scope {
            id,
            bindings: FxHashMap::default(),
            parent,
            counters,
        }
    }

    #[inline]
    pub fn id(&self) -> ScopeId {
        self.id
    }

    /// Allocate a runtime slot named `name` and bind it to `identifier`.
    pub fn make(&mut self, identifier: &str, name: &str) -> Result<Value, CompilerError> {
        let store = Value::store(StoreValue::named(name));
        let binding = Binding::new(self.id, identifier, name, store.clone(), false);
        self.set(binding)?;
        Ok(store)
    }

    /// Register `binding` in this scope.
    ///
    /// The bound value records the binding as its owner unless it is
    /// already owned, so an alias never steals ownership from the
    /// original name.
    pub fn set(&mut self, binding: Binding) -> Result<Rc<Binding>, CompilerError> {
        if self.bindings.contains_key(binding.identifier()) {
            return Err(already_declared(binding.identifier()));
        }
        let binding = Rc::new(binding);
        binding.value().adopt_owner(&binding);
        tracing::debug!(
            scope = self.id.raw(),
            identifier = binding.identifier(),
            value = %binding.value(),
            "bind"
        );
        self.bindings
            .insert(binding.identifier().to_owned(), Rc::clone(&binding));
        Ok(binding)
    }

    /// Allocate an anonymous runtime slot.
    pub fn make_temp(&mut self) -> Value {
        let name = temp_name(Counters::next(&self.counters.temps));
        Value::store(StoreValue::temporary(name))
    }

    /// Look up `identifier` in this scope, then in its ancestors.
    pub fn lookup(&self, identifier: &str) -> Option<Rc<Binding>> {
        if let Some(binding) = self.bindings.get(identifier) {
            return Some(Rc::clone(binding));
        }
        self.parent
            .as_ref()
            .and_then(|parent| parent.borrow().lookup(identifier))
    }

    /// Look up `identifier` in this scope only.
    pub fn get_own(&self, identifier: &str) -> Option<&Rc<Binding>> {
        self.bindings.get(identifier)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl Default for Scope {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
