//! Bindings: named associations between identifiers and values.

use crate::{Mutability, ScopeId, Value};

/// A declared name.
///
/// A binding is created once by the declaration compiler and never
/// rebound. Reassignment goes through the value (a store emits `set`),
/// not through the binding.
#[derive(Debug)]
pub struct Binding {
    identifier: String,
    /// Name used in diagnostics and, for stores, in the emitted program.
    name: String,
    scope: ScopeId,
    value: Value,
    constant: bool,
}

impl Binding {
    pub fn new(
        scope: ScopeId,
        identifier: impl Into<String>,
        name: impl Into<String>,
        value: Value,
        constant: bool,
    ) -> Self {
        Binding {
            identifier: identifier.into(),
            name: name.into(),
            scope,
            value,
            constant,
        }
    }

    #[inline]
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The scope that declared this binding.
    #[inline]
    pub fn scope(&self) -> ScopeId {
        self.scope
    }

    #[inline]
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Whether the name may not be reassigned.
    ///
    /// True for bindings declared constant and for bindings whose value is
    /// no longer `Variable` (a `const` store, a literal alias).
    pub fn is_constant(&self) -> bool {
        self.constant || self.value.mutability() != Mutability::Variable
    }
}
