//! Binding patterns to values.
//!
//! - [`Compiler::declare`] dispatches on the pattern shape.
//! - Identifiers either alias a structurally constant value (no
//!   instructions) or get a fresh store and a `set`.
//! - Array patterns read the own numeric keys of a macro object.
//! - Object patterns consume the initializer once, then `get` each key.
//!
//! The first error aborts the declaration. Bindings made before the error
//! stay in the scope; callers discard the whole statement.

use mlog_ir::{
    node_name, ArrayPattern, AssignmentOperator, DeclarationKind, ExprKind, Identifier,
    ObjectPattern, ObjectPatternProperty, Pattern, PatternProperty,
};
use mlog_values::errors::{
    macro_binding, missing_index, missing_initializer, not_a_macro, not_an_object,
    pattern_too_deep, rest_not_supported, uninitialized_constant, unsupported_pattern,
};
use mlog_values::{Binding, CompilerError, Instruction, Mutability, ObjectKey, Scope, Value};

use crate::stack::ensure_sufficient_stack;
use crate::{Compiler, ExprHandler};

impl<H: ExprHandler> Compiler<H> {
    /// Bind `pattern` to `init` in `scope`.
    ///
    /// Returns the instructions that perform the binding at runtime, which
    /// is empty when every name ends up as a compile-time alias.
    pub fn declare(
        &mut self,
        scope: &mut Scope,
        pattern: &Pattern,
        kind: DeclarationKind,
        init: Option<&Value>,
    ) -> Result<Vec<Instruction>, CompilerError> {
        let limit = self.options().max_pattern_depth;
        if self.depth >= limit {
            return Err(pattern_too_deep(limit).with_span(pattern.span()));
        }

        self.depth += 1;
        let result = ensure_sufficient_stack(|| {
            self.handle(pattern.span(), |this| match pattern {
                Pattern::Identifier(id) => this.declare_identifier(scope, id, kind, init),
                Pattern::Array(array) => this.declare_array_pattern(scope, array, kind, init),
                Pattern::Object(object) => this.declare_object_pattern(scope, object, kind, init),
                Pattern::Assignment(_) | Pattern::Rest(_) | Pattern::Member(_) => {
                    Err(unsupported_pattern(pattern.kind_name()))
                }
            })
        });
        self.depth -= 1;
        result
    }

    fn declare_identifier(
        &mut self,
        scope: &mut Scope,
        id: &Identifier,
        kind: DeclarationKind,
        init: Option<&Value>,
    ) -> Result<Vec<Instruction>, CompilerError> {
        let name = self.store_name(id);

        if kind.is_const() {
            let Some(init) = init else {
                return Err(uninitialized_constant());
            };
            if init.mutability() == Mutability::Immutable {
                tracing::debug!(identifier = %id.name, value = %init, "aliasing constant");
                let binding = Binding::new(scope.id(), id.name.as_str(), name, init.clone(), true);
                scope.set(binding)?;
                return Ok(Vec::new());
            }
        }

        let store = scope.make(&id.name, &name)?;
        tracing::debug!(identifier = %id.name, store = %store, %kind, "allocated store");

        let mut inst = Vec::new();
        if let Some(init) = init {
            if init.is_macro() {
                return Err(macro_binding());
            }
            let (_, assign) = store.assign(scope, AssignmentOperator::Assign, init)?;
            inst = assign;
        }
        if kind.is_const() {
            if let Some(store) = store.as_store() {
                store.set_mutability(Mutability::ConstantBinding);
            }
        }
        Ok(inst)
    }

    fn declare_array_pattern(
        &mut self,
        scope: &mut Scope,
        pattern: &ArrayPattern,
        kind: DeclarationKind,
        init: Option<&Value>,
    ) -> Result<Vec<Instruction>, CompilerError> {
        let init = init.ok_or_else(|| missing_initializer("array"))?;
        if !init.is_macro() {
            return Err(not_a_macro());
        }
        let object = init.as_object().ok_or_else(not_an_object)?;

        let mut inst = Vec::new();
        for (index, element) in pattern.elements.iter().enumerate() {
            let Some(element) = element else {
                continue;
            };
            let key = ObjectKey::from(index);
            let value = object
                .get_own(key.as_str())
                .ok_or_else(|| missing_index(index).with_span(element.span()))?;
            tracing::trace!(index, value = %value, "destructuring element");
            inst.extend(self.declare(scope, element, kind, Some(value))?);
        }
        Ok(inst)
    }

    fn declare_object_pattern(
        &mut self,
        scope: &mut Scope,
        pattern: &ObjectPattern,
        kind: DeclarationKind,
        init: Option<&Value>,
    ) -> Result<Vec<Instruction>, CompilerError> {
        let init = init.ok_or_else(|| missing_initializer("object"))?;
        let (consumed, mut inst) = init.consume(scope)?;

        for property in &pattern.properties {
            let property = match property {
                ObjectPatternProperty::Property(property) => property,
                ObjectPatternProperty::Rest(rest) => {
                    return Err(rest_not_supported().with_span(rest.span));
                }
            };
            inst.extend(self.handle(property.span, |this| {
                this.declare_property(scope, &consumed, property, kind)
            })?);
        }
        Ok(inst)
    }

    /// Key, then `get`, then the nested binding, in that order.
    fn declare_property(
        &mut self,
        scope: &mut Scope,
        object: &Value,
        property: &PatternProperty,
        kind: DeclarationKind,
    ) -> Result<Vec<Instruction>, CompilerError> {
        let mut inst = Vec::new();
        let key = match &property.key.kind {
            ExprKind::Identifier(name) if !property.computed => Value::string(name.as_str()),
            _ => {
                let (key, key_inst) = self.handler.handle_consume(scope, &property.key)?;
                inst.extend(key_inst);
                key
            }
        };
        tracing::trace!(key = %key, "destructuring property");

        let (value, get_inst) = object.get(scope, &key)?;
        inst.extend(get_inst);
        inst.extend(self.declare(scope, &property.value, kind, Some(&value))?);
        Ok(inst)
    }

    /// Name of the store backing `id`.
    fn store_name(&self, id: &Identifier) -> String {
        let identifier = (!self.options().compact_names).then_some(id.name.as_str());
        node_name(id.span, identifier)
    }
}

/// Bind `pattern` to `init` with default options.
///
/// Computed object keys are evaluated by a [`crate::BasicEvaluator`], so
/// they may only be literals or identifiers bound in `scope`.
pub fn declare(
    scope: &mut Scope,
    pattern: &Pattern,
    kind: DeclarationKind,
    init: Option<&Value>,
) -> Result<Vec<Instruction>, CompilerError> {
    Compiler::new(crate::CompilerOptions::default()).declare(scope, pattern, kind, init)
}
