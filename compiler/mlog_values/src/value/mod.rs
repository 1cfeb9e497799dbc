//! Compile-time values.
//!
//! Every compiled expression produces a [`Value`]. A value is a cheap,
//! shared handle: cloning it yields the same value, which matters because
//! bindings alias values and instructions reference them.
//!
//! # Capabilities
//!
//! What a value can do is described by [`ValueCapabilities`]. Each method
//! has a default implementation that fails with a capability error naming
//! the operation and the value. Variants override only what they support:
//!
//! | variant      | macro | mutability      | eval/consume | get      | call    | operators        |
//! |--------------|-------|-----------------|--------------|----------|---------|------------------|
//! | `Void`       | no    | variable        | -            | -        | -       | -                |
//! | `Literal`    | no    | immutable       | self         | `length` | -       | constant folding |
//! | `Store`      | no    | per binding     | self         | -        | -       | emits `set`/`op` |
//! | `Object`     | yes   | immutable       | handlers     | members  | handler | handlers         |
//! | `Macro`      | yes   | immutable       | self         | -        | invokes | `typeof`         |
//!
//! Operators go through a single entry point, [`Value::operate`],
//! parameterized by the [`Operator`] tag.

mod literal;
mod macro_fn;
mod object;
mod runtime;
mod store;

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use mlog_ir::{AssignmentOperator, BinaryOperator, LitValue, Operator, UnaryOperator};

use crate::errors::{capability_unsupported, CompilerError};
use crate::{Binding, Instruction, Scope};

pub use literal::{format_number, LiteralValue};
pub use macro_fn::MacroFunction;
pub use object::{ObjectHandler, ObjectKey, ObjectValue};
pub use store::{StoreKind, StoreValue};

/// A value together with the instructions that produce it.
pub type ValueInstructions = (Value, Vec<Instruction>);

/// Result of a capability that always yields a value.
pub type ValueResult = Result<ValueInstructions, CompilerError>;

/// Result of a call, which may yield no value.
pub type CallResult = Result<(Option<Value>, Vec<Instruction>), CompilerError>;

/// How a name bound to a value may change.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Mutability {
    /// The binding can be reassigned.
    Variable,
    /// The binding is fixed after initialization but has a runtime slot.
    ConstantBinding,
    /// The content itself cannot change, so the value can be aliased
    /// without a runtime slot.
    Immutable,
}

/// Capability set shared by every value variant.
///
/// `this` is the handle the capability was invoked through, so
/// implementations can hand it back without reallocating.
pub trait ValueCapabilities {
    /// Whether the value exists only at compile time.
    fn is_macro(&self) -> bool {
        false
    }

    fn mutability(&self) -> Mutability {
        Mutability::Variable
    }

    fn eval(&self, this: &Value, _scope: &mut Scope) -> ValueResult {
        Err(capability_unsupported("eval", this))
    }

    fn consume(&self, this: &Value, _scope: &mut Scope) -> ValueResult {
        Err(capability_unsupported("consume", this))
    }

    fn call(&self, this: &Value, _scope: &mut Scope, _args: &[Value]) -> CallResult {
        Err(capability_unsupported("call", this))
    }

    fn get(&self, this: &Value, _scope: &mut Scope, _key: &Value) -> ValueResult {
        Err(capability_unsupported("get", this))
    }

    /// Mark the value as exclusively held by whoever consumed it.
    fn ensure_owned(&self, this: &Value) -> Result<(), CompilerError> {
        Err(capability_unsupported("be owned", this))
    }

    fn operate(
        &self,
        this: &Value,
        _scope: &mut Scope,
        op: Operator,
        _operands: &[Value],
    ) -> ValueResult {
        Err(unsupported_operator(op, this))
    }
}

pub(crate) fn unsupported_operator(op: Operator, value: &Value) -> CompilerError {
    capability_unsupported(format_args!("'{op}' operation"), value)
}

/// The base variant: supports nothing.
#[derive(Clone, Copy, Debug, Default)]
pub struct VoidValue;

impl ValueCapabilities for VoidValue {}

/// Value variants.
#[derive(Debug)]
pub enum ValueKind {
    Void(VoidValue),
    Literal(LiteralValue),
    Store(StoreValue),
    Object(ObjectValue),
    Macro(MacroFunction),
}

struct ValueData {
    kind: ValueKind,
    /// Binding that currently names this value.
    owner: RefCell<Weak<Binding>>,
}

/// Shared handle to a compile-time value.
#[derive(Clone)]
pub struct Value(Rc<ValueData>);

// Construction

impl Value {
    fn from_kind(kind: ValueKind) -> Self {
        Value(Rc::new(ValueData {
            kind,
            owner: RefCell::new(Weak::new()),
        }))
    }

    pub fn void() -> Self {
        Value::from_kind(ValueKind::Void(VoidValue))
    }

    pub fn literal(data: impl Into<LitValue>) -> Self {
        Value::from_kind(ValueKind::Literal(LiteralValue::new(data.into())))
    }

    #[inline]
    pub fn number(n: f64) -> Self {
        Value::literal(LitValue::Number(n))
    }

    #[inline]
    pub fn string(s: impl Into<String>) -> Self {
        Value::literal(LitValue::String(s.into()))
    }

    #[inline]
    pub fn boolean(b: bool) -> Self {
        Value::literal(LitValue::Bool(b))
    }

    pub fn store(store: StoreValue) -> Self {
        Value::from_kind(ValueKind::Store(store))
    }

    pub fn object(object: ObjectValue) -> Self {
        Value::from_kind(ValueKind::Object(object))
    }

    pub fn macro_function(function: MacroFunction) -> Self {
        Value::from_kind(ValueKind::Macro(function))
    }
}

// Inspection

impl Value {
    #[inline]
    pub fn kind(&self) -> &ValueKind {
        &self.0.kind
    }

    pub fn as_literal(&self) -> Option<&LitValue> {
        match self.kind() {
            ValueKind::Literal(literal) => Some(literal.data()),
            _ => None,
        }
    }

    pub fn as_store(&self) -> Option<&StoreValue> {
        match self.kind() {
            ValueKind::Store(store) => Some(store),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&ObjectValue> {
        match self.kind() {
            ValueKind::Object(object) => Some(object),
            _ => None,
        }
    }

    pub fn as_macro_function(&self) -> Option<&MacroFunction> {
        match self.kind() {
            ValueKind::Macro(function) => Some(function),
            _ => None,
        }
    }

    /// Whether the value has no runtime representation.
    #[inline]
    pub fn is_macro(&self) -> bool {
        self.capabilities().is_macro()
    }

    #[inline]
    pub fn mutability(&self) -> Mutability {
        self.capabilities().mutability()
    }

    /// The binding that currently names this value, if it is still alive.
    pub fn owner(&self) -> Option<Rc<Binding>> {
        self.0.owner.borrow().upgrade()
    }

    /// Record `binding` as the owner unless another live binding already is.
    pub(crate) fn adopt_owner(&self, binding: &Rc<Binding>) {
        let mut owner = self.0.owner.borrow_mut();
        if owner.upgrade().is_none() {
            *owner = Rc::downgrade(binding);
        }
    }

    /// Identity comparison: both handles refer to the same value.
    #[inline]
    pub fn ptr_eq(&self, other: &Value) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    fn capabilities(&self) -> &dyn ValueCapabilities {
        match self.kind() {
            ValueKind::Void(void) => void,
            ValueKind::Literal(literal) => literal,
            ValueKind::Store(store) => store,
            ValueKind::Object(object) => object,
            ValueKind::Macro(function) => function,
        }
    }
}

// Capabilities

impl Value {
    pub fn eval(&self, scope: &mut Scope) -> ValueResult {
        self.capabilities().eval(self, scope)
    }

    pub fn consume(&self, scope: &mut Scope) -> ValueResult {
        self.capabilities().consume(self, scope)
    }

    pub fn call(&self, scope: &mut Scope, args: &[Value]) -> CallResult {
        self.capabilities().call(self, scope, args)
    }

    pub fn get(&self, scope: &mut Scope, key: &Value) -> ValueResult {
        self.capabilities().get(self, scope, key)
    }

    pub fn ensure_owned(&self) -> Result<(), CompilerError> {
        self.capabilities().ensure_owned(self)
    }

    /// Apply `op` with this value as receiver.
    pub fn operate(&self, scope: &mut Scope, op: Operator, operands: &[Value]) -> ValueResult {
        tracing::trace!(value = %self, %op, operands = operands.len(), "operate");
        self.capabilities().operate(self, scope, op, operands)
    }

    pub fn unary(&self, scope: &mut Scope, op: UnaryOperator) -> ValueResult {
        self.operate(scope, Operator::Unary(op), &[])
    }

    pub fn binary(&self, scope: &mut Scope, op: BinaryOperator, rhs: &Value) -> ValueResult {
        self.operate(scope, Operator::Binary(op), std::slice::from_ref(rhs))
    }

    pub fn assign(&self, scope: &mut Scope, op: AssignmentOperator, rhs: &Value) -> ValueResult {
        self.operate(scope, Operator::Assignment(op), std::slice::from_ref(rhs))
    }

    pub fn type_of(&self, scope: &mut Scope) -> ValueResult {
        self.unary(scope, UnaryOperator::TypeOf)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind() {
            ValueKind::Void(_) => f.write_str("void"),
            ValueKind::Literal(literal) => fmt::Display::fmt(literal, f),
            ValueKind::Store(store) => f.write_str(store.name()),
            ValueKind::Object(_) => f.write_str("[object]"),
            ValueKind::Macro(function) => write!(f, "[macro {}]", function.name()),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Value").field(self.kind()).finish()
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
