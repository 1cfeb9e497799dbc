//! Compile-time objects.
//!
//! An object is an ordered map from keys to values, plus an optional
//! table of handlers that let macro libraries give it custom semantics
//! (`$get`, `$eval`, `$consume`, `$call` and one per operator). Objects
//! never exist at runtime.
//!
//! Own members always win over handlers: a member named `constructor` is
//! returned as-is even when a `$get` handler exists.

use std::borrow::Borrow;
use std::fmt;

use mlog_ir::{LitValue, Operator, UnaryOperator};
use rustc_hash::FxHashMap;

use super::{
    format_number, unsupported_operator, CallResult, MacroFunction, Mutability, Value,
    ValueCapabilities, ValueResult,
};
use crate::errors::{
    capability_unsupported, handler_without_value, undefined_member, CompilerError,
};
use crate::Scope;

/// Member key. Numeric keys are stored in their canonical string form,
/// so `0` and `"0"` name the same member.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct ObjectKey(Box<str>);

impl ObjectKey {
    pub fn from_literal(literal: &LitValue) -> Self {
        match literal {
            LitValue::String(s) => ObjectKey(s.as_str().into()),
            LitValue::Number(n) => ObjectKey(format_number(*n).into()),
            LitValue::Bool(b) => ObjectKey(b.to_string().into()),
        }
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ObjectKey {
    fn from(key: &str) -> Self {
        ObjectKey(key.into())
    }
}

impl From<usize> for ObjectKey {
    fn from(index: usize) -> Self {
        ObjectKey(index.to_string().into())
    }
}

impl Borrow<str> for ObjectKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ObjectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Operation an object handler intercepts.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ObjectHandler {
    Get,
    Eval,
    Consume,
    Call,
    Operator(Operator),
}

impl fmt::Display for ObjectHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => f.write_str("$get"),
            Self::Eval => f.write_str("$eval"),
            Self::Consume => f.write_str("$consume"),
            Self::Call => f.write_str("$call"),
            Self::Operator(op) => write!(f, "${op}"),
        }
    }
}

/// A compile-time aggregate.
#[derive(Clone, Debug, Default)]
pub struct ObjectValue {
    members: FxHashMap<ObjectKey, Value>,
    order: Vec<ObjectKey>,
    handlers: FxHashMap<ObjectHandler, MacroFunction>,
}

impl ObjectValue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a tuple: members `0..n` hold the present items, `length` is `n`.
    ///
    /// Absent items leave a gap in the numeric keys but still count toward
    /// `length`. Items and `length` override members of `extra`.
    pub fn from_array(items: Vec<Option<Value>>, extra: ObjectValue) -> Self {
        let mut object = extra;
        let length = u32::try_from(items.len()).unwrap_or(u32::MAX);
        object.insert("length", Value::number(f64::from(length)));
        for (index, item) in items.into_iter().enumerate() {
            if let Some(item) = item {
                object.insert(index, item);
            }
        }
        object
    }

    /// Insert or replace a member. Replacing keeps the original position.
    pub fn insert(&mut self, key: impl Into<ObjectKey>, value: Value) -> Option<Value> {
        let key = key.into();
        let previous = self.members.insert(key.clone(), value);
        if previous.is_none() {
            self.order.push(key);
        }
        previous
    }

    #[must_use]
    pub fn with_member(mut self, key: impl Into<ObjectKey>, value: Value) -> Self {
        self.insert(key, value);
        self
    }

    pub fn set_handler(&mut self, handler: ObjectHandler, function: MacroFunction) {
        self.handlers.insert(handler, function);
    }

    #[must_use]
    pub fn with_handler(mut self, handler: ObjectHandler, function: MacroFunction) -> Self {
        self.set_handler(handler, function);
        self
    }

    /// Exact own-member lookup.
    pub fn get_own(&self, key: &str) -> Option<&Value> {
        self.members.get(key)
    }

    /// Own-member lookup by a literal key. Non-literal keys never match.
    pub fn own_member(&self, key: &Value) -> Option<&Value> {
        let key = ObjectKey::from_literal(key.as_literal()?);
        self.members.get(&key)
    }

    pub fn handler(&self, handler: ObjectHandler) -> Option<&MacroFunction> {
        self.handlers.get(&handler)
    }

    /// Member keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &ObjectKey> {
        self.order.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

fn call_handler(
    handler: ObjectHandler,
    function: &MacroFunction,
    scope: &mut Scope,
    args: &[Value],
) -> ValueResult {
    tracing::trace!(%handler, "dispatching object handler");
    let (value, inst) = function.invoke(scope, args)?;
    let value = value.ok_or_else(|| handler_without_value(handler))?;
    Ok((value, inst))
}

impl ValueCapabilities for ObjectValue {
    fn is_macro(&self) -> bool {
        true
    }

    fn mutability(&self) -> Mutability {
        Mutability::Immutable
    }

    fn get(&self, _this: &Value, scope: &mut Scope, key: &Value) -> ValueResult {
        if let Some(member) = self.own_member(key) {
            return Ok((member.clone(), Vec::new()));
        }
        match self.handler(ObjectHandler::Get) {
            Some(function) => {
                call_handler(ObjectHandler::Get, function, scope, std::slice::from_ref(key))
            }
            None => Err(undefined_member()),
        }
    }

    fn eval(&self, this: &Value, scope: &mut Scope) -> ValueResult {
        match self.handler(ObjectHandler::Eval) {
            Some(function) => call_handler(ObjectHandler::Eval, function, scope, &[]),
            None => Ok((this.clone(), Vec::new())),
        }
    }

    fn consume(&self, this: &Value, scope: &mut Scope) -> ValueResult {
        if let Some(function) = self.handler(ObjectHandler::Consume) {
            return call_handler(ObjectHandler::Consume, function, scope, &[]);
        }
        let (value, inst) = self.eval(this, scope)?;
        value.ensure_owned()?;
        Ok((value, inst))
    }

    fn call(&self, this: &Value, scope: &mut Scope, args: &[Value]) -> CallResult {
        match self.handler(ObjectHandler::Call) {
            Some(function) => function.invoke(scope, args),
            None => Err(capability_unsupported("call", this)),
        }
    }

    fn ensure_owned(&self, _this: &Value) -> Result<(), CompilerError> {
        Ok(())
    }

    fn operate(
        &self,
        this: &Value,
        scope: &mut Scope,
        op: Operator,
        operands: &[Value],
    ) -> ValueResult {
        if op == Operator::Unary(UnaryOperator::TypeOf) {
            return Ok((Value::string("object"), Vec::new()));
        }
        let handler = ObjectHandler::Operator(op);
        match self.handler(handler) {
            Some(function) => call_handler(handler, function, scope, operands),
            None => Err(unsupported_operator(op, this)),
        }
    }
}
