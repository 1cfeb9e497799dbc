//! The seam between the declaration compiler and expression evaluation.
//!
//! Declarations never evaluate expressions themselves. Initializers and
//! computed keys are handed to an [`ExprHandler`], which stands in for the
//! full expression handler table of the compiler.

use mlog_ir::{Expr, ExprId, ExprKind};
use mlog_values::errors::{undefined_identifier, unknown_expression};
use mlog_values::{Scope, Value, ValueResult};
use rustc_hash::FxHashMap;

/// Evaluates expressions on behalf of the declaration compiler.
pub trait ExprHandler {
    /// Evaluate `expr` to a value.
    fn handle_eval(&mut self, scope: &mut Scope, expr: &Expr) -> ValueResult;

    /// Evaluate `expr` and take ownership of the result.
    fn handle_consume(&mut self, scope: &mut Scope, expr: &Expr) -> ValueResult {
        let (value, mut inst) = self.handle_eval(scope, expr)?;
        let (consumed, consume_inst) = value.consume(scope)?;
        inst.extend(consume_inst);
        Ok((consumed, inst))
    }
}

/// Minimal evaluator: identifiers resolve through the scope chain, literals
/// become literal values, opaque expressions resolve through a table the
/// caller fills in.
#[derive(Debug, Default)]
pub struct BasicEvaluator {
    opaque: FxHashMap<ExprId, Value>,
}

impl BasicEvaluator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `id` evaluate to `value`.
    pub fn define(&mut self, id: ExprId, value: Value) {
        self.opaque.insert(id, value);
    }

    #[must_use]
    pub fn with(mut self, id: ExprId, value: Value) -> Self {
        self.define(id, value);
        self
    }
}

impl ExprHandler for BasicEvaluator {
    fn handle_eval(&mut self, scope: &mut Scope, expr: &Expr) -> ValueResult {
        let value = match &expr.kind {
            ExprKind::Identifier(name) => scope
                .lookup(name)
                .map(|binding| binding.value().clone())
                .ok_or_else(|| undefined_identifier(name)),
            ExprKind::Literal(literal) => Ok(Value::literal(literal.clone())),
            ExprKind::Opaque(id) => self
                .opaque
                .get(id)
                .cloned()
                .ok_or_else(|| unknown_expression(id.raw())),
        };
        value
            .map(|value| (value, Vec::new()))
            .map_err(|err| err.with_span(expr.span))
    }
}
