//! Shared fixtures for the unit tests.

use mlog_ir::{Expr, Span};
use mlog_values::{Instruction, ObjectValue, Scope, Value, ValueResult};

use crate::{BasicEvaluator, ExprHandler};

/// Span of a token on line 1.
pub(crate) fn at(column: u32) -> Span {
    Span::on_line(1, column, column + 1)
}

pub(crate) fn render(inst: &[Instruction]) -> Vec<String> {
    inst.iter().map(ToString::to_string).collect()
}

/// A macro tuple holding `items`.
pub(crate) fn tuple(items: Vec<Option<Value>>) -> Value {
    Value::object(ObjectValue::from_array(items, ObjectValue::new()))
}

/// Evaluator that counts calls and marks each evaluation with a `set`
/// into a fresh temporary, so evaluation order shows up in the output.
#[derive(Default)]
pub(crate) struct CountingEvaluator {
    pub(crate) inner: BasicEvaluator,
    pub(crate) evals: usize,
    pub(crate) consumes: usize,
}

impl ExprHandler for CountingEvaluator {
    fn handle_eval(&mut self, scope: &mut Scope, expr: &Expr) -> ValueResult {
        self.evals += 1;
        let (value, mut inst) = self.inner.handle_eval(scope, expr)?;
        let marker = scope.make_temp();
        inst.push(Instruction::set(&marker, &value));
        Ok((value, inst))
    }

    fn handle_consume(&mut self, scope: &mut Scope, expr: &Expr) -> ValueResult {
        self.consumes += 1;
        let (value, mut inst) = self.handle_eval(scope, expr)?;
        let (consumed, consume_inst) = value.consume(scope)?;
        inst.extend(consume_inst);
        Ok((consumed, inst))
    }
}
