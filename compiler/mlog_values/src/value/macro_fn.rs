//! Host-provided compile-time functions.

use std::fmt;
use std::rc::Rc;

use mlog_ir::{Operator, UnaryOperator};

use super::{unsupported_operator, CallResult, Mutability, Value, ValueCapabilities, ValueResult};
use crate::errors::CompilerError;
use crate::Scope;

type MacroFn = dyn Fn(&mut Scope, &[Value]) -> CallResult;

/// A function the compiler runs while compiling.
///
/// The wrapped function validates its arguments before emitting anything;
/// a failed call leaves no instructions behind.
#[derive(Clone)]
pub struct MacroFunction {
    name: Rc<str>,
    function: Rc<MacroFn>,
}

impl MacroFunction {
    pub fn new(
        name: &str,
        function: impl Fn(&mut Scope, &[Value]) -> CallResult + 'static,
    ) -> Self {
        MacroFunction {
            name: Rc::from(name),
            function: Rc::new(function),
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn invoke(&self, scope: &mut Scope, args: &[Value]) -> CallResult {
        tracing::debug!(name = %self.name, args = args.len(), "invoking macro function");
        (self.function)(scope, args)
    }
}

impl fmt::Debug for MacroFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("MacroFunction").field(&self.name).finish()
    }
}

impl ValueCapabilities for MacroFunction {
    fn is_macro(&self) -> bool {
        true
    }

    fn mutability(&self) -> Mutability {
        Mutability::Immutable
    }

    fn eval(&self, this: &Value, _scope: &mut Scope) -> ValueResult {
        Ok((this.clone(), Vec::new()))
    }

    fn consume(&self, this: &Value, _scope: &mut Scope) -> ValueResult {
        Ok((this.clone(), Vec::new()))
    }

    fn call(&self, _this: &Value, scope: &mut Scope, args: &[Value]) -> CallResult {
        self.invoke(scope, args)
    }

    fn ensure_owned(&self, _this: &Value) -> Result<(), CompilerError> {
        Ok(())
    }

    fn operate(
        &self,
        this: &Value,
        _scope: &mut Scope,
        op: Operator,
        _operands: &[Value],
    ) -> ValueResult {
        match op {
            Operator::Unary(UnaryOperator::TypeOf) => Ok((Value::string("function"), Vec::new())),
            _ => Err(unsupported_operator(op, this)),
        }
    }
}
