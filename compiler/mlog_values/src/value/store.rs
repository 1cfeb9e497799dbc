//! Store-backed values: handles to runtime storage slots.

use std::cell::Cell;

use mlog_ir::{AssignmentOperator, Operator};

use super::{runtime, unsupported_operator, Mutability, Value, ValueCapabilities, ValueResult};
use crate::errors::{constant_assignment, macro_store, CompilerError};
use crate::{Instruction, Scope};

/// Whether a store was declared by the program or created by the compiler.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum StoreKind {
    Named,
    Temporary,
}

/// A runtime storage slot.
#[derive(Debug)]
pub struct StoreValue {
    name: String,
    kind: StoreKind,
    mutability: Cell<Mutability>,
}

impl StoreValue {
    pub fn named(name: impl Into<String>) -> Self {
        StoreValue::new(name.into(), StoreKind::Named)
    }

    pub fn temporary(name: impl Into<String>) -> Self {
        StoreValue::new(name.into(), StoreKind::Temporary)
    }

    fn new(name: String, kind: StoreKind) -> Self {
        StoreValue {
            name,
            kind,
            mutability: Cell::new(Mutability::Variable),
        }
    }

    /// Name of the slot in the emitted program.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn kind(&self) -> StoreKind {
        self.kind
    }

    /// Change how the owning binding may be reassigned.
    pub fn set_mutability(&self, mutability: Mutability) {
        self.mutability.set(mutability);
    }

    fn assign(
        &self,
        this: &Value,
        op: AssignmentOperator,
        rhs: &Value,
    ) -> ValueResult {
        if self.mutability.get() != Mutability::Variable {
            return Err(constant_assignment(&self.name));
        }
        if rhs.is_macro() {
            return Err(macro_store(&self.name));
        }
        let inst = match op.binary() {
            None => Instruction::set(this, rhs),
            Some(binary) => {
                let opcode = runtime::binary_opcode(binary)
                    .ok_or_else(|| unsupported_operator(Operator::Assignment(op), this))?;
                Instruction::op(opcode, this, &[this.clone(), rhs.clone()])
            }
        };
        Ok((this.clone(), vec![inst]))
    }
}

impl ValueCapabilities for StoreValue {
    fn mutability(&self) -> Mutability {
        self.mutability.get()
    }

    fn eval(&self, this: &Value, _scope: &mut Scope) -> ValueResult {
        Ok((this.clone(), Vec::new()))
    }

    fn consume(&self, this: &Value, _scope: &mut Scope) -> ValueResult {
        self.ensure_owned(this)?;
        Ok((this.clone(), Vec::new()))
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
        match (op, operands) {
            (Operator::Assignment(assign), [rhs]) => self.assign(this, assign, rhs),
            (Operator::Binary(binary), [rhs]) => runtime::emit_binary(scope, binary, this, rhs),
            (Operator::Unary(unary), []) => runtime::emit_unary(scope, unary, this),
            _ => Err(unsupported_operator(op, this)),
        }
    }
}
