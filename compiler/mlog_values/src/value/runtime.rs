//! Operators on runtime operands.
//!
//! When at least one operand lives in a store, the result is computed by
//! an `op` instruction writing into a fresh temporary.

use mlog_ir::{BinaryOperator, Operator, UnaryOperator};

use super::{unsupported_operator, Value, ValueResult};
use crate::{Instruction, MlogOp, Scope};

/// The `op` selector implementing `op`, if the target has one.
pub(crate) fn binary_opcode(op: BinaryOperator) -> Option<MlogOp> {
    use BinaryOperator as B;
    Some(match op {
        B::Add => MlogOp::Add,
        B::Sub => MlogOp::Sub,
        B::Mul => MlogOp::Mul,
        B::Div => MlogOp::Div,
        B::Mod => MlogOp::Mod,
        B::Pow => MlogOp::Pow,
        B::Eq => MlogOp::Equal,
        B::NotEq => MlogOp::NotEqual,
        B::StrictEq => MlogOp::StrictEqual,
        B::Lt => MlogOp::LessThan,
        B::LtEq => MlogOp::LessThanEq,
        B::Gt => MlogOp::GreaterThan,
        B::GtEq => MlogOp::GreaterThanEq,
        B::BitAnd => MlogOp::And,
        B::BitOr => MlogOp::Or,
        B::BitXor => MlogOp::Xor,
        B::Shl => MlogOp::Shl,
        B::Shr => MlogOp::Shr,
        B::And => MlogOp::LogicalAnd,
        B::Or => MlogOp::Or,
        B::StrictNotEq | B::UnsignedShr | B::Coalesce | B::In | B::InstanceOf => return None,
    })
}

/// `op <op> tmp left right`
pub(crate) fn emit_binary(
    scope: &mut Scope,
    op: BinaryOperator,
    left: &Value,
    right: &Value,
) -> ValueResult {
    let operator = Operator::Binary(op);
    if right.is_macro() {
        return Err(unsupported_operator(operator, right));
    }
    let opcode = binary_opcode(op).ok_or_else(|| unsupported_operator(operator, left))?;
    let result = scope.make_temp();
    let inst = Instruction::op(opcode, &result, &[left.clone(), right.clone()]);
    Ok((result, vec![inst]))
}

/// Unary operators on a store.
pub(crate) fn emit_unary(scope: &mut Scope, op: UnaryOperator, operand: &Value) -> ValueResult {
    let (opcode, args) = match op {
        UnaryOperator::Neg => (MlogOp::Sub, [Value::number(0.0), operand.clone()]),
        UnaryOperator::Plus => (MlogOp::Add, [operand.clone(), Value::number(0.0)]),
        UnaryOperator::Not => (MlogOp::Equal, [operand.clone(), Value::number(0.0)]),
        UnaryOperator::BitNot => {
            let result = scope.make_temp();
            let inst = Instruction::op(MlogOp::Not, &result, std::slice::from_ref(operand));
            return Ok((result, vec![inst]));
        }
        UnaryOperator::TypeOf => return Err(unsupported_operator(Operator::Unary(op), operand)),
    };
    let result = scope.make_temp();
    let inst = Instruction::op(opcode, &result, &args);
    Ok((result, vec![inst]))
}
