//! Emitted instructions.
//!
//! An [`Instruction`] is one unit of the target program: an opcode, the
//! value it writes (if any), its operand list and some metadata for the
//! serializer. Operand lists start with the output when there is one, in
//! the order the target assembly expects (`set x 5`, `op add t a b`).
//!
//! Instructions are only ever appended. The two helpers at the bottom
//! back-fill metadata on instructions that were produced without it.

use std::fmt;

use mlog_ir::Span;
use smallvec::SmallVec;

use crate::Value;

/// Arithmetic/logic operation selector for the `op` instruction.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum MlogOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Pow,
    Equal,
    NotEqual,
    StrictEqual,
    LessThan,
    LessThanEq,
    GreaterThan,
    GreaterThanEq,
    LogicalAnd,
    And,
    Or,
    Xor,
    Shl,
    Shr,
    Not,
}

impl MlogOp {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Sub => "sub",
            Self::Mul => "mul",
            Self::Div => "div",
            Self::Mod => "mod",
            Self::Pow => "pow",
            Self::Equal => "equal",
            Self::NotEqual => "notEqual",
            Self::StrictEqual => "strictEqual",
            Self::LessThan => "lessThan",
            Self::LessThanEq => "lessThanEq",
            Self::GreaterThan => "greaterThan",
            Self::GreaterThanEq => "greaterThanEq",
            Self::LogicalAnd => "land",
            Self::And => "and",
            Self::Or => "or",
            Self::Xor => "xor",
            Self::Shl => "shl",
            Self::Shr => "shr",
            Self::Not => "not",
        }
    }
}

/// Instruction opcode.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Opcode {
    /// `set <target> <value>`
    Set,
    /// `op <operation> <result> <a> [b]`
    Op(MlogOp),
    /// `getlink <result> <index>`
    GetLink,
}

impl Opcode {
    /// Mnemonic of the instruction itself.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Set => "set",
            Self::Op(_) => "op",
            Self::GetLink => "getlink",
        }
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Op(op) => write!(f, "op {}", op.as_str()),
            _ => f.write_str(self.as_str()),
        }
    }
}

/// One emitted instruction.
#[derive(Clone, Debug)]
pub struct Instruction {
    pub opcode: Opcode,
    pub output: Option<Value>,
    pub operands: SmallVec<[Value; 4]>,
    pub source: Option<Span>,
    /// Cleared by control-flow handlers for instructions inside branches.
    pub always_runs: bool,
}

impl Instruction {
    pub fn new(
        opcode: Opcode,
        output: Option<Value>,
        operands: impl IntoIterator<Item = Value>,
    ) -> Self {
        Instruction {
            opcode,
            output,
            operands: operands.into_iter().collect(),
            source: None,
            always_runs: true,
        }
    }

    /// `set target value`
    pub fn set(target: &Value, value: &Value) -> Self {
        Instruction::new(
            Opcode::Set,
            Some(target.clone()),
            [target.clone(), value.clone()],
        )
    }

    /// `op <op> output args...`
    pub fn op(op: MlogOp, output: &Value, args: &[Value]) -> Self {
        let operands = std::iter::once(output.clone()).chain(args.iter().cloned());
        Instruction::new(Opcode::Op(op), Some(output.clone()), operands)
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.opcode)?;
        for operand in &self.operands {
            write!(f, " {operand}")?;
        }
        Ok(())
    }
}

/// Set `source` on every instruction that does not have one yet.
pub fn append_source_locations(instructions: &mut [Instruction], span: Span) {
    for inst in instructions {
        inst.source.get_or_insert(span);
    }
}

/// Overwrite `always_runs` on every instruction.
pub fn with_always_runs(instructions: &mut [Instruction], value: bool) {
    for inst in instructions {
        inst.always_runs = value;
    }
}
