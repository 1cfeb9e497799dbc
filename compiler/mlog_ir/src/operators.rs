//! Operator tags.
//!
//! Every value supports the same operator set; which ones succeed depends
//! on the value variant. The tags here are what the value model dispatches
//! on, so a single dispatch function can serve every operator.

use std::fmt;

/// Binary operators.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum BinaryOperator {
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Pow,

    // Equality
    Eq,
    NotEq,
    StrictEq,
    StrictNotEq,

    // Comparison
    Lt,
    LtEq,
    Gt,
    GtEq,

    // Bitwise
    BitAnd,
    BitOr,
    BitXor,
    Shl,
    Shr,
    UnsignedShr,

    // Logical
    And,
    Or,
    Coalesce,

    // Relational
    In,
    InstanceOf,
}

impl BinaryOperator {
    /// Returns the source-level symbol for this operator.
    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Mod => "%",
            Self::Pow => "**",
            Self::Eq => "==",
            Self::NotEq => "!=",
            Self::StrictEq => "===",
            Self::StrictNotEq => "!==",
            Self::Lt => "<",
            Self::LtEq => "<=",
            Self::Gt => ">",
            Self::GtEq => ">=",
            Self::BitAnd => "&",
            Self::BitOr => "|",
            Self::BitXor => "^",
            Self::Shl => "<<",
            Self::Shr => ">>",
            Self::UnsignedShr => ">>>",
            Self::And => "&&",
            Self::Or => "||",
            Self::Coalesce => "??",
            Self::In => "in",
            Self::InstanceOf => "instanceof",
        }
    }
}

/// Unary operators.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum UnaryOperator {
    Neg,
    Plus,
    Not,
    BitNot,
    TypeOf,
}

impl UnaryOperator {
    /// Returns the source-level symbol for this operator.
    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::Neg => "-",
            Self::Plus => "+",
            Self::Not => "!",
            Self::BitNot => "~",
            Self::TypeOf => "typeof",
        }
    }
}

/// Assignment operators, plain and compound.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum AssignmentOperator {
    Assign,
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Pow,
    BitAnd,
    BitOr,
    BitXor,
    Shl,
    Shr,
    UnsignedShr,
    And,
    Or,
    Coalesce,
}

impl AssignmentOperator {
    /// Returns the source-level symbol for this operator.
    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::Assign => "=",
            Self::Add => "+=",
            Self::Sub => "-=",
            Self::Mul => "*=",
            Self::Div => "/=",
            Self::Mod => "%=",
            Self::Pow => "**=",
            Self::BitAnd => "&=",
            Self::BitOr => "|=",
            Self::BitXor => "^=",
            Self::Shl => "<<=",
            Self::Shr => ">>=",
            Self::UnsignedShr => ">>>=",
            Self::And => "&&=",
            Self::Or => "||=",
            Self::Coalesce => "??=",
        }
    }

    /// The binary operator a compound assignment applies, `None` for `=`.
    pub const fn binary(self) -> Option<BinaryOperator> {
        match self {
            Self::Assign => None,
            Self::Add => Some(BinaryOperator::Add),
            Self::Sub => Some(BinaryOperator::Sub),
            Self::Mul => Some(BinaryOperator::Mul),
            Self::Div => Some(BinaryOperator::Div),
            Self::Mod => Some(BinaryOperator::Mod),
            Self::Pow => Some(BinaryOperator::Pow),
            Self::BitAnd => Some(BinaryOperator::BitAnd),
            Self::BitOr => Some(BinaryOperator::BitOr),
            Self::BitXor => Some(BinaryOperator::BitXor),
            Self::Shl => Some(BinaryOperator::Shl),
            Self::Shr => Some(BinaryOperator::Shr),
            Self::UnsignedShr => Some(BinaryOperator::UnsignedShr),
            Self::And => Some(BinaryOperator::And),
            Self::Or => Some(BinaryOperator::Or),
            Self::Coalesce => Some(BinaryOperator::Coalesce),
        }
    }
}

/// Any operator a value can be asked to apply.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Operator {
    Unary(UnaryOperator),
    Binary(BinaryOperator),
    Assignment(AssignmentOperator),
}

impl Operator {
    /// Returns the source-level symbol for this operator.
    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::Unary(op) => op.as_symbol(),
            Self::Binary(op) => op.as_symbol(),
            Self::Assignment(op) => op.as_symbol(),
        }
    }

    /// Number of operands the operator takes besides the receiver.
    pub const fn operand_count(self) -> usize {
        match self {
            Self::Unary(_) => 0,
            Self::Binary(_) | Self::Assignment(_) => 1,
        }
    }
}

impl From<UnaryOperator> for Operator {
    fn from(op: UnaryOperator) -> Self {
        Operator::Unary(op)
    }
}

impl From<BinaryOperator> for Operator {
    fn from(op: BinaryOperator) -> Self {
        Operator::Binary(op)
    }
}

impl From<AssignmentOperator> for Operator {
    fn from(op: AssignmentOperator) -> Self {
        Operator::Assignment(op)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_symbol())
    }
}

#[cfg(test)]
mod tests;
