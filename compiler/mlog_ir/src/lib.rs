//! Shared front-end types for the mlog compiler.
//!
//! This crate provides:
//! - Source locations ([`Position`], [`Span`])
//! - The binding-pattern and expression shapes the declaration compiler
//!   consumes ([`Pattern`], [`Expr`], [`VariableDeclaration`])
//! - Operator tags shared by the value model ([`Operator`])
//! - Naming helpers for diagnostic and internal store names
//!
//! Parsing is not done here. The parser produces these nodes and the
//! expression evaluator interprets [`Expr`]; this crate only fixes their
//! shape so the value model and the declaration compiler agree on it.

mod ast;
mod naming;
mod operators;
mod span;

pub use ast::{
    ArrayPattern, AssignmentPattern, DeclarationKind, Expr, ExprId, ExprKind, Identifier,
    LitValue, ObjectPattern, ObjectPatternProperty, Pattern, PatternProperty, RestElement,
    VariableDeclaration, VariableDeclarator,
};
pub use naming::{node_name, temp_name, INTERNAL_PREFIX};
pub use operators::{AssignmentOperator, BinaryOperator, Operator, UnaryOperator};
pub use span::{Position, Span};
