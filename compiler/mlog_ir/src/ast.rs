//! Binding patterns and the expression handles they reference.
//!
//! The shapes mirror the ESTree nodes the parser produces for variable
//! declarations: identifiers, array patterns with holes, and object
//! patterns with `{ key, value, computed }` properties and an optional rest
//! element. Expressions are opaque to this layer apart from the two forms
//! the declaration compiler inspects directly (identifiers and literals).

use std::fmt;

use crate::Span;

/// A compile-time constant scalar.
#[derive(Clone, Debug, PartialEq)]
pub enum LitValue {
    Number(f64),
    String(String),
    Bool(bool),
}

impl From<f64> for LitValue {
    fn from(n: f64) -> Self {
        LitValue::Number(n)
    }
}

impl From<i32> for LitValue {
    fn from(n: i32) -> Self {
        LitValue::Number(f64::from(n))
    }
}

impl From<bool> for LitValue {
    fn from(b: bool) -> Self {
        LitValue::Bool(b)
    }
}

impl From<&str> for LitValue {
    fn from(s: &str) -> Self {
        LitValue::String(s.to_owned())
    }
}

impl From<String> for LitValue {
    fn from(s: String) -> Self {
        LitValue::String(s)
    }
}

/// Handle to an expression owned by the parser's arena.
///
/// Only the expression evaluator knows how to interpret it.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[repr(transparent)]
pub struct ExprId(u32);

impl ExprId {
    #[inline]
    pub const fn new(raw: u32) -> Self {
        ExprId(raw)
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

/// An expression node.
#[derive(Clone, Debug, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

/// Expression kinds the declaration compiler distinguishes.
#[derive(Clone, Debug, PartialEq)]
pub enum ExprKind {
    Identifier(String),
    Literal(LitValue),
    /// Any other expression, evaluated by the expression handler.
    Opaque(ExprId),
}

impl Expr {
    pub fn identifier(name: impl Into<String>, span: Span) -> Self {
        Expr {
            kind: ExprKind::Identifier(name.into()),
            span,
        }
    }

    pub fn literal(value: impl Into<LitValue>, span: Span) -> Self {
        Expr {
            kind: ExprKind::Literal(value.into()),
            span,
        }
    }

    pub fn opaque(id: ExprId, span: Span) -> Self {
        Expr {
            kind: ExprKind::Opaque(id),
            span,
        }
    }

    /// The identifier name, if this expression is a plain identifier.
    pub fn as_identifier(&self) -> Option<&str> {
        match &self.kind {
            ExprKind::Identifier(name) => Some(name),
            _ => None,
        }
    }
}

/// A declared identifier.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Identifier {
    pub name: String,
    pub span: Span,
}

impl Identifier {
    pub fn new(name: impl Into<String>, span: Span) -> Self {
        Identifier {
            name: name.into(),
            span,
        }
    }
}

/// Positional destructuring: `[a, , b]`.
///
/// `None` elements are holes.
#[derive(Clone, Debug, PartialEq)]
pub struct ArrayPattern {
    pub elements: Vec<Option<Pattern>>,
    pub span: Span,
}

/// Keyed destructuring: `{ x: a, [k]: b }`.
#[derive(Clone, Debug, PartialEq)]
pub struct ObjectPattern {
    pub properties: Vec<ObjectPatternProperty>,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ObjectPatternProperty {
    Property(PatternProperty),
    Rest(RestElement),
}

/// One `key: value` entry of an object pattern.
///
/// `computed` is set for the `[key]: value` form; shorthand `{ x }` is
/// represented with an identifier key and an identifier value.
#[derive(Clone, Debug, PartialEq)]
pub struct PatternProperty {
    pub key: Expr,
    pub value: Pattern,
    pub computed: bool,
    pub span: Span,
}

/// `...rest` inside an array or object pattern.
#[derive(Clone, Debug, PartialEq)]
pub struct RestElement {
    pub argument: Box<Pattern>,
    pub span: Span,
}

/// `target = default` inside a pattern.
#[derive(Clone, Debug, PartialEq)]
pub struct AssignmentPattern {
    pub left: Box<Pattern>,
    pub right: Expr,
    pub span: Span,
}

/// Left-hand side of a declarator.
#[derive(Clone, Debug, PartialEq)]
pub enum Pattern {
    Identifier(Identifier),
    Array(ArrayPattern),
    Object(ObjectPattern),
    Assignment(AssignmentPattern),
    Rest(RestElement),
    /// Member expressions are valid assignment targets but not declarations.
    Member(Expr),
}

impl Pattern {
    pub fn ident(name: impl Into<String>, span: Span) -> Self {
        Pattern::Identifier(Identifier::new(name, span))
    }

    pub fn span(&self) -> Span {
        match self {
            Pattern::Identifier(id) => id.span,
            Pattern::Array(array) => array.span,
            Pattern::Object(object) => object.span,
            Pattern::Assignment(assign) => assign.span,
            Pattern::Rest(rest) => rest.span,
            Pattern::Member(expr) => expr.span,
        }
    }

    /// ESTree node type name, used in diagnostics.
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Pattern::Identifier(_) => "Identifier",
            Pattern::Array(_) => "ArrayPattern",
            Pattern::Object(_) => "ObjectPattern",
            Pattern::Assignment(_) => "AssignmentPattern",
            Pattern::Rest(_) => "RestElement",
            Pattern::Member(_) => "MemberExpression",
        }
    }
}

/// `var`, `let` or `const`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub enum DeclarationKind {
    Var,
    #[default]
    Let,
    Const,
}

impl DeclarationKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Var => "var",
            Self::Let => "let",
            Self::Const => "const",
        }
    }

    #[inline]
    pub fn is_const(self) -> bool {
        matches!(self, Self::Const)
    }
}

impl fmt::Display for DeclarationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `id = init` inside a declaration.
#[derive(Clone, Debug, PartialEq)]
pub struct VariableDeclarator {
    pub id: Pattern,
    pub init: Option<Expr>,
    pub span: Span,
}

/// `kind d1, d2, ...;`
#[derive(Clone, Debug, PartialEq)]
pub struct VariableDeclaration {
    pub kind: DeclarationKind,
    pub declarations: Vec<VariableDeclarator>,
    pub span: Span,
}
