//! Compiler error type.
//!
//! There is a single error type, [`CompilerError`]. Any failure aborts the
//! statement being compiled and propagates to the driver, which reports it
//! with the attached source location.
//!
//! `CompilerErrorKind` carries the structured category. Factory functions
//! (e.g. `uninitialized_constant()`) are the public construction API and
//! keep the message wording in one place.

use std::fmt;

use mlog_ir::Span;
use smallvec::SmallVec;

use crate::Value;

/// Typed error category.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CompilerErrorKind {
    // Declarations
    #[error("Constants must be initialized.")]
    UninitializedConstant,
    #[error("Macro values must be held by constants")]
    MacroBinding,
    #[error("{identifier} is already declared.")]
    AlreadyDeclared { identifier: String },
    #[error("Unsupported declaration type: {kind}")]
    UnsupportedPattern { kind: &'static str },
    #[error("The destructuring pattern is nested deeper than {limit} levels")]
    PatternTooDeep { limit: usize },

    // Destructuring
    #[error("Cannot use {pattern} destructuring without an initializer")]
    MissingInitializer { pattern: &'static str },
    #[error("The value being destructured must be a macro value")]
    NotAMacro,
    #[error("The value being destructured must be an object value")]
    NotAnObject,
    #[error("The target object does not have a value at index {index}")]
    MissingIndex { index: usize },
    #[error("The rest operator is not supported")]
    RestNotSupported,

    // Capabilities
    #[error("{value} cannot {operation}.")]
    CapabilityUnsupported { operation: String, value: String },
    #[error("Cannot get undefined member.")]
    UndefinedMember,
    #[error("The {handler} handler did not produce a value")]
    HandlerWithoutValue { handler: String },

    // Stores
    #[error("Cannot assign to constant {name}")]
    ConstantAssignment { name: String },
    #[error("Macro values cannot be stored in {store}")]
    MacroStore { store: String },

    // Macro functions
    #[error("{name} expects {expected} argument(s), got {got}")]
    ArityMismatch {
        name: String,
        expected: usize,
        got: usize,
    },
    #[error("The getlink index must be a number literal or a store")]
    InvalidLinkIndex,

    // Expressions
    #[error("{identifier} is not defined")]
    UndefinedIdentifier { identifier: String },
    #[error("Expression #{id} has no value")]
    UnknownExpression { id: u32 },
}

/// A compilation failure, optionally tied to one or more source nodes.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{kind}")]
pub struct CompilerError {
    kind: CompilerErrorKind,
    spans: SmallVec<[Span; 1]>,
}

impl CompilerError {
    pub fn new(kind: CompilerErrorKind) -> Self {
        CompilerError {
            kind,
            spans: SmallVec::new(),
        }
    }

    pub fn kind(&self) -> &CompilerErrorKind {
        &self.kind
    }

    pub fn spans(&self) -> &[Span] {
        &self.spans
    }

    /// The first attached location, if any.
    pub fn primary_span(&self) -> Option<Span> {
        self.spans.first().copied()
    }

    /// Attach `span` unless a location is already present.
    ///
    /// Errors bubble up through nested node handlers; the innermost node
    /// that saw the error keeps the location.
    #[must_use]
    pub fn with_span(mut self, span: Span) -> Self {
        if self.spans.is_empty() {
            self.spans.push(span);
        }
        self
    }

    /// Attach several related locations, unless a location is already present.
    #[must_use]
    pub fn with_spans(mut self, spans: impl IntoIterator<Item = Span>) -> Self {
        if self.spans.is_empty() {
            self.spans.extend(spans);
        }
        self
    }
}

impl From<CompilerErrorKind> for CompilerError {
    fn from(kind: CompilerErrorKind) -> Self {
        CompilerError::new(kind)
    }
}

// Declaration errors

#[cold]
pub fn uninitialized_constant() -> CompilerError {
    CompilerErrorKind::UninitializedConstant.into()
}

#[cold]
pub fn macro_binding() -> CompilerError {
    CompilerErrorKind::MacroBinding.into()
}

#[cold]
pub fn already_declared(identifier: &str) -> CompilerError {
    CompilerErrorKind::AlreadyDeclared {
        identifier: identifier.to_owned(),
    }
    .into()
}

#[cold]
pub fn unsupported_pattern(kind: &'static str) -> CompilerError {
    CompilerErrorKind::UnsupportedPattern { kind }.into()
}

#[cold]
pub fn pattern_too_deep(limit: usize) -> CompilerError {
    CompilerErrorKind::PatternTooDeep { limit }.into()
}

// Destructuring errors

#[cold]
pub fn missing_initializer(pattern: &'static str) -> CompilerError {
    CompilerErrorKind::MissingInitializer { pattern }.into()
}

#[cold]
pub fn not_a_macro() -> CompilerError {
    CompilerErrorKind::NotAMacro.into()
}

#[cold]
pub fn not_an_object() -> CompilerError {
    CompilerErrorKind::NotAnObject.into()
}

#[cold]
pub fn missing_index(index: usize) -> CompilerError {
    CompilerErrorKind::MissingIndex { index }.into()
}

#[cold]
pub fn rest_not_supported() -> CompilerError {
    CompilerErrorKind::RestNotSupported.into()
}

// Capability errors

/// `value` does not support `operation`.
///
/// `operation` reads as a verb phrase: "eval", "be owned", "'+' operation".
#[cold]
pub fn capability_unsupported(operation: impl fmt::Display, value: &Value) -> CompilerError {
    CompilerErrorKind::CapabilityUnsupported {
        operation: operation.to_string(),
        value: value.to_string(),
    }
    .into()
}

#[cold]
pub fn undefined_member() -> CompilerError {
    CompilerErrorKind::UndefinedMember.into()
}

#[cold]
pub fn handler_without_value(handler: impl fmt::Display) -> CompilerError {
    CompilerErrorKind::HandlerWithoutValue {
        handler: handler.to_string(),
    }
    .into()
}

// Store errors

#[cold]
pub fn constant_assignment(name: &str) -> CompilerError {
    CompilerErrorKind::ConstantAssignment {
        name: name.to_owned(),
    }
    .into()
}

#[cold]
pub fn macro_store(store: &str) -> CompilerError {
    CompilerErrorKind::MacroStore {
        store: store.to_owned(),
    }
    .into()
}

// Macro function errors

#[cold]
pub fn arity_mismatch(name: &str, expected: usize, got: usize) -> CompilerError {
    CompilerErrorKind::ArityMismatch {
        name: name.to_owned(),
        expected,
        got,
    }
    .into()
}

#[cold]
pub fn invalid_link_index() -> CompilerError {
    CompilerErrorKind::InvalidLinkIndex.into()
}

#[cold]
pub fn undefined_identifier(identifier: &str) -> CompilerError {
    CompilerErrorKind::UndefinedIdentifier {
        identifier: identifier.to_owned(),
    }
    .into()
}

#[cold]
pub fn unknown_expression(id: u32) -> CompilerError {
    CompilerErrorKind::UnknownExpression { id }.into()
}
