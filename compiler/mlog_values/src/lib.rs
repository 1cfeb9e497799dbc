//! Value model for the mlog compiler.
//!
//! This crate provides:
//! - Compile-time values ([`Value`]) and their capability set
//!   ([`ValueCapabilities`])
//! - Emitted instructions ([`Instruction`]) and their metadata helpers
//! - Scopes and bindings ([`Scope`], [`Binding`])
//! - The compiler error type ([`CompilerError`]) and its factories
//! - Built-in macro functions ([`commands`])
//!
//! # Compile-time vs runtime
//!
//! A value is either *macro* (it exists only while compiling: objects,
//! macro functions) or has a runtime representation (literals, stores).
//! Macro values may be aliased by constants but never written into a
//! store.

mod binding;
pub mod commands;
pub mod errors;
mod instruction;
mod scope;
mod value;

pub use binding::Binding;
pub use errors::{CompilerError, CompilerErrorKind};
pub use instruction::{append_source_locations, with_always_runs, Instruction, MlogOp, Opcode};
pub use scope::{LocalScope, Scope, ScopeId};
pub use value::{
    format_number, CallResult, LiteralValue, MacroFunction, Mutability, ObjectHandler, ObjectKey,
    ObjectValue, StoreKind, StoreValue, Value, ValueCapabilities, ValueInstructions, ValueKind,
    ValueResult, VoidValue,
};
