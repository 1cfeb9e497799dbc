//! Declaration compiler for mlog.
//!
//! Turns `var`/`let`/`const` declarations, including nested array and
//! object destructuring, into scope bindings and instructions. A name bound
//! to a structurally constant value (a literal, a compile-time object, a
//! macro function) under `const` becomes a free alias; every other name
//! gets a runtime store and an assignment.
//!
//! # Usage
//!
//! ```text
//! let mut scope = Scope::new();
//! let mut compiler = Compiler::new(CompilerOptions::default());
//! let inst = compiler.compile_variable_declaration(&mut scope, &decl)?;
//! ```
//!
//! Expressions are evaluated through an [`ExprHandler`]; [`BasicEvaluator`]
//! handles identifiers and literals and is enough for standalone use.

mod compiler;
mod declare;
mod evaluator;
mod options;
mod stack;

#[cfg(test)]
mod test_helpers;

use std::sync::Once;

pub use compiler::Compiler;
pub use declare::declare;
pub use evaluator::{BasicEvaluator, ExprHandler};
pub use options::{CompilerOptions, DEFAULT_MAX_PATTERN_DEPTH};

static TRACING_INIT: Once = Once::new();

/// Initialize tracing from `RUST_LOG`.
///
/// Does nothing when `RUST_LOG` is unset; safe to call more than once.
///
/// ```text
/// RUST_LOG=mlog_decl=trace,mlog_values=debug
/// ```
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}
