//! Names given to stores in the emitted program.

use crate::Span;

/// Prefix reserved for compiler-generated names.
///
/// Source identifiers cannot contain `&`, so internal names never collide
/// with user ones.
pub const INTERNAL_PREFIX: &str = "&";

/// Name for a declared store: `identifier:line:column`, or just
/// `line:column` when no identifier is given (compact names).
pub fn node_name(span: Span, identifier: Option<&str>) -> String {
    let start = span.start;
    match identifier {
        Some(identifier) => format!("{identifier}:{}:{}", start.line, start.column),
        None => format!("{}:{}", start.line, start.column),
    }
}

/// Name of the `index`th temporary store.
pub fn temp_name(index: u32) -> String {
    format!("{INTERNAL_PREFIX}t{index}")
}
