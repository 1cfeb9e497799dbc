//! Built-in macro functions that emit a single target instruction.

use mlog_ir::LitValue;

use crate::errors::{arity_mismatch, invalid_link_index, CompilerError};
use crate::{Binding, CallResult, Instruction, MacroFunction, Opcode, Scope, Value};

/// `getLink(index)`: read the linked building at `index` into a fresh
/// temporary.
///
/// The index must be a store or a number literal.
pub fn get_link() -> MacroFunction {
    MacroFunction::new("getLink", |scope: &mut Scope, args: &[Value]| -> CallResult {
        let [index] = args else {
            return Err(arity_mismatch("getLink", 1, args.len()));
        };
        let valid = index.as_store().is_some()
            || matches!(index.as_literal(), Some(LitValue::Number(_)));
        if !valid {
            return Err(invalid_link_index());
        }

        let output = scope.make_temp();
        let inst = Instruction::new(
            Opcode::GetLink,
            Some(output.clone()),
            [output.clone(), index.clone()],
        );
        Ok((Some(output), vec![inst]))
    })
}

/// Bind every built-in macro function as a constant in `scope`.
pub fn register_builtins(scope: &mut Scope) -> Result<(), CompilerError> {
    for function in [get_link()] {
        let name = function.name().to_owned();
        let value = Value::macro_function(function);
        scope.set(Binding::new(scope.id(), name.as_str(), name.as_str(), value, true))?;
    }
    Ok(())
}
