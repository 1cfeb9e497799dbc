//! Compilation context and statement-level entry points.

use mlog_ir::{DeclarationKind, Span, VariableDeclaration, VariableDeclarator};
use mlog_values::{append_source_locations, CompilerError, Instruction, Scope};

use crate::{BasicEvaluator, CompilerOptions, ExprHandler};

/// Compiles declarations into instructions.
///
/// Holds the options and the expression handler used for initializers and
/// computed keys. One compiler can serve any number of statements; it keeps
/// no state between them apart from the handler's own.
pub struct Compiler<H = BasicEvaluator> {
    options: CompilerOptions,
    pub(crate) handler: H,
    /// Current pattern nesting, checked against `max_pattern_depth`.
    pub(crate) depth: usize,
}

impl Compiler {
    /// Create a compiler backed by a [`BasicEvaluator`].
    pub fn new(options: CompilerOptions) -> Self {
        Compiler::with_handler(options, BasicEvaluator::new())
    }
}

impl<H: ExprHandler> Compiler<H> {
    pub fn with_handler(options: CompilerOptions, handler: H) -> Self {
        Compiler {
            options,
            handler,
            depth: 0,
        }
    }

    #[inline]
    pub fn options(&self) -> &CompilerOptions {
        &self.options
    }

    #[inline]
    pub fn handler(&self) -> &H {
        &self.handler
    }

    #[inline]
    pub fn handler_mut(&mut self) -> &mut H {
        &mut self.handler
    }

    pub fn into_handler(self) -> H {
        self.handler
    }

    /// Run `f` as the compilation of the node at `span`.
    ///
    /// An error without a location gets `span`, and every produced
    /// instruction without a source gets `span`. Nested calls therefore
    /// attribute both to the innermost node.
    pub fn handle(
        &mut self,
        span: Span,
        f: impl FnOnce(&mut Self) -> Result<Vec<Instruction>, CompilerError>,
    ) -> Result<Vec<Instruction>, CompilerError> {
        let mut inst = f(self).map_err(|err| err.with_span(span))?;
        append_source_locations(&mut inst, span);
        Ok(inst)
    }

    /// Compile `var`/`let`/`const` with every declarator in order.
    pub fn compile_variable_declaration(
        &mut self,
        scope: &mut Scope,
        declaration: &VariableDeclaration,
    ) -> Result<Vec<Instruction>, CompilerError> {
        tracing::debug!(
            kind = %declaration.kind,
            declarators = declaration.declarations.len(),
            "compiling declaration"
        );
        self.handle(declaration.span, |this| {
            let mut inst = Vec::new();
            for declarator in &declaration.declarations {
                inst.extend(this.compile_variable_declarator(
                    scope,
                    declarator,
                    Some(declaration.kind),
                )?);
            }
            Ok(inst)
        })
    }

    /// Compile one declarator. Without a `kind` the declarator is a `let`.
    ///
    /// The initializer's instructions come before the binding's.
    pub fn compile_variable_declarator(
        &mut self,
        scope: &mut Scope,
        declarator: &VariableDeclarator,
        kind: Option<DeclarationKind>,
    ) -> Result<Vec<Instruction>, CompilerError> {
        let kind = kind.unwrap_or_default();
        self.handle(declarator.span, |this| {
            let mut inst = Vec::new();
            let init = match &declarator.init {
                Some(expr) => {
                    let (value, init_inst) = this.handler.handle_eval(scope, expr)?;
                    inst.extend(init_inst);
                    Some(value)
                }
                None => None,
            };
            inst.extend(this.declare(scope, &declarator.id, kind, init.as_ref())?);
            Ok(inst)
        })
    }
}

impl<H: ExprHandler + Default> Default for Compiler<H> {
    fn default() -> Self {
        Compiler::with_handler(CompilerOptions::default(), H::default())
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
