use super::*;
use mlog_ir::{Expr, ExprId, Pattern};
use mlog_values::errors::rest_not_supported;
use mlog_values::{CompilerErrorKind, Value};
use pretty_assertions::assert_eq;

use crate::test_helpers::{at, render, tuple};

fn declarator(name: &str, column: u32, init: Option<Expr>) -> VariableDeclarator {
    let id = Pattern::ident(name, at(column));
    let end = init.as_ref().map_or(at(column), |init| init.span);
    VariableDeclarator {
        span: at(column).merge(end),
        id,
        init,
    }
}

fn declaration(
    kind: DeclarationKind,
    declarations: Vec<VariableDeclarator>,
) -> VariableDeclaration {
    VariableDeclaration {
        kind,
        declarations,
        span: Span::on_line(1, 0, 30),
    }
}

#[test]
fn test_declarators_compile_in_order() {
    // let a = 1, b = a;
    let mut scope = Scope::new();
    let decl = declaration(
        DeclarationKind::Let,
        vec![
            declarator("a", 4, Some(Expr::literal(1, at(8)))),
            declarator("b", 11, Some(Expr::identifier("a", at(15)))),
        ],
    );

    let inst = Compiler::new(CompilerOptions::default())
        .compile_variable_declaration(&mut scope, &decl)
        .unwrap();
    assert_eq!(render(&inst), ["set a:1:4 1", "set b:1:11 a:1:4"]);
    assert_eq!(inst[1].source, Some(at(11)));
    assert_eq!(scope.len(), 2);
}

#[test]
fn test_const_declaration_aliases() {
    // const t = <tuple>, [x] = t;
    let mut scope = Scope::new();
    let evaluator =
        BasicEvaluator::new().with(ExprId::new(0), tuple(vec![Some(Value::string("v"))]));
    let decl = declaration(
        DeclarationKind::Const,
        vec![
            declarator("t", 6, Some(Expr::opaque(ExprId::new(0), at(10)))),
            VariableDeclarator {
                id: Pattern::Array(mlog_ir::ArrayPattern {
                    elements: vec![Some(Pattern::ident("x", at(14)))],
                    span: at(13),
                }),
                init: Some(Expr::identifier("t", at(19))),
                span: at(13).merge(at(19)),
            },
        ],
    );

    let mut compiler = Compiler::with_handler(CompilerOptions::default(), evaluator);
    let inst = compiler.compile_variable_declaration(&mut scope, &decl).unwrap();
    assert!(inst.is_empty());
    assert_eq!(scope.lookup("x").unwrap().value().to_string(), "\"v\"");
}

#[test]
fn test_lone_declarator_defaults_to_let() {
    let mut scope = Scope::new();
    let inst = Compiler::new(CompilerOptions::default())
        .compile_variable_declarator(
            &mut scope,
            &declarator("n", 4, Some(Expr::literal(2, at(8)))),
            None,
        )
        .unwrap();
    assert_eq!(render(&inst), ["set n:1:4 2"]);
    assert!(!scope.lookup("n").unwrap().is_constant());
}

#[test]
fn test_initializer_error_stops_declaration() {
    let mut scope = Scope::new();
    let decl = declaration(
        DeclarationKind::Let,
        vec![
            declarator("a", 4, Some(Expr::identifier("missing", at(8)))),
            declarator("b", 17, None),
        ],
    );

    let err = Compiler::new(CompilerOptions::default())
        .compile_variable_declaration(&mut scope, &decl)
        .unwrap_err();
    assert_eq!(
        err.kind(),
        &CompilerErrorKind::UndefinedIdentifier {
            identifier: "missing".to_owned()
        }
    );
    assert_eq!(err.primary_span(), Some(at(8)));
    assert!(scope.is_empty());
}

#[test]
fn test_handle_fills_span_and_sources() {
    let mut compiler = Compiler::new(CompilerOptions::default());
    let outer = Span::on_line(3, 0, 10);

    let err = compiler
        .handle(outer, |_| Err(rest_not_supported()))
        .unwrap_err();
    assert_eq!(err.spans(), &[outer]);

    let mut scope = Scope::new();
    let inner = at(2);
    let inst = compiler
        .handle(outer, |_| {
            let x = scope.make("x", "x").unwrap();
            let mut inst = vec![Instruction::set(&x, &Value::number(1.0))];
            inst[0].source = Some(inner);
            inst.push(Instruction::set(&x, &Value::number(2.0)));
            Ok(inst)
        })
        .unwrap();
    assert_eq!(inst[0].source, Some(inner));
    assert_eq!(inst[1].source, Some(outer));
}

#[test]
fn test_default_compiler() {
    let compiler: Compiler = Compiler::default();
    assert_eq!(compiler.options(), &CompilerOptions::default());
    assert_eq!(
        compiler.options().max_pattern_depth,
        crate::DEFAULT_MAX_PATTERN_DEPTH
    );
}

#[test]
fn test_init_tracing_is_idempotent() {
    crate::init_tracing();
    crate::init_tracing();
}
