//! Property-based tests for the declaration compiler.
//!
//! For arbitrary literal initializers and tuple shapes these check:
//! 1. `const` over a literal is a free alias
//! 2. `let`/`var` always allocate a store and emit the assignment
//! 3. Macro values are rejected for every non-const kind
//! 4. Array destructuring binds element `i` to own key `i` and skips holes

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]
#![allow(
    clippy::doc_markdown,
    clippy::redundant_closure_for_method_calls,
    reason = "Proptest macros generate code with these patterns"
)]

use mlog_decl::{Compiler, CompilerOptions};
use mlog_ir::{ArrayPattern, DeclarationKind, LitValue, Pattern, Span};
use mlog_values::{CompilerErrorKind, Mutability, ObjectValue, Opcode, Scope, Value};
use proptest::prelude::*;

// -- Strategies --

fn literal_strategy() -> impl Strategy<Value = LitValue> {
    prop_oneof![
        any::<f64>().prop_map(LitValue::Number),
        "[a-z ]{0,12}".prop_map(LitValue::String),
        any::<bool>().prop_map(LitValue::Bool),
    ]
}

fn identifier_strategy() -> impl Strategy<Value = String> {
    "[a-z_][a-z0-9_]{0,10}"
}

fn runtime_kind_strategy() -> impl Strategy<Value = DeclarationKind> {
    prop_oneof![Just(DeclarationKind::Let), Just(DeclarationKind::Var)]
}

fn macro_value_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(()).prop_map(|()| Value::object(ObjectValue::new())),
        Just(()).prop_map(|()| Value::macro_function(mlog_values::commands::get_link())),
    ]
}

/// Tuple items (`None` is a hole) paired with pattern slots (`true` binds).
fn tuple_strategy() -> impl Strategy<Value = (Vec<Option<f64>>, Vec<bool>)> {
    prop::collection::vec(prop::option::weighted(0.8, -1e6..1e6_f64), 0..8).prop_flat_map(
        |items| {
            let len = items.len();
            (Just(items), prop::collection::vec(any::<bool>(), 0..=len))
        },
    )
}

fn span(column: u32) -> Span {
    Span::on_line(1, column, column + 1)
}

fn compiler() -> Compiler {
    Compiler::new(CompilerOptions::default())
}

// -- Properties --

proptest! {
    #[test]
    fn const_literal_is_free_alias(name in identifier_strategy(), literal in literal_strategy()) {
        let mut scope = Scope::new();
        let value = Value::literal(literal);
        let inst = compiler()
            .declare(&mut scope, &Pattern::ident(name.clone(), span(6)), DeclarationKind::Const, Some(&value))
            .unwrap();

        prop_assert!(inst.is_empty());
        let binding = scope.lookup(&name).unwrap();
        prop_assert!(binding.value().ptr_eq(&value));
        prop_assert!(binding.is_constant());
    }

    #[test]
    fn runtime_kinds_allocate_store(
        name in identifier_strategy(),
        literal in literal_strategy(),
        kind in runtime_kind_strategy(),
    ) {
        let mut scope = Scope::new();
        let value = Value::literal(literal);
        let inst = compiler()
            .declare(&mut scope, &Pattern::ident(name.clone(), span(4)), kind, Some(&value))
            .unwrap();

        prop_assert_eq!(inst.len(), 1);
        prop_assert_eq!(inst[0].opcode, Opcode::Set);
        prop_assert!(inst[0].operands[1].ptr_eq(&value));

        let binding = scope.lookup(&name).unwrap();
        prop_assert!(binding.value().as_store().is_some());
        prop_assert_eq!(binding.value().mutability(), Mutability::Variable);
        prop_assert!(inst[0].operands[0].ptr_eq(binding.value()));
    }

    #[test]
    fn macro_values_rejected_for_runtime_kinds(
        kind in runtime_kind_strategy(),
        value in macro_value_strategy(),
    ) {
        let mut scope = Scope::new();
        let err = compiler()
            .declare(&mut scope, &Pattern::ident("m", span(4)), kind, Some(&value))
            .unwrap_err();
        prop_assert_eq!(err.kind(), &CompilerErrorKind::MacroBinding);
    }

    #[test]
    fn array_destructuring_follows_own_keys((items, slots) in tuple_strategy()) {
        let mut scope = Scope::new();
        let values: Vec<Option<Value>> = items.iter().map(|item| item.map(Value::number)).collect();
        let init = Value::object(ObjectValue::from_array(values.clone(), ObjectValue::new()));

        let elements: Vec<Option<Pattern>> = slots
            .iter()
            .enumerate()
            .map(|(i, &bind)| bind.then(|| Pattern::ident(format!("e{i}"), span(6))))
            .collect();
        let pattern = Pattern::Array(ArrayPattern { elements, span: span(5) });

        let first_missing = slots
            .iter()
            .enumerate()
            .find(|&(i, &bind)| bind && values[i].is_none())
            .map(|(i, _)| i);

        let result = compiler().declare(&mut scope, &pattern, DeclarationKind::Const, Some(&init));
        match first_missing {
            Some(index) => {
                let err = result.unwrap_err();
                prop_assert_eq!(err.kind(), &CompilerErrorKind::MissingIndex { index });
            }
            None => {
                prop_assert!(result.unwrap().is_empty());
                for (i, &bind) in slots.iter().enumerate() {
                    let bound = scope.lookup(&format!("e{i}"));
                    prop_assert_eq!(bound.is_some(), bind);
                    if let (Some(binding), Some(value)) = (bound, &values[i]) {
                        prop_assert!(binding.value().ptr_eq(value));
                    }
                }
            }
        }
    }

    #[test]
    fn array_destructuring_rejects_non_macro(literal in literal_strategy()) {
        let mut scope = Scope::new();
        let pattern = Pattern::Array(ArrayPattern {
            elements: vec![Some(Pattern::ident("a", span(6)))],
            span: span(5),
        });
        let err = compiler()
            .declare(&mut scope, &pattern, DeclarationKind::Const, Some(&Value::literal(literal)))
            .unwrap_err();
        prop_assert_eq!(err.kind(), &CompilerErrorKind::NotAMacro);
    }
}
