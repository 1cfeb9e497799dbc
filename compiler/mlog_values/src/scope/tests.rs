use super::*;
use pretty_assertions::assert_eq;

use crate::Mutability;

#[test]
fn test_make_binds_fresh_store() {
    let mut scope = Scope::new();
    let x = scope.make("x", "x:2:6").unwrap();

    let store = x.as_store().unwrap();
    assert_eq!(store.name(), "x:2:6");
    assert_eq!(x.mutability(), Mutability::Variable);

    let binding = scope.lookup("x").unwrap();
    assert!(binding.value().ptr_eq(&x));
    assert_eq!(binding.name(), "x:2:6");
    assert_eq!(binding.scope(), scope.id());
    assert!(!binding.is_constant());
}

#[test]
fn test_redeclaration_is_rejected() {
    let mut scope = Scope::new();
    scope.make("x", "x").unwrap();

    let err = scope.make("x", "x2").unwrap_err();
    assert_eq!(err.to_string(), "x is already declared.");

    let err = scope
        .set(Binding::new(scope.id(), "x", "x", Value::number(1.0), true))
        .unwrap_err();
    assert_eq!(err.to_string(), "x is already declared.");
    assert_eq!(scope.len(), 1);
}

#[test]
fn test_set_aliases_value() {
    let mut scope = Scope::new();
    let five = Value::number(5.0);
    let binding = scope
        .set(Binding::new(scope.id(), "five", "five", five.clone(), true))
        .unwrap();

    assert!(binding.is_constant());
    assert!(scope.get_own("five").unwrap().value().ptr_eq(&five));
    assert_eq!(five.owner().unwrap().identifier(), "five");
}

#[test]
fn test_constant_store_binding() {
    let mut scope = Scope::new();
    let x = scope.make("x", "x").unwrap();
    x.as_store()
        .unwrap()
        .set_mutability(Mutability::ConstantBinding);
    assert!(scope.lookup("x").unwrap().is_constant());
}

#[test]
fn test_lookup_walks_parents() {
    let root = LocalScope::new(Scope::new());
    let outer = root.borrow_mut().make("outer", "outer").unwrap();

    let mut child = Scope::with_parent(root.clone());
    let inner = child.make("inner", "inner").unwrap();
    // Shadowing an outer name is a new declaration.
    let shadow = child.make("outer", "outer2").unwrap();

    assert!(child.lookup("inner").unwrap().value().ptr_eq(&inner));
    assert!(child.lookup("outer").unwrap().value().ptr_eq(&shadow));
    assert!(root.borrow().lookup("outer").unwrap().value().ptr_eq(&outer));
    assert!(root.borrow().lookup("inner").is_none());
    assert!(child.lookup("missing").is_none());
    assert!(child.get_own("outer").is_some());
    assert_ne!(child.id(), root.borrow().id());
}

#[test]
fn test_temporaries_are_unique_across_chain() {
    let root = LocalScope::new(Scope::new());
    let first = root.borrow_mut().make_temp();
    let mut child = Scope::with_parent(root.clone());
    let second = child.make_temp();
    let third = root.borrow_mut().make_temp();

    assert_eq!(first.to_string(), "&t0");
    assert_eq!(second.to_string(), "&t1");
    assert_eq!(third.to_string(), "&t2");
    assert_eq!(second.as_store().unwrap().kind(), crate::StoreKind::Temporary);
    // Temporaries are not bound to any name.
    assert!(child.is_empty());
}
