use super::*;
use crate::commands::get_link;
use pretty_assertions::assert_eq;

fn flags(value: &Value) -> (bool, Mutability) {
    (value.is_macro(), value.mutability())
}

#[test]
fn test_variant_flags() {
    let mut scope = Scope::new();
    let store = scope.make("x", "x").unwrap();

    assert_eq!(flags(&Value::void()), (false, Mutability::Variable));
    assert_eq!(flags(&Value::number(1.0)), (false, Mutability::Immutable));
    assert_eq!(flags(&store), (false, Mutability::Variable));
    assert_eq!(
        flags(&Value::object(ObjectValue::new())),
        (true, Mutability::Immutable)
    );
    assert_eq!(
        flags(&Value::macro_function(get_link())),
        (true, Mutability::Immutable)
    );
}

#[test]
fn test_void_supports_nothing() {
    let mut scope = Scope::new();
    let void = Value::void();

    assert_eq!(
        void.eval(&mut scope).unwrap_err().to_string(),
        "void cannot eval."
    );
    assert_eq!(
        void.consume(&mut scope).unwrap_err().to_string(),
        "void cannot consume."
    );
    assert_eq!(
        void.call(&mut scope, &[]).unwrap_err().to_string(),
        "void cannot call."
    );
    assert_eq!(
        void.get(&mut scope, &Value::string("a"))
            .unwrap_err()
            .to_string(),
        "void cannot get."
    );
    assert_eq!(
        void.ensure_owned().unwrap_err().to_string(),
        "void cannot be owned."
    );
    assert_eq!(
        void.binary(&mut scope, BinaryOperator::Add, &Value::number(1.0))
            .unwrap_err()
            .to_string(),
        "void cannot '+' operation."
    );
}

#[test]
fn test_literal_cannot_be_owned_or_called() {
    let mut scope = Scope::new();
    let five = Value::number(5.0);
    assert!(five.ensure_owned().is_err());
    assert_eq!(
        five.call(&mut scope, &[]).unwrap_err().to_string(),
        "5 cannot call."
    );
}

#[test]
fn test_display() {
    let mut scope = Scope::new();
    assert_eq!(Value::void().to_string(), "void");
    assert_eq!(Value::number(2.5).to_string(), "2.5");
    assert_eq!(Value::string("hi").to_string(), "\"hi\"");
    assert_eq!(Value::boolean(false).to_string(), "false");
    assert_eq!(scope.make("x", "x:1:6").unwrap().to_string(), "x:1:6");
    assert_eq!(Value::object(ObjectValue::new()).to_string(), "[object]");
    assert_eq!(
        Value::macro_function(get_link()).to_string(),
        "[macro getLink]"
    );
}

#[test]
fn test_clone_is_same_value() {
    let value = Value::number(1.0);
    let alias = value.clone();
    assert!(value.ptr_eq(&alias));
    assert!(!value.ptr_eq(&Value::number(1.0)));
}

#[test]
fn test_owner_is_first_binding() {
    let mut scope = Scope::new();
    let x = scope.make("x", "x").unwrap();
    scope
        .set(Binding::new(scope.id(), "y", "y", x.clone(), true))
        .unwrap();

    let owner = x.owner().unwrap();
    assert_eq!(owner.identifier(), "x");
}

#[test]
fn test_owner_released_with_binding() {
    let value = Value::number(3.0);
    let binding = std::rc::Rc::new(Binding::new(
        Scope::new().id(),
        "n",
        "n",
        value.clone(),
        true,
    ));
    value.adopt_owner(&binding);
    assert!(value.owner().is_some());

    drop(binding);
    assert!(value.owner().is_none());
}

#[test]
fn test_type_of_per_variant() {
    let mut scope = Scope::new();
    let type_of = |value: Value, scope: &mut Scope| {
        let (result, inst) = value.type_of(scope).unwrap();
        assert!(inst.is_empty());
        result.as_literal().cloned()
    };

    assert_eq!(
        type_of(Value::number(1.0), &mut scope),
        Some(LitValue::from("number"))
    );
    assert_eq!(
        type_of(Value::string(""), &mut scope),
        Some(LitValue::from("string"))
    );
    assert_eq!(
        type_of(Value::boolean(true), &mut scope),
        Some(LitValue::from("boolean"))
    );
    assert_eq!(
        type_of(Value::object(ObjectValue::new()), &mut scope),
        Some(LitValue::from("object"))
    );
    assert_eq!(
        type_of(Value::macro_function(get_link()), &mut scope),
        Some(LitValue::from("function"))
    );
}

#[test]
fn test_operand_count_mismatch_is_rejected() {
    let mut scope = Scope::new();
    let err = Value::number(1.0)
        .operate(&mut scope, Operator::Binary(BinaryOperator::Sub), &[])
        .unwrap_err();
    assert_eq!(err.to_string(), "1 cannot '-' operation.");
}
