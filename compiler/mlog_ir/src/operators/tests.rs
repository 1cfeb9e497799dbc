use super::*;

#[test]
fn test_compound_assignment_maps_to_binary() {
    assert_eq!(AssignmentOperator::Assign.binary(), None);
    assert_eq!(AssignmentOperator::Add.binary(), Some(BinaryOperator::Add));
    assert_eq!(
        AssignmentOperator::UnsignedShr.binary(),
        Some(BinaryOperator::UnsignedShr)
    );
    assert_eq!(
        AssignmentOperator::Coalesce.binary(),
        Some(BinaryOperator::Coalesce)
    );
}

#[test]
fn test_operator_symbols() {
    assert_eq!(Operator::from(BinaryOperator::StrictEq).as_symbol(), "===");
    assert_eq!(Operator::from(UnaryOperator::TypeOf).to_string(), "typeof");
    assert_eq!(Operator::from(AssignmentOperator::Pow).as_symbol(), "**=");
}

#[test]
fn test_operand_count() {
    assert_eq!(Operator::Unary(UnaryOperator::Neg).operand_count(), 0);
    assert_eq!(Operator::Binary(BinaryOperator::Add).operand_count(), 1);
    assert_eq!(
        Operator::Assignment(AssignmentOperator::Assign).operand_count(),
        1
    );
}
