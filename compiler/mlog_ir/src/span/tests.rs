use super::*;

#[test]
fn test_position_display() {
    assert_eq!(Position::new(3, 14).to_string(), "3:14");
}

#[test]
fn test_span_merge_covers_both() {
    let a = Span::on_line(2, 4, 9);
    let b = Span::new(Position::new(1, 10), Position::new(2, 1));
    let merged = a.merge(b);
    assert_eq!(merged.start, Position::new(1, 10));
    assert_eq!(merged.end, Position::new(2, 9));
}

#[test]
fn test_dummy_span() {
    assert!(Span::DUMMY.is_dummy());
    assert!(Span::default().is_dummy());
    assert!(!Span::on_line(1, 0, 1).is_dummy());
}

#[test]
fn test_span_display() {
    assert_eq!(Span::on_line(4, 2, 7).to_string(), "4:2-4:7");
}
