use super::prelude::{ScopeChain, Value};
use crate::lexer::prelude::Token;

fn binary(op: Token, left: Value, right: Value) -> Option<Value> {
    Value::apply_binary(&op, &left, &right)
}

#[test]
fn test_number_arithmetic() {
    assert_eq!(
        binary(Token::Plus, Value::Number(2.0), Value::Number(3.0)),
        Some(Value::Number(5.0))
    );
    assert_eq!(
        binary(Token::Minus, Value::Number(2.0), Value::Number(3.0)),
        Some(Value::Number(-1.0))
    );
    assert_eq!(
        binary(Token::Star, Value::Number(2.5), Value::Number(4.0)),
        Some(Value::Number(10.0))
    );
    assert_eq!(
        binary(Token::Percent, Value::Number(7.0), Value::Number(3.0)),
        Some(Value::Number(1.0))
    );
}

#[test]
fn test_division_follows_ieee_754() {
    let result = binary(Token::Slash, Value::Number(1.0), Value::Number(0.0));
    assert_eq!(result, Some(Value::Number(f64::INFINITY)));

    let result = binary(Token::Percent, Value::Number(1.0), Value::Number(0.0));
    match result {
        Some(Value::Number(n)) => assert!(n.is_nan()),
        other => panic!("expected NaN, got {other:?}"),
    }
}

#[test]
fn test_plus_character_code_addition() {
    // a string and a number add through the first character's code
    assert_eq!(
        binary(
            Token::Plus,
            Value::String("a".into()),
            Value::Number(1.0)
        ),
        Some(Value::String("b".into()))
    );
    assert_eq!(
        binary(
            Token::Plus,
            Value::Number(2.0),
            Value::String("A".into())
        ),
        Some(Value::String("C".into()))
    );
}

#[test]
fn test_plus_character_code_addition_needs_a_character() {
    assert_eq!(
        binary(Token::Plus, Value::String("".into()), Value::Number(1.0)),
        None
    );
}

#[test]
fn test_plus_string_concatenation() {
    assert_eq!(
        binary(
            Token::Plus,
            Value::String("foo".into()),
            Value::String("bar".into())
        ),
        Some(Value::String("foobar".into()))
    );
}

#[test]
fn test_plus_renders_the_non_string_operand() {
    assert_eq!(
        binary(Token::Plus, Value::String("x = ".into()), Value::Boolean(true)),
        Some(Value::String("x = true".into()))
    );
    assert_eq!(
        binary(Token::Plus, Value::Null, Value::String("!".into())),
        Some(Value::String("null!".into()))
    );
    // a string operand wins over the array rule
    assert_eq!(
        binary(
            Token::Plus,
            Value::String("arr: ".into()),
            Value::Array(vec![Value::Number(1.0), Value::Number(2.0)])
        ),
        Some(Value::String("arr: [1,2]".into()))
    );
}

#[test]
fn test_plus_appends_to_an_array_copy() {
    let arr = Value::Array(vec![Value::Number(1.0)]);

    assert_eq!(
        binary(Token::Plus, arr.clone(), Value::Number(2.0)),
        Some(Value::Array(vec![Value::Number(1.0), Value::Number(2.0)]))
    );
    // the non-array operand goes to the back on either side
    assert_eq!(
        binary(Token::Plus, Value::Number(2.0), arr),
        Some(Value::Array(vec![Value::Number(1.0), Value::Number(2.0)]))
    );
}

#[test]
fn test_arithmetic_rejects_mixed_types() {
    assert_eq!(
        binary(Token::Minus, Value::String("a".into()), Value::Number(1.0)),
        None
    );
    assert_eq!(
        binary(Token::Star, Value::String("ab".into()), Value::Number(3.0)),
        None
    );
    assert_eq!(
        binary(Token::Slash, Value::Boolean(true), Value::Number(2.0)),
        None
    );
}

#[test]
fn test_logical_operators_are_boolean_only() {
    assert_eq!(
        binary(Token::And, Value::Boolean(true), Value::Boolean(false)),
        Some(Value::Boolean(false))
    );
    assert_eq!(
        binary(Token::Or, Value::Boolean(false), Value::Boolean(true)),
        Some(Value::Boolean(true))
    );
    assert_eq!(
        binary(Token::And, Value::Number(1.0), Value::Boolean(true)),
        None
    );
}

#[test]
fn test_equality_requires_same_type() {
    assert_eq!(
        binary(Token::Equal, Value::Number(1.0), Value::Number(1.0)),
        Some(Value::Boolean(true))
    );
    assert_eq!(
        binary(Token::NotEqual, Value::Number(1.0), Value::Number(2.0)),
        Some(Value::Boolean(true))
    );
    assert_eq!(binary(Token::Equal, Value::Null, Value::Null), Some(Value::Boolean(true)));
    assert_eq!(
        binary(Token::Equal, Value::Number(1.0), Value::String("1".into())),
        None
    );
}

#[test]
fn test_arrays_do_not_compare() {
    let arr = Value::Array(vec![Value::Number(1.0)]);

    assert_eq!(binary(Token::Equal, arr.clone(), arr.clone()), None);
    assert_eq!(binary(Token::NotEqual, arr.clone(), arr), None);
}

#[test]
fn test_comparisons() {
    assert_eq!(
        binary(Token::Less, Value::Number(1.0), Value::Number(2.0)),
        Some(Value::Boolean(true))
    );
    assert_eq!(
        binary(
            Token::GreaterEqual,
            Value::String("b".into()),
            Value::String("a".into())
        ),
        Some(Value::Boolean(true))
    );
    assert_eq!(
        binary(Token::Less, Value::Boolean(false), Value::Boolean(true)),
        None
    );
}

#[test]
fn test_nan_comparisons_are_false() {
    assert_eq!(
        binary(Token::Less, Value::Number(f64::NAN), Value::Number(1.0)),
        Some(Value::Boolean(false))
    );
    assert_eq!(
        binary(
            Token::GreaterEqual,
            Value::Number(f64::NAN),
            Value::Number(f64::NAN)
        ),
        Some(Value::Boolean(false))
    );
}

#[test]
fn test_bitwise_uses_integral_part() {
    assert_eq!(
        binary(Token::BitAnd, Value::Number(6.9), Value::Number(3.0)),
        Some(Value::Number(2.0))
    );
    assert_eq!(
        binary(Token::BitOr, Value::Number(4.0), Value::Number(1.0)),
        Some(Value::Number(5.0))
    );
    assert_eq!(
        binary(Token::BitAnd, Value::String("a".into()), Value::Number(1.0)),
        None
    );
}

#[test]
fn test_unary_operators() {
    assert_eq!(
        Value::apply_unary(&Token::Minus, &Value::Number(3.0)),
        Some(Value::Number(-3.0))
    );
    assert_eq!(
        Value::apply_unary(&Token::Not, &Value::Boolean(true)),
        Some(Value::Boolean(false))
    );
    assert_eq!(
        Value::apply_unary(&Token::BitNot, &Value::Number(0.0)),
        Some(Value::Number(-1.0))
    );
    assert_eq!(Value::apply_unary(&Token::Minus, &Value::Boolean(true)), None);
    assert_eq!(Value::apply_unary(&Token::Not, &Value::Number(1.0)), None);
}

#[test]
fn test_rendering() {
    assert_eq!(Value::Number(3.0).to_string(), "3");
    assert_eq!(Value::Number(3.5).to_string(), "3.5");
    assert_eq!(Value::Number(-0.25).to_string(), "-0.25");
    assert_eq!(Value::Null.to_string(), "null");
    assert_eq!(Value::Boolean(true).to_string(), "true");
    assert_eq!(Value::String("hi".into()).to_string(), "hi");
    assert_eq!(
        Value::Array(vec![
            Value::Number(1.0),
            Value::String("two".into()),
            Value::Array(vec![Value::Number(3.0)]),
        ])
        .to_string(),
        "[1,two,[3]]"
    );
}

#[test]
fn test_scope_chain_lookup_is_innermost_first() {
    let mut chain = ScopeChain::new();
    chain.define("x".into(), Value::Number(1.0));
    chain.define("y".into(), Value::Number(10.0));

    chain.push_frame();
    chain.define("x".into(), Value::Number(2.0));

    assert_eq!(chain.lookup("x"), Some(&Value::Number(2.0)));
    assert_eq!(chain.lookup("y"), Some(&Value::Number(10.0)));

    chain.pop_frame();

    assert_eq!(chain.lookup("x"), Some(&Value::Number(1.0)));
}

#[test]
fn test_scope_chain_mutation_hits_the_defining_frame() {
    let mut chain = ScopeChain::new();
    chain.define("x".into(), Value::Number(1.0));

    chain.push_frame();
    if let Some(value) = chain.lookup_mut("x") {
        *value = Value::Number(42.0);
    }
    chain.pop_frame();

    assert_eq!(chain.lookup("x"), Some(&Value::Number(42.0)));
}
