use super::prelude::{
    parse_module, AssignExpression, Expression, InfixExpression, ParseErrorType, Parsed, Statement,
};
use crate::lexer::prelude::Token;

fn parse(src: &str) -> Parsed {
    parse_module(src).expect("parse failed")
}

fn parse_err(src: &str) -> ParseErrorType {
    parse_module(src).expect_err("expected a parse error").error
}

fn first_expression(parsed: &Parsed) -> &Expression {
    match parsed.module.program.statements.first() {
        Some(Statement::Expression { expression, .. }) => expression,
        other => panic!("expected an expression statement, got {other:?}"),
    }
}

fn infix(expression: &Expression) -> &InfixExpression {
    match expression {
        Expression::Infix(infix) => infix,
        other => panic!("expected an infix expression, got {other:?}"),
    }
}

fn assign(expression: &Expression) -> &AssignExpression {
    match expression {
        Expression::Assign(assign) => assign,
        other => panic!("expected an assignment, got {other:?}"),
    }
}

#[test]
fn test_product_binds_tighter_than_sum() {
    let parsed = parse("1 + 2 * 3");
    let root = infix(first_expression(&parsed));

    assert_eq!(root.operator, Token::Plus);
    assert!(matches!(*root.left, Expression::Number { value, .. } if value == 1.0));

    let right = infix(&root.right);
    assert_eq!(right.operator, Token::Star);
}

#[test]
fn test_comparison_binds_looser_than_sum() {
    let parsed = parse("1 + 2 < 3 * 4");
    let root = infix(first_expression(&parsed));

    assert_eq!(root.operator, Token::Less);
    assert_eq!(infix(&root.left).operator, Token::Plus);
    assert_eq!(infix(&root.right).operator, Token::Star);
}

#[test]
fn test_logical_or_is_loosest() {
    let parsed = parse("a || b && c == d");
    let root = infix(first_expression(&parsed));

    assert_eq!(root.operator, Token::Or);

    let right = infix(&root.right);
    assert_eq!(right.operator, Token::And);
    assert_eq!(infix(&right.right).operator, Token::Equal);
}

#[test]
fn test_bitwise_shares_arithmetic_precedence() {
    // `|` binds like `+`, `&` binds like `*`
    let parsed = parse("1 | 2 & 3");
    let root = infix(first_expression(&parsed));

    assert_eq!(root.operator, Token::BitOr);
    assert_eq!(infix(&root.right).operator, Token::BitAnd);
}

#[test]
fn test_binary_operators_are_left_associative() {
    let parsed = parse("10 - 2 - 3");
    let root = infix(first_expression(&parsed));

    assert_eq!(root.operator, Token::Minus);
    assert_eq!(infix(&root.left).operator, Token::Minus);
    assert!(matches!(*root.right, Expression::Number { value, .. } if value == 3.0));
}

#[test]
fn test_grouping_leaves_no_node_behind() {
    let parsed = parse("(1 + 2) * 3");
    let root = infix(first_expression(&parsed));

    assert_eq!(root.operator, Token::Star);
    assert_eq!(infix(&root.left).operator, Token::Plus);
}

#[test]
fn test_unary_binds_tighter_than_binary() {
    let parsed = parse("-a * !b");
    let root = infix(first_expression(&parsed));

    assert_eq!(root.operator, Token::Star);
    assert!(matches!(*root.left, Expression::Unary(ref unary) if unary.operator == Token::Minus));
    assert!(matches!(*root.right, Expression::Unary(ref unary) if unary.operator == Token::Not));
}

#[test]
fn test_unary_operators_nest() {
    let parsed = parse("!!ok");
    let outer = match first_expression(&parsed) {
        Expression::Unary(unary) => unary,
        other => panic!("expected a unary expression, got {other:?}"),
    };

    assert_eq!(outer.operator, Token::Not);
    assert!(matches!(*outer.operand, Expression::Unary(_)));
}

#[test]
fn test_assignment_targets() {
    let parsed = parse("x = 1");
    let root = assign(first_expression(&parsed));
    assert_eq!(root.operator, Token::Assign);
    assert!(matches!(*root.target, Expression::Identifier(_)));

    let parsed = parse("x += 1");
    assert_eq!(assign(first_expression(&parsed)).operator, Token::PlusAssign);

    let parsed = parse("arr[0] = 1");
    let root = assign(first_expression(&parsed));
    assert!(matches!(*root.target, Expression::Index(_)));
}

#[test]
fn test_assignment_chains_to_the_right() {
    let parsed = parse("x = y = 2");
    let root = assign(first_expression(&parsed));

    assert!(matches!(*root.value, Expression::Assign(_)));
}

#[test]
fn test_invalid_assignment_target() {
    assert_eq!(parse_err("1 = 2"), ParseErrorType::InvalidAssignmentTarget);
}

#[test]
fn test_array_literals() {
    let parsed = parse("[1, 'two', [true], []]");
    let elements = match first_expression(&parsed) {
        Expression::Array { elements, .. } => elements,
        other => panic!("expected an array literal, got {other:?}"),
    };

    assert_eq!(elements.len(), 4);
    assert!(matches!(elements[2], Expression::Array { .. }));
    assert!(matches!(&elements[3], Expression::Array { elements, .. } if elements.is_empty()));
}

#[test]
fn test_array_literal_allows_trailing_comma() {
    let parsed = parse("[1, 2,]");
    let elements = match first_expression(&parsed) {
        Expression::Array { elements, .. } => elements,
        other => panic!("expected an array literal, got {other:?}"),
    };

    assert_eq!(elements.len(), 2);
}

#[test]
fn test_calls_and_indexing() {
    let parsed = parse("f(1, g(2), arr[0])");
    let call = match first_expression(&parsed) {
        Expression::Call(call) => call,
        other => panic!("expected a call, got {other:?}"),
    };

    assert_eq!(call.name, "f");
    assert_eq!(call.arguments.len(), 3);
    assert!(matches!(call.arguments[1], Expression::Call(_)));
    assert!(matches!(call.arguments[2], Expression::Index(_)));
}

#[test]
fn test_functions_are_collected_separately() {
    let parsed = parse(
        r#"
        func add(a, b) { return a + b }
        func nop() { }
        x = add(1, 2)
        "#,
    );
    let program = &parsed.module.program;

    assert_eq!(program.statements.len(), 1);
    assert_eq!(program.functions.len(), 2);

    let add = &program.functions["add"];
    assert_eq!(add.params, vec!["a".to_string(), "b".to_string()]);
    assert_eq!(add.body.statements.len(), 1);
    assert!(program.functions["nop"].params.is_empty());
}

#[test]
fn test_duplicate_function_is_rejected() {
    let err = parse_err("func f() { } func f() { }");

    assert_eq!(
        err,
        ParseErrorType::DuplicateFunction {
            name: "f".to_string()
        }
    );
}

#[test]
fn test_if_else() {
    let parsed = parse("if (x < 1) { y = 1 } else { y = 2 }");

    match &parsed.module.program.statements[0] {
        Statement::If {
            consequence,
            alternative,
            ..
        } => {
            assert_eq!(consequence.statements.len(), 1);
            assert!(alternative.is_some());
        }
        other => panic!("expected an if statement, got {other:?}"),
    }
}

#[test]
fn test_condition_parentheses_are_mandatory() {
    let err = parse_err("if x < 1 { }");

    assert!(matches!(err, ParseErrorType::UnexpectedToken { .. }));
}

#[test]
fn test_while_and_jump_statements() {
    let parsed = parse("while (true) { break continue }");

    match &parsed.module.program.statements[0] {
        Statement::While { body, .. } => {
            assert!(matches!(body.statements[0], Statement::Break { .. }));
            assert!(matches!(body.statements[1], Statement::Continue { .. }));
        }
        other => panic!("expected a while statement, got {other:?}"),
    }
}

#[test]
fn test_return_value_is_optional() {
    let parsed = parse("func f() { return } func g() { return 1 }");
    let program = &parsed.module.program;

    assert!(matches!(
        program.functions["f"].body.statements[0],
        Statement::Return { value: None, .. }
    ));
    assert!(matches!(
        program.functions["g"].body.statements[0],
        Statement::Return { value: Some(_), .. }
    ));
}

#[test]
fn test_comments_are_collected_not_parsed() {
    let parsed = parse(
        r#"
        # leading
        x = 1 # trailing
        "#,
    );

    assert_eq!(parsed.comments.len(), 2);
    assert_eq!(parsed.module.program.statements.len(), 1);
}

#[test]
fn test_unclosed_expression_reports_end_of_file() {
    let err = parse_err("x = ");

    assert!(matches!(
        err,
        ParseErrorType::UnexpectedToken {
            token: Token::Eof,
            ..
        }
    ));
}

#[test]
fn test_lex_errors_surface_as_parse_errors() {
    let err = parse_err("x = $");

    assert!(matches!(err, ParseErrorType::LexError { .. }));
}

#[test]
fn test_expression_display_shows_grouping() {
    let parsed = parse("1 + 2 * 3");

    assert_eq!(first_expression(&parsed).to_string(), "(1 + (2 * 3))");

    let parsed = parse("-x + y");

    assert_eq!(first_expression(&parsed).to_string(), "((-x) + y)");
}
