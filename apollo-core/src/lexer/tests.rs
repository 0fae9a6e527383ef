use super::prelude::{Lexer, LexicalError, LexicalErrorType, Token};

fn lex_all(input: &str) -> Vec<Token> {
    let mut lexer = Lexer::new(input.char_indices().map(|(i, c)| (i as u32, c)));
    let mut tokens = vec![];

    loop {
        let (_, token, _) = lexer.next_token().expect("unexpected lexical error");
        if token == Token::Eof {
            break;
        }
        tokens.push(token);
    }

    tokens
}

fn lex_error(input: &str) -> LexicalError {
    let mut lexer = Lexer::new(input.char_indices().map(|(i, c)| (i as u32, c)));

    loop {
        match lexer.next_token() {
            Ok((_, Token::Eof, _)) => panic!("expected a lexical error in {input:?}"),
            Ok(_) => {}
            Err(err) => return err,
        }
    }
}

#[test]
fn test_numbers() {
    let tokens = lex_all("0 10 125 3.14 1. 007");

    assert_eq!(
        tokens,
        vec![
            Token::Number(0.0),
            Token::Number(10.0),
            Token::Number(125.0),
            Token::Number(3.14),
            Token::Number(1.0),
            Token::Number(7.0),
        ]
    );
}

#[test]
fn test_second_period_terminates_number() {
    // `1.2.3` lexes as 1.2, then an error on the dangling `.`
    let err = lex_error("1.2.3");

    assert_eq!(
        err.error,
        LexicalErrorType::UnrecognizedToken { tok: '.' }
    );
}

#[test]
fn test_strings() {
    let tokens = lex_all(r#" "hello" 'a' "with # inside" '' "#);

    assert_eq!(
        tokens,
        vec![
            Token::String("hello".to_string()),
            Token::String("a".to_string()),
            Token::String("with # inside".to_string()),
            Token::String("".to_string()),
        ]
    );
}

#[test]
fn test_no_escape_processing() {
    let tokens = lex_all(r#" "a\n" "#);

    assert_eq!(tokens, vec![Token::String("a\\n".to_string())]);
}

#[test]
fn test_unterminated_string() {
    let err = lex_error(r#" "never closed "#);

    assert_eq!(err.error, LexicalErrorType::UnterminatedString);
}

#[test]
fn test_two_char_operators_take_priority() {
    let tokens = lex_all("== != >= <= && || += -= *= /= %= = ! > < & | + - * / %");

    assert_eq!(
        tokens,
        vec![
            Token::Equal,
            Token::NotEqual,
            Token::GreaterEqual,
            Token::LessEqual,
            Token::And,
            Token::Or,
            Token::PlusAssign,
            Token::MinusAssign,
            Token::StarAssign,
            Token::SlashAssign,
            Token::PercentAssign,
            Token::Assign,
            Token::Not,
            Token::Greater,
            Token::Less,
            Token::BitAnd,
            Token::BitOr,
            Token::Plus,
            Token::Minus,
            Token::Star,
            Token::Slash,
            Token::Percent,
        ]
    );
}

#[test]
fn test_keywords_and_identifiers() {
    let tokens = lex_all("if else while null true false func return break continue foo _bar x1");

    assert_eq!(
        tokens,
        vec![
            Token::If,
            Token::Else,
            Token::While,
            Token::Null,
            Token::True,
            Token::False,
            Token::Func,
            Token::Return,
            Token::Break,
            Token::Continue,
            Token::Ident("foo".to_string()),
            Token::Ident("_bar".to_string()),
            Token::Ident("x1".to_string()),
        ]
    );
}

#[test]
fn test_for_is_a_plain_identifier() {
    // `for` is not part of the language and must not hit the keyword table
    let tokens = lex_all("for");

    assert_eq!(tokens, vec![Token::Ident("for".to_string())]);
}

#[test]
fn test_comments() {
    let tokens = lex_all(
        r#"
        # leading comment
        # and another one
        x = 1 # trailing
        "#,
    );

    assert_eq!(
        tokens,
        vec![
            Token::Comment,
            Token::Comment,
            Token::Ident("x".to_string()),
            Token::Assign,
            Token::Number(1.0),
            Token::Comment,
        ]
    );
}

#[test]
fn test_unrecognized_character() {
    let err = lex_error("x = $");

    assert_eq!(err.error, LexicalErrorType::UnrecognizedToken { tok: '$' });
}

#[test]
fn test_program() {
    let input = r#"
        func add(a, b) {
            return a + b
        }

        arr = [1, 2, 3]
        arr[0] += add(2, 3)
        while (!done) { break }
    "#;

    let tokens = lex_all(input);

    assert_eq!(
        tokens,
        vec![
            Token::Func,
            Token::Ident("add".to_string()),
            Token::LParen,
            Token::Ident("a".to_string()),
            Token::Comma,
            Token::Ident("b".to_string()),
            Token::RParen,
            Token::LBrace,
            Token::Return,
            Token::Ident("a".to_string()),
            Token::Plus,
            Token::Ident("b".to_string()),
            Token::RBrace,
            Token::Ident("arr".to_string()),
            Token::Assign,
            Token::LBracket,
            Token::Number(1.0),
            Token::Comma,
            Token::Number(2.0),
            Token::Comma,
            Token::Number(3.0),
            Token::RBracket,
            Token::Ident("arr".to_string()),
            Token::LBracket,
            Token::Number(0.0),
            Token::RBracket,
            Token::PlusAssign,
            Token::Ident("add".to_string()),
            Token::LParen,
            Token::Number(2.0),
            Token::Comma,
            Token::Number(3.0),
            Token::RParen,
            Token::While,
            Token::LParen,
            Token::Not,
            Token::Ident("done".to_string()),
            Token::RParen,
            Token::LBrace,
            Token::Break,
            Token::RBrace,
        ]
    );
}

#[test]
fn test_spans_are_byte_offsets() {
    let mut lexer = Lexer::new("ab = 10".char_indices().map(|(i, c)| (i as u32, c)));

    let (start, token, end) = lexer.next_token().expect("lex failed");
    assert_eq!(token, Token::Ident("ab".to_string()));
    assert_eq!((start, end), (0, 2));

    let (start, token, end) = lexer.next_token().expect("lex failed");
    assert_eq!(token, Token::Assign);
    assert_eq!((start, end), (3, 4));

    let (start, token, end) = lexer.next_token().expect("lex failed");
    assert_eq!(token, Token::Number(10.0));
    assert_eq!((start, end), (5, 7));
}
