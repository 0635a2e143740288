use mallard::java::{Lexer, TokenKind};

fn kinds(src: &str) -> Vec<TokenKind> {
    Lexer::tokenize(src)
        .expect("source should tokenize")
        .iter()
        .map(|t| t.kind)
        .collect()
}

#[test]
fn stream_ends_with_exactly_one_eof() {
    let tokens = Lexer::tokenize("").expect("empty source should tokenize");
    assert_eq!(tokens.len(), 1);
    assert!(tokens[0].is_eof());
}

#[test]
fn comments_are_discarded() {
    let src = "int a; // trailing comment\n/* block\ncomment */ int b;";
    assert_eq!(
        kinds(src),
        vec![
            TokenKind::Int,
            TokenKind::Ident,
            TokenKind::Semi,
            TokenKind::Int,
            TokenKind::Ident,
            TokenKind::Semi,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn unterminated_block_comment_is_tolerated() {
    let src = "int a; /* never closed";
    assert_eq!(
        kinds(src),
        vec![
            TokenKind::Int,
            TokenKind::Ident,
            TokenKind::Semi,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn escaped_quote_does_not_terminate_string_literal() {
    let tokens = Lexer::tokenize(r#"String s = "a\"b";"#).expect("source should tokenize");
    let lit = tokens
        .iter()
        .find(|t| t.kind == TokenKind::StringLit)
        .expect("string literal should be present");
    assert_eq!(lit.text, r#"a\"b"#);
}

#[test]
fn numeric_literals_are_normalized() {
    let expectations = [
        ("0x10", TokenKind::IntLit, "16"),
        ("0b101", TokenKind::IntLit, "5"),
        ("017", TokenKind::IntLit, "15"),
        ("42L", TokenKind::LongLit, "42"),
        ("0xFFL", TokenKind::LongLit, "255"),
        ("1.5f", TokenKind::FloatLit, "1.5"),
        ("1.25", TokenKind::DoubleLit, "1.25"),
        ("2e3", TokenKind::DoubleLit, "2000"),
    ];

    for (src, kind, text) in expectations {
        let tokens = Lexer::tokenize(src).expect("literal should tokenize");
        assert_eq!(tokens[0].kind, kind, "kind of {src}");
        assert_eq!(tokens[0].text, text, "normalized text of {src}");
    }
}

#[test]
fn hexadecimal_floating_literal_uses_p_exponent() {
    let tokens = Lexer::tokenize("0x1.8p1").expect("hex float should tokenize");
    assert_eq!(tokens[0].kind, TokenKind::DoubleLit);
    assert_eq!(tokens[0].text, "3");
}

#[test]
fn numeric_literal_truncated_at_end_of_input_fails() {
    let err = Lexer::tokenize("0").expect_err("bare 0 at end of input should fail");
    assert!(err.to_string().contains("expected"));

    let err = Lexer::tokenize("1e").expect_err("missing exponent should fail");
    assert!(err.to_string().contains("exponent"));
}

#[test]
fn keywords_are_distinguished_from_identifiers() {
    let tokens = Lexer::tokenize("class Foo").expect("source should tokenize");
    assert_eq!(tokens[0].kind, TokenKind::Class);
    assert_eq!(tokens[1].kind, TokenKind::Ident);
    assert_eq!(tokens[1].text, "Foo");
}

#[test]
fn token_positions_track_line_column_and_offset() {
    let tokens = Lexer::tokenize("a\n  b").expect("source should tokenize");
    assert_eq!(tokens[0].pos.line, 1);
    assert_eq!(tokens[0].pos.column, 1);
    assert_eq!(tokens[0].pos.offset, 0);
    assert_eq!(tokens[1].pos.line, 2);
    assert_eq!(tokens[1].pos.column, 3);
    assert_eq!(tokens[1].pos.offset, 4);
}

#[test]
fn comparison_operators_lex_as_pairs() {
    assert_eq!(
        kinds("<= >= == ++ --"),
        vec![
            TokenKind::Le,
            TokenKind::Ge,
            TokenKind::Eq,
            TokenKind::Increment,
            TokenKind::Decrement,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn generic_chevrons_lex_individually() {
    assert_eq!(
        kinds("List<String>"),
        vec![
            TokenKind::Ident,
            TokenKind::OpenChevron,
            TokenKind::StringType,
            TokenKind::CloseChevron,
            TokenKind::Eof,
        ]
    );
}
