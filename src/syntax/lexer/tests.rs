use super::*;

use assert_matches::assert_matches;


fn scan_all(input: &str, interner: &mut symbol::Interner) -> Vec<Scanned> {
	scan_with(input, interner, Limits::default())
}


fn scan_with(input: &str, interner: &mut symbol::Interner, limits: Limits) -> Vec<Scanned> {
	let cursor = Cursor::from(input.as_bytes());
	let mut lexer = Lexer::new(cursor, interner, limits);
	let mut tokens = Vec::new();

	loop {
		let scanned = lexer.next_token().expect("unexpected lexer error");
		let eof = scanned.token.kind == TokenKind::EndOfInput;
		tokens.push(scanned);

		if eof {
			return tokens;
		}
	}
}


fn kinds(tokens: &[Scanned]) -> Vec<TokenKind> {
	tokens.iter().map(|scanned| scanned.token.kind).collect()
}


#[test]
fn test_function_declaration() {
	let input = "function f(x, y)\n\treturn x * y;\n";

	let mut interner = symbol::Interner::new();
	let tokens = scan_all(input, &mut interner);

	let f = interner.get("f").expect("f not interned");
	let x = interner.get("x").expect("x not interned");
	let y = interner.get("y").expect("y not interned");

	assert_eq!(
		kinds(&tokens),
		[
			TokenKind::Keyword(Keyword::Function),
			TokenKind::Identifier(f),
			TokenKind::OpenParens,
			TokenKind::Identifier(x),
			TokenKind::Comma,
			TokenKind::Identifier(y),
			TokenKind::CloseParens,
			TokenKind::Keyword(Keyword::Return),
			TokenKind::Identifier(x),
			TokenKind::Operator(Operator::Times),
			TokenKind::Identifier(y),
			TokenKind::Semicolon,
			TokenKind::EndOfInput,
		]
	);
}


#[test]
fn test_compound_operators() {
	let input = "a := b <= c <> d >= e < f > g : = h";

	let mut interner = symbol::Interner::new();
	let tokens = scan_all(input, &mut interner);
	let operators: Vec<TokenKind> = kinds(&tokens)
		.into_iter()
		.filter(|kind| !matches!(kind, TokenKind::Identifier(_)))
		.collect();

	assert_eq!(
		operators,
		[
			Operator::Assign.into(),
			Operator::LowerEquals.into(),
			Operator::NotEquals.into(),
			Operator::GreaterEquals.into(),
			Operator::Lower.into(),
			Operator::Greater.into(),
			TokenKind::Null,
			Operator::Equals.into(),
			TokenKind::EndOfInput,
		]
	);
}


#[test]
fn test_keywords_are_case_sensitive() {
	let mut interner = symbol::Interner::new();
	let tokens = scan_all("begin Begin writeln write", &mut interner);

	assert_matches!(
		&kinds(&tokens)[..],
		[
			TokenKind::Keyword(Keyword::Begin),
			TokenKind::Identifier(_),
			TokenKind::Keyword(Keyword::WriteLn),
			TokenKind::Keyword(Keyword::Write),
			TokenKind::EndOfInput,
		]
	);
}


#[test]
fn test_unclassified_bytes() {
	let mut interner = symbol::Interner::new();
	let tokens = scan_all("x # ?", &mut interner);

	assert_matches!(
		&kinds(&tokens)[..],
		[TokenKind::Identifier(_), TokenKind::Null, TokenKind::Null, TokenKind::EndOfInput]
	);
}


#[test]
fn test_layout() {
	let mut interner = symbol::Interner::new();
	let tokens = scan_all("a  b\n\n\t c", &mut interner);

	assert_eq!(tokens[0].layout, Layout { newlines: 0, spaces: 0 });
	assert_eq!(tokens[1].layout, Layout { newlines: 0, spaces: 2 });
	assert_eq!(tokens[2].layout, Layout { newlines: 2, spaces: 6 });
	assert_eq!(tokens[2].token.pos, SourcePos { line: 3, column: 3 });
}


#[test]
fn test_too_long_name() {
	let limits = Limits { max_name: 4, ..Limits::default() };
	let mut interner = symbol::Interner::new();
	let tokens = scan_with("abcdefg abcd abc", &mut interner, limits);

	let abc = interner.get("abc").expect("abc not interned");

	assert_eq!(tokens[0].token.kind, TokenKind::Identifier(abc));
	assert_eq!(tokens[0].warning, Some(Warning::TooLongToken));
	// A name of exactly the maximum length is already too long.
	assert_eq!(tokens[1].token.kind, TokenKind::Identifier(abc));
	assert_eq!(tokens[1].warning, Some(Warning::TooLongToken));
	assert_eq!(tokens[2].token.kind, TokenKind::Identifier(abc));
	assert_eq!(tokens[2].warning, None);
	assert!(interner.get("abcdefg").is_none());
	assert!(interner.get("abcd").is_none());
}


#[test]
fn test_too_large_number() {
	let mut interner = symbol::Interner::new();
	let tokens = scan_all("123 123456789012345", &mut interner);

	assert_eq!(tokens[0].token.kind, TokenKind::Number(123));
	assert_eq!(tokens[0].warning, None);
	assert_eq!(tokens[1].token.kind, TokenKind::Number(123456789012345));
	assert_eq!(tokens[1].warning, Some(Warning::TooLargeNumber));
}


#[test]
fn test_line_too_long() {
	let limits = Limits { max_line: 6, ..Limits::default() };
	let mut interner = symbol::Interner::new();
	let cursor = Cursor::from("short\nmuch too long".as_bytes());
	let mut lexer = Lexer::new(cursor, &mut interner, limits);

	assert_matches!(lexer.next_token(), Ok(_));
	assert_matches!(lexer.next_token(), Ok(_));
	assert_matches!(
		lexer.next_token(),
		Err(Error { error: ErrorKind::LineTooLong { limit: 6 }, .. })
	);
}


#[test]
fn test_read_past_end() {
	let mut interner = symbol::Interner::new();
	let cursor = Cursor::from("end.".as_bytes());
	let mut lexer = Lexer::new(cursor, &mut interner, Limits::default());

	for _ in 0 .. 2 {
		assert_matches!(lexer.next_token(), Ok(_));
	}

	assert_matches!(
		lexer.next_token(),
		Ok(Scanned { token: Token { kind: TokenKind::EndOfInput, .. }, .. })
	);
	assert_matches!(
		lexer.next_token(),
		Err(Error { error: ErrorKind::UnexpectedEof, .. })
	);
}
