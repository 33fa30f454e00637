use std::{io, path::Path};

use assert_matches::assert_matches;

use super::*;
use crate::{
	fmt::Show,
	program::{Operator, RelAddr},
	runtime::Vm,
	syntax::lexer::Token,
	tests,
	transcript::Latex,
};
use super::tokens::Recovery;


fn compile_with(input: &str, limits: &Limits) -> (Compilation, Interner) {
	let source = Source::from_reader(Path::new("<test>"), input.as_bytes())
		.expect("failed to read source");
	let mut interner = Interner::new();
	let compilation = compile(&source, &mut interner, limits);

	(compilation, interner)
}


fn compile_str(input: &str) -> (Compilation, Interner) {
	compile_with(input, &Limits::default())
}


fn code(compilation: &Compilation) -> &[Instruction] {
	match &compilation.result {
		Ok(program) => &program.code,
		Err(fatal) => panic!("compilation failed: {}", fatal),
	}
}


/// Error events, excluding plain tokens.
fn errors(compilation: &Compilation) -> Vec<&Event> {
	compilation.transcript.errors().collect()
}


fn addr(level: usize, offset: Word) -> RelAddr {
	RelAddr { level, offset }
}


fn test_dir<P, F>(path: P, mut check: F) -> io::Result<()>
where
	P: AsRef<Path>,
	F: FnMut(&Compilation) -> bool,
{
	tests::util::test_dir(
		path,
		|source| {
			let mut interner = Interner::new();
			let compilation = compile(&source, &mut interner, &Limits::default());

			if !check(&compilation) {
				let messages: Vec<String> = compilation.transcript
					.errors()
					.map(|event| Show(event, &interner).to_string())
					.collect();

				panic!("{}: {:#?}", source.path.display(), messages);
			}

			Ok(())
		}
	)
}


#[test]
fn test_positive() -> io::Result<()> {
	test_dir(
		"src/compiler/tests/data/positive",
		|compilation| compilation.errors == 0 && compilation.result.is_ok(),
	)
}


#[test]
fn test_negative() -> io::Result<()> {
	test_dir(
		"src/compiler/tests/data/negative",
		|compilation| compilation.errors > 0 || compilation.result.is_err(),
	)
}


#[test]
fn test_constants_and_variables() {
	let (compilation, _) = compile_str("const a = 5; var b; begin b := a + 3; write b end.");

	assert_eq!(compilation.errors, 0);
	assert_eq!(
		code(&compilation),
		&[
			Instruction::Jmp(1),
			Instruction::Ict(3),
			Instruction::Lit(5),
			Instruction::Lit(3),
			Instruction::Opr(Operator::Add),
			Instruction::Sto(addr(0, 2)),
			Instruction::Lod(addr(0, 2)),
			Instruction::Opr(Operator::Wrt),
			Instruction::Ret { level: 0, params: 0 },
		]
	);
}


#[test]
fn test_bare_write_prints_line() {
	let (compilation, _) = compile_str("begin write end.");

	assert_eq!(compilation.errors, 0);
	assert_eq!(code(&compilation)[2], Instruction::Opr(Operator::Wrl));
}


#[test]
fn test_parameter_offsets() {
	let (compilation, _) = compile_str("function f(a, b, c) return a - c; write f(1, 2, 3).");

	assert_eq!(compilation.errors, 0);
	assert_eq!(
		code(&compilation),
		&[
			Instruction::Jmp(7),
			Instruction::Jmp(2),
			Instruction::Ict(2),
			Instruction::Lod(addr(1, -3)),
			Instruction::Lod(addr(1, -1)),
			Instruction::Opr(Operator::Sub),
			Instruction::Ret { level: 1, params: 3 },
			Instruction::Ict(2),
			Instruction::Lit(1),
			Instruction::Lit(2),
			Instruction::Lit(3),
			Instruction::Cal { level: 0, address: 2 },
			Instruction::Opr(Operator::Wrt),
			Instruction::Ret { level: 0, params: 0 },
		]
	);
}


#[test]
fn test_if_jumps_past_statement() {
	let (compilation, _) = compile_str("var x; if x = 0 then x := 1.");
	let code = code(&compilation);

	assert_eq!(code[5], Instruction::Jpc(8));
	assert_eq!(code[7], Instruction::Sto(addr(0, 2)));
	assert_eq!(code.len(), 9);
}


#[test]
fn test_while_jumps() {
	let (compilation, _) = compile_str("var i; while i < 3 do i := i + 1.");
	let code = code(&compilation);

	assert_eq!(code[5], Instruction::Jpc(11));
	assert_eq!(code[10], Instruction::Jmp(2));
	assert_eq!(code[11], Instruction::Ret { level: 0, params: 0 });
}


#[test]
fn test_conditional_return_keeps_final_return() {
	let (compilation, _) = compile_str(
		"function f(x) begin if x > 0 then return 1 end; write f(1)."
	);
	let code = code(&compilation);

	assert_eq!(compilation.errors, 0);
	assert_eq!(code[6], Instruction::Jpc(9));
	assert_eq!(code[8], Instruction::Ret { level: 1, params: 1 });
	assert_eq!(code[9], Instruction::Ret { level: 1, params: 1 });
}


#[test]
fn test_duplicate_return_suppressed() {
	let (compilation, _) = compile_str("function f() return 1; write f().");
	let returns = code(&compilation)
		.iter()
		.filter(|instruction| matches!(instruction, Instruction::Ret { level: 1, .. }))
		.count();

	assert_eq!(returns, 1);
}


#[test]
fn test_omitted_comma() {
	let (compilation, _) = compile_str("var a b; begin a := 1; b := 2 end.");

	assert_eq!(compilation.errors, 1);
	assert_matches!(
		&errors(&compilation)[..],
		[Event::Insert { kind: TokenKind::Comma, .. }]
	);
	assert_eq!(code(&compilation)[1], Instruction::Ict(4));
}


#[test]
fn test_recovery_policy() {
	let mut interner = Interner::new();
	let cursor = Cursor::from("; ) y".as_bytes());
	let lexer = Lexer::new(cursor, &mut interner, Limits::default());
	let mut tokens = TokenStream::new(lexer, 30);
	tokens.step().expect("failed to read first token");

	assert_matches!(tokens.expect(TokenKind::Semicolon), Ok(Recovery::Consumed));
	assert_eq!(tokens.errors(), 0);

	// Same class: consumed and replaced.
	assert_matches!(tokens.expect(TokenKind::Semicolon), Ok(Recovery::Replaced));
	assert_matches!(tokens.kind(), TokenKind::Identifier(_));
	assert_eq!(tokens.errors(), 1);

	// Different class: kept.
	assert_matches!(tokens.expect(TokenKind::Semicolon), Ok(Recovery::Inserted));
	assert_matches!(tokens.kind(), TokenKind::Identifier(_));
	assert_eq!(tokens.errors(), 2);

	assert_matches!(
		tokens.transcript().events(),
		[
			Event::Token { token: Token { kind: TokenKind::Semicolon, .. }, .. },
			Event::Replace { token: Token { kind: TokenKind::CloseParens, .. }, .. },
			Event::Insert { kind: TokenKind::Semicolon, .. },
		]
	);
}


#[test]
fn test_keyword_replaced_by_keyword() {
	let (compilation, _) = compile_str("var x; while x < 1 then x := 1.");

	assert_eq!(compilation.errors, 1);
	assert_matches!(
		&errors(&compilation)[..],
		[
			Event::Replace {
				token: Token { kind: TokenKind::Keyword(Keyword::Then), .. },
				expected: TokenKind::Keyword(Keyword::Do),
				..
			}
		]
	);
}


#[test]
fn test_undefined_variable_is_healed() {
	let (compilation, _) = compile_str("begin x := 1; write x end.");

	assert_eq!(compilation.errors, 1);
	assert_matches!(
		&errors(&compilation)[..],
		[Event::TypeError { message: "undefined", .. }]
	);
	assert_eq!(code(&compilation)[1], Instruction::Ict(3));

	let program = compilation
		.runnable(Limits::default().min_error)
		.expect("program should be runnable");

	let mut output = Vec::new();
	Vm::new(program, &Limits::default(), &mut output)
		.run()
		.expect("execution failed");

	assert_eq!(output, b"1 ");
}


#[test]
fn test_argument_count() {
	let (compilation, _) = compile_str("function f(a) return a; write f(1, 2).");

	assert_eq!(compilation.errors, 1);
	assert_matches!(&errors(&compilation)[..], [Event::Message { message: "#par", .. }]);
}


#[test]
fn test_call_without_parens() {
	let (compilation, _) = compile_str("function f() return 1; write f.");

	assert_eq!(compilation.errors, 2);
	assert_matches!(
		&errors(&compilation)[..],
		[
			Event::Insert { kind: TokenKind::OpenParens, .. },
			Event::Insert { kind: TokenKind::CloseParens, .. },
		]
	);
}


#[test]
fn test_missing_operator() {
	let (compilation, _) = compile_str("var x; x := 1 2.");

	assert_eq!(compilation.errors, 1);
	assert_matches!(&errors(&compilation)[..], [Event::MissingOperator { .. }]);
}


#[test]
fn test_missing_identifier() {
	let (compilation, interner) = compile_str("var ;.");

	assert_eq!(compilation.errors, 1);

	let errors = errors(&compilation);
	assert_matches!(&errors[..], [Event::MissingIdent { .. }]);
	assert_eq!(Show(errors[0], &interner).to_string(), "line 1, column 5 - missing identifier");
}


#[test]
fn test_missing_period() {
	let (compilation, _) = compile_str("var x; x := 1");

	assert_eq!(compilation.errors, 1);
	assert_matches!(&errors(&compilation)[..], [Event::Insert { kind: TokenKind::Period, .. }]);
	assert_matches!(compilation.result, Ok(_));
}


#[test]
fn test_assignment_to_constant() {
	let (compilation, _) = compile_str("const c = 1; c := 2.");

	assert_eq!(compilation.errors, 1);
	assert_matches!(&errors(&compilation)[..], [Event::TypeError { message: "var/par", .. }]);
}


#[test]
fn test_constant_requires_number() {
	let (compilation, _) = compile_str("const c = x; write c.");

	assert_matches!(
		&errors(&compilation)[..],
		[Event::TypeError { message: "number", .. }, ..]
	);
}


#[test]
fn test_invalid_relational_operator() {
	let (compilation, _) = compile_str("var x; if x := 1 then x := 2.");

	assert_eq!(compilation.errors, 1);
	assert_matches!(&errors(&compilation)[..], [Event::TypeError { message: "rel-op", .. }]);
}


#[test]
fn test_unexpected_tokens_deleted() {
	let (compilation, _) = compile_str("var x; begin x := 1 ) ) ) end.");

	// Deletions are annotated, but not counted.
	assert_eq!(compilation.errors, 0);
	assert_matches!(
		&errors(&compilation)[..],
		[Event::Delete { .. }, Event::Delete { .. }, Event::Delete { .. }]
	);
	assert!(compilation.runnable(Limits::default().min_error).is_some());
}


#[test]
fn test_semicolon_after_parameters_deleted() {
	let (compilation, _) = compile_str("function f(x); return x; write f(2).");

	assert_eq!(compilation.errors, 0);
	assert_matches!(
		&errors(&compilation)[..],
		[Event::Delete { token: Token { kind: TokenKind::Semicolon, .. }, .. }]
	);

	let program = compilation.runnable(Limits::default().min_error).expect("not runnable");
	let mut output = Vec::new();
	Vm::new(program, &Limits::default(), &mut output).run().expect("execution failed");

	assert_eq!(output, b"2 ");
}


#[test]
fn test_statement_start_inserts_semicolon() {
	let (compilation, _) = compile_str("var x; begin x := 1 write x end.");

	assert_eq!(compilation.errors, 1);
	assert_matches!(&errors(&compilation)[..], [Event::Insert { kind: TokenKind::Semicolon, .. }]);
}


#[test]
fn test_long_name_warning() {
	let limits = Limits { max_name: 3, ..Limits::default() };
	let (compilation, _) = compile_with("var abcdef; ab := 1.", &limits);

	assert_eq!(compilation.errors, 1);
	assert_matches!(
		&errors(&compilation)[..],
		[Event::Message { message: "too long token", .. }]
	);
}


#[test]
fn test_too_many_errors() {
	// Every statement after the first is missing its separator.
	let input = format!("var x; begin {} end.", "x := 1 ".repeat(40));
	let (compilation, _) = compile_str(&input);

	assert_eq!(compilation.errors, 31);
	assert_matches!(compilation.result, Err(Fatal::TooManyErrors { limit: 30 }));
	assert_matches!(compilation.transcript.events().last(), Some(Event::Fatal { .. }));
	assert!(compilation.runnable(Limits::default().min_error).is_none());
}


#[test]
fn test_code_overflow() {
	let limits = Limits { max_code: 5, ..Limits::default() };
	let (compilation, _) = compile_with("var x; begin x := 1; x := 2; x := 3 end.", &limits);

	assert_matches!(compilation.result, Err(Fatal::Code(_)));
}


#[test]
fn test_line_too_long() {
	let input = format!("var x;\nx := 1{}.", " ".repeat(130));
	let (compilation, _) = compile_str(&input);

	assert_matches!(compilation.result, Err(Fatal::Lexer(_)));
}


#[test]
fn test_deep_parentheses() {
	// Split across lines to stay under the line length limit.
	let open = "(((((((((((((((((((((((((((((((((((((((((((((((((\n".repeat(100);
	let close = ")))))))))))))))))))))))))))))))))))))))))))))))))\n".repeat(100);
	let input = format!("var x;\nx := {}1{}.", open, close);

	let (compilation, _) = compile_str(&input);

	assert_matches!(compilation.result, Err(Fatal::TooDeep { limit: 64 }));
	assert_matches!(compilation.transcript.events().last(), Some(Event::Fatal { .. }));
}


#[test]
fn test_nesting_limit() {
	let limits = Limits { max_nesting: 3, ..Limits::default() };

	let (shallow, _) = compile_with("var x; x := ((1)) + (2).", &limits);
	assert_eq!(shallow.errors, 0);
	assert!(shallow.result.is_ok());

	let (statements, _) = compile_with(
		"var x; begin while x < 1 do if x = 0 then x := 1 end.",
		&limits,
	);
	assert!(statements.result.is_ok());

	let (deep, _) = compile_with(
		"var x; begin while x < 1 do begin if x = 0 then x := 1 end end.",
		&limits,
	);
	assert_matches!(deep.result, Err(Fatal::TooDeep { limit: 3 }));

	let (call, _) = compile_with(
		"function f(a) return a; write f(f(f(f(1)))).",
		&limits,
	);
	assert_matches!(call.result, Err(Fatal::TooDeep { limit: 3 }));
}


#[test]
fn test_too_many_levels() {
	let limits = Limits { max_level: 2, ..Limits::default() };
	let (compilation, _) = compile_with(
		"function f() function g() return 1; return g(); write f().",
		&limits,
	);

	assert_matches!(compilation.result, Err(Fatal::Table(_)));
}


#[test]
fn test_error_threshold() {
	let limits = Limits::default();

	let (two, _) = compile_str("var x; begin x := 1 x := 2 x := 3 end.");
	assert_eq!(two.errors, 2);
	assert!(two.runnable(limits.min_error).is_some());

	let (three, _) = compile_str("var x; begin x := 1 x := 2 x := 3 x := 4 end.");
	assert_eq!(three.errors, 3);
	assert!(three.runnable(limits.min_error).is_none());
}


#[test]
fn test_latex_identifier_styles() {
	let (compilation, interner) = compile_str(
		"const c = 1; var v; function f(p) return p + c; v := f(c)."
	);
	assert_eq!(compilation.errors, 0);

	let latex = Latex::new(&compilation.transcript, &interner).to_string();

	assert!(latex.starts_with("\\documentclass"));
	assert!(latex.contains("{\\bf const}\\ {\\sf c}\\ $=$\\ 1$;$"));
	assert!(latex.contains("{\\it f}$($"));
	assert!(latex.contains("{\\bf return}\\ {\\sl p}"));
	assert!(latex.contains("\\ v\\ $:=$"));
	assert!(latex.ends_with("$.$\n\\end{document}\n"));
}


#[test]
fn test_latex_annotations() {
	let (compilation, interner) = compile_str("var a b; begin a := 1 ) end");
	let latex = Latex::new(&compilation.transcript, &interner).to_string();

	assert!(latex.contains("\\insert{$,$}"));
	assert!(latex.contains("\\delete{$)$}"));
	assert!(latex.contains("\\insert{$.$}"));
}
