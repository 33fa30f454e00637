mod args;
mod compiler;
mod config;
mod error;
mod fmt;
mod program;
mod runtime;
mod symbol;
mod syntax;
mod table;
mod term;
mod transcript;
#[cfg(test)]
mod tests;

use std::{fs, io};

use term::color;

use args::{Args, Command};
use error::Error;
use transcript::{Event, Latex};


fn main() -> ! {
	let command = match args::parse(std::env::args_os()) {
		Ok(command) => command,
		Err(error) => {
			eprint!("{}", error);
			std::process::exit(1)
		}
	};

	let result = match command {
		Command::Run(args) => run(args),
		Command::Help(msg) | Command::Version(msg) => {
			println!("{}", msg);
			std::process::exit(0)
		},
	};

	let exit_code = match result {
		Ok(code) => code,
		Err(error) => {
			eprintln!("{}: {}", color::Fg(color::Red, "Error"), error);
			1
		}
	};

	std::process::exit(exit_code)
}


fn run(args: Args) -> Result<i32, Error> {
	let mut interner = symbol::Interner::new();

	let source = syntax::Source
		::from_path(args.source.clone())
		.map_err(|error| Error::io(error, &args.source))?;

	// ----------------------------------------------------------------------------------------
	eprintln!("{}", color::Fg(color::Yellow, "start compilation"));

	let compilation = compiler::compile(&source, &mut interner, &args.limits);

	for event in compilation.transcript.errors() {
		// The fatal error is reported on exit. Deletions are not errors, and only appear in
		// the transcript.
		if let Event::Fatal { .. } | Event::Delete { .. } = event {
			continue;
		}

		eprintln!(
			"{}: {}",
			color::Fg(color::Red, "Error"),
			fmt::Show(event, &interner)
		);
	}

	if let Some(path) = &args.tex {
		let latex = Latex::new(&compilation.transcript, &interner);
		fs::write(path, latex.to_string())
			.map_err(|error| Error::io(error, path))?;
	}

	let program = match &compilation.result {
		Ok(program) => program,
		Err(fatal) => return Err(fatal.clone().into()),
	};

	if compilation.errors > 0 {
		eprintln!(
			"{} {}",
			color::Fg(color::Red, compilation.errors),
			if compilation.errors == 1 { "error" } else { "errors" }
		);
	}

	if args.print_code {
		println!("{}", color::Fg(color::Yellow, "--------------------------------------------------"));
		println!("{}", program);
		println!("{}", color::Fg(color::Yellow, "--------------------------------------------------"));
	}

	// ----------------------------------------------------------------------------------------
	if compilation.runnable(args.limits.min_error).is_none() {
		return Ok(2);
	}

	if args.check {
		return Ok(0);
	}

	eprintln!("{}", color::Fg(color::Yellow, "start execution"));

	let stdout = io::stdout();
	let mut vm = runtime::Vm::new(program, &args.limits, io::BufWriter::new(stdout.lock()));

	vm.run()?;

	Ok(0)
}
