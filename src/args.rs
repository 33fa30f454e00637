use std::{ffi::OsString, path::PathBuf, str::FromStr};

use clap::{clap_app, crate_description, crate_version};

use crate::config::Limits;


#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Command {
	Help(Box<str>),
	Version(Box<str>),
	Run(Args)
}


#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Args {
	/// The source file.
	pub source: PathBuf,
	/// Compile, but don't run.
	pub check: bool,
	/// Print the instruction listing.
	pub print_code: bool,
	/// Where to write the LaTeX transcript.
	pub tex: Option<PathBuf>,
	pub limits: Limits,
}


pub fn parse<A, T>(args: A) -> clap::Result<Command>
where
	A: IntoIterator<Item = T>,
	T: Into<OsString> + Clone
{
	let app = clap_app!(
		pl0 =>
			(version: crate_version!())
			(about: crate_description!())
			(@arg check: --check "Compile only, instead of executing.")
			(@arg code: --code "Print the generated code")
			(@arg tex: --tex +takes_value value_name[FILE] "Write the LaTeX transcript to FILE")
			(@arg stack: --stack +takes_value value_name[CELLS] {is_number} "Size of the runtime stack")
			(@arg code_size: --("code-size") +takes_value value_name[N] {is_number} "Maximum number of instructions")
			(@arg SOURCE: +required "The PL/0' source file")
	);

	match app.get_matches_from_safe(args) {
		Ok(matches) => {
			let mut limits = Limits::default();

			if let Some(stack) = number(&matches, "stack") {
				limits.max_stack = stack;
			}

			if let Some(code_size) = number(&matches, "code_size") {
				limits.max_code = code_size;
			}

			Ok(
				Command::Run(
					Args {
						source: matches
							.value_of_os("SOURCE")
							.map(PathBuf::from)
							.unwrap_or_default(),
						check: matches.is_present("check"),
						print_code: matches.is_present("code"),
						tex: matches.value_of_os("tex").map(PathBuf::from),
						limits,
					}
				)
			)
		}

		Err(error) => match error.kind {
			clap::ErrorKind::HelpDisplayed => Ok(
				Command::Help(error.message.into_boxed_str())
			),
			clap::ErrorKind::VersionDisplayed => Ok(
				Command::Version(error.message.into_boxed_str())
			),
			_ => Err(error)
		}
	}
}


/// A numeric option. The value was already checked by `is_number`.
fn number(matches: &clap::ArgMatches, name: &str) -> Option<usize> {
	matches
		.value_of(name)
		.and_then(|value| usize::from_str(value).ok())
}


fn is_number(value: String) -> Result<(), String> {
	usize::from_str(&value)
		.map(|_| ())
		.map_err(|_| format!("'{}' is not a valid number", value))
}
