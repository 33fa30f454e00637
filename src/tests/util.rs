use std::{
	fs,
	io,
	path::{Path, PathBuf},
};

use crate::syntax::Source;


/// Extension of PL/0' source files.
const EXTENSION: &str = "pl0";


/// Run a test for every PL/0' source in the given directory and its subdirectories.
/// The path is relative to the crate root. Files are visited in path order.
pub fn test_dir<P, F>(path: P, mut test: F) -> io::Result<()>
where
	P: AsRef<Path>,
	F: FnMut(Source) -> io::Result<()>,
{
	let mut dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
	dir.push(path);

	fn run<F>(dir: &Path, test: &mut F) -> io::Result<()>
	where
		F: FnMut(Source) -> io::Result<()>,
	{
		let mut paths = fs::read_dir(dir)?
			.map(|entry| entry.map(|entry| entry.path()))
			.collect::<io::Result<Vec<_>>>()?;

		paths.sort();

		for path in paths {
			if path.is_dir() {
				run(&path, test)?;
			} else if path.extension().map_or(false, |ext| ext == EXTENSION) {
				test(Source::from_path(path)?)?;
			}
		}

		Ok(())
	}

	run(&dir, &mut test)
}
