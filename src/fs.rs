//! Reading and writing N-Triples files.
use crate::{document, Error, Statement, Triple};
use std::{
	fmt, io,
	path::{Path, PathBuf},
};

/// I/O failure on an N-Triples file.
#[derive(Debug)]
pub struct FileError {
	path: PathBuf,
	source: io::Error,
}

impl FileError {
	fn new(path: &Path, source: io::Error) -> Self {
		Self {
			path: path.to_owned(),
			source,
		}
	}

	pub fn path(&self) -> &Path {
		&self.path
	}

	pub fn io_error(&self) -> &io::Error {
		&self.source
	}
}

impl fmt::Display for FileError {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "unable to access `{}`: {}", self.path.display(), self.source)
	}
}

impl std::error::Error for FileError {
	fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
		Some(&self.source)
	}
}

/// Outcome of [`write_ntriples_file`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteSummary {
	/// Number of triples written.
	pub count: usize,
}

/// Reads the triples of an N-Triples file.
pub fn read_ntriples_file<P: AsRef<Path>>(path: P) -> Result<Vec<Triple>, Error> {
	let path = path.as_ref();
	let text = std::fs::read_to_string(path).map_err(|e| FileError::new(path, e))?;
	let triples = document::decode(&text)?;
	log::debug!("read {} triples from `{}`", triples.len(), path.display());
	Ok(triples)
}

/// Writes statements to an N-Triples file, one per line, replacing its
/// content. Graph components are not written.
pub fn write_ntriples_file<P: AsRef<Path>, S: Statement>(
	path: P,
	statements: &[S],
) -> Result<WriteSummary, Error> {
	let path = path.as_ref();
	let mut text = document::encode(statements)?;
	if !statements.is_empty() {
		text.push('\n');
	}

	std::fs::write(path, text).map_err(|e| FileError::new(path, e))?;
	log::debug!("wrote {} triples to `{}`", statements.len(), path.display());
	Ok(WriteSummary {
		count: statements.len(),
	})
}
