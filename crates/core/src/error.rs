//! Error types for corpus indexing, discovery, and selection.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while reading indexes or picking fortunes.
#[derive(Debug, Error)]
pub enum FortuneError {
	/// The strfile header could not be read or was too short.
	#[error("strfile header of {path} is unreadable or the wrong size: {error}")]
	MalformedIndex {
		/// Path to the offending index file.
		path: PathBuf,
		/// The underlying I/O error.
		error: std::io::Error,
	},

	/// The companion corpus file for an index is absent or unstatable.
	#[error("cannot find size of corpus file {path}: {error}")]
	CorpusMissing {
		/// Path to the corpus file derived from the index path.
		path: PathBuf,
		/// The underlying I/O error.
		error: std::io::Error,
	},

	/// Selection was requested against a registry with no records.
	#[error("cannot pick a fortune from an empty corpus registry")]
	EmptyCorpus,

	/// The weighted pick walked past every jar without selecting one.
	///
	/// Indicates a probability-accumulation bug, not user error.
	#[error("miscounted the number of available fortunes as {total_records}")]
	SelectionMiscount {
		/// The registry's record total at the time of the failed pick.
		total_records: u64,
	},

	/// An I/O operation on an index or corpus file failed.
	#[error("I/O error on {path}: {error}")]
	Io {
		/// Path to the file that failed.
		path: PathBuf,
		/// The underlying I/O error.
		error: std::io::Error,
	},
}

/// Result type for fortune operations.
pub type Result<T> = std::result::Result<T, FortuneError>;
