//! Reader for strfile binary indexes.
//!
//! A strfile index is a binary sidecar (`corpus.dat` next to `corpus`)
//! holding per-corpus metadata and a table of byte offsets into the corpus
//! text, one offset per record. The header is big-endian on the wire
//! regardless of host endianness:
//!
//! ```text
//! offset 0  : u32 version        (ignored)
//! offset 4  : u32 record_count
//! offset 8  : u32 max_record_len
//! offset 12 : u32 min_record_len
//! offset 16 : u32 flags_bitmask  (nonzero is reported, not interpreted)
//! offset 20 : u8  delimiter_byte
//! ```
//!
//! The offset table starts at header slot 6 (byte 24); the original format
//! pads the 21-byte header out to a full u32 slot.

use std::fs::{self, File};
use std::io::{self, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use crate::error::{FortuneError, Result};

/// Size of the strfile header in bytes: five u32 fields plus the delimiter.
pub const HEADER_SIZE: usize = 21;

/// Header slot where the record offset table begins.
const OFFSET_TABLE_SLOT: u64 = 6;

/// Parsed metadata for one corpus, read from its strfile index.
///
/// Created by [`read_descriptor`] when a candidate index parses
/// successfully; immutable afterwards.
#[derive(Debug, Clone)]
pub struct IndexDescriptor {
	/// Path to the binary index file this descriptor was read from.
	pub index_path: PathBuf,
	/// Path to the human-readable corpus (index path minus its suffix).
	pub corpus_path: PathBuf,
	/// Number of selectable records in the corpus.
	pub record_count: u32,
	/// Shortest record length in bytes (informational only).
	pub min_len: u32,
	/// Longest record length in bytes (informational only).
	pub max_len: u32,
	/// Record-separator byte used in the corpus.
	pub delimiter: u8,
	/// Size of the corpus file, the implied end offset of the last record.
	pub corpus_byte_size: u64,
}

/// Parses the index file at `index_path` into an [`IndexDescriptor`].
///
/// A short or unreadable header is a [`FortuneError::MalformedIndex`]; a
/// missing companion corpus file is a [`FortuneError::CorpusMissing`].
/// Nonzero header flags are reported via `tracing::warn!` and otherwise
/// ignored. No file handles remain open after return.
pub fn read_descriptor(index_path: &Path) -> Result<IndexDescriptor> {
	let mut header = [0u8; HEADER_SIZE];
	{
		let mut file = File::open(index_path).map_err(|error| FortuneError::MalformedIndex {
			path: index_path.to_path_buf(),
			error,
		})?;
		file.read_exact(&mut header)
			.map_err(|error| FortuneError::MalformedIndex {
				path: index_path.to_path_buf(),
				error,
			})?;
	}

	let record_count = be_u32(&header, 4);
	let max_len = be_u32(&header, 8);
	let min_len = be_u32(&header, 12);
	let flags = be_u32(&header, 16);
	let delimiter = header[20];

	if flags != 0 {
		tracing::warn!(index = %index_path.display(), flags, "strfile.flags.unsupported");
	}

	let corpus_path = corpus_path_for(index_path);
	let metadata = fs::metadata(&corpus_path).map_err(|error| FortuneError::CorpusMissing {
		path: corpus_path.clone(),
		error,
	})?;

	Ok(IndexDescriptor {
		index_path: index_path.to_path_buf(),
		corpus_path,
		record_count,
		min_len,
		max_len,
		delimiter,
		corpus_byte_size: metadata.len(),
	})
}

/// Reads the byte span `[start, end)` of record `record` from the jar's
/// offset table.
///
/// The table holds one big-endian u32 start offset per record; a record's
/// end is the next record's start. When only one u32 remains readable the
/// selected record is the last one, and the corpus byte size stands in as
/// the end offset.
pub fn record_span(jar: &IndexDescriptor, record: u32) -> Result<(u64, u64)> {
	let mut file = File::open(&jar.index_path).map_err(|error| FortuneError::Io {
		path: jar.index_path.clone(),
		error,
	})?;
	let table_pos = (OFFSET_TABLE_SLOT + u64::from(record)) * 4;
	file.seek(SeekFrom::Start(table_pos))
		.map_err(|error| FortuneError::Io {
			path: jar.index_path.clone(),
			error,
		})?;

	let mut raw = [0u8; 8];
	let filled = read_available(&mut file, &mut raw).map_err(|error| FortuneError::Io {
		path: jar.index_path.clone(),
		error,
	})?;

	if filled >= 8 {
		Ok((u64::from(be_u32(&raw, 0)), u64::from(be_u32(&raw, 4))))
	} else if filled >= 4 {
		Ok((u64::from(be_u32(&raw, 0)), jar.corpus_byte_size))
	} else {
		Err(FortuneError::MalformedIndex {
			path: jar.index_path.clone(),
			error: io::ErrorKind::UnexpectedEof.into(),
		})
	}
}

/// Reads the record occupying `[start, end)` from the jar's corpus file.
///
/// When the extracted span ends in the jar's delimiter followed by a
/// newline, those two bytes are trimmed; the index format includes the
/// trailing delimiter line in its offsets but callers expect clean text.
pub fn extract_record(jar: &IndexDescriptor, start: u64, end: u64) -> Result<Vec<u8>> {
	if end < start {
		return Err(FortuneError::MalformedIndex {
			path: jar.index_path.clone(),
			error: io::Error::new(
				io::ErrorKind::InvalidData,
				format!("record end offset {end} precedes start offset {start}"),
			),
		});
	}
	let len = usize::try_from(end - start).map_err(|_| FortuneError::MalformedIndex {
		path: jar.index_path.clone(),
		error: io::Error::new(io::ErrorKind::InvalidData, "record span exceeds address space"),
	})?;

	let mut file = File::open(&jar.corpus_path).map_err(|error| FortuneError::Io {
		path: jar.corpus_path.clone(),
		error,
	})?;
	file.seek(SeekFrom::Start(start))
		.map_err(|error| FortuneError::Io {
			path: jar.corpus_path.clone(),
			error,
		})?;

	let mut text = vec![0u8; len];
	file.read_exact(&mut text).map_err(|error| FortuneError::Io {
		path: jar.corpus_path.clone(),
		error,
	})?;

	if text.len() >= 2 && text[text.len() - 2] == jar.delimiter && text[text.len() - 1] == b'\n' {
		text.truncate(text.len() - 2);
	}

	Ok(text)
}

/// Derives the corpus path by stripping the index file's trailing suffix.
pub(crate) fn corpus_path_for(index_path: &Path) -> PathBuf {
	index_path.with_extension("")
}

fn be_u32(buf: &[u8], offset: usize) -> u32 {
	let mut raw = [0u8; 4];
	raw.copy_from_slice(&buf[offset..offset + 4]);
	u32::from_be_bytes(raw)
}

/// Reads into `buf` until it is full or EOF, returning the filled length.
fn read_available(file: &mut File, buf: &mut [u8]) -> io::Result<usize> {
	let mut filled = 0;
	while filled < buf.len() {
		match file.read(&mut buf[filled..]) {
			Ok(0) => break,
			Ok(n) => filled += n,
			Err(error) if error.kind() == io::ErrorKind::Interrupted => continue,
			Err(error) => return Err(error),
		}
	}
	Ok(filled)
}
