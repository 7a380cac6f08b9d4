//! Fixture helpers: build corpus files and their strfile indexes on disk.

use std::fs;
use std::path::{Path, PathBuf};

/// Writes a corpus at `root/rel` plus its `.dat` index and returns the
/// index path. Records are stored `text\n%\n` with the offset table
/// holding one big-endian u32 start offset per record.
pub fn write_jar(root: &Path, rel: &str, records: &[&str]) -> PathBuf {
	let corpus_path = root.join(rel);
	if let Some(parent) = corpus_path.parent() {
		fs::create_dir_all(parent).unwrap();
	}

	let mut text = Vec::new();
	let mut offsets = Vec::new();
	for record in records {
		offsets.push(text.len() as u32);
		text.extend_from_slice(record.as_bytes());
		text.extend_from_slice(b"\n%\n");
	}
	fs::write(&corpus_path, &text).unwrap();

	let lengths: Vec<u32> = records.iter().map(|r| r.len() as u32).collect();
	let max_len = lengths.iter().copied().max().unwrap_or(0);
	let min_len = lengths.iter().copied().min().unwrap_or(0);

	let mut data = Vec::new();
	data.extend_from_slice(&2u32.to_be_bytes());
	data.extend_from_slice(&(records.len() as u32).to_be_bytes());
	data.extend_from_slice(&max_len.to_be_bytes());
	data.extend_from_slice(&min_len.to_be_bytes());
	data.extend_from_slice(&0u32.to_be_bytes());
	data.push(b'%');
	data.extend_from_slice(&[0u8; 3]);
	for offset in &offsets {
		data.extend_from_slice(&offset.to_be_bytes());
	}

	let index_path = index_path_for(&corpus_path);
	fs::write(&index_path, &data).unwrap();
	index_path
}

/// The `.dat` sibling of a corpus path.
pub fn index_path_for(corpus_path: &Path) -> PathBuf {
	let mut index_path = corpus_path.as_os_str().to_os_string();
	index_path.push(".dat");
	PathBuf::from(index_path)
}
