//! Recursive discovery of strfile-indexed corpora.

use std::ffi::OsString;
use std::fs::{self, ReadDir};
use std::io;
use std::path::{Path, PathBuf};

use crate::error::{FortuneError, Result};
use crate::registry::Registry;

/// Suffix that marks a file as a strfile index.
pub const INDEX_SUFFIX: &str = ".dat";

/// Walks every root and registers each discovered corpus.
///
/// Roots are walked independently into the one shared registry; a root
/// that fails outright is reported and does not affect the others.
pub fn build_registry<P: AsRef<Path>>(roots: &[P]) -> Registry {
	let mut registry = Registry::new();
	for root in roots {
		let root = root.as_ref();
		if let Err(error) = walk_root(root, &mut registry) {
			tracing::warn!(root = %root.display(), error = %error, "walk.root.failed");
		}
	}
	registry
}

/// Populates `registry` with every discoverable corpus under `root`.
///
/// Traversal is an explicit-stack depth-first walk over owned
/// `(ReadDir, PathBuf)` frames, so deep trees and link cycles never grow
/// the call stack. Entries are classified via `fs::metadata` rather than
/// directory-entry type hints, which are inconsistently populated across
/// filesystems. Per-entry failures (unreadable entries, unopenable
/// subdirectories, bad indexes) are reported and skipped; only a root that
/// is neither a readable directory nor a regular corpus file fails the
/// call, and then with no registry side effects.
pub fn walk_root(root: &Path, registry: &mut Registry) -> Result<()> {
	let top = match fs::read_dir(root) {
		Ok(dir) => dir,
		Err(dir_error) => return register_bare_file(root, registry, dir_error),
	};

	let mut stack: Vec<(ReadDir, PathBuf)> = vec![(top, root.to_path_buf())];

	'walk: while let Some((mut frame, dir_path)) = stack.pop() {
		while let Some(entry) = frame.next() {
			let entry = match entry {
				Ok(entry) => entry,
				Err(error) => {
					tracing::warn!(dir = %dir_path.display(), error = %error, "walk.entry.unreadable");
					continue;
				}
			};
			let path = entry.path();
			let metadata = match fs::metadata(&path) {
				Ok(metadata) => metadata,
				Err(error) => {
					tracing::warn!(path = %path.display(), error = %error, "walk.entry.unstatable");
					continue;
				}
			};

			if metadata.is_dir() {
				match fs::read_dir(&path) {
					Ok(sub) => {
						// Descend; the parent frame resumes when the
						// child is exhausted and popped.
						stack.push((frame, dir_path));
						stack.push((sub, path));
						continue 'walk;
					}
					Err(error) => {
						tracing::warn!(dir = %path.display(), error = %error, "walk.dir.denied");
					}
				}
			} else if metadata.is_file() && has_index_suffix(&path) {
				if let Err(error) = registry.insert(&path) {
					tracing::warn!(index = %path.display(), error = %error, "registry.insert.skip");
				}
			}
		}
	}

	Ok(())
}

/// Fallback for a root that is not a readable directory: treat it as a
/// bare corpus file and register its synthesized sibling index.
fn register_bare_file(root: &Path, registry: &mut Registry, dir_error: io::Error) -> Result<()> {
	let metadata = fs::metadata(root).map_err(|error| FortuneError::Io {
		path: root.to_path_buf(),
		error,
	})?;
	if !metadata.is_file() {
		return Err(FortuneError::Io {
			path: root.to_path_buf(),
			error: dir_error,
		});
	}

	let mut index_path = OsString::from(root.as_os_str());
	index_path.push(INDEX_SUFFIX);
	registry.insert(Path::new(&index_path))
}

fn has_index_suffix(path: &Path) -> bool {
	path.file_name()
		.and_then(|name| name.to_str())
		.is_some_and(|name| name.len() > INDEX_SUFFIX.len() && name.ends_with(INDEX_SUFFIX))
}
