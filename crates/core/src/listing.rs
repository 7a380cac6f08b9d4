//! Grouped selection-probability report.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::registry::{Registry, SelectionMode};

/// Per-jar line of the report.
#[derive(Debug, Clone, PartialEq)]
pub struct JarShare {
	/// Display name: the corpus path (index path minus its suffix).
	pub corpus_path: PathBuf,
	/// Selection probability of this jar under the report's mode.
	pub share: f64,
}

/// One directory's worth of jars and their aggregate probability.
#[derive(Debug, Clone, PartialEq)]
pub struct DirectoryGroup {
	/// Directory component shared by the group's corpus paths.
	pub directory: PathBuf,
	/// Aggregate probability: sum of the contained jars' shares.
	pub share: f64,
	/// The group's jars, in discovery order.
	pub jars: Vec<JarShare>,
}

/// Selection probabilities grouped by source directory.
///
/// Built by [`list_grouped`]; rendered by its [`fmt::Display`] impl so the
/// caller decides where the report goes.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
	/// Mode the probabilities were computed under.
	pub mode: SelectionMode,
	/// Groups in order of first appearance.
	pub groups: Vec<DirectoryGroup>,
	/// The requested roots, reported at 0% when no jars were found.
	pub empty_roots: Vec<PathBuf>,
}

/// Computes per-jar and per-directory selection probabilities.
///
/// Two jars share a group iff the directory component of their corpus
/// paths is byte-identical; jars without a separator fall into the
/// current-directory group. An empty registry yields a report carrying
/// each requested root at 0% — a valid outcome, distinct from a selection
/// failure.
pub fn list_grouped(registry: &Registry, mode: SelectionMode, roots: &[PathBuf]) -> Report {
	if registry.is_empty() {
		return Report {
			mode,
			groups: Vec::new(),
			empty_roots: roots.to_vec(),
		};
	}

	let total_records = registry.total_records() as f64;
	let total_jars = registry.len() as f64;

	let mut groups: Vec<DirectoryGroup> = Vec::new();
	for jar in registry.jars() {
		let share = match mode {
			SelectionMode::Weighted => f64::from(jar.record_count) / total_records,
			SelectionMode::Uniform => 1.0 / total_jars,
		};
		let directory = directory_of(&jar.corpus_path);
		let entry = JarShare {
			corpus_path: jar.corpus_path.clone(),
			share,
		};
		match groups.iter_mut().find(|group| group.directory == directory) {
			Some(group) => {
				group.share += share;
				group.jars.push(entry);
			}
			None => groups.push(DirectoryGroup {
				directory,
				share,
				jars: vec![entry],
			}),
		}
	}

	Report {
		mode,
		groups,
		empty_roots: Vec::new(),
	}
}

/// Directory component of a corpus path; paths without a separator belong
/// to the current directory.
fn directory_of(corpus_path: &Path) -> PathBuf {
	match corpus_path.parent() {
		Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
		_ => PathBuf::from("."),
	}
}

impl fmt::Display for Report {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		if self.groups.is_empty() {
			for root in &self.empty_roots {
				writeln!(f, "  0.00% {}", root.display())?;
			}
			return Ok(());
		}
		for group in &self.groups {
			writeln!(f, "{:6.2}% {}", 100.0 * group.share, group.directory.display())?;
			for jar in &group.jars {
				writeln!(f, "    {:5.2}% {}", 100.0 * jar.share, jar.corpus_path.display())?;
			}
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use std::path::PathBuf;

	use crate::strfile::IndexDescriptor;

	use super::*;

	fn jar(corpus: &str, record_count: u32) -> IndexDescriptor {
		IndexDescriptor {
			index_path: PathBuf::from(format!("{corpus}.dat")),
			corpus_path: PathBuf::from(corpus),
			record_count,
			min_len: 1,
			max_len: 1,
			delimiter: b'%',
			corpus_byte_size: u64::from(record_count) * 3,
		}
	}

	fn spec_registry() -> Registry {
		Registry::from_jars(vec![jar("a/1", 2), jar("a/2", 2), jar("b/3", 4)])
	}

	#[test]
	fn weighted_groups_aggregate_record_shares() {
		let report = list_grouped(&spec_registry(), SelectionMode::Weighted, &[]);
		assert_eq!(report.groups.len(), 2);

		let a = &report.groups[0];
		assert_eq!(a.directory, PathBuf::from("a"));
		assert!((a.share - 0.5).abs() < 1e-9);
		assert_eq!(a.jars.len(), 2);
		assert!((a.jars[0].share - 0.25).abs() < 1e-9);

		let b = &report.groups[1];
		assert_eq!(b.directory, PathBuf::from("b"));
		assert!((b.share - 0.5).abs() < 1e-9);
		assert!((b.jars[0].share - 0.5).abs() < 1e-9);
	}

	#[test]
	fn uniform_groups_count_jars_not_records() {
		let report = list_grouped(&spec_registry(), SelectionMode::Uniform, &[]);
		assert_eq!(report.groups.len(), 2);

		let a = &report.groups[0];
		assert!((a.share - 2.0 / 3.0).abs() < 1e-9);
		assert!((a.jars[0].share - 1.0 / 3.0).abs() < 1e-9);

		let b = &report.groups[1];
		assert!((b.share - 1.0 / 3.0).abs() < 1e-9);
	}

	#[test]
	fn group_share_equals_sum_of_members() {
		for mode in [SelectionMode::Weighted, SelectionMode::Uniform] {
			let report = list_grouped(&spec_registry(), mode, &[]);
			for group in &report.groups {
				let sum: f64 = group.jars.iter().map(|j| j.share).sum();
				assert!((group.share - sum).abs() < 1e-9);
			}
		}
	}

	#[test]
	fn separator_less_paths_group_as_current_directory() {
		let registry = Registry::from_jars(vec![jar("loose", 1), jar("a/nested", 1)]);
		let report = list_grouped(&registry, SelectionMode::Uniform, &[]);
		assert_eq!(report.groups[0].directory, PathBuf::from("."));
		assert_eq!(report.groups[1].directory, PathBuf::from("a"));
	}

	#[test]
	fn empty_registry_reports_roots_at_zero() {
		let registry = Registry::new();
		let roots = vec![PathBuf::from("/nowhere/fortunes")];
		let report = list_grouped(&registry, SelectionMode::Weighted, &roots);
		assert!(report.groups.is_empty());
		assert_eq!(report.empty_roots, roots);
		assert_eq!(report.to_string(), "  0.00% /nowhere/fortunes\n");
	}
}
