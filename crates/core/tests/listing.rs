//! Grouped probability listing over a discovered tree.

mod common;

use tempfile::TempDir;
use tfortune_core::{SelectionMode, build_registry, list_grouped};

use common::write_jar;

#[test]
fn grouped_listing_over_discovered_tree() {
	let dir = TempDir::new().unwrap();
	write_jar(dir.path(), "a/1", &["r1", "r2"]);
	write_jar(dir.path(), "a/2", &["r3", "r4"]);
	write_jar(dir.path(), "b/3", &["r5", "r6", "r7", "r8"]);

	let roots = vec![dir.path().to_path_buf()];
	let registry = build_registry(&roots);
	assert_eq!(registry.len(), 3);
	assert_eq!(registry.total_records(), 8);

	let weighted = list_grouped(&registry, SelectionMode::Weighted, &roots);
	assert_eq!(weighted.groups.len(), 2);
	for group in &weighted.groups {
		assert!((group.share - 0.5).abs() < 1e-9, "group {:?} share {}", group.directory, group.share);
	}

	let uniform = list_grouped(&registry, SelectionMode::Uniform, &roots);
	assert_eq!(uniform.groups.len(), 2);
	let a = uniform
		.groups
		.iter()
		.find(|g| g.directory == dir.path().join("a"))
		.unwrap();
	let b = uniform
		.groups
		.iter()
		.find(|g| g.directory == dir.path().join("b"))
		.unwrap();
	assert!((a.share - 2.0 / 3.0).abs() < 1e-9);
	assert!((b.share - 1.0 / 3.0).abs() < 1e-9);
	for group in &uniform.groups {
		let member_sum: f64 = group.jars.iter().map(|j| j.share).sum();
		assert!((group.share - member_sum).abs() < 1e-9);
	}
}

#[test]
fn report_lines_show_percentages_and_corpus_names() {
	let dir = TempDir::new().unwrap();
	write_jar(dir.path(), "a/1", &["r1", "r2"]);
	write_jar(dir.path(), "b/3", &["r3", "r4"]);

	let roots = vec![dir.path().to_path_buf()];
	let registry = build_registry(&roots);
	let rendered = list_grouped(&registry, SelectionMode::Weighted, &roots).to_string();

	assert!(rendered.contains("50.00%"));
	// Display names are corpus paths: the index suffix never appears.
	assert!(!rendered.contains(".dat"));
	assert!(rendered.contains(&dir.path().join("a/1").display().to_string()));
}
