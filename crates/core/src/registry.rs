//! Ordered collection of discovered corpora and random selection over it.

use std::path::{Path, PathBuf};

use rand::Rng;

use crate::error::{FortuneError, Result};
use crate::strfile::{self, IndexDescriptor};

/// How a jar is chosen when picking a fortune.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionMode {
	/// Probability proportional to a jar's share of the total record count.
	#[default]
	Weighted,
	/// Every jar equally likely regardless of its record count.
	Uniform,
}

/// One selected fortune: the record bytes plus where they came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionResult {
	/// Record content with the trailing delimiter line trimmed.
	pub text: Vec<u8>,
	/// Path of the corpus file the record was read from.
	pub corpus_path: PathBuf,
}

/// An ordered, growable collection of jars.
///
/// Insertion order is discovery order; it matters only for reproducible
/// listing, never for selection correctness. `total_records` is maintained
/// incrementally and always equals the sum of the jars' record counts.
#[derive(Debug, Default)]
pub struct Registry {
	jars: Vec<IndexDescriptor>,
	total_records: u64,
}

impl Registry {
	/// Creates an empty registry.
	pub fn new() -> Self {
		Self::default()
	}

	/// Creates an empty registry with room for `capacity` jars.
	pub fn with_capacity(capacity: usize) -> Self {
		Self {
			jars: Vec::with_capacity(capacity),
			total_records: 0,
		}
	}

	/// The registered jars, in discovery order.
	pub fn jars(&self) -> &[IndexDescriptor] {
		&self.jars
	}

	/// Sum of record counts across all jars.
	pub fn total_records(&self) -> u64 {
		self.total_records
	}

	/// Number of registered jars.
	pub fn len(&self) -> usize {
		self.jars.len()
	}

	/// Whether no jars have been registered.
	pub fn is_empty(&self) -> bool {
		self.jars.is_empty()
	}

	/// Parses the index at `index_path` and appends the resulting jar.
	///
	/// On failure the registry is left exactly as it was; callers report
	/// the error and continue, so one bad corpus never aborts discovery.
	pub fn insert(&mut self, index_path: &Path) -> Result<()> {
		let jar = strfile::read_descriptor(index_path)?;
		self.total_records += u64::from(jar.record_count);
		self.jars.push(jar);
		Ok(())
	}

	#[cfg(test)]
	pub(crate) fn from_jars(jars: Vec<IndexDescriptor>) -> Self {
		let total_records = jars.iter().map(|jar| u64::from(jar.record_count)).sum();
		Self { jars, total_records }
	}

	/// Picks one random record: first a jar per `mode`, then a uniform
	/// record within it, then two seek+read operations to extract it.
	///
	/// Fails with [`FortuneError::EmptyCorpus`] when the registry holds no
	/// records, and with [`FortuneError::SelectionMiscount`] when the
	/// weighted walk exhausts every jar without selecting one.
	pub fn select_fortune(&self, mode: SelectionMode, rng: &mut impl Rng) -> Result<SelectionResult> {
		if self.jars.is_empty() || self.total_records == 0 {
			return Err(FortuneError::EmptyCorpus);
		}

		let jar = match mode {
			SelectionMode::Weighted => self.pick_weighted(rng)?,
			SelectionMode::Uniform => self.pick_uniform(rng),
		};

		let record = rng.random_range(0..jar.record_count);
		let (start, end) = strfile::record_span(jar, record)?;
		let text = strfile::extract_record(jar, start, end)?;

		Ok(SelectionResult {
			text,
			corpus_path: jar.corpus_path.clone(),
		})
	}

	fn pick_weighted(&self, rng: &mut impl Rng) -> Result<&IndexDescriptor> {
		let p = rng.random::<f64>();
		let total = self.total_records as f64;
		let mut cumulative = 0.0;
		for jar in &self.jars {
			cumulative += f64::from(jar.record_count) / total;
			if cumulative >= p && jar.record_count > 0 {
				return Ok(jar);
			}
		}
		Err(FortuneError::SelectionMiscount {
			total_records: self.total_records,
		})
	}

	fn pick_uniform(&self, rng: &mut impl Rng) -> &IndexDescriptor {
		// Record-less jars are unpickable; drawing among the rest keeps
		// the remaining jars equally likely. total_records > 0 guarantees
		// at least one candidate.
		let candidates: Vec<&IndexDescriptor> =
			self.jars.iter().filter(|jar| jar.record_count > 0).collect();
		candidates[rng.random_range(0..candidates.len())]
	}
}
