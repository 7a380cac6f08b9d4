//! Corpus index model and weighted random-access fortune reader.
//!
//! This crate discovers strfile-indexed text corpora under arbitrary root
//! paths, parses each corpus's binary index into an in-memory descriptor
//! without loading the corpus itself, and picks random records with two
//! levels of weighting: a jar (corpus) first, then a record within it.
//! Picking a record costs two seek+read operations — one against the
//! index's offset table, one against the corpus text.
//!
//! The pieces, leaves first:
//!
//! - [`strfile`] parses one index file into an [`strfile::IndexDescriptor`]
//!   and extracts record byte spans from the corpus.
//! - [`registry`] holds the discovered jars in order and implements
//!   weighted and uniform selection over them.
//! - [`walk`] recursively discovers candidate index files and feeds them
//!   to the registry.
//! - [`listing`] reports aggregate selection probabilities grouped by
//!   source directory.
//!
//! Everything is single-threaded, synchronous, and handle-tight: no file
//! handle outlives the operation that opened it. Random draws come from a
//! caller-supplied [`rand::Rng`], so tests can seed deterministically.
//!
//! ```no_run
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//! use tfortune_core::{SelectionMode, build_registry};
//!
//! let registry = build_registry(&["/usr/share/games/fortunes/dt/"]);
//! let mut rng = StdRng::from_os_rng();
//! let fortune = registry.select_fortune(SelectionMode::Weighted, &mut rng)?;
//! # Ok::<(), tfortune_core::FortuneError>(())
//! ```

pub mod error;
pub mod listing;
pub mod registry;
pub mod strfile;
pub mod walk;

pub use error::{FortuneError, Result};
pub use listing::{DirectoryGroup, JarShare, Report, list_grouped};
pub use registry::{Registry, SelectionMode, SelectionResult};
pub use strfile::IndexDescriptor;
pub use walk::{INDEX_SUFFIX, build_registry, walk_root};
