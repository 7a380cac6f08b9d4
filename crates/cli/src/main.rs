//! tfortune binary.
//!
//! Discovers strfile-indexed fortune corpora under the given roots
//! (recursively), then either prints one randomly selected fortune or,
//! with `-f`, lists every corpus with its selection probability grouped
//! by directory.

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tfortune_core::{SelectionMode, build_registry, list_grouped};

const DEFAULT_FORTUNE_DIR: &str = "/usr/share/games/fortunes/dt/";

/// tfortune command line arguments.
#[derive(Parser, Debug)]
#[command(name = "tfortune")]
#[command(about = "Print a random fortune drawn from strfile-indexed corpora")]
struct Args {
	/// List corpora and their selection probabilities instead of printing a fortune
	#[arg(short = 'f', long = "files")]
	list_files: bool,

	/// Give every corpus an equal chance regardless of its record count
	#[arg(short = 'u', long = "uniform")]
	uniform: bool,

	/// Seed the random number generator for reproducible draws
	#[arg(long, value_name = "N")]
	seed: Option<u64>,

	/// Verbose logging
	#[arg(short, long)]
	verbose: bool,

	/// Directories (or bare corpus files) to search for fortunes
	#[arg(value_name = "PATH")]
	roots: Vec<PathBuf>,
}

fn main() -> ExitCode {
	let args = Args::parse();

	let subscriber = tracing_subscriber::fmt()
		.with_max_level(if args.verbose {
			tracing::Level::DEBUG
		} else {
			tracing::Level::WARN
		})
		.with_writer(std::io::stderr)
		.finish();
	if tracing::subscriber::set_global_default(subscriber).is_err() {
		eprintln!("tfortune: could not install logger");
	}

	let roots = if args.roots.is_empty() {
		vec![PathBuf::from(DEFAULT_FORTUNE_DIR)]
	} else {
		args.roots
	};
	let mode = if args.uniform {
		SelectionMode::Uniform
	} else {
		SelectionMode::Weighted
	};

	let registry = build_registry(&roots);

	if args.list_files {
		// Zero discovered corpora is a valid (0%) listing, not an error.
		print!("{}", list_grouped(&registry, mode, &roots));
		return ExitCode::SUCCESS;
	}

	let mut rng = match args.seed {
		Some(seed) => StdRng::seed_from_u64(seed),
		None => StdRng::from_os_rng(),
	};

	match registry.select_fortune(mode, &mut rng) {
		Ok(fortune) => {
			let mut stdout = std::io::stdout().lock();
			if let Err(error) = stdout.write_all(&fortune.text).and_then(|()| stdout.flush()) {
				eprintln!("tfortune: cannot write fortune: {error}");
				return ExitCode::FAILURE;
			}
			ExitCode::SUCCESS
		}
		Err(error) => {
			eprintln!("tfortune: {error}");
			ExitCode::FAILURE
		}
	}
}
