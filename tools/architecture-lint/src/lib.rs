//! Layer-boundary lint for the `builders` service crate.
//!
//! The service keeps its hexagon at module level: `domain` holds entities,
//! services and ports, `inbound` the HTTP adapter, `outbound` persistence and
//! security adapters. Every file under those roots is parsed with `syn` and
//! each path it names is classified as a [`Dependency`] on another layer or
//! on an infrastructure [`Concern`]:
//!
//! | layer      | may not reach                                  |
//! |------------|------------------------------------------------|
//! | `domain`   | `inbound`, `outbound`, web, OpenAPI, database, crypto |
//! | `inbound`  | `outbound`, database, crypto                   |
//! | `outbound` | `inbound`, web, OpenAPI                        |
//!
//! Run it with `cargo run -p architecture-lint`, optionally passing the
//! service crate directory.

mod layer;
mod report;
mod scan;

use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

pub use layer::{Concern, Dependency, Layer};
pub use report::{Report, Violation};
pub use scan::{SourceFile, load_layer_sources};

/// Name the service crate is imported under from its own binaries and tests.
pub const SERVICE_CRATE: &str = "builders";

/// Failures that stop the lint before it can report.
#[derive(Debug, Error)]
pub enum LintError {
    /// The crate's sources could not be read.
    #[error("failed to read sources under {}: {source}", dir.display())]
    Read {
        /// Directory being read.
        dir: PathBuf,
        /// Underlying I/O failure.
        source: io::Error,
    },
    /// A file is not valid Rust.
    #[error("failed to parse {}: {message}", file.display())]
    Parse {
        /// File path relative to `src/`.
        file: PathBuf,
        /// Parser message.
        message: String,
    },
    /// A file does not sit under any layer directory.
    #[error("{} is outside the domain, inbound and outbound layers", file.display())]
    OutsideLayers {
        /// File path relative to `src/`.
        file: PathBuf,
    },
}

/// Lint the service crate rooted at `crate_dir` (the directory holding its
/// `Cargo.toml`).
///
/// # Errors
/// Returns [`LintError`] when sources cannot be read or parsed.
pub fn lint_crate_dir(crate_dir: &Path) -> Result<Report, LintError> {
    let src_dir = crate_dir.join("src");
    let files = load_layer_sources(&src_dir).map_err(|source| LintError::Read {
        dir: src_dir.clone(),
        source,
    })?;
    lint_files(&files)
}

/// Lint in-memory sources whose paths are relative to `src/`.
///
/// # Errors
/// Returns [`LintError`] when a file cannot be parsed or sits outside the
/// layer directories.
pub fn lint_files(files: &[SourceFile]) -> Result<Report, LintError> {
    let mut report = Report::default();
    for file in files {
        let layer = Layer::of_file(&file.path).ok_or_else(|| LintError::OutsideLayers {
            file: file.path.clone(),
        })?;
        let parsed = syn::parse_file(&file.contents).map_err(|err| LintError::Parse {
            file: file.path.clone(),
            message: err.to_string(),
        })?;
        report.files_checked += 1;
        report
            .violations
            .extend(forbidden_dependencies(&file.path, layer, &parsed));
    }
    Ok(report)
}

/// One violation per forbidden dependency, citing the first path naming it.
fn forbidden_dependencies(path: &Path, layer: Layer, parsed: &syn::File) -> Vec<Violation> {
    let mut first_use: BTreeMap<Dependency, String> = BTreeMap::new();
    for segments in scan::named_paths(parsed) {
        let Some(dependency) = Dependency::classify(&segments, SERVICE_CRATE) else {
            continue;
        };
        if !layer.permits(dependency) {
            first_use
                .entry(dependency)
                .or_insert_with(|| segments.join("::"));
        }
    }
    first_use
        .into_iter()
        .map(|(dependency, via)| Violation {
            file: path.to_path_buf(),
            layer,
            dependency,
            via,
        })
        .collect()
}
