//! Lint results.

use std::fmt;
use std::path::PathBuf;

use crate::layer::{Dependency, Layer};

/// A dependency a file's layer is not allowed to have.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// File path relative to `src/`.
    pub file: PathBuf,
    /// Layer owning the file.
    pub layer: Layer,
    /// What the file depends on.
    pub dependency: Dependency,
    /// First path in the file that introduces the dependency.
    pub via: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} depends on {} via `{}`; {}",
            self.file.display(),
            self.layer,
            self.dependency,
            self.via,
            self.dependency.remedy()
        )
    }
}

/// Outcome of linting a set of sources.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    /// Number of files parsed.
    pub files_checked: usize,
    /// Violations, grouped by file in path order.
    pub violations: Vec<Violation>,
}

impl Report {
    /// Whether no violation was found.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.violations.is_empty()
    }

    /// Violations introducing `dependency`.
    pub fn violations_of(&self, dependency: Dependency) -> impl Iterator<Item = &Violation> {
        self.violations
            .iter()
            .filter(move |violation| violation.dependency == dependency)
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_clean() {
            return write!(f, "{} files checked; layer boundaries hold", self.files_checked);
        }
        for violation in &self.violations {
            writeln!(f, "{violation}")?;
        }
        write!(
            f,
            "{} boundary violation(s) in {} files checked",
            self.violations.len(),
            self.files_checked
        )
    }
}
