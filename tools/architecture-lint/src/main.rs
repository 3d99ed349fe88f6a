//! Runs the layer lint over the workspace member that builds the service
//! crate, or over the crate directory given as the first argument.

use std::env;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use architecture_lint::{SERVICE_CRATE, lint_crate_dir};
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Deserialize)]
struct Manifest {
    package: Option<Package>,
    workspace: Option<Workspace>,
}

#[derive(Debug, Deserialize)]
struct Package {
    name: String,
}

#[derive(Debug, Deserialize)]
struct Workspace {
    #[serde(default)]
    members: Vec<String>,
}

#[derive(Debug, Error)]
enum LocateError {
    #[error("no workspace Cargo.toml found above {}", .0.display())]
    NoWorkspace(PathBuf),
    #[error("no member of the workspace at {} builds the `{crate_name}` package", root.display())]
    NoServiceMember {
        root: PathBuf,
        crate_name: &'static str,
    },
}

fn read_manifest(dir: &Path) -> Option<Manifest> {
    let text = fs::read_to_string(dir.join("Cargo.toml")).ok()?;
    toml::from_str(&text).ok()
}

fn workspace_root(start: &Path) -> Option<(PathBuf, Workspace)> {
    start.ancestors().find_map(|dir| {
        read_manifest(dir)
            .and_then(|manifest| manifest.workspace)
            .map(|workspace| (dir.to_path_buf(), workspace))
    })
}

fn locate_service_crate() -> Result<PathBuf, LocateError> {
    let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let start = env::current_dir().unwrap_or_else(|_| manifest_dir.clone());
    let (root, workspace) = workspace_root(&start)
        .or_else(|| workspace_root(&manifest_dir))
        .ok_or(LocateError::NoWorkspace(start))?;
    workspace
        .members
        .iter()
        .map(|member| root.join(member))
        .find(|dir| {
            read_manifest(dir)
                .and_then(|manifest| manifest.package)
                .is_some_and(|package| package.name == SERVICE_CRATE)
        })
        .ok_or(LocateError::NoServiceMember {
            root,
            crate_name: SERVICE_CRATE,
        })
}

fn main() -> ExitCode {
    let crate_dir = match env::args_os().nth(1) {
        Some(dir) => PathBuf::from(dir),
        None => match locate_service_crate() {
            Ok(dir) => dir,
            Err(err) => {
                let _ = writeln!(io::stderr().lock(), "{err}");
                return ExitCode::FAILURE;
            }
        },
    };
    match lint_crate_dir(&crate_dir) {
        Ok(report) if report.is_clean() => {
            let _ = writeln!(io::stdout().lock(), "{report}");
            ExitCode::SUCCESS
        }
        Ok(report) => {
            let _ = writeln!(io::stderr().lock(), "{report}");
            ExitCode::FAILURE
        }
        Err(err) => {
            let _ = writeln!(io::stderr().lock(), "{err}");
            ExitCode::FAILURE
        }
    }
}
