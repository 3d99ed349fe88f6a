//! Source discovery and path extraction.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use syn::visit::{self, Visit};
use syn::{ItemUse, UseTree};

use crate::layer::Layer;

/// A Rust source file of the service crate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// Path relative to the crate's `src/` directory.
    pub path: PathBuf,
    /// File contents.
    pub contents: String,
}

impl SourceFile {
    /// Source at `path` (relative to `src/`) with `contents`.
    pub fn new(path: impl Into<PathBuf>, contents: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            contents: contents.into(),
        }
    }
}

/// Read every `.rs` file under the layer directories of `src_dir`.
///
/// Files are returned sorted by path so reports are stable between runs.
/// Layers without a directory are skipped.
pub fn load_layer_sources(src_dir: &Path) -> io::Result<Vec<SourceFile>> {
    let mut files = Vec::new();
    for layer in Layer::ALL {
        let dir = src_dir.join(layer.module());
        if dir.is_dir() {
            walk(src_dir, &dir, &mut files)?;
        }
    }
    files.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(files)
}

fn walk(src_dir: &Path, dir: &Path, files: &mut Vec<SourceFile>) -> io::Result<()> {
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            walk(src_dir, &path, files)?;
        } else if path.extension().is_some_and(|ext| ext == "rs") {
            let contents = fs::read_to_string(&path)?;
            let relative = path.strip_prefix(src_dir).unwrap_or(&path).to_path_buf();
            files.push(SourceFile::new(relative, contents));
        }
    }
    Ok(())
}

/// Every path named in `file`, as identifier segments in source order.
///
/// `use` trees are flattened so `use a::{b, c::d}` yields `a::b` and `a::c::d`.
pub(crate) fn named_paths(file: &syn::File) -> Vec<Vec<String>> {
    let mut collector = PathCollector::default();
    collector.visit_file(file);
    collector.paths
}

#[derive(Default)]
struct PathCollector {
    paths: Vec<Vec<String>>,
}

impl<'ast> Visit<'ast> for PathCollector {
    fn visit_path(&mut self, node: &'ast syn::Path) {
        let segments: Vec<String> = node
            .segments
            .iter()
            .map(|segment| segment.ident.to_string())
            .collect();
        if !segments.is_empty() {
            self.paths.push(segments);
        }
        visit::visit_path(self, node);
    }

    fn visit_item_use(&mut self, node: &'ast ItemUse) {
        flatten_use(&node.tree, &mut Vec::new(), &mut self.paths);
    }
}

fn flatten_use(tree: &UseTree, prefix: &mut Vec<String>, out: &mut Vec<Vec<String>>) {
    let leaf = match tree {
        UseTree::Path(path) => {
            prefix.push(path.ident.to_string());
            flatten_use(&path.tree, prefix, out);
            prefix.pop();
            return;
        }
        UseTree::Group(group) => {
            for item in &group.items {
                flatten_use(item, prefix, out);
            }
            return;
        }
        UseTree::Name(name) => name.ident.to_string(),
        UseTree::Rename(rename) => rename.ident.to_string(),
        UseTree::Glob(_) => "*".to_owned(),
    };
    let mut full = prefix.clone();
    full.push(leaf);
    out.push(full);
}
