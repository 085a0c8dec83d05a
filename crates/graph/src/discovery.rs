//! Workspace root and member discovery.
//!
//! Walks upward from a starting directory to find the workspace root (a
//! `package.json` carrying a `workspaces` field, or a directory with a
//! `pnpm-workspace.yaml`), then expands that root's member patterns into
//! concrete packages.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use sublime_standard_tools::node::{PackageManager, PackageManagerKind};

use crate::error::{GraphError, GraphResult};
use crate::manifest::PackageManifest;

const PNPM_WORKSPACE_FILE: &str = "pnpm-workspace.yaml";

/// One member package of a discovered workspace.
#[derive(Debug, Clone)]
pub struct WorkspacePackage {
    /// Package name, from its manifest.
    pub name: String,
    /// Absolute directory containing this package's `package.json`.
    pub dir: PathBuf,
    /// The parsed manifest.
    pub manifest: PackageManifest,
}

impl WorkspacePackage {
    /// `!manifest.private` — whether this package is a publish candidate.
    #[must_use]
    pub fn publishable(&self) -> bool {
        !self.manifest.private
    }
}

/// A discovered workspace: its root, detected tool, and member packages.
#[derive(Debug, Clone)]
pub struct Workspace {
    /// Absolute workspace root directory.
    pub root: PathBuf,
    /// The package manager the workspace uses.
    pub tool: PackageManagerKind,
    /// Every discovered member package, in the order glob expansion found
    /// them (callers needing a deterministic order should sort by name).
    pub packages: Vec<WorkspacePackage>,
}

#[derive(Debug, Deserialize)]
struct PnpmWorkspaceFile {
    #[serde(default)]
    packages: Vec<String>,
}

fn workspace_patterns(root: &Path) -> GraphResult<(PackageManagerKind, Vec<String>)> {
    let pnpm_workspace_path = root.join(PNPM_WORKSPACE_FILE);
    if pnpm_workspace_path.is_file() {
        let source = std::fs::read_to_string(&pnpm_workspace_path)
            .map_err(|e| GraphError::Io { path: pnpm_workspace_path.clone(), message: e.to_string() })?;
        let parsed: PnpmWorkspaceFile = serde_yaml::from_str(&source)
            .map_err(|e| GraphError::ManifestParse { message: e.to_string() })?;
        if parsed.packages.is_empty() {
            return Err(GraphError::NoWorkspacePatterns { path: pnpm_workspace_path });
        }
        return Ok((PackageManagerKind::Pnpm, parsed.packages));
    }

    let manifest_path = root.join("package.json");
    let manifest = PackageManifest::read(&manifest_path)?;
    let patterns = manifest
        .workspaces
        .as_ref()
        .map(|w| w.patterns().to_vec())
        .filter(|patterns| !patterns.is_empty())
        .ok_or_else(|| GraphError::NoWorkspacePatterns { path: manifest_path })?;

    let tool = PackageManager::detect(root).map(|pm| pm.kind()).unwrap_or(PackageManagerKind::Npm);
    Ok((tool, patterns))
}

/// Walks upward from `start` to find the nearest workspace root.
///
/// # Errors
/// Returns [`GraphError::RootNotFound`] if no ancestor declares workspace
/// member patterns.
pub fn find_root(start: &Path) -> GraphResult<PathBuf> {
    let mut current = start
        .canonicalize()
        .map_err(|e| GraphError::Io { path: start.to_path_buf(), message: e.to_string() })?;

    loop {
        if current.join(PNPM_WORKSPACE_FILE).is_file() {
            return Ok(current);
        }
        if let Ok(manifest) = PackageManifest::read(&current.join("package.json")) {
            if manifest.workspaces.is_some() {
                return Ok(current);
            }
        }
        match current.parent() {
            Some(parent) => current = parent.to_path_buf(),
            None => return Err(GraphError::RootNotFound { path: start.to_path_buf() }),
        }
    }
}

fn expand_pattern(root: &Path, pattern: &str) -> GraphResult<Vec<PathBuf>> {
    let glob_pattern = root.join(pattern).join("package.json");
    let glob_pattern = glob_pattern.to_string_lossy().into_owned();

    let entries = glob::glob(&glob_pattern)
        .map_err(|e| GraphError::ManifestParse { message: e.to_string() })?;

    let mut dirs = Vec::new();
    for entry in entries {
        let manifest_path = entry.map_err(|e| GraphError::Io {
            path: root.to_path_buf(),
            message: e.to_string(),
        })?;
        if manifest_path.components().any(|c| c.as_os_str() == "node_modules") {
            continue;
        }
        if let Some(dir) = manifest_path.parent() {
            dirs.push(dir.to_path_buf());
        }
    }
    Ok(dirs)
}

/// Discovers the workspace whose root is at or above `start`.
///
/// # Errors
/// Returns [`GraphError::RootNotFound`] / [`GraphError::NoWorkspacePatterns`]
/// per [`find_root`], or [`GraphError::DuplicatePackageName`] if two member
/// directories declare the same package name.
pub fn discover(start: &Path) -> GraphResult<Workspace> {
    let root = find_root(start)?;
    let (tool, patterns) = workspace_patterns(&root)?;

    let mut packages = Vec::new();
    let mut seen: std::collections::HashMap<String, PathBuf> = std::collections::HashMap::new();

    for pattern in &patterns {
        for dir in expand_pattern(&root, pattern)? {
            let manifest = PackageManifest::read(&dir.join("package.json"))?;
            if let Some(first) = seen.get(&manifest.name) {
                return Err(GraphError::DuplicatePackageName {
                    name: manifest.name,
                    first: first.clone(),
                    second: dir,
                });
            }
            seen.insert(manifest.name.clone(), dir.clone());
            packages.push(WorkspacePackage { name: manifest.name.clone(), dir, manifest });
        }
    }

    Ok(Workspace { root, tool, packages })
}
