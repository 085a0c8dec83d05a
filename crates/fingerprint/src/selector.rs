//! Selects the set of files npm would include when publishing a package.
//!
//! Mirrors the rules in the component design: `files[]` globs (with
//! directory entries and negation handled via a full walk), plus the
//! always-included `package.json`/`README*`/`LICEN(S|C)E*`/`CHANGELOG*`,
//! plus entry-point paths from `main`/`module`/`types`/`typings`/`bin`
//! (string or object) and a recursive walk of `exports`. Packages that
//! declare `bundledDependencies` instead defer to the package manager's
//! `pack --dry-run` file list, since bundled deps make static selection
//! unreliable.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use serde_json::Value;
use sublime_graph_tools::manifest::PackageManifest;
use sublime_standard_tools::command::{Command, CommandBuilder, SyncCommandExecutor};
use sublime_standard_tools::node::PackageManager;

use crate::error::{FingerprintError, FingerprintResult};

const ALWAYS_INCLUDED_PREFIXES: &[&str] = &["README", "LICENSE", "LICENCE", "CHANGELOG"];
const EXCLUDED_DIRS: &[&str] = &["node_modules", ".git", "dist/.cache", ".turbo", ".cache"];

fn is_excluded(path: &Path) -> bool {
    path.components().any(|c| {
        let s = c.as_os_str().to_string_lossy();
        EXCLUDED_DIRS.iter().any(|excluded| s == *excluded)
    })
}

fn walk_all_files(dir: &Path) -> FingerprintResult<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in walkdir::WalkDir::new(dir).into_iter().filter_map(Result::ok) {
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        if is_excluded(path) {
            continue;
        }
        files.push(path.to_path_buf());
    }
    Ok(files)
}

fn always_included(dir: &Path) -> Vec<PathBuf> {
    let mut out = Vec::new();
    let Ok(entries) = std::fs::read_dir(dir) else { return out };
    for entry in entries.filter_map(Result::ok) {
        let name = entry.file_name();
        let name = name.to_string_lossy();
        if name == "package.json"
            || ALWAYS_INCLUDED_PREFIXES.iter().any(|prefix| name.starts_with(prefix))
        {
            out.push(entry.path());
        }
    }
    out
}

/// Recursively collects every string leaf of an `exports` map value, the
/// way npm treats nested condition mappings (`{"import": ..., "require":
/// ...}` or nested subpath maps).
fn collect_exports_paths(value: &Value, out: &mut Vec<String>) {
    match value {
        Value::String(s) => out.push(s.clone()),
        Value::Array(items) => {
            for item in items {
                collect_exports_paths(item, out);
            }
        }
        Value::Object(map) => {
            for v in map.values() {
                collect_exports_paths(v, out);
            }
        }
        _ => {}
    }
}

fn entry_point_paths(manifest: &PackageManifest) -> Vec<String> {
    let mut paths = Vec::new();
    if let Some(main) = &manifest.main {
        paths.push(main.clone());
    }
    if let Some(module) = &manifest.module {
        paths.push(module.clone());
    }
    if let Some(types) = &manifest.types {
        paths.push(types.clone());
    }
    if let Some(typings) = manifest.extra.get("typings").and_then(Value::as_str) {
        paths.push(typings.to_string());
    }
    if let Some(bin) = manifest.extra.get("bin") {
        collect_exports_paths(bin, &mut paths);
    }
    if let Some(exports) = manifest.extra.get("exports") {
        collect_exports_paths(exports, &mut paths);
    }
    paths
}

fn expand_glob_patterns(dir: &Path, patterns: &[String]) -> FingerprintResult<Vec<PathBuf>> {
    let mut matches = Vec::new();
    for pattern in patterns {
        let (negated, pattern) =
            if let Some(stripped) = pattern.strip_prefix('!') { (true, stripped) } else { (false, pattern.as_str()) };

        let full_pattern = dir.join(pattern);
        let glob_str = full_pattern.to_string_lossy().into_owned();
        let entries = glob::glob(&glob_str).map_err(|e| FingerprintError::InvalidPattern {
            pattern: pattern.to_string(),
            message: e.to_string(),
        })?;

        for entry in entries {
            let path = entry.map_err(|e| FingerprintError::Io { path: dir.to_path_buf(), message: e.to_string() })?;
            if is_excluded(&path) {
                continue;
            }
            let expanded = if path.is_dir() { walk_all_files(&path)? } else { vec![path] };

            if negated {
                for p in expanded {
                    matches.retain(|m| m != &p);
                }
            } else {
                matches.extend(expanded);
            }
        }
    }
    Ok(matches)
}

/// Runs `<manager> pack --dry-run --json` and parses the reported file list,
/// for packages whose `bundledDependencies` make static `files[]` expansion
/// unreliable.
fn pack_dry_run_files(dir: &Path, name: &str) -> FingerprintResult<Vec<PathBuf>> {
    let manager = PackageManager::detect(dir)
        .map_err(|e| FingerprintError::PackDryRunFailed { package: name.to_string(), message: e.to_string() })?;

    let command: Command = CommandBuilder::new(manager.command())
        .arg("pack")
        .arg("--dry-run")
        .arg("--json")
        .current_dir(dir)
        .build();

    let executor = SyncCommandExecutor::new().map_err(|e| FingerprintError::PackDryRunFailed {
        package: name.to_string(),
        message: e.to_string(),
    })?;
    let output = executor
        .execute_sync(command)
        .map_err(|e| FingerprintError::PackDryRunFailed { package: name.to_string(), message: e.to_string() })?;

    let parsed: Value = serde_json::from_str(output.stdout()).map_err(|e| FingerprintError::PackDryRunFailed {
        package: name.to_string(),
        message: e.to_string(),
    })?;

    let mut files = Vec::new();
    let entries = parsed.as_array().and_then(|arr| arr.first()).and_then(|first| first.get("files")).and_then(Value::as_array);
    if let Some(entries) = entries {
        for entry in entries {
            if let Some(path) = entry.get("path").and_then(Value::as_str) {
                files.push(dir.join(path));
            }
        }
    }
    Ok(files)
}

/// Selects the sorted, deduplicated list of absolute file paths a package
/// would publish.
///
/// # Errors
/// Returns [`FingerprintError`] if a `files[]` pattern is malformed, a walk
/// fails with an I/O error, or (when `bundledDependencies` is present) the
/// package manager's `pack --dry-run` fallback fails.
pub fn select_publish_files(dir: &Path, manifest: &PackageManifest) -> FingerprintResult<Vec<PathBuf>> {
    if !manifest.bundled_dependencies.is_empty() {
        let mut files = pack_dry_run_files(dir, &manifest.name)?;
        files.sort();
        files.dedup();
        return Ok(files);
    }

    let mut set: BTreeSet<PathBuf> = BTreeSet::new();

    if let Some(patterns) = &manifest.files {
        for path in expand_glob_patterns(dir, patterns)? {
            set.insert(path);
        }
    } else {
        // No files[] allowlist: npm publishes everything not excluded.
        for path in walk_all_files(dir)? {
            set.insert(path);
        }
    }

    for path in always_included(dir) {
        set.insert(path);
    }

    for rel in entry_point_paths(manifest) {
        let candidate = dir.join(&rel);
        if candidate.is_file() {
            set.insert(candidate);
        }
    }

    Ok(set.into_iter().collect())
}

/// Reads `.npmignore` then `.gitignore` (first one present) under `dir`, for
/// mixing into the fingerprint hash so rule changes invalidate it even when
/// no selected file's bytes changed.
#[must_use]
pub fn ignore_file_contents(dir: &Path) -> Option<String> {
    for name in [".npmignore", ".gitignore"] {
        let path = dir.join(name);
        if let Ok(contents) = std::fs::read_to_string(&path) {
            return Some(contents);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn manifest(files: Option<Vec<String>>) -> PackageManifest {
        PackageManifest {
            name: "pkg".to_string(),
            version: "1.0.0".to_string(),
            private: false,
            dependencies: sublime_graph_tools::manifest::Dependencies::default(),
            dev_dependencies: sublime_graph_tools::manifest::Dependencies::default(),
            peer_dependencies: sublime_graph_tools::manifest::Dependencies::default(),
            optional_dependencies: sublime_graph_tools::manifest::Dependencies::default(),
            bundled_dependencies: Vec::new(),
            files,
            main: Some("index.js".to_string()),
            module: None,
            types: None,
            workspaces: None,
            publish_config: None,
            extra: serde_json::Map::new(),
        }
    }

    #[test]
    fn always_includes_package_json_and_readme() {
        let tmp = tempfile::tempdir().expect("tempdir");
        fs::write(tmp.path().join("package.json"), "{}").expect("write");
        fs::write(tmp.path().join("README.md"), "hi").expect("write");
        fs::write(tmp.path().join("index.js"), "module.exports = 1;").expect("write");
        fs::create_dir(tmp.path().join("node_modules")).expect("mkdir");
        fs::write(tmp.path().join("node_modules").join("junk.js"), "junk").expect("write");

        let files = select_publish_files(tmp.path(), &manifest(None)).expect("select");
        assert!(files.iter().any(|f| f.ends_with("package.json")));
        assert!(files.iter().any(|f| f.ends_with("README.md")));
        assert!(!files.iter().any(|f| f.to_string_lossy().contains("node_modules")));
    }

    #[test]
    fn files_allowlist_restricts_selection() {
        let tmp = tempfile::tempdir().expect("tempdir");
        fs::write(tmp.path().join("package.json"), "{}").expect("write");
        fs::create_dir(tmp.path().join("lib")).expect("mkdir");
        fs::write(tmp.path().join("lib").join("index.js"), "x").expect("write");
        fs::write(tmp.path().join("secret.js"), "x").expect("write");

        let files =
            select_publish_files(tmp.path(), &manifest(Some(vec!["lib".to_string()]))).expect("select");
        assert!(files.iter().any(|f| f.ends_with("index.js")));
        assert!(!files.iter().any(|f| f.ends_with("secret.js")));
    }
}
