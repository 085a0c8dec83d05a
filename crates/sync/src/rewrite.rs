//! Discovery and in-place rewriting of the places a consumer repo pins a
//! dependency version: plain manifest entries and pnpm catalog entries.
//!
//! Mirrors `sublime_publish_tools::plan`'s catalog discovery (same
//! `pnpm-workspace.yaml` shape) but runs against a consumer repo instead of
//! the publishing workspace, and writes changes back rather than only
//! planning them.

use std::path::{Path, PathBuf};

use serde_json::Value;
use sublime_graph_tools::discovery;
use sublime_graph_tools::manifest::PackageManifest;

use crate::error::{SyncError, SyncResult};
use crate::repo_state::{CatalogFormat, LinkTarget};

const CATALOG_PROTOCOL_PREFIX: &str = "catalog:";

fn read_manifest(path: &Path) -> SyncResult<PackageManifest> {
    PackageManifest::read(path).map_err(|e| SyncError::ManifestError { path: path.to_path_buf(), message: e.to_string() })
}

fn write_manifest(path: &Path, manifest: &PackageManifest) -> SyncResult<()> {
    let json = manifest.to_json_string().map_err(|e| SyncError::ManifestError { path: path.to_path_buf(), message: e.to_string() })?;
    std::fs::write(path, json).map_err(|e| SyncError::Io { path: path.to_path_buf(), message: e.to_string() })
}

/// Every manifest directory in `repo_root` (the root itself plus workspace
/// members, if any), de-duplicated.
fn candidate_manifest_dirs(repo_root: &Path) -> Vec<PathBuf> {
    let mut dirs = vec![repo_root.to_path_buf()];
    if let Ok(workspace) = discovery::discover(repo_root) {
        for package in &workspace.packages {
            if !dirs.contains(&package.dir) {
                dirs.push(package.dir.clone());
            }
        }
    }
    dirs
}

fn dep_range<'a>(manifest: &'a PackageManifest, dep_name: &str) -> Option<&'a str> {
    manifest
        .dependencies
        .0
        .get(dep_name)
        .or_else(|| manifest.dev_dependencies.0.get(dep_name))
        .or_else(|| manifest.peer_dependencies.0.get(dep_name))
        .or_else(|| manifest.optional_dependencies.0.get(dep_name))
        .map(String::as_str)
}

/// Finds every manifest in `repo_root` (root plus workspace members) that
/// pins `dep_name` to a plain version range (i.e. not a `catalog:`
/// reference), recording each one's current range as `original` for later
/// restore.
///
/// # Errors
/// Returns [`SyncError::ManifestError`] if a candidate manifest exists but
/// can't be parsed.
pub fn discover_manifest_targets(repo_root: &Path, dep_name: &str) -> SyncResult<Vec<LinkTarget>> {
    let mut targets = Vec::new();
    for dir in candidate_manifest_dirs(repo_root) {
        let manifest_path = dir.join("package.json");
        if !manifest_path.is_file() {
            continue;
        }
        let manifest = read_manifest(&manifest_path)?;
        if let Some(range) = dep_range(&manifest, dep_name) {
            if !range.starts_with(CATALOG_PROTOCOL_PREFIX) {
                targets.push(LinkTarget { dir, original: range.to_string() });
            }
        }
    }
    Ok(targets)
}

/// Rewrites `dep_name`'s range to `new_version` in every dependency section
/// of the manifest at `target.dir`, leaving every other field untouched.
///
/// # Errors
/// Returns [`SyncError::ManifestError`] if the manifest can't be read or
/// written.
pub fn rewrite_manifest_target(target: &LinkTarget, dep_name: &str, new_version: &str) -> SyncResult<()> {
    let manifest_path = target.dir.join("package.json");
    let mut manifest = read_manifest(&manifest_path)?;
    for section in
        [&mut manifest.dependencies, &mut manifest.dev_dependencies, &mut manifest.peer_dependencies, &mut manifest.optional_dependencies]
    {
        if let Some(range) = section.0.get_mut(dep_name) {
            *range = new_version.to_string();
        }
    }
    write_manifest(&manifest_path, &manifest)
}

/// Restores `dep_name`'s range to `target.original` in every dependency
/// section of the manifest at `target.dir`. A thin wrapper over
/// [`rewrite_manifest_target`] for readability at call sites that are
/// rolling back rather than applying a new version.
///
/// # Errors
/// Returns [`SyncError::ManifestError`] if the manifest can't be read or
/// written.
pub fn restore_manifest_target(target: &LinkTarget, dep_name: &str) -> SyncResult<()> {
    rewrite_manifest_target(target, dep_name, &target.original)
}

/// Where (if anywhere) `dep_name` is declared in a pnpm catalog reachable
/// from `repo_root`: either `package.json`'s `catalog`/`catalogs` fields, or
/// the workspace root's `pnpm-workspace.yaml`.
#[derive(Debug, Clone)]
pub struct CatalogTarget {
    /// Which file format the catalog entry lives in.
    pub format: CatalogFormat,
    /// Catalog name (`"default"` for the unnamed `catalog:` catalog).
    pub catalog_name: String,
    /// The version string currently pinned in the catalog.
    pub original: String,
}

/// Looks for a catalog entry for `dep_name`, checking `package.json` first
/// then `pnpm-workspace.yaml` at the workspace root (if `repo_root` is part
/// of one).
///
/// # Errors
/// Returns [`SyncError::ManifestError`] if a candidate file exists but can't
/// be parsed.
pub fn discover_catalog_target(repo_root: &Path, dep_name: &str) -> SyncResult<Option<CatalogTarget>> {
    let manifest_path = repo_root.join("package.json");
    if manifest_path.is_file() {
        let raw = std::fs::read_to_string(&manifest_path)
            .map_err(|e| SyncError::ManifestError { path: manifest_path.clone(), message: e.to_string() })?;
        let doc: Value = serde_json::from_str(&raw)
            .map_err(|e| SyncError::ManifestError { path: manifest_path.clone(), message: e.to_string() })?;

        if let Some(version) = doc.get("catalog").and_then(Value::as_object).and_then(|c| c.get(dep_name)).and_then(Value::as_str) {
            return Ok(Some(CatalogTarget {
                format: CatalogFormat::PackageJson,
                catalog_name: "default".to_string(),
                original: version.to_string(),
            }));
        }
        if let Some(catalogs) = doc.get("catalogs").and_then(Value::as_object) {
            for (catalog_name, entries) in catalogs {
                if let Some(version) = entries.get(dep_name).and_then(Value::as_str) {
                    return Ok(Some(CatalogTarget {
                        format: CatalogFormat::PackageJson,
                        catalog_name: catalog_name.clone(),
                        original: version.to_string(),
                    }));
                }
            }
        }
    }

    let Ok(root) = discovery::find_root(repo_root) else { return Ok(None) };
    let workspace_file = root.join("pnpm-workspace.yaml");
    if !workspace_file.is_file() {
        return Ok(None);
    }
    let raw = std::fs::read_to_string(&workspace_file)
        .map_err(|e| SyncError::ManifestError { path: workspace_file.clone(), message: e.to_string() })?;
    let doc: serde_yaml::Value = serde_yaml::from_str(&raw)
        .map_err(|e| SyncError::ManifestError { path: workspace_file.clone(), message: e.to_string() })?;

    if let Some(version) = doc.get("catalog").and_then(|c| c.get(dep_name)).and_then(|v| v.as_str()) {
        return Ok(Some(CatalogTarget {
            format: CatalogFormat::PnpmWorkspaceYaml,
            catalog_name: "default".to_string(),
            original: version.to_string(),
        }));
    }
    if let Some(catalogs) = doc.get("catalogs").and_then(|c| c.as_mapping()) {
        for (name, entries) in catalogs {
            let Some(name) = name.as_str() else { continue };
            if let Some(version) = entries.get(dep_name).and_then(|v| v.as_str()) {
                return Ok(Some(CatalogTarget {
                    format: CatalogFormat::PnpmWorkspaceYaml,
                    catalog_name: name.to_string(),
                    original: version.to_string(),
                }));
            }
        }
    }
    Ok(None)
}

/// Rewrites a previously discovered [`CatalogTarget`] to `new_version`, in
/// whichever file it was found in.
///
/// # Errors
/// Returns [`SyncError::ManifestError`] if the target file can't be read or
/// written.
pub fn rewrite_catalog_target(repo_root: &Path, target: &CatalogTarget, dep_name: &str, new_version: &str) -> SyncResult<()> {
    match target.format {
        CatalogFormat::PackageJson => rewrite_package_json_catalog(repo_root, &target.catalog_name, dep_name, new_version),
        CatalogFormat::PnpmWorkspaceYaml => rewrite_pnpm_workspace_catalog(repo_root, &target.catalog_name, dep_name, new_version),
    }
}

/// Restores a previously discovered [`CatalogTarget`] to its `original`
/// version. A thin wrapper over [`rewrite_catalog_target`] for rollback call
/// sites.
///
/// # Errors
/// Returns [`SyncError::ManifestError`] if the target file can't be read or
/// written.
pub fn restore_catalog_target(repo_root: &Path, target: &CatalogTarget, dep_name: &str) -> SyncResult<()> {
    rewrite_catalog_target(repo_root, target, dep_name, &target.original)
}

fn rewrite_package_json_catalog(repo_root: &Path, catalog_name: &str, dep_name: &str, new_version: &str) -> SyncResult<()> {
    let path = repo_root.join("package.json");
    let raw = std::fs::read_to_string(&path).map_err(|e| SyncError::ManifestError { path: path.clone(), message: e.to_string() })?;
    let mut doc: Value =
        serde_json::from_str(&raw).map_err(|e| SyncError::ManifestError { path: path.clone(), message: e.to_string() })?;

    let key = if catalog_name == "default" { "catalog" } else { "catalogs" };
    if key == "catalog" {
        if let Some(catalog) = doc.get_mut("catalog").and_then(Value::as_object_mut) {
            catalog.insert(dep_name.to_string(), Value::String(new_version.to_string()));
        }
    } else if let Some(catalogs) = doc.get_mut("catalogs").and_then(Value::as_object_mut) {
        if let Some(catalog) = catalogs.get_mut(catalog_name).and_then(Value::as_object_mut) {
            catalog.insert(dep_name.to_string(), Value::String(new_version.to_string()));
        }
    }

    let pretty =
        serde_json::to_string_pretty(&doc).map_err(|e| SyncError::ManifestError { path: path.clone(), message: e.to_string() })?;
    std::fs::write(&path, pretty).map_err(|e| SyncError::Io { path, message: e.to_string() })
}

fn rewrite_pnpm_workspace_catalog(repo_root: &Path, catalog_name: &str, dep_name: &str, new_version: &str) -> SyncResult<()> {
    let Ok(root) = discovery::find_root(repo_root) else {
        return Err(SyncError::ManifestError { path: repo_root.to_path_buf(), message: "workspace root not found".to_string() });
    };
    let path = root.join("pnpm-workspace.yaml");
    let raw = std::fs::read_to_string(&path).map_err(|e| SyncError::ManifestError { path: path.clone(), message: e.to_string() })?;
    let mut doc: serde_yaml::Value =
        serde_yaml::from_str(&raw).map_err(|e| SyncError::ManifestError { path: path.clone(), message: e.to_string() })?;

    let section = if catalog_name == "default" { "catalog" } else { "catalogs" };
    if section == "catalog" {
        if let Some(mapping) = doc.get_mut("catalog").and_then(|v| v.as_mapping_mut()) {
            mapping.insert(serde_yaml::Value::String(dep_name.to_string()), serde_yaml::Value::String(new_version.to_string()));
        }
    } else if let Some(catalogs) = doc.get_mut("catalogs").and_then(|v| v.as_mapping_mut()) {
        if let Some(mapping) = catalogs.get_mut(catalog_name).and_then(|v| v.as_mapping_mut()) {
            mapping.insert(serde_yaml::Value::String(dep_name.to_string()), serde_yaml::Value::String(new_version.to_string()));
        }
    }

    let rendered =
        serde_yaml::to_string(&doc).map_err(|e| SyncError::ManifestError { path: path.clone(), message: e.to_string() })?;
    std::fs::write(&path, rendered).map_err(|e| SyncError::Io { path, message: e.to_string() })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_manifest_file(dir: &Path, name: &str, deps: &[(&str, &str)]) {
        let deps_json: serde_json::Map<String, Value> =
            deps.iter().map(|(k, v)| ((*k).to_string(), Value::String((*v).to_string()))).collect();
        let manifest = serde_json::json!({
            "name": name,
            "version": "1.0.0",
            "dependencies": deps_json,
        });
        std::fs::write(dir.join("package.json"), serde_json::to_string_pretty(&manifest).expect("serialize")).expect("write");
    }

    #[test]
    fn discover_manifest_targets_finds_pinned_dep() {
        let tmp = tempfile::tempdir().expect("tempdir");
        write_manifest_file(tmp.path(), "consumer", &[("left-pad", "^1.0.0")]);

        let targets = discover_manifest_targets(tmp.path(), "left-pad").expect("discover");
        assert_eq!(targets.len(), 1);
        assert_eq!(targets[0].original, "^1.0.0");
    }

    #[test]
    fn discover_manifest_targets_skips_catalog_refs() {
        let tmp = tempfile::tempdir().expect("tempdir");
        write_manifest_file(tmp.path(), "consumer", &[("left-pad", "catalog:")]);

        let targets = discover_manifest_targets(tmp.path(), "left-pad").expect("discover");
        assert!(targets.is_empty());
    }

    #[test]
    fn rewrite_manifest_target_updates_version() {
        let tmp = tempfile::tempdir().expect("tempdir");
        write_manifest_file(tmp.path(), "consumer", &[("left-pad", "^1.0.0")]);

        let target = LinkTarget { dir: tmp.path().to_path_buf(), original: "^1.0.0".to_string() };
        rewrite_manifest_target(&target, "left-pad", "0.0.0-pkglab.1").expect("rewrite");

        let manifest = read_manifest(&tmp.path().join("package.json")).expect("read");
        assert_eq!(manifest.dependencies.0.get("left-pad"), Some(&"0.0.0-pkglab.1".to_string()));
    }
}
