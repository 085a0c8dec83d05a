//! Staging, packing and integrity computation for one publish entry's
//! tarball.
//!
//! Staging copies exactly the files [`sublime_fingerprint_tools`] would
//! select for this package (the same npm-like file-selection rules the
//! fingerprinter uses, so what gets hashed and what gets shipped never
//! diverge) into a scratch directory, rewrites `package.json` there, then
//! packs the result with `tar`+`gzip`.

use std::io::Write as _;
use std::path::{Path, PathBuf};

use base64::Engine as _;
use flate2::write::GzEncoder;
use flate2::Compression;
use sha2::{Digest, Sha512};
use sublime_fingerprint_tools::select_publish_files;
use sublime_graph_tools::manifest::PackageManifest;

use crate::error::{PublishError, PublishResult};
use crate::plan::{apply_rewrites, PublishEntry};

/// A staged, packed tarball ready for upload.
pub struct PackedTarball {
    /// Gzip-compressed tar bytes.
    pub bytes: Vec<u8>,
    /// Subresource Integrity string in npm's `sha512-<base64>` form.
    pub integrity: String,
    /// The manifest as rewritten and packed, for building the publish
    /// request body without re-reading it from the staged directory.
    pub manifest: PackageManifest,
}

fn copy_into_staging(src_root: &Path, files: &[PathBuf], staging_root: &Path) -> PublishResult<()> {
    for file in files {
        let relative = file.strip_prefix(src_root).unwrap_or(file);
        let dest = staging_root.join(relative);
        if let Some(parent) = dest.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| PublishError::Io { path: parent.to_path_buf(), message: e.to_string() })?;
        }
        std::fs::copy(file, &dest).map_err(|e| PublishError::Io { path: file.clone(), message: e.to_string() })?;
    }
    Ok(())
}

fn pack_tar_gz(staging_root: &Path, files: &[PathBuf]) -> PublishResult<Vec<u8>> {
    let encoder = GzEncoder::new(Vec::new(), Compression::default());
    let mut builder = tar::Builder::new(encoder);

    let mut relative: Vec<PathBuf> =
        files.iter().map(|f| f.strip_prefix(staging_root).unwrap_or(f).to_path_buf()).collect();
    relative.sort();

    for rel in &relative {
        // npm tarballs nest every entry under a `package/` prefix.
        let archive_path = Path::new("package").join(rel);
        let staged_path = staging_root.join(rel);
        let mut file = std::fs::File::open(&staged_path)
            .map_err(|e| PublishError::Io { path: staged_path.clone(), message: e.to_string() })?;
        builder
            .append_file(&archive_path, &mut file)
            .map_err(|e| PublishError::Pack { package: "unknown".to_string(), message: e.to_string() })?;
    }

    let encoder = builder.into_inner().map_err(|e| PublishError::Pack {
        package: "unknown".to_string(),
        message: e.to_string(),
    })?;
    encoder.finish().map_err(|e| PublishError::Pack { package: "unknown".to_string(), message: e.to_string() })
}

fn compute_integrity(bytes: &[u8]) -> String {
    let digest = Sha512::digest(bytes);
    let encoded = base64::engine::general_purpose::STANDARD.encode(digest);
    format!("sha512-{encoded}")
}

/// Stages, rewrites and packs the tarball for one [`PublishEntry`].
///
/// # Errors
/// Returns [`PublishError::Io`] if staging or reading the manifest fails, or
/// [`PublishError::Pack`] if the tar/gzip encoder fails.
pub fn build_tarball(entry: &PublishEntry) -> PublishResult<PackedTarball> {
    let manifest_path = entry.dir.join("package.json");
    let original_manifest = PackageManifest::read(&manifest_path)
        .map_err(|e| PublishError::Io { path: manifest_path.clone(), message: e.to_string() })?;

    let files = select_publish_files(&entry.dir, &original_manifest).map_err(|e| PublishError::Fingerprint {
        package: entry.name.clone(),
        message: e.to_string(),
    })?;

    let staging = tempfile::tempdir().map_err(|e| PublishError::Io { path: entry.dir.clone(), message: e.to_string() })?;
    copy_into_staging(&entry.dir, &files, staging.path())?;

    let mut manifest = original_manifest;
    apply_rewrites(&mut manifest, entry);
    let rewritten_json = manifest
        .to_json_string()
        .map_err(|e| PublishError::Pack { package: entry.name.clone(), message: e.to_string() })?;
    let staged_manifest_path = staging.path().join("package.json");
    std::fs::write(&staged_manifest_path, rewritten_json)
        .map_err(|e| PublishError::Io { path: staged_manifest_path, message: e.to_string() })?;

    let staged_files: Vec<PathBuf> = files
        .iter()
        .map(|f| {
            let relative = f.strip_prefix(&entry.dir).unwrap_or(f);
            staging.path().join(relative)
        })
        .collect();

    let bytes = pack_tar_gz(staging.path(), &staged_files)
        .map_err(|e| if let PublishError::Pack { message, .. } = e {
            PublishError::Pack { package: entry.name.clone(), message }
        } else {
            e
        })?;
    let integrity = compute_integrity(&bytes);

    Ok(PackedTarball { bytes, integrity, manifest })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn sample_entry(dir: &Path) -> PublishEntry {
        fs::write(
            dir.join("package.json"),
            r#"{"name":"left-pad","version":"1.0.0","main":"index.js"}"#,
        )
        .expect("write manifest");
        fs::write(dir.join("index.js"), "module.exports = 1;").expect("write index");

        PublishEntry {
            name: "left-pad".to_string(),
            dir: dir.to_path_buf(),
            version: "0.0.0-pkglab.1".to_string(),
            rewritten_deps: std::collections::BTreeMap::new(),
        }
    }

    #[test]
    fn packs_a_tarball_with_rewritten_version() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let entry = sample_entry(tmp.path());

        let packed = build_tarball(&entry).expect("build_tarball");
        assert!(!packed.bytes.is_empty());
        assert!(packed.integrity.starts_with("sha512-"));
        assert_eq!(packed.manifest.version, "0.0.0-pkglab.1");
    }

    #[test]
    fn excludes_node_modules_from_the_archive() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let entry = sample_entry(tmp.path());
        fs::create_dir(tmp.path().join("node_modules")).expect("mkdir");
        fs::write(tmp.path().join("node_modules").join("junk.js"), "junk").expect("write junk");

        let packed = build_tarball(&entry).expect("build_tarball");
        let decompressed = flate2::read::GzDecoder::new(packed.bytes.as_slice());
        let mut archive = tar::Archive::new(decompressed);
        let names: Vec<String> = archive
            .entries()
            .expect("entries")
            .filter_map(Result::ok)
            .map(|e| e.path().expect("path").to_string_lossy().into_owned())
            .collect();
        assert!(!names.iter().any(|n| n.contains("node_modules")));
    }
}
