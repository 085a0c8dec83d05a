//! Typed subset of `package.json` plus a flattened catch-all for every field
//! this crate doesn't need to reason about.
//!
//! Keeping an explicit `extra` map (rather than only the fields pkglab reads)
//! is what lets the sync engine rewrite one dependency version and write the
//! manifest back with every other field byte-identical.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{GraphError, GraphResult};

/// A package's dependency section: name to version-range string.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Dependencies(pub HashMap<String, String>);

impl Dependencies {
    /// Whether this section has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// The `workspaces` field: either a bare pattern list or yarn's detailed form.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum WorkspaceConfig {
    /// `"workspaces": ["packages/*"]`
    Packages(Vec<String>),
    /// `"workspaces": {"packages": [...], "nohoist": [...]}`
    Detailed {
        /// Workspace member glob patterns.
        packages: Vec<String>,
        /// Yarn-classic hoisting exclusions; not otherwise interpreted.
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        nohoist: Vec<String>,
    },
}

impl WorkspaceConfig {
    /// The glob patterns regardless of which form was used.
    #[must_use]
    pub fn patterns(&self) -> &[String] {
        match self {
            Self::Packages(patterns) | Self::Detailed { packages: patterns, .. } => patterns,
        }
    }
}

/// `publishConfig`: registry override and access level for publish.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PublishConfig {
    /// Registry URL override, if the package publishes somewhere non-default.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registry: Option<String>,
    /// `public` or `restricted`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access: Option<String>,
}

/// A typed, round-trip-safe view of one `package.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackageManifest {
    /// Package name.
    pub name: String,
    /// Package version, kept as the raw string (not all manifests in a
    /// workspace mid-cascade are valid semver, e.g. `"workspace:*"` is never
    /// legal here but a snapshot in flight might be).
    pub version: String,
    /// `true` when the package must never be published.
    #[serde(default)]
    pub private: bool,
    /// Runtime dependencies.
    #[serde(default, skip_serializing_if = "Dependencies::is_empty")]
    pub dependencies: Dependencies,
    /// `devDependencies`.
    #[serde(rename = "devDependencies", default, skip_serializing_if = "Dependencies::is_empty")]
    pub dev_dependencies: Dependencies,
    /// `peerDependencies`.
    #[serde(rename = "peerDependencies", default, skip_serializing_if = "Dependencies::is_empty")]
    pub peer_dependencies: Dependencies,
    /// `optionalDependencies`.
    #[serde(
        rename = "optionalDependencies",
        default,
        skip_serializing_if = "Dependencies::is_empty"
    )]
    pub optional_dependencies: Dependencies,
    /// `bundledDependencies` / `bundleDependencies`, used as a fallback
    /// file-selection source when present.
    #[serde(
        rename = "bundledDependencies",
        alias = "bundleDependencies",
        default,
        skip_serializing_if = "Vec::is_empty"
    )]
    pub bundled_dependencies: Vec<String>,
    /// `files` allowlist for packing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub files: Option<Vec<String>>,
    /// CommonJS entry point.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main: Option<String>,
    /// ESM entry point.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module: Option<String>,
    /// TypeScript type declarations entry point.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub types: Option<String>,
    /// Workspace member patterns (npm/yarn/bun convention).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workspaces: Option<WorkspaceConfig>,
    /// Publish registry/access override.
    #[serde(rename = "publishConfig", default, skip_serializing_if = "Option::is_none")]
    pub publish_config: Option<PublishConfig>,
    /// Every other field, preserved verbatim across a read-modify-write cycle.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PackageManifest {
    /// Parses a manifest from its `package.json` source text.
    ///
    /// # Errors
    /// Returns [`GraphError::ManifestParse`] if `source` isn't valid JSON or
    /// is missing the required `name`/`version` fields.
    pub fn parse(source: &str) -> GraphResult<Self> {
        serde_json::from_str(source)
            .map_err(|source_err| GraphError::ManifestParse { message: source_err.to_string() })
    }

    /// Reads and parses the `package.json` at `path`.
    ///
    /// # Errors
    /// Returns [`GraphError::Io`] if the file can't be read, or
    /// [`GraphError::ManifestParse`] if its contents aren't a valid manifest.
    pub fn read(path: &Path) -> GraphResult<Self> {
        let source = std::fs::read_to_string(path)
            .map_err(|e| GraphError::Io { path: path.to_path_buf(), message: e.to_string() })?;
        Self::parse(&source)
    }

    /// Serializes back to pretty-printed JSON, preserving field order as
    /// much as `serde_json`'s map representation allows.
    ///
    /// # Errors
    /// Returns [`GraphError::ManifestParse`] if serialization fails, which
    /// would indicate a bug since this type only round-trips data it parsed.
    pub fn to_json_string(&self) -> GraphResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|source_err| GraphError::ManifestParse { message: source_err.to_string() })
    }

    /// The union of `dependencies`, `peerDependencies` and
    /// `optionalDependencies` — the edges the dependency graph draws, per
    /// the component design (`devDependencies` is deliberately excluded: a
    /// dev-only reference never participates in the published dependency
    /// graph).
    #[must_use]
    pub fn graph_dependencies(&self) -> impl Iterator<Item = (&str, &str)> {
        self.dependencies
            .0
            .iter()
            .chain(self.peer_dependencies.0.iter())
            .chain(self.optional_dependencies.0.iter())
            .map(|(name, range)| (name.as_str(), range.as_str()))
    }
}
