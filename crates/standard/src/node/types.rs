//! # Node.js package manager tool kind
//!
//! Distinguishes the four package-manager families pkglab knows how to drive
//! from a workspace root: npm, yarn, pnpm and bun. pkglab only ever drives
//! consumer repos through their package manager; it does not need to
//! classify workspace topology here (that lives in
//! `sublime_graph_tools::workspace`).

/// Package manager family used by a workspace or consumer repo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RepoKind {
    /// npm workspaces.
    Npm,
    /// yarn workspaces (classic or berry).
    Yarn,
    /// pnpm workspaces.
    Pnpm,
    /// bun workspaces.
    Bun,
}

impl RepoKind {
    /// Human-readable name, used in log lines and CLI output.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Npm => "npm",
            Self::Yarn => "yarn",
            Self::Pnpm => "pnpm",
            Self::Bun => "bun",
        }
    }
}
