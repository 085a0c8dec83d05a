//! What the HTTP router needs from the publish queue.
//!
//! The queue itself (coalescing lanes, debounce, drain loop) lives in
//! `sublime_publish_tools`, which depends on this crate for storage and
//! packument types; defining the dependency the other way — this crate
//! taking a trait object instead of the concrete queue type — avoids a
//! cycle between the two crates.

use serde::{Deserialize, Serialize};

/// Body of `POST /-/<internal>/publish`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublishRequest {
    /// Workspace root this request applies to.
    pub workspace_root: String,
    /// Explicit package names to publish.
    #[serde(default)]
    pub targets: Vec<String>,
    /// Dist-tag to publish under, if not the default.
    #[serde(default)]
    pub tag: Option<String>,
    /// Re-publish even if the fingerprint is unchanged.
    #[serde(default)]
    pub force: bool,
    /// Skip the dependent-cascade expansion.
    #[serde(default)]
    pub shallow: bool,
    /// Publish exactly the named targets, no cascade at all.
    #[serde(default)]
    pub single: bool,
    /// Publish every publishable package in the workspace.
    #[serde(default)]
    pub root: bool,
    /// Compute the plan but do not execute it.
    #[serde(default)]
    pub dry_run: bool,
}

/// Whether this request started a new drain or was folded into one already
/// in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnqueueStatus {
    /// A debounce timer was (re-)armed for this request.
    Queued,
    /// A drain was already running when this request arrived.
    Coalesced,
}

/// Response to a successful enqueue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnqueueOutcome {
    /// Opaque identifier for this enqueue call, for client-side log
    /// correlation; not a handle to cancel or await the drain.
    pub job_id: String,
    /// Whether this request started or joined a drain.
    pub status: EnqueueStatus,
}

/// One lane's status within a workspace, for the status endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LaneStatus {
    /// Dist-tag this lane drains under.
    pub tag: String,
    /// Package names currently pending in this lane.
    pub pending: Vec<String>,
    /// Whether this lane was armed with `root=true`.
    pub root: bool,
    /// Whether this lane was armed with `force=true`.
    pub force: bool,
}

/// One workspace's queue status, for the status endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkspaceQueueStatus {
    /// Workspace root this status describes.
    pub workspace_root: String,
    /// Whether a drain is currently executing for this workspace.
    pub publishing: bool,
    /// Every lane with a non-empty pending set.
    pub lanes: Vec<LaneStatus>,
}

/// The subset of publish-queue behavior the HTTP router depends on.
#[async_trait::async_trait]
pub trait PublishQueueHandle: Send + Sync {
    /// Enqueues a publish request, coalescing it into any in-flight lane
    /// for the same `(workspaceRoot, tag)`.
    async fn enqueue(&self, request: PublishRequest) -> EnqueueOutcome;

    /// Snapshots the status of every workspace with non-empty lanes.
    async fn status(&self) -> Vec<WorkspaceQueueStatus>;
}
