//! The coalescing publish queue: per-`(workspaceRoot, tag)` lanes, a 150 ms
//! debounce timer per workspace, and a drain loop that shells out to the
//! `pub` CLI with reconstructed arguments rather than re-running the
//! pipeline in-process (see [`crate::plan`]/[`crate::tarball`]/
//! [`crate::publisher`] for that pipeline itself, which `pub` drives).
//!
//! `publishing` is reset from a guard's `Drop` impl so a panicking or
//! early-returning drain can never wedge a workspace's queue permanently.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use log::{info, warn};
use sublime_registry::{EnqueueOutcome, EnqueueStatus, LaneStatus, PublishQueueHandle, PublishRequest, WorkspaceQueueStatus};
use sublime_standard_tools::command::{CommandBuilder, DefaultCommandExecutor, Executor};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

const DEBOUNCE: Duration = Duration::from_millis(150);
const PUB_BINARY: &str = "pub";

#[derive(Debug, Clone, Default)]
struct Lane {
    tag: Option<String>,
    pending: std::collections::BTreeSet<String>,
    root: bool,
    force: bool,
    single: bool,
    shallow: bool,
    dry_run: bool,
}

impl Lane {
    fn is_empty(&self) -> bool {
        self.pending.is_empty() && !self.root
    }

    fn fold(&mut self, request: &PublishRequest) {
        self.tag = request.tag.clone();
        self.pending.extend(request.targets.iter().cloned());
        self.root |= request.root;
        self.force |= request.force;
        self.single |= request.single;
        self.shallow |= request.shallow;
        self.dry_run |= request.dry_run;
    }

    fn take(&mut self) -> Lane {
        std::mem::take(self)
    }
}

#[derive(Debug, Default)]
struct WorkspaceState {
    /// Tag key (empty string for "no tag") to lane, in first-enqueued order.
    lane_order: Vec<String>,
    lanes: BTreeMap<String, Lane>,
    publishing: bool,
    debounce: Option<JoinHandle<()>>,
}

fn tag_key(tag: &Option<String>) -> String {
    tag.clone().unwrap_or_default()
}

type WorkspaceMap = Arc<Mutex<BTreeMap<String, WorkspaceState>>>;

/// Coalescing publish queue implementing [`PublishQueueHandle`].
pub struct PublishQueue {
    workspaces: WorkspaceMap,
}

impl PublishQueue {
    /// Builds an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self { workspaces: Arc::new(Mutex::new(BTreeMap::new())) }
    }
}

/// (Re-)arms the debounce timer for `workspace_root`: cancels any timer
/// already running and schedules a fresh one, unless a drain is already in
/// progress (in which case the in-flight drain will itself re-check for
/// newly-arrived lanes once it empties).
async fn arm_debounce(workspaces: WorkspaceMap, workspace_root: String) {
    let mut guard = workspaces.lock().await;
    let state = guard.entry(workspace_root.clone()).or_default();
    if let Some(handle) = state.debounce.take() {
        handle.abort();
    }
    if state.publishing {
        return;
    }
    let map = Arc::clone(&workspaces);
    let root = workspace_root.clone();
    state.debounce = Some(tokio::spawn(async move {
        tokio::time::sleep(DEBOUNCE).await;
        drain(map, root).await;
    }));
}

/// Drains every non-empty lane for `workspace_root`, one `pub` invocation at
/// a time, until none remain.
async fn drain(workspaces: WorkspaceMap, workspace_root: String) {
    {
        let mut guard = workspaces.lock().await;
        let Some(state) = guard.get_mut(&workspace_root) else { return };
        if state.publishing {
            return;
        }
        state.publishing = true;
    }

    let _guard = DrainGuard { workspaces: Arc::clone(&workspaces), workspace_root: workspace_root.clone() };

    loop {
        let snapshot = {
            let mut guard = workspaces.lock().await;
            let Some(state) = guard.get_mut(&workspace_root) else { break };
            let next_key = state
                .lane_order
                .iter()
                .find(|key| state.lanes.get(*key).is_some_and(|lane| !lane.is_empty()))
                .cloned();
            let Some(key) = next_key else { break };
            let lane = state.lanes.get_mut(&key).map(Lane::take).unwrap_or_default();
            state.lanes.remove(&key);
            state.lane_order.retain(|k| k != &key);
            lane
        };
        if snapshot.is_empty() {
            break;
        }
        run_pub(&workspace_root, &snapshot).await;
    }
}

impl Default for PublishQueue {
    fn default() -> Self {
        Self::new()
    }
}

/// Resets `publishing` on drop so an early return or panic inside the drain
/// loop can never leave a workspace permanently marked as draining.
struct DrainGuard {
    workspaces: WorkspaceMap,
    workspace_root: String,
}

impl Drop for DrainGuard {
    fn drop(&mut self) {
        let workspaces = Arc::clone(&self.workspaces);
        let workspace_root = self.workspace_root.clone();
        tokio::spawn(async move {
            let mut guard = workspaces.lock().await;
            if let Some(state) = guard.get_mut(&workspace_root) {
                state.publishing = false;
            }
        });
    }
}

fn build_args(lane: &Lane) -> Vec<String> {
    let mut args = Vec::new();
    if lane.root {
        args.push("--root".to_string());
    } else {
        args.extend(lane.pending.iter().cloned());
    }
    if let Some(tag) = &lane.tag {
        if !tag.is_empty() {
            args.push("--tag".to_string());
            args.push(tag.clone());
        }
    }
    if lane.force {
        args.push("--force".to_string());
    }
    if lane.single {
        args.push("--single".to_string());
    }
    if lane.shallow {
        args.push("--shallow".to_string());
    }
    if lane.dry_run {
        args.push("--dry-run".to_string());
    }
    args
}

async fn run_pub(workspace_root: &str, lane: &Lane) {
    let args = build_args(lane);
    let mut builder = CommandBuilder::new(PUB_BINARY).current_dir(workspace_root);
    for arg in &args {
        builder = builder.arg(arg.clone());
    }
    let command = builder.build();
    let executor = DefaultCommandExecutor::new();

    info!("draining publish lane for {workspace_root}: pub {}", args.join(" "));
    match executor.execute(command).await {
        Ok(output) => info!("pub exited 0 for {workspace_root} in {:?}", output.duration()),
        Err(e) => warn!("pub failed for {workspace_root}: {e}"),
    }
}

#[async_trait::async_trait]
impl PublishQueueHandle for PublishQueue {
    async fn enqueue(&self, request: PublishRequest) -> EnqueueOutcome {
        let job_id = uuid::Uuid::new_v4().to_string();
        let workspace_root = request.workspace_root.clone();

        let status = {
            let mut guard = self.workspaces.lock().await;
            let state = guard.entry(workspace_root.clone()).or_default();
            let key = tag_key(&request.tag);
            if !state.lanes.contains_key(&key) {
                state.lane_order.push(key.clone());
            }
            state.lanes.entry(key).or_default().fold(&request);
            if state.publishing { EnqueueStatus::Coalesced } else { EnqueueStatus::Queued }
        };

        arm_debounce(Arc::clone(&self.workspaces), workspace_root).await;

        EnqueueOutcome { job_id, status }
    }

    async fn status(&self) -> Vec<WorkspaceQueueStatus> {
        let guard = self.workspaces.lock().await;
        guard
            .iter()
            .filter(|(_, state)| state.lanes.values().any(|lane| !lane.is_empty()))
            .map(|(root, state)| WorkspaceQueueStatus {
                workspace_root: root.clone(),
                publishing: state.publishing,
                lanes: state
                    .lanes
                    .values()
                    .filter(|lane| !lane.is_empty())
                    .map(|lane| LaneStatus {
                        tag: lane.tag.clone().unwrap_or_default(),
                        pending: lane.pending.iter().cloned().collect(),
                        root: lane.root,
                        force: lane.force,
                    })
                    .collect(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(root: &str, targets: &[&str]) -> PublishRequest {
        PublishRequest {
            workspace_root: root.to_string(),
            targets: targets.iter().map(|s| s.to_string()).collect(),
            tag: None,
            force: false,
            shallow: false,
            single: false,
            root: false,
            dry_run: false,
        }
    }

    #[test]
    fn build_args_lists_targets_without_root() {
        let mut lane = Lane::default();
        lane.pending.insert("a".to_string());
        lane.pending.insert("b".to_string());
        let args = build_args(&lane);
        assert_eq!(args, vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn build_args_prefers_root_flag() {
        let mut lane = Lane::default();
        lane.pending.insert("a".to_string());
        lane.root = true;
        let args = build_args(&lane);
        assert_eq!(args, vec!["--root".to_string()]);
    }

    #[tokio::test]
    async fn enqueue_unions_targets_into_one_lane() {
        let queue = PublishQueue::new();
        queue.enqueue(request("/ws", &["a"])).await;
        queue.enqueue(request("/ws", &["b"])).await;

        let guard = queue.workspaces.lock().await;
        let state = guard.get("/ws").expect("workspace present");
        let lane = state.lanes.get("").expect("lane present");
        assert!(lane.pending.contains("a"));
        assert!(lane.pending.contains("b"));
    }
}
