//! `pub status`: daemon liveness and the publish queue's pending lanes.

use tabled::Tabled;

use crate::context::CliContext;
use crate::error::CliResult;
use crate::output::OutputManager;

#[derive(Tabled)]
struct LaneRow {
    #[tabled(rename = "workspace")]
    workspace_root: String,
    tag: String,
    pending: String,
    draining: String,
}

/// Checks `/-/ready`, then fetches `/-/pkglab/publish/status` and renders
/// every non-empty lane across every workspace as a table.
pub async fn run(ctx: &CliContext, out: &OutputManager) -> CliResult<()> {
    let Some(info) = ctx.read_pid() else {
        out.warn("the pkglab registry isn't running");
        return Ok(());
    };
    if !sublime_standard_tools::process::is_alive(info.pid) {
        out.warn("pid file is stale; the registry process is gone");
        return Ok(());
    }

    let url = ctx.registry_url();
    match ctx.client.get(format!("{url}/-/ready")).send().await {
        Ok(resp) if resp.status().is_success() => {
            out.success(&format!("registry reachable at {url} (pid {})", info.pid));
        }
        _ => {
            out.warn(&format!("registry at {url} is not responding"));
            return Ok(());
        }
    }

    let response = ctx.client.get(format!("{url}/-/pkglab/publish/status")).send().await?;
    let statuses: Vec<sublime_registry::WorkspaceQueueStatus> = response.json().await?;

    let mut rows = Vec::new();
    for status in &statuses {
        for lane in &status.lanes {
            rows.push(LaneRow {
                workspace_root: status.workspace_root.clone(),
                tag: if lane.tag.is_empty() { "latest".to_string() } else { lane.tag.clone() },
                pending: if lane.root { "*".to_string() } else { lane.pending.join(", ") },
                draining: status.publishing.to_string(),
            });
        }
    }
    out.table(rows, "no pending publish lanes");
    Ok(())
}
