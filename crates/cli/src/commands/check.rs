//! `pub check`: verifies the current workspace is discoverable and cycle-free.

use std::collections::BTreeSet;

use sublime_graph_tools::DependencyGraph;

use crate::error::{CliError, CliResult};
use crate::output::OutputManager;

/// Discovers the workspace at the current directory, builds its dependency
/// graph, and runs a full topological sort over every package to surface a
/// cycle, if any.
///
/// # Errors
/// Returns [`CliError::NoWorkspace`] if no workspace is found, or
/// [`CliError::Graph`] (wrapping `GraphError::CycleDetected`) if the
/// workspace graph contains one.
pub fn run(out: &OutputManager) -> CliResult<()> {
    let cwd = std::env::current_dir().map_err(|e| CliError::Io(e.to_string()))?;
    let workspace = sublime_graph_tools::discover(&cwd).map_err(|e| CliError::from_discovery(e, &cwd))?;
    let graph = DependencyGraph::build(&workspace);

    let all_names: BTreeSet<String> = graph.names().map(str::to_string).collect();
    sublime_graph_tools::topo_sort(&graph, &all_names)?;

    out.success(&format!("workspace at {} is discoverable and cycle-free ({} packages)", workspace.root.display(), all_names.len()));
    Ok(())
}
