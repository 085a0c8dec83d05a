//! Three-phase cascade computation and deterministic topological ordering.
//!
//! Phase 1 (initial scope): every explicit target plus its transitive
//! workspace deps.
//! Phase 2 (expand dependents): every transitive dependent of a *changed*
//! target, pruned to active consumers when a consumer filter is supplied.
//! Phase 3 (close under deps): repeatedly pull in the workspace deps of
//! every non-private package already in scope, until nothing changes.
//!
//! The resulting scope is then ordered with Kahn's algorithm, breaking every
//! tie (both the initial zero-in-degree seed and each node's successor scan)
//! lexically by package name, so `cascade(targets) == cascade(perm(targets))`.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use crate::error::{GraphError, GraphResult};
use crate::graph::DependencyGraph;

/// A dependent that would have cascaded in, but was pruned because it isn't
/// a consumer of the change and wasn't already in scope for another reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedDependent {
    /// The package that was skipped.
    pub name: String,
    /// The changed package whose cascade would have pulled it in.
    pub via: String,
}

/// Inputs to a cascade computation.
#[derive(Debug, Clone)]
pub struct CascadeInput {
    /// Packages explicitly requested for publish.
    pub targets: BTreeSet<String>,
    /// Subset of the eventual scope whose content actually changed (new or
    /// forced fingerprint); drives dependent expansion in phase 2.
    pub changed: BTreeSet<String>,
    /// When present, phase 2 only admits dependents that are either in this
    /// set (active consumers) or already in scope.
    pub consumer_filter: Option<BTreeSet<String>>,
}

/// Result of a cascade computation: the final scope, the direct deps
/// recorded per explicit target, and the dependents that were pruned.
#[derive(Debug, Clone)]
pub struct CascadePlan {
    /// Every package that must be republished together.
    pub scope: BTreeSet<String>,
    /// Direct workspace deps recorded for each explicit target (phase 1).
    pub direct_deps: BTreeMap<String, BTreeSet<String>>,
    /// Dependents pruned by the consumer filter in phase 2.
    pub skipped_dependents: Vec<SkippedDependent>,
    /// Deterministic topological order of `scope`.
    pub order: Vec<String>,
}

/// Computes the cascade scope and its deterministic publish order.
///
/// # Errors
/// Returns [`GraphError::CycleDetected`] if `scope` contains a dependency
/// cycle, naming the shortest involved path.
pub fn cascade(graph: &DependencyGraph, input: CascadeInput) -> GraphResult<CascadePlan> {
    let mut scope: BTreeSet<String> = BTreeSet::new();
    let mut direct_deps: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();

    // Phase 1: initial scope.
    for target in &input.targets {
        scope.insert(target.clone());
        let deps = graph.transitive_deps(target);
        direct_deps.insert(target.clone(), graph.direct_deps(target));
        scope.extend(deps);
    }

    // Phase 2: expand dependents of changed targets.
    let mut skipped_dependents = Vec::new();
    for changed in &input.changed {
        let dependents = graph.transitive_dependents(changed);
        for dependent in dependents {
            if scope.contains(&dependent) {
                continue;
            }
            let admitted = match &input.consumer_filter {
                None => true,
                Some(filter) => filter.contains(&dependent),
            };
            if admitted {
                scope.insert(dependent);
            } else {
                skipped_dependents.push(SkippedDependent { name: dependent, via: changed.clone() });
            }
        }
    }

    // Phase 3: close under deps until fixpoint.
    loop {
        let mut additions = BTreeSet::new();
        for name in &scope {
            if !graph.is_publishable(name) {
                continue;
            }
            for dep in graph.direct_deps(name) {
                if !scope.contains(&dep) {
                    additions.insert(dep);
                }
            }
        }
        if additions.is_empty() {
            break;
        }
        scope.extend(additions);
    }

    let order = topo_sort(graph, &scope)?;

    Ok(CascadePlan { scope, direct_deps, skipped_dependents, order })
}

/// Kahn's algorithm restricted to `scope`, with lexical tie-breaking on both
/// the initial zero-in-degree seed queue and each node's successor scan, so
/// the result is identical regardless of input ordering.
///
/// # Errors
/// Returns [`GraphError::CycleDetected`] if the scope contains a cycle: the
/// resulting order is shorter than `scope`, and the shortest cycle among the
/// remaining nodes is reported.
pub fn topo_sort(graph: &DependencyGraph, scope: &BTreeSet<String>) -> GraphResult<Vec<String>> {
    // Edges restricted to the scope, and in-degree counts within it.
    let mut successors: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
    let mut indegree: BTreeMap<String, usize> = BTreeMap::new();

    for name in scope {
        indegree.entry(name.clone()).or_insert(0);
        successors.entry(name.clone()).or_default();
    }
    // An edge dep -> dependent represents "dependent must be published after
    // dep", i.e. publish order is a topological sort of the dependency graph
    // with edges reversed: dep comes before its dependents.
    for name in scope {
        for dep in graph.direct_deps(name) {
            if scope.contains(&dep) {
                successors.entry(dep.clone()).or_default().insert(name.clone());
                *indegree.entry(name.clone()).or_insert(0) += 1;
            }
        }
    }

    let mut queue: VecDeque<String> =
        indegree.iter().filter(|(_, &deg)| deg == 0).map(|(name, _)| name.clone()).collect::<BTreeSet<_>>().into_iter().collect();
    // BTreeSet already yields lexical order; VecDeque preserves it.

    let mut order = Vec::new();
    let mut remaining_indegree = indegree.clone();

    while let Some(node) = pop_front_sorted(&mut queue) {
        order.push(node.clone());
        let mut newly_free = Vec::new();
        if let Some(succs) = successors.get(&node) {
            for succ in succs {
                let deg = remaining_indegree.get_mut(succ).expect("successor tracked in indegree map");
                *deg -= 1;
                if *deg == 0 {
                    newly_free.push(succ.clone());
                }
            }
        }
        newly_free.sort();
        for name in newly_free {
            queue.push_back(name);
        }
    }

    if order.len() < scope.len() {
        let remaining: BTreeSet<String> =
            scope.iter().filter(|n| !order.contains(n)).cloned().collect();
        let path = shortest_cycle(graph, &remaining);
        return Err(GraphError::CycleDetected { path });
    }

    Ok(order)
}

fn pop_front_sorted(queue: &mut VecDeque<String>) -> Option<String> {
    queue.pop_front()
}

/// Finds the shortest cycle among `remaining` nodes via BFS from each node in
/// lexical order, returning the first (shortest, then lexically smallest)
/// cycle found as a `Vec` of names with the start repeated at the end.
fn shortest_cycle(graph: &DependencyGraph, remaining: &BTreeSet<String>) -> Vec<String> {
    let mut best: Option<Vec<String>> = None;

    for start in remaining {
        let mut queue = VecDeque::new();
        let mut visited: BTreeMap<String, String> = BTreeMap::new();
        queue.push_back(start.clone());
        visited.insert(start.clone(), start.clone());

        while let Some(current) = queue.pop_front() {
            let mut next: Vec<String> = graph
                .direct_deps(&current)
                .into_iter()
                .filter(|n| remaining.contains(n))
                .collect();
            next.sort();
            for neighbor in next {
                if neighbor == *start {
                    let mut path = vec![start.clone()];
                    let mut cursor = current.clone();
                    let mut chain = vec![cursor.clone()];
                    while let Some(parent) = visited.get(&cursor) {
                        if parent == start {
                            break;
                        }
                        cursor = parent.clone();
                        chain.push(cursor.clone());
                    }
                    chain.reverse();
                    path.extend(chain);
                    path.push(start.clone());

                    let better = match &best {
                        None => true,
                        Some(existing) => {
                            path.len() < existing.len() || (path.len() == existing.len() && path < *existing)
                        }
                    };
                    if better {
                        best = Some(path);
                    }
                    continue;
                }
                if !visited.contains_key(&neighbor) {
                    visited.insert(neighbor.clone(), current.clone());
                    queue.push_back(neighbor);
                }
            }
        }
    }

    best.unwrap_or_else(|| remaining.iter().cloned().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discovery::{Workspace, WorkspacePackage};
    use crate::manifest::{Dependencies, PackageManifest};
    use std::path::PathBuf;

    fn pkg(name: &str, deps: &[&str]) -> WorkspacePackage {
        let dependencies =
            Dependencies(deps.iter().map(|d| (d.to_string(), "workspace:*".to_string())).collect());
        WorkspacePackage {
            name: name.to_string(),
            dir: PathBuf::from(format!("/ws/{name}")),
            manifest: PackageManifest {
                name: name.to_string(),
                version: "0.0.0".to_string(),
                private: false,
                dependencies,
                dev_dependencies: Dependencies::default(),
                peer_dependencies: Dependencies::default(),
                optional_dependencies: Dependencies::default(),
                bundled_dependencies: Vec::new(),
                files: None,
                main: None,
                module: None,
                types: None,
                workspaces: None,
                publish_config: None,
                extra: serde_json::Map::new(),
            },
        }
    }

    fn graph(packages: Vec<WorkspacePackage>) -> DependencyGraph {
        let ws = Workspace {
            root: PathBuf::from("/ws"),
            tool: sublime_standard_tools::node::PackageManagerKind::Npm,
            packages,
        };
        DependencyGraph::build(&ws)
    }

    fn targets(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn initial_scope_includes_transitive_deps() {
        let g = graph(vec![pkg("a", &["b"]), pkg("b", &["c"]), pkg("c", &[])]);
        let plan = cascade(
            &g,
            CascadeInput { targets: targets(&["a"]), changed: BTreeSet::new(), consumer_filter: None },
        )
        .expect("cascade");
        assert_eq!(plan.scope, targets(&["a", "b", "c"]));
    }

    #[test]
    fn topo_order_places_deps_before_dependents() {
        let g = graph(vec![pkg("a", &["b"]), pkg("b", &["c"]), pkg("c", &[])]);
        let plan = cascade(
            &g,
            CascadeInput { targets: targets(&["a"]), changed: BTreeSet::new(), consumer_filter: None },
        )
        .expect("cascade");
        let pos = |n: &str| plan.order.iter().position(|x| x == n).expect("present");
        assert!(pos("c") < pos("b"));
        assert!(pos("b") < pos("a"));
    }

    #[test]
    fn cascade_is_permutation_invariant() {
        let g = graph(vec![
            pkg("a", &["b", "d"]),
            pkg("b", &["c"]),
            pkg("c", &[]),
            pkg("d", &["c"]),
        ]);
        let t1 = cascade(
            &g,
            CascadeInput { targets: targets(&["a", "d"]), changed: BTreeSet::new(), consumer_filter: None },
        )
        .expect("cascade 1");
        let t2 = cascade(
            &g,
            CascadeInput { targets: targets(&["d", "a"]), changed: BTreeSet::new(), consumer_filter: None },
        )
        .expect("cascade 2");
        assert_eq!(t1.order, t2.order);
        assert_eq!(t1.scope, t2.scope);
    }

    #[test]
    fn dependents_of_changed_targets_are_pulled_in() {
        let g = graph(vec![pkg("a", &[]), pkg("b", &["a"])]);
        let plan = cascade(
            &g,
            CascadeInput {
                targets: targets(&["a"]),
                changed: targets(&["a"]),
                consumer_filter: None,
            },
        )
        .expect("cascade");
        assert!(plan.scope.contains("b"));
    }

    #[test]
    fn consumer_filter_prunes_non_consumer_dependents() {
        let g = graph(vec![pkg("a", &[]), pkg("b", &["a"]), pkg("c", &["a"])]);
        let plan = cascade(
            &g,
            CascadeInput {
                targets: targets(&["a"]),
                changed: targets(&["a"]),
                consumer_filter: Some(targets(&["b"])),
            },
        )
        .expect("cascade");
        assert!(plan.scope.contains("b"));
        assert!(!plan.scope.contains("c"));
        assert_eq!(plan.skipped_dependents, vec![SkippedDependent { name: "c".to_string(), via: "a".to_string() }]);
    }

    #[test]
    fn cycle_is_detected_with_shortest_path() {
        let g = graph(vec![pkg("a", &["b"]), pkg("b", &["a"])]);
        let err = cascade(
            &g,
            CascadeInput { targets: targets(&["a"]), changed: BTreeSet::new(), consumer_filter: None },
        )
        .unwrap_err();
        match err {
            GraphError::CycleDetected { path } => {
                assert_eq!(path, vec!["a".to_string(), "b".to_string(), "a".to_string()]);
            }
            other => panic!("expected CycleDetected, got {other:?}"),
        }
    }
}
