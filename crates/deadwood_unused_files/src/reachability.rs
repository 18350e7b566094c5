use deadwood_core::ConfigError;
use log::{debug, trace};
use std::{
    collections::{HashSet, VecDeque},
    path::PathBuf,
};

use crate::graph::DependencyGraph;

/// Breadth-first walk from `entry_points` over `graph`.
///
/// Cycles are fine. An edge target missing from the graph is still marked
/// reachable and treated as a leaf.
pub fn reachable_files(
    graph: &DependencyGraph,
    entry_points: &[PathBuf],
) -> Result<HashSet<PathBuf>, ConfigError> {
    if entry_points.is_empty() {
        return Err(ConfigError::NoEntryPoints);
    }

    let mut visited: HashSet<PathBuf> = HashSet::new();
    let mut queue: VecDeque<&PathBuf> = entry_points.iter().collect();

    while let Some(cur) = queue.pop_front() {
        if !visited.insert(cur.clone()) {
            continue;
        }
        trace!("Visiting module: {}", cur.display());

        let Some(targets) = graph.edges(cur) else {
            trace!("{} is not a graph node, treating as leaf", cur.display());
            continue;
        };
        for next in targets {
            if !visited.contains(next) {
                queue.push_back(next);
            }
        }
    }

    debug!("{} files reachable from {} entry points", visited.len(), entry_points.len());
    Ok(visited)
}

/// `discovered` minus `reachable`, keeping the discovered order.
pub fn unused_files(discovered: &[PathBuf], reachable: &HashSet<PathBuf>) -> Vec<PathBuf> {
    discovered.iter().filter(|f| !reachable.contains(*f)).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn p(name: &str) -> PathBuf {
        PathBuf::from(format!("/root/src/{name}.ts"))
    }

    fn graph(edges: &[(&str, Vec<&str>)]) -> DependencyGraph {
        edges
            .iter()
            .map(|(from, to)| (p(from), to.iter().map(|t| p(t)).collect()))
            .collect()
    }

    fn set(names: &[&str]) -> HashSet<PathBuf> {
        names.iter().map(|n| p(n)).collect()
    }

    #[test]
    fn test_cycle_scenario() {
        let g = graph(&[("a", vec!["b"]), ("b", vec!["a"]), ("c", vec![]), ("d", vec![])]);
        let discovered = vec![p("a"), p("b"), p("c"), p("d")];

        let reachable = reachable_files(&g, &[p("a")]).unwrap();
        assert_eq!(reachable, set(&["a", "b"]));
        assert_eq!(unused_files(&discovered, &reachable), vec![p("c"), p("d")]);
    }

    #[test]
    fn test_self_import_terminates() {
        let g = graph(&[("a", vec!["a", "a"])]);
        assert_eq!(reachable_files(&g, &[p("a")]).unwrap(), set(&["a"]));
    }

    #[test]
    fn test_entry_points_always_reachable() {
        let g = graph(&[("a", vec![]), ("b", vec![]), ("c", vec!["a"])]);
        let reachable = reachable_files(&g, &[p("a"), p("b")]).unwrap();
        assert_eq!(reachable, set(&["a", "b"]));
    }

    #[test]
    fn test_entry_point_outside_graph_is_reachable() {
        let g = graph(&[("a", vec![])]);
        let reachable = reachable_files(&g, &[p("zzz")]).unwrap();
        assert_eq!(reachable, set(&["zzz"]));
    }

    #[test]
    fn test_target_missing_from_graph_is_leaf() {
        let g = graph(&[("a", vec!["ghost", "b"]), ("b", vec![])]);
        let reachable = reachable_files(&g, &[p("a")]).unwrap();
        assert_eq!(reachable, set(&["a", "b", "ghost"]));
    }

    #[test]
    fn test_transitive_diamond() {
        let g = graph(&[
            ("entry", vec!["a", "b"]),
            ("a", vec!["c"]),
            ("b", vec!["c"]),
            ("c", vec!["d"]),
            ("d", vec![]),
            ("orphan", vec!["c"]),
        ]);
        let discovered: Vec<PathBuf> =
            ["entry", "a", "b", "c", "d", "orphan"].iter().map(|n| p(n)).collect();

        let reachable = reachable_files(&g, &[p("entry")]).unwrap();
        let unused = unused_files(&discovered, &reachable);
        assert_eq!(unused, vec![p("orphan")]);

        // reachable and unused partition the discovered set
        for f in &discovered {
            assert!(reachable.contains(f) != unused.contains(f));
        }
    }

    #[test]
    fn test_empty_entry_points_rejected() {
        let g = graph(&[("a", vec![])]);
        assert!(matches!(reachable_files(&g, &[]), Err(ConfigError::NoEntryPoints)));
    }
}
