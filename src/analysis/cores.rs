//! k-core decomposition
//!
//! Degree is in+out degree and a node's neighbours are its predecessors
//! followed by its successors, so a mutual link counts twice.

use crate::analysis::{Adjacency, AnalysisError};

/// Core number of every node, aligned with [`Adjacency::titles`]
///
/// A node's core number is the largest `k` such that it belongs to a
/// subgraph where every node has degree at least `k`. Graphs with self-loops
/// are rejected.
pub fn core_numbers(adj: &Adjacency<'_>) -> Result<Vec<usize>, AnalysisError> {
    let n = adj.len();
    if let Some(v) = (0..n).find(|&v| adj.successors[v].contains(&v)) {
        return Err(AnalysisError::SelfLoop(adj.titles[v].to_string()));
    }

    let mut core: Vec<usize> = (0..n).map(|v| adj.degree(v)).collect();
    let mut neighbours: Vec<Vec<usize>> = (0..n)
        .map(|v| {
            adj.predecessors[v]
                .iter()
                .chain(&adj.successors[v])
                .copied()
                .collect()
        })
        .collect();

    // Nodes bucketed by current degree; bin_start[d] is where degree d begins
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by_key(|&v| core[v]);

    let mut bin_start = vec![0];
    let mut current = 0;
    for (i, &v) in order.iter().enumerate() {
        if core[v] > current {
            bin_start.extend(std::iter::repeat(i).take(core[v] - current));
            current = core[v];
        }
    }

    let mut position = vec![0; n];
    for (pos, &v) in order.iter().enumerate() {
        position[v] = pos;
    }

    for i in 0..n {
        let v = order[i];
        for u in neighbours[v].clone() {
            if core[u] > core[v] {
                if let Some(p) = neighbours[u].iter().position(|&w| w == v) {
                    neighbours[u].remove(p);
                }
                let pos = position[u];
                let start = bin_start[core[u]];
                position[u] = start;
                position[order[start]] = pos;
                order.swap(start, pos);
                bin_start[core[u]] += 1;
                core[u] -= 1;
            }
        }
    }

    Ok(core)
}

/// Indices of nodes whose core number is at least `k`
pub fn k_core(core: &[usize], k: usize) -> Vec<usize> {
    (0..core.len()).filter(|&v| core[v] >= k).collect()
}

/// Indices of nodes whose core number is exactly `k`
pub fn k_shell(core: &[usize], k: usize) -> Vec<usize> {
    (0..core.len()).filter(|&v| core[v] == k).collect()
}
