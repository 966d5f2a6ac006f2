//! Node centrality measures over a directed link graph
//!
//! All functions return one value per node, aligned with
//! [`Adjacency::titles`].

use crate::analysis::{Adjacency, AnalysisError};
use std::collections::VecDeque;

/// Iteration cap for eigenvector centrality
pub const EIGENVECTOR_MAX_ITER: usize = 100;

/// Convergence tolerance for eigenvector centrality, per node
pub const EIGENVECTOR_TOLERANCE: f64 = 1e-6;

/// Fraction of the other nodes each node is linked with, in either direction
pub fn degree_centrality(adj: &Adjacency<'_>) -> Vec<f64> {
    let n = adj.len();
    if n <= 1 {
        return vec![1.0; n];
    }
    let scale = 1.0 / (n - 1) as f64;
    (0..n).map(|v| adj.degree(v) as f64 * scale).collect()
}

/// Closeness centrality over inward distances
///
/// Only nodes that can reach `u` contribute to its score, and the result is
/// scaled by the fraction of the graph that reaches it, so nodes in small
/// components are not overrated.
pub fn closeness_centrality(adj: &Adjacency<'_>) -> Vec<f64> {
    let n = adj.len();
    let mut scores = vec![0.0; n];
    if n <= 1 {
        return scores;
    }

    for (u, score) in scores.iter_mut().enumerate() {
        let distances = bfs_distances(&adj.predecessors, u);
        let reached = distances.iter().filter(|d| d.is_some()).count();
        let total: usize = distances.iter().flatten().sum();
        if total > 0 {
            let others = (reached - 1) as f64;
            *score = (others / total as f64) * (others / (n - 1) as f64);
        }
    }
    scores
}

/// Shortest-path betweenness (Brandes), normalized by `(n-1)(n-2)`
pub fn betweenness_centrality(adj: &Adjacency<'_>) -> Vec<f64> {
    let n = adj.len();
    let mut betweenness = vec![0.0; n];

    for source in 0..n {
        let mut stack = Vec::with_capacity(n);
        let mut parents: Vec<Vec<usize>> = vec![Vec::new(); n];
        let mut paths = vec![0.0_f64; n];
        let mut distance: Vec<Option<usize>> = vec![None; n];
        paths[source] = 1.0;
        distance[source] = Some(0);

        let mut queue = VecDeque::from([source]);
        while let Some(v) = queue.pop_front() {
            stack.push(v);
            let next = distance[v].map_or(0, |d| d + 1);
            for &w in &adj.successors[v] {
                if distance[w].is_none() {
                    distance[w] = Some(next);
                    queue.push_back(w);
                }
                if distance[w] == Some(next) {
                    paths[w] += paths[v];
                    parents[w].push(v);
                }
            }
        }

        let mut dependency = vec![0.0_f64; n];
        while let Some(w) = stack.pop() {
            for &v in &parents[w] {
                dependency[v] += paths[v] / paths[w] * (1.0 + dependency[w]);
            }
            if w != source {
                betweenness[w] += dependency[w];
            }
        }
    }

    if n > 2 {
        let scale = 1.0 / ((n - 1) * (n - 2)) as f64;
        betweenness.iter_mut().for_each(|b| *b *= scale);
    }
    betweenness
}

/// Eigenvector centrality by power iteration on `(A + I)ᵀ`
///
/// A node scores highly when highly scored nodes link to it. Scores are
/// normalized to unit Euclidean length. Fails with
/// [`AnalysisError::NoConvergence`] when the total change is still at least
/// `n * tolerance` after `max_iter` rounds.
pub fn eigenvector_centrality(
    adj: &Adjacency<'_>,
    max_iter: usize,
    tolerance: f64,
) -> Result<Vec<f64>, AnalysisError> {
    let n = adj.len();
    if n == 0 {
        return Err(AnalysisError::EmptyGraph);
    }

    let mut scores = vec![1.0 / n as f64; n];
    for _ in 0..max_iter {
        let last = scores.clone();
        for (v, weight) in last.iter().enumerate() {
            for &w in &adj.successors[v] {
                scores[w] += weight;
            }
        }

        let norm = scores.iter().map(|x| x * x).sum::<f64>().sqrt();
        let norm = if norm == 0.0 { 1.0 } else { norm };
        scores.iter_mut().for_each(|x| *x /= norm);

        let change: f64 = scores.iter().zip(&last).map(|(a, b)| (a - b).abs()).sum();
        if change < n as f64 * tolerance {
            return Ok(scores);
        }
    }

    Err(AnalysisError::NoConvergence {
        iterations: max_iter,
    })
}

/// Hop counts from `start` following `neighbours`; `None` when unreachable
fn bfs_distances(neighbours: &[Vec<usize>], start: usize) -> Vec<Option<usize>> {
    let mut distance = vec![None; neighbours.len()];
    distance[start] = Some(0);
    let mut queue = VecDeque::from([start]);

    while let Some(v) = queue.pop_front() {
        let next = distance[v].map_or(0, |d| d + 1);
        for &w in &neighbours[v] {
            if distance[w].is_none() {
                distance[w] = Some(next);
                queue.push_back(w);
            }
        }
    }
    distance
}
