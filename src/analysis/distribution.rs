//! Degree distribution over the low-degree range

use crate::analysis::Adjacency;
use serde::Serialize;

/// Largest degree reported in the distribution
pub const MAX_REPORTED_DEGREE: usize = 10;

/// Share of nodes with one particular degree
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DegreeBin {
    pub degree: usize,
    pub count: usize,
    pub pdf: f64,
    pub cdf: f64,
}

/// PDF and CDF of in+out degree for degrees `1..=MAX_REPORTED_DEGREE`
///
/// Fractions are taken over all nodes, so the CDF only reaches 1.0 when no
/// node has a degree above the reported range.
pub fn degree_distribution(adj: &Adjacency<'_>) -> Vec<DegreeBin> {
    let total = adj.len();
    let mut counts = [0usize; MAX_REPORTED_DEGREE + 1];
    for v in 0..total {
        let degree = adj.degree(v);
        if degree <= MAX_REPORTED_DEGREE {
            counts[degree] += 1;
        }
    }

    let mut cumulative = 0;
    (1..=MAX_REPORTED_DEGREE)
        .map(|degree| {
            let count = counts[degree];
            cumulative += count;
            DegreeBin {
                degree,
                count,
                pdf: fraction(count, total),
                cdf: fraction(cumulative, total),
            }
        })
        .collect()
}

fn fraction(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::LinkGraph;

    #[test]
    fn test_distribution() {
        let mut g = LinkGraph::new();
        g.add_edge("A", "B");
        g.add_edge("B", "C");
        g.add_edge("C", "A");
        g.add_edge("D", "A");
        let adj = Adjacency::new(&g);
        let bins = degree_distribution(&adj);

        assert_eq!(bins.len(), MAX_REPORTED_DEGREE);
        // Degrees: A=3, B=2, C=2, D=1
        assert_eq!(bins[0].count, 1);
        assert_eq!(bins[1].count, 2);
        assert_eq!(bins[2].count, 1);
        assert!((bins[1].pdf - 0.5).abs() < 1e-12);
        assert!((bins[1].cdf - 0.75).abs() < 1e-12);
        assert!((bins[9].cdf - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_high_degrees_fall_outside_the_range() {
        let mut g = LinkGraph::new();
        for i in 0..11 {
            g.add_edge("Hub", &format!("Leaf {}", i));
        }
        let adj = Adjacency::new(&g);
        let bins = degree_distribution(&adj);

        assert_eq!(bins[0].count, 11);
        assert!(bins[9].cdf < 1.0);
    }
}
