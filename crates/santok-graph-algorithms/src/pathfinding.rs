//! Pathfinding algorithms
//!
//! Breadth-first search (fewest hops) and Dijkstra (lowest total weight) over a
//! [`GraphView`]. Both accept an optional bound on the number of hops.

use super::common::GraphView;
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, VecDeque};

/// Result of a pathfinding algorithm
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathResult {
    pub source: usize,
    pub target: usize,
    /// Node indices from `source` to `target`, both inclusive
    pub path: Vec<usize>,
    /// Hop count for BFS, summed edge weight for Dijkstra
    pub cost: f64,
}

impl PathResult {
    pub fn hops(&self) -> usize {
        self.path.len().saturating_sub(1)
    }
}

/// Breadth-First Search (Unweighted Shortest Path)
///
/// Successors are explored in view order and the first discovery of a node
/// fixes its parent, so among several shortest paths the one using the
/// earliest successors wins. With `max_depth`, nodes at that depth are not
/// expanded.
pub fn bfs(
    view: &GraphView,
    source: usize,
    target: usize,
    max_depth: Option<usize>,
) -> Option<PathResult> {
    if !view.contains(source) || !view.contains(target) {
        return None;
    }

    let mut queue = VecDeque::new();
    let mut parent: Vec<Option<usize>> = vec![None; view.node_count];
    let mut depth: Vec<Option<usize>> = vec![None; view.node_count];

    queue.push_back(source);
    depth[source] = Some(0);

    while let Some(current) = queue.pop_front() {
        let current_depth = depth[current].unwrap_or(0);

        if current == target {
            let path = reconstruct(target, |idx| parent[idx]);
            return Some(PathResult {
                source,
                target,
                cost: current_depth as f64,
                path,
            });
        }

        if max_depth.is_some_and(|max| current_depth >= max) {
            continue;
        }

        for &next in view.successors(current) {
            if depth[next].is_none() {
                depth[next] = Some(current_depth + 1);
                parent[next] = Some(current);
                queue.push_back(next);
            }
        }
    }

    None
}

/// State for Dijkstra priority queue
#[derive(Copy, Clone, PartialEq)]
struct State {
    cost: f64,
    /// Push order; breaks cost ties so equal-cost paths resolve deterministically
    seq: u64,
    node: usize,
    hops: usize,
}

impl Eq for State {}

impl Ord for State {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed for min-heap behaviour
        other
            .cost
            .partial_cmp(&self.cost)
            .unwrap_or(Ordering::Equal)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for State {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Dijkstra's Algorithm (Weighted Shortest Path)
///
/// Uses edge weights from the view if available, otherwise assumes 1.0.
/// Negative and non-finite weights are not traversed. When `max_depth` is
/// set the search runs over (node, hops) states, so the result is the
/// cheapest path among those with at most `max_depth` hops.
pub fn dijkstra(
    view: &GraphView,
    source: usize,
    target: usize,
    max_depth: Option<usize>,
) -> Option<PathResult> {
    if !view.contains(source) || !view.contains(target) {
        return None;
    }

    // Unbounded searches collapse every hop count onto layer 0.
    let layer = |hops: usize| if max_depth.is_some() { hops } else { 0 };

    let mut dist: HashMap<(usize, usize), f64> = HashMap::new();
    let mut parent: HashMap<(usize, usize), (usize, usize)> = HashMap::new();
    let mut heap = BinaryHeap::new();
    let mut seq = 0u64;

    dist.insert((source, 0), 0.0);
    heap.push(State { cost: 0.0, seq, node: source, hops: 0 });

    while let Some(State { cost, node, hops, .. }) = heap.pop() {
        let key = (node, layer(hops));

        if node == target {
            let mut path = vec![node];
            let mut curr = key;
            while let Some(&prev) = parent.get(&curr) {
                path.push(prev.0);
                curr = prev;
            }
            path.reverse();
            return Some(PathResult { source, target, path, cost });
        }

        if cost > *dist.get(&key).unwrap_or(&f64::INFINITY) {
            continue;
        }

        if max_depth.is_some_and(|max| hops >= max) {
            continue;
        }

        let weights = view.weights(node);
        for (i, &next) in view.successors(node).iter().enumerate() {
            let weight = weights.map_or(1.0, |w| w[i]);
            if weight < 0.0 || !weight.is_finite() {
                continue;
            }

            let next_cost = cost + weight;
            let next_key = (next, layer(hops + 1));

            if next_cost < *dist.get(&next_key).unwrap_or(&f64::INFINITY) {
                dist.insert(next_key, next_cost);
                parent.insert(next_key, key);
                seq += 1;
                heap.push(State { cost: next_cost, seq, node: next, hops: hops + 1 });
            }
        }
    }

    None
}

fn reconstruct(target: usize, parent_of: impl Fn(usize) -> Option<usize>) -> Vec<usize> {
    let mut path = vec![target];
    let mut curr = target;
    while let Some(prev) = parent_of(curr) {
        path.push(prev);
        curr = prev;
    }
    path.reverse();
    path
}
