use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use santok_graph::graph::{GraphError, GraphNode, GraphStore, NodeId, RelationType};

const UNREACHABLE: usize = usize::MAX;

struct RandomGraph {
    store: GraphStore,
    edges: Vec<(usize, usize)>,
    node_count: usize,
}

fn node_id(idx: usize) -> String {
    format!("n{}", idx)
}

fn random_graph(rng: &mut StdRng, node_count: usize, edge_count: usize) -> RandomGraph {
    let mut store = GraphStore::new();
    for idx in 0..node_count {
        store.add_node(GraphNode::new(node_id(idx), format!("node {}", idx))).unwrap();
    }

    let mut edges = Vec::with_capacity(edge_count);
    for _ in 0..edge_count {
        let u = rng.gen_range(0..node_count);
        let v = rng.gen_range(0..node_count);
        let relation = RelationType::ALL[rng.gen_range(0..RelationType::ALL.len())];
        store.add_edge(node_id(u), node_id(v), relation).unwrap();
        edges.push((u, v));
    }

    RandomGraph {
        store,
        edges,
        node_count,
    }
}

/// Floyd-Warshall over hop counts
fn all_pairs_hops(node_count: usize, edges: &[(usize, usize)], undirected: bool) -> Vec<Vec<usize>> {
    let mut dist = vec![vec![UNREACHABLE; node_count]; node_count];
    for (i, row) in dist.iter_mut().enumerate() {
        row[i] = 0;
    }
    for &(u, v) in edges {
        if u != v {
            dist[u][v] = 1;
            if undirected {
                dist[v][u] = 1;
            }
        }
    }

    for k in 0..node_count {
        for i in 0..node_count {
            if dist[i][k] == UNREACHABLE {
                continue;
            }
            for j in 0..node_count {
                if dist[k][j] == UNREACHABLE {
                    continue;
                }
                let through = dist[i][k] + dist[k][j];
                if through < dist[i][j] {
                    dist[i][j] = through;
                }
            }
        }
    }
    dist
}

fn index_of(id: &NodeId) -> usize {
    id.as_str()[1..].parse().unwrap()
}

fn assert_is_walk(path: &[NodeId], edges: &[(usize, usize)], undirected: bool) {
    for pair in path.windows(2) {
        let (u, v) = (index_of(&pair[0]), index_of(&pair[1]));
        let linked = edges
            .iter()
            .any(|&(a, b)| (a, b) == (u, v) || (undirected && (a, b) == (v, u)));
        assert!(linked, "no edge between {} and {}", pair[0], pair[1]);
    }
}

fn check_graph(graph: &RandomGraph, undirected: bool) {
    let dist = all_pairs_hops(graph.node_count, &graph.edges, undirected);

    for s in 0..graph.node_count {
        for t in 0..graph.node_count {
            let (source, target) = (node_id(s), node_id(t));
            let result = if undirected {
                graph.store.find_path(&source, &target, None)
            } else {
                graph.store.find_directed_path(&source, &target, None)
            };

            match (dist[s][t], result) {
                (UNREACHABLE, Err(GraphError::PathNotFound { .. })) => {}
                (expected, Ok(path)) if expected != UNREACHABLE => {
                    assert_eq!(path.len() - 1, expected, "{} -> {}", source, target);
                    assert_eq!(path.first().map(NodeId::as_str), Some(source.as_str()));
                    assert_eq!(path.last().map(NodeId::as_str), Some(target.as_str()));
                    assert_is_walk(&path, &graph.edges, undirected);
                }
                (expected, other) => panic!(
                    "{} -> {}: expected distance {}, got {:?}",
                    source, target, expected, other
                ),
            }
        }
    }
}

#[test]
fn test_directed_paths_match_reference() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..20 {
        let node_count = rng.gen_range(2..12);
        let edge_count = rng.gen_range(0..node_count * 2);
        let graph = random_graph(&mut rng, node_count, edge_count);
        check_graph(&graph, false);
    }
}

#[test]
fn test_undirected_paths_match_reference() {
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..20 {
        let node_count = rng.gen_range(2..12);
        let edge_count = rng.gen_range(0..node_count * 2);
        let graph = random_graph(&mut rng, node_count, edge_count);
        check_graph(&graph, true);
    }
}

#[test]
fn test_max_depth_cuts_longer_paths() {
    let mut rng = StdRng::seed_from_u64(1234);
    let graph = random_graph(&mut rng, 15, 25);
    let dist = all_pairs_hops(graph.node_count, &graph.edges, false);

    for s in 0..graph.node_count {
        for t in 0..graph.node_count {
            let expected = dist[s][t];
            if expected == UNREACHABLE || expected == 0 {
                continue;
            }
            let (source, target) = (node_id(s), node_id(t));

            let at_limit = graph.store.find_directed_path(&source, &target, Some(expected));
            assert_eq!(at_limit.unwrap().len() - 1, expected);

            let below_limit = graph.store.find_directed_path(&source, &target, Some(expected - 1));
            assert!(matches!(below_limit, Err(GraphError::PathNotFound { .. })));
        }
    }
}
