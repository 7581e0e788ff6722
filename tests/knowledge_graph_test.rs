use santok_graph::graph::{
    AttributeValue, GraphError, GraphNode, GraphStore, NodeId, NodeType, RelationType,
};

fn ids(path: &[NodeId]) -> Vec<&str> {
    path.iter().map(NodeId::as_str).collect()
}

#[test]
fn test_animals_scenario() {
    let mut store = GraphStore::new();

    store.add_node(GraphNode::new("uid_dog", "dog").with_type("entity")).unwrap();
    store.add_node(GraphNode::new("uid_animal", "animal").with_type("concept")).unwrap();
    store.add_node(GraphNode::new("uid_cat", "cat").with_type("entity")).unwrap();

    store.add_edge("uid_dog", "uid_animal", RelationType::IsA).unwrap();
    store.add_edge("uid_cat", "uid_animal", RelationType::IsA).unwrap();

    let stats = store.get_stats();
    assert_eq!(stats.node_count, 3);
    assert_eq!(stats.edge_count, 2);
    assert_eq!(stats.node_types.len(), 2);
    assert_eq!(stats.node_type_count("entity"), 2);
    assert_eq!(stats.node_type_count("concept"), 1);
    assert_eq!(stats.relation_types.len(), 1);
    assert_eq!(stats.relation_count(RelationType::IsA), 2);

    let path = store.find_path("uid_dog", "uid_cat", None).unwrap();
    assert_eq!(ids(&path), vec!["uid_dog", "uid_animal", "uid_cat"]);
}

#[test]
fn test_second_domain_stays_disconnected() {
    let mut store = GraphStore::new();
    for (id, label, ty) in [
        ("uid_dog", "dog", "entity"),
        ("uid_animal", "animal", "concept"),
        ("uid_cricket", "cricket", "entity"),
        ("uid_sport", "sport", "concept"),
    ] {
        store.add_node(GraphNode::new(id, label).with_type(ty)).unwrap();
    }
    store.add_edge("uid_dog", "uid_animal", RelationType::IsA).unwrap();
    store.add_edge("uid_cricket", "uid_sport", RelationType::IsA).unwrap();

    // Both endpoints exist, so this is a missing path rather than a missing node
    assert_eq!(
        store.find_path("uid_dog", "uid_sport", None),
        Err(GraphError::PathNotFound {
            from: NodeId::new("uid_dog"),
            to: NodeId::new("uid_sport"),
        })
    );
    assert!(matches!(
        store.find_path("uid_dog", "uid_horse", None),
        Err(GraphError::UnknownNode(_))
    ));
}

#[test]
fn test_insertion_identity() {
    let mut store = GraphStore::new();
    let nodes = vec![
        GraphNode::new("n1", "first"),
        GraphNode::new("n2", "second")
            .with_type("concept")
            .with_attribute("weight", 0.25)
            .with_attribute("aliases", vec![AttributeValue::from("two"), AttributeValue::from("deux")]),
        GraphNode::new(42u64, "numbered").with_attribute("active", true),
    ];

    for node in &nodes {
        store.add_node(node.clone()).unwrap();
    }
    for node in &nodes {
        assert_eq!(store.get_node(&node.id).unwrap(), node);
    }
    assert_eq!(store.get_node("42").unwrap().label, "numbered");
}

#[test]
fn test_trivial_path() {
    let mut store = GraphStore::new();
    store.add_node(GraphNode::new("alone", "alone")).unwrap();

    let path = store.find_path("alone", "alone", None).unwrap();
    assert_eq!(ids(&path), vec!["alone"]);
    let path = store.find_directed_path("alone", "alone", Some(0)).unwrap();
    assert_eq!(ids(&path), vec!["alone"]);
}

#[test]
fn test_bfs_minimality_independent_of_edge_order() {
    for direct_first in [true, false] {
        let mut store = GraphStore::new();
        for id in ["A", "B", "C"] {
            store.add_node(GraphNode::new(id, id)).unwrap();
        }

        if direct_first {
            store.add_edge("A", "C", RelationType::RelatedTo).unwrap();
        }
        store.add_edge("A", "B", RelationType::RelatedTo).unwrap();
        store.add_edge("B", "C", RelationType::RelatedTo).unwrap();
        if !direct_first {
            store.add_edge("A", "C", RelationType::RelatedTo).unwrap();
        }

        assert_eq!(ids(&store.find_path("A", "C", None).unwrap()), vec!["A", "C"]);
        assert_eq!(ids(&store.find_directed_path("A", "C", None).unwrap()), vec!["A", "C"]);
    }
}

#[test]
fn test_directed_disconnection() {
    let mut store = GraphStore::new();
    for id in ["A", "B"] {
        store.add_node(GraphNode::new(id, id)).unwrap();
    }
    store.add_edge("A", "B", RelationType::Causes).unwrap();

    assert!(matches!(
        store.find_directed_path("B", "A", None),
        Err(GraphError::PathNotFound { .. })
    ));
    // Relations are followed backwards by the default search
    assert_eq!(ids(&store.find_path("B", "A", None).unwrap()), vec!["B", "A"]);
}

#[test]
fn test_multigraph_accumulation() {
    let mut store = GraphStore::new();
    store.add_node(GraphNode::new("wheel", "wheel")).unwrap();
    store.add_node(GraphNode::new("car", "car")).unwrap();

    store.add_edge("wheel", "car", RelationType::PartOf).unwrap();
    store.add_edge("wheel", "car", RelationType::UsedFor).unwrap();

    let all = store.get_edges("wheel", None);
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].relation, RelationType::PartOf);
    assert_eq!(all[1].relation, RelationType::UsedFor);

    let part_of = store.get_edges("wheel", Some(RelationType::PartOf));
    assert_eq!(part_of.len(), 1);
    assert_eq!(part_of[0].target.as_str(), "car");

    assert!(store.get_edges("wheel", Some(RelationType::IsA)).is_empty());
    assert_eq!(store.get_incoming_edges("car", None).len(), 2);
}

#[test]
fn test_stats_are_idempotent() {
    let mut store = GraphStore::new();
    assert_eq!(store.get_stats(), store.get_stats());
    assert_eq!(store.get_stats().node_count, 0);

    store.add_node(GraphNode::new("a", "a")).unwrap();
    store.add_node(GraphNode::new("b", "b").with_type(NodeType::concept())).unwrap();
    store.add_edge("a", "b", RelationType::InstanceOf).unwrap();
    store.add_node(GraphNode::new("a", "a again")).unwrap();

    let first = store.get_stats();
    let second = store.get_stats();
    assert_eq!(first, second);
    assert_eq!(first.node_count, 2);
    assert_eq!(first.edge_count, 1);
}

#[test]
fn test_relation_names_round_trip() {
    for relation in RelationType::ALL {
        assert_eq!(relation.as_str().parse::<RelationType>().unwrap(), relation);
    }
    assert_eq!("is-a".parse::<RelationType>().unwrap(), RelationType::IsA);
    assert!("LIKES".parse::<RelationType>().is_err());
}
