use super::*;

#[test]
fn algorithms_map_to_families_through_their_default_diagram() {
    let cases = [
        (Algorithm::Bfs, Family::GraphSearch),
        (Algorithm::Dijkstra, Family::ShortestPath),
        (Algorithm::FloydWarshall, Family::AllPairs),
        (Algorithm::Prim, Family::SpanningTree),
        (Algorithm::BinarySearch, Family::Search),
        (Algorithm::QuickSort, Family::Sort),
        (Algorithm::MergeSort, Family::MergeTree),
        (Algorithm::LinkedListTraversal, Family::LinkedList),
    ];
    for (alg, family) in cases {
        assert_eq!(alg.family(alg.default_diagram()), Some(family), "{alg:?}");
    }
}

#[test]
fn merge_sort_can_be_drawn_as_bars_but_bfs_cannot() {
    assert_eq!(
        Algorithm::MergeSort.family(Diagram::Bars),
        Some(Family::Sort)
    );
    assert_eq!(Algorithm::Bfs.family(Diagram::Bars), None);
}

#[test]
fn detail_level_toggles_between_two_levels() {
    let d = DetailLevel::default();
    assert_eq!(d, DetailLevel::Beginner);
    assert_eq!(d.toggled(), DetailLevel::Advanced);
    assert_eq!(d.toggled().toggled(), d);
    assert_eq!(DetailLevel::Advanced.index(), 1);
}

#[test]
fn edges_accept_pair_triple_and_object_forms() {
    let edges: Vec<EdgeDef> =
        serde_json::from_str(r#"[["A","B"],["B","C",2.5],{"from":"C","to":"A","weight":1}]"#)
            .unwrap();
    assert_eq!(edges[0].weight, None);
    assert_eq!(edges[1].weight, Some(2.5));
    assert_eq!(edges[2].from, "C");
}

#[test]
fn undirected_edge_lookup_ignores_orientation() {
    let input = TraceInput {
        nodes: vec!["A".into(), "B".into()],
        edges: vec![EdgeDef {
            from: "A".into(),
            to: "B".into(),
            weight: Some(3.0),
        }],
        ..TraceInput::default()
    };
    assert_eq!(input.edge_between("B", "A"), Some(EntityId::edge("A", "B")));
    assert_eq!(input.weight_between("B", "A"), Some(3.0));

    let directed = TraceInput {
        directed: true,
        ..input
    };
    assert_eq!(directed.edge_between("B", "A"), None);
}

#[test]
fn list_head_is_the_unreferenced_node() {
    let input: TraceInput = serde_json::from_str(
        r#"{"list":[{"id":"n2","value":7},{"id":"n1","value":3,"next":"n2"}]}"#,
    )
    .unwrap();
    assert_eq!(input.list_head().map(|n| n.id.as_str()), Some("n1"));
}

#[test]
fn fixture_loads_and_exposes_steps() {
    let trace = StepTrace::from_json_str(include_str!("../../data/bfs.json")).unwrap();
    assert_eq!(trace.algorithm(), Algorithm::Bfs);
    assert_eq!(trace.family(), Family::GraphSearch);
    assert_eq!(trace.len(), 5);
    assert_eq!(trace.last_index(), 4);
    assert_eq!(trace.title(), Some("Breadth-first search from A"));
    assert_eq!(trace.step(4).unwrap().number, 5);
    assert!(
        trace
            .step(0)
            .unwrap()
            .action(DetailLevel::Advanced)
            .contains("FIFO")
    );
    assert_eq!(
        trace.step(0).unwrap().next_suggestion,
        Some(EntityId::node("B"))
    );
}

#[test]
fn step_lookup_out_of_range_fails() {
    let trace = StepTrace::from_json_str(include_str!("../../data/bfs.json")).unwrap();
    let err = trace.step(5).unwrap_err();
    assert!(matches!(
        err,
        VizError::IndexOutOfRange { index: 5, len: 5 }
    ));
}

#[test]
fn from_path_reports_missing_file_as_schema_error() {
    let err = StepTrace::from_path("does/not/exist.json").unwrap_err();
    assert!(err.to_string().contains("open trace JSON"));
}
