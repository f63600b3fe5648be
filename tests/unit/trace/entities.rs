use super::*;
use crate::trace::dsl::TraceBuilder;
use crate::trace::model::{Algorithm, Diagram, ListNodeDef, TraceInput};
use serde_json::json;

#[test]
fn graph_entities_list_nodes_then_edges() {
    let trace = StepTrace::from_json_str(include_str!("../../data/bfs.json")).unwrap();
    let ids = trace.entities_at(0).unwrap();
    assert_eq!(ids.len(), 10);
    assert_eq!(ids[0], EntityId::node("A"));
    assert_eq!(ids[5], EntityId::edge("A", "B"));
    assert_eq!(trace.links().len(), 5);
    assert!(trace.entities_at(99).is_err());
}

#[test]
fn sort_cells_follow_each_step_array() {
    let trace = TraceBuilder::new(Algorithm::MergeSort)
        .diagram(Diagram::Bars)
        .input(TraceInput {
            array: vec![3, 1, 2],
            ..TraceInput::default()
        })
        .step("start", "start", json!({ "array": [3, 1, 2] }))
        .unwrap()
        .step("left run", "left run", json!({ "array": [3, 1], "range": [0, 2] }))
        .unwrap()
        .build()
        .unwrap();
    assert_eq!(trace.entities_at(0).unwrap().len(), 3);
    assert_eq!(trace.entities_at(1).unwrap().len(), 2);
    assert_eq!(trace.all_entities().unwrap().len(), 3);
    assert!(trace.links().is_empty());
}

#[test]
fn merge_tree_has_nodes_and_branches() {
    let trace = TraceBuilder::new(Algorithm::MergeSort)
        .input(TraceInput {
            array: vec![4, 3, 2, 1],
            ..TraceInput::default()
        })
        .step("split", "split", json!({ "array": [4, 3, 2, 1], "range": [0, 4] }))
        .unwrap()
        .build()
        .unwrap();
    let ids = trace.entities_at(0).unwrap();
    let nodes = ids.iter().filter(|id| !id.is_connector()).count();
    assert_eq!(nodes, 7);
    assert_eq!(ids.len() - nodes, 6);
    assert_eq!(ids[0], EntityId::tree_node(0, 4));
    assert_eq!(trace.links().len(), 6);
}

#[test]
fn list_entities_include_next_links() {
    let trace = TraceBuilder::new(Algorithm::LinkedListTraversal)
        .input(TraceInput {
            list: vec![
                ListNodeDef {
                    id: "n1".into(),
                    value: 7,
                    next: Some("n2".into()),
                },
                ListNodeDef {
                    id: "n2".into(),
                    value: 9,
                    next: None,
                },
            ],
            ..TraceInput::default()
        })
        .step("at head", "at head", json!({ "current": "n1" }))
        .unwrap()
        .build()
        .unwrap();
    assert_eq!(
        trace.entities_at(0).unwrap(),
        vec![
            EntityId::list_node("n1"),
            EntityId::list_node("n2"),
            EntityId::link("n1", "n2"),
        ]
    );
    assert_eq!(
        trace.links(),
        vec![(EntityId::list_node("n1"), EntityId::list_node("n2"))]
    );
}

#[test]
fn list_nodes_follow_the_chain_not_the_input_order() {
    let node = |id: &str, next: Option<&str>| ListNodeDef {
        id: id.into(),
        value: 1,
        next: next.map(Into::into),
    };
    let trace = TraceBuilder::new(Algorithm::LinkedListTraversal)
        .input(TraceInput {
            list: vec![node("n3", None), node("n1", Some("n2")), node("n2", Some("n3"))],
            ..TraceInput::default()
        })
        .step("at head", "at head", json!({ "current": "n1" }))
        .unwrap()
        .build()
        .unwrap();
    let ids = trace.all_entities().unwrap();
    assert_eq!(
        ids[..3],
        [
            EntityId::list_node("n1"),
            EntityId::list_node("n2"),
            EntityId::list_node("n3"),
        ]
    );

    let mut store = crate::layout::store::LayoutStore::new();
    store
        .initialize(
            &ids,
            crate::layout::store::LayoutHint::Row {
                origin: crate::foundation::core::Point::new(40.0, 100.0),
                spacing: 60.0,
            },
        )
        .unwrap();
    let x = |id: &str| store.get(&EntityId::list_node(id)).unwrap().x;
    assert!(x("n1") < x("n2"));
    assert!(x("n2") < x("n3"));
}
