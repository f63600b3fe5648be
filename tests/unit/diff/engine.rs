use super::*;
use crate::diff::category::Provenance;
use crate::trace::dsl::TraceBuilder;
use crate::trace::model::{Algorithm, ListNodeDef, TraceInput};
use serde_json::json;

fn load(src: &str) -> StepTrace {
    StepTrace::from_json_str(src).unwrap()
}

fn bfs() -> StepTrace {
    load(include_str!("../../data/bfs.json"))
}

#[test]
fn out_of_range_index_is_rejected() {
    let trace = bfs();
    let err = diff_step(&trace, 5).unwrap_err();
    assert!(matches!(
        err,
        crate::VizError::IndexOutOfRange { index: 5, len: 5 }
    ));
    assert!(roles(&trace, 5).is_err());
}

#[test]
fn graph_search_projects_queue_and_visited() {
    let trace = bfs();
    let a = diff_step(&trace, 3).unwrap();
    for v in ["A", "B", "C", "D"] {
        assert!(a.has(&EntityId::node(v), Category::Visited), "{v}");
    }
    assert!(a.has(&EntityId::node("E"), Category::Frontier));
    assert!(a.has(&EntityId::node("D"), Category::Current));
    assert!(a.has(&EntityId::edge("D", "E"), Category::TreeEdge));
    assert!(a.has(&EntityId::edge("C", "D"), Category::Idle));
    assert!(a.updated().is_empty());

    let first = diff_step(&trace, 0).unwrap();
    assert!(first.has(&EntityId::node("E"), Category::Unvisited));
    assert_eq!(first.with(Category::Frontier).len(), 2);
}

#[test]
fn every_drawn_entity_gets_a_tag() {
    let trace = bfs();
    for i in 0..trace.len() {
        let a = diff_step(&trace, i).unwrap();
        for id in trace.entities_at(i).unwrap() {
            assert!(!a.tags(&id).is_empty(), "{id} at {i}");
        }
    }
}

#[test]
fn diff_is_independent_of_call_order() {
    let trace = bfs();
    let direct = diff_step(&trace, 2).unwrap();
    let _ = diff_step(&trace, 4).unwrap();
    let _ = diff_step(&trace, 0).unwrap();
    assert_eq!(diff_step(&trace, 2).unwrap(), direct);
}

#[test]
fn cumulative_distances_report_every_changed_key() {
    let trace = load(include_str!("../../data/bellman_ford.json"));

    assert!(diff_step(&trace, 0).unwrap().updated().is_empty());

    let a = diff_step(&trace, 1).unwrap();
    assert_eq!(
        a.updated(),
        &[
            UpdatedKey::Distance { node: "A".into() },
            UpdatedKey::Predecessor { node: "A".into() },
        ]
    );
    assert!(a.is_inferred(&EntityId::node("A")));
    assert!(!a.is_inferred(&EntityId::node("B")));
    assert!(a.has(&EntityId::edge("S", "A"), Category::CurrentEdge));
    assert!(a.has(&EntityId::node("S"), Category::RelaxedEndpoint));

    let a = diff_step(&trace, 3).unwrap();
    assert_eq!(a.updated().len(), 2);
    let edge = EntityId::edge("B", "A");
    assert!(a.has(&edge, Category::PathEdge));
    assert!(
        a.tags(&edge)
            .contains(&CategoryTag::inferred(Category::JustUpdated))
    );
    assert!(!a.has(&EntityId::edge("S", "A"), Category::PathEdge));
}

#[test]
fn matrix_cells_are_diffed_cell_by_cell() {
    let trace = load(include_str!("../../data/floyd_warshall.json"));
    assert!(diff_step(&trace, 0).unwrap().updated().is_empty());
    assert!(diff_step(&trace, 1).unwrap().updated().is_empty());

    let a = diff_step(&trace, 2).unwrap();
    assert_eq!(a.updated(), &[UpdatedKey::Cell { row: 0, col: 2 }]);
    assert!(a.has(&EntityId::node("X"), Category::JustUpdated));
    assert!(a.has(&EntityId::node("Z"), Category::JustUpdated));
    assert!(!a.has(&EntityId::node("Y"), Category::JustUpdated));
    assert!(a.has(&EntityId::edge("X", "Z"), Category::CurrentEdge));
    assert!(a.has(&EntityId::node("X"), Category::Active));

    let r = roles(&trace, 2).unwrap();
    assert_eq!(r.get(&EntityId::node("Y")), Some(StaticRole::Via));
}

#[test]
fn swapped_pair_is_tagged_and_cleared_next_step() {
    let trace = load(include_str!("../../data/bubble_sort.json"));
    let a = diff_step(&trace, 1).unwrap();
    for i in [0, 1] {
        assert!(a.has(&EntityId::cell(i), Category::Swapped));
        assert!(a.has(&EntityId::cell(i), Category::Comparing));
    }
    let b = diff_step(&trace, 2).unwrap();
    assert!(!b.has(&EntityId::cell(0), Category::Comparing));
    assert!(b.has(&EntityId::cell(1), Category::Comparing));

    let no_swap = diff_step(&trace, 4).unwrap();
    assert!(no_swap.with(Category::Swapped).is_empty());
    assert!(no_swap.has(&EntityId::cell(3), Category::Sorted));
}

#[test]
fn sort_roles_and_inactive_cells() {
    let trace = TraceBuilder::new(Algorithm::QuickSort)
        .input(TraceInput {
            array: vec![3, 6, 1, 5],
            ..TraceInput::default()
        })
        .step(
            "partition",
            "partition [1, 4)",
            json!({ "array": [3, 6, 1, 5], "pivot": 3, "range": [1, 4], "comparing": [1, 3] }),
        )
        .unwrap()
        .build()
        .unwrap();
    let a = diff_step(&trace, 0).unwrap();
    assert!(a.has(&EntityId::cell(0), Category::Inactive));
    assert!(a.has(&EntityId::cell(0), Category::Unsorted));
    assert!(!a.has(&EntityId::cell(2), Category::Inactive));
    let r = roles(&trace, 0).unwrap();
    assert_eq!(r.get(&EntityId::cell(3)), Some(StaticRole::Pivot));
    assert_eq!(r.len(), 1);
}

#[test]
fn binary_search_window() {
    let trace = TraceBuilder::new(Algorithm::BinarySearch)
        .input(TraceInput {
            array: vec![1, 3, 5, 7, 9],
            target: Some(7),
            ..TraceInput::default()
        })
        .step(
            "look right",
            "a[2] < 7, low = 3",
            json!({ "low": 3, "high": 4, "mid": 3, "checked": [2] }),
        )
        .unwrap()
        .build()
        .unwrap();
    let a = diff_step(&trace, 0).unwrap();
    assert!(a.has(&EntityId::cell(0), Category::Eliminated));
    assert!(a.has(&EntityId::cell(2), Category::Eliminated));
    assert!(a.has(&EntityId::cell(4), Category::InWindow));
    assert!(a.has(&EntityId::cell(3), Category::Current));
    let r = roles(&trace, 0).unwrap();
    assert_eq!(r.get(&EntityId::cell(3)), Some(StaticRole::Mid));
    assert_eq!(r.get(&EntityId::cell(4)), Some(StaticRole::High));
}

#[test]
fn merge_tree_marks_working_and_merged_ranges() {
    let trace = TraceBuilder::new(Algorithm::MergeSort)
        .input(TraceInput {
            array: vec![4, 3, 2, 1],
            ..TraceInput::default()
        })
        .step(
            "merge left",
            "merge [0, 2)",
            json!({ "array": [3, 4, 2, 1], "range": [0, 2], "merged": [[0, 1], [1, 2]] }),
        )
        .unwrap()
        .build()
        .unwrap();
    let a = diff_step(&trace, 0).unwrap();
    assert!(a.has(&EntityId::tree_node(0, 2), Category::Working));
    assert!(a.has(&EntityId::tree_node(0, 1), Category::Merged));
    assert!(a.has(&EntityId::tree_node(2, 4), Category::Pending));
    let branch = EntityId::Branch {
        parent: (0, 2),
        child: (1, 2),
    };
    assert!(a.has(&branch, Category::Merged));
}

#[test]
fn provenance_is_explicit_for_projected_tags() {
    let trace = bfs();
    let a = diff_step(&trace, 1).unwrap();
    for (_, tags) in a.iter() {
        assert!(tags.iter().all(|t| t.provenance == Provenance::Explicit));
    }
}

#[test]
fn prim_tracks_tree_and_candidate() {
    let edges = serde_json::from_value(json!([
        ["A", "B", 1], ["B", "C", 2], ["A", "C", 4], ["C", "D", 3]
    ]))
    .unwrap();
    let trace = TraceBuilder::new(Algorithm::Prim)
        .input(TraceInput {
            nodes: vec!["A".into(), "B".into(), "C".into(), "D".into()],
            edges,
            start: Some("A".into()),
            ..TraceInput::default()
        })
        .step(
            "grow to B",
            "lightest crossing edge is C-B",
            json!({ "in_tree": ["A", "B"], "mst_edges": [["A", "B"]], "candidate_edge": ["C", "B"] }),
        )
        .unwrap()
        .step(
            "grow to C",
            "lightest crossing edge is C-D",
            json!({
                "in_tree": ["A", "B", "C"],
                "mst_edges": [["A", "B"], ["B", "C"]],
                "candidate_edge": ["C", "D"]
            }),
        )
        .unwrap()
        .build()
        .unwrap();

    let a = diff_step(&trace, 0).unwrap();
    assert!(a.has(&EntityId::node("A"), Category::InTree));
    assert!(a.has(&EntityId::node("B"), Category::InTree));
    assert!(a.has(&EntityId::node("C"), Category::Candidate));
    assert!(a.has(&EntityId::node("C"), Category::Unvisited));
    assert!(!a.has(&EntityId::node("D"), Category::Candidate));
    assert!(a.has(&EntityId::edge("A", "B"), Category::MstEdge));
    assert!(a.has(&EntityId::edge("B", "C"), Category::CandidateEdge));
    assert!(a.has(&EntityId::edge("A", "C"), Category::Idle));
    assert!(a.has(&EntityId::edge("C", "D"), Category::Idle));
    assert_eq!(
        roles(&trace, 0).unwrap().get(&EntityId::node("A")),
        Some(StaticRole::Start)
    );

    let a = diff_step(&trace, 1).unwrap();
    assert!(a.has(&EntityId::node("C"), Category::InTree));
    assert!(!a.has(&EntityId::node("C"), Category::Candidate));
    assert!(a.has(&EntityId::node("D"), Category::Candidate));
    assert!(a.has(&EntityId::edge("B", "C"), Category::MstEdge));
    assert!(!a.has(&EntityId::edge("B", "C"), Category::CandidateEdge));
    assert!(a.has(&EntityId::edge("C", "D"), Category::CandidateEdge));
}

#[test]
fn list_walk_follows_links_behind_the_cursor() {
    let node = |id: &str, value: i64, next: Option<&str>| ListNodeDef {
        id: id.into(),
        value,
        next: next.map(Into::into),
    };
    let trace = TraceBuilder::new(Algorithm::LinkedListTraversal)
        .input(TraceInput {
            list: vec![
                node("n1", 4, Some("n2")),
                node("n2", 8, Some("n3")),
                node("n3", 15, None),
            ],
            target: Some(15),
            ..TraceInput::default()
        })
        .step("move to n2", "8 != 15", json!({ "current": "n2", "visited": ["n1"] }))
        .unwrap()
        .step(
            "found 15",
            "15 == 15",
            json!({ "current": "n3", "visited": ["n1", "n2"], "found": "n3" }),
        )
        .unwrap()
        .build()
        .unwrap();

    let a = diff_step(&trace, 0).unwrap();
    assert!(a.has(&EntityId::list_node("n1"), Category::Visited));
    assert!(a.has(&EntityId::list_node("n2"), Category::Current));
    assert!(a.has(&EntityId::list_node("n3"), Category::Unvisited));
    assert!(a.has(&EntityId::link("n1", "n2"), Category::TreeEdge));
    assert!(a.has(&EntityId::link("n2", "n3"), Category::Idle));

    let a = diff_step(&trace, 1).unwrap();
    let tail = EntityId::list_node("n3");
    assert!(a.has(&tail, Category::Found));
    assert!(a.has(&tail, Category::Current));
    assert!(a.has(&EntityId::link("n2", "n3"), Category::TreeEdge));
    assert_eq!(
        roles(&trace, 1).unwrap().get(&EntityId::list_node("n1")),
        Some(StaticRole::Head)
    );
}
