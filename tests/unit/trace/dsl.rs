use super::*;
use crate::{EntityId, Family};
use serde_json::json;

#[test]
fn builder_numbers_steps_in_push_order() {
    let trace = TraceBuilder::new(Algorithm::LinearSearch)
        .title("find 8")
        .input(TraceInput {
            array: vec![3, 8, 1],
            target: Some(8),
            ..TraceInput::default()
        })
        .step("look at 3", "a[0] != 8", json!({ "current": 0, "checked": [] }))
        .unwrap()
        .step_with_suggestion(
            "look at 8",
            "a[1] == 8",
            json!({ "current": 1, "checked": [0], "found": 1 }),
            json!(1),
        )
        .unwrap()
        .build()
        .unwrap();

    assert_eq!(trace.family(), Family::Search);
    assert_eq!(
        trace.steps().iter().map(|s| s.number).collect::<Vec<_>>(),
        vec![1, 2]
    );
    assert_eq!(trace.steps()[1].next_suggestion, Some(EntityId::cell(1)));
}

#[test]
fn builder_validates_on_build() {
    let err = TraceBuilder::new(Algorithm::Bfs)
        .input(TraceInput {
            nodes: vec!["A".into()],
            ..TraceInput::default()
        })
        .step("a", "b", json!({ "visited": ["nope"] }))
        .unwrap()
        .build()
        .unwrap_err();
    assert!(err.to_string().contains("schema error"));
}

#[test]
fn builder_with_no_steps_fails() {
    let err = TraceBuilder::new(Algorithm::BubbleSort).build().unwrap_err();
    assert!(err.to_string().contains("steps must be non-empty"));
}

#[test]
fn diagram_override_switches_family() {
    let trace = TraceBuilder::new(Algorithm::MergeSort)
        .diagram(Diagram::Bars)
        .input(TraceInput {
            array: vec![2, 1],
            ..TraceInput::default()
        })
        .step("a", "b", json!({ "array": [2, 1] }))
        .unwrap()
        .build()
        .unwrap();
    assert_eq!(trace.family(), Family::Sort);
    assert_eq!(trace.diagram(), Diagram::Bars);
}
