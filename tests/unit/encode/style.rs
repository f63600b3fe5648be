use super::*;
use crate::diff::category::CategoryTag;
use crate::encode::palette::Theme;
use crate::trace::model::Family;

fn assignment(family: Family, id: &EntityId, categories: &[Category]) -> CategoryAssignment {
    let mut a = CategoryAssignment::new(family, 0);
    for c in categories {
        a.tag(id.clone(), CategoryTag::explicit(*c));
    }
    a
}

#[test]
fn next_suggestion_paints_stroke_without_touching_fill() {
    let p = Palette::for_theme(Theme::Light);
    let id = EntityId::node("B");
    let a = assignment(Family::GraphSearch, &id, &[Category::Visited]);

    let plain = encode_style(&id, &a, None, false, &p).unwrap();
    let hinted = encode_style(&id, &a, None, true, &p).unwrap();

    assert_eq!(plain.fill, p.done);
    assert_eq!(hinted.fill, p.done);
    assert_eq!(hinted.stroke, p.next);
    assert!(hinted.stroke_width > plain.stroke_width);
}

#[test]
fn sort_precedence_is_role_then_swapped_then_comparing() {
    let p = Palette::LIGHT;
    let id = EntityId::cell(2);
    let a = assignment(
        Family::Sort,
        &id,
        &[Category::Comparing, Category::Swapped, Category::Unsorted],
    );
    assert_eq!(encode_style(&id, &a, None, false, &p).unwrap().fill, p.swap);

    let with_pivot = encode_style(&id, &a, Some(StaticRole::Pivot), false, &p).unwrap();
    assert_eq!(with_pivot.fill, p.role);
    assert_eq!(with_pivot.label, Some("pivot"));

    let a = assignment(Family::Sort, &id, &[Category::Sorted, Category::Comparing]);
    assert_eq!(encode_style(&id, &a, None, false, &p).unwrap().fill, p.compare);
}

#[test]
fn graph_roles_only_add_a_caption() {
    let p = Palette::LIGHT;
    let id = EntityId::node("A");
    let a = assignment(Family::GraphSearch, &id, &[Category::Visited]);
    let s = encode_style(&id, &a, Some(StaticRole::Start), false, &p).unwrap();
    assert_eq!(s.fill, p.done);
    assert_eq!(s.label, Some("start"));
}

#[test]
fn inferred_updates_are_dashed() {
    let p = Palette::DARK;
    let id = EntityId::node("A");
    let mut a = assignment(Family::ShortestPath, &id, &[Category::Unsettled]);
    a.tag(id.clone(), CategoryTag::inferred(Category::JustUpdated));
    let s = encode_style(&id, &a, None, false, &p).unwrap();
    assert!(s.dashed);
    assert_eq!(s.stroke, p.updated);
    assert_eq!(s.fill, p.neutral);
}

#[test]
fn theme_changes_colors_only() {
    let id = EntityId::cell(0);
    let a = assignment(Family::Search, &id, &[Category::Eliminated]);
    let light = encode_style(&id, &a, None, false, &Palette::LIGHT).unwrap();
    let dark = encode_style(&id, &a, None, false, &Palette::DARK).unwrap();
    assert_ne!(light.fill, dark.fill);
    assert_eq!(light.opacity, dark.opacity);
    assert!(light.opacity < 1.0);
}

#[test]
fn connectors_use_the_stroke_channel() {
    let p = Palette::LIGHT;
    let id = EntityId::edge("A", "B");
    let a = assignment(Family::SpanningTree, &id, &[Category::MstEdge]);
    let s = encode_style(&id, &a, None, false, &p).unwrap();
    assert_eq!(s.fill, Color::TRANSPARENT);
    assert_eq!(s.stroke, p.edge_strong);
}

#[test]
fn gaps_in_the_table_are_errors() {
    let p = Palette::LIGHT;
    let id = EntityId::cell(0);

    let foreign = assignment(Family::Sort, &id, &[Category::Visited]);
    let err = encode_style(&id, &foreign, None, false, &p).unwrap_err();
    assert_eq!(err.to_string(), "unstyled category: visited in family sort");

    let untagged = assignment(Family::Sort, &id, &[]);
    assert!(encode_style(&id, &untagged, None, false, &p).is_err());

    let ok = assignment(Family::Sort, &id, &[Category::Unsorted]);
    let err = encode_style(&id, &ok, Some(StaticRole::Via), false, &p).unwrap_err();
    assert!(matches!(err, VizError::UnstyledCategory { .. }));
}

#[test]
fn found_keeps_its_fill_under_a_search_role() {
    let p = Palette::LIGHT;
    let id = EntityId::cell(2);
    let a = assignment(
        Family::Search,
        &id,
        &[Category::Found, Category::Current, Category::InWindow],
    );
    let s = encode_style(&id, &a, Some(StaticRole::Mid), false, &p).unwrap();
    assert_eq!(s.fill, p.found);
    assert_eq!(s.label, Some("mid"));

    let a = assignment(Family::Search, &id, &[Category::Current, Category::InWindow]);
    let s = encode_style(&id, &a, Some(StaticRole::Mid), false, &p).unwrap();
    assert_eq!(s.fill, p.role);
}

#[test]
fn binary_search_hit_on_mid_is_drawn_as_found() {
    use crate::diff::engine::{diff_step, roles};
    use crate::trace::dsl::TraceBuilder;
    use crate::trace::model::{Algorithm, TraceInput};

    let trace = TraceBuilder::new(Algorithm::BinarySearch)
        .input(TraceInput {
            array: vec![1, 3, 5, 7, 9],
            target: Some(5),
            ..TraceInput::default()
        })
        .step(
            "found it",
            "a[2] == 5",
            serde_json::json!({ "low": 0, "high": 4, "mid": 2, "found": 2 }),
        )
        .unwrap()
        .build()
        .unwrap();
    let a = diff_step(&trace, 0).unwrap();
    let r = roles(&trace, 0).unwrap();
    let styles = encode_step(&trace, 0, &a, &r, &Palette::LIGHT).unwrap();

    let hit = &styles[&EntityId::cell(2)];
    assert_eq!(hit.fill, Palette::LIGHT.found);
    assert_eq!(hit.label, Some("mid"));
    assert_eq!(styles[&EntityId::cell(0)].fill, Palette::LIGHT.bound);
}
