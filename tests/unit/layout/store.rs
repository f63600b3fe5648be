use super::*;
use crate::layout::force::ForceDirected;

fn graph_ids() -> Vec<EntityId> {
    vec![
        EntityId::node("A"),
        EntityId::node("B"),
        EntityId::edge("A", "B"),
        EntityId::node("C"),
        EntityId::node("D"),
    ]
}

fn circle() -> LayoutHint {
    LayoutHint::Circle {
        center: Point::new(200.0, 200.0),
        radius: 100.0,
    }
}

#[test]
fn initialize_is_deterministic_and_skips_connectors() {
    let mut a = LayoutStore::new();
    let mut b = LayoutStore::new();
    assert_eq!(a.initialize(&graph_ids(), circle()).unwrap(), 4);
    b.initialize(&graph_ids(), circle()).unwrap();

    assert_eq!(a.len(), 4);
    assert!(!a.contains(&EntityId::edge("A", "B")));
    for (id, p) in a.iter() {
        assert_eq!(b.get(id).unwrap(), p.pos);
    }

    let top = a.get(&EntityId::node("A")).unwrap();
    assert!((top.x - 200.0).abs() < 1e-9);
    assert!((top.y - 100.0).abs() < 1e-9);
}

#[test]
fn initialize_keeps_existing_positions() {
    let mut store = LayoutStore::new();
    store.initialize(&graph_ids(), circle()).unwrap();
    store
        .pin(&EntityId::node("B"), Point::new(10.0, 20.0))
        .unwrap();
    store.unpin(&EntityId::node("B")).unwrap();

    assert_eq!(store.initialize(&graph_ids(), circle()).unwrap(), 0);
    assert_eq!(
        store.get(&EntityId::node("B")).unwrap(),
        Point::new(10.0, 20.0)
    );
}

#[test]
fn unknown_ids_are_reported() {
    let store = LayoutStore::new();
    let err = store.get(&EntityId::node("Z")).unwrap_err();
    assert!(matches!(err, VizError::UnknownEntity(_)));

    let mut store = LayoutStore::new();
    assert!(store.pin(&EntityId::cell(0), Point::ZERO).is_err());
    assert!(store.unpin(&EntityId::cell(0)).is_err());
}

#[test]
fn row_hint_places_cells_by_index() {
    let mut store = LayoutStore::new();
    let ids = vec![EntityId::cell(2), EntityId::cell(0), EntityId::cell(1)];
    store
        .initialize(
            &ids,
            LayoutHint::Row {
                origin: Point::new(40.0, 300.0),
                spacing: 50.0,
            },
        )
        .unwrap();
    assert_eq!(
        store.get(&EntityId::cell(2)).unwrap(),
        Point::new(140.0, 300.0)
    );
    assert_eq!(
        store.get(&EntityId::cell(0)).unwrap(),
        Point::new(40.0, 300.0)
    );
}

#[test]
fn tree_hint_uses_depth_and_midpoint() {
    let mut store = LayoutStore::new();
    let ids: Vec<EntityId> = crate::trace::state::merge_tree_ranges(4)
        .into_iter()
        .map(|(lo, hi)| EntityId::tree_node(lo, hi))
        .collect();
    store
        .initialize(
            &ids,
            LayoutHint::Tree {
                origin: Point::new(0.0, 10.0),
                cell: 20.0,
                level_gap: 50.0,
                len: 4,
            },
        )
        .unwrap();
    assert_eq!(
        store.get(&EntityId::tree_node(0, 4)).unwrap(),
        Point::new(40.0, 10.0)
    );
    assert_eq!(
        store.get(&EntityId::tree_node(2, 4)).unwrap(),
        Point::new(60.0, 60.0)
    );
    assert_eq!(
        store.get(&EntityId::tree_node(3, 4)).unwrap(),
        Point::new(70.0, 110.0)
    );

    let err = store
        .initialize(
            &[EntityId::tree_node(1, 3)],
            LayoutHint::Tree {
                origin: Point::ZERO,
                cell: 1.0,
                level_gap: 1.0,
                len: 4,
            },
        )
        .unwrap_err();
    assert!(err.to_string().contains("tree:1..3"));
}

#[test]
fn relax_moves_unpinned_bodies_only() {
    let mut store = LayoutStore::new();
    store.initialize(&graph_ids(), circle()).unwrap();
    let pinned = Point::new(200.0, 200.0);
    store.pin(&EntityId::node("A"), pinned).unwrap();
    let before = store.get(&EntityId::node("C")).unwrap();

    let links = vec![
        (EntityId::node("A"), EntityId::node("B")),
        (EntityId::node("A"), EntityId::node("Q")),
    ];
    let moved = store.relax(
        &mut ForceDirected::default(),
        &links,
        Rect::new(0.0, 0.0, 400.0, 400.0),
        10,
    );

    assert!(moved);
    assert_eq!(store.get(&EntityId::node("A")).unwrap(), pinned);
    assert!(store.placement(&EntityId::node("A")).unwrap().pinned);
    assert_ne!(store.get(&EntityId::node("C")).unwrap(), before);
}

#[test]
fn relax_with_zero_iterations_changes_nothing() {
    let mut store = LayoutStore::new();
    store.initialize(&graph_ids(), circle()).unwrap();
    let snapshot: Vec<_> = store.iter().map(|(id, p)| (id.clone(), *p)).collect();
    assert!(!store.relax(
        &mut ForceDirected::default(),
        &[],
        Rect::new(0.0, 0.0, 400.0, 400.0),
        0
    ));
    let after: Vec<_> = store.iter().map(|(id, p)| (id.clone(), *p)).collect();
    assert_eq!(snapshot, after);
}

#[test]
fn reset_forgets_positions() {
    let mut store = LayoutStore::new();
    store.initialize(&graph_ids(), circle()).unwrap();
    store.reset();
    assert!(store.is_empty());
    assert_eq!(store.initialize(&graph_ids(), circle()).unwrap(), 4);
}
