use super::*;

const ALL: [Family; 8] = [
    Family::GraphSearch,
    Family::ShortestPath,
    Family::AllPairs,
    Family::SpanningTree,
    Family::Sort,
    Family::Search,
    Family::LinkedList,
    Family::MergeTree,
];

#[test]
fn every_family_has_its_own_table() {
    for family in ALL {
        let cfg = FamilyConfig::for_family(family);
        assert_eq!(cfg.family, family);
        assert!(!cfg.precedence.is_empty());
    }
}

#[test]
fn overlays_never_rank_for_fill() {
    for family in ALL {
        let cfg = FamilyConfig::for_family(family);
        for c in cfg.overlays {
            assert_eq!(cfg.rank(*c), None, "{family}: {c}");
            assert!(cfg.allows(*c));
        }
    }
}

#[test]
fn sort_precedence_puts_swapped_over_comparing_over_sorted() {
    let cfg = FamilyConfig::for_family(Family::Sort);
    let rank = |c| cfg.rank(c).unwrap();
    assert!(rank(Category::Swapped) < rank(Category::Comparing));
    assert!(rank(Category::Comparing) < rank(Category::Sorted));
    assert!(rank(Category::Sorted) < rank(Category::Unsorted));
    assert!(cfg.allows_role(StaticRole::Pivot));
    assert!(!cfg.allows_role(StaticRole::Start));
    assert!(!cfg.allows(Category::Visited));
}
