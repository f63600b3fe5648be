use crate::{
    diff::category::{Category, StaticRole},
    trace::model::Family,
};

use Category as C;
use StaticRole as R;

/// Per-family encoding table.
///
/// `precedence` lists the family's whole fill vocabulary, highest priority first; when an
/// entity carries several categories the first one found in this list paints its fill.
/// Categories in `overlays` never paint fill; they only change the stroke channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FamilyConfig {
    /// Family described by this table.
    pub family: Family,
    /// Fill categories, highest priority first.
    pub precedence: &'static [Category],
    /// Stroke-only categories.
    pub overlays: &'static [Category],
    /// Roles the family may assign.
    pub roles: &'static [StaticRole],
    /// Whether a role overrides the category fill (sorts, searches) or only adds a caption.
    pub role_fill: bool,
    /// Fill categories that keep their color even when `role_fill` is set.
    pub role_yields_to: &'static [Category],
}

const GRAPH_SEARCH: FamilyConfig = FamilyConfig {
    family: Family::GraphSearch,
    precedence: &[
        C::Current,
        C::Frontier,
        C::Visited,
        C::Unvisited,
        C::TreeEdge,
        C::Idle,
    ],
    overlays: &[],
    roles: &[R::Start],
    role_fill: false,
    role_yields_to: &[],
};

const SHORTEST_PATH: FamilyConfig = FamilyConfig {
    family: Family::ShortestPath,
    precedence: &[
        C::RelaxedEndpoint,
        C::Settled,
        C::Unsettled,
        C::CurrentEdge,
        C::PathEdge,
        C::Idle,
    ],
    overlays: &[C::JustUpdated],
    roles: &[R::Start],
    role_fill: false,
    role_yields_to: &[],
};

const ALL_PAIRS: FamilyConfig = FamilyConfig {
    family: Family::AllPairs,
    precedence: &[C::Active, C::CurrentEdge, C::Idle],
    overlays: &[C::JustUpdated],
    roles: &[R::Via],
    role_fill: true,
    role_yields_to: &[],
};

const SPANNING_TREE: FamilyConfig = FamilyConfig {
    family: Family::SpanningTree,
    precedence: &[
        C::Candidate,
        C::InTree,
        C::Unvisited,
        C::CandidateEdge,
        C::MstEdge,
        C::Idle,
    ],
    overlays: &[],
    roles: &[R::Start],
    role_fill: false,
    role_yields_to: &[],
};

const SORT: FamilyConfig = FamilyConfig {
    family: Family::Sort,
    precedence: &[
        C::Swapped,
        C::Comparing,
        C::Sorted,
        C::Inactive,
        C::Unsorted,
    ],
    overlays: &[],
    roles: &[R::Pivot, R::Key, R::Min],
    role_fill: true,
    role_yields_to: &[],
};

const SEARCH: FamilyConfig = FamilyConfig {
    family: Family::Search,
    precedence: &[
        C::Found,
        C::Current,
        C::Eliminated,
        C::InWindow,
        C::Unvisited,
    ],
    overlays: &[],
    roles: &[R::Mid, R::Low, R::High],
    role_fill: true,
    role_yields_to: &[C::Found],
};

const LINKED_LIST: FamilyConfig = FamilyConfig {
    family: Family::LinkedList,
    precedence: &[
        C::Found,
        C::Current,
        C::Visited,
        C::Unvisited,
        C::TreeEdge,
        C::Idle,
    ],
    overlays: &[],
    roles: &[R::Head],
    role_fill: false,
    role_yields_to: &[],
};

const MERGE_TREE: FamilyConfig = FamilyConfig {
    family: Family::MergeTree,
    precedence: &[C::Working, C::Merged, C::Pending, C::Idle],
    overlays: &[],
    roles: &[],
    role_fill: false,
    role_yields_to: &[],
};

impl FamilyConfig {
    /// Table for `family`.
    pub fn for_family(family: Family) -> &'static FamilyConfig {
        match family {
            Family::GraphSearch => &GRAPH_SEARCH,
            Family::ShortestPath => &SHORTEST_PATH,
            Family::AllPairs => &ALL_PAIRS,
            Family::SpanningTree => &SPANNING_TREE,
            Family::Sort => &SORT,
            Family::Search => &SEARCH,
            Family::LinkedList => &LINKED_LIST,
            Family::MergeTree => &MERGE_TREE,
        }
    }

    /// True if `category` belongs to this family's vocabulary.
    pub fn allows(&self, category: Category) -> bool {
        self.precedence.contains(&category) || self.overlays.contains(&category)
    }

    /// True if this family may assign `role`.
    pub fn allows_role(&self, role: StaticRole) -> bool {
        self.roles.contains(&role)
    }

    /// Fill rank of `category`; lower wins. `None` for overlays and foreign categories.
    pub fn rank(&self, category: Category) -> Option<usize> {
        self.precedence.iter().position(|c| *c == category)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/family.rs"]
mod tests;
