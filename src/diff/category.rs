use std::collections::BTreeMap;
use std::fmt;

use crate::{foundation::ids::EntityId, trace::model::Family};

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
/// Step-scoped classification of one entity.
pub enum Category {
    /// Graph search: already expanded.
    Visited,
    /// Graph search: waiting in the queue or stack.
    Frontier,
    /// Vertex, cell or list node under the cursor.
    Current,
    /// Not reached yet.
    Unvisited,
    /// Shortest path: distance is final.
    Settled,
    /// Shortest path: endpoint of the edge being relaxed.
    RelaxedEndpoint,
    /// Shortest path: distance may still shrink.
    Unsettled,
    /// Cumulative value changed since the previous step.
    JustUpdated,
    /// All-pairs: row or column vertex of the pair under consideration.
    Active,
    /// Spanning tree: vertex already in the tree.
    InTree,
    /// Spanning tree: endpoint of the candidate edge outside the tree.
    Candidate,
    /// Sort: in final position.
    Sorted,
    /// Sort: one of the compared pair.
    Comparing,
    /// Sort: compared pair that was just swapped.
    Swapped,
    /// Sort: not yet in final position.
    Unsorted,
    /// Sort: outside the active sub-array.
    Inactive,
    /// Search: still inside the binary-search window.
    InWindow,
    /// Search: ruled out.
    Eliminated,
    /// Search or list: holds the target.
    Found,
    /// Merge tree: range already merged.
    Merged,
    /// Merge tree: range being split or merged right now.
    Working,
    /// Merge tree: range not processed yet.
    Pending,
    /// Entity with no special meaning this step.
    Idle,
    /// Graph search discovery edge, or list pointer already followed.
    TreeEdge,
    /// Shortest-path tree edge (`predecessor -> vertex`).
    PathEdge,
    /// Edge being relaxed right now.
    CurrentEdge,
    /// Spanning tree: accepted edge.
    MstEdge,
    /// Spanning tree: lightest crossing edge under consideration.
    CandidateEdge,
}

impl Category {
    /// Stable snake-case name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Visited => "visited",
            Self::Frontier => "frontier",
            Self::Current => "current",
            Self::Unvisited => "unvisited",
            Self::Settled => "settled",
            Self::RelaxedEndpoint => "relaxed_endpoint",
            Self::Unsettled => "unsettled",
            Self::JustUpdated => "just_updated",
            Self::Active => "active",
            Self::InTree => "in_tree",
            Self::Candidate => "candidate",
            Self::Sorted => "sorted",
            Self::Comparing => "comparing",
            Self::Swapped => "swapped",
            Self::Unsorted => "unsorted",
            Self::Inactive => "inactive",
            Self::InWindow => "in_window",
            Self::Eliminated => "eliminated",
            Self::Found => "found",
            Self::Merged => "merged",
            Self::Working => "working",
            Self::Pending => "pending",
            Self::Idle => "idle",
            Self::TreeEdge => "tree_edge",
            Self::PathEdge => "path_edge",
            Self::CurrentEdge => "current_edge",
            Self::MstEdge => "mst_edge",
            Self::CandidateEdge => "candidate_edge",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
/// Where a category came from.
pub enum Provenance {
    /// Stated by the step's state.
    Explicit,
    /// Derived by diffing cumulative state against the previous step.
    Inferred,
}

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
/// A category plus its provenance.
pub struct CategoryTag {
    /// Classification.
    pub category: Category,
    /// Explicit or inferred.
    pub provenance: Provenance,
}

impl CategoryTag {
    /// Tag stated by the trace.
    pub fn explicit(category: Category) -> Self {
        Self {
            category,
            provenance: Provenance::Explicit,
        }
    }

    /// Tag derived by diffing.
    pub fn inferred(category: Category) -> Self {
        Self {
            category,
            provenance: Provenance::Inferred,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
/// A cumulative state key whose value differs from the previous step.
pub enum UpdatedKey {
    /// `distances[node]` changed.
    Distance {
        /// Vertex label.
        node: String,
    },
    /// `predecessors[node]` changed.
    Predecessor {
        /// Vertex label.
        node: String,
    },
    /// `matrix[row][col]` changed.
    Cell {
        /// Row index in `input.nodes` order.
        row: usize,
        /// Column index in `input.nodes` order.
        col: usize,
    },
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// Categories of every entity drawn at one step.
pub struct CategoryAssignment {
    pub(crate) family: Family,
    pub(crate) index: usize,
    #[serde(serialize_with = "serialize_entries")]
    pub(crate) tags: BTreeMap<EntityId, Vec<CategoryTag>>,
    pub(crate) updated: Vec<UpdatedKey>,
}

fn serialize_entries<S: serde::Serializer>(
    tags: &BTreeMap<EntityId, Vec<CategoryTag>>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(tags.iter())
}

impl CategoryAssignment {
    pub(crate) fn new(family: Family, index: usize) -> Self {
        Self {
            family,
            index,
            tags: BTreeMap::new(),
            updated: Vec::new(),
        }
    }

    pub(crate) fn tag(&mut self, id: EntityId, tag: CategoryTag) {
        let tags = self.tags.entry(id).or_default();
        if !tags.contains(&tag) {
            tags.push(tag);
        }
    }

    /// Family whose vocabulary the tags come from.
    pub fn family(&self) -> Family {
        self.family
    }

    /// Step index this assignment describes.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Tags of `id`, empty if it is not drawn at this step.
    pub fn tags(&self, id: &EntityId) -> &[CategoryTag] {
        self.tags.get(id).map(Vec::as_slice).unwrap_or_default()
    }

    /// True if `id` carries `category` with any provenance.
    pub fn has(&self, id: &EntityId, category: Category) -> bool {
        self.tags(id).iter().any(|t| t.category == category)
    }

    /// True if any tag of `id` was inferred.
    pub fn is_inferred(&self, id: &EntityId) -> bool {
        self.tags(id)
            .iter()
            .any(|t| t.provenance == Provenance::Inferred)
    }

    /// Entities carrying `category`, in id order.
    pub fn with(&self, category: Category) -> Vec<&EntityId> {
        self.tags
            .iter()
            .filter(|(_, tags)| tags.iter().any(|t| t.category == category))
            .map(|(id, _)| id)
            .collect()
    }

    /// Every entity and its tags, in id order.
    pub fn iter(&self) -> impl Iterator<Item = (&EntityId, &[CategoryTag])> {
        self.tags.iter().map(|(id, t)| (id, t.as_slice()))
    }

    /// Number of entities.
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    /// True when no entity is drawn.
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Cumulative keys that differ from the previous step. Empty at step 0.
    pub fn updated(&self) -> &[UpdatedKey] {
        &self.updated
    }
}

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
/// Static role an entity plays at one step, independent of its category.
pub enum StaticRole {
    /// Quick-sort pivot.
    Pivot,
    /// Insertion-sort key.
    Key,
    /// Selection-sort running minimum.
    Min,
    /// Binary-search lower bound.
    Low,
    /// Binary-search upper bound.
    High,
    /// Binary-search midpoint.
    Mid,
    /// Floyd-Warshall intermediate vertex.
    Via,
    /// First node of a linked list.
    Head,
    /// Source vertex of a graph traversal.
    Start,
}

impl StaticRole {
    /// Stable snake-case name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Pivot => "pivot",
            Self::Key => "key",
            Self::Min => "min",
            Self::Low => "low",
            Self::High => "high",
            Self::Mid => "mid",
            Self::Via => "via",
            Self::Head => "head",
            Self::Start => "start",
        }
    }
}

impl fmt::Display for StaticRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
/// Roles held at one step. An entity holds at most one role; the first assigned wins.
pub struct RoleAssignment {
    #[serde(serialize_with = "serialize_roles")]
    pub(crate) roles: BTreeMap<EntityId, StaticRole>,
}

fn serialize_roles<S: serde::Serializer>(
    roles: &BTreeMap<EntityId, StaticRole>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(roles.iter())
}

impl RoleAssignment {
    pub(crate) fn assign(&mut self, id: EntityId, role: StaticRole) {
        self.roles.entry(id).or_insert(role);
    }

    /// Role of `id`, if any.
    pub fn get(&self, id: &EntityId) -> Option<StaticRole> {
        self.roles.get(id).copied()
    }

    /// Every role holder, in id order.
    pub fn iter(&self) -> impl Iterator<Item = (&EntityId, StaticRole)> {
        self.roles.iter().map(|(id, r)| (id, *r))
    }

    /// Number of role holders.
    pub fn len(&self) -> usize {
        self.roles.len()
    }

    /// True when no entity holds a role.
    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/diff/category.rs"]
mod tests;
