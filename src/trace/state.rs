//! Typed per-family step states.
//!
//! Traces are hand-authored JSON, so every field is optional on the wire and defaults to empty.
//! Unknown keys are ignored.

use std::collections::BTreeMap;
use std::fmt;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
/// Tentative path length. Traces write infinity as `null`, `"inf"`, `"Infinity"` or `"∞"`.
pub enum Distance {
    /// Known length.
    Finite(f64),
    /// Not reached yet.
    #[default]
    Infinite,
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Finite(v) if v.fract() == 0.0 && v.abs() < 1e15 => write!(f, "{}", v as i64),
            Self::Finite(v) => write!(f, "{v:.2}"),
            Self::Infinite => f.write_str("∞"),
        }
    }
}

impl serde::Serialize for Distance {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match *self {
            Self::Finite(v) => serializer.serialize_f64(v),
            Self::Infinite => serializer.serialize_none(),
        }
    }
}

impl<'de> serde::Deserialize<'de> for Distance {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(serde::Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Num(f64),
            Str(String),
        }

        match Option::<Repr>::deserialize(deserializer)? {
            None => Ok(Self::Infinite),
            Some(Repr::Num(v)) if v.is_finite() => Ok(Self::Finite(v)),
            Some(Repr::Num(_)) => Ok(Self::Infinite),
            Some(Repr::Str(s)) => match s.trim() {
                "inf" | "Infinity" | "infinity" | "∞" => Ok(Self::Infinite),
                other => Err(serde::de::Error::custom(format!(
                    "distance must be a number or infinity marker, got '{other}'"
                ))),
            },
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
/// BFS/DFS state.
pub struct GraphSearchState {
    /// BFS frontier, front first.
    pub queue: Vec<String>,
    /// DFS frontier, bottom first.
    pub stack: Vec<String>,
    /// Visited vertices in visit order.
    pub visited: Vec<String>,
    /// Vertex being expanded.
    pub current: Option<String>,
    /// Discovery tree (`child -> parent`).
    #[serde(alias = "parents", alias = "predecessors")]
    pub parent: BTreeMap<String, Option<String>>,
}

impl GraphSearchState {
    /// Queue and stack members.
    pub fn frontier(&self) -> impl Iterator<Item = &String> {
        self.queue.iter().chain(self.stack.iter())
    }
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
/// Bellman-Ford/Dijkstra state. `distances` and `predecessors` are cumulative.
pub struct ShortestPathState {
    /// Tentative distance per vertex.
    #[serde(alias = "dist")]
    pub distances: BTreeMap<String, Distance>,
    /// Shortest-path tree (`vertex -> predecessor`).
    #[serde(alias = "pred", alias = "previous")]
    pub predecessors: BTreeMap<String, Option<String>>,
    /// Vertices whose distance is final.
    #[serde(alias = "visited")]
    pub settled: Vec<String>,
    /// Edge being relaxed.
    pub current_edge: Option<(String, String)>,
    /// Bellman-Ford pass number.
    pub iteration: Option<u32>,
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
/// Floyd-Warshall state. `matrix` is cumulative and indexed by `input.nodes` order.
pub struct MatrixState {
    /// Distance matrix.
    #[serde(alias = "dist")]
    pub matrix: Vec<Vec<Distance>>,
    /// Intermediate vertex index.
    pub k: Option<usize>,
    /// Row under consideration.
    pub i: Option<usize>,
    /// Column under consideration.
    pub j: Option<usize>,
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
/// Prim state.
pub struct SpanningTreeState {
    /// Vertices already in the tree.
    #[serde(alias = "visited")]
    pub in_tree: Vec<String>,
    /// Accepted tree edges.
    pub mst_edges: Vec<(String, String)>,
    /// Lightest crossing edge under consideration.
    pub candidate_edge: Option<(String, String)>,
    /// Running tree weight.
    pub total_weight: Option<f64>,
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
/// Comparison-sort state, shared by the bar and recursion-tree diagrams.
pub struct SortState {
    /// Array snapshot.
    pub array: Vec<i64>,
    /// Indices being compared.
    pub comparing: Vec<usize>,
    /// Whether the compared pair was just swapped.
    pub swapped: bool,
    /// Indices in final position.
    pub sorted: Vec<usize>,
    /// Quick-sort pivot index.
    #[serde(alias = "pivot_index")]
    pub pivot: Option<usize>,
    /// Insertion-sort key index.
    #[serde(alias = "key_index")]
    pub key: Option<usize>,
    /// Selection-sort running minimum index.
    #[serde(alias = "min_index")]
    pub min: Option<usize>,
    /// Active sub-array `[lo, hi)`.
    pub range: Option<(usize, usize)>,
    /// Merge-sort left run.
    pub left: Vec<i64>,
    /// Merge-sort right run.
    pub right: Vec<i64>,
    /// Merge-sort ranges already merged.
    pub merged: Vec<(usize, usize)>,
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
/// Linear/binary search state.
pub struct SearchState {
    /// Array snapshot. Defaults to `input.array`.
    pub array: Option<Vec<i64>>,
    /// Index being inspected by a linear scan.
    pub current: Option<usize>,
    /// Binary-search lower bound (inclusive).
    pub low: Option<usize>,
    /// Binary-search upper bound (inclusive).
    pub high: Option<usize>,
    /// Binary-search midpoint.
    pub mid: Option<usize>,
    /// Indices already ruled out.
    pub checked: Vec<usize>,
    /// Index holding the target, once found.
    pub found: Option<usize>,
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
/// Linked-list traversal state.
pub struct ListState {
    /// Node under the cursor.
    pub current: Option<String>,
    /// Nodes already passed.
    pub visited: Vec<String>,
    /// Node holding the target, once found.
    pub found: Option<String>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(untagged)]
/// Structured state of one step, typed by family.
pub enum StepState {
    /// BFS/DFS.
    GraphSearch(GraphSearchState),
    /// Bellman-Ford/Dijkstra.
    ShortestPath(ShortestPathState),
    /// Floyd-Warshall.
    AllPairs(MatrixState),
    /// Prim.
    SpanningTree(SpanningTreeState),
    /// Sorts, drawn as bars or as a merge tree.
    Sort(SortState),
    /// Linear/binary search.
    Search(SearchState),
    /// Linked-list traversal.
    LinkedList(ListState),
}

impl SearchState {
    /// The array this step searches: its own snapshot, or the trace input.
    pub fn array_or<'a>(&'a self, input: &'a [i64]) -> &'a [i64] {
        self.array.as_deref().unwrap_or(input)
    }
}

/// Ranges of the merge-sort recursion tree over `len` elements, in pre-order.
///
/// A range `[lo, hi)` with more than one element splits at `lo + (hi - lo) / 2`.
pub fn merge_tree_ranges(len: usize) -> Vec<(usize, usize)> {
    let mut out = Vec::new();
    if len == 0 {
        return out;
    }
    let mut stack = vec![(0usize, len)];
    while let Some((lo, hi)) = stack.pop() {
        out.push((lo, hi));
        if hi - lo > 1 {
            let mid = lo + (hi - lo) / 2;
            stack.push((mid, hi));
            stack.push((lo, mid));
        }
    }
    out
}

/// Parent/child pairs of the merge-sort recursion tree over `len` elements.
pub fn merge_tree_branches(len: usize) -> Vec<((usize, usize), (usize, usize))> {
    merge_tree_ranges(len)
        .into_iter()
        .filter(|(lo, hi)| hi - lo > 1)
        .flat_map(|(lo, hi)| {
            let mid = lo + (hi - lo) / 2;
            [((lo, hi), (lo, mid)), ((lo, hi), (mid, hi))]
        })
        .collect()
}

/// Depth of `[lo, hi)` in the recursion tree over `len` elements, if it is a tree node.
pub fn merge_tree_depth(len: usize, range: (usize, usize)) -> Option<usize> {
    let (mut lo, mut hi) = (0usize, len);
    let mut depth = 0usize;
    loop {
        if (lo, hi) == range {
            return Some(depth);
        }
        if hi - lo <= 1 || range.0 < lo || range.1 > hi {
            return None;
        }
        let mid = lo + (hi - lo) / 2;
        if range.1 <= mid {
            hi = mid;
        } else if range.0 >= mid {
            lo = mid;
        } else {
            return None;
        }
        depth += 1;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/trace/state.rs"]
mod tests;
