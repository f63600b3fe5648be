use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::{
    foundation::error::{VizError, VizResult},
    foundation::ids::EntityId,
    trace::schema::{TraceDef, validate_trace},
    trace::state::StepState,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
/// Algorithm that produced a trace.
pub enum Algorithm {
    /// Breadth-first search.
    Bfs,
    /// Depth-first search.
    Dfs,
    /// Bellman-Ford single-source shortest paths.
    BellmanFord,
    /// Dijkstra single-source shortest paths.
    Dijkstra,
    /// Floyd-Warshall all-pairs shortest paths.
    FloydWarshall,
    /// Prim's minimum spanning tree.
    Prim,
    /// Linear scan for a target value.
    LinearSearch,
    /// Binary search over a sorted array.
    BinarySearch,
    /// Bubble sort.
    BubbleSort,
    /// Selection sort.
    SelectionSort,
    /// Insertion sort.
    InsertionSort,
    /// Quick sort.
    QuickSort,
    /// Merge sort.
    MergeSort,
    /// Pointer walk over a singly linked list.
    LinkedListTraversal,
}

impl Algorithm {
    /// Diagram used when the trace does not choose one.
    pub fn default_diagram(self) -> Diagram {
        match self {
            Self::Bfs
            | Self::Dfs
            | Self::BellmanFord
            | Self::Dijkstra
            | Self::FloydWarshall
            | Self::Prim => Diagram::Graph,
            Self::LinearSearch
            | Self::BinarySearch
            | Self::BubbleSort
            | Self::SelectionSort
            | Self::InsertionSort
            | Self::QuickSort => Diagram::Bars,
            Self::MergeSort => Diagram::Tree,
            Self::LinkedListTraversal => Diagram::LinkedList,
        }
    }

    /// Family for this algorithm drawn as `diagram`, or `None` if the pair is unsupported.
    pub fn family(self, diagram: Diagram) -> Option<Family> {
        let family = match (self, diagram) {
            (Self::Bfs | Self::Dfs, Diagram::Graph) => Family::GraphSearch,
            (Self::BellmanFord | Self::Dijkstra, Diagram::Graph) => Family::ShortestPath,
            (Self::FloydWarshall, Diagram::Graph) => Family::AllPairs,
            (Self::Prim, Diagram::Graph) => Family::SpanningTree,
            (Self::LinearSearch | Self::BinarySearch, Diagram::Bars) => Family::Search,
            (
                Self::BubbleSort
                | Self::SelectionSort
                | Self::InsertionSort
                | Self::QuickSort
                | Self::MergeSort,
                Diagram::Bars,
            ) => Family::Sort,
            (Self::MergeSort, Diagram::Tree) => Family::MergeTree,
            (Self::LinkedListTraversal, Diagram::LinkedList) => Family::LinkedList,
            _ => return None,
        };
        Some(family)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
/// Diagram shape a trace is drawn as.
pub enum Diagram {
    /// Node-link graph with force layout.
    Graph,
    /// Array of vertical bars.
    Bars,
    /// Recursion tree.
    Tree,
    /// Boxes joined by `next` arrows.
    LinkedList,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
/// Group of algorithms sharing one state shape, category vocabulary and style table.
pub enum Family {
    /// BFS/DFS.
    GraphSearch,
    /// Single-source shortest paths.
    ShortestPath,
    /// All-pairs shortest paths over a distance matrix.
    AllPairs,
    /// Minimum spanning tree growth.
    SpanningTree,
    /// Comparison sorts drawn as bars.
    Sort,
    /// Array search routines.
    Search,
    /// Linked-list traversal.
    LinkedList,
    /// Merge sort drawn as its recursion tree.
    MergeTree,
}

impl Family {
    /// Stable snake-case name.
    pub fn name(self) -> &'static str {
        match self {
            Self::GraphSearch => "graph_search",
            Self::ShortestPath => "shortest_path",
            Self::AllPairs => "all_pairs",
            Self::SpanningTree => "spanning_tree",
            Self::Sort => "sort",
            Self::Search => "search",
            Self::LinkedList => "linked_list",
            Self::MergeTree => "merge_tree",
        }
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
/// Narration detail level. Each step carries one action string per level.
pub enum DetailLevel {
    /// Plain-language narration.
    #[default]
    Beginner,
    /// Narration with invariants and complexity notes.
    Advanced,
}

impl DetailLevel {
    /// Number of levels every step must provide.
    pub const COUNT: usize = 2;

    /// Position of this level inside `Step::actions`.
    pub fn index(self) -> usize {
        match self {
            Self::Beginner => 0,
            Self::Advanced => 1,
        }
    }

    /// The other level.
    pub fn toggled(self) -> Self {
        match self {
            Self::Beginner => Self::Advanced,
            Self::Advanced => Self::Beginner,
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// Graph edge from `input.edges`.
pub struct EdgeDef {
    /// Source label.
    pub from: String,
    /// Target label.
    pub to: String,
    /// Optional weight.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
}

impl<'de> serde::Deserialize<'de> for EdgeDef {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(serde::Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Obj {
                from: String,
                to: String,
                #[serde(default)]
                weight: Option<f64>,
            },
            Pair(String, String),
            Weighted(String, String, f64),
        }

        Ok(match Repr::deserialize(deserializer)? {
            Repr::Obj { from, to, weight } => Self { from, to, weight },
            Repr::Pair(from, to) => Self {
                from,
                to,
                weight: None,
            },
            Repr::Weighted(from, to, w) => Self {
                from,
                to,
                weight: Some(w),
            },
        })
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Linked-list node from `input.list`.
pub struct ListNodeDef {
    /// Stable node id.
    pub id: String,
    /// Stored value.
    pub value: i64,
    /// Id of the following node, `None` at the tail.
    #[serde(default)]
    pub next: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
/// Initial problem instance. Which fields are meaningful depends on the family.
pub struct TraceInput {
    /// Graph vertex labels, in matrix order for all-pairs traces.
    pub nodes: Vec<String>,
    /// Graph edges.
    pub edges: Vec<EdgeDef>,
    /// Whether edges are one-way.
    pub directed: bool,
    /// Initial array for sorts and searches.
    pub array: Vec<i64>,
    /// Linked-list nodes.
    pub list: Vec<ListNodeDef>,
    /// Value searched for.
    pub target: Option<i64>,
    /// Start vertex for graph traversals.
    pub start: Option<String>,
}

impl TraceInput {
    /// True if `label` names a vertex.
    pub fn has_node(&self, label: &str) -> bool {
        self.nodes.iter().any(|n| n == label)
    }

    /// Matrix index of a vertex.
    pub fn node_index(&self, label: &str) -> Option<usize> {
        self.nodes.iter().position(|n| n == label)
    }

    /// Entity id of the edge joining `a` and `b`, honoring direction.
    pub fn edge_between(&self, a: &str, b: &str) -> Option<EntityId> {
        self.edges
            .iter()
            .find(|e| {
                (e.from == a && e.to == b) || (!self.directed && e.from == b && e.to == a)
            })
            .map(|e| EntityId::edge(e.from.clone(), e.to.clone()))
    }

    /// Weight of the edge joining `a` and `b`, if any.
    pub fn weight_between(&self, a: &str, b: &str) -> Option<f64> {
        self.edges
            .iter()
            .find(|e| {
                (e.from == a && e.to == b) || (!self.directed && e.from == b && e.to == a)
            })
            .and_then(|e| e.weight)
    }

    /// True if `id` names a list node.
    pub fn has_list_node(&self, id: &str) -> bool {
        self.list.iter().any(|n| n.id == id)
    }

    /// The list node no other node points at.
    pub fn list_head(&self) -> Option<&ListNodeDef> {
        self.list
            .iter()
            .find(|n| !self.list.iter().any(|m| m.next.as_deref() == Some(n.id.as_str())))
    }

    /// List nodes in chain order from the head, then any node the chain never reaches.
    pub fn list_chain(&self) -> Vec<&ListNodeDef> {
        let mut seen = std::collections::BTreeSet::new();
        let mut out = Vec::with_capacity(self.list.len());
        let mut at = self.list_head();
        while let Some(node) = at {
            if !seen.insert(node.id.as_str()) {
                break;
            }
            out.push(node);
            at = node
                .next
                .as_deref()
                .and_then(|next| self.list.iter().find(|n| n.id == next));
        }
        out.extend(self.list.iter().filter(|n| !seen.contains(n.id.as_str())));
        out
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// One point-in-time snapshot of the algorithm.
pub struct Step {
    /// 1-based ordinal, strictly increasing across the trace.
    pub number: u32,
    /// Narration text, one entry per [`DetailLevel`].
    pub actions: Vec<String>,
    /// Family-specific structured state.
    pub state: StepState,
    /// Entity the algorithm touches next, if hinted.
    pub next_suggestion: Option<EntityId>,
}

impl Step {
    /// Narration text for `level`.
    pub fn action(&self, level: DetailLevel) -> &str {
        self.actions
            .get(level.index())
            .map(String::as_str)
            .unwrap_or_default()
    }
}

#[derive(Clone, Debug, serde::Serialize)]
/// Validated, immutable step trace for one algorithm run.
///
/// Construct it with [`StepTrace::from_json_str`], [`StepTrace::from_reader`],
/// [`StepTrace::from_path`] or [`crate::TraceBuilder`]. Every constructor runs the schema
/// validator, so a `StepTrace` value is always internally consistent.
pub struct StepTrace {
    pub(crate) algorithm: Algorithm,
    pub(crate) diagram: Diagram,
    pub(crate) family: Family,
    pub(crate) title: Option<String>,
    pub(crate) input: TraceInput,
    pub(crate) steps: Vec<Step>,
}

impl StepTrace {
    /// Parse and validate a trace from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> VizResult<Self> {
        let def: TraceDef = serde_json::from_reader(r)
            .map_err(|e| VizError::schema(format!("parse trace JSON: {e}")))?;
        Self::from_def(def)
    }

    /// Parse and validate a trace from a JSON string.
    pub fn from_json_str(s: &str) -> VizResult<Self> {
        let def: TraceDef = serde_json::from_str(s)
            .map_err(|e| VizError::schema(format!("parse trace JSON: {e}")))?;
        Self::from_def(def)
    }

    /// Parse and validate a trace from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> VizResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            VizError::schema(format!("open trace JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    pub(crate) fn from_def(def: TraceDef) -> VizResult<Self> {
        validate_trace(def).map_err(|e| VizError::schema(format!("trace validation failed: {e}")))
    }

    /// Producing algorithm.
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Diagram shape.
    pub fn diagram(&self) -> Diagram {
        self.diagram
    }

    /// Algorithm family.
    pub fn family(&self) -> Family {
        self.family
    }

    /// Optional display title.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Initial problem instance.
    pub fn input(&self) -> &TraceInput {
        &self.input
    }

    /// All steps in order. Never empty.
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Number of steps.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Always false for a validated trace.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Index of the terminal step.
    pub fn last_index(&self) -> usize {
        self.steps.len().saturating_sub(1)
    }

    /// Step at `index`, failing with [`VizError::IndexOutOfRange`] outside `[0, len)`.
    pub fn step(&self, index: usize) -> VizResult<&Step> {
        self.steps
            .get(index)
            .ok_or_else(|| VizError::index_out_of_range(index as i64, self.steps.len()))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/trace/model.rs"]
mod tests;
