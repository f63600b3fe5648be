use std::collections::HashSet;
use std::fmt;

use crate::{
    foundation::ids::EntityId,
    trace::model::{Algorithm, DetailLevel, Diagram, Family, Step, StepTrace, TraceInput},
    trace::state::{
        GraphSearchState, ListState, MatrixState, SearchState, ShortestPathState, SortState,
        SpanningTreeState, StepState, merge_tree_depth,
    },
};

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
/// JSON-facing trace document, before validation.
pub(crate) struct TraceDef {
    pub(crate) algorithm: Algorithm,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) diagram: Option<Diagram>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) title: Option<String>,
    #[serde(default)]
    pub(crate) input: TraceInput,
    #[serde(default)]
    pub(crate) steps: Vec<StepDef>,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub(crate) struct StepDef {
    #[serde(alias = "stepNumber")]
    pub(crate) step_number: i64,
    pub(crate) actions: Vec<String>,
    #[serde(default)]
    pub(crate) state: serde_json::Value,
    #[serde(default, alias = "nextSuggestion")]
    pub(crate) next_suggestion: serde_json::Value,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum SchemaPathElem {
    Field(&'static str),
    Index(usize),
}

#[derive(Debug, Clone)]
pub(crate) struct SchemaError {
    pub(crate) path: Vec<SchemaPathElem>,
    pub(crate) message: String,
}

impl SchemaError {
    fn at(path: &[SchemaPathElem], message: impl Into<String>) -> Self {
        Self {
            path: path.to_vec(),
            message: message.into(),
        }
    }
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            return write!(f, "{}", self.message);
        }
        write!(f, "{}: {}", format_path(&self.path), self.message)
    }
}

fn format_path(path: &[SchemaPathElem]) -> String {
    let mut s = String::from("$");
    for p in path {
        match *p {
            SchemaPathElem::Field(name) => {
                s.push('.');
                s.push_str(name);
            }
            SchemaPathElem::Index(i) => {
                s.push('[');
                s.push_str(&i.to_string());
                s.push(']');
            }
        }
    }
    s
}

#[derive(Debug, Clone)]
pub(crate) struct SchemaErrors {
    pub(crate) errors: Vec<SchemaError>,
}

impl fmt::Display for SchemaErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, e) in self.errors.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{e}")?;
        }
        Ok(())
    }
}

impl std::error::Error for SchemaErrors {}

/// Prefix for nested schema paths.
struct PathCursor<'a> {
    base: &'a [SchemaPathElem],
}

impl PathCursor<'_> {
    fn with(&self, extra: &[SchemaPathElem]) -> Vec<SchemaPathElem> {
        let mut v = self.base.to_vec();
        v.extend_from_slice(extra);
        v
    }
}

use SchemaPathElem::{Field, Index};

pub(crate) fn validate_trace(def: TraceDef) -> Result<StepTrace, SchemaErrors> {
    let mut errors = Vec::new();

    let diagram = def
        .diagram
        .unwrap_or_else(|| def.algorithm.default_diagram());
    let Some(family) = def.algorithm.family(diagram) else {
        errors.push(SchemaError::at(
            &[Field("diagram")],
            format!("{:?} cannot be drawn as {:?}", def.algorithm, diagram),
        ));
        return Err(SchemaErrors { errors });
    };

    validate_input(family, &def.input, &mut errors);

    if def.steps.is_empty() {
        errors.push(SchemaError::at(&[Field("steps")], "steps must be non-empty"));
    }

    let mut steps = Vec::with_capacity(def.steps.len());
    let mut prev_number = 0i64;
    for (idx, sd) in def.steps.into_iter().enumerate() {
        let base = [Field("steps"), Index(idx)];
        let path = PathCursor { base: &base };

        if idx == 0 && sd.step_number != 1 {
            errors.push(SchemaError::at(
                &path.with(&[Field("step_number")]),
                format!("first step_number must be 1, got {}", sd.step_number),
            ));
        } else if idx > 0 && sd.step_number <= prev_number {
            errors.push(SchemaError::at(
                &path.with(&[Field("step_number")]),
                format!(
                    "step_number must be strictly increasing (previous {prev_number}, got {})",
                    sd.step_number
                ),
            ));
        }
        prev_number = sd.step_number;
        let number = match u32::try_from(sd.step_number) {
            Ok(n) => n,
            Err(_) => {
                errors.push(SchemaError::at(
                    &path.with(&[Field("step_number")]),
                    format!("step_number {} is out of range", sd.step_number),
                ));
                0
            }
        };

        if sd.actions.len() != DetailLevel::COUNT {
            errors.push(SchemaError::at(
                &path.with(&[Field("actions")]),
                format!(
                    "actions must have exactly {} entries (one per detail level), got {}",
                    DetailLevel::COUNT,
                    sd.actions.len()
                ),
            ));
        }

        let state_path = path.with(&[Field("state")]);
        let state = match parse_state(family, sd.state) {
            Ok(s) => s,
            Err(e) => {
                errors.push(SchemaError::at(&state_path, format!("invalid state: {e}")));
                continue;
            }
        };
        check_state_refs(&def.input, &state, &state_path, family, &mut errors);

        let next_suggestion = match resolve_suggestion(family, &def.input, &state, &sd.next_suggestion)
        {
            Ok(s) => s,
            Err(msg) => {
                errors.push(SchemaError::at(&path.with(&[Field("next_suggestion")]), msg));
                None
            }
        };

        steps.push(Step {
            number,
            actions: sd.actions,
            state,
            next_suggestion,
        });
    }

    if !errors.is_empty() {
        return Err(SchemaErrors { errors });
    }

    Ok(StepTrace {
        algorithm: def.algorithm,
        diagram,
        family,
        title: def.title,
        input: def.input,
        steps,
    })
}

fn validate_input(family: Family, input: &TraceInput, errors: &mut Vec<SchemaError>) {
    let mut seen = HashSet::<&str>::new();
    for (i, n) in input.nodes.iter().enumerate() {
        if !seen.insert(n.as_str()) {
            errors.push(SchemaError::at(
                &[Field("input"), Field("nodes"), Index(i)],
                format!("duplicate node label '{n}'"),
            ));
        }
    }
    let mut edge_keys = HashSet::<(&str, &str)>::new();
    for (i, e) in input.edges.iter().enumerate() {
        let (a, b) = (e.from.as_str(), e.to.as_str());
        let key = if input.directed || a <= b { (a, b) } else { (b, a) };
        if !edge_keys.insert(key) {
            errors.push(SchemaError::at(
                &[Field("input"), Field("edges"), Index(i)],
                format!("duplicate edge '{a}' -> '{b}'"),
            ));
        }
        for endpoint in [&e.from, &e.to] {
            if !input.has_node(endpoint) {
                errors.push(SchemaError::at(
                    &[Field("input"), Field("edges"), Index(i)],
                    format!("edge endpoint '{endpoint}' is not a node"),
                ));
            }
        }
    }
    if let Some(start) = &input.start
        && !input.has_node(start)
    {
        errors.push(SchemaError::at(
            &[Field("input"), Field("start")],
            format!("start node '{start}' is not a node"),
        ));
    }

    let mut list_ids = HashSet::<&str>::new();
    for (i, n) in input.list.iter().enumerate() {
        if !list_ids.insert(n.id.as_str()) {
            errors.push(SchemaError::at(
                &[Field("input"), Field("list"), Index(i)],
                format!("duplicate list node id '{}'", n.id),
            ));
        }
    }
    for (i, n) in input.list.iter().enumerate() {
        if let Some(next) = &n.next
            && !input.has_list_node(next)
        {
            errors.push(SchemaError::at(
                &[Field("input"), Field("list"), Index(i), Field("next")],
                format!("next pointer '{next}' is not a list node"),
            ));
        }
    }

    match family {
        Family::GraphSearch
        | Family::ShortestPath
        | Family::AllPairs
        | Family::SpanningTree => {
            if input.nodes.is_empty() {
                errors.push(SchemaError::at(
                    &[Field("input"), Field("nodes")],
                    "graph traces need at least one node",
                ));
            }
        }
        Family::LinkedList => {
            if input.list.is_empty() {
                errors.push(SchemaError::at(
                    &[Field("input"), Field("list")],
                    "linked-list traces need at least one list node",
                ));
            }
        }
        Family::MergeTree => {
            if input.array.is_empty() {
                errors.push(SchemaError::at(
                    &[Field("input"), Field("array")],
                    "merge-tree traces need a non-empty input array",
                ));
            }
        }
        Family::Sort | Family::Search => {}
    }
}

fn parse_state(family: Family, value: serde_json::Value) -> Result<StepState, serde_json::Error> {
    let value = if value.is_null() {
        serde_json::Value::Object(serde_json::Map::new())
    } else {
        value
    };
    Ok(match family {
        Family::GraphSearch => {
            StepState::GraphSearch(serde_json::from_value::<GraphSearchState>(value)?)
        }
        Family::ShortestPath => {
            StepState::ShortestPath(serde_json::from_value::<ShortestPathState>(value)?)
        }
        Family::AllPairs => StepState::AllPairs(serde_json::from_value::<MatrixState>(value)?),
        Family::SpanningTree => {
            StepState::SpanningTree(serde_json::from_value::<SpanningTreeState>(value)?)
        }
        Family::Sort | Family::MergeTree => {
            StepState::Sort(serde_json::from_value::<SortState>(value)?)
        }
        Family::Search => StepState::Search(serde_json::from_value::<SearchState>(value)?),
        Family::LinkedList => StepState::LinkedList(serde_json::from_value::<ListState>(value)?),
    })
}

fn check_state_refs(
    input: &TraceInput,
    state: &StepState,
    path: &[SchemaPathElem],
    family: Family,
    errors: &mut Vec<SchemaError>,
) {
    let path = PathCursor { base: path };
    let node = |field: &'static str, label: &str, errors: &mut Vec<SchemaError>| {
        if !input.has_node(label) {
            errors.push(SchemaError::at(
                &path.with(&[Field(field)]),
                format!("'{label}' is not a node of the input graph"),
            ));
        }
    };

    match state {
        StepState::GraphSearch(s) => {
            for n in s.queue.iter() {
                node("queue", n, errors);
            }
            for n in s.stack.iter() {
                node("stack", n, errors);
            }
            for n in s.visited.iter() {
                node("visited", n, errors);
            }
            if let Some(n) = &s.current {
                node("current", n, errors);
            }
            for (child, parent) in &s.parent {
                node("parent", child, errors);
                if let Some(p) = parent {
                    node("parent", p, errors);
                }
            }
        }
        StepState::ShortestPath(s) => {
            for n in s.distances.keys() {
                node("distances", n, errors);
            }
            for (n, p) in &s.predecessors {
                node("predecessors", n, errors);
                if let Some(p) = p {
                    node("predecessors", p, errors);
                }
            }
            for n in s.settled.iter() {
                node("settled", n, errors);
            }
            if let Some((a, b)) = &s.current_edge
                && input.edge_between(a, b).is_none()
            {
                errors.push(SchemaError::at(
                    &path.with(&[Field("current_edge")]),
                    format!("no input edge joins '{a}' and '{b}'"),
                ));
            }
        }
        StepState::AllPairs(s) => {
            let n = input.nodes.len();
            if s.matrix.len() != n {
                errors.push(SchemaError::at(
                    &path.with(&[Field("matrix")]),
                    format!("matrix must have {n} rows, got {}", s.matrix.len()),
                ));
            }
            for (r, row) in s.matrix.iter().enumerate() {
                if row.len() != n {
                    errors.push(SchemaError::at(
                        &path.with(&[Field("matrix"), Index(r)]),
                        format!("matrix row must have {n} columns, got {}", row.len()),
                    ));
                }
            }
            for (field, v) in [("k", s.k), ("i", s.i), ("j", s.j)] {
                if let Some(v) = v
                    && v >= n
                {
                    errors.push(SchemaError::at(
                        &path.with(&[Field(field)]),
                        format!("vertex index {v} out of range for {n} nodes"),
                    ));
                }
            }
        }
        StepState::SpanningTree(s) => {
            for n in s.in_tree.iter() {
                node("in_tree", n, errors);
            }
            for (i, (a, b)) in s.mst_edges.iter().enumerate() {
                if input.edge_between(a, b).is_none() {
                    errors.push(SchemaError::at(
                        &path.with(&[Field("mst_edges"), Index(i)]),
                        format!("no input edge joins '{a}' and '{b}'"),
                    ));
                }
            }
            if let Some((a, b)) = &s.candidate_edge
                && input.edge_between(a, b).is_none()
            {
                errors.push(SchemaError::at(
                    &path.with(&[Field("candidate_edge")]),
                    format!("no input edge joins '{a}' and '{b}'"),
                ));
            }
        }
        StepState::Sort(s) => {
            check_sort_refs(input, s, &path, family, errors);
        }
        StepState::Search(s) => {
            let len = s.array_or(&input.array).len();
            let idx = |field: &'static str, v: usize, errors: &mut Vec<SchemaError>| {
                if v >= len {
                    errors.push(SchemaError::at(
                        &path.with(&[Field(field)]),
                        format!("index {v} out of range for array of length {len}"),
                    ));
                }
            };
            for (field, v) in [
                ("current", s.current),
                ("low", s.low),
                ("high", s.high),
                ("mid", s.mid),
                ("found", s.found),
            ] {
                if let Some(v) = v {
                    idx(field, v, errors);
                }
            }
            for &v in &s.checked {
                idx("checked", v, errors);
            }
        }
        StepState::LinkedList(s) => {
            let list = |field: &'static str, id: &str, errors: &mut Vec<SchemaError>| {
                if !input.has_list_node(id) {
                    errors.push(SchemaError::at(
                        &path.with(&[Field(field)]),
                        format!("'{id}' is not a list node"),
                    ));
                }
            };
            if let Some(id) = &s.current {
                list("current", id, errors);
            }
            for id in &s.visited {
                list("visited", id, errors);
            }
            if let Some(id) = &s.found {
                list("found", id, errors);
            }
        }
    }
}

fn check_sort_refs(
    input: &TraceInput,
    s: &SortState,
    path: &PathCursor<'_>,
    family: Family,
    errors: &mut Vec<SchemaError>,
) {
    let len = s.array.len();
    if len == 0 {
        errors.push(SchemaError::at(
            &path.with(&[Field("array")]),
            "array must be non-empty",
        ));
        return;
    }
    let idx = |field: &'static str, v: usize, errors: &mut Vec<SchemaError>| {
        if v >= len {
            errors.push(SchemaError::at(
                &path.with(&[Field(field)]),
                format!("index {v} out of range for array of length {len}"),
            ));
        }
    };
    for &v in &s.comparing {
        idx("comparing", v, errors);
    }
    for &v in &s.sorted {
        idx("sorted", v, errors);
    }
    for (field, v) in [("pivot", s.pivot), ("key", s.key), ("min", s.min)] {
        if let Some(v) = v {
            idx(field, v, errors);
        }
    }

    let tree_len = input.array.len();
    let range = |field: &'static str, r: (usize, usize), errors: &mut Vec<SchemaError>| {
        if r.0 > r.1 || r.1 > len {
            errors.push(SchemaError::at(
                &path.with(&[Field(field)]),
                format!("range [{}, {}) invalid for array of length {len}", r.0, r.1),
            ));
        } else if family == Family::MergeTree && merge_tree_depth(tree_len, r).is_none() {
            errors.push(SchemaError::at(
                &path.with(&[Field(field)]),
                format!("range [{}, {}) is not a node of the recursion tree", r.0, r.1),
            ));
        }
    };
    if let Some(r) = s.range {
        range("range", r, errors);
    }
    for &r in &s.merged {
        range("merged", r, errors);
    }
}

fn resolve_suggestion(
    family: Family,
    input: &TraceInput,
    state: &StepState,
    value: &serde_json::Value,
) -> Result<Option<EntityId>, String> {
    use serde_json::Value;

    let graph = matches!(
        family,
        Family::GraphSearch | Family::ShortestPath | Family::AllPairs | Family::SpanningTree
    );
    match value {
        Value::Null => Ok(None),
        Value::String(s) if graph => {
            if input.has_node(s) {
                Ok(Some(EntityId::node(s.clone())))
            } else {
                Err(format!("'{s}' is not a node of the input graph"))
            }
        }
        Value::String(s) if family == Family::LinkedList => {
            if input.has_list_node(s) {
                Ok(Some(EntityId::list_node(s.clone())))
            } else {
                Err(format!("'{s}' is not a list node"))
            }
        }
        Value::Number(n) if matches!(family, Family::Sort | Family::Search) => {
            let len = match state {
                StepState::Sort(s) => s.array.len(),
                StepState::Search(s) => s.array_or(&input.array).len(),
                _ => 0,
            };
            match n.as_u64().and_then(|v| usize::try_from(v).ok()) {
                Some(i) if i < len => Ok(Some(EntityId::cell(i))),
                _ => Err(format!("{n} is not a cell index of an array of length {len}")),
            }
        }
        Value::Array(pair) if pair.len() == 2 => match (&pair[0], &pair[1]) {
            (Value::String(a), Value::String(b)) if graph => input
                .edge_between(a, b)
                .map(Some)
                .ok_or_else(|| format!("no input edge joins '{a}' and '{b}'")),
            (Value::Number(lo), Value::Number(hi)) if family == Family::MergeTree => {
                let lo = lo.as_u64().and_then(|v| usize::try_from(v).ok());
                let hi = hi.as_u64().and_then(|v| usize::try_from(v).ok());
                match (lo, hi) {
                    (Some(lo), Some(hi))
                        if merge_tree_depth(input.array.len(), (lo, hi)).is_some() =>
                    {
                        Ok(Some(EntityId::tree_node(lo, hi)))
                    }
                    _ => Err("suggested range is not a node of the recursion tree".to_string()),
                }
            }
            _ => Err(format!("unsupported suggestion {value} for family {family}")),
        },
        other => Err(format!("unsupported suggestion {other} for family {family}")),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/trace/schema.rs"]
mod tests;
