//! Per-step category assignment.
//!
//! Everything here is a pure function of `(trace, index)`: no history is kept between calls, so
//! any seek order yields the same answer for the same index.

use std::collections::BTreeSet;

use crate::{
    diff::category::{
        Category, CategoryAssignment, CategoryTag, RoleAssignment, StaticRole, UpdatedKey,
    },
    foundation::error::VizResult,
    foundation::ids::EntityId,
    trace::model::{Family, StepTrace, TraceInput},
    trace::state::{
        GraphSearchState, ListState, MatrixState, SearchState, ShortestPathState, SortState,
        SpanningTreeState, StepState,
    },
};

/// Categorize every entity drawn at step `index`.
///
/// Explicit categories are projected straight from the step's state. For families whose state is
/// cumulative (shortest paths, all pairs) the step is also compared with step `index - 1` and
/// every differing key is reported as [`Category::JustUpdated`] with inferred provenance.
#[tracing::instrument(skip(trace), fields(family = %trace.family()))]
pub fn diff_step(trace: &StepTrace, index: usize) -> VizResult<CategoryAssignment> {
    let step = trace.step(index)?;
    let prev = index.checked_sub(1).map(|p| trace.step(p)).transpose()?;
    let ids = trace.entities_at(index)?;
    let input = trace.input();
    let mut out = CategoryAssignment::new(trace.family(), index);

    match &step.state {
        StepState::GraphSearch(s) => graph_search(&mut out, &ids, input, s),
        StepState::ShortestPath(s) => {
            shortest_path(&mut out, &ids, input, s);
            if let Some(StepState::ShortestPath(p)) = prev.map(|p| &p.state) {
                infer_shortest_path(&mut out, input, p, s);
            }
        }
        StepState::AllPairs(s) => {
            all_pairs(&mut out, &ids, input, s);
            if let Some(StepState::AllPairs(p)) = prev.map(|p| &p.state) {
                infer_matrix(&mut out, input, p, s);
            }
        }
        StepState::SpanningTree(s) => spanning_tree(&mut out, &ids, input, s),
        StepState::Sort(s) if trace.family() == Family::MergeTree => merge_tree(&mut out, &ids, s),
        StepState::Sort(s) => sort(&mut out, &ids, s),
        StepState::Search(s) => search(&mut out, &ids, input, s),
        StepState::LinkedList(s) => linked_list(&mut out, &ids, s),
    }

    tracing::trace!(
        entities = out.len(),
        updated = out.updated().len(),
        "step categorized"
    );
    Ok(out)
}

/// Static roles held at step `index` (pivot, key, bounds, start vertex, ...).
#[tracing::instrument(skip(trace), fields(family = %trace.family()))]
pub fn roles(trace: &StepTrace, index: usize) -> VizResult<RoleAssignment> {
    let step = trace.step(index)?;
    let input = trace.input();
    let mut out = RoleAssignment::default();

    match &step.state {
        StepState::GraphSearch(_) | StepState::ShortestPath(_) | StepState::SpanningTree(_) => {
            if let Some(start) = &input.start {
                out.assign(EntityId::node(start.clone()), StaticRole::Start);
            }
        }
        StepState::AllPairs(s) => {
            if let Some(label) = s.k.and_then(|k| input.nodes.get(k)) {
                out.assign(EntityId::node(label.clone()), StaticRole::Via);
            }
        }
        StepState::Sort(s) => {
            if trace.family() == Family::Sort {
                for (role, idx) in [
                    (StaticRole::Pivot, s.pivot),
                    (StaticRole::Key, s.key),
                    (StaticRole::Min, s.min),
                ] {
                    if let Some(i) = idx {
                        out.assign(EntityId::cell(i), role);
                    }
                }
            }
        }
        StepState::Search(s) => {
            for (role, idx) in [
                (StaticRole::Mid, s.mid),
                (StaticRole::Low, s.low),
                (StaticRole::High, s.high),
            ] {
                if let Some(i) = idx {
                    out.assign(EntityId::cell(i), role);
                }
            }
        }
        StepState::LinkedList(_) => {
            if let Some(head) = input.list_head() {
                out.assign(EntityId::list_node(head.id.clone()), StaticRole::Head);
            }
        }
    }
    Ok(out)
}

fn explicit(out: &mut CategoryAssignment, id: &EntityId, category: Category) {
    out.tag(id.clone(), CategoryTag::explicit(category));
}

fn contains(list: &[String], label: &str) -> bool {
    list.iter().any(|v| v == label)
}

/// True if `pair` names the edge `(from, to)`, honoring direction.
fn pair_is_edge(input: &TraceInput, pair: &(String, String), id: &EntityId) -> bool {
    input.edge_between(&pair.0, &pair.1).as_ref() == Some(id)
}

fn graph_search(
    out: &mut CategoryAssignment,
    ids: &[EntityId],
    input: &TraceInput,
    s: &GraphSearchState,
) {
    for id in ids {
        match id {
            EntityId::Node { label } => {
                if s.current.as_deref() == Some(label.as_str()) {
                    explicit(out, id, Category::Current);
                }
                let visited = contains(&s.visited, label);
                let frontier = s.frontier().any(|f| f == label);
                if visited {
                    explicit(out, id, Category::Visited);
                }
                if frontier {
                    explicit(out, id, Category::Frontier);
                }
                if !visited && !frontier {
                    explicit(out, id, Category::Unvisited);
                }
            }
            EntityId::Edge { from, to } => {
                let discovered = |child: &str, parent: &str| {
                    s.parent
                        .get(child)
                        .is_some_and(|p| p.as_deref() == Some(parent))
                };
                let tree = discovered(to, from) || (!input.directed && discovered(from, to));
                explicit(
                    out,
                    id,
                    if tree {
                        Category::TreeEdge
                    } else {
                        Category::Idle
                    },
                );
            }
            _ => {}
        }
    }
}

fn shortest_path(
    out: &mut CategoryAssignment,
    ids: &[EntityId],
    input: &TraceInput,
    s: &ShortestPathState,
) {
    for id in ids {
        match id {
            EntityId::Node { label } => {
                explicit(
                    out,
                    id,
                    if contains(&s.settled, label) {
                        Category::Settled
                    } else {
                        Category::Unsettled
                    },
                );
                if let Some((a, b)) = &s.current_edge
                    && (a == label || b == label)
                {
                    explicit(out, id, Category::RelaxedEndpoint);
                }
            }
            EntityId::Edge { from, to } => {
                let mut plain = true;
                if let Some(edge) = &s.current_edge
                    && pair_is_edge(input, edge, id)
                {
                    explicit(out, id, Category::CurrentEdge);
                    plain = false;
                }
                let pred_of = |node: &str, pred: &str| {
                    s.predecessors
                        .get(node)
                        .is_some_and(|p| p.as_deref() == Some(pred))
                };
                if pred_of(to, from) || (!input.directed && pred_of(from, to)) {
                    explicit(out, id, Category::PathEdge);
                    plain = false;
                }
                if plain {
                    explicit(out, id, Category::Idle);
                }
            }
            _ => {}
        }
    }
}

fn infer_shortest_path(
    out: &mut CategoryAssignment,
    input: &TraceInput,
    prev: &ShortestPathState,
    cur: &ShortestPathState,
) {
    let keys: BTreeSet<&String> = prev.distances.keys().chain(cur.distances.keys()).collect();
    for key in keys {
        let before = prev.distances.get(key).copied().unwrap_or_default();
        let after = cur.distances.get(key).copied().unwrap_or_default();
        if before != after {
            out.updated.push(UpdatedKey::Distance { node: key.clone() });
            out.tag(
                EntityId::node(key.clone()),
                CategoryTag::inferred(Category::JustUpdated),
            );
        }
    }

    let keys: BTreeSet<&String> = prev
        .predecessors
        .keys()
        .chain(cur.predecessors.keys())
        .collect();
    for key in keys {
        let before = prev.predecessors.get(key).cloned().flatten();
        let after = cur.predecessors.get(key).cloned().flatten();
        if before != after {
            out.updated
                .push(UpdatedKey::Predecessor { node: key.clone() });
            out.tag(
                EntityId::node(key.clone()),
                CategoryTag::inferred(Category::JustUpdated),
            );
            if let Some(edge) = after.and_then(|p| input.edge_between(&p, key)) {
                out.tag(edge, CategoryTag::inferred(Category::JustUpdated));
            }
        }
    }
}

fn all_pairs(out: &mut CategoryAssignment, ids: &[EntityId], input: &TraceInput, s: &MatrixState) {
    let label_at = |i: Option<usize>| i.and_then(|i| input.nodes.get(i)).map(String::as_str);
    let (row, col) = (label_at(s.i), label_at(s.j));
    for id in ids {
        match id {
            EntityId::Node { label } => {
                let active = Some(label.as_str()) == row || Some(label.as_str()) == col;
                explicit(
                    out,
                    id,
                    if active {
                        Category::Active
                    } else {
                        Category::Idle
                    },
                );
            }
            EntityId::Edge { .. } => {
                let current = match (row, col) {
                    (Some(a), Some(b)) => input.edge_between(a, b).as_ref() == Some(id),
                    _ => false,
                };
                explicit(
                    out,
                    id,
                    if current {
                        Category::CurrentEdge
                    } else {
                        Category::Idle
                    },
                );
            }
            _ => {}
        }
    }
}

fn infer_matrix(
    out: &mut CategoryAssignment,
    input: &TraceInput,
    prev: &MatrixState,
    cur: &MatrixState,
) {
    let rows = prev.matrix.len().max(cur.matrix.len());
    for row in 0..rows {
        let a = prev.matrix.get(row).map(Vec::as_slice).unwrap_or_default();
        let b = cur.matrix.get(row).map(Vec::as_slice).unwrap_or_default();
        for col in 0..a.len().max(b.len()) {
            if a.get(col) == b.get(col) {
                continue;
            }
            out.updated.push(UpdatedKey::Cell { row, col });
            for idx in [row, col] {
                if let Some(label) = input.nodes.get(idx) {
                    out.tag(
                        EntityId::node(label.clone()),
                        CategoryTag::inferred(Category::JustUpdated),
                    );
                }
            }
            if let (Some(a), Some(b)) = (input.nodes.get(row), input.nodes.get(col))
                && let Some(edge) = input.edge_between(a, b)
            {
                out.tag(edge, CategoryTag::inferred(Category::JustUpdated));
            }
        }
    }
}

fn spanning_tree(
    out: &mut CategoryAssignment,
    ids: &[EntityId],
    input: &TraceInput,
    s: &SpanningTreeState,
) {
    for id in ids {
        match id {
            EntityId::Node { label } => {
                let in_tree = contains(&s.in_tree, label);
                explicit(
                    out,
                    id,
                    if in_tree {
                        Category::InTree
                    } else {
                        Category::Unvisited
                    },
                );
                if !in_tree
                    && let Some((a, b)) = &s.candidate_edge
                    && (a == label || b == label)
                {
                    explicit(out, id, Category::Candidate);
                }
            }
            EntityId::Edge { .. } => {
                let accepted = s.mst_edges.iter().any(|e| pair_is_edge(input, e, id));
                let candidate = s
                    .candidate_edge
                    .as_ref()
                    .is_some_and(|e| pair_is_edge(input, e, id));
                if accepted {
                    explicit(out, id, Category::MstEdge);
                }
                if candidate {
                    explicit(out, id, Category::CandidateEdge);
                }
                if !accepted && !candidate {
                    explicit(out, id, Category::Idle);
                }
            }
            _ => {}
        }
    }
}

fn sort(out: &mut CategoryAssignment, ids: &[EntityId], s: &SortState) {
    for id in ids {
        let EntityId::Cell { index } = *id else {
            continue;
        };
        if s.comparing.contains(&index) {
            explicit(out, id, Category::Comparing);
            if s.swapped {
                explicit(out, id, Category::Swapped);
            }
        }
        if let Some((lo, hi)) = s.range
            && !(lo..hi).contains(&index)
        {
            explicit(out, id, Category::Inactive);
        }
        explicit(
            out,
            id,
            if s.sorted.contains(&index) {
                Category::Sorted
            } else {
                Category::Unsorted
            },
        );
    }
}

fn merge_tree(out: &mut CategoryAssignment, ids: &[EntityId], s: &SortState) {
    for id in ids {
        match *id {
            EntityId::TreeNode { lo, hi } => {
                let category = if s.range == Some((lo, hi)) {
                    Category::Working
                } else if s.merged.contains(&(lo, hi)) {
                    Category::Merged
                } else {
                    Category::Pending
                };
                explicit(out, id, category);
            }
            EntityId::Branch { child, .. } => {
                let category = if s.range == Some(child) {
                    Category::Working
                } else if s.merged.contains(&child) {
                    Category::Merged
                } else {
                    Category::Idle
                };
                explicit(out, id, category);
            }
            _ => {}
        }
    }
}

fn search(out: &mut CategoryAssignment, ids: &[EntityId], input: &TraceInput, s: &SearchState) {
    let len = s.array_or(&input.array).len();
    let window = match (s.low, s.high) {
        (None, None) => None,
        (low, high) => Some((low.unwrap_or(0), high.unwrap_or(len.saturating_sub(1)))),
    };
    for id in ids {
        let EntityId::Cell { index } = *id else {
            continue;
        };
        if s.found == Some(index) {
            explicit(out, id, Category::Found);
        }
        if s.current == Some(index) || s.mid == Some(index) {
            explicit(out, id, Category::Current);
        }
        let checked = s.checked.contains(&index);
        let category = match window {
            _ if checked => Category::Eliminated,
            Some((lo, hi)) if index < lo || index > hi => Category::Eliminated,
            Some(_) => Category::InWindow,
            None => Category::Unvisited,
        };
        explicit(out, id, category);
    }
}

fn linked_list(out: &mut CategoryAssignment, ids: &[EntityId], s: &ListState) {
    let is_current = |id: &str| s.current.as_deref() == Some(id);
    for id in ids {
        match id {
            EntityId::ListNode { id: node } => {
                if s.found.as_deref() == Some(node.as_str()) {
                    explicit(out, id, Category::Found);
                }
                if is_current(node) {
                    explicit(out, id, Category::Current);
                }
                explicit(
                    out,
                    id,
                    if contains(&s.visited, node) {
                        Category::Visited
                    } else {
                        Category::Unvisited
                    },
                );
            }
            EntityId::Link { from, to } => {
                let followed =
                    contains(&s.visited, from) && (contains(&s.visited, to) || is_current(to));
                explicit(
                    out,
                    id,
                    if followed {
                        Category::TreeEdge
                    } else {
                        Category::Idle
                    },
                );
            }
            _ => {}
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/diff/engine.rs"]
mod tests;
