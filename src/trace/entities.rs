use crate::{
    foundation::error::VizResult,
    foundation::ids::EntityId,
    trace::model::{Family, StepTrace},
    trace::state::{StepState, merge_tree_branches, merge_tree_ranges},
};

impl StepTrace {
    /// Entities drawn at step `index`, bodies first and connectors after, in input order.
    /// List nodes follow the chain from the head.
    ///
    /// Only sort diagrams vary across steps: their cells follow the length of each step's array.
    pub fn entities_at(&self, index: usize) -> VizResult<Vec<EntityId>> {
        let step = self.step(index)?;
        let input = &self.input;
        Ok(match self.family {
            Family::GraphSearch
            | Family::ShortestPath
            | Family::AllPairs
            | Family::SpanningTree => input
                .nodes
                .iter()
                .map(|n| EntityId::node(n.clone()))
                .chain(
                    input
                        .edges
                        .iter()
                        .map(|e| EntityId::edge(e.from.clone(), e.to.clone())),
                )
                .collect(),
            Family::Sort => {
                let len = match &step.state {
                    StepState::Sort(s) => s.array.len(),
                    _ => input.array.len(),
                };
                (0..len).map(EntityId::cell).collect()
            }
            Family::Search => {
                let len = match &step.state {
                    StepState::Search(s) => s.array_or(&input.array).len(),
                    _ => input.array.len(),
                };
                (0..len).map(EntityId::cell).collect()
            }
            Family::MergeTree => {
                let len = input.array.len();
                merge_tree_ranges(len)
                    .into_iter()
                    .map(|(lo, hi)| EntityId::tree_node(lo, hi))
                    .chain(
                        merge_tree_branches(len)
                            .into_iter()
                            .map(|(parent, child)| EntityId::Branch { parent, child }),
                    )
                    .collect()
            }
            Family::LinkedList => {
                let chain = input.list_chain();
                chain
                    .iter()
                    .map(|n| EntityId::list_node(n.id.clone()))
                    .chain(chain.iter().filter_map(|n| {
                        n.next
                            .as_ref()
                            .map(|next| EntityId::link(n.id.clone(), next.clone()))
                    }))
                    .collect()
            }
        })
    }

    /// Union of [`StepTrace::entities_at`] over every step, first appearance order.
    pub fn all_entities(&self) -> VizResult<Vec<EntityId>> {
        let mut out: Vec<EntityId> = Vec::new();
        let mut seen = std::collections::BTreeSet::new();
        for i in 0..self.len() {
            for id in self.entities_at(i)? {
                if seen.insert(id.clone()) {
                    out.push(id);
                }
            }
        }
        Ok(out)
    }

    /// Body pairs joined by a connector, for layout solvers.
    pub fn links(&self) -> Vec<(EntityId, EntityId)> {
        let input = &self.input;
        match self.family {
            Family::GraphSearch
            | Family::ShortestPath
            | Family::AllPairs
            | Family::SpanningTree => input
                .edges
                .iter()
                .filter(|e| e.from != e.to)
                .map(|e| (EntityId::node(e.from.clone()), EntityId::node(e.to.clone())))
                .collect(),
            Family::LinkedList => input
                .list
                .iter()
                .filter_map(|n| {
                    let next = n.next.as_ref()?;
                    Some((
                        EntityId::list_node(n.id.clone()),
                        EntityId::list_node(next.clone()),
                    ))
                })
                .collect(),
            Family::MergeTree => merge_tree_branches(input.array.len())
                .into_iter()
                .map(|(p, c)| (EntityId::tree_node(p.0, p.1), EntityId::tree_node(c.0, c.1)))
                .collect(),
            Family::Sort | Family::Search => Vec::new(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/trace/entities.rs"]
mod tests;
