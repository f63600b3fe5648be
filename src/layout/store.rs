use std::collections::BTreeMap;
use std::f64::consts::{FRAC_PI_2, TAU};

use crate::{
    foundation::core::{Point, Rect},
    foundation::error::{VizError, VizResult},
    foundation::ids::EntityId,
    layout::force::{Body, ForceOpts, LayoutSolver},
    trace::state::merge_tree_depth,
};

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
/// Layout configuration shared by every diagram shape.
pub struct LayoutOpts {
    /// Circle radius as a fraction of the smaller canvas side.
    pub circle_radius_ratio: f64,
    /// Preferred slot width for bars and list boxes.
    pub slot_spacing: f64,
    /// Vertical distance between recursion-tree levels.
    pub tree_level_gap: f64,
    /// Outer canvas margin.
    pub margin: f64,
    /// Force solver tuning for graph diagrams.
    pub force: ForceOpts,
}

impl Default for LayoutOpts {
    fn default() -> Self {
        Self {
            circle_radius_ratio: 0.36,
            slot_spacing: 72.0,
            tree_level_gap: 84.0,
            margin: 40.0,
            force: ForceOpts::default(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
/// How [`LayoutStore::initialize`] places ids it has not seen yet.
pub enum LayoutHint {
    /// Evenly spaced on a circle, first id at twelve o'clock, clockwise.
    Circle {
        /// Circle center.
        center: Point,
        /// Circle radius.
        radius: f64,
    },
    /// Left-to-right slots; the i-th id lands at `origin + (i * spacing, 0)`.
    Row {
        /// Position of slot 0.
        origin: Point,
        /// Distance between slot centers.
        spacing: f64,
    },
    /// Recursion tree over `len` elements: x from the range midpoint, y from depth.
    Tree {
        /// Position of array index 0 at depth 0.
        origin: Point,
        /// Horizontal distance per array index.
        cell: f64,
        /// Vertical distance per level.
        level_gap: f64,
        /// Length of the array the tree splits.
        len: usize,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
/// Stored position of one entity.
pub struct Placement {
    /// Position in canvas pixels.
    pub pos: Point,
    /// True while a drag holds the entity.
    pub pinned: bool,
}

/// Persistent id-keyed position table.
///
/// Positions survive step changes. They move only through [`LayoutStore::relax`] (unpinned
/// entities only), [`LayoutStore::pin`], or a [`LayoutStore::reset`] followed by a fresh
/// [`LayoutStore::initialize`]. Connector ids (edges, links, branches) are never stored; their
/// geometry follows their endpoints.
#[derive(Clone, Debug, Default)]
pub struct LayoutStore {
    slots: BTreeMap<EntityId, Placement>,
}

impl LayoutStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign positions to ids that have none yet. Returns how many were added.
    ///
    /// Placement depends only on the id's position in `ids` and on `hint`, so identical input
    /// gives identical output. Ids that already have a position keep it.
    pub fn initialize(&mut self, ids: &[EntityId], hint: LayoutHint) -> VizResult<usize> {
        let bodies: Vec<&EntityId> = ids.iter().filter(|id| !id.is_connector()).collect();
        let n = bodies.len();
        let mut added = 0usize;
        for (i, id) in bodies.into_iter().enumerate() {
            if self.slots.contains_key(id) {
                continue;
            }
            let pos = initial_position(id, i, n, hint)?;
            self.slots.insert(
                id.clone(),
                Placement {
                    pos,
                    pinned: false,
                },
            );
            added += 1;
        }
        if added > 0 {
            tracing::debug!(added, total = self.slots.len(), "layout initialized");
        }
        Ok(added)
    }

    /// Position of `id`.
    pub fn get(&self, id: &EntityId) -> VizResult<Point> {
        self.placement(id).map(|p| p.pos)
    }

    /// Position and pin state of `id`.
    pub fn placement(&self, id: &EntityId) -> VizResult<Placement> {
        self.slots
            .get(id)
            .copied()
            .ok_or_else(|| VizError::unknown_entity(id))
    }

    /// True if `id` has a position.
    pub fn contains(&self, id: &EntityId) -> bool {
        self.slots.contains_key(id)
    }

    /// Number of positioned entities.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// True when nothing has been positioned.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Positions in id order.
    pub fn iter(&self) -> impl Iterator<Item = (&EntityId, &Placement)> {
        self.slots.iter()
    }

    /// Run up to `iterations` solver iterations over all stored bodies.
    ///
    /// Links with an endpoint that has no position are ignored. Pinned entities are passed to
    /// the solver as anchors and are never written back. Returns true if anything moved.
    pub fn relax(
        &mut self,
        solver: &mut dyn LayoutSolver,
        links: &[(EntityId, EntityId)],
        bounds: Rect,
        iterations: u32,
    ) -> bool {
        if self.slots.is_empty() || iterations == 0 {
            return false;
        }
        let ids: Vec<EntityId> = self.slots.keys().cloned().collect();
        let index: BTreeMap<&EntityId, usize> =
            ids.iter().enumerate().map(|(i, id)| (id, i)).collect();
        let link_idx: Vec<(usize, usize)> = links
            .iter()
            .filter_map(|(a, b)| Some((*index.get(a)?, *index.get(b)?)))
            .collect();
        let mut bodies: Vec<Body> = self
            .slots
            .values()
            .map(|p| Body {
                pos: p.pos,
                pinned: p.pinned,
            })
            .collect();

        let mut moved = false;
        for _ in 0..iterations {
            let delta = solver.step(&mut bodies, &link_idx, bounds);
            if delta > 1e-3 {
                moved = true;
            } else {
                break;
            }
        }

        for (id, body) in ids.iter().zip(bodies) {
            if let Some(slot) = self.slots.get_mut(id)
                && !slot.pinned
            {
                slot.pos = body.pos;
            }
        }
        moved
    }

    /// Fix `id` at `pos` until [`LayoutStore::unpin`].
    pub fn pin(&mut self, id: &EntityId, pos: Point) -> VizResult<()> {
        let slot = self
            .slots
            .get_mut(id)
            .ok_or_else(|| VizError::unknown_entity(id))?;
        slot.pos = pos;
        slot.pinned = true;
        Ok(())
    }

    /// Release a pinned entity. Its position stays where the drag left it.
    pub fn unpin(&mut self, id: &EntityId) -> VizResult<()> {
        let slot = self
            .slots
            .get_mut(id)
            .ok_or_else(|| VizError::unknown_entity(id))?;
        slot.pinned = false;
        Ok(())
    }

    /// Forget every position.
    pub fn reset(&mut self) {
        tracing::debug!(cleared = self.slots.len(), "layout reset");
        self.slots.clear();
    }
}

fn initial_position(id: &EntityId, i: usize, n: usize, hint: LayoutHint) -> VizResult<Point> {
    match hint {
        LayoutHint::Circle { center, radius } => {
            if n <= 1 {
                return Ok(center);
            }
            let angle = -FRAC_PI_2 + TAU * (i as f64) / (n as f64);
            Ok(Point::new(
                center.x + radius * angle.cos(),
                center.y + radius * angle.sin(),
            ))
        }
        LayoutHint::Row { origin, spacing } => {
            let slot = match id {
                EntityId::Cell { index } => *index,
                _ => i,
            };
            Ok(Point::new(origin.x + spacing * slot as f64, origin.y))
        }
        LayoutHint::Tree {
            origin,
            cell,
            level_gap,
            len,
        } => match *id {
            EntityId::TreeNode { lo, hi } => {
                let depth = merge_tree_depth(len, (lo, hi)).ok_or_else(|| {
                    VizError::render(format!("{id} is not a node of the recursion tree"))
                })?;
                let mid = (lo + hi) as f64 / 2.0;
                Ok(Point::new(
                    origin.x + cell * mid,
                    origin.y + level_gap * depth as f64,
                ))
            }
            _ => Err(VizError::render(format!("tree layout cannot place {id}"))),
        },
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/store.rs"]
mod tests;
