use std::collections::BTreeSet;

use crate::{
    foundation::core::{Canvas, Color},
    foundation::error::VizResult,
    foundation::ids::EntityId,
    render::frame::{Element, Frame},
};

/// Retained-mode drawing target.
///
/// Surfaces keep the elements they were given, keyed by entity id, until told to remove them.
/// [`present`] is the only driver; adapters never talk to a surface directly.
pub trait DrawSurface {
    /// Start a frame.
    fn begin(&mut self, canvas: Canvas, background: Color) -> VizResult<()>;

    /// Insert or replace the element for `element.id`.
    fn upsert(&mut self, element: &Element) -> VizResult<()>;

    /// Drop the element for `id`. Removing an absent id is not an error.
    fn remove(&mut self, id: &EntityId) -> VizResult<()>;

    /// Ids currently retained.
    fn retained(&self) -> BTreeSet<EntityId>;

    /// Finish a frame.
    fn finish(&mut self) -> VizResult<()> {
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
/// What one [`present`] call changed on the surface.
pub struct PresentStats {
    /// Elements inserted or replaced.
    pub upserted: usize,
    /// Stale elements removed.
    pub removed: usize,
}

/// Replace the surface's contents with `frame`.
///
/// Ids retained from an earlier frame that `frame` no longer contains are removed; every element
/// of `frame` is upserted, so persisting entities keep their identity on the surface.
#[tracing::instrument(skip_all, fields(elements = frame.elements().len()))]
pub fn present(surface: &mut dyn DrawSurface, frame: &Frame) -> VizResult<PresentStats> {
    surface.begin(frame.canvas, frame.background)?;

    let keep: BTreeSet<&EntityId> = frame.elements().iter().map(|e| &e.id).collect();
    let mut stats = PresentStats::default();
    for id in surface.retained() {
        if !keep.contains(&id) {
            surface.remove(&id)?;
            stats.removed += 1;
        }
    }
    for element in frame.elements() {
        surface.upsert(element)?;
        stats.upserted += 1;
    }

    surface.finish()?;
    tracing::trace!(
        upserted = stats.upserted,
        removed = stats.removed,
        "frame presented"
    );
    Ok(stats)
}
