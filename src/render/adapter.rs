use crate::{
    encode::style::{Style, StyleMap},
    foundation::core::{Canvas, Color},
    foundation::error::{VizError, VizResult},
    foundation::ids::EntityId,
    layout::store::{LayoutHint, LayoutOpts, LayoutStore},
    render::bars::BarsAdapter,
    render::frame::{Element, Frame},
    render::graph::GraphAdapter,
    render::list::ListAdapter,
    render::surface::{DrawSurface, present},
    render::tree::TreeAdapter,
    trace::model::{Diagram, StepTrace},
};

/// Everything an adapter may read while drawing one step.
#[derive(Clone, Copy, Debug)]
pub struct Scene<'a> {
    /// Trace being played.
    pub trace: &'a StepTrace,
    /// Step shown.
    pub index: usize,
    /// Entities drawn at this step, from [`StepTrace::entities_at`].
    pub entities: &'a [EntityId],
    /// Resolved style per entity.
    pub styles: &'a StyleMap,
    /// Persistent positions.
    pub layout: &'a LayoutStore,
    /// Drawing area.
    pub canvas: Canvas,
    /// Background color.
    pub background: Color,
}

/// One diagram shape: turns styled entities plus stored positions into drawable elements.
pub trait DiagramAdapter {
    /// Diagram this adapter draws.
    fn diagram(&self) -> Diagram;

    /// Initial placement for bodies the layout store has not seen.
    fn layout_hint(&self) -> LayoutHint;

    /// Whether bodies settle through the force solver between frames.
    fn relaxes(&self) -> bool {
        false
    }

    /// Element for one entity. Body positions come from `scene.layout` only.
    fn element(&self, scene: &Scene<'_>, id: &EntityId, style: &Style) -> VizResult<Element>;
}

/// Adapter for the trace's diagram, sized for `canvas`.
pub fn adapter_for(
    trace: &StepTrace,
    canvas: Canvas,
    opts: &LayoutOpts,
) -> Box<dyn DiagramAdapter> {
    match trace.diagram() {
        Diagram::Graph => Box::new(GraphAdapter::new(trace, canvas, opts)),
        Diagram::Bars => Box::new(BarsAdapter::new(trace, canvas, opts)),
        Diagram::Tree => Box::new(TreeAdapter::new(trace, canvas, opts)),
        Diagram::LinkedList => Box::new(ListAdapter::new(trace, canvas, opts)),
    }
}

/// Shared driving loop: one element per entity of the step.
pub fn build_frame(adapter: &dyn DiagramAdapter, scene: &Scene<'_>) -> VizResult<Frame> {
    let mut elements = Vec::with_capacity(scene.entities.len());
    for id in scene.entities {
        let style = scene
            .styles
            .get(id)
            .ok_or_else(|| VizError::render(format!("no style resolved for {id}")))?;
        elements.push(adapter.element(scene, id, style)?);
    }
    Ok(Frame::new(scene.canvas, scene.background, elements))
}

/// Build the step's frame and present it on `surface`.
#[tracing::instrument(skip_all, fields(diagram = ?adapter.diagram(), index = scene.index))]
pub fn render_step(
    adapter: &dyn DiagramAdapter,
    scene: &Scene<'_>,
    surface: &mut dyn DrawSurface,
) -> VizResult<Frame> {
    let frame = build_frame(adapter, scene)?;
    present(surface, &frame)?;
    Ok(frame)
}

pub(crate) fn cannot_draw(diagram: Diagram, id: &EntityId) -> VizError {
    VizError::render(format!("{diagram:?} diagram cannot draw {id}"))
}

#[cfg(test)]
#[path = "../../tests/unit/render/adapter.rs"]
mod tests;
