use crate::{
    encode::style::Style,
    foundation::core::{Canvas, Point, Rect},
    foundation::error::{VizError, VizResult},
    foundation::ids::EntityId,
    layout::store::{LayoutHint, LayoutOpts},
    render::adapter::{DiagramAdapter, Scene, cannot_draw},
    render::frame::{Element, Shape},
    trace::model::{Diagram, StepTrace},
};

const BOX_HEIGHT: f64 = 40.0;

/// Linked list drawn as value boxes joined by `next` arrows.
#[derive(Clone, Debug)]
pub struct ListAdapter {
    origin: Point,
    slot: f64,
    box_width: f64,
}

impl ListAdapter {
    /// Adapter placing the list on one row across the middle of `canvas`.
    pub fn new(trace: &StepTrace, canvas: Canvas, opts: &LayoutOpts) -> Self {
        let n = trace.input().list.len().max(1);
        let usable = (f64::from(canvas.width) - 2.0 * opts.margin).max(1.0);
        let slot = (opts.slot_spacing * 1.5).min(usable / n as f64);
        Self {
            origin: Point::new(opts.margin + slot / 2.0, f64::from(canvas.height) / 2.0),
            slot,
            box_width: (slot * 0.6).min(64.0),
        }
    }
}

impl DiagramAdapter for ListAdapter {
    fn diagram(&self) -> Diagram {
        Diagram::LinkedList
    }

    fn layout_hint(&self) -> LayoutHint {
        LayoutHint::Row {
            origin: self.origin,
            spacing: self.slot,
        }
    }

    fn element(&self, scene: &Scene<'_>, id: &EntityId, style: &Style) -> VizResult<Element> {
        let half = self.box_width / 2.0;
        match id {
            EntityId::ListNode { id: node } => {
                let c = scene.layout.get(id)?;
                let value = scene
                    .trace
                    .input()
                    .list
                    .iter()
                    .find(|n| &n.id == node)
                    .map(|n| n.value)
                    .ok_or_else(|| VizError::unknown_entity(id))?;
                Ok(Element {
                    id: id.clone(),
                    shape: Shape::Box {
                        rect: Rect::new(
                            c.x - half,
                            c.y - BOX_HEIGHT / 2.0,
                            c.x + half,
                            c.y + BOX_HEIGHT / 2.0,
                        ),
                    },
                    style: style.clone(),
                    text: Some(value.to_string()),
                    z: 1,
                })
            }
            EntityId::Link { from, to } => {
                let a = scene.layout.get(&EntityId::list_node(from.clone()))?;
                let b = scene.layout.get(&EntityId::list_node(to.clone()))?;
                let dir = if b.x >= a.x { 1.0 } else { -1.0 };
                Ok(Element {
                    id: id.clone(),
                    shape: Shape::Arrow {
                        from: Point::new(a.x + dir * half, a.y),
                        to: Point::new(b.x - dir * half, b.y),
                    },
                    style: style.clone(),
                    text: None,
                    z: 0,
                })
            }
            _ => Err(cannot_draw(Diagram::LinkedList, id)),
        }
    }
}
