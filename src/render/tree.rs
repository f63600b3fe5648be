use crate::{
    encode::style::Style,
    foundation::core::{Canvas, Point, Rect},
    foundation::error::VizResult,
    foundation::ids::EntityId,
    layout::store::{LayoutHint, LayoutOpts},
    render::adapter::{DiagramAdapter, Scene, cannot_draw},
    render::frame::{Element, Shape},
    trace::model::{Diagram, StepTrace},
    trace::state::StepState,
};

const BOX_HEIGHT: f64 = 28.0;
const GAP: f64 = 6.0;

/// Merge-sort recursion tree. Each node is a box showing its sub-array at the current step.
#[derive(Clone, Debug)]
pub struct TreeAdapter {
    hint: LayoutHint,
    cell: f64,
}

impl TreeAdapter {
    /// Adapter fitting the whole recursion tree inside `canvas`.
    pub fn new(trace: &StepTrace, canvas: Canvas, opts: &LayoutOpts) -> Self {
        let len = trace.input().array.len();
        let (w, h) = (f64::from(canvas.width), f64::from(canvas.height));
        let cell = (w - 2.0 * opts.margin).max(1.0) / len.max(1) as f64;
        let levels = len.max(1).next_power_of_two().trailing_zeros().max(1);
        let level_gap = opts
            .tree_level_gap
            .min((h - 2.0 * opts.margin - BOX_HEIGHT).max(BOX_HEIGHT) / f64::from(levels));
        Self {
            hint: LayoutHint::Tree {
                origin: Point::new(opts.margin, opts.margin + BOX_HEIGHT / 2.0),
                cell,
                level_gap,
                len,
            },
            cell,
        }
    }
}

impl DiagramAdapter for TreeAdapter {
    fn diagram(&self) -> Diagram {
        Diagram::Tree
    }

    fn layout_hint(&self) -> LayoutHint {
        self.hint
    }

    fn element(&self, scene: &Scene<'_>, id: &EntityId, style: &Style) -> VizResult<Element> {
        match *id {
            EntityId::TreeNode { lo, hi } => {
                let c = scene.layout.get(id)?;
                let half = ((self.cell * (hi - lo) as f64 - GAP) / 2.0).max(GAP);
                let values: &[i64] = match &scene.trace.step(scene.index)?.state {
                    StepState::Sort(s) => s.array.get(lo..hi).unwrap_or_default(),
                    _ => &[],
                };
                let text = values
                    .iter()
                    .map(i64::to_string)
                    .collect::<Vec<_>>()
                    .join(" ");
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
                    text: Some(text),
                    z: 1,
                })
            }
            EntityId::Branch { parent, child } => {
                let p = scene.layout.get(&EntityId::tree_node(parent.0, parent.1))?;
                let c = scene.layout.get(&EntityId::tree_node(child.0, child.1))?;
                Ok(Element {
                    id: id.clone(),
                    shape: Shape::Line {
                        from: Point::new(p.x, p.y + BOX_HEIGHT / 2.0),
                        to: Point::new(c.x, c.y - BOX_HEIGHT / 2.0),
                    },
                    style: style.clone(),
                    text: None,
                    z: 0,
                })
            }
            _ => Err(cannot_draw(Diagram::Tree, id)),
        }
    }
}
