use crate::{
    encode::style::Style,
    foundation::core::{Canvas, Point, Rect},
    foundation::error::{VizError, VizResult},
    foundation::ids::EntityId,
    layout::store::{LayoutHint, LayoutOpts},
    render::adapter::{DiagramAdapter, Scene, cannot_draw},
    render::frame::{Element, Shape},
    trace::model::{Diagram, StepTrace},
    trace::state::StepState,
};

const MIN_BAR: f64 = 4.0;
const CAPTION_ROOM: f64 = 18.0;

/// Array of bars for sort and search traces. Bar height follows the cell value.
#[derive(Clone, Debug)]
pub struct BarsAdapter {
    slot: f64,
    origin: Point,
    max_height: f64,
    scale: f64,
}

impl BarsAdapter {
    /// Adapter sized so the longest array of the trace fits inside `canvas`.
    pub fn new(trace: &StepTrace, canvas: Canvas, opts: &LayoutOpts) -> Self {
        let mut longest = trace.input().array.len();
        let mut scale = trace
            .input()
            .array
            .iter()
            .map(|v| v.unsigned_abs())
            .max()
            .unwrap_or(0);
        for i in 0..trace.len() {
            let values = step_values(trace, i);
            longest = longest.max(values.len());
            scale = scale.max(values.iter().map(|v| v.unsigned_abs()).max().unwrap_or(0));
        }

        let (w, h) = (f64::from(canvas.width), f64::from(canvas.height));
        let usable = (w - 2.0 * opts.margin).max(1.0);
        let slot = opts.slot_spacing.min(usable / longest.max(1) as f64);
        let baseline = h - opts.margin;
        Self {
            slot,
            origin: Point::new(opts.margin + slot / 2.0, baseline),
            max_height: (baseline - opts.margin - CAPTION_ROOM).max(MIN_BAR),
            scale: scale.max(1) as f64,
        }
    }
}

/// Values drawn at step `index`: the step's own snapshot, or the input array.
fn step_values(trace: &StepTrace, index: usize) -> &[i64] {
    match trace.steps().get(index).map(|s| &s.state) {
        Some(StepState::Sort(s)) => &s.array,
        Some(StepState::Search(s)) => s.array_or(&trace.input().array),
        _ => &trace.input().array,
    }
}

impl DiagramAdapter for BarsAdapter {
    fn diagram(&self) -> Diagram {
        Diagram::Bars
    }

    fn layout_hint(&self) -> LayoutHint {
        LayoutHint::Row {
            origin: self.origin,
            spacing: self.slot,
        }
    }

    fn element(&self, scene: &Scene<'_>, id: &EntityId, style: &Style) -> VizResult<Element> {
        let EntityId::Cell { index } = *id else {
            return Err(cannot_draw(Diagram::Bars, id));
        };
        let value = step_values(scene.trace, scene.index)
            .get(index)
            .copied()
            .ok_or_else(|| {
                VizError::render(format!("{id} has no value at step {}", scene.index))
            })?;
        let foot = scene.layout.get(id)?;
        let height = (value.unsigned_abs() as f64 / self.scale * self.max_height).max(MIN_BAR);
        let half = self.slot * 0.4;
        Ok(Element {
            id: id.clone(),
            shape: Shape::Bar {
                rect: Rect::new(foot.x - half, foot.y - height, foot.x + half, foot.y),
            },
            style: style.clone(),
            text: Some(value.to_string()),
            z: 0,
        })
    }
}
