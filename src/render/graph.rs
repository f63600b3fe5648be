use crate::{
    encode::style::Style,
    foundation::core::{Canvas, Point},
    foundation::error::VizResult,
    foundation::ids::EntityId,
    layout::store::{LayoutHint, LayoutOpts},
    render::adapter::{DiagramAdapter, Scene, cannot_draw},
    render::frame::{Element, Shape},
    trace::model::{Diagram, StepTrace},
    trace::state::{Distance, StepState},
};

const NODE_RADIUS: f64 = 22.0;

/// Node-link diagram for graph traces.
#[derive(Clone, Debug)]
pub struct GraphAdapter {
    directed: bool,
    hint: LayoutHint,
}

impl GraphAdapter {
    /// Adapter laying nodes on a circle inside `canvas`.
    pub fn new(trace: &StepTrace, canvas: Canvas, opts: &LayoutOpts) -> Self {
        let side = f64::from(canvas.width.min(canvas.height));
        let radius = (side * opts.circle_radius_ratio).min(side / 2.0 - opts.margin);
        Self {
            directed: trace.input().directed,
            hint: LayoutHint::Circle {
                center: canvas.center(),
                radius: radius.max(0.0),
            },
        }
    }
}

impl DiagramAdapter for GraphAdapter {
    fn diagram(&self) -> Diagram {
        Diagram::Graph
    }

    fn layout_hint(&self) -> LayoutHint {
        self.hint
    }

    fn relaxes(&self) -> bool {
        true
    }

    fn element(&self, scene: &Scene<'_>, id: &EntityId, style: &Style) -> VizResult<Element> {
        match id {
            EntityId::Node { label } => {
                let distance = match &scene.trace.step(scene.index)?.state {
                    StepState::ShortestPath(s) => s.distances.get(label).copied(),
                    _ => None,
                };
                Ok(Element {
                    id: id.clone(),
                    shape: Shape::Circle {
                        center: scene.layout.get(id)?,
                        radius: NODE_RADIUS,
                    },
                    style: style.clone(),
                    text: Some(match distance {
                        Some(d) => format!("{label}: {d}"),
                        None => label.clone(),
                    }),
                    z: 1,
                })
            }
            EntityId::Edge { from, to } => {
                let a = scene.layout.get(&EntityId::node(from.clone()))?;
                let b = scene.layout.get(&EntityId::node(to.clone()))?;
                let (a, b) = trim(a, b, NODE_RADIUS);
                let shape = if self.directed {
                    Shape::Arrow { from: a, to: b }
                } else {
                    Shape::Line { from: a, to: b }
                };
                let weight = scene.trace.input().weight_between(from, to);
                Ok(Element {
                    id: id.clone(),
                    shape,
                    style: style.clone(),
                    text: weight.map(|w| Distance::Finite(w).to_string()),
                    z: 0,
                })
            }
            _ => Err(cannot_draw(Diagram::Graph, id)),
        }
    }
}

/// Shorten segment `a -> b` by `r` at both ends so it meets the node circles.
fn trim(a: Point, b: Point, r: f64) -> (Point, Point) {
    let d = b - a;
    let len = d.hypot();
    if len <= 2.0 * r {
        return (a, b);
    }
    let step = d * (r / len);
    (a + step, b - step)
}
