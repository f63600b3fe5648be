use crate::{
    encode::style::Style,
    foundation::core::{Canvas, Color, Point, Rect},
    foundation::ids::EntityId,
    foundation::math::Fnv1a64,
};

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
/// Geometry of one drawn element, in canvas pixels.
pub enum Shape {
    /// Graph vertex.
    Circle {
        /// Center.
        center: Point,
        /// Radius.
        radius: f64,
    },
    /// Array cell drawn as a bar standing on a baseline.
    Bar {
        /// Bar rectangle.
        rect: Rect,
    },
    /// List node or recursion-tree node.
    Box {
        /// Box rectangle.
        rect: Rect,
    },
    /// Undirected connector.
    Line {
        /// Start point.
        from: Point,
        /// End point.
        to: Point,
    },
    /// Directed connector, head at `to`.
    Arrow {
        /// Tail.
        from: Point,
        /// Head.
        to: Point,
    },
}

impl Shape {
    /// Point where text is anchored.
    pub fn anchor(&self) -> Point {
        match *self {
            Self::Circle { center, .. } => center,
            Self::Bar { rect } | Self::Box { rect } => rect.center(),
            Self::Line { from, to } | Self::Arrow { from, to } => from.midpoint(to),
        }
    }

    /// True if `p` lies inside a body shape. Connectors are never hit.
    pub fn contains(&self, p: Point) -> bool {
        match *self {
            Self::Circle { center, radius } => center.distance(p) <= radius,
            Self::Bar { rect } | Self::Box { rect } => rect.contains(p),
            Self::Line { .. } | Self::Arrow { .. } => false,
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// One retained drawable, keyed by the entity it shows.
pub struct Element {
    /// Entity shown.
    pub id: EntityId,
    /// Geometry.
    pub shape: Shape,
    /// Resolved style.
    pub style: Style,
    /// Main text (vertex label, cell value, ...).
    pub text: Option<String>,
    /// Paint order; higher draws later.
    pub z: i32,
}

/// Drawn state of one step: every element, in paint order.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Frame {
    /// Drawing area.
    pub canvas: Canvas,
    /// Background color.
    pub background: Color,
    elements: Vec<Element>,
}

impl Frame {
    /// Frame from unordered elements. Elements are sorted by `(z, id)`.
    pub fn new(canvas: Canvas, background: Color, mut elements: Vec<Element>) -> Self {
        elements.sort_by(|a, b| a.z.cmp(&b.z).then_with(|| a.id.cmp(&b.id)));
        Self {
            canvas,
            background,
            elements,
        }
    }

    /// Elements in paint order.
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Element showing `id`.
    pub fn get(&self, id: &EntityId) -> Option<&Element> {
        self.elements.iter().find(|e| &e.id == id)
    }

    /// Topmost body under `p`.
    pub fn hit_test(&self, p: Point) -> Option<&EntityId> {
        self.elements
            .iter()
            .rev()
            .find(|e| !e.id.is_connector() && e.shape.contains(p))
            .map(|e| &e.id)
    }

    /// Stable 64-bit hash of everything that affects the drawn output.
    pub fn fingerprint(&self) -> u64 {
        let mut h = Fnv1a64::new_default();
        h.write_u64(u64::from(self.canvas.width));
        h.write_u64(u64::from(self.canvas.height));
        write_color(&mut h, self.background);
        h.write_u64(self.elements.len() as u64);
        for e in &self.elements {
            h.write_str(&e.id.to_string());
            write_shape(&mut h, &e.shape);
            write_style(&mut h, &e.style);
            match &e.text {
                Some(t) => {
                    h.write_u8(1);
                    h.write_str(t);
                }
                None => h.write_u8(0),
            }
            h.write_u64(e.z as i64 as u64);
        }
        h.finish()
    }
}

fn write_color(h: &mut Fnv1a64, c: Color) {
    h.write_bytes(&[c.r, c.g, c.b, c.a]);
}

fn write_point(h: &mut Fnv1a64, p: Point) {
    h.write_f64(p.x);
    h.write_f64(p.y);
}

fn write_rect(h: &mut Fnv1a64, r: Rect) {
    for v in [r.x0, r.y0, r.x1, r.y1] {
        h.write_f64(v);
    }
}

fn write_shape(h: &mut Fnv1a64, shape: &Shape) {
    match *shape {
        Shape::Circle { center, radius } => {
            h.write_u8(0);
            write_point(h, center);
            h.write_f64(radius);
        }
        Shape::Bar { rect } => {
            h.write_u8(1);
            write_rect(h, rect);
        }
        Shape::Box { rect } => {
            h.write_u8(2);
            write_rect(h, rect);
        }
        Shape::Line { from, to } => {
            h.write_u8(3);
            write_point(h, from);
            write_point(h, to);
        }
        Shape::Arrow { from, to } => {
            h.write_u8(4);
            write_point(h, from);
            write_point(h, to);
        }
    }
}

fn write_style(h: &mut Fnv1a64, s: &Style) {
    write_color(h, s.fill);
    write_color(h, s.stroke);
    h.write_f64(s.stroke_width);
    h.write_u8(u8::from(s.dashed));
    h.write_str(s.label.unwrap_or_default());
    h.write_f64(s.opacity);
}

#[cfg(test)]
#[path = "../../tests/unit/render/frame.rs"]
mod tests;
