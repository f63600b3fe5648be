use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Write as _;

use crate::{
    foundation::core::{Canvas, Color, Point},
    foundation::error::{VizError, VizResult},
    foundation::ids::EntityId,
    render::frame::{Element, Shape},
    render::surface::DrawSurface,
};

const ARROW_HEAD: f64 = 10.0;
const FONT_SIZE: f64 = 14.0;

/// Surface that retains elements and serializes them as an SVG document.
#[derive(Clone, Debug)]
pub struct SvgSurface {
    canvas: Canvas,
    background: Color,
    elements: BTreeMap<EntityId, Element>,
    frames: u64,
}

impl Default for SvgSurface {
    fn default() -> Self {
        Self {
            canvas: Canvas::default(),
            background: Color::TRANSPARENT,
            elements: BTreeMap::new(),
            frames: 0,
        }
    }
}

impl SvgSurface {
    /// Empty surface.
    pub fn new() -> Self {
        Self::default()
    }

    /// Retained element for `id`.
    pub fn element(&self, id: &EntityId) -> Option<&Element> {
        self.elements.get(id)
    }

    /// Number of retained elements.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// True when nothing is retained.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Frames presented so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Current contents as a standalone SVG document.
    pub fn to_svg(&self) -> VizResult<String> {
        let mut order: Vec<&Element> = self.elements.values().collect();
        order.sort_by(|a, b| a.z.cmp(&b.z).then_with(|| a.id.cmp(&b.id)));

        let (w, h) = (self.canvas.width, self.canvas.height);
        let mut out = String::new();
        let fmt_err = |e: std::fmt::Error| VizError::render(format!("svg write failed: {e}"));
        writeln!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#
        )
        .map_err(fmt_err)?;
        writeln!(
            out,
            r#"<rect width="{w}" height="{h}" fill="{}"/>"#,
            paint_value(self.background)
        )
        .map_err(fmt_err)?;
        for e in order {
            write_element(&mut out, e).map_err(fmt_err)?;
        }
        out.push_str("</svg>\n");
        Ok(out)
    }
}

impl DrawSurface for SvgSurface {
    fn begin(&mut self, canvas: Canvas, background: Color) -> VizResult<()> {
        self.canvas = canvas;
        self.background = background;
        Ok(())
    }

    fn upsert(&mut self, element: &Element) -> VizResult<()> {
        self.elements.insert(element.id.clone(), element.clone());
        Ok(())
    }

    fn remove(&mut self, id: &EntityId) -> VizResult<()> {
        self.elements.remove(id);
        Ok(())
    }

    fn retained(&self) -> BTreeSet<EntityId> {
        self.elements.keys().cloned().collect()
    }

    fn finish(&mut self) -> VizResult<()> {
        self.frames += 1;
        Ok(())
    }
}

fn write_element(out: &mut String, e: &Element) -> std::fmt::Result {
    let s = &e.style;
    let mut paint = format!(
        r#"fill="{}" stroke="{}" stroke-width="{:.2}" opacity="{:.2}""#,
        paint_value(s.fill),
        paint_value(s.stroke),
        s.stroke_width,
        s.opacity
    );
    if s.dashed {
        paint.push_str(r#" stroke-dasharray="6 4""#);
    }
    let id = xml_escape(&e.id.to_string());

    match e.shape {
        Shape::Circle { center, radius } => writeln!(
            out,
            r#"<circle id="{id}" cx="{:.2}" cy="{:.2}" r="{:.2}" {paint}/>"#,
            center.x, center.y, radius
        )?,
        Shape::Bar { rect } | Shape::Box { rect } => {
            let rx = if matches!(e.shape, Shape::Box { .. }) {
                6.0
            } else {
                2.0
            };
            writeln!(
                out,
                r#"<rect id="{id}" x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" rx="{rx}" {paint}/>"#,
                rect.x0,
                rect.y0,
                rect.width(),
                rect.height()
            )?
        }
        Shape::Line { from, to } => writeln!(
            out,
            r#"<line id="{id}" x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" {paint}/>"#,
            from.x, from.y, to.x, to.y
        )?,
        Shape::Arrow { from, to } => {
            writeln!(
                out,
                r#"<line id="{id}" x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" {paint}/>"#,
                from.x, from.y, to.x, to.y
            )?;
            let [a, b] = arrow_head(from, to);
            writeln!(
                out,
                r#"<path d="M {:.2} {:.2} L {:.2} {:.2} L {:.2} {:.2} Z" fill="{}" opacity="{:.2}"/>"#,
                to.x,
                to.y,
                a.x,
                a.y,
                b.x,
                b.y,
                paint_value(s.stroke),
                s.opacity
            )?;
        }
    }

    let anchor = e.shape.anchor();
    if let Some(text) = &e.text {
        writeln!(
            out,
            r#"<text x="{:.2}" y="{:.2}" font-family="sans-serif" font-size="{FONT_SIZE}" text-anchor="middle" dominant-baseline="central">{}</text>"#,
            anchor.x,
            anchor.y,
            xml_escape(text)
        )?;
    }
    if let Some(caption) = s.label {
        writeln!(
            out,
            r#"<text x="{:.2}" y="{:.2}" font-family="sans-serif" font-size="{:.0}" text-anchor="middle">{}</text>"#,
            anchor.x,
            caption_y(&e.shape),
            FONT_SIZE * 0.8,
            xml_escape(caption)
        )?;
    }
    Ok(())
}

fn paint_value(c: Color) -> String {
    if c.a == 0 {
        "none".to_owned()
    } else {
        c.to_hex()
    }
}

fn arrow_head(from: Point, to: Point) -> [Point; 2] {
    let d = to - from;
    let len = d.hypot();
    if len < 1e-9 {
        return [to, to];
    }
    let dir = d / len;
    let normal = dir.turn_90();
    let base = to - dir * ARROW_HEAD;
    [
        base + normal * (ARROW_HEAD * 0.5),
        base - normal * (ARROW_HEAD * 0.5),
    ]
}

fn caption_y(shape: &Shape) -> f64 {
    match *shape {
        Shape::Circle { center, radius } => center.y - radius - 6.0,
        Shape::Bar { rect } | Shape::Box { rect } => rect.y0 - 6.0,
        Shape::Line { .. } | Shape::Arrow { .. } => shape.anchor().y - 6.0,
    }
}

fn xml_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/svg.rs"]
mod tests;
