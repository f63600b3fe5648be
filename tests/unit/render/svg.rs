use super::*;
use crate::encode::style::Style;
use crate::foundation::core::Rect;
use crate::render::frame::Frame;
use crate::render::surface::present;

fn style(fill: Color) -> Style {
    Style {
        fill,
        stroke: Color::rgb(0, 0, 0),
        stroke_width: 1.0,
        dashed: false,
        label: None,
        opacity: 1.0,
    }
}

fn bar(index: usize, text: &str) -> Element {
    let x = index as f64 * 20.0;
    Element {
        id: EntityId::cell(index),
        shape: Shape::Bar {
            rect: Rect::new(x, 10.0, x + 16.0, 50.0),
        },
        style: style(Color::rgb(0x22, 0xc5, 0x5e)),
        text: Some(text.to_owned()),
        z: 0,
    }
}

#[test]
fn present_removes_stale_elements_and_keeps_the_rest() {
    let canvas = Canvas::new(100, 60).unwrap();
    let mut surface = SvgSurface::new();

    let first = Frame::new(canvas, Color::rgb(255, 255, 255), vec![bar(0, "5"), bar(1, "3"), bar(2, "8")]);
    let stats = present(&mut surface, &first).unwrap();
    assert_eq!((stats.upserted, stats.removed), (3, 0));

    let second = Frame::new(canvas, Color::rgb(255, 255, 255), vec![bar(0, "3"), bar(1, "5")]);
    let stats = present(&mut surface, &second).unwrap();
    assert_eq!((stats.upserted, stats.removed), (2, 1));
    assert_eq!(surface.len(), 2);
    assert!(surface.element(&EntityId::cell(2)).is_none());
    assert_eq!(
        surface.element(&EntityId::cell(0)).unwrap().text.as_deref(),
        Some("3")
    );
    assert_eq!(surface.frames(), 2);
}

#[test]
fn svg_output_escapes_text_and_marks_dashed_strokes() {
    let canvas = Canvas::new(100, 60).unwrap();
    let mut dashed = bar(0, "a<b");
    dashed.style.dashed = true;
    dashed.style.label = Some("pivot");
    let arrow = Element {
        id: EntityId::link("n1", "n2"),
        shape: Shape::Arrow {
            from: Point::new(0.0, 0.0),
            to: Point::new(40.0, 0.0),
        },
        style: style(Color::TRANSPARENT),
        text: None,
        z: 1,
    };
    let frame = Frame::new(canvas, Color::rgb(255, 255, 255), vec![dashed, arrow]);
    let mut surface = SvgSurface::new();
    present(&mut surface, &frame).unwrap();

    let svg = surface.to_svg().unwrap();
    assert!(svg.starts_with("<svg"));
    assert!(svg.contains("a&lt;b"));
    assert!(svg.contains("stroke-dasharray"));
    assert!(svg.contains(">pivot</text>"));
    assert!(svg.contains(r#"id="link:n1-&gt;n2""#));
    assert!(svg.contains(r#"fill="none""#));
    assert!(svg.trim_end().ends_with("</svg>"));
}
