use super::*;

#[test]
fn rasterizes_a_filled_rect() {
    let svg = r##"<svg xmlns="http://www.w3.org/2000/svg" width="8" height="4">
<rect width="8" height="4" fill="#ff0000"/>
</svg>"##;
    let frame = rasterize_svg(svg).unwrap();
    assert_eq!((frame.width, frame.height), (8, 4));
    assert_eq!(frame.data.len(), 8 * 4 * 4);
    assert!(frame.premultiplied);
    assert_eq!(frame.pixel(3, 2), Some([255, 0, 0, 255]));
    assert_eq!(frame.pixel(8, 0), None);
}

#[test]
fn malformed_svg_is_a_render_error() {
    let err = rasterize_svg("<svg").unwrap_err();
    assert!(err.to_string().starts_with("render error:"), "{err}");
}
