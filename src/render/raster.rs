use std::sync::{Arc, OnceLock};

use crate::foundation::error::{VizError, VizResult};

/// A rasterized frame as RGBA8 pixels.
#[derive(Clone, Debug)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether `data` is premultiplied alpha.
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// Pixel at `(x, y)`, if inside the frame.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        let px = self.data.get(i..i + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }
}

// System font discovery is slow; share one database across calls.
fn fontdb() -> Arc<usvg::fontdb::Database> {
    static DB: OnceLock<Arc<usvg::fontdb::Database>> = OnceLock::new();
    DB.get_or_init(|| {
        let mut db = usvg::fontdb::Database::new();
        db.load_system_fonts();
        tracing::debug!(faces = db.faces().count(), "font database loaded");
        Arc::new(db)
    })
    .clone()
}

const MAX_DIM: u32 = 16_384;

/// Rasterize an SVG document at its intrinsic size into premultiplied RGBA8.
#[tracing::instrument(skip(svg), fields(bytes = svg.len()))]
pub fn rasterize_svg(svg: &str) -> VizResult<FrameRGBA> {
    let opts = usvg::Options {
        fontdb: fontdb(),
        ..Default::default()
    };
    let tree = usvg::Tree::from_str(svg, &opts)
        .map_err(|e| VizError::render(format!("parse svg: {e}")))?;

    let size = tree.size();
    let to_px = |v: f32| -> VizResult<u32> {
        if !v.is_finite() || v <= 0.0 {
            return Err(VizError::render("svg has invalid width/height"));
        }
        Ok((v.ceil() as u32).max(1))
    };
    let (width, height) = (to_px(size.width())?, to_px(size.height())?);
    if width > MAX_DIM || height > MAX_DIM {
        return Err(VizError::render(format!(
            "svg raster size too large: {width}x{height} (max {MAX_DIM}x{MAX_DIM})"
        )));
    }

    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| VizError::render("failed to allocate svg pixmap"))?;
    resvg::render(
        &tree,
        resvg::tiny_skia::Transform::identity(),
        &mut pixmap.as_mut(),
    );

    Ok(FrameRGBA {
        width,
        height,
        data: pixmap.take(),
        premultiplied: true,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/render/raster.rs"]
mod tests;
