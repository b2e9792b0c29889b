#![forbid(unsafe_code)]

use super::{MemoryMap, SvgRenderOptions};

#[derive(Debug, thiserror::Error)]
pub enum RasterError {
    #[error("failed to parse SVG")]
    SvgParse,
    #[error("failed to allocate pixmap for raster rendering")]
    PixmapAlloc,
    #[error("failed to encode PNG")]
    PngEncode,
}

pub type Result<T> = std::result::Result<T, RasterError>;

#[derive(Debug, Clone)]
pub struct RasterOptions {
    pub scale: f32,
    /// Fill painted under the document; `None` keeps transparency.
    pub background: Option<String>,
}

impl Default for RasterOptions {
    fn default() -> Self {
        Self {
            scale: 1.0,
            background: None,
        }
    }
}

/// Rasterizes the map's current state. `:hover` rules have no effect here; only the
/// hover state held by the canvas shows.
pub fn render_png(
    map: &MemoryMap,
    svg_options: &SvgRenderOptions,
    raster: &RasterOptions,
) -> Result<Vec<u8>> {
    let svg = super::render_svg(map, svg_options);
    svg_to_png(&svg, raster)
}

pub fn svg_to_png(svg: &str, options: &RasterOptions) -> Result<Vec<u8>> {
    let pixmap = svg_to_pixmap(svg, options.scale, options.background.as_deref())?;
    pixmap.encode_png().map_err(|_| RasterError::PngEncode)
}

fn svg_to_pixmap(svg: &str, scale: f32, background: Option<&str>) -> Result<tiny_skia::Pixmap> {
    let mut opt = usvg::Options::default();
    opt.fontdb_mut().load_system_fonts();
    opt.font_family = "Arial".to_string();

    let tree = usvg::Tree::from_str(svg, &opt).map_err(|_| RasterError::SvgParse)?;

    let scale = if scale.is_finite() && scale > 0.0 { scale } else { 1.0 };
    let size = tree.size();
    let width_px = (size.width() * scale).ceil().max(1.0) as u32;
    let height_px = (size.height() * scale).ceil().max(1.0) as u32;

    let mut pixmap = tiny_skia::Pixmap::new(width_px, height_px).ok_or(RasterError::PixmapAlloc)?;
    if let Some(color) = background.and_then(parse_tiny_skia_color) {
        pixmap.fill(color);
    }

    resvg::render(&tree, tiny_skia::Transform::from_scale(scale, scale), &mut pixmap.as_mut());
    Ok(pixmap)
}

fn parse_tiny_skia_color(text: &str) -> Option<tiny_skia::Color> {
    let s = text.trim().to_ascii_lowercase();
    match s.as_str() {
        "transparent" => return Some(tiny_skia::Color::TRANSPARENT),
        "white" => return Some(tiny_skia::Color::WHITE),
        "black" => return Some(tiny_skia::Color::BLACK),
        _ => {}
    }

    let bytes = s.strip_prefix('#')?.as_bytes();
    let digit = |c: u8| (c as char).to_digit(16).map(|v| v as u8);
    let pair = |i: usize| Some((digit(*bytes.get(i)?)? << 4) | digit(*bytes.get(i + 1)?)?);
    let single = |i: usize| digit(*bytes.get(i)?).map(|v| (v << 4) | v);
    let [r, g, b, a] = match bytes.len() {
        3 => [single(0)?, single(1)?, single(2)?, 255],
        4 => [single(0)?, single(1)?, single(2)?, single(3)?],
        6 => [pair(0)?, pair(2)?, pair(4)?, 255],
        8 => [pair(0)?, pair(2)?, pair(4)?, pair(6)?],
        _ => return None,
    };
    Some(tiny_skia::Color::from_rgba8(r, g, b, a))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn svg_to_png_produces_png_signature() {
        let svg = r#"<svg xmlns="http://www.w3.org/2000/svg" width="10" height="10" viewBox="0 0 10 10"><rect width="10" height="10" fill="black"/></svg>"#;
        let bytes = svg_to_png(svg, &RasterOptions::default()).unwrap();
        assert!(bytes.starts_with(b"\x89PNG\r\n\x1a\n"));
    }

    #[test]
    fn invalid_svg_is_a_parse_error() {
        let err = svg_to_png("<not-svg", &RasterOptions::default()).unwrap_err();
        assert!(matches!(err, RasterError::SvgParse));
    }

    #[test]
    fn colors_parse_in_short_and_long_hex() {
        let c = parse_tiny_skia_color("#fff").expect("short");
        assert_eq!(c.alpha(), 1.0);
        let c = parse_tiny_skia_color("#9be9ff80").expect("long");
        assert!((c.alpha() - 128.0 / 255.0).abs() < 1e-6);
        assert!(parse_tiny_skia_color("teal").is_none());
    }

    #[test]
    fn map_rasterizes_at_scale() {
        let map = super::super::snapshot(Default::default(), Some("1")).expect("map");
        let raster = RasterOptions {
            scale: 0.5,
            background: Some("white".to_string()),
        };
        let png = render_png(&map, &SvgRenderOptions::default(), &raster).expect("png");
        assert!(png.starts_with(b"\x89PNG\r\n\x1a\n"));
    }
}
