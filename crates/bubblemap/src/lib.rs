#![forbid(unsafe_code)]

//! `bubblemap` renders "Bubble English"-style memory maps without a browser.
//!
//! Nodes live in [`NodeSet`]s (re-exported from `bubblemap-core`); [`render::MemoryMap`]
//! wraps them in a pan/zoom canvas with hover cards and produces SVG or HTML.
//!
//! # Features
//!
//! - `raster`: PNG output via pure-Rust SVG rasterization (`render::raster`)

pub use bubblemap_core::*;

pub mod render {
    pub use bubblemap_render::svg::{SvgRenderOptions, render_html, render_svg};
    pub use bubblemap_render::text::{DeterministicTextMeasurer, TextMeasurer, TextStyle};
    pub use bubblemap_render::{
        BubbleRenderer, BubbleVisual, Camera, Canvas, CanvasConfig, CardVisual, Chrome,
        ChromeAction, ChromeHit, Edge, EdgeChange, Error, FitViewOptions, HoverState, MemoryMap,
        NodeChange, NodeRenderer, NodeTypeRegistry, Result, ViewportController,
    };

    #[cfg(feature = "raster")]
    pub mod raster;

    /// The built-in map, mounted with its intro animation completed.
    ///
    /// When `hover` names a node, the pointer is parked over it so the snapshot shows that
    /// node raised with its card open.
    pub fn snapshot(config: CanvasConfig, hover: Option<&str>) -> Result<MemoryMap> {
        let mut map = MemoryMap::bubble_english_with_config(config)?;
        map.mount();
        map.settle();
        if let Some(id) = hover {
            if !map.hover_node(id) {
                tracing::warn!(node = id, "hover target is not on the map or is covered by chrome");
            }
        }
        Ok(map)
    }

    /// Snapshot of the built-in map as an SVG document with default options.
    pub fn bubble_english_svg(config: CanvasConfig, hover: Option<&str>) -> Result<String> {
        let map = snapshot(config, hover)?;
        Ok(render_svg(&map, &SvgRenderOptions::default()))
    }

    /// Snapshot of the built-in map as a standalone HTML page with default options.
    pub fn bubble_english_html(config: CanvasConfig, hover: Option<&str>) -> Result<String> {
        let map = snapshot(config, hover)?;
        Ok(render_html(&map, &SvgRenderOptions::default()))
    }
}
