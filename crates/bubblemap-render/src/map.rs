//! The memory-map view: canvas + chrome + viewport controller, wired together.

use crate::Result;
use crate::bubble::BubbleRenderer;
use crate::canvas::{Canvas, CanvasConfig, NodeTypeRegistry};
use crate::chrome::{Chrome, ChromeAction, ChromeHit};
use crate::text::{DeterministicTextMeasurer, TextMeasurer};
use crate::viewport::ViewportController;
use bubblemap_core::geom::{ScreenPoint, ScreenSize, ScreenVector};
use bubblemap_core::{BUBBLE_KIND, NodeSet, dataset};
use std::sync::Arc;

pub fn default_registry() -> NodeTypeRegistry {
    NodeTypeRegistry::new().with(BUBBLE_KIND, BubbleRenderer::boxed)
}

pub struct MemoryMap {
    canvas: Canvas,
    chrome: Chrome,
    controller: ViewportController,
    measurer: Arc<dyn TextMeasurer + Send + Sync>,
}

impl MemoryMap {
    /// Builds the view over `nodes`; there are no edges, grouping is spatial only.
    pub fn new(
        nodes: NodeSet,
        config: CanvasConfig,
        measurer: Arc<dyn TextMeasurer + Send + Sync>,
    ) -> Self {
        let controller = ViewportController::new(config.fit_view_options());
        let chrome = Chrome::layout(config.viewport_size(), measurer.as_ref());
        let canvas = Canvas::new(
            config,
            &default_registry(),
            nodes,
            Vec::new(),
            measurer.as_ref(),
        );
        Self {
            canvas,
            chrome,
            controller,
            measurer,
        }
    }

    /// The compiled-in "Bubble English" map with default settings.
    pub fn bubble_english() -> Result<Self> {
        Self::bubble_english_with_config(CanvasConfig::default())
    }

    pub fn bubble_english_with_config(config: CanvasConfig) -> Result<Self> {
        Ok(Self::new(
            dataset::bubble_english()?,
            config,
            Arc::new(DeterministicTextMeasurer::default()),
        ))
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn canvas_mut(&mut self) -> &mut Canvas {
        &mut self.canvas
    }

    pub fn chrome(&self) -> &Chrome {
        &self.chrome
    }

    pub fn controller(&self) -> ViewportController {
        self.controller
    }

    /// Mounts the canvas at its current viewport size; the mount hook centers the view.
    pub fn mount(&mut self) -> bool {
        let size = self.canvas.viewport_size();
        let controller = self.controller;
        self.canvas
            .mount(size, move |canvas| controller.center_view(canvas))
    }

    pub fn resize(&mut self, viewport: ScreenSize) {
        self.canvas.resize(viewport);
        self.chrome = Chrome::layout(viewport, self.measurer.as_ref());
    }

    pub fn center_view(&mut self) {
        self.controller.center_view(&mut self.canvas);
    }

    /// Pointer position in screen space. Chrome controls shadow the canvas beneath them.
    pub fn pointer_move(&mut self, at: ScreenPoint) -> Option<&str> {
        if self.chrome.hit_test(at).is_some() {
            self.canvas.pointer_leave();
            return None;
        }
        self.canvas.pointer_move(at)
    }

    pub fn pointer_leave(&mut self) {
        self.canvas.pointer_leave();
    }

    pub fn click(&mut self, at: ScreenPoint) -> Option<ChromeAction> {
        let Some(ChromeHit::Button(action)) = self.chrome.hit_test(at) else {
            return None;
        };
        match action {
            ChromeAction::Search => tracing::debug!("search is not available yet"),
            ChromeAction::CenterView => self.center_view(),
        }
        Some(action)
    }

    /// Wheel zoom around the pointer. `delta_y < 0` zooms in.
    pub fn wheel(&mut self, at: ScreenPoint, delta_y: f64) {
        if self.chrome.hit_test(at).is_some() {
            return;
        }
        let factor = 2f64.powf(-delta_y * 0.002);
        self.canvas.zoom_at(factor, at);
    }

    pub fn drag_pan(&mut self, delta: ScreenVector) {
        self.canvas.pan_by(delta);
    }

    pub fn advance(&mut self, dt_ms: f64) -> bool {
        self.canvas.advance(dt_ms)
    }

    /// Runs any camera animation to completion.
    pub fn settle(&mut self) {
        self.canvas.advance(f64::INFINITY);
    }

    /// Moves the pointer to the center of node `id` on screen. Returns whether it is hovered.
    pub fn hover_node(&mut self, id: &str) -> bool {
        let Some(node) = self.canvas.nodes().get(id) else {
            return false;
        };
        let center = self.canvas.camera().world_to_screen(node.bounds().center());
        self.pointer_move(center) == Some(id)
    }
}
