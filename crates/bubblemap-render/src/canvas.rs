//! Headless graph canvas: node placement, renderer registry, camera and pointer dispatch.

use crate::Result;
use crate::bubble::{HoverState, NodeRenderer};
use crate::text::TextMeasurer;
use crate::viewport::{Camera, CameraAnimation, FitViewOptions};
use bubblemap_core::geom::{self, Point, ScreenPoint, ScreenSize, ScreenVector};
use bubblemap_core::{BubbleNode, NodeSet};
use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CanvasConfig {
    pub min_zoom: f64,
    pub max_zoom: f64,
    /// Frame all nodes immediately when the canvas mounts, before any mount hook runs.
    pub fit_view_on_init: bool,
    pub fit_view_padding: f64,
    pub fit_view_duration_ms: f64,
    /// CSS color painted behind the canvas.
    pub background: String,
    pub hide_attribution: bool,
    pub viewport_width: f64,
    pub viewport_height: f64,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            min_zoom: 0.5,
            max_zoom: 1.5,
            fit_view_on_init: true,
            fit_view_padding: 0.2,
            fit_view_duration_ms: 800.0,
            background: "transparent".to_string(),
            hide_attribution: true,
            viewport_width: 1280.0,
            viewport_height: 800.0,
        }
    }
}

impl CanvasConfig {
    /// Parses a (possibly partial) JSON object; missing keys keep their defaults.
    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn zoom_bounds(&self) -> (f64, f64) {
        let min = self.min_zoom.max(f64::EPSILON);
        (min, self.max_zoom.max(min))
    }

    pub fn fit_view_options(&self) -> FitViewOptions {
        FitViewOptions {
            padding: self.fit_view_padding,
            duration_ms: self.fit_view_duration_ms,
        }
    }

    pub fn viewport_size(&self) -> ScreenSize {
        ScreenSize::new(self.viewport_width.max(1.0), self.viewport_height.max(1.0))
    }
}

pub type NodeRendererFactory = fn(&BubbleNode, &dyn TextMeasurer) -> Box<dyn NodeRenderer>;

/// Maps a node's `kind` to the renderer that draws it.
#[derive(Clone, Default)]
pub struct NodeTypeRegistry {
    factories: FxHashMap<String, NodeRendererFactory>,
}

impl NodeTypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, kind: impl Into<String>, factory: NodeRendererFactory) -> Self {
        self.register(kind, factory);
        self
    }

    pub fn register(&mut self, kind: impl Into<String>, factory: NodeRendererFactory) {
        self.factories.insert(kind.into(), factory);
    }

    pub fn get(&self, kind: &str) -> Option<NodeRendererFactory> {
        self.factories.get(kind).copied()
    }

    pub fn contains(&self, kind: &str) -> bool {
        self.factories.contains_key(kind)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub id: String,
    pub source: String,
    pub target: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum NodeChange {
    Position { id: String, position: Point },
    Remove { id: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EdgeChange {
    Remove { id: String },
}

pub struct Canvas {
    config: CanvasConfig,
    nodes: NodeSet,
    edges: Vec<Edge>,
    renderers: IndexMap<String, Box<dyn NodeRenderer>>,
    camera: Camera,
    animation: Option<CameraAnimation>,
    viewport: ScreenSize,
    mounted: bool,
    hovered: Option<String>,
}

impl Canvas {
    pub fn new(
        config: CanvasConfig,
        registry: &NodeTypeRegistry,
        nodes: NodeSet,
        edges: Vec<Edge>,
        measurer: &dyn TextMeasurer,
    ) -> Self {
        let mut renderers = IndexMap::with_capacity(nodes.len());
        for node in nodes.iter() {
            match registry.get(&node.kind) {
                Some(factory) => {
                    renderers.insert(node.id.clone(), factory(node, measurer));
                }
                None => {
                    tracing::warn!(
                        node = node.id.as_str(),
                        kind = node.kind.as_str(),
                        "no renderer registered for node kind; node is skipped"
                    );
                }
            }
        }
        let viewport = config.viewport_size();
        Self {
            config,
            nodes,
            edges,
            renderers,
            camera: Camera::default(),
            animation: None,
            viewport,
            mounted: false,
            hovered: None,
        }
    }

    pub fn config(&self) -> &CanvasConfig {
        &self.config
    }

    pub fn nodes(&self) -> &NodeSet {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn renderer(&self, id: &str) -> Option<&dyn NodeRenderer> {
        self.renderers.get(id).map(|r| r.as_ref())
    }

    pub fn viewport_size(&self) -> ScreenSize {
        self.viewport
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn hovered(&self) -> Option<&str> {
        self.hovered.as_deref()
    }

    pub fn hover_state(&self, id: &str) -> Option<HoverState> {
        self.renderer(id).map(|r| r.hover_state())
    }

    /// Completes first layout and fires `on_mount` exactly once. Later calls return `false`.
    pub fn mount(&mut self, viewport: ScreenSize, on_mount: impl FnOnce(&mut Canvas)) -> bool {
        if self.mounted {
            return false;
        }
        self.viewport = viewport;
        self.mounted = true;
        if self.config.fit_view_on_init {
            self.fit_view(FitViewOptions {
                padding: self.config.fit_view_padding,
                duration_ms: 0.0,
            });
        }
        tracing::debug!(
            nodes = self.nodes.len(),
            width = viewport.width,
            height = viewport.height,
            "canvas mounted"
        );
        on_mount(self);
        true
    }

    pub fn resize(&mut self, viewport: ScreenSize) {
        self.viewport = viewport;
    }

    /// The camera as currently displayed, mid-animation included.
    pub fn camera(&self) -> Camera {
        match &self.animation {
            Some(anim) => anim.current(),
            None => self.camera,
        }
    }

    /// Where the camera will settle once any running animation completes.
    pub fn target_camera(&self) -> Camera {
        match &self.animation {
            Some(anim) => anim.to,
            None => self.camera,
        }
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Reframes the camera to fit every rendered node. Replaces any in-flight animation.
    pub fn fit_view(&mut self, options: FitViewOptions) {
        let rendered = self
            .nodes
            .iter()
            .filter(|n| self.renderers.contains_key(n.id.as_str()))
            .map(BubbleNode::bounds);
        let Some(bounds) = geom::union_all(rendered) else {
            return;
        };
        let (min_zoom, max_zoom) = self.config.zoom_bounds();
        let target = Camera::fit_bounds(bounds, self.viewport, options.padding, min_zoom, max_zoom);
        tracing::debug!(
            x = target.x,
            y = target.y,
            zoom = target.zoom,
            duration_ms = options.duration_ms,
            "fit view"
        );
        if options.duration_ms <= 0.0 {
            self.camera = target;
            self.animation = None;
        } else {
            self.animation = Some(CameraAnimation::new(self.camera(), target, options.duration_ms));
        }
    }

    /// Steps camera animations. Returns whether one is still running.
    pub fn advance(&mut self, dt_ms: f64) -> bool {
        let Some(anim) = self.animation.as_mut() else {
            return false;
        };
        anim.advance(dt_ms);
        if anim.is_finished() {
            self.camera = anim.to;
            self.animation = None;
            return false;
        }
        true
    }

    fn freeze_camera(&mut self) {
        self.camera = self.camera();
        self.animation = None;
    }

    /// Multiplies the zoom, keeping the world point under `at` fixed. Clamped to bounds.
    pub fn zoom_at(&mut self, factor: f64, at: ScreenPoint) {
        if !(factor.is_finite() && factor > 0.0) {
            return;
        }
        self.freeze_camera();
        let (min_zoom, max_zoom) = self.config.zoom_bounds();
        let anchor = self.camera.screen_to_world(at);
        let zoom = (self.camera.zoom * factor).clamp(min_zoom, max_zoom);
        self.camera = Camera {
            x: at.x - anchor.x * zoom,
            y: at.y - anchor.y * zoom,
            zoom,
        };
    }

    pub fn pan_by(&mut self, delta: ScreenVector) {
        self.freeze_camera();
        self.camera.x += delta.x;
        self.camera.y += delta.y;
    }

    /// Renderers in paint order: resting nodes in authoring order, raised ones last.
    pub fn paint_order(&self) -> Vec<(&BubbleNode, &dyn NodeRenderer)> {
        let mut out: Vec<(&BubbleNode, &dyn NodeRenderer)> = self
            .nodes
            .iter()
            .filter_map(|n| self.renderers.get(n.id.as_str()).map(|r| (n, r.as_ref())))
            .collect();
        out.sort_by_key(|(_, r)| r.z_index());
        out
    }

    /// Topmost node whose hover region contains `world`.
    pub fn node_at(&self, world: Point) -> Option<&str> {
        self.paint_order()
            .into_iter()
            .rev()
            .find(|(node, r)| r.hit_test(world - node.position.to_vector()))
            .map(|(node, _)| node.id.as_str())
    }

    /// Delivers pointer-enter/leave to the renderers. Returns the hovered node id, if any.
    pub fn pointer_move(&mut self, at: ScreenPoint) -> Option<&str> {
        let world = self.camera().screen_to_world(at);
        let hit = self.node_at(world).map(str::to_string);
        self.set_hovered(hit);
        self.hovered.as_deref()
    }

    pub fn pointer_leave(&mut self) {
        self.set_hovered(None);
    }

    fn set_hovered(&mut self, next: Option<String>) {
        if self.hovered == next {
            return;
        }
        if let Some(prev) = self.hovered.take() {
            if let Some(r) = self.renderers.get_mut(prev.as_str()) {
                r.on_pointer_leave();
            }
        }
        if let Some(id) = next.as_deref() {
            if let Some(r) = self.renderers.get_mut(id) {
                r.on_pointer_enter();
            }
        }
        self.hovered = next;
    }

    pub fn apply_node_changes(&mut self, changes: &[NodeChange]) {
        for change in changes {
            match change {
                NodeChange::Position { id, position } => {
                    self.nodes.set_position(id, *position);
                }
                NodeChange::Remove { id } => {
                    if self.hovered.as_deref() == Some(id.as_str()) {
                        self.hovered = None;
                    }
                    self.renderers.shift_remove(id.as_str());
                    self.nodes.remove(id);
                }
            }
        }
    }

    pub fn apply_edge_changes(&mut self, changes: &[EdgeChange]) {
        for change in changes {
            match change {
                EdgeChange::Remove { id } => self.edges.retain(|e| &e.id != id),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bubble::BubbleRenderer;
    use crate::text::DeterministicTextMeasurer;
    use bubblemap_core::geom::screen_point;
    use bubblemap_core::{BUBBLE_KIND, BubbleSize, Category};

    fn registry() -> NodeTypeRegistry {
        NodeTypeRegistry::new().with(BUBBLE_KIND, BubbleRenderer::boxed)
    }

    fn canvas(nodes: Vec<BubbleNode>) -> Canvas {
        Canvas::new(
            CanvasConfig::default(),
            &registry(),
            NodeSet::new(nodes).expect("nodes"),
            Vec::new(),
            &DeterministicTextMeasurer::default(),
        )
    }

    fn two_nodes() -> Vec<BubbleNode> {
        vec![
            BubbleNode::new("a", "A", Category::Verb).at(0.0, 0.0),
            BubbleNode::new("b", "B", Category::Noun)
                .at(100.0, 0.0)
                .with_size(BubbleSize::Small),
        ]
    }

    #[test]
    fn config_json_keeps_defaults_for_missing_keys() {
        let cfg = CanvasConfig::from_json_str(r#"{"maxZoom": 2.0, "background": "white"}"#)
            .expect("config");
        assert_eq!(cfg.max_zoom, 2.0);
        assert_eq!(cfg.min_zoom, 0.5);
        assert_eq!(cfg.background, "white");
        assert!(cfg.hide_attribution);
        assert!(CanvasConfig::from_json_str("[1, 2]").is_err());
    }

    #[test]
    fn unregistered_kinds_are_skipped() {
        let c = canvas(vec![
            BubbleNode::new("a", "A", Category::Verb),
            BubbleNode::new("s", "S", Category::Verb).with_kind("sticky-note"),
        ]);
        assert!(c.renderer("a").is_some());
        assert!(c.renderer("s").is_none());
        assert_eq!(c.paint_order().len(), 1);
    }

    #[test]
    fn fit_ignores_unrendered_nodes() {
        let mut c = canvas(vec![
            BubbleNode::new("a", "A", Category::Verb).at(0.0, 0.0),
            BubbleNode::new("s", "S", Category::Verb)
                .with_kind("sticky-note")
                .at(5000.0, 5000.0),
        ]);
        assert!(c.mount(ScreenSize::new(800.0, 600.0), |_| {}));
        let cam = c.camera();
        assert_eq!(cam.zoom, 1.5);
        let center = cam.world_to_screen(geom::point(65.0, 65.0));
        assert!((center.x - 400.0).abs() < 1e-9);
        assert!((center.y - 300.0).abs() < 1e-9);
    }

    #[test]
    fn mount_hook_fires_once() {
        let mut c = canvas(two_nodes());
        let mut calls = 0;
        assert!(c.mount(ScreenSize::new(800.0, 600.0), |_| calls += 1));
        assert!(!c.mount(ScreenSize::new(800.0, 600.0), |_| calls += 1));
        assert_eq!(calls, 1);
        assert!(c.is_mounted());
    }

    #[test]
    fn zoom_is_clamped_to_bounds() {
        let mut c = canvas(two_nodes());
        c.zoom_at(100.0, screen_point(10.0, 10.0));
        assert_eq!(c.camera().zoom, 1.5);
        c.zoom_at(0.0001, screen_point(10.0, 10.0));
        assert_eq!(c.camera().zoom, 0.5);
    }

    #[test]
    fn zoom_keeps_anchor_fixed() {
        let mut c = canvas(two_nodes());
        let at = screen_point(200.0, 120.0);
        let before = c.camera().screen_to_world(at);
        c.zoom_at(1.25, at);
        let after = c.camera().screen_to_world(at);
        assert!((before.x - after.x).abs() < 1e-9);
        assert!((before.y - after.y).abs() < 1e-9);
    }

    #[test]
    fn pointer_hover_is_exclusive_and_latest_wins() {
        let mut c = canvas(two_nodes());
        // identity camera: screen == world
        assert_eq!(c.pointer_move(screen_point(10.0, 10.0)), Some("a"));
        assert_eq!(c.hover_state("a"), Some(HoverState::Hovered));
        // the overlap at x = 120 stays with the raised node
        assert_eq!(c.pointer_move(screen_point(120.0, 10.0)), Some("a"));
        assert_eq!(c.pointer_move(screen_point(180.0, 10.0)), Some("b"));
        assert_eq!(c.hover_state("a"), Some(HoverState::Idle));
        assert_eq!(c.hover_state("b"), Some(HoverState::Hovered));
        assert_eq!(c.pointer_move(screen_point(900.0, 900.0)), None);
        assert_eq!(c.hover_state("b"), Some(HoverState::Idle));
    }

    #[test]
    fn hovered_node_is_painted_last() {
        let mut c = canvas(two_nodes());
        c.pointer_move(screen_point(10.0, 10.0));
        let order: Vec<&str> = c.paint_order().iter().map(|(n, _)| n.id.as_str()).collect();
        assert_eq!(order, ["b", "a"]);
    }

    #[test]
    fn node_changes_move_and_remove() {
        let mut c = canvas(two_nodes());
        c.pointer_move(screen_point(10.0, 10.0));
        c.apply_node_changes(&[
            NodeChange::Position {
                id: "b".to_string(),
                position: geom::point(500.0, 500.0),
            },
            NodeChange::Remove {
                id: "a".to_string(),
            },
        ]);
        assert_eq!(c.hovered(), None);
        assert!(c.renderer("a").is_none());
        assert_eq!(c.nodes().get("b").expect("b").position, geom::point(500.0, 500.0));
    }

    #[test]
    fn edge_changes_remove_by_id() {
        let mut c = Canvas::new(
            CanvasConfig::default(),
            &registry(),
            NodeSet::new(two_nodes()).expect("nodes"),
            vec![Edge {
                id: "a-b".to_string(),
                source: "a".to_string(),
                target: "b".to_string(),
            }],
            &DeterministicTextMeasurer::default(),
        );
        c.apply_edge_changes(&[EdgeChange::Remove {
            id: "a-b".to_string(),
        }]);
        assert!(c.edges().is_empty());
    }

    #[test]
    fn fit_view_on_empty_canvas_is_a_no_op() {
        let mut c = canvas(Vec::new());
        c.fit_view(FitViewOptions {
            padding: 0.2,
            duration_ms: 800.0,
        });
        assert!(!c.is_animating());
        assert_eq!(c.camera(), Camera::default());
    }
}
