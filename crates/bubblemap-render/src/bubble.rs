//! Per-node bubble renderer: memoized outline, label, hover state and detail card.

use crate::text::{TextMeasurer, TextStyle, wrap_lines};
use bubblemap_core::geom::{self, Point, Rect, Size};
use bubblemap_core::{BubbleNode, Category, NodeDetails, OrganicShape};
use serde::Serialize;

pub const HOVER_SCALE: f64 = 1.05;
pub const HOVER_Z_INDEX: i32 = 50;
pub const LABEL_PADDING_X: f64 = 16.0;

pub const CARD_GAP: f64 = 16.0;
pub const CARD_WIDTH: f64 = 256.0;
pub const CARD_PADDING: f64 = 20.0;
pub const CARD_RADIUS: f64 = 16.0;
/// Horizontal offset of the card while it is hidden; it slides in to 0 on hover.
pub const CARD_HIDDEN_OFFSET: f64 = 8.0;
pub const ANCHOR_RADIUS: f64 = 3.0;

const EXAMPLE_BOX_PADDING: f64 = 12.0;
const EXAMPLE_BOX_BORDER: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum HoverState {
    #[default]
    Idle,
    Hovered,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CardVisual {
    pub visible: bool,
    pub opacity: f64,
    pub translate_x: f64,
    /// Whether the card takes part in pointer hit-testing.
    pub interactive: bool,
}

/// Everything about a bubble's appearance that depends on hover state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BubbleVisual {
    pub state: HoverState,
    pub z_index: i32,
    pub scale: f64,
    pub shadow: bool,
    /// `None` when the node has no details; such nodes never show a card.
    pub card: Option<CardVisual>,
}

impl BubbleVisual {
    pub fn derive(state: HoverState, has_card: bool) -> Self {
        let hovered = state == HoverState::Hovered;
        let card = has_card.then_some(CardVisual {
            visible: hovered,
            opacity: if hovered { 1.0 } else { 0.0 },
            translate_x: if hovered { 0.0 } else { CARD_HIDDEN_OFFSET },
            interactive: hovered,
        });
        Self {
            state,
            z_index: if hovered { HOVER_Z_INDEX } else { 0 },
            scale: if hovered { HOVER_SCALE } else { 1.0 },
            shadow: hovered,
            card,
        }
    }

    pub fn card_visible(&self) -> bool {
        self.card.is_some_and(|c| c.visible)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CardRole {
    Category,
    Title,
    Description,
    Example,
    Translation,
}

impl CardRole {
    pub fn class(self) -> &'static str {
        match self {
            CardRole::Category => "card-category",
            CardRole::Title => "card-title",
            CardRole::Description => "card-description",
            CardRole::Example => "card-example",
            CardRole::Translation => "card-translation",
        }
    }
}

/// One text block of the card, positioned relative to the card's top-left.
#[derive(Debug, Clone, Serialize)]
pub struct CardRow {
    pub role: CardRole,
    pub lines: Vec<String>,
    pub x: f64,
    pub y: f64,
    pub font_size: f64,
    pub line_height: f64,
    pub bold: bool,
    pub italic: bool,
}

impl CardRow {
    pub fn height(&self) -> f64 {
        self.lines.len() as f64 * self.line_height
    }
}

/// Card geometry in node-local coordinates (origin at the bubble's top-left).
#[derive(Debug, Clone, Serialize)]
pub struct CardLayout {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Category, title, description, example, translation, in that order.
    pub rows: Vec<CardRow>,
    /// Example/translation panel, relative to the card.
    pub example_box: Rect,
}

impl CardLayout {
    pub fn new(details: &NodeDetails, diameter: f64, measurer: &dyn TextMeasurer) -> Self {
        let inner_w = CARD_WIDTH - 2.0 * CARD_PADDING;
        let mut rows = Vec::with_capacity(5);
        let mut y = CARD_PADDING;

        let mut push = |role: CardRole,
                        text: &str,
                        style: TextStyle,
                        italic: bool,
                        x: f64,
                        y: &mut f64,
                        max_w: f64| {
            let row = CardRow {
                role,
                lines: wrap_lines(measurer, text, &style, max_w),
                x,
                y: *y,
                font_size: style.font_size,
                line_height: style.line_height_px(),
                bold: style.bold,
                italic,
            };
            *y += row.height();
            rows.push(row);
        };

        let caption = details.category.to_uppercase();
        let caption_style = TextStyle::new(10.0).bold().letter_spacing(1.0);
        push(CardRole::Category, &caption, caption_style, false, CARD_PADDING, &mut y, inner_w);

        y += 4.0;
        let title_style = TextStyle::new(18.0).bold().line_height(28.0 / 18.0);
        push(CardRole::Title, &details.title, title_style, false, CARD_PADDING, &mut y, inner_w);

        y += 8.0;
        let desc_style = TextStyle::new(12.0).line_height(1.625);
        push(
            CardRole::Description,
            &details.description,
            desc_style,
            false,
            CARD_PADDING,
            &mut y,
            inner_w,
        );

        y += 12.0;
        let box_top = y;
        let box_inner_x = CARD_PADDING + EXAMPLE_BOX_BORDER + EXAMPLE_BOX_PADDING;
        let box_inner_w = inner_w - 2.0 * (EXAMPLE_BOX_BORDER + EXAMPLE_BOX_PADDING);
        y += EXAMPLE_BOX_BORDER + EXAMPLE_BOX_PADDING;
        let quoted = format!("\"{}\"", details.example);
        let example_style = TextStyle::new(12.0).line_height(16.0 / 12.0);
        push(CardRole::Example, &quoted, example_style, true, box_inner_x, &mut y, box_inner_w);

        y += 4.0;
        let translation_style = TextStyle::new(10.0);
        push(
            CardRole::Translation,
            &details.translation,
            translation_style,
            false,
            box_inner_x,
            &mut y,
            box_inner_w,
        );
        y += EXAMPLE_BOX_PADDING + EXAMPLE_BOX_BORDER;
        let example_box = Rect::new(geom::point(CARD_PADDING, box_top), Size::new(inner_w, y - box_top));

        Self {
            x: diameter + CARD_GAP,
            y: 0.0,
            width: CARD_WIDTH,
            height: y + CARD_PADDING,
            rows,
            example_box,
        }
    }

    pub fn row(&self, role: CardRole) -> Option<&CardRow> {
        self.rows.iter().find(|r| r.role == role)
    }
}

/// The seam the canvas uses to draw and hit-test a node of some registered kind.
pub trait NodeRenderer {
    fn node_id(&self) -> &str;

    /// The node's own box; decorations such as the hover card are not included.
    fn box_size(&self) -> Size;

    /// `local` is relative to the node's top-left corner.
    fn hit_test(&self, local: Point) -> bool;

    /// Returns whether the state changed.
    fn on_pointer_enter(&mut self) -> bool;

    /// Returns whether the state changed.
    fn on_pointer_leave(&mut self) -> bool;

    fn hover_state(&self) -> HoverState;

    fn z_index(&self) -> i32;

    fn write_svg(&self, out: &mut String, node: &BubbleNode);
}

#[derive(Debug, Clone)]
pub struct BubbleRenderer {
    id: String,
    category: Category,
    diameter: f64,
    shape: OrganicShape,
    label_lines: Vec<String>,
    label_style: TextStyle,
    card: Option<CardLayout>,
    state: HoverState,
}

impl BubbleRenderer {
    pub fn new(node: &BubbleNode, measurer: &dyn TextMeasurer) -> Self {
        let diameter = node.diameter();
        let label_style = TextStyle::new(16.0).bold().line_height(1.25);
        let label_w = (diameter - 2.0 * LABEL_PADDING_X).max(1.0);
        if node.category == Category::Unknown {
            tracing::warn!(node = node.id.as_str(), "bubble has no known category; using neutral style");
        }
        Self {
            id: node.id.clone(),
            category: node.category,
            diameter,
            shape: OrganicShape::from_id(&node.id),
            label_lines: wrap_lines(measurer, &node.label, &label_style, label_w),
            label_style,
            card: node
                .details
                .as_ref()
                .map(|d| CardLayout::new(d, diameter, measurer)),
            state: HoverState::Idle,
        }
    }

    pub fn boxed(node: &BubbleNode, measurer: &dyn TextMeasurer) -> Box<dyn NodeRenderer> {
        Box::new(Self::new(node, measurer))
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn diameter(&self) -> f64 {
        self.diameter
    }

    pub fn shape(&self) -> OrganicShape {
        self.shape
    }

    pub fn label_lines(&self) -> &[String] {
        &self.label_lines
    }

    pub fn label_style(&self) -> &TextStyle {
        &self.label_style
    }

    pub fn card_layout(&self) -> Option<&CardLayout> {
        self.card.as_ref()
    }

    pub fn visual(&self) -> BubbleVisual {
        BubbleVisual::derive(self.state, self.card.is_some())
    }

    fn set_state(&mut self, next: HoverState) -> bool {
        if self.state == next {
            return false;
        }
        tracing::trace!(node = self.id.as_str(), from = ?self.state, to = ?next, "hover");
        self.state = next;
        true
    }
}

impl NodeRenderer for BubbleRenderer {
    fn node_id(&self) -> &str {
        &self.id
    }

    fn box_size(&self) -> Size {
        Size::new(self.diameter, self.diameter)
    }

    fn hit_test(&self, local: Point) -> bool {
        let visual = self.visual();
        let grow = (visual.scale - 1.0) * self.diameter / 2.0;
        let body = Rect::new(Point::origin(), self.box_size()).inflate(grow, grow);
        if body.contains(local) {
            return true;
        }
        match (&self.card, visual.card) {
            (Some(card), Some(cv)) if cv.interactive => Rect::new(
                geom::point(card.x + cv.translate_x, card.y),
                Size::new(card.width, card.height),
            )
            .contains(local),
            _ => false,
        }
    }

    fn on_pointer_enter(&mut self) -> bool {
        self.set_state(HoverState::Hovered)
    }

    fn on_pointer_leave(&mut self) -> bool {
        self.set_state(HoverState::Idle)
    }

    fn hover_state(&self) -> HoverState {
        self.state
    }

    fn z_index(&self) -> i32 {
        self.visual().z_index
    }

    fn write_svg(&self, out: &mut String, node: &BubbleNode) {
        crate::svg::write_bubble_node(out, self, node);
    }
}
