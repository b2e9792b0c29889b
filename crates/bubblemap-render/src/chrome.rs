//! Screen-space UI drawn over the canvas: header, action buttons and the category legend.

use crate::text::{TextMeasurer, TextStyle};
use bubblemap_core::Category;
use bubblemap_core::dataset::{SUBTITLE, TITLE};
use bubblemap_core::geom::{ScreenPoint, ScreenRect, ScreenSize, screen_point};
use serde::Serialize;

const EDGE_MARGIN_X: f64 = 40.0;
const TOP_MARGIN: f64 = 32.0;
const BOTTOM_MARGIN: f64 = 40.0;

pub const BUTTON_SIZE: f64 = 44.0;
const BUTTON_GAP: f64 = 16.0;

const LEGEND_PAD_X: f64 = 32.0;
const LEGEND_PAD_Y: f64 = 16.0;
const LEGEND_GAP_X: f64 = 32.0;
const LEGEND_GAP_Y: f64 = 8.0;
const LEGEND_ROW_HEIGHT: f64 = 15.0;
pub const LEGEND_SWATCH: f64 = 10.0;
const LEGEND_SWATCH_GAP: f64 = 8.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ChromeAction {
    /// Reserved; clicking it does nothing yet.
    Search,
    CenterView,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ChromeHit {
    Button(ChromeAction),
    /// The legend swallows pointer events but has no behavior.
    Legend,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChromeButton {
    pub action: ChromeAction,
    pub rect: ScreenRect,
    pub title: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct LegendItem {
    pub category: Category,
    pub label: String,
    pub swatch_center: ScreenPoint,
    pub label_origin: ScreenPoint,
}

#[derive(Debug, Clone, Serialize)]
pub struct Legend {
    pub rect: ScreenRect,
    pub items: Vec<LegendItem>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Header {
    pub title: String,
    pub subtitle: String,
    pub origin: ScreenPoint,
}

#[derive(Debug, Clone, Serialize)]
pub struct Chrome {
    pub header: Header,
    pub buttons: Vec<ChromeButton>,
    pub legend: Legend,
}

pub fn legend_label_style() -> TextStyle {
    TextStyle::new(10.0).bold().letter_spacing(1.0)
}

impl Chrome {
    pub fn layout(viewport: ScreenSize, measurer: &dyn TextMeasurer) -> Self {
        let header = Header {
            title: TITLE.to_string(),
            subtitle: SUBTITLE.to_uppercase(),
            origin: screen_point(EDGE_MARGIN_X, TOP_MARGIN),
        };

        let center_x = viewport.width - EDGE_MARGIN_X - BUTTON_SIZE;
        let search_x = center_x - BUTTON_GAP - BUTTON_SIZE;
        let button = |action, x: f64, title| ChromeButton {
            action,
            rect: ScreenRect::new(
                screen_point(x, TOP_MARGIN),
                ScreenSize::new(BUTTON_SIZE, BUTTON_SIZE),
            ),
            title,
        };
        let buttons = vec![
            button(ChromeAction::Search, search_x, "Search"),
            button(ChromeAction::CenterView, center_x, "Center View"),
        ];

        Self {
            header,
            buttons,
            legend: layout_legend(viewport, measurer),
        }
    }

    /// Chrome element under `at`. The header is pointer-transparent and never hit.
    pub fn hit_test(&self, at: ScreenPoint) -> Option<ChromeHit> {
        if let Some(b) = self.buttons.iter().find(|b| b.rect.contains(at)) {
            return Some(ChromeHit::Button(b.action));
        }
        self.legend.rect.contains(at).then_some(ChromeHit::Legend)
    }

    pub fn button(&self, action: ChromeAction) -> Option<&ChromeButton> {
        self.buttons.iter().find(|b| b.action == action)
    }
}

fn layout_legend(viewport: ScreenSize, measurer: &dyn TextMeasurer) -> Legend {
    let style = legend_label_style();
    let max_row_w = (viewport.width - 2.0 * 16.0 - 2.0 * LEGEND_PAD_X).max(1.0);

    // Flex-wrap: greedy rows of (category, label, width).
    let mut rows: Vec<Vec<(Category, String, f64)>> = vec![Vec::new()];
    let mut row_w = 0.0;
    for category in Category::ALL {
        let label = category.legend_label().to_uppercase();
        let w = LEGEND_SWATCH + LEGEND_SWATCH_GAP + measurer.line_width(&label, &style);
        let needed = if row_w > 0.0 { row_w + LEGEND_GAP_X + w } else { w };
        if row_w > 0.0 && needed > max_row_w {
            rows.push(Vec::new());
            row_w = w;
        } else {
            row_w = needed;
        }
        if let Some(row) = rows.last_mut() {
            row.push((category, label, w));
        }
    }

    let row_widths: Vec<f64> = rows
        .iter()
        .map(|row| {
            row.iter().map(|(_, _, w)| *w).sum::<f64>()
                + LEGEND_GAP_X * (row.len().saturating_sub(1)) as f64
        })
        .collect();
    let content_w = row_widths.iter().copied().fold(0.0, f64::max);
    let content_h =
        rows.len() as f64 * LEGEND_ROW_HEIGHT + LEGEND_GAP_Y * (rows.len() - 1) as f64;
    let width = content_w + 2.0 * LEGEND_PAD_X;
    let height = content_h + 2.0 * LEGEND_PAD_Y;
    let x = (viewport.width - width) / 2.0;
    let y = viewport.height - BOTTOM_MARGIN - height;

    let mut items = Vec::with_capacity(Category::ALL.len());
    for (i, (row, row_w)) in rows.into_iter().zip(row_widths).enumerate() {
        let mut cx = x + LEGEND_PAD_X + (content_w - row_w) / 2.0;
        let cy = y + LEGEND_PAD_Y + i as f64 * (LEGEND_ROW_HEIGHT + LEGEND_GAP_Y);
        let mid_y = cy + LEGEND_ROW_HEIGHT / 2.0;
        for (category, label, w) in row {
            items.push(LegendItem {
                category,
                label,
                swatch_center: screen_point(cx + LEGEND_SWATCH / 2.0, mid_y),
                label_origin: screen_point(cx + LEGEND_SWATCH + LEGEND_SWATCH_GAP, mid_y),
            });
            cx += w + LEGEND_GAP_X;
        }
    }

    Legend {
        rect: ScreenRect::new(screen_point(x, y), ScreenSize::new(width, height)),
        items,
    }
}
