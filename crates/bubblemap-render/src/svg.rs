//! SVG and standalone-HTML output for a memory map.
//!
//! The document reflects the canvas exactly as it stands (camera, hover state, paint order)
//! through presentation attributes. A small stylesheet adds `:hover` rules on top, so the
//! exported file still reacts to a real pointer when opened in a browser.

mod util;

use crate::bubble::{ANCHOR_RADIUS, BubbleRenderer, CARD_RADIUS, CardRole, HoverState};
use crate::canvas::Canvas;
use crate::chrome::{Chrome, ChromeAction, LEGEND_SWATCH, LegendItem};
use crate::map::MemoryMap;
use bubblemap_core::geom::ScreenSize;
use bubblemap_core::BubbleNode;
use std::fmt::Write as _;

pub(crate) use util::{escape_attr, escape_xml, fmt};

const SHADOW_FILTER_ID: &str = "bubble-shadow";

const SLATE_400: &str = "#94a3b8";
const SLATE_500: &str = "#64748b";
const SLATE_600: &str = "#475569";
const SLATE_700: &str = "#334155";
const SLATE_800: &str = "#1e293b";

#[derive(Debug, Clone)]
pub struct SvgRenderOptions {
    /// `id` of the root `<svg>`; the stylesheet is scoped to it.
    pub diagram_id: String,
    /// Emit `:hover` rules and transitions.
    pub interactive_css: bool,
    /// Draw the header, action buttons and legend.
    pub include_chrome: bool,
    pub font_family: String,
}

impl Default for SvgRenderOptions {
    fn default() -> Self {
        Self {
            diagram_id: "bubblemap".to_string(),
            interactive_css: true,
            include_chrome: true,
            font_family: "Inter, ui-sans-serif, system-ui, sans-serif".to_string(),
        }
    }
}

pub fn render_svg(map: &MemoryMap, options: &SvgRenderOptions) -> String {
    let canvas = map.canvas();
    let size = canvas.viewport_size();
    let camera = canvas.camera();
    let id = escape_attr(&options.diagram_id);

    let mut out = String::with_capacity(32 * 1024);
    let _ = write!(
        &mut out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" id="{id}" class="bubblemap" width="{w}" height="{h}" viewBox="0 0 {w} {h}" role="img" aria-roledescription="memory-map" font-family="{ff}">"#,
        w = fmt(size.width),
        h = fmt(size.height),
        ff = escape_attr(&options.font_family),
    );
    if options.interactive_css {
        write_style(&mut out, &id);
    }
    write_defs(&mut out);

    let background = canvas.config().background.trim();
    if !background.is_empty() && !background.eq_ignore_ascii_case("transparent") {
        let _ = write!(
            &mut out,
            r#"<rect class="background" width="{}" height="{}" fill="{}"/>"#,
            fmt(size.width),
            fmt(size.height),
            escape_attr(background)
        );
    }

    let _ = write!(
        &mut out,
        r#"<g class="viewport" transform="translate({} {}) scale({})">"#,
        fmt(camera.x),
        fmt(camera.y),
        fmt(camera.zoom)
    );
    write_edges(&mut out, canvas);
    out.push_str(r#"<g class="nodes">"#);
    for (node, renderer) in canvas.paint_order() {
        let _ = write!(
            &mut out,
            r#"<g class="canvas-node" data-id="{}" data-kind="{}" transform="translate({} {})">"#,
            escape_attr(&node.id),
            escape_attr(&node.kind),
            fmt(node.position.x),
            fmt(node.position.y)
        );
        renderer.write_svg(&mut out, node);
        out.push_str("</g>");
    }
    out.push_str("</g></g>");

    if options.include_chrome {
        write_chrome(&mut out, map.chrome());
    }
    if !canvas.config().hide_attribution {
        write_attribution(&mut out, size);
    }
    out.push_str("</svg>\n");
    out
}

/// Wraps [`render_svg`] in a minimal standalone HTML page.
pub fn render_html(map: &MemoryMap, options: &SvgRenderOptions) -> String {
    let svg = render_svg(map, options);
    let title = escape_xml(&map.chrome().header.title);
    let mut out = String::with_capacity(svg.len() + 512);
    let _ = write!(
        &mut out,
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<style>html,body{{margin:0;height:100%;background:#f8fafc;}}body{{display:flex;align-items:center;justify-content:center;}}</style>
</head>
<body>
{svg}</body>
</html>
"#
    );
    out
}

fn write_style(out: &mut String, id: &str) {
    let _ = write!(
        out,
        "<style>\
#{id} .canvas-node{{cursor:pointer;}}\
#{id} .bubble-body{{transition:transform 200ms ease-out;}}\
#{id} .canvas-node:hover .bubble-body{{transform:scale(1.05);}}\
#{id} .canvas-node:hover .bubble-shape{{filter:url(#{SHADOW_FILTER_ID});}}\
#{id} .detail-card{{transition:opacity 300ms ease,transform 300ms ease,visibility 300ms;}}\
#{id} .canvas-node:hover .detail-card{{opacity:1;visibility:visible;pointer-events:auto;transform:translate(0px,0px);}}\
#{id} .chrome-button rect{{transition:fill-opacity 150ms;}}\
#{id} .chrome-button:hover rect{{fill-opacity:0.8;}}\
</style>"
    );
}

fn write_defs(out: &mut String) {
    let _ = write!(
        out,
        r##"<defs><filter id="{SHADOW_FILTER_ID}" x="-30%" y="-30%" width="160%" height="160%"><feDropShadow dx="0" dy="10" stdDeviation="8" flood-color="#0f172a" flood-opacity="0.15"/></filter></defs>"##
    );
}

fn write_edges(out: &mut String, canvas: &Canvas) {
    out.push_str(r#"<g class="edges">"#);
    for edge in canvas.edges() {
        let (Some(source), Some(target)) =
            (canvas.nodes().get(&edge.source), canvas.nodes().get(&edge.target))
        else {
            tracing::warn!(edge = edge.id.as_str(), "edge endpoint missing; skipped");
            continue;
        };
        // Source handle sits bottom-center, target handle top-center.
        let sd = source.diameter();
        let td = target.diameter();
        let _ = write!(
            out,
            r##"<path class="edge" data-id="{}" d="M{},{}L{},{}" fill="none" stroke="#cbd5e1" stroke-width="1.5"/>"##,
            escape_attr(&edge.id),
            fmt(source.position.x + sd / 2.0),
            fmt(source.position.y + sd),
            fmt(target.position.x + td / 2.0),
            fmt(target.position.y)
        );
    }
    out.push_str("</g>");
}

/// Node-local bubble markup: handles, organic body with its label, and the detail card.
pub(crate) fn write_bubble_node(out: &mut String, renderer: &BubbleRenderer, node: &BubbleNode) {
    let d = renderer.diameter();
    let c = d / 2.0;
    let visual = renderer.visual();
    let category = renderer.category();
    let palette = category.palette();
    let state = match visual.state {
        HoverState::Idle => "idle",
        HoverState::Hovered => "hovered",
    };

    let _ = write!(
        out,
        r#"<g class="bubble {}" data-state="{state}" aria-label="{}">"#,
        category.bubble_class(),
        escape_attr(&node.label)
    );
    for (class, cy) in [("anchor anchor-target", 0.0), ("anchor anchor-source", d)] {
        let _ = write!(
            out,
            r#"<circle class="{class}" cx="{}" cy="{}" r="{}" opacity="0" pointer-events="none"/>"#,
            fmt(c),
            fmt(cy),
            fmt(ANCHOR_RADIUS)
        );
    }

    // The body scales around the bubble center: translate in, scale, translate back.
    let _ = write!(out, r#"<g transform="translate({c} {c})">"#, c = fmt(c));
    out.push_str(r#"<g class="bubble-body""#);
    if visual.scale != 1.0 {
        let _ = write!(out, r#" transform="scale({})""#, fmt(visual.scale));
    }
    out.push('>');
    let _ = write!(out, r#"<g transform="translate({c} {c})">"#, c = fmt(-c));
    let _ = write!(
        out,
        r#"<path class="bubble-shape" d="{}" fill="{}" stroke="{}" stroke-width="1""#,
        renderer.shape().path_d(d, d),
        palette.fill,
        palette.stroke
    );
    if visual.shadow {
        let _ = write!(out, r#" filter="url(#{SHADOW_FILTER_ID})""#);
    }
    out.push_str("/>");

    let style = renderer.label_style();
    let line_h = style.line_height_px();
    let lines = renderer.label_lines();
    let top = c - lines.len() as f64 * line_h / 2.0;
    let _ = write!(
        out,
        r#"<text class="bubble-label" text-anchor="middle" font-size="{}" font-weight="700" fill="{}" pointer-events="none">"#,
        fmt(style.font_size),
        palette.label
    );
    for (i, line) in lines.iter().enumerate() {
        let _ = write!(
            out,
            r#"<tspan x="{}" y="{}" dominant-baseline="central">{}</tspan>"#,
            fmt(c),
            fmt(top + line_h * (i as f64 + 0.5)),
            escape_xml(line)
        );
    }
    out.push_str("</text></g></g></g>");

    if let (Some(card), Some(cv)) = (renderer.card_layout(), visual.card) {
        let _ = write!(
            out,
            r#"<g transform="translate({} {})"><g class="detail-card" opacity="{}" visibility="{}" pointer-events="{}""#,
            fmt(card.x),
            fmt(card.y),
            fmt(cv.opacity),
            if cv.visible { "visible" } else { "hidden" },
            if cv.interactive { "auto" } else { "none" }
        );
        if cv.translate_x != 0.0 {
            let _ = write!(out, r#" transform="translate({} 0)""#, fmt(cv.translate_x));
        }
        out.push('>');
        let _ = write!(
            out,
            r##"<rect class="glass-panel" width="{}" height="{}" rx="{r}" ry="{r}" fill="#ffffff" fill-opacity="0.75" stroke="#ffffff" stroke-opacity="0.6"/>"##,
            fmt(card.width),
            fmt(card.height),
            r = fmt(CARD_RADIUS)
        );
        let b = card.example_box;
        let _ = write!(
            out,
            r##"<rect class="card-example-box" x="{}" y="{}" width="{}" height="{}" rx="12" ry="12" fill="#ffffff" fill-opacity="0.5" stroke="#ffffff" stroke-opacity="0.6"/>"##,
            fmt(b.origin.x),
            fmt(b.origin.y),
            fmt(b.size.width),
            fmt(b.size.height)
        );
        for row in &card.rows {
            let color = match row.role {
                CardRole::Category => palette.accent,
                CardRole::Title => SLATE_800,
                CardRole::Description => SLATE_600,
                CardRole::Example => SLATE_700,
                CardRole::Translation => SLATE_500,
            };
            let _ = write!(
                out,
                r#"<text class="{}" font-size="{}" fill="{color}""#,
                row.role.class(),
                fmt(row.font_size)
            );
            if row.bold {
                out.push_str(r#" font-weight="700""#);
            }
            if row.italic {
                out.push_str(r#" font-style="italic""#);
            }
            if row.role == CardRole::Category {
                out.push_str(r#" letter-spacing="1""#);
            }
            out.push('>');
            for (i, line) in row.lines.iter().enumerate() {
                let _ = write!(
                    out,
                    r#"<tspan x="{}" y="{}" dominant-baseline="central">{}</tspan>"#,
                    fmt(row.x),
                    fmt(row.y + row.line_height * (i as f64 + 0.5)),
                    escape_xml(line)
                );
            }
            out.push_str("</text>");
        }
        out.push_str("</g></g>");
    }

    out.push_str("</g>");
}

fn action_name(action: ChromeAction) -> &'static str {
    match action {
        ChromeAction::Search => "search",
        ChromeAction::CenterView => "center-view",
    }
}

fn write_chrome(out: &mut String, chrome: &Chrome) {
    let header = &chrome.header;
    let _ = write!(
        out,
        r#"<g class="chrome-header" pointer-events="none"><text x="{x}" y="{ty}" font-size="24" font-weight="700" letter-spacing="-0.6" fill="{SLATE_700}">{title}</text><text x="{x}" y="{sy}" font-size="10" font-weight="600" letter-spacing="3" fill="{SLATE_400}">{subtitle}</text></g>"#,
        x = fmt(header.origin.x),
        ty = fmt(header.origin.y + 24.0),
        sy = fmt(header.origin.y + 32.0 + 4.0 + 11.0),
        title = escape_xml(&header.title),
        subtitle = escape_xml(&header.subtitle),
    );

    for button in &chrome.buttons {
        let r = button.rect;
        let center = r.center();
        let _ = write!(
            out,
            r##"<g class="chrome-button" data-action="{}"><title>{}</title><rect x="{}" y="{}" width="{}" height="{}" rx="12" ry="12" fill="#ffffff" fill-opacity="0.5"/>"##,
            action_name(button.action),
            escape_xml(button.title),
            fmt(r.origin.x),
            fmt(r.origin.y),
            fmt(r.size.width),
            fmt(r.size.height)
        );
        let (cx, cy) = (center.x, center.y);
        match button.action {
            ChromeAction::Search => {
                let _ = write!(
                    out,
                    r#"<circle cx="{}" cy="{}" r="7" fill="none" stroke="{SLATE_600}" stroke-width="2"/><path d="M{},{}L{},{}" stroke="{SLATE_600}" stroke-width="2" stroke-linecap="round"/>"#,
                    fmt(cx - 2.0),
                    fmt(cy - 2.0),
                    fmt(cx + 3.0),
                    fmt(cy + 3.0),
                    fmt(cx + 8.0),
                    fmt(cy + 8.0)
                );
            }
            ChromeAction::CenterView => {
                let _ = write!(
                    out,
                    r#"<circle cx="{x}" cy="{y}" r="8" fill="none" stroke="{SLATE_600}" stroke-width="2"/><circle cx="{x}" cy="{y}" r="2" fill="{SLATE_600}"/>"#,
                    x = fmt(cx),
                    y = fmt(cy)
                );
            }
        }
        out.push_str("</g>");
    }

    let legend = &chrome.legend;
    let rect = legend.rect;
    let _ = write!(
        out,
        r##"<g class="legend"><rect x="{}" y="{}" width="{}" height="{}" rx="{r}" ry="{r}" fill="#ffffff" fill-opacity="0.75" stroke="#ffffff" stroke-opacity="0.6"/>"##,
        fmt(rect.origin.x),
        fmt(rect.origin.y),
        fmt(rect.size.width),
        fmt(rect.size.height),
        r = fmt(rect.size.height.min(48.0) / 2.0)
    );
    for item in &legend.items {
        write_legend_item(out, item);
    }
    out.push_str("</g>");
}

fn write_legend_item(out: &mut String, item: &LegendItem) {
    let palette = item.category.palette();
    let _ = write!(
        out,
        r#"<g class="legend-item" data-category="{}"><circle cx="{}" cy="{}" r="{}" fill="{}""#,
        item.category.as_str(),
        fmt(item.swatch_center.x),
        fmt(item.swatch_center.y),
        fmt(LEGEND_SWATCH / 2.0),
        palette.swatch
    );
    if let Some(border) = palette.swatch_border {
        let _ = write!(out, r#" stroke="{border}" stroke-width="1""#);
    }
    let _ = write!(
        out,
        r#"/><text x="{}" y="{}" dominant-baseline="central" font-size="10" font-weight="700" letter-spacing="1" fill="{SLATE_500}">{}</text></g>"#,
        fmt(item.label_origin.x),
        fmt(item.label_origin.y),
        escape_xml(&item.label)
    );
}

fn write_attribution(out: &mut String, size: ScreenSize) {
    let _ = write!(
        out,
        r#"<text class="attribution" x="{}" y="{}" text-anchor="end" font-size="10" fill="{SLATE_400}">bubblemap</text>"#,
        fmt(size.width - 8.0),
        fmt(size.height - 8.0)
    );
}
