use bubblemap_core::dataset::bubble_english_nodes;
use bubblemap_core::{BubbleNode, Category, NodeSet};
use bubblemap_render::svg::{SvgRenderOptions, render_svg};
use bubblemap_render::text::DeterministicTextMeasurer;
use bubblemap_render::{CanvasConfig, HoverState, MemoryMap};
use std::sync::Arc;

fn map_of(nodes: Vec<BubbleNode>) -> MemoryMap {
    let set = NodeSet::new(nodes).expect("unique ids");
    let mut map = MemoryMap::new(
        set,
        CanvasConfig::default(),
        Arc::new(DeterministicTextMeasurer::default()),
    );
    assert!(map.mount());
    map.settle();
    map
}

fn text_of(node: roxmltree::Node<'_, '_>) -> String {
    node.descendants()
        .filter(|n| n.is_text())
        .filter_map(|n| n.text())
        .collect::<Vec<_>>()
        .join(" ")
}

fn by_class<'a, 'input>(
    doc: &'a roxmltree::Document<'input>,
    class: &str,
) -> Vec<roxmltree::Node<'a, 'input>> {
    doc.descendants()
        .filter(|n| {
            n.attribute("class")
                .is_some_and(|c| c.split_whitespace().any(|c| c == class))
        })
        .collect()
}

#[test]
fn full_map_svg_parses_as_xml() {
    let map = map_of(bubble_english_nodes());
    let svg = render_svg(&map, &SvgRenderOptions::default());
    let doc = roxmltree::Document::parse(&svg).expect("well-formed svg");

    let root = doc.root_element();
    assert_eq!(root.tag_name().name(), "svg");
    assert_eq!(root.attribute("width"), Some("1280"));
    assert_eq!(root.attribute("height"), Some("800"));

    let ids: Vec<&str> = by_class(&doc, "canvas-node")
        .iter()
        .filter_map(|n| n.attribute("data-id"))
        .collect();
    assert_eq!(ids, ["1", "2", "3", "4", "5", "6", "7", "8", "9"]);

    let labels: Vec<String> = by_class(&doc, "bubble-label").into_iter().map(text_of).collect();
    assert!(labels.iter().any(|l| l == "How's it going?"));

    let actions: Vec<&str> = by_class(&doc, "chrome-button")
        .iter()
        .filter_map(|n| n.attribute("data-action"))
        .collect();
    assert_eq!(actions, ["search", "center-view"]);
    assert_eq!(by_class(&doc, "legend-item").len(), 5);
}

#[test]
fn single_rich_node_hover_cycle() {
    let node = bubble_english_nodes()
        .into_iter()
        .find(|n| n.id == "1")
        .expect("node 1");
    let mut map = map_of(vec![node]);

    // A lone 220px box is far smaller than the viewport; fitting clamps at max zoom.
    assert_eq!(map.canvas().camera().zoom, 1.5);

    assert!(map.hover_node("1"));
    assert_eq!(map.canvas().hover_state("1"), Some(HoverState::Hovered));

    let svg = render_svg(&map, &SvgRenderOptions::default());
    let doc = roxmltree::Document::parse(&svg).expect("svg");
    let body = by_class(&doc, "bubble-body");
    assert_eq!(body[0].attribute("transform"), Some("scale(1.05)"));
    let card = by_class(&doc, "detail-card");
    assert_eq!(card.len(), 1);
    assert_eq!(card[0].attribute("visibility"), Some("visible"));
    assert_eq!(card[0].attribute("opacity"), Some("1"));
    let title = by_class(&doc, "card-title");
    assert_eq!(text_of(title[0]), "Ser / Estar");
    let caption = by_class(&doc, "card-category");
    assert_eq!(text_of(caption[0]), "VERBO");

    map.pointer_leave();
    assert_eq!(map.canvas().hover_state("1"), Some(HoverState::Idle));
    let svg = render_svg(&map, &SvgRenderOptions::default());
    let doc = roxmltree::Document::parse(&svg).expect("svg");
    assert_eq!(by_class(&doc, "bubble-body")[0].attribute("transform"), None);
    let card = by_class(&doc, "detail-card");
    assert_eq!(card[0].attribute("visibility"), Some("hidden"));
    assert_eq!(card[0].attribute("pointer-events"), Some("none"));
}

#[test]
fn bare_grammar_node_defaults_to_medium_without_card() {
    let mut map = map_of(vec![BubbleNode::new("g", "Past Perfect", Category::Grammar)]);
    assert!(map.hover_node("g"));

    let svg = render_svg(&map, &SvgRenderOptions::default());
    let doc = roxmltree::Document::parse(&svg).expect("svg");

    let source = by_class(&doc, "anchor-source");
    assert_eq!(source[0].attribute("cy"), Some("130"));
    let shape = by_class(&doc, "bubble-shape");
    assert_eq!(shape[0].attribute("fill"), Some("#fefce8"));
    assert!(by_class(&doc, "bubble-grammar").len() == 1);
    assert!(by_class(&doc, "detail-card").is_empty());
}

#[test]
fn unknown_category_still_renders_neutral() {
    let node: BubbleNode = serde_json::from_str(
        r#"{"id": "x", "position": [0, 0], "label": "Odd", "category": "idiom"}"#,
    )
    .expect("node");
    let map = map_of(vec![node]);
    let svg = render_svg(&map, &SvgRenderOptions::default());
    let doc = roxmltree::Document::parse(&svg).expect("svg");
    assert_eq!(by_class(&doc, "bg-white").len(), 1);
    assert_eq!(by_class(&doc, "bubble-shape")[0].attribute("fill"), Some("#ffffff"));
}

#[test]
fn empty_map_renders_chrome_only() {
    let map = map_of(Vec::new());
    assert_eq!(map.canvas().camera(), bubblemap_render::Camera::default());
    let svg = render_svg(&map, &SvgRenderOptions::default());
    let doc = roxmltree::Document::parse(&svg).expect("svg");
    assert!(by_class(&doc, "canvas-node").is_empty());
    assert_eq!(by_class(&doc, "chrome-header").len(), 1);
}
