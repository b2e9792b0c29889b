use bubblemap::render::{CanvasConfig, HoverState, bubble_english_html, bubble_english_svg, snapshot};

#[test]
fn snapshot_hovers_the_requested_node() {
    let map = snapshot(CanvasConfig::default(), Some("6")).expect("map");
    assert!(!map.canvas().is_animating());
    assert_eq!(map.canvas().hovered(), Some("6"));
    assert_eq!(map.canvas().hover_state("1"), Some(HoverState::Idle));
}

#[test]
fn unknown_hover_target_is_ignored() {
    let map = snapshot(CanvasConfig::default(), Some("nope")).expect("map");
    assert_eq!(map.canvas().hovered(), None);
}

#[test]
fn svg_and_html_helpers_agree() {
    let svg = bubble_english_svg(CanvasConfig::default(), Some("8")).expect("svg");
    let doc = roxmltree::Document::parse(&svg).expect("xml");
    let visible: Vec<&str> = doc
        .descendants()
        .filter(|n| n.attribute("class") == Some("detail-card"))
        .filter(|n| n.attribute("visibility") == Some("visible"))
        .filter_map(|n| {
            n.ancestors()
                .find(|a| a.attribute("class") == Some("canvas-node"))
                .and_then(|a| a.attribute("data-id"))
        })
        .collect();
    assert_eq!(visible, ["8"]);

    let html = bubble_english_html(CanvasConfig::default(), Some("8")).expect("html");
    assert!(html.contains(svg.trim_end()));
}

#[test]
fn core_types_are_reexported() {
    let nodes = bubblemap::dataset::bubble_english().expect("nodes");
    assert_eq!(nodes.len(), 9);
    assert_eq!(bubblemap::OrganicShape::from_id("").to_css(), "48% 48% 48% 48% / 48% 48% 48% 48%");
}
