use bubblemap_core::geom::{ScreenVector, screen_point};
use bubblemap_render::{ChromeAction, MemoryMap};

fn mounted() -> MemoryMap {
    let mut map = MemoryMap::bubble_english().expect("map");
    assert!(map.mount());
    map
}

#[test]
fn mount_fits_immediately_then_runs_the_center_animation() {
    let mut map = mounted();
    // The init fit is instant; the mount hook's center view animates toward the same framing.
    let fitted = map.canvas().camera();
    assert!(map.canvas().is_animating());
    assert_eq!(map.canvas().target_camera(), fitted);
    assert!(!map.mount());
    map.settle();
    assert_eq!(map.canvas().camera(), fitted);
}

#[test]
fn center_view_is_idempotent() {
    let mut map = mounted();
    map.settle();
    map.center_view();
    let once = map.canvas().target_camera();
    map.center_view();
    assert_eq!(map.canvas().target_camera(), once);
    map.settle();
    assert_eq!(map.canvas().camera(), once);
}

#[test]
fn center_view_animates_over_800ms() {
    let mut map = mounted();
    map.settle();
    let fitted = map.canvas().camera();
    map.drag_pan(ScreenVector::new(-400.0, 250.0));
    let start = map.canvas().camera();
    map.center_view();

    assert!(map.advance(400.0));
    let mid = map.canvas().camera();
    // Cubic in-out is exactly halfway at t = 0.5.
    assert!((mid.x - (start.x + fitted.x) / 2.0).abs() < 1e-9);
    assert!((mid.y - (start.y + fitted.y) / 2.0).abs() < 1e-9);

    assert!(!map.advance(400.0));
    assert_eq!(map.canvas().camera(), fitted);
}

#[test]
fn latest_center_request_replaces_the_running_one() {
    let mut map = mounted();
    map.settle();
    let fitted = map.canvas().camera();
    map.drag_pan(ScreenVector::new(200.0, 0.0));
    map.center_view();
    map.advance(300.0);
    map.center_view();
    // A fresh 800ms run: still moving after the remainder of the first one.
    assert!(map.advance(500.0));
    map.settle();
    assert_eq!(map.canvas().camera(), fitted);
}

#[test]
fn pointer_over_visible_card_keeps_node_hovered() {
    let mut map = mounted();
    map.settle();
    assert!(map.hover_node("1"));

    let camera = map.canvas().camera();
    let node = map.canvas().nodes().get("1").expect("node 1").clone();
    // Just right of the bubble, inside the 16px gap + card.
    let over_card = camera.world_to_screen(bubblemap_core::geom::point(
        node.position.x + node.diameter() + 40.0,
        node.position.y + 20.0,
    ));
    assert_eq!(map.pointer_move(over_card), Some("1"));

    map.pointer_leave();
    // Hidden again: the same spot no longer belongs to node 1.
    assert_ne!(map.pointer_move(over_card), Some("1"));
}

#[test]
fn wheel_over_legend_does_not_zoom() {
    let mut map = mounted();
    map.settle();
    let before = map.canvas().camera();
    let legend = map.chrome().legend.rect.center();
    map.wheel(legend, -300.0);
    assert_eq!(map.canvas().camera(), before);

    map.wheel(screen_point(640.0, 300.0), -300.0);
    assert!(map.canvas().camera().zoom > before.zoom);
}

#[test]
fn clicking_off_the_buttons_is_not_an_action() {
    let mut map = mounted();
    assert_eq!(map.click(screen_point(5.0, 5.0)), None);
    let center = map
        .chrome()
        .button(ChromeAction::CenterView)
        .expect("center button")
        .rect
        .center();
    assert_eq!(map.click(center), Some(ChromeAction::CenterView));
}
