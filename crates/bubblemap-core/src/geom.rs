/// World-space units: the coordinate system nodes are authored in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorldSpace {}

/// Screen-space units: pixels of the rendering surface after the camera transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenSpace {}

pub type Point = euclid::Point2D<f64, WorldSpace>;
pub type Size = euclid::Size2D<f64, WorldSpace>;
pub type Rect = euclid::Rect<f64, WorldSpace>;

pub type ScreenPoint = euclid::Point2D<f64, ScreenSpace>;
pub type ScreenVector = euclid::Vector2D<f64, ScreenSpace>;
pub type ScreenSize = euclid::Size2D<f64, ScreenSpace>;
pub type ScreenRect = euclid::Rect<f64, ScreenSpace>;

pub fn point(x: f64, y: f64) -> Point {
    euclid::point2(x, y)
}

pub fn screen_point(x: f64, y: f64) -> ScreenPoint {
    euclid::point2(x, y)
}

/// Smallest rect containing every input rect, or `None` for an empty iterator.
pub fn union_all(rects: impl IntoIterator<Item = Rect>) -> Option<Rect> {
    let mut it = rects.into_iter();
    let first = it.next()?;
    Some(it.fold(first, |acc, r| acc.union(&r)))
}
