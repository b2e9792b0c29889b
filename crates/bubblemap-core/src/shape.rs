//! Identity-keyed organic bubble outlines.
//!
//! A bubble's silhouette is a box with eight elliptical corner radii, expressed in CSS
//! `border-radius` terms (percentages of the node's own box). The radii come from a cheap
//! integer hash of the node id, so the same node always gets the same outline.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

pub const BASE_PCT: u8 = 48;
pub const VARIATION_PCT: u8 = 18;

/// Sum of the UTF-16 code units of `id` (JS `charCodeAt` semantics).
pub fn seed(id: &str) -> u64 {
    id.encode_utf16().map(u64::from).sum()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrganicShape {
    /// Horizontal radii (top-left, top-right, bottom-right, bottom-left) followed by the
    /// vertical radii in the same corner order.
    pub radii: [u8; 8],
}

impl OrganicShape {
    pub fn from_id(id: &str) -> Self {
        Self::from_seed(seed(id))
    }

    pub fn from_seed(seed: u64) -> Self {
        let variation = u64::from(VARIATION_PCT);
        // (seed * k) mod v == ((seed mod v) * k) mod v; keeps the product small.
        let reduced = seed % variation;
        let mut radii = [0u8; 8];
        for (i, r) in radii.iter_mut().enumerate() {
            let k = i as u64 + 1;
            *r = BASE_PCT + ((reduced * k) % variation) as u8;
        }
        Self { radii }
    }

    pub fn horizontal(&self) -> [u8; 4] {
        [self.radii[0], self.radii[1], self.radii[2], self.radii[3]]
    }

    pub fn vertical(&self) -> [u8; 4] {
        [self.radii[4], self.radii[5], self.radii[6], self.radii[7]]
    }

    /// CSS `border-radius` value, e.g. `58% 50% 60% 52% / 62% 54% 64% 56%`.
    pub fn to_css(&self) -> String {
        let mut out = String::with_capacity(48);
        for (i, r) in self.radii.iter().enumerate() {
            match i {
                0 => {}
                4 => out.push_str(" / "),
                _ => out.push(' '),
            }
            let _ = write!(&mut out, "{r}%");
        }
        out
    }

    /// Resolves the percentages against a `width` x `height` box.
    ///
    /// Adjacent radii along one side may sum to more than that side (e.g. 60% + 62%);
    /// like CSS, every radius is then scaled by the same factor so the curves just meet.
    pub fn corner_radii(&self, width: f64, height: f64) -> CornerRadii {
        let w = width.max(0.0);
        let h = height.max(0.0);
        let rx = self.horizontal().map(|p| f64::from(p) / 100.0 * w);
        let ry = self.vertical().map(|p| f64::from(p) / 100.0 * h);

        let mut f: f64 = 1.0;
        for (side, sum) in [
            (w, rx[0] + rx[1]),
            (h, ry[1] + ry[2]),
            (w, rx[2] + rx[3]),
            (h, ry[3] + ry[0]),
        ] {
            if sum > 0.0 {
                f = f.min(side / sum);
            }
        }

        let corner = |i: usize| Corner {
            rx: rx[i] * f,
            ry: ry[i] * f,
        };
        CornerRadii {
            top_left: corner(0),
            top_right: corner(1),
            bottom_right: corner(2),
            bottom_left: corner(3),
        }
    }
}

impl OrganicShape {
    /// Closed SVG path of the rounded box, starting at the end of the top-left arc and
    /// running clockwise.
    pub fn path_d(&self, width: f64, height: f64) -> String {
        let (w, h) = (width.max(0.0), height.max(0.0));
        let CornerRadii {
            top_left: tl,
            top_right: tr,
            bottom_right: br,
            bottom_left: bl,
        } = self.corner_radii(w, h);

        let mut out = String::with_capacity(160);
        let _ = write!(&mut out, "M{},0", num(tl.rx));
        let _ = write!(&mut out, "H{}", num(w - tr.rx));
        let _ = write!(&mut out, "A{},{},0,0,1,{},{}", num(tr.rx), num(tr.ry), num(w), num(tr.ry));
        let _ = write!(&mut out, "V{}", num(h - br.ry));
        let _ = write!(
            &mut out,
            "A{},{},0,0,1,{},{}",
            num(br.rx),
            num(br.ry),
            num(w - br.rx),
            num(h)
        );
        let _ = write!(&mut out, "H{}", num(bl.rx));
        let _ = write!(&mut out, "A{},{},0,0,1,0,{}", num(bl.rx), num(bl.ry), num(h - bl.ry));
        let _ = write!(&mut out, "V{}", num(tl.ry));
        let _ = write!(&mut out, "A{},{},0,0,1,{},0Z", num(tl.rx), num(tl.ry), num(tl.rx));
        out
    }
}

/// Three fractional digits at most, never `-0`.
fn num(v: f64) -> f64 {
    let v = (v * 1000.0).round() / 1000.0;
    if v == 0.0 || !v.is_finite() { 0.0 } else { v }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Corner {
    pub rx: f64,
    pub ry: f64,
}

/// Pixel radii of the four elliptical corners after overlap scaling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CornerRadii {
    pub top_left: Corner,
    pub top_right: Corner,
    pub bottom_right: Corner,
    pub bottom_left: Corner,
}

/// Per-id memo for hosts that rebuild renderers every frame.
#[derive(Debug, Clone, Default)]
pub struct ShapeCache {
    shapes: FxHashMap<String, OrganicShape>,
}

impl ShapeCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&mut self, id: &str) -> OrganicShape {
        if let Some(shape) = self.shapes.get(id) {
            return *shape;
        }
        let shape = OrganicShape::from_id(id);
        self.shapes.insert(id.to_string(), shape);
        shape
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_sums_utf16_units() {
        assert_eq!(seed(""), 0);
        assert_eq!(seed("1"), 49);
        assert_eq!(seed("ab"), 97 + 98);
        // U+1F600 is a surrogate pair in UTF-16.
        assert_eq!(seed("\u{1F600}"), 0xD83D + 0xDE00);
    }

    #[test]
    fn id_one_matches_known_radii() {
        // seed 49, 49 mod 18 = 13
        let shape = OrganicShape::from_id("1");
        assert_eq!(shape.radii, [61, 56, 51, 64, 59, 54, 49, 62]);
        assert_eq!(shape.to_css(), "61% 56% 51% 64% / 59% 54% 49% 62%");
    }

    #[test]
    fn empty_id_is_base_everywhere() {
        let shape = OrganicShape::from_id("");
        assert_eq!(shape.radii, [BASE_PCT; 8]);
        assert_eq!(shape.to_css(), "48% 48% 48% 48% / 48% 48% 48% 48%");
    }

    #[test]
    fn overlapping_radii_are_scaled_down() {
        let shape = OrganicShape::from_id("1");
        let r = shape.corner_radii(100.0, 100.0);
        // The tightest side is the left one: bottom-left + top-left vertical = 62 + 59.
        assert!(r.top_left.rx + r.top_right.rx <= 100.0 + 1e-9);
        assert!(r.bottom_right.rx + r.bottom_left.rx <= 100.0 + 1e-9);
        assert!(r.top_right.ry + r.bottom_right.ry <= 100.0 + 1e-9);
        assert!(r.bottom_left.ry + r.top_left.ry <= 100.0 + 1e-9);
        assert!((r.bottom_left.ry + r.top_left.ry - 100.0).abs() < 1e-9);
    }

    #[test]
    fn base_shape_is_unscaled() {
        let r = OrganicShape::from_id("").corner_radii(200.0, 100.0);
        assert!((r.top_left.rx - 96.0).abs() < 1e-9);
        assert!((r.top_left.ry - 48.0).abs() < 1e-9);
    }

    #[test]
    fn path_of_base_shape_is_an_ellipse_box() {
        let d = OrganicShape::from_id("").path_d(100.0, 100.0);
        assert_eq!(
            d,
            "M48,0H52A48,48,0,0,1,100,48V52A48,48,0,0,1,52,100H48A48,48,0,0,1,0,52V48A48,48,0,0,1,48,0Z"
        );
    }

    #[test]
    fn path_stays_inside_its_box() {
        let d = OrganicShape::from_id("1").path_d(220.0, 220.0);
        assert!(d.starts_with('M') && d.ends_with('Z'));
        assert!(!d.contains('-'));
    }

    #[test]
    fn cache_returns_memoized_shape() {
        let mut cache = ShapeCache::new();
        let a = cache.get("node-a");
        let b = cache.get("node-a");
        assert_eq!(a, b);
        assert_eq!(cache.len(), 1);
    }
}
