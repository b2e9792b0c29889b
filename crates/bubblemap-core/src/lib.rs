#![forbid(unsafe_code)]

//! Node model and geometry for bubble memory maps (headless).
//!
//! Design goals:
//! - deterministic, identity-keyed shapes (no RNG state, stable across runs)
//! - closed enumerations with explicit fallback arms instead of validation failures
//! - a compiled-in dataset; nothing here performs I/O

pub mod dataset;
pub mod error;
pub mod geom;
pub mod model;
pub mod shape;
pub mod visual;

pub use error::{Error, Result};
pub use model::{BUBBLE_KIND, BubbleNode, BubbleSize, Category, NodeDetails, NodeSet};
pub use shape::{OrganicShape, ShapeCache};
pub use visual::{CategoryPalette, resolve_size};
