#![forbid(unsafe_code)]

pub mod bubble;
pub mod canvas;
pub mod chrome;
pub mod map;
pub mod svg;
pub mod text;
pub mod viewport;

pub use bubble::{BubbleRenderer, BubbleVisual, CardVisual, HoverState, NodeRenderer};
pub use canvas::{Canvas, CanvasConfig, Edge, EdgeChange, NodeChange, NodeTypeRegistry};
pub use chrome::{Chrome, ChromeAction, ChromeHit};
pub use map::MemoryMap;
pub use viewport::{Camera, FitViewOptions, ViewportController};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Core(#[from] bubblemap_core::Error),
    #[error("canvas config JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
