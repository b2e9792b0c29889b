//! Lookup tables from the closed enumerations to pixel sizes and style tokens.

use crate::model::{BubbleSize, Category};

pub const DEFAULT_BUBBLE_CLASS: &str = "bg-white";
pub const DEFAULT_ACCENT_CLASS: &str = "text-slate-500";

pub fn resolve_size(size: Option<BubbleSize>) -> BubbleSize {
    size.unwrap_or_default()
}

impl BubbleSize {
    /// Diameter of the bubble box in pixels.
    pub fn diameter(self) -> f64 {
        match self {
            BubbleSize::Small => 100.0,
            BubbleSize::Medium => 130.0,
            BubbleSize::Large => 160.0,
            BubbleSize::ExtraLarge => 220.0,
        }
    }
}

/// Concrete colors behind the class tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryPalette {
    pub fill: &'static str,
    pub stroke: &'static str,
    pub label: &'static str,
    pub accent: &'static str,
    pub swatch: &'static str,
    pub swatch_border: Option<&'static str>,
}

impl Category {
    /// Shape/fill class of the bubble body.
    pub fn bubble_class(self) -> &'static str {
        match self {
            Category::Verb => "bubble-verb",
            Category::Grammar => "bubble-grammar",
            Category::Mistake => "bubble-mistake",
            Category::Phrase => "bubble-phrase",
            Category::Noun => "bubble-noun",
            Category::Unknown => DEFAULT_BUBBLE_CLASS,
        }
    }

    /// Text color class of the category caption inside the detail card.
    pub fn accent_class(self) -> &'static str {
        match self {
            Category::Verb => "text-sky-600",
            Category::Grammar => "text-amber-600",
            Category::Mistake => "text-rose-600",
            Category::Phrase => "text-purple-600",
            Category::Noun => "text-emerald-600",
            Category::Unknown => DEFAULT_ACCENT_CLASS,
        }
    }

    pub fn legend_label(self) -> &'static str {
        match self {
            Category::Verb => "Verbs",
            Category::Grammar => "Grammar",
            Category::Mistake => "Mistakes",
            Category::Phrase => "Phrases",
            Category::Noun => "Nouns",
            Category::Unknown => "Other",
        }
    }

    pub fn palette(self) -> CategoryPalette {
        match self {
            Category::Verb => CategoryPalette {
                fill: "#9be9ff",
                stroke: "#7dd3fc",
                label: "#075985",
                accent: "#0284c7",
                swatch: "#9be9ff",
                swatch_border: None,
            },
            Category::Grammar => CategoryPalette {
                fill: "#fefce8",
                stroke: "#fef08a",
                label: "#854d0e",
                accent: "#d97706",
                swatch: "#fefce8",
                swatch_border: Some("#fef08a"),
            },
            Category::Mistake => CategoryPalette {
                fill: "#fecaca",
                stroke: "#fca5a5",
                label: "#9f1239",
                accent: "#e11d48",
                swatch: "#fecaca",
                swatch_border: None,
            },
            Category::Phrase => CategoryPalette {
                fill: "#e9d5ff",
                stroke: "#d8b4fe",
                label: "#6b21a8",
                accent: "#9333ea",
                swatch: "#e9d5ff",
                swatch_border: None,
            },
            Category::Noun => CategoryPalette {
                fill: "#bbf7d0",
                stroke: "#86efac",
                label: "#166534",
                accent: "#059669",
                swatch: "#bbf7d0",
                swatch_border: None,
            },
            Category::Unknown => CategoryPalette {
                fill: "#ffffff",
                stroke: "#e2e8f0",
                label: "#334155",
                accent: "#64748b",
                swatch: "#ffffff",
                swatch_border: Some("#e2e8f0"),
            },
        }
    }
}
