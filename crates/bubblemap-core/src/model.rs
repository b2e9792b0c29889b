use crate::geom::{self, Point, Rect, Size};
use crate::{Error, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};

/// Node kind the memory map registers its bubble renderer under.
pub const BUBBLE_KIND: &str = "bubble";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Verb,
    Grammar,
    Mistake,
    Phrase,
    Noun,
    /// Anything outside the closed set. Rendered with the neutral palette.
    Unknown,
}

impl Category {
    /// The closed set, in legend order.
    pub const ALL: [Category; 5] = [
        Category::Verb,
        Category::Grammar,
        Category::Mistake,
        Category::Phrase,
        Category::Noun,
    ];

    /// Lenient parse: unrecognized names degrade to [`Category::Unknown`].
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "verb" => Self::Verb,
            "grammar" => Self::Grammar,
            "mistake" => Self::Mistake,
            "phrase" => Self::Phrase,
            "noun" => Self::Noun,
            other => {
                tracing::warn!(category = other, "unknown bubble category, using neutral style");
                Self::Unknown
            }
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Verb => "verb",
            Self::Grammar => "grammar",
            Self::Mistake => "mistake",
            Self::Phrase => "phrase",
            Self::Noun => "noun",
            Self::Unknown => "unknown",
        }
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::parse(&raw))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BubbleSize {
    #[serde(rename = "sm", alias = "small")]
    Small,
    #[default]
    #[serde(rename = "md", alias = "medium")]
    Medium,
    #[serde(rename = "lg", alias = "large")]
    Large,
    #[serde(rename = "xl", alias = "extra-large")]
    ExtraLarge,
}

impl BubbleSize {
    /// Lenient parse; `None` for names outside the closed set.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "sm" | "small" => Some(Self::Small),
            "md" | "medium" => Some(Self::Medium),
            "lg" | "large" => Some(Self::Large),
            "xl" | "extra-large" => Some(Self::ExtraLarge),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Small => "sm",
            Self::Medium => "md",
            Self::Large => "lg",
            Self::ExtraLarge => "xl",
        }
    }
}

fn lenient_size<'de, D>(deserializer: D) -> std::result::Result<Option<BubbleSize>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|s| {
        let size = BubbleSize::parse(&s);
        if size.is_none() {
            tracing::warn!(size = s.as_str(), "unknown bubble size, using medium");
        }
        size
    }))
}

/// Expanded content shown in the hover card. All five fields are required.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeDetails {
    /// Localized category caption, e.g. "Verbo".
    pub category: String,
    pub title: String,
    pub description: String,
    pub example: String,
    pub translation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BubbleNode {
    pub id: String,
    #[serde(rename = "type", default = "default_kind")]
    pub kind: String,
    /// Top-left corner of the node box in world space.
    pub position: Point,
    pub label: String,
    pub category: Category,
    #[serde(default, deserialize_with = "lenient_size")]
    pub size: Option<BubbleSize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<NodeDetails>,
}

fn default_kind() -> String {
    BUBBLE_KIND.to_string()
}

impl BubbleNode {
    pub fn new(id: impl Into<String>, label: impl Into<String>, category: Category) -> Self {
        Self {
            id: id.into(),
            kind: default_kind(),
            position: Point::origin(),
            label: label.into(),
            category,
            size: None,
            details: None,
        }
    }

    pub fn at(mut self, x: f64, y: f64) -> Self {
        self.position = geom::point(x, y);
        self
    }

    pub fn with_size(mut self, size: BubbleSize) -> Self {
        self.size = Some(size);
        self
    }

    pub fn with_details(mut self, details: NodeDetails) -> Self {
        self.details = Some(details);
        self
    }

    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = kind.into();
        self
    }

    pub fn resolved_size(&self) -> BubbleSize {
        crate::visual::resolve_size(self.size)
    }

    pub fn diameter(&self) -> f64 {
        self.resolved_size().diameter()
    }

    /// The node's own box (bubble only; the hover card lives outside it).
    pub fn bounds(&self) -> Rect {
        let d = self.diameter();
        Rect::new(self.position, Size::new(d, d))
    }
}

/// Insertion-ordered, id-unique set of nodes.
#[derive(Debug, Clone, Default, Serialize)]
pub struct NodeSet {
    nodes: IndexMap<String, BubbleNode>,
}

impl NodeSet {
    pub fn new(nodes: impl IntoIterator<Item = BubbleNode>) -> Result<Self> {
        let mut out = IndexMap::new();
        for node in nodes {
            if out.contains_key(&node.id) {
                return Err(Error::DuplicateNodeId { id: node.id });
            }
            out.insert(node.id.clone(), node);
        }
        Ok(Self { nodes: out })
    }

    pub fn get(&self, id: &str) -> Option<&BubbleNode> {
        self.nodes.get(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &BubbleNode> {
        self.nodes.values()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.nodes.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn set_position(&mut self, id: &str, position: Point) -> bool {
        match self.nodes.get_mut(id) {
            Some(node) => {
                node.position = position;
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, id: &str) -> Option<BubbleNode> {
        self.nodes.shift_remove(id)
    }

    /// Union of all node boxes.
    pub fn bounds(&self) -> Option<Rect> {
        geom::union_all(self.iter().map(BubbleNode::bounds))
    }
}
