//! The compiled-in "Bubble English" memory map.

use crate::model::{BubbleNode, BubbleSize, Category, NodeDetails, NodeSet};

pub const TITLE: &str = "Bubble English";
pub const SUBTITLE: &str = "Immersive Memory Map";

fn details(
    category: &str,
    title: &str,
    description: &str,
    example: &str,
    translation: &str,
) -> NodeDetails {
    NodeDetails {
        category: category.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        example: example.to_string(),
        translation: translation.to_string(),
    }
}

/// Nodes in authoring order. Positions are final; nothing re-lays them out.
pub fn bubble_english_nodes() -> Vec<BubbleNode> {
    vec![
        // center
        BubbleNode::new("1", "To Be", Category::Verb)
            .at(0.0, 0.0)
            .with_size(BubbleSize::ExtraLarge)
            .with_details(details(
                "Verbo",
                "Ser / Estar",
                "The most fundamental verb in English.",
                "I am happy.",
                "Yo estoy feliz.",
            )),
        BubbleNode::new("2", "Water", Category::Noun)
            .at(-300.0, -200.0)
            .with_size(BubbleSize::Small),
        BubbleNode::new("3", "Past Simple", Category::Grammar)
            .at(-180.0, -50.0)
            .with_size(BubbleSize::Medium)
            .with_details(details(
                "Gramática",
                "Pasado Simple",
                "Used for finished actions in the past.",
                "I worked yesterday.",
                "Trabajé ayer.",
            )),
        BubbleNode::new("4", "How's it going?", Category::Phrase)
            .at(250.0, -100.0)
            .with_size(BubbleSize::Medium)
            .with_details(details(
                "Frase",
                "¿Cómo te va?",
                "A casual way to say \"How are you?\".",
                "Hey! How's it going?",
                "¡Ey! ¿Cómo te va?",
            )),
        BubbleNode::new("5", "A/An", Category::Grammar)
            .at(450.0, -150.0)
            .with_size(BubbleSize::Small),
        BubbleNode::new("6", "Actually", Category::Mistake)
            .at(-200.0, 200.0)
            .with_size(BubbleSize::Large)
            .with_details(details(
                "Error Común",
                "En realidad",
                "Warning: Does NOT mean \"actualmente\".",
                "Actually, I'm busy.",
                "En realidad, estoy ocupado.",
            )),
        BubbleNode::new("7", "Once in a blue moon", Category::Phrase)
            .at(-400.0, 300.0)
            .with_size(BubbleSize::Medium),
        BubbleNode::new("8", "Environment", Category::Noun)
            .at(300.0, 150.0)
            .with_size(BubbleSize::Medium)
            .with_details(details(
                "Sustantivo",
                "Medio Ambiente",
                "The surroundings or conditions.",
                "Protect the environment.",
                "Proteger el medio ambiente.",
            )),
        BubbleNode::new("9", "To Have", Category::Verb)
            .at(50.0, 250.0)
            .with_size(BubbleSize::Medium),
    ]
}

pub fn bubble_english() -> crate::Result<NodeSet> {
    NodeSet::new(bubble_english_nodes())
}
