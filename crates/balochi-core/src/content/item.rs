use std::fmt;

use serde::{Deserialize, Serialize};

/// Reference to an image asset (e.g. `colors_memory_red`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageRef(String);

/// Reference to an audio asset (e.g. `colors_red`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AudioRef(String);

macro_rules! asset_ref {
    ($name:ident) => {
        impl $name {
            pub fn new(name: impl Into<String>) -> Self {
                Self(name.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(name: &str) -> Self {
                Self(name.to_string())
            }
        }

        impl From<String> for $name {
            fn from(name: String) -> Self {
                Self(name)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

asset_ref!(ImageRef);
asset_ref!(AudioRef);

/// Reusable content entry of a pool. Rounds never hand out templates
/// directly, only `Item`/`Card` copies of them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Template {
    pub image: ImageRef,
    pub audio: AudioRef,
}

impl Template {
    pub fn new(image: impl Into<ImageRef>, audio: impl Into<AudioRef>) -> Self {
        Self {
            image: image.into(),
            audio: audio.into(),
        }
    }
}

/// Round item for the sequential and guess games.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    image: ImageRef,
    audio: AudioRef,
    consumed: bool,
}

impl Item {
    pub fn from_template(template: &Template) -> Self {
        Self {
            image: template.image.clone(),
            audio: template.audio.clone(),
            consumed: false,
        }
    }

    pub fn image(&self) -> &ImageRef {
        &self.image
    }

    pub fn audio(&self) -> &AudioRef {
        &self.audio
    }

    /// Consumed items are hidden by the view and ignore further selections.
    pub fn is_consumed(&self) -> bool {
        self.consumed
    }

    pub(crate) fn consume(&mut self) {
        self.consumed = true;
    }
}

/// Visible side of a memory card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardFace {
    FaceDown,
    FaceUp(ImageRef),
}

/// Round card for the memory game.
///
/// A card starts face down, is flipped up when selected and flipped back
/// down on a mismatch. Once paired it stays paired for the rest of the round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    template: Template,
    face: CardFace,
    paired: bool,
}

impl Card {
    pub fn from_template(template: &Template) -> Self {
        Self {
            template: template.clone(),
            face: CardFace::FaceDown,
            paired: false,
        }
    }

    pub fn face(&self) -> &CardFace {
        &self.face
    }

    /// Image currently shown, `None` while the card shows its back.
    pub fn visible_image(&self) -> Option<&ImageRef> {
        match &self.face {
            CardFace::FaceDown => None,
            CardFace::FaceUp(image) => Some(image),
        }
    }

    pub fn is_face_up(&self) -> bool {
        matches!(self.face, CardFace::FaceUp(_))
    }

    pub fn is_paired(&self) -> bool {
        self.paired
    }

    pub fn image(&self) -> &ImageRef {
        &self.template.image
    }

    pub fn audio(&self) -> &AudioRef {
        &self.template.audio
    }

    pub(crate) fn flip_up(&mut self) -> &ImageRef {
        self.face = CardFace::FaceUp(self.template.image.clone());
        &self.template.image
    }

    pub(crate) fn flip_down(&mut self) {
        if !self.paired {
            self.face = CardFace::FaceDown;
        }
    }

    pub(crate) fn mark_paired(&mut self) {
        self.paired = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn red() -> Template {
        Template::new("colors_memory_red", "colors_red")
    }

    #[test]
    fn test_item_copies_template() {
        let template = red();
        let mut item = Item::from_template(&template);
        assert_eq!(item.image().as_str(), "colors_memory_red");
        assert_eq!(item.audio().as_str(), "colors_red");
        assert!(!item.is_consumed());

        item.consume();
        assert!(item.is_consumed());
        // The template is untouched
        assert_eq!(template, red());
    }

    #[test]
    fn test_card_flip_cycle() {
        let mut card = Card::from_template(&red());
        assert_eq!(card.face(), &CardFace::FaceDown);
        assert!(card.visible_image().is_none());

        let shown = card.flip_up().clone();
        assert_eq!(shown.as_str(), "colors_memory_red");
        assert!(card.is_face_up());
        assert_eq!(card.visible_image(), Some(&shown));

        card.flip_down();
        assert_eq!(card.face(), &CardFace::FaceDown);
    }

    #[test]
    fn test_paired_card_stays_face_up() {
        let mut card = Card::from_template(&red());
        card.flip_up();
        card.mark_paired();
        card.flip_down();
        assert!(card.is_paired());
        assert!(card.is_face_up());
    }

    #[test]
    fn test_asset_ref_display() {
        let audio = AudioRef::from("celebration_short");
        assert_eq!(audio.to_string(), "celebration_short");
        assert_eq!(AudioRef::new(String::from("x")), AudioRef::from("x"));
    }
}
