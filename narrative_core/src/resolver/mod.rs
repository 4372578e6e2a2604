//! Ending resolver payloads - what each ending looks like.

use game_rules::EndingKind;

use crate::presentation::Sprite;

/// Label of the single choice offered once the night is over.
pub const PLAY_AGAIN_LABEL: &str = "Play Again";

/// Image and closing text for an ending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EndingPayload {
    pub sprite: Sprite,
    pub glitch: bool,
    pub text: &'static str,
}

impl EndingPayload {
    /// The fixed presentation for `kind`.
    pub fn for_kind(kind: EndingKind) -> Self {
        match kind {
            EndingKind::Sanity => Self {
                sprite: Sprite::EndingMadness,
                glitch: true,
                text: "You forget her again, lost to the darkness. The loop continues. ENDING: THE MADNESS",
            },
            EndingKind::Crash => Self {
                sprite: Sprite::EndingCrash,
                glitch: false,
                text: "You crash at the same spot, again. The loop resets. ENDING: THE CRASH",
            },
            EndingKind::Survived => Self {
                sprite: Sprite::EndingSurvivor,
                glitch: false,
                text: "You drive away, leaving her behind forever. You survived, but at what cost? ENDING: THE SURVIVOR",
            },
            EndingKind::TrueEnding => Self {
                sprite: Sprite::EndingTrue,
                glitch: false,
                text: "You call her name, \"Anjali!\" and hold up the locket. Her form softens. \"You remembered,\" she whispers. The world fades to a peaceful white.",
            },
            EndingKind::Captured => Self {
                sprite: Sprite::EndingCaptured,
                glitch: true,
                text: "Her face is the last thing you see. ENDING: THE CAPTURED",
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_titled_endings_name_themselves() {
        for kind in EndingKind::ALL {
            let payload = EndingPayload::for_kind(kind);
            if let Some(title) = kind.title() {
                assert!(payload.text.ends_with(&format!("ENDING: {title}")));
            }
        }
    }

    #[test]
    fn test_every_ending_has_its_own_image() {
        let mut sprites: Vec<_> = EndingKind::ALL
            .into_iter()
            .map(|kind| EndingPayload::for_kind(kind).sprite.name())
            .collect();
        sprites.sort();
        sprites.dedup();
        assert_eq!(sprites.len(), 5);
    }

    #[test]
    fn test_glitched_endings() {
        assert!(EndingPayload::for_kind(EndingKind::Sanity).glitch);
        assert!(EndingPayload::for_kind(EndingKind::Captured).glitch);
        assert!(!EndingPayload::for_kind(EndingKind::TrueEnding).glitch);
    }
}
