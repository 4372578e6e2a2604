//! Presentation gateway - the boundary between the story and whatever draws it.
//!
//! The engine only ever pushes updates through [`Presentation`]; input flows
//! back through [`crate::GameSession::select_choice`].

mod recording;

pub use recording::*;

use serde::{Deserialize, Serialize};

/// Image identifiers. Hosts resolve them to assets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sprite {
    Sighting,
    ChaseMirror,
    Driving,
    Barrack,
    PostOffice,
    CarHiding,
    EndingCrash,
    EndingMadness,
    EndingCaptured,
    EndingSurvivor,
    EndingTrue,
}

impl Sprite {
    /// Asset file stem.
    pub fn name(&self) -> &'static str {
        match self {
            Sprite::Sighting => "sighting",
            Sprite::ChaseMirror => "chase_mirror",
            Sprite::Driving => "driving",
            Sprite::Barrack => "view_barrack",
            Sprite::PostOffice => "view_post_office",
            Sprite::CarHiding => "hiding_handprint",
            Sprite::EndingCrash => "ending_crash",
            Sprite::EndingMadness => "ending_madness",
            Sprite::EndingCaptured => "ending_captured",
            Sprite::EndingSurvivor => "ending_survivor",
            Sprite::EndingTrue => "ending_true",
        }
    }

    /// Relative asset path, e.g. `assets/sighting.png`.
    pub fn asset_path(&self) -> String {
        format!("assets/{}.png", self.name())
    }
}

/// A choice as the player sees it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceView {
    pub label: String,
    pub enabled: bool,
}

impl ChoiceView {
    pub fn new(label: impl Into<String>, enabled: bool) -> Self {
        Self {
            label: label.into(),
            enabled,
        }
    }
}

/// Implemented by the UI layer.
///
/// Text may carry simple inline markup (`<i>`, `<br>`).
pub trait Presentation {
    /// Show an image, optionally with the glitch effect.
    fn display_image(&mut self, sprite: Sprite, glitch: bool);

    /// Replace the story text.
    fn display_text(&mut self, markup: &str);

    /// Replace the status bar line.
    fn display_status(&mut self, line: &str);

    /// Replace the choice list. An empty slice clears it.
    fn set_choices(&mut self, choices: &[ChoiceView]);

    /// Called when the player asks for a new playthrough.
    fn on_restart(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_paths() {
        assert_eq!(Sprite::Sighting.asset_path(), "assets/sighting.png");
        assert_eq!(Sprite::CarHiding.asset_path(), "assets/hiding_handprint.png");
        assert_eq!(Sprite::PostOffice.asset_path(), "assets/view_post_office.png");
    }
}
