//! Scene and location identifiers - the nodes of the narrative graph.

use serde::{Deserialize, Serialize};

use crate::presentation::Sprite;

/// Places the player can explore on foot.
///
/// Every location goes through the same exploration wrapper: an approach
/// with a capture roll, then the location's own search scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Location {
    Barrack,
    PostOffice,
}

impl Location {
    pub const ALL: [Location; 2] = [Location::Barrack, Location::PostOffice];

    pub fn name(&self) -> &'static str {
        match self {
            Location::Barrack => "barrack",
            Location::PostOffice => "post_office",
        }
    }

    pub fn sprite(&self) -> Sprite {
        match self {
            Location::Barrack => Sprite::Barrack,
            Location::PostOffice => Sprite::PostOffice,
        }
    }

    /// Text shown while approaching, before the capture roll resolves.
    pub fn approach_text(&self) -> &'static str {
        match self {
            Location::Barrack => "You approach the dark, imposing barrack...",
            Location::PostOffice => "You stand before the vine-covered, decaying post office...",
        }
    }

    /// Scene entered when the approach goes unnoticed.
    pub fn search_scene(&self) -> SceneId {
        match self {
            Location::Barrack => SceneId::SearchBarrack,
            Location::PostOffice => SceneId::SearchPostOffice,
        }
    }
}

/// Named nodes of the narrative graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SceneId {
    /// Entry point: the woman on the road.
    Sighting,
    DrivePast,
    StopCar,
    /// Re-entrant chase loop.
    Chase,
    /// Re-entrant hub while stranded.
    OnFoot,
    Hiding,
    ScareReveal,
    Exploring(Location),
    SearchBarrack,
    SearchPostOffice,
    BackToCar,
    FixCar,
}

impl SceneId {
    /// Convert the id to a string representation.
    pub fn as_string(&self) -> String {
        match self {
            SceneId::Sighting => "sighting".to_string(),
            SceneId::DrivePast => "drive_past".to_string(),
            SceneId::StopCar => "stop_car".to_string(),
            SceneId::Chase => "chase".to_string(),
            SceneId::OnFoot => "on_foot".to_string(),
            SceneId::Hiding => "hiding".to_string(),
            SceneId::ScareReveal => "scare_reveal".to_string(),
            SceneId::Exploring(location) => format!("exploring:{}", location.name()),
            SceneId::SearchBarrack => "search_barrack".to_string(),
            SceneId::SearchPostOffice => "search_post_office".to_string(),
            SceneId::BackToCar => "back_to_car".to_string(),
            SceneId::FixCar => "fix_car".to_string(),
        }
    }
}

impl std::fmt::Display for SceneId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scene_id_as_string() {
        assert_eq!(SceneId::OnFoot.as_string(), "on_foot");
        assert_eq!(
            SceneId::Exploring(Location::PostOffice).to_string(),
            "exploring:post_office"
        );
    }

    #[test]
    fn test_locations_lead_to_distinct_searches() {
        assert_ne!(
            Location::Barrack.search_scene(),
            Location::PostOffice.search_scene()
        );
        assert_eq!(Location::Barrack.sprite(), Sprite::Barrack);
    }
}
