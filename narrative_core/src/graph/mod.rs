//! Narrative graph - the scenes of the night and how they connect.
//!
//! The graph consists of:
//! - **Scenes**: nodes keyed by [`SceneId`], each a list of timed beats
//! - **Choices**: player-driven edges, filtered by the state when offered
//! - **Transitions**: immediate, delayed, probabilistic or terminal edges

mod catalog;
mod ids;
mod scene;

pub use catalog::*;
pub use ids::*;
pub use scene::*;

use std::collections::HashMap;

use game_rules::GameConfig;

/// Registry of every scene, looked up by id.
#[derive(Debug, Clone, Default)]
pub struct SceneGraph {
    scenes: HashMap<SceneId, Scene>,
}

impl SceneGraph {
    /// Create a new empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// The full night, with capture odds taken from the config.
    pub fn standard(config: &GameConfig) -> Self {
        let mut graph = Self::new();
        for scene in standard_scenes(config) {
            graph.insert(scene);
        }
        graph
    }

    /// Add a scene, replacing any scene with the same id.
    pub fn insert(&mut self, scene: Scene) -> Option<Scene> {
        self.scenes.insert(scene.id, scene)
    }

    /// Get scene by ID.
    pub fn scene(&self, id: SceneId) -> Option<&Scene> {
        self.scenes.get(&id)
    }

    pub fn contains(&self, id: SceneId) -> bool {
        self.scenes.contains_key(&id)
    }

    /// Get the total number of scenes.
    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }

    /// Get all registered scene ids.
    pub fn ids(&self) -> impl Iterator<Item = &SceneId> {
        self.scenes.keys()
    }

    /// Targets referenced by some scene but not registered.
    pub fn dangling_targets(&self) -> Vec<SceneId> {
        let mut missing: Vec<SceneId> = self
            .scenes
            .values()
            .flat_map(Scene::targets)
            .filter(|target| !self.contains(*target))
            .collect();
        missing.sort_by_key(SceneId::as_string);
        missing.dedup();
        missing
    }
}
