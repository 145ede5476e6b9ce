use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::character::{CharacterPortrait, PortraitSnapshot};
use crate::music::{MusicDirector, MusicSnapshot};
use crate::services::{DialogueRunner, SceneTransitions};
use crate::stage::Stage;

pub const MINIGAME_SCENE: &str = "Minigame";
pub const STORY_SCENE: &str = "Story";
pub const TEA_MAKING_SCENE: &str = "Tea_making";
pub const CUSTOMER_HANDOFF_SCENE: &str = "Customer_Handoff";

pub const PREQUEL_NODE: &str = "Prequel";
pub const STORY_NODE: &str = "AneelasFriend";

/// Scene node names the director looks for after a load.
pub const CHARACTER_NODE: &str = "Character";
pub const EVENT_SYSTEM_NODE: &str = "EventSystem";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectorSnapshot {
    pub scene: Option<String>,
    pub queued_dialogue: Option<String>,
    pub expected_recipe: Option<String>,
    pub dialogue_pending: bool,
    pub music: MusicSnapshot,
    pub portrait: PortraitSnapshot,
}

/// Cross-scene bookkeeping: which dialogue runs after a load, background music and the portrait.
#[derive(Debug)]
pub struct SceneDirector {
    music: MusicDirector,
    portrait: CharacterPortrait,
    transitions: Box<dyn SceneTransitions>,
    runner: Option<Box<dyn DialogueRunner>>,
    scene: Option<String>,
    queued_dialogue: Option<String>,
    expected_recipe: Option<String>,
    /// Frames to wait before starting the queued dialogue.
    dialogue_countdown: Option<u8>,
}

impl SceneDirector {
    pub fn new(
        music: MusicDirector,
        portrait: CharacterPortrait,
        transitions: Box<dyn SceneTransitions>,
    ) -> Self {
        Self {
            music,
            portrait,
            transitions,
            runner: None,
            scene: None,
            queued_dialogue: None,
            expected_recipe: None,
            dialogue_countdown: None,
        }
    }

    pub fn with_dialogue_runner(mut self, runner: Box<dyn DialogueRunner>) -> Self {
        self.runner = Some(runner);
        self
    }

    /// Swaps the dialogue runner of the current scene; `None` when the scene has none.
    pub fn set_dialogue_runner(&mut self, runner: Option<Box<dyn DialogueRunner>>) {
        self.runner = runner;
    }

    pub fn music(&self) -> &MusicDirector {
        &self.music
    }

    pub fn music_mut(&mut self) -> &mut MusicDirector {
        &mut self.music
    }

    pub fn portrait(&self) -> &CharacterPortrait {
        &self.portrait
    }

    pub fn portrait_mut(&mut self) -> &mut CharacterPortrait {
        &mut self.portrait
    }

    pub fn scene(&self) -> Option<&str> {
        self.scene.as_deref()
    }

    pub fn queued_dialogue(&self) -> Option<&str> {
        self.queued_dialogue.as_deref()
    }

    pub fn expected_recipe(&self) -> Option<&str> {
        self.expected_recipe.as_deref()
    }

    pub fn is_dialogue_pending(&self) -> bool {
        self.dialogue_countdown.is_some()
    }

    pub fn trans_to_scene(&mut self, scene: &str) {
        self.transitions.transition_to(scene);
        tracing::info!(scene, "transitioning to scene");
    }

    pub fn queue_dialogue_after_scene(&mut self, node: &str) {
        self.queued_dialogue = Some(node.to_string());
        tracing::info!(node, "queued dialogue node");
    }

    pub fn set_expected_recipe(&mut self, tea: &str) {
        self.expected_recipe = Some(tea.to_string());
        tracing::info!(tea, "expected recipe set");
    }

    pub fn on_video_finished(&mut self) {
        self.queued_dialogue = Some(PREQUEL_NODE.to_string());
        self.transitions.transition_to(MINIGAME_SCENE);
        tracing::info!("intro video finished; heading to the minigame");
    }

    /// Bookkeeping after `scene` finished loading into `stage`.
    pub fn on_scene_loaded(&mut self, stage: &mut Stage, scene: &str) {
        tracing::info!(scene, "scene loaded");
        self.scene = Some(scene.to_string());
        self.music.check_and_control(scene);
        remove_duplicate_event_systems(stage);

        self.portrait.unbind();
        let character = stage.graph.find(CHARACTER_NODE);
        match scene {
            MINIGAME_SCENE if self.queued_dialogue.is_none() => {
                self.queued_dialogue = Some(PREQUEL_NODE.to_string());
            }
            STORY_SCENE => match character {
                Some(node) => {
                    self.portrait.bind(node);
                    self.queued_dialogue = Some(STORY_NODE.to_string());
                    tracing::info!("story scene loaded; forcing {STORY_NODE} dialogue");
                }
                None => tracing::warn!(scene, "character not found in scene"),
            },
            TEA_MAKING_SCENE => self.queued_dialogue = None,
            CUSTOMER_HANDOFF_SCENE => match character {
                Some(node) => self.portrait.bind(node),
                None => tracing::warn!(scene, "character not found in scene"),
            },
            _ => {}
        }

        self.dialogue_countdown = Some(1);
    }

    pub fn tick(&mut self, stage: &mut Stage, dt: Duration) {
        self.music.tick(dt);
        self.portrait.tick(&mut stage.graph, dt);

        match self.dialogue_countdown {
            Some(0) => {
                self.dialogue_countdown = None;
                self.start_queued_dialogue();
            }
            Some(frames) => self.dialogue_countdown = Some(frames - 1),
            None => {}
        }
    }

    pub fn snapshot(&self) -> DirectorSnapshot {
        DirectorSnapshot {
            scene: self.scene.clone(),
            queued_dialogue: self.queued_dialogue.clone(),
            expected_recipe: self.expected_recipe.clone(),
            dialogue_pending: self.dialogue_countdown.is_some(),
            music: self.music.snapshot(),
            portrait: self.portrait.snapshot(),
        }
    }

    fn start_queued_dialogue(&mut self) {
        match (self.runner.as_mut(), self.queued_dialogue.take()) {
            (Some(runner), Some(node)) => runner.start_dialogue(&node),
            (None, queued) => {
                self.queued_dialogue = queued;
                tracing::warn!("dialogue runner not found; queued dialogue kept");
            }
            (Some(_), None) => tracing::warn!("no dialogue node queued"),
        }
    }
}

/// Keeps the first active event system and deactivates the rest. Returns how many were removed.
pub fn remove_duplicate_event_systems(stage: &mut Stage) -> usize {
    let live: Vec<_> = stage
        .graph
        .find_all(EVENT_SYSTEM_NODE)
        .filter(|&id| stage.graph.is_active(id))
        .collect();
    let duplicates = live.len().saturating_sub(1);
    if duplicates > 0 {
        tracing::info!(found = live.len(), "removing duplicate event systems");
        for &id in &live[1..] {
            stage.graph.set_active(id, false);
        }
    }
    duplicates
}
