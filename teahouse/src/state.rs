use std::time::Duration;

use engine::Behaviour;
use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::commands::Command;
use crate::director::{DirectorSnapshot, SceneDirector};
use crate::draggable::{Draggable, DraggableSnapshot};
use crate::drop_zone::DropVerdict;
use crate::spoon_stir::{SpoonSnapshot, SpoonStir};
use crate::stage::Stage;

/// Everything the host feeds into a frame.
#[derive(Debug, Clone, PartialEq)]
pub enum GameInput {
    Idle,
    PointerDown(Vec2),
    PointerMove(Vec2),
    PointerUp(Vec2),
    Command(Command),
    SceneLoaded(String),
    VideoFinished,
}

impl From<Command> for GameInput {
    fn from(command: Command) -> Self {
        Self::Command(command)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct ActiveDrag {
    item: usize,
    last_pointer: Vec2,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub items: Vec<DraggableSnapshot>,
    pub spoon: Option<SpoonSnapshot>,
    pub director: DirectorSnapshot,
}

/// One loaded scene: its stage, the draggables and spoon placed in it, and the scene director.
#[derive(Debug)]
pub struct GameState {
    stage: Stage,
    items: Vec<Draggable>,
    spoon: Option<SpoonStir>,
    director: SceneDirector,
    active_drag: Option<ActiveDrag>,
    disposed: bool,
}

impl GameState {
    pub fn new(stage: Stage, director: SceneDirector) -> Self {
        Self {
            stage,
            items: Vec::new(),
            spoon: None,
            director,
            active_drag: None,
            disposed: false,
        }
    }

    /// Adds an item on top of the ones already placed.
    pub fn with_item(mut self, item: Draggable) -> Self {
        self.items.push(item);
        self
    }

    pub fn with_spoon(mut self, spoon: SpoonStir) -> Self {
        self.spoon = Some(spoon);
        self
    }

    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    pub fn stage_mut(&mut self) -> &mut Stage {
        &mut self.stage
    }

    pub fn items(&self) -> &[Draggable] {
        &self.items
    }

    pub fn item(&self, name: &str) -> Option<&Draggable> {
        self.items.iter().find(|item| item.name() == name)
    }

    pub fn spoon(&self) -> Option<&SpoonStir> {
        self.spoon.as_ref()
    }

    pub fn director(&self) -> &SceneDirector {
        &self.director
    }

    pub fn director_mut(&mut self) -> &mut SceneDirector {
        &mut self.director
    }

    pub fn dragged_item(&self) -> Option<&Draggable> {
        self.active_drag.and_then(|drag| self.items.get(drag.item))
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Pointer press: the topmost item under the pointer gets the drag, otherwise the spoon the click.
    /// A drag that never saw its release is ended first.
    pub fn pointer_down(&mut self, point: Vec2) {
        if self.disposed {
            return;
        }
        if let Some(stale) = self.active_drag.take() {
            if let Some(item) = self.items.get_mut(stale.item) {
                tracing::debug!(item = %item.name(), "press while still dragging; ending the old drag");
                item.end_drag(&mut self.stage);
            }
        }
        let hit = self
            .items
            .iter()
            .rposition(|item| item.receives_pointer() && item.bounds(&self.stage).contains(point));

        if let Some(index) = hit {
            if self.items[index].begin_drag() {
                self.active_drag = Some(ActiveDrag {
                    item: index,
                    last_pointer: point,
                });
            }
            return;
        }

        if let Some(spoon) = self.spoon.as_mut() {
            spoon.click(&self.stage.graph, point);
        }
    }

    pub fn pointer_move(&mut self, point: Vec2) {
        let Some(drag) = self.active_drag.as_mut() else {
            return;
        };
        let delta = point - drag.last_pointer;
        drag.last_pointer = point;
        if let Some(item) = self.items.get_mut(drag.item) {
            item.drag(&mut self.stage, delta);
        }
    }

    pub fn pointer_up(&mut self, point: Vec2) -> Option<DropVerdict> {
        let drag = self.active_drag.take()?;
        let item = self.items.get_mut(drag.item)?;
        let verdict = item.release(&mut self.stage, point);
        tracing::debug!(item = %item.name(), ?verdict, "pointer released");
        Some(verdict)
    }

    pub fn apply_command(&mut self, command: Command) {
        tracing::debug!(command = command.name(), "dialogue command");
        match command {
            Command::TransToScene(scene) => self.director.trans_to_scene(&scene),
            Command::SetExpectedRecipe(tea) => self.director.set_expected_recipe(&tea),
            Command::QueueDialogueAfterScene(node) => self.director.queue_dialogue_after_scene(&node),
            Command::StopMusic => {
                let music = self.director.music_mut();
                let fade = music.settings().scene_fade;
                music.fade_out(fade);
            }
            Command::StartMusic => self.director.music_mut().recheck(),
            Command::SetMusicVolume(volume) => self.director.music_mut().set_volume(volume),
            Command::FadeOutMusic(duration) => {
                let music = self.director.music_mut();
                let fade = duration.unwrap_or(music.settings().command_fade);
                music.fade_out(fade);
            }
            Command::FadeInMusic(duration) => {
                let music = self.director.music_mut();
                let fade = duration.unwrap_or(music.settings().command_fade);
                music.fade_in(fade);
            }
            Command::SetCharacterVisible(show) => {
                self.director
                    .portrait_mut()
                    .set_visible(&mut self.stage.graph, show);
            }
            Command::SetCharacter(name) => self.director.portrait_mut().set_character(&name),
            Command::BecomeDraggable(name) => {
                match self.items.iter_mut().find(|item| item.name() == name) {
                    Some(item) => item.become_draggable_again(&mut self.stage),
                    None => tracing::warn!(item = %name, "no draggable with that name"),
                }
            }
        }
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            items: self
                .items
                .iter()
                .map(|item| item.snapshot(&self.stage))
                .collect(),
            spoon: self.spoon.as_ref().map(|spoon| spoon.snapshot(&self.stage.graph)),
            director: self.director.snapshot(),
        }
    }
}

impl Behaviour for GameState {
    type Input = GameInput;

    fn init(&mut self) {
        for item in &mut self.items {
            item.init(&mut self.stage);
        }
        if let Some(spoon) = self.spoon.as_mut() {
            spoon.init(&self.stage.graph);
        }
    }

    fn handle(&mut self, input: GameInput) {
        if self.disposed {
            return;
        }
        match input {
            GameInput::Idle => {}
            GameInput::PointerDown(point) => self.pointer_down(point),
            GameInput::PointerMove(point) => self.pointer_move(point),
            GameInput::PointerUp(point) => {
                self.pointer_up(point);
            }
            GameInput::Command(command) => self.apply_command(command),
            GameInput::SceneLoaded(scene) => self.director.on_scene_loaded(&mut self.stage, &scene),
            GameInput::VideoFinished => self.director.on_video_finished(),
        }
    }

    fn tick(&mut self, dt: Duration) {
        if self.disposed {
            return;
        }
        for item in &mut self.items {
            item.tick(&mut self.stage, dt);
        }
        if let Some(spoon) = self.spoon.as_mut() {
            spoon.tick(&mut self.stage.graph, dt);
        }
        self.director.tick(&mut self.stage, dt);
    }

    fn dispose(&mut self) {
        for item in &mut self.items {
            item.dispose();
        }
        self.active_drag = None;
        self.disposed = true;
        tracing::debug!("game state disposed");
    }
}
