//! Click-to-stir spoon for the tea-making scene.
//!
//! One click runs the whole sequence: move above the pot, stir along a flattened circle, move back,
//! then advance the instruction step. The spoon works once until `reset`.

use std::f32::consts::PI;
use std::time::Duration;

use engine::transform::{NodeId, SceneGraph};
use engine::tween::Tween;
use engine::ui::Rect;
use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::services::{InstructionSteps, SfxPlayer};
use crate::settings::StirSettings;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum StirPhase {
    Idle,
    MovingIn { tween: Tween<Vec3> },
    Stirring {
        #[serde(with = "crate::serde_secs")]
        elapsed: Duration,
    },
    MovingOut { tween: Tween<Vec3> },
}

impl StirPhase {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::MovingIn { .. } => "moving_in",
            Self::Stirring { .. } => "stirring",
            Self::MovingOut { .. } => "moving_out",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpoonSnapshot {
    pub phase: String,
    pub position: Vec3,
    pub sorting_order: i32,
    pub used: bool,
}

#[derive(Debug)]
pub struct SpoonStir {
    node: NodeId,
    pot: Option<NodeId>,
    size: Vec2,
    settings: StirSettings,
    original_position: Vec3,
    stirring_position: Vec3,
    original_sorting_order: i32,
    sorting_order: i32,
    used: bool,
    phase: StirPhase,
    sfx: Option<Box<dyn SfxPlayer>>,
    sfx_volume: f32,
    instructions: Option<Box<dyn InstructionSteps>>,
}

impl SpoonStir {
    pub fn new(node: NodeId, settings: StirSettings) -> Self {
        Self {
            node,
            pot: None,
            size: Vec2::new(48.0, 48.0),
            settings,
            original_position: Vec3::ZERO,
            stirring_position: Vec3::ZERO,
            original_sorting_order: 0,
            sorting_order: 0,
            used: false,
            phase: StirPhase::Idle,
            sfx: None,
            sfx_volume: 1.0,
            instructions: None,
        }
    }

    pub fn with_pot(mut self, pot: NodeId) -> Self {
        self.pot = Some(pot);
        self
    }

    /// Used when there is no pot to stir above.
    pub fn with_stirring_position(mut self, position: Vec3) -> Self {
        self.stirring_position = position;
        self
    }

    pub fn with_size(mut self, size: Vec2) -> Self {
        self.size = size;
        self
    }

    pub fn with_sorting_order(mut self, order: i32) -> Self {
        self.original_sorting_order = order;
        self.sorting_order = order;
        self
    }

    pub fn with_sfx(mut self, sfx: Box<dyn SfxPlayer>, volume: f32) -> Self {
        self.sfx = Some(sfx);
        self.sfx_volume = volume;
        self
    }

    pub fn with_instructions(mut self, instructions: Box<dyn InstructionSteps>) -> Self {
        self.instructions = Some(instructions);
        self
    }

    pub fn node(&self) -> NodeId {
        self.node
    }

    pub fn phase(&self) -> &StirPhase {
        &self.phase
    }

    pub fn is_stirring(&self) -> bool {
        !matches!(self.phase, StirPhase::Idle)
    }

    pub fn has_been_used(&self) -> bool {
        self.used
    }

    pub fn sorting_order(&self) -> i32 {
        self.sorting_order
    }

    pub fn original_position(&self) -> Vec3 {
        self.original_position
    }

    pub fn stirring_position(&self) -> Vec3 {
        self.stirring_position
    }

    pub fn init(&mut self, graph: &SceneGraph) {
        self.original_position = graph.world_position(self.node);
        if let Some(pot) = self.pot {
            let above = graph.world_position(pot);
            self.stirring_position = Vec3::new(
                above.x,
                above.y + self.settings.lift,
                self.original_position.z,
            );
        }
        tracing::debug!(node = ?self.node, stir_at = ?self.stirring_position, "spoon ready");
    }

    pub fn bounds(&self, graph: &SceneGraph) -> Rect {
        Rect::from_center_size(graph.world_position(self.node).truncate(), self.size)
    }

    /// Starts the sequence if `point` hits the spoon and it is idle and unused.
    pub fn click(&mut self, graph: &SceneGraph, point: Vec2) -> bool {
        if self.is_stirring() || self.used {
            return false;
        }
        if !self.bounds(graph).contains(point) {
            return false;
        }
        self.used = true;
        self.sorting_order = self.settings.sorting_order;
        self.phase = StirPhase::MovingIn {
            tween: Tween::new(
                graph.world_position(self.node),
                self.stirring_position,
                self.settings.move_duration,
            ),
        };
        tracing::info!("stirring sequence started");
        true
    }

    pub fn tick(&mut self, graph: &mut SceneGraph, dt: Duration) {
        match &mut self.phase {
            StirPhase::Idle => {}
            StirPhase::MovingIn { tween } => {
                let position = tween.advance(dt);
                graph.set_world_position(self.node, position);
                if tween.is_finished() {
                    self.play_stir_sound();
                    self.phase = StirPhase::Stirring {
                        elapsed: Duration::ZERO,
                    };
                    let start = self.stir_position(Duration::ZERO);
                    graph.set_world_position(self.node, start);
                }
            }
            StirPhase::Stirring { elapsed } => {
                *elapsed = elapsed.saturating_add(dt);
                let now = *elapsed;
                if now < self.settings.duration {
                    let position = self.stir_position(now);
                    graph.set_world_position(self.node, position);
                } else {
                    let tween = Tween::new(
                        self.stirring_position,
                        self.original_position,
                        self.settings.move_duration,
                    );
                    graph.set_world_position(self.node, tween.value());
                    self.phase = StirPhase::MovingOut { tween };
                }
            }
            StirPhase::MovingOut { tween } => {
                let position = tween.advance(dt);
                graph.set_world_position(self.node, position);
                if tween.is_finished() {
                    self.finish();
                }
            }
        }
    }

    pub fn reset(&mut self, graph: &mut SceneGraph) {
        self.used = false;
        self.phase = StirPhase::Idle;
        graph.set_world_position(self.node, self.original_position);
        self.sorting_order = self.original_sorting_order;
    }

    pub fn snapshot(&self, graph: &SceneGraph) -> SpoonSnapshot {
        SpoonSnapshot {
            phase: self.phase.label().to_string(),
            position: graph.world_position(self.node),
            sorting_order: self.sorting_order,
            used: self.used,
        }
    }

    /// Point on the stirring ellipse after `elapsed` of the stir.
    pub fn stir_position(&self, elapsed: Duration) -> Vec3 {
        let total = self.settings.duration.as_secs_f32();
        let t = if total > 0.0 {
            elapsed.as_secs_f32() / total
        } else {
            1.0
        };
        let angle = t * self.settings.turns * 2.0 * PI;
        let radius = self.settings.radius;
        self.stirring_position + Vec3::new(angle.cos() * radius, angle.sin() * radius * 0.5, 0.0)
    }

    fn play_stir_sound(&mut self) {
        let Some(clip) = self.settings.sound.as_deref() else {
            return;
        };
        match self.sfx.as_mut() {
            Some(sfx) => sfx.play_one_shot(clip, self.sfx_volume),
            None => tracing::debug!(clip, "no sfx player; stirring silently"),
        }
    }

    fn finish(&mut self) {
        self.sorting_order = self.original_sorting_order;
        self.phase = StirPhase::Idle;
        match self.instructions.as_mut() {
            Some(steps) => {
                steps.next_step();
                tracing::info!("moving to next instruction step");
            }
            None => tracing::warn!("no instruction steps to advance"),
        }
        tracing::info!("stirring complete");
    }
}
