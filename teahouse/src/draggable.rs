//! Drag interaction state machine for one draggable ingredient.
//!
//! ## State Transitions
//!
//! ```text
//! Free / ReturningHome -> Dragging      (begin drag, not locked)
//! Dragging -> Dragging                  (drag delta, raw screen units)
//! Dragging -> ReturningHome -> Free     (end drag or invalid drop)
//! Dragging -> LockedTransition          (valid drop: snap, success cue, start dwell)
//! LockedTransition -> StuckToTarget     (dwell over, sticky)
//! LockedTransition -> ReturningHome     (dwell over, not sticky)
//! StuckToTarget / ReturningHome -> Free (become draggable again; a return finishes first)
//! StuckToTarget -> Dragging             (begin drag, when still hit by raycasts)
//! ```
//!
//! Only `LockedTransition` locks input. A return tween can be interrupted by a new drag.

use std::time::Duration;

use engine::transform::NodeId;
use engine::tween::Tween;
use engine::ui::{CanvasGroup, Graphic, Rect, set_raycast_targets};
use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::animation::{AnimationDriver, CueNames};
use crate::drop_zone::{DropVerdict, ZoneId};
use crate::dwell::DwellTimer;
use crate::settings::DragSettings;
use crate::stage::Stage;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DraggableConfig {
    pub name: String,
    pub sticky: bool,
    pub becomes_drop_zone_on_stick: bool,
    pub self_managed_animations: bool,
    #[serde(with = "crate::serde_secs")]
    pub drop_success_duration: Duration,
    #[serde(with = "crate::serde_secs")]
    pub return_duration: Duration,
    pub drag_alpha: f32,
    /// Hit area centred on the item's world position.
    pub size: Vec2,
    pub cues: CueNames,
}

impl DraggableConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self::from_settings(name, &DragSettings::default())
    }

    pub fn from_settings(name: impl Into<String>, settings: &DragSettings) -> Self {
        Self {
            name: name.into(),
            sticky: false,
            becomes_drop_zone_on_stick: false,
            self_managed_animations: true,
            drop_success_duration: settings.drop_success_duration,
            return_duration: settings.return_duration,
            drag_alpha: settings.drag_alpha,
            size: Vec2::new(64.0, 64.0),
            cues: CueNames::default(),
        }
    }

    pub fn sticky(mut self, sticky: bool) -> Self {
        self.sticky = sticky;
        self
    }

    pub fn becomes_drop_zone_on_stick(mut self, enabled: bool) -> Self {
        self.becomes_drop_zone_on_stick = enabled;
        self
    }

    pub fn with_size(mut self, size: Vec2) -> Self {
        self.size = size;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum DragState {
    Free,
    Dragging,
    LockedTransition { dwell: DwellTimer, lock_target: NodeId },
    StuckToTarget { target: NodeId },
    ReturningHome { tween: Tween<Vec3> },
}

impl DragState {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Free => "free",
            Self::Dragging => "dragging",
            Self::LockedTransition { .. } => "locked",
            Self::StuckToTarget { .. } => "stuck",
            Self::ReturningHome { .. } => "returning",
        }
    }
}

/// Serializable view of an item, used for logs and regression traces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DraggableSnapshot {
    pub name: String,
    pub state: String,
    pub position: Vec3,
    pub anchor: Vec3,
    pub parent: Option<NodeId>,
    pub canvas: CanvasGroup,
}

#[derive(Debug)]
pub struct Draggable {
    config: DraggableConfig,
    node: NodeId,
    companion: Option<ZoneId>,
    animator: Option<Box<dyn AnimationDriver>>,
    canvas: CanvasGroup,
    graphics: Vec<Graphic>,
    anchor: Vec3,
    state: DragState,
    disposed: bool,
}

impl Draggable {
    pub fn new(config: DraggableConfig, node: NodeId) -> Self {
        Self {
            config,
            node,
            companion: None,
            animator: None,
            canvas: CanvasGroup::default(),
            graphics: Vec::new(),
            anchor: Vec3::ZERO,
            state: DragState::Free,
            disposed: false,
        }
    }

    pub fn with_companion(mut self, zone: ZoneId) -> Self {
        self.companion = Some(zone);
        self
    }

    pub fn with_animator(mut self, animator: Box<dyn AnimationDriver>) -> Self {
        self.animator = Some(animator);
        self
    }

    pub fn with_graphics(mut self, graphics: Vec<Graphic>) -> Self {
        self.graphics = graphics;
        self
    }

    pub fn name(&self) -> &str {
        &self.config.name
    }

    pub fn config(&self) -> &DraggableConfig {
        &self.config
    }

    pub fn node(&self) -> NodeId {
        self.node
    }

    pub fn companion(&self) -> Option<ZoneId> {
        self.companion
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    pub fn anchor(&self) -> Vec3 {
        self.anchor
    }

    pub fn canvas(&self) -> CanvasGroup {
        self.canvas
    }

    pub fn graphics(&self) -> &[Graphic] {
        &self.graphics
    }

    pub fn is_locked(&self) -> bool {
        matches!(self.state, DragState::LockedTransition { .. })
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging)
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    pub fn bounds(&self, stage: &Stage) -> Rect {
        Rect::from_center_size(stage.graph.world_position(self.node).truncate(), self.config.size)
    }

    /// Whether pointer raycasts can currently hit this item.
    pub fn receives_pointer(&self) -> bool {
        !self.disposed
            && self.canvas.blocks_raycasts
            && (self.graphics.is_empty() || self.graphics.iter().any(|g| g.raycast_target))
    }

    /// Records the spawn position as the anchor and hides the companion zone.
    pub fn init(&mut self, stage: &mut Stage) {
        let Stage { graph, zones } = stage;
        self.anchor = graph.world_position(self.node);
        if let Some(zone) = self.companion.and_then(|id| zones.get(id)) {
            graph.set_active(zone.node(), false);
        }
        tracing::debug!(item = %self.config.name, anchor = ?self.anchor, "draggable ready");
    }

    pub fn begin_drag(&mut self) -> bool {
        if self.disposed || self.is_locked() {
            return false;
        }
        self.state = DragState::Dragging;
        self.canvas.alpha = self.config.drag_alpha;
        self.canvas.blocks_raycasts = false;
        tracing::debug!(item = %self.config.name, "drag started");
        true
    }

    /// Moves by the raw pointer delta. The canvas scale factor is deliberately not applied.
    pub fn drag(&mut self, stage: &mut Stage, delta: Vec2) {
        if self.disposed || !self.is_dragging() {
            return;
        }
        stage.graph.translate(self.node, delta.extend(0.0));
    }

    /// Resolves a drag that no zone accepted.
    pub fn end_drag(&mut self, stage: &mut Stage) {
        if self.disposed || self.is_locked() {
            return;
        }
        self.restore_visuals();
        self.return_to_anchor(stage);
        self.play_drop_cue(false);
    }

    /// Pointer release at `point`: lets the zones validate first, then ends the drag.
    ///
    /// A valid drop locks the item, so the trailing `end_drag` is a no-op for it.
    pub fn release(&mut self, stage: &mut Stage, point: Vec2) -> DropVerdict {
        let verdict = stage.zones.evaluate(&stage.graph, &self.config.name, self.node, point);
        match verdict {
            DropVerdict::Accepted {
                world_position,
                lock_target,
            } => self.on_valid_drop(stage, world_position, lock_target),
            DropVerdict::Rejected => self.on_invalid_drop(stage),
            DropVerdict::Missed => {}
        }
        self.end_drag(stage);
        verdict
    }

    pub fn on_valid_drop(&mut self, stage: &mut Stage, world_position: Vec3, lock_target: NodeId) {
        if self.disposed {
            return;
        }
        if self.is_locked() {
            tracing::warn!(item = %self.config.name, "valid drop while already locked; ignoring");
            return;
        }
        if !stage.graph.contains(lock_target) {
            tracing::warn!(item = %self.config.name, ?lock_target, "lock target is not in this scene; ignoring drop");
            return;
        }
        self.state = DragState::LockedTransition {
            dwell: DwellTimer::new(self.config.drop_success_duration),
            lock_target,
        };
        stage.graph.set_world_position(self.node, world_position);
        self.restore_visuals();
        self.play_drop_cue(true);
        tracing::debug!(item = %self.config.name, position = ?world_position, "drop accepted");
    }

    pub fn on_invalid_drop(&mut self, stage: &mut Stage) {
        if self.disposed || self.is_locked() {
            return;
        }
        self.restore_visuals();
        self.return_to_anchor(stage);
        self.play_drop_cue(false);
        tracing::debug!(item = %self.config.name, "drop rejected");
    }

    /// Re-arms a stuck item: interactive again, anchored where it now sits, companion zone put away.
    ///
    /// A pending return home is completed first. A drag in progress keeps going.
    pub fn become_draggable_again(&mut self, stage: &mut Stage) {
        if self.disposed {
            return;
        }
        if self.is_locked() {
            tracing::warn!(item = %self.config.name, "cannot re-arm during the drop dwell; ignoring");
            return;
        }
        let Stage { graph, zones } = stage;
        if let DragState::ReturningHome { tween } = self.state {
            graph.set_world_position(self.node, tween.to());
            self.state = DragState::Free;
        }
        let dragging = self.is_dragging();
        if !dragging {
            self.canvas.blocks_raycasts = true;
        }
        self.canvas.interactable = true;
        self.anchor = graph.world_position(self.node);
        set_raycast_targets(&mut self.graphics, true);

        match self.companion.and_then(|id| zones.get_mut(id)) {
            Some(zone) => {
                graph.set_active(zone.node(), false);
                zone.deactivate();
                graph.set_parent(zone.node(), Some(self.node));
            }
            None => tracing::debug!(item = %self.config.name, "no companion zone to put away"),
        }

        if !dragging {
            self.state = DragState::Free;
        }
        tracing::debug!(item = %self.config.name, anchor = ?self.anchor, "draggable again");
    }

    pub fn tick(&mut self, stage: &mut Stage, dt: Duration) {
        if self.disposed {
            return;
        }
        match &mut self.state {
            DragState::LockedTransition { dwell, lock_target } => {
                if !dwell.tick(dt) {
                    return;
                }
                let target = *lock_target;
                if self.config.sticky {
                    self.lock_to_target(stage, target);
                } else {
                    self.return_to_anchor(stage);
                }
            }
            DragState::ReturningHome { tween } => {
                let position = tween.advance(dt);
                let finished = tween.is_finished();
                stage.graph.set_world_position(self.node, position);
                if finished {
                    self.state = DragState::Free;
                }
            }
            DragState::Free | DragState::Dragging | DragState::StuckToTarget { .. } => {}
        }
    }

    /// Drops any in-flight dwell or return tween; later input is ignored.
    pub fn dispose(&mut self) {
        if matches!(
            self.state,
            DragState::LockedTransition { .. } | DragState::ReturningHome { .. } | DragState::Dragging
        ) {
            self.state = DragState::Free;
        }
        self.disposed = true;
    }

    pub fn snapshot(&self, stage: &Stage) -> DraggableSnapshot {
        DraggableSnapshot {
            name: self.config.name.clone(),
            state: self.state.label().to_string(),
            position: stage.graph.world_position(self.node),
            anchor: self.anchor,
            parent: stage.graph.parent(self.node),
            canvas: self.canvas,
        }
    }

    fn lock_to_target(&mut self, stage: &mut Stage, target: NodeId) {
        let Stage { graph, zones } = stage;
        let former_parent = graph.parent(self.node);
        if graph.set_parent(self.node, Some(target)) {
            graph.set_local_position(self.node, Vec3::ZERO);
        } else {
            tracing::warn!(item = %self.config.name, "lock target is inside the item; staying put");
        }
        self.state = DragState::StuckToTarget { target };
        tracing::debug!(item = %self.config.name, "stuck to target");

        if self.config.becomes_drop_zone_on_stick {
            if let Some(zone) = self.companion.and_then(|id| zones.get_mut(id)) {
                self.canvas.blocks_raycasts = false;
                self.canvas.interactable = false;
                set_raycast_targets(&mut self.graphics, false);

                graph.set_parent(zone.node(), former_parent);
                graph.set_active(zone.node(), true);
                zone.reactivate();
                tracing::debug!(item = %self.config.name, zone = %zone.name, "companion zone live");
            }
        }

        if self.config.self_managed_animations {
            let idle = self.config.cues.idle.clone();
            self.play(&idle);
        }
    }

    fn return_to_anchor(&mut self, stage: &mut Stage) {
        let from = stage.graph.world_position(self.node);
        let tween = Tween::new(from, self.anchor, self.config.return_duration);
        if tween.is_finished() {
            stage.graph.set_world_position(self.node, self.anchor);
            self.state = DragState::Free;
        } else {
            self.state = DragState::ReturningHome { tween };
        }
        if self.config.self_managed_animations {
            let idle = self.config.cues.idle.clone();
            self.play(&idle);
        }
    }

    fn restore_visuals(&mut self) {
        self.canvas.alpha = 1.0;
        self.canvas.blocks_raycasts = true;
    }

    fn play_drop_cue(&mut self, success: bool) {
        if !self.config.self_managed_animations {
            return;
        }
        let Some(animator) = self.animator.as_mut() else {
            return;
        };
        let trigger = if success {
            &self.config.cues.drop_success
        } else {
            &self.config.cues.drop_failed
        };
        animator.set_trigger(trigger);
    }

    fn play(&mut self, state: &str) {
        if let Some(animator) = self.animator.as_mut() {
            animator.play(state);
        }
    }
}
