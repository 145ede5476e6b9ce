use std::time::Duration;

use engine::transform::{NodeId, SceneGraph};
use engine::tween::Tween;
use serde::{Deserialize, Serialize};

use crate::services::SpriteCatalog;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
struct PortraitFade {
    tween: Tween<f32>,
    hide_at_end: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortraitSnapshot {
    pub bound: bool,
    pub sprite: Option<String>,
    pub alpha: f32,
    pub fading: bool,
}

/// The speaking character's sprite in the current scene.
///
/// Scenes without a portrait leave it unbound; every call then warns and does nothing.
#[derive(Debug)]
pub struct CharacterPortrait {
    node: Option<NodeId>,
    sprite: Option<String>,
    alpha: f32,
    fade: Option<PortraitFade>,
    fade_duration: Duration,
    catalog: Box<dyn SpriteCatalog>,
}

impl CharacterPortrait {
    pub fn new(catalog: Box<dyn SpriteCatalog>, fade_duration: Duration) -> Self {
        Self {
            node: None,
            sprite: None,
            alpha: 1.0,
            fade: None,
            fade_duration,
            catalog,
        }
    }

    pub fn bind(&mut self, node: NodeId) {
        self.node = Some(node);
        self.fade = None;
    }

    pub fn unbind(&mut self) {
        self.node = None;
        self.fade = None;
    }

    pub fn node(&self) -> Option<NodeId> {
        self.node
    }

    pub fn sprite(&self) -> Option<&str> {
        self.sprite.as_deref()
    }

    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    pub fn is_fading(&self) -> bool {
        self.fade.is_some()
    }

    pub fn set_character(&mut self, name: &str) {
        if self.node.is_none() {
            tracing::warn!(name, "no character portrait in scene; cannot set sprite");
            return;
        }
        let path = format!("Characters/{name}");
        if self.catalog.contains(&path) {
            tracing::debug!(%path, "character sprite set");
            self.sprite = Some(path);
        } else {
            tracing::warn!(%path, "character sprite not found");
        }
    }

    /// Fades the portrait in (activating it first) or out (deactivating it at the end).
    pub fn set_visible(&mut self, graph: &mut SceneGraph, show: bool) {
        let Some(node) = self.node else {
            tracing::warn!(show, "no character portrait in scene; cannot change visibility");
            return;
        };
        let (from, to) = if show { (0.0, 1.0) } else { (1.0, 0.0) };
        if show {
            self.alpha = 0.0;
            graph.set_active(node, true);
        }
        self.fade = Some(PortraitFade {
            tween: Tween::new(from, to, self.fade_duration),
            hide_at_end: !show,
        });
        if self.fade_duration.is_zero() {
            self.tick(graph, Duration::ZERO);
        }
    }

    pub fn tick(&mut self, graph: &mut SceneGraph, dt: Duration) {
        let Some(mut fade) = self.fade.take() else {
            return;
        };
        self.alpha = fade.tween.advance(dt);
        if !fade.tween.is_finished() {
            self.fade = Some(fade);
            return;
        }
        if fade.hide_at_end {
            if let Some(node) = self.node {
                graph.set_active(node, false);
            }
        }
    }

    pub fn snapshot(&self) -> PortraitSnapshot {
        PortraitSnapshot {
            bound: self.node.is_some(),
            sprite: self.sprite.clone(),
            alpha: self.alpha,
            fading: self.fade.is_some(),
        }
    }
}
