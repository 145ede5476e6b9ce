//! World-space UI primitives: hit rectangles, canvas groups and raycast targets.

use glam::Vec2;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub fn new(a: Vec2, b: Vec2) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    pub fn from_center_size(center: Vec2, size: Vec2) -> Self {
        let half = size.abs() * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x < self.max.x && p.y >= self.min.y && p.y < self.max.y
    }

    pub fn translated(&self, offset: Vec2) -> Self {
        Self {
            min: self.min + offset,
            max: self.max + offset,
        }
    }
}

/// Group-wide visual and pointer state for a UI object and its children.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CanvasGroup {
    pub alpha: f32,
    pub blocks_raycasts: bool,
    pub interactable: bool,
}

impl Default for CanvasGroup {
    fn default() -> Self {
        Self {
            alpha: 1.0,
            blocks_raycasts: true,
            interactable: true,
        }
    }
}

impl CanvasGroup {
    pub fn is_at_rest(&self) -> bool {
        (self.alpha - 1.0).abs() <= f32::EPSILON && self.blocks_raycasts
    }
}

/// A child visual element that may or may not be hit by pointer raycasts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Graphic {
    pub name: String,
    pub raycast_target: bool,
}

impl Graphic {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            raycast_target: true,
        }
    }
}

pub fn set_raycast_targets(graphics: &mut [Graphic], enabled: bool) {
    for graphic in graphics {
        graphic.raycast_target = enabled;
    }
}
