//! Collaborators the gameplay code talks to but does not implement.
//!
//! Everything here is injected through constructors. `ServiceLog` is the in-process stand-in used
//! by the headless binary and the tests: it records each call and clones share one record.

use std::cell::RefCell;
use std::collections::BTreeSet;
use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

pub trait DialogueRunner {
    fn start_dialogue(&mut self, node: &str);
}

pub trait SceneTransitions {
    fn transition_to(&mut self, scene: &str);
}

pub trait InstructionSteps {
    fn next_step(&mut self);
}

pub trait SpriteCatalog {
    fn contains(&self, path: &str) -> bool;
}

pub trait SfxPlayer {
    fn play_one_shot(&mut self, clip: &str, volume: f32);
}

macro_rules! opaque_debug {
    ($($name:ident),* $(,)?) => {
        $(
            impl fmt::Debug for dyn $name {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(stringify!($name))
                }
            }
        )*
    };
}

opaque_debug!(DialogueRunner, SceneTransitions, InstructionSteps, SpriteCatalog, SfxPlayer);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ServiceCall {
    DialogueStarted(String),
    SceneRequested(String),
    InstructionAdvanced,
    SfxPlayed { clip: String, volume: f32 },
}

#[derive(Debug, Clone, Default)]
pub struct ServiceLog {
    calls: Rc<RefCell<Vec<ServiceCall>>>,
}

impl ServiceLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<ServiceCall> {
        self.calls.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.calls.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.calls.borrow().is_empty()
    }

    pub fn clear(&self) {
        self.calls.borrow_mut().clear();
    }

    pub fn dialogues(&self) -> Vec<String> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|c| match c {
                ServiceCall::DialogueStarted(node) => Some(node.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn scene_requests(&self) -> Vec<String> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|c| match c {
                ServiceCall::SceneRequested(scene) => Some(scene.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn instruction_steps(&self) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|c| matches!(c, ServiceCall::InstructionAdvanced))
            .count()
    }

    fn push(&self, call: ServiceCall) {
        self.calls.borrow_mut().push(call);
    }
}

impl DialogueRunner for ServiceLog {
    fn start_dialogue(&mut self, node: &str) {
        tracing::info!(node, "dialogue started");
        self.push(ServiceCall::DialogueStarted(node.to_string()));
    }
}

impl SceneTransitions for ServiceLog {
    fn transition_to(&mut self, scene: &str) {
        tracing::info!(scene, "scene transition requested");
        self.push(ServiceCall::SceneRequested(scene.to_string()));
    }
}

impl InstructionSteps for ServiceLog {
    fn next_step(&mut self) {
        tracing::info!("instruction step advanced");
        self.push(ServiceCall::InstructionAdvanced);
    }
}

impl SfxPlayer for ServiceLog {
    fn play_one_shot(&mut self, clip: &str, volume: f32) {
        tracing::debug!(clip, volume, "sfx");
        self.push(ServiceCall::SfxPlayed {
            clip: clip.to_string(),
            volume,
        });
    }
}

/// Fixed set of sprite resource paths, e.g. `Characters/Aneela`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaticSpriteCatalog {
    paths: BTreeSet<String>,
}

impl StaticSpriteCatalog {
    pub fn new<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            paths: paths.into_iter().map(Into::into).collect(),
        }
    }
}

impl SpriteCatalog for StaticSpriteCatalog {
    fn contains(&self, path: &str) -> bool {
        self.paths.contains(path)
    }
}
