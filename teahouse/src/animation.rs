use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

/// The animation controller attached to an object, if any.
///
/// Objects hold it as `Option<Box<dyn AnimationDriver>>`; a missing driver silently skips cues.
pub trait AnimationDriver {
    fn set_trigger(&mut self, trigger: &str);
    fn play(&mut self, state: &str);
}

impl fmt::Debug for dyn AnimationDriver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AnimationDriver")
    }
}

/// Names of the triggers/states the authored controllers expose.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CueNames {
    pub drop_success: String,
    /// Rejected drops fire the controller's `Stick` trigger.
    pub drop_failed: String,
    pub idle: String,
}

impl Default for CueNames {
    fn default() -> Self {
        Self {
            drop_success: "DropSuccess".to_string(),
            drop_failed: "Stick".to_string(),
            idle: "Idle".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnimationCue {
    Trigger(String),
    Play(String),
}

/// Driver that records every cue; clones share the same log.
#[derive(Debug, Clone, Default)]
pub struct AnimatorLog {
    cues: Rc<RefCell<Vec<AnimationCue>>>,
}

impl AnimatorLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cues(&self) -> Vec<AnimationCue> {
        self.cues.borrow().clone()
    }

    pub fn last(&self) -> Option<AnimationCue> {
        self.cues.borrow().last().cloned()
    }

    pub fn clear(&self) {
        self.cues.borrow_mut().clear();
    }
}

impl AnimationDriver for AnimatorLog {
    fn set_trigger(&mut self, trigger: &str) {
        tracing::trace!(trigger, "animation trigger");
        self.cues
            .borrow_mut()
            .push(AnimationCue::Trigger(trigger.to_string()));
    }

    fn play(&mut self, state: &str) {
        tracing::trace!(state, "animation play");
        self.cues.borrow_mut().push(AnimationCue::Play(state.to_string()));
    }
}
