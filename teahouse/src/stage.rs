use engine::transform::SceneGraph;
use serde::{Deserialize, Serialize};

use crate::drop_zone::DropZones;

/// Everything draggables share: the transform hierarchy and the drop zones placed in it.
///
/// Handed to each draggable operation by `&mut` so no item reaches for global scene state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Stage {
    pub graph: SceneGraph,
    pub zones: DropZones,
}

impl Stage {
    pub fn new() -> Self {
        Self::default()
    }
}
