use engine::transform::{NodeId, SceneGraph};
use engine::ui::Rect;
use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ZoneId(usize);

impl ZoneId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Outcome of releasing an item over the zones.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum DropVerdict {
    /// The item should lock at `world_position` and later stick under `lock_target`.
    Accepted { world_position: Vec3, lock_target: NodeId },
    /// The pointer was over a zone that does not take this ingredient.
    Rejected,
    /// No zone under the pointer.
    Missed,
}

/// A region that validates drops.
///
/// Whether the zone's object is visible is tracked on its scene graph node; `enabled` is the zone's
/// own logic, switched by `reactivate`/`deactivate`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DropZone {
    pub name: String,
    node: NodeId,
    size: Vec2,
    accepts: Vec<String>,
    enabled: bool,
    reactivations: u32,
    deactivations: u32,
}

impl DropZone {
    pub fn new(name: impl Into<String>, node: NodeId, size: Vec2) -> Self {
        Self {
            name: name.into(),
            node,
            size,
            accepts: Vec::new(),
            enabled: true,
            reactivations: 0,
            deactivations: 0,
        }
    }

    /// Restricts the zone to the named ingredients. An empty list takes anything.
    pub fn with_accepts<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.accepts = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn node(&self) -> NodeId {
        self.node
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn reactivations(&self) -> u32 {
        self.reactivations
    }

    pub fn deactivations(&self) -> u32 {
        self.deactivations
    }

    pub fn is_live(&self, graph: &SceneGraph) -> bool {
        self.enabled && graph.is_active_in_hierarchy(self.node)
    }

    pub fn bounds(&self, graph: &SceneGraph) -> Rect {
        Rect::from_center_size(graph.world_position(self.node).truncate(), self.size)
    }

    pub fn reactivate(&mut self) {
        self.enabled = true;
        self.reactivations += 1;
        tracing::debug!(zone = %self.name, "drop zone reactivated");
    }

    pub fn deactivate(&mut self) {
        self.enabled = false;
        self.deactivations += 1;
        tracing::debug!(zone = %self.name, "drop zone deactivated");
    }

    pub fn takes(&self, item_name: &str) -> bool {
        self.accepts.is_empty() || self.accepts.iter().any(|n| n == item_name)
    }

    pub fn evaluate(&self, graph: &SceneGraph, item_name: &str, point: Vec2) -> DropVerdict {
        if !self.is_live(graph) || !self.bounds(graph).contains(point) {
            return DropVerdict::Missed;
        }
        if !self.takes(item_name) {
            return DropVerdict::Rejected;
        }
        DropVerdict::Accepted {
            world_position: graph.world_position(self.node),
            lock_target: self.node,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DropZones {
    zones: Vec<DropZone>,
}

impl DropZones {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, zone: DropZone) -> ZoneId {
        self.zones.push(zone);
        ZoneId(self.zones.len() - 1)
    }

    pub fn get(&self, id: ZoneId) -> Option<&DropZone> {
        self.zones.get(id.0)
    }

    pub fn get_mut(&mut self, id: ZoneId) -> Option<&mut DropZone> {
        self.zones.get_mut(id.0)
    }

    pub fn find(&self, name: &str) -> Option<ZoneId> {
        self.zones.iter().position(|z| z.name == name).map(ZoneId)
    }

    pub fn iter(&self) -> impl Iterator<Item = &DropZone> {
        self.zones.iter()
    }

    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }

    /// Asks every zone, topmost (last added) first, whether it takes `item_name` at `point`.
    ///
    /// Zones inside `dragged` (the item's own subtree) are skipped.
    pub fn evaluate(&self, graph: &SceneGraph, item_name: &str, dragged: NodeId, point: Vec2) -> DropVerdict {
        let mut verdict = DropVerdict::Missed;
        for zone in self.zones.iter().rev() {
            if graph.is_ancestor_or_self(dragged, zone.node) {
                continue;
            }
            match zone.evaluate(graph, item_name, point) {
                accepted @ DropVerdict::Accepted { .. } => return accepted,
                DropVerdict::Rejected => verdict = DropVerdict::Rejected,
                DropVerdict::Missed => {}
            }
        }
        verdict
    }
}
