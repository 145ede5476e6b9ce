//! Translation-only transform hierarchy.
//!
//! Nodes live in an arena and refer to their parent by id. Only translation is modelled: a node's
//! world position is the sum of the local offsets along its parent chain. `NodeId`s are only
//! minted by the graph that owns them; passing an id from another graph panics on lookup. Check
//! outside ids with `contains` or look them up with `get`.

use glam::Vec3;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub name: String,
    parent: Option<NodeId>,
    local_position: Vec3,
    active: bool,
}

impl Node {
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn local_position(&self) -> Vec3 {
        self.local_position
    }

    pub fn is_active(&self) -> bool {
        self.active
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneGraph {
    nodes: Vec<Node>,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Adds a node at `local_position` relative to `parent` (or the root).
    pub fn spawn(&mut self, name: impl Into<String>, parent: Option<NodeId>, local_position: Vec3) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node {
            name: name.into(),
            parent,
            local_position,
            active: true,
        });
        id
    }

    /// Adds a node so that it ends up at `world_position`.
    pub fn spawn_at_world(&mut self, name: impl Into<String>, parent: Option<NodeId>, world_position: Vec3) -> NodeId {
        let parent_world = parent.map(|p| self.world_position(p)).unwrap_or(Vec3::ZERO);
        self.spawn(name, parent, world_position - parent_world)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        id.index() < self.nodes.len()
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    pub fn find(&self, name: &str) -> Option<NodeId> {
        self.nodes
            .iter()
            .position(|n| n.name == name)
            .map(|i| NodeId(i as u32))
    }

    /// Every node called `name`, in spawn order.
    pub fn find_all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = NodeId> + 'a {
        self.nodes
            .iter()
            .enumerate()
            .filter(move |(_, n)| n.name == name)
            .map(|(i, _)| NodeId(i as u32))
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    pub fn children(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .filter(move |(_, n)| n.parent == Some(id))
            .map(|(i, _)| NodeId(i as u32))
    }

    pub fn local_position(&self, id: NodeId) -> Vec3 {
        self.node(id).local_position
    }

    pub fn set_local_position(&mut self, id: NodeId, local_position: Vec3) {
        self.nodes[id.index()].local_position = local_position;
    }

    pub fn world_position(&self, id: NodeId) -> Vec3 {
        let mut pos = Vec3::ZERO;
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            let node = self.node(current);
            pos += node.local_position;
            cursor = node.parent;
        }
        pos
    }

    pub fn set_world_position(&mut self, id: NodeId, world_position: Vec3) {
        let parent_world = self
            .parent(id)
            .map(|p| self.world_position(p))
            .unwrap_or(Vec3::ZERO);
        self.set_local_position(id, world_position - parent_world);
    }

    pub fn translate(&mut self, id: NodeId, delta: Vec3) {
        self.nodes[id.index()].local_position += delta;
    }

    /// Returns true if `ancestor` appears on `id`'s parent chain (or is `id` itself).
    pub fn is_ancestor_or_self(&self, ancestor: NodeId, id: NodeId) -> bool {
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            if current == ancestor {
                return true;
            }
            cursor = self.node(current).parent;
        }
        false
    }

    /// Moves `id` under `parent`, keeping its world position.
    ///
    /// Returns false (and leaves the graph untouched) if the move would create a cycle or names an
    /// unknown node.
    pub fn set_parent(&mut self, id: NodeId, parent: Option<NodeId>) -> bool {
        if !self.contains(id) || parent.is_some_and(|p| !self.contains(p)) {
            tracing::warn!(?id, ?parent, "reparent names a node outside this graph; ignoring");
            return false;
        }
        if let Some(p) = parent {
            if self.is_ancestor_or_self(id, p) {
                tracing::warn!(
                    node = %self.node(id).name,
                    parent = %self.node(p).name,
                    "refusing to reparent a node under its own subtree"
                );
                return false;
            }
        }
        let world = self.world_position(id);
        self.nodes[id.index()].parent = parent;
        self.set_world_position(id, world);
        true
    }

    pub fn set_active(&mut self, id: NodeId, active: bool) {
        self.nodes[id.index()].active = active;
    }

    pub fn is_active(&self, id: NodeId) -> bool {
        self.node(id).active
    }

    /// Active only if the node and every ancestor are active.
    pub fn is_active_in_hierarchy(&self, id: NodeId) -> bool {
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            let node = self.node(current);
            if !node.active {
                return false;
            }
            cursor = node.parent;
        }
        true
    }
}
