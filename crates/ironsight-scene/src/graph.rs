//! Flat scene-node arena.
//!
//! Nodes are stored in insertion order and addressed by [`NodeHandle`]. Names
//! are resolved to handles once, while the scene is being built.

use ahash::AHashMap;
use glam::{Quat, Vec3};
use ironsight_common::{AssetError, NodeHandle};
use std::fmt::Write;
use tracing::debug;

/// A transformable, optionally hidden node.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneNode {
    /// Unique node name
    pub name: String,
    /// Local (and world; the arena is flat) position
    pub position: Vec3,
    /// Orientation
    pub rotation: Quat,
    /// Whether the node is drawn
    pub visible: bool,
}

impl SceneNode {
    /// Creates a visible node with identity rotation.
    #[must_use]
    pub fn new(name: impl Into<String>, position: Vec3) -> Self {
        Self {
            name: name.into(),
            position,
            rotation: Quat::IDENTITY,
            visible: true,
        }
    }

    /// Rotates about +Y by `angle` radians.
    pub fn rotate_y(&mut self, angle: f32) {
        self.rotation = Quat::from_rotation_y(angle) * self.rotation;
    }
}

/// Arena of scene nodes.
#[derive(Debug, Clone, Default)]
pub struct SceneGraph {
    nodes: Vec<SceneNode>,
    by_name: AHashMap<String, NodeHandle>,
}

impl SceneGraph {
    /// Creates an empty scene.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a node. Names must be unique.
    pub fn add(&mut self, node: SceneNode) -> Result<NodeHandle, AssetError> {
        if self.by_name.contains_key(&node.name) {
            return Err(AssetError::DuplicateNode(node.name));
        }
        let handle = NodeHandle::from_index(self.nodes.len());
        debug!(name = %node.name, index = handle.index(), "scene node added");
        self.by_name.insert(node.name.clone(), handle);
        self.nodes.push(node);
        Ok(handle)
    }

    /// Looks up a node handle by name.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<NodeHandle> {
        self.by_name.get(name).copied()
    }

    /// Looks up a node the game cannot run without.
    pub fn resolve(&self, name: &str) -> Result<NodeHandle, AssetError> {
        self.find(name)
            .ok_or_else(|| AssetError::MissingNode(name.to_owned()))
    }

    /// Node for a handle.
    #[must_use]
    pub fn get(&self, handle: NodeHandle) -> Option<&SceneNode> {
        self.nodes.get(handle.index())
    }

    /// Mutable node for a handle.
    pub fn get_mut(&mut self, handle: NodeHandle) -> Option<&mut SceneNode> {
        self.nodes.get_mut(handle.index())
    }

    /// World position of a node.
    #[must_use]
    pub fn world_position(&self, handle: NodeHandle) -> Option<Vec3> {
        self.get(handle).map(|node| node.position)
    }

    /// Whether a node is drawn. Unknown handles count as hidden.
    #[must_use]
    pub fn is_visible(&self, handle: NodeHandle) -> bool {
        self.get(handle).is_some_and(|node| node.visible)
    }

    /// All nodes in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeHandle, &SceneNode)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (NodeHandle::from_index(i), node))
    }

    /// Visible nodes only.
    pub fn visible_nodes(&self) -> impl Iterator<Item = (NodeHandle, &SceneNode)> {
        self.iter().filter(|(_, node)| node.visible)
    }

    /// Number of nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the scene has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// One line per node, for startup logging.
    #[must_use]
    pub fn hierarchy_as_string(&self) -> String {
        let mut out = String::from("<Root>\n");
        for (_, node) in self.iter() {
            let marker = if node.visible { "" } else { " (hidden)" };
            let _ = writeln!(
                out,
                "  \\-: {} ({:.2}, {:.2}, {:.2}){marker}",
                node.name, node.position.x, node.position.y, node.position.z
            );
        }
        out
    }
}
