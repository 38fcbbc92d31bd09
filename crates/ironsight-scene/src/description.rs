//! Scene descriptions loaded from RON.
//!
//! The shipped map is a short list of named, positioned nodes. It is bundled
//! with the game; a malformed or unreadable description is fatal at startup.

use glam::Vec3;
use ironsight_common::AssetError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::info;

use crate::graph::{SceneGraph, SceneNode};

fn default_visible() -> bool {
    true
}

/// One node in a scene description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeDescription {
    /// Unique node name
    pub name: String,
    /// World position
    pub position: Vec3,
    /// Initial visibility
    #[serde(default = "default_visible")]
    pub visible: bool,
}

/// A whole scene.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneDescription {
    /// Nodes in draw order
    pub nodes: Vec<NodeDescription>,
}

impl SceneDescription {
    /// Parses a description from RON text.
    pub fn from_ron_str(text: &str) -> Result<Self, AssetError> {
        ron::from_str(text).map_err(|e| AssetError::Parse {
            what: "scene description",
            message: e.to_string(),
        })
    }

    /// Reads and parses a description file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, AssetError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| AssetError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let description = Self::from_ron_str(&text)?;
        info!(
            "Loaded scene from {} ({} nodes)",
            path.display(),
            description.nodes.len()
        );
        Ok(description)
    }

    /// Instantiates the nodes into a fresh scene graph.
    pub fn build(&self) -> Result<SceneGraph, AssetError> {
        let mut graph = SceneGraph::new();
        for node in &self.nodes {
            let mut scene_node = SceneNode::new(node.name.clone(), node.position);
            scene_node.visible = node.visible;
            graph.add(scene_node)?;
        }
        Ok(graph)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const MAP: &str = r#"(
        nodes: [
            (name: "Ground", position: (0.0, 0.0, 0.0)),
            (name: "Spin", position: (4.0, 1.5, -6.0)),
            (name: "Secret", position: (0.0, -5.0, 0.0), visible: false),
        ],
    )"#;

    #[test]
    fn test_parse_and_build() {
        let description = SceneDescription::from_ron_str(MAP).expect("valid map");
        assert_eq!(description.nodes.len(), 3);
        assert!(description.nodes[0].visible);
        assert!(!description.nodes[2].visible);

        let graph = description.build().expect("unique names");
        let spin = graph.resolve("Spin").expect("spin exists");
        assert_eq!(graph.world_position(spin), Some(Vec3::new(4.0, 1.5, -6.0)));
    }

    #[test]
    fn test_malformed_is_parse_error() {
        let result = SceneDescription::from_ron_str("(nodes: [ (name: 3) ])");
        assert!(matches!(result, Err(AssetError::Parse { .. })));
    }

    #[test]
    fn test_duplicate_node_fails_build() {
        let description = SceneDescription::from_ron_str(
            r#"(nodes: [(name: "a", position: (0.0, 0.0, 0.0)), (name: "a", position: (1.0, 0.0, 0.0))])"#,
        )
        .expect("parses");
        assert!(matches!(
            description.build(),
            Err(AssetError::DuplicateNode(_))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().expect("temp file");
        file.write_all(MAP.as_bytes()).expect("write");

        let description = SceneDescription::load(file.path()).expect("loads");
        assert_eq!(description.nodes.len(), 3);
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let result = SceneDescription::load("/nonexistent/map.ron");
        assert!(matches!(result, Err(AssetError::Read { .. })));
    }
}
