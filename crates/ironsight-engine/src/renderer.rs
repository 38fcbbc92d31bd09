//! Presentation seam.
//!
//! The window and GPU are external collaborators. The game hands the
//! scene, the camera and the HUD draw list to a [`HudRenderer`] once per
//! frame; [`RecordingRenderer`] keeps the last frame for headless runs and
//! tests.

use ironsight_gameplay::DrawCommand;
use ironsight_scene::{Camera, SceneGraph};
use tracing::{debug, info};

/// Draws one frame.
pub trait HudRenderer {
    /// Starts a frame and draws the 3D scene from `camera`.
    fn begin_frame(&mut self, scene: &SceneGraph, camera: &Camera);
    /// Draws one HUD command on top of the scene.
    fn draw(&mut self, command: &DrawCommand);
    /// Presents the frame.
    fn end_frame(&mut self);
    /// Switches between windowed and fullscreen.
    fn set_fullscreen(&mut self, fullscreen: bool);
}

/// Renderer that keeps the most recent frame in memory.
#[derive(Debug, Clone, Default)]
pub struct RecordingRenderer {
    frames: u64,
    visible_nodes: Vec<String>,
    pending: Vec<DrawCommand>,
    last_frame: Vec<DrawCommand>,
    fullscreen: bool,
}

impl RecordingRenderer {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Frames presented so far.
    #[must_use]
    pub const fn frames(&self) -> u64 {
        self.frames
    }

    /// HUD commands of the last presented frame.
    #[must_use]
    pub fn last_frame(&self) -> &[DrawCommand] {
        &self.last_frame
    }

    /// Names of the scene nodes drawn in the current or last frame.
    #[must_use]
    pub fn visible_nodes(&self) -> &[String] {
        &self.visible_nodes
    }

    /// Whether fullscreen is on.
    #[must_use]
    pub const fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }
}

impl HudRenderer for RecordingRenderer {
    fn begin_frame(&mut self, scene: &SceneGraph, _camera: &Camera) {
        self.pending.clear();
        self.visible_nodes = scene
            .visible_nodes()
            .map(|(_, node)| node.name.clone())
            .collect();
    }

    fn draw(&mut self, command: &DrawCommand) {
        self.pending.push(command.clone());
    }

    fn end_frame(&mut self) {
        self.last_frame = std::mem::take(&mut self.pending);
        self.frames += 1;
        debug!(frame = self.frames, commands = self.last_frame.len(), "frame presented");
    }

    fn set_fullscreen(&mut self, fullscreen: bool) {
        self.fullscreen = fullscreen;
        info!(fullscreen, "display mode changed");
    }
}
