//! Scripted input for headless and automated runs.
//!
//! A script is a list of steps. Each step holds one [`RawInput`] sample for a
//! number of frames. Scripts are RON files:
//!
//! ```ron
//! (
//!     name: "aim and fire",
//!     steps: [
//!         (frames: 1, input: (cursor: (175.0, 0.0))),
//!         (frames: 1, input: (cursor: (175.0, 0.0), buttons: [Left])),
//!     ],
//! )
//! ```

use ironsight_common::AssetError;
use ironsight_gameplay::RawInput;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Script bundled with the binary.
const DEMO_SCRIPT: &str = include_str!("../assets/demo_input.ron");

/// Where raw device state comes from, one sample per frame.
pub trait InputSource {
    /// Next frame's input. `None` ends the session.
    fn next_frame(&mut self) -> Option<RawInput>;
}

/// One run of identical frames.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptStep {
    /// How many frames this sample is held
    pub frames: u32,
    /// Device state for those frames
    #[serde(default)]
    pub input: RawInput,
}

impl ScriptStep {
    /// A step holding `input` for `frames` frames.
    #[must_use]
    pub fn new(frames: u32, input: RawInput) -> Self {
        Self { frames, input }
    }
}

/// A named input script.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InputScript {
    /// Script name for logging
    #[serde(default)]
    pub name: String,
    /// Steps in playback order
    pub steps: Vec<ScriptStep>,
}

impl InputScript {
    /// Parses a script from RON text.
    pub fn from_ron_str(text: &str) -> Result<Self, AssetError> {
        ron::from_str(text).map_err(|e| AssetError::Parse {
            what: "input script",
            message: e.to_string(),
        })
    }

    /// Reads and parses a script file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, AssetError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| AssetError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let script = Self::from_ron_str(&text)?;
        info!(
            "Loaded input script '{}' from {} ({} frames)",
            script.name,
            path.display(),
            script.total_frames()
        );
        Ok(script)
    }

    /// The script shipped with the game.
    pub fn demo() -> Result<Self, AssetError> {
        Self::from_ron_str(DEMO_SCRIPT)
    }

    /// Frames the script lasts.
    #[must_use]
    pub fn total_frames(&self) -> u64 {
        self.steps.iter().map(|step| u64::from(step.frames)).sum()
    }
}

/// Plays an [`InputScript`] back frame by frame.
#[derive(Debug, Clone)]
pub struct ScriptedInput {
    steps: VecDeque<ScriptStep>,
    remaining: u32,
    current: Option<RawInput>,
    frames_played: u64,
}

impl ScriptedInput {
    /// Starts playback at the first step.
    #[must_use]
    pub fn new(script: InputScript) -> Self {
        Self {
            steps: script.steps.into(),
            remaining: 0,
            current: None,
            frames_played: 0,
        }
    }

    /// Frames handed out so far.
    #[must_use]
    pub const fn frames_played(&self) -> u64 {
        self.frames_played
    }

    /// Whether every step has been played.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.remaining == 0 && self.steps.iter().all(|step| step.frames == 0)
    }
}

impl InputSource for ScriptedInput {
    fn next_frame(&mut self) -> Option<RawInput> {
        while self.remaining == 0 {
            let step = self.steps.pop_front()?;
            debug!(frames = step.frames, "script step");
            self.remaining = step.frames;
            self.current = Some(step.input);
        }
        self.remaining -= 1;
        self.frames_played += 1;
        self.current.clone()
    }
}

/// Replays a fixed list of samples, one per frame.
impl InputSource for VecDeque<RawInput> {
    fn next_frame(&mut self) -> Option<RawInput> {
        self.pop_front()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ironsight_gameplay::{KeyCode, MouseButton};
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SCRIPT: &str = r#"(
        name: "walk and shoot",
        steps: [
            (frames: 2, input: (keys: [W])),
            (frames: 0, input: (keys: [S])),
            (frames: 1, input: (cursor: (10.0, 5.0), buttons: [Left])),
            (frames: 1),
        ],
    )"#;

    #[test]
    fn test_parse_script() {
        let script = InputScript::from_ron_str(SCRIPT).expect("valid script");
        assert_eq!(script.name, "walk and shoot");
        assert_eq!(script.steps.len(), 4);
        assert_eq!(script.total_frames(), 4);
        assert_eq!(script.steps[3].input, RawInput::default());
    }

    #[test]
    fn test_playback_order() {
        let script = InputScript::from_ron_str(SCRIPT).expect("valid script");
        let mut source = ScriptedInput::new(script);

        let walk = RawInput::default().with_key(KeyCode::W);
        assert_eq!(source.next_frame(), Some(walk.clone()));
        assert_eq!(source.next_frame(), Some(walk));
        // Zero-length steps are skipped
        assert_eq!(
            source.next_frame(),
            Some(RawInput::at(10.0, 5.0).with_button(MouseButton::Left))
        );
        assert_eq!(source.next_frame(), Some(RawInput::default()));
        assert!(source.is_finished());
        assert_eq!(source.next_frame(), None);
        assert_eq!(source.frames_played(), 4);
    }

    #[test]
    fn test_malformed_script() {
        let result = InputScript::from_ron_str("(steps: [(frames: -1)])");
        assert!(matches!(result, Err(AssetError::Parse { what: "input script", .. })));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().expect("temp file");
        file.write_all(SCRIPT.as_bytes()).expect("write");

        let script = InputScript::load(file.path()).expect("loads");
        assert_eq!(script.total_frames(), 4);
    }

    #[test]
    fn test_missing_file() {
        let result = InputScript::load("/nonexistent/input.ron");
        assert!(matches!(result, Err(AssetError::Read { .. })));
    }

    #[test]
    fn test_demo_script_parses() {
        let script = InputScript::demo().expect("bundled script parses");
        assert!(script.total_frames() > 0);
    }

    #[test]
    fn test_queue_source() {
        let mut queue: VecDeque<RawInput> = vec![RawInput::at(1.0, 2.0)].into();
        assert_eq!(queue.next_frame(), Some(RawInput::at(1.0, 2.0)));
        assert_eq!(queue.next_frame(), None);
    }
}
