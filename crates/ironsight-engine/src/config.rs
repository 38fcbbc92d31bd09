//! Engine configuration.
//!
//! Provides window, pacing, combat, player and target settings. Configuration
//! can be loaded from and saved to a TOML file.

use glam::{Vec2, Vec3};
use ironsight_common::Viewport;
use ironsight_gameplay::{
    CombatConfig, Lane, PlayerConfig, DEFAULT_DAMAGE, DEFAULT_HIT_RADIUS, DEFAULT_LOOK_SENSITIVITY,
    DEFAULT_MAX_HEALTH, DEFAULT_MOVE_SPEED, DEFAULT_RESPAWN_DELAY, DEFAULT_RETICLE, DEFAULT_START,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Configuration file name.
const CONFIG_FILE: &str = "ironsight.toml";

/// Environment variable that overrides the config file location.
pub const CONFIG_ENV_VAR: &str = "IRONSIGHT_CONFIG";

/// One enemy slot and the lane it respawns into.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetSpawn {
    /// Scene node name
    pub name: String,
    /// Lane origin
    pub base: Vec3,
    /// Whole-unit jitter along +x
    pub jitter_x: u32,
    /// Whole-unit jitter along -z
    pub jitter_z: u32,
}

impl TargetSpawn {
    /// Lane described by this entry.
    #[must_use]
    pub fn lane(&self) -> Lane {
        Lane::new(self.base, self.jitter_x, self.jitter_z)
    }
}

fn default_targets() -> Vec<TargetSpawn> {
    vec![
        TargetSpawn {
            name: "en1".into(),
            base: Vec3::new(21.0, 1.0, -9.0),
            jitter_x: 10,
            jitter_z: 3,
        },
        TargetSpawn {
            name: "en2".into(),
            base: Vec3::new(20.0, 1.0, 2.0),
            jitter_x: 10,
            jitter_z: 3,
        },
    ]
}

/// Engine configuration parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    // === Window Settings ===
    /// Logical screen width
    pub window_width: u32,
    /// Logical screen height
    pub window_height: u32,
    /// Start in fullscreen mode
    pub fullscreen: bool,
    /// Simulation rate in frames per second
    pub target_fps: u32,
    /// Pace frames to wall-clock time (off = run as fast as possible)
    pub realtime: bool,
    /// Stop after this many frames (None = until quit or script end)
    pub max_frames: Option<u64>,

    // === Assets ===
    /// Scene description (None = bundled map)
    pub scene_path: Option<PathBuf>,
    /// Input script (None = bundled demo)
    pub input_script: Option<PathBuf>,
    /// Node turned a little every frame (None = no spinner)
    pub spin_node: Option<String>,
    /// Spinner speed in radians per frame
    pub spin_speed: f32,

    // === Combat Settings ===
    /// Reticle point in screen coordinates
    pub reticle: Vec2,
    /// Hit radius around the reticle
    pub hit_radius: f32,
    /// Health removed per hit
    pub damage: u32,
    /// Target health
    pub max_health: u32,
    /// Seconds a dead target stays hidden
    pub respawn_delay: f32,
    /// Spawn jitter seed (None = random)
    pub seed: Option<u64>,

    // === Player Settings ===
    /// Starting position
    pub player_start: Vec3,
    /// Distance walked per frame
    pub move_speed: f32,
    /// Radians per pixel of cursor movement
    pub mouse_sensitivity: f32,

    // === Audio Settings ===
    /// Volume the shot cue plays at once the first shot is fired
    pub shot_volume: f32,

    // === Debug Settings ===
    /// Show camera position readout
    pub show_debug_text: bool,

    // === Targets ===
    /// Enemy slots
    pub targets: Vec<TargetSpawn>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            // Window
            window_width: 796,
            window_height: 448,
            fullscreen: false,
            target_fps: 60,
            realtime: true,
            max_frames: None,

            // Assets
            scene_path: None,
            input_script: None,
            spin_node: Some("Spin".into()),
            spin_speed: 0.03,

            // Combat
            reticle: DEFAULT_RETICLE,
            hit_radius: DEFAULT_HIT_RADIUS,
            damage: DEFAULT_DAMAGE,
            max_health: DEFAULT_MAX_HEALTH,
            respawn_delay: DEFAULT_RESPAWN_DELAY,
            seed: None,

            // Player
            player_start: DEFAULT_START,
            move_speed: DEFAULT_MOVE_SPEED,
            mouse_sensitivity: DEFAULT_LOOK_SENSITIVITY,

            // Audio
            shot_volume: 2.0,

            // Debug
            show_debug_text: true,

            targets: default_targets(),
        }
    }
}

impl EngineConfig {
    /// Load configuration from the default file location.
    /// Returns default config if file doesn't exist.
    pub fn load() -> Self {
        Self::load_from(Self::config_path())
    }

    /// Load configuration from a specific path.
    /// Returns default config if file doesn't exist or is invalid.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();

        if !path.exists() {
            info!("Config file not found, using defaults");
            return Self::default();
        }

        match fs::read_to_string(path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => {
                    info!("Loaded config from {}", path.display());
                    config
                },
                Err(e) => {
                    warn!("Failed to parse config file: {e}");
                    Self::default()
                },
            },
            Err(e) => {
                warn!("Failed to read config file: {e}");
                Self::default()
            },
        }
    }

    /// Save configuration to a specific path.
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> io::Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        fs::write(path, contents)?;

        info!("Saved config to {}", path.display());
        Ok(())
    }

    /// Config file location: `$IRONSIGHT_CONFIG`, else the working directory.
    #[must_use]
    pub fn config_path() -> PathBuf {
        std::env::var_os(CONFIG_ENV_VAR)
            .map_or_else(|| PathBuf::from(CONFIG_FILE), PathBuf::from)
    }

    /// Validate and clamp configuration values to sensible ranges.
    pub fn validate(&mut self) {
        self.window_width = self.window_width.clamp(320, 7680);
        self.window_height = self.window_height.clamp(240, 4320);
        self.target_fps = self.target_fps.clamp(30, 240);

        self.spin_speed = self.spin_speed.clamp(-1.0, 1.0);

        self.hit_radius = self.hit_radius.max(0.0);
        self.max_health = self.max_health.max(1);
        self.respawn_delay = self.respawn_delay.clamp(0.0, 60.0);

        self.move_speed = self.move_speed.clamp(0.0, 10.0);
        self.mouse_sensitivity = self.mouse_sensitivity.clamp(0.0001, 0.1);

        self.shot_volume = self.shot_volume.clamp(0.0, 4.0);

        if self.targets.is_empty() {
            warn!("No targets configured, restoring defaults");
            self.targets = default_targets();
        }
    }

    /// Logical screen size.
    #[must_use]
    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.window_width, self.window_height)
    }

    /// Combat tracker tuning.
    #[must_use]
    pub fn combat(&self) -> CombatConfig {
        CombatConfig {
            reticle: self.reticle,
            hit_radius: self.hit_radius,
            damage: self.damage,
            respawn_delay: self.respawn_delay,
            viewport: self.viewport(),
        }
    }

    /// Player controller tuning.
    #[must_use]
    pub fn player(&self) -> PlayerConfig {
        PlayerConfig {
            start: self.player_start,
            move_speed: self.move_speed,
            look_sensitivity: self.mouse_sensitivity,
        }
    }
}
