//! Game loop.
//!
//! [`Game`] wires input, the player, the combat tracker, the scene and the
//! HUD together. The driver calls [`Game::update`] then [`Game::draw`] once
//! per simulated frame until the input ends or quit is requested.

use anyhow::{Context, Result};
use ironsight_common::{AssetError, NodeHandle, TargetId};
use ironsight_gameplay::{
    CombatEvent, CombatTracker, FireReport, Hud, HudLayout, InputManager, Player, RawInput,
    Target,
};
use ironsight_scene::{Camera, SceneDescription, SceneGraph, SceneNode};
use tracing::{debug, info, warn};

use crate::audio::{LoggedAudio, ShotAudio, ShotCue};
use crate::config::EngineConfig;
use crate::renderer::{HudRenderer, RecordingRenderer};
use crate::script::{InputScript, InputSource, ScriptedInput};
use crate::timing::FrameTiming;

/// Map bundled with the binary.
const DEFAULT_MAP: &str = include_str!("../assets/map01.ron");

/// What the driver should do after an update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateSignal {
    /// Keep running
    Continue,
    /// Stop the loop
    Quit,
}

/// Running totals gathered from combat events.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    /// Frames simulated
    pub frames: u64,
    /// Trigger pulls
    pub shots: u64,
    /// Target hits
    pub hits: u64,
    /// Targets brought to zero health
    pub kills: u64,
    /// Targets brought back
    pub respawns: u64,
}

impl SessionStats {
    fn record(&mut self, event: &CombatEvent) {
        match event {
            CombatEvent::ShotFired => self.shots += 1,
            CombatEvent::TargetHit { .. } => self.hits += 1,
            CombatEvent::TargetDied { .. } => self.kills += 1,
            CombatEvent::TargetRespawned { .. } => self.respawns += 1,
            CombatEvent::TargetMissed { .. } => {},
        }
    }
}

/// Result of a whole session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Totals for the session
    pub stats: SessionStats,
    /// Whether the session ended on the quit key
    pub quit_requested: bool,
}

/// One game session.
#[derive(Debug)]
pub struct Game<A> {
    scene: SceneGraph,
    camera: Camera,
    tracker: CombatTracker,
    player: Player,
    input: InputManager,
    hud: Hud,
    audio: ShotCue<A>,
    spin: Option<(NodeHandle, f32)>,
    fullscreen: bool,
    fullscreen_changed: bool,
    stats: SessionStats,
}

impl<A: ShotAudio> Game<A> {
    /// Builds the scene, places the targets and positions the camera.
    ///
    /// Target nodes missing from the description are created at their lane
    /// base. A configured spin node must exist.
    pub fn new(
        config: &EngineConfig,
        description: &SceneDescription,
        audio: A,
    ) -> Result<Self, AssetError> {
        let mut scene = description.build()?;

        let spin = match &config.spin_node {
            Some(name) => Some((scene.resolve(name)?, config.spin_speed)),
            None => None,
        };

        let seed = config.seed.unwrap_or_else(|| fastrand::u64(..));
        let mut tracker = CombatTracker::new(config.combat(), seed);
        for spawn in &config.targets {
            let node = match scene.find(&spawn.name) {
                Some(node) => node,
                None => scene.add(SceneNode::new(spawn.name.clone(), spawn.base))?,
            };
            let Some(id) = tracker.add_target(node, config.max_health, spawn.lane()) else {
                warn!(name = %spawn.name, "target limit reached, skipping the rest");
                break;
            };
            debug!(target_id = %id, name = %spawn.name, "target placed");
        }

        let player = Player::new(&config.player());
        let mut camera = Camera::new(config.viewport());
        camera.set_pose(player.position(), player.rotation());

        let layout = HudLayout {
            show_debug_text: config.show_debug_text,
            ..HudLayout::default()
        };

        info!(
            "Scene ready: {} nodes, {} targets, seed {seed}",
            scene.len(),
            tracker.targets().len()
        );
        debug!("\n{}", scene.hierarchy_as_string());

        let mut game = Self {
            scene,
            camera,
            tracker,
            player,
            input: InputManager::new(),
            hud: Hud::new(layout, config.viewport()),
            audio: ShotCue::new(audio, config.shot_volume),
            spin,
            fullscreen: config.fullscreen,
            fullscreen_changed: config.fullscreen,
            stats: SessionStats::default(),
        };
        game.tracker.face_camera(game.player.yaw());
        game.sync_scene();
        Ok(game)
    }

    /// Simulates one frame.
    pub fn update(&mut self, raw: &RawInput, dt: f32) -> UpdateSignal {
        self.input.apply(raw);
        let frame = self.input.process();

        if frame.quit {
            info!("Quit requested");
            return UpdateSignal::Quit;
        }

        if frame.toggle_fullscreen {
            self.fullscreen = !self.fullscreen;
            self.fullscreen_changed = true;
        }

        if let Some((handle, speed)) = self.spin {
            if let Some(node) = self.scene.get_mut(handle) {
                node.rotate_y(speed);
            }
        }

        self.tracker.tick_respawns(dt);
        self.sync_scene();

        let report = self.fire(frame.fire_just_pressed);
        self.hud.update(&frame);
        if report.fired {
            self.audio.shot();
        }
        self.tracker.check_deaths();

        self.player.update(&frame);
        self.camera
            .set_pose(self.player.position(), self.player.rotation());
        self.tracker.face_camera(self.player.yaw());
        self.sync_scene();

        for event in self.tracker.events().drain() {
            debug!(?event, "combat event");
            self.stats.record(&event);
        }
        self.stats.frames += 1;

        self.input.end_frame();
        UpdateSignal::Continue
    }

    /// Hands the frame to the renderer.
    pub fn draw<R: HudRenderer>(&mut self, renderer: &mut R) {
        if self.fullscreen_changed {
            renderer.set_fullscreen(self.fullscreen);
            self.fullscreen_changed = false;
        }

        renderer.begin_frame(&self.scene, &self.camera);
        for command in self
            .hud
            .compose(self.tracker.targets(), self.player.position())
        {
            renderer.draw(&command);
        }
        renderer.end_frame();
    }

    fn fire(&mut self, fire_pressed: bool) -> FireReport {
        let scene = &self.scene;
        let camera = &self.camera;
        let projection = |target: &Target| {
            scene
                .world_position(target.node())
                .and_then(|point| camera.world_to_screen(point))
        };
        self.tracker.process_fire(fire_pressed, &projection)
    }

    fn sync_scene(&mut self) {
        for target in self.tracker.targets() {
            if let Some(node) = self.scene.get_mut(target.node()) {
                node.position = target.position();
                node.rotation = target.rotation();
                node.visible = target.is_visible();
            }
        }
    }

    /// Combat state.
    #[must_use]
    pub const fn tracker(&self) -> &CombatTracker {
        &self.tracker
    }

    /// Looks up a target by its scene node name.
    #[must_use]
    pub fn target_named(&self, name: &str) -> Option<&Target> {
        let node = self.scene.find(name)?;
        self.tracker.targets().iter().find(|t| t.node() == node)
    }

    /// Target identifier for a scene node name.
    #[must_use]
    pub fn target_id(&self, name: &str) -> Option<TargetId> {
        self.target_named(name).map(Target::id)
    }

    /// Scene graph.
    #[must_use]
    pub const fn scene(&self) -> &SceneGraph {
        &self.scene
    }

    /// Camera.
    #[must_use]
    pub const fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Player rig.
    #[must_use]
    pub const fn player(&self) -> &Player {
        &self.player
    }

    /// Shot cue.
    #[must_use]
    pub const fn audio(&self) -> &ShotCue<A> {
        &self.audio
    }

    /// Whether fullscreen is requested.
    #[must_use]
    pub const fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    /// Totals so far.
    #[must_use]
    pub const fn stats(&self) -> SessionStats {
        self.stats
    }
}

/// Loads the configured scene, or the bundled map.
pub fn load_scene(config: &EngineConfig) -> Result<SceneDescription, AssetError> {
    match &config.scene_path {
        Some(path) => SceneDescription::load(path),
        None => SceneDescription::from_ron_str(DEFAULT_MAP),
    }
}

/// Loads the configured input script, or the bundled demo.
pub fn load_script(config: &EngineConfig) -> Result<InputScript, AssetError> {
    match &config.input_script {
        Some(path) => InputScript::load(path),
        None => InputScript::demo(),
    }
}

/// Drives a game until the input ends, quit is requested or the frame cap
/// is reached.
pub fn drive<A, I, R>(
    game: &mut Game<A>,
    source: &mut I,
    renderer: &mut R,
    timing: &mut FrameTiming,
    max_frames: Option<u64>,
) -> RunSummary
where
    A: ShotAudio,
    I: InputSource,
    R: HudRenderer,
{
    let dt = timing.fixed_dt();
    let reached_cap = |frames: u64| max_frames.is_some_and(|cap| frames >= cap);
    timing.reset();

    loop {
        let steps = if timing.is_paced() {
            let elapsed = timing.delta_time();
            timing.accumulate(elapsed)
        } else {
            1
        };

        for _ in 0..steps {
            if reached_cap(game.stats().frames) {
                return RunSummary {
                    stats: game.stats(),
                    quit_requested: false,
                };
            }
            let Some(raw) = source.next_frame() else {
                return RunSummary {
                    stats: game.stats(),
                    quit_requested: false,
                };
            };
            if game.update(&raw, dt) == UpdateSignal::Quit {
                return RunSummary {
                    stats: game.stats(),
                    quit_requested: true,
                };
            }
        }

        if steps > 0 {
            game.draw(renderer);
        }
        timing.sleep_remainder();
    }
}

/// Runs a full session from configuration.
pub fn run(config: &EngineConfig) -> Result<RunSummary> {
    info!("Configuration loaded:");
    info!("  Window: {}x{}", config.window_width, config.window_height);
    info!("  Rate: {} fps (paced: {})", config.target_fps, config.realtime);
    info!("  Targets: {}", config.targets.len());

    let description = load_scene(config).context("loading scene")?;
    let script = load_script(config).context("loading input script")?;
    if script.steps.is_empty() {
        warn!("Input script is empty");
    }

    let mut game = Game::new(config, &description, LoggedAudio::new())
        .context("building scene")?;
    let mut source = ScriptedInput::new(script);
    let mut renderer = RecordingRenderer::new();
    let mut timing = FrameTiming::new(config.target_fps).with_pacing(config.realtime);

    let summary = drive(
        &mut game,
        &mut source,
        &mut renderer,
        &mut timing,
        config.max_frames,
    );

    info!(
        frames = summary.stats.frames,
        presented = renderer.frames(),
        "Session finished"
    );
    Ok(summary)
}
