//! Input handling for first-person controls.
//!
//! Raw device state arrives once per frame as a [`RawInput`]; the
//! [`InputManager`] turns it into held / just-pressed / just-released edges
//! and folds those through the action bindings into a gameplay [`Input`].

use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Keyboard keys the game reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyCode {
    /// W key
    W,
    /// A key
    A,
    /// S key
    S,
    /// D key
    D,
    /// Q key
    Q,
    /// Escape
    Escape,
    /// Up arrow
    Up,
    /// Down arrow
    Down,
    /// Left arrow
    Left,
    /// Right arrow
    Right,
    /// Space bar
    Space,
}

impl KeyCode {
    /// Every key tracked by the input manager.
    pub const ALL: [Self; 11] = [
        Self::W,
        Self::A,
        Self::S,
        Self::D,
        Self::Q,
        Self::Escape,
        Self::Up,
        Self::Down,
        Self::Left,
        Self::Right,
        Self::Space,
    ];
}

/// Mouse button codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    /// Left mouse button
    Left,
    /// Right mouse button
    Right,
    /// Middle mouse button (scroll wheel click)
    Middle,
}

impl MouseButton {
    /// Every mouse button tracked by the input manager.
    pub const ALL: [Self; 3] = [Self::Left, Self::Right, Self::Middle];
}

/// State of a button (pressed, just pressed, released).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ButtonState {
    /// Whether the button is currently held down
    pub pressed: bool,
    /// Whether the button was just pressed this frame
    pub just_pressed: bool,
    /// Whether the button was just released this frame
    pub just_released: bool,
}

impl ButtonState {
    /// Create a new button state (not pressed).
    #[must_use]
    pub const fn new() -> Self {
        Self {
            pressed: false,
            just_pressed: false,
            just_released: false,
        }
    }

    /// Update the button state based on whether it's currently pressed.
    pub fn update(&mut self, is_pressed: bool) {
        self.just_pressed = is_pressed && !self.pressed;
        self.just_released = !is_pressed && self.pressed;
        self.pressed = is_pressed;
    }

    /// Clear the frame-specific state (just_pressed, just_released).
    pub fn clear_frame(&mut self) {
        self.just_pressed = false;
        self.just_released = false;
    }
}

/// Game actions that can be bound to keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Walk forward (W by default)
    MoveForward,
    /// Walk backward (S by default)
    MoveBack,
    /// Strafe left (A by default)
    StrafeLeft,
    /// Strafe right (D by default)
    StrafeRight,
    /// Toggle fullscreen (Q by default)
    ToggleFullscreen,
    /// Quit the game (Escape by default)
    Quit,
}

/// Raw device state sampled at the start of a frame.
///
/// Only what is held *now* is reported; edges are derived by the manager.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawInput {
    /// Keys currently held
    #[serde(default)]
    pub keys: Vec<KeyCode>,
    /// Mouse buttons currently held
    #[serde(default)]
    pub buttons: Vec<MouseButton>,
    /// Cursor position in screen coordinates
    #[serde(default)]
    pub cursor: (f32, f32),
}

impl RawInput {
    /// Creates an empty sample with the cursor at `cursor`.
    #[must_use]
    pub fn at(x: f32, y: f32) -> Self {
        Self {
            cursor: (x, y),
            ..Self::default()
        }
    }

    /// Adds a held key.
    #[must_use]
    pub fn with_key(mut self, key: KeyCode) -> Self {
        self.keys.push(key);
        self
    }

    /// Adds a held mouse button.
    #[must_use]
    pub fn with_button(mut self, button: MouseButton) -> Self {
        self.buttons.push(button);
        self
    }
}

/// Processed input state for gameplay use.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Input {
    /// Walk axes: `x` strafes right, `y` walks forward (each -1, 0 or 1)
    pub movement: Vec2,
    /// Whether the trigger is held
    pub fire_held: bool,
    /// Rising edge of the trigger; true for exactly one frame per press
    pub fire_just_pressed: bool,
    /// Falling edge of the trigger
    pub fire_just_released: bool,
    /// Quit key is held
    pub quit: bool,
    /// Fullscreen toggle was just pressed
    pub toggle_fullscreen: bool,
    /// Cursor movement since last frame
    pub look_delta: Vec2,
    /// Cursor position in screen coordinates
    pub cursor: Vec2,
}

/// Key binding configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyBinding {
    /// Primary key for this action
    pub primary: KeyCode,
    /// Optional secondary key
    pub secondary: Option<KeyCode>,
}

impl KeyBinding {
    /// Create a new key binding with only a primary key.
    #[must_use]
    pub const fn new(primary: KeyCode) -> Self {
        Self {
            primary,
            secondary: None,
        }
    }

    /// Create a new key binding with primary and secondary keys.
    #[must_use]
    pub const fn with_secondary(primary: KeyCode, secondary: KeyCode) -> Self {
        Self {
            primary,
            secondary: Some(secondary),
        }
    }
}

/// Input manager that handles raw input and converts to game actions.
#[derive(Debug)]
pub struct InputManager {
    /// Current key states
    key_states: HashMap<KeyCode, ButtonState>,
    /// Current mouse button states
    mouse_states: HashMap<MouseButton, ButtonState>,
    /// Action to key bindings
    bindings: HashMap<Action, KeyBinding>,
    /// Current cursor position
    cursor: Vec2,
    /// Cursor position on the previous frame
    prev_cursor: Vec2,
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

impl InputManager {
    /// Create a new input manager with default bindings.
    #[must_use]
    pub fn new() -> Self {
        let mut manager = Self {
            key_states: HashMap::new(),
            mouse_states: HashMap::new(),
            bindings: HashMap::new(),
            cursor: Vec2::ZERO,
            prev_cursor: Vec2::ZERO,
        };
        manager.set_default_bindings();
        manager
    }

    fn set_default_bindings(&mut self) {
        self.bindings.insert(
            Action::MoveForward,
            KeyBinding::with_secondary(KeyCode::W, KeyCode::Up),
        );
        self.bindings.insert(
            Action::MoveBack,
            KeyBinding::with_secondary(KeyCode::S, KeyCode::Down),
        );
        self.bindings.insert(
            Action::StrafeLeft,
            KeyBinding::with_secondary(KeyCode::A, KeyCode::Left),
        );
        self.bindings.insert(
            Action::StrafeRight,
            KeyBinding::with_secondary(KeyCode::D, KeyCode::Right),
        );
        self.bindings
            .insert(Action::ToggleFullscreen, KeyBinding::new(KeyCode::Q));
        self.bindings
            .insert(Action::Quit, KeyBinding::new(KeyCode::Escape));
    }

    /// Update a key state.
    pub fn update_key(&mut self, key: KeyCode, is_pressed: bool) {
        self.key_states.entry(key).or_default().update(is_pressed);
    }

    /// Update a mouse button state.
    pub fn update_mouse_button(&mut self, button: MouseButton, is_pressed: bool) {
        self.mouse_states
            .entry(button)
            .or_default()
            .update(is_pressed);
    }

    /// Update cursor position.
    pub fn update_cursor(&mut self, x: f32, y: f32) {
        self.cursor = Vec2::new(x, y);
    }

    /// Clear frame-specific state. Call at the end of each frame.
    pub fn end_frame(&mut self) {
        for state in self.key_states.values_mut() {
            state.clear_frame();
        }
        for state in self.mouse_states.values_mut() {
            state.clear_frame();
        }
        self.prev_cursor = self.cursor;
    }

    /// Feed one frame of raw device state.
    ///
    /// Every tracked key and button is updated, so anything absent from
    /// `raw` counts as released.
    pub fn apply(&mut self, raw: &RawInput) {
        for key in KeyCode::ALL {
            self.update_key(key, raw.keys.contains(&key));
        }
        for button in MouseButton::ALL {
            self.update_mouse_button(button, raw.buttons.contains(&button));
        }
        self.update_cursor(raw.cursor.0, raw.cursor.1);
    }

    /// Check if a key is currently pressed.
    #[must_use]
    pub fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.key_states.get(&key).is_some_and(|state| state.pressed)
    }

    /// Check if a key was just pressed this frame.
    #[must_use]
    pub fn is_key_just_pressed(&self, key: KeyCode) -> bool {
        self.key_states
            .get(&key)
            .is_some_and(|state| state.just_pressed)
    }

    /// Check if a mouse button is currently pressed.
    #[must_use]
    pub fn is_mouse_pressed(&self, button: MouseButton) -> bool {
        self.mouse_states
            .get(&button)
            .is_some_and(|state| state.pressed)
    }

    /// Check if a mouse button was just pressed this frame.
    #[must_use]
    pub fn is_mouse_just_pressed(&self, button: MouseButton) -> bool {
        self.mouse_states
            .get(&button)
            .is_some_and(|state| state.just_pressed)
    }

    /// Check if a mouse button was just released this frame.
    #[must_use]
    pub fn is_mouse_just_released(&self, button: MouseButton) -> bool {
        self.mouse_states
            .get(&button)
            .is_some_and(|state| state.just_released)
    }

    /// Check if an action is currently active.
    #[must_use]
    pub fn is_action_pressed(&self, action: Action) -> bool {
        self.bindings.get(&action).is_some_and(|binding| {
            self.is_key_pressed(binding.primary)
                || binding
                    .secondary
                    .is_some_and(|key| self.is_key_pressed(key))
        })
    }

    /// Check if an action was just pressed this frame.
    #[must_use]
    pub fn is_action_just_pressed(&self, action: Action) -> bool {
        self.bindings.get(&action).is_some_and(|binding| {
            self.is_key_just_pressed(binding.primary)
                || binding
                    .secondary
                    .is_some_and(|key| self.is_key_just_pressed(key))
        })
    }

    /// Process raw input into game-ready Input struct.
    #[must_use]
    pub fn process(&self) -> Input {
        let mut movement = Vec2::ZERO;

        if self.is_action_pressed(Action::MoveForward) {
            movement.y += 1.0;
        }
        if self.is_action_pressed(Action::MoveBack) {
            movement.y -= 1.0;
        }
        if self.is_action_pressed(Action::StrafeLeft) {
            movement.x -= 1.0;
        }
        if self.is_action_pressed(Action::StrafeRight) {
            movement.x += 1.0;
        }

        Input {
            movement,
            fire_held: self.is_mouse_pressed(MouseButton::Left),
            fire_just_pressed: self.is_mouse_just_pressed(MouseButton::Left),
            fire_just_released: self.is_mouse_just_released(MouseButton::Left),
            quit: self.is_action_pressed(Action::Quit),
            toggle_fullscreen: self.is_action_just_pressed(Action::ToggleFullscreen),
            look_delta: self.cursor - self.prev_cursor,
            cursor: self.cursor,
        }
    }
}
