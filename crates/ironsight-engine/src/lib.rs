//! # Ironsight Engine
//!
//! Runtime wiring for the Ironsight shooting range:
//! - `config`: TOML engine configuration
//! - `timing`: fixed-rate frame pacing
//! - `script`: input sources, including RON input scripts
//! - `audio` / `renderer`: seams to the sound device and the window
//! - `app`: the game session and its frame driver

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod app;
pub mod audio;
pub mod config;
pub mod renderer;
pub mod script;
pub mod timing;


pub use app::{drive, run, Game, RunSummary, SessionStats, UpdateSignal};
pub use config::EngineConfig;
