//! # Ironsight Scene
//!
//! The 3D side of the game that gameplay code talks to through handles:
//! - `SceneGraph`: flat arena of named nodes addressed by `NodeHandle`
//! - `Camera`: perspective projection from world space to screen pixels
//! - `SceneDescription`: RON map files

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod camera;
pub mod description;
pub mod graph;

pub use camera::*;
pub use description::*;
pub use graph::*;
