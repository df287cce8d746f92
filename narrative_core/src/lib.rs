//! # Narrative Core
//!
//! The encounter logic of the scene. This crate sits on top of `game_rules`,
//! decides which dialog a collision triggers, gates who updates each frame,
//! and carries the permanent consequences of finishing a narrative branch.
//!
//! ## Core Components
//!
//! - **encounter**: Encounter state machine and the per-frame controller
//! - **dialog**: Dialog scripts and their playback
//! - **scene**: Config, scripts and controller wired into one playable scene
//! - **events**: What happened during a frame
//!
//! ## Frame Contract
//!
//! - **update**: The only place state changes, once per frame
//! - **draw**: Reads state only and hands draw calls to a [`Renderer`]

pub mod assets;
pub mod dialog;
pub mod encounter;
pub mod events;
pub mod render;
pub mod scene;

pub use assets::*;
pub use dialog::*;
pub use encounter::*;
pub use events::*;
pub use render::*;
pub use scene::*;
