//! # Game Rules
//!
//! World primitives for the encounter scene: actors, their transforms and
//! bounding boxes, motion mechanics, and the scene configuration.
//! This crate holds no narrative logic; dialog and encounter sequencing live
//! in `narrative_core`.

pub mod entities;
pub mod mechanics;
pub mod world_state;

pub use entities::*;
pub use mechanics::*;
pub use world_state::*;
