//! Geometry components shared by all actors.

use serde::{Deserialize, Serialize};

pub use glam::Vec2;

/// Position, size and rotation of an actor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    /// Center of the actor.
    pub position: Vec2,
    pub size: Vec2,
    /// Rotation in radians, counter-clockwise.
    pub rotation: f32,
}

impl Transform {
    pub fn new(position: Vec2, size: Vec2) -> Self {
        Self {
            position,
            size,
            rotation: 0.0,
        }
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.position += delta;
    }
}

/// Axis-aligned bounding box. Rotation is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min: Vec2,
    pub max: Vec2,
}

impl BoundingBox {
    pub fn new(center: Vec2, size: Vec2) -> Self {
        let half = size * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    pub fn from_transform(transform: &Transform) -> Self {
        Self::new(transform.position, transform.size)
    }

    /// Strict overlap test: boxes that only share an edge do not intersect.
    ///
    /// A zero-size box lying inside another box still intersects it, so size
    /// is not a usable "removed" marker.
    pub fn intersects(&self, other: &BoundingBox) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }
}
