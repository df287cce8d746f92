//! Motion mechanics: player input, forward motion, turning and patrols.

use serde::{Deserialize, Serialize};

use crate::entities::{Transform, Vec2};

/// Directional input held by the player this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MoveInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl MoveInput {
    pub fn none() -> Self {
        Self::default()
    }

    /// Unnormalized direction; opposing keys cancel out.
    pub fn direction(&self) -> Vec2 {
        let axis = |neg: bool, pos: bool| match (neg, pos) {
            (false, true) => 1.0,
            (true, false) => -1.0,
            _ => 0.0,
        };
        Vec2::new(axis(self.left, self.right), axis(self.down, self.up))
    }

    pub fn is_idle(&self) -> bool {
        self.direction() == Vec2::ZERO
    }
}

/// Facing direction plus speed. Moving "forward" steps along the facing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Motion {
    /// Always unit length.
    front_dir: Vec2,
    pub speed: f32,
}

impl Motion {
    /// Falls back to facing up when `front_dir` is zero.
    pub fn new(front_dir: Vec2, speed: f32) -> Self {
        Self {
            front_dir: front_dir.try_normalize().unwrap_or(Vec2::Y),
            speed,
        }
    }

    pub fn front_dir(&self) -> Vec2 {
        self.front_dir
    }

    pub fn set_front_dir(&mut self, dir: Vec2) {
        if let Some(dir) = dir.try_normalize() {
            self.front_dir = dir;
        }
    }

    /// Move the transform one step along the facing.
    pub fn advance(&self, transform: &mut Transform) {
        transform.translate(self.front_dir * self.speed);
    }

    /// Turn toward `target` by `rate` of the remaining angle (0 = no turn,
    /// 1 = face it immediately). Returns the angle turned, in radians.
    ///
    /// No turn happens when `target` coincides with the transform position or
    /// the actor already faces it.
    pub fn rotate_toward(&mut self, transform: &mut Transform, target: Vec2, rate: f32) -> f32 {
        let Some(dir) = (target - transform.position).try_normalize() else {
            return 0.0;
        };

        let cos_theta = dir.dot(self.front_dir).clamp(-1.0, 1.0);
        if cos_theta > 0.999_999 {
            return 0.0;
        }

        let mut rad = cos_theta.acos();
        if self.front_dir.perp_dot(dir) < 0.0 {
            rad = -rad;
        }
        rad *= rate.clamp(0.0, 1.0);

        self.front_dir = Vec2::from_angle(rad)
            .rotate(self.front_dir)
            .try_normalize()
            .unwrap_or(self.front_dir);
        transform.rotation += rad;
        rad
    }
}

/// Horizontal range a self-moving actor walks back and forth across.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PatrolRange {
    pub min_x: f32,
    pub max_x: f32,
}

impl PatrolRange {
    pub fn new(min_x: f32, max_x: f32) -> Self {
        Self { min_x, max_x }
    }

    pub fn is_valid(&self) -> bool {
        self.min_x < self.max_x
    }
}

/// Looping sprite-sheet frame counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Animation {
    frame: u32,
    frame_count: u32,
    ticks_per_frame: u32,
    tick: u32,
}

impl Animation {
    pub fn new(frame_count: u32, ticks_per_frame: u32) -> Self {
        Self {
            frame: 0,
            frame_count: frame_count.max(1),
            ticks_per_frame: ticks_per_frame.max(1),
            tick: 0,
        }
    }

    pub fn frame(&self) -> u32 {
        self.frame
    }

    pub fn step(&mut self) {
        self.tick += 1;
        if self.tick >= self.ticks_per_frame {
            self.tick = 0;
            self.frame = (self.frame + 1) % self.frame_count;
        }
    }
}
