//! The three actors of the scene.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{Actor, ActorRole, EntityId, Transform, Vec2};
use crate::mechanics::{Animation, Motion, MoveInput, PatrolRange};
use crate::world_state::{HeroConfig, HostileConfig, PatrolConfig};

/// The player character. Moves by the input the host last provided.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hero {
    pub id: EntityId,
    pub sprite: String,
    transform: Transform,
    /// World units per frame along each held axis.
    pub speed: f32,
    input: MoveInput,
}

impl Hero {
    pub fn new(sprite: impl Into<String>, transform: Transform, speed: f32) -> Self {
        Self {
            id: EntityId::new(),
            sprite: sprite.into(),
            transform,
            speed,
            input: MoveInput::none(),
        }
    }

    pub fn from_config(config: &HeroConfig) -> Self {
        Self::new(
            config.sprite.clone(),
            Transform::new(config.position, config.size),
            config.speed,
        )
    }

    /// Input persists until replaced.
    pub fn set_input(&mut self, input: MoveInput) {
        self.input = input;
    }

    pub fn input(&self) -> MoveInput {
        self.input
    }
}

impl Actor for Hero {
    fn id(&self) -> EntityId {
        self.id
    }

    fn role(&self) -> ActorRole {
        ActorRole::Hero
    }

    fn update(&mut self) {
        let delta = self.input.direction() * self.speed;
        self.transform.translate(delta);
    }

    fn transform(&self) -> &Transform {
        &self.transform
    }

    fn transform_mut(&mut self) -> &mut Transform {
        &mut self.transform
    }
}

/// The friendly "green" character: walks back and forth across its patrol
/// range on its own.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatrolEnemy {
    pub id: EntityId,
    pub sprite: String,
    transform: Transform,
    motion: Motion,
    range: PatrolRange,
}

impl PatrolEnemy {
    pub fn new(sprite: impl Into<String>, transform: Transform, speed: f32, range: PatrolRange) -> Self {
        Self {
            id: EntityId::new(),
            sprite: sprite.into(),
            transform,
            motion: Motion::new(Vec2::new(1.0, 0.0), speed),
            range,
        }
    }

    pub fn from_config(config: &PatrolConfig) -> Self {
        Self::new(
            config.sprite.clone(),
            Transform::new(config.position, config.size),
            config.speed,
            config.range(),
        )
    }

    pub fn heading(&self) -> Vec2 {
        self.motion.front_dir()
    }
}

impl Actor for PatrolEnemy {
    fn id(&self) -> EntityId {
        self.id
    }

    fn role(&self) -> ActorRole {
        ActorRole::Friendly
    }

    fn update(&mut self) {
        self.motion.advance(&mut self.transform);

        let x = self.transform.position.x;
        let heading = self.motion.front_dir().x;
        if (x >= self.range.max_x && heading > 0.0) || (x <= self.range.min_x && heading < 0.0) {
            self.transform.position.x = x.clamp(self.range.min_x, self.range.max_x);
            self.motion.set_front_dir(-self.motion.front_dir());
        }
    }

    fn transform(&self) -> &Transform {
        &self.transform
    }

    fn transform_mut(&mut self) -> &mut Transform {
        &mut self.transform
    }
}

/// The hostile "red" enemy.
///
/// `update` only plays its idle animation. Chasing the hero is a separate
/// operation, [`HostileEnemy::pursuit_step`], so callers pick the behavior
/// they want explicitly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HostileEnemy {
    pub id: EntityId,
    pub sprite: String,
    transform: Transform,
    motion: Motion,
    animation: Animation,
    alive: bool,
}

impl HostileEnemy {
    pub fn new(sprite: impl Into<String>, transform: Transform, motion: Motion, animation: Animation) -> Self {
        Self {
            id: EntityId::new(),
            sprite: sprite.into(),
            transform,
            motion,
            animation,
            alive: true,
        }
    }

    pub fn from_config(config: &HostileConfig) -> Self {
        Self::new(
            config.sprite.clone(),
            Transform::new(config.position, config.size),
            Motion::new(config.front_dir, config.speed),
            Animation::new(config.animation_frames, config.ticks_per_frame),
        )
    }

    /// False once the enemy has been removed from play.
    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// Remove the enemy from play. Idempotent; returns true only on the
    /// call that actually removed it.
    pub fn defeat(&mut self) -> bool {
        if !self.alive {
            return false;
        }
        self.alive = false;
        debug!(enemy = %self.id, "hostile enemy removed from play");
        true
    }

    pub fn heading(&self) -> Vec2 {
        self.motion.front_dir()
    }

    pub fn animation_frame(&self) -> u32 {
        self.animation.frame()
    }

    /// Turn toward `point` by `turn_rate` of the remaining angle.
    pub fn rotate_toward(&mut self, point: Vec2, turn_rate: f32) -> f32 {
        self.motion.rotate_toward(&mut self.transform, point, turn_rate)
    }

    /// Face `target` at `turn_rate`, then take one step forward.
    pub fn pursuit_step(&mut self, target: Vec2, turn_rate: f32) {
        self.rotate_toward(target, turn_rate);
        self.motion.advance(&mut self.transform);
    }
}

impl Actor for HostileEnemy {
    fn id(&self) -> EntityId {
        self.id
    }

    fn role(&self) -> ActorRole {
        ActorRole::Hostile
    }

    fn update(&mut self) {
        self.animation.step();
    }

    fn transform(&self) -> &Transform {
        &self.transform
    }

    fn transform_mut(&mut self) -> &mut Transform {
        &mut self.transform
    }
}
