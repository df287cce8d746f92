//! Entity definitions for the scene.

mod actors;
mod components;

pub use actors::*;
pub use components::*;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for every actor in the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityId(pub Uuid);

impl EntityId {
    /// Create a new random entity ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create an entity ID from a specific UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The part an actor plays in the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActorRole {
    /// Player-driven.
    Hero,
    /// The "red" enemy. Inert until first contact, then pursues the hero.
    Hostile,
    /// The "green" character. Patrols on its own.
    Friendly,
}

/// Common surface of everything that lives in the scene.
///
/// Bounding boxes are derived from the transform on every call and are never
/// cached, so a query always reflects the current frame.
pub trait Actor {
    fn id(&self) -> EntityId;

    fn role(&self) -> ActorRole;

    /// Advance one frame.
    fn update(&mut self);

    fn transform(&self) -> &Transform;

    fn transform_mut(&mut self) -> &mut Transform;

    fn position(&self) -> Vec2 {
        self.transform().position
    }

    fn bounding_box(&self) -> BoundingBox {
        BoundingBox::from_transform(self.transform())
    }
}
