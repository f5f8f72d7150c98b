//! Kinematic body component.
//!
//! The [`RigidBody`] component stores the velocity the movement system
//! integrates into [`MapPosition`](super::mapposition::MapPosition) each
//! tick. Entities without one simply do not move; immobile props and
//! station ships are spawned without it.

use bevy_ecs::prelude::Component;
use glam::Vec2;

/// Kinematic body storing velocity in world units per second.
#[derive(Component, Clone, Copy, Debug, Default)]
pub struct RigidBody {
    pub velocity: Vec2,
}

impl RigidBody {
    /// Create a RigidBody with zero velocity.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a RigidBody with the given velocity.
    pub fn with_velocity(x: f32, y: f32) -> Self {
        Self {
            velocity: Vec2::new(x, y),
        }
    }
}
