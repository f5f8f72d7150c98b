//! ECS components for entities.
//!
//! This module groups all component types that can be attached to entities in
//! the game world. Components define data such as position, velocity, and
//! what to draw for an entity.
//!
//! Submodules overview:
//! - [`animation`] – playback state over one atlas animation line
//! - [`mapposition`] – world-space position (pivot) for an entity
//! - [`rigidbody`] – simple kinematic body storing velocity
//! - [`sprite`] – 2D sprite rendering component
//! - [`zindex`] – rendering order hint for 2D drawing

pub mod animation;
pub mod mapposition;
pub mod rigidbody;
pub mod sprite;
pub mod zindex;
