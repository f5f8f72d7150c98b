//! Spritewell library.
//!
//! This module exposes the sandbox's atlas model, ECS components, resources,
//! systems, and game variants for use in integration tests and as a reusable
//! library.

pub mod atlas;
pub mod backend;
pub mod blackboard;
pub mod components;
pub mod error;
pub mod games;
pub mod rect;
pub mod resources;
pub mod systems;
