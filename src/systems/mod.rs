//! Engine systems.
//!
//! This module groups all ECS systems that advance simulation and prepare
//! rendering.
//!
//! Submodules overview
//! - [`animation`] – advance sprite animation frame counters
//! - [`movement`] – integrate positions from rigid body velocities and time
//! - [`spritequeue`] – resolve frames and assemble sorted draw commands
//! - [`time`] – update simulation time and delta

pub mod animation;
pub mod movement;
pub mod spritequeue;
pub mod time;
