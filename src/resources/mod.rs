//! ECS resources made available to systems.
//!
//! This module groups the long-lived data injected into the ECS world and
//! accessed by systems during execution: timing, configuration, asset
//! storage, and the per-tick draw output. Each submodule documents the
//! semantics and intended usage of its resource(s).
//!
//! Overview
//! - `assetstore` – loaded textures and baked atlases keyed by string IDs
//! - `renderqueue` – draw commands assembled for the current tick
//! - `sandboxconfig` – field dimensions and simulation pacing from an INI file
//! - `worldtime` – simulation time and delta
pub mod assetstore;
pub mod renderqueue;
pub mod sandboxconfig;
pub mod worldtime;
