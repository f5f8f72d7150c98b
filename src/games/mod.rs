//! Game variants built on the sprite sandbox.
//!
//! Each variant is self-contained: its resources, components, events,
//! observers, and systems live in one module, with a `setup` entry point
//! that prepares a `World` for the variant. The engine layer
//! (`components`, `systems`, `resources`) stays variant-agnostic.
//!
//! Submodules overview
//! - [`shooter`] – drifting fleet with periodic spawn-gun waves
//! - [`snake`] – grid snake with apples and game-over events

pub mod shooter;
pub mod snake;
