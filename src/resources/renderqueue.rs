//! Render queue resource.
//!
//! Holds the draw commands assembled for the current tick, sorted back to
//! front. A renderer drains the queue after the schedule runs; headless
//! runs just inspect it.

use bevy_ecs::prelude::Resource;

use crate::rect::Rect;

/// One textured quad to draw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawCmd {
    /// Key of the texture to sample.
    pub tex_key: String,
    /// Source rectangle on the texture, or `None` for the whole texture.
    pub src: Option<Rect>,
    /// Destination rectangle in screen pixels.
    pub dest: Rect,
    /// Draw order; higher values draw later (on top).
    pub z: i32,
}

/// Draw commands for the current tick, in draw order.
#[derive(Resource, Debug, Clone, Default)]
pub struct RenderQueue {
    pub commands: Vec<DrawCmd>,
}

impl RenderQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}
