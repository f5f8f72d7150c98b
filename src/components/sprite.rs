use bevy_ecs::prelude::Component;

/// Sprite is identified by a texture key and a destination size in pixels.
/// A zero width or height means "use the source size": the texture's own
/// dimensions for a still sprite, the frame dimensions for an animated one.
#[derive(Component, Clone, Debug)]
pub struct Sprite {
    pub tex_key: String,
    pub width: i32,
    pub height: i32,
}

impl Sprite {
    /// Create a sprite drawn at its natural size.
    pub fn new(tex_key: impl Into<String>) -> Self {
        Self {
            tex_key: tex_key.into(),
            width: 0,
            height: 0,
        }
    }

    /// Override the destination size in pixels.
    pub fn with_size(mut self, width: i32, height: i32) -> Self {
        self.width = width;
        self.height = height;
        self
    }
}
