use bevy_ecs::prelude::Component;

/// Animation playback state over one atlas line.
///
/// `frame` is a free-running counter; the atlas wraps it onto a column when
/// the frame is resolved, so it never needs to be reduced here. Playback
/// direction (cycle or ping-pong) is a property of the line, not of this
/// component.
#[derive(Debug, Clone, Component)]
pub struct Animation {
    pub atlas_key: String,
    pub line: String,
    /// Frames per second; zero or negative freezes playback.
    pub fps: f32,
    pub frame: usize,
    pub elapsed: f32,
}

impl Animation {
    pub fn new(atlas_key: impl Into<String>, line: impl Into<String>, fps: f32) -> Self {
        Self {
            atlas_key: atlas_key.into(),
            line: line.into(),
            fps,
            frame: 0,
            elapsed: 0.0,
        }
    }

    /// Rewind to the first frame.
    pub fn reset(&mut self) {
        self.frame = 0;
        self.elapsed = 0.0;
    }
}
