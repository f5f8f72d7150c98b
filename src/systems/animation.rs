//! Animation system.
//!
//! Advances the [`Animation`](crate::components::animation::Animation)
//! components based on elapsed time. The component only accumulates a
//! free-running frame counter; mapping it onto an atlas column happens when
//! the sprite queue resolves the frame, so this system needs no access to
//! the asset store.

use bevy_ecs::prelude::*;

use crate::components::animation::Animation;
use crate::resources::worldtime::WorldTime;

/// Advance animation playback.
///
/// Contract
/// - Reads [`WorldTime`] for the scaled delta.
/// - Mutates [`Animation`] component state only.
/// - Catches up: a large delta advances the counter by several frames.
/// - Skips components whose `fps` is zero or negative (frozen playback).
pub fn animation(mut query: Query<&mut Animation>, time: Res<WorldTime>) {
    for mut anim in query.iter_mut() {
        if anim.fps <= 0.0 {
            continue;
        }
        anim.elapsed += time.delta;

        let frame_duration = 1.0 / anim.fps;
        while anim.elapsed >= frame_duration {
            anim.frame += 1;
            anim.elapsed -= frame_duration;
        }
    }
}
