//! Sprite queue system.
//!
//! Turns every visible entity into a [`DrawCmd`] on the shared
//! [`RenderQueue`], sorted back to front. This is the read side of the
//! asset store: animated sprites resolve their current atlas frame here,
//! still sprites take their whole texture.

use bevy_ecs::prelude::*;
use log::warn;

use crate::components::animation::Animation;
use crate::components::mapposition::MapPosition;
use crate::components::sprite::Sprite;
use crate::components::zindex::ZIndex;
use crate::rect::RectPool;
use crate::resources::assetstore::AssetStore;
use crate::resources::renderqueue::{DrawCmd, RenderQueue};

/// Assemble the tick's draw commands.
///
/// Contract
/// - Reads positions, sprites, and optional animation/z-index state.
/// - Reads the [`AssetStore`] to resolve frames and natural sizes.
/// - Replaces [`RenderQueue::commands`] with the new list, sorted by
///   z-index (stable, so spawn order breaks ties).
/// - An entity whose texture or atlas is missing is logged and skipped;
///   one bad sprite never empties the whole queue.
///
/// # Ordering
///
/// Should run **after** `movement_system` and `animation` so commands
/// reflect this tick's positions and frames.
pub fn sprite_queue(
    query: Query<(&MapPosition, &Sprite, Option<&Animation>, Option<&ZIndex>)>,
    store: NonSend<AssetStore>,
    mut queue: ResMut<RenderQueue>,
    mut scratch: Local<RectPool>,
) {
    let mut to_draw: Vec<DrawCmd> = Vec::new();

    for (position, sprite, maybe_anim, maybe_z) in query.iter() {
        let z = maybe_z.map(|z| z.0).unwrap_or(0);

        // Animated entities draw a frame of their atlas texture; still
        // entities draw their own texture whole.
        let (tex_key, src, natural_w, natural_h) = match maybe_anim {
            Some(anim) => {
                let frame = match store.resolve_frame(&anim.atlas_key, &anim.line, anim.frame) {
                    Ok(frame) => frame,
                    Err(e) => {
                        warn!("skipping animated sprite: {e}");
                        continue;
                    }
                };
                let src = scratch.acquire(frame.x, frame.y, frame.w, frame.h);
                (anim.atlas_key.clone(), Some(src), src.w, src.h)
            }
            None => {
                let (width, height) = match store.texture(&sprite.tex_key) {
                    Ok(texture) => texture.size(),
                    Err(e) => {
                        warn!("skipping sprite: {e}");
                        continue;
                    }
                };
                (sprite.tex_key.clone(), None, width, height)
            }
        };

        // A zero width or height means "natural size"; both dimensions
        // fall back together.
        let (mut width, mut height) = (sprite.width, sprite.height);
        if width == 0 || height == 0 {
            width = natural_w;
            height = natural_h;
        }
        let dest = scratch.acquire(
            position.pos.x as i32,
            position.pos.y as i32,
            width,
            height,
        );

        to_draw.push(DrawCmd {
            tex_key,
            src,
            dest,
            z,
        });
    }

    to_draw.sort_by_key(|cmd| cmd.z);
    queue.commands = to_draw;
}
