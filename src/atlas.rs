//! Sprite-sheet atlas descriptors and frame resolution.
//!
//! An [`Atlas`] describes the horizontal animation lines stacked on a
//! sprite sheet, top to bottom in declaration order. Lines are declared
//! with partial geometry (a frame width, a frame count, or both) and
//! [`Atlas::bake`] derives the rest from the sheet dimensions. After
//! baking, [`Atlas::frame_rect`] maps a monotonically increasing frame
//! counter to the source rectangle of the frame to show, either cycling
//! forward or ping-ponging across the line.
//!
//! Baking happens when an atlas is registered in the
//! [`AssetStore`](crate::resources::assetstore::AssetStore). Registered
//! atlases are only handed out behind shared references, so resolved
//! geometry cannot change afterwards.

use log::debug;
use serde::Deserialize;

use crate::error::AtlasError;
use crate::rect::Rect;

/// One horizontal strip of equally sized frames on the sheet.
///
/// Geometry fields left at zero are derived by [`Atlas::bake`]. That makes
/// zero double as "unset": a line explicitly placed at `y_offset` zero is
/// indistinguishable from one that never set it, so it receives the running
/// offset, which only matters for the top line where both agree anyway.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnimationLine {
    name: String,
    frame_width: i32,
    frame_height: i32,
    y_offset: i32,
    frames_count: i32,
    with_reverse: bool,
}

impl AnimationLine {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn frame_width(&self) -> i32 {
        self.frame_width
    }

    pub fn frame_height(&self) -> i32 {
        self.frame_height
    }

    /// Vertical position of the line on the sheet, in pixels.
    pub fn y_offset(&self) -> i32 {
        self.y_offset
    }

    pub fn frames_count(&self) -> i32 {
        self.frames_count
    }

    /// Whether the line plays forward then backward instead of cycling.
    pub fn is_reverse(&self) -> bool {
        self.with_reverse
    }

    pub fn set_frame_width(&mut self, width: i32) -> &mut Self {
        self.frame_width = width;
        self
    }

    pub fn set_frame_height(&mut self, height: i32) -> &mut Self {
        self.frame_height = height;
        self
    }

    pub fn set_y_offset(&mut self, y_offset: i32) -> &mut Self {
        self.y_offset = y_offset;
        self
    }

    /// Set the frame count and whether the line ping-pongs.
    pub fn set_frames_count(&mut self, count: i32, with_reverse: bool) -> &mut Self {
        self.frames_count = count;
        self.with_reverse = with_reverse;
        self
    }

    /// Source rectangle for a frame counter, wrapping around the line.
    ///
    /// Forward lines cycle through their columns. Reverse lines ping-pong,
    /// skipping the duplicated end frames, over a period of
    /// `2 * frames_count - 2`. Any counter value is valid; callers never
    /// need to reduce it themselves, so the returned rectangle always lies
    /// inside the line.
    ///
    /// # Panics
    ///
    /// Panics if the owning atlas has not been baked, since the column
    /// arithmetic needs the resolved frame count.
    pub fn frame_rect(&self, frame: usize) -> Rect {
        let frames_count = self.frames_count as usize;
        let column = if !self.with_reverse {
            frame % frames_count
        } else {
            let period = frames_count * 2 - 2;
            let phase = frame % period;
            if phase >= frames_count {
                frames_count - (phase - frames_count) - 2
            } else {
                phase
            }
        };
        Rect::new(
            column as i32 * self.frame_width,
            self.y_offset,
            self.frame_width,
            self.frame_height,
        )
    }
}

/// Named atlas over one sprite sheet.
///
/// The name doubles as the key of the backing texture in the asset store.
/// Lines stack on the sheet in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Atlas {
    name: String,
    lines: Vec<AnimationLine>,
    baked: bool,
}

impl Atlas {
    /// Create an empty atlas for the texture of the same name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            lines: Vec::new(),
            baked: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// All lines in declaration order.
    pub fn lines(&self) -> &[AnimationLine] {
        &self.lines
    }

    pub fn is_baked(&self) -> bool {
        self.baked
    }

    /// Declare a new animation line and return it for configuration.
    pub fn add_line(&mut self, name: impl Into<String>) -> Result<&mut AnimationLine, AtlasError> {
        let name = name.into();
        if self.lines.iter().any(|al| al.name == name) {
            return Err(AtlasError::DuplicateLine {
                atlas: self.name.clone(),
                line: name,
            });
        }
        let index = self.lines.len();
        self.lines.push(AnimationLine {
            name,
            ..AnimationLine::default()
        });
        Ok(&mut self.lines[index])
    }

    /// Look up a line by name.
    pub fn line(&self, name: impl AsRef<str>) -> Result<&AnimationLine, AtlasError> {
        let name = name.as_ref();
        self.lines
            .iter()
            .find(|al| al.name == name)
            .ok_or_else(|| AtlasError::LineNotFound {
                atlas: self.name.clone(),
                line: name.to_string(),
            })
    }

    /// Mutable lookup, for configuring geometry before the bake.
    pub fn line_mut(&mut self, name: impl AsRef<str>) -> Result<&mut AnimationLine, AtlasError> {
        let name = name.as_ref();
        let atlas = self.name.clone();
        self.lines
            .iter_mut()
            .find(|al| al.name == name)
            .ok_or_else(|| AtlasError::LineNotFound {
                atlas,
                line: name.to_string(),
            })
    }

    /// Derive the missing line geometry from the sheet dimensions.
    ///
    /// Walks the lines in declaration order with a running vertical offset.
    /// Per line: an unset height defaults to an even share of the sheet, an
    /// unset width is derived from the frame count (or the other way
    /// around), and an unset offset takes the accumulator. Divisions are
    /// integer; remainder pixels are never covered.
    ///
    /// Baking runs once. Calling it again on a baked atlas returns without
    /// touching anything. On error the atlas stays unbaked, but lines
    /// resolved before the failing one keep their derived values, so a
    /// failed bake is best effort, not atomic.
    pub fn bake(&mut self, sheet_width: i32, sheet_height: i32) -> Result<(), AtlasError> {
        if self.baked {
            return Ok(());
        }
        if self.lines.is_empty() {
            return Err(AtlasError::EmptyAtlas {
                atlas: self.name.clone(),
            });
        }

        let atlas = self.name.clone();
        let line_height = sheet_height / self.lines.len() as i32;
        let mut y_offset = 0;

        for al in &mut self.lines {
            // Zero doubles as "unset": an explicit zero offset on a lower
            // line gets the accumulator instead.
            if al.y_offset == 0 {
                al.y_offset = y_offset;
            }
            if al.frame_width <= 0 && al.frames_count <= 0 {
                return Err(AtlasError::MissingGeometry {
                    atlas,
                    line: al.name.clone(),
                });
            }
            if al.frame_height <= 0 {
                al.frame_height = line_height;
            }
            if al.frame_width <= 0 {
                al.frame_width = sheet_width / al.frames_count;
            } else if al.frames_count <= 0 {
                al.frames_count = sheet_width / al.frame_width;
            }
            if al.frames_count <= 0 {
                // A frame wider than the sheet divides down to no columns.
                return Err(AtlasError::MissingGeometry {
                    atlas,
                    line: al.name.clone(),
                });
            }
            if al.with_reverse && al.frames_count < 2 {
                return Err(AtlasError::ReverseTooShort {
                    atlas,
                    line: al.name.clone(),
                    frames: al.frames_count,
                });
            }
            y_offset += al.frame_height;
        }

        self.baked = true;
        debug!(
            "baked atlas {:?}: {} line(s) over {}x{}",
            self.name,
            self.lines.len(),
            sheet_width,
            sheet_height
        );
        Ok(())
    }

    /// Resolve the source rectangle for `frame` of the named line.
    ///
    /// # Panics
    ///
    /// Panics if the atlas has not been baked.
    pub fn frame_rect(&self, line: impl AsRef<str>, frame: usize) -> Result<Rect, AtlasError> {
        Ok(self.line(line)?.frame_rect(frame))
    }

    /// Build an unbaked atlas from its JSON manifest.
    ///
    /// Omitted geometry fields stay unset and are derived at bake time,
    /// exactly as if the lines had been declared through
    /// [`add_line`](Atlas::add_line).
    pub fn from_manifest(json: &str) -> Result<Atlas, AtlasError> {
        let manifest: AtlasManifest =
            serde_json::from_str(json).map_err(|e| AtlasError::Manifest(e.to_string()))?;
        let mut atlas = Atlas::new(manifest.name);
        for lm in manifest.lines {
            let line = atlas.add_line(lm.name)?;
            line.set_frame_width(lm.frame_width)
                .set_frame_height(lm.frame_height)
                .set_y_offset(lm.y_offset)
                .set_frames_count(lm.frames_count, lm.with_reverse);
        }
        Ok(atlas)
    }
}

/// Serialized form of an atlas declaration.
#[derive(Debug, Deserialize)]
struct AtlasManifest {
    name: String,
    lines: Vec<LineManifest>,
}

#[derive(Debug, Deserialize)]
struct LineManifest {
    name: String,
    #[serde(default)]
    frame_width: i32,
    #[serde(default)]
    frame_height: i32,
    #[serde(default)]
    y_offset: i32,
    #[serde(default)]
    frames_count: i32,
    #[serde(default)]
    with_reverse: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== BAKE DERIVATION TESTS ====================

    #[test]
    fn bake_splits_sheet_across_lines() {
        let mut atlas = Atlas::new("ships");
        atlas.add_line("walk").unwrap().set_frames_count(8, false);
        atlas.add_line("flash").unwrap().set_frames_count(8, false);
        atlas.bake(256, 64).unwrap();

        let walk = atlas.line("walk").unwrap();
        assert_eq!(walk.frame_width(), 32);
        assert_eq!(walk.frame_height(), 32);
        assert_eq!(walk.y_offset(), 0);
        assert_eq!(walk.frames_count(), 8);

        let flash = atlas.line("flash").unwrap();
        assert_eq!(flash.frame_width(), 32);
        assert_eq!(flash.frame_height(), 32);
        assert_eq!(flash.y_offset(), 32);
    }

    #[test]
    fn bake_derives_count_from_width() {
        let mut atlas = Atlas::new("a");
        atlas.add_line("row").unwrap().set_frame_width(32);
        atlas.bake(256, 32).unwrap();
        assert_eq!(atlas.line("row").unwrap().frames_count(), 8);
    }

    #[test]
    fn bake_derives_width_from_count() {
        let mut atlas = Atlas::new("a");
        atlas.add_line("row").unwrap().set_frames_count(4, false);
        atlas.bake(128, 32).unwrap();
        assert_eq!(atlas.line("row").unwrap().frame_width(), 32);
    }

    #[test]
    fn bake_keeps_explicit_geometry() {
        let mut atlas = Atlas::new("a");
        atlas
            .add_line("row")
            .unwrap()
            .set_frame_width(16)
            .set_frames_count(3, false)
            .set_frame_height(10);
        atlas.bake(256, 64).unwrap();

        let row = atlas.line("row").unwrap();
        assert_eq!(row.frame_width(), 16);
        assert_eq!(row.frames_count(), 3);
        assert_eq!(row.frame_height(), 10);
    }

    #[test]
    fn bake_accumulates_explicit_heights() {
        let mut atlas = Atlas::new("a");
        atlas
            .add_line("short")
            .unwrap()
            .set_frames_count(2, false)
            .set_frame_height(10);
        atlas.add_line("tall").unwrap().set_frames_count(2, false);
        atlas.bake(64, 64).unwrap();

        // The accumulator advances by the resolved height of each line,
        // not by the even split.
        assert_eq!(atlas.line("short").unwrap().y_offset(), 0);
        let tall = atlas.line("tall").unwrap();
        assert_eq!(tall.y_offset(), 10);
        assert_eq!(tall.frame_height(), 32);
    }

    #[test]
    fn bake_treats_zero_offset_as_unset() {
        let mut atlas = Atlas::new("a");
        atlas.add_line("top").unwrap().set_frames_count(2, false);
        // Explicit zero on a lower line is overwritten by the accumulator.
        atlas
            .add_line("bottom")
            .unwrap()
            .set_frames_count(2, false)
            .set_y_offset(0);
        atlas.bake(64, 64).unwrap();
        assert_eq!(atlas.line("bottom").unwrap().y_offset(), 32);
    }

    #[test]
    fn bake_respects_nonzero_offset() {
        let mut atlas = Atlas::new("a");
        atlas
            .add_line("only")
            .unwrap()
            .set_frames_count(2, false)
            .set_y_offset(48);
        atlas.bake(64, 64).unwrap();
        assert_eq!(atlas.line("only").unwrap().y_offset(), 48);
    }

    #[test]
    fn bake_floors_uneven_divisions() {
        let mut atlas = Atlas::new("a");
        atlas.add_line("row").unwrap().set_frames_count(3, false);
        atlas.bake(100, 30).unwrap();
        // 100 / 3 == 33; the remaining pixel column is never covered.
        assert_eq!(atlas.line("row").unwrap().frame_width(), 33);
    }

    #[test]
    fn bake_is_idempotent() {
        let mut atlas = Atlas::new("a");
        atlas.add_line("row").unwrap().set_frames_count(4, false);
        atlas.bake(128, 32).unwrap();
        assert!(atlas.is_baked());
        // A second bake with different dimensions changes nothing.
        atlas.bake(999, 999).unwrap();
        assert_eq!(atlas.line("row").unwrap().frame_width(), 32);
    }

    // ==================== BAKE ERROR TESTS ====================

    #[test]
    fn bake_rejects_empty_atlas() {
        let mut atlas = Atlas::new("empty");
        assert_eq!(
            atlas.bake(64, 64),
            Err(AtlasError::EmptyAtlas {
                atlas: "empty".to_string()
            })
        );
        assert!(!atlas.is_baked());
    }

    #[test]
    fn bake_rejects_line_without_geometry() {
        let mut atlas = Atlas::new("a");
        atlas.add_line("bare").unwrap();
        assert_eq!(
            atlas.bake(64, 64),
            Err(AtlasError::MissingGeometry {
                atlas: "a".to_string(),
                line: "bare".to_string()
            })
        );
    }

    #[test]
    fn bake_error_keeps_earlier_lines_resolved() {
        let mut atlas = Atlas::new("a");
        atlas.add_line("good").unwrap().set_frames_count(4, false);
        atlas.add_line("bad").unwrap();
        assert!(atlas.bake(128, 64).is_err());
        assert!(!atlas.is_baked());
        // Best effort: the first line was already resolved when the bake
        // aborted.
        assert_eq!(atlas.line("good").unwrap().frame_width(), 32);
    }

    #[test]
    fn bake_rejects_frame_wider_than_sheet() {
        let mut atlas = Atlas::new("a");
        atlas.add_line("wide").unwrap().set_frame_width(300);
        assert_eq!(
            atlas.bake(256, 32),
            Err(AtlasError::MissingGeometry {
                atlas: "a".to_string(),
                line: "wide".to_string()
            })
        );
    }

    #[test]
    fn bake_rejects_reverse_with_single_frame() {
        let mut atlas = Atlas::new("a");
        atlas.add_line("blink").unwrap().set_frames_count(1, true);
        assert_eq!(
            atlas.bake(64, 64),
            Err(AtlasError::ReverseTooShort {
                atlas: "a".to_string(),
                line: "blink".to_string(),
                frames: 1
            })
        );
    }

    // ==================== LINE LOOKUP TESTS ====================

    #[test]
    fn add_line_rejects_duplicates() {
        let mut atlas = Atlas::new("a");
        atlas.add_line("row").unwrap();
        assert_eq!(
            atlas.add_line("row").map(|_| ()),
            Err(AtlasError::DuplicateLine {
                atlas: "a".to_string(),
                line: "row".to_string()
            })
        );
        // The atlas itself is unchanged by the rejection.
        assert_eq!(atlas.lines().len(), 1);
    }

    #[test]
    fn line_lookup_reports_missing() {
        let atlas = Atlas::new("a");
        assert_eq!(
            atlas.line("ghost").map(|_| ()),
            Err(AtlasError::LineNotFound {
                atlas: "a".to_string(),
                line: "ghost".to_string()
            })
        );
    }

    // ==================== FRAME RESOLUTION TESTS ====================

    #[test]
    fn forward_line_cycles_columns() {
        let mut atlas = Atlas::new("a");
        atlas.add_line("run").unwrap().set_frames_count(4, false);
        atlas.bake(128, 32).unwrap();

        let xs: Vec<i32> = (0..8)
            .map(|frame| atlas.frame_rect("run", frame).unwrap().x)
            .collect();
        assert_eq!(xs, vec![0, 32, 64, 96, 0, 32, 64, 96]);
    }

    #[test]
    fn reverse_line_ping_pongs() {
        let mut atlas = Atlas::new("a");
        atlas.add_line("sway").unwrap().set_frames_count(4, true);
        atlas.bake(128, 32).unwrap();

        // Period is 2 * 4 - 2 = 6: columns 0 1 2 3 2 1, then again.
        let xs: Vec<i32> = (0..7)
            .map(|frame| atlas.frame_rect("sway", frame).unwrap().x)
            .collect();
        assert_eq!(xs, vec![0, 32, 64, 96, 64, 32, 0]);
    }

    #[test]
    fn reverse_line_with_two_frames_alternates() {
        let mut atlas = Atlas::new("a");
        atlas.add_line("tick").unwrap().set_frames_count(2, true);
        atlas.bake(64, 32).unwrap();

        let xs: Vec<i32> = (0..4)
            .map(|frame| atlas.frame_rect("tick", frame).unwrap().x)
            .collect();
        assert_eq!(xs, vec![0, 32, 0, 32]);
    }

    #[test]
    fn frame_rect_carries_line_geometry() {
        let mut atlas = Atlas::new("a");
        atlas.add_line("top").unwrap().set_frames_count(2, false);
        atlas.add_line("bottom").unwrap().set_frames_count(2, false);
        atlas.bake(64, 64).unwrap();

        let rect = atlas.frame_rect("bottom", 1).unwrap();
        assert_eq!(rect.x, 32);
        assert_eq!(rect.y, 32);
        assert_eq!(rect.w, 32);
        assert_eq!(rect.h, 32);
    }

    // ==================== MANIFEST TESTS ====================

    #[test]
    fn manifest_builds_unbaked_atlas() {
        let json = r#"{
            "name": "ships",
            "lines": [
                { "name": "idle", "frames_count": 8 },
                { "name": "thrust", "frame_width": 32, "with_reverse": true }
            ]
        }"#;
        let mut atlas = Atlas::from_manifest(json).unwrap();
        assert_eq!(atlas.name(), "ships");
        assert_eq!(atlas.lines().len(), 2);
        assert!(!atlas.is_baked());

        atlas.bake(256, 64).unwrap();
        assert_eq!(atlas.line("idle").unwrap().frame_width(), 32);
        let thrust = atlas.line("thrust").unwrap();
        assert!(thrust.is_reverse());
        assert_eq!(thrust.frames_count(), 8);
        assert_eq!(thrust.y_offset(), 32);
    }

    #[test]
    fn manifest_rejects_bad_json() {
        assert!(matches!(
            Atlas::from_manifest("not json"),
            Err(AtlasError::Manifest(_))
        ));
    }

    #[test]
    fn manifest_rejects_duplicate_lines() {
        let json = r#"{
            "name": "a",
            "lines": [
                { "name": "row", "frames_count": 2 },
                { "name": "row", "frames_count": 4 }
            ]
        }"#;
        assert_eq!(
            Atlas::from_manifest(json).map(|_| ()),
            Err(AtlasError::DuplicateLine {
                atlas: "a".to_string(),
                line: "row".to_string()
            })
        );
    }
}
