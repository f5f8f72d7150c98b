//! Integer rectangle type and the draw-scratch rectangle pool.
//!
//! [`Rect`] is the pixel-space rectangle used for atlas source frames and
//! draw destinations. [`RectPool`] is a small round-robin ring of scratch
//! rectangles used while assembling per-tick draw commands.

/// Axis-aligned rectangle in pixel coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }
}

/// Round-robin ring of scratch rectangles.
///
/// Each [`acquire`](RectPool::acquire) writes the next slot in the ring and
/// hands the rectangle back by value, so callers keep a copy that stays
/// valid after the slot itself is recycled. The ring holds
/// [`CAPACITY`](RectPool::CAPACITY) slots; the oldest one is overwritten
/// once it wraps.
#[derive(Debug, Clone)]
pub struct RectPool {
    slots: [Rect; Self::CAPACITY],
    cursor: usize,
}

impl Default for RectPool {
    fn default() -> Self {
        Self::new()
    }
}

impl RectPool {
    /// Number of slots in the ring.
    pub const CAPACITY: usize = 8;

    pub fn new() -> Self {
        Self {
            slots: [Rect::default(); Self::CAPACITY],
            cursor: 0,
        }
    }

    /// Write the next slot and return its rectangle.
    pub fn acquire(&mut self, x: i32, y: i32, w: i32, h: i32) -> Rect {
        let rect = Rect::new(x, y, w, h);
        self.slots[self.cursor] = rect;
        self.cursor = (self.cursor + 1) % Self::CAPACITY;
        rect
    }

    /// Slot contents by ring index. Indices wrap around the capacity.
    pub fn slot(&self, index: usize) -> Rect {
        self.slots[index % Self::CAPACITY]
    }

    /// Index of the slot the next [`acquire`](RectPool::acquire) will write.
    pub fn slot_index(&self) -> usize {
        self.cursor
    }
}
