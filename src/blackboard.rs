//! Type-keyed value registry for session state.
//!
//! A [`Blackboard`] holds at most one value per Rust type. Game variants
//! stow their session singletons here (score, player state, and the like)
//! so that switching modes can wipe everything with a single
//! [`clear`](Blackboard::clear) instead of chasing individual resources.
//!
//! Note: stored values are plain [`Any`], so the blackboard is used as a
//! non-send resource; use `NonSend<Blackboard>` / `NonSendMut<Blackboard>`
//! in system parameters.

use std::any::{Any, TypeId};

use rustc_hash::FxHashMap;

/// Registry of single values keyed by their type.
///
/// Lookups, inserts, and removals are O(1) on average. The blackboard owns
/// its values exclusively; there is no ordering across different types.
// NonSend resource: insert with insert_non_send_resource and access via NonSend/NonSendMut
pub struct Blackboard {
    entries: FxHashMap<TypeId, Box<dyn Any>>,
}

impl Default for Blackboard {
    fn default() -> Self {
        Self::new()
    }
}

impl Blackboard {
    /// Create an empty blackboard.
    pub fn new() -> Self {
        Self {
            entries: FxHashMap::default(),
        }
    }

    /// Store a value, replacing any previous value of the same type.
    ///
    /// Returns the replaced value, if there was one.
    pub fn insert<T: Any>(&mut self, value: T) -> Option<T> {
        self.entries
            .insert(TypeId::of::<T>(), Box::new(value))
            .and_then(|old| old.downcast::<T>().ok())
            .map(|old| *old)
    }

    /// Get a shared reference to the stored value of type `T`.
    pub fn get<T: Any>(&self) -> Option<&T> {
        self.entries
            .get(&TypeId::of::<T>())
            .and_then(|entry| entry.downcast_ref::<T>())
    }

    /// Get a mutable reference to the stored value of type `T`.
    pub fn get_mut<T: Any>(&mut self) -> Option<&mut T> {
        self.entries
            .get_mut(&TypeId::of::<T>())
            .and_then(|entry| entry.downcast_mut::<T>())
    }

    /// Take the stored value of type `T` out of the blackboard.
    ///
    /// Removing an absent type is a no-op returning `None`.
    pub fn remove<T: Any>(&mut self) -> Option<T> {
        self.entries
            .remove(&TypeId::of::<T>())
            .and_then(|entry| entry.downcast::<T>().ok())
            .map(|entry| *entry)
    }

    /// Whether a value of type `T` is currently stored.
    pub fn contains<T: Any>(&self) -> bool {
        self.entries.contains_key(&TypeId::of::<T>())
    }

    /// Drop every stored value.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of stored values.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
