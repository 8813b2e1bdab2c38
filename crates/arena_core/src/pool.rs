//! Bounded reuse pool for frequently spawned actors
//!
//! The pool owns every instance it has handed out. Callers hold
//! [`Handle`]s, never references, so a despawned actor cannot be touched
//! through a handle issued before its release.
//!
//! Released instances are kept for reuse up to `capacity`; anything released
//! beyond that is dropped. Construction itself is unbounded.

use crate::error::{CoreError, Result};
use crate::handle::Handle;

/// A value that can live in an [`EntityPool`]
pub trait Poolable {
    /// Description used to build or rebuild an instance (e.g. an enemy type)
    type Spec: ?Sized;

    /// Construct a fresh instance
    fn create(spec: &Self::Spec) -> Self;

    /// Restore a retained instance to the base state described by `spec`
    fn reset(&mut self, spec: &Self::Spec);

    /// Called when the instance leaves the active set (hide it, stop it)
    fn deactivate(&mut self) {}
}

/// Counters describing pool behavior over its lifetime
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PoolStats {
    /// Instances built from scratch
    pub constructed: u64,
    /// Acquisitions served from the retained set
    pub reused: u64,
    /// Releases accepted
    pub released: u64,
    /// Released instances dropped because the retained set was full
    pub discarded: u64,
}

enum SlotState<T> {
    Active(T),
    Retained(T),
    Vacant,
}

struct Slot<T> {
    generation: u32,
    state: SlotState<T>,
}

/// Generational pool of reusable instances
pub struct EntityPool<T: Poolable> {
    slots: Vec<Slot<T>>,
    /// Slots holding a released instance, most recently released last
    retained: Vec<u32>,
    /// Slots with nothing in them
    vacant: Vec<u32>,
    capacity: usize,
    active_count: usize,
    stats: PoolStats,
}

impl<T: Poolable> EntityPool<T> {
    /// Create a pool that retains at most `capacity` released instances
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: Vec::new(),
            retained: Vec::with_capacity(capacity),
            vacant: Vec::new(),
            capacity,
            active_count: 0,
            stats: PoolStats::default(),
        }
    }

    /// Hand out an active instance built or reset from `spec`
    pub fn acquire(&mut self, spec: &T::Spec) -> Handle<T> {
        let index = if let Some(index) = self.retained.pop() {
            let slot = &mut self.slots[index as usize];
            let state = std::mem::replace(&mut slot.state, SlotState::Vacant);
            let mut value = match state {
                SlotState::Retained(value) => value,
                // Retained list and slot states are updated together
                _ => unreachable!("retained slot {} holds no instance", index),
            };
            value.reset(spec);
            slot.state = SlotState::Active(value);
            self.stats.reused += 1;
            index
        } else {
            let value = T::create(spec);
            self.stats.constructed += 1;
            match self.vacant.pop() {
                Some(index) => {
                    self.slots[index as usize].state = SlotState::Active(value);
                    index
                }
                None => {
                    self.slots.push(Slot {
                        generation: 0,
                        state: SlotState::Active(value),
                    });
                    (self.slots.len() - 1) as u32
                }
            }
        };

        self.active_count += 1;
        Handle::new(index, self.slots[index as usize].generation)
    }

    /// Return an active instance to the pool.
    ///
    /// The slot's generation advances, so `handle` (and every copy of it)
    /// stops resolving immediately.
    pub fn release(&mut self, handle: Handle<T>) -> Result<()> {
        self.validate(handle)?;

        let index = handle.index();
        let keep = self.retained.len() < self.capacity;
        let slot = &mut self.slots[index as usize];
        let state = std::mem::replace(&mut slot.state, SlotState::Vacant);
        slot.generation = slot.generation.wrapping_add(1);

        if let SlotState::Active(mut value) = state {
            value.deactivate();
            if keep {
                slot.state = SlotState::Retained(value);
                self.retained.push(index);
            } else {
                self.vacant.push(index);
                self.stats.discarded += 1;
            }
        }

        self.active_count -= 1;
        self.stats.released += 1;
        Ok(())
    }

    /// Check that a handle names a live, active instance
    pub fn validate(&self, handle: Handle<T>) -> Result<()> {
        if handle.is_null() {
            return Err(CoreError::NullHandle);
        }
        let slot = self
            .slots
            .get(handle.index() as usize)
            .ok_or(CoreError::OutOfBounds(handle.index()))?;
        if slot.generation != handle.generation() || !matches!(slot.state, SlotState::Active(_)) {
            return Err(CoreError::StaleHandle {
                index: handle.index(),
                held: handle.generation(),
                current: slot.generation,
            });
        }
        Ok(())
    }

    /// Check if a handle still names an active instance
    pub fn is_active(&self, handle: Handle<T>) -> bool {
        self.validate(handle).is_ok()
    }

    /// Get an active instance
    pub fn get(&self, handle: Handle<T>) -> Option<&T> {
        let slot = self.slots.get(handle.index() as usize)?;
        match &slot.state {
            SlotState::Active(value) if slot.generation == handle.generation() => Some(value),
            _ => None,
        }
    }

    /// Get an active instance mutably
    pub fn get_mut(&mut self, handle: Handle<T>) -> Option<&mut T> {
        let slot = self.slots.get_mut(handle.index() as usize)?;
        match &mut slot.state {
            SlotState::Active(value) if slot.generation == handle.generation() => Some(value),
            _ => None,
        }
    }

    /// Snapshot of the active handles, safe to hold while acquiring or releasing
    pub fn active_handles(&self) -> Vec<Handle<T>> {
        self.iter_active().map(|(handle, _)| handle).collect()
    }

    /// Iterate over active instances
    pub fn iter_active(&self) -> impl Iterator<Item = (Handle<T>, &T)> {
        self.slots.iter().enumerate().filter_map(|(i, slot)| match &slot.state {
            SlotState::Active(value) => Some((Handle::new(i as u32, slot.generation), value)),
            _ => None,
        })
    }

    /// Iterate over active instances mutably
    pub fn iter_active_mut(&mut self) -> impl Iterator<Item = (Handle<T>, &mut T)> {
        self.slots.iter_mut().enumerate().filter_map(|(i, slot)| {
            let generation = slot.generation;
            match &mut slot.state {
                SlotState::Active(value) => Some((Handle::new(i as u32, generation), value)),
                _ => None,
            }
        })
    }

    /// Drop retained instances until at most `keep` remain, oldest first
    pub fn trim_retained(&mut self, keep: usize) -> usize {
        let excess = self.retained.len().saturating_sub(keep);
        for index in self.retained.drain(..excess) {
            self.slots[index as usize].state = SlotState::Vacant;
            self.vacant.push(index);
        }
        if excess > 0 {
            log::debug!("Trimmed {} retained instances, {} kept", excess, self.retained.len());
        }
        excess
    }

    /// Release every active instance and drop everything retained
    pub fn clear(&mut self) {
        for slot in &mut self.slots {
            if matches!(slot.state, SlotState::Active(_)) {
                slot.generation = slot.generation.wrapping_add(1);
            }
            slot.state = SlotState::Vacant;
        }
        self.retained.clear();
        self.vacant = (0..self.slots.len() as u32).rev().collect();
        self.active_count = 0;
    }

    /// Number of active instances
    pub fn active_count(&self) -> usize {
        self.active_count
    }

    /// Number of released instances waiting for reuse
    pub fn retained_count(&self) -> usize {
        self.retained.len()
    }

    /// Maximum number of retained instances
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Lifetime counters
    pub fn stats(&self) -> PoolStats {
        self.stats
    }
}
