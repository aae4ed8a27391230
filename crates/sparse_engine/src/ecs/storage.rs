//! Sparse-set component storage
//!
//! Every component type lives in its own [`SparseSet`]: a sparse index keyed
//! by entity id that points into two parallel dense arrays (owning entity and
//! component value). This gives O(1) attach, lookup and detach plus tightly
//! packed iteration over "all entities holding T".
//!
//! The sparse index is pluggable. [`FlatIndex`] is a plain `Vec<u32>` indexed
//! directly by entity id; [`PagedIndex`] splits it into fixed-size pages that
//! are only allocated when an id inside them is touched, which bounds memory
//! when ids are scattered across a large range. Both expose the same
//! contract through [`SparseSet`].
//!
//! `get`/`get_mut`/`remove` require the entity to hold the component. This is
//! checked with `debug_assert!` only; in release builds an out-of-contract call
//! either panics on the dense-array bounds check or returns the component of
//! whichever entity currently occupies the slot.

use super::Entity;
use std::mem;

/// Sentinel stored in the sparse index for entities without the component
pub const ABSENT: u32 = u32::MAX;

/// Maps entity ids to dense-array slots
pub trait SparseIndex: Default {
    /// Dense slot for `id`, or [`ABSENT`]
    fn slot(&self, id: u32) -> u32;

    /// Point `id` at `slot`, growing the index if needed
    fn set(&mut self, id: u32, slot: u32);

    /// Pre-size the index so ids below `entity_count` never trigger growth
    fn reserve(&mut self, entity_count: usize);

    /// Forget every mapping
    fn clear(&mut self);
}

/// Sparse index backed by a single vector indexed by entity id
#[derive(Debug, Default, Clone)]
pub struct FlatIndex {
    slots: Vec<u32>,
}

impl SparseIndex for FlatIndex {
    fn slot(&self, id: u32) -> u32 {
        self.slots.get(id as usize).copied().unwrap_or(ABSENT)
    }

    fn set(&mut self, id: u32, slot: u32) {
        let id = id as usize;
        if id >= self.slots.len() {
            self.slots.resize(id + 1, ABSENT);
        }
        self.slots[id] = slot;
    }

    fn reserve(&mut self, entity_count: usize) {
        if entity_count > self.slots.len() {
            self.slots.resize(entity_count, ABSENT);
        }
    }

    fn clear(&mut self) {
        self.slots.clear();
    }
}

/// Number of ids covered by one page of a [`PagedIndex`]
pub const PAGE_SIZE: usize = 1024;

/// Sparse index split into lazily allocated pages
#[derive(Debug, Default, Clone)]
pub struct PagedIndex {
    pages: Vec<Option<Box<[u32; PAGE_SIZE]>>>,
}

impl PagedIndex {
    /// Number of pages that have backing memory
    pub fn allocated_pages(&self) -> usize {
        self.pages.iter().filter(|page| page.is_some()).count()
    }

    const fn split(id: u32) -> (usize, usize) {
        let id = id as usize;
        (id / PAGE_SIZE, id % PAGE_SIZE)
    }
}

impl SparseIndex for PagedIndex {
    fn slot(&self, id: u32) -> u32 {
        let (page, offset) = Self::split(id);
        self.pages
            .get(page)
            .and_then(Option::as_ref)
            .map_or(ABSENT, |page| page[offset])
    }

    fn set(&mut self, id: u32, slot: u32) {
        let (page, offset) = Self::split(id);
        if page >= self.pages.len() {
            self.pages.resize_with(page + 1, || None);
        }
        let page = self.pages[page].get_or_insert_with(|| Box::new([ABSENT; PAGE_SIZE]));
        page[offset] = slot;
    }

    fn reserve(&mut self, entity_count: usize) {
        // Only the page table is sized up front; pages stay lazy.
        let pages = entity_count.div_ceil(PAGE_SIZE);
        if pages > self.pages.len() {
            self.pages.resize_with(pages, || None);
        }
    }

    fn clear(&mut self) {
        self.pages.clear();
    }
}

/// Sparse set storing one component type
///
/// `entities()[i]` owns `components()[i]`; both arrays are compacted by
/// swap-with-last on removal, so iteration order is insertion order until the
/// first removal and unspecified afterwards.
#[derive(Debug, Clone)]
pub struct SparseSet<T, I: SparseIndex = FlatIndex> {
    index: I,
    entities: Vec<Entity>,
    components: Vec<T>,
}

/// Sparse set with a paged sparse index
pub type PagedSparseSet<T> = SparseSet<T, PagedIndex>;

impl<T, I: SparseIndex> Default for SparseSet<T, I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, I: SparseIndex> SparseSet<T, I> {
    /// Create an empty set
    pub fn new() -> Self {
        Self {
            index: I::default(),
            entities: Vec::new(),
            components: Vec::new(),
        }
    }

    /// Create a set pre-sized for `entity_count` entities
    pub fn with_capacity(entity_count: usize) -> Self {
        let mut set = Self::new();
        set.reserve(entity_count);
        set
    }

    /// Reserve room for `entity_count` entities in both the sparse index and
    /// the dense arrays
    pub fn reserve(&mut self, entity_count: usize) {
        self.index.reserve(entity_count);
        let additional = entity_count.saturating_sub(self.entities.len());
        self.entities.reserve(additional);
        self.components.reserve(additional);
    }

    /// Whether `entity` currently holds this component. Never panics.
    pub fn has(&self, entity: Entity) -> bool {
        let slot = self.index.slot(entity.id());
        slot != ABSENT
            && self
                .entities
                .get(slot as usize)
                .is_some_and(|&owner| owner == entity)
    }

    /// Attach `value` to `entity`.
    ///
    /// If the entity already holds the component it is overwritten in place
    /// (its dense slot and iteration position are kept) and the previous
    /// value is returned.
    pub fn add(&mut self, entity: Entity, value: T) -> Option<T> {
        if self.has(entity) {
            let slot = self.index.slot(entity.id()) as usize;
            return Some(mem::replace(&mut self.components[slot], value));
        }

        let slot = dense_slot(self.components.len());
        self.components.push(value);
        self.entities.push(entity);
        self.index.set(entity.id(), slot);
        None
    }

    /// Component of `entity`. The entity must hold the component.
    pub fn get(&self, entity: Entity) -> &T {
        debug_assert!(self.has(entity), "entity {entity} has no such component");
        &self.components[self.index.slot(entity.id()) as usize]
    }

    /// Mutable component of `entity`. The entity must hold the component.
    pub fn get_mut(&mut self, entity: Entity) -> &mut T {
        debug_assert!(self.has(entity), "entity {entity} has no such component");
        let slot = self.index.slot(entity.id()) as usize;
        &mut self.components[slot]
    }

    /// Checked lookup for callers that do not know whether the component exists
    pub fn try_get(&self, entity: Entity) -> Option<&T> {
        self.has(entity).then(|| self.get(entity))
    }

    /// Checked mutable lookup
    pub fn try_get_mut(&mut self, entity: Entity) -> Option<&mut T> {
        if self.has(entity) {
            Some(self.get_mut(entity))
        } else {
            None
        }
    }

    /// Detach the component from `entity` and return it.
    ///
    /// The last dense element moves into the vacated slot. The entity must
    /// hold the component.
    pub fn remove(&mut self, entity: Entity) -> T {
        debug_assert!(self.has(entity), "entity {entity} has no such component");
        let slot = self.index.slot(entity.id()) as usize;

        let removed = self.components.swap_remove(slot);
        self.entities.swap_remove(slot);
        if let Some(&moved) = self.entities.get(slot) {
            self.index.set(moved.id(), dense_slot(slot));
        }
        self.index.set(entity.id(), ABSENT);
        removed
    }

    /// Entities holding this component, in dense order
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    /// Component values, parallel to [`entities`](Self::entities)
    pub fn components(&self) -> &[T] {
        &self.components
    }

    /// Iterate `(entity, component)` pairs in dense order
    pub fn iter(&self) -> impl Iterator<Item = (Entity, &T)> {
        self.entities.iter().copied().zip(self.components.iter())
    }

    /// Iterate `(entity, &mut component)` pairs in dense order
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Entity, &mut T)> {
        self.entities.iter().copied().zip(self.components.iter_mut())
    }

    /// Number of entities holding this component
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Whether no entity holds this component
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Detach every component
    pub fn clear(&mut self) {
        self.index.clear();
        self.entities.clear();
        self.components.clear();
    }

    /// Borrow the sparse index
    pub fn sparse_index(&self) -> &I {
        &self.index
    }
}

#[allow(clippy::cast_possible_truncation)]
fn dense_slot(position: usize) -> u32 {
    debug_assert!(position < ABSENT as usize, "component store overflow");
    position as u32
}
