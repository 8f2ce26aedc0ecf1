// Copyright 2025 Lars Brubaker
// Index-stable element storage.
//
// Elements live densely in a Vec and are erased by swap-and-pop, so dense
// indices stay in 0..len() but may change when another element is erased.
// Identity is carried by handles instead: a handle names a slot, the slot
// records the element's current dense index plus a generation counter.
// Slots of erased elements go to a free list (same scheme as a bucket
// allocator) and come back with a bumped generation, so a handle kept past
// an erase is detected as stale rather than silently aliasing a new element.
//
// Links between elements are stored as handles, which means relocating an
// element on erase only touches its slot; no other record needs rewriting.
//
// Every handle also carries the owner id of the container that issued it.
// A mesh gives one id to all four of its containers, so a live handle from
// another mesh is rejected instead of addressing an unrelated element.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::ops::{Index, IndexMut};
use std::sync::atomic::{AtomicU32, Ordering};

use crate::attribute::AttributeMap;
use crate::error::{ElementKind, MeshError, Result};

/// Free-slot marker (null index equivalent).
pub const INVALID: u32 = u32::MAX;

/// Issues a fresh owner id. Ids wrap after 2^32 owners.
pub(crate) fn next_owner() -> u32 {
    static NEXT: AtomicU32 = AtomicU32::new(0);
    NEXT.fetch_add(1, Ordering::Relaxed)
}

/// An element type that can be stored in an [`ElementContainer`].
pub trait Element {
    const KIND: ElementKind;
}

/// Generation-checked identity of one element.
///
/// A slot whose generation reaches `u32::MAX` is retired on erase instead
/// of being reused, so a handle never aliases a later element of the same
/// slot.
pub struct Handle<T> {
    owner: u32,
    slot: u32,
    generation: u32,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Handle<T> {
    fn new(owner: u32, slot: u32, generation: u32) -> Self {
        Self {
            owner,
            slot,
            generation,
            _marker: PhantomData,
        }
    }

    /// Id of the container (or mesh) that issued this handle.
    pub fn owner(self) -> u32 {
        self.owner
    }

    pub fn slot(self) -> u32 {
        self.slot
    }

    pub fn generation(self) -> u32 {
        self.generation
    }
}

impl<T> Clone for Handle<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Handle<T> {}

impl<T> PartialEq for Handle<T> {
    fn eq(&self, other: &Self) -> bool {
        self.owner == other.owner && self.slot == other.slot && self.generation == other.generation
    }
}

impl<T> Eq for Handle<T> {}

impl<T> Hash for Handle<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.owner.hash(state);
        self.slot.hash(state);
        self.generation.hash(state);
    }
}

impl<T: Element> fmt::Debug for Handle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}v{}@{}", T::KIND, self.slot, self.generation, self.owner)
    }
}

#[derive(Clone, Copy, Debug)]
struct Slot {
    /// Dense index of the element, or INVALID while the slot is free.
    dense: u32,
    generation: u32,
}

/// Dense, index-stable storage for one kind of element.
#[derive(Clone, Debug)]
pub struct ElementContainer<T> {
    owner: u32,
    elements: Vec<T>,
    /// Slot of the element at each dense index.
    slot_of: Vec<u32>,
    slots: Vec<Slot>,
    free_list: Vec<u32>,
    attributes: AttributeMap,
}

impl<T: Element> ElementContainer<T> {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_owner(capacity, next_owner())
    }

    /// Container whose handles carry `owner`. The containers of one mesh
    /// share an owner id.
    pub(crate) fn with_owner(capacity: usize, owner: u32) -> Self {
        Self {
            owner,
            elements: Vec::with_capacity(capacity),
            slot_of: Vec::with_capacity(capacity),
            slots: Vec::with_capacity(capacity),
            free_list: Vec::new(),
            attributes: AttributeMap::new(),
        }
    }

    pub fn reserve(&mut self, additional: usize) {
        self.elements.reserve(additional);
        self.slot_of.reserve(additional);
        self.slots.reserve(additional.saturating_sub(self.free_list.len()));
    }

    // ──────────────────────────── Queries ────────────────────────────

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Handle of the element at dense index 0.
    pub fn front(&self) -> Option<Handle<T>> {
        self.handle_at(0)
    }

    /// Handle of the element at the last dense index.
    pub fn back(&self) -> Option<Handle<T>> {
        self.len().checked_sub(1).and_then(|i| self.handle_at(i))
    }

    /// Owner id stamped into every handle this container issues.
    pub fn owner(&self) -> u32 {
        self.owner
    }

    /// Current dense index of `handle`, or `None` if it is stale or was
    /// issued by another owner.
    ///
    /// The index of an element may change whenever another element of this
    /// container is erased; do not keep it across erases.
    pub fn index_of(&self, handle: Handle<T>) -> Option<usize> {
        if handle.owner != self.owner {
            return None;
        }
        let slot = self.slots.get(handle.slot as usize)?;
        if slot.generation != handle.generation || slot.dense == INVALID {
            return None;
        }
        Some(slot.dense as usize)
    }

    /// Handle of the element currently at dense index `index`.
    pub fn handle_at(&self, index: usize) -> Option<Handle<T>> {
        let slot = *self.slot_of.get(index)?;
        Some(Handle::new(self.owner, slot, self.slots[slot as usize].generation))
    }

    pub fn contains(&self, handle: Handle<T>) -> bool {
        self.index_of(handle).is_some()
    }

    pub fn get(&self, handle: Handle<T>) -> Option<&T> {
        self.index_of(handle).map(|i| &self.elements[i])
    }

    /// Like [`get`](Self::get), but reports a stale or foreign handle as an
    /// error.
    pub fn try_get(&self, handle: Handle<T>) -> Result<&T> {
        self.get(handle).ok_or_else(|| self.reject(handle))
    }

    /// Checks that `handle` is live, as an error for `?` propagation.
    pub fn check(&self, handle: Handle<T>) -> Result<()> {
        if self.contains(handle) {
            Ok(())
        } else {
            Err(self.reject(handle))
        }
    }

    /// The error for a handle this container cannot resolve.
    fn reject(&self, handle: Handle<T>) -> MeshError {
        if handle.owner != self.owner {
            MeshError::ForeignHandle {
                kind: T::KIND,
                owner: handle.owner,
                expected: self.owner,
            }
        } else {
            MeshError::StaleHandle {
                kind: T::KIND,
                slot: handle.slot,
                generation: handle.generation,
            }
        }
    }

    /// Elements with their handles, in dense order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (Handle<T>, &T)> + ExactSizeIterator + '_ {
        let owner = self.owner;
        self.slot_of
            .iter()
            .zip(self.elements.iter())
            .map(move |(&slot, element)| (Handle::new(owner, slot, self.slots[slot as usize].generation), element))
    }

    /// Handles in dense order.
    pub fn handles(&self) -> impl DoubleEndedIterator<Item = Handle<T>> + ExactSizeIterator + '_ {
        let owner = self.owner;
        self.slot_of
            .iter()
            .map(move |&slot| Handle::new(owner, slot, self.slots[slot as usize].generation))
    }

    pub fn attributes(&self) -> &AttributeMap {
        &self.attributes
    }

    pub fn attributes_mut(&mut self) -> &mut AttributeMap {
        &mut self.attributes
    }

    // ─────────────────────────── Mutation ────────────────────────────

    /// Appends a new element at dense index `len()`.
    ///
    /// The closure receives the element's own handle so that circular links
    /// can start out pointing at the element itself.
    pub(crate) fn emplace_with(&mut self, make: impl FnOnce(Handle<T>) -> T) -> Handle<T> {
        let dense = self.elements.len() as u32;
        let slot = match self.free_list.pop() {
            Some(slot) => {
                self.slots[slot as usize].dense = dense;
                slot
            }
            None => {
                let slot = self.slots.len() as u32;
                self.slots.push(Slot { dense, generation: 0 });
                slot
            }
        };
        let handle = Handle::new(self.owner, slot, self.slots[slot as usize].generation);

        self.elements.push(make(handle));
        self.slot_of.push(slot);
        self.attributes.push_default();
        handle
    }

    /// Physically removes an element by swap-and-pop.
    ///
    /// The last element moves into the freed dense index. Adjacency cleanup
    /// is the caller's job and must happen before this is called.
    pub(crate) fn remove(&mut self, handle: Handle<T>) -> Option<T> {
        let index = self.index_of(handle)?;
        let last = self.elements.len() - 1;

        let element = self.elements.swap_remove(index);
        self.slot_of.swap_remove(index);
        self.attributes.swap_remove(index);
        if index != last {
            let moved = self.slot_of[index];
            self.slots[moved as usize].dense = index as u32;
        }

        let freed = &mut self.slots[handle.slot as usize];
        freed.dense = INVALID;
        // A worn-out slot is retired rather than reused.
        if let Some(next) = freed.generation.checked_add(1) {
            freed.generation = next;
            self.free_list.push(handle.slot);
        }
        Some(element)
    }
}

impl<T: Element> Default for ElementContainer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Element> Index<Handle<T>> for ElementContainer<T> {
    type Output = T;

    /// Panics on a stale or foreign handle.
    fn index(&self, handle: Handle<T>) -> &T {
        match self.get(handle) {
            Some(element) => element,
            None => panic!("{}", self.reject(handle)),
        }
    }
}

impl<T: Element> IndexMut<Handle<T>> for ElementContainer<T> {
    fn index_mut(&mut self, handle: Handle<T>) -> &mut T {
        match self.index_of(handle) {
            Some(i) => &mut self.elements[i],
            None => panic!("{}", self.reject(handle)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, Default, PartialEq)]
    struct Item(u32);

    impl Element for Item {
        const KIND: ElementKind = ElementKind::Vertex;
    }

    fn filled(n: u32) -> (ElementContainer<Item>, Vec<Handle<Item>>) {
        let mut c = ElementContainer::new();
        let handles = (0..n).map(|i| c.emplace_with(|_| Item(i))).collect();
        (c, handles)
    }

    #[test]
    fn emplace_assigns_next_index() {
        let (c, h) = filled(3);
        assert_eq!(c.len(), 3);
        for (i, &handle) in h.iter().enumerate() {
            assert_eq!(c.index_of(handle), Some(i));
            assert_eq!(c.handle_at(i), Some(handle));
        }
        assert_eq!(c.back(), Some(h[2]));
        assert_eq!(c.front(), Some(h[0]));
    }

    #[test]
    fn emplace_with_sees_own_handle() {
        let mut c: ElementContainer<Item> = ElementContainer::new();
        let mut seen = None;
        let h = c.emplace_with(|own| {
            seen = Some(own);
            Item(0)
        });
        assert_eq!(seen, Some(h));
    }

    #[test]
    fn remove_moves_last_into_hole() {
        let (mut c, h) = filled(4);
        assert_eq!(c.remove(h[1]), Some(Item(1)));
        assert_eq!(c.len(), 3);
        assert_eq!(c.index_of(h[3]), Some(1));
        assert_eq!(c[h[3]], Item(3));
        assert_eq!(c[h[0]], Item(0));
        assert_eq!(c[h[2]], Item(2));
    }

    #[test]
    fn remove_last_relocates_nothing() {
        let (mut c, h) = filled(3);
        c.remove(h[2]);
        assert_eq!(c.index_of(h[0]), Some(0));
        assert_eq!(c.index_of(h[1]), Some(1));
    }

    #[test]
    fn removed_handle_is_stale() {
        let (mut c, h) = filled(2);
        c.remove(h[0]);
        assert!(!c.contains(h[0]));
        assert!(c.remove(h[0]).is_none());
        assert!(matches!(
            c.check(h[0]),
            Err(MeshError::StaleHandle { kind: ElementKind::Vertex, .. })
        ));
    }

    #[test]
    fn reused_slot_gets_new_generation() {
        let (mut c, h) = filled(2);
        c.remove(h[0]);
        let fresh = c.emplace_with(|_| Item(9));
        assert_eq!(fresh.slot(), h[0].slot());
        assert_ne!(fresh, h[0]);
        assert!(c.get(h[0]).is_none());
        assert_eq!(c[fresh], Item(9));
    }

    #[test]
    fn attributes_follow_swap_and_pop() {
        let (mut c, h) = filled(3);
        {
            let ids = c.attributes_mut().emplace::<u32>("id").unwrap();
            ids.as_mut_slice().copy_from_slice(&[100, 101, 102]);
        }
        c.remove(h[0]);
        let ids = c.attributes().get::<u32>("id").unwrap();
        assert_eq!(ids[c.index_of(h[2]).unwrap()], 102);
        assert_eq!(ids[c.index_of(h[1]).unwrap()], 101);

        c.emplace_with(|_| Item(3));
        assert_eq!(c.attributes().get::<u32>("id").unwrap().len(), 3);
    }

    #[test]
    fn iter_pairs_handles_with_elements() {
        let (mut c, h) = filled(3);
        c.remove(h[0]);
        for (handle, item) in c.iter() {
            assert_eq!(c.get(handle), Some(item));
        }
        assert_eq!(c.handles().collect::<Vec<_>>(), vec![h[2], h[1]]);
    }

    #[test]
    fn worn_out_slot_is_retired() {
        let (mut c, _) = filled(2);
        c.slots[c.slot_of[0] as usize].generation = u32::MAX;
        let worn = c.handle_at(0).unwrap();
        assert_eq!(worn.generation(), u32::MAX);

        c.remove(worn);
        let fresh = c.emplace_with(|_| Item(7));
        assert_ne!(fresh.slot(), worn.slot());
        assert!(!c.contains(worn));
        assert_eq!(c.check(worn).unwrap_err(), MeshError::StaleHandle {
            kind: ElementKind::Vertex,
            slot: worn.slot(),
            generation: u32::MAX,
        });
    }

    #[test]
    fn handle_from_other_container_is_foreign() {
        let (a, ha) = filled(2);
        let (b, _) = filled(2);
        assert_ne!(a.owner(), b.owner());
        assert_eq!(b.index_of(ha[0]), None);
        assert!(b.get(ha[1]).is_none());
        assert_eq!(
            b.check(ha[0]),
            Err(MeshError::ForeignHandle {
                kind: ElementKind::Vertex,
                owner: a.owner(),
                expected: b.owner(),
            })
        );
    }

    #[test]
    fn clone_keeps_owner() {
        let (a, h) = filled(2);
        let copy = a.clone();
        assert_eq!(copy.owner(), a.owner());
        assert_eq!(copy[h[1]], Item(1));
    }

    #[test]
    #[should_panic(expected = "stale vertex handle")]
    fn index_with_stale_handle_panics() {
        let (mut c, h) = filled(1);
        c.remove(h[0]);
        let _ = &c[h[0]];
    }
}
