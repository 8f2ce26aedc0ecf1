// Copyright 2025 Lars Brubaker
// Faces and their boundary loop lists.

use crate::container::{Element, ElementContainer};
use crate::error::ElementKind;

use super::loops::{Loop, Loops, Ring};
use super::LoopId;

/// Portion of a surface bounded by a cycle of loops.
#[derive(Clone, Debug, Default)]
pub struct Face {
    pub(crate) loops: FaceLoopList,
}

impl Face {
    /// Boundary loops of this face, in face order.
    pub fn loops(&self) -> &FaceLoopList {
        &self.loops
    }

    /// Number of boundary loops (equal to the number of corners).
    pub fn loop_count(&self) -> usize {
        self.loops.size
    }
}

impl Element for Face {
    const KIND: ElementKind = ElementKind::Face;
}

/// Circular list of the loops bounding one face.
#[derive(Clone, Debug, Default)]
pub struct FaceLoopList {
    head: Option<LoopId>,
    size: usize,
}

impl FaceLoopList {
    pub fn front(&self) -> Option<LoopId> {
        self.head
    }

    pub fn back(&self, loops: &ElementContainer<Loop>) -> Option<LoopId> {
        Some(loops.get(self.head?)?.face_previous)
    }

    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    pub fn iter<'a>(&self, loops: &'a ElementContainer<Loop>) -> Loops<'a> {
        Loops::new(loops, Ring::Face, self.head, self.back(loops), self.size)
    }

    pub(crate) fn push_back(&mut self, loops: &mut ElementContainer<Loop>, l: LoopId) {
        match self.head {
            None => {
                loops[l].face_next = l;
                loops[l].face_previous = l;
                self.head = Some(l);
                self.size += 1;
            }
            Some(head) => self.insert(loops, head, l),
        }
    }

    /// Inserts `l` immediately before `next`.
    pub(crate) fn insert(&mut self, loops: &mut ElementContainer<Loop>, next: LoopId, l: LoopId) {
        let previous = loops[next].face_previous;
        loops[l].face_next = next;
        loops[l].face_previous = previous;
        loops[previous].face_next = l;
        loops[next].face_previous = l;
        self.size += 1;
    }

    pub(crate) fn remove(&mut self, loops: &mut ElementContainer<Loop>, l: LoopId) {
        let next = loops[l].face_next;
        let previous = loops[l].face_previous;

        if self.size == 1 {
            self.head = None;
        } else {
            loops[next].face_previous = previous;
            loops[previous].face_next = next;
            if self.head == Some(l) {
                self.head = Some(next);
            }
        }

        loops[l].face_next = l;
        loops[l].face_previous = l;
        self.size -= 1;
    }

    /// Reverses traversal order by swapping every loop's links. The head
    /// stays the same loop.
    pub(crate) fn reverse(&mut self, loops: &mut ElementContainer<Loop>) {
        let Some(head) = self.head else {
            return;
        };
        let mut l = head;
        for _ in 0..self.size {
            let lp = &mut loops[l];
            std::mem::swap(&mut lp.face_next, &mut lp.face_previous);
            // The old next is now the previous.
            l = lp.face_previous;
        }
    }
}
