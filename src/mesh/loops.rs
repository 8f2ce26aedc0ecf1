// Copyright 2025 Lars Brubaker
// Loops: one use of an edge by a face.
//
// A loop sits in two circular lists: the loops sharing its edge
// (edge_next / edge_previous) and the boundary cycle of its face
// (face_next / face_previous). The face cycle is ordered so that the
// successor of a loop starts at the far endpoint of the loop's edge.

use crate::container::{Element, ElementContainer};
use crate::error::ElementKind;

use super::{EdgeId, FaceId, LoopId, VertexId};

#[derive(Clone, Debug)]
pub struct Loop {
    pub(crate) vertex: VertexId,
    pub(crate) edge: EdgeId,
    pub(crate) face: FaceId,
    pub(crate) edge_next: LoopId,
    pub(crate) edge_previous: LoopId,
    pub(crate) face_next: LoopId,
    pub(crate) face_previous: LoopId,
}

impl Loop {
    pub(crate) fn new(id: LoopId, vertex: VertexId, edge: EdgeId, face: FaceId) -> Self {
        Self {
            vertex,
            edge,
            face,
            edge_next: id,
            edge_previous: id,
            face_next: id,
            face_previous: id,
        }
    }

    /// Vertex at which this loop starts, in face order.
    pub fn vertex(&self) -> VertexId {
        self.vertex
    }

    pub fn edge(&self) -> EdgeId {
        self.edge
    }

    pub fn face(&self) -> FaceId {
        self.face
    }

    pub fn edge_next(&self) -> LoopId {
        self.edge_next
    }

    pub fn edge_previous(&self) -> LoopId {
        self.edge_previous
    }

    pub fn face_next(&self) -> LoopId {
        self.face_next
    }

    pub fn face_previous(&self) -> LoopId {
        self.face_previous
    }
}

impl Element for Loop {
    const KIND: ElementKind = ElementKind::Loop;
}

/// Which of the two loop lists an iterator follows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Ring {
    Edge,
    Face,
}

impl Ring {
    fn next(self, l: &Loop) -> LoopId {
        match self {
            Ring::Edge => l.edge_next,
            Ring::Face => l.face_next,
        }
    }

    fn previous(self, l: &Loop) -> LoopId {
        match self {
            Ring::Edge => l.edge_previous,
            Ring::Face => l.face_previous,
        }
    }
}

/// Iterator over an edge's or a face's loops, in circular list order.
#[derive(Clone)]
pub struct Loops<'a> {
    loops: &'a ElementContainer<Loop>,
    ring: Ring,
    front: Option<LoopId>,
    back: Option<LoopId>,
    remaining: usize,
}

impl<'a> Loops<'a> {
    pub(crate) fn new(
        loops: &'a ElementContainer<Loop>,
        ring: Ring,
        front: Option<LoopId>,
        back: Option<LoopId>,
        remaining: usize,
    ) -> Self {
        Self {
            loops,
            ring,
            front,
            back,
            remaining,
        }
    }
}

impl Iterator for Loops<'_> {
    type Item = LoopId;

    fn next(&mut self) -> Option<LoopId> {
        if self.remaining == 0 {
            return None;
        }
        let current = self.front?;
        self.front = Some(self.ring.next(self.loops.get(current)?));
        self.remaining -= 1;
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl DoubleEndedIterator for Loops<'_> {
    fn next_back(&mut self) -> Option<LoopId> {
        if self.remaining == 0 {
            return None;
        }
        let current = self.back?;
        self.back = Some(self.ring.previous(self.loops.get(current)?));
        self.remaining -= 1;
        Some(current)
    }
}

impl ExactSizeIterator for Loops<'_> {}
