// Copyright 2025 Lars Brubaker
// Edges and their loop lists.

use crate::container::{Element, ElementContainer};
use crate::error::ElementKind;

use super::loops::{Loop, Loops, Ring};
use super::{EdgeId, LoopId, VertexId};

/// Curve segment bounded by two distinct vertices.
///
/// `vertex_next[i]` / `vertex_previous[i]` thread the edge into the
/// incidence list of `vertices[i]`.
#[derive(Clone, Debug)]
pub struct Edge {
    pub(crate) vertices: [VertexId; 2],
    pub(crate) vertex_next: [EdgeId; 2],
    pub(crate) vertex_previous: [EdgeId; 2],
    pub(crate) loops: EdgeLoopList,
}

impl Edge {
    /// A detached edge whose incidence links point at itself.
    pub(crate) fn new(id: EdgeId, a: VertexId, b: VertexId) -> Self {
        Self {
            vertices: [a, b],
            vertex_next: [id; 2],
            vertex_previous: [id; 2],
            loops: EdgeLoopList::default(),
        }
    }

    /// The two bounding vertices, in creation order.
    pub fn vertices(&self) -> [VertexId; 2] {
        self.vertices
    }

    /// Which side (0 or 1) of this edge is bounded by `v`.
    pub fn side_of(&self, v: VertexId) -> Option<usize> {
        if self.vertices[1] == v {
            Some(1)
        } else if self.vertices[0] == v {
            Some(0)
        } else {
            None
        }
    }

    /// Side of `v`, assuming `v` bounds this edge.
    #[inline]
    pub(crate) fn side(&self, v: VertexId) -> usize {
        debug_assert!(self.vertices.contains(&v), "vertex does not bound edge");
        (self.vertices[1] == v) as usize
    }

    /// The endpoint opposite `v`.
    pub fn opposite(&self, v: VertexId) -> Option<VertexId> {
        self.side_of(v).map(|i| self.vertices[i ^ 1])
    }

    /// Next edge in the incidence list of `v`.
    pub fn next_around(&self, v: VertexId) -> Option<EdgeId> {
        self.side_of(v).map(|i| self.vertex_next[i])
    }

    /// Previous edge in the incidence list of `v`.
    pub fn previous_around(&self, v: VertexId) -> Option<EdgeId> {
        self.side_of(v).map(|i| self.vertex_previous[i])
    }

    pub fn connects(&self, a: VertexId, b: VertexId) -> bool {
        (self.vertices[0] == a && self.vertices[1] == b) || (self.vertices[0] == b && self.vertices[1] == a)
    }

    /// Loops (face uses) of this edge.
    pub fn loops(&self) -> &EdgeLoopList {
        &self.loops
    }

    /// True if no face uses this edge.
    pub fn is_wire(&self) -> bool {
        self.loops.size == 0
    }

    /// True if exactly one face uses this edge.
    pub fn is_boundary(&self) -> bool {
        self.loops.size == 1
    }
}

impl Element for Edge {
    const KIND: ElementKind = ElementKind::Edge;
}

/// Circular list of the loops that share one edge.
#[derive(Clone, Debug, Default)]
pub struct EdgeLoopList {
    head: Option<LoopId>,
    size: usize,
}

impl EdgeLoopList {
    pub fn front(&self) -> Option<LoopId> {
        self.head
    }

    pub fn back(&self, loops: &ElementContainer<Loop>) -> Option<LoopId> {
        Some(loops.get(self.head?)?.edge_previous)
    }

    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    pub fn iter<'a>(&self, loops: &'a ElementContainer<Loop>) -> Loops<'a> {
        Loops::new(loops, Ring::Edge, self.head, self.back(loops), self.size)
    }

    pub(crate) fn push_back(&mut self, loops: &mut ElementContainer<Loop>, l: LoopId) {
        match self.head {
            None => {
                loops[l].edge_next = l;
                loops[l].edge_previous = l;
                self.head = Some(l);
            }
            Some(head) => {
                let tail = loops[head].edge_previous;
                loops[l].edge_next = head;
                loops[l].edge_previous = tail;
                loops[tail].edge_next = l;
                loops[head].edge_previous = l;
            }
        }
        self.size += 1;
    }

    pub(crate) fn remove(&mut self, loops: &mut ElementContainer<Loop>, l: LoopId) {
        let next = loops[l].edge_next;
        let previous = loops[l].edge_previous;

        if self.size == 1 {
            self.head = None;
        } else {
            loops[next].edge_previous = previous;
            loops[previous].edge_next = next;
            if self.head == Some(l) {
                self.head = Some(next);
            }
        }

        loops[l].edge_next = l;
        loops[l].edge_previous = l;
        self.size -= 1;
    }
}
