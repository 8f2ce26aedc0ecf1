// Copyright 2025 Lars Brubaker
// Vertices and their circular incident-edge lists.
//
// An edge belongs to two incidence lists at once, one per endpoint. Its
// `vertex_next[i]` / `vertex_previous[i]` links thread it into the list of
// `vertices[i]`. Every list operation therefore resolves the side first,
// by comparing the edge's endpoints with the list's owning vertex, and
// does so again for each neighbor it touches.

use crate::container::{Element, ElementContainer};
use crate::error::ElementKind;

use super::edge::Edge;
use super::{EdgeId, VertexId};

/// A point of the mesh. Geometry lives in vertex attributes.
#[derive(Clone, Debug)]
pub struct Vertex {
    pub(crate) edges: VertexEdgeList,
}

impl Vertex {
    pub(crate) fn new(id: VertexId) -> Self {
        Self {
            edges: VertexEdgeList::new(id),
        }
    }

    /// Edges bounded by this vertex.
    pub fn edges(&self) -> &VertexEdgeList {
        &self.edges
    }

    /// Number of incident edges (valence).
    pub fn edge_count(&self) -> usize {
        self.edges.size
    }

    /// True if no edge touches this vertex.
    pub fn is_isolated(&self) -> bool {
        self.edges.size == 0
    }
}

impl Element for Vertex {
    const KIND: ElementKind = ElementKind::Vertex;
}

/// Circular list of the edges bounded by one vertex.
///
/// Invariant: `head` is `None` iff `size == 0`; otherwise following
/// next-on-this-vertex `size` times from `head` returns to `head`.
#[derive(Clone, Debug)]
pub struct VertexEdgeList {
    vertex: VertexId,
    pub(crate) head: Option<EdgeId>,
    pub(crate) size: usize,
}

impl VertexEdgeList {
    fn new(vertex: VertexId) -> Self {
        Self {
            vertex,
            head: None,
            size: 0,
        }
    }

    /// The vertex owning this list.
    pub fn vertex(&self) -> VertexId {
        self.vertex
    }

    /// First edge of the list.
    pub fn front(&self) -> Option<EdgeId> {
        self.head
    }

    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Last edge of the list (the head's predecessor).
    pub fn back(&self, edges: &ElementContainer<Edge>) -> Option<EdgeId> {
        let head = self.head?;
        edges.get(head)?.previous_around(self.vertex)
    }

    /// Walks the list in circular order starting at the head.
    pub fn iter<'a>(&self, edges: &'a ElementContainer<Edge>) -> VertexEdges<'a> {
        VertexEdges {
            edges,
            vertex: self.vertex,
            front: self.head,
            back: self.back(edges),
            remaining: self.size,
        }
    }

    /// Appends `edge` at the back of the list, i.e. right before the head.
    pub(crate) fn push_back(&mut self, edges: &mut ElementContainer<Edge>, edge: EdgeId) {
        let v = self.vertex;
        let i = edges[edge].side(v);

        match self.head {
            None => {
                let e = &mut edges[edge];
                e.vertex_next[i] = edge;
                e.vertex_previous[i] = edge;
                self.head = Some(edge);
            }
            Some(head) => {
                let j = edges[head].side(v);
                let tail = edges[head].vertex_previous[j];
                let k = edges[tail].side(v);

                {
                    let e = &mut edges[edge];
                    e.vertex_next[i] = head;
                    e.vertex_previous[i] = tail;
                }
                edges[tail].vertex_next[k] = edge;
                edges[head].vertex_previous[j] = edge;
            }
        }

        self.size += 1;
    }

    /// Unlinks `edge` from the list. The edge's links on this side are
    /// reset to point at itself.
    pub(crate) fn remove(&mut self, edges: &mut ElementContainer<Edge>, edge: EdgeId) {
        let v = self.vertex;
        let i = edges[edge].side(v);
        let next = edges[edge].vertex_next[i];
        let previous = edges[edge].vertex_previous[i];

        if self.size == 1 {
            self.head = None;
        } else {
            let j = edges[next].side(v);
            edges[next].vertex_previous[j] = previous;
            let k = edges[previous].side(v);
            edges[previous].vertex_next[k] = next;

            if self.head == Some(edge) {
                self.head = Some(next);
            }
        }

        let e = &mut edges[edge];
        e.vertex_next[i] = edge;
        e.vertex_previous[i] = edge;
        self.size -= 1;
    }
}

/// Iterator over the edges of a vertex, in circular list order.
#[derive(Clone)]
pub struct VertexEdges<'a> {
    edges: &'a ElementContainer<Edge>,
    vertex: VertexId,
    front: Option<EdgeId>,
    back: Option<EdgeId>,
    remaining: usize,
}

impl Iterator for VertexEdges<'_> {
    type Item = EdgeId;

    fn next(&mut self) -> Option<EdgeId> {
        if self.remaining == 0 {
            return None;
        }
        let current = self.front?;
        self.front = self.edges.get(current)?.next_around(self.vertex);
        self.remaining -= 1;
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl DoubleEndedIterator for VertexEdges<'_> {
    fn next_back(&mut self) -> Option<EdgeId> {
        if self.remaining == 0 {
            return None;
        }
        let current = self.back?;
        self.back = self.edges.get(current)?.previous_around(self.vertex);
        self.remaining -= 1;
        Some(current)
    }
}

impl ExactSizeIterator for VertexEdges<'_> {}
