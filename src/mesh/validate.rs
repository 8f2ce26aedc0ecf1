// Copyright 2025 Lars Brubaker
// Full consistency check of the mesh adjacency.
//
// Checked, in order:
//   1. every stored handle resolves to a live element, edges have two
//      distinct endpoints;
//   2. every incidence list closes after exactly `len()` steps without
//      repeating, each member is bounded by the owning vertex, and next /
//      previous agree on the side of the shared vertex;
//   3. the incidence lists together hold every edge exactly twice;
//   4. the same closure / symmetry / membership rules for edge loop lists
//      and face loop lists, and every loop is listed exactly once in each;
//   5. along a face cycle, each loop starts where its predecessor's edge
//      ends.

use std::collections::HashSet;

use crate::container::{Element, ElementContainer, Handle};
use crate::error::{ElementKind, TopologyError};

use super::{Edge, EdgeId, Mesh, VertexId};

type Check = std::result::Result<(), TopologyError>;

impl Mesh {
    /// Verifies every adjacency invariant of the mesh.
    pub fn validate(&self) -> Check {
        self.validate_references()?;
        self.validate_vertex_lists()?;
        self.validate_edge_loop_lists()?;
        self.validate_face_loop_lists()
    }

    fn validate_references(&self) -> Check {
        for (index, (_, edge)) in self.edges.iter().enumerate() {
            let dangling = |target| TopologyError::DanglingReference {
                kind: ElementKind::Edge,
                index,
                target,
            };
            let [a, b] = edge.vertices;
            if !self.vertices.contains(a) || !self.vertices.contains(b) {
                return Err(dangling(ElementKind::Vertex));
            }
            if a == b {
                return Err(TopologyError::DegenerateEdge { edge: index });
            }
            let mut links = edge.vertex_next.iter().chain(&edge.vertex_previous);
            if links.any(|&e| !self.edges.contains(e)) {
                return Err(dangling(ElementKind::Edge));
            }
            if edge.loops.front().is_some_and(|l| !self.loops.contains(l)) {
                return Err(dangling(ElementKind::Loop));
            }
        }

        for (index, (_, lp)) in self.loops.iter().enumerate() {
            let dangling = |target| TopologyError::DanglingReference {
                kind: ElementKind::Loop,
                index,
                target,
            };
            if !self.vertices.contains(lp.vertex) {
                return Err(dangling(ElementKind::Vertex));
            }
            if !self.edges.contains(lp.edge) {
                return Err(dangling(ElementKind::Edge));
            }
            if !self.faces.contains(lp.face) {
                return Err(dangling(ElementKind::Face));
            }
            let links = [lp.edge_next, lp.edge_previous, lp.face_next, lp.face_previous];
            if links.iter().any(|&l| !self.loops.contains(l)) {
                return Err(dangling(ElementKind::Loop));
            }
        }

        for (index, (_, face)) in self.faces.iter().enumerate() {
            if face.loops.front().is_some_and(|l| !self.loops.contains(l)) {
                return Err(TopologyError::DanglingReference {
                    kind: ElementKind::Face,
                    index,
                    target: ElementKind::Loop,
                });
            }
        }
        Ok(())
    }

    fn validate_vertex_lists(&self) -> Check {
        let edges = &self.edges;
        let mut listed = 0;

        for (index, (v, vertex)) in self.vertices.iter().enumerate() {
            let list = &vertex.edges;
            if list.vertex() != v {
                return Err(TopologyError::ForeignMember {
                    kind: ElementKind::Vertex,
                    index,
                    member: index,
                });
            }
            walk(edges, ElementKind::Vertex, index, list.front(), list.len(), |e| {
                edge_step(edges, index, v, e)
            })?;
            listed += list.len();
        }

        let expected = 2 * edges.len();
        if listed != expected {
            return Err(TopologyError::IncidenceCount {
                kind: ElementKind::Edge,
                listed,
                expected,
            });
        }
        Ok(())
    }

    fn validate_edge_loop_lists(&self) -> Check {
        let loops = &self.loops;
        let mut listed = 0;

        for (index, (e, edge)) in self.edges.iter().enumerate() {
            let list = &edge.loops;
            walk(loops, ElementKind::Edge, index, list.front(), list.len(), |l| {
                let lp = &loops[l];
                if lp.edge != e {
                    return Err(foreign(loops, ElementKind::Edge, index, l));
                }
                if loops[lp.edge_next].edge_previous != l {
                    return Err(asymmetric(loops, ElementKind::Edge, index, l));
                }
                Ok(lp.edge_next)
            })?;
            listed += list.len();
        }

        if listed != loops.len() {
            return Err(TopologyError::IncidenceCount {
                kind: ElementKind::Loop,
                listed,
                expected: loops.len(),
            });
        }
        Ok(())
    }

    fn validate_face_loop_lists(&self) -> Check {
        let loops = &self.loops;
        let edges = &self.edges;
        let mut listed = 0;

        for (index, (f, face)) in self.faces.iter().enumerate() {
            let list = &face.loops;
            walk(loops, ElementKind::Face, index, list.front(), list.len(), |l| {
                let lp = &loops[l];
                if lp.face != f {
                    return Err(foreign(loops, ElementKind::Face, index, l));
                }
                let next = &loops[lp.face_next];
                if next.face_previous != l {
                    return Err(asymmetric(loops, ElementKind::Face, index, l));
                }
                if edges[lp.edge].opposite(lp.vertex) != Some(next.vertex) {
                    return Err(TopologyError::BrokenFaceCycle {
                        face: index,
                        member: member_index(loops, lp.face_next),
                    });
                }
                Ok(lp.face_next)
            })?;
            listed += list.len();
        }

        if listed != loops.len() {
            return Err(TopologyError::IncidenceCount {
                kind: ElementKind::Loop,
                listed,
                expected: loops.len(),
            });
        }
        Ok(())
    }
}

/// One step along the incidence list of `v`: checks the member and the
/// back link of its successor, both resolved on the side bounded by `v`.
fn edge_step(
    edges: &ElementContainer<Edge>,
    index: usize,
    v: VertexId,
    e: EdgeId,
) -> std::result::Result<EdgeId, TopologyError> {
    let edge = &edges[e];
    let Some(i) = edge.side_of(v) else {
        return Err(foreign(edges, ElementKind::Vertex, index, e));
    };
    let next = edge.vertex_next[i];
    let Some(j) = edges[next].side_of(v) else {
        return Err(foreign(edges, ElementKind::Vertex, index, next));
    };
    if edges[next].vertex_previous[j] != e {
        return Err(asymmetric(edges, ElementKind::Vertex, index, e));
    }
    Ok(next)
}

/// Walks a circular list of `size` members from `head`, failing on a
/// head/size mismatch, a repeated member, or a list that does not return
/// to `head`. `step` validates one member and yields its successor.
fn walk<T: Element>(
    container: &ElementContainer<T>,
    kind: ElementKind,
    index: usize,
    head: Option<Handle<T>>,
    size: usize,
    mut step: impl FnMut(Handle<T>) -> std::result::Result<Handle<T>, TopologyError>,
) -> Check {
    let head = match (head, size) {
        (None, 0) => return Ok(()),
        (Some(head), n) if n > 0 => head,
        (head, size) => {
            return Err(TopologyError::HeadSizeMismatch {
                kind,
                index,
                head: if head.is_some() { "set" } else { "empty" },
                size,
            })
        }
    };

    let mut seen = HashSet::with_capacity(size);
    let mut current = head;
    for _ in 0..size {
        if !container.contains(current) {
            return Err(TopologyError::DanglingReference {
                kind,
                index,
                target: T::KIND,
            });
        }
        if !seen.insert(current) {
            return Err(TopologyError::ListRepeats { kind, index });
        }
        current = step(current)?;
    }

    if current != head {
        return Err(TopologyError::ListNotClosed { kind, index, size });
    }
    Ok(())
}

fn member_index<T: Element>(container: &ElementContainer<T>, h: Handle<T>) -> usize {
    container.index_of(h).unwrap_or(usize::MAX)
}

fn foreign<T: Element>(container: &ElementContainer<T>, kind: ElementKind, index: usize, h: Handle<T>) -> TopologyError {
    TopologyError::ForeignMember {
        kind,
        index,
        member: member_index(container, h),
    }
}

fn asymmetric<T: Element>(container: &ElementContainer<T>, kind: ElementKind, index: usize, h: Handle<T>) -> TopologyError {
    TopologyError::AsymmetricLink {
        kind,
        index,
        member: member_index(container, h),
    }
}
