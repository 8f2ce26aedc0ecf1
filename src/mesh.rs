// Copyright 2025 Lars Brubaker
// The B-rep mesh: owner of the vertex, edge, loop and face containers.
//
// Design:
//   - Every element lives in an ElementContainer and is addressed by a
//     generation-checked Handle. All links between elements are handles, so
//     swap-and-pop relocation never leaves a dangling link.
//   - Each edge is threaded into two circular incidence lists, one per
//     endpoint (see vertex.rs). Each loop is threaded into its edge's loop
//     list and its face's boundary cycle.
//   - Erase is two-phase: detach from every list and cascade to dependents
//     first, then physically remove. Vertex -> edges -> faces -> loops.

pub mod edge;
pub mod face;
pub mod loops;
pub mod validate;
pub mod vertex;


use tracing::{debug, trace};

use crate::attribute::AttributeMap;
use crate::container::{next_owner, ElementContainer, Handle};
use crate::error::{MeshError, Result};

pub use edge::{Edge, EdgeLoopList};
pub use face::{Face, FaceLoopList};
pub use loops::{Loop, Loops};
pub use vertex::{Vertex, VertexEdgeList, VertexEdges};

/// Handle of a vertex.
pub type VertexId = Handle<Vertex>;
/// Handle of an edge.
pub type EdgeId = Handle<Edge>;
/// Handle of a loop.
pub type LoopId = Handle<Loop>;
/// Handle of a face.
pub type FaceId = Handle<Face>;

/// Reservation hints for [`Mesh::with_capacity`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MeshCapacity {
    pub vertices: usize,
    pub edges: usize,
    pub loops: usize,
    pub faces: usize,
}

impl MeshCapacity {
    /// Estimate for a closed triangle mesh with `faces` triangles.
    pub fn triangles(vertices: usize, faces: usize) -> Self {
        Self {
            vertices,
            edges: faces * 3 / 2 + 1,
            loops: faces * 3,
            faces,
        }
    }
}

/// Boundary-representation mesh.
///
/// Handles issued by one mesh are rejected by every other mesh with
/// [`MeshError::ForeignHandle`]. A clone keeps the source's owner id, so
/// handles taken before cloning address the same elements in both.
#[derive(Clone, Debug)]
pub struct Mesh {
    pub(crate) vertices: ElementContainer<Vertex>,
    pub(crate) edges: ElementContainer<Edge>,
    pub(crate) loops: ElementContainer<Loop>,
    pub(crate) faces: ElementContainer<Face>,
}

impl Mesh {
    /// Create a new empty mesh.
    pub fn new() -> Self {
        Self::with_capacity(MeshCapacity::default())
    }

    pub fn with_capacity(capacity: MeshCapacity) -> Self {
        let owner = next_owner();
        Self {
            vertices: ElementContainer::with_owner(capacity.vertices, owner),
            edges: ElementContainer::with_owner(capacity.edges, owner),
            loops: ElementContainer::with_owner(capacity.loops, owner),
            faces: ElementContainer::with_owner(capacity.faces, owner),
        }
    }

    /// Owner id stamped into every handle issued by this mesh.
    pub fn owner(&self) -> u32 {
        self.vertices.owner()
    }

    // ──────────────────────────── Containers ─────────────────────────────

    pub fn vertices(&self) -> &ElementContainer<Vertex> {
        &self.vertices
    }

    pub fn edges(&self) -> &ElementContainer<Edge> {
        &self.edges
    }

    pub fn loops(&self) -> &ElementContainer<Loop> {
        &self.loops
    }

    pub fn faces(&self) -> &ElementContainer<Face> {
        &self.faces
    }

    pub fn vertex_attributes_mut(&mut self) -> &mut AttributeMap {
        self.vertices.attributes_mut()
    }

    pub fn edge_attributes_mut(&mut self) -> &mut AttributeMap {
        self.edges.attributes_mut()
    }

    pub fn loop_attributes_mut(&mut self) -> &mut AttributeMap {
        self.loops.attributes_mut()
    }

    pub fn face_attributes_mut(&mut self) -> &mut AttributeMap {
        self.faces.attributes_mut()
    }

    /// True if the mesh holds no element of any kind.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() && self.edges.is_empty() && self.loops.is_empty() && self.faces.is_empty()
    }

    // ──────────────────────────── Element access ─────────────────────────

    pub fn vertex(&self, v: VertexId) -> Result<&Vertex> {
        self.vertices.try_get(v)
    }

    pub fn edge(&self, e: EdgeId) -> Result<&Edge> {
        self.edges.try_get(e)
    }

    pub fn face(&self, f: FaceId) -> Result<&Face> {
        self.faces.try_get(f)
    }

    /// Edges incident to `v`, in circular list order.
    pub fn vertex_edges(&self, v: VertexId) -> Result<VertexEdges<'_>> {
        Ok(self.vertex(v)?.edges.iter(&self.edges))
    }

    /// Vertices sharing an edge with `v`, in incidence order.
    pub fn vertex_neighbors(&self, v: VertexId) -> Result<impl Iterator<Item = VertexId> + '_> {
        let edges = &self.edges;
        Ok(self
            .vertex_edges(v)?
            .filter_map(move |e| edges.get(e).and_then(|edge| edge.opposite(v))))
    }

    /// Loops sharing edge `e`.
    pub fn edge_loops(&self, e: EdgeId) -> Result<Loops<'_>> {
        Ok(self.edge(e)?.loops.iter(&self.loops))
    }

    /// Faces using edge `e`, one per loop.
    pub fn edge_faces(&self, e: EdgeId) -> Result<impl Iterator<Item = FaceId> + '_> {
        let loops = &self.loops;
        Ok(self.edge_loops(e)?.filter_map(move |l| loops.get(l).map(Loop::face)))
    }

    /// Boundary loops of `f`, in face order.
    pub fn face_loops(&self, f: FaceId) -> Result<Loops<'_>> {
        Ok(self.face(f)?.loops.iter(&self.loops))
    }

    /// Corner vertices of `f`, in face order.
    pub fn face_vertices(&self, f: FaceId) -> Result<impl Iterator<Item = VertexId> + '_> {
        let loops = &self.loops;
        Ok(self.face_loops(f)?.filter_map(move |l| loops.get(l).map(Loop::vertex)))
    }

    /// Boundary edges of `f`, in face order.
    pub fn face_edges(&self, f: FaceId) -> Result<impl Iterator<Item = EdgeId> + '_> {
        let loops = &self.loops;
        Ok(self.face_loops(f)?.filter_map(move |l| loops.get(l).map(Loop::edge)))
    }

    /// Finds an edge bounded by `a` and `b`, in either order.
    ///
    /// Walks the shorter of the two incidence lists. Returns `None` if no
    /// such edge exists or either handle is stale.
    pub fn find_edge(&self, a: VertexId, b: VertexId) -> Option<EdgeId> {
        let va = self.vertices.get(a)?;
        let vb = self.vertices.get(b)?;
        let (list, other) = if va.edge_count() <= vb.edge_count() {
            (&va.edges, b)
        } else {
            (&vb.edges, a)
        };
        let owner = list.vertex();
        list.iter(&self.edges)
            .find(|&e| self.edges.get(e).and_then(|edge| edge.opposite(owner)) == Some(other))
    }

    // ──────────────────────────── Construction ───────────────────────────

    /// Adds an isolated vertex.
    pub fn add_vertex(&mut self) -> VertexId {
        self.vertices.emplace_with(Vertex::new)
    }

    /// Adds an edge between two distinct live vertices and appends it to
    /// both incidence lists.
    pub fn add_edge(&mut self, a: VertexId, b: VertexId) -> Result<EdgeId> {
        self.vertices.check(a)?;
        self.vertices.check(b)?;
        if a == b {
            return Err(MeshError::DegenerateEdge);
        }
        Ok(self.link_edge(a, b))
    }

    fn link_edge(&mut self, a: VertexId, b: VertexId) -> EdgeId {
        let e = self.edges.emplace_with(|id| Edge::new(id, a, b));
        self.vertices[a].edges.push_back(&mut self.edges, e);
        self.vertices[b].edges.push_back(&mut self.edges, e);
        e
    }

    /// Adds a face bounded by `vertices`, in order.
    ///
    /// Edges between consecutive vertices are reused when they exist and
    /// created otherwise. Nothing is modified if the input is rejected.
    pub fn add_face(&mut self, vertices: &[VertexId]) -> Result<FaceId> {
        let n = vertices.len();
        if n < 3 {
            return Err(MeshError::TooFewVertices { count: n });
        }
        for (i, &v) in vertices.iter().enumerate() {
            self.vertices.check(v)?;
            if v == vertices[(i + 1) % n] {
                return Err(MeshError::DegenerateEdge);
            }
        }

        let mut boundary: Vec<EdgeId> = Vec::with_capacity(n);
        for i in 0..n {
            let (a, b) = (vertices[i], vertices[(i + 1) % n]);
            let e = match self.find_edge(a, b) {
                Some(e) => e,
                None => self.link_edge(a, b),
            };
            boundary.push(e);
        }

        let face = self.faces.emplace_with(|_| Face::default());
        for (&v, &e) in vertices.iter().zip(&boundary) {
            let l = self.loops.emplace_with(|id| Loop::new(id, v, e, face));
            self.edges[e].loops.push_back(&mut self.loops, l);
            self.faces[face].loops.push_back(&mut self.loops, l);
        }
        Ok(face)
    }

    /// Flips the orientation of a face.
    pub fn reverse_face(&mut self, f: FaceId) -> Result<()> {
        self.faces.check(f)?;
        let Mesh { edges, loops, faces, .. } = self;

        let members: Vec<LoopId> = faces[f].loops.iter(loops).collect();
        for l in members {
            let lp = &mut loops[l];
            if let Some(far) = edges.get(lp.edge).and_then(|edge| edge.opposite(lp.vertex)) {
                lp.vertex = far;
            }
        }
        faces[f].loops.reverse(loops);
        Ok(())
    }

    // ─────────────────────────────── Erase ───────────────────────────────

    /// Erases a vertex and, first, every edge bounded by it (which in turn
    /// erases every face using those edges).
    ///
    /// Invalidates dense indices of vertices, edges, loops and faces.
    pub fn erase_vertex(&mut self, v: VertexId) -> Result<()> {
        self.vertices.check(v)?;
        self.erase_vertex_unchecked(v);
        Ok(())
    }

    fn erase_vertex_unchecked(&mut self, v: VertexId) {
        while let Some(e) = self.vertices[v].edges.back(&self.edges) {
            trace!(vertex = ?v, edge = ?e, "erasing incident edge");
            self.erase_edge_unchecked(e);
        }
        self.vertices.remove(v);
    }

    /// Erases an edge and every face using it, then detaches the edge from
    /// both incidence lists.
    ///
    /// Invalidates dense indices of edges, loops and faces.
    pub fn erase_edge(&mut self, e: EdgeId) -> Result<()> {
        self.edges.check(e)?;
        self.erase_edge_unchecked(e);
        Ok(())
    }

    fn erase_edge_unchecked(&mut self, e: EdgeId) {
        while let Some(l) = self.edges[e].loops.front() {
            let f = self.loops[l].face;
            trace!(edge = ?e, face = ?f, "erasing dependent face");
            self.erase_face_unchecked(f);
        }

        let [a, b] = self.edges[e].vertices;
        self.vertices[a].edges.remove(&mut self.edges, e);
        self.vertices[b].edges.remove(&mut self.edges, e);
        self.edges.remove(e);
    }

    /// Erases a face and its loops. Edges and vertices are kept.
    ///
    /// Invalidates dense indices of loops and faces.
    pub fn erase_face(&mut self, f: FaceId) -> Result<()> {
        self.faces.check(f)?;
        self.erase_face_unchecked(f);
        Ok(())
    }

    fn erase_face_unchecked(&mut self, f: FaceId) {
        while let Some(l) = self.faces[f].loops.front() {
            let e = self.loops[l].edge;
            self.edges[e].loops.remove(&mut self.loops, l);
            self.faces[f].loops.remove(&mut self.loops, l);
            self.loops.remove(l);
        }
        self.faces.remove(f);
    }

    /// Erases all faces (and their loops), back to front.
    pub fn clear_faces(&mut self) {
        let count = self.faces.len();
        while let Some(f) = self.faces.back() {
            self.erase_face_unchecked(f);
        }
        debug!(faces = count, "cleared faces");
    }

    /// Erases all edges and everything depending on them, back to front.
    pub fn clear_edges(&mut self) {
        let count = self.edges.len();
        while let Some(e) = self.edges.back() {
            self.erase_edge_unchecked(e);
        }
        debug!(edges = count, "cleared edges");
    }

    /// Erases every element by erasing the last vertex until none remain;
    /// the cascade takes edges, loops and faces with it.
    pub fn clear(&mut self) {
        let (vertices, edges, faces) = (self.vertices.len(), self.edges.len(), self.faces.len());
        while let Some(v) = self.vertices.back() {
            self.erase_vertex_unchecked(v);
        }
        debug!(vertices, edges, faces, "cleared mesh");
    }
}

impl Default for Mesh {
    fn default() -> Self {
        Self::new()
    }
}

impl std::ops::Index<VertexId> for Mesh {
    type Output = Vertex;

    fn index(&self, v: VertexId) -> &Vertex {
        &self.vertices[v]
    }
}

impl std::ops::Index<EdgeId> for Mesh {
    type Output = Edge;

    fn index(&self, e: EdgeId) -> &Edge {
        &self.edges[e]
    }
}

impl std::ops::Index<LoopId> for Mesh {
    type Output = Loop;

    fn index(&self, l: LoopId) -> &Loop {
        &self.loops[l]
    }
}

impl std::ops::Index<FaceId> for Mesh {
    type Output = Face;

    fn index(&self, f: FaceId) -> &Face {
        &self.faces[f]
    }
}
