// Copyright 2025 Lars Brubaker
// Shared test utilities for brep-mesh tests.

#![allow(dead_code)]

use std::collections::HashSet;

use brep_mesh::{EdgeId, FaceId, Mesh, VertexId};

/// Three vertices joined by three edges, no face.
pub fn triangle_wire() -> (Mesh, Vec<VertexId>, Vec<EdgeId>) {
    let mut mesh = Mesh::new();
    let v: Vec<_> = (0..3).map(|_| mesh.add_vertex()).collect();
    let e = (0..3)
        .map(|i| mesh.add_edge(v[i], v[(i + 1) % 3]).unwrap())
        .collect();
    (mesh, v, e)
}

/// A hub vertex joined to `n` rim vertices. Spokes are returned in
/// insertion order.
pub fn fan(n: usize) -> (Mesh, VertexId, Vec<VertexId>, Vec<EdgeId>) {
    let mut mesh = Mesh::new();
    let hub = mesh.add_vertex();
    let mut rim = Vec::with_capacity(n);
    let mut spokes = Vec::with_capacity(n);
    for _ in 0..n {
        let r = mesh.add_vertex();
        spokes.push(mesh.add_edge(hub, r).unwrap());
        rim.push(r);
    }
    (mesh, hub, rim, spokes)
}

/// `n` vertices in a cycle, each joined to the next.
pub fn ring(n: usize) -> (Mesh, Vec<VertexId>) {
    let mut mesh = Mesh::new();
    let v: Vec<_> = (0..n).map(|_| mesh.add_vertex()).collect();
    for i in 0..n {
        mesh.add_edge(v[i], v[(i + 1) % n]).unwrap();
    }
    (mesh, v)
}

/// A `w` x `h` grid of quads over `(w + 1) * (h + 1)` vertices, row-major.
pub fn quad_grid(w: usize, h: usize) -> (Mesh, Vec<VertexId>, Vec<FaceId>) {
    let mut mesh = Mesh::new();
    let v: Vec<_> = (0..(w + 1) * (h + 1)).map(|_| mesh.add_vertex()).collect();
    let at = |x: usize, y: usize| v[y * (w + 1) + x];
    let mut faces = Vec::with_capacity(w * h);
    for y in 0..h {
        for x in 0..w {
            let quad = [at(x, y), at(x + 1, y), at(x + 1, y + 1), at(x, y + 1)];
            faces.push(mesh.add_face(&quad).unwrap());
        }
    }
    (mesh, v, faces)
}

/// Grid of quads, each split into two triangles.
pub fn triangle_grid(w: usize, h: usize) -> (Mesh, Vec<VertexId>, Vec<FaceId>) {
    let mut mesh = Mesh::new();
    let v: Vec<_> = (0..(w + 1) * (h + 1)).map(|_| mesh.add_vertex()).collect();
    let at = |x: usize, y: usize| v[y * (w + 1) + x];
    let mut faces = Vec::with_capacity(2 * w * h);
    for y in 0..h {
        for x in 0..w {
            faces.push(mesh.add_face(&[at(x, y), at(x + 1, y), at(x + 1, y + 1)]).unwrap());
            faces.push(mesh.add_face(&[at(x, y), at(x + 1, y + 1), at(x, y + 1)]).unwrap());
        }
    }
    (mesh, v, faces)
}

/// Edges incident to `v` as a set.
pub fn incident(mesh: &Mesh, v: VertexId) -> HashSet<EdgeId> {
    mesh.vertex_edges(v).unwrap().collect()
}

/// Checks the incidence relation through the public API only: each live
/// edge appears in the list of both endpoints and nowhere else.
pub fn assert_incidence_consistent(mesh: &Mesh) {
    let mut listed = 0;
    for (v, vertex) in mesh.vertices().iter() {
        let edges: Vec<_> = mesh.vertex_edges(v).unwrap().collect();
        assert_eq!(edges.len(), vertex.edge_count(), "valence of {v:?}");
        for e in edges {
            let edge = mesh.edge(e).expect("listed edge must be live");
            assert!(edge.vertices().contains(&v), "{e:?} listed under {v:?}");
            listed += 1;
        }
    }
    assert_eq!(listed, 2 * mesh.edges().len(), "each edge is listed twice");
}

/// Full check: structural validation plus the public-API incidence walk.
pub fn assert_valid(mesh: &Mesh) {
    if let Err(err) = mesh.validate() {
        panic!("mesh failed validation: {err}");
    }
    assert_incidence_consistent(mesh);
}
