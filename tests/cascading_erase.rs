// Copyright 2025 Lars Brubaker
// Tests for erase cascades, index relocation and clear.

mod helpers;

use std::collections::HashSet;

use brep_mesh::MeshError;
use helpers::{assert_valid, fan, incident, quad_grid, ring, triangle_grid, triangle_wire};

#[test]
fn erase_edge_updates_both_endpoints() {
    let (mut mesh, v, e) = triangle_wire();
    mesh.erase_edge(e[1]).unwrap();

    assert_eq!(mesh.vertex(v[1]).unwrap().edge_count(), 1);
    assert_eq!(mesh.vertex(v[2]).unwrap().edge_count(), 1);
    assert_eq!(incident(&mesh, v[1]), HashSet::from([e[0]]));
    assert_eq!(incident(&mesh, v[2]), HashSet::from([e[2]]));
    assert_valid(&mesh);
}

#[test]
fn erase_vertex_takes_its_edges() {
    let (mut mesh, v, e) = triangle_wire();
    mesh.erase_vertex(v[1]).unwrap();

    assert_eq!(mesh.vertices().len(), 2);
    assert_eq!(mesh.edges().len(), 1);
    assert!(mesh.edge(e[0]).is_err());
    assert!(mesh.edge(e[1]).is_err());
    assert_eq!(incident(&mesh, v[0]), HashSet::from([e[2]]));
    assert_eq!(incident(&mesh, v[2]), HashSet::from([e[2]]));
    assert_valid(&mesh);
}

#[test]
fn erase_middle_spoke_of_fan() {
    let (mut mesh, hub, _, spokes) = fan(5);
    mesh.erase_edge(spokes[2]).unwrap();

    let list = mesh.vertex(hub).unwrap().edges();
    assert_eq!(list.len(), 4);
    assert_eq!(list.front(), Some(spokes[0]));
    let order: Vec<_> = mesh.vertex_edges(hub).unwrap().collect();
    assert_eq!(order, vec![spokes[0], spokes[1], spokes[3], spokes[4]]);
    let around = mesh.edge(spokes[3]).unwrap().previous_around(hub);
    assert_eq!(around, Some(spokes[1]));
    assert_valid(&mesh);
}

#[test]
fn erase_hub_isolates_rim() {
    let (mut mesh, hub, rim, _) = fan(8);
    mesh.erase_vertex(hub).unwrap();
    assert!(mesh.edges().is_empty());
    assert_eq!(mesh.vertices().len(), 8);
    for &r in &rim {
        assert!(mesh.vertex(r).unwrap().is_isolated());
    }
    assert_valid(&mesh);
}

#[test]
fn clear_connected_graph() {
    // 100 vertices, ring plus chords
    let (mut mesh, v) = ring(100);
    for i in (0..100).step_by(3) {
        mesh.add_edge(v[i], v[(i + 37) % 100]).unwrap();
    }
    assert_valid(&mesh);

    mesh.clear();
    assert_eq!(mesh.vertices().len(), 0);
    assert_eq!(mesh.edges().len(), 0);
    assert_eq!(mesh.loops().len(), 0);
    assert_eq!(mesh.faces().len(), 0);
    assert_valid(&mesh);
}

#[test]
fn clear_twice_is_harmless() {
    let (mut mesh, _, _) = triangle_grid(3, 3);
    mesh.clear();
    mesh.clear();
    assert!(mesh.is_empty());

    let a = mesh.add_vertex();
    let b = mesh.add_vertex();
    mesh.add_edge(a, b).unwrap();
    assert_valid(&mesh);
}

#[test]
fn erase_interior_vertex_of_grid() {
    let (mut mesh, v, faces) = quad_grid(2, 2);
    // centre vertex touches all four quads
    let centre = v[4];
    mesh.erase_vertex(centre).unwrap();

    assert!(mesh.faces().is_empty());
    assert!(mesh.loops().is_empty());
    assert_eq!(mesh.edges().len(), 12 - 4);
    assert!(faces.iter().all(|&f| mesh.face(f).is_err()));
    assert_valid(&mesh);
}

#[test]
fn erase_shared_edge_removes_both_faces() {
    let (mut mesh, v, faces) = quad_grid(2, 1);
    let shared = mesh.find_edge(v[1], v[4]).unwrap();
    assert_eq!(mesh.edge_faces(shared).unwrap().count(), 2);

    mesh.erase_edge(shared).unwrap();
    assert!(faces.iter().all(|&f| mesh.face(f).is_err()));
    assert_eq!(mesh.edges().len(), 6);
    assert!(mesh.edges().iter().all(|(_, edge)| edge.is_wire()));
    assert_valid(&mesh);
}

#[test]
fn erase_face_leaves_neighbors_intact() {
    let (mut mesh, _, faces) = triangle_grid(2, 2);
    mesh.erase_face(faces[3]).unwrap();

    assert_eq!(mesh.faces().len(), faces.len() - 1);
    assert_eq!(mesh.loops().len(), 3 * (faces.len() - 1));
    for &f in faces.iter().filter(|&&f| f != faces[3]) {
        assert_eq!(mesh.face(f).unwrap().loop_count(), 3);
    }
    assert_valid(&mesh);
}

#[test]
fn survivors_keep_identity_after_relocation() {
    let (mut mesh, v) = ring(6);
    let before: Vec<_> = v.iter().map(|&x| incident(&mesh, x)).collect();

    // erasing v0 moves the last vertex into index 0
    mesh.erase_vertex(v[0]).unwrap();
    assert_eq!(mesh.vertices().index_of(v[5]), Some(0));

    for i in 1..6 {
        let expected: HashSet<_> = before[i].difference(&before[0]).copied().collect();
        assert_eq!(incident(&mesh, v[i]), expected);
    }
    assert_valid(&mesh);
}

#[test]
fn erase_with_stale_handle_fails_cleanly() {
    let (mut mesh, v, e) = triangle_wire();
    mesh.erase_edge(e[0]).unwrap();

    assert!(matches!(mesh.erase_edge(e[0]), Err(MeshError::StaleHandle { .. })));
    assert_eq!(mesh.edges().len(), 2);
    assert_eq!(mesh.vertex(v[0]).unwrap().edge_count(), 1);

    mesh.erase_vertex(v[0]).unwrap();
    assert!(matches!(mesh.erase_vertex(v[0]), Err(MeshError::StaleHandle { .. })));
    assert_eq!(mesh.vertices().len(), 2);
    assert_valid(&mesh);
}
