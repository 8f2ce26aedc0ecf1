// brep-mesh: boundary-representation mesh kernel
// Copyright 2025 Lars Brubaker

pub mod attribute;
pub mod container;
pub mod error;
pub mod mesh;

pub use attribute::{Attribute, AttributeMap};
pub use container::{Element, ElementContainer, Handle};
pub use error::{ElementKind, MeshError, Result, TopologyError};
pub use mesh::{
    Edge, EdgeId, Face, FaceId, Loop, LoopId, Mesh, MeshCapacity, Vertex, VertexEdges, VertexId,
};
