// Copyright 2025 Lars Brubaker
// Error types for the B-rep kernel.
//
// `MeshError` covers precondition violations of public operations (stale
// handles, degenerate input, attribute misuse). `TopologyError` is produced
// only by `Mesh::validate` and describes a broken adjacency invariant.

use std::fmt;

use thiserror::Error;

/// Result type alias using [`MeshError`].
pub type Result<T> = std::result::Result<T, MeshError>;

/// The four kinds of topological element stored by a mesh.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Vertex,
    Edge,
    Loop,
    Face,
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ElementKind::Vertex => "vertex",
            ElementKind::Edge => "edge",
            ElementKind::Loop => "loop",
            ElementKind::Face => "face",
        };
        f.write_str(name)
    }
}

/// Errors returned by mesh operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MeshError {
    /// The handle does not name a live element of this container: it was
    /// erased, or it never belonged here.
    #[error("stale {kind} handle (slot {slot}, generation {generation})")]
    StaleHandle {
        /// Kind of element the handle refers to.
        kind: ElementKind,
        /// Slot number carried by the handle.
        slot: u32,
        /// Generation carried by the handle.
        generation: u32,
    },

    /// The handle was issued by another mesh (or container).
    #[error("{kind} handle belongs to owner {owner}, not {expected}")]
    ForeignHandle {
        /// Kind of element the handle refers to.
        kind: ElementKind,
        /// Owner id carried by the handle.
        owner: u32,
        /// Owner id of the container it was used with.
        expected: u32,
    },

    /// Both endpoints of an edge are the same vertex.
    #[error("edge endpoints must be distinct vertices")]
    DegenerateEdge,

    /// A face was requested with fewer than three vertices.
    #[error("face requires at least 3 vertices, got {count}")]
    TooFewVertices {
        /// Number of vertices supplied.
        count: usize,
    },

    /// An attribute with this name already exists.
    #[error("attribute `{name}` already exists")]
    AttributeExists {
        /// Attribute name.
        name: String,
    },

    /// No attribute with this name exists.
    #[error("attribute `{name}` not found")]
    AttributeNotFound {
        /// Attribute name.
        name: String,
    },

    /// The attribute exists but stores a different value type.
    #[error("attribute `{name}` does not store values of type {expected}")]
    AttributeTypeMismatch {
        /// Attribute name.
        name: String,
        /// Requested value type.
        expected: &'static str,
    },
}

impl MeshError {
    pub(crate) fn attribute_type_mismatch<T>(name: &str) -> Self {
        MeshError::AttributeTypeMismatch {
            name: name.to_owned(),
            expected: std::any::type_name::<T>(),
        }
    }
}

/// A broken invariant detected by `Mesh::validate`.
///
/// Indices are dense container indices at the time of validation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TopologyError {
    #[error("{kind} {index} references a {target} that is not live")]
    DanglingReference {
        kind: ElementKind,
        index: usize,
        target: ElementKind,
    },

    #[error("edge {edge} has identical endpoints")]
    DegenerateEdge { edge: usize },

    #[error("{kind} {index}: list head is {head} but list size is {size}")]
    HeadSizeMismatch {
        kind: ElementKind,
        index: usize,
        head: &'static str,
        size: usize,
    },

    #[error("{kind} {index}: list does not close after {size} steps")]
    ListNotClosed {
        kind: ElementKind,
        index: usize,
        size: usize,
    },

    #[error("{kind} {index}: list visits a member more than once")]
    ListRepeats { kind: ElementKind, index: usize },

    #[error("{kind} {index}: list member {member} does not reference its owner")]
    ForeignMember {
        kind: ElementKind,
        index: usize,
        member: usize,
    },

    #[error("{kind} {index}: next/previous links are not symmetric at member {member}")]
    AsymmetricLink {
        kind: ElementKind,
        index: usize,
        member: usize,
    },

    #[error("{kind} count mismatch: lists hold {listed}, container holds {expected}")]
    IncidenceCount {
        kind: ElementKind,
        listed: usize,
        expected: usize,
    },

    #[error("face {face}: loop {member} does not start where its predecessor ends")]
    BrokenFaceCycle { face: usize, member: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn foreign_handle_message_names_owners() {
        let err = MeshError::ForeignHandle {
            kind: ElementKind::Vertex,
            owner: 3,
            expected: 7,
        };
        assert_eq!(err.to_string(), "vertex handle belongs to owner 3, not 7");
    }

    #[test]
    fn stale_handle_message_names_kind() {
        let err = MeshError::StaleHandle {
            kind: ElementKind::Edge,
            slot: 4,
            generation: 2,
        };
        assert_eq!(err.to_string(), "stale edge handle (slot 4, generation 2)");
    }

    #[test]
    fn type_mismatch_names_requested_type() {
        let err = MeshError::attribute_type_mismatch::<f32>("position");
        assert_eq!(
            err.to_string(),
            "attribute `position` does not store values of type f32"
        );
    }
}
