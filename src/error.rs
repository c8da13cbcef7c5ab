//! Error types for opt-in mesh buffer validation.
//!
//! The kernels themselves never fail; these errors are only produced by
//! [`crate::validation`].

use std::fmt;

/// A violated buffer invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MeshError {
    /// Index array length is not `3 * triangle_count`.
    IndexCountNotMultipleOfThree(usize),

    /// An index points past the end of the vertex array.
    IndexOutOfRange {
        position: usize,
        index: u32,
        vertex_count: usize,
    },

    /// A per-vertex attribute array is shorter than the vertex array.
    AttributeLength {
        name: &'static str,
        len: usize,
        expected: usize,
    },

    /// One planar component array disagrees with the others.
    PlanarLengthMismatch {
        component: &'static str,
        len: usize,
        expected: usize,
    },

    /// A polygon face has fewer than three corners.
    FaceTooSmall { face: usize, count: u32 },

    /// A polygon face's `offset..offset + count` runs past the index array.
    FaceOutOfRange {
        face: usize,
        offset: u32,
        count: u32,
        index_len: usize,
    },
}

impl fmt::Display for MeshError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MeshError::IndexCountNotMultipleOfThree(n) => {
                write!(f, "index count {} is not a multiple of 3", n)
            }
            MeshError::IndexOutOfRange {
                position,
                index,
                vertex_count,
            } => {
                write!(
                    f,
                    "index {} at position {} out of range (vertex count {})",
                    index, position, vertex_count
                )
            }
            MeshError::AttributeLength {
                name,
                len,
                expected,
            } => {
                write!(f, "{} has {} elements, expected {}", name, len, expected)
            }
            MeshError::PlanarLengthMismatch {
                component,
                len,
                expected,
            } => {
                write!(
                    f,
                    "planar component {} has {} elements, expected {}",
                    component, len, expected
                )
            }
            MeshError::FaceTooSmall { face, count } => {
                write!(f, "face {} has {} corners, need at least 3", face, count)
            }
            MeshError::FaceOutOfRange {
                face,
                offset,
                count,
                index_len,
            } => {
                write!(
                    f,
                    "face {} spans {}..{} past index array of length {}",
                    face,
                    offset,
                    *offset as u64 + *count as u64,
                    index_len
                )
            }
        }
    }
}

impl std::error::Error for MeshError {}
