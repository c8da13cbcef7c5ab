#![feature(portable_simd)]

//! Batched geometry kernels for mesh processing.
//!
//! Two backends implement one operation set over caller-owned arrays:
//! [`generic`] (scalar reference) and [`simd`] (eight `f32` lanes via
//! `std::simd`). The crate-root functions forward to exactly one of them,
//! chosen at build time by the `simd` feature (on by default).
//!
//! # Example
//!
//! ```
//! use mesh_simd::{ray_triangles_intersection_indexed, Vec3};
//!
//! let vertices = [Vec3::ZERO, Vec3::X, Vec3::Y];
//! let hits = ray_triangles_intersection_indexed(
//!     Vec3::new(0.25, 0.25, 5.0),
//!     Vec3::NEG_Z,
//!     &vertices,
//!     &[0, 1, 2],
//! );
//! assert_eq!(hits.num_hits, 1);
//! assert!((hits.distance - 5.0).abs() < 1e-4);
//! ```
//!
//! # Caller contract
//!
//! Operations never allocate results and never validate numeric input. The
//! element count is the length of the destination (or first source) slice.
//! Indices must be in range; zero-length vectors must not be normalized.
//! [`validation`] can check buffers up front.

mod dispatch;
mod error;
mod fp;
mod shared;
mod timing;
mod types;

pub mod generic;
pub mod layout;
pub mod simd;
pub mod validation;

pub use dispatch::*;
pub use error::MeshError;
pub use shared::MAX_CROSSINGS;
pub use simd::LANES;
pub use types::{Mat4, MeshFragment, RayHits, TriangleSoA, TriangleUvSoA, Vec2, Vec3, Vec4};

/// Which backend the crate-root operations run on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    /// Scalar reference implementation.
    Generic,
    /// Eight-lane `std::simd` implementation.
    Simd,
}

impl Backend {
    pub const fn name(self) -> &'static str {
        match self {
            Backend::Generic => "generic",
            Backend::Simd => "simd",
        }
    }
}

/// Backend selected for this build.
#[cfg(feature = "simd")]
pub const ACTIVE_BACKEND: Backend = Backend::Simd;
/// Backend selected for this build.
#[cfg(not(feature = "simd"))]
pub const ACTIVE_BACKEND: Backend = Backend::Generic;
