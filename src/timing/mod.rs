//! Zero-cost timing instrumentation for tangent generation.
//!
//! When the `timing` feature is enabled, each `generate_tangents_*` call
//! measures its phases and emits one `tracing` debug event.
//!
//! When disabled, all types become zero-sized and all methods compile away.

#[cfg(feature = "timing")]
mod real;
#[cfg(not(feature = "timing"))]
mod stub;

#[cfg(feature = "timing")]
pub(crate) use real::*;
#[cfg(not(feature = "timing"))]
pub(crate) use stub::*;
