use std::time::Duration;

/// Dummy lap timer when `timing` is disabled (zero-sized).
pub(crate) struct LapTimer;

impl LapTimer {
    #[inline(always)]
    pub fn start() -> Self {
        Self
    }

    #[inline(always)]
    pub fn lap(&mut self) -> Duration {
        Duration::ZERO
    }
}

/// Dummy phase record when `timing` is disabled (zero-sized).
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct TangentTimings;

impl TangentTimings {
    #[inline(always)]
    pub fn new(_layout: &'static str, _backend: &'static str) -> Self {
        Self
    }

    #[inline(always)]
    pub fn set_transpose(&mut self, _d: Duration) {}

    #[inline(always)]
    pub fn set_accumulate(&mut self, _d: Duration) {}

    #[inline(always)]
    pub fn set_orthogonalize(&mut self, _d: Duration) {}

    #[inline(always)]
    pub fn report(&self, _num_triangles: usize, _num_vertices: usize) {}
}
