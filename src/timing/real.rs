use std::time::{Duration, Instant};

/// Measures consecutive phases; each `lap` returns the time since the last.
pub(crate) struct LapTimer {
    last: Instant,
}

impl LapTimer {
    #[inline]
    pub fn start() -> Self {
        Self {
            last: Instant::now(),
        }
    }

    #[inline]
    pub fn lap(&mut self) -> Duration {
        let now = Instant::now();
        let d = now - self.last;
        self.last = now;
        d
    }
}

/// Phase durations of one tangent generation call.
#[derive(Debug, Clone, Copy)]
pub(crate) struct TangentTimings {
    layout: &'static str,
    backend: &'static str,
    transpose: Duration,
    accumulate: Duration,
    orthogonalize: Duration,
}

impl TangentTimings {
    #[inline]
    pub fn new(layout: &'static str, backend: &'static str) -> Self {
        Self {
            layout,
            backend,
            transpose: Duration::ZERO,
            accumulate: Duration::ZERO,
            orthogonalize: Duration::ZERO,
        }
    }

    #[inline]
    pub fn set_transpose(&mut self, d: Duration) {
        self.transpose = d;
    }

    #[inline]
    pub fn set_accumulate(&mut self, d: Duration) {
        self.accumulate = d;
    }

    #[inline]
    pub fn set_orthogonalize(&mut self, d: Duration) {
        self.orthogonalize = d;
    }

    fn total(&self) -> Duration {
        self.transpose + self.accumulate + self.orthogonalize
    }

    pub fn report(&self, num_triangles: usize, num_vertices: usize) {
        let us = |d: Duration| d.as_secs_f64() * 1e6;
        tracing::debug!(
            target: "mesh_simd::timing",
            layout = self.layout,
            backend = self.backend,
            num_triangles,
            num_vertices,
            transpose_us = us(self.transpose),
            accumulate_us = us(self.accumulate),
            orthogonalize_us = us(self.orthogonalize),
            total_us = us(self.total()),
            "generate_tangents"
        );
    }
}
