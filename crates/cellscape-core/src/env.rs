//! Environment signals read when the scene starts and on resize.

/// Read-only snapshot of the host environment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnvSignals {
    /// Viewport width in CSS-like pixels.
    pub viewport_width: u32,
    /// Logical core count.
    pub cores: usize,
    /// Duration of the allocation micro-benchmark in milliseconds.
    pub benchmark_ms: f64,
    /// Primary pointer is coarse (touch).
    pub coarse_pointer: bool,
    pub device_pixel_ratio: f32,
}

impl Default for EnvSignals {
    fn default() -> Self {
        Self {
            viewport_width: 1920,
            cores: 8,
            benchmark_ms: 0.0,
            coarse_pointer: false,
            device_pixel_ratio: 1.0,
        }
    }
}
