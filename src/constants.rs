//! Global constants for the pinch-zoom engine

use std::time::Duration;

/// Maximum scale as a multiple of the base (fit) scale
pub const DEFAULT_MAX_SCALE_FACTOR: f64 = 4.0;

/// Double-tap zoom target as a multiple of the base scale
pub const DEFAULT_DOUBLE_TAP_FACTOR: f64 = 4.0;

/// Scale increment for a single zoom-in / zoom-out step
pub const DEFAULT_ZOOM_STEP: f64 = 0.05;

/// How far below the base scale a pinch may rubber-band before snapping back
pub const DEFAULT_PINCH_UNDERSHOOT: f64 = 2.0;

/// Absolute floor for a pinch scale, so later divisions stay finite
pub const MIN_PINCH_SCALE: f64 = 0.01;

/// Delay between a discrete zoom request and its commit
pub const DEFAULT_COMMIT_DELAY: Duration = Duration::from_millis(50);

/// Decimal places kept for translate components handed to the render sink
pub const TRANSLATE_PRECISION: i32 = 5;

/// Decimal places kept for the scale handed to the render sink
pub const SCALE_PRECISION: i32 = 8;

/// Tolerance used when comparing a scale against the base scale
pub const SCALE_EPSILON: f64 = 1e-9;

/// Double-tap recognition
pub mod tap {
    use std::time::Duration;

    /// Maximum time between the two taps of a double tap
    pub const DOUBLE_TAP_INTERVAL: Duration = Duration::from_millis(300);

    /// Maximum distance between the two taps of a double tap, in pixels
    pub const DOUBLE_TAP_DISTANCE: f64 = 30.0;

    /// A touch that travels further than this is a drag, not a tap
    pub const TAP_SLOP: f64 = 10.0;
}

/// Returns true if two scales are equal within [`SCALE_EPSILON`].
pub fn scale_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < SCALE_EPSILON
}
