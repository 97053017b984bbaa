//! Derived sizing for one viewport/image pair.

use crate::config::ViewerConfig;
use crate::constants::MIN_PINCH_SCALE;
use crate::error::ViewerError;
use crate::geometry::{Point, Size};

/// Read-only sizing captured on load and recomputed on resize.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportState {
    /// Size of the hosting container
    pub viewport: Size,
    /// Intrinsic size of the image
    pub image: Size,
    /// Scale at which the image fits the viewport (1 without auto-fit)
    pub base_scale: f64,
    /// Largest scale zoom operations may reach
    pub max_scale: f64,
}

impl ViewportState {
    /// Compute sizing for an image shown in a viewport.
    ///
    /// Fails if either size is empty, since every later division by a scale
    /// depends on `base_scale > 0`.
    pub fn new(viewport: Size, image: Size, config: &ViewerConfig) -> Result<Self, ViewerError> {
        if image.is_empty() {
            return Err(ViewerError::ZeroImageDimensions {
                width: image.width,
                height: image.height,
            });
        }
        if viewport.is_empty() {
            return Err(ViewerError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }

        let base_scale = if config.auto_fit {
            (viewport.width / image.width).min(viewport.height / image.height)
        } else {
            1.0
        };
        let max_scale = base_scale * config.max_scale_factor;

        log::debug!(
            "Viewport {}x{} image {}x{}: base scale {:.4}, max scale {:.4}",
            viewport.width,
            viewport.height,
            image.width,
            image.height,
            base_scale,
            max_scale
        );

        Ok(Self {
            viewport,
            image,
            base_scale,
            max_scale,
        })
    }

    /// Offset that centers the image at base scale.
    ///
    /// Components are negative when the image is larger than the viewport
    /// (only possible without auto-fit); the scroll split takes care of that.
    pub fn base_translation(&self) -> Point {
        let scaled = self.image.scaled(self.base_scale);
        Point::new(
            (self.viewport.width - scaled.width) / 2.0,
            (self.viewport.height - scaled.height) / 2.0,
        )
    }

    /// Clamp a scale into `[base_scale, max_scale]`.
    pub fn clamp_scale(&self, scale: f64) -> f64 {
        scale.clamp(self.base_scale, self.max_scale)
    }

    /// Lowest scale a pinch may reach before being snapped back on release.
    ///
    /// Never above the base scale, never at or below zero.
    pub fn pinch_floor(&self, undershoot: f64) -> f64 {
        (self.base_scale - undershoot)
            .max(MIN_PINCH_SCALE)
            .min(self.base_scale)
    }

    /// Centre of the viewport in viewport coordinates.
    pub fn center(&self) -> Point {
        self.viewport.center()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < EPSILON
    }

    #[test]
    fn test_fit_scale_portrait() {
        let state = ViewportState::new(
            Size::new(320.0, 480.0),
            Size::new(640.0, 960.0),
            &ViewerConfig::default(),
        )
        .unwrap();
        assert!(approx_eq(state.base_scale, 0.5));
        assert!(approx_eq(state.max_scale, 2.0));
        assert_eq!(state.base_translation(), Point::ZERO);
    }

    #[test]
    fn test_fit_scale_limited_by_width() {
        let state = ViewportState::new(
            Size::new(480.0, 800.0),
            Size::new(640.0, 960.0),
            &ViewerConfig::default(),
        )
        .unwrap();
        assert!(approx_eq(state.base_scale, 0.75));
        assert!(approx_eq(state.max_scale, 3.0));
        // 960 * 0.75 = 720, leaving 80 px of vertical padding
        let base = state.base_translation();
        assert!(approx_eq(base.x, 0.0));
        assert!(approx_eq(base.y, 40.0));
    }

    #[test]
    fn test_no_auto_fit_uses_unit_scale() {
        let config = ViewerConfig::default().with_auto_fit(false);
        let state =
            ViewportState::new(Size::new(320.0, 480.0), Size::new(640.0, 960.0), &config).unwrap();
        assert_eq!(state.base_scale, 1.0);
        assert_eq!(state.max_scale, 4.0);
        assert_eq!(state.base_translation(), Point::new(-160.0, -240.0));
    }

    #[test]
    fn test_zero_image_fails_fast() {
        let err = ViewportState::new(
            Size::new(320.0, 480.0),
            Size::new(0.0, 960.0),
            &ViewerConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, ViewerError::ZeroImageDimensions { .. }));
    }

    #[test]
    fn test_pinch_floor_stays_positive() {
        let state = ViewportState::new(
            Size::new(320.0, 480.0),
            Size::new(640.0, 960.0),
            &ViewerConfig::default(),
        )
        .unwrap();
        assert!(state.pinch_floor(2.0) > 0.0);
        assert!(approx_eq(state.pinch_floor(0.25), 0.25));
    }
}
