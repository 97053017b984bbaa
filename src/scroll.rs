//! Translate/scroll decomposition and the side effects of a committed transform.
//!
//! A zoomed image may hang off the top or left edge of the viewport. Rather
//! than rendering with a negative translation (which would fight the
//! scroller's own coordinate space), that part of the offset is handed to the
//! scroller as a scroll position and the rendered translation stays `>= 0`.

use serde::{Deserialize, Serialize};

use crate::constants::{SCALE_PRECISION, TRANSLATE_PRECISION, scale_eq};
use crate::geometry::{Point, Size};
use crate::transform::TransformState;
use crate::viewport::ViewportState;

/// Split an offset into a non-negative translate and a non-positive scroll.
///
/// `translate + scroll == offset` holds exactly for every component.
pub fn decompose(offset: Point) -> (Point, Point) {
    let translate = offset.max(Point::ZERO);
    let scroll = offset.min(Point::ZERO);
    (translate, scroll)
}

/// Size of the scrollable content box for a transform.
///
/// Covers the scaled image plus its translation on both sides, and never
/// less than the viewport itself.
pub fn content_size(transform: &TransformState, viewport: &ViewportState) -> Size {
    let scaled = viewport.image.scaled(transform.scale);
    Size::new(
        (scaled.width + 2.0 * transform.translate.x).max(viewport.viewport.width),
        (scaled.height + 2.0 * transform.translate.y).max(viewport.viewport.height),
    )
}

/// Round to a fixed number of decimal places.
fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    let rounded = (value * factor).round() / factor;
    // Avoid handing "-0" to sinks
    if rounded == 0.0 { 0.0 } else { rounded }
}

/// How a render sink wants transforms expressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderMode {
    /// Translation composed with a uniform scale
    #[default]
    Composed,
    /// Explicit 2x2 affine matrix plus translation, for backends that
    /// cannot compose transforms reliably
    Matrix,
}

/// Fixed-precision affine transform handed to a render sink.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AffineTransform {
    /// Uniform scale, rounded to 8 decimal places
    pub scale: f64,
    /// Translation, rounded to 5 decimal places
    pub translate: Point,
    /// Scale pivot in unscaled image pixels
    pub origin: Point,
}

impl AffineTransform {
    /// Quantize a transform state for rendering.
    pub fn from_state(state: &TransformState) -> Self {
        Self {
            scale: round_to(state.scale, SCALE_PRECISION),
            translate: Point::new(
                round_to(state.translate.x, TRANSLATE_PRECISION),
                round_to(state.translate.y, TRANSLATE_PRECISION),
            ),
            origin: state.origin,
        }
    }

    /// Matrix form `[a, b, c, d, e, f]` with the pivot folded into the translation.
    pub fn matrix(&self) -> [f64; 6] {
        let s = self.scale;
        let e = round_to(
            self.translate.x + self.origin.x * (1.0 - s),
            TRANSLATE_PRECISION,
        );
        let f = round_to(
            self.translate.y + self.origin.y * (1.0 - s),
            TRANSLATE_PRECISION,
        );
        [s, 0.0, 0.0, s, e, f]
    }

    /// Style-string form for sinks that take CSS-like transforms.
    ///
    /// The composed form relies on the sink applying `origin` separately;
    /// the matrix form already includes it.
    pub fn to_css(&self, mode: RenderMode) -> String {
        match mode {
            RenderMode::Composed => format!(
                "translate3d({}px, {}px, 0) scale3d({}, {}, 1)",
                self.translate.x, self.translate.y, self.scale, self.scale
            ),
            RenderMode::Matrix => {
                let [a, b, c, d, e, f] = self.matrix();
                format!("matrix({a},{b},{c},{d},{e},{f})")
            }
        }
    }
}

/// The scrollable container the image lives in.
pub trait ScrollableViewport {
    /// Current scroll position (non-negative, top-left of the visible area).
    fn position(&self) -> Point;

    /// Scroll to a position.
    fn scroll_to(&mut self, position: Point);

    /// Enable or disable user panning.
    fn set_enabled(&mut self, enabled: bool);

    /// Stop any running momentum or scroll animation.
    fn stop_animation(&mut self);

    /// Recompute scroll bounds from the current content size.
    fn refresh(&mut self);
}

/// Where committed transforms are drawn.
pub trait RenderSink {
    /// Draw the image with the given transform.
    fn apply_transform(&mut self, transform: &AffineTransform, mode: RenderMode);

    /// Resize the scrollable content box.
    fn set_content_size(&mut self, size: Size);
}

/// Pushes committed transform state out to the scroller and the render sink.
#[derive(Debug)]
pub struct ScrollCoordinator<V, R> {
    scroller: V,
    sink: R,
    mode: RenderMode,
}

impl<V: ScrollableViewport, R: RenderSink> ScrollCoordinator<V, R> {
    /// Create a coordinator around a scroller and a sink.
    pub fn new(scroller: V, sink: R, mode: RenderMode) -> Self {
        Self {
            scroller,
            sink,
            mode,
        }
    }

    /// Current scroller position.
    pub fn scroll_position(&self) -> Point {
        self.scroller.position()
    }

    /// Render a transform state.
    pub fn apply_transform(&mut self, state: &TransformState) {
        let transform = AffineTransform::from_state(state);
        log::trace!(
            "Apply transform: scale {} translate ({}, {}) origin ({}, {})",
            transform.scale,
            transform.translate.x,
            transform.translate.y,
            transform.origin.x,
            transform.origin.y
        );
        self.sink.apply_transform(&transform, self.mode);
    }

    /// Bring the scroller in line with a committed state.
    ///
    /// Panning is only enabled away from the base scale, where the image
    /// fits and there is nothing to pan to.
    pub fn adjust_scroller(&mut self, state: &TransformState, viewport: &ViewportState) {
        let zoomed = !scale_eq(state.scale, viewport.base_scale);
        self.scroller.set_enabled(zoomed);

        let bounds = content_size(state, viewport);
        self.sink.set_content_size(bounds);
        self.scroller.refresh();

        let position = state.scroll_position();
        log::trace!(
            "Adjust scroller: panning {}, content {:.1}x{:.1}, scroll to ({:.3}, {:.3})",
            if zoomed { "enabled" } else { "disabled" },
            bounds.width,
            bounds.height,
            position.x,
            position.y
        );
        self.scroller.scroll_to(position);
    }

    /// Freeze the scroller for the duration of a gesture.
    pub fn begin_gesture(&mut self) {
        self.scroller.stop_animation();
        self.scroller.set_enabled(false);
    }

    /// Disable panning without touching the position.
    pub fn disable(&mut self) {
        self.scroller.set_enabled(false);
    }

    /// Borrow the scroller.
    pub fn scroller(&self) -> &V {
        &self.scroller
    }

    /// Mutably borrow the scroller, e.g. to feed it user pans.
    pub fn scroller_mut(&mut self) -> &mut V {
        &mut self.scroller
    }

    /// Borrow the render sink.
    pub fn sink(&self) -> &R {
        &self.sink
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ViewerConfig;

    #[test]
    fn test_decompose_law() {
        let offsets = [
            Point::new(0.0, 0.0),
            Point::new(12.25, -3.5),
            Point::new(-0.1, -1e6),
            Point::new(400.0, 7.0),
        ];
        for offset in offsets {
            let (translate, scroll) = decompose(offset);
            assert!(translate.x >= 0.0 && translate.y >= 0.0);
            assert!(scroll.x <= 0.0 && scroll.y <= 0.0);
            assert_eq!(translate + scroll, offset);
        }
    }

    #[test]
    fn test_content_size_never_smaller_than_viewport() {
        let viewport = ViewportState::new(
            Size::new(480.0, 800.0),
            Size::new(640.0, 960.0),
            &ViewerConfig::default(),
        )
        .unwrap();
        let state = TransformState::centered(&viewport);
        // 640*0.75 = 480 wide; 720 tall + 2*40 translate = 800
        assert_eq!(content_size(&state, &viewport), Size::new(480.0, 800.0));

        let zoomed = TransformState {
            scale: 1.5,
            ..TransformState::identity()
        };
        assert_eq!(content_size(&zoomed, &viewport), Size::new(960.0, 1440.0));
    }

    #[test]
    fn test_fixed_precision() {
        let mut state = TransformState {
            scale: 0.123456789123,
            ..TransformState::identity()
        };
        state.set_translation(Point::new(1.0000049, 2.123456789));
        let affine = AffineTransform::from_state(&state);
        assert_eq!(affine.scale, 0.12345679);
        assert_eq!(affine.translate, Point::new(1.0, 2.12346));
    }

    #[test]
    fn test_css_forms() {
        let mut state = TransformState {
            scale: 2.0,
            ..TransformState::identity()
        };
        state.set_translation(Point::new(10.0, 20.5));
        let affine = AffineTransform::from_state(&state);
        assert_eq!(
            affine.to_css(RenderMode::Composed),
            "translate3d(10px, 20.5px, 0) scale3d(2, 2, 1)"
        );
        assert_eq!(affine.to_css(RenderMode::Matrix), "matrix(2,0,0,2,10,20.5)");
    }

    #[test]
    fn test_matrix_folds_origin() {
        let state = TransformState {
            scale: 2.0,
            translate: Point::new(5.0, 5.0),
            scroll: Point::ZERO,
            origin: Point::new(10.0, 0.0),
        };
        let [a, _, _, d, e, f] = AffineTransform::from_state(&state).matrix();
        assert_eq!((a, d), (2.0, 2.0));
        assert_eq!((e, f), (-5.0, 5.0));
    }
}
