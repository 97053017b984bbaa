//! Scale/translate state and the anchor-preserving rescale math.
//!
//! Everything in here is pure: functions take a state value and return a new
//! one, leaving rendering and scrolling to [`crate::scroll`].
//!
//! Coordinate spaces used throughout:
//! - *viewport*: pixels relative to the viewer element's top-left corner
//! - *scaled image*: pixels on the image after scaling, relative to its top-left
//! - *full image*: intrinsic image pixels
//!
//! A full-image point `q` appears on screen at
//! `translate + origin * (1 - scale) + q * scale - scroll_position`, where
//! `scroll_position` is the scrollable viewport's current position.

use crate::geometry::Point;
use crate::scroll::decompose;
use crate::viewport::ViewportState;

/// Mutable geometric state of the displayed image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformState {
    /// Current scale factor
    pub scale: f64,
    /// Rendering translation, non-negative at rest
    pub translate: Point,
    /// Part of the offset handed to the scroller, never positive
    pub scroll: Point,
    /// Pivot of the scale while a pinch is active, otherwise zero
    pub origin: Point,
}

impl Default for TransformState {
    fn default() -> Self {
        Self::identity()
    }
}

impl TransformState {
    /// Unit scale, no offset.
    pub fn identity() -> Self {
        Self {
            scale: 1.0,
            translate: Point::ZERO,
            scroll: Point::ZERO,
            origin: Point::ZERO,
        }
    }

    /// Base scale with the image centered in the viewport.
    pub fn centered(viewport: &ViewportState) -> Self {
        let mut state = Self {
            scale: viewport.base_scale,
            ..Self::identity()
        };
        state.set_translation(viewport.base_translation());
        state
    }

    /// Store a conceptual offset, moving negative components into `scroll`.
    pub fn set_translation(&mut self, offset: Point) {
        let (translate, scroll) = decompose(offset);
        self.translate = translate;
        self.scroll = scroll;
    }

    /// The conceptual offset, `translate + scroll`.
    pub fn offset(&self) -> Point {
        self.translate + self.scroll
    }

    /// Position the scroller should be at for this state.
    pub fn scroll_position(&self) -> Point {
        Point::ZERO - self.scroll
    }

    /// Map a viewport point onto the scaled image.
    pub fn viewport_to_scaled_image(&self, point: Point, scroll_position: Point) -> Point {
        point + scroll_position - self.translate
    }

    /// Screen (viewport) position of a full-image point.
    pub fn image_to_viewport(&self, image_point: Point, scroll_position: Point) -> Point {
        self.translate + self.origin * (1.0 - self.scale) + image_point * self.scale
            - scroll_position
    }

    /// Full-image point shown at a viewport point.
    pub fn viewport_to_image(&self, point: Point, scroll_position: Point) -> Point {
        (point + scroll_position - self.translate - self.origin * (1.0 - self.scale)) / self.scale
    }

    /// Move the scale pivot to `origin` without moving the image on screen.
    ///
    /// The translate compensation may leave `translate` negative for the
    /// duration of a pinch; the next [`TransformState::set_translation`]
    /// restores the split.
    pub fn pivoted(&self, origin: Point) -> TransformState {
        let shift = (origin - self.origin) * (1.0 - self.scale);
        TransformState {
            translate: self.translate - shift,
            origin,
            ..*self
        }
    }

    /// Rescale so that `anchor` (a viewport point) stays where it is on screen.
    ///
    /// `scroll_position` is where the scroller currently sits. The returned
    /// state has its origin reset and its offset split into translate and scroll.
    pub fn rescaled_about(&self, anchor: Point, scroll_position: Point, new_scale: f64) -> TransformState {
        let on_scaled = self.viewport_to_scaled_image(anchor, scroll_position);
        rescale_anchor(anchor, on_scaled, self.scale, new_scale)
    }
}

/// Build the state that keeps a scaled-image anchor under its viewport point.
///
/// `on_scaled` was measured at `old_scale`; after rescaling it lands at
/// `on_scaled * new_scale / old_scale`, so the offset is whatever puts that
/// back under `anchor`. Requires `old_scale > 0`.
pub fn rescale_anchor(anchor: Point, on_scaled: Point, old_scale: f64, new_scale: f64) -> TransformState {
    debug_assert!(old_scale > 0.0, "rescale from non-positive scale {old_scale}");
    let rescaled = on_scaled * (new_scale / old_scale);
    let mut state = TransformState {
        scale: new_scale,
        ..TransformState::identity()
    };
    state.set_translation(anchor - rescaled);
    log::trace!(
        "Rescale {:.4} -> {:.4} about ({:.1}, {:.1}): offset ({:.3}, {:.3})",
        old_scale,
        new_scale,
        anchor.x,
        anchor.y,
        state.offset().x,
        state.offset().y
    );
    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ViewerConfig;
    use crate::geometry::Size;

    const EPSILON: f64 = 1e-6;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < EPSILON
    }

    fn approx_point(a: Point, b: Point) -> bool {
        approx_eq(a.x, b.x) && approx_eq(a.y, b.y)
    }

    fn portrait() -> ViewportState {
        ViewportState::new(
            Size::new(320.0, 480.0),
            Size::new(640.0, 960.0),
            &ViewerConfig::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_centered_state() {
        let state = TransformState::centered(&portrait());
        assert_eq!(state.scale, 0.5);
        assert_eq!(state.translate, Point::ZERO);
        assert_eq!(state.scroll, Point::ZERO);
        assert!(state.origin.is_zero());
    }

    #[test]
    fn test_set_translation_splits_negative_components() {
        let mut state = TransformState::identity();
        state.set_translation(Point::new(-12.5, 30.0));
        assert_eq!(state.translate, Point::new(0.0, 30.0));
        assert_eq!(state.scroll, Point::new(-12.5, 0.0));
        assert_eq!(state.offset(), Point::new(-12.5, 30.0));
        assert_eq!(state.scroll_position(), Point::new(12.5, 0.0));
    }

    #[test]
    fn test_rescale_preserves_anchor_on_screen() {
        let state = TransformState::centered(&portrait());
        let anchor = Point::new(100.0, 300.0);
        let image_point = state.viewport_to_image(anchor, state.scroll_position());

        let zoomed = state.rescaled_about(anchor, state.scroll_position(), 1.7);
        assert_eq!(zoomed.scale, 1.7);
        assert!(approx_point(
            zoomed.image_to_viewport(image_point, zoomed.scroll_position()),
            anchor
        ));
    }

    #[test]
    fn test_rescale_at_same_scale_keeps_offset() {
        let mut state = TransformState {
            scale: 1.2,
            ..TransformState::identity()
        };
        state.set_translation(Point::new(-40.0, 10.0));
        let same = state.rescaled_about(Point::new(50.0, 50.0), state.scroll_position(), 1.2);
        assert!(approx_point(same.offset(), state.offset()));
    }

    #[test]
    fn test_pivot_keeps_image_in_place() {
        let state = TransformState::centered(&portrait());
        let probe = Point::new(200.0, 100.0);
        let before = state.image_to_viewport(probe, Point::ZERO);

        let pivoted = state.pivoted(Point::new(320.0, 480.0));
        assert_eq!(pivoted.origin, Point::new(320.0, 480.0));
        assert!(approx_point(pivoted.image_to_viewport(probe, Point::ZERO), before));
    }

    #[test]
    fn test_pivot_point_is_fixed_under_scale() {
        let state = TransformState::centered(&portrait());
        let origin = Point::new(320.0, 480.0);
        let pivoted = state.pivoted(origin);
        let before = pivoted.image_to_viewport(origin, Point::ZERO);

        let scaled = TransformState {
            scale: 1.3,
            ..pivoted
        };
        assert!(approx_point(scaled.image_to_viewport(origin, Point::ZERO), before));
    }

    #[test]
    fn test_viewport_image_mapping_inverts() {
        let mut state = TransformState {
            scale: 2.0,
            ..TransformState::identity()
        };
        state.set_translation(Point::new(-100.0, 20.0));
        let scroll = Point::new(30.0, 0.0);
        let p = Point::new(77.0, 123.0);
        let q = state.viewport_to_image(p, scroll);
        assert!(approx_point(state.image_to_viewport(q, scroll), p));
    }
}
