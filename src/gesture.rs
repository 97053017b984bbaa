//! Pinch and double-tap handling.
//!
//! A pinch pivots the scale around the finger midpoint: on start the pivot
//! origin moves to the anchor (with a compensating translate so nothing
//! jumps), moves only change the scale, and on release the pivot is folded
//! back into a plain translation that keeps the anchor where it was.

use web_time::Instant;

use crate::constants::scale_eq;
use crate::geometry::Point;
use crate::scroll::{RenderSink, ScrollableViewport};
use crate::transform::{TransformState, rescale_anchor};
use crate::viewer::ImageViewer;

/// Anchor data captured when a pinch starts, discarded when it ends.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureSession {
    /// Scale when the pinch began
    pub start_scale: f64,
    /// Finger midpoint in viewport coordinates
    pub anchor_viewport: Point,
    /// The anchor on the scaled image
    pub anchor_scaled_image: Point,
    /// The anchor on the full-size image
    pub anchor_full_image: Point,
}

impl<V: ScrollableViewport, R: RenderSink> ImageViewer<V, R> {
    /// Two fingers touched down at the given page positions.
    pub fn on_pinch_start(&mut self, touches: [Point; 2]) {
        let Some(sizing) = self.live_sizing() else {
            return;
        };
        if self.session.is_some() {
            log::warn!("Pinch started while another pinch was active; finishing it first");
            self.on_pinch_end();
        }

        // Settle a pending discrete zoom so the anchor math sees what the user sees
        if let Some(pending) = self.commits.cancel() {
            self.transform = pending.target;
            self.commit(&sizing);
        }

        self.coordinator.begin_gesture();

        let scale = self.transform.scale;
        let scroll_position = self.coordinator.scroll_position();
        let anchor_viewport = touches[0].midpoint(touches[1]) - self.element_origin;
        let anchor_scaled_image = self
            .transform
            .viewport_to_scaled_image(anchor_viewport, scroll_position);
        let anchor_full_image = anchor_scaled_image / scale;

        self.session = Some(GestureSession {
            start_scale: scale,
            anchor_viewport,
            anchor_scaled_image,
            anchor_full_image,
        });
        self.transform = self.transform.pivoted(anchor_full_image);

        log::trace!(
            "Pinch start at ({:.1}, {:.1}), scale {:.4}, image anchor ({:.1}, {:.1})",
            anchor_viewport.x,
            anchor_viewport.y,
            scale,
            anchor_full_image.x,
            anchor_full_image.y
        );
        self.coordinator.apply_transform(&self.transform);
    }

    /// The pinch changed; `scale_factor` is relative to the start of the pinch.
    ///
    /// The scale may undershoot the base scale by `pinch_undershoot`, but
    /// never below 0.01 and never above the base scale itself (see
    /// [`crate::viewport::ViewportState::pinch_floor`]).
    pub fn on_pinch_move(&mut self, scale_factor: f64) {
        let Some(sizing) = self.live_sizing() else {
            return;
        };
        let Some(session) = self.session else {
            log::trace!("Pinch move without an active pinch ignored");
            return;
        };
        if !scale_factor.is_finite() {
            log::warn!("Ignoring non-finite pinch factor {}", scale_factor);
            return;
        }

        let floor = sizing.pinch_floor(self.config.pinch_undershoot);
        self.transform.scale = (scale_factor * session.start_scale).clamp(floor, sizing.max_scale);
        self.coordinator.apply_transform(&self.transform);
    }

    /// The fingers lifted; resolve to a settled scale and translation.
    pub fn on_pinch_end(&mut self) {
        let Some(session) = self.session.take() else {
            return;
        };
        let Some(sizing) = self.live_sizing() else {
            return;
        };

        let scale = self.transform.scale;
        if scale_eq(scale, sizing.base_scale) {
            self.transform.scale = sizing.base_scale;
            self.transform.set_translation(sizing.base_translation());
        } else if scale < sizing.base_scale {
            log::trace!("Pinch released below base scale ({:.4}), snapping back", scale);
            self.reset_zoom();
            return;
        } else {
            self.transform = rescale_anchor(
                session.anchor_viewport,
                session.anchor_scaled_image,
                session.start_scale,
                scale,
            );
        }

        self.transform.origin = Point::ZERO;
        log::debug!(
            "Pinch end: scale {:.4}, translate ({:.2}, {:.2}), scroll ({:.2}, {:.2})",
            self.transform.scale,
            self.transform.translate.x,
            self.transform.translate.y,
            self.transform.scroll.x,
            self.transform.scroll.y
        );
        self.commit(&sizing);
    }

    /// Double tap at a page position.
    ///
    /// Zoomed in: snaps straight back to the centered base view. At base
    /// scale: zooms toward the tap, committing after the deferred-commit delay.
    /// Returns false if double tap is disabled or nothing is loaded.
    pub fn on_double_tap(&mut self, point: Point) -> bool {
        if !self.config.double_tap_enabled {
            return false;
        }
        let Some(sizing) = self.live_sizing() else {
            return false;
        };
        if self.session.is_some() {
            return false;
        }

        let current = self.effective_transform();
        if current.scale > sizing.base_scale && !scale_eq(current.scale, sizing.base_scale) {
            self.commits.cancel();
            self.transform = TransformState::centered(&sizing);
            log::debug!("Double tap: back to base scale {:.4}", sizing.base_scale);
            self.commit(&sizing);
        } else {
            let target = (sizing.base_scale * self.config.double_tap_factor).min(sizing.max_scale);
            let anchor = point - self.element_origin;
            log::debug!(
                "Double tap: zoom to {:.4} at ({:.1}, {:.1})",
                target,
                anchor.x,
                anchor.y
            );
            self.schedule_rescale(anchor, target, Instant::now());
        }
        true
    }
}
