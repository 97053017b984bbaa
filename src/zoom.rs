//! Discrete zoom operations: stepping, explicit rescale, reset and resize.

use web_time::Instant;

use crate::error::ViewerError;
use crate::geometry::Point;
use crate::scroll::{RenderSink, ScrollableViewport};
use crate::transform::TransformState;
use crate::viewer::ImageViewer;
use crate::viewport::ViewportState;

impl<V: ScrollableViewport, R: RenderSink> ImageViewer<V, R> {
    /// Zoom in one step around the viewport centre.
    pub fn zoom_in(&mut self) {
        let Some(sizing) = self.live_sizing() else {
            return;
        };
        let scale = (self.effective_transform().scale + self.config.zoom_step).min(sizing.max_scale);
        self.zoom_image(sizing.center(), scale);
    }

    /// Zoom out one step around the viewport centre.
    pub fn zoom_out(&mut self) {
        let Some(sizing) = self.live_sizing() else {
            return;
        };
        let scale = (self.effective_transform().scale - self.config.zoom_step).max(sizing.base_scale);
        self.zoom_image(sizing.center(), scale);
    }

    /// Rescale to `new_scale`, keeping the viewport point `anchor` in place.
    ///
    /// The scale is clamped to `[base_scale, max_scale]`. The new state is
    /// committed after the deferred-commit delay; a later request replaces it.
    pub fn zoom_image(&mut self, anchor: Point, new_scale: f64) {
        let Some(sizing) = self.live_sizing() else {
            return;
        };
        if self.session.is_some() {
            log::debug!("Zoom request ignored during pinch");
            return;
        }
        if !new_scale.is_finite() {
            log::warn!("Ignoring non-finite zoom scale {}", new_scale);
            return;
        }
        self.schedule_rescale(anchor, sizing.clamp_scale(new_scale), Instant::now());
    }

    /// Schedule an anchor-preserving rescale built on the effective state.
    pub(crate) fn schedule_rescale(&mut self, anchor: Point, new_scale: f64, now: Instant) {
        let current = self.effective_transform();
        let scroll_position = self.effective_scroll_position();
        let target = current.rescaled_about(anchor, scroll_position, new_scale);
        let token = self.commits.schedule(target, now);
        log::trace!(
            "Scheduled {:?}: scale {:.4} -> {:.4}",
            token,
            current.scale,
            new_scale
        );
    }

    /// Back to base scale, centered.
    pub fn reset_zoom(&mut self) {
        let Some(sizing) = self.live_sizing() else {
            return;
        };
        self.commits.cancel();
        self.session = None;
        self.transform = TransformState::centered(&sizing);
        log::debug!("Zoom reset to base scale {:.4}", sizing.base_scale);
        self.commit(&sizing);
    }

    /// Recompute sizing from the current container and image sizes, as if
    /// the image had just loaded.
    pub fn resize(&mut self) -> Result<(), ViewerError> {
        let Some(previous) = self.live_sizing() else {
            return Ok(());
        };
        let sizing = ViewportState::new(self.viewport_size, previous.image, &self.config)?;

        self.commits.cancel();
        self.session = None;
        self.sizing = Some(sizing);
        self.transform = TransformState::centered(&sizing);
        log::debug!(
            "Resized: base scale {:.4} -> {:.4}",
            previous.base_scale,
            sizing.base_scale
        );
        self.commit(&sizing);
        Ok(())
    }
}
