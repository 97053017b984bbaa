//! The image viewer: owns all per-instance state and its lifecycle.
//!
//! Gesture handlers live in [`crate::gesture`], discrete zoom operations in
//! the `zoom` module; both are further `impl` blocks on [`ImageViewer`].

use web_time::Instant;

use crate::commit::CommitScheduler;
use crate::config::ViewerConfig;
use crate::error::ViewerError;
use crate::gesture::GestureSession;
use crate::geometry::{Point, Size};
use crate::scroll::{RenderSink, ScrollCoordinator, ScrollableViewport};
use crate::transform::TransformState;
use crate::viewport::ViewportState;

/// A zoomable, pannable view of one image.
pub struct ImageViewer<V, R> {
    pub(crate) config: ViewerConfig,
    pub(crate) coordinator: ScrollCoordinator<V, R>,
    /// Sizing for the loaded image, `None` until a load completes
    pub(crate) sizing: Option<ViewportState>,
    /// Last known container size
    pub(crate) viewport_size: Size,
    /// Load received before activation
    pub(crate) deferred_load: Option<Size>,
    pub(crate) activated: bool,
    /// Committed (rendered) state
    pub(crate) transform: TransformState,
    pub(crate) session: Option<GestureSession>,
    pub(crate) commits: CommitScheduler,
    /// Page position of the viewer element's top-left corner
    pub(crate) element_origin: Point,
    pub(crate) destroyed: bool,
}

impl<V: ScrollableViewport, R: RenderSink> ImageViewer<V, R> {
    /// Create a viewer around a scroller and a render sink.
    pub fn new(config: ViewerConfig, scroller: V, sink: R) -> Result<Self, ViewerError> {
        config.validate()?;

        // No panning until an image is loaded
        let mut coordinator = ScrollCoordinator::new(scroller, sink, config.render_mode);
        coordinator.disable();

        Ok(Self {
            commits: CommitScheduler::new(config.commit_delay()),
            config,
            coordinator,
            sizing: None,
            viewport_size: Size::default(),
            deferred_load: None,
            activated: false,
            transform: TransformState::identity(),
            session: None,
            element_origin: Point::ZERO,
            destroyed: false,
        })
    }

    /// Set the page position of the viewer element.
    pub fn set_element_origin(&mut self, origin: Point) {
        self.element_origin = origin;
    }

    /// Record a container size change and re-fit the image if one is loaded.
    ///
    /// A zero dimension keeps the previously known value for that axis, which
    /// is what hidden or mid-layout containers report.
    pub fn on_container_resize(&mut self, size: Size) -> Result<(), ViewerError> {
        let width = if size.width > 0.0 {
            size.width
        } else {
            self.viewport_size.width
        };
        let height = if size.height > 0.0 {
            size.height
        } else {
            self.viewport_size.height
        };
        self.viewport_size = Size::new(width, height);
        log::debug!("Container resized to {}x{}", width, height);

        if self.sizing.is_some() {
            self.resize()?;
        }
        Ok(())
    }

    /// The host reports the viewer as shown; applies any load held back until now.
    pub fn on_activate(&mut self) -> Result<Option<TransformState>, ViewerError> {
        if self.destroyed || self.activated {
            return Ok(None);
        }
        self.activated = true;
        match self.deferred_load.take() {
            Some(image) => self.initialize(image).map(Some),
            None => Ok(None),
        }
    }

    /// The image finished loading with the given intrinsic size.
    ///
    /// Returns the initial centered state once applied, or `None` if the load
    /// is held until activation.
    pub fn on_image_load(&mut self, image: Size) -> Result<Option<TransformState>, ViewerError> {
        if self.destroyed {
            return Ok(None);
        }
        if self.config.init_on_activate && !self.activated {
            log::debug!(
                "Holding image load {}x{} until activation",
                image.width,
                image.height
            );
            self.deferred_load = Some(image);
            return Ok(None);
        }
        self.initialize(image).map(Some)
    }

    fn initialize(&mut self, image: Size) -> Result<TransformState, ViewerError> {
        let sizing = ViewportState::new(self.viewport_size, image, &self.config)?;

        self.commits.cancel();
        self.session = None;
        self.sizing = Some(sizing);
        self.transform = TransformState::centered(&sizing);
        self.commit(&sizing);

        log::info!(
            "Image {}x{} loaded at scale {:.4}",
            image.width,
            image.height,
            sizing.base_scale
        );
        Ok(self.transform)
    }

    /// Forget the current image. Zoom operations no-op until the next load.
    pub fn unload_image(&mut self) {
        if self.destroyed {
            return;
        }
        self.commits.cancel();
        self.session = None;
        self.sizing = None;
        self.deferred_load = None;
        self.transform = TransformState::identity();
        self.coordinator.disable();
        log::debug!("Image unloaded");
    }

    /// Tear the viewer down; pending and later commits become no-ops.
    pub fn destroy(&mut self) {
        self.destroyed = true;
        self.commits.cancel();
        self.session = None;
        self.deferred_load = None;
        log::debug!("Viewer destroyed");
    }

    /// Apply the pending commit if it is due now.
    pub fn tick(&mut self) -> bool {
        self.tick_at(Instant::now())
    }

    /// Apply the pending commit if it is due at `now`.
    pub fn tick_at(&mut self, now: Instant) -> bool {
        let Some(commit) = self.commits.take_due(now) else {
            return false;
        };
        let Some(sizing) = self.live_sizing() else {
            log::debug!("Dropping commit {:?}: viewer not live", commit.token);
            return false;
        };

        self.transform = commit.target;
        self.transform.origin = Point::ZERO;
        self.commit(&sizing);
        true
    }

    /// Render the committed state and refresh scroll bounds.
    pub(crate) fn commit(&mut self, sizing: &ViewportState) {
        self.coordinator.apply_transform(&self.transform);
        self.coordinator.adjust_scroller(&self.transform, sizing);
    }

    /// Sizing, if an image is loaded and the viewer is still alive.
    pub(crate) fn live_sizing(&self) -> Option<ViewportState> {
        if self.destroyed {
            return None;
        }
        self.sizing
    }

    /// The state zoom requests build on: the pending target if there is one.
    pub fn effective_transform(&self) -> TransformState {
        self.commits
            .pending()
            .map(|commit| commit.target)
            .unwrap_or(self.transform)
    }

    /// Where the scroller will be once everything pending has been committed.
    pub(crate) fn effective_scroll_position(&self) -> Point {
        match self.commits.pending() {
            Some(commit) => commit.target.scroll_position(),
            None => self.coordinator.scroll_position(),
        }
    }

    /// The committed (rendered) state.
    pub fn transform(&self) -> TransformState {
        self.transform
    }

    /// Sizing of the loaded image.
    pub fn viewport_state(&self) -> Option<&ViewportState> {
        self.sizing.as_ref()
    }

    /// Check if a pinch is in progress.
    pub fn is_pinching(&self) -> bool {
        self.session.is_some()
    }

    /// Check if a deferred commit is waiting.
    pub fn has_pending_commit(&self) -> bool {
        self.commits.is_pending()
    }

    /// Check if the viewer has been torn down.
    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// The configuration in use.
    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    /// Borrow the scroller.
    pub fn scroller(&self) -> &V {
        self.coordinator.scroller()
    }

    /// Mutably borrow the scroller, e.g. to feed it user pans.
    pub fn scroller_mut(&mut self) -> &mut V {
        self.coordinator.scroller_mut()
    }

    /// Borrow the render sink.
    pub fn sink(&self) -> &R {
        self.coordinator.sink()
    }
}
