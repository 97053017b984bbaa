//! Touch event wiring.
//!
//! [`ZoomTarget`] is the capability surface a viewer exposes to its host.
//! [`GestureDispatcher`] turns raw touch events into calls on it: two
//! concurrent touches make a pinch, two quick taps make a double tap.

use web_time::Instant;

use crate::constants::tap::{DOUBLE_TAP_DISTANCE, DOUBLE_TAP_INTERVAL, TAP_SLOP};
use crate::error::ViewerError;
use crate::geometry::Point;
use crate::scroll::{RenderSink, ScrollableViewport};
use crate::viewer::ImageViewer;

/// Operations a zoomable view exposes to gesture dispatch and host controls.
pub trait ZoomTarget {
    /// Two fingers touched down (page coordinates).
    fn on_pinch_start(&mut self, touches: [Point; 2]);
    /// Finger distance changed; factor is relative to the start of the pinch.
    fn on_pinch_move(&mut self, scale_factor: f64);
    /// Fingers lifted.
    fn on_pinch_end(&mut self);
    /// Double tap at a page position. Returns true if handled.
    fn on_double_tap(&mut self, point: Point) -> bool;
    /// Zoom in one step.
    fn zoom_in(&mut self);
    /// Zoom out one step.
    fn zoom_out(&mut self);
    /// Back to the fitted view.
    fn reset_zoom(&mut self);
    /// Re-fit after a container size change.
    fn resize(&mut self) -> Result<(), ViewerError>;
}

impl<V: ScrollableViewport, R: RenderSink> ZoomTarget for ImageViewer<V, R> {
    fn on_pinch_start(&mut self, touches: [Point; 2]) {
        ImageViewer::on_pinch_start(self, touches);
    }

    fn on_pinch_move(&mut self, scale_factor: f64) {
        ImageViewer::on_pinch_move(self, scale_factor);
    }

    fn on_pinch_end(&mut self) {
        ImageViewer::on_pinch_end(self);
    }

    fn on_double_tap(&mut self, point: Point) -> bool {
        ImageViewer::on_double_tap(self, point)
    }

    fn zoom_in(&mut self) {
        ImageViewer::zoom_in(self);
    }

    fn zoom_out(&mut self) {
        ImageViewer::zoom_out(self);
    }

    fn reset_zoom(&mut self) {
        ImageViewer::reset_zoom(self);
    }

    fn resize(&mut self) -> Result<(), ViewerError> {
        ImageViewer::resize(self)
    }
}

/// Raw touch input in page coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TouchEvent {
    /// A finger touched down.
    Start { id: u64, position: Point, time: Instant },
    /// A finger moved.
    Move { id: u64, position: Point },
    /// A finger lifted.
    End { id: u64, time: Instant },
    /// The platform cancelled a touch.
    Cancel { id: u64 },
}

#[derive(Debug, Clone, Copy)]
struct ActiveTouch {
    id: u64,
    start: Point,
    current: Point,
}

#[derive(Debug, Clone, Copy)]
struct PinchTracking {
    ids: [u64; 2],
    start_distance: f64,
}

/// Recognises pinches and double taps from raw touches.
#[derive(Debug, Default)]
pub struct GestureDispatcher {
    touches: Vec<ActiveTouch>,
    pinch: Option<PinchTracking>,
    /// The current touch sequence can still become a tap
    tap_candidate: bool,
    /// Time and position of the last completed single tap
    last_tap: Option<(Instant, Point)>,
}

impl GestureDispatcher {
    /// Create a dispatcher with no active touches.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if a pinch is being tracked.
    pub fn is_pinching(&self) -> bool {
        self.pinch.is_some()
    }

    /// Number of fingers currently down.
    pub fn active_touches(&self) -> usize {
        self.touches.len()
    }

    /// Feed one touch event, forwarding recognised gestures to `target`.
    pub fn handle<T: ZoomTarget>(&mut self, event: TouchEvent, target: &mut T) {
        match event {
            TouchEvent::Start { id, position, time } => self.touch_start(id, position, time, target),
            TouchEvent::Move { id, position } => self.touch_move(id, position, target),
            TouchEvent::End { id, time } => self.touch_end(id, Some(time), target),
            TouchEvent::Cancel { id } => self.touch_end(id, None, target),
        }
    }

    fn touch_start<T: ZoomTarget>(&mut self, id: u64, position: Point, time: Instant, target: &mut T) {
        if self.touches.iter().any(|t| t.id == id) {
            log::warn!("Duplicate touch start for id {}", id);
            return;
        }

        self.tap_candidate = self.touches.is_empty();
        self.touches.push(ActiveTouch {
            id,
            start: position,
            current: position,
        });

        // Too old to pair with this one
        if let Some((last_time, _)) = self.last_tap {
            if time.duration_since(last_time) > DOUBLE_TAP_INTERVAL {
                self.last_tap = None;
            }
        }

        if self.pinch.is_none() && self.touches.len() == 2 {
            let (a, b) = (self.touches[0], self.touches[1]);
            self.pinch = Some(PinchTracking {
                ids: [a.id, b.id],
                start_distance: a.current.distance(b.current),
            });
            self.last_tap = None;
            target.on_pinch_start([a.current, b.current]);
        }
    }

    fn touch_move<T: ZoomTarget>(&mut self, id: u64, position: Point, target: &mut T) {
        let Some(touch) = self.touches.iter_mut().find(|t| t.id == id) else {
            return;
        };
        touch.current = position;
        if touch.start.distance(position) > TAP_SLOP {
            self.tap_candidate = false;
        }

        if let Some(pinch) = self.pinch {
            if pinch.ids.contains(&id) {
                let distance = self.pinch_distance(&pinch);
                let factor = if pinch.start_distance > 0.0 {
                    distance / pinch.start_distance
                } else {
                    1.0
                };
                target.on_pinch_move(factor);
            }
        }
    }

    fn touch_end<T: ZoomTarget>(&mut self, id: u64, time: Option<Instant>, target: &mut T) {
        let Some(index) = self.touches.iter().position(|t| t.id == id) else {
            return;
        };
        let touch = self.touches.remove(index);

        if let Some(pinch) = self.pinch {
            if pinch.ids.contains(&id) {
                self.pinch = None;
                self.tap_candidate = false;
                target.on_pinch_end();
            }
        }

        if !self.touches.is_empty() {
            return;
        }

        let was_tap = std::mem::take(&mut self.tap_candidate);
        match time {
            Some(time) if was_tap => self.register_tap(touch.current, time, target),
            _ => self.last_tap = None,
        }
    }

    fn register_tap<T: ZoomTarget>(&mut self, position: Point, time: Instant, target: &mut T) {
        match self.last_tap.take() {
            Some((last_time, last_position))
                if time.duration_since(last_time) <= DOUBLE_TAP_INTERVAL
                    && last_position.distance(position) <= DOUBLE_TAP_DISTANCE =>
            {
                log::trace!("Double tap at ({:.1}, {:.1})", position.x, position.y);
                target.on_double_tap(position);
            }
            _ => self.last_tap = Some((time, position)),
        }
    }

    fn pinch_distance(&self, pinch: &PinchTracking) -> f64 {
        let find = |id: u64| self.touches.iter().find(|t| t.id == id).map(|t| t.current);
        match (find(pinch.ids[0]), find(pinch.ids[1])) {
            (Some(a), Some(b)) => a.distance(b),
            _ => pinch.start_distance,
        }
    }
}
