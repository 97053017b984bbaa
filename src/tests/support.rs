//! Shared fakes and helpers.

use std::time::Duration;
use web_time::Instant;

use crate::{
    AffineTransform, ImageViewer, Point, RenderMode, RenderSink, ScrollableViewport, Size,
    ViewerConfig,
};

pub const EPSILON: f64 = 1e-6;

pub fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

pub fn approx_point(a: Point, b: Point) -> bool {
    approx_eq(a.x, b.x) && approx_eq(a.y, b.y)
}

/// Scroller that goes exactly where it is told.
#[derive(Debug, Default)]
pub struct RecordingScroller {
    pub position: Point,
    pub enabled: bool,
    pub refreshes: usize,
    pub animation_stops: usize,
}

impl ScrollableViewport for RecordingScroller {
    fn position(&self) -> Point {
        self.position
    }

    fn scroll_to(&mut self, position: Point) {
        self.position = position;
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    fn stop_animation(&mut self) {
        self.animation_stops += 1;
    }

    fn refresh(&mut self) {
        self.refreshes += 1;
    }
}

#[derive(Debug, Default)]
pub struct RecordingSink {
    pub transforms: Vec<(AffineTransform, RenderMode)>,
    pub content_sizes: Vec<Size>,
}

impl RenderSink for RecordingSink {
    fn apply_transform(&mut self, transform: &AffineTransform, mode: RenderMode) {
        self.transforms.push((*transform, mode));
    }

    fn set_content_size(&mut self, size: Size) {
        self.content_sizes.push(size);
    }
}

pub type TestViewer = ImageViewer<RecordingScroller, RecordingSink>;

/// A viewer with nothing loaded yet, container sized `viewport`.
pub fn empty_viewer(config: ViewerConfig, viewport: Size) -> TestViewer {
    let mut viewer =
        ImageViewer::new(config, RecordingScroller::default(), RecordingSink::default()).unwrap();
    viewer.on_container_resize(viewport).unwrap();
    viewer
}

/// 640x960 image in a 320x480 viewport: base scale 0.5, max 2.0.
pub fn portrait_viewer() -> TestViewer {
    let mut viewer = empty_viewer(ViewerConfig::default(), Size::new(320.0, 480.0));
    viewer.on_image_load(Size::new(640.0, 960.0)).unwrap();
    viewer
}

/// 640x960 image in a 480x800 viewport: base scale 0.75, centered at (0, 40).
pub fn tall_viewer() -> TestViewer {
    let mut viewer = empty_viewer(ViewerConfig::default(), Size::new(480.0, 800.0));
    viewer.on_image_load(Size::new(640.0, 960.0)).unwrap();
    viewer
}

/// Apply whatever commit is pending.
pub fn flush(viewer: &mut TestViewer) -> bool {
    let delay = viewer.config().commit_delay();
    viewer.tick_at(Instant::now() + delay + Duration::from_millis(1))
}

/// Full-image point currently shown at a viewport point.
pub fn image_point_at(viewer: &TestViewer, point: Point) -> Point {
    viewer
        .transform()
        .viewport_to_image(point, viewer.scroller().position)
}

/// Viewport position where a full-image point is currently shown.
pub fn screen_position_of(viewer: &TestViewer, image_point: Point) -> Point {
    viewer
        .transform()
        .image_to_viewport(image_point, viewer.scroller().position)
}
