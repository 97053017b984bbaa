//! pinchview - pinch-zoom and pan for a single image in a scrollable viewport
//!
//! The crate is the transform engine only: it turns touch gestures and zoom
//! commands into a scale plus translation, keeps the point under the fingers
//! fixed across scale changes, and splits offsets between a non-negative
//! render translation and a scroll position. Drawing and scrolling are done
//! by the host through the [`RenderSink`] and [`ScrollableViewport`] traits.

pub mod commit;
pub mod config;
pub mod constants;
pub mod dispatch;
pub mod error;
pub mod geometry;
pub mod gesture;
pub mod scroll;
pub mod transform;
pub mod viewer;
pub mod viewport;
mod zoom;

pub use config::{LogLevel, ViewerConfig};
pub use dispatch::{GestureDispatcher, TouchEvent, ZoomTarget};
pub use error::{ConfigError, ViewerError};
pub use geometry::{Point, Size};
pub use gesture::GestureSession;
pub use scroll::{AffineTransform, RenderMode, RenderSink, ScrollCoordinator, ScrollableViewport};
pub use transform::TransformState;
pub use viewer::ImageViewer;
pub use viewport::ViewportState;

#[cfg(test)]
mod tests;
