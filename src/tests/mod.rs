//! Viewer-level tests.
//!
//! These drive a full [`crate::ImageViewer`] through recording stand-ins for
//! the scroller and render sink, checking what a user would see on screen.

mod support;
