/// Replays a scripted gesture session against logging stand-ins for the
/// scroller and render sink, printing every rendered transform.
#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::path::PathBuf;
    use std::time::Duration;

    use pinchview::{
        AffineTransform, GestureDispatcher, ImageViewer, Point, RenderMode, RenderSink,
        ScrollableViewport, Size, TouchEvent, ViewerConfig,
    };
    use web_time::Instant;

    struct PrintScroller {
        position: Point,
        enabled: bool,
    }

    impl ScrollableViewport for PrintScroller {
        fn position(&self) -> Point {
            self.position
        }
        fn scroll_to(&mut self, position: Point) {
            self.position = position;
            println!("  scroll to ({:.2}, {:.2})", position.x, position.y);
        }
        fn set_enabled(&mut self, enabled: bool) {
            if enabled != self.enabled {
                println!("  panning {}", if enabled { "on" } else { "off" });
            }
            self.enabled = enabled;
        }
        fn stop_animation(&mut self) {}
        fn refresh(&mut self) {}
    }

    struct PrintSink;

    impl RenderSink for PrintSink {
        fn apply_transform(&mut self, transform: &AffineTransform, mode: RenderMode) {
            println!("  transform: {}", transform.to_css(mode));
        }
        fn set_content_size(&mut self, size: Size) {
            println!("  content {:.1}x{:.1}", size.width, size.height);
        }
    }

    let config = match std::env::args().nth(1).map(PathBuf::from) {
        Some(path) => match ViewerConfig::load(&path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Failed to load {:?}: {}", path, e);
                std::process::exit(1);
            }
        },
        None => ViewerConfig::default(),
    };

    env_logger::Builder::new()
        .filter_level(config.log_level.to_level_filter())
        .init();

    let delay = config.commit_delay();
    let scroller = PrintScroller {
        position: Point::ZERO,
        enabled: false,
    };
    let mut viewer = match ImageViewer::new(config, scroller, PrintSink) {
        Ok(viewer) => viewer,
        Err(e) => {
            eprintln!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };
    let mut dispatcher = GestureDispatcher::new();

    let run = |viewer: &mut ImageViewer<PrintScroller, PrintSink>| -> Result<(), pinchview::ViewerError> {
        println!("load 640x960 into 320x480");
        viewer.on_container_resize(Size::new(320.0, 480.0))?;
        viewer.on_activate()?;
        viewer.on_image_load(Size::new(640.0, 960.0))?;
        Ok(())
    };
    if let Err(e) = run(&mut viewer) {
        eprintln!("Setup failed: {}", e);
        std::process::exit(1);
    }

    let t0 = Instant::now();
    println!("pinch out around (160, 240)");
    dispatcher.handle(
        TouchEvent::Start {
            id: 1,
            position: Point::new(110.0, 240.0),
            time: t0,
        },
        &mut viewer,
    );
    dispatcher.handle(
        TouchEvent::Start {
            id: 2,
            position: Point::new(210.0, 240.0),
            time: t0,
        },
        &mut viewer,
    );
    for x in [260.0, 310.0] {
        dispatcher.handle(
            TouchEvent::Move {
                id: 2,
                position: Point::new(x, 240.0),
            },
            &mut viewer,
        );
    }
    dispatcher.handle(TouchEvent::End { id: 1, time: t0 }, &mut viewer);
    dispatcher.handle(TouchEvent::End { id: 2, time: t0 }, &mut viewer);

    println!("zoom in three steps");
    for _ in 0..3 {
        viewer.zoom_in();
    }
    viewer.tick_at(Instant::now() + delay + Duration::from_millis(1));

    println!("double tap (zoom back out)");
    viewer.on_double_tap(Point::new(100.0, 100.0));

    println!("resize to 480x800");
    if let Err(e) = viewer.on_container_resize(Size::new(480.0, 800.0)) {
        eprintln!("Resize failed: {}", e);
    }

    let state = viewer.transform();
    println!(
        "final: scale {:.4}, translate ({:.2}, {:.2})",
        state.scale, state.translate.x, state.translate.y
    );
}

// No replay on wasm; hosts drive the library directly
#[cfg(target_arch = "wasm32")]
fn main() {}
