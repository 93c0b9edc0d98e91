use std::io::Write;

use log::{LevelFilter, Log, Metadata, Record};

use wireframe::canvas::Canvas;
use wireframe::colors;
use wireframe::config::EditorConfig;
use wireframe::controller::WindowController;
use wireframe::display::{Display, DisplayEvent, FrameLimiter, WINDOW_HEIGHT, WINDOW_WIDTH};
use wireframe::error::GeometryError;
use wireframe::scene::demo_scene;
use wireframe::viewport::Viewport;

struct StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let _ = writeln!(
                std::io::stderr(),
                "[{:<5} {}] {}",
                record.level(),
                record.target(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

static LOGGER: StderrLogger = StderrLogger;

fn init_logging() {
    let level = std::env::var("WIREFRAME_LOG")
        .ok()
        .and_then(|value| value.parse::<LevelFilter>().ok())
        .unwrap_or(LevelFilter::Info);

    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level);
    }
}

fn title(viewport: &Viewport) -> String {
    format!("Wireframe - {} clipping", viewport.clip_method())
}

fn main() -> Result<(), String> {
    init_logging();

    let config = EditorConfig::default();
    let controller = WindowController::new(config);
    let mut viewport = Viewport::new(&config);
    let mut scene = demo_scene(&config).map_err(|e| e.to_string())?;

    let mut display = Display::new(&title(&viewport), WINDOW_WIDTH, WINDOW_HEIGHT)?;
    let mut canvas = Canvas::new(WINDOW_WIDTH, WINDOW_HEIGHT);
    let mut frame_limiter = FrameLimiter::new(&display);

    log::info!("loaded {} shapes", scene.len());

    'running: loop {
        for event in display.poll_events() {
            match event {
                DisplayEvent::Quit => break 'running,
                DisplayEvent::Resize(w, h) => {
                    display.resize(w, h)?;
                    canvas.resize(w, h);
                }
                DisplayEvent::Key(key, fast) => {
                    if controller.handle_key(&mut viewport, key, fast).is_some() {
                        display.set_title(&title(&viewport))?;
                    }
                }
            }
        }

        canvas.clear(colors::BACKGROUND);
        canvas.draw_grid(50, colors::GRID);

        match viewport.render(&mut scene, canvas.width(), canvas.height()) {
            Ok(lines) => canvas.draw_screen_lines(&lines),
            // Already logged; keep the previous camera usable.
            Err(GeometryError::DegenerateCamera { .. }) => {}
            Err(e) => return Err(e.to_string()),
        }

        display.present(canvas.as_bytes())?;
        frame_limiter.wait_and_get_delta(&display);
    }

    Ok(())
}
