//! Application entry point for the walker tree viewer.
//!
//! This binary sets up logging and eframe/egui and delegates all
//! interactive logic and rendering to [`Viewer`] from the `viewer`
//! module.

mod canvas;
mod settings;
mod viewer;

use settings::{SIDE_PANEL_WIDTH, Settings};
use viewer::Viewer;

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .init();
    }

    std::panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::capture();
        tracing::error!(%info, ?backtrace, "panic");
    }));
}

/// Starts the native eframe application.
///
/// The window is sized so the canvas fits at 1:1 next to the config
/// panel. All UI state and rendering are handled by [`Viewer`].
///
/// ### Returns
/// - `Ok(())` if the application runs to completion without errors.
/// - `Err` if the viewer cannot be built or eframe fails to create the
///   native window or event loop.
fn main() -> eframe::Result<()> {
    init_tracing();

    let settings = Settings::from_env();
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([
                settings.canvas_width as f32 + SIDE_PANEL_WIDTH + 40.0,
                settings.canvas_height as f32 + 90.0,
            ])
            .with_resizable(false),
        ..Default::default()
    };

    let viewer = match Viewer::new(settings) {
        Ok(viewer) => viewer,
        Err(e) => {
            tracing::error!(error = %e, "cannot start viewer");
            return Err(eframe::Error::AppCreation(Box::new(e)));
        }
    };

    eframe::run_native(
        "Walker Tree",
        options,
        Box::new(|_cc| Ok(Box::new(viewer))),
    )
}
