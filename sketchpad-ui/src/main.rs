use sketchpad_io::EditorConfig;
use sketchpad_ui::{Editor, SketchpadApp};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Room for the toolbar and status bar around the drawing surface.
const CHROME_HEIGHT: f32 = 64.0;

fn main() -> anyhow::Result<()> {
    let config_path = EditorConfig::default_path();
    let config = EditorConfig::load(&config_path)?;

    // RUST_LOG wins over the configured filter.
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!(
        config = %config_path.display(),
        width = config.canvas_width,
        height = config.canvas_height,
        "Starting Sketchpad"
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Sketchpad")
            .with_inner_size([
                config.canvas_width as f32,
                config.canvas_height as f32 + CHROME_HEIGHT,
            ]),
        ..Default::default()
    };

    let editor = Editor::new(&config);
    eframe::run_native(
        "Sketchpad",
        options,
        Box::new(move |_cc| Ok(Box::new(SketchpadApp::new(editor)))),
    )
    .map_err(|e| anyhow::anyhow!("run sketchpad window: {e}"))?;

    Ok(())
}
