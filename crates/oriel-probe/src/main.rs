use oriel_engine::display::DisplaySettings;
use oriel_engine::logging::{LoggingConfig, init_logging};
use oriel_engine::window::{Bootstrap, WindowConfig, WindowStyle};
use winit::dpi::LogicalSize;

fn main() {
    init_logging(LoggingConfig::default());

    let settings = DisplaySettings {
        depth_bits: 24,
        stencil_bits: 8,
        antialiasing: 2,
    };

    let config = WindowConfig {
        title: "OpenGL".to_string(),
        size: LogicalSize::new(800.0, 600.0),
        style: WindowStyle::CLOSE,
    };

    // Failures are logged, not propagated; the probe's exit status is 0
    // either way.
    match Bootstrap::run(config, settings) {
        Ok(granted) => log::info!(
            "granted depth={} stencil={} antialiasing={}",
            granted.depth_bits,
            granted.stencil_bits,
            granted.antialiasing,
        ),
        Err(e) => log::error!("display bootstrap failed: {e:#}"),
    }
}
