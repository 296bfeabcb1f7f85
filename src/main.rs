mod app;

use app::BezierSphereApp;
use bezier_sphere::config::{SceneConfig, WINDOW_SIZE};
use bezier_sphere::curve::CurveClock;

fn main() -> Result<(), eframe::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    tracing::info!("Starting Bezier Sphere App");

    let config = SceneConfig::default();
    let clock = match config.validate().and_then(|()| CurveClock::new(config.dt)) {
        Ok(clock) => clock,
        Err(e) => {
            tracing::error!("Invalid scene configuration: {}", e);
            std::process::exit(1);
        }
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size(WINDOW_SIZE),
        renderer: eframe::Renderer::Wgpu,
        ..Default::default()
    };

    eframe::run_native(
        "Bezier Sphere",
        options,
        Box::new(move |cc| Box::new(BezierSphereApp::new(cc, config, clock))),
    )
}
