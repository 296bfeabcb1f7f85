use bezier_sphere::config::{SceneConfig, FOV_RANGE_DEGREES};
use bezier_sphere::curve::{CubicBezier, CurveClock, CurveSample};
use bezier_sphere::geometry::SphereMesh;
use bezier_sphere::visualization::renderer::{
    FrameUniforms, SceneWgpuPrimitive, WgpuSceneRenderer,
};
use eframe::{egui, egui_wgpu::CallbackTrait, App, Frame};
use glam::Vec3;
use parking_lot::Mutex;
use std::sync::Arc;
use type_map::concurrent::TypeMap;

struct Custom3DPaintCallback {
    primitive: Arc<SceneWgpuPrimitive>,
    frame: FrameUniforms,
    queue: Arc<wgpu::Queue>,
}

impl CallbackTrait for Custom3DPaintCallback {
    fn paint<'a>(
        &'a self,
        _info: egui::PaintCallbackInfo,
        render_pass: &mut wgpu::RenderPass<'a>,
        _resources: &'a TypeMap,
    ) {
        WgpuSceneRenderer::paint_primitive(&self.primitive, &self.frame, render_pass, &self.queue);
    }
}

/// Counts shown in the Info section, kept after the mesh moves into the renderer.
#[derive(Debug, Clone, Copy)]
struct MeshStats {
    vertices: usize,
    triangles: usize,
}

pub struct BezierSphereApp {
    config: SceneConfig,
    curve: CubicBezier,
    clock: CurveClock,
    mesh_stats: Option<MeshStats>,
    sphere_renderer: Option<Arc<Mutex<WgpuSceneRenderer>>>,
    wgpu_queue: Option<Arc<wgpu::Queue>>,
    setup_error: Option<String>,
    viewport_size: egui::Vec2,
}

impl BezierSphereApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: SceneConfig, clock: CurveClock) -> Self {
        let curve = CubicBezier::new(config.control_points);

        let mut app = Self {
            curve,
            clock,
            mesh_stats: None,
            sphere_renderer: None,
            wgpu_queue: None,
            setup_error: None,
            viewport_size: egui::Vec2::ZERO,
            config,
        };

        let mesh = match SphereMesh::generate(
            app.config.radius,
            app.config.stack_count,
            app.config.sector_count,
        ) {
            Ok(mesh) => mesh,
            Err(e) => {
                tracing::error!("Failed to generate sphere mesh: {}", e);
                app.setup_error = Some(e.to_string());
                return app;
            }
        };
        app.mesh_stats = Some(MeshStats {
            vertices: mesh.vertex_count(),
            triangles: mesh.triangle_count(),
        });

        let curve_points = app.curve.polyline(app.config.curve_segments);
        let mut local_renderer =
            WgpuSceneRenderer::new(mesh, curve_points, app.config.camera_position);

        if let Some(wgpu_render_state) = &cc.wgpu_render_state {
            let device_arc = wgpu_render_state.device.clone();
            let target_format = wgpu_render_state.target_format;
            if let Err(e) = local_renderer.prepare(&device_arc, target_format) {
                tracing::error!("Failed to prepare WGPU scene renderer: {}", e);
                app.setup_error = Some(e.to_string());
            } else {
                app.wgpu_queue = Some(wgpu_render_state.queue.clone());
            }
        } else {
            tracing::warn!("WGPU render state not available at creation.");
        }
        app.sphere_renderer = Some(Arc::new(Mutex::new(local_renderer)));

        app
    }

    fn parameters_panel(&mut self, ui: &mut egui::Ui, dt: f32, sample: &CurveSample) {
        let fps = if dt > 0.0 { 1.0 / dt } else { 0.0 };
        ui.label(format!("FPS: {:.0}", fps));

        egui::CollapsingHeader::new("Info").show(ui, |ui| {
            ui.label(format!(
                "Viewport Dimensions: {:.0} x {:.0}",
                self.viewport_size.x, self.viewport_size.y
            ));
            match self.mesh_stats {
                Some(stats) => {
                    ui.label(format!("Vertices: {}", stats.vertices));
                    ui.label(format!("Triangles: {}", stats.triangles));
                }
                None => {
                    ui.label("Mesh: N/A");
                }
            }
        });

        egui::CollapsingHeader::new("Timers").show(ui, |ui| {
            ui.label(format!("Frame Time: {:.3} ms", dt * 1000.0));
        });

        egui::CollapsingHeader::new("Camera").show(ui, |ui| {
            let eye = self.config.camera_position;
            ui.label(format!(
                "Camera Position: x: {:.2}, y: {:.2}, z: {:.2}",
                eye.x, eye.y, eye.z
            ));
            ui.add(
                egui::Slider::new(&mut self.config.fov_degrees, FOV_RANGE_DEGREES)
                    .text("Field of View")
                    .clamp_to_range(true),
            );
        });

        egui::CollapsingHeader::new("Sphere").show(ui, |ui| {
            ui.label(format!("Radius: {:.2}", self.config.radius));
            ui.horizontal(|ui| {
                ui.label("Color");
                ui.color_edit_button_rgba_unmultiplied(&mut self.config.sphere_color);
            });
        });

        egui::CollapsingHeader::new("Bezier Curve").show(ui, |ui| {
            ui.label(format!("t: {:.3}", sample.t));
            ui.label(format_vec("Position", sample.position));
            ui.label(format_vec("Velocity", sample.velocity));
            ui.label(format_vec("Acceleration", sample.acceleration));
        });
    }

    fn paint_viewport(&mut self, ui: &mut egui::Ui, sample: &CurveSample) {
        let desired_size = ui.available_size_before_wrap();
        let (rect, _response) = ui.allocate_exact_size(desired_size, egui::Sense::hover());
        self.viewport_size = rect.size();

        let prepared = self.sphere_renderer.as_ref().and_then(|renderer| {
            let renderer_guard = renderer.lock();
            let primitive = renderer_guard.get_primitive_arc()?;
            let aspect_ratio = rect.width() / rect.height().max(1.0);
            let frame = FrameUniforms {
                sphere_mvp: renderer_guard.calculate_mvp(
                    aspect_ratio,
                    self.config.fov_degrees,
                    sample.position,
                ),
                curve_mvp: renderer_guard.view_projection(aspect_ratio, self.config.fov_degrees),
                sphere_color: self.config.sphere_color,
            };
            Some((primitive, frame))
        });

        match (prepared, &self.wgpu_queue) {
            (Some((primitive, frame)), Some(queue_arc)) => {
                let cb = eframe::egui_wgpu::Callback::new_paint_callback(
                    rect,
                    Custom3DPaintCallback {
                        primitive,
                        frame,
                        queue: queue_arc.clone(),
                    },
                );
                ui.painter().add(cb);
            }
            _ => {
                let message = match &self.setup_error {
                    Some(err) => format!("Renderer N/A: {}", err),
                    None => "Renderer N/A".to_string(),
                };
                ui.painter()
                    .rect_filled(rect, 0.0, egui::Color32::DARK_GRAY);
                ui.painter().text(
                    rect.center(),
                    egui::Align2::CENTER_CENTER,
                    message,
                    egui::FontId::default(),
                    egui::Color32::WHITE,
                );
            }
        }
    }
}

fn format_vec(label: &str, v: Vec3) -> String {
    format!("{}: x: {:.2}, y: {:.2}, z: {:.2}", label, v.x, v.y, v.z)
}

impl App for BezierSphereApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        let sample = self.curve.sample(self.clock.t());
        let dt = ctx.input(|i| i.unstable_dt);

        egui::SidePanel::left("parameters")
            .resizable(true)
            .default_width(320.0)
            .show(ctx, |ui| {
                ui.heading("Parameters");
                ui.separator();
                self.parameters_panel(ui, dt, &sample);
            });

        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(egui::Color32::from_gray(64)))
            .show(ctx, |ui| {
                self.paint_viewport(ui, &sample);
            });

        self.clock.advance();
        ctx.request_repaint();
    }
}
