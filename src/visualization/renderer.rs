use anyhow::{ensure, Result};
use glam::{Mat4, Vec3};
use std::sync::Arc;
use wgpu::util::DeviceExt;

use crate::geometry::SphereMesh;

const SHADERS_WGSL: &str = r#"
struct VertexInput {
    @location(0) position: vec3<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
};

struct DrawUniforms {
    mvp: mat4x4<f32>,
    color: vec4<f32>,
};

@group(0) @binding(0)
var<uniform> uniforms: DrawUniforms;

@vertex
fn vs_main(model: VertexInput) -> VertexOutput {
    var out: VertexOutput;
    out.clip_position = uniforms.mvp * vec4<f32>(model.position, 1.0);
    return out;
}

@fragment
fn fs_main() -> @location(0) vec4<f32> {
    return uniforms.color;
}
"#;

const CURVE_COLOR: [f32; 4] = [0.9, 0.9, 0.9, 1.0];

#[repr(C)]
#[derive(Debug, Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
struct DrawUniforms {
    mvp: [[f32; 4]; 4],
    color: [f32; 4],
}

impl DrawUniforms {
    fn new(mvp: &Mat4, color: [f32; 4]) -> Self {
        Self {
            mvp: mvp.to_cols_array_2d(),
            color,
        }
    }
}

/// One uniform block plus the bind group that exposes it to the shader.
struct UniformSlot {
    buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

impl UniformSlot {
    fn new(device: &wgpu::Device, layout: &wgpu::BindGroupLayout, label: &str) -> Self {
        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(&[DrawUniforms::new(&Mat4::IDENTITY, [1.0; 4])]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(label),
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
        });
        Self { buffer, bind_group }
    }
}

/// GPU resources for the sphere mesh and the curve it travels along.
pub struct SceneWgpuPrimitive {
    sphere_vertex_buffer: wgpu::Buffer,
    sphere_index_buffer: wgpu::Buffer,
    num_sphere_indices: u32,
    sphere_uniforms: UniformSlot,
    sphere_pipeline: wgpu::RenderPipeline,
    curve_vertex_buffer: wgpu::Buffer,
    num_curve_vertices: u32,
    curve_uniforms: UniformSlot,
    curve_pipeline: wgpu::RenderPipeline,
}

/// Per-frame inputs for [`WgpuSceneRenderer::paint_primitive`].
#[derive(Debug, Clone, Copy)]
pub struct FrameUniforms {
    pub sphere_mvp: Mat4,
    pub curve_mvp: Mat4,
    pub sphere_color: [f32; 4],
}

pub struct WgpuSceneRenderer {
    primitive: Option<Arc<SceneWgpuPrimitive>>,
    mesh: SphereMesh,
    curve_points: Vec<[f32; 3]>,
    pub camera_position: Vec3,
}

impl WgpuSceneRenderer {
    pub fn new(mesh: SphereMesh, curve_points: Vec<[f32; 3]>, camera_position: Vec3) -> Self {
        Self {
            primitive: None,
            mesh,
            curve_points,
            camera_position,
        }
    }

    pub fn prepare(
        &mut self,
        device: &Arc<wgpu::Device>,
        target_format: wgpu::TextureFormat,
    ) -> Result<()> {
        if self.primitive.is_some() {
            return Ok(());
        }
        ensure!(
            !self.mesh.indices.is_empty(),
            "sphere mesh has no triangles to draw"
        );
        ensure!(
            self.curve_points.len() >= 2,
            "curve polyline needs at least two points"
        );

        tracing::info!("Preparing WgpuSceneRenderer resources...");

        let shader_module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Scene Shader"),
            source: wgpu::ShaderSource::Wgsl(SHADERS_WGSL.into()),
        });

        let sphere_vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Sphere Vertex Buffer"),
            contents: bytemuck::cast_slice(&self.mesh.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let sphere_index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Sphere Index Buffer"),
            contents: bytemuck::cast_slice(&self.mesh.indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        let num_sphere_indices = u32::try_from(self.mesh.index_count())?;

        let curve_vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Curve Vertex Buffer"),
            contents: bytemuck::cast_slice(&self.curve_points),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let num_curve_vertices = u32::try_from(self.curve_points.len())?;

        let uniform_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Scene Uniform Bind Group Layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
            });
        let sphere_uniforms = UniformSlot::new(
            device,
            &uniform_bind_group_layout,
            "Sphere Uniform Buffer",
        );
        let curve_uniforms =
            UniformSlot::new(device, &uniform_bind_group_layout, "Curve Uniform Buffer");

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Scene Render Pipeline Layout"),
            bind_group_layouts: &[&uniform_bind_group_layout],
            push_constant_ranges: &[],
        });
        let build_pipeline = |label: &str, topology: wgpu::PrimitiveTopology| {
            device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some(label),
                layout: Some(&pipeline_layout),
                vertex: wgpu::VertexState {
                    module: &shader_module,
                    entry_point: "vs_main",
                    buffers: &[wgpu::VertexBufferLayout {
                        array_stride: std::mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                        step_mode: wgpu::VertexStepMode::Vertex,
                        attributes: &wgpu::vertex_attr_array![0 => Float32x3],
                    }],
                },
                fragment: Some(wgpu::FragmentState {
                    module: &shader_module,
                    entry_point: "fs_main",
                    targets: &[Some(wgpu::ColorTargetState {
                        format: target_format,
                        blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                }),
                primitive: wgpu::PrimitiveState {
                    topology,
                    strip_index_format: None,
                    front_face: wgpu::FrontFace::Ccw,
                    cull_mode: None,
                    polygon_mode: wgpu::PolygonMode::Fill,
                    unclipped_depth: false,
                    conservative: false,
                },
                // egui's paint callback pass has no depth attachment
                depth_stencil: None,
                multisample: wgpu::MultisampleState {
                    count: 1,
                    mask: !0,
                    alpha_to_coverage_enabled: false,
                },
                multiview: None,
            })
        };
        let sphere_pipeline =
            build_pipeline("Sphere Render Pipeline", wgpu::PrimitiveTopology::TriangleList);
        let curve_pipeline =
            build_pipeline("Curve Render Pipeline", wgpu::PrimitiveTopology::LineStrip);

        self.primitive = Some(Arc::new(SceneWgpuPrimitive {
            sphere_vertex_buffer,
            sphere_index_buffer,
            num_sphere_indices,
            sphere_uniforms,
            sphere_pipeline,
            curve_vertex_buffer,
            num_curve_vertices,
            curve_uniforms,
            curve_pipeline,
        }));

        tracing::info!(
            "WgpuSceneRenderer resources prepared: {} sphere indices, {} curve vertices",
            num_sphere_indices,
            num_curve_vertices
        );

        Ok(())
    }

    /// Camera-only transform (no model translation).
    pub fn view_projection(&self, aspect_ratio: f32, fov_degrees: f32) -> Mat4 {
        let view = Mat4::look_at_rh(self.camera_position, Vec3::ZERO, Vec3::Y);
        let proj = Mat4::perspective_rh_gl(fov_degrees.to_radians(), aspect_ratio, 0.1, 100.0);

        proj * view
    }

    pub fn calculate_mvp(&self, aspect_ratio: f32, fov_degrees: f32, translation: Vec3) -> Mat4 {
        self.view_projection(aspect_ratio, fov_degrees) * Mat4::from_translation(translation)
    }

    pub fn get_primitive_arc(&self) -> Option<Arc<SceneWgpuPrimitive>> {
        self.primitive.clone()
    }

    pub fn paint_primitive<'rp_lifetime>(
        primitive: &'rp_lifetime SceneWgpuPrimitive,
        frame: &FrameUniforms,
        rpass: &mut wgpu::RenderPass<'rp_lifetime>,
        queue: &Arc<wgpu::Queue>,
    ) {
        queue.write_buffer(
            &primitive.sphere_uniforms.buffer,
            0,
            bytemuck::cast_slice(&[DrawUniforms::new(&frame.sphere_mvp, frame.sphere_color)]),
        );
        queue.write_buffer(
            &primitive.curve_uniforms.buffer,
            0,
            bytemuck::cast_slice(&[DrawUniforms::new(&frame.curve_mvp, CURVE_COLOR)]),
        );

        rpass.set_pipeline(&primitive.curve_pipeline);
        rpass.set_bind_group(0, &primitive.curve_uniforms.bind_group, &[]);
        rpass.set_vertex_buffer(0, primitive.curve_vertex_buffer.slice(..));
        rpass.draw(0..primitive.num_curve_vertices, 0..1);

        rpass.set_pipeline(&primitive.sphere_pipeline);
        rpass.set_bind_group(0, &primitive.sphere_uniforms.bind_group, &[]);
        rpass.set_vertex_buffer(0, primitive.sphere_vertex_buffer.slice(..));
        rpass.set_index_buffer(
            primitive.sphere_index_buffer.slice(..),
            wgpu::IndexFormat::Uint32,
        );
        rpass.draw_indexed(0..primitive.num_sphere_indices, 0, 0..1);
    }
}
