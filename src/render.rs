use crate::camera::Camera;
use crate::constants::{
    AMBIENT_INTENSITY, BACKGROUND_COLOR, DIRECTIONAL_LIGHTS, SHININESS, SPECULAR_COLOR,
};
use crate::field::{color_from_hex, PyramidField, PYRAMID_VERTEX_COUNT};
use glam::Vec3;
use web_sys as web;
use wgpu::util::DeviceExt;

mod helpers;
mod mesh;
mod targets;
use mesh::SceneVertex;
use targets::RenderTargets;

pub static PYRAMIDS_WGSL: &str = include_str!("../shaders/pyramids.wgsl");

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct SceneUniforms {
    view_proj: [[f32; 4]; 4],
    eye: [f32; 4],
    // rgb = ambient light, w = shininess
    ambient: [f32; 4],
    specular: [f32; 4],
    // xyz = direction toward the light, w = intensity
    lights: [[f32; 4]; 3],
}

impl SceneUniforms {
    fn new(camera: &Camera) -> Self {
        let spec = helpers::srgb_to_linear(color_from_hex(SPECULAR_COLOR));
        let lights = DIRECTIONAL_LIGHTS.map(|(pos, intensity)| {
            let d = Vec3::from_array(pos).normalize();
            [d.x, d.y, d.z, intensity]
        });
        Self {
            view_proj: camera.view_projection().to_cols_array_2d(),
            eye: camera.eye.extend(1.0).to_array(),
            ambient: [
                AMBIENT_INTENSITY,
                AMBIENT_INTENSITY,
                AMBIENT_INTENSITY,
                SHININESS,
            ],
            specular: [spec.x, spec.y, spec.z, 0.0],
            lights,
        }
    }
}

pub struct GpuState {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    targets: RenderTargets,

    pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,

    ground_vertices: wgpu::Buffer,
    ground_indices: wgpu::Buffer,
    pyramid_vertices: wgpu::Buffer,
    pyramid_indices: wgpu::Buffer,
    pyramid_index_count: u32,
    scratch: Vec<SceneVertex>,

    width: u32,
    height: u32,
    clear_color: wgpu::Color,
}

impl GpuState {
    pub async fn new(canvas: &web::HtmlCanvasElement, pyramid_count: usize) -> anyhow::Result<Self> {
        let width = canvas.width().max(1);
        let height = canvas.height().max(1);

        // Only keeps the WebGPU backend when an adapter is really available,
        // so browsers exposing `navigator.gpu` without one still get WebGL2.
        let instance =
            wgpu::util::new_instance_with_webgpu_detection(&wgpu::InstanceDescriptor::default())
                .await;
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU/WebGL adapter"))?;
        log::info!("[gpu] adapter backend {:?}", adapter.get_info().backend);
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    // WebGL2 caps are the lowest common denominator
                    required_limits: wgpu::Limits::downlevel_webgl2_defaults()
                        .using_resolution(adapter.limits()),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;
        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8UnormSrgb | wgpu::TextureFormat::Rgba8UnormSrgb
                )
            })
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("pyramids_shader"),
            source: wgpu::ShaderSource::Wgsl(PYRAMIDS_WGSL.into()),
        });
        let bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("scene_bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });
        let pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("scene_pl"),
            bind_group_layouts: &[&bgl],
            push_constant_ranges: &[],
        });
        let pipeline =
            helpers::make_scene_pipeline(&device, &pl, &shader, SceneVertex::layout(), format);
        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("scene_uniforms"),
            size: std::mem::size_of::<SceneUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("scene_bg"),
            layout: &bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let (ground_v, ground_i) = mesh::ground_quad();
        let ground_vertices = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("ground_vertices"),
            contents: bytemuck::cast_slice(&ground_v),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let ground_indices = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("ground_indices"),
            contents: bytemuck::cast_slice(&ground_i),
            usage: wgpu::BufferUsages::INDEX,
        });

        // Vertex data is rewritten every frame; topology never changes.
        let indices = mesh::pyramid_indices(pyramid_count);
        let pyramid_indices = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("pyramid_indices"),
            contents: bytemuck::cast_slice(&indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        let vertex_count = (pyramid_count * PYRAMID_VERTEX_COUNT).max(1);
        let scratch = Vec::with_capacity(vertex_count);
        let pyramid_vertices = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("pyramid_vertices"),
            size: (vertex_count * std::mem::size_of::<SceneVertex>()) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let targets = RenderTargets::new(&device, width, height);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            targets,
            pipeline,
            uniform_buffer,
            bind_group,
            ground_vertices,
            ground_indices,
            pyramid_vertices,
            pyramid_indices,
            pyramid_index_count: indices.len() as u32,
            scratch,
            width,
            height,
            clear_color: helpers::clear_color(color_from_hex(BACKGROUND_COLOR)),
        })
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);
            self.targets.recreate(&self.device, width, height);
        }
    }

    pub fn render(&mut self, field: &PyramidField, camera: &Camera) -> Result<(), wgpu::SurfaceError> {
        mesh::pack_pyramids(field, &mut self.scratch);
        self.queue.write_buffer(
            &self.pyramid_vertices,
            0,
            bytemuck::cast_slice(&self.scratch),
        );
        let uniforms = SceneUniforms::new(camera);
        self.queue
            .write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(&uniforms));

        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.targets.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_pipeline(&self.pipeline);
            rpass.set_bind_group(0, &self.bind_group, &[]);

            rpass.set_vertex_buffer(0, self.ground_vertices.slice(..));
            rpass.set_index_buffer(self.ground_indices.slice(..), wgpu::IndexFormat::Uint32);
            rpass.draw_indexed(0..6, 0, 0..1);

            rpass.set_vertex_buffer(0, self.pyramid_vertices.slice(..));
            rpass.set_index_buffer(self.pyramid_indices.slice(..), wgpu::IndexFormat::Uint32);
            rpass.draw_indexed(0..self.pyramid_index_count, 0, 0..1);
        }
        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}
