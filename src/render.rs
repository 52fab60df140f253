//! The split-viewport Phong pass.
//!
//! [`PhongPass`] draws the selected model twice per frame: into the left half
//! of the window with per-vertex shading and into the right half with
//! per-pixel shading. Both halves share one depth buffer, one pipeline and one
//! lights uniform.
//!
//! Bind groups:
//! - **Group 0**: the three [`LightUniform`]s, written once per frame
//! - **Group 1**: [`DrawUniforms`], one record per (half, shape) pair, selected
//!   with a dynamic offset
//!
//! Meshes live on the GPU for every shape of every model so switching the
//! selection does not re-upload anything.

use glam::Mat4;

use crate::gpu::GpuContext;
use crate::math::mat4_from_rows;
use crate::light::{LIGHT_COUNT, LightUniform, ShadingPath};
use crate::mesh::{GpuMesh, Vertex3d};
use crate::model::PhongMaterial;
use crate::scene::{RenderFrame, SceneState};

const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LightsUniform {
    pub lights: [LightUniform; LIGHT_COUNT],
}

/// Per-draw record. Field order matches `struct Draw` in `shaders/phong.wgsl`.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct DrawUniforms {
    /// `P * V * M` with clip depth moved into wgpu's `[0, 1]` range.
    pub mvp: [[f32; 4]; 4],
    pub view: [[f32; 4]; 4],
    pub model: [[f32; 4]; 4],
    /// Inverse transpose of `view * model`, for normals.
    pub normal_matrix: [[f32; 4]; 4],
    pub ka: [f32; 3],
    pub shininess: f32,
    pub kd: [f32; 3],
    pub light_slot: u32,
    pub ks: [f32; 3],
    pub shading_path: u32,
}

impl DrawUniforms {
    pub fn new(frame: &RenderFrame, material: &PhongMaterial, path: ShadingPath) -> Self {
        let view = Mat4::from_cols_array_2d(&frame.view);
        let model = Mat4::from_cols_array_2d(&frame.model);
        let mvp = gl_to_wgpu_depth() * Mat4::from_cols_array_2d(&frame.mvp);
        Self {
            mvp: mvp.to_cols_array_2d(),
            view: frame.view,
            model: frame.model,
            normal_matrix: normal_matrix(view * model).to_cols_array_2d(),
            ka: material.ka.to_array(),
            shininess: material.shininess,
            kd: material.kd.to_array(),
            light_slot: frame.light_slot.index() as u32,
            ks: material.ks.to_array(),
            shading_path: path as u32,
        }
    }
}

/// Maps OpenGL clip depth `[-w, w]` onto wgpu's `[0, w]`, leaving x, y and w alone.
pub fn gl_to_wgpu_depth() -> Mat4 {
    mat4_from_rows([
        [1.0, 0.0, 0.0, 0.0],
        [0.0, 1.0, 0.0, 0.0],
        [0.0, 0.0, 0.5, 0.5],
        [0.0, 0.0, 0.0, 1.0],
    ])
}

// A collapsed scale makes the matrix singular; keep it as is rather than
// feeding infinities to the shader.
fn normal_matrix(model_view: Mat4) -> Mat4 {
    if model_view.determinant().abs() > f32::EPSILON {
        model_view.inverse().transpose()
    } else {
        model_view
    }
}

/// Rounds `size` up to a multiple of `alignment`.
fn align_to(size: u64, alignment: u64) -> u64 {
    size.div_ceil(alignment) * alignment
}

/// Left and right halves of a `width` x `height` target, as `(x, y, w, h)`.
pub fn split_viewports(width: u32, height: u32) -> [(f32, f32, f32, f32); 2] {
    let half = width as f32 / 2.0;
    let h = height as f32;
    [(0.0, 0.0, half, h), (half, 0.0, half, h)]
}

pub struct PhongPass {
    pipeline: wgpu::RenderPipeline,
    lights_buffer: wgpu::Buffer,
    lights_bind_group: wgpu::BindGroup,
    draw_layout: wgpu::BindGroupLayout,
    draw_buffer: wgpu::Buffer,
    draw_bind_group: wgpu::BindGroup,
    draw_stride: u64,
    draw_capacity: u64,
    depth_view: wgpu::TextureView,
    depth_size: (u32, u32),
    /// `meshes[model][shape]`.
    meshes: Vec<Vec<GpuMesh>>,
    clear_color: wgpu::Color,
}

impl PhongPass {
    pub fn new(gpu: &GpuContext, clear_color: wgpu::Color) -> Self {
        let device = &gpu.device;

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Phong Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/phong.wgsl").into()),
        });

        let lights_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Lights Uniforms"),
            size: std::mem::size_of::<LightsUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let lights_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Lights Bind Group Layout"),
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

        let lights_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Lights Bind Group"),
            layout: &lights_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: lights_buffer.as_entire_binding(),
            }],
        });

        let draw_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Draw Bind Group Layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: true,
                    min_binding_size: wgpu::BufferSize::new(
                        std::mem::size_of::<DrawUniforms>() as u64
                    ),
                },
                count: None,
            }],
        });

        let draw_stride = align_to(
            std::mem::size_of::<DrawUniforms>() as u64,
            device.limits().min_uniform_buffer_offset_alignment as u64,
        );
        // Two halves of a single-shape model to start with.
        let draw_capacity = 2;
        let (draw_buffer, draw_bind_group) =
            Self::create_draw_buffer(device, &draw_layout, draw_stride, draw_capacity);

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Phong Pipeline Layout"),
            bind_group_layouts: &[&lights_layout, &draw_layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Phong Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs"),
                buffers: &[Vertex3d::LAYOUT],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: gpu.config.format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            // No culling: negative scales flip the winding.
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        let depth_view = Self::create_depth_view(gpu);

        Self {
            pipeline,
            lights_buffer,
            lights_bind_group,
            draw_layout,
            draw_buffer,
            draw_bind_group,
            draw_stride,
            draw_capacity,
            depth_view,
            depth_size: (gpu.width(), gpu.height()),
            meshes: Vec::new(),
            clear_color,
        }
    }

    fn create_draw_buffer(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        stride: u64,
        capacity: u64,
    ) -> (wgpu::Buffer, wgpu::BindGroup) {
        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Draw Uniforms"),
            size: stride * capacity,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Draw Bind Group"),
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                    buffer: &buffer,
                    offset: 0,
                    size: wgpu::BufferSize::new(std::mem::size_of::<DrawUniforms>() as u64),
                }),
            }],
        });
        (buffer, bind_group)
    }

    fn create_depth_view(gpu: &GpuContext) -> wgpu::TextureView {
        let texture = gpu.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Depth Texture"),
            size: wgpu::Extent3d {
                width: gpu.width(),
                height: gpu.height(),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        texture.create_view(&wgpu::TextureViewDescriptor::default())
    }

    /// Recreates the depth buffer if the surface size changed.
    pub fn ensure_depth_size(&mut self, gpu: &GpuContext) {
        if self.depth_size != (gpu.width(), gpu.height()) {
            self.depth_view = Self::create_depth_view(gpu);
            self.depth_size = (gpu.width(), gpu.height());
        }
    }

    /// Uploads vertex buffers for every shape of every model in `scene`.
    pub fn upload(&mut self, gpu: &GpuContext, scene: &SceneState) {
        self.meshes = scene
            .models()
            .iter()
            .map(|model| {
                model
                    .shapes
                    .iter()
                    .map(|shape| GpuMesh::new(gpu, &shape.vertices))
                    .collect()
            })
            .collect();
        let max_shapes = self.meshes.iter().map(Vec::len).max().unwrap_or(0) as u64;
        self.reserve_draws(gpu, 2 * max_shapes);
    }

    fn reserve_draws(&mut self, gpu: &GpuContext, count: u64) {
        if count <= self.draw_capacity {
            return;
        }
        let (buffer, bind_group) =
            Self::create_draw_buffer(&gpu.device, &self.draw_layout, self.draw_stride, count);
        self.draw_buffer = buffer;
        self.draw_bind_group = bind_group;
        self.draw_capacity = count;
        log::debug!("draw uniform buffer grown to {count} records");
    }

    /// Draws one frame. Surface errors are returned for the caller to
    /// recover from.
    pub fn render(&mut self, gpu: &GpuContext, frame: &RenderFrame) -> Result<(), wgpu::SurfaceError> {
        self.ensure_depth_size(gpu);

        let shape_count = frame.shapes.len() as u64;
        self.reserve_draws(gpu, 2 * shape_count);

        gpu.queue.write_buffer(
            &self.lights_buffer,
            0,
            bytemuck::bytes_of(&LightsUniform {
                lights: frame.lights,
            }),
        );

        let stride = self.draw_stride as usize;
        let mut records = vec![0u8; stride * 2 * frame.shapes.len()];
        for (half, path) in frame.viewports.iter().enumerate() {
            for (i, shape) in frame.shapes.iter().enumerate() {
                let slot = half * frame.shapes.len() + i;
                let uniforms = DrawUniforms::new(frame, &shape.material, *path);
                let bytes = bytemuck::bytes_of(&uniforms);
                records[slot * stride..slot * stride + bytes.len()].copy_from_slice(bytes);
            }
        }
        if !records.is_empty() {
            gpu.queue.write_buffer(&self.draw_buffer, 0, &records);
        }

        let output = gpu.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Phong Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Phong Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            render_pass.set_pipeline(&self.pipeline);
            render_pass.set_bind_group(0, &self.lights_bind_group, &[]);

            let meshes = self.meshes.get(frame.model_index).map(Vec::as_slice).unwrap_or(&[]);
            for (half, (x, y, w, h)) in split_viewports(gpu.width(), gpu.height()).into_iter().enumerate() {
                render_pass.set_viewport(x, y, w, h, 0.0, 1.0);
                for (i, shape) in frame.shapes.iter().enumerate() {
                    let Some(mesh) = meshes.get(shape.shape_index) else {
                        continue;
                    };
                    let slot = half * frame.shapes.len() + i;
                    let offset = (slot as u64 * self.draw_stride) as u32;
                    render_pass.set_bind_group(1, &self.draw_bind_group, &[offset]);
                    render_pass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
                    render_pass.draw(0..mesh.vertex_count, 0..1);
                }
            }
        }

        gpu.queue.submit(std::iter::once(encoder.finish()));
        output.present();
        Ok(())
    }
}
