//! wgpu implementation of [`RenderBackend`].

use std::convert::Infallible;
use std::sync::Arc;

use bytemuck::Zeroable;
use terminus_mesh::{MeshBuffers, ProjectionMode};
use tracing::debug;
use wgpu::util::DeviceExt;

use crate::backend::{DrawCall, RenderBackend};
use crate::uniforms::TerminatorUniform;
use crate::variant::ShaderVariantKey;

/// Vertex layout for flat maps: normalized mercator position (vec2).
const PLANAR_VERTEX_LAYOUT: wgpu::VertexBufferLayout<'static> = wgpu::VertexBufferLayout {
    array_stride: 8,
    step_mode: wgpu::VertexStepMode::Vertex,
    attributes: &[wgpu::VertexAttribute {
        offset: 0,
        shader_location: 0,
        format: wgpu::VertexFormat::Float32x2,
    }],
};

/// Vertex layout for the globe: unit-sphere position (vec3).
const SPHERICAL_VERTEX_LAYOUT: wgpu::VertexBufferLayout<'static> = wgpu::VertexBufferLayout {
    array_stride: 12,
    step_mode: wgpu::VertexStepMode::Vertex,
    attributes: &[wgpu::VertexAttribute {
        offset: 0,
        shader_location: 0,
        format: wgpu::VertexFormat::Float32x3,
    }],
};

/// A compiled terminator pipeline.
#[derive(Debug)]
pub struct WgpuProgram {
    pub variant: ShaderVariantKey,
    pub pipeline: wgpu::RenderPipeline,
}

/// Overlay mesh resident on the GPU.
struct GpuMesh {
    source: Arc<MeshBuffers>,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
}

/// Draws the overlay with wgpu.
///
/// [`draw`](RenderBackend::draw) stages uniforms and geometry; the host then
/// calls [`encode`](Self::encode) inside its own render pass.
pub struct WgpuBackend {
    device: wgpu::Device,
    queue: wgpu::Queue,
    target_format: wgpu::TextureFormat,
    bind_group_layout: wgpu::BindGroupLayout,
    pipeline_layout: wgpu::PipelineLayout,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    mesh: Option<GpuMesh>,
    pending: Option<(ShaderVariantKey, wgpu::RenderPipeline)>,
}

impl WgpuBackend {
    pub fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        target_format: wgpu::TextureFormat,
    ) -> Self {
        let uniform_size = std::mem::size_of::<TerminatorUniform>() as u64;

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("terminator-bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: std::num::NonZeroU64::new(uniform_size),
                },
                count: None,
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("terminator-pipeline-layout"),
            bind_group_layouts: &[&bind_group_layout],
            immediate_size: 0,
        });

        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("terminator-uniform"),
            contents: bytemuck::bytes_of(&TerminatorUniform::zeroed()),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("terminator-bg"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        Self {
            device: device.clone(),
            queue: queue.clone(),
            target_format,
            bind_group_layout,
            pipeline_layout,
            uniform_buffer,
            bind_group,
            mesh: None,
            pending: None,
        }
    }

    pub fn target_format(&self) -> wgpu::TextureFormat {
        self.target_format
    }

    pub fn bind_group_layout(&self) -> &wgpu::BindGroupLayout {
        &self.bind_group_layout
    }

    /// Indices staged by the last draw, or 0 if nothing will be drawn.
    pub fn staged_index_count(&self) -> u32 {
        match (&self.pending, &self.mesh) {
            (Some(_), Some(mesh)) => mesh.index_count,
            _ => 0,
        }
    }

    /// Record the staged draw into `pass`. Does nothing if no draw is staged.
    pub fn encode(&self, pass: &mut wgpu::RenderPass<'_>) {
        let (Some((_, pipeline)), Some(mesh)) = (&self.pending, &self.mesh) else {
            return;
        };
        pass.set_pipeline(pipeline);
        pass.set_bind_group(0, &self.bind_group, &[]);
        pass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
        pass.set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        pass.draw_indexed(0..mesh.index_count, 0, 0..1);
    }

    fn upload_mesh(&mut self, source: &Arc<MeshBuffers>) {
        if let Some(mesh) = &self.mesh
            && Arc::ptr_eq(&mesh.source, source)
        {
            return;
        }
        if source.indices.is_empty() || source.vertices.is_empty() {
            self.mesh = None;
            return;
        }

        let vertex_buffer = self.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("terminator-vertices"),
            contents: source.vertex_bytes(),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = self.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("terminator-indices"),
            contents: source.index_bytes(),
            usage: wgpu::BufferUsages::INDEX,
        });
        debug!(
            vertices = source.vertex_count(),
            indices = source.index_count(),
            "Uploaded terminator mesh"
        );

        self.mesh = Some(GpuMesh {
            source: Arc::clone(source),
            vertex_buffer,
            index_buffer,
            index_count: source.index_count(),
        });
    }
}

impl RenderBackend for WgpuBackend {
    type Program = WgpuProgram;
    type Error = Infallible;

    fn compile(
        &mut self,
        variant: ShaderVariantKey,
        source: &str,
    ) -> Result<WgpuProgram, Infallible> {
        let label = format!("terminator-{variant}");
        let shader = self.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(&label),
            source: wgpu::ShaderSource::Wgsl(source.into()),
        });

        let pipeline = self.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(&label),
            layout: Some(&self.pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[vertex_layout(variant.mode)],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                ..Default::default()
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: self.target_format,
                    blend: Some(wgpu::BlendState::PREMULTIPLIED_ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            multiview_mask: None,
            cache: None,
        });

        Ok(WgpuProgram { variant, pipeline })
    }

    fn release(&mut self, program: WgpuProgram) {
        debug!(variant = %program.variant, "Dropping terminator pipeline");
        if matches!(&self.pending, Some((staged, _)) if *staged == program.variant) {
            self.pending = None;
            self.mesh = None;
        }
    }

    fn draw(&mut self, program: &WgpuProgram, call: &DrawCall) -> Result<(), Infallible> {
        self.queue
            .write_buffer(&self.uniform_buffer, 0, bytemuck::cast_slice(&[call.uniform]));
        self.upload_mesh(&call.mesh);
        self.pending = Some((program.variant, program.pipeline.clone()));
        Ok(())
    }
}

fn vertex_layout(mode: ProjectionMode) -> wgpu::VertexBufferLayout<'static> {
    match mode {
        ProjectionMode::Flat => PLANAR_VERTEX_LAYOUT,
        ProjectionMode::Globe => SPHERICAL_VERTEX_LAYOUT,
    }
}
