//! WebGPU point-sprite pipeline
//!
//! WebGPU has no adjustable point size, so every point is expanded into a
//! small screen-space quad on the CPU and the whole frame is drawn as one
//! triangle list.

use glam::Vec2;
use wgpu::util::DeviceExt;

use super::Renderer;
use super::vertex::{PointVertex, colors};
use crate::consts::POINT_SIZE_PX;

/// Accumulates the quads for one frame
#[derive(Debug, Clone)]
pub struct QuadBatch {
    /// Half the quad size in clip-space units
    half_extent: Vec2,
    vertices: Vec<PointVertex>,
}

impl QuadBatch {
    pub fn new(half_extent: Vec2) -> Self {
        Self {
            half_extent,
            vertices: Vec::new(),
        }
    }

    /// Batch sized so each point covers `POINT_SIZE_PX` on a `width`×`height` surface
    pub fn for_surface(width: u32, height: u32) -> Self {
        Self::new(Self::half_extent_for(width, height))
    }

    fn half_extent_for(width: u32, height: u32) -> Vec2 {
        // Clip space spans 2 units, so half a point is px / size
        Vec2::new(
            POINT_SIZE_PX / width.max(1) as f32,
            POINT_SIZE_PX / height.max(1) as f32,
        )
    }

    pub fn set_surface_size(&mut self, width: u32, height: u32) {
        self.half_extent = Self::half_extent_for(width, height);
    }

    pub fn vertices(&self) -> &[PointVertex] {
        &self.vertices
    }

    /// Number of points drawn so far this frame
    pub fn point_count(&self) -> usize {
        self.vertices.len() / 6
    }

    pub fn clear(&mut self) {
        self.vertices.clear();
    }

    fn push_quad(&mut self, center: Vec2, color: [f32; 3]) {
        let lo = center - self.half_extent;
        let hi = center + self.half_extent;

        // Two triangles
        self.vertices.push(PointVertex::new(lo.x, lo.y, color));
        self.vertices.push(PointVertex::new(hi.x, lo.y, color));
        self.vertices.push(PointVertex::new(hi.x, hi.y, color));

        self.vertices.push(PointVertex::new(lo.x, lo.y, color));
        self.vertices.push(PointVertex::new(hi.x, hi.y, color));
        self.vertices.push(PointVertex::new(lo.x, hi.y, color));
    }
}

impl Renderer for QuadBatch {
    fn draw_points(&mut self, positions: &[[f32; 2]], colors: &[[f32; 3]], offset: Vec2) {
        self.vertices.reserve(positions.len().min(colors.len()) * 6);
        for (p, c) in positions.iter().zip(colors) {
            self.push_quad(Vec2::from(*p) + offset, *c);
        }
    }
}

/// Main render state
pub struct PointRenderState {
    pub surface: wgpu::Surface<'static>,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    pub pipeline: wgpu::RenderPipeline,
    pub batch: QuadBatch,
    /// Viewport size in pixels
    pub size: (u32, u32),
}

impl PointRenderState {
    pub async fn new(
        surface: wgpu::Surface<'static>,
        adapter: &wgpu::Adapter,
        width: u32,
        height: u32,
    ) -> Result<Self, wgpu::RequestDeviceError> {
        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("jetpack-dash-device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::downlevel_webgl2_defaults(),
                memory_hints: Default::default(),
                trace: Default::default(),
                experimental_features: Default::default(),
            })
            .await?;

        let surface_caps = surface.get_capabilities(adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .copied()
            .unwrap_or(surface_caps.formats[0]);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width,
            height,
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("points_shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("points.wgsl").into()),
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("points_pipeline_layout"),
            bind_group_layouts: &[],
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("points_pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[PointVertex::desc()],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: config.format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        Ok(Self {
            surface,
            device,
            queue,
            config,
            pipeline,
            batch: QuadBatch::for_surface(width, height),
            size: (width, height),
        })
    }

    pub fn resize(&mut self, new_width: u32, new_height: u32) {
        if new_width > 0 && new_height > 0 {
            self.size = (new_width, new_height);
            self.config.width = new_width;
            self.config.height = new_height;
            self.surface.configure(&self.device, &self.config);
            self.batch.set_surface_size(new_width, new_height);
        }
    }

    /// Upload everything drawn since the last present and show it
    pub fn present(&mut self) -> Result<(), wgpu::SurfaceError> {
        let vertex_count = self.batch.vertices().len() as u32;
        // A zero-sized buffer is invalid, so an empty frame still clears
        let vertex_buffer = (vertex_count > 0).then(|| {
            self.device
                .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some("points_vertex_buffer"),
                    contents: bytemuck::cast_slice(self.batch.vertices()),
                    usage: wgpu::BufferUsages::VERTEX,
                })
        });
        self.batch.clear();

        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("points_encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("points_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(colors::BACKGROUND),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            if let Some(buffer) = &vertex_buffer {
                render_pass.set_pipeline(&self.pipeline);
                render_pass.set_vertex_buffer(0, buffer.slice(..));
                render_pass.draw(0..vertex_count, 0..1);
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}

impl Renderer for PointRenderState {
    fn draw_points(&mut self, positions: &[[f32; 2]], colors: &[[f32; 3]], offset: Vec2) {
        self.batch.draw_points(positions, colors, offset);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_draw_is_noop() {
        let mut batch = QuadBatch::new(Vec2::splat(0.01));
        batch.draw_points(&[], &[], Vec2::new(0.5, 0.5));
        assert!(batch.vertices().is_empty());
    }

    #[test]
    fn test_points_become_offset_quads() {
        let mut batch = QuadBatch::new(Vec2::splat(0.01));
        batch.draw_points(&[[0.1, 0.2]], &[[1.0, 0.0, 0.0]], Vec2::new(0.5, -0.5));
        assert_eq!(batch.point_count(), 1);

        let v = batch.vertices();
        let xs: Vec<f32> = v.iter().map(|v| v.position[0]).collect();
        let ys: Vec<f32> = v.iter().map(|v| v.position[1]).collect();
        let cx = (xs.iter().cloned().fold(f32::MAX, f32::min) + xs.iter().cloned().fold(f32::MIN, f32::max)) / 2.0;
        let cy = (ys.iter().cloned().fold(f32::MAX, f32::min) + ys.iter().cloned().fold(f32::MIN, f32::max)) / 2.0;
        assert!((cx - 0.6).abs() < 1e-6);
        assert!((cy - -0.3).abs() < 1e-6);
        assert!(v.iter().all(|v| v.color == [1.0, 0.0, 0.0]));
    }

    #[test]
    fn test_mismatched_lengths_draw_shortest() {
        let mut batch = QuadBatch::new(Vec2::splat(0.01));
        batch.draw_points(&[[0.0, 0.0], [0.1, 0.1]], &[[1.0, 1.0, 1.0]], Vec2::ZERO);
        assert_eq!(batch.point_count(), 1);
    }

    #[test]
    fn test_quad_size_follows_surface() {
        let mut batch = QuadBatch::for_surface(800, 400);
        batch.draw_points(&[[0.0, 0.0]], &[[1.0, 1.0, 1.0]], Vec2::ZERO);
        let v = batch.vertices();
        assert!((v[2].position[0] - v[0].position[0] - 2.0 * POINT_SIZE_PX / 800.0).abs() < 1e-6);
        assert!((v[2].position[1] - v[0].position[1] - 2.0 * POINT_SIZE_PX / 400.0).abs() < 1e-6);

        batch.clear();
        assert_eq!(batch.point_count(), 0);
    }
}
