//! Main renderer orchestrating everything

use std::sync::Arc;

use anyhow::Result;
use glam::Vec3;
use wgpu::util::DeviceExt;
use winit::window::Window;

use orrery_sim::{BodySystem, TimeController};

use crate::camera::{CameraUniform, FreeCamera};
use crate::config::{RenderConfig, PLANET_TINT, SUN_TINT};
use crate::gpu_types::{InstanceRaw, LightUniform};
use crate::mesh::{MeshData, SphereOptions};
use crate::overlay::OrbitOverlay;
use crate::pipeline::{create_depth_texture, BodyPipeline, OrbitPipeline};
use crate::texture::{GpuTexture, TextureImage};

const CLEAR_COLOR: wgpu::Color = wgpu::Color {
    r: 0.1,
    g: 0.1,
    b: 0.1,
    a: 1.0,
};

pub struct Renderer {
    // WGPU state
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,

    body_pipeline: BodyPipeline,
    orbit_pipeline: OrbitPipeline,
    #[allow(dead_code)]
    depth_texture: wgpu::Texture,
    depth_view: wgpu::TextureView,

    // Buffers
    camera_buffer: wgpu::Buffer,
    light_buffer: wgpu::Buffer,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
    instance_buffer: wgpu::Buffer,
    instance_count: u32,

    scene_bind_group: wgpu::BindGroup,
    orbit_bind_group: wgpu::BindGroup,
    sun_bind_group: wgpu::BindGroup,
    planet_bind_group: wgpu::BindGroup,

    overlay: OrbitOverlay,

    // State
    pub camera: FreeCamera,
    pub system: BodySystem,
    pub time_controller: TimeController,
}

impl Renderer {
    pub async fn new(window: Arc<Window>, options: &RenderConfig) -> Result<Self> {
        let size = window.inner_size();

        let system = options.scene.build_system();
        tracing::info!("Scene: {} bodies", system.body_count());

        // WGPU setup
        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });

        let surface = instance.create_surface(Arc::clone(&window))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No GPU adapter found"))?;

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("Orrery Device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: Default::default(),
                },
                None,
            )
            .await?;

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .copied()
            .or_else(|| surface_caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("Surface reports no supported formats"))?;

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: surface_caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        tracing::info!("Configuring surface: {}x{}", config.width, config.height);
        surface.configure(&device, &config);

        let body_pipeline = BodyPipeline::new(&device, surface_format);
        let orbit_pipeline = OrbitPipeline::new(&device, surface_format);
        let (depth_texture, depth_view) = create_depth_texture(&device, config.width, config.height);

        // Mesh shared by every body
        let mesh = match &options.mesh {
            Some(path) => MeshData::load_or_fallback(path),
            None => MeshData::uv_sphere(SphereOptions::default()),
        };
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Body Vertex Buffer"),
            contents: bytemuck::cast_slice(&mesh.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Body Index Buffer"),
            contents: bytemuck::cast_slice(&mesh.indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        // Instances are rewritten every frame; body count never changes
        let instances = InstanceRaw::from_transforms(&system.collect_transforms());
        let instance_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Body Instance Buffer"),
            contents: bytemuck::cast_slice(&instances),
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        });

        let camera = FreeCamera::default();
        let aspect = config.width as f32 / config.height as f32;
        let camera_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Camera Buffer"),
            contents: bytemuck::bytes_of(&CameraUniform::from_camera(&camera, aspect)),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let light_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Light Buffer"),
            contents: bytemuck::bytes_of(&LightUniform::at(light_position(&system))),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let scene_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Body Scene Bind Group"),
            layout: &body_pipeline.scene_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: camera_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: light_buffer.as_entire_binding(),
                },
            ],
        });
        let orbit_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Orbit Camera Bind Group"),
            layout: &orbit_pipeline.camera_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: camera_buffer.as_entire_binding(),
            }],
        });

        // Textures
        let sun_image = TextureImage::load_or_fallback(options.sun_texture.as_deref(), SUN_TINT);
        let planet_image =
            TextureImage::load_or_fallback(options.planet_texture.as_deref(), PLANET_TINT);
        let sun_texture = GpuTexture::from_image(&device, &queue, &sun_image, "Sun Texture");
        let planet_texture =
            GpuTexture::from_image(&device, &queue, &planet_image, "Planet Texture");
        let sun_bind_group =
            body_pipeline.texture_bind_group(&device, &sun_texture, "Sun Texture Bind Group");
        let planet_bind_group =
            body_pipeline.texture_bind_group(&device, &planet_texture, "Planet Texture Bind Group");

        let overlay = OrbitOverlay::new(&device, &system, options.show_orbits);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            body_pipeline,
            orbit_pipeline,
            depth_texture,
            depth_view,
            camera_buffer,
            light_buffer,
            vertex_buffer,
            index_buffer,
            index_count: mesh.index_count(),
            instance_buffer,
            instance_count: instances.len() as u32,
            scene_bind_group,
            orbit_bind_group,
            sun_bind_group,
            planet_bind_group,
            overlay,
            camera,
            system,
            time_controller: TimeController::with_rate(options.rate),
        })
    }

    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            tracing::info!("Resizing to {}x{}", new_size.width, new_size.height);
            self.config.width = new_size.width;
            self.config.height = new_size.height;
            self.surface.configure(&self.device, &self.config);

            let (depth_texture, depth_view) =
                create_depth_texture(&self.device, new_size.width, new_size.height);
            self.depth_texture = depth_texture;
            self.depth_view = depth_view;
        }
    }

    /// Advance the simulation by one frame of real time
    pub fn update(&mut self, dt: f32) {
        let sim_dt = self.time_controller.tick(dt);
        self.system.advance(sim_dt);
    }

    pub fn reset_camera(&mut self) {
        self.camera = FreeCamera::home();
        tracing::debug!("Camera reset to {:?}", self.camera.position);
    }

    pub fn toggle_orbits(&mut self) {
        let visible = self.overlay.toggle();
        tracing::info!("Orbit rings: {}", if visible { "on" } else { "off" });
    }

    pub fn render(&mut self) -> Result<()> {
        let output = match self.surface.get_current_texture() {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.surface.configure(&self.device, &self.config);
                return Ok(());
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                anyhow::bail!("Surface out of memory");
            }
            Err(e) => {
                tracing::warn!("Skipping frame: {e}");
                return Ok(());
            }
        };
        let view = output.texture.create_view(&wgpu::TextureViewDescriptor::default());

        // Per-frame uniforms and instances
        let aspect = self.config.width as f32 / self.config.height as f32;
        let camera_uniform = CameraUniform::from_camera(&self.camera, aspect);
        self.queue.write_buffer(&self.camera_buffer, 0, bytemuck::bytes_of(&camera_uniform));

        let light = LightUniform::at(light_position(&self.system));
        self.queue.write_buffer(&self.light_buffer, 0, bytemuck::bytes_of(&light));

        let instances = InstanceRaw::from_transforms(&self.system.collect_transforms());
        self.queue.write_buffer(&self.instance_buffer, 0, bytemuck::cast_slice(&instances));

        let mut encoder = self.device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("Render Encoder"),
        });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Scene Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                        store: wgpu::StoreOp::Store,
                    },
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

            // Rings first; they neither test nor write depth
            if self.overlay.visible {
                render_pass.set_pipeline(&self.orbit_pipeline.pipeline);
                render_pass.set_bind_group(0, &self.orbit_bind_group, &[]);
                self.overlay.draw(&mut render_pass);
            }

            if self.instance_count > 0 && self.index_count > 0 {
                render_pass.set_pipeline(&self.body_pipeline.pipeline);
                render_pass.set_bind_group(0, &self.scene_bind_group, &[]);
                render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
                render_pass.set_vertex_buffer(1, self.instance_buffer.slice(..));
                render_pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint32);

                // Anchor uses the sun texture, everything after it the planet texture
                render_pass.set_bind_group(1, &self.sun_bind_group, &[]);
                render_pass.draw_indexed(0..self.index_count, 0, 0..1);

                if self.instance_count > 1 {
                    render_pass.set_bind_group(1, &self.planet_bind_group, &[]);
                    render_pass.draw_indexed(0..self.index_count, 0, 1..self.instance_count);
                }
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }

    pub fn get_info(&self) -> String {
        format!(
            "Bodies: {} | t: {:.1} | Rate: {:.2}x{} | Pos: ({:.1}, {:.1}, {:.1})",
            self.system.body_count(),
            self.time_controller.elapsed(),
            self.time_controller.rate(),
            if self.time_controller.is_paused() { " (paused)" } else { "" },
            self.camera.position.x,
            self.camera.position.y,
            self.camera.position.z,
        )
    }
}

/// The light sits on the anchor body, or the origin for an empty system
fn light_position(system: &BodySystem) -> Vec3 {
    system
        .anchor()
        .map(|body| body.orbit_position())
        .unwrap_or(Vec3::ZERO)
}
