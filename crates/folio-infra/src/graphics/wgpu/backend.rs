// Copyright 2025 folio contributors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! The concrete, WGPU-based implementation of the [`RenderBackend`] trait.
//!
//! One `WgpuBackend` serves one mounted globe view. `init` acquires the
//! surface and uploads every static resource; `render` draws a shadow pass
//! followed by the lit main pass; `shutdown` drops the whole GPU state and
//! zeroes the resource census. Decoded textures arrive over the delivery
//! channel and replace the 1x1 placeholders whenever they show up.

use super::context::GraphicsContext;
use super::shaders;
use super::sphere::{self, SphereVertex};
use crate::asset::texture_loader;
use folio_core::math::{Extent2D, LinearRgba, Mat4, Vec3};
use folio_core::renderer::{
    HostWindow, RenderBackend, RenderError, RenderStats, ResourceCensus, ShadowMode,
    SurfaceDescriptor, SurfaceError, TextureReceiver, TextureSlot,
};
use folio_core::renderer::texture_channel;
use folio_core::scene::{GlobeDescriptor, GlobeScene, LightRig};
use wgpu::util::DeviceExt;

const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

/// The uniform block shared by the shadow and main passes.
///
/// Field order mirrors `GlobeUniforms` in `globe.wgsl`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
struct GlobeUniforms {
    view_proj: [[f32; 4]; 4],
    model: [[f32; 4]; 4],
    sun_view_proj: [[f32; 4]; 4],
    camera_pos: [f32; 4],
    ambient: [f32; 4],
    sun_dir: [f32; 4],
    sun_color: [f32; 4],
    fill_dir: [f32; 4],
    fill_color: [f32; 4],
    params: [f32; 4],
}

impl GlobeUniforms {
    fn from_scene(scene: &GlobeScene, shadows_enabled: bool, shadow_texel: f32) -> Self {
        let rig = &scene.lights;
        let descriptor = scene.globe.descriptor();
        let premult = |color: LinearRgba, intensity: f32| {
            let c = color.scaled(intensity);
            [c.r, c.g, c.b, 1.0]
        };
        let dir4 = |v: Vec3| [v.x, v.y, v.z, 0.0];
        let p = scene.camera.position;
        Self {
            view_proj: scene.camera.view_projection().to_cols_array_2d(),
            model: scene.globe.model_matrix().to_cols_array_2d(),
            sun_view_proj: sun_view_projection(rig).to_cols_array_2d(),
            camera_pos: [p.x, p.y, p.z, 1.0],
            ambient: premult(rig.ambient.color, rig.ambient.intensity),
            sun_dir: dir4(rig.sun.direction()),
            sun_color: premult(rig.sun.color, rig.sun.intensity),
            fill_dir: dir4(rig.fill.direction()),
            fill_color: premult(rig.fill.color, rig.fill.intensity),
            params: [
                descriptor.normal_scale,
                descriptor.shininess,
                if shadows_enabled { 1.0 } else { 0.0 },
                shadow_texel,
            ],
        }
    }
}

/// The sun's light-space view-projection for the shadow pass: an
/// orthographic box around the unit sphere, seen from the sun position.
fn sun_view_projection(rig: &LightRig) -> Mat4 {
    let view =
        Mat4::look_at_rh(rig.sun.position, Vec3::ZERO, Vec3::Y).unwrap_or(Mat4::IDENTITY);
    let proj = Mat4::orthographic_rh_zo(-1.5, 1.5, -1.5, 1.5, 0.1, 20.0);
    proj * view
}

/// A texture and its default view.
#[derive(Debug)]
struct BoundTexture {
    #[allow(dead_code)]
    texture: wgpu::Texture,
    view: wgpu::TextureView,
}

/// Size-dependent render targets, recreated on every effective resize.
#[derive(Debug)]
struct FrameTargets {
    extent: Extent2D,
    msaa_color: BoundTexture,
    depth: BoundTexture,
}

/// Everything held between `init` and `shutdown`.
#[derive(Debug)]
struct GpuState {
    context: GraphicsContext,
    surface_desc: SurfaceDescriptor,
    targets: Option<FrameTargets>,

    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
    triangle_count: u32,
    uniform_buffer: wgpu::Buffer,

    diffuse: BoundTexture,
    normal: BoundTexture,
    material_sampler: wgpu::Sampler,
    shadow_map: BoundTexture,
    shadow_sampler: wgpu::Sampler,

    uniform_bind_group_layout: wgpu::BindGroupLayout,
    material_bind_group_layout: wgpu::BindGroupLayout,
    shadow_bind_group_layout: wgpu::BindGroupLayout,
    uniform_bind_group: wgpu::BindGroup,
    material_bind_group: wgpu::BindGroup,
    shadow_bind_group: wgpu::BindGroup,

    main_pipeline: wgpu::RenderPipeline,
    shadow_pipeline: wgpu::RenderPipeline,

    texture_rx: TextureReceiver,
}

/// The WGPU render backend for the globe view.
#[derive(Debug, Default)]
pub struct WgpuBackend {
    state: Option<GpuState>,
    descriptor: GlobeDescriptor,
    extent: Extent2D,
    census: ResourceCensus,
    frame_count: u64,
}

impl WgpuBackend {
    /// Creates an uninitialized backend for the default globe.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an uninitialized backend for a specific globe descriptor.
    pub fn with_descriptor(descriptor: GlobeDescriptor) -> Self {
        Self {
            descriptor,
            ..Self::default()
        }
    }

    /// Ensures the MSAA color and depth targets match the surface extent.
    fn ensure_frame_targets(state: &mut GpuState, census: &mut ResourceCensus) {
        if !state.context.configured {
            if let Some(old) = state.targets.take() {
                drop(old);
                census.textures -= 2;
            }
            return;
        }
        let extent = state.context.extent();
        if state
            .targets
            .as_ref()
            .is_some_and(|t| t.extent == extent)
        {
            return;
        }
        if state.targets.take().is_some() {
            census.textures -= 2;
        }

        let samples = state.surface_desc.samples.as_u32();
        let msaa_color = create_target_texture(
            &state.context.device,
            "Globe MSAA Color Target",
            extent,
            state.context.surface_config.format,
            samples,
        );
        let depth = create_target_texture(
            &state.context.device,
            "Globe Depth Target",
            extent,
            DEPTH_FORMAT,
            samples,
        );
        census.textures += 2;
        state.targets = Some(FrameTargets {
            extent,
            msaa_color,
            depth,
        });
        log::debug!(
            "Frame targets recreated at {}x{} ({}x MSAA)",
            extent.width,
            extent.height,
            samples
        );
    }

    /// Drains the texture delivery channel and swaps arrived textures in
    /// for their placeholders.
    fn drain_texture_channel(state: &mut GpuState) {
        loop {
            let load = match state.texture_rx.try_recv() {
                Ok(load) => load,
                Err(_) => return,
            };
            match load.result {
                Ok(texture) if texture.is_well_formed() => {
                    let (label, format) = match load.slot {
                        TextureSlot::Diffuse => {
                            ("Globe Diffuse Map", wgpu::TextureFormat::Rgba8UnormSrgb)
                        }
                        TextureSlot::Normal => {
                            ("Globe Normal Map", wgpu::TextureFormat::Rgba8Unorm)
                        }
                    };
                    let bound = create_image_texture(
                        &state.context.device,
                        &state.context.queue,
                        label,
                        texture.size,
                        format,
                        &texture.pixels,
                    );
                    match load.slot {
                        TextureSlot::Diffuse => state.diffuse = bound,
                        TextureSlot::Normal => state.normal = bound,
                    }
                    // Placeholder out, real texture in: the census is
                    // unchanged, but the bind group must be rebuilt.
                    state.material_bind_group = create_material_bind_group(
                        &state.context.device,
                        &state.material_bind_group_layout,
                        &state.diffuse,
                        &state.normal,
                        &state.material_sampler,
                    );
                    log::info!(
                        "Texture bound for {:?} slot ({}x{})",
                        load.slot,
                        texture.size.width,
                        texture.size.height
                    );
                }
                Ok(_) => {
                    log::warn!("Dropping malformed decoded texture for {:?}", load.slot);
                }
                Err(err) => {
                    // Non-fatal: the globe keeps rendering untextured.
                    log::warn!("Texture load failed ({err}); keeping placeholder");
                }
            }
        }
    }
}

impl RenderBackend for WgpuBackend {
    fn init(&mut self, window: &dyn HostWindow) -> Result<(), RenderError> {
        if self.state.is_some() {
            return Err(RenderError::InitializationFailed(
                "WgpuBackend is already initialized".to_string(),
            ));
        }
        let extent = window.inner_size();
        let surface_desc = SurfaceDescriptor::globe_default(extent);

        let context = pollster::block_on(GraphicsContext::new(window.clone_handle(), extent))
            .map_err(|e| RenderError::InitializationFailed(e.to_string()))?;
        let device = &context.device;

        // --- Sphere geometry ---
        let mesh = sphere::generate(self.descriptor.radius, self.descriptor.segments);
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Globe Vertex Buffer"),
            contents: bytemuck::cast_slice(&mesh.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Globe Index Buffer"),
            contents: bytemuck::cast_slice(&mesh.indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Globe Uniform Buffer"),
            size: std::mem::size_of::<GlobeUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        // --- Placeholder textures, swapped out when decodes arrive ---
        let diffuse = create_image_texture(
            device,
            &context.queue,
            "Globe Diffuse Placeholder",
            Extent2D::new(1, 1),
            wgpu::TextureFormat::Rgba8UnormSrgb,
            &[128, 128, 128, 255],
        );
        let normal = create_image_texture(
            device,
            &context.queue,
            "Globe Normal Placeholder",
            Extent2D::new(1, 1),
            wgpu::TextureFormat::Rgba8Unorm,
            &[128, 128, 255, 255],
        );
        let material_sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("Globe Material Sampler"),
            address_mode_u: wgpu::AddressMode::Repeat,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        // --- Shadow map for the sun light ---
        let shadow_size = LightRig::SUN_SHADOW_MAP_SIZE;
        let shadow_map = create_target_texture(
            device,
            "Sun Shadow Map",
            Extent2D::new(shadow_size, shadow_size),
            DEPTH_FORMAT,
            1,
        );
        let shadow_sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("Sun Shadow Sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            compare: Some(wgpu::CompareFunction::LessEqual),
            ..Default::default()
        });

        // --- Bind group layouts ---
        let uniform_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Globe Uniform Layout"),
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
        let texture_entry = |binding: u32| wgpu::BindGroupLayoutEntry {
            binding,
            visibility: wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Texture {
                sample_type: wgpu::TextureSampleType::Float { filterable: true },
                view_dimension: wgpu::TextureViewDimension::D2,
                multisampled: false,
            },
            count: None,
        };
        let material_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Globe Material Layout"),
                entries: &[
                    texture_entry(0),
                    texture_entry(1),
                    wgpu::BindGroupLayoutEntry {
                        binding: 2,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                        count: None,
                    },
                ],
            });
        let shadow_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Sun Shadow Layout"),
                entries: &[
                    wgpu::BindGroupLayoutEntry {
                        binding: 0,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Texture {
                            sample_type: wgpu::TextureSampleType::Depth,
                            view_dimension: wgpu::TextureViewDimension::D2,
                            multisampled: false,
                        },
                        count: None,
                    },
                    wgpu::BindGroupLayoutEntry {
                        binding: 1,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Comparison),
                        count: None,
                    },
                ],
            });

        // --- Bind groups ---
        let uniform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Globe Uniform Bind Group"),
            layout: &uniform_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });
        let material_bind_group = create_material_bind_group(
            device,
            &material_bind_group_layout,
            &diffuse,
            &normal,
            &material_sampler,
        );
        let shadow_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Sun Shadow Bind Group"),
            layout: &shadow_bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&shadow_map.view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&shadow_sampler),
                },
            ],
        });

        // --- Pipelines ---
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Globe Shader"),
            source: wgpu::ShaderSource::Wgsl(shaders::GLOBE_WGSL.into()),
        });

        let main_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Globe Pipeline Layout"),
            bind_group_layouts: &[
                &uniform_bind_group_layout,
                &material_bind_group_layout,
                &shadow_bind_group_layout,
            ],
            push_constant_ranges: &[],
        });
        let main_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Globe Main Pipeline"),
            layout: Some(&main_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[SphereVertex::buffer_layout()],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: context.surface_config.format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: Some(wgpu::Face::Back),
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState {
                count: surface_desc.samples.as_u32(),
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            multiview: None,
            cache: None,
        });

        let shadow_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Sun Shadow Pipeline Layout"),
            bind_group_layouts: &[&uniform_bind_group_layout],
            push_constant_ranges: &[],
        });
        let shadow_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Sun Shadow Pipeline"),
            layout: Some(&shadow_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_shadow"),
                compilation_options: Default::default(),
                buffers: &[SphereVertex::buffer_layout()],
            },
            fragment: None,
            primitive: wgpu::PrimitiveState {
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: Some(wgpu::Face::Back),
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                // Constant + slope bias against self-shadow acne.
                bias: wgpu::DepthBiasState {
                    constant: 2,
                    slope_scale: 2.0,
                    clamp: 0.0,
                },
            }),
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        // --- Fire-and-forget texture loads ---
        let (texture_tx, texture_rx) = texture_channel();
        texture_loader::spawn_globe_loads(&self.descriptor, &texture_tx);

        self.state = Some(GpuState {
            context,
            surface_desc,
            targets: None,
            vertex_buffer,
            index_buffer,
            index_count: mesh.indices.len() as u32,
            triangle_count: mesh.triangle_count(),
            uniform_buffer,
            diffuse,
            normal,
            material_sampler,
            shadow_map,
            shadow_sampler,
            uniform_bind_group_layout,
            material_bind_group_layout,
            shadow_bind_group_layout,
            uniform_bind_group,
            material_bind_group,
            shadow_bind_group,
            main_pipeline,
            shadow_pipeline,
            texture_rx,
        });
        self.extent = extent;
        self.frame_count = 0;
        self.census = ResourceCensus {
            buffers: 3,
            // Diffuse + normal placeholders + shadow map; frame targets are
            // counted when the surface first configures.
            textures: 3,
            samplers: 2,
            // Three layouts and three groups.
            bind_groups: 6,
            pipelines: 2,
            surfaces: 1,
        };
        log::info!(
            "WgpuBackend initialized for a {}x{} container",
            extent.width,
            extent.height
        );
        Ok(())
    }

    fn resize(&mut self, extent: Extent2D) {
        self.extent = extent;
        let Some(state) = self.state.as_mut() else {
            return;
        };
        state.context.resize(extent);
        Self::ensure_frame_targets(state, &mut self.census);
    }

    fn render(&mut self, scene: &GlobeScene) -> Result<RenderStats, RenderError> {
        let Some(state) = self.state.as_mut() else {
            return Err(RenderError::NotInitialized);
        };

        Self::drain_texture_channel(state);

        // A degenerate surface renders nothing; the loop keeps running and
        // the next real resize restores output.
        if !state.context.configured {
            return Ok(RenderStats {
                frame_number: self.frame_count,
                draw_calls: 0,
                triangles: 0,
            });
        }
        Self::ensure_frame_targets(state, &mut self.census);
        let Some(targets) = state.targets.as_ref() else {
            return Ok(RenderStats {
                frame_number: self.frame_count,
                draw_calls: 0,
                triangles: 0,
            });
        };

        let shadows_enabled =
            state.surface_desc.shadows == ShadowMode::SoftPcf && scene.lights.sun.casts_shadows;
        let shadow_texel = 1.0 / scene.lights.sun.shadow_map_size.max(1) as f32;
        let uniforms = GlobeUniforms::from_scene(scene, shadows_enabled, shadow_texel);
        state
            .context
            .queue
            .write_buffer(&state.uniform_buffer, 0, bytemuck::bytes_of(&uniforms));

        let frame = state.context.acquire_frame().map_err(|e| {
            RenderError::Surface(SurfaceError::AcquisitionFailed(format!("{e:?}")))
        })?;
        let swap_view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder =
            state
                .context
                .device
                .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                    label: Some("Globe Frame Encoder"),
                });

        let mut draw_calls = 0u32;
        let mut triangles = 0u32;

        if shadows_enabled {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Sun Shadow Pass"),
                color_attachments: &[],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &state.shadow_map.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            pass.set_pipeline(&state.shadow_pipeline);
            pass.set_bind_group(0, &state.uniform_bind_group, &[]);
            pass.set_vertex_buffer(0, state.vertex_buffer.slice(..));
            pass.set_index_buffer(state.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
            pass.draw_indexed(0..state.index_count, 0, 0..1);
            draw_calls += 1;
            triangles += state.triangle_count;
        }

        {
            let clear = state.surface_desc.clear_color;
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Globe Main Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &targets.msaa_color.view,
                    resolve_target: Some(&swap_view),
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: f64::from(clear.r),
                            g: f64::from(clear.g),
                            b: f64::from(clear.b),
                            a: f64::from(clear.a),
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &targets.depth.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            pass.set_pipeline(&state.main_pipeline);
            pass.set_bind_group(0, &state.uniform_bind_group, &[]);
            pass.set_bind_group(1, &state.material_bind_group, &[]);
            pass.set_bind_group(2, &state.shadow_bind_group, &[]);
            pass.set_vertex_buffer(0, state.vertex_buffer.slice(..));
            pass.set_index_buffer(state.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
            pass.draw_indexed(0..state.index_count, 0, 0..1);
            draw_calls += 1;
            triangles += state.triangle_count;
        }

        state.context.queue.submit(std::iter::once(encoder.finish()));
        frame.present();

        self.frame_count += 1;
        Ok(RenderStats {
            frame_number: self.frame_count,
            draw_calls,
            triangles,
        })
    }

    fn shutdown(&mut self) {
        if let Some(state) = self.state.take() {
            // Dropping the state releases the surface, buffers, textures,
            // samplers, bind groups, and pipelines in one scope.
            drop(state);
            log::info!(
                "WgpuBackend shut down after {} frames; all GPU resources released",
                self.frame_count
            );
        }
        self.census = ResourceCensus::default();
    }

    fn live_resources(&self) -> ResourceCensus {
        self.census
    }
}

/// Creates a render-target texture (color or depth) with its default view.
///
/// Multisampled frame targets are attachment-only; single-sampled targets
/// (the shadow map) are also bindable for sampling.
fn create_target_texture(
    device: &wgpu::Device,
    label: &str,
    extent: Extent2D,
    format: wgpu::TextureFormat,
    sample_count: u32,
) -> BoundTexture {
    let usage = if sample_count > 1 {
        wgpu::TextureUsages::RENDER_ATTACHMENT
    } else {
        wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING
    };
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some(label),
        size: wgpu::Extent3d {
            width: extent.width.max(1),
            height: extent.height.max(1),
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count,
        dimension: wgpu::TextureDimension::D2,
        format,
        usage,
        view_formats: &[],
    });
    let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
    BoundTexture { texture, view }
}

/// Creates a sampled texture from tightly packed RGBA8 pixels.
fn create_image_texture(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    label: &str,
    size: Extent2D,
    format: wgpu::TextureFormat,
    pixels: &[u8],
) -> BoundTexture {
    let extent = wgpu::Extent3d {
        width: size.width,
        height: size.height,
        depth_or_array_layers: 1,
    };
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some(label),
        size: extent,
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format,
        usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
        view_formats: &[],
    });
    queue.write_texture(
        wgpu::TexelCopyTextureInfo {
            texture: &texture,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
            aspect: wgpu::TextureAspect::All,
        },
        pixels,
        wgpu::TexelCopyBufferLayout {
            offset: 0,
            bytes_per_row: Some(4 * size.width),
            rows_per_image: Some(size.height),
        },
        extent,
    );
    let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
    BoundTexture { texture, view }
}

/// Builds the material bind group for the current diffuse/normal textures.
fn create_material_bind_group(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    diffuse: &BoundTexture,
    normal: &BoundTexture,
    sampler: &wgpu::Sampler,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("Globe Material Bind Group"),
        layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::TextureView(&diffuse.view),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::TextureView(&normal.view),
            },
            wgpu::BindGroupEntry {
                binding: 2,
                resource: wgpu::BindingResource::Sampler(sampler),
            },
        ],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::scene::GlobeScene;

    #[test]
    fn uniforms_pack_scene_constants() {
        let scene = GlobeScene::new(1.0);
        let uniforms = GlobeUniforms::from_scene(&scene, true, 1.0 / 2048.0);

        assert_eq!(uniforms.camera_pos, [0.0, 0.0, 2.5, 1.0]);
        assert_eq!(uniforms.params[0], 0.85);
        assert_eq!(uniforms.params[1], 30.0);
        assert_eq!(uniforms.params[2], 1.0);
        // Sun premultiplied by its 1.5 intensity.
        assert_eq!(uniforms.sun_color[0], 1.5);
        // Fill at 0.3.
        assert!((uniforms.fill_color[0] - 0.3).abs() < 1e-6);
    }

    #[test]
    fn uniforms_disable_shadows_when_asked() {
        let scene = GlobeScene::new(1.0);
        let uniforms = GlobeUniforms::from_scene(&scene, false, 1.0 / 2048.0);
        assert_eq!(uniforms.params[2], 0.0);
    }

    #[test]
    fn uniform_block_size_is_16_byte_aligned() {
        assert_eq!(std::mem::size_of::<GlobeUniforms>() % 16, 0);
    }

    #[test]
    fn sun_view_projection_is_well_formed() {
        let rig = LightRig::globe_default();
        let vp = sun_view_projection(&rig);
        assert!(vp.determinant().abs() > 1e-6);
    }

    #[test]
    fn uninitialized_backend_refuses_to_render() {
        let mut backend = WgpuBackend::new();
        let scene = GlobeScene::new(1.0);
        assert!(matches!(
            backend.render(&scene),
            Err(RenderError::NotInitialized)
        ));
        assert!(backend.live_resources().is_empty());
    }

    #[test]
    fn shutdown_before_init_is_a_safe_no_op() {
        let mut backend = WgpuBackend::new();
        backend.shutdown();
        backend.shutdown();
        assert!(backend.live_resources().is_empty());
    }
}
