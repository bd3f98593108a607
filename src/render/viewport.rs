//! Offscreen scene rendering into egui-embedded viewports
//!
//! Each render surface draws into its own color+depth target which is
//! registered with egui as a native texture. The UI shows the texture from
//! the previous frame while the current one is being recorded, so embedding
//! costs one frame of latency and no extra copies.

use std::collections::{HashMap, HashSet};

use bytemuck::{Pod, Zeroable};
use glam::{Vec2, Vec4};
use wgpu::util::DeviceExt;

use crate::render::lines::{self, LineVertex};
use crate::render::mesh::{Mesh, Vertex};
use crate::render::shader;
use crate::render::texture::{fallback_matcap, MatcapLoader};
use crate::scene::{
    Camera, CameraUniformData, GpuLightData, MatcapStyle, MaterialUniformData, OrbitController,
    OrbitInput, SceneDesc, SceneNode, TransformUniformData, MAX_LIGHTS,
};

const OFFSCREEN_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8UnormSrgb;
const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

/// Stride between per-object uniform slots (dynamic offsets must be 256-aligned)
const OBJECT_STRIDE: u64 = 256;

/// Per-object data written at each dynamic-offset slot
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
struct ObjectUniformData {
    transform: TransformUniformData,
    material: MaterialUniformData,
}

/// Scene-level uniforms: summed ambient in rgb, light count in w
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
struct SceneUniformData {
    ambient_count: Vec4,
}

/// Uploaded mesh buffers
struct GpuMesh {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
}

/// Keyed cache whose entries are marked on use and swept after each frame.
/// Without the sweep, every slider tick on a parametric shape would leave a
/// dead vertex/index buffer pair behind for the life of the process.
struct LiveCache<T> {
    entries: HashMap<String, T>,
    live: HashSet<String>,
}

impl<T> LiveCache<T> {
    fn new() -> Self {
        Self {
            entries: HashMap::new(),
            live: HashSet::new(),
        }
    }

    fn get(&self, key: &str) -> Option<&T> {
        self.entries.get(key)
    }

    /// Mark `key` as used this frame; returns whether it is already cached
    fn mark(&mut self, key: &str) -> bool {
        self.live.insert(key.to_string());
        self.entries.contains_key(key)
    }

    fn insert(&mut self, key: String, value: T) {
        self.entries.insert(key, value);
    }

    /// Drop every entry that was not marked since the previous sweep
    fn sweep(&mut self) {
        let live = &self.live;
        self.entries.retain(|key, _| live.contains(key));
        self.live.clear();
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum PipelineKind {
    Opaque,
    OpaqueDouble,
    Wireframe,
    Blend,
}

/// Pipelines, layouts and caches shared by every viewport
pub struct SceneRenderer {
    scene_layout: wgpu::BindGroupLayout,
    object_layout: wgpu::BindGroupLayout,
    matcap_layout: wgpu::BindGroupLayout,

    opaque_pipeline: wgpu::RenderPipeline,
    opaque_double_pipeline: wgpu::RenderPipeline,
    blend_pipeline: wgpu::RenderPipeline,
    wireframe_pipeline: Option<wgpu::RenderPipeline>,
    line_pipeline: wgpu::RenderPipeline,

    sampler: wgpu::Sampler,
    fallback_matcap_group: wgpu::BindGroup,
    matcap_groups: HashMap<MatcapStyle, wgpu::BindGroup>,
    pub matcap_loader: MatcapLoader,

    mesh_cache: LiveCache<GpuMesh>,
}

impl SceneRenderer {
    pub fn new(device: &wgpu::Device, queue: &wgpu::Queue, supports_wireframe: bool) -> Self {
        let module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("scene shader"),
            source: wgpu::ShaderSource::Wgsl(shader::SCENE_SHADER.into()),
        });
        let line_module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("line shader"),
            source: wgpu::ShaderSource::Wgsl(shader::LINE_SHADER.into()),
        });

        let uniform_entry = |binding: u32, size: u64| wgpu::BindGroupLayoutEntry {
            binding,
            visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: wgpu::BufferSize::new(size),
            },
            count: None,
        };

        let scene_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("scene bind group layout"),
            entries: &[
                uniform_entry(0, std::mem::size_of::<CameraUniformData>() as u64),
                uniform_entry(1, std::mem::size_of::<SceneUniformData>() as u64),
                uniform_entry(2, (std::mem::size_of::<GpuLightData>() * MAX_LIGHTS) as u64),
            ],
        });

        let object_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("object bind group layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: true,
                    min_binding_size: wgpu::BufferSize::new(
                        std::mem::size_of::<ObjectUniformData>() as u64,
                    ),
                },
                count: None,
            }],
        });

        let matcap_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("matcap bind group layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("scene pipeline layout"),
            bind_group_layouts: &[&scene_layout, &object_layout, &matcap_layout],
            push_constant_ranges: &[],
        });

        let make_pipeline = |label: &str,
                             blend: Option<wgpu::BlendState>,
                             cull: Option<wgpu::Face>,
                             polygon_mode: wgpu::PolygonMode,
                             depth_write: bool| {
            device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some(label),
                layout: Some(&pipeline_layout),
                vertex: wgpu::VertexState {
                    module: &module,
                    entry_point: "vs_main",
                    buffers: &[Vertex::layout()],
                    compilation_options: Default::default(),
                },
                fragment: Some(wgpu::FragmentState {
                    module: &module,
                    entry_point: "fs_main",
                    targets: &[Some(wgpu::ColorTargetState {
                        format: OFFSCREEN_FORMAT,
                        blend,
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                    compilation_options: Default::default(),
                }),
                primitive: wgpu::PrimitiveState {
                    topology: wgpu::PrimitiveTopology::TriangleList,
                    front_face: wgpu::FrontFace::Ccw,
                    cull_mode: cull,
                    polygon_mode,
                    ..Default::default()
                },
                depth_stencil: Some(wgpu::DepthStencilState {
                    format: DEPTH_FORMAT,
                    depth_write_enabled: depth_write,
                    depth_compare: wgpu::CompareFunction::Less,
                    stencil: Default::default(),
                    bias: Default::default(),
                }),
                multisample: Default::default(),
                multiview: None,
            })
        };

        let opaque_pipeline = make_pipeline(
            "opaque",
            Some(wgpu::BlendState::REPLACE),
            Some(wgpu::Face::Back),
            wgpu::PolygonMode::Fill,
            true,
        );
        let opaque_double_pipeline = make_pipeline(
            "opaque double-sided",
            Some(wgpu::BlendState::REPLACE),
            None,
            wgpu::PolygonMode::Fill,
            true,
        );
        let blend_pipeline = make_pipeline(
            "transparent",
            Some(wgpu::BlendState::ALPHA_BLENDING),
            None,
            wgpu::PolygonMode::Fill,
            false,
        );
        let wireframe_pipeline = supports_wireframe.then(|| {
            make_pipeline(
                "wireframe",
                Some(wgpu::BlendState::REPLACE),
                None,
                wgpu::PolygonMode::Line,
                true,
            )
        });

        let line_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("lines"),
            layout: Some(&device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("line pipeline layout"),
                bind_group_layouts: &[&scene_layout],
                push_constant_ranges: &[],
            })),
            vertex: wgpu::VertexState {
                module: &line_module,
                entry_point: "vs_main",
                buffers: &[LineVertex::layout()],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &line_module,
                entry_point: "fs_main",
                targets: &[Some(wgpu::ColorTargetState {
                    format: OFFSCREEN_FORMAT,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::LineList,
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: Default::default(),
                bias: Default::default(),
            }),
            multisample: Default::default(),
            multiview: None,
        });

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("matcap sampler"),
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            ..Default::default()
        });

        let fallback = fallback_matcap();
        let fallback_matcap_group = Self::upload_matcap(
            device,
            queue,
            &matcap_layout,
            &sampler,
            &fallback,
            "matcap fallback",
        );

        Self {
            scene_layout,
            object_layout,
            matcap_layout,
            opaque_pipeline,
            opaque_double_pipeline,
            blend_pipeline,
            wireframe_pipeline,
            line_pipeline,
            sampler,
            fallback_matcap_group,
            matcap_groups: HashMap::new(),
            matcap_loader: MatcapLoader::new(),
            mesh_cache: LiveCache::new(),
        }
    }

    fn upload_matcap(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        layout: &wgpu::BindGroupLayout,
        sampler: &wgpu::Sampler,
        image: &image::RgbaImage,
        label: &str,
    ) -> wgpu::BindGroup {
        let size = wgpu::Extent3d {
            width: image.width(),
            height: image.height(),
            depth_or_array_layers: 1,
        };
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: OFFSCREEN_FORMAT,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });
        queue.write_texture(
            wgpu::ImageCopyTexture {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            image.as_raw(),
            wgpu::ImageDataLayout {
                offset: 0,
                bytes_per_row: Some(4 * image.width()),
                rows_per_image: Some(image.height()),
            },
            size,
        );
        let view = texture.create_view(&Default::default());

        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(label),
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(sampler),
                },
            ],
        })
    }

    /// Upload matcap captures that finished generating since last frame
    pub fn update_matcaps(&mut self, device: &wgpu::Device, queue: &wgpu::Queue) {
        for (style, image) in self.matcap_loader.take_ready() {
            log::debug!("uploading matcap capture: {}", style.label());
            let group = Self::upload_matcap(
                device,
                queue,
                &self.matcap_layout,
                &self.sampler,
                &image,
                style.label(),
            );
            self.matcap_groups.insert(style, group);
        }
    }

    fn ensure_mesh(&mut self, device: &wgpu::Device, desc: &crate::scene::GeometryDesc) -> String {
        let key = desc.cache_key();
        if !self.mesh_cache.mark(&key) {
            let mesh = Mesh::from_desc(desc);
            log::trace!(
                "tessellated {}: {} vertices, {} triangles",
                mesh.name,
                mesh.vertex_count(),
                mesh.triangle_count()
            );
            let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(&mesh.name),
                contents: mesh.vertex_bytes(),
                usage: wgpu::BufferUsages::VERTEX,
            });
            let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(&mesh.name),
                contents: mesh.index_bytes(),
                usage: wgpu::BufferUsages::INDEX,
            });
            self.mesh_cache.insert(
                key.clone(),
                GpuMesh {
                    vertex_buffer,
                    index_buffer,
                    index_count: mesh.index_count() as u32,
                },
            );
        }
        key
    }

    /// Release GPU meshes that no scene referenced this frame
    pub fn sweep_meshes(&mut self) {
        self.mesh_cache.sweep();
    }

    fn pipeline(&self, kind: PipelineKind) -> &wgpu::RenderPipeline {
        match kind {
            PipelineKind::Opaque => &self.opaque_pipeline,
            PipelineKind::OpaqueDouble => &self.opaque_double_pipeline,
            PipelineKind::Blend => &self.blend_pipeline,
            // Filled fallback when the adapter lacks line polygon mode
            PipelineKind::Wireframe => self
                .wireframe_pipeline
                .as_ref()
                .unwrap_or(&self.opaque_double_pipeline),
        }
    }

    fn matcap_group(&self, style: Option<MatcapStyle>) -> &wgpu::BindGroup {
        style
            .and_then(|style| self.matcap_groups.get(&style))
            .unwrap_or(&self.fallback_matcap_group)
    }
}

struct Draw {
    mesh_key: String,
    kind: PipelineKind,
    matcap: Option<MatcapStyle>,
    uniform_offset: u32,
    distance: f32,
}

/// One offscreen render target shown inside the UI
pub struct Viewport {
    width: u32,
    height: u32,
    color_view: wgpu::TextureView,
    depth_view: wgpu::TextureView,
    texture_id: egui::TextureId,

    camera_buffer: wgpu::Buffer,
    scene_buffer: wgpu::Buffer,
    lights_buffer: wgpu::Buffer,
    scene_bind_group: wgpu::BindGroup,

    object_buffer: wgpu::Buffer,
    object_capacity: u32,
    object_bind_group: wgpu::BindGroup,

    line_buffer: wgpu::Buffer,
    line_capacity: usize,
}

impl Viewport {
    pub fn new(
        device: &wgpu::Device,
        renderer: &SceneRenderer,
        egui_renderer: &mut egui_wgpu::Renderer,
        width: u32,
        height: u32,
    ) -> Self {
        let (color_view, depth_view) = Self::create_targets(device, width, height);
        let texture_id = egui_renderer.register_native_texture(
            device,
            &color_view,
            wgpu::FilterMode::Linear,
        );

        let uniform = |label: &str, size: u64| {
            device.create_buffer(&wgpu::BufferDescriptor {
                label: Some(label),
                size,
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            })
        };
        let camera_buffer = uniform("camera", std::mem::size_of::<CameraUniformData>() as u64);
        let scene_buffer = uniform("scene", std::mem::size_of::<SceneUniformData>() as u64);
        let lights_buffer = uniform(
            "lights",
            (std::mem::size_of::<GpuLightData>() * MAX_LIGHTS) as u64,
        );

        let scene_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("scene bind group"),
            layout: &renderer.scene_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: camera_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: scene_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: lights_buffer.as_entire_binding(),
                },
            ],
        });

        let object_capacity = 16;
        let (object_buffer, object_bind_group) =
            Self::create_object_buffer(device, renderer, object_capacity);

        let line_capacity = 1024;
        let line_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("line vertices"),
            size: (line_capacity * std::mem::size_of::<LineVertex>()) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        Self {
            width,
            height,
            color_view,
            depth_view,
            texture_id,
            camera_buffer,
            scene_buffer,
            lights_buffer,
            scene_bind_group,
            object_buffer,
            object_capacity,
            object_bind_group,
            line_buffer,
            line_capacity,
        }
    }

    fn create_targets(
        device: &wgpu::Device,
        width: u32,
        height: u32,
    ) -> (wgpu::TextureView, wgpu::TextureView) {
        let color = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("viewport color"),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: OFFSCREEN_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING,
            view_formats: &[],
        });
        let depth = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("viewport depth"),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        (
            color.create_view(&Default::default()),
            depth.create_view(&Default::default()),
        )
    }

    fn create_object_buffer(
        device: &wgpu::Device,
        renderer: &SceneRenderer,
        capacity: u32,
    ) -> (wgpu::Buffer, wgpu::BindGroup) {
        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("object uniforms"),
            size: capacity as u64 * OBJECT_STRIDE,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("object bind group"),
            layout: &renderer.object_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                    buffer: &buffer,
                    offset: 0,
                    size: wgpu::BufferSize::new(std::mem::size_of::<ObjectUniformData>() as u64),
                }),
            }],
        });
        (buffer, bind_group)
    }

    pub fn texture_id(&self) -> egui::TextureId {
        self.texture_id
    }

    pub fn resize(
        &mut self,
        device: &wgpu::Device,
        egui_renderer: &mut egui_wgpu::Renderer,
        width: u32,
        height: u32,
    ) {
        if width == self.width && height == self.height || width == 0 || height == 0 {
            return;
        }
        self.width = width;
        self.height = height;
        let (color_view, depth_view) = Self::create_targets(device, width, height);
        egui_renderer.update_egui_texture_from_wgpu_texture(
            device,
            &color_view,
            wgpu::FilterMode::Linear,
            self.texture_id,
        );
        self.color_view = color_view;
        self.depth_view = depth_view;
    }

    pub fn free(&self, egui_renderer: &mut egui_wgpu::Renderer) {
        egui_renderer.free_texture(&self.texture_id);
    }

    /// Record and submit one frame of the given scene into this viewport
    pub fn render(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        renderer: &mut SceneRenderer,
        scene: &SceneDesc,
    ) {
        let mut camera = scene.camera.clone();
        camera.set_aspect(self.width as f32, self.height as f32);
        queue.write_buffer(
            &self.camera_buffer,
            0,
            bytemuck::bytes_of(&camera.uniform_data()),
        );

        let gpu_lights = scene.gpu_lights();
        let mut light_array = [GpuLightData::zeroed(); MAX_LIGHTS];
        light_array[..gpu_lights.len()].copy_from_slice(&gpu_lights);
        queue.write_buffer(&self.lights_buffer, 0, bytemuck::cast_slice(&light_array));

        let scene_data = SceneUniformData {
            ambient_count: scene.ambient().extend(gpu_lights.len() as f32),
        };
        queue.write_buffer(&self.scene_buffer, 0, bytemuck::bytes_of(&scene_data));

        // Collect draws and upload per-object uniforms
        let mesh_nodes: Vec<_> = scene.meshes().collect();
        if mesh_nodes.len() as u32 > self.object_capacity {
            self.object_capacity = (mesh_nodes.len() as u32).next_power_of_two();
            let (buffer, bind_group) =
                Self::create_object_buffer(device, renderer, self.object_capacity);
            self.object_buffer = buffer;
            self.object_bind_group = bind_group;
        }

        let mut draws = Vec::with_capacity(mesh_nodes.len());
        let mut object_data = vec![0u8; mesh_nodes.len() * OBJECT_STRIDE as usize];
        for (index, node) in mesh_nodes.iter().enumerate() {
            let mesh_key = renderer.ensure_mesh(device, &node.geometry);

            if let Some(style) = node.material.matcap_style() {
                renderer.matcap_loader.request(style);
            }

            let kind = if node.material.wireframe() {
                PipelineKind::Wireframe
            } else if node.material.transparent() {
                PipelineKind::Blend
            } else if node.geometry.double_sided() {
                PipelineKind::OpaqueDouble
            } else {
                PipelineKind::Opaque
            };

            let uniform = ObjectUniformData {
                transform: node.transform.uniform_data(),
                material: node.material.uniform_data(),
            };
            let offset = index * OBJECT_STRIDE as usize;
            object_data[offset..offset + std::mem::size_of::<ObjectUniformData>()]
                .copy_from_slice(bytemuck::bytes_of(&uniform));

            draws.push(Draw {
                mesh_key,
                kind,
                matcap: node.material.matcap_style(),
                uniform_offset: offset as u32,
                distance: (camera.position - node.transform.position).length(),
            });
        }
        if !object_data.is_empty() {
            queue.write_buffer(&self.object_buffer, 0, &object_data);
        }

        // Opaque front to back, then transparent back to front
        draws.sort_by(|a, b| {
            a.kind.cmp(&b.kind).then_with(|| {
                if a.kind == PipelineKind::Blend {
                    b.distance.total_cmp(&a.distance)
                } else {
                    a.distance.total_cmp(&b.distance)
                }
            })
        });

        // Helper lines
        let mut line_vertices = Vec::new();
        for node in &scene.nodes {
            match node {
                SceneNode::Grid { size, divisions } => {
                    lines::grid(&mut line_vertices, *size, *divisions)
                }
                SceneNode::Axes { length } => lines::axes(&mut line_vertices, *length),
                SceneNode::Light(light) => lines::light_gizmo(&mut line_vertices, light),
                SceneNode::Mesh(_) => {}
            }
        }
        if line_vertices.len() > self.line_capacity {
            self.line_capacity = line_vertices.len().next_power_of_two();
            self.line_buffer = device.create_buffer(&wgpu::BufferDescriptor {
                label: Some("line vertices"),
                size: (self.line_capacity * std::mem::size_of::<LineVertex>()) as u64,
                usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            });
        }
        if !line_vertices.is_empty() {
            queue.write_buffer(&self.line_buffer, 0, bytemuck::cast_slice(&line_vertices));
        }

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("viewport encoder"),
        });
        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("viewport pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &self.color_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: scene.background.x as f64,
                            g: scene.background.y as f64,
                            b: scene.background.z as f64,
                            a: 1.0,
                        }),
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
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            pass.set_bind_group(0, &self.scene_bind_group, &[]);

            let mut current_kind = None;
            for draw in &draws {
                let Some(mesh) = renderer.mesh_cache.get(&draw.mesh_key) else {
                    continue;
                };
                if current_kind != Some(draw.kind) {
                    pass.set_pipeline(renderer.pipeline(draw.kind));
                    current_kind = Some(draw.kind);
                }
                pass.set_bind_group(1, &self.object_bind_group, &[draw.uniform_offset]);
                pass.set_bind_group(2, renderer.matcap_group(draw.matcap), &[]);
                pass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
                pass.set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                pass.draw_indexed(0..mesh.index_count, 0, 0..1);
            }

            if !line_vertices.is_empty() {
                pass.set_pipeline(&renderer.line_pipeline);
                pass.set_bind_group(0, &self.scene_bind_group, &[]);
                pass.set_vertex_buffer(0, self.line_buffer.slice(..));
                pass.draw(0..line_vertices.len() as u32, 0..1);
            }
        }
        queue.submit(Some(encoder.finish()));
    }
}

/// Everything a running example needs to show render surfaces
pub struct RenderCtx<'a> {
    pub device: &'a wgpu::Device,
    pub queue: &'a wgpu::Queue,
    pub egui_renderer: &'a mut egui_wgpu::Renderer,
    pub scene_renderer: &'a mut SceneRenderer,
}

/// Named render surfaces plus the scenes queued for them this frame
#[derive(Default)]
pub struct ViewportPool {
    viewports: HashMap<String, Viewport>,
    pending: Vec<(String, SceneDesc)>,
}

impl ViewportPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show one render surface, apply its pointer input to the orbit
    /// controller, and queue the scene for rendering after the UI pass.
    pub fn show(
        &mut self,
        ui: &mut egui::Ui,
        ctx: &mut RenderCtx<'_>,
        id: &str,
        height: f32,
        camera: &mut Camera,
        orbit: &mut OrbitController,
        mut scene: SceneDesc,
    ) -> egui::Response {
        let width_points = ui.available_width().max(1.0);
        let ppp = ui.ctx().pixels_per_point();
        let width_px = ((width_points * ppp) as u32).max(1);
        let height_px = ((height * ppp) as u32).max(1);

        let viewport = self.viewports.entry(id.to_string()).or_insert_with(|| {
            Viewport::new(
                ctx.device,
                ctx.scene_renderer,
                ctx.egui_renderer,
                width_px,
                height_px,
            )
        });
        viewport.resize(ctx.device, ctx.egui_renderer, width_px, height_px);

        let response = ui.add(
            egui::Image::new((viewport.texture_id(), egui::vec2(width_points, height)))
                .sense(egui::Sense::drag()),
        );

        let mut input = OrbitInput::new();
        if response.dragged() {
            let delta = response.drag_delta();
            input.drag_delta = Vec2::new(delta.x, delta.y);
            input.pan = ui.input(|i| i.modifiers.shift);
        }
        if response.hovered() {
            input.scroll_delta = ui.input(|i| i.raw_scroll_delta.y);
        }
        orbit.update(camera, &input);

        scene.camera = camera.clone();
        self.pending.push((id.to_string(), scene));
        response
    }

    /// Render every scene queued by [`show`] this frame
    ///
    /// [`show`]: ViewportPool::show
    pub fn render_pending(&mut self, ctx: &mut RenderCtx<'_>) {
        ctx.scene_renderer.update_matcaps(ctx.device, ctx.queue);
        for (id, scene) in self.pending.drain(..) {
            if let Some(viewport) = self.viewports.get_mut(&id) {
                viewport.render(ctx.device, ctx.queue, ctx.scene_renderer, &scene);
            }
        }
        ctx.scene_renderer.sweep_meshes();
    }

    /// Free all surfaces, used when switching examples
    pub fn clear(&mut self, egui_renderer: &mut egui_wgpu::Renderer) {
        for viewport in self.viewports.values() {
            viewport.free(egui_renderer);
        }
        self.viewports.clear();
        self.pending.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::GeometryDesc;

    #[test]
    fn sweep_drops_entries_from_earlier_frames() {
        let mut cache: LiveCache<u32> = LiveCache::new();

        // Frame 1: two shapes drawn
        for key in ["a", "b"] {
            assert!(!cache.mark(key));
            cache.insert(key.to_string(), 0);
        }
        cache.sweep();
        assert_eq!(cache.len(), 2);

        // Frame 2: only one of them survives the sweep
        assert!(cache.mark("a"));
        cache.sweep();
        assert_eq!(cache.len(), 1);
        assert!(cache.get("a").is_some());
        assert!(cache.get("b").is_none());
    }

    // Dragging a dimension slider yields a new cache key per tick; without
    // per-frame sweeping each tick's buffers would live until process exit
    #[test]
    fn slider_ticks_do_not_accumulate_entries() {
        let mut cache: LiveCache<u32> = LiveCache::new();

        for tick in 0..50u32 {
            let key = GeometryDesc::sphere(1.0 + tick as f32 * 0.1, 16, 12).cache_key();
            if !cache.mark(&key) {
                cache.insert(key, tick);
            }
            cache.sweep();
            assert_eq!(cache.len(), 1);
        }
    }

    #[test]
    fn remarking_within_a_frame_keeps_one_entry() {
        let mut cache: LiveCache<u32> = LiveCache::new();
        let key = GeometryDesc::cube(2.0).cache_key();

        // Two meshes sharing one geometry hit the same slot
        assert!(!cache.mark(&key));
        cache.insert(key.clone(), 7);
        assert!(cache.mark(&key));
        cache.sweep();
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get(&key), Some(&7));
    }
}
