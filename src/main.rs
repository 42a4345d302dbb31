// Wall Probe demo: move the agent around a walled room and probe for nearby walls.
// WASD / arrows move, left mouse probes, F1 console, F3 stats, wheel zooms, Esc quits.

use std::path::PathBuf;

use bevy_ecs::prelude::*;
use glam::{Mat4, Vec2, Vec3};
use winit::{
    event::{ElementState, Event as WinitEvent, KeyEvent, WindowEvent},
    event_loop::EventLoop,
    keyboard::{KeyCode, PhysicalKey},
    window::Window,
};

use wall_probe::detector::ProximityWallDetector;
use wall_probe::engine::camera::{FollowCamera, world_to_screen};
use wall_probe::engine::console::Console;
use wall_probe::engine::debug_overlay::{DebugOverlay, DebugStats, GizmoLineDraw};
use wall_probe::engine::gizmos::GizmoBuffer;
use wall_probe::engine::input::{ActionMap, InputState};
use wall_probe::engine::level::{Scenery, spawn_level};
use wall_probe::engine::physics::{DEFAULT_CELL_SIZE, SpatialGrid};
use wall_probe::engine::{Color as EntityColor, ColliderShape, Name, Transform};
use wall_probe::settings::{AppSettings, DEFAULT_SETTINGS_PATH};

const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;
const AGENT_HALF_SIZE: f32 = 0.2;
const AGENT_COLOR: EntityColor = EntityColor::rgb(0.3, 0.8, 1.0);
const MIN_INSTANCES: usize = 1024;

// ============================================================================
// VERTEX DEFINITION
// ============================================================================

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
struct Vertex {
    position: [f32; 3],
    normal: [f32; 3],
}

impl Vertex {
    fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x3,
                },
            ],
        }
    }
}

// ============================================================================
// INSTANCE DATA (per-entity)
// ============================================================================

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
struct InstanceData {
    position: [f32; 3],
    _padding0: f32, // Align to 16 bytes
    scale: [f32; 3],
    _padding1: f32,
    color: [f32; 4],
}

impl InstanceData {
    fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<InstanceData>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance, // One per instance, not per vertex
            attributes: &[
                // Position (location 2)
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 2,
                    format: wgpu::VertexFormat::Float32x3,
                },
                // Scale (location 3)
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 4]>() as wgpu::BufferAddress,
                    shader_location: 3,
                    format: wgpu::VertexFormat::Float32x3,
                },
                // Color (location 4)
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 8]>() as wgpu::BufferAddress,
                    shader_location: 4,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Instance slots for a world that starts with `entity_count` entities.
/// Leaves as much headroom again for anything spawned later.
fn instance_capacity(entity_count: usize) -> usize {
    entity_count.saturating_mul(2).max(MIN_INSTANCES)
}

/// One instance per entity with a colour and either scenery or collider extents.
fn collect_instances(world: &World) -> Vec<InstanceData> {
    world
        .iter_entities()
        .filter_map(|entity| {
            let transform = entity.get::<Transform>()?;
            let color = entity.get::<EntityColor>()?;
            let half_extents = entity
                .get::<Scenery>()
                .map(|s| s.half_extents)
                .or_else(|| entity.get::<ColliderShape>().map(|s| s.half_extents()))?;
            Some(InstanceData {
                position: transform.position.to_array(),
                _padding0: 0.0,
                scale: half_extents.to_array(),
                _padding1: 0.0,
                color: color.to_array(),
            })
        })
        .collect()
}

/// Cube spanning [-1, 1] on every axis, 4 vertices per face so normals stay flat.
/// Instances scale it by their half extents.
fn cube_mesh() -> (Vec<Vertex>, Vec<u16>) {
    // (normal, u, v) with u x v = normal, so (-u-v, +u-v, +u+v, -u+v) winds CCW from outside.
    let faces = [
        (Vec3::X, Vec3::Y, Vec3::Z),
        (Vec3::NEG_X, Vec3::Z, Vec3::Y),
        (Vec3::Y, Vec3::Z, Vec3::X),
        (Vec3::NEG_Y, Vec3::X, Vec3::Z),
        (Vec3::Z, Vec3::X, Vec3::Y),
        (Vec3::NEG_Z, Vec3::Y, Vec3::X),
    ];

    let mut vertices = Vec::with_capacity(24);
    let mut indices = Vec::with_capacity(36);
    for (normal, u, v) in faces {
        let base = vertices.len() as u16;
        for corner in [-u - v, u - v, u + v, -u + v] {
            vertices.push(Vertex {
                position: (normal + corner).to_array(),
                normal: normal.to_array(),
            });
        }
        indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }
    (vertices, indices)
}

// ============================================================================
// UNIFORM DATA (camera only)
// ============================================================================

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
struct Uniforms {
    view_proj: [[f32; 4]; 4],
}

impl Uniforms {
    fn new() -> Self {
        Self {
            view_proj: Mat4::IDENTITY.to_cols_array_2d(),
        }
    }
}

// ============================================================================
// FRAME TIMING
// ============================================================================

#[derive(Default)]
struct FrameTimer {
    frames: u32,
    elapsed: f32,
    min_ms: f32,
    max_ms: f32,
    // Last completed one-second window
    fps: u32,
    avg_ms: f32,
    window_min_ms: f32,
    window_max_ms: f32,
}

impl FrameTimer {
    fn record(&mut self, dt: f32) {
        let ms = dt * 1000.0;
        if self.frames == 0 {
            self.min_ms = ms;
            self.max_ms = ms;
        }
        self.frames += 1;
        self.elapsed += dt;
        self.min_ms = self.min_ms.min(ms);
        self.max_ms = self.max_ms.max(ms);

        if self.elapsed >= 1.0 {
            self.fps = self.frames;
            self.avg_ms = self.elapsed * 1000.0 / self.frames as f32;
            self.window_min_ms = self.min_ms;
            self.window_max_ms = self.max_ms;
            self.frames = 0;
            self.elapsed = 0.0;
        }
    }
}

// ============================================================================
// APPLICATION STATE
// ============================================================================

struct State {
    window: std::sync::Arc<Window>,
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    size: winit::dpi::PhysicalSize<u32>,
    render_pipeline: wgpu::RenderPipeline,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    instance_buffer: wgpu::Buffer,
    depth_view: wgpu::TextureView,
    num_indices: u32,
    max_instances: usize,
    truncation_warned: bool,
    uniform_buffer: wgpu::Buffer,
    uniform_bind_group: wgpu::BindGroup,
    overlay: DebugOverlay,

    // ECS World
    world: World,
    agent: Entity,
    grid: SpatialGrid,
    last_update: std::time::Instant,

    // Detector and the host services it talks to
    detector: ProximityWallDetector,
    actions: ActionMap,
    input: InputState,
    console: Console,
    gizmos: GizmoBuffer,
    last_hit_count: Option<usize>,

    camera: FollowCamera,
    timer: FrameTimer,
}

fn create_depth_view(
    device: &wgpu::Device,
    config: &wgpu::SurfaceConfiguration,
) -> wgpu::TextureView {
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("Depth Texture"),
        size: wgpu::Extent3d {
            width: config.width.max(1),
            height: config.height.max(1),
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

impl State {
    async fn new(
        window: std::sync::Arc<Window>,
        settings: AppSettings,
    ) -> wall_probe::Result<Self> {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance
            .create_surface(window.clone())
            .expect("failed to create surface");

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .expect("no suitable GPU adapter");

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: None,
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::default(),
                },
                None,
            )
            .await
            .expect("failed to create device");

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .unwrap_or(surface_caps.formats[0]);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: surface_caps.present_modes[0],
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };

        surface.configure(&device, &config);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shader_instanced.wgsl").into()),
        });

        use wgpu::util::DeviceExt;

        let uniforms = Uniforms::new();

        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Uniform Buffer"),
            contents: bytemuck::cast_slice(&[uniforms]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let uniform_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
                label: Some("uniform_bind_group_layout"),
            });

        let uniform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &uniform_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
            label: Some("uniform_bind_group"),
        });

        let render_pipeline_layout =
            device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("Render Pipeline Layout"),
                bind_group_layouts: &[&uniform_bind_group_layout],
                push_constant_ranges: &[],
            });

        let render_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Render Pipeline"),
            layout: Some(&render_pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[Vertex::desc(), InstanceData::desc()], // Vertex + Instance buffers
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: config.format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: Some(wgpu::Face::Back),
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState {
                count: 1,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            multiview: None,
            cache: None,
        });

        let (cube_vertices, cube_indices) = cube_mesh();

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Vertex Buffer"),
            contents: bytemuck::cast_slice(cube_vertices.as_slice()),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Index Buffer"),
            contents: bytemuck::cast_slice(cube_indices.as_slice()),
            usage: wgpu::BufferUsages::INDEX,
        });

        // World, spatial index and detector
        let mut world = World::new();
        spawn_level(&mut world, &settings.level, &settings.detector.wall_tag);
        let agent = world
            .spawn((
                Name::new("Agent"),
                Transform::default(),
                Scenery {
                    half_extents: Vec3::splat(AGENT_HALF_SIZE),
                },
                AGENT_COLOR,
            ))
            .id();
        let grid = SpatialGrid::from_world(&world, DEFAULT_CELL_SIZE);

        // Instance buffer sized for the level plus headroom
        let max_instances = instance_capacity(world.entities().len() as usize);
        let instance_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Instance Buffer"),
            size: (max_instances * std::mem::size_of::<InstanceData>()) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let depth_view = create_depth_view(&device, &config);
        let overlay = DebugOverlay::new(&window, &device, surface_format);

        let actions = ActionMap::with_default_bindings();
        let input = InputState::new();
        settings.detector.validate(&actions.snapshot(&input))?;

        let mut console = Console::default();
        let mut detector = ProximityWallDetector::new(settings.detector, Vec3::ZERO);
        let wall_count = detector.initialize(&world, &mut console);
        log::info!("detector ready: {} walls registered", wall_count);

        Ok(Self {
            window,
            surface,
            device,
            queue,
            config,
            size,
            render_pipeline,
            vertex_buffer,
            index_buffer,
            instance_buffer,
            depth_view,
            num_indices: cube_indices.len() as u32,
            max_instances,
            truncation_warned: false,
            uniform_buffer,
            uniform_bind_group,
            overlay,
            world,
            agent,
            grid,
            last_update: std::time::Instant::now(),
            detector,
            actions,
            input,
            console,
            gizmos: GizmoBuffer::default(),
            last_hit_count: None,
            camera: settings.camera,
            timer: FrameTimer::default(),
        })
    }

    fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.size = new_size;
            self.config.width = new_size.width;
            self.config.height = new_size.height;
            self.surface.configure(&self.device, &self.config);
            self.depth_view = create_depth_view(&self.device, &self.config);
        }
    }

    fn update(&mut self) {
        let now = std::time::Instant::now();
        let dt = (now - self.last_update).as_secs_f32();
        self.last_update = now;
        self.timer.record(dt);

        let snapshot = self.actions.snapshot(&self.input);
        let report = self
            .detector
            .tick(dt, &snapshot, &self.grid, &mut self.console);
        if let Some(detection) = report.detection {
            self.last_hit_count = Some(detection.len());
        }

        let position = self.detector.position();
        if let Some(mut transform) = self.world.get_mut::<Transform>(self.agent) {
            transform.position = position;
        }

        self.camera.update(position, &self.input);

        self.gizmos.clear();
        self.detector.draw_gizmos(&mut self.gizmos);
    }

    fn project_gizmos(&self, view_proj: Mat4) -> Vec<GizmoLineDraw> {
        let ppp = self.overlay.pixels_per_point();
        let screen = Vec2::new(self.size.width as f32, self.size.height as f32) / ppp;
        self.gizmos
            .segments()
            .into_iter()
            .filter_map(|[a, b]| {
                let from = world_to_screen(view_proj, a, screen)?;
                let to = world_to_screen(view_proj, b, screen)?;
                Some(GizmoLineDraw {
                    from: egui::pos2(from.x, from.y),
                    to: egui::pos2(to.x, to.y),
                })
            })
            .collect()
    }

    fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        // Collect instance data from ECS BEFORE creating render pass
        let instance_data = collect_instances(&self.world);
        let instance_count = instance_data.len().min(self.max_instances);
        if instance_count < instance_data.len() && !self.truncation_warned {
            log::warn!(
                "render: {} instances exceed buffer capacity {}, drawing the first {}",
                instance_data.len(),
                self.max_instances,
                instance_count
            );
            self.truncation_warned = true;
        }

        // Write instance data to buffer BEFORE render pass
        if !instance_data.is_empty() {
            self.queue.write_buffer(
                &self.instance_buffer,
                0,
                bytemuck::cast_slice(&instance_data[..instance_count]),
            );
        }

        // Update camera uniforms
        let aspect = self.size.width as f32 / self.size.height.max(1) as f32;
        let view_proj = self.camera.view_projection(aspect);
        let uniforms = Uniforms {
            view_proj: view_proj.to_cols_array_2d(),
        };
        self.queue
            .write_buffer(&self.uniform_buffer, 0, bytemuck::cast_slice(&[uniforms]));

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: 0.05,
                            g: 0.05,
                            b: 0.1,
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

            render_pass.set_pipeline(&self.render_pipeline);
            render_pass.set_bind_group(0, &self.uniform_bind_group, &[]);
            render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
            render_pass.set_vertex_buffer(1, self.instance_buffer.slice(..)); // Instance data
            render_pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint16);
            render_pass.draw_indexed(0..self.num_indices, 0, 0..instance_count as u32);
        }

        // Overlay: gizmos, console, stats
        let gizmo_lines = self.project_gizmos(view_proj);
        let position = self.detector.position();
        let facing = self.detector.facing();
        let stats = self.overlay.stats_visible.then(|| DebugStats {
            fps: self.timer.fps,
            frame_time_avg_ms: self.timer.avg_ms,
            frame_time_min_ms: self.timer.window_min_ms,
            frame_time_max_ms: self.timer.window_max_ms,
            entity_count: self.world.entities().len() as usize,
            resolution: (self.size.width, self.size.height),
            agent_position: (position.x, position.y, position.z),
            facing: (facing.x, facing.y, facing.z),
            radius: self.detector.config().radius,
            wall_count: self.detector.walls().len(),
            last_hit_count: self.last_hit_count,
        });
        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [self.size.width, self.size.height],
            pixels_per_point: self.window.scale_factor() as f32,
        };
        self.overlay.render(
            &self.device,
            &self.queue,
            &mut encoder,
            &self.window,
            &view,
            &screen_descriptor,
            stats.as_ref(),
            &gizmo_lines,
            self.console.lines(),
        );

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}

// ============================================================================
// MAIN
// ============================================================================

fn main() {
    let env = env_logger::Env::default().default_filter_or("info");
    env_logger::Builder::from_env(env).init();

    let settings_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SETTINGS_PATH));
    let settings = match AppSettings::load(&settings_path) {
        Ok(settings) => settings,
        Err(e) => {
            log::error!("{e}");
            std::process::exit(1);
        }
    };

    let event_loop = EventLoop::new().expect("failed to create event loop");

    let window_attributes = Window::default_attributes()
        .with_title(settings.window.title.clone())
        .with_inner_size(winit::dpi::LogicalSize::new(
            settings.window.width,
            settings.window.height,
        ));

    let window = std::sync::Arc::new(
        event_loop
            .create_window(window_attributes)
            .expect("failed to create window"),
    );

    let mut state = match pollster::block_on(State::new(window.clone(), settings)) {
        Ok(state) => state,
        Err(e) => {
            log::error!("{e}");
            std::process::exit(1);
        }
    };

    event_loop
        .run(move |event, control_flow| match event {
            WinitEvent::WindowEvent {
                ref event,
                window_id,
            } if window_id == window.id() => {
                let response = state.overlay.handle_window_event(&window, event);
                if !response.consumed {
                    state.input.process_event(event);
                }

                match event {
                    WindowEvent::CloseRequested
                    | WindowEvent::KeyboardInput {
                        event:
                            KeyEvent {
                                state: ElementState::Pressed,
                                physical_key: PhysicalKey::Code(KeyCode::Escape),
                                ..
                            },
                        ..
                    } => control_flow.exit(),
                    WindowEvent::KeyboardInput {
                        event:
                            KeyEvent {
                                state: ElementState::Pressed,
                                physical_key: PhysicalKey::Code(KeyCode::F1),
                                repeat: false,
                                ..
                            },
                        ..
                    } => state.overlay.toggle_console(),
                    WindowEvent::KeyboardInput {
                        event:
                            KeyEvent {
                                state: ElementState::Pressed,
                                physical_key: PhysicalKey::Code(KeyCode::F3),
                                repeat: false,
                                ..
                            },
                        ..
                    } => state.overlay.toggle_stats(),
                    WindowEvent::Resized(physical_size) => {
                        state.resize(*physical_size);
                    }
                    WindowEvent::RedrawRequested => {
                        state.update();
                        match state.render() {
                            Ok(_) => {}
                            Err(wgpu::SurfaceError::Lost) => state.resize(state.size),
                            Err(wgpu::SurfaceError::OutOfMemory) => control_flow.exit(),
                            Err(e) => log::error!("{:?}", e),
                        }
                        state.input.end_frame();
                    }
                    _ => {}
                }
            }
            WinitEvent::AboutToWait => {
                window.request_redraw();
            }
            _ => {}
        })
        .expect("event loop failed");
}
