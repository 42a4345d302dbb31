use egui::epaint::Shadow;

/// Console lines shown at once; older lines stay in the buffer.
const CONSOLE_VISIBLE_LINES: usize = 18;

pub struct DebugStats {
    pub fps: u32,
    pub frame_time_avg_ms: f32,
    pub frame_time_min_ms: f32,
    pub frame_time_max_ms: f32,
    pub entity_count: usize,
    pub resolution: (u32, u32),
    pub agent_position: (f32, f32, f32),
    pub facing: (f32, f32, f32),
    pub radius: f32,
    /// Size of the wall registry captured at startup.
    pub wall_count: usize,
    /// Hits from the most recent detect query. `None` until the first one.
    pub last_hit_count: Option<usize>,
}

/// One gizmo line segment, already projected to egui screen points.
pub struct GizmoLineDraw {
    pub from: egui::Pos2,
    pub to: egui::Pos2,
}

pub struct DebugOverlay {
    pub stats_visible: bool,
    pub console_visible: bool,
    egui_ctx: egui::Context,
    egui_state: egui_winit::State,
    egui_renderer: egui_wgpu::Renderer,
}

impl DebugOverlay {
    pub fn new(
        window: &winit::window::Window,
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
    ) -> Self {
        let egui_ctx = egui::Context::default();

        // Style: dark, semi-transparent, small monospace white font
        let mut visuals = egui::Visuals::dark();
        visuals.window_fill = egui::Color32::from_rgba_premultiplied(0, 0, 0, 180);
        visuals.window_stroke = egui::Stroke::NONE;
        visuals.window_shadow = Shadow::NONE;
        visuals.override_text_color = Some(egui::Color32::WHITE);
        egui_ctx.set_visuals(visuals);

        let mut style = (*egui_ctx.style()).clone();
        style.override_font_id = Some(egui::FontId::monospace(13.0));
        egui_ctx.set_style(style);

        let egui_state = egui_winit::State::new(
            egui_ctx.clone(),
            egui::ViewportId::ROOT,
            window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );

        let egui_renderer = egui_wgpu::Renderer::new(
            device,
            surface_format,
            None,  // no depth
            1,     // msaa samples
            false, // no dithering
        );

        Self {
            stats_visible: false,
            console_visible: true,
            egui_ctx,
            egui_state,
            egui_renderer,
        }
    }

    pub fn toggle_stats(&mut self) {
        self.stats_visible = !self.stats_visible;
    }

    pub fn toggle_console(&mut self) {
        self.console_visible = !self.console_visible;
    }

    /// Points per physical pixel; divide physical coordinates by this to get egui points.
    pub fn pixels_per_point(&self) -> f32 {
        self.egui_ctx.pixels_per_point()
    }

    pub fn handle_window_event(
        &mut self,
        window: &winit::window::Window,
        event: &winit::event::WindowEvent,
    ) -> egui_winit::EventResponse {
        self.egui_state.on_window_event(window, event)
    }

    /// Render one egui frame covering all optional debug layers:
    ///
    /// - `gizmo_lines`   — wire-sphere segments around the agent.
    /// - `console_lines` — detector console, bottom-left (F1).
    /// - `stats`         — stats panel, top-left (F3, `None` = hidden).
    pub fn render<'a>(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        window: &winit::window::Window,
        view: &wgpu::TextureView,
        screen_descriptor: &egui_wgpu::ScreenDescriptor,
        stats: Option<&DebugStats>,
        gizmo_lines: &[GizmoLineDraw],
        console_lines: impl Iterator<Item = &'a str>,
    ) {
        let raw_input = self.egui_state.take_egui_input(window);
        let console_visible = self.console_visible;
        let console: Vec<&str> = if console_visible {
            let all: Vec<&str> = console_lines.collect();
            let skip = all.len().saturating_sub(CONSOLE_VISIBLE_LINES);
            all[skip..].to_vec()
        } else {
            Vec::new()
        };

        let full_output = self.egui_ctx.run(raw_input, |ctx| {
            // ── gizmos: drawn on the background layer, under the panels ─────
            if !gizmo_lines.is_empty() {
                let painter = ctx.layer_painter(egui::LayerId::new(
                    egui::Order::Background,
                    egui::Id::new("gizmos"),
                ));
                let stroke = egui::Stroke::new(
                    1.5,
                    egui::Color32::from_rgba_unmultiplied(80, 255, 140, 220),
                );
                for line in gizmo_lines {
                    painter.line_segment([line.from, line.to], stroke);
                }
            }

            // ── F1: console panel ────────────────────────────────────────────
            if console_visible {
                egui::Area::new(egui::Id::new("console"))
                    .anchor(egui::Align2::LEFT_BOTTOM, egui::vec2(10.0, -10.0))
                    .show(ctx, |ui| {
                        egui::Frame::none()
                            .fill(egui::Color32::from_rgba_premultiplied(0, 0, 0, 180))
                            .inner_margin(egui::Margin::same(8.0))
                            .rounding(4.0)
                            .show(ui, |ui: &mut egui::Ui| {
                                ui.label("Console");
                                ui.separator();
                                if console.is_empty() {
                                    ui.label("(empty)");
                                }
                                for line in &console {
                                    ui.label(*line);
                                }
                            });
                    });
            }

            // ── F3: stats panel ──────────────────────────────────────────────
            if let Some(stats) = stats {
                egui::Area::new(egui::Id::new("debug_overlay"))
                    .fixed_pos(egui::pos2(10.0, 10.0))
                    .show(ctx, |ui| {
                        egui::Frame::none()
                            .fill(egui::Color32::from_rgba_premultiplied(0, 0, 0, 180))
                            .inner_margin(egui::Margin::same(8.0))
                            .rounding(4.0)
                            .show(ui, |ui: &mut egui::Ui| {
                                ui.label(format!("FPS: {}", stats.fps));
                                ui.label(format!(
                                    "Frame: {:.2} ms (min: {:.1} | max: {:.1})",
                                    stats.frame_time_avg_ms,
                                    stats.frame_time_min_ms,
                                    stats.frame_time_max_ms
                                ));
                                ui.label(format!("Entities: {}", stats.entity_count));
                                ui.label(format!(
                                    "Resolution: {} x {}",
                                    stats.resolution.0, stats.resolution.1
                                ));
                                ui.label(format!(
                                    "Agent: ({:.2}, {:.2}, {:.2})",
                                    stats.agent_position.0,
                                    stats.agent_position.1,
                                    stats.agent_position.2
                                ));
                                ui.label(format!(
                                    "Facing: ({:.2}, {:.2}, {:.2})",
                                    stats.facing.0, stats.facing.1, stats.facing.2
                                ));
                                ui.label(format!(
                                    "Radius: {:.2}  Walls: {}",
                                    stats.radius, stats.wall_count
                                ));
                                match stats.last_hit_count {
                                    Some(n) => ui.label(format!("Last detect: {} hits", n)),
                                    None => ui.label("Last detect: -"),
                                };
                            });
                    });
            }
        });

        self.egui_state
            .handle_platform_output(window, full_output.platform_output);

        let tris = self
            .egui_ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);

        for (id, image_delta) in &full_output.textures_delta.set {
            self.egui_renderer
                .update_texture(device, queue, *id, image_delta);
        }

        self.egui_renderer
            .update_buffers(device, queue, encoder, &tris, screen_descriptor);

        {
            let render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("egui Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Load,
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            self.egui_renderer
                .render(&mut render_pass.forget_lifetime(), &tris, screen_descriptor);
        }

        for id in &full_output.textures_delta.free {
            self.egui_renderer.free_texture(id);
        }
    }
}
