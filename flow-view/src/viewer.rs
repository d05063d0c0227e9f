//! Interactive flow field viewer built with eframe/egui.
//!
//! This module defines [`Viewer`], which owns the simulation state
//! (particle field, wave backdrop, frame buffer, configuration) and
//! implements [`eframe::App`] to advance and present one frame per
//! repaint.

use eframe::App;
use flow_core::config::FieldConfig;
use flow_core::field::ParticleField;
use flow_core::frame::FrameBuffer;
use flow_core::noise::{Seed, SimplexNoise};
use flow_core::trail::TrailBuffer;
use flow_core::waves::{WaveConfig, WaveField, WaveSpeed};

/// Which effect fills the central panel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Backdrop {
    Particles,
    Waves,
}

/// Main application state for the interactive viewer.
///
/// The typical per-frame update is:
/// 1. Match the frame buffer and field bounds to the panel size.
/// 2. If `running`, advance the active effect once and composite it into
///    the frame buffer.
/// 3. Upload the frame as a texture and paint it.
///
/// Dropping the viewer (closing the window) stops the repaint loop; there
/// is nothing else to tear down.
pub struct Viewer {
    field: ParticleField,
    waves: WaveField,
    trails: TrailBuffer,
    frame: FrameBuffer,
    noise: SimplexNoise,

    cfg: FieldConfig,
    wave_cfg: WaveConfig,
    backdrop: Backdrop,

    rng: rand::rngs::ThreadRng,

    running: bool,
    texture: Option<egui::TextureHandle>,

    last_frame_time: f64,
    last_frame_dt: f64,
}

impl Viewer {
    /// Creates a viewer for the given configurations and noise seed.
    ///
    /// The field starts with zero-size bounds and degenerates to an empty
    /// frame until the first layout pass reports the panel size.
    pub fn new(cfg: FieldConfig, wave_cfg: WaveConfig, seed: Seed) -> Self {
        let mut rng = rand::rng();
        let field = ParticleField::new(&cfg, 0.0, 0.0, &mut rng);
        Self {
            field,
            waves: WaveField::new(),
            trails: TrailBuffer::with_capacity(cfg.count),
            frame: FrameBuffer::new(0, 0),
            noise: SimplexNoise::new(seed),
            cfg,
            wave_cfg,
            backdrop: Backdrop::Particles,
            rng,
            running: true,
            texture: None,
            last_frame_time: 0.0,
            last_frame_dt: 0.0,
        }
    }

    /// Re-seeds the pool, restarts the wave phase, and pauses.
    fn reset(&mut self) {
        self.field.reseed(&self.cfg, &mut self.rng);
        self.waves = WaveField::new();
        self.trails.clear();
        self.frame.clear();
        self.running = false;
    }

    /// Advances the active effect by one frame and re-renders the buffer.
    fn step_once(&mut self) {
        match self.backdrop {
            Backdrop::Particles => {
                self.field
                    .advance(&self.cfg, &self.noise, &mut self.rng, &mut self.trails);
                self.frame.composite(&self.trails, self.cfg.background);
            }
            Backdrop::Waves => {
                self.waves.advance(&self.wave_cfg);
                self.waves
                    .composite(&mut self.frame, &self.noise, &self.wave_cfg);
            }
        }
    }

    /// Matches the canvas and field bounds to the panel size, reallocating
    /// the frame buffer when they differ. Zero is legal.
    fn sync_size(&mut self, width: usize, height: usize) {
        if self.frame.width() != width || self.frame.height() != height {
            tracing::debug!(width, height, "canvas resized");
            self.frame.resize(width, height);
            self.field.resize(width as f32, height as f32);
        }
    }

    /// Reallocates the pool after a particle-count change in the UI.
    fn sync_count(&mut self) {
        if self.cfg.count != self.field.len() {
            self.field.reseed(&self.cfg, &mut self.rng);
        }
    }

    /// Switches the backdrop effect, clearing the stale frame.
    fn set_backdrop(&mut self, backdrop: Backdrop) {
        if self.backdrop != backdrop {
            self.backdrop = backdrop;
            self.frame.clear();
        }
    }

    /// Helper to draw a labeled `f32` [`egui::DragValue`].
    fn labeled_drag_f32(
        ui: &mut egui::Ui,
        label: &str,
        value: &mut f32,
        range: std::ops::RangeInclusive<f32>,
        speed: f64,
    ) {
        ui.horizontal(|ui| {
            ui.label(label);
            ui.add(egui::DragValue::new(value).range(range).speed(speed));
        });
    }

    /// Helper to draw a labeled `u32` [`egui::DragValue`].
    fn labeled_drag_u32(
        ui: &mut egui::Ui,
        label: &str,
        value: &mut u32,
        range: std::ops::RangeInclusive<u32>,
        speed: f64,
    ) {
        ui.horizontal(|ui| {
            ui.label(label);
            ui.add(egui::DragValue::new(value).range(range).speed(speed));
        });
    }

    /// Helper to draw a labeled `usize` [`egui::DragValue`].
    fn labeled_drag_usize(
        ui: &mut egui::Ui,
        label: &str,
        value: &mut usize,
        range: std::ops::RangeInclusive<usize>,
        speed: f64,
    ) {
        ui.horizontal(|ui| {
            ui.label(label);
            ui.add(egui::DragValue::new(value).range(range).speed(speed));
        });
    }

    /// Builds the top panel (run controls, stepping, backdrop selector).
    fn ui_top_panel(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui
                    .button(if self.running { "⏸ Pause" } else { "▶ Run" })
                    .clicked()
                {
                    self.running = !self.running;
                }

                if ui.button("Step").clicked() {
                    self.step_once();
                }

                if ui.button("Reset").clicked() {
                    self.reset();
                }

                ui.separator();

                if ui
                    .selectable_label(self.backdrop == Backdrop::Particles, "Particles")
                    .clicked()
                {
                    self.set_backdrop(Backdrop::Particles);
                }
                if ui
                    .selectable_label(self.backdrop == Backdrop::Waves, "Waves")
                    .clicked()
                {
                    self.set_backdrop(Backdrop::Waves);
                }
            });
        });
    }

    /// Builds the bottom status bar (frame counter, pool size, timing).
    fn ui_status_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(format!("dt last = {:.3} s", self.last_frame_dt));
                ui.separator();
                ui.label(format!("tick = {}", self.field.tick));
                ui.label(format!("particles = {}", self.field.len()));
                ui.label(format!(
                    "canvas = {}×{}",
                    self.frame.width(),
                    self.frame.height()
                ));
            });
        });
    }

    /// Builds the right-hand configuration panel.
    fn ui_config_panel(&mut self, ctx: &egui::Context) {
        egui::SidePanel::right("config_panel")
            .resizable(true)
            .default_width(230.0)
            .show(ctx, |ui| {
                ui.heading("Config");

                ui.separator();
                ui.label("Pool");
                Self::labeled_drag_usize(ui, "count:", &mut self.cfg.count, 0..=20_000, 10.0);
                Self::labeled_drag_f32(ui, "range_y:", &mut self.cfg.range_y, 0.0..=2000.0, 1.0);

                ui.separator();
                ui.label("Motion");
                Self::labeled_drag_f32(
                    ui,
                    "base_speed:",
                    &mut self.cfg.base_speed,
                    0.0..=10.0,
                    0.05,
                );
                Self::labeled_drag_f32(
                    ui,
                    "range_speed:",
                    &mut self.cfg.range_speed,
                    0.0..=10.0,
                    0.05,
                );

                ui.separator();
                ui.label("Stroke");
                Self::labeled_drag_f32(
                    ui,
                    "base_radius:",
                    &mut self.cfg.base_radius,
                    0.0..=20.0,
                    0.1,
                );
                Self::labeled_drag_f32(
                    ui,
                    "range_radius:",
                    &mut self.cfg.range_radius,
                    0.0..=20.0,
                    0.1,
                );

                ui.separator();
                ui.label("Color");
                Self::labeled_drag_f32(ui, "base_hue:", &mut self.cfg.base_hue, 0.0..=360.0, 1.0);
                Self::labeled_drag_f32(ui, "range_hue:", &mut self.cfg.range_hue, 0.0..=360.0, 1.0);

                ui.separator();
                ui.label("Lifetime (frames)");
                Self::labeled_drag_u32(ui, "base_ttl:", &mut self.cfg.base_ttl, 0..=2000, 1.0);
                Self::labeled_drag_u32(ui, "range_ttl:", &mut self.cfg.range_ttl, 0..=2000, 1.0);

                ui.separator();
                ui.label("Noise");
                Self::labeled_drag_f32(ui, "x_off:", &mut self.cfg.x_off, 0.0..=0.1, 0.0001);
                Self::labeled_drag_f32(ui, "y_off:", &mut self.cfg.y_off, 0.0..=0.1, 0.0001);
                Self::labeled_drag_f32(ui, "z_off:", &mut self.cfg.z_off, 0.0..=0.1, 0.0001);
                Self::labeled_drag_u32(ui, "noise_steps:", &mut self.cfg.noise_steps, 0..=16, 1.0);

                ui.separator();
                ui.label("Waves");
                Self::labeled_drag_f32(
                    ui,
                    "stroke_width:",
                    &mut self.wave_cfg.stroke_width,
                    0.0..=200.0,
                    1.0,
                );
                Self::labeled_drag_f32(ui, "opacity:", &mut self.wave_cfg.opacity, 0.0..=1.0, 0.01);
                Self::labeled_drag_usize(ui, "blur:", &mut self.wave_cfg.blur, 0..=40, 1.0);
                Self::labeled_drag_usize(
                    ui,
                    "wave_count:",
                    &mut self.wave_cfg.wave_count,
                    0..=16,
                    1.0,
                );
                ui.horizontal(|ui| {
                    ui.label("speed:");
                    if ui
                        .selectable_label(self.wave_cfg.speed == WaveSpeed::Slow, "slow")
                        .clicked()
                    {
                        self.wave_cfg.speed = WaveSpeed::Slow;
                    }
                    if ui
                        .selectable_label(self.wave_cfg.speed == WaveSpeed::Fast, "fast")
                        .clicked()
                    {
                        self.wave_cfg.speed = WaveSpeed::Fast;
                    }
                });

                ui.separator();
                if ui.button("Reset cfg to default").clicked() {
                    self.cfg = FieldConfig::default();
                    self.wave_cfg = WaveConfig::default();
                }

                self.sync_count();
            });
    }

    /// Builds the central panel: sizes the canvas, advances the effect
    /// when running, and paints the rendered frame.
    fn ui_central_panel(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let response = ui.allocate_response(ui.available_size(), egui::Sense::hover());
            let rect = response.rect;

            self.sync_size(
                rect.width().max(0.0) as usize,
                rect.height().max(0.0) as usize,
            );

            if self.running {
                let now = ctx.input(|i| i.time);
                if self.last_frame_time > 0.0 {
                    self.last_frame_dt = now - self.last_frame_time;
                }
                self.step_once();
                self.last_frame_time = now;

                ctx.request_repaint();
            }

            if self.frame.width() > 0 && self.frame.height() > 0 {
                let image = egui::ColorImage::from_rgba_unmultiplied(
                    [self.frame.width(), self.frame.height()],
                    &self.frame.to_rgba8(),
                );
                match &mut self.texture {
                    Some(texture) => texture.set(image, egui::TextureOptions::LINEAR),
                    None => {
                        self.texture =
                            Some(ctx.load_texture("flow-frame", image, egui::TextureOptions::LINEAR));
                    }
                }
                if let Some(texture) = &self.texture {
                    ui.painter_at(rect).image(
                        texture.id(),
                        rect,
                        egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                        egui::Color32::WHITE,
                    );
                }
            }
        });
    }
}

impl App for Viewer {
    /// eframe callback that builds all UI panels for each frame.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.ui_top_panel(ctx);
        self.ui_status_bar(ctx);
        self.ui_config_panel(ctx);
        self.ui_central_panel(ctx);
    }
}
