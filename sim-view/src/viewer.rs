//! Interactive walker-tree viewer built with eframe/egui.
//!
//! This module defines [`Viewer`], which owns the simulation, the raster
//! canvas it paints on, and the UI state, and implements [`eframe::App`]
//! so that egui's repaint loop drives one simulation frame per display
//! frame.

use eframe::App;
use sim_core::{
    branch::Branch,
    config::GrowthConfig,
    error::ConfigError,
    events::{Frame, GrowthListener},
    simulation::Simulation,
    types::Vector,
};
use tracing::{info, warn};

use crate::{canvas::Canvas, settings::Settings};

/// Records where branches were spawned during a frame.
#[derive(Default)]
struct SpawnMarks {
    positions: Vec<Vector>,
}

impl GrowthListener for SpawnMarks {
    fn on_spawn_branch(&mut self, parent: &Branch, _frame: &mut Frame<'_>) {
        self.positions.push(parent.position);
    }
}

/// Main application state for the viewer.
///
/// [`Viewer`] glues together:
/// - The simulation core: [`Simulation`] and its [`GrowthConfig`].
/// - The [`Canvas`] the tree accumulates on, and its GPU texture.
/// - UI state (run/pause, pending config edits, spawn highlighting).
///
/// ### Fields
/// - `sim` - The running simulation.
/// - `canvas` - Pixels drawn so far.
/// - `texture` - egui texture mirroring `canvas`, created on first paint.
///
/// - `draft` - Config being edited in the side panel; applied on demand.
/// - `config_error` - Why the last apply was rejected, if it was.
/// - `seed_input` - Seed shown in the top panel, used by "Reseed".
///
/// - `running` - Whether a frame is ticked on every repaint.
/// - `show_spawns` - Whether to mark where branches spawned last frame.
/// - `last_spawns` - Spawn positions from the last frame.
pub struct Viewer {
    sim: Simulation,
    canvas: Canvas,
    texture: Option<egui::TextureHandle>,

    draft: GrowthConfig,
    config_error: Option<String>,
    seed_input: u64,

    running: bool,
    show_spawns: bool,
    last_spawns: Vec<Vector>,
}

impl Viewer {
    /// Creates a viewer with a freshly planted tree.
    ///
    /// The seed comes from `settings` or, when absent, from the thread
    /// generator; either way it is logged so the run can be repeated.
    ///
    /// ### Returns
    /// A running [`Viewer`], or the error that made the default config or
    /// canvas size unusable.
    pub fn new(settings: Settings) -> Result<Self, ConfigError> {
        let seed = settings.seed.unwrap_or_else(rand::random);
        let config = GrowthConfig::default();
        let mut sim = Simulation::new(
            config,
            settings.canvas_width,
            settings.canvas_height,
            seed,
        )?;
        let mut canvas = Canvas::new(settings.canvas_width, settings.canvas_height);
        sim.reset(&mut canvas);

        info!(
            seed,
            width = settings.canvas_width,
            height = settings.canvas_height,
            "walker tree started"
        );

        Ok(Self {
            sim,
            canvas,
            texture: None,
            draft: config,
            config_error: None,
            seed_input: seed,
            running: true,
            show_spawns: false,
            last_spawns: Vec::new(),
        })
    }

    /// Wipes the canvas and plants a new root. The generator carries on,
    /// so every restart grows a different tree.
    fn reset(&mut self) {
        self.sim.reset(&mut self.canvas);
        self.last_spawns.clear();
    }

    /// Restarts with the seed from the top panel.
    fn reseed(&mut self) {
        self.sim.reseed(self.seed_input);
        info!(seed = self.seed_input, "reseeded");
        self.reset();
    }

    /// Advances the simulation by one frame and remembers where it spawned.
    fn step_once(&mut self) {
        let mut marks = SpawnMarks::default();
        self.sim.tick_observed(&mut self.canvas, &mut marks);
        self.last_spawns = marks.positions;
    }

    /// Validates the edited config and hands it to the simulation.
    fn apply_config(&mut self) {
        match self.sim.set_config(self.draft) {
            Ok(()) => {
                self.config_error = None;
                info!("growth config applied");
            }
            Err(e) => {
                warn!(error = %e, "growth config rejected");
                self.config_error = Some(e.to_string());
            }
        }
    }

    /// Canvas pixels map 1:1 onto the screen, offset by `origin`.
    fn canvas_to_screen(p: Vector, origin: egui::Pos2) -> egui::Pos2 {
        egui::pos2(origin.x + p.x, origin.y + p.y)
    }

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

    /// Builds the top panel UI (run controls, stepping, seeding).
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
                ui.add(egui::DragValue::new(&mut self.seed_input).prefix("seed = "));
                if ui.button("Reseed").clicked() {
                    self.reseed();
                }

                ui.separator();
                ui.checkbox(&mut self.show_spawns, "Show spawns");
            });
        });
    }

    /// Builds the bottom status bar (frame, population, totals).
    fn ui_status_bar(&self, ctx: &egui::Context) {
        let stats = self.sim.stats();
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(format!("depth = {}", stats.max_depth));
                ui.label(format!("peak = {}", stats.peak_population));
                ui.label(format!("deaths = {}", stats.deaths));
                ui.label(format!("branches = {}", stats.branches));
                ui.label(format!("leaves = {}", stats.leaves));
                ui.separator();
                ui.label(format!("walkers = {}", self.sim.population().len()));
                ui.label(format!("frame = {}", stats.frames));
                if self.sim.is_finished() {
                    ui.label("done");
                }
            });
        });
    }

    /// Builds the right-hand panel for editing the growth rules.
    fn ui_config_panel(&mut self, ctx: &egui::Context) {
        egui::SidePanel::right("config_panel")
            .resizable(true)
            .default_width(crate::settings::SIDE_PANEL_WIDTH)
            .show(ctx, |ui| {
                ui.heading("Config");

                ui.separator();
                ui.label("Walker");
                Self::labeled_drag_f32(ui, "step_len:", &mut self.draft.step_len, 0.1..=10.0, 0.05);
                Self::labeled_drag_f32(ui, "decay:", &mut self.draft.decay, 0.001..=1.0, 0.001);
                Self::labeled_drag_f32(
                    ui,
                    "root_size:",
                    &mut self.draft.root_size,
                    1.0..=40.0,
                    0.1,
                );

                ui.separator();
                ui.label("Chances per frame");
                Self::labeled_drag_f32(ui, "leaf:", &mut self.draft.leaf_chance, 0.0..=1.0, 0.01);
                Self::labeled_drag_f32(
                    ui,
                    "branch:",
                    &mut self.draft.branch_chance,
                    0.0..=1.0,
                    0.01,
                );

                ui.separator();
                ui.label("Children");
                Self::labeled_drag_f32(
                    ui,
                    "child_scale:",
                    &mut self.draft.child_scale,
                    0.01..=0.99,
                    0.01,
                );
                Self::labeled_drag_f32(
                    ui,
                    "branch_spread:",
                    &mut self.draft.branch_spread,
                    0.0..=3.2,
                    0.01,
                );
                Self::labeled_drag_f32(ui, "root_fan:", &mut self.draft.root_fan, 0.0..=3.2, 0.01);

                ui.separator();
                ui.label("Leaves");
                Self::labeled_drag_f32(
                    ui,
                    "leaf_base_size:",
                    &mut self.draft.leaf_base_size,
                    0.0..=40.0,
                    0.1,
                );
                Self::labeled_drag_f32(
                    ui,
                    "leaf_spread:",
                    &mut self.draft.leaf_spread,
                    0.0..=3.2,
                    0.01,
                );

                ui.separator();
                ui.label("Root anchor (canvas fraction)");
                Self::labeled_drag_f32(ui, "x:", &mut self.draft.root_anchor.x, 0.0..=1.0, 0.01);
                Self::labeled_drag_f32(ui, "y:", &mut self.draft.root_anchor.y, 0.0..=1.0, 0.01);

                ui.separator();
                ui.horizontal(|ui| {
                    if ui.button("Apply").clicked() {
                        self.apply_config();
                    }
                    if ui.button("Reset cfg to default").clicked() {
                        self.draft = GrowthConfig::default();
                    }
                });

                if let Some(err) = &self.config_error {
                    ui.colored_label(egui::Color32::RED, err.as_str());
                }
            });
    }

    /// Builds the central panel: the canvas at 1:1, click to restart.
    fn ui_central_panel(&mut self, ctx: &egui::Context) {
        if self.canvas.take_dirty() || self.texture.is_none() {
            let image = self.canvas.to_color_image();
            match &mut self.texture {
                Some(texture) => texture.set(image, egui::TextureOptions::NEAREST),
                None => {
                    self.texture =
                        Some(ctx.load_texture("canvas", image, egui::TextureOptions::NEAREST))
                }
            }
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            let size = egui::vec2(self.canvas.width() as f32, self.canvas.height() as f32);
            let (response, painter) = ui.allocate_painter(size, egui::Sense::click());
            let origin = response.rect.min;

            if let Some(texture) = &self.texture {
                painter.image(
                    texture.id(),
                    egui::Rect::from_min_size(origin, size),
                    egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                    egui::Color32::WHITE,
                );
            }

            if self.show_spawns {
                let stroke = egui::Stroke::new(1.5, egui::Color32::RED);
                for &p in &self.last_spawns {
                    painter.circle_stroke(Self::canvas_to_screen(p, origin), 4.0, stroke);
                }
            }

            if response.clicked() {
                self.reset();
            }
        });
    }
}

impl App for Viewer {
    /// eframe callback run once per display frame.
    ///
    /// Ticks the simulation when running, then lays out the panels.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.running {
            self.step_once();
            ctx.request_repaint();
        }

        self.ui_top_panel(ctx);
        self.ui_status_bar(ctx);
        self.ui_config_panel(ctx);
        self.ui_central_panel(ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewer() -> Viewer {
        Viewer::new(Settings {
            seed: Some(21),
            canvas_width: 200,
            canvas_height: 160,
        })
        .expect("default config is valid")
    }

    #[test]
    fn new_plants_root_and_runs() {
        let viewer = viewer();

        assert!(viewer.running);
        assert_eq!(viewer.sim.seed(), 21);
        assert_eq!(viewer.seed_input, 21);
        assert_eq!(viewer.sim.population().len(), 1);
        assert_eq!(viewer.sim.root_position(), Vector::new(100.0, 120.0));
    }

    #[test]
    fn rejects_empty_canvas() {
        let result = Viewer::new(Settings {
            seed: Some(1),
            canvas_width: 0,
            canvas_height: 10,
        });
        assert!(matches!(result, Err(ConfigError::CanvasSize(0, 10))));
    }

    #[test]
    fn step_once_draws_and_advances() {
        let mut viewer = viewer();
        viewer.canvas.take_dirty();

        viewer.step_once();

        assert_eq!(viewer.sim.stats().frames, 1);
        assert!(viewer.canvas.take_dirty());
        // The root's first stroke starts at its anchor.
        assert_ne!(
            viewer.canvas.pixel(100, 120),
            Some(image::Rgba([255, 255, 255, 255]))
        );
    }

    #[test]
    fn step_once_records_spawns_of_the_last_frame() {
        let mut viewer = viewer();
        viewer.draft.branch_chance = 1.0;
        viewer.apply_config();

        viewer.step_once();
        assert_eq!(viewer.last_spawns, vec![Vector::new(100.0, 120.0)]);

        viewer.step_once();
        assert_eq!(viewer.last_spawns.len(), 2);
    }

    #[test]
    fn reset_restores_single_root() {
        let mut viewer = viewer();
        for _ in 0..50 {
            viewer.step_once();
        }
        viewer.last_spawns.push(Vector::ZERO);

        viewer.reset();

        assert_eq!(viewer.sim.population().len(), 1);
        assert_eq!(viewer.sim.stats().frames, 0);
        assert!(viewer.last_spawns.is_empty());
        assert_eq!(
            viewer.canvas.pixel(100, 100),
            Some(image::Rgba([255, 255, 255, 255]))
        );
    }

    #[test]
    fn invalid_config_is_rejected_and_kept_out() {
        let mut viewer = viewer();
        viewer.draft.decay = 0.0;

        viewer.apply_config();

        assert!(viewer.config_error.is_some());
        assert_eq!(viewer.sim.config().decay, GrowthConfig::default().decay);

        viewer.draft = GrowthConfig::default();
        viewer.apply_config();
        assert!(viewer.config_error.is_none());
    }

    #[test]
    fn reseed_repeats_the_same_growth() {
        let mut a = viewer();
        let mut b = viewer();
        a.seed_input = 77;
        b.seed_input = 77;
        a.reseed();
        b.reseed();

        for _ in 0..40 {
            a.step_once();
            b.step_once();
        }

        assert_eq!(a.sim.stats(), b.sim.stats());
        assert_eq!(a.canvas.to_color_image().pixels, b.canvas.to_color_image().pixels);
    }
}
