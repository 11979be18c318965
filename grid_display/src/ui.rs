// ui.rs - egui front end: controls, viewport sizing, painting and clicks

use std::time::{Duration, Instant};

use conway::{Cadence, CellState, LifeEngine};
use eframe::egui;
use egui::{Color32, Rect, Stroke, Vec2};
use tracing::warn;

use crate::config::{AppConfig, DisplayConfig};
use crate::viewport;

/// Render driver around a [`LifeEngine`].
pub struct LifeApp {
    engine: LifeEngine,
    display: DisplayConfig,
    reseed_probability: Option<f64>,
    density: f64,
    live_color: Color32,
    dead_color: Color32,
    dying_color: Color32,
    last_frame: Instant,
}

impl LifeApp {
    pub fn new(config: AppConfig) -> conway::Result<Self> {
        let AppConfig {
            life,
            display,
            start_paused,
        } = config;
        let reseed_probability = life.initial_alive_probability;
        let mut engine = LifeEngine::new(life)?;
        engine.set_paused(start_paused);

        Ok(Self {
            engine,
            reseed_probability,
            density: reseed_probability.unwrap_or(0.33),
            live_color: DisplayConfig::color(display.live_color),
            dead_color: DisplayConfig::color(display.dead_color),
            dying_color: DisplayConfig::color(display.dying_color),
            display,
            last_frame: Instant::now(),
        })
    }

    fn controls(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            let paused = self.engine.is_paused();
            let button_text = if paused { "▶ Start" } else { "⏸ Pause" };
            if ui.button(button_text).clicked() {
                self.set_paused(!paused, Instant::now());
            }

            if ui.add_enabled(paused, egui::Button::new("⏭ Step")).clicked() {
                self.engine.step();
            }

            if ui.button("⏹ Clear").clicked() {
                self.engine.clear();
            }

            if ui.button("🎲 Random").clicked() {
                self.randomize(self.density);
            }
            ui.add(egui::Slider::new(&mut self.density, 0.0..=1.0).text("density"));

            ui.separator();
            ui.label(format!("Generation: {}", self.engine.generation()));
        });

        ui.horizontal(|ui| {
            ui.label("Speed:");
            match self.engine.cadence() {
                Cadence::EveryNthFrame(divisor) => {
                    let mut divisor = divisor;
                    let slider = egui::Slider::new(&mut divisor, 1..=60).suffix(" frames/gen");
                    if ui.add(slider).changed() {
                        self.apply_cadence(Cadence::EveryNthFrame(divisor));
                    }
                }
                Cadence::Interval(interval) => {
                    let mut speed = 1.0 / interval.as_secs_f32();
                    let slider = egui::Slider::new(&mut speed, 0.5..=90.0).suffix(" gen/sec");
                    if ui.add(slider).changed() {
                        self.apply_cadence(Cadence::Interval(Duration::from_secs_f32(1.0 / speed)));
                    }
                }
            }

            ui.separator();

            let mut fade = self.engine.fade_dying();
            if ui.checkbox(&mut fade, "Fade dying").changed() {
                self.engine.set_fade_dying(fade);
            }

            ui.label("Live:");
            ui.color_edit_button_srgba(&mut self.live_color);
            ui.label("Dead:");
            ui.color_edit_button_srgba(&mut self.dead_color);
            ui.label("Dying:");
            ui.color_edit_button_srgba(&mut self.dying_color);
        });
    }

    /// Resuming restarts the frame clock so the pause is not counted as
    /// elapsed simulation time.
    fn set_paused(&mut self, paused: bool, now: Instant) {
        if !paused {
            self.last_frame = now;
        }
        self.engine.set_paused(paused);
    }

    fn randomize(&mut self, probability: f64) {
        if let Err(err) = self.engine.randomize(probability) {
            warn!(%err, "Randomize rejected");
        }
    }

    fn apply_cadence(&mut self, cadence: Cadence) {
        if let Err(err) = self.engine.set_cadence(cadence) {
            warn!(%err, "Cadence rejected");
        }
    }

    /// Follows the viewport: the grid is rebuilt whenever the fitted size changes.
    fn fit_to(&mut self, available: Vec2) {
        let dims = viewport::grid_dimensions(available, self.display.pitch());
        if dims == self.engine.grid().dimensions() {
            return;
        }
        if let Err(err) = self.engine.resize(dims.0, dims.1) {
            warn!(%err, "Viewport resize rejected");
            return;
        }
        if let Some(probability) = self.reseed_probability {
            self.randomize(probability);
        }
    }

    fn palette(&self) -> Palette {
        Palette {
            live: self.live_color,
            dead: self.dead_color,
            dying: self.dying_color,
        }
    }
}

#[derive(Clone, Copy)]
struct Palette {
    live: Color32,
    dead: Color32,
    dying: Color32,
}

impl Palette {
    fn color(self, state: CellState) -> Color32 {
        match state {
            CellState::Alive => self.live,
            CellState::Dead => self.dead,
            CellState::JustDied => self.dying,
        }
    }
}

impl eframe::App for LifeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();
        let elapsed = now - self.last_frame;
        self.last_frame = now;

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Conway's Game of Life");
            self.controls(ui);

            ui.separator();
            ui.label("Click cells to toggle them alive/dead at any time.");
            ui.separator();

            let footer = ui.spacing().interact_size.y * 2.0;
            if self.display.fit_to_viewport {
                self.fit_to(ui.available_size() - Vec2::new(0.0, footer));
            }

            let pitch = self.display.pitch();
            let box_size = self.display.cell_size;
            let spacing = self.display.spacing;
            let palette = self.palette();
            let grid = self.engine.tick(elapsed);
            let dims = grid.dimensions();

            let start_pos = ui.cursor().min;
            let total_size = Vec2::new(
                pitch * dims.0 as f32 - spacing,
                pitch * dims.1 as f32 - spacing,
            );
            let (response, painter) = ui.allocate_painter(total_size, egui::Sense::click());

            painter.rect_filled(Rect::from_min_size(start_pos, total_size), 0.0, Color32::BLACK);

            for (y, row) in grid.rows().enumerate() {
                for (x, &cell) in row.iter().enumerate() {
                    let rect = Rect::from_min_size(
                        viewport::cell_origin(start_pos, pitch, x, y),
                        Vec2::splat(box_size),
                    );
                    painter.rect_filled(rect, 1.0, palette.color(cell));
                    painter.rect_stroke(rect, 1.0, Stroke::new(0.2, Color32::from_gray(60)));
                }
            }

            let live_cells = grid.live_count();
            let total_cells = dims.0 * dims.1;

            if response.clicked() {
                if let Some(pos) = response.interact_pointer_pos() {
                    if let Some((x, y)) = viewport::cell_at(pos, start_pos, pitch, dims) {
                        if let Err(err) = self.engine.toggle_cell(x, y) {
                            warn!(%err, "Toggle rejected");
                        }
                    }
                }
            }

            ui.separator();
            ui.horizontal(|ui| {
                ui.label(format!("Grid: {}x{}", dims.0, dims.1));
                ui.label(format!("Live cells: {live_cells}"));
                ui.label(format!("Dead cells: {}", total_cells - live_cells));
                ui.label(format!(
                    "Population: {:.1}%",
                    live_cells as f32 / total_cells as f32 * 100.0
                ));
            });
        });

        // Keep frames coming so the cadence gate sees every one.
        if !self.engine.is_paused() {
            ctx.request_repaint();
        }
    }
}
