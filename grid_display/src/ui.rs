// ui.rs - Controls, canvas and pointer wiring for the viewer

use std::time::Instant;

use conway::{InputEffect, PlaybackState, patterns};
use eframe::egui;
use egui::{Sense, Slider};
use tracing::debug;

use crate::ViewerApp;
use crate::surface::{CachedFrame, ShapeSurface, from_color32, local, to_color32};

impl ViewerApp {
    fn controls(&mut self, ui: &mut egui::Ui, now: Instant) {
        ui.horizontal(|ui| {
            match self.sim.state() {
                PlaybackState::Idle => {
                    if ui.button("▶ Start").clicked() {
                        self.sim.start(now);
                    }
                }
                PlaybackState::Running => {
                    if ui.button("⏸ Stop").clicked() {
                        self.sim.stop();
                    }
                }
            }

            if ui.button("⏹ Reset").clicked() {
                self.sim.reset();
            }

            ui.separator();

            ui.label("Steps:");
            ui.add(egui::TextEdit::singleline(&mut self.step_input).desired_width(48.0));
            if ui.button("Step").clicked() {
                self.sim.advance_steps_from_input(&self.step_input, now);
            }
            let pending = self.sim.scheduler().pending_steps();
            if pending > 0 && ui.button(format!("Cancel ({pending})")).clicked() {
                self.sim.cancel_steps();
            }

            ui.separator();

            ui.label(format!("Generation: {}", self.sim.generation()));
        });

        ui.horizontal(|ui| {
            ui.label("Speed:");
            let mut speed_ms = self.sim.scheduler().speed().as_millis() as u64;
            if ui
                .add(Slider::new(&mut speed_ms, 10..=1000).suffix(" ms"))
                .changed()
            {
                self.sim.set_speed(speed_ms);
            }

            ui.separator();

            ui.label("Pattern:");
            egui::ComboBox::from_id_source("pattern_selector")
                .selected_text(patterns::PATTERNS[self.selected_pattern].name)
                .show_ui(ui, |ui| {
                    for (i, pattern) in patterns::PATTERNS.iter().enumerate() {
                        ui.selectable_value(&mut self.selected_pattern, i, pattern.name);
                    }
                });
            if ui.button("Apply Pattern").clicked() {
                self.sim.load_pattern(&patterns::PATTERNS[self.selected_pattern]);
            }
            if ui.button("🎲 Random").clicked() {
                self.sim.randomize(self.random_seed, 0.33);
                self.random_seed += 1;
            }
        });

        ui.horizontal(|ui| {
            let mut palette = *self.sim.renderer().palette();
            let mut alive = to_color32(palette.alive);
            let mut dead = to_color32(palette.dead);
            ui.label("Live:");
            let live_changed = ui.color_edit_button_srgba(&mut alive).changed();
            ui.label("Dead:");
            let dead_changed = ui.color_edit_button_srgba(&mut dead).changed();
            if live_changed || dead_changed {
                palette.alive = from_color32(alive);
                palette.dead = from_color32(dead);
                self.sim.set_palette(palette);
            }

            ui.separator();
            let viewport = self.sim.viewport();
            let (cell_size, offset) = (viewport.cell_size(), viewport.offset());
            ui.label(format!(
                "Zoom: {cell_size:.0} px  Offset: ({:.0}, {:.0})",
                offset.0, offset.1
            ));
        });
    }

    fn canvas(&mut self, ui: &mut egui::Ui) {
        let (response, painter) =
            ui.allocate_painter(ui.available_size(), Sense::click_and_drag());
        let canvas = response.rect;

        let (pressed, released, pointer, scroll_y) = ui.input(|i| {
            (
                i.pointer.primary_pressed(),
                i.pointer.primary_released(),
                i.pointer.interact_pos(),
                i.scroll_delta.y,
            )
        });

        if let Some(pos) = pointer {
            let (x, y) = local(canvas, pos);
            if pressed && response.hovered() {
                self.input.pointer_down(x, y);
            }
            self.input.pointer_move(&mut self.sim, x, y);
            if released {
                let effect = self.input.pointer_up(&mut self.sim, x, y);
                if let InputEffect::Toggled { col, row } = effect {
                    // No audio backend; the cue is only traced.
                    debug!(col, row, "click cue");
                }
            }
        }

        // The canvas is not inside a scroll area, so the wheel only zooms.
        // egui reports wheel-up as positive, the opposite of a DOM deltaY.
        if response.hovered() && scroll_y != 0.0 {
            self.input.wheel(&mut self.sim, -scroll_y);
        }

        let stale = self.sim.needs_redraw()
            || self.frame.as_ref().is_none_or(|frame| frame.canvas != canvas);
        if stale {
            let mut surface = ShapeSurface::new(canvas);
            self.sim.render(&mut surface);
            self.frame = Some(CachedFrame {
                canvas,
                shapes: surface.into_shapes(),
            });
        }
        if let Some(frame) = &self.frame {
            painter
                .with_clip_rect(canvas)
                .extend(frame.shapes.iter().cloned());
        }
    }
}

impl eframe::App for ViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();
        self.sim.poll(now);

        egui::TopBottomPanel::top("controls").show(ctx, |ui| {
            ui.heading("Conway's Game of Life");
            self.controls(ui, now);
            ui.label("Drag to pan, scroll to zoom, click a cell to toggle it.");
        });

        egui::TopBottomPanel::bottom("stats").show(ctx, |ui| {
            let stats = self.sim.stats();
            ui.horizontal(|ui| {
                ui.label(format!("Live cells: {}", stats.population));
                ui.label(format!("Dead cells: {}", stats.cells - stats.population));
                ui.label(format!("Population: {:.1}%", stats.population_percent()));
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| self.canvas(ui));

        // Wake up again when the next generation is due.
        if let Some(deadline) = self.sim.next_deadline() {
            ctx.request_repaint_after(deadline.saturating_duration_since(Instant::now()));
        }
    }
}
