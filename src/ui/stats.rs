use egui_macroquad::egui;
use egui_plot::{Line, Plot, PlotPoints};
use flappy::simulation::params::Params;
use flappy::simulation::world::World;
use std::collections::VecDeque;

use super::ui::UIState;

pub(super) fn draw_stats_panel(
    egui_ctx: &egui::Context,
    state: &mut UIState,
    world: &World,
    params: &mut Params,
    alive: usize,
) {
    egui::SidePanel::right("stats_panel")
        .default_width(300.0)
        .resizable(true)
        .show(egui_ctx, |ui| {
            ui.heading("Statistics");
            ui.separator();

            // Settings persistence
            ui.horizontal(|ui| {
                if ui.button("💾 Save settings").clicked() {
                    state.save_requested = true;
                }
                if ui.button("📂 Load settings").clicked() {
                    state.load_requested = true;
                }
            });

            // Show status message if any
            if let Some(ref msg) = state.status_message {
                ui.label(msg);
            }

            ui.separator();

            ui.label(format!("Generation: {}", world.generation));
            ui.label(format!("Alive: {} / {}", alive, world.birds.len()));
            ui.label(format!("Time: {:.1}s", world.time));

            ui.separator();

            ui.label("Mutation Rate");
            ui.add(egui::Slider::new(&mut params.mutation_rate, 0.0..=0.2));

            ui.separator();

            ui.heading("Birds Alive");
            draw_time_series_plot(ui, "alive_plot", &state.alive_history, "Time/s", "Alive %");

            ui.separator();

            ui.heading("Best Fitness");
            draw_time_series_plot(
                ui,
                "fitness_plot",
                &state.fitness_history,
                "Generation",
                "Fitness",
            );
        });
}

fn draw_time_series_plot(
    ui: &mut egui::Ui,
    id: &str,
    data: &VecDeque<(f64, f64)>,
    x_label: &str,
    y_label: &str,
) {
    if data.is_empty() {
        ui.label("Collecting data...");
        return;
    }

    let points: PlotPoints = data.iter().map(|&(x, y)| [x, y]).collect();
    let line = Line::new(points);

    Plot::new(id)
        .height(150.0)
        .show_axes([true, true])
        .label_formatter(|_name, value| {
            format!("{}: {:.1}\n{}: {:.2}", x_label, value.x, y_label, value.y)
        })
        .show(ui, |plot_ui| {
            plot_ui.line(line);
        });
}
